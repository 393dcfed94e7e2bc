//! The allocator: a single greedy pass over the slot grid.
//!
//! For each day, each slot hour and each (topic, session type) pair, the
//! allocator makes exactly one placement attempt. There is no backtracking:
//! an attempt that finds no room, teacher or eligible attendee leaves its
//! combination uncovered for that slot.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::index;
use tracing::{debug, info, trace};

use crate::availability::{available_attendees, available_rooms, available_teachers};
use crate::config::AllocatorConfig;
use crate::history::AttendeeHistory;
use crate::placement::{Placement, PlacementStats, SkipReason};
use crate::schedule::Schedule;
use crate::session::{AttendeeId, Session, session_length};

/// Owns the evolving schedule of one generation run.
///
/// All random choices draw from the injected `rng`, so a seeded generator
/// makes the run reproducible.
pub struct Allocator<R> {
    config: AllocatorConfig,
    rng: R,
    /// Teacher pool per topic, indexed like `config.topics`.
    teachers: Vec<Vec<String>>,
    sessions: Vec<Session>,
    history: AttendeeHistory,
    stats: PlacementStats,
}

impl<R: Rng> Allocator<R> {
    pub fn new(config: AllocatorConfig, rng: R) -> Self {
        let teachers = config
            .topics
            .iter()
            .map(|topic| AllocatorConfig::teachers_for(topic))
            .collect();
        let history = AttendeeHistory::new(config.num_attendees);

        Self {
            config,
            rng,
            teachers,
            sessions: Vec::new(),
            history,
            stats: PlacementStats::default(),
        }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Sessions placed so far.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Run the full pass and hand over the finished schedule.
    pub fn generate(mut self) -> Schedule {
        for day in 0..self.config.num_days {
            for time in self.config.slot_times(day) {
                for topic in 0..self.config.topics.len() {
                    for session_type in 0..self.config.session_types.len() {
                        let placement = self.attempt(time, topic, session_type);
                        self.stats.record(placement);
                    }
                }
            }
        }

        info!(
            days = self.config.num_days,
            attempts = self.stats.attempts,
            placed = self.stats.placed,
            skipped = self.stats.total_skipped(),
            "Schedule generated"
        );

        Schedule::new(self.sessions, self.history, self.stats)
    }

    /// One placement attempt for topic index `topic` and session type index
    /// `session_type` starting at `time`.
    ///
    /// Checks run in order (window, rooms, teachers, attendees, eligibility)
    /// and the first empty result ends the attempt without side effects.
    /// Indices outside the configured lists yield
    /// [`SkipReason::UnknownCombination`].
    pub fn attempt(
        &mut self,
        time: NaiveDateTime,
        topic: usize,
        session_type: usize,
    ) -> Placement {
        let placement = self.try_place(time, topic, session_type);
        if let Placement::Skipped(reason) = placement {
            trace!(
                %time,
                topic = self.config.topics.get(topic).map(String::as_str),
                session_type = self.config.session_types.get(session_type).map(String::as_str),
                %reason,
                "Placement skipped"
            );
        }
        placement
    }

    fn try_place(&mut self, time: NaiveDateTime, topic: usize, session_type: usize) -> Placement {
        let (Some(topic_name), Some(type_name), Some(pool)) = (
            self.config.topics.get(topic),
            self.config.session_types.get(session_type),
            self.teachers.get(topic),
        ) else {
            return Placement::Skipped(SkipReason::UnknownCombination);
        };

        if !self.config.window.admits(time) {
            return Placement::Skipped(SkipReason::OutsideWindow);
        }

        let rooms = available_rooms(&self.config.rooms, &self.sessions, time);
        if rooms.is_empty() {
            return Placement::Skipped(SkipReason::NoRoom);
        }

        let teachers = available_teachers(pool, &self.sessions, time);
        if teachers.is_empty() {
            return Placement::Skipped(SkipReason::NoTeacher);
        }

        let free = available_attendees(self.config.num_attendees, &self.sessions, time);
        if free.is_empty() {
            return Placement::Skipped(SkipReason::NoAttendees);
        }

        let eligible: Vec<AttendeeId> = free
            .into_iter()
            .filter(|&a| !self.history.has_attended(a, &self.sessions, topic_name, type_name))
            .collect();
        if eligible.is_empty() {
            return Placement::Skipped(SkipReason::NoEligibleAttendees);
        }

        let Some(&room) = rooms.choose(&mut self.rng) else {
            return Placement::Skipped(SkipReason::NoRoom);
        };
        let Some(&teacher) = teachers.choose(&mut self.rng) else {
            return Placement::Skipped(SkipReason::NoTeacher);
        };

        let amount = eligible.len().min(room.capacity as usize);
        let attendees: BTreeSet<AttendeeId> = index::sample(&mut self.rng, eligible.len(), amount)
            .into_iter()
            .map(|i| eligible[i])
            .collect();

        let session = Session {
            topic: topic_name.clone(),
            session_type: type_name.clone(),
            teacher: teacher.to_string(),
            room: room.clone(),
            start: time,
            end: time + session_length(),
            attendees,
        };

        let position = self.sessions.len();
        for &attendee in &session.attendees {
            self.history.record(attendee, position);
        }
        debug!(
            %time,
            topic = %session.topic,
            session_type = %session.session_type,
            room = %session.room.name,
            teacher = %session.teacher,
            attendees = session.attendee_count(),
            "Session placed"
        );
        self.sessions.push(session);

        Placement::Placed(position)
    }
}

/// Build an allocator for `config` and run it to completion.
pub fn generate<R: Rng>(config: &AllocatorConfig, rng: R) -> Schedule {
    Allocator::new(config.clone(), rng).generate()
}
