//! The schedule produced by one generation run.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::history::AttendeeHistory;
use crate::placement::PlacementStats;
use crate::session::{AttendeeId, Session, session_length};

/// Ordered sessions of a run, with the attendance history that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    sessions: Vec<Session>,
    history: AttendeeHistory,
    stats: PlacementStats,
}

impl Schedule {
    pub(crate) fn new(
        sessions: Vec<Session>,
        history: AttendeeHistory,
        stats: PlacementStats,
    ) -> Self {
        Self {
            sessions,
            history,
            stats,
        }
    }

    /// Sessions in placement order.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn stats(&self) -> &PlacementStats {
        &self.stats
    }

    /// Number of attendees the run tracked.
    pub fn num_attendees(&self) -> usize {
        self.history.len()
    }

    /// Sessions attended by `attendee`, in placement order.
    pub fn history(&self, attendee: AttendeeId) -> impl Iterator<Item = &Session> {
        self.history
            .positions(attendee)
            .iter()
            .filter_map(|&pos| self.sessions.get(pos))
    }

    /// Sessions starting on `date`, ordered by start time.
    ///
    /// Sessions sharing a start time keep their placement order.
    pub fn sessions_on(&self, date: NaiveDate) -> Vec<&Session> {
        let mut day: Vec<&Session> = self
            .sessions
            .iter()
            .filter(|s| s.start.date() == date)
            .collect();
        day.sort_by_key(|s| s.start);
        day
    }

    pub fn into_sessions(self) -> Vec<Session> {
        self.sessions
    }

    /// Audit the schedule against the allocation invariants.
    ///
    /// Returns every violation found; an allocator-built schedule yields none.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (i, session) in self.sessions.iter().enumerate() {
            if session.end != session.start + session_length() {
                violations.push(Violation::WrongDuration { session: i });
            }
            if session.attendee_count() > session.room.capacity as usize {
                violations.push(Violation::OverCapacity {
                    session: i,
                    attendees: session.attendee_count(),
                    capacity: session.room.capacity,
                });
            }

            for (j, other) in self.sessions.iter().enumerate().skip(i + 1) {
                if !session.overlaps(other) {
                    continue;
                }
                if session.room.name == other.room.name {
                    violations.push(Violation::RoomClash {
                        first: i,
                        second: j,
                        room: session.room.name.clone(),
                    });
                }
                if session.teacher == other.teacher {
                    violations.push(Violation::TeacherClash {
                        first: i,
                        second: j,
                        teacher: session.teacher.clone(),
                    });
                }
                if let Some(&attendee) = session.attendees.intersection(&other.attendees).next() {
                    violations.push(Violation::AttendeeClash {
                        first: i,
                        second: j,
                        attendee,
                    });
                }
            }
        }

        let mut seen: BTreeSet<(AttendeeId, &str, &str)> = BTreeSet::new();
        for session in &self.sessions {
            for &attendee in &session.attendees {
                let key = (attendee, session.topic.as_str(), session.session_type.as_str());
                if !seen.insert(key) {
                    violations.push(Violation::RepeatedCombination {
                        attendee,
                        topic: session.topic.clone(),
                        session_type: session.session_type.clone(),
                    });
                }
            }
        }

        violations
    }
}

/// A broken allocation invariant. Session fields are schedule positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    RoomClash { first: usize, second: usize, room: String },
    TeacherClash { first: usize, second: usize, teacher: String },
    AttendeeClash { first: usize, second: usize, attendee: AttendeeId },
    OverCapacity { session: usize, attendees: usize, capacity: u32 },
    RepeatedCombination { attendee: AttendeeId, topic: String, session_type: String },
    WrongDuration { session: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RoomClash { first, second, room } => {
                write!(f, "sessions {} and {} overlap in room {}", first, second, room)
            }
            Violation::TeacherClash { first, second, teacher } => {
                write!(f, "sessions {} and {} overlap with teacher {}", first, second, teacher)
            }
            Violation::AttendeeClash { first, second, attendee } => {
                write!(f, "sessions {} and {} overlap with attendee {}", first, second, attendee)
            }
            Violation::OverCapacity { session, attendees, capacity } => write!(
                f,
                "session {} has {} attendees for a capacity of {}",
                session, attendees, capacity
            ),
            Violation::RepeatedCombination { attendee, topic, session_type } => write!(
                f,
                "attendee {} attends {}/{} more than once",
                attendee, topic, session_type
            ),
            Violation::WrongDuration { session } => {
                write!(f, "session {} does not last two hours", session)
            }
        }
    }
}
