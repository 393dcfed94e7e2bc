//! Configuration types for the allocator.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::Room;

/// Start hours of the daily slots. Fixed regardless of the operating window.
pub const SLOT_HOURS: [u32; 4] = [8, 11, 14, 17];

/// Number of teachers available per topic.
pub const TEACHERS_PER_TOPIC: usize = 2;

/// Largest attendee pool `validate` accepts.
pub const MAX_ATTENDEES: u32 = 100_000;

/// Longest workshop, in days, `validate` accepts.
pub const MAX_DAYS: u32 = 366;

/// Daily operating window.
///
/// Only the hour component is consulted: a slot is admitted when its hour is
/// in `[start.hour, end.hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OperatingWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether a session may begin at `time`.
    pub fn admits(&self, time: NaiveDateTime) -> bool {
        let hour = time.hour();
        hour >= self.start.hour() && hour < self.end.hour()
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid time"),
            end: NaiveTime::from_hms_opt(18, 0, 0).expect("18:00 is a valid time"),
        }
    }
}

/// Inputs of one generation run.
///
/// Nothing here is validated by the allocator itself; malformed values
/// degrade to an empty or partial schedule. Callers that want to reject bad
/// input up front use [`AllocatorConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Attendee ids are `0..num_attendees`.
    pub num_attendees: u32,
    pub num_days: u32,
    /// Topics, in iteration order.
    pub topics: Vec<String>,
    /// Session types, in iteration order.
    pub session_types: Vec<String>,
    pub rooms: Vec<Room>,
    pub window: OperatingWindow,
    /// Calendar date of day 0.
    pub base_date: NaiveDate,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        let mut rooms: Vec<Room> = (1..=5)
            .map(|i| Room::new(format!("Classroom {}", i), 60))
            .collect();
        rooms.push(Room::new("Amphitheater", 180));

        Self {
            num_attendees: 600,
            num_days: 5,
            topics: ["A", "B", "C", "D"].map(String::from).to_vec(),
            session_types: ["Theoretical", "Practical", "Historical", "Test"]
                .map(String::from)
                .to_vec(),
            rooms,
            window: OperatingWindow::default(),
            base_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("2024-01-01 is a valid date"),
        }
    }
}

/// A configuration value the allocator would silently under-produce on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("no topics configured")]
    NoTopics,
    #[error("topic {0:?} listed more than once")]
    DuplicateTopic(String),
    #[error("no session types configured")]
    NoSessionTypes,
    #[error("session type {0:?} listed more than once")]
    DuplicateSessionType(String),
    #[error("no rooms configured")]
    NoRooms,
    #[error("room {0:?} listed more than once")]
    DuplicateRoom(String),
    #[error("room {0:?} has zero capacity")]
    EmptyRoom(String),
    #[error("operating window {start} - {end} is empty")]
    EmptyWindow { start: NaiveTime, end: NaiveTime },
    #[error("{count} attendees requested, at most {max} supported")]
    TooManyAttendees { count: u32, max: u32 },
    #[error("{count} days requested, at most {max} supported")]
    TooManyDays { count: u32, max: u32 },
}

impl AllocatorConfig {
    /// Check the preconditions the allocator assumes but does not enforce.
    ///
    /// Zero attendees or zero days are accepted: they produce an empty
    /// schedule, which is a meaningful answer. Counts above [`MAX_ATTENDEES`]
    /// and [`MAX_DAYS`] are rejected.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.num_attendees > MAX_ATTENDEES {
            return Err(ConfigIssue::TooManyAttendees {
                count: self.num_attendees,
                max: MAX_ATTENDEES,
            });
        }
        if self.num_days > MAX_DAYS {
            return Err(ConfigIssue::TooManyDays {
                count: self.num_days,
                max: MAX_DAYS,
            });
        }
        if self.topics.is_empty() {
            return Err(ConfigIssue::NoTopics);
        }
        if let Some(dup) = first_duplicate(self.topics.iter().map(String::as_str)) {
            return Err(ConfigIssue::DuplicateTopic(dup.to_string()));
        }
        if self.session_types.is_empty() {
            return Err(ConfigIssue::NoSessionTypes);
        }
        if let Some(dup) = first_duplicate(self.session_types.iter().map(String::as_str)) {
            return Err(ConfigIssue::DuplicateSessionType(dup.to_string()));
        }
        if self.rooms.is_empty() {
            return Err(ConfigIssue::NoRooms);
        }
        if let Some(dup) = first_duplicate(self.rooms.iter().map(|r| r.name.as_str())) {
            return Err(ConfigIssue::DuplicateRoom(dup.to_string()));
        }
        if let Some(room) = self.rooms.iter().find(|r| r.capacity == 0) {
            return Err(ConfigIssue::EmptyRoom(room.name.clone()));
        }
        if self.window.start >= self.window.end {
            return Err(ConfigIssue::EmptyWindow {
                start: self.window.start,
                end: self.window.end,
            });
        }
        Ok(())
    }

    /// The two teachers of a topic: `Teacher_<topic>_1` and `Teacher_<topic>_2`.
    pub fn teachers_for(topic: &str) -> Vec<String> {
        (1..=TEACHERS_PER_TOPIC)
            .map(|ordinal| format!("Teacher_{}_{}", topic, ordinal))
            .collect()
    }

    /// Calendar date of a day index.
    pub fn date_of(&self, day: u32) -> NaiveDate {
        self.base_date + Duration::days(i64::from(day))
    }

    /// Slot start times of a day, in slot order.
    pub fn slot_times(&self, day: u32) -> impl Iterator<Item = NaiveDateTime> + use<> {
        let date = self.date_of(day);
        SLOT_HOURS
            .into_iter()
            .filter_map(move |hour| date.and_hms_opt(hour, 0, 0))
    }

    /// Total number of slots in the grid.
    pub fn slot_count(&self) -> usize {
        SLOT_HOURS.len() * self.num_days as usize
    }

    /// Number of distinct (topic, session type) combinations.
    pub fn combination_count(&self) -> usize {
        self.topics.len() * self.session_types.len()
    }
}

fn first_duplicate<'a>(items: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    items.into_iter().find(|item| !seen.insert(*item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AllocatorConfig::default();
        assert_eq!(config.num_attendees, 600);
        assert_eq!(config.num_days, 5);
        assert_eq!(config.topics, vec!["A", "B", "C", "D"]);
        assert_eq!(config.session_types.len(), 4);
        assert_eq!(config.rooms.len(), 6);
        assert_eq!(config.rooms.iter().map(|r| r.capacity).sum::<u32>(), 480);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_uses_hours_only() {
        let window = OperatingWindow::new(time(8, 30), time(17, 59));
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(window.admits(day.and_hms_opt(8, 0, 0).unwrap()));
        assert!(window.admits(day.and_hms_opt(16, 0, 0).unwrap()));
        assert!(!window.admits(day.and_hms_opt(17, 0, 0).unwrap()));
        assert!(!window.admits(day.and_hms_opt(7, 0, 0).unwrap()));
    }

    #[test]
    fn test_slot_times() {
        let config = AllocatorConfig::default();
        let slots: Vec<_> = config.slot_times(2).collect();
        assert_eq!(slots.len(), 4);
        assert_eq!(
            slots.iter().map(|t| t.hour()).collect::<Vec<_>>(),
            SLOT_HOURS.to_vec()
        );
        assert!(slots.iter().all(|t| t.date() == NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
        assert_eq!(config.slot_count(), 20);
        assert_eq!(config.combination_count(), 16);
    }

    #[test]
    fn test_teachers_for() {
        assert_eq!(
            AllocatorConfig::teachers_for("B"),
            vec!["Teacher_B_1".to_string(), "Teacher_B_2".to_string()]
        );
    }

    #[test]
    fn test_validate_rejects_bad_rooms() {
        let mut config = AllocatorConfig::default();
        config.rooms.clear();
        assert_eq!(config.validate(), Err(ConfigIssue::NoRooms));

        config.rooms = vec![Room::new("Hall", 10), Room::new("Hall", 20)];
        assert_eq!(
            config.validate(),
            Err(ConfigIssue::DuplicateRoom("Hall".to_string()))
        );

        config.rooms = vec![Room::new("Closet", 0)];
        assert_eq!(
            config.validate(),
            Err(ConfigIssue::EmptyRoom("Closet".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty_window() {
        let mut config = AllocatorConfig::default();
        config.topics.push("A".to_string());
        assert_eq!(
            config.validate(),
            Err(ConfigIssue::DuplicateTopic("A".to_string()))
        );

        let mut config = AllocatorConfig::default();
        config.session_types.clear();
        assert_eq!(config.validate(), Err(ConfigIssue::NoSessionTypes));

        let mut config = AllocatorConfig::default();
        config.window = OperatingWindow::new(time(18, 0), time(8, 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigIssue::EmptyWindow { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_zero_attendees() {
        let config = AllocatorConfig {
            num_attendees: 0,
            num_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bounds_attendees_and_days() {
        let at_limit = AllocatorConfig {
            num_attendees: MAX_ATTENDEES,
            num_days: MAX_DAYS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());

        let crowd = AllocatorConfig {
            num_attendees: 4_000_000_000,
            ..Default::default()
        };
        assert_eq!(
            crowd.validate(),
            Err(ConfigIssue::TooManyAttendees {
                count: 4_000_000_000,
                max: MAX_ATTENDEES
            })
        );

        let marathon = AllocatorConfig {
            num_days: MAX_DAYS + 1,
            ..Default::default()
        };
        assert_eq!(
            marathon.validate(),
            Err(ConfigIssue::TooManyDays {
                count: MAX_DAYS + 1,
                max: MAX_DAYS
            })
        );
    }
}
