//! Session types: the rooms sessions are held in and the sessions themselves.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Unique identifier for an attendee (dense, `0..num_attendees`).
pub type AttendeeId = u32;

/// Length of every session, in hours.
pub const SESSION_HOURS: i64 = 2;

/// Length of every session as a duration.
pub fn session_length() -> Duration {
    Duration::hours(SESSION_HOURS)
}

/// A room sessions can be held in.
///
/// Rooms are identified by name within a run; two rooms are equal only if
/// both name and capacity match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Maximum number of simultaneous attendees.
    pub capacity: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// One scheduled meeting of a (topic, session type) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub topic: String,
    pub session_type: String,
    pub teacher: String,
    pub room: Room,
    pub start: NaiveDateTime,
    /// Always `start + 2h`.
    pub end: NaiveDateTime,
    pub attendees: BTreeSet<AttendeeId>,
}

impl Session {
    /// Whether the session is in progress at `time` (`start <= time < end`).
    pub fn is_running_at(&self, time: NaiveDateTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether the `[start, end)` intervals of two sessions intersect.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this session carries the given combination.
    pub fn covers(&self, topic: &str, session_type: &str) -> bool {
        self.topic == topic && self.session_type == session_type
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }
}
