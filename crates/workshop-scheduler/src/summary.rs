//! Day-grouped schedule summaries for transport and display.

use serde::{Deserialize, Serialize};
use session_kernel::{AllocatorConfig, Schedule, Session};

/// One session as seen by consumers: slot time, combination, room, head count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Start time, `HH:MM`.
    pub time: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub room: String,
    /// Number of attendees.
    pub attendees: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            time: session.start.format("%H:%M").to_string(),
            topic: session.topic.clone(),
            session_type: session.session_type.clone(),
            room: session.room.name.clone(),
            attendees: session.attendee_count(),
        }
    }
}

/// Sessions of one day, ordered by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// 1-based day number.
    pub day: u32,
    pub sessions: Vec<SessionSummary>,
}

/// Summarize a schedule into one entry per configured day, including days
/// that received no sessions.
pub fn summarize(config: &AllocatorConfig, schedule: &Schedule) -> Vec<DaySummary> {
    (0..config.num_days)
        .map(|day| DaySummary {
            day: day + 1,
            sessions: schedule
                .sessions_on(config.date_of(day))
                .into_iter()
                .map(SessionSummary::from)
                .collect(),
        })
        .collect()
}
