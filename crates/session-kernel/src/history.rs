//! Per-attendee attendance history.

use crate::session::{AttendeeId, Session};

/// Sessions attended by each attendee, in placement order.
///
/// Indexed by attendee id; each entry holds positions into the schedule's
/// session list. Entries only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendeeHistory {
    entries: Vec<Vec<usize>>,
}

impl AttendeeHistory {
    pub fn new(num_attendees: u32) -> Self {
        Self {
            entries: vec![Vec::new(); num_attendees as usize],
        }
    }

    /// Number of attendees tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a session position to an attendee's history.
    ///
    /// Ids outside the tracked range are ignored.
    pub fn record(&mut self, attendee: AttendeeId, session: usize) {
        if let Some(entry) = self.entries.get_mut(attendee as usize) {
            entry.push(session);
        }
    }

    /// Session positions attended by `attendee`, oldest first.
    pub fn positions(&self, attendee: AttendeeId) -> &[usize] {
        self.entries
            .get(attendee as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `attendee` already attended a session with this combination.
    pub fn has_attended(
        &self,
        attendee: AttendeeId,
        sessions: &[Session],
        topic: &str,
        session_type: &str,
    ) -> bool {
        self.positions(attendee)
            .iter()
            .filter_map(|&pos| sessions.get(pos))
            .any(|s| s.covers(topic, session_type))
    }
}
