//! Availability queries over the schedule built so far.
//!
//! Each query is a linear scan of the current sessions and is recomputed for
//! every placement attempt: sessions placed earlier at the same timestamp
//! must be visible to later attempts.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::session::{AttendeeId, Room, Session};

/// Rooms not hosting a session running at `time`, in configured order.
pub fn available_rooms<'a>(
    rooms: &'a [Room],
    sessions: &[Session],
    time: NaiveDateTime,
) -> Vec<&'a Room> {
    let occupied: HashSet<&str> = sessions
        .iter()
        .filter(|s| s.is_running_at(time))
        .map(|s| s.room.name.as_str())
        .collect();

    rooms
        .iter()
        .filter(|room| !occupied.contains(room.name.as_str()))
        .collect()
}

/// Teachers from `teachers` not teaching a session running at `time`.
pub fn available_teachers<'a>(
    teachers: &'a [String],
    sessions: &[Session],
    time: NaiveDateTime,
) -> Vec<&'a str> {
    let busy: HashSet<&str> = sessions
        .iter()
        .filter(|s| s.is_running_at(time))
        .map(|s| s.teacher.as_str())
        .collect();

    teachers
        .iter()
        .map(String::as_str)
        .filter(|teacher| !busy.contains(teacher))
        .collect()
}

/// Attendees `0..num_attendees` not in a session running at `time`, ascending.
pub fn available_attendees(
    num_attendees: u32,
    sessions: &[Session],
    time: NaiveDateTime,
) -> Vec<AttendeeId> {
    let mut busy = vec![false; num_attendees as usize];
    for session in sessions.iter().filter(|s| s.is_running_at(time)) {
        for &attendee in &session.attendees {
            if let Some(slot) = busy.get_mut(attendee as usize) {
                *slot = true;
            }
        }
    }

    (0..num_attendees)
        .filter(|&attendee| !busy[attendee as usize])
        .collect()
}
