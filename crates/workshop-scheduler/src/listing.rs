//! Console listing of a schedule, day by day.

use std::fmt;

use session_kernel::{AllocatorConfig, Schedule};

/// Displays every configured day with its sessions in start-time order.
pub struct DayListing<'a> {
    config: &'a AllocatorConfig,
    schedule: &'a Schedule,
}

impl<'a> DayListing<'a> {
    pub fn new(config: &'a AllocatorConfig, schedule: &'a Schedule) -> Self {
        Self { config, schedule }
    }
}

impl fmt::Display for DayListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in 0..self.config.num_days {
            writeln!(f, "Day {} ({}):", day + 1, self.config.date_of(day))?;

            let sessions = self.schedule.sessions_on(self.config.date_of(day));
            if sessions.is_empty() {
                writeln!(f, "  [no sessions]")?;
                continue;
            }

            for session in sessions {
                writeln!(
                    f,
                    "  {} - {}  {:<12} {:<12} {:<14} {:<14} {:>4} attendees",
                    session.start.format("%H:%M"),
                    session.end.format("%H:%M"),
                    session.topic,
                    session.session_type,
                    session.room.name,
                    session.teacher,
                    session.attendee_count()
                )?;
            }
        }
        Ok(())
    }
}
