//! Placement outcomes: what happened to each (slot, topic, type) attempt.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Why an attempt produced no session.
///
/// Variants are listed in the order the checks run; the first failing check
/// is the one reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Topic or session type index is outside the configured lists.
    UnknownCombination,
    /// Slot hour falls outside the operating window.
    OutsideWindow,
    NoRoom,
    NoTeacher,
    /// Every attendee is already busy at this time.
    NoAttendees,
    /// Every free attendee has already attended this combination.
    NoEligibleAttendees,
}

impl SkipReason {
    pub fn name(&self) -> &'static str {
        match self {
            SkipReason::UnknownCombination => "unknown_combination",
            SkipReason::OutsideWindow => "outside_window",
            SkipReason::NoRoom => "no_room",
            SkipReason::NoTeacher => "no_teacher",
            SkipReason::NoAttendees => "no_attendees",
            SkipReason::NoEligibleAttendees => "no_eligible_attendees",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single placement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A session was appended at this position of the schedule.
    Placed(usize),
    Skipped(SkipReason),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

/// Tally of placement outcomes over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub attempts: usize,
    pub placed: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl PlacementStats {
    pub fn record(&mut self, placement: Placement) {
        self.attempts += 1;
        match placement {
            Placement::Placed(_) => self.placed += 1,
            Placement::Skipped(reason) => *self.skipped.entry(reason).or_default() += 1,
        }
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

impl fmt::Display for PlacementStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Placement Statistics:")?;
        writeln!(f, "  Attempts: {}", self.attempts)?;
        writeln!(f, "  Placed: {}", self.placed)?;
        for (reason, count) in &self.skipped {
            writeln!(f, "  Skipped ({}): {}", reason, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tallies_outcomes() {
        let mut stats = PlacementStats::default();
        stats.record(Placement::Placed(0));
        stats.record(Placement::Skipped(SkipReason::NoRoom));
        stats.record(Placement::Skipped(SkipReason::NoRoom));
        stats.record(Placement::Skipped(SkipReason::NoEligibleAttendees));

        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.skipped_for(SkipReason::NoRoom), 2);
        assert_eq!(stats.skipped_for(SkipReason::NoTeacher), 0);
        assert_eq!(stats.total_skipped(), 3);
    }

    #[test]
    fn test_display_lists_reasons() {
        let mut stats = PlacementStats::default();
        stats.record(Placement::Skipped(SkipReason::OutsideWindow));
        let text = stats.to_string();
        assert!(text.contains("Attempts: 1"));
        assert!(text.contains("Skipped (outside_window): 1"));
    }
}
