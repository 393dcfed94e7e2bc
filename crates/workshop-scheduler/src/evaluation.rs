//! Post-hoc evaluation of a generated schedule.
//!
//! Captures metrics like:
//! - Room utilization over the slot grid
//! - Teacher workload
//! - Session counts per topic and per session type
//! - Attendee coverage of the topic × type combinations

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use session_kernel::{AllocatorConfig, PlacementStats, Schedule};

/// How completely attendees covered the combination grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeCoverage {
    /// Attendees who attended every combination.
    pub complete: usize,
    pub incomplete: usize,
    /// Mean number of distinct combinations attended.
    pub avg_completion: f64,
}

/// Metrics computed from a finished schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Percentage of slots each room hosts a session in.
    pub room_utilization: BTreeMap<String, f64>,
    /// Sessions taught per teacher.
    pub teacher_workload: BTreeMap<String, usize>,
    pub topic_distribution: BTreeMap<String, usize>,
    pub type_distribution: BTreeMap<String, usize>,
    pub attendee_coverage: AttendeeCoverage,
    pub placement: PlacementStats,
}

impl Evaluation {
    /// Evaluate `schedule` against the configuration that produced it.
    ///
    /// Every configured room, teacher, topic and type appears in the output,
    /// with zero when unused.
    pub fn new(config: &AllocatorConfig, schedule: &Schedule) -> Self {
        let sessions = schedule.sessions();

        let mut room_sessions: BTreeMap<String, usize> = config
            .rooms
            .iter()
            .map(|room| (room.name.clone(), 0))
            .collect();
        let mut teacher_workload: BTreeMap<String, usize> = config
            .topics
            .iter()
            .flat_map(|topic| AllocatorConfig::teachers_for(topic))
            .map(|teacher| (teacher, 0))
            .collect();
        let mut topic_distribution = zero_counts(&config.topics);
        let mut type_distribution = zero_counts(&config.session_types);

        for session in sessions {
            *room_sessions.entry(session.room.name.clone()).or_default() += 1;
            *teacher_workload.entry(session.teacher.clone()).or_default() += 1;
            *topic_distribution.entry(session.topic.clone()).or_default() += 1;
            *type_distribution
                .entry(session.session_type.clone())
                .or_default() += 1;
        }

        let total_slots = config.slot_count();
        let room_utilization = room_sessions
            .into_iter()
            .map(|(room, count)| {
                let utilization = if total_slots == 0 {
                    0.0
                } else {
                    count as f64 / total_slots as f64 * 100.0
                };
                (room, utilization)
            })
            .collect();

        Self {
            room_utilization,
            teacher_workload,
            topic_distribution,
            type_distribution,
            attendee_coverage: attendee_coverage(config, schedule),
            placement: schedule.stats().clone(),
        }
    }
}

fn zero_counts(names: &[String]) -> BTreeMap<String, usize> {
    names.iter().map(|name| (name.clone(), 0)).collect()
}

fn attendee_coverage(config: &AllocatorConfig, schedule: &Schedule) -> AttendeeCoverage {
    let combinations = config.combination_count();
    let mut complete = 0;
    let mut incomplete = 0;
    let mut attended_total = 0;

    for attendee in 0..config.num_attendees {
        let attended: BTreeSet<(&str, &str)> = schedule
            .history(attendee)
            .map(|s| (s.topic.as_str(), s.session_type.as_str()))
            .collect();
        attended_total += attended.len();

        if combinations > 0 && attended.len() == combinations {
            complete += 1;
        } else {
            incomplete += 1;
        }
    }

    let avg_completion = if config.num_attendees == 0 {
        0.0
    } else {
        attended_total as f64 / f64::from(config.num_attendees)
    };

    AttendeeCoverage {
        complete,
        incomplete,
        avg_completion,
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Schedule Evaluation Results ===")?;

        writeln!(f, "\nRoom Utilization:")?;
        for (room, utilization) in &self.room_utilization {
            writeln!(f, "  {}: {:.1}%", room, utilization)?;
        }

        writeln!(f, "\nTeacher Workload:")?;
        for (teacher, sessions) in &self.teacher_workload {
            writeln!(f, "  {}: {} sessions", teacher, sessions)?;
        }

        writeln!(f, "\nSession Distribution:")?;
        writeln!(f, "  Topics: {:?}", self.topic_distribution)?;
        writeln!(f, "  Types: {:?}", self.type_distribution)?;

        writeln!(f, "\nAttendee Coverage:")?;
        writeln!(f, "  Complete: {}", self.attendee_coverage.complete)?;
        writeln!(f, "  Incomplete: {}", self.attendee_coverage.incomplete)?;
        writeln!(
            f,
            "  Average Completion: {:.1} combinations per attendee",
            self.attendee_coverage.avg_completion
        )?;

        write!(f, "\n{}", self.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use session_kernel::{Room, generate};

    fn evaluate(config: &AllocatorConfig, seed: u64) -> (Schedule, Evaluation) {
        let schedule = generate(config, ChaCha8Rng::seed_from_u64(seed));
        let evaluation = Evaluation::new(config, &schedule);
        (schedule, evaluation)
    }

    #[test]
    fn test_counts_match_schedule() {
        let config = AllocatorConfig::default();
        let (schedule, evaluation) = evaluate(&config, 42);

        assert_eq!(evaluation.room_utilization.len(), 6);
        assert_eq!(evaluation.teacher_workload.len(), 8);
        assert_eq!(
            evaluation.teacher_workload.values().sum::<usize>(),
            schedule.len()
        );
        assert_eq!(
            evaluation.topic_distribution.values().sum::<usize>(),
            schedule.len()
        );
        assert_eq!(
            evaluation.type_distribution.values().sum::<usize>(),
            schedule.len()
        );
        assert!(
            evaluation
                .room_utilization
                .values()
                .all(|u| (0.0..=100.0).contains(u))
        );
        assert_eq!(
            evaluation.attendee_coverage.complete + evaluation.attendee_coverage.incomplete,
            600
        );
        assert!(evaluation.attendee_coverage.avg_completion <= 16.0);
        assert_eq!(evaluation.placement.placed, schedule.len());
    }

    #[test]
    fn test_full_coverage_of_single_combination() {
        let config = AllocatorConfig {
            num_attendees: 4,
            num_days: 1,
            topics: vec!["A".to_string()],
            session_types: vec!["X".to_string()],
            rooms: vec![Room::new("Hall", 10), Room::new("Unused", 10)],
            ..Default::default()
        };
        let (schedule, evaluation) = evaluate(&config, 1);

        assert_eq!(schedule.len(), 1);
        assert_eq!(evaluation.attendee_coverage.complete, 4);
        assert_eq!(evaluation.attendee_coverage.incomplete, 0);
        assert_eq!(evaluation.attendee_coverage.avg_completion, 1.0);

        // One session across four slots.
        let used: Vec<f64> = evaluation
            .room_utilization
            .values()
            .copied()
            .filter(|u| *u > 0.0)
            .collect();
        assert_eq!(used, vec![25.0]);
    }

    #[test]
    fn test_empty_inputs_do_not_divide_by_zero() {
        let config = AllocatorConfig {
            num_attendees: 0,
            num_days: 0,
            ..Default::default()
        };
        let (_, evaluation) = evaluate(&config, 1);

        assert_eq!(evaluation.attendee_coverage.avg_completion, 0.0);
        assert!(evaluation.room_utilization.values().all(|u| *u == 0.0));
    }

    #[test]
    fn test_display_report() {
        let (_, evaluation) = evaluate(&AllocatorConfig::default(), 3);
        let report = evaluation.to_string();
        assert!(report.contains("Room Utilization:"));
        assert!(report.contains("Amphitheater"));
        assert!(report.contains("Teacher_A_1"));
        assert!(report.contains("Average Completion"));
        assert!(report.contains("Placement Statistics:"));
    }
}
