//! Workshop Scheduler - timetable generation for multi-day workshops.
//!
//! Wraps the allocation kernel with everything a caller needs around it:
//!
//! - A configuration boundary that parses and validates requests
//! - Day-grouped summaries for transport
//! - Post-hoc evaluation (utilization, workload, coverage)
//! - A console listing, a CLI and an HTTP endpoint

pub mod evaluation;
pub mod listing;
pub mod request;
pub mod server;
pub mod summary;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use session_kernel::{AllocatorConfig, Schedule};

pub use evaluation::{AttendeeCoverage, Evaluation};
pub use listing::DayListing;
pub use request::{
    ConfigError, RoomSpec, ScheduleRequest, load_request, parse_clock, resolve_config,
};
pub use server::{AppState, router};
pub use summary::{DaySummary, SessionSummary, summarize};

/// Generate a schedule with a ChaCha generator seeded from `seed`.
pub fn generate_seeded(config: &AllocatorConfig, seed: u64) -> Schedule {
    session_kernel::generate(config, ChaCha8Rng::seed_from_u64(seed))
}
