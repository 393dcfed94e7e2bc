//! Session Kernel: greedy allocation of workshop sessions.
//!
//! Sessions are (topic, session type) meetings placed into a fixed grid of
//! four daily slots. Each placement picks a free room, one of the topic's two
//! free teachers, and as many eligible attendees as the room holds.
//!
//! ## Guarantees
//!
//! - Overlapping sessions never share a room, a teacher or an attendee
//! - No session exceeds its room's capacity
//! - No attendee attends the same combination twice
//!
//! Completeness is not guaranteed: attempts that cannot be satisfied are
//! skipped and never revisited.

pub mod allocator;
pub mod availability;
pub mod config;
pub mod history;
pub mod placement;
pub mod schedule;
pub mod session;

pub use allocator::{Allocator, generate};
pub use config::{
    AllocatorConfig, ConfigIssue, MAX_ATTENDEES, MAX_DAYS, OperatingWindow, SLOT_HOURS,
};
pub use history::AttendeeHistory;
pub use placement::{Placement, PlacementStats, SkipReason};
pub use schedule::{Schedule, Violation};
pub use session::{AttendeeId, Room, Session};
