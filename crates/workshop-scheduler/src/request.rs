//! Configuration boundary: the request payload and its conversion into an
//! allocator configuration.
//!
//! Payloads use camelCase keys and every field is optional; missing fields
//! fall back to the workshop defaults. Times are wall-clock `HH:MM` strings.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use session_kernel::{AllocatorConfig, ConfigIssue, OperatingWindow, Room};
use thiserror::Error;

/// Format accepted for `startTime` / `endTime`.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// A configuration value rejected before generation runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid time {value:?}: expected HH:MM")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Invalid(#[from] ConfigIssue),
}

/// Room entry of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    pub capacity: u32,
}

/// Schedule generation request, as accepted over HTTP or from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleRequest {
    pub num_attendees: u32,
    pub num_days: u32,
    pub topics: Vec<String>,
    pub session_types: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub rooms: Vec<RoomSpec>,
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        let defaults = AllocatorConfig::default();
        Self {
            num_attendees: defaults.num_attendees,
            num_days: defaults.num_days,
            topics: defaults.topics,
            session_types: defaults.session_types,
            start_time: defaults.window.start.format(CLOCK_FORMAT).to_string(),
            end_time: defaults.window.end.format(CLOCK_FORMAT).to_string(),
            rooms: defaults
                .rooms
                .into_iter()
                .map(|room| RoomSpec {
                    name: room.name,
                    capacity: room.capacity,
                })
                .collect(),
        }
    }
}

impl ScheduleRequest {
    /// Parse times, build rooms and validate.
    pub fn into_config(self) -> Result<AllocatorConfig, ConfigError> {
        let window = OperatingWindow::new(
            parse_clock(&self.start_time)?,
            parse_clock(&self.end_time)?,
        );

        let config = AllocatorConfig {
            num_attendees: self.num_attendees,
            num_days: self.num_days,
            topics: self.topics,
            session_types: self.session_types,
            rooms: self
                .rooms
                .into_iter()
                .map(|spec| Room::new(spec.name, spec.capacity))
                .collect(),
            window,
            ..Default::default()
        };
        config.validate()?;

        Ok(config)
    }
}

/// Parse a wall-clock `HH:MM` value.
pub fn parse_clock(value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|source| {
        ConfigError::InvalidTime {
            value: value.to_string(),
            source,
        }
    })
}

/// Load a request from a JSON (`.json`) or TOML (anything else) file.
pub fn load_request(path: &Path) -> Result<ScheduleRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let request = if is_json {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON config {}", path.display()))?
    } else {
        toml::from_str(&text)
            .with_context(|| format!("failed to parse TOML config {}", path.display()))?
    };

    Ok(request)
}

/// Resolve the allocator configuration from an optional config file.
pub fn resolve_config(path: Option<&Path>) -> Result<AllocatorConfig> {
    let request = match path {
        Some(path) => load_request(path)?,
        None => ScheduleRequest::default(),
    };
    let config = request
        .into_config()
        .context("invalid schedule configuration")?;
    Ok(config)
}
