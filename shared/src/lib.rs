//! Shared utilities for the clock series
//!
//! Time snapshots, timezone helpers and configuration persistence.

pub mod config;
pub mod time_engine;

pub use config::{ConfigError, ConfigStore};
pub use time_engine::{
    parse_timezone, search_timezones, snapshot_at, snapshot_now, system_timezone, TimeError,
    TimeSnapshot, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
