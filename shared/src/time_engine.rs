//! Time Engine - wall-clock snapshots for the watch faces
//!
//! Reduces a timezone-aware instant to the handful of integer fields the
//! geometry engines consume, and provides timezone lookup helpers for the UI.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use chrono_tz::Tz;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u32 = 60;
/// Seconds in one hour
pub const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;

/// Error type for time lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The string is not a known IANA timezone name
    UnknownTimezone(String),
}

impl std::fmt::Display for TimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeError::UnknownTimezone(name) => write!(f, "Invalid timezone: {}", name),
        }
    }
}

impl std::error::Error for TimeError {}

/// Calendar and time-of-day fields captured at a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSnapshot {
    /// Day of the year, 0-based (January 1st is 0)
    pub day_of_year: u32,
    /// Wall-clock seconds elapsed since local midnight (0..86399)
    pub seconds_since_midnight: u32,
}

impl TimeSnapshot {
    /// Build a snapshot from its raw fields
    pub fn new(day_of_year: u32, seconds_since_midnight: u32) -> Self {
        Self {
            day_of_year,
            seconds_since_midnight,
        }
    }

    /// Hour of the day (0-23)
    pub fn hour24(&self) -> u32 {
        self.seconds_since_midnight / SECONDS_PER_HOUR
    }

    /// Minute of the hour (0-59)
    pub fn minute(&self) -> u32 {
        (self.seconds_since_midnight % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }

    /// Second of the minute (0-59)
    pub fn second(&self) -> u32 {
        self.seconds_since_midnight % SECONDS_PER_MINUTE
    }

    /// Format the time as "hh:mm:ss" (24-hour)
    pub fn format_time(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hour24(),
            self.minute(),
            self.second()
        )
    }
}

/// Capture the current snapshot for a given timezone
pub fn snapshot_now(tz: Tz) -> TimeSnapshot {
    snapshot_at(tz, Utc::now())
}

/// Capture the snapshot for a given timezone at a specific instant
pub fn snapshot_at(tz: Tz, now_utc: DateTime<Utc>) -> TimeSnapshot {
    let local = now_utc.with_timezone(&tz);
    TimeSnapshot {
        day_of_year: local.ordinal0(),
        seconds_since_midnight: local.num_seconds_from_midnight(),
    }
}

/// Get the system's local timezone as a chrono-tz Tz
///
/// Best effort: the local abbreviation only parses for a few zones ("UTC").
pub fn system_timezone() -> Option<Tz> {
    let tz_name = Local::now().format("%Z").to_string();
    tz_name.parse::<Tz>().ok()
}

/// Parse a timezone string into a Tz
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimeError> {
    tz_str
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(tz_str.to_string()))
}

/// Search timezones by name (case-insensitive partial match)
pub fn search_timezones(query: &str) -> Vec<Tz> {
    let query_lower = query.to_lowercase();
    chrono_tz::TZ_VARIANTS
        .iter()
        .filter(|tz| tz.name().to_lowercase().contains(&query_lower))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_new_year_midnight() {
        let tz: Tz = "UTC".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let snapshot = snapshot_at(tz, instant);
        assert_eq!(snapshot, TimeSnapshot::new(0, 0));
    }

    #[test]
    fn test_snapshot_uses_local_wall_clock() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        // 2025-03-01 23:30:15 UTC is 2025-03-02 08:30:15 in Tokyo
        let instant = Utc.with_ymd_and_hms(2025, 3, 1, 23, 30, 15).unwrap();
        let snapshot = snapshot_at(tz, instant);
        assert_eq!(snapshot.day_of_year, 31 + 28 + 1);
        assert_eq!(snapshot.seconds_since_midnight, 8 * 3600 + 30 * 60 + 15);
        assert_eq!(snapshot.format_time(), "08:30:15");
    }

    #[test]
    fn test_snapshot_last_day_of_leap_year() {
        let tz: Tz = "UTC".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let snapshot = snapshot_at(tz, instant);
        assert_eq!(snapshot.day_of_year, 365);
        assert_eq!(snapshot.seconds_since_midnight, 24 * SECONDS_PER_HOUR - 1);
        assert_eq!(snapshot.format_time(), "23:59:59");
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Europe/London").is_ok());
        assert_eq!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(TimeError::UnknownTimezone("Mars/Olympus_Mons".to_string()))
        );
    }

    #[test]
    fn test_search_timezones() {
        let results = search_timezones("New_York");
        assert!(!results.is_empty());
        assert!(results.iter().any(|tz| tz.name() == "America/New_York"));
    }
}
