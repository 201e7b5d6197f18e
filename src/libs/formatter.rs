//! Duration and timestamp formatting for console output.
//!
//! ## Formats
//!
//! - Session clocks use "HH:MM:SS" so a running timer visibly ticks
//! - Totals use "HH:MM", matching how long spans are usually read
//! - Negative inputs are shown as zero
//!
//! ```rust
//! use readlog::libs::formatter::{format_duration, format_seconds};
//! use chrono::Duration;
//!
//! assert_eq!(format_seconds(3725), "01:02:05");
//! assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
//! ```

use chrono::{DateTime, Duration, Local, Utc};

/// Formats whole seconds as "HH:MM:SS".
pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// Formats a chrono::Duration as "HH:MM".
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats an instant in the local timezone as "YYYY-MM-DD HH:MM".
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
