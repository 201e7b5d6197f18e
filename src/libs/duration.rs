//! Elapsed-time arithmetic for reading sessions.
//!
//! All functions here are pure. Every subtraction is clamped at zero so a
//! backward jump of the system clock can never produce a negative duration.

use chrono::{DateTime, Utc};

/// Whole seconds from `from` to `to`, or zero when `to` precedes `from`.
pub fn clamped_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().max(0)
}

/// Elapsed reading time given the banked seconds and the open segment.
///
/// `open_segment_start` is `None` while paused: the open segment then
/// contributes nothing and the banked amount is the whole answer.
pub fn elapsed_seconds(accumulated_seconds: i64, open_segment_start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let banked = accumulated_seconds.max(0);
    match open_segment_start {
        Some(resumed_at) => banked + clamped_seconds(resumed_at, now),
        None => banked,
    }
}

/// The instant `minutes` after `from`, or `None` when it is not representable.
pub fn minutes_after(from: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    let seconds = minutes.max(0).checked_mul(60)?;
    from.checked_add_signed(chrono::Duration::try_seconds(seconds)?)
}
