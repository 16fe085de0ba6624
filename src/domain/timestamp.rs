//! Unix-second timestamps.
//!
//! Every time field in the model is whole seconds since the epoch. Venues
//! often report milliseconds (13 digits) or microseconds; `unix_seconds`
//! folds those down.

use chrono::Utc;

/// Unix time in seconds.
pub type UnixTime = i64;

/// Anything at or above this is treated as milliseconds (year 2286 in seconds).
const MILLIS_THRESHOLD: i64 = 10_000_000_000;
const MICROS_THRESHOLD: i64 = 10_000_000_000_000;

/// Normalize a venue timestamp to seconds.
#[must_use]
pub const fn unix_seconds(raw: i64) -> UnixTime {
    if raw >= MICROS_THRESHOLD {
        raw / 1_000_000
    } else if raw >= MILLIS_THRESHOLD {
        raw / 1_000
    } else {
        raw
    }
}

/// Current time in seconds.
#[must_use]
pub fn now() -> UnixTime {
    Utc::now().timestamp()
}
