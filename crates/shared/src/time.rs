//! Millisecond timestamp helpers.

use chrono::{DateTime, TimeZone};

/// Converts a host-supplied number to integer epoch milliseconds.
///
/// Fractions are truncated toward zero; NaN maps to 0 and out-of-range values
/// saturate at the `i64` bounds.
pub fn truncate_millis(value: f64) -> i64 {
    value as i64
}

/// Returns the first and last millisecond of the calendar day containing `now`,
/// in `now`'s own time zone.
///
/// Returns `None` when local midnight does not exist in that zone on that day.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(i64, i64)> {
    let tz = now.timezone();
    let date = now.date_naive();

    let start = date
        .and_hms_opt(0, 0, 0)?
        .and_local_timezone(tz.clone())
        .earliest()?;
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)?
        .and_local_timezone(tz)
        .latest()?;

    Some((start.timestamp_millis(), end.timestamp_millis()))
}
