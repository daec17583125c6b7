//! Human-readable breakdown of millisecond durations.

use std::fmt;

use thiserror::Error;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Error type for duration formatting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("Duration must be greater than zero: got {0} ms")]
    Negative(i64),
}

/// A duration split into whole hours, minutes and seconds.
///
/// Sub-second remainders are truncated, never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBreakdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationBreakdown {
    /// Splits `millis` into hours, minutes and seconds.
    pub fn from_millis(millis: i64) -> Result<Self, DurationError> {
        if millis < 0 {
            return Err(DurationError::Negative(millis));
        }

        let hours = millis / MILLIS_PER_HOUR;
        let remaining = millis - hours * MILLIS_PER_HOUR;
        let minutes = remaining / MILLIS_PER_MINUTE;
        let remaining = remaining - minutes * MILLIS_PER_MINUTE;
        let seconds = remaining / MILLIS_PER_SECOND;

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Total milliseconds represented by the whole units.
    pub fn as_millis(&self) -> i64 {
        self.hours * MILLIS_PER_HOUR
            + self.minutes * MILLIS_PER_MINUTE
            + self.seconds * MILLIS_PER_SECOND
    }
}

impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} h {} m {} s", self.hours, self.minutes, self.seconds)
    }
}

/// Formats a millisecond duration as `"{h} h {m} m {s} s"`.
pub fn format_duration(millis: i64) -> Result<String, DurationError> {
    DurationBreakdown::from_millis(millis).map(|breakdown| breakdown.to_string())
}
