//! Domain error types.

use shared::duration::DurationError;
use thiserror::Error;

use crate::services::platform::PlatformError;

/// Failure of a usage query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageError {
    /// A contract violation inside this crate, e.g. a negative duration.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The platform query mechanism itself failed.
    #[error("Platform query failed: {0}")]
    PlatformQueryFailed(String),
}

impl From<DurationError> for UsageError {
    fn from(err: DurationError) -> Self {
        UsageError::InvalidArgument(err.to_string())
    }
}

impl From<PlatformError> for UsageError {
    fn from(err: PlatformError) -> Self {
        UsageError::PlatformQueryFailed(err.to_string())
    }
}
