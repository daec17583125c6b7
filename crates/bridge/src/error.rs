use domain::UsageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Platform query failed: {0}")]
    PlatformQueryFailed(String),

    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// Body of a rejected call as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl BridgeError {
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::InvalidParams(_) => "invalid_params",
            BridgeError::InvalidArgument(_) => "invalid_argument",
            BridgeError::PlatformQueryFailed(_) => "platform_query_failed",
            BridgeError::Fixture(_) => "fixture_error",
        }
    }

    pub fn rejection(&self) -> Rejection {
        let message = match self {
            BridgeError::InvalidParams(msg)
            | BridgeError::InvalidArgument(msg)
            | BridgeError::PlatformQueryFailed(msg)
            | BridgeError::Fixture(msg) => msg.clone(),
        };

        Rejection {
            code: self.code().into(),
            message,
        }
    }
}

impl From<UsageError> for BridgeError {
    fn from(err: UsageError) -> Self {
        match err {
            UsageError::InvalidArgument(msg) => BridgeError::InvalidArgument(msg),
            UsageError::PlatformQueryFailed(msg) => BridgeError::PlatformQueryFailed(msg),
        }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::InvalidParams(err.to_string())
    }
}
