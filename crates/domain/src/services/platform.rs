//! Platform collaborator contracts.
//!
//! Each trait covers one OS service the bridge consumes. Implementations live
//! with the host integration; [`super::MockPlatform`] implements all of them
//! for tests.

use thiserror::Error;

use crate::models::{
    ActivityLaunch, AppOpsMode, PackageLookup, PermissionResult, RawUsageRecord, UsageInterval,
};

/// Error raised by a platform service call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Security exception: {0}")]
    Security(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Other(String),
}

/// Usage-statistics query service.
#[async_trait::async_trait]
pub trait UsageStatsSource: Send + Sync {
    /// Return usage records bucketed by `interval` over `[begin_time, end_time]`.
    async fn query_usage_stats(
        &self,
        interval: UsageInterval,
        begin_time: i64,
        end_time: i64,
    ) -> Result<Vec<RawUsageRecord>, PlatformError>;
}

/// App-ops authorization service.
pub trait AppOpsService: Send + Sync {
    /// Mode of `op` for the given caller. Never fails.
    fn check_op_no_throw(&self, op: &str, uid: u32, package_name: &str) -> AppOpsMode;
}

/// Standard runtime permission check.
pub trait PermissionChecker: Send + Sync {
    fn check_calling_or_self_permission(&self, permission: &str) -> PermissionResult;
}

/// Installed-application registry.
pub trait PackageRegistry: Send + Sync {
    fn lookup(&self, package_name: &str) -> PackageLookup;
}

/// Navigation to system screens.
pub trait SettingsLauncher: Send + Sync {
    fn start_activity(&self, launch: &ActivityLaunch) -> Result<(), PlatformError>;
}
