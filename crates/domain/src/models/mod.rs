//! Domain models for the screen time bridge.

pub mod permission;
pub mod usage;

pub use permission::{
    ActivityLaunch, AppOpsMode, LaunchFlag, PackageLookup, PermissionResult, ProcessIdentity,
};
pub use usage::{
    CombinedUsage, PlatformCapabilities, RawUsageRecord, TimeRange, UsageInterval, UsageSummary,
};
