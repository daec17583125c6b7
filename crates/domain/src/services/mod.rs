//! Domain services for the screen time bridge.
//!
//! Services contain business logic that operates on domain models. Platform
//! access goes through the traits in [`platform`].

pub mod mock;
pub mod permission_gate;
pub mod platform;
pub mod usage_reporter;

pub use mock::MockPlatform;

pub use permission_gate::{resolve_grant, UsagePermissionGate};

pub use platform::{
    AppOpsService, PackageRegistry, PermissionChecker, PlatformError, SettingsLauncher,
    UsageStatsSource,
};

pub use usage_reporter::{combine_by_package, UsageStatsReporter};
