//! Usage-access permission checks and remediation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::models::permission::{OPSTR_GET_USAGE_STATS, PACKAGE_USAGE_STATS};
use crate::models::{ActivityLaunch, AppOpsMode, PermissionResult, ProcessIdentity};
use crate::services::platform::{AppOpsService, PermissionChecker, SettingsLauncher};

/// Resolves the grant from an app-ops mode.
///
/// `runtime_permission` is only consulted for [`AppOpsMode::Default`].
pub fn resolve_grant(
    mode: AppOpsMode,
    runtime_permission: impl FnOnce() -> PermissionResult,
) -> bool {
    match mode {
        AppOpsMode::Default => runtime_permission() == PermissionResult::Granted,
        AppOpsMode::Allowed => true,
        AppOpsMode::Ignored
        | AppOpsMode::Errored
        | AppOpsMode::Foreground
        | AppOpsMode::Unknown(_) => false,
    }
}

/// Decides whether this process may read usage statistics, and routes the
/// user to the settings screen that grants it.
///
/// Nothing is cached: the user can change the grant from settings at any time.
#[derive(Clone)]
pub struct UsagePermissionGate {
    identity: ProcessIdentity,
    app_ops: Arc<dyn AppOpsService>,
    permissions: Arc<dyn PermissionChecker>,
    launcher: Arc<dyn SettingsLauncher>,
}

impl UsagePermissionGate {
    pub fn new(
        identity: ProcessIdentity,
        app_ops: Arc<dyn AppOpsService>,
        permissions: Arc<dyn PermissionChecker>,
        launcher: Arc<dyn SettingsLauncher>,
    ) -> Self {
        Self {
            identity,
            app_ops,
            permissions,
            launcher,
        }
    }

    /// Whether usage access is currently granted.
    pub fn check_granted(&self) -> bool {
        let mode = self.app_ops.check_op_no_throw(
            OPSTR_GET_USAGE_STATS,
            self.identity.uid,
            &self.identity.package_name,
        );

        let granted = resolve_grant(mode, || {
            self.permissions
                .check_calling_or_self_permission(PACKAGE_USAGE_STATS)
        });

        debug!(
            uid = self.identity.uid,
            package_name = %self.identity.package_name,
            mode = %mode,
            granted,
            "Checked usage access"
        );

        granted
    }

    /// Opens the usage-access settings screen.
    ///
    /// Always returns `true`; the user's choice is observed by calling
    /// [`Self::check_granted`] again later.
    pub fn open_remediation_settings(&self) -> bool {
        let launch = ActivityLaunch::usage_access_settings();

        match self.launcher.start_activity(&launch) {
            Ok(()) => info!(action = %launch.action, "Opened usage access settings"),
            Err(e) => warn!(
                action = %launch.action,
                error = %e,
                "Failed to open usage access settings"
            ),
        }

        true
    }
}
