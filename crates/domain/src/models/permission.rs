//! Usage-access permission domain models.

use serde::{Deserialize, Serialize};

/// App-ops operation guarding usage statistics.
pub const OPSTR_GET_USAGE_STATS: &str = "android:get_usage_stats";

/// Runtime permission consulted when app-ops reports the default mode.
pub const PACKAGE_USAGE_STATS: &str = "android.permission.PACKAGE_USAGE_STATS";

/// Settings screen where the user grants usage access.
pub const ACTION_USAGE_ACCESS_SETTINGS: &str = "android.settings.USAGE_ACCESS_SETTINGS";

/// Authorization mode reported by the app-ops service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppOpsMode {
    Allowed,
    Ignored,
    Errored,
    Default,
    Foreground,
    /// A mode constant this crate does not know about
    Unknown(i32),
}

impl AppOpsMode {
    /// Maps a platform mode constant.
    pub fn from_raw(mode: i32) -> Self {
        match mode {
            0 => AppOpsMode::Allowed,
            1 => AppOpsMode::Ignored,
            2 => AppOpsMode::Errored,
            3 => AppOpsMode::Default,
            4 => AppOpsMode::Foreground,
            other => AppOpsMode::Unknown(other),
        }
    }
}

impl std::fmt::Display for AppOpsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppOpsMode::Allowed => write!(f, "allowed"),
            AppOpsMode::Ignored => write!(f, "ignored"),
            AppOpsMode::Errored => write!(f, "errored"),
            AppOpsMode::Default => write!(f, "default"),
            AppOpsMode::Foreground => write!(f, "foreground"),
            AppOpsMode::Unknown(mode) => write!(f, "unknown({})", mode),
        }
    }
}

/// Outcome of a standard runtime permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionResult {
    Granted,
    Denied,
}

/// Outcome of an installed-package lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageLookup {
    Found,
    NotFound,
}

/// Identity the app-ops check is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    pub uid: u32,
    pub package_name: String,
}

impl ProcessIdentity {
    pub fn new(uid: u32, package_name: impl Into<String>) -> Self {
        Self {
            uid,
            package_name: package_name.into(),
        }
    }
}

/// Activity launch flags used by settings navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchFlag {
    /// Start the activity as a new top-level task.
    NewTask,
    /// Bring the task to front if it is already running.
    BroughtToFront,
}

/// Request to open a system screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLaunch {
    pub action: String,
    pub flags: Vec<LaunchFlag>,
}

impl ActivityLaunch {
    /// The usage-access settings screen, as a new task brought to front.
    pub fn usage_access_settings() -> Self {
        Self {
            action: ACTION_USAGE_ACCESS_SETTINGS.to_string(),
            flags: vec![LaunchFlag::NewTask, LaunchFlag::BroughtToFront],
        }
    }
}
