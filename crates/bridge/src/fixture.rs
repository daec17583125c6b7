//! Platform backed by a JSON fixture file.
//!
//! Stands in for the device services when running the bridge off-device.
//! Usage records are grouped in buckets; a query returns every record of
//! each bucket overlapping the requested window, so a package can appear
//! once per bucket the same way daily platform buckets repeat it.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use domain::models::{
    ActivityLaunch, AppOpsMode, PackageLookup, PermissionResult, RawUsageRecord, UsageInterval,
};
use domain::services::{
    AppOpsService, PackageRegistry, PermissionChecker, PlatformError, SettingsLauncher,
    UsageStatsSource,
};
use serde::Deserialize;
use tracing::info;

use crate::error::BridgeError;

/// A group of usage records covering one time span.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureBucket {
    /// Bucket start; unbounded when absent
    #[serde(default)]
    pub begin_time: Option<i64>,
    /// Bucket end; unbounded when absent
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub records: Vec<RawUsageRecord>,
}

impl FixtureBucket {
    fn overlaps(&self, begin_time: i64, end_time: i64) -> bool {
        self.begin_time.is_none_or(|start| start <= end_time)
            && self.end_time.is_none_or(|end| end >= begin_time)
    }
}

/// Contents of a fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default = "default_app_ops_mode")]
    pub app_ops_mode: AppOpsMode,
    #[serde(default)]
    pub permission_granted: bool,
    /// Every package counts as installed when absent
    #[serde(default)]
    pub installed_packages: Option<Vec<String>>,
    /// Fail every usage query with this message
    #[serde(default)]
    pub query_error: Option<String>,
    #[serde(default)]
    pub buckets: Vec<FixtureBucket>,
}

fn default_app_ops_mode() -> AppOpsMode {
    AppOpsMode::Default
}

/// Platform services answered from a [`Fixture`].
#[derive(Debug)]
pub struct FixturePlatform {
    fixture: Fixture,
    installed: Option<HashSet<String>>,
    launches: AtomicUsize,
}

impl FixturePlatform {
    pub fn new(fixture: Fixture) -> Self {
        let installed = fixture
            .installed_packages
            .as_ref()
            .map(|packages| packages.iter().cloned().collect());

        Self {
            fixture,
            installed,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        let fixture: Fixture =
            serde_json::from_str(json).map_err(|e| BridgeError::Fixture(e.to_string()))?;
        Ok(Self::new(fixture))
    }

    /// Read a fixture file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BridgeError::Fixture(format!("{}: {}", path.display(), e)))?;

        let platform = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            buckets = platform.fixture.buckets.len(),
            "Loaded usage fixture"
        );
        Ok(platform)
    }

    /// Number of settings screens opened so far.
    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UsageStatsSource for FixturePlatform {
    async fn query_usage_stats(
        &self,
        interval: UsageInterval,
        begin_time: i64,
        end_time: i64,
    ) -> Result<Vec<RawUsageRecord>, PlatformError> {
        if let Some(message) = &self.fixture.query_error {
            return Err(PlatformError::Other(message.clone()));
        }

        let records: Vec<RawUsageRecord> = self
            .fixture
            .buckets
            .iter()
            .filter(|bucket| bucket.overlaps(begin_time, end_time))
            .flat_map(|bucket| bucket.records.iter().cloned())
            .collect();

        tracing::debug!(
            interval = %interval,
            begin_time,
            end_time,
            records = records.len(),
            "Fixture usage query"
        );

        Ok(records)
    }
}

impl AppOpsService for FixturePlatform {
    fn check_op_no_throw(&self, _op: &str, _uid: u32, _package_name: &str) -> AppOpsMode {
        self.fixture.app_ops_mode
    }
}

impl PermissionChecker for FixturePlatform {
    fn check_calling_or_self_permission(&self, _permission: &str) -> PermissionResult {
        if self.fixture.permission_granted {
            PermissionResult::Granted
        } else {
            PermissionResult::Denied
        }
    }
}

impl PackageRegistry for FixturePlatform {
    fn lookup(&self, package_name: &str) -> PackageLookup {
        match &self.installed {
            Some(installed) if !installed.contains(package_name) => PackageLookup::NotFound,
            _ => PackageLookup::Found,
        }
    }
}

impl SettingsLauncher for FixturePlatform {
    fn start_activity(&self, launch: &ActivityLaunch) -> Result<(), PlatformError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        info!(
            action = %launch.action,
            flags = ?launch.flags,
            "Fixture: Would start activity"
        );
        Ok(())
    }
}
