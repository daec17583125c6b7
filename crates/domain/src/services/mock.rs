//! Mock platform for development and testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::{
    ActivityLaunch, AppOpsMode, PackageLookup, PermissionResult, RawUsageRecord, UsageInterval,
};
use crate::services::platform::{
    AppOpsService, PackageRegistry, PermissionChecker, PlatformError, SettingsLauncher,
    UsageStatsSource,
};

/// A query received by [`MockPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedQuery {
    pub interval: UsageInterval,
    pub begin_time: i64,
    pub end_time: i64,
}

/// In-memory platform implementing every collaborator trait.
///
/// Returns canned answers and records the calls it receives.
#[derive(Debug)]
pub struct MockPlatform {
    records: Vec<RawUsageRecord>,
    query_error: Option<PlatformError>,
    app_ops_mode: AppOpsMode,
    permission: PermissionResult,
    /// `None` means every package is installed.
    installed: Option<HashSet<String>>,
    launch_error: Option<PlatformError>,
    queries: Mutex<Vec<RecordedQuery>>,
    launches: Mutex<Vec<ActivityLaunch>>,
    op_checks: AtomicUsize,
    permission_checks: AtomicUsize,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            query_error: None,
            app_ops_mode: AppOpsMode::Default,
            permission: PermissionResult::Denied,
            installed: None,
            launch_error: None,
            queries: Mutex::new(Vec::new()),
            launches: Mutex::new(Vec::new()),
            op_checks: AtomicUsize::new(0),
            permission_checks: AtomicUsize::new(0),
        }
    }
}

impl MockPlatform {
    /// Create a mock with no records and usage access not granted.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: Vec<RawUsageRecord>) -> Self {
        self.records = records;
        self
    }

    /// Make every usage query fail with `error`.
    pub fn failing(mut self, error: PlatformError) -> Self {
        self.query_error = Some(error);
        self
    }

    pub fn with_app_ops_mode(mut self, mode: AppOpsMode) -> Self {
        self.app_ops_mode = mode;
        self
    }

    pub fn with_permission(mut self, permission: PermissionResult) -> Self {
        self.permission = permission;
        self
    }

    /// Restrict the installed packages to `packages`.
    pub fn with_installed<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed = Some(packages.into_iter().map(Into::into).collect());
        self
    }

    /// Make every activity launch fail with `error`.
    pub fn with_launch_error(mut self, error: PlatformError) -> Self {
        self.launch_error = Some(error);
        self
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    pub fn launches(&self) -> Vec<ActivityLaunch> {
        self.launches
            .lock()
            .map(|launches| launches.clone())
            .unwrap_or_default()
    }

    pub fn op_check_count(&self) -> usize {
        self.op_checks.load(Ordering::SeqCst)
    }

    pub fn permission_check_count(&self) -> usize {
        self.permission_checks.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UsageStatsSource for MockPlatform {
    async fn query_usage_stats(
        &self,
        interval: UsageInterval,
        begin_time: i64,
        end_time: i64,
    ) -> Result<Vec<RawUsageRecord>, PlatformError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(RecordedQuery {
                interval,
                begin_time,
                end_time,
            });
        }

        if let Some(error) = &self.query_error {
            tracing::warn!(
                interval = %interval,
                begin_time,
                end_time,
                "Mock platform simulating query failure"
            );
            return Err(error.clone());
        }

        Ok(self.records.clone())
    }
}

impl AppOpsService for MockPlatform {
    fn check_op_no_throw(&self, _op: &str, _uid: u32, _package_name: &str) -> AppOpsMode {
        self.op_checks.fetch_add(1, Ordering::SeqCst);
        self.app_ops_mode
    }
}

impl PermissionChecker for MockPlatform {
    fn check_calling_or_self_permission(&self, _permission: &str) -> PermissionResult {
        self.permission_checks.fetch_add(1, Ordering::SeqCst);
        self.permission
    }
}

impl PackageRegistry for MockPlatform {
    fn lookup(&self, package_name: &str) -> PackageLookup {
        match &self.installed {
            Some(installed) if !installed.contains(package_name) => PackageLookup::NotFound,
            _ => PackageLookup::Found,
        }
    }
}

impl SettingsLauncher for MockPlatform {
    fn start_activity(&self, launch: &ActivityLaunch) -> Result<(), PlatformError> {
        if let Ok(mut launches) = self.launches.lock() {
            launches.push(launch.clone());
        }

        match &self.launch_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
