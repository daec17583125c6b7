//! Caller-facing screen time module.
//!
//! Each method is one host call: it takes host-shaped input, completes
//! asynchronously and resolves to a value or rejects with a [`BridgeError`].

use std::sync::Arc;

use domain::models::{CombinedUsage, PlatformCapabilities, ProcessIdentity, TimeRange, UsageSummary};
use domain::services::{
    combine_by_package, AppOpsService, PackageRegistry, PermissionChecker, SettingsLauncher,
    UsagePermissionGate, UsageStatsReporter, UsageStatsSource,
};
use serde::Deserialize;
use serde_json::Value;
use shared::time::truncate_millis;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::BridgeError;

/// Name the module is registered under on the host side.
pub const MODULE_NAME: &str = "ScreenTime";

/// Host operating system the module runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Android,
    /// Usage access does not exist here; every call resolves to an empty answer.
    Unsupported,
}

impl HostPlatform {
    pub fn from_os_name(os: &str) -> Self {
        if os.eq_ignore_ascii_case("android") {
            HostPlatform::Android
        } else {
            HostPlatform::Unsupported
        }
    }
}

/// Time window as sent by the host, in epoch milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatsParams {
    pub start_time: f64,
    pub end_time: f64,
}

impl UsageStatsParams {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(truncate_millis(self.start_time), truncate_millis(self.end_time))
    }
}

/// Screen time operations exposed to the host application.
#[derive(Clone)]
pub struct ScreenTimeModule {
    host: HostPlatform,
    reporter: UsageStatsReporter,
    gate: UsagePermissionGate,
}

impl ScreenTimeModule {
    pub fn new(
        host: HostPlatform,
        reporter: UsageStatsReporter,
        gate: UsagePermissionGate,
    ) -> Self {
        Self {
            host,
            reporter,
            gate,
        }
    }

    /// Wire every collaborator to a single platform implementation.
    pub fn from_platform<P>(platform: Arc<P>, config: &Config) -> Self
    where
        P: UsageStatsSource
            + AppOpsService
            + PermissionChecker
            + PackageRegistry
            + SettingsLauncher
            + 'static,
    {
        let capabilities = PlatformCapabilities::from_sdk_int(config.platform.sdk_int);
        let mut reporter = UsageStatsReporter::new(platform.clone(), capabilities);
        if config.reporter.require_installed {
            reporter = reporter.with_installed_filter(platform.clone());
        }

        let identity =
            ProcessIdentity::new(config.platform.uid, config.platform.package_name.clone());
        let gate = UsagePermissionGate::new(identity, platform.clone(), platform.clone(), platform);

        Self::new(config.host_platform(), reporter, gate)
    }

    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    pub fn host(&self) -> HostPlatform {
        self.host
    }

    /// Per-app usage for `{startTime, endTime}`, in platform order.
    #[instrument(skip(self, params))]
    pub async fn get_usage_stats(&self, params: Value) -> Result<Vec<UsageSummary>, BridgeError> {
        if self.host == HostPlatform::Unsupported {
            return Ok(Vec::new());
        }

        let params: UsageStatsParams = serde_json::from_value(params)?;
        let range = params.time_range();
        debug!(
            start_time = range.start_time,
            end_time = range.end_time,
            "Querying usage stats"
        );

        Ok(self.reporter.query_usage(range).await?)
    }

    /// Usage merged per package, most used first.
    #[instrument(skip(self, params))]
    pub async fn get_combined_usage_stats(
        &self,
        params: Value,
    ) -> Result<Vec<CombinedUsage>, BridgeError> {
        let summaries = self.get_usage_stats(params).await?;
        Ok(combine_by_package(&summaries)?)
    }

    /// Opens the usage-access settings screen. Resolves `true` once issued.
    pub async fn open_usage_settings(&self) -> bool {
        if self.host == HostPlatform::Unsupported {
            return false;
        }

        self.gate.open_remediation_settings()
    }

    /// Whether usage access is currently granted.
    pub async fn get_grant_status(&self) -> bool {
        if self.host == HostPlatform::Unsupported {
            return false;
        }

        self.gate.check_granted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{AppOpsMode, RawUsageRecord};
    use domain::services::{MockPlatform, PlatformError};
    use serde_json::json;

    fn module(
        host: HostPlatform,
        platform: MockPlatform,
    ) -> (ScreenTimeModule, Arc<MockPlatform>) {
        let platform = Arc::new(platform);
        let reporter = UsageStatsReporter::new(
            platform.clone(),
            PlatformCapabilities {
                total_time_visible: true,
            },
        );
        let gate = UsagePermissionGate::new(
            ProcessIdentity::new(10_123, "com.example"),
            platform.clone(),
            platform.clone(),
            platform.clone(),
        );
        (ScreenTimeModule::new(host, reporter, gate), platform)
    }

    fn record(package_name: &str, foreground: i64) -> RawUsageRecord {
        RawUsageRecord {
            package_name: package_name.to_string(),
            total_time_in_foreground: foreground,
            last_time_used: 1_700_000_000_000,
            total_time_visible: Some(foreground),
        }
    }

    #[test]
    fn test_host_platform_from_os_name() {
        assert_eq!(HostPlatform::from_os_name("android"), HostPlatform::Android);
        assert_eq!(HostPlatform::from_os_name("Android"), HostPlatform::Android);
        assert_eq!(HostPlatform::from_os_name("ios"), HostPlatform::Unsupported);
        assert_eq!(HostPlatform::from_os_name(""), HostPlatform::Unsupported);
    }

    #[test]
    fn test_params_truncate_to_integers() {
        let params: UsageStatsParams =
            serde_json::from_value(json!({"startTime": 1000.9, "endTime": 2000.2})).unwrap();
        assert_eq!(params.time_range(), TimeRange::new(1000, 2000));
    }

    #[tokio::test]
    async fn test_get_usage_stats() {
        let (module, platform) = module(
            HostPlatform::Android,
            MockPlatform::new().with_records(vec![record("a", 0), record("b", 5_000)]),
        );

        let stats = module
            .get_usage_stats(json!({"startTime": 0, "endTime": 86_400_000}))
            .await
            .unwrap();

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].package_name, "b");
        assert_eq!(platform.queries()[0].end_time, 86_400_000);
    }

    #[tokio::test]
    async fn test_get_usage_stats_missing_param() {
        let (module, platform) = module(HostPlatform::Android, MockPlatform::new());

        let err = module
            .get_usage_stats(json!({"startTime": 0}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "invalid_params");
        assert!(platform.queries().is_empty());
    }

    #[tokio::test]
    async fn test_get_usage_stats_platform_failure() {
        let (module, _) = module(
            HostPlatform::Android,
            MockPlatform::new().failing(PlatformError::Unavailable("usagestats".into())),
        );

        let err = module
            .get_usage_stats(json!({"startTime": 0, "endTime": 1}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "platform_query_failed");
        assert_eq!(err.rejection().message, "Service unavailable: usagestats");
    }

    #[tokio::test]
    async fn test_get_combined_usage_stats() {
        let (module, _) = module(
            HostPlatform::Android,
            MockPlatform::new().with_records(vec![
                record("a", 1_000),
                record("b", 2_000),
                record("a", 3_000),
            ]),
        );

        let combined = module
            .get_combined_usage_stats(json!({"startTime": 0, "endTime": 1}))
            .await
            .unwrap();

        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].package_name, "a");
        assert_eq!(combined[0].total_time_in_foreground, 4_000);
        assert_eq!(combined[1].package_name, "b");
    }

    #[tokio::test]
    async fn test_grant_and_settings() {
        let (module, platform) = module(
            HostPlatform::Android,
            MockPlatform::new().with_app_ops_mode(AppOpsMode::Allowed),
        );

        assert!(module.get_grant_status().await);
        assert!(module.open_usage_settings().await);
        assert_eq!(platform.launches().len(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_host_short_circuits() {
        let (module, platform) = module(
            HostPlatform::Unsupported,
            MockPlatform::new()
                .with_records(vec![record("a", 1_000)])
                .with_app_ops_mode(AppOpsMode::Allowed),
        );

        assert!(module
            .get_usage_stats(json!({"startTime": 0, "endTime": 1}))
            .await
            .unwrap()
            .is_empty());
        assert!(!module.get_grant_status().await);
        assert!(!module.open_usage_settings().await);
        assert!(platform.queries().is_empty());
        assert!(platform.launches().is_empty());
        assert_eq!(platform.op_check_count(), 0);
    }

    #[test]
    fn test_module_name() {
        let (module, _) = module(HostPlatform::Android, MockPlatform::new());
        assert_eq!(module.name(), "ScreenTime");
    }
}
