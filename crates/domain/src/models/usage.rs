//! App usage domain models.

use serde::{Deserialize, Serialize};
use shared::duration::{format_duration, DurationError};

/// First SDK level reporting total visible time (Android Q).
pub const TOTAL_TIME_VISIBLE_MIN_SDK: u32 = 29;

/// Query window in epoch milliseconds.
///
/// No ordering is enforced between the bounds; the platform decides what an
/// inverted window means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: i64,
    pub end_time: i64,
}

impl TimeRange {
    pub fn new(start_time: i64, end_time: i64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// Aggregation bucket of platform usage records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageInterval {
    Daily,
}

impl UsageInterval {
    /// Platform constant for this interval.
    pub fn as_raw(&self) -> i32 {
        match self {
            UsageInterval::Daily => 0,
        }
    }
}

impl std::fmt::Display for UsageInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageInterval::Daily => write!(f, "daily"),
        }
    }
}

/// Host platform features that change the shape of a usage summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Whether records carry total visible time.
    pub total_time_visible: bool,
}

impl PlatformCapabilities {
    pub fn from_sdk_int(sdk_int: u32) -> Self {
        Self {
            total_time_visible: sdk_int >= TOTAL_TIME_VISIBLE_MIN_SDK,
        }
    }
}

/// Usage record as returned by the platform usage-stats service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUsageRecord {
    /// Package name (e.g., com.example.app)
    pub package_name: String,
    /// Foreground time in milliseconds
    pub total_time_in_foreground: i64,
    /// Last time the package was used, epoch milliseconds
    pub last_time_used: i64,
    /// Visible time in milliseconds, newer platforms only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_visible: Option<i64>,
}

/// Caller-facing usage entry for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub package_name: String,
    pub total_time_in_foreground: i64,
    pub last_time_used: i64,
    /// Foreground time as `"H h M m S s"`
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time_visible: Option<i64>,
}

impl UsageSummary {
    /// Builds a summary from a platform record.
    ///
    /// Visible time is copied only when `capabilities` allows it; a supported
    /// platform that omitted the value reports 0.
    pub fn from_record(
        record: RawUsageRecord,
        capabilities: PlatformCapabilities,
    ) -> Result<Self, DurationError> {
        let duration = format_duration(record.total_time_in_foreground)?;
        let total_time_visible = capabilities
            .total_time_visible
            .then(|| record.total_time_visible.unwrap_or(0));

        Ok(Self {
            package_name: record.package_name,
            total_time_in_foreground: record.total_time_in_foreground,
            last_time_used: record.last_time_used,
            duration,
            total_time_visible,
        })
    }
}

/// Foreground time summed over every entry of one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedUsage {
    pub package_name: String,
    pub total_time_in_foreground: i64,
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(package_name: &str, foreground: i64, visible: Option<i64>) -> RawUsageRecord {
        RawUsageRecord {
            package_name: package_name.to_string(),
            total_time_in_foreground: foreground,
            last_time_used: 1_700_000_000_000,
            total_time_visible: visible,
        }
    }

    #[test]
    fn test_capabilities_from_sdk_int() {
        assert!(!PlatformCapabilities::from_sdk_int(28).total_time_visible);
        assert!(PlatformCapabilities::from_sdk_int(29).total_time_visible);
        assert!(PlatformCapabilities::from_sdk_int(34).total_time_visible);
    }

    #[test]
    fn test_usage_interval_raw_values() {
        assert_eq!(UsageInterval::Daily.as_raw(), 0);
        assert_eq!(UsageInterval::Daily.to_string(), "daily");
    }

    #[test]
    fn test_summary_from_record_with_visible_time() {
        let caps = PlatformCapabilities {
            total_time_visible: true,
        };
        let summary = UsageSummary::from_record(record("com.example", 3_661_000, Some(4_000_000)), caps)
            .unwrap();

        assert_eq!(summary.package_name, "com.example");
        assert_eq!(summary.duration, "1 h 1 m 1 s");
        assert_eq!(summary.total_time_visible, Some(4_000_000));
    }

    #[test]
    fn test_summary_from_record_without_capability() {
        let summary = UsageSummary::from_record(
            record("com.example", 5_000, Some(9_000)),
            PlatformCapabilities::default(),
        )
        .unwrap();

        assert_eq!(summary.total_time_visible, None);
    }

    #[test]
    fn test_summary_from_record_missing_visible_value() {
        let caps = PlatformCapabilities {
            total_time_visible: true,
        };
        let summary = UsageSummary::from_record(record("com.example", 5_000, None), caps).unwrap();
        assert_eq!(summary.total_time_visible, Some(0));
    }

    #[test]
    fn test_summary_from_negative_record() {
        let result = UsageSummary::from_record(
            record("com.example", -1, None),
            PlatformCapabilities::default(),
        );
        assert_eq!(result, Err(DurationError::Negative(-1)));
    }

    #[test]
    fn test_summary_serialization_keys() {
        let caps = PlatformCapabilities {
            total_time_visible: true,
        };
        let summary = UsageSummary::from_record(record("com.example", 5_000, Some(6_000)), caps)
            .unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["packageName"], "com.example");
        assert_eq!(json["totalTimeInForeground"], 5_000);
        assert_eq!(json["lastTimeUsed"], 1_700_000_000_000i64);
        assert_eq!(json["duration"], "0 h 0 m 5 s");
        assert_eq!(json["totalTimeVisible"], 6_000);
    }

    #[test]
    fn test_summary_serialization_omits_visible_time() {
        let summary = UsageSummary::from_record(
            record("com.example", 5_000, Some(6_000)),
            PlatformCapabilities::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert!(json.get("totalTimeVisible").is_none());
    }

    #[test]
    fn test_raw_record_deserialization() {
        let json = r#"{"packageName":"com.example","totalTimeInForeground":10,"lastTimeUsed":20}"#;
        let record: RawUsageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.total_time_visible, None);
        assert_eq!(record.total_time_in_foreground, 10);
    }
}
