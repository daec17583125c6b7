//! Usage statistics reporting.
//!
//! Turns platform usage records for a time window into caller-facing
//! summaries: records without foreground time are dropped, the rest get a
//! duration label and, where the platform supports it, visible time.

use std::collections::HashMap;
use std::sync::Arc;

use shared::duration::format_duration;
use tracing::{debug, warn};

use crate::error::UsageError;
use crate::models::{
    CombinedUsage, PackageLookup, PlatformCapabilities, TimeRange, UsageInterval, UsageSummary,
};
use crate::services::platform::{PackageRegistry, UsageStatsSource};

/// Queries the platform usage source and shapes the results.
///
/// Holds no state between calls; concurrent queries are independent.
#[derive(Clone)]
pub struct UsageStatsReporter {
    source: Arc<dyn UsageStatsSource>,
    capabilities: PlatformCapabilities,
    installed_packages: Option<Arc<dyn PackageRegistry>>,
}

impl UsageStatsReporter {
    pub fn new(source: Arc<dyn UsageStatsSource>, capabilities: PlatformCapabilities) -> Self {
        Self {
            source,
            capabilities,
            installed_packages: None,
        }
    }

    /// Also drop records whose package is no longer installed.
    pub fn with_installed_filter(mut self, registry: Arc<dyn PackageRegistry>) -> Self {
        self.installed_packages = Some(registry);
        self
    }

    /// Usage summaries for `range`, in platform order.
    ///
    /// Platform failures are returned as [`UsageError::PlatformQueryFailed`],
    /// never as an empty result.
    pub async fn query_usage(&self, range: TimeRange) -> Result<Vec<UsageSummary>, UsageError> {
        let interval = UsageInterval::Daily;
        let records = self
            .source
            .query_usage_stats(interval, range.start_time, range.end_time)
            .await
            .map_err(|e| {
                warn!(
                    start_time = range.start_time,
                    end_time = range.end_time,
                    error = %e,
                    "Usage stats query failed"
                );
                UsageError::from(e)
            })?;

        let record_count = records.len();
        let mut summaries = Vec::with_capacity(record_count);

        for record in records {
            if record.total_time_in_foreground <= 0 {
                continue;
            }

            if let Some(registry) = &self.installed_packages {
                if registry.lookup(&record.package_name) == PackageLookup::NotFound {
                    debug!(package_name = %record.package_name, "Skipping uninstalled package");
                    continue;
                }
            }

            summaries.push(UsageSummary::from_record(record, self.capabilities)?);
        }

        debug!(
            interval = interval.as_raw(),
            start_time = range.start_time,
            end_time = range.end_time,
            record_count,
            summary_count = summaries.len(),
            "Usage stats query completed"
        );

        Ok(summaries)
    }
}

/// Sums foreground time per package and orders by total, most used first.
///
/// Packages with equal totals keep the order in which they first appear.
pub fn combine_by_package(summaries: &[UsageSummary]) -> Result<Vec<CombinedUsage>, UsageError> {
    let mut totals: Vec<(&str, i64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(summaries.len());

    for summary in summaries {
        let package_name = summary.package_name.as_str();
        match index.get(package_name) {
            Some(&i) => {
                totals[i].1 = totals[i].1.saturating_add(summary.total_time_in_foreground)
            }
            None => {
                index.insert(package_name, totals.len());
                totals.push((package_name, summary.total_time_in_foreground));
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));

    totals
        .into_iter()
        .map(|(package_name, total)| {
            Ok(CombinedUsage {
                package_name: package_name.to_string(),
                total_time_in_foreground: total,
                duration: format_duration(total)?,
            })
        })
        .collect()
}
