//! Common test utilities for integration tests.
//!
//! Builds fixture platforms and configurations without touching the
//! filesystem or environment.

// Not every helper is used by every test binary.
#![allow(dead_code)]

use std::sync::Arc;

use fake::faker::lorem::en::Word;
use fake::Fake;
use screen_time_bridge::config::{Config, LoggingConfig, PlatformConfig, ReporterConfig};
use screen_time_bridge::fixture::FixturePlatform;
use screen_time_bridge::module::ScreenTimeModule;
use serde_json::{json, Value};

pub const TEST_PACKAGE: &str = "com.screentime.test";

/// Configuration for an Android host at `sdk_int`.
pub fn test_config(sdk_int: u32) -> Config {
    Config {
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        platform: PlatformConfig {
            os: "android".to_string(),
            sdk_int,
            uid: 10_123,
            package_name: TEST_PACKAGE.to_string(),
            fixture_path: "fixtures/usage.json".to_string(),
        },
        reporter: ReporterConfig::default(),
    }
}

/// A random but well-formed package name.
pub fn random_package() -> String {
    let company: String = Word().fake();
    let app: String = Word().fake();
    format!("com.{}.{}", company, app)
}

/// A usage record as it appears in fixture JSON.
pub fn record_json(package_name: &str, foreground: i64, visible: i64) -> Value {
    json!({
        "packageName": package_name,
        "totalTimeInForeground": foreground,
        "lastTimeUsed": 1_718_000_000_000i64,
        "totalTimeVisible": visible
    })
}

/// Build a module over a fixture given as JSON.
pub fn module_from_fixture(
    fixture: Value,
    config: &Config,
) -> (ScreenTimeModule, Arc<FixturePlatform>) {
    let platform = Arc::new(
        FixturePlatform::from_json(&fixture.to_string()).expect("Failed to parse fixture"),
    );
    let module = ScreenTimeModule::from_platform(platform.clone(), config);
    (module, platform)
}

/// Query params covering the whole epoch.
pub fn everything() -> Value {
    json!({ "startTime": 0, "endTime": 4_102_444_800_000i64 })
}
