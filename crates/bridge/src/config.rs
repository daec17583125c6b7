use serde::Deserialize;

use crate::module::HostPlatform;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub platform: PlatformConfig,
    #[serde(default)]
    pub reporter: ReporterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    /// Host operating system name; anything but "android" is unsupported
    #[serde(default = "default_os")]
    pub os: String,

    /// Host SDK level, gates total visible time
    #[serde(default = "default_sdk_int")]
    pub sdk_int: u32,

    /// Uid the app-ops check is scoped to
    #[serde(default = "default_uid")]
    pub uid: u32,

    /// Package the app-ops check is scoped to
    #[serde(default)]
    pub package_name: String,

    /// JSON file backing the fixture platform
    #[serde(default)]
    pub fixture_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReporterConfig {
    /// Drop usage of packages that are no longer installed
    #[serde(default)]
    pub require_installed: bool,

    /// Merge duplicate packages and sort by foreground time
    #[serde(default = "default_combine_by_package")]
    pub combine_by_package: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            require_installed: false,
            combine_by_package: default_combine_by_package(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
fn default_os() -> String {
    "android".to_string()
}
fn default_sdk_int() -> u32 {
    29
}
fn default_uid() -> u32 {
    10_000
}
fn default_combine_by_package() -> bool {
    true
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with SCREEN_TIME__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SCREEN_TIME").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Defaults are embedded so tests do not depend on the working directory.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [logging]
            level = "info"
            format = "pretty"

            [platform]
            os = "android"
            sdk_int = 29
            uid = 10123
            package_name = ""
            fixture_path = ""
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.platform.package_name.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "SCREEN_TIME__PLATFORM__PACKAGE_NAME must be set".to_string(),
            ));
        }

        if self.platform.fixture_path.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "SCREEN_TIME__PLATFORM__FIXTURE_PATH must be set".to_string(),
            ));
        }

        Ok(())
    }

    pub fn host_platform(&self) -> HostPlatform {
        HostPlatform::from_os_name(&self.platform.os)
    }
}
