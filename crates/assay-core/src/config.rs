//! Suite configuration
//!
//! Settings are resolved in three layers: built-in defaults, an optional TOML
//! document, then `ASSAY_*` environment variables.
//!
//! ```toml
//! io_timeout_ms = 5000
//! log_filter = "assay_testkit=debug"
//! fail_fast_release = true
//! ```

use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding [`SuiteConfig::io_timeout_ms`]
pub const ENV_IO_TIMEOUT_MS: &str = "ASSAY_IO_TIMEOUT_MS";
/// Environment variable overriding [`SuiteConfig::log_filter`]
pub const ENV_LOG: &str = "ASSAY_LOG";
/// Environment variable overriding [`SuiteConfig::fail_fast_release`]
pub const ENV_FAIL_FAST_RELEASE: &str = "ASSAY_FAIL_FAST_RELEASE";

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Suite-level settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Maximum time a single test body may run, in milliseconds
    pub io_timeout_ms: u64,
    /// `tracing` filter directive used by the test subscriber
    pub log_filter: String,
    /// Stop releasing suite fixtures at the first failed release
    pub fail_fast_release: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            io_timeout_ms: 30_000,
            log_filter: "warn".to_string(),
            fail_fast_release: false,
        }
    }
}

impl SuiteConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env_var)
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge_with_vars(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_vars(path, env_var)
    }

    fn load_with_vars(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&text)?;
        config.merge_with_vars(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ASSAY_*` environment variables
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(env_var)
    }

    fn merge_with_vars(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup(ENV_IO_TIMEOUT_MS) {
            self.io_timeout_ms = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(format!("{ENV_IO_TIMEOUT_MS} must be an integer, got `{raw}`"))
            })?;
            tracing::debug!(io_timeout_ms = self.io_timeout_ms, "io timeout overridden from environment");
        }
        if let Some(filter) = lookup(ENV_LOG) {
            tracing::debug!(%filter, "log filter overridden from environment");
            self.log_filter = filter;
        }
        if let Some(raw) = lookup(ENV_FAIL_FAST_RELEASE) {
            self.fail_fast_release = match raw.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => {
                    return Err(ConfigError::invalid(format!(
                        "{ENV_FAIL_FAST_RELEASE} must be a boolean, got `{other}`"
                    )))
                }
            };
            tracing::debug!(
                fail_fast_release = self.fail_fast_release,
                "release policy overridden from environment"
            );
        }
        Ok(())
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.io_timeout_ms == 0 {
            return Err(ConfigError::invalid("io_timeout_ms must be greater than zero"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::invalid("log_filter must not be empty"));
        }
        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            ConfigError::invalid(format!("log_filter `{}` is not a valid filter: {e}", self.log_filter))
        })?;
        Ok(())
    }

    /// The IO timeout as a [`Duration`]
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }

    /// Builder-style override of the IO timeout
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }
}
