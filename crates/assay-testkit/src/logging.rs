//! Test log output
//!
//! Installs a `tracing` subscriber writing through the test harness's
//! captured output, filtered by [`SuiteConfig::log_filter`]. Only the first
//! successful call in a process installs anything; a subscriber installed
//! elsewhere is left in place.

use assay_core::{ConfigError, SuiteConfig};
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static TRACING: OnceCell<()> = OnceCell::new();

/// Install the test subscriber if none is installed yet
///
/// Fails when `config.log_filter` is not a valid filter directive, even if a
/// subscriber is already installed.
pub fn init_test_tracing(config: &SuiteConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        ConfigError::invalid(format!(
            "log_filter `{}` is not a valid filter: {e}",
            config.log_filter
        ))
    })?;
    TRACING.get_or_init(|| {
        // Fails only when another subscriber is already installed.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
    Ok(())
}
