//! Stderr logging for the updater.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::cli::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr so that stdout only carries the generated transactions.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_subscriber(config: &ObservabilityConfig) -> Result<()> {
    let fmt_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true);

    Registry::default()
        .with(EnvFilter::new(config.level().as_str().to_lowercase()))
        .with(fmt_layer)
        .try_init()
        .context("Failed to set global default subscriber")
}
