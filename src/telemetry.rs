use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, OtflowConfig};

/// Installs the global `tracing` subscriber. Logs go to stderr so that
/// command output on stdout stays clean.
///
/// `verbose` forces debug level regardless of configuration. An invalid
/// filter directive falls back to `info`.
pub fn init(config: &OtflowConfig, verbose: bool) -> Result<()> {
    let directive = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?,
    }

    tracing::debug!(directive, format = ?config.log_format, "Logging initialized");
    Ok(())
}
