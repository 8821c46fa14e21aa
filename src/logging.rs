// Logging setup for host applications embedding the core
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};
use crate::settings::LoggingSettings;

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter directives.
/// Fails with [`Error::Config`] if a subscriber is already installed.
pub fn init_logging(cfg: &LoggingSettings) -> Result<()> {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_new(&cfg.filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(cfg.include_target)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install logger: {}", e)))
}
