//! Tracing subscriber setup for strategy runners

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global subscriber; level comes from `RUST_LOG`, default `info`
pub fn init_strategy_logging(service_name: &str) -> Result<()> {
    init_strategy_logging_with(service_name, LogFormat::default())
}

pub fn init_strategy_logging_with(service_name: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow!("Invalid log filter: {e}"))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    info!(service = service_name, "Logging initialised");
    Ok(())
}
