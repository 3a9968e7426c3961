//! Tracing setup
//!
//! The terminal belongs to the UI, so log output only ever goes to a file.

use crate::config::Config;
use anyhow::{Context, Result};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Build the filter: RUST_LOG wins over the configured level
fn build_filter(config: &Config) -> Result<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => Ok(EnvFilter::from_default_env()),
        _ => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level '{}'", config.log_level)),
    }
}

/// Install the global subscriber. Does nothing when file logging is off.
pub fn init(config: &Config) -> Result<()> {
    if !config.log_to_file {
        return Ok(());
    }

    let dir = Config::log_dir().context("could not determine log directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, "user-admin-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(build_filter(config)?)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
