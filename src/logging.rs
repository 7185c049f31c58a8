//! Logging initialization.
//!
//! The terminal belongs to the game while it runs, so logs only ever go to a
//! file. The filter comes from `TARGET_SUM_LOG` (same syntax as `RUST_LOG`)
//! and defaults to `info`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "TARGET_SUM_LOG";

/// Initialize the global tracing subscriber writing to `log_path`.
///
/// Returns a [`WorkerGuard`] that must be held for the lifetime of the
/// program so buffered records are flushed on exit. With no path, nothing is
/// installed and all events are discarded.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
pub fn init_tracing(log_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(log_path) = log_path else {
        return Ok(None);
    };

    let (writer, guard) = open_log_writer(log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(env_filter()),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(Some(guard))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Create the parent directory and open `log_path` for appending.
fn open_log_writer(
    log_path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open log file: {}", log_path.display()))?;

    Ok(tracing_appender::non_blocking(file))
}
