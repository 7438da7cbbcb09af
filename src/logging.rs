use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter. Logging is off when unset.
pub const LOG_ENV: &str = "ATLAS_DIFF_LOG";
const LOG_FILE: &str = "atlas-diff.log";

fn log_dir() -> PathBuf {
    if let Some(cache) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(cache).join("atlas-diff");
    }
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(".cache");
    path.push("atlas-diff");
    path
}

/// Install a file-backed subscriber when `ATLAS_DIFF_LOG` is set.
///
/// The terminal belongs to the UI, so nothing is ever written to stdout or
/// stderr. Keep the returned guard alive until exit so buffered lines flush.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid {LOG_ENV} filter: {directives}"))?;

    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::info!(dir = %dir.display(), "logging started");
    Ok(Some(guard))
}
