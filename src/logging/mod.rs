//! Application logging
//!
//! Logs go to stderr through `tracing-subscriber`, and optionally to a
//! dated file under ~/.config/glyphpath/logs/.

use std::fs;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config_file::ConfigFile;

/// Filter used when neither RUST_LOG nor --verbose is given
pub const DEFAULT_FILTER: &str = "glyphpath=info";
pub const VERBOSE_FILTER: &str = "glyphpath=debug";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::config_dir().join("logs")
}

pub fn current_log_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d");
    format!("glyphpath-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(current_log_file_name())
}

/// `--verbose` wins over RUST_LOG, which wins over the default
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
///
/// When logging to a file, the returned guard must be held until exit so
/// buffered lines get flushed.
pub fn init(verbose: bool, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !log_to_file {
        tracing_subscriber::registry()
            .with(env_filter(verbose))
            .with(stderr_layer)
            .try_init()?;
        return Ok(None);
    }

    let logs_dir = logs_dir();
    fs::create_dir_all(&logs_dir)?;
    let appender = tracing_appender::rolling::never(&logs_dir, current_log_file_name());
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    tracing::info!("Logging to {:?}", current_log_file());
    Ok(Some(guard))
}
