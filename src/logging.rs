//! Tracing subscriber setup
//!
//! The interactive picker owns the terminal, so while it runs log output
//! goes to `<cache_dir>/typepick/typepick.log` instead of stderr.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_LEVEL: &str = "warn";

const LOG_FILE_NAME: &str = "typepick.log";

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to the log file in the user cache directory
    File,
}

/// Keeps the background log writer alive; drop it last
#[derive(Debug, Default)]
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

/// Directory holding the log file
///
/// # Errors
///
/// Returns an error if the cache directory is unknown or cannot be created.
pub fn log_dir() -> io::Result<PathBuf> {
    let cache_dir = dirs::cache_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Unable to determine user cache directory")
    })?;

    let log_dir = cache_dir.join("typepick");
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// Filter from an explicit level, else `RUST_LOG`, else [`DEFAULT_LEVEL`]
#[must_use]
pub fn build_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a global
/// subscriber is already installed.
pub fn init_logger(log_level: Option<&str>, target: LogTarget) -> io::Result<LogGuard> {
    let filter = build_filter(log_level);

    match target {
        LogTarget::Stderr => {
            let layer = fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(layer)
                .try_init()
                .map_err(io::Error::other)?;
            Ok(LogGuard::default())
        }
        LogTarget::File => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir()?.join(LOG_FILE_NAME))?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(layer)
                .try_init()
                .map_err(io::Error::other)?;
            Ok(LogGuard {
                _guard: Some(guard),
            })
        }
    }
}
