//! Logging configuration using tracing.
//!
//! The terminal belongs to the UI while a session runs, so logs only go
//! to a daily rolling file.

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `IMBOX_LOG=debug`.
pub const LOG_ENV: &str = "IMBOX_LOG";

const LOG_FILE: &str = "imbox.log";

/// Initialize the logging subsystem, writing under `log_dir`.
///
/// Fails if the directory cannot be created or a global subscriber is
/// already installed.
pub fn init(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE);

    // Default to info, allow override via IMBOX_LOG
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("imbox=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(log_dir = %log_dir.display(), "logging initialized");
    Ok(())
}

/// Default log directory: `<data dir>/imbox/logs`, or `./logs` when the
/// platform has no data directory.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("imbox"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logs")
}
