//! File logging through tracing
//!
//! The terminal belongs to the UI, so every log line goes to a daily rolling
//! file under `<data_local_dir>/bcozy/logs/`. The filter is read from
//! `BCOZY_LOG`, e.g. `BCOZY_LOG=bcozy_app::binding=trace`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "BCOZY_LOG";

const LOG_FILE_PREFIX: &str = "bcozy.log";

/// Crates of the workspace, logged at info unless `BCOZY_LOG` says otherwise
const WORKSPACE_TARGETS: [&str; 5] = ["bcozy", "bcozy_core", "bcozy_remote", "bcozy_app", "bcozy_tui"];

fn default_filter() -> String {
    let mut directives: Vec<String> = WORKSPACE_TARGETS
        .iter()
        .map(|target| format!("{target}=info"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Directory the rolling log files are written to
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bcozy")
        .join("logs")
}

/// Install the global subscriber. Returns the log directory.
///
/// Must be called once, before the first log statement that should be kept.
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("──── bcozy {} ────", env!("CARGO_PKG_VERSION"));
    tracing::info!("Logging to {}", log_dir.display());

    Ok(log_dir)
}
