//! Logger facade over [`tracing`] events.
use std::path::PathBuf;

use super::subscriber::{BANNER, HINT, STAGE, SUCCESS};
use super::utils::log_file_path;

/// Structured logger used by every task.
///
/// Each method emits a `tracing` event; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) renders it on the console and
/// appends it to the run's log file.  Without a subscriber (unit and
/// integration tests) the events are discarded.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`, remembering where its log file lives.
    ///
    /// The file itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Create a logger that never reports a log file.
    #[must_use]
    pub const fn silent() -> Self {
        Self { log_file: None }
    }

    /// Path of the persistent log file, if one could be created.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    /// Print the start-up banner.
    pub fn banner(&self, msg: &str) {
        tracing::info!(target: BANNER, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a completed action.
    pub fn success(&self, msg: &str) {
        tracing::info!(target: SUCCESS, "{msg}");
    }

    /// Log a dimmed hint (links, progress notes).
    pub fn hint(&self, msg: &str) {
        tracing::info!(target: HINT, "{msg}");
    }

    /// Log a debug message (console only with `--verbose`; always in the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}
