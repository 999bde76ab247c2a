//! Error types for the installer.
//!
//! Every variant of [`InstallerError`] is terminal for a run: the entry
//! point prints the message (with its cause chain), shows the failure
//! banner, and exits non-zero after the exit pause.
//!
//! # Error taxonomy
//!
//! ```text
//! InstallerError
//! ├── Read / Parse / Write   settings.json I/O
//! ├── NotInstalled           settings.json does not exist yet
//! ├── Download / Extract     companion patch acquisition
//! ├── UserCancelled          a required prompt was declined
//! ├── Terminal               console could not be read or written
//! └── Environment            local app data directory unresolvable
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used for causes that come from several underlying crates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for an installer run.
#[derive(Error, Debug)]
pub enum InstallerError {
    /// The settings file exists but could not be read.
    #[error("Failed to read the settings file {}", path.display())]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not a valid JSON object.
    #[error("Failed to parse the settings file {}", path.display())]
    Parse {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The settings file (or another target path) could not be written.
    #[error("Failed to write to {}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The host application has never been run, so its settings file is missing.
    #[error(
        "The Creator Companion app is not installed, or has not been run at least once! (expected {})",
        path.display()
    )]
    NotInstalled {
        /// Expected settings file location.
        path: PathBuf,
    },

    /// A release artifact could not be downloaded.
    #[error("Failed to download {url}")]
    Download {
        /// URL that was requested.
        url: String,
        /// Transport or I/O error.
        source: BoxError,
    },

    /// A downloaded archive could not be extracted.
    #[error("Failed to extract {} into {}", archive.display(), destination.display())]
    Extract {
        /// Archive that was being extracted.
        archive: PathBuf,
        /// Extraction target directory.
        destination: PathBuf,
        /// Archive or I/O error.
        source: BoxError,
    },

    /// The user declined a prompt that the run cannot continue without.
    #[error("Cancelled by the user")]
    UserCancelled,

    /// The console could not be read from or written to.
    #[error("Console I/O failed")]
    Terminal(#[from] std::io::Error),

    /// Platform directories needed to locate the host application are unknown.
    #[error("Cannot determine the local application data directory: {0}")]
    Environment(String),
}

impl InstallerError {
    /// Whether the run ended because the user declined a required prompt.
    ///
    /// Cancellation prints no error line, only the failure banner.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}
