//! Run configuration: host identity, paths, repository, and patch settings.
//!
//! The installer has no configuration file of its own.  Defaults are
//! compiled in, the mode comes from the command line, and the host's data
//! directory comes from the environment.
pub mod patch;
pub mod repository;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::error::InstallerError;

pub use patch::{LoaderConfig, PatchConfig};
pub use repository::{Mode, RepoDescriptor};

/// Delay between passes of the host termination loop.
pub const KILL_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Identity of the host application whose settings are edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostApp {
    /// Name used in messages.
    pub display_name: String,
    /// Process name (without `.exe`).
    pub process_name: String,
    /// Folder name under local app data (and under `Programs`).
    pub folder: String,
    /// Executable file name inside the installation directory.
    pub binary_name: String,
    /// Settings file name inside the data folder.
    pub settings_file: String,
}

impl Default for HostApp {
    fn default() -> Self {
        Self {
            display_name: "Creator Companion".to_string(),
            process_name: "CreatorCompanion".to_string(),
            folder: "VRChatCreatorCompanion".to_string(),
            binary_name: "CreatorCompanion.exe".to_string(),
            settings_file: "settings.json".to_string(),
        }
    }
}

/// Filesystem locations derived from the local app data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    local_app_data: PathBuf,
    host: HostApp,
}

impl HostPaths {
    /// Paths for `host` rooted at `local_app_data`.
    #[must_use]
    pub fn new(local_app_data: impl Into<PathBuf>, host: HostApp) -> Self {
        Self {
            local_app_data: local_app_data.into(),
            host,
        }
    }

    /// The local app data directory itself.
    #[must_use]
    pub fn local_app_data(&self) -> &Path {
        &self.local_app_data
    }

    /// `<local-app-data>/<folder>/settings.json`.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.local_app_data
            .join(&self.host.folder)
            .join(&self.host.settings_file)
    }

    /// `<local-app-data>/Programs/<folder>`.
    #[must_use]
    pub fn install_dir(&self) -> PathBuf {
        self.local_app_data.join("Programs").join(&self.host.folder)
    }

    /// The host executable inside [`install_dir`](Self::install_dir).
    #[must_use]
    pub fn host_binary(&self) -> PathBuf {
        self.install_dir().join(&self.host.binary_name)
    }

    /// `<install-dir>/Mods`.
    #[must_use]
    pub fn mods_dir(&self) -> PathBuf {
        self.install_dir().join("Mods")
    }
}

/// Resolve the local app data directory from the environment.
///
/// Uses `LOCALAPPDATA`; elsewhere than Windows falls back to
/// `XDG_DATA_HOME` and then `~/.local/share`.
///
/// # Errors
///
/// Returns [`InstallerError::Environment`] if none of the variables is set.
pub fn resolve_local_app_data() -> Result<PathBuf, InstallerError> {
    if let Some(dir) = std::env::var_os("LOCALAPPDATA").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if cfg!(target_os = "windows") {
        return Err(InstallerError::Environment(
            "LOCALAPPDATA is not set".to_string(),
        ));
    }
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .filter(|d| !d.is_empty())
        .map(|home| PathBuf::from(home).join(".local").join("share"))
        .ok_or_else(|| {
            InstallerError::Environment(
                "neither LOCALAPPDATA, XDG_DATA_HOME nor HOME is set".to_string(),
            )
        })
}

/// Complete configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Selected mode.
    pub mode: Mode,
    /// Repository toggled by this run.
    pub repository: RepoDescriptor,
    /// Host application identity.
    pub host: HostApp,
    /// Host filesystem locations.
    pub paths: HostPaths,
    /// Companion patch settings.
    pub patch: PatchConfig,
    /// Delay between passes of the host termination loop.
    pub kill_retry_delay: Duration,
}

impl InstallerConfig {
    /// Build the configuration for `mode` with the host's data under `local_app_data`.
    #[must_use]
    pub fn new(mode: Mode, local_app_data: impl Into<PathBuf>) -> Self {
        let host = HostApp::default();
        Self {
            mode,
            repository: RepoDescriptor::for_mode(mode),
            paths: HostPaths::new(local_app_data, host.clone()),
            host,
            patch: PatchConfig::default(),
            kill_retry_delay: KILL_RETRY_DELAY,
        }
    }

    /// Build the configuration from the command line and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the local app data directory cannot be resolved.
    pub fn resolve(cli: &Cli) -> Result<Self, InstallerError> {
        Ok(Self::new(
            Mode::from_dev_flag(cli.dev),
            resolve_local_app_data()?,
        ))
    }
}
