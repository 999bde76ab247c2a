//! Companion patch settings.
//!
//! The patch works around a defect in one historical Creator Companion
//! release.  Everything that ties the installer to that release lives here
//! so the shim can be retired by editing [`PatchConfig::default`] alone.

use crate::platform::Os;

/// Where to get the loader framework and how to recognise an existing install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Human-readable name.
    pub name: String,
    /// Release archive (zip) extracted into the installation directory.
    pub archive_url: String,
    /// Directory, relative to the installation directory, whose presence
    /// means the loader is already installed.
    pub marker_dir: String,
}

/// Everything the companion patch installer needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchConfig {
    /// Host versions starting with this prefix need the patch.
    pub legacy_version_prefix: String,
    /// Loader framework the module depends on.
    pub loader: LoaderConfig,
    /// Direct download URL of the patch module.
    pub module_url: String,
    /// File name of the module inside the `Mods` directory.
    pub module_file_name: String,
    /// Page explaining how to install the patch by hand.
    pub manual_install_url: String,
    /// Operating systems the loader and module run on.
    pub supported_os: Vec<Os>,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            legacy_version_prefix: "2.1.1".to_string(),
            loader: LoaderConfig {
                name: "MelonLoader".to_string(),
                archive_url:
                    "https://github.com/LavaGang/MelonLoader/releases/download/v0.6.1/MelonLoader.x64.zip"
                        .to_string(),
                marker_dir: "MelonLoader".to_string(),
            },
            module_url:
                "https://github.com/Foxscore/FVPR-VCC-Patch/releases/latest/download/FvprVccPatch.dll"
                    .to_string(),
            module_file_name: "FvprVccPatch.dll".to_string(),
            manual_install_url: "https://github.com/Foxscore/FVPR-VCC-Patch#manual-installation"
                .to_string(),
            supported_os: vec![Os::Windows],
        }
    }
}

impl PatchConfig {
    /// Whether the host `version` is the release the patch exists for.
    #[must_use]
    pub fn is_affected(&self, version: &str) -> bool {
        version.trim().starts_with(&self.legacy_version_prefix)
    }

    /// Whether the patch can run on `os`.
    #[must_use]
    pub fn supports(&self, os: Os) -> bool {
        self.supported_os.contains(&os)
    }
}
