//! Optional companion patch for the host release that cannot load the repository.
//!
//! Each gate below ends the step successfully; only download, extraction,
//! and directory creation failures abort the run.
use std::path::{Path, PathBuf};

use crate::console::Confirm;
use crate::error::InstallerError;
use crate::logging::style::{BOLD, RESET};

use super::Context;

/// How far the patch step got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The host executable was not found; a manual-install hint was shown.
    HostNotFound,
    /// The executable has no readable file version.
    VersionUnreadable,
    /// The installed version is not the affected release.
    NotAffected {
        /// Version that was read.
        version: String,
    },
    /// The patch module is already in place.
    AlreadyPatched,
    /// The loader does not run on this operating system.
    UnsupportedPlatform,
    /// The user chose not to install the patch.
    Declined,
    /// The module was installed.
    Installed {
        /// Whether the loader was installed during this run.
        loader_installed: bool,
    },
}

/// Download `url` to a temporary zip and extract it into `dest`.
///
/// The temporary archive is removed afterwards; failing to remove it is ignored.
fn install_archive(ctx: &Context, url: &str, dest: &Path) -> Result<(), InstallerError> {
    let archive = tempfile::Builder::new()
        .prefix("fvpr-loader-")
        .suffix(".zip")
        .tempfile()
        .map_err(|e| InstallerError::Download {
            url: url.to_string(),
            source: e.into(),
        })?
        .into_temp_path();

    ctx.downloader.download(url, &archive)?;
    ctx.extractor.extract(&archive, dest)?;

    if let Err(e) = archive.close() {
        ctx.log
            .debug(&format!("could not remove temporary archive: {e}"));
    }
    Ok(())
}

fn module_path(ctx: &Context) -> PathBuf {
    ctx.config
        .paths
        .mods_dir()
        .join(&ctx.config.patch.module_file_name)
}

/// Offer and install the companion patch.
///
/// Only meaningful right after the repository was installed.
///
/// # Errors
///
/// Returns [`InstallerError::Download`], [`InstallerError::Extract`], or
/// [`InstallerError::Write`] if acquiring the patch fails, and
/// [`InstallerError::Terminal`] if the console fails.
pub fn install(ctx: &Context, prompt: &mut dyn Confirm) -> Result<PatchOutcome, InstallerError> {
    let patch = &ctx.config.patch;
    let host = &ctx.config.host.display_name;
    let binary = ctx.config.paths.host_binary();

    if !ctx.fs_ops.exists(&binary) {
        ctx.log.hint(&format!(
            "Could not find the {host} app at {}. If it is installed elsewhere and fails to load the repository, see {}",
            binary.display(),
            patch.manual_install_url
        ));
        return Ok(PatchOutcome::HostNotFound);
    }

    let Some(version) = ctx.versions.file_version(&binary) else {
        ctx.log
            .debug(&format!("no file version for {}", binary.display()));
        return Ok(PatchOutcome::VersionUnreadable);
    };
    if !patch.is_affected(&version) {
        ctx.log
            .debug(&format!("{host} {version} does not need the patch"));
        return Ok(PatchOutcome::NotAffected { version });
    }

    let module = module_path(ctx);
    if ctx.fs_ops.exists(&module) {
        ctx.log.debug("patch module already installed");
        return Ok(PatchOutcome::AlreadyPatched);
    }
    if !patch.supports(ctx.platform.os) {
        ctx.log
            .debug(&format!("patch is not supported on {}", ctx.platform.os));
        return Ok(PatchOutcome::UnsupportedPlatform);
    }

    let loader = &patch.loader;
    ctx.log.stage("Companion patch");
    ctx.log.info(&format!(
        "{host} {BOLD}{version}{RESET} has a bug that keeps it from loading the {} repository.",
        ctx.config.repository.display_name
    ));
    ctx.log.info(&format!(
        "A community patch fixes this. It installs {} and a small mod into the {host} folder.",
        loader.name
    ));
    ctx.log.warn(&format!(
        "Mods are not supported by the {host} developers. Remove them if you run into issues."
    ));
    if !prompt.ask_yes_no("Do you want to install the patch?", false)? {
        ctx.log.hint(&format!(
            "Skipped. You can install it later by hand: {}",
            patch.manual_install_url
        ));
        return Ok(PatchOutcome::Declined);
    }

    let install_dir = ctx.install_dir();
    let loader_installed = if ctx.fs_ops.exists(&install_dir.join(&loader.marker_dir)) {
        ctx.log.debug(&format!("{} already present", loader.name));
        false
    } else {
        ctx.log.hint(&format!("Installing {}...", loader.name));
        install_archive(ctx, &loader.archive_url, &install_dir)?;
        true
    };

    let mods = ctx.config.paths.mods_dir();
    ctx.fs_ops
        .create_dir_all(&mods)
        .map_err(|source| InstallerError::Write {
            path: mods.clone(),
            source,
        })?;

    ctx.log.hint("Installing the patch...");
    ctx.downloader.download(&patch.module_url, &module)?;

    if loader_installed {
        ctx.log.success(&format!(
            "Successfully installed {} and the patch!",
            loader.name
        ));
    } else {
        ctx.log.success("Successfully installed the patch!");
    }
    Ok(PatchOutcome::Installed { loader_installed })
}
