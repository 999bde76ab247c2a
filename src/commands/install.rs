use anyhow::Result;

use crate::cli::Cli;
use crate::config::InstallerConfig;
use crate::console::Confirm;
use crate::error::InstallerError;
use crate::logging::Logger;
use crate::platform::Platform;
use crate::resources::settings::RepoListState;
use crate::tasks::{self, Context, PatchOutcome, ToggleOutcome};

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Result of the repository toggle.
    pub toggle: ToggleOutcome,
    /// Result of the companion patch step; `None` after a removal.
    pub patch: Option<PatchOutcome>,
}

/// Run the installer for the parsed command line.
///
/// # Errors
///
/// Returns an error if the configuration cannot be resolved or any step of
/// the run fails; a declined required prompt is an
/// [`InstallerError::UserCancelled`].
pub fn run(cli: &Cli, log: &Logger, prompt: &mut dyn Confirm) -> Result<RunSummary> {
    let config = InstallerConfig::resolve(cli)?;
    log.debug(&format!(
        "mode: {}, settings: {}",
        config.mode,
        config.paths.settings_file().display()
    ));
    let ctx = Context::new(config, Platform::detect(), log.clone());
    Ok(execute(&ctx, prompt)?)
}

/// Execute every step of a run against `ctx`.
///
/// # Errors
///
/// Returns the first [`InstallerError`] raised by a step.
pub fn execute(ctx: &Context, prompt: &mut dyn Confirm) -> Result<RunSummary, InstallerError> {
    let title = format!("|| FVPR Installer || Version {} ||", crate::version());
    let rule = "=".repeat(title.len());
    ctx.log.banner(&format!("{rule}\n{title}\n{rule}\n"));

    tasks::stop_host::ensure_stopped(ctx, prompt)?;

    let store = ctx.settings_store();
    if !ctx.fs_ops.exists(store.path()) {
        return Err(InstallerError::NotInstalled {
            path: store.path().to_path_buf(),
        });
    }
    let mut doc = store.load()?;
    if doc.repo_list_state() == RepoListState::Malformed {
        ctx.log.warn(
            "The repository list in the settings file is not valid and will be replaced by an empty list.",
        );
    }

    let toggle = tasks::toggle_repo::toggle(ctx, prompt, &store, &mut doc)?;
    let patch = match toggle {
        ToggleOutcome::Installed => Some(tasks::companion_patch::install(ctx, prompt)?),
        ToggleOutcome::Removed => None,
    };
    Ok(RunSummary { toggle, patch })
}
