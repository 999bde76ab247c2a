//! Adding or removing the repository entry in `userRepos`.
use serde_json::Value;

use crate::console::Confirm;
use crate::error::InstallerError;
use crate::logging::style::{DIM, GREEN, RED, RESET};
use crate::resources::settings::{RepoEntry, SettingsDocument, SettingsStore, entry_url};

use super::Context;

/// What the toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The entry was absent and has been appended.
    Installed,
    /// The entry was present and has been removed.
    Removed,
}

/// Index of the first entry whose `url` is exactly `url`.
#[must_use]
pub fn find_repo(repos: &[Value], url: &str) -> Option<usize> {
    repos.iter().position(|entry| entry_url(entry) == Some(url))
}

/// Toggle the configured repository in `doc` and persist it through `store`.
///
/// Every prompt here is required; declining aborts before anything is
/// written.
///
/// # Errors
///
/// Returns [`InstallerError::UserCancelled`] if a prompt is declined and
/// [`InstallerError::Write`] if the settings cannot be saved.
pub fn toggle(
    ctx: &Context,
    prompt: &mut dyn Confirm,
    store: &SettingsStore,
    doc: &mut SettingsDocument,
) -> Result<ToggleOutcome, InstallerError> {
    let repo = &ctx.config.repository;
    let name = &repo.display_name;
    let url = &repo.url;

    let outcome = if let Some(index) = find_repo(doc.repos(), url) {
        ctx.log.info(&format!(
            "You're about to {RED}remove{RESET} the {name} repository {DIM}({url}){RESET}."
        ));
        prompt.ask_yes_no("Are you sure you want to continue?", true)?;
        doc.repos_mut().remove(index);
        ToggleOutcome::Removed
    } else {
        ctx.log.info(&format!(
            "You're about to {GREEN}install{RESET} the {name} repository {DIM}({url}){RESET}."
        ));
        prompt.ask_yes_no("Do you want to continue?", true)?;
        if let Some(tos) = &repo.tos_url {
            ctx.log.info(&format!(
                "By using the {name} repository you agree to its Terms of Service: {tos}"
            ));
            prompt.ask_yes_no("Do you accept the Terms of Service?", true)?;
        }
        doc.repos_mut().push(Value::from(RepoEntry {
            url: url.clone(),
            name: name.clone(),
        }));
        ToggleOutcome::Installed
    };

    ctx.log.debug(&format!("writing {}", store.path().display()));
    store.save(doc)?;

    match outcome {
        ToggleOutcome::Installed => {
            ctx.log
                .success(&format!("Successfully installed the {name} repository!"));
        }
        ToggleOutcome::Removed => {
            ctx.log
                .success(&format!("Successfully removed the {name} repository!"));
        }
    }
    Ok(outcome)
}
