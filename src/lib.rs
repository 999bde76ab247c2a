//! Installer for the FVPR package repository.
//!
//! Toggles the FVPR entry in the VRChat Creator Companion's `userRepos`
//! list: a run installs the entry when it is absent and removes it when it
//! is present.  After an install on the affected Creator Companion release,
//! it can also set up a companion patch (a loader framework plus one mod).
//!
//! The crate is organised into four layers:
//!
//! - **[`config`]**: compiled-in defaults resolved against the command line and environment
//! - **[`resources`]**: settings file, processes, downloads, archives, host binary
//! - **[`tasks`]**: the steps of a run, acting through a shared [`tasks::Context`]
//! - **[`commands`]**: orchestration invoked from `main`
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod resources;
pub mod tasks;

/// Version of this build, taken from git when available.
#[must_use]
pub fn version() -> &'static str {
    option_env!("FVPR_INSTALLER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
