//! The steps of an installer run, each acting through a shared [`Context`].
pub mod companion_patch;
mod context;
pub mod stop_host;
pub mod toggle_repo;

pub use companion_patch::PatchOutcome;
pub use context::Context;
pub use toggle_repo::ToggleOutcome;
