//! Entry points invoked from `main`.
pub mod install;
