//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that the patch installer and the
//! settings precondition can be unit-tested without touching the real
//! filesystem.  Production code uses [`SystemFileSystemOps`]; tests use
//! `MockFileSystemOps`.

use std::path::{Path, PathBuf};

/// Abstraction over the filesystem queries and mutations made by tasks.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a component cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Paths exist only if registered with [`with_existing`](Self::with_existing)
/// or created through [`FileSystemOps::create_dir_all`].
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    existing: Vec<PathBuf>,
    created: std::sync::Mutex<Vec<PathBuf>>,
    fail_create: bool,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as existing.
    #[must_use]
    pub fn with_existing(mut self, path: impl Into<PathBuf>) -> Self {
        let p = path.into();
        if !self.existing.contains(&p) {
            self.existing.push(p);
        }
        self
    }

    /// Make every [`FileSystemOps::create_dir_all`] call fail.
    #[must_use]
    pub const fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Directories passed to [`FileSystemOps::create_dir_all`], in call order.
    #[allow(clippy::expect_used)]
    pub fn created(&self) -> Vec<PathBuf> {
        self.created
            .lock()
            .expect("mock created list poisoned")
            .clone()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.existing.iter().any(|p| p == path)
            || self
                .created
                .lock()
                .expect("mock created list poisoned")
                .iter()
                .any(|p| p == path)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        if self.fail_create {
            return Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        }
        self.created
            .lock()
            .expect("mock created list poisoned")
            .push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exists_reflects_real_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SystemFileSystemOps.exists(dir.path()));
        assert!(!SystemFileSystemOps.exists(&dir.path().join("missing")));
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mods = dir.path().join("Mods");
        SystemFileSystemOps.create_dir_all(&mods).unwrap();
        SystemFileSystemOps
            .create_dir_all(&mods)
            .expect("creating an existing directory should be a no-op");
        assert!(mods.is_dir());
    }

    #[test]
    fn mock_tracks_created_dirs() {
        let fs = MockFileSystemOps::new().with_existing("/install");
        assert!(fs.exists(Path::new("/install")));
        assert!(!fs.exists(Path::new("/install/Mods")));
        fs.create_dir_all(Path::new("/install/Mods")).unwrap();
        assert!(fs.exists(Path::new("/install/Mods")));
        assert_eq!(fs.created(), vec![PathBuf::from("/install/Mods")]);
    }

    #[test]
    fn failing_mock_reports_error() {
        let fs = MockFileSystemOps::new().failing_create();
        assert!(fs.create_dir_all(Path::new("/x")).is_err());
        assert!(fs.created().is_empty());
    }
}
