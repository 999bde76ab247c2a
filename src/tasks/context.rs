use std::path::PathBuf;
use std::sync::Arc;

use crate::config::InstallerConfig;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Logger;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::platform::Platform;
use crate::resources::{
    Downloader, Extractor, FileVersionProbe, HttpDownloader, SettingsStore, VersionProbe,
    ZipExtractor,
};

/// Shared context for one installer run.
///
/// Every side effect a task performs goes through one of the trait objects
/// held here, so tests can swap any of them out.
pub struct Context {
    /// Resolved run configuration.
    pub config: InstallerConfig,
    /// Detected platform information.
    pub platform: Platform,
    /// Logger for console and log-file output.
    pub log: Logger,
    /// Command executor (process listing, killing, version probing).
    pub executor: Arc<dyn Executor>,
    /// Filesystem operation abstraction.
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Release artifact downloader.
    pub downloader: Arc<dyn Downloader>,
    /// Archive extractor.
    pub extractor: Arc<dyn Extractor>,
    /// Host binary version reader.
    pub versions: Arc<dyn VersionProbe>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .field("log", &self.log)
            .field("executor", &"<dyn Executor>")
            .field("fs_ops", &"<dyn FileSystemOps>")
            .field("downloader", &"<dyn Downloader>")
            .field("extractor", &"<dyn Extractor>")
            .field("versions", &"<dyn VersionProbe>")
            .finish()
    }
}

impl Context {
    /// Context backed by the real system.
    #[must_use]
    pub fn new(config: InstallerConfig, platform: Platform, log: Logger) -> Self {
        let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
        Self {
            config,
            platform,
            log,
            versions: Arc::new(FileVersionProbe::new(Arc::clone(&executor), platform.os)),
            executor,
            fs_ops: Arc::new(SystemFileSystemOps),
            downloader: Arc::new(HttpDownloader),
            extractor: Arc::new(ZipExtractor),
        }
    }

    /// Store for the host's settings file.
    #[must_use]
    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.config.paths.settings_file())
    }

    /// Host installation directory.
    #[must_use]
    pub fn install_dir(&self) -> PathBuf {
        self.config.paths.install_dir()
    }

    /// Replace the command executor.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Replace the filesystem operations.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Replace the downloader.
    #[must_use]
    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.downloader = downloader;
        self
    }

    /// Replace the archive extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the version probe.
    #[must_use]
    pub fn with_versions(mut self, versions: Arc<dyn VersionProbe>) -> Self {
        self.versions = versions;
        self
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::operations::MockFileSystemOps;
    use crate::platform::Os;
    use std::path::Path;

    fn context() -> Context {
        Context::new(
            InstallerConfig::new(Mode::Default, "/lad"),
            Platform::new(Os::Windows),
            Logger::silent(),
        )
    }

    #[test]
    fn settings_store_points_at_host_settings() {
        assert_eq!(
            context().settings_store().path(),
            Path::new("/lad/VRChatCreatorCompanion/settings.json")
        );
    }

    #[test]
    fn install_dir_comes_from_config() {
        assert_eq!(
            context().install_dir(),
            Path::new("/lad/Programs/VRChatCreatorCompanion")
        );
    }

    #[test]
    fn with_fs_ops_replaces_filesystem() {
        let ctx = context()
            .with_fs_ops(Arc::new(MockFileSystemOps::new().with_existing("/only-this")));
        assert!(ctx.fs_ops.exists(Path::new("/only-this")));
        assert!(!ctx.fs_ops.exists(Path::new("/lad")));
    }

    #[test]
    fn debug_hides_trait_objects() {
        let rendered = format!("{:?}", context());
        assert!(rendered.contains("<dyn Executor>"));
        assert!(rendered.contains("<dyn Downloader>"));
    }
}
