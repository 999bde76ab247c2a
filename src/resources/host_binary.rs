//! Reading the embedded file version of the host executable.
use std::path::Path;
use std::sync::Arc;

use crate::exec::Executor;
use crate::platform::Os;

/// Reads the file-version metadata of an executable.
#[cfg_attr(test, mockall::automock)]
pub trait VersionProbe: Send + Sync + std::fmt::Debug {
    /// The file version of `binary`, or `None` if it cannot be read.
    fn file_version(&self, binary: &Path) -> Option<String>;
}

/// [`VersionProbe`] that asks PowerShell for `VersionInfo.FileVersion`.
///
/// Version resources only exist on Windows; elsewhere every probe yields `None`.
#[derive(Debug, Clone)]
pub struct FileVersionProbe {
    executor: Arc<dyn Executor>,
    os: Os,
}

impl FileVersionProbe {
    /// Create a probe running commands through `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>, os: Os) -> Self {
        Self { executor, os }
    }
}

/// PowerShell expression printing the file version of `binary`.
fn version_command(binary: &Path) -> String {
    let literal = binary.display().to_string().replace('\'', "''");
    format!("(Get-Item -LiteralPath '{literal}').VersionInfo.FileVersion")
}

impl VersionProbe for FileVersionProbe {
    fn file_version(&self, binary: &Path) -> Option<String> {
        if self.os != Os::Windows || !self.executor.which("powershell") {
            return None;
        }
        let command = version_command(binary);
        let result = self
            .executor
            .run(
                "powershell",
                &["-NoProfile", "-NonInteractive", "-Command", &command],
            )
            .inspect_err(|e| tracing::debug!("version probe failed: {e:#}"))
            .ok()?;
        let version = result.stdout.trim();
        (!version.is_empty()).then(|| version.to_string())
    }
}
