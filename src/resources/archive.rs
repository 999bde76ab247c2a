//! Zip extraction.
use std::fs::File;
use std::path::Path;

use crate::error::InstallerError;

/// Unpacks an archive into a directory.
#[cfg_attr(test, mockall::automock)]
pub trait Extractor: Send + Sync + std::fmt::Debug {
    /// Extract every entry of `archive` below `dest`, overwriting existing files.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Extract`] if the archive cannot be opened or
    /// an entry cannot be written.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallerError>;
}

/// [`Extractor`] for zip archives.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipExtractor;

impl Extractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), InstallerError> {
        let failed = |source: crate::error::BoxError| InstallerError::Extract {
            archive: archive.to_path_buf(),
            destination: dest.to_path_buf(),
            source,
        };

        let file = File::open(archive).map_err(|e| failed(e.into()))?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| failed(e.into()))?;
        tracing::debug!("extracting {} entries into {}", zip.len(), dest.display());
        zip.extract(dest).map_err(|e| failed(e.into()))
    }
}
