//! HTTP(S) GET-to-file downloads.
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::InstallerError;

/// Fetches a URL into a local file.
#[cfg_attr(test, mockall::automock)]
pub trait Downloader: Send + Sync + std::fmt::Debug {
    /// Download `url` to `dest`, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Download`] if the request fails, the server
    /// answers with an error status, or the body cannot be written.
    fn download(&self, url: &str, dest: &Path) -> Result<(), InstallerError>;
}

/// [`Downloader`] using `ureq` with its default transport settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &Path) -> Result<(), InstallerError> {
        let failed = |source: crate::error::BoxError| InstallerError::Download {
            url: url.to_string(),
            source,
        };

        tracing::debug!("GET {url}");
        let response = ureq::get(url).call().map_err(|e| failed(e.into()))?;
        let mut reader = response.into_body().into_reader();

        // created only after the server answered successfully
        let mut file = File::create(dest).map_err(|e| failed(e.into()))?;
        let bytes = io::copy(&mut reader, &mut file).map_err(|e| failed(e.into()))?;
        tracing::debug!("wrote {bytes} bytes to {}", dest.display());
        Ok(())
    }
}
