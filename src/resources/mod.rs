//! Primitives acting on the host's files, processes, and release artifacts.
pub mod archive;
pub mod download;
pub mod host_binary;
pub mod process;
pub mod settings;

pub use archive::{Extractor, ZipExtractor};
pub use download::{Downloader, HttpDownloader};
pub use host_binary::{FileVersionProbe, VersionProbe};
pub use settings::{RepoEntry, SettingsDocument, SettingsStore};
