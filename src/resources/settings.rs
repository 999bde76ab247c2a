//! The host's `settings.json`: loading, the `userRepos` list, and saving.
//!
//! The document is kept as an ordered JSON map so that every field the
//! installer does not touch is written back exactly as it was read, in the
//! same position.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::InstallerError;

/// Key of the repository list inside the settings document.
pub const USER_REPOS_KEY: &str = "userRepos";

/// A user repository entry.  Identity is the `url`; `name` is descriptive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Repository index URL.
    pub url: String,
    /// Display name.
    pub name: String,
}

impl From<RepoEntry> for Value {
    fn from(entry: RepoEntry) -> Self {
        serde_json::json!({ "url": entry.url, "name": entry.name })
    }
}

/// The `url` of a `userRepos` item, if it has a string one.
#[must_use]
pub fn entry_url(entry: &Value) -> Option<&str> {
    entry.get("url").and_then(Value::as_str)
}

/// Condition of `userRepos` when the document was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoListState {
    /// An array of objects; used as-is.
    Valid,
    /// Absent; starts empty.
    Missing,
    /// Not an array, or an array with a non-object item; replaced by an
    /// empty array and its previous content discarded.
    Malformed,
}

/// In-memory settings document.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
    user_repos: Vec<Value>,
    repo_list_state: RepoListState,
}

impl SettingsDocument {
    /// Parse `raw` as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not valid JSON or not an object.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let root: Map<String, Value> = serde_json::from_str(raw)?;
        Ok(Self::from_map(root))
    }

    /// Wrap an already-parsed object, normalising `userRepos`.
    #[must_use]
    pub fn from_map(root: Map<String, Value>) -> Self {
        let (user_repos, repo_list_state) = match root.get(USER_REPOS_KEY) {
            None => (Vec::new(), RepoListState::Missing),
            Some(Value::Array(items)) if items.iter().all(Value::is_object) => {
                (items.clone(), RepoListState::Valid)
            }
            Some(_) => (Vec::new(), RepoListState::Malformed),
        };
        Self {
            root,
            user_repos,
            repo_list_state,
        }
    }

    /// How `userRepos` looked when the document was read.
    #[must_use]
    pub const fn repo_list_state(&self) -> RepoListState {
        self.repo_list_state
    }

    /// The normalised repository list.
    #[must_use]
    pub fn repos(&self) -> &[Value] {
        &self.user_repos
    }

    /// Mutable access to the normalised repository list.
    pub fn repos_mut(&mut self) -> &mut Vec<Value> {
        &mut self.user_repos
    }

    /// The whole document with the normalised list stored under `userRepos`.
    ///
    /// An existing `userRepos` key keeps its position; a missing one is
    /// appended.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut root = self.root.clone();
        root.insert(
            USER_REPOS_KEY.to_string(),
            Value::Array(self.user_repos.clone()),
        );
        root
    }

    /// Serialise as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_map())
    }
}

/// Reads and writes the settings document at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the settings file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Read`] if the file cannot be read and
    /// [`InstallerError::Parse`] if it is not a JSON object.
    pub fn load(&self) -> Result<SettingsDocument, InstallerError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| InstallerError::Read {
            path: self.path.clone(),
            source,
        })?;
        SettingsDocument::parse(&raw).map_err(|source| InstallerError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the settings file with `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::Write`] if serialisation or the write fails.
    pub fn save(&self, doc: &SettingsDocument) -> Result<(), InstallerError> {
        let content = doc
            .to_json_string()
            .map_err(|e| InstallerError::Write {
                path: self.path.clone(),
                source: e.into(),
            })?;
        std::fs::write(&self.path, content).map_err(|source| InstallerError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
