//! Repository descriptors selected by the run mode.
use std::fmt;

/// Which FVPR repository a run toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The public repository.
    #[default]
    Default,
    /// The development repository (`--dev`).
    Dev,
}

impl Mode {
    /// Select the mode from the `--dev` flag.
    #[must_use]
    pub const fn from_dev_flag(dev: bool) -> Self {
        if dev { Self::Dev } else { Self::Default }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Dev => write!(f, "dev"),
        }
    }
}

/// Public repository index URL.
pub const DEFAULT_REPO_URL: &str = "https://api.fvpr.dev/index";
/// Development repository index URL.
pub const DEV_REPO_URL: &str = "https://dev.api.fvpr.dev/index";
/// Terms of service shown before installing the public repository.
pub const DEFAULT_TOS_URL: &str = "https://fvpr.dev/tos";

/// Static description of the repository a run toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    /// Index URL; the identity of the repository entry.
    pub url: String,
    /// Name written into new entries and shown in messages.
    pub display_name: String,
    /// Terms of service that must be accepted before installing, if any.
    pub tos_url: Option<String>,
}

impl RepoDescriptor {
    /// Descriptor for `mode`.
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Default => Self {
                url: DEFAULT_REPO_URL.to_string(),
                display_name: "FVPR".to_string(),
                tos_url: Some(DEFAULT_TOS_URL.to_string()),
            },
            Mode::Dev => Self {
                url: DEV_REPO_URL.to_string(),
                display_name: "FVPR Dev".to_string(),
                tos_url: None,
            },
        }
    }
}
