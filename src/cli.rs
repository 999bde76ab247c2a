use std::ffi::OsString;

use clap::Parser;

/// Flags the installer understands, with their long spelling.
/// Every other token is dropped before parsing.
const KNOWN_FLAGS: &[(&str, &str)] = &[
    ("--dev", "--dev"),
    ("-v", "--verbose"),
    ("--verbose", "--verbose"),
    ("-h", "--help"),
    ("--help", "--help"),
    ("-V", "--version"),
    ("--version", "--version"),
];

fn canonical_flag(arg: &str) -> Option<&'static str> {
    KNOWN_FLAGS
        .iter()
        .find(|(spelling, _)| *spelling == arg)
        .map(|(_, long)| *long)
}

/// Command-line interface of the FVPR installer.
///
/// Running the installer toggles the repository: it is installed when
/// absent and removed when present.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "fvpr-installer",
    about = "Install or remove the FVPR repository in the VRChat Creator Companion",
    version = crate::version()
)]
pub struct Cli {
    /// Toggle the development repository instead of the public one
    #[arg(long)]
    pub dev: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse the process arguments, ignoring anything unrecognised.
    ///
    /// # Errors
    ///
    /// Returns the clap error carrying the help or version text when
    /// `--help` or `--version` is given, so the caller can print it and
    /// still run the exit pause.
    pub fn parse_lenient() -> Result<Self, clap::Error> {
        Self::parse_lenient_from(std::env::args_os())
    }

    /// Parse `args` (program name first), ignoring anything unrecognised.
    ///
    /// # Errors
    ///
    /// See [`Cli::parse_lenient`].
    pub fn parse_lenient_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("fvpr-installer"));
        let mut known: Vec<OsString> = Vec::new();
        for arg in args {
            let Some(flag) = arg.to_str().and_then(canonical_flag) else {
                continue;
            };
            // Repeating a flag is an error in clap, so keep only the first occurrence.
            let flag = OsString::from(flag);
            if !known.contains(&flag) {
                known.push(flag);
            }
        }
        Self::try_parse_from(std::iter::once(program).chain(known))
    }
}
