//! ANSI SGR fragments used to colour console output.
//!
//! Every styled fragment is closed with [`RESET`] in the same string, so the
//! terminal never keeps a colour past the message that set it.

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// Bold.
pub const BOLD: &str = "\x1b[1m";
/// Dimmed grey, used for URLs and hints.
pub const DIM: &str = "\x1b[2m";
/// Red foreground.
pub const RED: &str = "\x1b[31m";
/// Green foreground.
pub const GREEN: &str = "\x1b[32m";
/// Yellow foreground.
pub const YELLOW: &str = "\x1b[33m";
/// Cyan foreground.
pub const CYAN: &str = "\x1b[36m";
/// Light grey foreground, used for prompt questions.
pub const GREY: &str = "\x1b[37m";
