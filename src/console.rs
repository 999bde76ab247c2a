//! Interactive console: single-key confirmations and the exit pause.
//!
//! Prompts are written straight to the console (not through `tracing`)
//! because they are interactive and must appear before the key is read.
//! Keys come from a [`KeySource`]; [`TerminalKeys`] reads them with
//! `crossterm` while holding the terminal in raw mode.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::InstallerError;
use crate::logging::style::{CYAN, DIM, GREY, RED, RESET};

/// A key press, classified for yes/no prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `Y`.
    Yes,
    /// `N`.
    No,
    /// `Esc` or `Ctrl+C`.
    Cancel,
    /// Any other key.
    Other,
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Self::Cancel,
            KeyCode::Char('y' | 'Y') => Self::Yes,
            KeyCode::Char('n' | 'N') => Self::No,
            KeyCode::Esc => Self::Cancel,
            _ => Self::Other,
        }
    }
}

/// Source of single key presses.
pub trait KeySource {
    /// Block until the next key press.
    ///
    /// # Errors
    ///
    /// Returns an error if the console cannot be read.
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Keeps the terminal in raw mode for as long as it is alive.
#[derive(Debug)]
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        terminal::disable_raw_mode().ok();
    }
}

/// [`KeySource`] reading key presses from the real terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        let _raw = RawModeGuard::acquire()?;
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                return Ok(Key::from(key));
            }
        }
    }
}

/// [`KeySource`] replaying a fixed sequence of keys.
///
/// Running out of keys is reported as an `UnexpectedEof` error.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
}

impl ScriptedKeys {
    /// Replay `keys` in order.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Keys not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }
}

/// Yes/no confirmation gate.
pub trait Confirm {
    /// Ask `question` and wait for `Y`, `N`, or cancel.
    ///
    /// Returns `Ok(true)` for yes.  For no/cancel, returns
    /// [`InstallerError::UserCancelled`] when `cancel_is_failure` is set and
    /// `Ok(false)` otherwise.  Unrecognised keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::UserCancelled`] as described above, or
    /// [`InstallerError::Terminal`] if the console fails.
    fn ask_yes_no(&mut self, question: &str, cancel_is_failure: bool)
    -> Result<bool, InstallerError>;
}

/// Console prompt reading keys from `K` and writing to `W`.
#[derive(Debug)]
pub struct Prompt<K, W> {
    keys: K,
    out: W,
}

impl Prompt<TerminalKeys, io::Stdout> {
    /// Prompt bound to the real terminal.
    #[must_use]
    pub fn terminal() -> Self {
        Self::new(TerminalKeys, io::stdout())
    }
}

impl<K: KeySource, W: Write> Prompt<K, W> {
    /// Create a prompt over an arbitrary key source and writer.
    pub const fn new(keys: K, out: W) -> Self {
        Self { keys, out }
    }

    /// Consume the prompt, returning its key source and writer.
    pub fn into_parts(self) -> (K, W) {
        (self.keys, self.out)
    }

    /// Print the exit footer and wait for any key.
    ///
    /// A failed run additionally gets the failure banner.  Console errors
    /// here are ignored: the process is about to exit either way.
    pub fn pause_before_exit(&mut self, failed: bool) {
        writeln!(self.out).ok();
        if failed {
            writeln!(self.out, "{RED}!!!  Installation failed  !!!{RESET}").ok();
        }
        writeln!(self.out, "{DIM}=== Press any key to exit ==={RESET}").ok();
        self.out.flush().ok();
        self.keys.next_key().ok();
    }
}

impl<K: KeySource, W: Write> Confirm for Prompt<K, W> {
    fn ask_yes_no(
        &mut self,
        question: &str,
        cancel_is_failure: bool,
    ) -> Result<bool, InstallerError> {
        write!(self.out, "{GREY}{question}{RESET} {CYAN}(Y/n){RESET}")?;
        self.out.flush()?;

        loop {
            match self.keys.next_key()? {
                Key::Yes => {
                    writeln!(self.out)?;
                    return Ok(true);
                }
                Key::No | Key::Cancel => {
                    writeln!(self.out)?;
                    if cancel_is_failure {
                        return Err(InstallerError::UserCancelled);
                    }
                    return Ok(false);
                }
                Key::Other => {}
            }
        }
    }
}

/// Set the console window title.  Failures are ignored.
pub fn set_title(title: &str) {
    crossterm::execute!(io::stdout(), terminal::SetTitle(title)).ok();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn prompt(keys: &[Key]) -> Prompt<ScriptedKeys, Vec<u8>> {
        Prompt::new(ScriptedKeys::new(keys.iter().copied()), Vec::new())
    }

    fn output(p: Prompt<ScriptedKeys, Vec<u8>>) -> (ScriptedKeys, String) {
        let (keys, out) = p.into_parts();
        (keys, String::from_utf8(out).unwrap())
    }

    #[test]
    fn yes_returns_true() {
        let mut p = prompt(&[Key::Yes]);
        assert!(p.ask_yes_no("Continue?", true).unwrap());
    }

    #[test]
    fn no_on_required_prompt_is_cancellation() {
        let mut p = prompt(&[Key::No]);
        let err = p.ask_yes_no("Continue?", true).unwrap_err();
        assert!(err.is_cancellation());
    }

    #[test]
    fn cancel_on_required_prompt_is_cancellation() {
        let mut p = prompt(&[Key::Cancel]);
        assert!(p.ask_yes_no("Continue?", true).unwrap_err().is_cancellation());
    }

    #[test]
    fn no_on_optional_prompt_returns_false() {
        let mut p = prompt(&[Key::No]);
        assert!(!p.ask_yes_no("Install the patch?", false).unwrap());
    }

    #[test]
    fn cancel_on_optional_prompt_returns_false() {
        let mut p = prompt(&[Key::Cancel]);
        assert!(!p.ask_yes_no("Install the patch?", false).unwrap());
    }

    #[test]
    fn other_keys_are_ignored_without_reprinting() {
        let mut p = prompt(&[Key::Other, Key::Other, Key::Yes, Key::No]);
        assert!(p.ask_yes_no("Continue?", true).unwrap());
        let (keys, text) = output(p);
        assert_eq!(keys.remaining(), 1, "prompt must stop at the first Y");
        assert_eq!(text.matches("Continue?").count(), 1);
        assert!(text.contains("(Y/n)"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn exhausted_key_source_is_terminal_error() {
        let mut p = prompt(&[Key::Other]);
        let err = p.ask_yes_no("Continue?", true).unwrap_err();
        assert!(matches!(err, InstallerError::Terminal(_)));
    }

    #[test]
    fn pause_prints_failure_banner_only_on_failure() {
        let mut p = prompt(&[Key::Other]);
        p.pause_before_exit(true);
        let (keys, text) = output(p);
        assert_eq!(keys.remaining(), 0, "pause waits for one key");
        assert!(text.contains("Installation failed"));
        assert!(text.contains("Press any key to exit"));

        let mut p = prompt(&[Key::Yes]);
        p.pause_before_exit(false);
        let (_, text) = output(p);
        assert!(!text.contains("Installation failed"));
        assert!(text.contains("Press any key to exit"));
    }

    #[test]
    fn pause_tolerates_missing_keys() {
        let mut p = prompt(&[]);
        p.pause_before_exit(false);
    }

    #[test]
    fn key_classification() {
        let key = |code, modifiers| Key::from(KeyEvent::new(code, modifiers));
        assert_eq!(key(KeyCode::Char('y'), KeyModifiers::NONE), Key::Yes);
        assert_eq!(key(KeyCode::Char('Y'), KeyModifiers::SHIFT), Key::Yes);
        assert_eq!(key(KeyCode::Char('n'), KeyModifiers::NONE), Key::No);
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Key::Cancel);
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Key::Cancel);
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::NONE), Key::Other);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Key::Other);
    }
}
