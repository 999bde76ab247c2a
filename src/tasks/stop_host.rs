//! Making sure the host application is not running before its settings change.
use crate::console::Confirm;
use crate::error::InstallerError;
use crate::resources::process;

use super::Context;

/// Host processes currently running.  A listing failure counts as none.
fn running(ctx: &Context) -> Vec<u32> {
    let name = &ctx.config.host.process_name;
    process::running_pids(ctx.executor.as_ref(), ctx.platform.os, name).unwrap_or_else(|e| {
        ctx.log
            .warn(&format!("could not list running processes: {e:#}"));
        Vec::new()
    })
}

/// Stop the host application if it is running.
///
/// Asks first; declining aborts the run.  Then kills every matching process
/// and re-checks until none is left.  The loop has no upper bound: a host
/// that keeps respawning blocks here.
///
/// Returns the number of kill passes made (zero if the host was not running).
///
/// # Errors
///
/// Returns [`InstallerError::UserCancelled`] if the user declines, or
/// [`InstallerError::Terminal`] if the console fails.
pub fn ensure_stopped(ctx: &Context, prompt: &mut dyn Confirm) -> Result<usize, InstallerError> {
    let mut pids = running(ctx);
    if pids.is_empty() {
        ctx.log.debug("host application is not running");
        return Ok(0);
    }

    let host = &ctx.config.host.display_name;
    ctx.log.warn(&format!(
        "The {host} app is currently running, please close it before continuing."
    ));
    prompt.ask_yes_no("Do you want to close it now?", true)?;
    ctx.log.hint(&format!("Closing {host}..."));

    let mut passes = 0;
    while !pids.is_empty() {
        passes += 1;
        for pid in &pids {
            if !process::kill(ctx.executor.as_ref(), ctx.platform.os, *pid) {
                ctx.log.debug(&format!("process {pid} was already gone"));
            }
        }
        std::thread::sleep(ctx.config.kill_retry_delay);
        pids = running(ctx);
    }
    ctx.log.debug(&format!("host stopped after {passes} pass(es)"));
    Ok(passes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::console::{Key, Prompt, ScriptedKeys};
    use crate::exec::{ExecResult, Executor};
    use crate::tasks::test_helpers::make_context;
    use anyhow::{Result, bail};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Answers `pgrep` with queued outputs and records kills.
    #[derive(Debug, Default)]
    struct ProcessTable {
        listings: Mutex<VecDeque<String>>,
        kills: Mutex<Vec<String>>,
        listing_fails: bool,
    }

    impl ProcessTable {
        fn with_listings(listings: &[&str]) -> Self {
            Self {
                listings: Mutex::new(listings.iter().map(ToString::to_string).collect()),
                ..Self::default()
            }
        }
    }

    impl Executor for ProcessTable {
        fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
            self.run_unchecked(program, args)
        }

        fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
            match program {
                "pgrep" if self.listing_fails => bail!("pgrep not found"),
                "pgrep" => Ok(ExecResult {
                    stdout: self.listings.lock().unwrap().pop_front().unwrap_or_default(),
                    success: true,
                    ..ExecResult::default()
                }),
                "kill" => {
                    self.kills.lock().unwrap().push(args.join(" "));
                    Ok(ExecResult {
                        success: args.last() != Some(&"2"),
                        ..ExecResult::default()
                    })
                }
                other => panic!("unexpected command {other}"),
            }
        }

        fn which(&self, _: &str) -> bool {
            true
        }
    }

    fn prompt(keys: &[Key]) -> Prompt<ScriptedKeys, Vec<u8>> {
        Prompt::new(ScriptedKeys::new(keys.iter().copied()), Vec::new())
    }

    #[test]
    fn not_running_asks_nothing() {
        let table = Arc::new(ProcessTable::with_listings(&[""]));
        let ctx = make_context().with_executor(table.clone());
        let mut p = prompt(&[]);
        assert_eq!(ensure_stopped(&ctx, &mut p).unwrap(), 0);
        assert!(table.kills.lock().unwrap().is_empty());
    }

    #[test]
    fn declining_aborts_without_killing() {
        let table = Arc::new(ProcessTable::with_listings(&["100\n"]));
        let ctx = make_context().with_executor(table.clone());
        let mut p = prompt(&[Key::No]);
        assert!(ensure_stopped(&ctx, &mut p).unwrap_err().is_cancellation());
        assert!(table.kills.lock().unwrap().is_empty());
    }

    #[test]
    fn kills_until_nothing_is_left() {
        let table = Arc::new(ProcessTable::with_listings(&["100\n2\n", "100\n", ""]));
        let ctx = make_context().with_executor(table.clone());
        let mut p = prompt(&[Key::Yes]);
        assert_eq!(ensure_stopped(&ctx, &mut p).unwrap(), 2);
        assert_eq!(
            table.kills.lock().unwrap().as_slice(),
            ["-9 100", "-9 2", "-9 100"]
        );
    }

    #[test]
    fn listing_failure_counts_as_not_running() {
        let table = Arc::new(ProcessTable {
            listing_fails: true,
            ..ProcessTable::default()
        });
        let ctx = make_context().with_executor(table);
        let mut p = prompt(&[]);
        assert_eq!(ensure_stopped(&ctx, &mut p).unwrap(), 0);
    }
}
