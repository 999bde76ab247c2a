//! Listing and force-killing processes by name.
//!
//! Windows uses `tasklist`/`taskkill`; other systems use `pgrep`/`kill`.
use anyhow::Result;

use crate::exec::Executor;
use crate::platform::Os;

/// PIDs of running processes named `name` (without `.exe`).
///
/// # Errors
///
/// Returns an error if the listing command cannot be spawned.
pub fn running_pids(executor: &dyn Executor, os: Os, name: &str) -> Result<Vec<u32>> {
    match os {
        Os::Windows => {
            let image = format!("{name}.exe");
            let filter = format!("IMAGENAME eq {image}");
            let result =
                executor.run_unchecked("tasklist", &["/FI", &filter, "/FO", "CSV", "/NH"])?;
            Ok(parse_tasklist_csv(&result.stdout, &image))
        }
        Os::Linux => {
            // pgrep exits 1 when nothing matches
            let pattern = cmdline_pattern(name);
            let result = executor.run_unchecked("pgrep", &["-f", &pattern])?;
            Ok(parse_pgrep(&result.stdout))
        }
    }
}

/// Extended regex matching a command line whose program is `name`, with or
/// without a leading directory.
///
/// `pgrep -x` compares against the kernel's process name, which is cut to
/// 15 bytes, so longer names are matched on the full command line instead.
fn cmdline_pattern(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if "\\.^$|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("^([^ ]*/)?{escaped}( |$)")
}

/// Force-kill `pid`.
///
/// Returns `false` if the kill command failed, typically because the
/// process already exited; callers re-list rather than treat that as an error.
pub fn kill(executor: &dyn Executor, os: Os, pid: u32) -> bool {
    let pid = pid.to_string();
    let result = match os {
        Os::Windows => executor.run_unchecked("taskkill", &["/F", "/PID", &pid]),
        Os::Linux => executor.run_unchecked("kill", &["-9", &pid]),
    };
    result.is_ok_and(|r| r.success)
}

/// Parse `tasklist /FO CSV /NH` output, keeping rows whose image name is `image`.
///
/// When nothing matches, `tasklist` prints an informational line instead of
/// CSV; it has no quoted PID column and is skipped.
#[must_use]
pub fn parse_tasklist_csv(output: &str, image: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split(',').map(|f| f.trim().trim_matches('"'));
            let name = fields.next()?;
            let pid = fields.next()?;
            if !name.eq_ignore_ascii_case(image) {
                return None;
            }
            pid.parse().ok()
        })
        .collect()
}

/// Parse `pgrep` output: one PID per line.
#[must_use]
pub fn parse_pgrep(output: &str) -> Vec<u32> {
    output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect()
}
