use std::process::ExitCode;

use fvpr_installer::cli::Cli;
use fvpr_installer::console::{self, Prompt};
use fvpr_installer::error::InstallerError;
use fvpr_installer::logging::{self, Logger};
use fvpr_installer::{commands, version};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = match Cli::parse_lenient() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version land here
            let _ = e.print();
            let failed = e.use_stderr();
            Prompt::terminal().pause_before_exit(failed);
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init_subscriber(args.verbose, "installer");
    let log = Logger::new("installer");

    console::set_title(&format!("FVPR Installer v{}", version()));
    let mut prompt = Prompt::terminal();

    let failed = match commands::install::run(&args, &log, &mut prompt) {
        Ok(summary) => {
            log.debug(&format!("{summary:?}"));
            false
        }
        Err(e) => {
            let cancelled = e
                .downcast_ref::<InstallerError>()
                .is_some_and(InstallerError::is_cancellation);
            if !cancelled {
                log.error(&format!("{e:#}"));
            }
            true
        }
    };

    if let Some(path) = log.log_path() {
        log.hint(&format!("Log saved to {}", path.display()));
    }
    prompt.pause_before_exit(failed);

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
