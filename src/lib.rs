//! DupeSweep - Duplicate File Sweeper
//!
//! Finds duplicate files in a directory tree by content hashing (SHA-256),
//! keeps the oldest copy of each set, and either permanently deletes the
//! redundant copies or relocates them into a quarantine directory with a
//! CSV manifest of every move.

use std::io::{self, Write};

pub mod cli;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod progress;
pub mod resolver;
pub mod run;
pub mod scanner;

use cli::{Cli, Commands};
use error::ExitCode;
use progress::Progress;
use resolver::Failure;

/// Run the application logic for parsed CLI arguments.
///
/// Initializes logging, wires up the terminal progress reporter, and
/// dispatches to the requested disposition mode. Returns the exit code the
/// process should finish with.
///
/// # Errors
///
/// Returns an error for invalid directory arguments or an unusable
/// terminal; per-file failures are reported in-line and reflected in the
/// exit code instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let progress = Progress::new(cli.quiet);

    match cli.command {
        Commands::Move(args) => {
            let report = run::run_move(
                &args.root,
                &args.destination,
                Some(&progress),
                Some(&progress),
            )?;
            report_failures(&report.failures);
            Ok(ExitCode::for_outcome(report.groups, report.failures.len()))
        }
        Commands::Delete(args) => {
            if !args.yes {
                let prompt = format!(
                    "Permanently delete redundant copies under {}?",
                    args.root.display()
                );
                if !confirm(&prompt)? {
                    eprintln!("Aborted.");
                    return Ok(ExitCode::GeneralError);
                }
            }

            let report = run::run_delete(&args.root, Some(&progress), Some(&progress))?;
            report_failures(&report.failures);
            Ok(ExitCode::for_outcome(report.groups, report.failures.len()))
        }
    }
}

/// Print each per-file failure with its path and reason.
fn report_failures(failures: &[Failure]) {
    for failure in failures {
        log::error!("{failure}");
    }
}

/// Ask the user to confirm an irreversible action. Defaults to no.
fn confirm(prompt: &str) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        print!("{prompt} (y/N): ");
        io::stdout().flush()?;

        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF counts as a refusal.
            return Ok(false);
        }

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" | "" => return Ok(false),
            _ => continue,
        }
    }
}
