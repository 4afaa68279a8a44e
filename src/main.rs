//! DupeSweep - Duplicate File Sweeper
//!
//! Entry point for the dupesweep CLI application.

use clap::Parser;
use dupesweep::{cli::Cli, error::ExitCode};

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Run the application logic
    match dupesweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;
            eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            std::process::exit(exit_code.as_i32());
        }
    }
}
