//! Command-line interface definitions.
//!
//! This module defines all CLI arguments and subcommands using the clap
//! derive API: global options (verbosity) plus one subcommand per
//! disposition mode.
//!
//! # Example
//!
//! ```bash
//! # Relocate redundant copies into a quarantine directory
//! dupesweep move ~/Downloads ~/duplicates
//!
//! # Permanently delete redundant copies, skipping the prompt
//! dupesweep delete ~/Downloads --yes
//!
//! # Verbose mode for debugging
//! dupesweep -v delete ~/Downloads
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Duplicate file sweeper.
///
/// Finds files with identical content via SHA-256, keeps the oldest copy of
/// each set, and either deletes the rest or moves them into a quarantine
/// directory with a CSV manifest.
#[derive(Debug, Parser)]
#[command(name = "dupesweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Move redundant copies into a quarantine directory
    Move(MoveArgs),
    /// Permanently delete redundant copies
    Delete(DeleteArgs),
}

/// Arguments for the move subcommand.
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Directory tree to scan for duplicates
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Quarantine directory the redundant copies are moved into
    ///
    /// Created if absent. The relocated files mirror their original tree
    /// structure, and a files.csv manifest is written here.
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,
}

/// Arguments for the delete subcommand.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Directory tree to scan for duplicates
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Skip the confirmation prompt
    ///
    /// Deletion is permanent; files are not moved to a trash folder.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_move() {
        let cli = Cli::try_parse_from(["dupesweep", "move", "/data", "/quarantine"]).unwrap();
        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.root, PathBuf::from("/data"));
                assert_eq!(args.destination, PathBuf::from("/quarantine"));
            }
            Commands::Delete(_) => panic!("expected move subcommand"),
        }
    }

    #[test]
    fn test_cli_parses_delete_with_yes() {
        let cli = Cli::try_parse_from(["dupesweep", "delete", "/data", "-y"]).unwrap();
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.root, PathBuf::from("/data"));
                assert!(args.yes);
            }
            Commands::Move(_) => panic!("expected delete subcommand"),
        }
    }

    #[test]
    fn test_cli_requires_destination_for_move() {
        assert!(Cli::try_parse_from(["dupesweep", "move", "/data"]).is_err());
    }

    #[test]
    fn test_cli_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["dupesweep", "-v", "-q", "delete", "/data"]).is_err());
    }

    #[test]
    fn test_cli_global_verbosity_count() {
        let cli = Cli::try_parse_from(["dupesweep", "-vv", "delete", "/data"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
