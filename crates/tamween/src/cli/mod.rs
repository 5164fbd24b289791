//! Command-line interface for tamween.
//!
//! This module provides the CLI structure for the `tamween` binary and the
//! terminal confirmation prompt used before destructive commands.

mod commands;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ExportCommand, ImportCommand,
    ListCommand, OutputFormat, ShowCommand, StatsCommand,
};

use crate::logging::Verbosity;
use crate::transfer::Confirm;

/// tamween - Keep track of bread-ration card withdrawals
///
/// Records who holds each card, how many people it feeds, how many loaves
/// were drawn and whether they were paid for. Everything is stored locally.
#[derive(Debug, Parser)]
#[command(name = "tamween")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for store activity, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List cards, most recent withdrawal first
    List(ListCommand),

    /// Show one card
    Show(ShowCommand),

    /// Record a new card
    Add(AddCommand),

    /// Change a card; saving counts as a new withdrawal
    Edit(EditCommand),

    /// Delete a card
    Delete(DeleteCommand),

    /// Totals across all cards
    Stats(StatsCommand),

    /// Write a JSON backup of all cards
    Export(ExportCommand),

    /// Replace all cards with a JSON backup
    Import(ImportCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

/// Asks on the terminal and reads a y/n answer.
///
/// Anything other than `y` or `yes` (any case) counts as no, including end
/// of input.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, answer from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Prompt on `output`, answer from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ").is_err() || self.output.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn answer(input: &str) -> (bool, String) {
        let mut out = Vec::new();
        let said = TerminalPrompt::new(input.as_bytes(), &mut out).confirm("Delete?");
        (said, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "tamween");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["tamween", "-q", "stats"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["tamween", "stats"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["tamween", "-v", "stats"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["tamween", "-vv", "stats"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&["tamween", "add", "--owner", "Hoda", "--members", "4", "--loaves", "60"]);
        match cli.command {
            Command::Add(cmd) => {
                assert_eq!(cmd.owner, "Hoda");
                assert_eq!(cmd.members, 4);
                assert_eq!(cmd.loaves, 60);
                assert!(!cmd.paid);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_add_requires_owner() {
        assert!(Cli::try_parse_from(["tamween", "add", "--members", "2"]).is_err());
    }

    #[test]
    fn test_parse_edit_paid_conflicts_with_unpaid() {
        assert!(Cli::try_parse_from(["tamween", "edit", "abc", "--paid", "--unpaid"]).is_err());
    }

    #[test]
    fn test_parse_list_search() {
        let cli = parse(&["tamween", "list", "-s", "ali", "-f", "json"]);
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.search.as_deref(), Some("ali"));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = parse(&["tamween", "delete", "abc", "--yes"]);
        assert!(matches!(cli.command, Command::Delete(DeleteCommand { yes: true, .. })));
    }

    #[test]
    fn test_parse_import() {
        let cli = parse(&["tamween", "import", "back_tamween_2024-03-10.json"]);
        match cli.command {
            Command::Import(cmd) => {
                assert_eq!(cmd.file, PathBuf::from("back_tamween_2024-03-10.json"));
                assert!(!cmd.yes);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_stdout_conflicts_with_output() {
        assert!(Cli::try_parse_from(["tamween", "export", "--stdout", "-o", "/tmp"]).is_err());
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["tamween", "-c", "/custom/config.toml", "stats"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_prompt_yes() {
        let (said, shown) = answer("y\n");
        assert!(said);
        assert_eq!(shown, "Delete? [y/N] ");
        assert!(answer("YES\n").0);
    }

    #[test]
    fn test_prompt_defaults_to_no() {
        assert!(!answer("\n").0);
        assert!(!answer("nope\n").0);
        assert!(!answer("").0);
    }
}
