//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::card::CardDraft;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show cards whose owner name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Card id
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Name of the card holder
    #[arg(short, long)]
    pub owner: String,

    /// Number of household members on the card
    #[arg(short, long, default_value = "1")]
    pub members: u32,

    /// Loaves withdrawn (at most 15 per member)
    #[arg(short, long, default_value = "0")]
    pub loaves: u32,

    /// Mark the withdrawal as paid
    #[arg(long)]
    pub paid: bool,

    /// Amount paid
    #[arg(long, default_value = "0")]
    pub paid_amount: f64,

    /// Free-form notes
    #[arg(short, long, default_value = "")]
    pub notes: String,
}

impl AddCommand {
    /// The form contents these arguments describe.
    #[must_use]
    pub fn to_draft(&self) -> CardDraft {
        CardDraft {
            owner_name: self.owner.clone(),
            members_count: self.members,
            withdrawn_loaves: self.loaves,
            is_paid: self.paid,
            paid_amount: self.paid_amount,
            notes: self.notes.clone(),
        }
    }
}

/// Edit command arguments. Omitted fields keep their stored value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Card id
    pub id: String,

    /// New card holder name
    #[arg(short, long)]
    pub owner: Option<String>,

    /// New number of household members
    #[arg(short, long)]
    pub members: Option<u32>,

    /// New loaves withdrawn
    #[arg(short, long)]
    pub loaves: Option<u32>,

    /// Mark as paid
    #[arg(long, conflicts_with = "unpaid")]
    pub paid: bool,

    /// Mark as unpaid
    #[arg(long)]
    pub unpaid: bool,

    /// New amount paid
    #[arg(long)]
    pub paid_amount: Option<f64>,

    /// Replace the notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl EditCommand {
    /// Overlay the given arguments onto a pre-filled draft.
    pub fn apply(&self, draft: &mut CardDraft) {
        if let Some(owner) = &self.owner {
            draft.owner_name.clone_from(owner);
        }
        if let Some(members) = self.members {
            draft.members_count = members;
        }
        if let Some(loaves) = self.loaves {
            draft.withdrawn_loaves = loaves;
        }
        if self.paid {
            draft.is_paid = true;
        } else if self.unpaid {
            draft.is_paid = false;
        }
        if let Some(amount) = self.paid_amount {
            draft.paid_amount = amount;
        }
        if let Some(notes) = &self.notes {
            draft.notes.clone_from(notes);
        }
    }
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Card id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Directory to write the backup into (defaults to the configured one)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the backup to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Backup file to restore from
    pub file: PathBuf,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per card
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
