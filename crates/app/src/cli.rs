//! Command line definition

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "sorteador")]
#[command(about = "Raffle lists with fair-mode draws, history and statistics")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the database file
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage raffle lists
    #[command(subcommand)]
    List(ListCommand),

    /// Manage participants of a list
    #[command(subcommand)]
    Name(NameCommand),

    /// Restart the fair-mode cycle of a list
    Reset {
        list_id: Uuid,
    },

    /// Draw winners from a list
    Draw(DrawArgs),

    /// Show or clear committed draws of a list
    #[command(subcommand)]
    History(HistoryCommand),

    /// Show win statistics of a list
    Stats {
        list_id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Create a new list
    Create {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Show all lists
    All,

    /// Show a list and its participants
    Show {
        list_id: Uuid,
    },

    /// Search participants by name
    Search {
        list_id: Uuid,
        term: String,
    },

    /// Give a list a new name
    Rename {
        list_id: Uuid,
        name: String,
    },

    /// Copy a list's participants into a new list
    Duplicate {
        list_id: Uuid,
    },

    /// Delete a list and its history
    Delete {
        list_id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum NameCommand {
    /// Add one participant
    Add {
        list_id: Uuid,
        name: String,
    },

    /// Import participants separated by commas or newlines
    Import {
        list_id: Uuid,

        /// Names to import; reads this file instead when --file is given
        #[arg(required_unless_present = "file")]
        names: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Remove a participant by id
    Remove {
        list_id: Uuid,
        participant_id: Uuid,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Show committed draws, newest first
    Show {
        list_id: Uuid,

        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Delete every committed draw of a list
    Clear {
        list_id: Uuid,
    },
}

#[derive(Debug, Clone, Args)]
pub struct DrawArgs {
    pub list_id: Uuid,

    /// Number of winners (defaults to the configured quantity)
    #[arg(short = 'n', long)]
    pub quantity: Option<u32>,

    /// Allow the same participant to win more than once
    #[arg(long)]
    pub with_replacement: bool,

    /// Draw everyone once per cycle before anyone repeats
    #[arg(long)]
    pub fair: bool,

    /// Plain draw even when fair mode is the configured default
    #[arg(long, conflicts_with = "fair")]
    pub no_fair: bool,

    /// Simulate the draw without saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Only show the eligible pool, do not draw
    #[arg(long, conflicts_with = "dry_run")]
    pub preview: bool,

    /// Record the draw without animation effects
    #[arg(long)]
    pub no_animation: bool,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,
}
