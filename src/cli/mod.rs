//! Stakebook CLI - personal betting ledger
//!
//! Commands:
//! - `stakebook add/edit/settle/delete/undo` - maintain the ledger
//! - `stakebook list` - browse wagers, newest first
//! - `stakebook stats` - aggregate performance views
//! - `stakebook goal` - profit target and progress
//! - `stakebook export` - csv/json snapshots

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::persistence::{JsonFileStore, KvStore};
use output::OutputMode;

/// Stakebook - personal betting ledger and analytics
#[derive(Parser, Debug)]
#[command(name = "stakebook")]
#[command(author, version, about = "Personal betting ledger and analytics")]
pub struct Cli {
    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter flags shared by list/stats/export, mirroring the view query
/// parameters: absence of a flag means "no constraint".
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Sport (football, cricket, tennis, other)
    #[arg(long)]
    pub sport: Option<String>,

    /// Status (pending, won, lost)
    #[arg(long)]
    pub status: Option<String>,

    /// Inclusive from-date (yyyy-mm-dd)
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive to-date (yyyy-mm-dd)
    #[arg(long)]
    pub to: Option<String>,

    /// Case-insensitive text search over description, sport and status
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new wager
    Add {
        /// Free-text description of the wager
        description: String,
        /// Sport (football, cricket, tennis, other)
        #[arg(long)]
        sport: String,
        /// Stake amount
        #[arg(long)]
        stake: String,
        /// Decimal odds, e.g. 2.10
        #[arg(long)]
        odds: String,
        /// Event date (yyyy-mm-dd), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Football market category (goals, corners, result, double-chance, other)
        #[arg(long)]
        category: Option<String>,
        /// Initial status, defaults to pending
        #[arg(long)]
        status: Option<String>,
    },

    /// Edit fields of an existing wager
    Edit {
        id: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        sport: Option<String>,
        /// Category, or "none" to clear
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        stake: Option<String>,
        #[arg(long)]
        odds: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Payout override, or "none" to clear
        #[arg(long)]
        payout: Option<String>,
    },

    /// Mark a wager won or lost
    Settle {
        id: String,
        /// Outcome: won or lost
        outcome: String,
        /// Payout override for cash-outs / partial settlements
        #[arg(long)]
        payout: Option<String>,
    },

    /// Delete a wager (restorable with `undo` for 10 seconds)
    Delete { id: String },

    /// Restore the last deleted wager
    Undo,

    /// Show the ledger, newest first
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Aggregate performance views
    Stats {
        /// View: summary, monthly, sports, categories, bands, weekdays, series
        #[arg(default_value = "summary")]
        view: String,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Profit goal management
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Export the (optionally filtered) ledger
    Export {
        /// Format: csv or json
        format: String,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Show progress toward the profit target
    Show,
    /// Set the profit target (invalid input falls back to 0)
    Set { target: String },
    /// Set the starting bankroll
    Bankroll { amount: String },
}

impl Cli {
    pub fn run(self, config: &AppConfig) -> Result<()> {
        let store: JsonFileStore = match &config.storage.data_dir {
            Some(dir) => JsonFileStore::new(dir),
            None => JsonFileStore::default_location()?,
        };
        self.run_with_store(&store, config)
    }

    /// Dispatch against an explicit store; the seam used by tests.
    pub fn run_with_store(self, store: &dyn KvStore, config: &AppConfig) -> Result<()> {
        let mode = OutputMode::from_json_flag(self.json);
        let currency = config.display.currency.as_str();

        match self.command {
            Commands::Add {
                description,
                sport,
                stake,
                odds,
                date,
                category,
                status,
            } => commands::add(
                store, mode, description, sport, stake, odds, date, category, status,
            ),
            Commands::Edit {
                id,
                date,
                description,
                sport,
                category,
                stake,
                odds,
                status,
                payout,
            } => commands::edit(
                store, mode, id, date, description, sport, category, stake, odds, status, payout,
            ),
            Commands::Settle {
                id,
                outcome,
                payout,
            } => commands::settle(store, mode, id, outcome, payout),
            Commands::Delete { id } => commands::delete(store, id),
            Commands::Undo => commands::undo(store),
            Commands::List { filter } => commands::list(store, mode, currency, &filter),
            Commands::Stats { view, filter } => {
                commands::stats(store, mode, currency, &view, &filter)
            }
            Commands::Goal(goal) => commands::goal(store, mode, currency, goal),
            Commands::Export {
                format,
                output,
                filter,
            } => commands::export(store, &format, output.as_deref(), &filter),
        }
    }
}
