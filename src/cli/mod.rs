//! Command-line front end.
//!
//! Parses arguments with `clap` and dispatches to the core operations.
//! Results go to stdout; logs go to stderr.

/// Subcommand implementations
pub mod commands;
/// Plain-text tables
pub mod render;

use crate::{config::Settings, errors::Result, store::Store};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};

/// Material and ONT withdrawal logbook for field teams
#[derive(Parser, Debug)]
#[command(name = "material-tracker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record materials and ONTs taken by a team
    Withdraw(commands::withdraw::WithdrawArgs),

    /// Record incoming stock and show what remains
    Stock(commands::stock::StockArgs),

    /// Search and correct withdrawal history
    History(commands::history::HistoryArgs),

    /// Import withdrawal history from CSV
    Import(commands::import::ImportArgs),

    /// Export history or report rows to CSV
    Export(commands::export::ExportArgs),

    /// Browse external usage reports
    Report(commands::report::ReportArgs),

    /// Edit the division, team, material and accessory lists
    Lists(commands::lists::ListsArgs),
}

/// Local wall-clock time used to stamp new records.
#[must_use]
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Runs one parsed command against the opened store.
///
/// # Errors
/// Returns whatever error the selected operation produced.
pub fn run(cli: Cli, settings: &Settings, store: &mut Store) -> Result<()> {
    match cli.command {
        Commands::Withdraw(args) => commands::withdraw::execute(args, store),
        Commands::Stock(args) => commands::stock::execute(args, store),
        Commands::History(args) => commands::history::execute(args, settings, store),
        Commands::Import(args) => commands::import::execute(args, store),
        Commands::Export(args) => commands::export::execute(args, settings, store),
        Commands::Report(args) => commands::report::execute(args, settings),
        Commands::Lists(args) => commands::lists::execute(args, store),
    }
}
