//! `import` - bulk loading of withdrawal history from CSV.

use crate::{cli::now, core::import, errors::Result, store::Store};
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// CSV import
#[derive(Args, Debug)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommands,
}

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import material withdrawals
    Materials {
        /// CSV file to read
        file: PathBuf,
    },
    /// Import ONT serial numbers
    Ont {
        /// CSV file to read
        file: PathBuf,
    },
}

/// Execute import commands
pub fn execute(args: ImportArgs, store: &mut Store) -> Result<()> {
    let (file, summary) = match args.command {
        ImportCommands::Materials { file } => {
            let summary = import::import_withdrawals_csv(store, &file, now())?;
            (file, summary)
        }
        ImportCommands::Ont { file } => {
            let summary = import::import_ont_csv(store, &file, now())?;
            (file, summary)
        }
    };
    println!("{}: {}", file.display(), summary);
    Ok(())
}
