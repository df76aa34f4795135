//! `export` - CSV export of histories and report rows.

use crate::{
    config::Settings,
    core::{export, report, usage},
    errors::Result,
    store::Store,
};
use clap::{Args, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV export
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommands,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export material withdrawal history
    Materials {
        /// CSV file to write
        file: PathBuf,
    },
    /// Export ONT withdrawal history with current usage status
    Ont {
        /// CSV file to write
        file: PathBuf,
    },
    /// Export every row of one report source
    Report {
        /// Report source key, see `report sources`
        source: String,
        /// CSV file to write
        file: PathBuf,
    },
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Execute export commands
pub fn execute(args: ExportArgs, settings: &Settings, store: &Store) -> Result<()> {
    match args.command {
        ExportCommands::Materials { file } => {
            let written = export::export_withdrawals(store.withdrawals(), create(&file)?)?;
            println!("Exported {written} material withdrawal(s) to {}", file.display());
        }
        ExportCommands::Ont { file } => {
            let reports = report::load_all_reports(&settings.report_sources);
            let used = usage::used_serials(&reports);
            let written = export::export_ont(store.ont_withdrawals(), &used, create(&file)?)?;
            println!("Exported {written} ONT withdrawal(s) to {}", file.display());
        }
        ExportCommands::Report { source, file } => {
            let source = settings.report_source(&source)?;
            let rows = report::load_report_rows(source)?;
            if rows.is_empty() {
                info!("No rows in {}, skipping export", source.display_name);
                println!("{} has no rows; nothing exported.", source.display_name);
                return Ok(());
            }
            let written = export::export_report_rows(&rows, create(&file)?)?;
            println!(
                "Exported {written} {} row(s) to {}",
                source.display_name,
                file.display()
            );
        }
    }
    Ok(())
}
