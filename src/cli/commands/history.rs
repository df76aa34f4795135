//! `history` - searching and correcting withdrawal history.

use crate::{
    cli::render,
    config::Settings,
    core::{ont, report, usage, withdrawal},
    errors::Result,
    store::Store,
};
use clap::{Args, Subcommand};

/// Withdrawal history
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List material withdrawals
    Materials {
        /// Only rows whose item or team contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// List ONT withdrawals with their usage status
    Ont {
        /// Only rows whose serial or team contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a material withdrawal by its number
    RemoveMaterial {
        /// Row number from `history materials`
        position: usize,
    },
    /// Delete an ONT withdrawal by its number
    RemoveOnt {
        /// Row number from `history ont`
        position: usize,
    },
}

/// Execute history commands
pub fn execute(args: HistoryArgs, settings: &Settings, store: &mut Store) -> Result<()> {
    match args.command {
        HistoryCommands::Materials { search } => {
            let rows: Vec<Vec<String>> =
                withdrawal::search_withdrawals(store.withdrawals(), search.as_deref().unwrap_or(""))
                    .into_iter()
                    .map(|listed| {
                        vec![
                            listed.position.to_string(),
                            listed.record.date.clone(),
                            listed.record.item_name.clone(),
                            listed.record.quantity.to_string(),
                            listed.record.team.clone(),
                        ]
                    })
                    .collect();
            render::print_table(
                &["No", "Tanggal", "Deskripsi", "Qty", "Nama Tim"],
                &rows,
                "No material withdrawals found.",
            );
        }
        HistoryCommands::Ont { search } => {
            let reports = report::load_all_reports(&settings.report_sources);
            let used = usage::used_serials(&reports);
            let rows: Vec<Vec<String>> = ont::search_ont_withdrawals(
                store.ont_withdrawals(),
                &used,
                search.as_deref().unwrap_or(""),
            )
            .into_iter()
            .map(|listed| {
                vec![
                    listed.position.to_string(),
                    listed.record.date.clone(),
                    listed.record.serial_number.clone(),
                    listed.record.team.clone(),
                    listed.status.to_string(),
                ]
            })
            .collect();
            render::print_table(
                &["No", "Tanggal", "Serial Number", "Nama Tim", "Status"],
                &rows,
                "No ONT withdrawals found.",
            );
        }
        HistoryCommands::RemoveMaterial { position } => {
            let removed = withdrawal::delete_withdrawal(store, position)?;
            println!(
                "Removed {} x {} taken by '{}' on {}",
                removed.quantity, removed.item_name, removed.team, removed.date
            );
        }
        HistoryCommands::RemoveOnt { position } => {
            let removed = ont::delete_ont_withdrawal(store, position)?;
            println!(
                "Removed ONT {} taken by '{}' on {}",
                removed.serial_number, removed.team, removed.date
            );
        }
    }
    Ok(())
}
