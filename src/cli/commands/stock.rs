//! `stock` - stock-in entries and the remaining-stock table.

use crate::{
    cli::{now, render},
    core::stock,
    errors::Result,
    store::Store,
};
use clap::{Args, Subcommand};

/// Incoming stock
#[derive(Args, Debug)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: StockCommands,
}

/// Stock subcommands
#[derive(Subcommand, Debug)]
pub enum StockCommands {
    /// Record incoming stock
    Add {
        /// Material or accessory name
        item: String,
        /// Quantity received
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show remaining stock per entry
    List,
    /// Delete a stock entry by its number in `stock list`
    Remove {
        /// Entry number
        position: usize,
    },
}

/// Execute stock commands
pub fn execute(args: StockArgs, store: &mut Store) -> Result<()> {
    match args.command {
        StockCommands::Add { item, quantity } => {
            let entry = stock::add_stock(store, &item, quantity, now())?;
            println!(
                "Stock in: {} x {} at {}",
                entry.quantity_received, entry.item_name, entry.date
            );
        }
        StockCommands::List => {
            let rows: Vec<Vec<String>> =
                stock::compute_remaining_stock(store.stock_entries(), store.withdrawals())
                    .into_iter()
                    .map(|row| {
                        vec![
                            row.index.to_string(),
                            row.date,
                            row.item_name,
                            row.quantity_in.to_string(),
                            row.quantity_taken.to_string(),
                            row.quantity_remaining.to_string(),
                        ]
                    })
                    .collect();
            render::print_table(
                &["No", "Tanggal", "Item", "Masuk", "Keluar", "Sisa"],
                &rows,
                "No stock entries yet.",
            );
        }
        StockCommands::Remove { position } => {
            let removed = stock::delete_stock_entry(store, position)?;
            println!(
                "Removed stock entry {}: {} x {} ({})",
                position, removed.quantity_received, removed.item_name, removed.date
            );
        }
    }
    Ok(())
}
