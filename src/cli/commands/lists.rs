//! `lists` - the master-list editor.

use crate::{
    cli::render,
    core::master,
    errors::Result,
    store::{MasterKind, Store},
};
use clap::{Args, Subcommand};

/// Master lists of divisions, teams, materials and accessories
#[derive(Args, Debug)]
pub struct ListsArgs {
    #[command(subcommand)]
    pub command: ListsCommands,
}

/// Master list subcommands
#[derive(Subcommand, Debug)]
pub enum ListsCommands {
    /// Show a list with entry numbers
    Show {
        /// division, team, material or accessory
        kind: MasterKind,
        /// Only entries containing this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Entries matching partial input, as offered while typing
    Suggest {
        /// division, team, material or accessory
        kind: MasterKind,
        /// Text typed so far
        #[arg(default_value = "")]
        partial: String,
    },
    /// Every item name offered on the withdrawal form
    Items,
    /// Add an entry
    Add {
        /// division, team, material or accessory
        kind: MasterKind,
        /// New entry
        value: String,
    },
    /// Change the entry at a number
    Rename {
        /// division, team, material or accessory
        kind: MasterKind,
        /// Entry number from `lists show`
        position: usize,
        /// Replacement value
        value: String,
    },
    /// Delete the entry at a number
    Remove {
        /// division, team, material or accessory
        kind: MasterKind,
        /// Entry number from `lists show`
        position: usize,
    },
}

/// Execute master list commands
pub fn execute(args: ListsArgs, store: &mut Store) -> Result<()> {
    match args.command {
        ListsCommands::Show { kind, search } => {
            let needle = search.unwrap_or_default().to_lowercase();
            let rows: Vec<Vec<String>> = store
                .master_list(kind)
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.to_lowercase().contains(&needle))
                .map(|(i, entry)| vec![(i + 1).to_string(), entry.clone()])
                .collect();
            render::print_table(&["No", "Name"], &rows, &format!("No {kind} entries."));
        }
        ListsCommands::Suggest { kind, partial } => {
            for entry in master::suggest(store, kind, &partial) {
                println!("{entry}");
            }
        }
        ListsCommands::Items => {
            for name in master::item_names(store) {
                println!("{name}");
            }
        }
        ListsCommands::Add { kind, value } => {
            let added = master::add_entry(store, kind, &value)?;
            println!("Added '{added}' to {kind} list");
        }
        ListsCommands::Rename {
            kind,
            position,
            value,
        } => {
            let old = master::rename_entry(store, kind, position, &value)?;
            println!("Renamed {kind} '{old}' to '{}'", value.trim());
        }
        ListsCommands::Remove { kind, position } => {
            let removed = master::remove_entry(store, kind, position)?;
            println!("Removed '{removed}' from {kind} list");
        }
    }
    Ok(())
}
