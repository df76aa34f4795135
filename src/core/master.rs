//! Master list business logic - novel-value promotion and the list editor.
//!
//! Master lists are a derived record of every name ever used: whenever a
//! withdrawal, stock-in or import introduces a division, team or item name
//! the corresponding list has not seen, the name is appended and the list
//! is saved straight away.

use crate::{
    errors::{Error, Result},
    store::{MasterKind, Store},
};
use tracing::{debug, info, instrument};

/// Appends `value` to a master list if it is new. Empty values are ignored.
///
/// Returns `true` if the list grew.
///
/// # Errors
/// Returns an error if the list file cannot be written.
pub fn promote(store: &mut Store, kind: MasterKind, value: &str) -> Result<bool> {
    let value = value.trim();
    let added = store.update_master_list(kind, |list| list.insert(value))?;
    if added {
        info!("Added new {} '{}' to master list", kind, value);
    }
    Ok(added)
}

/// Promotes an item name into the materials list, unless it is already a
/// known material or accessory.
///
/// # Errors
/// Returns an error if the materials file cannot be written.
pub fn promote_item(store: &mut Store, item_name: &str) -> Result<bool> {
    let item_name = item_name.trim();
    if store.master_list(MasterKind::Accessory).contains(item_name) {
        debug!("'{}' is a known accessory", item_name);
        return Ok(false);
    }
    promote(store, MasterKind::Material, item_name)
}

/// Known item names: materials followed by accessories.
#[must_use]
pub fn item_names(store: &Store) -> Vec<&str> {
    store
        .master_list(MasterKind::Material)
        .entries()
        .iter()
        .chain(store.master_list(MasterKind::Accessory).entries())
        .map(String::as_str)
        .collect()
}

/// Entries of a master list containing `partial`, case-insensitively.
///
/// An empty `partial` returns the whole list.
#[must_use]
pub fn suggest<'a>(store: &'a Store, kind: MasterKind, partial: &str) -> Vec<&'a str> {
    let needle = partial.trim().to_lowercase();
    store
        .master_list(kind)
        .entries()
        .iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

fn required(value: &str) -> Result<&str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation {
            message: "Value cannot be empty".to_string(),
        });
    }
    Ok(value)
}

/// Adds an entry through the list editor.
///
/// # Errors
/// Returns an error if:
/// - The value is empty or whitespace-only
/// - The value is already in the list
/// - The list file cannot be written
#[instrument(skip(store))]
pub fn add_entry(store: &mut Store, kind: MasterKind, value: &str) -> Result<String> {
    let value = required(value)?;
    if !store.update_master_list(kind, |list| list.insert(value))? {
        return Err(Error::DuplicateEntry {
            list: kind.name(),
            value: value.to_string(),
        });
    }
    info!("Added '{}' to {} list", value, kind);
    Ok(value.to_string())
}

/// Overwrites the entry at a 1-based `position`, returning the old value.
///
/// # Errors
/// Returns an error if:
/// - The new value is empty or whitespace-only
/// - There is no entry at `position`
/// - The new value is already in the list
/// - The list file cannot be written
#[instrument(skip(store))]
pub fn rename_entry(
    store: &mut Store,
    kind: MasterKind,
    position: usize,
    value: &str,
) -> Result<String> {
    let value = required(value)?;
    let old = position
        .checked_sub(1)
        .and_then(|index| store.master_list(kind).entries().get(index))
        .cloned()
        .ok_or(Error::RecordNotFound {
            collection: kind.name(),
            position,
        })?;
    if old == value {
        return Ok(old);
    }
    if !store.update_master_list(kind, |list| list.replace(position - 1, value))? {
        return Err(Error::DuplicateEntry {
            list: kind.name(),
            value: value.to_string(),
        });
    }
    info!("Renamed {} '{}' to '{}'", kind, old, value);
    Ok(old)
}

/// Removes the entry at a 1-based `position`.
///
/// # Errors
/// Returns `Error::RecordNotFound` for a bad position, or an I/O error.
#[instrument(skip(store))]
pub fn remove_entry(store: &mut Store, kind: MasterKind, position: usize) -> Result<String> {
    let removed = match position.checked_sub(1) {
        Some(index) => store.update_master_list(kind, |list| list.remove(index))?,
        None => None,
    };
    let removed = removed.ok_or(Error::RecordNotFound {
        collection: kind.name(),
        position,
    })?;
    info!("Removed '{}' from {} list", removed, kind);
    Ok(removed)
}
