//! Stock business logic - stock-in entries and the remaining-stock rollup.
//!
//! Withdrawals are matched to a stock line by exact item name and by the
//! calendar day of the *stock* entry. A withdrawal made on another day than
//! the stock-in of the same item is not counted against that line.

use crate::{
    core::master,
    entities::{StockEntry, WithdrawalRecord, format_timestamp},
    errors::{Error, Result},
    store::Store,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{info, instrument};

/// One line of the remaining-stock table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockRow {
    /// 1-based position in the current listing
    pub index: usize,
    /// Date the stock arrived, as stored
    pub date: String,
    /// Item name
    pub item_name: String,
    /// Quantity received
    pub quantity_in: u32,
    /// Sum of withdrawals for the same item on the same day
    pub quantity_taken: u64,
    /// `quantity_in - quantity_taken`; negative means over-withdrawal
    pub quantity_remaining: i64,
}

/// Computes remaining stock per stock entry, in insertion order.
///
/// Remaining values are never clamped: a negative number is the signal that
/// more was taken than received on that day.
#[must_use]
pub fn compute_remaining_stock(
    stock_entries: &[StockEntry],
    withdrawals: &[WithdrawalRecord],
) -> Vec<StockRow> {
    let mut taken: HashMap<(&str, &str), u64> = HashMap::new();
    for withdrawal in withdrawals {
        *taken
            .entry((withdrawal.item_name.as_str(), withdrawal.day()))
            .or_default() += u64::from(withdrawal.quantity);
    }

    stock_entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let quantity_taken = taken
                .get(&(entry.item_name.as_str(), entry.day()))
                .copied()
                .unwrap_or(0);
            let remaining = i128::from(entry.quantity_received) - i128::from(quantity_taken);
            StockRow {
                index: i + 1,
                date: entry.date.clone(),
                item_name: entry.item_name.clone(),
                quantity_in: entry.quantity_received,
                quantity_taken,
                quantity_remaining: i64::try_from(remaining).unwrap_or(i64::MIN),
            }
        })
        .collect()
}

/// Records incoming stock stamped with `at`.
///
/// A new item name is promoted into the materials list.
///
/// # Errors
/// Returns an error if:
/// - The item name is empty or whitespace-only
/// - The quantity is below 1
/// - A data file cannot be written
#[instrument(skip(store))]
pub fn add_stock(
    store: &mut Store,
    item_name: &str,
    quantity: i64,
    at: NaiveDateTime,
) -> Result<StockEntry> {
    let item_name = item_name.trim();
    if item_name.is_empty() {
        return Err(Error::Validation {
            message: "Item name cannot be empty".to_string(),
        });
    }
    let quantity_received = positive_quantity(quantity)?;

    let entry = StockEntry {
        date: format_timestamp(at),
        item_name: item_name.to_string(),
        quantity_received,
    };
    store.atomically(|store| {
        store.append_stock_entry(entry.clone())?;
        master::promote_item(store, item_name)
    })?;

    info!("Stock in: {} x {}", entry.quantity_received, entry.item_name);
    Ok(entry)
}

/// Deletes the stock entry at a 1-based `position`.
///
/// # Errors
/// Returns `Error::RecordNotFound` for a bad position, or an I/O error.
#[instrument(skip(store))]
pub fn delete_stock_entry(store: &mut Store, position: usize) -> Result<StockEntry> {
    let removed = match position.checked_sub(1) {
        Some(index) => store.remove_stock_entry(index)?,
        None => None,
    };
    removed.ok_or(Error::RecordNotFound {
        collection: "stock entries",
        position,
    })
}

/// Validates an entered quantity and narrows it to the stored type.
///
/// # Errors
/// Returns `Error::InvalidQuantity` for anything below 1 or too large to store.
pub(crate) fn positive_quantity(quantity: i64) -> Result<u32> {
    u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(Error::InvalidQuantity { quantity })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MasterKind;
    use crate::test_utils::*;

    #[test]
    fn test_remaining_same_day_only() {
        let stock = vec![sample_stock("2024-01-01", "Kabel A", 100)];
        let withdrawals = vec![
            sample_withdrawal("2024-01-01 09:00", "Kabel A", 30),
            sample_withdrawal("2024-01-02", "Kabel A", 999),
        ];

        let rows = compute_remaining_stock(&stock, &withdrawals);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity_taken, 30);
        assert_eq!(rows[0].quantity_remaining, 70);
    }

    #[test]
    fn test_remaining_can_be_negative() {
        let stock = vec![sample_stock("2024-02-10 08:00:00", "Patch Cord", 5)];
        let withdrawals = vec![
            sample_withdrawal("2024-02-10 10:00:00", "Patch Cord", 4),
            sample_withdrawal("2024-02-10 15:30:00", "Patch Cord", 3),
        ];

        let rows = compute_remaining_stock(&stock, &withdrawals);
        assert_eq!(rows[0].quantity_taken, 7);
        assert_eq!(rows[0].quantity_remaining, -2);
    }

    #[test]
    fn test_item_names_match_exactly() {
        let stock = vec![sample_stock("2024-01-01", "Kabel A", 10)];
        let withdrawals = vec![
            sample_withdrawal("2024-01-01", "kabel a", 3),
            sample_withdrawal("2024-01-01", "Kabel B", 3),
        ];

        let rows = compute_remaining_stock(&stock, &withdrawals);
        assert_eq!(rows[0].quantity_taken, 0);
        assert_eq!(rows[0].quantity_remaining, 10);
    }

    #[test]
    fn test_same_day_stock_lines_share_the_aggregate() {
        // Two stock-ins of one item on one day both see the full day's total.
        let stock = vec![
            sample_stock("2024-01-01 08:00:00", "Kabel A", 50),
            sample_stock("2024-01-01 13:00:00", "Kabel A", 20),
            sample_stock("2024-01-03", "Kabel A", 10),
        ];
        let withdrawals = vec![sample_withdrawal("2024-01-01 16:00:00", "Kabel A", 30)];

        let rows = compute_remaining_stock(&stock, &withdrawals);
        let remaining: Vec<i64> = rows.iter().map(|r| r.quantity_remaining).collect();
        assert_eq!(remaining, vec![20, -10, 10]);
        let indexes: Vec<usize> = rows.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
    }

    #[test]
    fn test_remaining_with_no_stock() {
        let withdrawals = vec![sample_withdrawal("2024-01-01", "Kabel A", 3)];
        assert!(compute_remaining_stock(&[], &withdrawals).is_empty());
    }

    #[test]
    fn test_add_stock_stamps_and_promotes() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;

        let entry = add_stock(&mut store, "  Kabel Drop 150m ", 12, fixed_time())?;
        assert_eq!(entry.item_name, "Kabel Drop 150m");
        assert_eq!(entry.date, "2024-01-01 09:00:00");
        assert_eq!(store.stock_entries(), [entry]);
        assert!(
            store
                .master_list(MasterKind::Material)
                .contains("Kabel Drop 150m")
        );
        Ok(())
    }

    #[test]
    fn test_add_stock_known_accessory_not_promoted_to_materials() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        store.update_master_list(MasterKind::Accessory, |list| list.insert("Klem"))?;

        add_stock(&mut store, "Klem", 3, fixed_time())?;
        assert!(store.master_list(MasterKind::Material).is_empty());
        Ok(())
    }

    #[test]
    fn test_add_stock_validation() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;

        let result = add_stock(&mut store, "   ", 5, fixed_time());
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = add_stock(&mut store, "Kabel A", 0, fixed_time());
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));

        let result = add_stock(&mut store, "Kabel A", -4, fixed_time());
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: -4 })));

        assert!(store.stock_entries().is_empty());
        assert!(store.master_list(MasterKind::Material).is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_promotion_rolls_back_stock_entry() -> Result<()> {
        let (dir, mut store) = setup_test_store()?;
        std::fs::create_dir(dir.path().join("material.json.tmp"))?;

        assert!(add_stock(&mut store, "Kabel Baru", 4, fixed_time()).is_err());
        assert!(store.stock_entries().is_empty());
        assert!(Store::open(dir.path())?.stock_entries().is_empty());
        Ok(())
    }

    #[test]
    fn test_delete_stock_entry_by_position() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        add_stock(&mut store, "A", 1, fixed_time())?;
        add_stock(&mut store, "B", 2, fixed_time())?;

        let removed = delete_stock_entry(&mut store, 1)?;
        assert_eq!(removed.item_name, "A");
        assert_eq!(store.stock_entries().len(), 1);

        let result = delete_stock_entry(&mut store, 0);
        assert!(matches!(result, Err(Error::RecordNotFound { position: 0, .. })));
        let result = delete_stock_entry(&mut store, 2);
        assert!(matches!(result, Err(Error::RecordNotFound { position: 2, .. })));
        Ok(())
    }

    #[test]
    fn test_positive_quantity_bounds() {
        assert_eq!(positive_quantity(1).unwrap(), 1);
        assert!(positive_quantity(0).is_err());
        assert!(positive_quantity(i64::from(u32::MAX) + 1).is_err());
    }
}
