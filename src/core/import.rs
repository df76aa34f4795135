//! Bulk import of withdrawal history from CSV.
//!
//! Columns are matched by the first non-empty alias. Rows that do not
//! yield a usable record are skipped and counted rather than failing the
//! import; only an unreadable file is an error.

use crate::{
    core::{
        columns::{CsvRow, CsvTable},
        master,
    },
    entities::{OntWithdrawalRecord, WithdrawalRecord, format_timestamp},
    errors::Result,
    store::{MasterKind, Store},
};
use chrono::NaiveDateTime;
use std::fmt;
use std::path::Path;
use tracing::{info, instrument, warn};

const ITEM_COLUMNS: &[&str] = &["Deskripsi", "deskripsi", "Nama Item", "Item"];
const QUANTITY_COLUMNS: &[&str] = &["Qty", "qty", "Jumlah", "jumlah"];
const WITHDRAWAL_TEAM_COLUMNS: &[&str] = &["Tim", "tim", "Nama Tim"];

const SERIAL_COLUMNS: &[&str] = &["SN", "Serial Number", "sn", "serial_number"];
const ONT_TEAM_COLUMNS: &[&str] = &["Tim", "tim"];
const ONT_DIVISION_COLUMNS: &[&str] = &["Divisi", "divisi"];

/// Outcome of one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows turned into records
    pub added: usize,
    /// Rows ignored for a missing name, serial or quantity
    pub skipped: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.added == 0 {
            write!(f, "no valid rows found")
        } else {
            let noun = if self.added == 1 { "row" } else { "rows" };
            write!(f, "added {} {noun}", self.added)?;
            if self.skipped > 0 {
                write!(f, " ({} skipped)", self.skipped)?;
            }
            Ok(())
        }
    }
}

/// Reads a quantity cell the way spreadsheets write it: `"3"`, `"3.0"` and
/// `"3.9"` all count as 3. Anything unreadable is 0.
#[allow(clippy::cast_possible_truncation)]
fn parse_quantity(cell: &str) -> i64 {
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn withdrawal_from_row(
    row: &CsvRow<'_>,
    date: &str,
    fallback_team: &str,
    fallback_division: &str,
) -> Option<WithdrawalRecord> {
    let item_name = row.first_non_empty(ITEM_COLUMNS).trim();
    if item_name.is_empty() {
        return None;
    }
    let quantity = u32::try_from(parse_quantity(row.first_non_empty(QUANTITY_COLUMNS)))
        .ok()
        .filter(|q| *q >= 1)?;
    let team = match row.first_non_empty(WITHDRAWAL_TEAM_COLUMNS).trim() {
        "" => fallback_team,
        team => team,
    };

    Some(WithdrawalRecord {
        date: date.to_string(),
        item_name: item_name.to_string(),
        quantity,
        team: team.to_string(),
        division: fallback_division.to_string(),
    })
}

fn ont_from_row(
    row: &CsvRow<'_>,
    date: &str,
    fallback_team: &str,
    fallback_division: &str,
) -> Option<OntWithdrawalRecord> {
    let serial_number = row.first_non_empty(SERIAL_COLUMNS).trim();
    if serial_number.is_empty() {
        return None;
    }
    let team = match row.first_non_empty(ONT_TEAM_COLUMNS).trim() {
        "" => fallback_team,
        team => team,
    };
    let division = match row.first_non_empty(ONT_DIVISION_COLUMNS).trim() {
        "" => fallback_division,
        division => division,
    };

    Some(OntWithdrawalRecord {
        date: date.to_string(),
        serial_number: serial_number.to_string(),
        team: team.to_string(),
        division: division.to_string(),
    })
}

/// Imports material withdrawals from a CSV file.
///
/// Every imported record is stamped with `at`. Missing teams fall back to
/// the last selection, and the division always comes from it.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the
/// history cannot be saved.
#[instrument(skip(store))]
pub fn import_withdrawals_csv(
    store: &mut Store,
    path: &Path,
    at: NaiveDateTime,
) -> Result<ImportSummary> {
    let table = CsvTable::read_path(path)?;
    let date = format_timestamp(at);
    let selection = store.last_selection().clone();

    let records: Vec<WithdrawalRecord> = table
        .rows()
        .filter_map(|row| withdrawal_from_row(&row, &date, &selection.team, &selection.division))
        .collect();
    let summary = ImportSummary {
        added: records.len(),
        skipped: table.len() - records.len(),
    };
    if summary.skipped > 0 {
        warn!("Skipped {} rows without an item or quantity", summary.skipped);
    }
    if records.is_empty() {
        info!("No valid material rows in {:?}", path);
        return Ok(summary);
    }

    store.atomically(|store| {
        store.append_withdrawals(records.clone())?;
        for record in &records {
            master::promote_item(store, &record.item_name)?;
            master::promote(store, MasterKind::Team, &record.team)?;
            master::promote(store, MasterKind::Division, &record.division)?;
        }
        Ok(())
    })?;

    info!("Imported {} material withdrawals from {:?}", summary.added, path);
    Ok(summary)
}

/// Imports ONT withdrawals from a CSV file.
///
/// Every imported record is stamped with `at`. Team and division come from
/// the row when present, otherwise from the last selection.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the
/// history cannot be saved.
#[instrument(skip(store))]
pub fn import_ont_csv(store: &mut Store, path: &Path, at: NaiveDateTime) -> Result<ImportSummary> {
    let table = CsvTable::read_path(path)?;
    let date = format_timestamp(at);
    let selection = store.last_selection().clone();

    let records: Vec<OntWithdrawalRecord> = table
        .rows()
        .filter_map(|row| ont_from_row(&row, &date, &selection.team, &selection.division))
        .collect();
    let summary = ImportSummary {
        added: records.len(),
        skipped: table.len() - records.len(),
    };
    if summary.skipped > 0 {
        warn!("Skipped {} rows without a serial number", summary.skipped);
    }
    if records.is_empty() {
        info!("No serial numbers in {:?}", path);
        return Ok(summary);
    }

    store.atomically(|store| {
        store.append_ont_withdrawals(records.clone())?;
        for record in &records {
            master::promote(store, MasterKind::Team, &record.team)?;
            master::promote(store, MasterKind::Division, &record.division)?;
        }
        Ok(())
    })?;

    info!("Imported {} ONT withdrawals from {:?}", summary.added, path);
    Ok(summary)
}
