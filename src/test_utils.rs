//! Shared test utilities for the material tracker.
//!
//! This module provides helpers for opening a store in a temporary directory
//! and building records with sensible defaults.

use crate::{
    entities::{OntWithdrawalRecord, ReportRow, StockEntry, WithdrawalRecord},
    errors::Result,
    store::Store,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber (idempotent).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Opens a fresh store in a temporary directory.
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn setup_test_store() -> Result<(TempDir, Store)> {
    init_test_tracing();
    let dir = TempDir::new()?;
    let store = Store::open(dir.path())?;
    Ok((dir, store))
}

/// A fixed "now" for operations that stamp records.
///
/// # Defaults
/// * 2024-01-01 09:00:00
#[allow(clippy::unwrap_used)]
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Creates a withdrawal record with team "Tim 1" and division "Konstruksi".
pub fn sample_withdrawal(date: &str, item: &str, quantity: u32) -> WithdrawalRecord {
    WithdrawalRecord {
        date: date.to_string(),
        item_name: item.to_string(),
        quantity,
        team: "Tim 1".to_string(),
        division: "Konstruksi".to_string(),
    }
}

/// Creates an ONT withdrawal record with team "Tim 1" and division "Konstruksi".
pub fn sample_ont(date: &str, serial: &str) -> OntWithdrawalRecord {
    OntWithdrawalRecord {
        date: date.to_string(),
        serial_number: serial.to_string(),
        team: "Tim 1".to_string(),
        division: "Konstruksi".to_string(),
    }
}

/// Creates a stock entry.
pub fn sample_stock(date: &str, item: &str, quantity_received: u32) -> StockEntry {
    StockEntry {
        date: date.to_string(),
        item_name: item.to_string(),
        quantity_received,
    }
}

/// Creates a report row with only a serial number and timestamp set.
pub fn sample_report_row(timestamp: &str, serial: &str) -> ReportRow {
    ReportRow {
        timestamp: timestamp.to_string(),
        serial_number: serial.to_string(),
        ..Default::default()
    }
}

/// Writes `contents` to `name` inside `dir` and returns the full path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}
