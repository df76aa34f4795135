//! Entity module - Contains the record types the tracker persists and reads.
//! Field names on disk follow the JSON files the tracker has always written,
//! so an existing data directory loads unchanged.

pub mod ont;
pub mod report_row;
pub mod selection;
pub mod stock;
pub mod withdrawal;

pub use ont::OntWithdrawalRecord;
pub use report_row::ReportRow;
pub use selection::LastSelection;
pub use stock::StockEntry;
pub use withdrawal::WithdrawalRecord;

use chrono::NaiveDateTime;

/// Format used for every timestamp the tracker writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a local timestamp the way records store it.
#[must_use]
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Calendar-day part of a stored date: its first ten characters.
///
/// Works for both day-precision (`2024-01-01`) and full timestamps
/// (`2024-01-01 09:00:00`). Shorter strings are returned whole.
#[must_use]
pub fn day_of(date: &str) -> &str {
    match date.char_indices().nth(10) {
        Some((end, _)) => &date[..end],
        None => date,
    }
}
