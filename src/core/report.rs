//! External usage reports - loading, filtering and searching.
//!
//! Each configured source is read fresh from disk whenever rows are asked
//! for. Columns are mapped through the source's [`ColumnMap`], so a row
//! that lacks a column simply carries an empty field.

use crate::{
    config::{ColumnMap, ReportSource},
    core::columns::{CsvRow, CsvTable},
    entities::ReportRow,
    errors::Result,
};
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

/// Maps one CSV row onto the canonical report shape.
#[must_use]
pub fn map_row(row: &CsvRow<'_>, columns: &ColumnMap) -> ReportRow {
    ReportRow {
        timestamp: row.first_non_empty(&columns.timestamp).to_string(),
        subscription_id: row.first_non_empty(&columns.subscription_id).to_string(),
        customer: row.first_non_empty(&columns.customer).to_string(),
        serial_number: row.first_non_empty(&columns.serial_number).to_string(),
        team: row.first_non_empty(&columns.team).to_string(),
    }
}

/// Reads every row of a report source.
///
/// A source whose file does not exist yet has no rows.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
#[instrument(skip(source), fields(key = %source.key))]
pub fn load_report_rows(source: &ReportSource) -> Result<Vec<ReportRow>> {
    if !source.path.exists() {
        debug!("Report file {:?} not found, no rows", source.path);
        return Ok(Vec::new());
    }

    let table = CsvTable::read_path(&source.path)?;
    let rows: Vec<ReportRow> = table
        .rows()
        .map(|row| map_row(&row, &source.columns))
        .collect();
    info!("Loaded {} rows from {}", rows.len(), source.display_name);
    Ok(rows)
}

/// Reads every configured source, in configuration order.
///
/// A source that cannot be read contributes no rows and is logged, so the
/// remaining sources still classify ONTs.
#[must_use]
pub fn load_all_reports(sources: &[ReportSource]) -> Vec<Vec<ReportRow>> {
    sources
        .iter()
        .map(|source| {
            load_report_rows(source).unwrap_or_else(|e| {
                warn!("Skipping report {}: {}", source.display_name, e);
                Vec::new()
            })
        })
        .collect()
}

/// Free-text and date-range filter over report rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Case-insensitive substring of customer, serial and team
    pub query: String,
    /// Inclusive lower date bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    /// Whether `row` passes both the text and the date filter.
    ///
    /// Rows whose timestamp cannot be read as a date are always kept by
    /// the date filter.
    #[must_use]
    pub fn matches(&self, row: &ReportRow) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !row.search_text().contains(&query) {
            return false;
        }

        let Some(date) = row.date() else {
            return true;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Rows passing `filter`, in their original order.
#[must_use]
pub fn filter_rows<'a>(rows: &'a [ReportRow], filter: &ReportFilter) -> Vec<&'a ReportRow> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}
