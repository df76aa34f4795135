//! ONT usage classification.
//!
//! A withdrawn ONT counts as used once its serial number shows up in any
//! external usage report. The classification is recomputed from freshly
//! loaded report rows on every request and never stored, since the report
//! files change underneath the tracker.

use crate::entities::{OntWithdrawalRecord, ReportRow};
use std::collections::HashSet;
use std::fmt;

/// Whether a withdrawn ONT has been reported as installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageStatus {
    /// The serial appears in at least one report
    Used,
    /// No report mentions the serial
    Unused,
}

impl UsageStatus {
    /// Label shown in listings and exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Used => "Terpakai",
            Self::Unused => "Kosong",
        }
    }
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Union of trimmed, non-empty serial numbers across every report source.
#[must_use]
pub fn used_serials<S: AsRef<[ReportRow]>>(report_sets: &[S]) -> HashSet<String> {
    report_sets
        .iter()
        .flat_map(|rows| rows.as_ref().iter())
        .map(ReportRow::normalized_serial)
        .filter(|serial| !serial.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Classifies one serial against a prepared set. Matching is exact and
/// case-sensitive.
#[must_use]
pub fn classify(serial_number: &str, used: &HashSet<String>) -> UsageStatus {
    if used.contains(serial_number) {
        UsageStatus::Used
    } else {
        UsageStatus::Unused
    }
}

/// Pairs every ONT withdrawal with its usage status, in record order.
#[must_use]
pub fn compute_usage_status<'a, S: AsRef<[ReportRow]>>(
    records: &'a [OntWithdrawalRecord],
    report_sets: &[S],
) -> Vec<(&'a OntWithdrawalRecord, UsageStatus)> {
    let used = used_serials(report_sets);
    records
        .iter()
        .map(|record| (record, classify(&record.serial_number, &used)))
        .collect()
}
