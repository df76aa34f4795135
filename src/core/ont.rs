//! ONT withdrawal history with live usage status.

use crate::{
    core::usage::{UsageStatus, classify},
    entities::OntWithdrawalRecord,
    errors::{Error, Result},
    store::Store,
};
use std::collections::HashSet;
use tracing::instrument;

/// An ONT withdrawal as shown in the history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OntListing<'a> {
    /// 1-based position in the unfiltered history
    pub position: usize,
    /// The withdrawal itself
    pub record: &'a OntWithdrawalRecord,
    /// Whether any report mentions the serial
    pub status: UsageStatus,
}

/// ONT withdrawals whose serial or team contains `query`, case-insensitively,
/// each classified against `used`.
#[must_use]
pub fn search_ont_withdrawals<'a>(
    records: &'a [OntWithdrawalRecord],
    used: &HashSet<String>,
    query: &str,
) -> Vec<OntListing<'a>> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            needle.is_empty()
                || record.serial_number.to_lowercase().contains(&needle)
                || record.team.to_lowercase().contains(&needle)
        })
        .map(|(i, record)| OntListing {
            position: i + 1,
            record,
            status: classify(&record.serial_number, used),
        })
        .collect()
}

/// Deletes the ONT withdrawal at a 1-based `position`.
///
/// # Errors
/// Returns `Error::RecordNotFound` for a bad position, or an I/O error.
#[instrument(skip(store))]
pub fn delete_ont_withdrawal(store: &mut Store, position: usize) -> Result<OntWithdrawalRecord> {
    let removed = match position.checked_sub(1) {
        Some(index) => store.remove_ont_withdrawal(index)?,
        None => None,
    };
    removed.ok_or(Error::RecordNotFound {
        collection: "ONT history",
        position,
    })
}
