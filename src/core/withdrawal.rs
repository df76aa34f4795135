//! Withdrawal business logic - the withdrawal form, history search and
//! deletion.
//!
//! A submission carries a division, a team, any number of material lines
//! and any number of ONT serials. It is validated as a whole before anything
//! is written, and every record it produces shares one timestamp.

use crate::{
    core::{master, stock::positive_quantity},
    entities::{LastSelection, OntWithdrawalRecord, WithdrawalRecord, format_timestamp},
    errors::{Error, Result},
    store::{MasterKind, Store},
};
use chrono::NaiveDateTime;
use std::str::FromStr;
use tracing::{info, instrument};

/// One material line on the withdrawal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialLine {
    /// Material or accessory name as entered
    pub item_name: String,
    /// Quantity as entered; must be at least 1
    pub quantity: i64,
}

impl FromStr for MaterialLine {
    type Err = String;

    /// Parses `NAME=QTY`. The last `=` separates the quantity.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, quantity) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected NAME=QTY, got '{s}'"))?;
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|e| format!("invalid quantity in '{s}': {e}"))?;
        Ok(Self {
            item_name: name.to_string(),
            quantity,
        })
    }
}

/// Everything entered on the withdrawal form.
#[derive(Debug, Clone, Default)]
pub struct WithdrawalForm {
    /// Division the taking team belongs to
    pub division: String,
    /// Team taking the items
    pub team: String,
    /// Material and accessory lines
    pub materials: Vec<MaterialLine>,
    /// ONT serial numbers
    pub serials: Vec<String>,
}

/// Records created by one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    /// Material withdrawals appended to the history
    pub withdrawals: Vec<WithdrawalRecord>,
    /// ONT withdrawals appended to the ONT history
    pub ont_withdrawals: Vec<OntWithdrawalRecord>,
}

fn build_records(form: &WithdrawalForm, date: &str) -> Result<Submission> {
    let division = form.division.trim();
    let team = form.team.trim();

    let mut withdrawals = Vec::with_capacity(form.materials.len());
    for line in &form.materials {
        let item_name = line.item_name.trim();
        if item_name.is_empty() {
            return Err(Error::Validation {
                message: "Material name cannot be empty".to_string(),
            });
        }
        withdrawals.push(WithdrawalRecord {
            date: date.to_string(),
            item_name: item_name.to_string(),
            quantity: positive_quantity(line.quantity)?,
            team: team.to_string(),
            division: division.to_string(),
        });
    }

    let mut ont_withdrawals = Vec::with_capacity(form.serials.len());
    for serial in &form.serials {
        let serial_number = serial.trim();
        if serial_number.is_empty() {
            return Err(Error::Validation {
                message: "ONT serial number cannot be empty".to_string(),
            });
        }
        ont_withdrawals.push(OntWithdrawalRecord {
            date: date.to_string(),
            serial_number: serial_number.to_string(),
            team: team.to_string(),
            division: division.to_string(),
        });
    }

    if withdrawals.is_empty() && ont_withdrawals.is_empty() {
        return Err(Error::Validation {
            message: "Enter at least one material or ONT line".to_string(),
        });
    }

    Ok(Submission {
        withdrawals,
        ont_withdrawals,
    })
}

/// Submits the withdrawal form.
///
/// On success the records are appended, the division/team become the new
/// last selection, and any new division, team or item name is promoted to
/// its master list.
///
/// # Errors
/// Returns an error if:
/// - A material line has an empty name or a quantity below 1
/// - A serial number is empty
/// - The form has no lines at all
/// - A data file cannot be written, in which case every file the
///   submission touched is restored
#[instrument(skip(store, form), fields(materials = form.materials.len(), serials = form.serials.len()))]
pub fn submit_withdrawal(
    store: &mut Store,
    form: &WithdrawalForm,
    at: NaiveDateTime,
) -> Result<Submission> {
    let submission = build_records(form, &format_timestamp(at))?;
    let division = form.division.trim();
    let team = form.team.trim();

    store.atomically(|store| {
        if !submission.withdrawals.is_empty() {
            store.append_withdrawals(submission.withdrawals.clone())?;
        }
        if !submission.ont_withdrawals.is_empty() {
            store.append_ont_withdrawals(submission.ont_withdrawals.clone())?;
        }

        store.set_last_selection(LastSelection {
            division: division.to_string(),
            team: team.to_string(),
        })?;

        master::promote(store, MasterKind::Division, division)?;
        master::promote(store, MasterKind::Team, team)?;
        for record in &submission.withdrawals {
            master::promote_item(store, &record.item_name)?;
        }
        Ok(())
    })?;

    info!(
        "Recorded {} material and {} ONT withdrawals for team '{}'",
        submission.withdrawals.len(),
        submission.ont_withdrawals.len(),
        team
    );
    Ok(submission)
}

/// A history record together with its 1-based position in the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listed<'a, T> {
    /// Position in the unfiltered history, usable for deletion
    pub position: usize,
    /// The record itself
    pub record: &'a T,
}

/// Withdrawals whose item name or team contains `query`, case-insensitively.
/// An empty query lists everything.
#[must_use]
pub fn search_withdrawals<'a>(
    records: &'a [WithdrawalRecord],
    query: &str,
) -> Vec<Listed<'a, WithdrawalRecord>> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            needle.is_empty()
                || record.item_name.to_lowercase().contains(&needle)
                || record.team.to_lowercase().contains(&needle)
        })
        .map(|(i, record)| Listed {
            position: i + 1,
            record,
        })
        .collect()
}

/// Deletes the withdrawal at a 1-based `position`.
///
/// # Errors
/// Returns `Error::RecordNotFound` for a bad position, or an I/O error.
#[instrument(skip(store))]
pub fn delete_withdrawal(store: &mut Store, position: usize) -> Result<WithdrawalRecord> {
    let removed = match position.checked_sub(1) {
        Some(index) => store.remove_withdrawal(index)?,
        None => None,
    };
    removed.ok_or(Error::RecordNotFound {
        collection: "material history",
        position,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn line(item: &str, quantity: i64) -> MaterialLine {
        MaterialLine {
            item_name: item.to_string(),
            quantity,
        }
    }

    fn form(division: &str, team: &str) -> WithdrawalForm {
        WithdrawalForm {
            division: division.to_string(),
            team: team.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_material_line_parsing() {
        assert_eq!("Kabel A=30".parse::<MaterialLine>(), Ok(line("Kabel A", 30)));
        assert_eq!(
            "Adapter SC=APC = 2".parse::<MaterialLine>(),
            Ok(line("Adapter SC=APC ", 2))
        );
        assert!("Kabel A".parse::<MaterialLine>().is_err());
        assert!("Kabel A=banyak".parse::<MaterialLine>().is_err());
    }

    #[test]
    fn test_submit_records_everything_with_one_timestamp() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        let mut f = form(" Konstruksi ", "Tim 1");
        f.materials = vec![line(" Kabel A ", 30), line("Klem", 10)];
        f.serials = vec![" ZTEG0001 ".to_string()];

        let submission = submit_withdrawal(&mut store, &f, fixed_time())?;

        assert_eq!(submission.withdrawals.len(), 2);
        assert_eq!(submission.withdrawals[0].item_name, "Kabel A");
        assert_eq!(submission.withdrawals[0].division, "Konstruksi");
        assert_eq!(submission.ont_withdrawals[0].serial_number, "ZTEG0001");
        assert!(
            submission
                .withdrawals
                .iter()
                .all(|r| r.date == "2024-01-01 09:00:00")
        );
        assert_eq!(store.withdrawals(), submission.withdrawals.as_slice());
        assert_eq!(store.ont_withdrawals(), submission.ont_withdrawals.as_slice());
        assert_eq!(store.last_selection().division, "Konstruksi");
        assert_eq!(store.last_selection().team, "Tim 1");
        Ok(())
    }

    #[test]
    fn test_new_division_promoted_exactly_once() -> Result<()> {
        let (dir, mut store) = setup_test_store()?;
        let mut f = form("Divisi Baru", "Tim 1");
        f.serials = vec!["SN1".to_string()];

        submit_withdrawal(&mut store, &f, fixed_time())?;
        submit_withdrawal(&mut store, &f, fixed_time())?;

        let reopened = Store::open(dir.path())?;
        assert_eq!(
            reopened.master_list(MasterKind::Division).entries(),
            ["Divisi Baru"]
        );
        assert_eq!(reopened.master_list(MasterKind::Team).entries(), ["Tim 1"]);
        Ok(())
    }

    #[test]
    fn test_new_item_promoted_to_materials() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        let mut f = form("D", "T");
        f.materials = vec![line("Kabel Baru", 1)];

        submit_withdrawal(&mut store, &f, fixed_time())?;
        assert!(store.master_list(MasterKind::Material).contains("Kabel Baru"));
        Ok(())
    }

    #[test]
    fn test_empty_division_and_team_not_promoted() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        let mut f = form("", "  ");
        f.serials = vec!["SN1".to_string()];

        submit_withdrawal(&mut store, &f, fixed_time())?;
        assert!(store.master_list(MasterKind::Division).is_empty());
        assert!(store.master_list(MasterKind::Team).is_empty());
        Ok(())
    }

    #[test]
    fn test_validation_blocks_whole_submission() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;

        let mut f = form("D", "T");
        f.materials = vec![line("Kabel A", 5), line("Kabel B", 0)];
        let result = submit_withdrawal(&mut store, &f, fixed_time());
        assert!(matches!(result, Err(Error::InvalidQuantity { quantity: 0 })));

        let mut f = form("D", "T");
        f.materials = vec![line("  ", 5)];
        let result = submit_withdrawal(&mut store, &f, fixed_time());
        assert!(matches!(result, Err(Error::Validation { .. })));

        let mut f = form("D", "T");
        f.serials = vec!["SN1".to_string(), String::new()];
        let result = submit_withdrawal(&mut store, &f, fixed_time());
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = submit_withdrawal(&mut store, &form("D", "T"), fixed_time());
        assert!(matches!(result, Err(Error::Validation { .. })));

        assert!(store.withdrawals().is_empty());
        assert!(store.ont_withdrawals().is_empty());
        assert_eq!(store.last_selection(), &LastSelection::default());
        assert!(store.master_list(MasterKind::Division).is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_ont_write_undoes_material_lines() -> Result<()> {
        let (dir, mut store) = setup_test_store()?;
        std::fs::create_dir(dir.path().join("histori_ont.json.tmp"))?;
        let mut f = form("Konstruksi", "Tim 1");
        f.materials = vec![line("Kabel A", 3)];
        f.serials = vec!["ZTEG0001".to_string()];

        let result = submit_withdrawal(&mut store, &f, fixed_time());
        assert!(matches!(result, Err(Error::Io(_))));

        assert!(store.withdrawals().is_empty());
        assert!(store.ont_withdrawals().is_empty());
        assert_eq!(store.last_selection(), &LastSelection::default());
        let reopened = Store::open(dir.path())?;
        assert!(reopened.withdrawals().is_empty());
        assert!(reopened.master_list(MasterKind::Material).is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_promotion_undoes_histories() -> Result<()> {
        let (dir, mut store) = setup_test_store()?;
        std::fs::create_dir(dir.path().join("tim.json.tmp"))?;
        let mut f = form("Konstruksi", "Tim Baru");
        f.serials = vec!["ZTEG0001".to_string()];

        assert!(submit_withdrawal(&mut store, &f, fixed_time()).is_err());

        let reopened = Store::open(dir.path())?;
        assert!(reopened.ont_withdrawals().is_empty());
        assert_eq!(reopened.last_selection(), &LastSelection::default());
        assert!(reopened.master_list(MasterKind::Division).is_empty());
        Ok(())
    }

    #[test]
    fn test_search_by_item_or_team() {
        let mut records = vec![
            sample_withdrawal("2024-01-01", "Kabel Drop", 1),
            sample_withdrawal("2024-01-01", "Klem", 2),
        ];
        records[1].team = "Tim Kabel Selatan".to_string();
        records.push(sample_withdrawal("2024-01-02", "Patch Cord", 1));

        let hits = search_withdrawals(&records, "KABEL");
        let positions: Vec<usize> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![1, 2]);

        assert_eq!(search_withdrawals(&records, "").len(), 3);
        assert!(search_withdrawals(&records, "onu").is_empty());
    }

    #[test]
    fn test_delete_withdrawal_by_listed_position() -> Result<()> {
        let (_dir, mut store) = setup_test_store()?;
        store.append_withdrawals(vec![
            sample_withdrawal("2024-01-01", "A", 1),
            sample_withdrawal("2024-01-01", "B", 1),
        ])?;

        let position = search_withdrawals(store.withdrawals(), "b")[0].position;
        let removed = delete_withdrawal(&mut store, position)?;
        assert_eq!(removed.item_name, "B");
        assert_eq!(store.withdrawals().len(), 1);

        let result = delete_withdrawal(&mut store, 5);
        assert!(matches!(result, Err(Error::RecordNotFound { .. })));
        Ok(())
    }
}
