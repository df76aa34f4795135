//! Persistent store - owns every JSON collection the tracker keeps.
//!
//! The store is opened once at startup and passed by reference to whatever
//! needs it. Each mutating method writes the affected file in full before
//! the in-memory copy changes, so a failed write leaves both the file and
//! the store as they were.

pub mod files;
pub mod master_list;

pub use master_list::{MasterKind, MasterList};

use crate::entities::{LastSelection, OntWithdrawalRecord, StockEntry, WithdrawalRecord};
use crate::errors::Result;
use files::{load_json_or_default, save_json};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

const WITHDRAWALS_FILE: &str = "histori_kabel_aksesori.json";
const ONT_WITHDRAWALS_FILE: &str = "histori_ont.json";
const STOCK_ENTRIES_FILE: &str = "stock_entries.json";
const LAST_SELECTION_FILE: &str = "last_selection.json";

/// Copy of every collection, taken before a multi-file operation.
#[derive(Debug, Clone)]
struct Snapshot {
    divisions: MasterList,
    teams: MasterList,
    materials: MasterList,
    accessories: MasterList,
    withdrawals: Vec<WithdrawalRecord>,
    ont_withdrawals: Vec<OntWithdrawalRecord>,
    stock_entries: Vec<StockEntry>,
    last_selection: LastSelection,
}

/// In-memory copy of the data directory.
#[derive(Debug)]
pub struct Store {
    dir: PathBuf,
    divisions: MasterList,
    teams: MasterList,
    materials: MasterList,
    accessories: MasterList,
    withdrawals: Vec<WithdrawalRecord>,
    ont_withdrawals: Vec<OntWithdrawalRecord>,
    stock_entries: Vec<StockEntry>,
    last_selection: LastSelection,
}

impl Store {
    /// Opens the data directory, creating it if needed.
    ///
    /// Every collection falls back to empty when its file is missing or
    /// cannot be parsed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    #[instrument]
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;

        let store = Self {
            dir: dir.to_path_buf(),
            divisions: load_json_or_default(&dir.join(MasterKind::Division.file_name())),
            teams: load_json_or_default(&dir.join(MasterKind::Team.file_name())),
            materials: load_json_or_default(&dir.join(MasterKind::Material.file_name())),
            accessories: load_json_or_default(&dir.join(MasterKind::Accessory.file_name())),
            withdrawals: load_json_or_default(&dir.join(WITHDRAWALS_FILE)),
            ont_withdrawals: load_json_or_default(&dir.join(ONT_WITHDRAWALS_FILE)),
            stock_entries: load_json_or_default(&dir.join(STOCK_ENTRIES_FILE)),
            last_selection: load_json_or_default(&dir.join(LAST_SELECTION_FILE)),
        };

        info!(
            withdrawals = store.withdrawals.len(),
            ont_withdrawals = store.ont_withdrawals.len(),
            stock_entries = store.stock_entries.len(),
            "Opened data directory {:?}",
            dir
        );
        Ok(store)
    }

    /// Directory the store reads from and writes to.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    /// One of the four master lists.
    #[must_use]
    pub const fn master_list(&self, kind: MasterKind) -> &MasterList {
        match kind {
            MasterKind::Division => &self.divisions,
            MasterKind::Team => &self.teams,
            MasterKind::Material => &self.materials,
            MasterKind::Accessory => &self.accessories,
        }
    }

    const fn master_list_slot(&mut self, kind: MasterKind) -> &mut MasterList {
        match kind {
            MasterKind::Division => &mut self.divisions,
            MasterKind::Team => &mut self.teams,
            MasterKind::Material => &mut self.materials,
            MasterKind::Accessory => &mut self.accessories,
        }
    }

    /// Material and accessory withdrawals, oldest first.
    #[must_use]
    pub fn withdrawals(&self) -> &[WithdrawalRecord] {
        &self.withdrawals
    }

    /// ONT withdrawals, oldest first.
    #[must_use]
    pub fn ont_withdrawals(&self) -> &[OntWithdrawalRecord] {
        &self.ont_withdrawals
    }

    /// Stock-in entries, oldest first.
    #[must_use]
    pub fn stock_entries(&self) -> &[StockEntry] {
        &self.stock_entries
    }

    /// Division and team from the most recent submission.
    #[must_use]
    pub const fn last_selection(&self) -> &LastSelection {
        &self.last_selection
    }

    fn persist<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<()> {
        save_json(&self.dir.join(file_name), value)
    }

    /// Applies `edit` to a copy of a master list and persists it if it changed.
    ///
    /// # Errors
    /// Returns an error if the list file cannot be written; the in-memory
    /// list is left untouched in that case.
    pub fn update_master_list<T>(
        &mut self,
        kind: MasterKind,
        edit: impl FnOnce(&mut MasterList) -> T,
    ) -> Result<T> {
        let mut next = self.master_list(kind).clone();
        let outcome = edit(&mut next);
        if &next != self.master_list(kind) {
            self.persist(kind.file_name(), &next)?;
            debug!("Saved {} list with {} entries", kind, next.len());
            *self.master_list_slot(kind) = next;
        }
        Ok(outcome)
    }

    /// Appends material withdrawals and rewrites the history file.
    ///
    /// # Errors
    /// Returns an error if the history file cannot be written.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn append_withdrawals(&mut self, records: Vec<WithdrawalRecord>) -> Result<()> {
        let mut next = self.withdrawals.clone();
        next.extend(records);
        self.persist(WITHDRAWALS_FILE, &next)?;
        self.withdrawals = next;
        Ok(())
    }

    /// Removes the withdrawal at `index` (0-based).
    ///
    /// Returns `Ok(None)` if there is no such record.
    ///
    /// # Errors
    /// Returns an error if the history file cannot be written.
    #[instrument(skip(self))]
    pub fn remove_withdrawal(&mut self, index: usize) -> Result<Option<WithdrawalRecord>> {
        if index >= self.withdrawals.len() {
            return Ok(None);
        }
        let mut next = self.withdrawals.clone();
        let removed = next.remove(index);
        self.persist(WITHDRAWALS_FILE, &next)?;
        self.withdrawals = next;
        Ok(Some(removed))
    }

    /// Appends ONT withdrawals and rewrites the ONT history file.
    ///
    /// # Errors
    /// Returns an error if the ONT history file cannot be written.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn append_ont_withdrawals(&mut self, records: Vec<OntWithdrawalRecord>) -> Result<()> {
        let mut next = self.ont_withdrawals.clone();
        next.extend(records);
        self.persist(ONT_WITHDRAWALS_FILE, &next)?;
        self.ont_withdrawals = next;
        Ok(())
    }

    /// Removes the ONT withdrawal at `index` (0-based).
    ///
    /// # Errors
    /// Returns an error if the ONT history file cannot be written.
    #[instrument(skip(self))]
    pub fn remove_ont_withdrawal(&mut self, index: usize) -> Result<Option<OntWithdrawalRecord>> {
        if index >= self.ont_withdrawals.len() {
            return Ok(None);
        }
        let mut next = self.ont_withdrawals.clone();
        let removed = next.remove(index);
        self.persist(ONT_WITHDRAWALS_FILE, &next)?;
        self.ont_withdrawals = next;
        Ok(Some(removed))
    }

    /// Appends a stock-in entry and rewrites the stock file.
    ///
    /// # Errors
    /// Returns an error if the stock file cannot be written.
    #[instrument(skip(self))]
    pub fn append_stock_entry(&mut self, entry: StockEntry) -> Result<()> {
        let mut next = self.stock_entries.clone();
        next.push(entry);
        self.persist(STOCK_ENTRIES_FILE, &next)?;
        self.stock_entries = next;
        Ok(())
    }

    /// Removes the stock entry at `index` (0-based).
    ///
    /// # Errors
    /// Returns an error if the stock file cannot be written.
    #[instrument(skip(self))]
    pub fn remove_stock_entry(&mut self, index: usize) -> Result<Option<StockEntry>> {
        if index >= self.stock_entries.len() {
            return Ok(None);
        }
        let mut next = self.stock_entries.clone();
        let removed = next.remove(index);
        self.persist(STOCK_ENTRIES_FILE, &next)?;
        self.stock_entries = next;
        Ok(Some(removed))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            divisions: self.divisions.clone(),
            teams: self.teams.clone(),
            materials: self.materials.clone(),
            accessories: self.accessories.clone(),
            withdrawals: self.withdrawals.clone(),
            ont_withdrawals: self.ont_withdrawals.clone(),
            stock_entries: self.stock_entries.clone(),
            last_selection: self.last_selection.clone(),
        }
    }

    /// Writes back every collection that differs from `before` and resets
    /// the in-memory copy. Files that cannot be rewritten are logged.
    fn restore(&mut self, before: Snapshot) {
        fn rewrite<T: Serialize + PartialEq + ?Sized>(
            dir: &Path,
            file_name: &str,
            current: &T,
            previous: &T,
        ) {
            if current != previous {
                if let Err(e) = save_json(&dir.join(file_name), previous) {
                    error!("Failed to roll back {}: {}", file_name, e);
                }
            }
        }

        let dir = self.dir.as_path();
        rewrite(dir, WITHDRAWALS_FILE, &self.withdrawals, &before.withdrawals);
        rewrite(dir, ONT_WITHDRAWALS_FILE, &self.ont_withdrawals, &before.ont_withdrawals);
        rewrite(dir, STOCK_ENTRIES_FILE, &self.stock_entries, &before.stock_entries);
        rewrite(dir, LAST_SELECTION_FILE, &self.last_selection, &before.last_selection);
        let lists = [
            (MasterKind::Division, &self.divisions, &before.divisions),
            (MasterKind::Team, &self.teams, &before.teams),
            (MasterKind::Material, &self.materials, &before.materials),
            (MasterKind::Accessory, &self.accessories, &before.accessories),
        ];
        for (kind, current, previous) in lists {
            rewrite(dir, kind.file_name(), current, previous);
        }

        self.divisions = before.divisions;
        self.teams = before.teams;
        self.materials = before.materials;
        self.accessories = before.accessories;
        self.withdrawals = before.withdrawals;
        self.ont_withdrawals = before.ont_withdrawals;
        self.stock_entries = before.stock_entries;
        self.last_selection = before.last_selection;
    }

    /// Runs `op`, which may write several files, as one unit.
    ///
    /// If `op` fails, every collection it changed is written back to its
    /// previous contents before the error is returned.
    ///
    /// # Errors
    /// Returns the error produced by `op`.
    pub fn atomically<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let before = self.snapshot();
        op(self).inspect_err(|e| {
            warn!("Rolling back partial changes: {}", e);
            self.restore(before);
        })
    }

    /// Replaces the sticky division/team defaults.
    ///
    /// # Errors
    /// Returns an error if the selection file cannot be written.
    pub fn set_last_selection(&mut self, selection: LastSelection) -> Result<()> {
        if selection == self.last_selection {
            return Ok(());
        }
        self.persist(LAST_SELECTION_FILE, &selection)?;
        self.last_selection = selection;
        Ok(())
    }
}
