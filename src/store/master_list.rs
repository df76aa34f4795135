//! Master lists - every distinct division, team, material and accessory
//! name the tracker has seen.
//!
//! Entries keep insertion order and are unique by exact, case-sensitive
//! match. All mutation goes through methods that preserve that invariant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which master list is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasterKind {
    /// Organisational divisions
    Division,
    /// Field teams
    Team,
    /// Cable and other bulk materials
    Material,
    /// Accessories
    Accessory,
}

impl MasterKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 4] = [Self::Division, Self::Team, Self::Material, Self::Accessory];

    /// JSON file backing this list.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Division => "divisi.json",
            Self::Team => "tim.json",
            Self::Material => "material.json",
            Self::Accessory => "aksesori.json",
        }
    }

    /// Short name used in messages and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Division => "division",
            Self::Team => "team",
            Self::Material => "material",
            Self::Accessory => "accessory",
        }
    }
}

impl fmt::Display for MasterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MasterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "division" | "divisi" => Ok(Self::Division),
            "team" | "tim" => Ok(Self::Team),
            "material" => Ok(Self::Material),
            "accessory" | "aksesori" => Ok(Self::Accessory),
            other => Err(format!(
                "unknown list '{other}' (expected division, team, material or accessory)"
            )),
        }
    }
}

/// An insertion-ordered list of unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct MasterList {
    entries: Vec<String>,
}

impl From<Vec<String>> for MasterList {
    // Files edited by hand may contain repeats; keep the first occurrence.
    fn from(values: Vec<String>) -> Self {
        let mut list = Self::default();
        for value in values {
            list.insert(&value);
        }
        list
    }
}

impl From<MasterList> for Vec<String> {
    fn from(list: MasterList) -> Self {
        list.entries
    }
}

impl MasterList {
    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| entry == value)
    }

    /// Appends `value` unless it is empty or already present.
    ///
    /// Returns `true` if the list changed.
    pub fn insert(&mut self, value: &str) -> bool {
        if value.is_empty() || self.contains(value) {
            return false;
        }
        self.entries.push(value.to_string());
        true
    }

    /// Overwrites the entry at `index` (0-based).
    ///
    /// Returns `false` without changing anything if the index is out of
    /// range or `value` is empty or already present elsewhere.
    pub fn replace(&mut self, index: usize, value: &str) -> bool {
        if value.is_empty() || index >= self.entries.len() || self.contains(value) {
            return false;
        }
        self.entries[index] = value.to_string();
        true
    }

    /// Removes and returns the entry at `index` (0-based).
    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }
}
