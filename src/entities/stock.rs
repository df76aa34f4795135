//! Stock entity - Incoming stock received into the warehouse.

use serde::{Deserialize, Serialize};

/// One stock-in line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Date or full timestamp the stock arrived
    #[serde(rename = "tanggal")]
    pub date: String,
    /// Material or accessory name
    #[serde(rename = "deskripsi")]
    pub item_name: String,
    /// Quantity received, always at least 1
    #[serde(rename = "qty")]
    pub quantity_received: u32,
}

impl StockEntry {
    /// Calendar day the stock arrived on.
    #[must_use]
    pub fn day(&self) -> &str {
        super::day_of(&self.date)
    }
}
