//! Withdrawal entity - One material or accessory taken out by a team.

use serde::{Deserialize, Serialize};

/// A recorded removal of an item quantity, attributed to a team and division.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    /// Date or full timestamp of the withdrawal
    #[serde(rename = "tanggal")]
    pub date: String,
    /// Material or accessory name
    #[serde(rename = "deskripsi")]
    pub item_name: String,
    /// Quantity taken, always at least 1
    #[serde(rename = "qty")]
    pub quantity: u32,
    /// Team that took the item
    #[serde(rename = "tim", default)]
    pub team: String,
    /// Division the team belongs to
    #[serde(rename = "divisi", default)]
    pub division: String,
}

impl WithdrawalRecord {
    /// Calendar day the withdrawal was recorded on.
    #[must_use]
    pub fn day(&self) -> &str {
        super::day_of(&self.date)
    }
}
