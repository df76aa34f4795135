//! ONT withdrawal entity - One optical network terminal handed to a team.

use serde::{Deserialize, Serialize};

/// A recorded ONT withdrawal. Serial numbers are not required to be unique.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntWithdrawalRecord {
    /// Date or full timestamp of the withdrawal
    #[serde(rename = "tanggal")]
    pub date: String,
    /// ONT serial number, trimmed at entry time
    #[serde(rename = "sn")]
    pub serial_number: String,
    /// Team that took the ONT
    #[serde(rename = "tim", default)]
    pub team: String,
    /// Division the team belongs to
    #[serde(rename = "divisi", default)]
    pub division: String,
}
