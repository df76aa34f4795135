//! Last selection - sticky division/team defaults for the next entry.

use serde::{Deserialize, Serialize};

/// Division and team used by the most recent submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSelection {
    /// Last used division, empty if none yet
    #[serde(rename = "divisi", default)]
    pub division: String,
    /// Last used team, empty if none yet
    #[serde(rename = "tim", default)]
    pub team: String,
}
