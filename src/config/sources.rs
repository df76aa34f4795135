//! Report source definitions.
//!
//! Each external usage report is described by a key, a display name, the
//! CSV path it is read from and a [`ColumnMap`]: for every canonical field,
//! an ordered list of header names to try. Adding a source is a matter of
//! adding a table entry, either here or under `[[report_sources]]` in the
//! settings file.

use serde::Deserialize;
use std::path::PathBuf;

/// Ordered candidate headers per canonical report field.
///
/// The first candidate whose cell is non-empty supplies the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Candidates for the row timestamp
    pub timestamp: Vec<String>,
    /// Candidates for the subscription id
    pub subscription_id: Vec<String>,
    /// Candidates for the customer name
    pub customer: Vec<String>,
    /// Candidates for the ONT serial number
    pub serial_number: Vec<String>,
    /// Candidates for the installing team
    pub team: Vec<String>,
}

impl ColumnMap {
    fn from_slices(
        timestamp: &[&str],
        subscription_id: &[&str],
        customer: &[&str],
        serial_number: &[&str],
        team: &[&str],
    ) -> Self {
        let owned = |names: &[&str]| names.iter().map(ToString::to_string).collect();
        Self {
            timestamp: owned(timestamp),
            subscription_id: owned(subscription_id),
            customer: owned(customer),
            serial_number: owned(serial_number),
            team: owned(team),
        }
    }

    /// Mapping shared by report sources that write English headers with
    /// Indonesian fallbacks.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_slices(
            &["Timestamp", "tanggal"],
            &["Subscription ID", "ID Pelanggan"],
            &["Customer", "Nama Pelanggan"],
            &["SN", "Serial Number"],
            &["Team", "Nama Teknisi"],
        )
    }

    /// Mapping for the Asianet export, which uses Indonesian headers only.
    #[must_use]
    pub fn asianet() -> Self {
        Self::from_slices(
            &["Timestamp", "Tanggal"],
            &["ID Pelanggan"],
            &["Nama Pelanggan"],
            &["SN"],
            &["Nama Teknisi"],
        )
    }
}

/// One external usage report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportSource {
    /// Short key used on the command line (`myrepublic`, `asianet`, ...)
    pub key: String,
    /// Human-readable name
    pub display_name: String,
    /// CSV file the report is read from
    pub path: PathBuf,
    /// Header aliases for this source
    #[serde(default = "ColumnMap::standard")]
    pub columns: ColumnMap,
}

/// The three report sources the field team receives.
///
/// Paths are relative to the home directory (`~/`) and are expanded when
/// settings are resolved.
#[must_use]
pub fn default_report_sources() -> Vec<ReportSource> {
    vec![
        ReportSource {
            key: "myrepublic".to_string(),
            display_name: "Laporan MyRepublic".to_string(),
            path: PathBuf::from("~/Reports/wifi_reports.csv"),
            columns: ColumnMap::standard(),
        },
        ReportSource {
            key: "asianet".to_string(),
            display_name: "Laporan Asianet".to_string(),
            path: PathBuf::from("~/Reports/asianet_reports.csv"),
            columns: ColumnMap::asianet(),
        },
        ReportSource {
            key: "oxygen".to_string(),
            display_name: "Laporan IKR Oxygen".to_string(),
            path: PathBuf::from("~/Reports/Oxy_Reports.csv"),
            columns: ColumnMap::standard(),
        },
    ]
}
