//! Report row entity - A usage record read from an external report CSV.
//!
//! Report files are written by other tools and are never modified here.
//! Every field defaults to the empty string when the source file lacks it.

use chrono::NaiveDate;
use serde::Serialize;

/// Canonical shape of a report row after column mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Raw timestamp text as written by the report source
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Customer subscription identifier
    #[serde(rename = "Subscription ID")]
    pub subscription_id: String,
    /// Customer name
    #[serde(rename = "Customer")]
    pub customer: String,
    /// ONT serial number installed at the customer
    #[serde(rename = "SN")]
    pub serial_number: String,
    /// Team that did the installation
    #[serde(rename = "Team")]
    pub team: String,
}

impl ReportRow {
    /// Text searched by the free-text filter: customer, serial and team.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.customer, self.serial_number, self.team).to_lowercase()
    }

    /// Calendar date of the row, if its timestamp can be read.
    ///
    /// The first ten characters are taken, `/` becomes `-`, then
    /// `YYYY-MM-DD` and `DD-MM-YYYY` are tried in that order.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        let head = super::day_of(&self.timestamp).replace('/', "-");
        NaiveDate::parse_from_str(&head, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&head, "%d-%m-%Y"))
            .ok()
    }

    /// Serial number with surrounding whitespace removed.
    #[must_use]
    pub fn normalized_serial(&self) -> &str {
        self.serial_number.trim()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn row_at(timestamp: &str) -> ReportRow {
        ReportRow {
            timestamp: timestamp.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_date_iso_with_time() {
        let date = row_at("2024-05-17 10:22:01").date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 17));
    }

    #[test]
    fn test_date_day_first_with_slashes() {
        let date = row_at("17/05/2024 10:22").date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 17));
    }

    #[test]
    fn test_date_iso_with_slashes() {
        let date = row_at("2024/05/17").date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 5, 17));
    }

    #[test]
    fn test_date_unparsable() {
        assert!(row_at("kemarin sore").date().is_none());
        assert!(row_at("").date().is_none());
        assert!(row_at("2024-13-45").date().is_none());
    }

    #[test]
    fn test_search_text_is_lowercase_concatenation() {
        let row = ReportRow {
            customer: "Budi Santoso".to_string(),
            serial_number: "ZTEG1234".to_string(),
            team: "Tim A".to_string(),
            ..Default::default()
        };
        assert_eq!(row.search_text(), "budi santoso zteg1234 tim a");
    }
}
