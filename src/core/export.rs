//! CSV export of withdrawal history and report rows.
//!
//! Every export starts with its header row, even when there is nothing
//! else to write.

use crate::{
    core::usage::classify,
    entities::{OntWithdrawalRecord, ReportRow, WithdrawalRecord},
    errors::Result,
};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;

/// Header of the material withdrawal export.
pub const WITHDRAWAL_HEADERS: [&str; 4] = ["Tanggal", "Deskripsi", "Qty", "Nama Tim"];

/// Header of the ONT withdrawal export.
pub const ONT_HEADERS: [&str; 4] = ["Tanggal", "Serial Number", "Nama Tim", "Status"];

/// Header of the report row export.
pub const REPORT_HEADERS: [&str; 5] = ["Timestamp", "Subscription ID", "Customer", "SN", "Team"];

/// CSV record for a material withdrawal.
#[derive(Debug, Serialize)]
struct WithdrawalCsvRecord<'a> {
    #[serde(rename = "Tanggal")]
    date: &'a str,
    #[serde(rename = "Deskripsi")]
    item_name: &'a str,
    #[serde(rename = "Qty")]
    quantity: u32,
    #[serde(rename = "Nama Tim")]
    team: &'a str,
}

impl<'a> From<&'a WithdrawalRecord> for WithdrawalCsvRecord<'a> {
    fn from(record: &'a WithdrawalRecord) -> Self {
        Self {
            date: &record.date,
            item_name: &record.item_name,
            quantity: record.quantity,
            team: &record.team,
        }
    }
}

/// CSV record for an ONT withdrawal with its status at export time.
#[derive(Debug, Serialize)]
struct OntCsvRecord<'a> {
    #[serde(rename = "Tanggal")]
    date: &'a str,
    #[serde(rename = "Serial Number")]
    serial_number: &'a str,
    #[serde(rename = "Nama Tim")]
    team: &'a str,
    #[serde(rename = "Status")]
    status: &'static str,
}

fn csv_writer<W: Write>(writer: W, headers: &[&str]) -> Result<csv::Writer<W>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(headers)?;
    Ok(wtr)
}

/// Writes the material withdrawal history as CSV.
///
/// Returns the number of data rows written.
///
/// # Errors
/// Returns an error if writing fails.
pub fn export_withdrawals<W: Write>(records: &[WithdrawalRecord], writer: W) -> Result<usize> {
    let mut wtr = csv_writer(writer, &WITHDRAWAL_HEADERS)?;
    for record in records {
        wtr.serialize(WithdrawalCsvRecord::from(record))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Writes the ONT withdrawal history as CSV, classifying each serial
/// against `used`.
///
/// # Errors
/// Returns an error if writing fails.
pub fn export_ont<W: Write>(
    records: &[OntWithdrawalRecord],
    used: &HashSet<String>,
    writer: W,
) -> Result<usize> {
    let mut wtr = csv_writer(writer, &ONT_HEADERS)?;
    for record in records {
        let status = classify(&record.serial_number, used);
        wtr.serialize(OntCsvRecord {
            date: &record.date,
            serial_number: &record.serial_number,
            team: &record.team,
            status: status.label(),
        })?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Writes report rows as CSV in the canonical column order.
///
/// # Errors
/// Returns an error if writing fails.
pub fn export_report_rows<'a, W, I>(rows: I, writer: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ReportRow>,
{
    let mut wtr = csv_writer(writer, &REPORT_HEADERS)?;
    let mut written = 0;
    for row in rows {
        wtr.serialize(row)?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_export_withdrawals() -> Result<()> {
        let mut records = vec![sample_withdrawal("2024-01-01 09:00:00", "Kabel Drop", 30)];
        records[0].team = "Tim, Selatan".to_string();
        let mut buf = Vec::new();

        let written = export_withdrawals(&records, &mut buf)?;
        assert_eq!(written, 1);
        assert_eq!(
            to_string(buf),
            "Tanggal,Deskripsi,Qty,Nama Tim\n\
             2024-01-01 09:00:00,Kabel Drop,30,\"Tim, Selatan\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_export_ont_with_status() -> Result<()> {
        let records = vec![
            sample_ont("2024-01-01 09:00:00", "SN-A"),
            sample_ont("2024-01-01 09:00:00", "SN-B"),
        ];
        let used: HashSet<String> = ["SN-B".to_string()].into_iter().collect();
        let mut buf = Vec::new();

        export_ont(&records, &used, &mut buf)?;
        assert_eq!(
            to_string(buf),
            "Tanggal,Serial Number,Nama Tim,Status\n\
             2024-01-01 09:00:00,SN-A,Tim 1,Kosong\n\
             2024-01-01 09:00:00,SN-B,Tim 1,Terpakai\n"
        );
        Ok(())
    }

    #[test]
    fn test_export_report_rows() -> Result<()> {
        let rows = vec![ReportRow {
            timestamp: "2024-03-01".to_string(),
            subscription_id: "MR-1".to_string(),
            customer: "Ani".to_string(),
            serial_number: "ZTE1".to_string(),
            team: "Tim A".to_string(),
        }];
        let mut buf = Vec::new();

        assert_eq!(export_report_rows(&rows, &mut buf)?, 1);
        assert_eq!(
            to_string(buf),
            "Timestamp,Subscription ID,Customer,SN,Team\n2024-03-01,MR-1,Ani,ZTE1,Tim A\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_export_still_has_header() -> Result<()> {
        let mut buf = Vec::new();
        assert_eq!(export_withdrawals(&[], &mut buf)?, 0);
        assert_eq!(to_string(buf), "Tanggal,Deskripsi,Qty,Nama Tim\n");
        Ok(())
    }
}
