//! Header-keyed CSV access.
//!
//! CSV files handled by the tracker come from spreadsheets and other tools,
//! so columns are looked up by header name through ordered alias lists
//! rather than by position. Short rows are allowed; a missing cell reads as
//! the empty string. Bytes that are not valid UTF-8 (typical of cp1252
//! spreadsheet exports) decode to U+FFFD instead of failing the file.

use crate::errors::Result;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

/// UTF-8 BOM bytes.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A parsed CSV file: header names plus raw records.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

/// One data row, addressed by header name.
#[derive(Debug, Clone, Copy)]
pub struct CsvRow<'a> {
    headers: &'a [String],
    record: &'a StringRecord,
}

fn strip_utf8_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

impl CsvTable {
    /// Reads a whole CSV file with a header row.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid CSV.
    pub fn read_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_reader(strip_utf8_bom(&data))
    }

    /// Reads CSV with a header row from any reader.
    ///
    /// # Errors
    /// Returns an error if the data is not valid CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = StringRecord::from_byte_record_lossy(reader.byte_headers()?.clone())
            .iter()
            .map(ToString::to_string)
            .collect();
        let records = reader
            .byte_records()
            .map(|record| record.map(StringRecord::from_byte_record_lossy))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { headers, records })
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the file had no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = CsvRow<'_>> {
        self.records.iter().map(|record| CsvRow {
            headers: &self.headers,
            record,
        })
    }
}

impl<'a> CsvRow<'a> {
    /// Cell under `column`, or `""` when the column or cell is absent.
    ///
    /// Repeated headers resolve to the last column of that name.
    #[must_use]
    pub fn get(&self, column: &str) -> &'a str {
        self.headers
            .iter()
            .rposition(|header| header == column)
            .and_then(|index| self.record.get(index))
            .unwrap_or("")
    }

    /// First non-empty cell among `candidates`, tried in order.
    #[must_use]
    pub fn first_non_empty<S: AsRef<str>>(&self, candidates: &[S]) -> &'a str {
        candidates
            .iter()
            .map(|column| self.get(column.as_ref()))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn table(data: &str) -> CsvTable {
        CsvTable::from_reader(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_lookup_by_header() {
        let t = table("SN,Team\nZTE1,Tim A\n");
        let row = t.rows().next().unwrap();
        assert_eq!(row.get("SN"), "ZTE1");
        assert_eq!(row.get("Team"), "Tim A");
        assert_eq!(row.get("Customer"), "");
    }

    #[test]
    fn test_first_non_empty_skips_blank_cells() {
        let t = table("SN,Serial Number\n,ZTE2\nZTE3,ZTE9\n");
        let values: Vec<&str> = t
            .rows()
            .map(|row| row.first_non_empty(&["SN", "Serial Number"]))
            .collect();
        assert_eq!(values, vec!["ZTE2", "ZTE3"]);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let t = table("A,B,C\n1\n");
        let row = t.rows().next().unwrap();
        assert_eq!(row.get("A"), "1");
        assert_eq!(row.get("C"), "");
    }

    #[test]
    fn test_header_only_file() {
        let t = table("A,B\n");
        assert!(t.is_empty());
        assert_eq!(t.headers(), ["A", "B"]);
    }

    #[test]
    fn test_bom_is_stripped() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("bom.csv");
        std::fs::write(&path, b"\xEF\xBB\xBFSN\nZTE1\n")?;
        let t = CsvTable::read_path(&path)?;
        assert_eq!(t.rows().next().unwrap().get("SN"), "ZTE1");
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_cell_is_decoded_lossily() -> Result<()> {
        let t = CsvTable::from_reader(&b"SN,Customer\nZTE1,Ani\nZTE2,Jos\xe9\n"[..])?;
        let rows: Vec<CsvRow<'_>> = t.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Customer"), "Ani");
        assert_eq!(rows[1].get("SN"), "ZTE2");
        assert_eq!(rows[1].get("Customer"), "Jos\u{fffd}");
        Ok(())
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let t = table("Customer,SN\n\"Santoso, Budi\",ZTE1\n");
        assert_eq!(t.rows().next().unwrap().get("Customer"), "Santoso, Budi");
        assert_eq!(t.len(), 1);
    }
}
