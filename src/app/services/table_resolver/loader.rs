//! Loading of WMO `BUFRCREX_CodeFlag_en.txt` tables
//!
//! The file is a CSV with a header row; only the `FXY`, `CodeFigure` and
//! `EntryName_en` columns are used. Rows whose code figure is not a plain
//! number (ranges such as `4-99`, `All 12`) carry no single entry and are
//! skipped.

use super::VersionTable;
use crate::app::models::Descriptor;
use crate::{Error, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const FXY_COLUMN: &str = "FXY";
const CODE_FIGURE_COLUMN: &str = "CodeFigure";
const ENTRY_NAME_COLUMN: &str = "EntryName_en";

/// Statistics from loading one table file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadStats {
    /// Rows read (header excluded)
    pub rows: usize,
    /// Entries stored
    pub entries: usize,
    /// Rows skipped because the code figure is not a number
    pub non_numeric: usize,
    /// Rows skipped because the descriptor is malformed
    pub invalid_descriptor: usize,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "{} entries from {} rows ({} non-numeric, {} invalid descriptors skipped)",
            self.entries, self.rows, self.non_numeric, self.invalid_descriptor
        )
    }
}

impl VersionTable {
    /// Load a table file from disk
    pub fn load(path: &Path) -> Result<(Self, LoadStats)> {
        debug!("Loading code/flag table: {}", path.display());
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        Self::from_reader(file, &path.to_string_lossy())
    }

    /// Parse a table from any CSV reader; `source` names it in errors
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<(Self, LoadStats)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(source, "Failed to read header row", Some(e)))?
            .clone();
        let fxy = column(&headers, FXY_COLUMN, source)?;
        let code_figure = column(&headers, CODE_FIGURE_COLUMN, source)?;
        let entry_name = column(&headers, ENTRY_NAME_COLUMN, source)?;

        let mut table = VersionTable::new();
        let mut stats = LoadStats::new();
        let mut record = StringRecord::new();

        while reader
            .read_record(&mut record)
            .map_err(|e| Error::csv_parsing(source, "Failed to read CSV record", Some(e)))?
        {
            stats.rows += 1;

            let figure = record.get(code_figure).unwrap_or("").trim();
            if figure.is_empty() || !figure.bytes().all(|b| b.is_ascii_digit()) {
                stats.non_numeric += 1;
                continue;
            }
            let Ok(code) = figure.parse::<i64>() else {
                stats.non_numeric += 1;
                continue;
            };

            let Ok(descriptor) = record.get(fxy).unwrap_or("").parse::<Descriptor>() else {
                stats.invalid_descriptor += 1;
                continue;
            };

            let text = record.get(entry_name).unwrap_or("").trim();
            table.insert(descriptor, code, text);
            stats.entries += 1;
        }

        Ok((table, stats))
    }
}

fn column(headers: &StringRecord, name: &str, source: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| {
            Error::csv_parsing(source, format!("Missing required column '{}'", name), None)
        })
}
