//! Workbook readers.
//!
//! A workbook is anything that can list its sheets and hand back a sheet as
//! a [`RawTable`]. Two implementations are provided:
//!
//! - [`XlsxWorkbook`]: spreadsheet bytes (xlsx, xlsm, xlsb, xls, ods) read
//!   with calamine
//! - [`MemoryWorkbook`]: tables built in code, for tests and embedding

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use indexmap::IndexMap;

use crate::error::MeansdError;
use crate::Result;

use super::raw::{RawCell, RawTable};

/// Source of named sheets.
pub trait WorkbookSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet. Fails with [`MeansdError::SheetNotFound`] for unknown names.
    fn read_sheet(&mut self, name: &str) -> Result<RawTable>;
}

fn sheet_not_found(name: &str, available: &[String]) -> MeansdError {
    MeansdError::SheetNotFound {
        name: name.to_string(),
        available: available.join(", "),
    }
}

/// Convert a calamine cell to a raw cell.
fn data_to_raw_cell(data: &Data) -> RawCell {
    match data {
        Data::Empty => RawCell::Empty,
        Data::Bool(b) => RawCell::Bool(*b),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) => RawCell::Text(s.clone()),
        // Excel serial date; a statistic stored as a date is still a number
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => RawCell::Text(s.clone()),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Text(format!("#ERROR: {e:?}")),
    }
}

/// Spreadsheet workbook held in memory.
pub struct XlsxWorkbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl XlsxWorkbook {
    /// Open a workbook from its bytes. The format is detected from content.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| MeansdError::WorkbookRead(e.to_string()))?;
        Ok(Self { sheets })
    }

    /// Read a workbook file fully into memory and open it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }
}

impl WorkbookSource for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawTable> {
        let names = self.sheet_names();
        if !names.iter().any(|n| n == name) {
            return Err(sheet_not_found(name, &names));
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| MeansdError::WorkbookRead(format!("sheet '{name}': {e}")))?;

        let grid: Vec<Vec<RawCell>> = range
            .rows()
            .map(|row| row.iter().map(data_to_raw_cell).collect())
            .collect();

        tracing::debug!(sheet = name, rows = grid.len(), "read sheet");
        Ok(RawTable::from_grid(grid))
    }
}

/// Workbook assembled from in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: IndexMap<String, RawTable>,
}

impl MemoryWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add (or replace) a sheet.
    pub fn with_sheet(mut self, name: impl Into<String>, table: RawTable) -> Self {
        self.insert(name, table);
        self
    }

    /// Add (or replace) a sheet.
    pub fn insert(&mut self, name: impl Into<String>, table: RawTable) {
        self.sheets.insert(name.into(), table);
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawTable> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| sheet_not_found(name, &self.sheet_names()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_workbook_order() {
        let wb = MemoryWorkbook::new()
            .with_sheet("SD", RawTable::new(["Category"]))
            .with_sheet("Mean", RawTable::new(["Category"]));
        assert_eq!(wb.sheet_names(), vec!["SD", "Mean"]);
    }

    #[test]
    fn test_memory_workbook_missing_sheet() {
        let mut wb = MemoryWorkbook::new().with_sheet("Mean", RawTable::new(["Category"]));
        let err = wb.read_sheet("SD").unwrap_err();
        match err {
            MeansdError::SheetNotFound { name, available } => {
                assert_eq!(name, "SD");
                assert_eq!(available, "Mean");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_data_conversion() {
        assert_eq!(data_to_raw_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(data_to_raw_cell(&Data::Int(7)), RawCell::Number(7.0));
        assert_eq!(data_to_raw_cell(&Data::Float(2.5)), RawCell::Number(2.5));
        assert_eq!(
            data_to_raw_cell(&Data::String("x".into())),
            RawCell::Text("x".into())
        );
    }

    #[test]
    fn test_invalid_bytes() {
        let result = XlsxWorkbook::from_bytes(b"not a workbook".to_vec());
        assert!(matches!(result, Err(MeansdError::WorkbookRead(_))));
    }
}
