//! Table normalization: raw sheet → keyed numeric table.
//!
//! The key column is the first header named like a category column
//! (`Sheet`, `Category`, `Categories`, `Index`, compared case-insensitively),
//! or the first column otherwise. Every other cell is coerced to a number;
//! cells that are not numbers become missing.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::MeansdError;
use crate::source::{RawCell, RawTable};
use crate::Result;

use super::notice::Notice;

/// Header names that mark the key column.
pub const KEY_COLUMN_NAMES: [&str; 4] = ["sheet", "category", "categories", "index"];

/// A sheet reduced to category rows of optional numbers.
///
/// Rows keep first-seen order. Values are positional against `columns`, so
/// two headers that trim to the same text remain separate columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedTable {
    /// Sheet name, for diagnostics
    pub sheet: String,
    /// Header of the column used as row key
    pub key_column: String,
    /// Trimmed headers of the value columns
    pub columns: Vec<String>,
    rows: IndexMap<String, Vec<Option<f64>>>,
}

impl NormalizedTable {
    /// Create an empty table with the given value columns.
    pub fn new(sheet: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            sheet: sheet.into(),
            key_column: String::new(),
            columns,
            rows: IndexMap::new(),
        }
    }

    /// Insert or replace a row. Returns `true` if the key already existed.
    ///
    /// The row is padded or truncated to the column count.
    pub fn insert_row(&mut self, key: impl Into<String>, mut values: Vec<Option<f64>>) -> bool {
        values.resize(self.columns.len(), None);
        self.rows.insert(key.into(), values).is_some()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in table order.
    pub fn row_keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Whether a row with exactly this key exists.
    pub fn contains_row(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Values of a row, positional against `columns`.
    pub fn row(&self, key: &str) -> Option<&[Option<f64>]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Value at (row, column index).
    pub fn get(&self, key: &str, column: usize) -> Option<f64> {
        self.rows.get(key).and_then(|r| r.get(column).copied().flatten())
    }

    /// Value at (row, first column with this header).
    pub fn value(&self, key: &str, column: &str) -> Option<f64> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.get(key, idx)
    }

    /// Remove a row, keeping the order of the others.
    pub fn remove_row(&mut self, key: &str) -> Option<Vec<Option<f64>>> {
        self.rows.shift_remove(key)
    }

    /// Rename a row in place. Returns `false` if `from` does not exist.
    ///
    /// Callers check that `to` is free first; if it is not, the later of the
    /// two rows wins at the earlier position.
    pub fn rename_row(&mut self, from: &str, to: &str) -> bool {
        if !self.rows.contains_key(from) {
            return false;
        }
        self.rows = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|(k, v)| if k == from { (to.to_string(), v) } else { (k, v) })
            .collect();
        true
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> NormalizedTable {
        NormalizedTable {
            sheet: self.sheet.clone(),
            key_column: self.key_column.clone(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .take(n)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Outcome of coercing one cell.
enum Coerced {
    Value(f64),
    Missing,
    Unparseable(String),
}

fn coerce(cell: &RawCell) -> Coerced {
    match cell {
        RawCell::Empty => Coerced::Missing,
        RawCell::Number(n) if n.is_finite() => Coerced::Value(*n),
        RawCell::Number(_) => Coerced::Missing,
        RawCell::Bool(b) => Coerced::Value(if *b { 1.0 } else { 0.0 }),
        RawCell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Coerced::Missing;
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Coerced::Value(n),
                // "nan" / "inf" parse but carry no value
                Ok(_) => Coerced::Missing,
                Err(_) => Coerced::Unparseable(trimmed.to_string()),
            }
        }
    }
}

/// Index of the key column.
fn key_column_index(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|h| {
            let h = h.trim().to_lowercase();
            KEY_COLUMN_NAMES.contains(&h.as_str())
        })
        .unwrap_or(0)
}

/// Trimmed header, with a placeholder for blank headers.
fn column_label(header: &str, index: usize) -> String {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        format!("Unnamed: {index}")
    } else {
        trimmed.to_string()
    }
}

/// Normalize a raw sheet.
///
/// Fails only when the sheet has no columns. Rows with an empty key cell are
/// skipped. Returns the table together with parse warnings and duplicate-key
/// notices.
pub fn normalize_table(sheet: &str, raw: &RawTable) -> Result<(NormalizedTable, Vec<Notice>)> {
    if raw.column_count() == 0 {
        return Err(MeansdError::NoColumns {
            sheet: sheet.to_string(),
        });
    }

    let key_idx = key_column_index(&raw.headers);
    let value_columns: Vec<usize> = (0..raw.column_count()).filter(|&i| i != key_idx).collect();
    let columns: Vec<String> = value_columns
        .iter()
        .map(|&i| column_label(&raw.headers[i], i))
        .collect();

    let mut table = NormalizedTable::new(sheet, columns);
    table.key_column = column_label(&raw.headers[key_idx], key_idx);
    let mut notices = Vec::new();

    for row_idx in 0..raw.row_count() {
        let Some(key) = raw.cell(row_idx, key_idx).as_label() else {
            continue;
        };

        let values: Vec<Option<f64>> = value_columns
            .iter()
            .zip(&table.columns)
            .map(|(&col_idx, column)| match coerce(raw.cell(row_idx, col_idx)) {
                Coerced::Value(n) => Some(n),
                Coerced::Missing => None,
                Coerced::Unparseable(text) => {
                    notices.push(Notice::ParseWarning {
                        sheet: sheet.to_string(),
                        row: key.clone(),
                        column: column.clone(),
                        value: text,
                    });
                    None
                }
            })
            .collect();

        if table.insert_row(key.clone(), values) {
            notices.push(Notice::DuplicateCategory {
                sheet: sheet.to_string(),
                category: key,
            });
        }
    }

    tracing::debug!(
        sheet,
        key_column = %table.key_column,
        rows = table.len(),
        columns = table.columns.len(),
        "normalized sheet"
    );

    Ok((table, notices))
}
