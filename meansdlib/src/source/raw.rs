//! Raw sheet contents as produced by a workbook reader.

use serde::Serialize;

/// A single cell as read from a sheet, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawCell {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl RawCell {
    /// Empty, or text that is only whitespace.
    pub fn is_empty(&self) -> bool {
        match self {
            RawCell::Empty => true,
            RawCell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as a label (header or row key), trimmed.
    ///
    /// Returns `None` for empty cells.
    pub fn as_label(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            RawCell::Number(n) => Some(n.to_string()),
            RawCell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        }
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        RawCell::Number(value as f64)
    }
}

impl From<bool> for RawCell {
    fn from(value: bool) -> Self {
        RawCell::Bool(value)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        RawCell::Text(value.to_string())
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        RawCell::Text(value)
    }
}

impl<T: Into<RawCell>> From<Option<T>> for RawCell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A rectangular sheet: ordered headers plus ordered rows of raw cells.
///
/// Rows are positional: cell `i` belongs to header `i`. Short rows are
/// treated as padded with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawTable {
    /// Header text per column, as read (untrimmed)
    pub headers: Vec<String>,
    /// Data rows below the header row
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// Create a table with the given headers and no rows.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder: append a row.
    pub fn with_row<C: Into<RawCell>>(mut self, cells: impl IntoIterator<Item = C>) -> Self {
        self.push_row(cells);
        self
    }

    /// Append a row.
    pub fn push_row<C: Into<RawCell>>(&mut self, cells: impl IntoIterator<Item = C>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Build a table from a grid whose first row holds the headers.
    ///
    /// The column count is the widest row in the grid; missing header cells
    /// become empty strings.
    pub fn from_grid(grid: Vec<Vec<RawCell>>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = grid.into_iter();

        let mut headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| match cell {
                    RawCell::Text(s) => s.clone(),
                    other => other.as_label().unwrap_or_default(),
                })
                .collect(),
            None => Vec::new(),
        };
        headers.resize(width, String::new());

        Self {
            headers,
            rows: rows.collect(),
        }
    }

    /// Number of columns (including the key column).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, column), empty when the row is short.
    pub fn cell(&self, row: usize, column: usize) -> &RawCell {
        static EMPTY: RawCell = RawCell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_labels() {
        assert_eq!(RawCell::Empty.as_label(), None);
        assert_eq!(RawCell::from("  ").as_label(), None);
        assert_eq!(
            RawCell::from(" Breast ").as_label(),
            Some("Breast".to_string())
        );
        assert_eq!(RawCell::from(2024.0).as_label(), Some("2024".to_string()));
        assert_eq!(RawCell::from(1.5).as_label(), Some("1.5".to_string()));
        assert_eq!(RawCell::from(true).as_label(), Some("True".to_string()));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(RawCell::from(None::<f64>), RawCell::Empty);
        assert_eq!(RawCell::from(Some(3.0)), RawCell::Number(3.0));
    }

    #[test]
    fn test_from_grid() {
        let grid = vec![
            vec![RawCell::from("Sheet"), RawCell::from("A ")],
            vec![RawCell::from("Breast"), RawCell::from(1.0), RawCell::from(2.0)],
        ];
        let table = RawTable::from_grid(grid);
        assert_eq!(table.headers, vec!["Sheet", "A ", ""]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 2), &RawCell::Number(2.0));
        assert_eq!(table.cell(5, 0), &RawCell::Empty);
    }

    #[test]
    fn test_from_empty_grid() {
        let table = RawTable::from_grid(Vec::new());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_builder() {
        let table = RawTable::new(["Category", "X"])
            .with_row([RawCell::from("Breast"), RawCell::from(4.0)])
            .with_row([RawCell::from("Thyroid")]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1), &RawCell::Empty);
    }
}
