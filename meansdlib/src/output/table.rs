//! The summary table: canonical categories × canonical metrics.
//!
//! `SummaryTable` is the final data structure before serialization. Every
//! value is already a display string; the shape is fixed regardless of
//! input (12 category rows, 5 metric columns).

use serde::Serialize;

use crate::reconcile::{Category, Metric};
use crate::Result;

/// Header of the leading label column.
pub const CATEGORY_HEADER: &str = "Category";

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Row category (serialized as its display name)
    pub category: Category,
    /// One display string per metric, in metric order
    pub values: Vec<String>,
}

/// Dense summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// `Category` followed by the metric names
    pub headers: Vec<String>,
    /// Rows in category order
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Build a table by asking `cell` for every (category, metric) pair.
    pub fn from_fn(mut cell: impl FnMut(Category, Metric) -> String) -> Self {
        let headers = std::iter::once(CATEGORY_HEADER.to_string())
            .chain(Metric::ALL.iter().map(|m| m.name().to_string()))
            .collect();
        let rows = Category::ALL
            .into_iter()
            .map(|category| SummaryRow {
                category,
                values: Metric::ALL.into_iter().map(|m| cell(category, m)).collect(),
            })
            .collect();
        Self { headers, rows }
    }

    /// Display string for a cell.
    pub fn cell(&self, category: Category, metric: Metric) -> &str {
        &self.rows[category.index()].values[metric.index()]
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of metric columns (excluding the label column).
    pub fn metric_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    /// Header row followed by data rows, each starting with the category name.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        std::iter::once(self.headers.clone())
            .chain(self.rows.iter().map(|row| {
                std::iter::once(row.category.name().to_string())
                    .chain(row.values.iter().cloned())
                    .collect()
            }))
            .collect()
    }

    /// Render as CSV (header row included).
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in self.to_grid() {
            writer.write_record(&record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
