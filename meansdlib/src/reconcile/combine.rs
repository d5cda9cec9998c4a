//! Multi-source combination: resolve one cell across several same-role sheets.

use serde::Serialize;

use crate::data::{NormalizedTable, Notice};
use crate::options::{MatchMode, NumberStyle, Role};
use crate::output::format::format_number;

use super::category::{apply_aliases, CategoryAssignment};
use super::metric::MetricIndex;
use super::vocab::{Category, Metric};

/// Separator between values of a multi-source series.
pub const SERIES_SEPARATOR: &str = "-";

/// A normalized table with its category and metric mappings resolved.
#[derive(Debug, Clone)]
pub struct SourceTable {
    table: NormalizedTable,
    categories: CategoryAssignment,
    metrics: MetricIndex,
}

impl SourceTable {
    /// Apply aliases and compute both mappings once.
    pub fn prepare(mut table: NormalizedTable, mode: MatchMode) -> (Self, Vec<Notice>) {
        let notices = apply_aliases(&mut table);
        let categories = CategoryAssignment::compute(&table, mode);
        let metrics = MetricIndex::new(&table.columns);
        (
            Self {
                table,
                categories,
                metrics,
            },
            notices,
        )
    }

    /// Sheet this table came from.
    pub fn sheet(&self) -> &str {
        &self.table.sheet
    }

    /// The underlying table (after alias handling).
    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    /// Category-to-row assignment.
    pub fn categories(&self) -> &CategoryAssignment {
        &self.categories
    }

    /// Value for a cell: the first non-missing value among the columns
    /// mapped to `metric`, in the row assigned to `category`.
    pub fn lookup(&self, category: Category, metric: Metric) -> Option<f64> {
        let row = self.categories.row_for(category)?;
        self.metrics
            .columns(metric)
            .iter()
            .find_map(|&col| self.table.get(row, col))
    }
}

/// Values for one cell and role, one entry per source sheet.
///
/// Missing values keep their position so separators stay aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub role: Role,
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Resolve a cell in every source, in source order.
    pub fn resolve(role: Role, sources: &[SourceTable], category: Category, metric: Metric) -> Self {
        Self {
            role,
            values: sources.iter().map(|s| s.lookup(category, metric)).collect(),
        }
    }

    /// Whether every source is missing a value.
    pub fn is_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Serialize the series.
    ///
    /// All-missing yields an empty string. Otherwise each value is rendered
    /// (missing as an empty placeholder) and joined with `-`. `Auto` style
    /// collapses integers only when there is exactly one source.
    pub fn render(&self, decimal_places: u8, style: NumberStyle) -> String {
        if self.is_missing() {
            return String::new();
        }
        let style = style.resolve(self.values.len());
        self.values
            .iter()
            .map(|v| {
                v.map(|n| format_number(n, decimal_places, style))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(SERIES_SEPARATOR)
    }
}
