//! # meansdlib
//!
//! Build a "Mean (SD)" summary table from parallel spreadsheets of means and
//! standard deviations.
//!
//! ## Overview
//!
//! Source workbooks hold one sheet of means and one sheet of SDs (or several
//! of each), with free-text category labels down the first column and
//! free-text metric headers across the top. This library reconciles those
//! labels against two fixed vocabularies and emits a dense table:
//!
//! - **Rows**: 12 tumor categories, always in the same order
//! - **Columns**: 5 care-pathway intervals, always in the same order
//! - **Cells**: `mean (SD)`, or `–` when neither value is available
//!
//! ## Pipeline
//!
//! 1. **Source** - read sheets as raw tables (`XlsxWorkbook`, `MemoryWorkbook`)
//! 2. **Data** - pick the key column, trim headers, coerce numbers
//! 3. **Reconcile** - alias handling, exact or fuzzy category matching,
//!    header synonyms, multi-sheet series
//! 4. **Output** - format cells and serialize (`SummaryTable`, CSV, xlsx)
//!
//! ## Features
//!
//! - **Fuzzy matching**: One-to-one category assignment by sequence similarity
//! - **Multiple sheets per role**: Values joined as `a-b` in selection order
//! - **Configurable precision**: 0, 1 or 2 decimal places
//! - **Pure data types**: Fatal errors as `Result`, everything else as `Notice`s
//!
//! ## Example
//!
//! ```rust
//! use meansdlib::{build_summary, BuildOptions, Category, MatchMode, MemoryWorkbook, Metric, RawCell, RawTable};
//!
//! let mean = RawTable::new(["Sheet", "FIRST_VISIT_TO_ACCEPT"])
//!     .with_row([RawCell::from("Breast ca"), RawCell::from(12.5)]);
//! let sd = RawTable::new(["Sheet", "FIRST_VISIT_TO_ACCEPT"])
//!     .with_row([RawCell::from("Breast"), RawCell::from(3.0)]);
//! let mut workbook = MemoryWorkbook::new().with_sheet("Mean", mean).with_sheet("SD", sd);
//!
//! let options = BuildOptions::new()
//!     .mean_source("Mean")
//!     .sd_source("SD")
//!     .decimal_places(1)
//!     .match_mode(MatchMode::Fuzzy);
//! let result = build_summary(&mut workbook, &options).unwrap();
//!
//! assert_eq!(result.table.cell(Category::Breast, Metric::FirstVisitToAcceptance), "12.5 (3)");
//! assert_eq!(result.table.row_count(), 12);
//! ```

pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod reconcile;
pub mod source;
pub mod summary;

pub use data::{normalize_table, NormalizedTable, Notice};
pub use error::MeansdError;
pub use options::{BuildOptions, MatchMode, NumberStyle, Role, FUZZY_THRESHOLD, MAX_DECIMAL_PLACES};
pub use output::{
    format_cell, format_number, save_xlsx, to_xlsx_bytes, SummaryRow, SummaryTable,
    OUTPUT_SHEET_NAME, SENTINEL,
};
pub use reconcile::{Category, CategoryAssignment, Metric, Series, SourceTable};
pub use source::{MemoryWorkbook, RawCell, RawTable, WorkbookSource, XlsxWorkbook};
pub use summary::{assemble, build_summary, build_summary_from_bytes, load_sources, SummaryResult};

/// Result type for meansdlib operations
pub type Result<T> = std::result::Result<T, MeansdError>;
