//! Output: format values and serialize the summary table.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **Formatting**: Numbers and "mean (SD)" cells (`format_number`, `format_cell`)
//! - **SummaryTable**: The dense categories × metrics table of display strings
//! - **Export**: CSV and xlsx serialization
//!
//! `SummaryTable` is a pure presentation layer - it only holds strings. All
//! matching and combination happens in the reconcile stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use meansdlib::output::{save_xlsx, SummaryTable};
//!
//! save_xlsx(&result.table, "Mean_SD_Table.xlsx")?;
//! println!("{}", result.table.to_csv()?);
//! ```

pub mod format;
pub mod table;
pub mod xlsx;

pub use format::{format_cell, format_number, SENTINEL};
pub use table::{SummaryRow, SummaryTable, CATEGORY_HEADER};
pub use xlsx::{save_xlsx, to_xlsx_bytes, OUTPUT_SHEET_NAME};
