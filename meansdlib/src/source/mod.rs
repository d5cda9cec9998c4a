//! Source reading: get raw sheets out of a workbook.
//!
//! This module handles the first stage of the pipeline - turning a workbook
//! into named rectangular tables of raw cells. It provides:
//!
//! - **Raw tables**: Headers plus rows of untyped cells (`RawTable`, `RawCell`)
//! - **Workbooks**: The `WorkbookSource` trait with an xlsx reader and an
//!   in-memory implementation
//!
//! ## Example
//!
//! ```rust,ignore
//! use meansdlib::source::{WorkbookSource, XlsxWorkbook};
//!
//! let mut workbook = XlsxWorkbook::open("stats.xlsx")?;
//! for name in workbook.sheet_names() {
//!     let table = workbook.read_sheet(&name)?;
//!     println!("{name}: {} rows", table.row_count());
//! }
//! ```

pub mod raw;
pub mod workbook;

pub use raw::{RawCell, RawTable};
pub use workbook::{MemoryWorkbook, WorkbookSource, XlsxWorkbook};
