//! Data normalization: turn raw sheets into keyed numeric tables.
//!
//! This module handles the second stage of the pipeline. It provides:
//!
//! - **Normalization**: key column selection, header trimming, numeric
//!   coercion (`normalize_table`, `NormalizedTable`)
//! - **Notices**: non-fatal conditions collected along the way (`Notice`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use meansdlib::data::normalize_table;
//!
//! let (table, notices) = normalize_table("Mean", &raw)?;
//! println!("{} categories, {} warnings", table.len(), notices.len());
//! ```

pub mod normalize;
pub mod notice;

pub use normalize::{normalize_table, NormalizedTable, KEY_COLUMN_NAMES};
pub use notice::Notice;
