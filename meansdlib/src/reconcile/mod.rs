//! Reconciliation: map free-text rows and columns onto the canonical vocabularies.
//!
//! This module handles the third stage of the pipeline - deciding which
//! source value feeds which output cell. It provides:
//!
//! - **Vocabularies**: The fixed, ordered `Category` and `Metric` enums
//! - **Category matching**: Alias handling plus exact or fuzzy assignment
//! - **Metric matching**: Header synonym lookup (`MetricIndex`)
//! - **Combination**: Per-cell value series across same-role sheets (`Series`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use meansdlib::reconcile::{Category, Metric, Series, SourceTable};
//! use meansdlib::{MatchMode, Role};
//!
//! let (source, notices) = SourceTable::prepare(table, MatchMode::Fuzzy);
//! let series = Series::resolve(Role::Mean, &[source], Category::Breast, Metric::FirstVisitToMdt);
//! ```

pub mod category;
pub mod combine;
pub mod metric;
pub mod similarity;
pub mod vocab;

pub use category::{apply_aliases, CategoryAssignment, MatchedRow};
pub use combine::{Series, SourceTable, SERIES_SEPARATOR};
pub use metric::MetricIndex;
pub use similarity::{label_ratio, ratio};
pub use vocab::{Category, Metric};
