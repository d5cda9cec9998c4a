//! Error types for meansdlib

use thiserror::Error;

use crate::options::Role;

/// Errors that abort a table build.
///
/// Everything here is fatal for the request: no partial table is produced.
/// Recoverable conditions (unparseable cells, alias collisions) are reported
/// as [`Notice`](crate::Notice)s instead.
#[derive(Error, Debug)]
pub enum MeansdError {
    /// A selected sheet has no columns at all
    #[error("sheet '{sheet}' has no columns")]
    NoColumns { sheet: String },

    /// No sheet was selected for a required role
    #[error("no {role} sheet selected")]
    NoSources { role: Role },

    /// A selected sheet does not exist in the workbook
    #[error("sheet '{name}' not found (available: {available})")]
    SheetNotFound { name: String, available: String },

    /// Decimal precision outside the supported range
    #[error("decimal places must be between 0 and {max}, got {value}")]
    InvalidPrecision { value: u8, max: u8 },

    /// The workbook could not be opened or a sheet could not be read
    #[error("failed to read workbook: {0}")]
    WorkbookRead(String),

    /// The output workbook could not be written
    #[error("failed to write workbook: {0}")]
    WorkbookWrite(String),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeansdError {
    /// Whether this error describes a problem with the selected inputs
    /// rather than with reading or writing files.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            MeansdError::NoColumns { .. }
                | MeansdError::NoSources { .. }
                | MeansdError::SheetNotFound { .. }
                | MeansdError::InvalidPrecision { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_errors() {
        assert!(MeansdError::NoColumns {
            sheet: "Mean".into()
        }
        .is_schema_error());
        assert!(MeansdError::NoSources { role: Role::Sd }.is_schema_error());
        assert!(!MeansdError::WorkbookRead("bad zip".into()).is_schema_error());
    }

    #[test]
    fn test_error_messages() {
        let err = MeansdError::NoSources { role: Role::Mean };
        assert_eq!(err.to_string(), "no mean sheet selected");

        let err = MeansdError::InvalidPrecision { value: 3, max: 2 };
        assert_eq!(
            err.to_string(),
            "decimal places must be between 0 and 2, got 3"
        );
    }
}
