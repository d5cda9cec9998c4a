//! Non-fatal conditions found while building a table.

use serde::Serialize;
use std::fmt;

/// Something the caller should know about, but that did not stop the build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// A cell could not be read as a number and was treated as missing
    ParseWarning {
        sheet: String,
        row: String,
        column: String,
        value: String,
    },
    /// Both an alias and its canonical category were present; the alias row was dropped
    AliasConflict {
        sheet: String,
        alias: String,
        canonical: String,
    },
    /// An alias row was renamed to its canonical category
    AliasRenamed {
        sheet: String,
        alias: String,
        canonical: String,
    },
    /// A category label occurred more than once; the last row won
    DuplicateCategory { sheet: String, category: String },
}

impl Notice {
    /// Sheet the notice refers to.
    pub fn sheet(&self) -> &str {
        match self {
            Notice::ParseWarning { sheet, .. }
            | Notice::AliasConflict { sheet, .. }
            | Notice::AliasRenamed { sheet, .. }
            | Notice::DuplicateCategory { sheet, .. } => sheet,
        }
    }

    /// Whether the notice points at a likely data problem (renames are informational).
    pub fn is_warning(&self) -> bool {
        !matches!(self, Notice::AliasRenamed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ParseWarning {
                sheet,
                row,
                column,
                value,
            } => write!(
                f,
                "{sheet}: '{value}' in row '{row}', column '{column}' is not a number; treated as missing"
            ),
            Notice::AliasConflict {
                sheet,
                alias,
                canonical,
            } => write!(
                f,
                "{sheet}: both '{alias}' and '{canonical}' present; dropped '{alias}' (kept '{canonical}')"
            ),
            Notice::AliasRenamed {
                sheet,
                alias,
                canonical,
            } => write!(f, "{sheet}: renamed '{alias}' to '{canonical}'"),
            Notice::DuplicateCategory { sheet, category } => write!(
                f,
                "{sheet}: category '{category}' appears more than once; using the last row"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        let notice = Notice::AliasConflict {
            sheet: "Mean".into(),
            alias: "Non-specific".into(),
            canonical: "Other rare tumors".into(),
        };
        assert_eq!(
            notice.to_string(),
            "Mean: both 'Non-specific' and 'Other rare tumors' present; dropped 'Non-specific' (kept 'Other rare tumors')"
        );
        assert!(notice.is_warning());
        assert_eq!(notice.sheet(), "Mean");
    }

    #[test]
    fn test_rename_is_informational() {
        let notice = Notice::AliasRenamed {
            sheet: "SD".into(),
            alias: "Non specific".into(),
            canonical: "Other rare tumors".into(),
        };
        assert!(!notice.is_warning());
    }

    #[test]
    fn test_notice_json() {
        let notice = Notice::DuplicateCategory {
            sheet: "Mean".into(),
            category: "Breast".into(),
        };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["kind"], "duplicate_category");
        assert_eq!(json["category"], "Breast");
    }
}
