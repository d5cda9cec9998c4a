//! Canonical vocabularies: output categories and output metrics.
//!
//! Both orderings are fixed and define the row and column order of every
//! summary table. They are never derived from input.

use serde::{Serialize, Serializer};
use std::fmt;

/// Output row: a tumor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Haematological,
    Gynecological,
    Urological,
    Neurological,
    Breast,
    Pulmonary,
    Gastrointestinal,
    HeadAndNeck,
    Thyroid,
    Sarcoma,
    Retinoblastoma,
    OtherRareTumors,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 12] = [
        Category::Haematological,
        Category::Gynecological,
        Category::Urological,
        Category::Neurological,
        Category::Breast,
        Category::Pulmonary,
        Category::Gastrointestinal,
        Category::HeadAndNeck,
        Category::Thyroid,
        Category::Sarcoma,
        Category::Retinoblastoma,
        Category::OtherRareTumors,
    ];

    /// Display name, also the exact label matched in exact mode.
    pub fn name(self) -> &'static str {
        match self {
            Category::Haematological => "Haematological",
            Category::Gynecological => "Gynecological",
            Category::Urological => "Urological",
            Category::Neurological => "Neurological",
            Category::Breast => "Breast",
            Category::Pulmonary => "Pulmonary",
            Category::Gastrointestinal => "Gastrointestinal",
            Category::HeadAndNeck => "Head & Neck",
            Category::Thyroid => "Thyroid",
            Category::Sarcoma => "Sarcoma",
            Category::Retinoblastoma => "Retinoblastoma",
            Category::OtherRareTumors => "Other rare tumors",
        }
    }

    /// Alternative labels that denote this category.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::OtherRareTumors => &["Non-specific", "Non specific", "Non_specific"],
            _ => &[],
        }
    }

    /// Position in output order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a category by its exact display name.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Output column: a time interval along the care pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    FirstVisitToAcceptance,
    AcceptanceToFirstOpdVisit,
    FirstVisitToMdt,
    MdtToFirstTherapy,
    FirstVisitToFirstTherapy,
}

impl Metric {
    /// All metrics in output order.
    pub const ALL: [Metric; 5] = [
        Metric::FirstVisitToAcceptance,
        Metric::AcceptanceToFirstOpdVisit,
        Metric::FirstVisitToMdt,
        Metric::MdtToFirstTherapy,
        Metric::FirstVisitToFirstTherapy,
    ];

    /// Display name, used as output column header.
    pub fn name(self) -> &'static str {
        match self {
            Metric::FirstVisitToAcceptance => "First visit to acceptance",
            Metric::AcceptanceToFirstOpdVisit => "Acceptance to first visit in OPD",
            Metric::FirstVisitToMdt => "First Visit to MDT",
            Metric::MdtToFirstTherapy => "MDT to First Day of Therapy",
            Metric::FirstVisitToFirstTherapy => "First visit to First Day of Therapy",
        }
    }

    /// Raw header spellings found in source sheets, including truncated
    /// export names. The display name is always accepted as well.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Metric::FirstVisitToAcceptance => &["FIRST_VISIT_TO_ACCEPT"],
            Metric::AcceptanceToFirstOpdVisit => &[
                "ACCEPT_TO_FIRST_CONSULTANT_NOT",
                "ACCEPT_TO_FIRST_CONSULTANT_NOTE",
            ],
            Metric::FirstVisitToMdt => &["CONSULTANT_NOTE_TO_MDT"],
            Metric::MdtToFirstTherapy => &["DAYS_BTW_MDT_TO_1ST_THERAPY"],
            Metric::FirstVisitToFirstTherapy => &["FIRST_NOTE_TO_THERAPY"],
        }
    }

    /// Position in output order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map a raw column header to a metric.
    ///
    /// Case is ignored and runs of whitespace or underscores are equivalent,
    /// so `first visit_to  ACCEPT` matches `FIRST_VISIT_TO_ACCEPT`.
    pub fn from_header(header: &str) -> Option<Metric> {
        let key = header_key(header);
        if key.is_empty() {
            return None;
        }
        Metric::ALL.into_iter().find(|m| {
            header_key(m.name()) == key || m.synonyms().iter().any(|s| header_key(s) == key)
        })
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Comparison key for headers: upper case, words joined by single underscores.
fn header_key(header: &str) -> String {
    header
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}
