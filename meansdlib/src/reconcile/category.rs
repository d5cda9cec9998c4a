//! Category reconciliation: map a table's row labels onto [`Category`].
//!
//! Runs in two steps per table:
//!
//! 1. **Aliases**: rows labelled with a known alias (e.g. `Non-specific`) are
//!    renamed to their canonical category, or dropped if the canonical row
//!    is already present.
//! 2. **Assignment**: each category is assigned at most one row, and each
//!    row at most one category. Exact mode requires identical labels. Fuzzy
//!    mode ranks every (category, row) pair at or above the similarity
//!    threshold and accepts them greedily, best score first. The assignment
//!    is computed once and reused for every metric.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::{NormalizedTable, Notice};
use crate::options::{MatchMode, FUZZY_THRESHOLD};

use super::similarity::label_ratio;
use super::vocab::Category;

/// Comparison key for aliases: lower case, `-`/`_`/whitespace runs as one space.
fn alias_key(label: &str) -> String {
    label
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Category whose alias list contains `label`, if any.
fn alias_target(label: &str) -> Option<Category> {
    let key = alias_key(label);
    Category::ALL
        .into_iter()
        .find(|c| c.aliases().iter().any(|a| alias_key(a) == key))
}

/// Rename or drop alias rows in place.
///
/// Rows are visited in table order. When the canonical row exists (including
/// one produced by an earlier rename), the alias row is dropped and an
/// [`Notice::AliasConflict`] is recorded.
pub fn apply_aliases(table: &mut NormalizedTable) -> Vec<Notice> {
    let mut notices = Vec::new();
    let keys: Vec<String> = table.row_keys().map(str::to_string).collect();

    for key in keys {
        let Some(category) = alias_target(&key) else {
            continue;
        };
        let canonical = category.name();
        if key == canonical {
            continue;
        }

        if table.contains_row(canonical) {
            table.remove_row(&key);
            tracing::debug!(sheet = %table.sheet, alias = %key, canonical, "alias conflicts with canonical row; dropped");
            notices.push(Notice::AliasConflict {
                sheet: table.sheet.clone(),
                alias: key,
                canonical: canonical.to_string(),
            });
        } else {
            table.rename_row(&key, canonical);
            tracing::debug!(sheet = %table.sheet, alias = %key, canonical, "renamed alias row");
            notices.push(Notice::AliasRenamed {
                sheet: table.sheet.clone(),
                alias: key,
                canonical: canonical.to_string(),
            });
        }
    }

    notices
}

/// The row chosen for a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRow {
    /// Row label in the source table
    pub row: String,
    /// Similarity in `0.0..=1.0` (exact matches score 1)
    pub score: f64,
}

/// One-to-one mapping from categories to table rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryAssignment {
    matches: BTreeMap<Category, MatchedRow>,
}

/// A candidate pairing considered by fuzzy assignment.
struct Candidate<'a> {
    score: f64,
    exact: bool,
    category: Category,
    row_idx: usize,
    row: &'a str,
}

impl CategoryAssignment {
    /// Compute the assignment for a table.
    pub fn compute(table: &NormalizedTable, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => Self::exact(table),
            MatchMode::Fuzzy => Self::fuzzy(table, FUZZY_THRESHOLD),
        }
    }

    fn exact(table: &NormalizedTable) -> Self {
        let matches = Category::ALL
            .into_iter()
            .filter(|c| table.contains_row(c.name()))
            .map(|c| {
                (
                    c,
                    MatchedRow {
                        row: c.name().to_string(),
                        score: 1.0,
                    },
                )
            })
            .collect();
        Self { matches }
    }

    /// Greedy one-to-one assignment over all pairs at or above `threshold`.
    ///
    /// This deliberately differs from matching each category independently:
    /// a row claimed by a better-scoring category is not reused, so with only
    /// a "Neurological" row present, Urological stays unmatched instead of
    /// borrowing Neurological's values.
    fn fuzzy(table: &NormalizedTable, threshold: f64) -> Self {
        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        for category in Category::ALL {
            for (row_idx, row) in table.row_keys().enumerate() {
                let exact = row == category.name();
                let score = if exact {
                    1.0
                } else {
                    label_ratio(category.name(), row)
                };
                if score >= threshold {
                    candidates.push(Candidate {
                        score,
                        exact,
                        category,
                        row_idx,
                        row,
                    });
                }
            }
        }

        // Best score first; exact labels beat case-insensitive equals; then
        // canonical order, then row order.
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(b.exact.cmp(&a.exact))
                .then(a.category.cmp(&b.category))
                .then(a.row_idx.cmp(&b.row_idx))
        });

        let mut matches = BTreeMap::new();
        let mut taken_rows = vec![false; table.len()];
        for cand in candidates {
            if matches.contains_key(&cand.category) || taken_rows[cand.row_idx] {
                continue;
            }
            taken_rows[cand.row_idx] = true;
            tracing::debug!(
                sheet = %table.sheet,
                category = cand.category.name(),
                row = cand.row,
                score = cand.score,
                "fuzzy match"
            );
            matches.insert(
                cand.category,
                MatchedRow {
                    row: cand.row.to_string(),
                    score: cand.score,
                },
            );
        }

        Self { matches }
    }

    /// Row assigned to a category.
    pub fn row_for(&self, category: Category) -> Option<&str> {
        self.matches.get(&category).map(|m| m.row.as_str())
    }

    /// Full match details for a category.
    pub fn get(&self, category: Category) -> Option<&MatchedRow> {
        self.matches.get(&category)
    }

    /// Number of matched categories.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no category matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(keys: &[&str]) -> NormalizedTable {
        let mut t = NormalizedTable::new("Mean", vec!["A".to_string()]);
        for (i, key) in keys.iter().enumerate() {
            t.insert_row(*key, vec![Some(i as f64)]);
        }
        t
    }

    #[test]
    fn test_alias_key() {
        assert_eq!(alias_key("Non-specific"), "non specific");
        assert_eq!(alias_key(" NON_SPECIFIC "), "non specific");
        assert_eq!(alias_target("non specific"), Some(Category::OtherRareTumors));
        assert_eq!(alias_target("Other rare tumors"), None);
    }

    #[test]
    fn test_alias_renamed() {
        let mut t = table(&["Breast", "Non specific"]);
        let notices = apply_aliases(&mut t);

        assert!(t.contains_row("Other rare tumors"));
        assert!(!t.contains_row("Non specific"));
        assert_eq!(t.get("Other rare tumors", 0), Some(1.0));
        assert_eq!(
            notices,
            vec![Notice::AliasRenamed {
                sheet: "Mean".into(),
                alias: "Non specific".into(),
                canonical: "Other rare tumors".into(),
            }]
        );
    }

    #[test]
    fn test_alias_conflict_drops_alias() {
        let mut t = table(&["Other rare tumors", "Non-specific"]);
        let notices = apply_aliases(&mut t);

        assert_eq!(t.len(), 1);
        assert_eq!(t.get("Other rare tumors", 0), Some(0.0));
        assert!(matches!(notices[0], Notice::AliasConflict { .. }));
    }

    #[test]
    fn test_second_alias_conflicts_with_first_rename() {
        let mut t = table(&["Non-specific", "Non_specific"]);
        let notices = apply_aliases(&mut t);

        assert_eq!(t.row_keys().collect::<Vec<_>>(), vec!["Other rare tumors"]);
        assert_eq!(t.get("Other rare tumors", 0), Some(0.0));
        assert!(matches!(notices[0], Notice::AliasRenamed { .. }));
        assert!(matches!(notices[1], Notice::AliasConflict { .. }));
    }

    #[test]
    fn test_exact_assignment() {
        let t = table(&["Breast", "breast", "Breast ca"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Exact);
        assert_eq!(a.row_for(Category::Breast), Some("Breast"));
        assert_eq!(a.row_for(Category::Thyroid), None);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_fuzzy_assignment() {
        let t = table(&["Breast ca", "Thyroid cancer"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Breast), Some("Breast ca"));
        assert_eq!(a.row_for(Category::Thyroid), Some("Thyroid cancer"));
        assert_eq!(a.row_for(Category::Sarcoma), None);
    }

    #[test]
    fn test_fuzzy_below_threshold() {
        let t = table(&["Lymphoma"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Breast), None);
    }

    #[test]
    fn test_fuzzy_is_one_to_one() {
        // "Urological" is very similar to "Neurological"; each row serves one category
        let t = table(&["Neurological", "Urological"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Neurological), Some("Neurological"));
        assert_eq!(a.row_for(Category::Urological), Some("Urological"));

        // Only one row left: the better-scoring category takes it
        let t = table(&["Neurological"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Neurological), Some("Neurological"));
        assert_eq!(a.row_for(Category::Urological), None);
    }

    #[test]
    fn test_fuzzy_prefers_exact_label() {
        let t = table(&["breast", "Breast"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Breast), Some("Breast"));
        assert_eq!(a.get(Category::Breast).map(|m| m.score), Some(1.0));
    }

    #[test]
    fn test_fuzzy_equal_scores_first_row_wins() {
        let t = table(&["Breast x", "Breast y"]);
        assert_eq!(
            label_ratio("Breast", "Breast x"),
            label_ratio("Breast", "Breast y")
        );
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Breast), Some("Breast x"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_fuzzy_equal_scores_earlier_category_wins() {
        // Thyroid precedes Sarcoma in canonical order
        let t = table(&["Sarcoma Thyroid"]);
        assert_eq!(
            label_ratio("Thyroid", "Sarcoma Thyroid"),
            label_ratio("Sarcoma", "Sarcoma Thyroid")
        );
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Thyroid), Some("Sarcoma Thyroid"));
        assert_eq!(a.row_for(Category::Sarcoma), None);
    }

    #[test]
    fn test_fuzzy_ignores_case() {
        let t = table(&["BREAST CA"]);
        let a = CategoryAssignment::compute(&t, MatchMode::Fuzzy);
        assert_eq!(a.row_for(Category::Breast), Some("BREAST CA"));
        assert_eq!(a.get(Category::Breast).map(|m| m.score), Some(0.8));
    }
}
