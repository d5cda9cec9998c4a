//! Metric reconciliation: map a table's column headers onto [`Metric`].

use super::vocab::Metric;

/// For each metric, the indices of the columns that map to it, in column order.
///
/// Headers that map to no metric are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricIndex {
    columns: [Vec<usize>; 5],
}

impl MetricIndex {
    /// Build the index from trimmed column headers.
    pub fn new(headers: &[String]) -> Self {
        let mut columns: [Vec<usize>; 5] = Default::default();
        for (idx, header) in headers.iter().enumerate() {
            if let Some(metric) = Metric::from_header(header) {
                columns[metric.index()].push(idx);
            }
        }
        Self { columns }
    }

    /// Columns mapping to a metric.
    pub fn columns(&self, metric: Metric) -> &[usize] {
        &self.columns[metric.index()]
    }

    /// Whether any column maps to a metric.
    pub fn has(&self, metric: Metric) -> bool {
        !self.columns(metric).is_empty()
    }

    /// Metrics with at least one column.
    pub fn mapped(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.has(*m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_index_maps_headers() {
        let idx = MetricIndex::new(&headers(&[
            "FIRST_VISIT_TO_ACCEPT",
            "N",
            "CONSULTANT_NOTE_TO_MDT",
        ]));
        assert_eq!(idx.columns(Metric::FirstVisitToAcceptance), &[0]);
        assert_eq!(idx.columns(Metric::FirstVisitToMdt), &[2]);
        assert!(!idx.has(Metric::MdtToFirstTherapy));
        assert_eq!(
            idx.mapped().collect::<Vec<_>>(),
            vec![Metric::FirstVisitToAcceptance, Metric::FirstVisitToMdt]
        );
    }

    #[test]
    fn test_several_headers_same_metric() {
        let idx = MetricIndex::new(&headers(&[
            "ACCEPT_TO_FIRST_CONSULTANT_NOTE",
            "ACCEPT_TO_FIRST_CONSULTANT_NOT",
        ]));
        assert_eq!(idx.columns(Metric::AcceptanceToFirstOpdVisit), &[0, 1]);
    }
}
