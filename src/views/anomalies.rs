//! Anomaly triage surface state.

use crate::models::{AnomalyCategory, AnomalyFinding};

/// Category filter over the findings list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(AnomalyCategory),
}

impl CategoryFilter {
    pub fn matches(&self, finding: &AnomalyFinding) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => finding.category == *cat,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Anomalies",
            CategoryFilter::Only(cat) => cat.label(),
        }
    }
}

/// State of the anomaly triage surface.
#[derive(Debug, Default)]
pub struct AnomalyView {
    pub filter: CategoryFilter,

    /// At most one finding is expanded at a time; expanding one does not
    /// affect the others.
    pub expanded: Option<String>,
}

impl AnomalyView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn toggle_expand(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    /// Findings passing the active filter, in document order.
    pub fn filtered<'a>(&self, findings: &'a [AnomalyFinding]) -> Vec<&'a AnomalyFinding> {
        findings.iter().filter(|f| self.filter.matches(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureStore;

    #[test]
    fn test_all_filter_passes_everything() {
        let store = FixtureStore::load().unwrap();
        let view = AnomalyView::new();
        assert_eq!(
            view.filtered(&store.anomalies.anomalies).len(),
            store.anomalies.anomalies.len()
        );
    }

    #[test]
    fn test_category_filter_is_exact() {
        let store = FixtureStore::load().unwrap();
        let mut view = AnomalyView::new();
        view.set_filter(CategoryFilter::Only(AnomalyCategory::Temporal));
        let filtered = view.filtered(&store.anomalies.anomalies);
        assert!(!filtered.is_empty());
        assert!(filtered
            .iter()
            .all(|f| f.category == AnomalyCategory::Temporal));
    }

    #[test]
    fn test_category_filters_partition_the_findings() {
        let store = FixtureStore::load().unwrap();
        let total: usize = AnomalyCategory::ALL
            .iter()
            .map(|cat| {
                let mut view = AnomalyView::new();
                view.set_filter(CategoryFilter::Only(*cat));
                view.filtered(&store.anomalies.anomalies).len()
            })
            .sum();
        assert_eq!(total, store.anomalies.anomalies.len());
    }

    #[test]
    fn test_single_expansion_toggles() {
        let mut view = AnomalyView::new();
        view.toggle_expand("anom-001");
        assert_eq!(view.expanded.as_deref(), Some("anom-001"));
        view.toggle_expand("anom-003");
        assert_eq!(view.expanded.as_deref(), Some("anom-003"));
        view.toggle_expand("anom-003");
        assert_eq!(view.expanded, None);
    }

    #[test]
    fn test_changing_filter_keeps_expansion_state() {
        let mut view = AnomalyView::new();
        view.toggle_expand("anom-002");
        view.set_filter(CategoryFilter::Only(AnomalyCategory::Network));
        assert_eq!(view.expanded.as_deref(), Some("anom-002"));
    }
}
