//! Home surface state: the simulated upload plus investigation history.

use crate::ingest::IngestRun;
use crate::models::RiskLevel;

/// Status of a past investigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Active,
    Closed,
    UnderReview,
}

impl CaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Active => "Active",
            CaseStatus::Closed => "Closed",
            CaseStatus::UnderReview => "Under Review",
        }
    }
}

/// One entry of the investigation history shown on the home surface.
#[derive(Debug, Clone)]
pub struct CaseRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub status: CaseStatus,
    pub date: &'static str,
    pub devices: u32,
    pub entities: u32,
    pub risk: RiskLevel,
    pub summary: &'static str,
}

/// Past cases. Hand-authored display fixtures, same standing as the
/// embedded JSON documents.
pub const PAST_CASES: [CaseRecord; 4] = [
    CaseRecord {
        id: "MH/2024/7891",
        title: "Financial Fraud - Mumbai",
        status: CaseStatus::Active,
        date: "2024-12-10",
        devices: 3,
        entities: 47,
        risk: RiskLevel::Critical,
        summary: "Multi-crore hawala network involving 3 seized devices. 47 entities mapped with cross-border links to Dubai.",
    },
    CaseRecord {
        id: "DL/2024/3204",
        title: "Narcotics Network - Delhi",
        status: CaseStatus::Closed,
        date: "2024-11-02",
        devices: 5,
        entities: 112,
        risk: RiskLevel::High,
        summary: "Dark web procurement chain. 112 entities identified across Telegram and Signal. 5 devices analyzed.",
    },
    CaseRecord {
        id: "KA/2024/9917",
        title: "Corporate Espionage - Bangalore",
        status: CaseStatus::UnderReview,
        date: "2024-10-18",
        devices: 2,
        entities: 23,
        risk: RiskLevel::Medium,
        summary: "Insider data exfiltration via encrypted USB. 23 entities, 2 devices with deleted file recovery.",
    },
    CaseRecord {
        id: "TN/2024/5540",
        title: "Human Trafficking Ring - Chennai",
        status: CaseStatus::Active,
        date: "2024-09-25",
        devices: 7,
        entities: 89,
        risk: RiskLevel::Critical,
        summary: "Multi-state trafficking operation. 89 entities with geographic clustering across 4 states.",
    },
];

/// Aggregate counters for the stat tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseStats {
    pub total: usize,
    pub active: usize,
    pub entities_mapped: u32,
    pub critical: usize,
}

/// State of the home surface: one ingest run per visit, plus keyboard
/// selection over the case history.
#[derive(Debug, Default)]
pub struct HomeView {
    pub run: IngestRun,
    pub selected_case: usize,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_next_case(&mut self) {
        self.selected_case = (self.selected_case + 1).min(PAST_CASES.len() - 1);
    }

    pub fn select_previous_case(&mut self) {
        self.selected_case = self.selected_case.saturating_sub(1);
    }

    /// Stat-tile counters derived from the case history.
    pub fn stats() -> CaseStats {
        CaseStats {
            total: PAST_CASES.len(),
            active: PAST_CASES
                .iter()
                .filter(|c| c.status == CaseStatus::Active)
                .count(),
            entities_mapped: PAST_CASES.iter().map(|c| c.entities).sum(),
            critical: PAST_CASES
                .iter()
                .filter(|c| c.risk == RiskLevel::Critical)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_aggregate_the_fixture_cases() {
        let stats = HomeView::stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.entities_mapped, 47 + 112 + 23 + 89);
        assert_eq!(stats.critical, 2);
    }

    #[test]
    fn test_case_selection_stays_in_bounds() {
        let mut view = HomeView::new();
        view.select_previous_case();
        assert_eq!(view.selected_case, 0);
        for _ in 0..10 {
            view.select_next_case();
        }
        assert_eq!(view.selected_case, PAST_CASES.len() - 1);
    }
}
