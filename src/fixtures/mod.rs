//! Embedded fixture documents.
//!
//! All analysis results rendered by the dashboard come from four static
//! JSON documents compiled into the binary. They are parsed once at
//! startup, validated, and never mutated afterwards.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;

use crate::models::{
    AnomalyFinding, BehavioralBaseline, EntityEdge, EntityNode, RetrievalRecord, RiskSummary,
    Storyline, TimelineEvent,
};
use crate::{Error, Result};

const ENTITIES_JSON: &str = include_str!("../../data/entities.json");
const ANOMALIES_JSON: &str = include_str!("../../data/anomalies.json");
const TIMELINE_JSON: &str = include_str!("../../data/timeline.json");
const RETRIEVAL_JSON: &str = include_str!("../../data/retrieval.json");

/// The entity relationship graph document.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityGraph {
    pub nodes: Vec<EntityNode>,
    pub edges: Vec<EntityEdge>,
}

impl EntityGraph {
    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&EntityNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All edges touching the given node.
    pub fn edges_of<'a>(&'a self, node_id: &str) -> Vec<&'a EntityEdge> {
        self.edges.iter().filter(|e| e.touches(node_id)).collect()
    }
}

/// The anomaly report document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    pub anomalies: Vec<AnomalyFinding>,
    pub risk_summary: RiskSummary,
    pub baseline: BehavioralBaseline,
}

/// The multi-hypothesis timeline document.
///
/// Narratives are hand-authored prose keyed by storyline id. They are
/// correlated with the event list only by that id; load-time validation
/// guarantees every storyline has one.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDoc {
    pub events: Vec<TimelineEvent>,
    pub storylines: Vec<Storyline>,
    pub narratives: HashMap<String, String>,
}

impl TimelineDoc {
    /// Events belonging to the given storyline, in document order.
    pub fn events_for<'a>(&'a self, storyline_id: &str) -> Vec<&'a TimelineEvent> {
        self.events
            .iter()
            .filter(|e| e.storyline == storyline_id)
            .collect()
    }

    pub fn storyline(&self, id: &str) -> Option<&Storyline> {
        self.storylines.iter().find(|s| s.id == id)
    }
}

/// The retrieval records document.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalDoc {
    pub results: Vec<RetrievalRecord>,
}

/// All fixture documents, loaded and validated once at startup.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    pub graph: EntityGraph,
    pub anomalies: AnomalyReport,
    pub timeline: TimelineDoc,
    pub retrieval: RetrievalDoc,
}

impl FixtureStore {
    /// Parse and validate the embedded documents.
    pub fn load() -> Result<Self> {
        let graph: EntityGraph = serde_json::from_str(ENTITIES_JSON)?;
        let anomalies: AnomalyReport = serde_json::from_str(ANOMALIES_JSON)?;
        let timeline: TimelineDoc = serde_json::from_str(TIMELINE_JSON)?;
        let retrieval: RetrievalDoc = serde_json::from_str(RETRIEVAL_JSON)?;

        let store = Self {
            graph,
            anomalies,
            timeline,
            retrieval,
        };
        store.validate()?;
        Ok(store)
    }

    /// Referential checks across documents.
    ///
    /// - every edge endpoint names an existing node
    /// - every event belongs to a declared storyline
    /// - every storyline has narrative prose
    pub fn validate(&self) -> Result<()> {
        let node_ids: HashSet<&str> = self.graph.nodes.iter().map(|n| n.id.as_str()).collect();
        for edge in &self.graph.edges {
            for end in [&edge.source, &edge.target] {
                if !node_ids.contains(end.as_str()) {
                    return Err(Error::DanglingEdge(end.clone()));
                }
            }
        }

        let storyline_ids: HashSet<&str> = self
            .timeline
            .storylines
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        for event in &self.timeline.events {
            if !storyline_ids.contains(event.storyline.as_str()) {
                return Err(Error::UnknownStoryline(event.storyline.clone()));
            }
        }
        for storyline in &self.timeline.storylines {
            if !self.timeline.narratives.contains_key(&storyline.id) {
                return Err(Error::MissingNarrative(storyline.id.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EdgeCategory;

    #[test]
    fn test_embedded_fixtures_load_and_validate() {
        let store = FixtureStore::load().unwrap();
        assert!(!store.graph.nodes.is_empty());
        assert!(!store.graph.edges.is_empty());
        assert!(!store.anomalies.anomalies.is_empty());
        assert!(store.timeline.storylines.len() >= 2);
        assert!(store.retrieval.results.len() >= 3);
    }

    #[test]
    fn test_every_storyline_has_events_and_narrative() {
        let store = FixtureStore::load().unwrap();
        for storyline in &store.timeline.storylines {
            assert!(
                !store.timeline.events_for(&storyline.id).is_empty(),
                "storyline {} has no events",
                storyline.id
            );
            assert!(store.timeline.narratives.contains_key(&storyline.id));
        }
    }

    #[test]
    fn test_dangling_edge_is_rejected() {
        let mut store = FixtureStore::load().unwrap();
        store.graph.edges.push(EntityEdge {
            source: "ent-001".into(),
            target: "ent-999".into(),
            category: EdgeCategory::Hidden,
            label: "bogus".into(),
        });
        match store.validate() {
            Err(Error::DanglingEdge(id)) => assert_eq!(id, "ent-999"),
            other => panic!("expected DanglingEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_storyline_is_rejected() {
        let mut store = FixtureStore::load().unwrap();
        let mut event = store.timeline.events[0].clone();
        event.storyline = "storyline-z".into();
        store.timeline.events.push(event);
        assert!(matches!(
            store.validate(),
            Err(Error::UnknownStoryline(_))
        ));
    }

    #[test]
    fn test_missing_narrative_is_rejected() {
        let mut store = FixtureStore::load().unwrap();
        store.timeline.narratives.remove("storyline-b");
        assert!(matches!(
            store.validate(),
            Err(Error::MissingNarrative(_))
        ));
    }

    #[test]
    fn test_risk_summary_counts_match_findings() {
        let store = FixtureStore::load().unwrap();
        let count = |level: crate::models::RiskLevel| {
            store
                .anomalies
                .anomalies
                .iter()
                .filter(|a| a.severity == level)
                .count() as u32
        };
        let summary = &store.anomalies.risk_summary;
        assert_eq!(count(crate::models::RiskLevel::Critical), summary.critical);
        assert_eq!(count(crate::models::RiskLevel::High), summary.high);
        assert_eq!(count(crate::models::RiskLevel::Medium), summary.medium);
        assert_eq!(count(crate::models::RiskLevel::Low), summary.low);
    }
}
