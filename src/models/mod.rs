//! Data models for Forensiq entities.
//!
//! This module defines the core data structures:
//! - `EntityNode` / `EntityEdge` - the relationship graph fixtures
//! - `AnomalyFinding` - behavioral anomaly findings with triage metadata
//! - `TimelineEvent` / `Storyline` - multi-hypothesis timeline fixtures
//! - `RetrievalRecord` - communications records served as citations
//! - `ChatTurn` - one turn of the investigative chat
//! - `Identity` - the authenticated analyst profile
//!
//! All fixture types deserialize from the embedded JSON documents and are
//! immutable for the process lifetime. Only `ChatTurn` sequences and the
//! current `Identity` are created at runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Risk grading shared by retrieval records, anomaly findings, and
/// timeline events (where it is called importance).
///
/// Ordering is by severity, most severe first, so `BTreeMap<RiskLevel, _>`
/// iterates critical-to-low for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entity classification in the relationship graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    Suspect,
    Associate,
    Foreign,
    Financial,
    HiddenLink,
}

impl NodeCategory {
    /// Legend label, e.g. "hidden link".
    pub fn label(&self) -> &'static str {
        match self {
            NodeCategory::Suspect => "suspect",
            NodeCategory::Associate => "associate",
            NodeCategory::Foreign => "foreign",
            NodeCategory::Financial => "financial",
            NodeCategory::HiddenLink => "hidden link",
        }
    }
}

/// Relationship classification between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCategory {
    Frequent,
    Suspicious,
    International,
    Financial,
    Hidden,
}

/// A node in the entity relationship graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityNode {
    /// Unique identifier (e.g., "ent-001")
    pub id: String,

    /// Display label
    pub label: String,

    /// Entity classification
    #[serde(rename = "type")]
    pub category: NodeCategory,

    /// Fixed layout position
    pub x: f64,
    pub y: f64,

    /// Known phone number, or "unknown"
    pub phone: String,

    /// Total messages attributed to this entity
    pub message_count: u32,

    /// Risk score in [0, 100]
    pub risk_score: u8,
}

/// A relationship between two entities.
///
/// Invariant (checked at fixture load): `source` and `target` reference
/// existing `EntityNode` ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityEdge {
    pub source: String,
    pub target: String,

    #[serde(rename = "type")]
    pub category: EdgeCategory,

    /// Short annotation shown when the edge is highlighted
    pub label: String,
}

impl EntityEdge {
    /// Whether this edge touches the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The endpoint that is not `node_id`, if the edge touches it.
    pub fn other_end<'a>(&'a self, node_id: &str) -> Option<&'a str> {
        if self.source == node_id {
            Some(&self.target)
        } else if self.target == node_id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Anomaly detector family that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyCategory {
    Temporal,
    Linguistic,
    Data,
    Network,
}

impl AnomalyCategory {
    pub const ALL: [AnomalyCategory; 4] = [
        AnomalyCategory::Temporal,
        AnomalyCategory::Linguistic,
        AnomalyCategory::Data,
        AnomalyCategory::Network,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnomalyCategory::Temporal => "Temporal",
            AnomalyCategory::Linguistic => "Linguistic",
            AnomalyCategory::Data => "Data",
            AnomalyCategory::Network => "Network",
        }
    }
}

/// A behavioral anomaly finding with its triage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyFinding {
    pub id: String,
    pub category: AnomalyCategory,
    pub severity: RiskLevel,
    pub title: String,

    /// What the detector observed
    pub finding: String,

    /// When the detector fired
    pub detected_at: DateTime<Utc>,

    /// Quantified deviation from the behavioral baseline
    pub deviation: String,

    /// Why the deviation matters
    pub rationale: String,

    /// Ordered follow-up actions
    #[serde(default)]
    pub recommended_actions: Vec<String>,

    /// Artifact references supporting the finding
    #[serde(default)]
    pub evidence_refs: Vec<String>,
}

/// Aggregate risk posture over all findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    pub overall_risk: RiskLevel,
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub recommendation: String,
}

/// The behavioral baseline anomalies are measured against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralBaseline {
    pub active_hours: String,
    pub primary_language: String,
    pub avg_daily_messages: u32,
    pub typical_contacts: u32,
    pub avg_media_per_day: u32,
}

/// Kind of reconstructed timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Communication,
    Financial,
    Device,
}

impl EventCategory {
    /// Card subtitle, e.g. "Physical Meeting".
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "Physical Meeting",
            EventCategory::Communication => "Communication",
            EventCategory::Financial => "Financial Transaction",
            EventCategory::Device => "Device Activity",
        }
    }
}

/// One source-anchored event in a reconstructed timeline.
///
/// Belongs to exactly one storyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,

    /// Owning storyline id
    pub storyline: String,

    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub category: EventCategory,

    pub importance: RiskLevel,
    pub title: String,
    pub description: String,

    /// Human-readable source label (e.g. "Telegram database")
    pub source: String,

    /// Machine reference into the evidence store
    pub source_ref: String,

    #[serde(default)]
    pub participants: Vec<String>,
}

/// One narrative hypothesis over the timeline events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storyline {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Analyst confidence, percent
    pub confidence: u8,
}

/// Source channel of a retrieval record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    WhatsApp,
    Telegram,
    #[serde(rename = "SMS")]
    Sms,
    Signal,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::WhatsApp => "WhatsApp",
            Channel::Telegram => "Telegram",
            Channel::Sms => "SMS",
            Channel::Signal => "Signal",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A communications record served as a citation by the responder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalRecord {
    pub id: String,
    pub source: Channel,
    pub sender: String,
    pub receiver: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,

    /// Retrieval relevance in [0, 1]
    pub relevance_score: f64,

    pub risk_level: RiskLevel,
    pub language: String,

    /// Labels marked as forensically significant within this record
    #[serde(default)]
    pub flagged_entities: Vec<String>,
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the investigative chat. Append-only; never mutated after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub id: String,
    pub role: ChatRole,
    pub content: String,

    /// Records cited as supporting evidence (assistant turns only)
    #[serde(default)]
    pub citations: Vec<RetrievalRecord>,

    /// One-paragraph digest of the citations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Risk level -> citation count
    #[serde(default)]
    pub risk_breakdown: BTreeMap<RiskLevel, usize>,

    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user turn with the given content.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            citations: Vec::new(),
            summary: None,
            risk_breakdown: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }
}

/// The authenticated analyst profile held by the session gate.
///
/// Never contains the credential it was established with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,

    /// Two-letter avatar label
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_orders_most_severe_first() {
        let mut map: BTreeMap<RiskLevel, usize> = BTreeMap::new();
        map.insert(RiskLevel::Low, 1);
        map.insert(RiskLevel::Critical, 2);
        map.insert(RiskLevel::High, 3);

        let order: Vec<RiskLevel> = map.keys().copied().collect();
        assert_eq!(
            order,
            vec![RiskLevel::Critical, RiskLevel::High, RiskLevel::Low]
        );
    }

    #[test]
    fn test_node_category_snake_case_wire_format() {
        let json = r#""hidden_link""#;
        let cat: NodeCategory = serde_json::from_str(json).unwrap();
        assert_eq!(cat, NodeCategory::HiddenLink);
        assert_eq!(serde_json::to_string(&cat).unwrap(), json);
    }

    #[test]
    fn test_channel_wire_format_matches_fixture_spelling() {
        assert_eq!(
            serde_json::from_str::<Channel>(r#""SMS""#).unwrap(),
            Channel::Sms
        );
        assert_eq!(
            serde_json::from_str::<Channel>(r#""WhatsApp""#).unwrap(),
            Channel::WhatsApp
        );
    }

    #[test]
    fn test_edge_other_end() {
        let edge = EntityEdge {
            source: "a".into(),
            target: "b".into(),
            category: EdgeCategory::Frequent,
            label: "x".into(),
        };
        assert_eq!(edge.other_end("a"), Some("b"));
        assert_eq!(edge.other_end("b"), Some("a"));
        assert_eq!(edge.other_end("c"), None);
    }

    #[test]
    fn test_user_turn_has_no_citations() {
        let turn = ChatTurn::user("show me crypto transfers");
        assert_eq!(turn.role, ChatRole::User);
        assert!(turn.citations.is_empty());
        assert!(turn.summary.is_none());
        assert!(turn.risk_breakdown.is_empty());
    }
}
