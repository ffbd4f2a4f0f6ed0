//! Command implementations for the Forensiq CLI.
//!
//! Each command returns a result struct implementing [`Output`], which the
//! binary prints as JSON (default) or human-readable text (`-H`).

use serde::Serialize;

use crate::fixtures::FixtureStore;
use crate::models::{ChatTurn, Identity};
use crate::responder;
use crate::session::SessionGate;
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Result of `fq query`.
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub reply: ChatTurn,
}

impl Output for QueryOutput {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.reply.content);
        out.push_str("\n\nCitations:\n");
        for (i, cite) in self.reply.citations.iter().enumerate() {
            out.push_str(&format!(
                "  [{}] {} {} -> {} ({}, {}%): {}\n",
                i + 1,
                cite.source,
                cite.sender,
                cite.receiver,
                cite.risk_level,
                (cite.relevance_score * 100.0).round() as u32,
                cite.content
            ));
        }
        out.trim_end().to_string()
    }
}

/// Run the retrieval responder over the fixture records.
///
/// Blank input is the caller's error: the interactive surfaces never
/// invoke the responder with it, and the CLI rejects it here.
pub fn query(store: &FixtureStore, text: &str) -> Result<QueryOutput> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("query must not be blank".to_string()));
    }
    let reply = responder::respond(&store.retrieval.results, text);
    Ok(QueryOutput {
        query: text.trim().to_string(),
        reply,
    })
}

/// Result of `fq fixtures validate`.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub valid: bool,
}

impl Output for ValidateOutput {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        "Fixtures OK: all edges, storylines, and narratives check out".to_string()
    }
}

/// Load and validate the embedded fixture documents.
pub fn fixtures_validate() -> Result<ValidateOutput> {
    FixtureStore::load()?;
    Ok(ValidateOutput { valid: true })
}

/// Result of `fq fixtures stats`.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub nodes: usize,
    pub edges: usize,
    pub anomalies: usize,
    pub storylines: usize,
    pub events: usize,
    pub records: usize,
}

impl Output for StatsOutput {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        format!(
            "Entities: {} nodes, {} edges\nAnomalies: {}\nTimeline: {} events across {} storylines\nRetrieval records: {}",
            self.nodes, self.edges, self.anomalies, self.events, self.storylines, self.records
        )
    }
}

/// Summarize the fixture documents.
pub fn fixtures_stats(store: &FixtureStore) -> StatsOutput {
    StatsOutput {
        nodes: store.graph.nodes.len(),
        edges: store.graph.edges.len(),
        anomalies: store.anomalies.anomalies.len(),
        storylines: store.timeline.storylines.len(),
        events: store.timeline.events.len(),
        records: store.retrieval.results.len(),
    }
}

/// Result of `fq session check`.
#[derive(Debug, Serialize)]
pub struct SessionCheckOutput {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl Output for SessionCheckOutput {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn to_human(&self) -> String {
        match &self.identity {
            Some(identity) => format!(
                "Authenticated: {} ({}, {})",
                identity.name, identity.role, identity.department
            ),
            None => "Authentication failed".to_string(),
        }
    }
}

/// Run a credential pair through the session gate.
pub fn session_check(email: &str, credential: &str) -> SessionCheckOutput {
    let mut gate = SessionGate::new();
    let authenticated = gate.challenge(email, credential);
    SessionCheckOutput {
        authenticated,
        identity: gate.current().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_blank_input() {
        let store = FixtureStore::load().unwrap();
        assert!(matches!(
            query(&store, "   "),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_query_output_renders_both_formats() {
        let store = FixtureStore::load().unwrap();
        let out = query(&store, "crypto wallets").unwrap();
        assert!(out.to_json().contains("\"citations\""));
        assert!(out.to_human().contains("Citations:"));
    }

    #[test]
    fn test_fixtures_validate_passes_on_embedded_data() {
        assert!(fixtures_validate().unwrap().valid);
    }

    #[test]
    fn test_stats_match_the_store() {
        let store = FixtureStore::load().unwrap();
        let stats = fixtures_stats(&store);
        assert_eq!(stats.nodes, store.graph.nodes.len());
        assert_eq!(stats.records, store.retrieval.results.len());
    }

    #[test]
    fn test_session_check_outcomes() {
        let ok = session_check("officer@forensiq.gov", "forensiq123");
        assert!(ok.authenticated);
        assert_eq!(ok.identity.unwrap().id, "u1");

        let bad = session_check("officer@forensiq.gov", "nope");
        assert!(!bad.authenticated);
        assert!(bad.identity.is_none());
        assert!(!bad.to_json().contains("identity"));
    }
}
