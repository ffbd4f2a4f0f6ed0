//! Forensiq - a terminal dashboard over mock device-forensics results.
//!
//! This library provides the core functionality for the `fq` CLI tool:
//! the embedded fixture store, the session gate, the simulated ingestion
//! pipeline, the retrieval responder, and the per-surface view state.

pub mod cli;
pub mod commands;
pub mod config;
pub mod fixtures;
pub mod ingest;
pub mod models;
pub mod responder;
pub mod routes;
pub mod session;
pub mod tui;
pub mod views;

/// Library-level error type for Forensiq operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Edge references unknown entity: {0}")]
    DanglingEdge(String),

    #[error("Event references unknown storyline: {0}")]
    UnknownStoryline(String),

    #[error("Storyline has no narrative: {0}")]
    MissingNarrative(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Forensiq operations.
pub type Result<T> = std::result::Result<T, Error>;
