//! Per-surface view state.
//!
//! Each dashboard surface owns a small state struct with its mutators and
//! derived rendering facts. Nothing in here draws anything or owns a
//! timer - the TUI layer renders these and drives the time-based pieces,
//! which keeps every controller unit-testable.

mod anomalies;
mod chat;
mod home;
mod relationships;
mod timeline;

pub use anomalies::{AnomalyView, CategoryFilter};
pub use chat::{ChatView, THINKING_DELAY_MAX, THINKING_DELAY_MIN};
pub use home::{CaseRecord, CaseStatus, HomeView, PAST_CASES};
pub use relationships::{EdgeEmphasis, RelationshipView};
pub use timeline::{CardSide, TimelineMode, TimelineView};
