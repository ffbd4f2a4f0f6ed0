//! Terminal User Interface module for Forensiq.
//!
//! Provides a keyboard-driven dashboard over the fixture data: a login
//! screen, the home/upload surface, and the four analysis surfaces
//! (chat, relationship graph, timeline, anomalies). Everything runs on a
//! single cooperative event loop; the simulated pipelines are driven by
//! deadline checks inside that loop.

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
mod theme;
#[cfg(feature = "tui")]
mod views;

#[cfg(feature = "tui")]
pub use app::run_tui;
