//! Chat surface state.

use std::time::Duration;

use crate::models::{ChatTurn, RetrievalRecord};

/// Bounds of the simulated thinking delay before a reply is delivered.
/// Purely a UX simulation; the driver draws the actual value.
pub const THINKING_DELAY_MIN: Duration = Duration::from_millis(1500);
pub const THINKING_DELAY_MAX: Duration = Duration::from_millis(2500);

/// State of the investigative chat surface.
///
/// The turn sequence is append-only; turns are never edited after
/// creation. At most one assistant reply is pending at a time.
#[derive(Debug, Default)]
pub struct ChatView {
    turns: Vec<ChatTurn>,

    /// True between a submitted query and its delivered reply.
    pub thinking: bool,

    /// At most one citation is expanded at a time.
    pub expanded_citation: Option<String>,

    /// Text being edited in the input line.
    pub input: String,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Submit free-text input.
    ///
    /// A blank/whitespace-only query, or a submit while a reply is
    /// pending, changes nothing and returns `None`. Otherwise the user
    /// turn is appended, the surface enters thinking state, and the
    /// trimmed query is returned for the driver to answer after its
    /// simulated delay.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.thinking {
            return None;
        }
        self.turns.push(ChatTurn::user(trimmed));
        self.thinking = true;
        Some(trimmed.to_string())
    }

    /// Append a delivered assistant reply and leave thinking state.
    pub fn deliver(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        self.thinking = false;
    }

    /// Drop a pending reply without delivering it. Called when the surface
    /// is being torn down so a stale delivery never lands on it.
    pub fn cancel_pending(&mut self) {
        self.thinking = false;
    }

    /// Expand the citation, or collapse it if it is already expanded.
    pub fn toggle_citation(&mut self, id: &str) {
        if self.expanded_citation.as_deref() == Some(id) {
            self.expanded_citation = None;
        } else {
            self.expanded_citation = Some(id.to_string());
        }
    }

    /// Whether the given citation is the expanded one.
    pub fn citation_expanded(&self, cite: &RetrievalRecord) -> bool {
        self.expanded_citation.as_deref() == Some(cite.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;
    use crate::responder;

    #[test]
    fn test_blank_submit_leaves_the_sequence_unchanged() {
        let mut view = ChatView::new();
        assert_eq!(view.submit(""), None);
        assert_eq!(view.submit("   "), None);
        assert_eq!(view.submit("\t\n"), None);
        assert!(view.turns().is_empty());
        assert!(!view.thinking);
    }

    #[test]
    fn test_submit_appends_user_turn_and_enters_thinking() {
        let mut view = ChatView::new();
        let query = view.submit("  find crypto wallets  ").unwrap();
        assert_eq!(query, "find crypto wallets");
        assert_eq!(view.turns().len(), 1);
        assert_eq!(view.turns()[0].role, ChatRole::User);
        assert_eq!(view.turns()[0].content, "find crypto wallets");
        assert!(view.thinking);
    }

    #[test]
    fn test_submit_while_thinking_is_rejected() {
        let mut view = ChatView::new();
        view.submit("first").unwrap();
        assert_eq!(view.submit("second"), None);
        assert_eq!(view.turns().len(), 1);
    }

    #[test]
    fn test_deliver_appends_reply_and_clears_thinking() {
        let records = crate::fixtures::FixtureStore::load().unwrap().retrieval.results;
        let mut view = ChatView::new();
        let query = view.submit("hawala references").unwrap();
        view.deliver(responder::respond(&records, &query));
        assert_eq!(view.turns().len(), 2);
        assert_eq!(view.turns()[1].role, ChatRole::Assistant);
        assert!(!view.thinking);

        // Submits work again after delivery.
        assert!(view.submit("follow-up").is_some());
    }

    #[test]
    fn test_cancel_pending_unblocks_the_surface() {
        let mut view = ChatView::new();
        view.submit("query").unwrap();
        view.cancel_pending();
        assert!(!view.thinking);
        assert_eq!(view.turns().len(), 1);
    }

    #[test]
    fn test_citation_expansion_toggles_and_is_exclusive() {
        let mut view = ChatView::new();
        view.toggle_citation("rec-001");
        assert_eq!(view.expanded_citation.as_deref(), Some("rec-001"));
        view.toggle_citation("rec-002");
        assert_eq!(view.expanded_citation.as_deref(), Some("rec-002"));
        view.toggle_citation("rec-002");
        assert_eq!(view.expanded_citation, None);
    }
}
