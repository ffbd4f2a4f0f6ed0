//! Timeline surface state.

/// Which rendering of the active storyline is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimelineMode {
    #[default]
    Timeline,
    Narrative,
}

/// Which side of the center line an event card hangs on. Alternates by
/// event index parity - a rendering rule, not a data invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Left,
    Right,
}

impl CardSide {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            CardSide::Left
        } else {
            CardSide::Right
        }
    }
}

/// State of the multi-hypothesis timeline surface.
#[derive(Debug)]
pub struct TimelineView {
    /// Active storyline id; defaults to the first declared storyline.
    pub storyline: String,
    pub mode: TimelineMode,

    /// At most one event card is expanded at a time.
    pub expanded_event: Option<String>,
}

impl TimelineView {
    pub fn new(default_storyline: impl Into<String>) -> Self {
        Self {
            storyline: default_storyline.into(),
            mode: TimelineMode::default(),
            expanded_event: None,
        }
    }

    /// Switch the storyline filter. Collapses any expanded card since it
    /// may not exist under the new filter.
    pub fn select_storyline(&mut self, id: &str) {
        if self.storyline != id {
            self.storyline = id.to_string();
            self.expanded_event = None;
        }
    }

    pub fn set_mode(&mut self, mode: TimelineMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            TimelineMode::Timeline => TimelineMode::Narrative,
            TimelineMode::Narrative => TimelineMode::Timeline,
        };
    }

    pub fn toggle_event(&mut self, id: &str) {
        if self.expanded_event.as_deref() == Some(id) {
            self.expanded_event = None;
        } else {
            self.expanded_event = Some(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FixtureStore;

    #[test]
    fn test_storyline_filter_returns_exactly_matching_events() {
        let store = FixtureStore::load().unwrap();
        let mut view = TimelineView::new(&store.timeline.storylines[0].id);

        view.select_storyline("storyline-b");
        let events = store.timeline.events_for(&view.storyline);
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.storyline == "storyline-b"));
    }

    #[test]
    fn test_switching_back_restores_the_original_set() {
        let store = FixtureStore::load().unwrap();
        let mut view = TimelineView::new("storyline-a");
        let before: Vec<String> = store
            .timeline
            .events_for(&view.storyline)
            .iter()
            .map(|e| e.id.clone())
            .collect();

        view.select_storyline("storyline-b");
        view.select_storyline("storyline-a");
        let after: Vec<String> = store
            .timeline
            .events_for(&view.storyline)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_switching_storyline_collapses_expanded_card() {
        let mut view = TimelineView::new("storyline-a");
        view.toggle_event("evt-a01");
        view.select_storyline("storyline-b");
        assert_eq!(view.expanded_event, None);

        // Re-selecting the current storyline is a no-op.
        view.toggle_event("evt-b01");
        view.select_storyline("storyline-b");
        assert_eq!(view.expanded_event.as_deref(), Some("evt-b01"));
    }

    #[test]
    fn test_card_sides_alternate_by_parity() {
        assert_eq!(CardSide::for_index(0), CardSide::Left);
        assert_eq!(CardSide::for_index(1), CardSide::Right);
        assert_eq!(CardSide::for_index(2), CardSide::Left);
    }

    #[test]
    fn test_mode_toggle_round_trips() {
        let mut view = TimelineView::new("storyline-a");
        assert_eq!(view.mode, TimelineMode::Timeline);
        view.toggle_mode();
        assert_eq!(view.mode, TimelineMode::Narrative);
        view.toggle_mode();
        assert_eq!(view.mode, TimelineMode::Timeline);
    }
}
