//! Relationship graph surface state.

use crate::models::EntityEdge;

/// Zoom bounds and step for the graph viewport.
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 1.5;
pub const ZOOM_STEP: f64 = 0.1;

/// How an edge should be drawn given the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEmphasis {
    /// Touches the selected node
    Highlighted,
    /// A selection exists and this edge is not part of it
    Dimmed,
    /// No selection
    Normal,
}

/// State of the relationship graph surface.
///
/// Selection and zoom only ever change how fixtures are emphasized;
/// nothing is removed from the render set.
#[derive(Debug)]
pub struct RelationshipView {
    pub selected: Option<String>,
    zoom: f64,
}

impl Default for RelationshipView {
    fn default() -> Self {
        Self {
            selected: None,
            zoom: 1.0,
        }
    }
}

impl RelationshipView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle selection: selecting the already-selected node clears it.
    pub fn select_node(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    // Steps are re-quantized to the 0.1 grid so repeated in/out never
    // accumulates float drift past the clamp bounds.
    fn set_zoom(&mut self, value: f64) {
        let steps = (value * 10.0).round().clamp(ZOOM_MIN * 10.0, ZOOM_MAX * 10.0);
        self.zoom = steps / 10.0;
    }

    /// How the given edge should be emphasized.
    pub fn edge_emphasis(&self, edge: &EntityEdge) -> EdgeEmphasis {
        match self.selected.as_deref() {
            None => EdgeEmphasis::Normal,
            Some(id) if edge.touches(id) => EdgeEmphasis::Highlighted,
            Some(_) => EdgeEmphasis::Dimmed,
        }
    }

    /// Whether the node should be dimmed: a selection exists and this node
    /// is neither selected nor adjacent to the selection.
    pub fn node_dimmed(&self, node_id: &str, edges: &[EntityEdge]) -> bool {
        let Some(selected) = self.selected.as_deref() else {
            return false;
        };
        if node_id == selected {
            return false;
        }
        !edges
            .iter()
            .any(|e| e.touches(selected) && e.touches(node_id))
    }
}
