//! Swipe cell state

use serde::{Deserialize, Serialize};
use swipekit_core::fsm::{EventId, StateTransitions};

/// Events driving [`CellState`]
pub mod cell_events {
    /// The visible offset changed (drag or animation frame)
    pub const OFFSET_CHANGED: u32 = 10_000;
    /// A settle transition finished away from zero
    pub const SETTLED_OPEN: u32 = 10_001;
    /// A settle transition finished at zero
    pub const SETTLED_CLOSED: u32 = 10_002;
}

/// Reveal state of a swipeable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Content at rest covering the row; no panel attached
    #[default]
    Closed,
    /// Offset is changing under a drag or a settle animation
    Moving,
    /// Settled with the panel revealed
    Open,
}

impl StateTransitions for CellState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use cell_events::*;

        // Every state accepts every event; a cell can be yanked out of any
        // state by the next drag or by `close()`.
        match event {
            OFFSET_CHANGED => Some(CellState::Moving),
            SETTLED_OPEN => Some(CellState::Open),
            SETTLED_CLOSED => Some(CellState::Closed),
            _ => None,
        }
    }
}

impl CellState {
    /// Event that settles a transition at `target`
    pub fn settle_event(target: f32) -> EventId {
        if target.abs() > 0.0 {
            cell_events::SETTLED_OPEN
        } else {
            cell_events::SETTLED_CLOSED
        }
    }
}
