//! swipekit Widget Library
//!
//! The swipe-to-reveal list cell with FSM-driven state and spring settling.
//!
//! # Example
//!
//! ```rust
//! use swipekit_core::GestureSample;
//! use swipekit_widgets::prelude::*;
//!
//! #[derive(Default)]
//! struct Row {
//!     offset: f32,
//! }
//!
//! impl CellHost for Row {
//!     fn attach_panel(&mut self) {}
//!     fn detach_panel(&mut self) {}
//!     fn set_offset(&mut self, offset: f32) {
//!         self.offset = offset;
//!     }
//! }
//!
//! let panel = ActionPanel::new(44.0)
//!     .action(PanelAction::new("bookmark", 30.0))
//!     .action(PanelAction::new("heart", 30.0));
//! let mut cell = SwipeableCell::new(CellId::default(), Row::default(), SwipeConfig::default())
//!     .with_panel(panel);
//!
//! cell.handle_gesture(GestureSample::begin());
//! cell.handle_gesture(GestureSample::change(-60.0));
//! cell.handle_gesture(GestureSample::end(0.0, 0.0));
//!
//! // No scheduler attached, so the settle lands immediately
//! assert_eq!(cell.state(), CellState::Open);
//! assert_eq!(cell.host().offset, -90.0);
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod host;
pub mod observer;
pub mod offset;
pub mod panel;
pub mod settle;
pub mod state;

pub use cell::{CellId, SwipeableCell};
pub use config::SwipeConfig;
pub use error::ConfigError;
pub use host::CellHost;
pub use observer::{ObserverId, SwipeDelegate};
pub use panel::{ActionPanel, Emphasis, PanelAction, PanelGeometry, PanelView};
pub use settle::SettlePolicy;
pub use state::CellState;

/// Common imports for hosting swipeable cells
pub mod prelude {
    pub use crate::cell::{CellId, SwipeableCell};
    pub use crate::config::SwipeConfig;
    pub use crate::host::CellHost;
    pub use crate::observer::SwipeDelegate;
    pub use crate::panel::{ActionPanel, Emphasis, PanelAction, PanelView};
    pub use crate::state::CellState;
}
