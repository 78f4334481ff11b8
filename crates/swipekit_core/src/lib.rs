//! swipekit Core Runtime
//!
//! Foundational primitives shared by the swipekit widgets:
//!
//! - **Pointer Events**: Platform-neutral pointer input
//! - **State Machines**: Typed state enums driven by event ids
//! - **Drag Gestures**: Raw pointer input turned into phase-tagged drag samples
//!
//! # Example
//!
//! ```rust
//! use swipekit_core::events::{event_types, Event};
//! use swipekit_core::gesture::{DragTracker, GesturePhase};
//!
//! let mut tracker = DragTracker::default();
//!
//! tracker.handle_event(&mut Event::pointer(event_types::POINTER_DOWN, 200.0, 20.0, 0));
//! let samples = tracker.handle_event(&mut Event::pointer(event_types::POINTER_MOVE, 180.0, 21.0, 16));
//!
//! assert_eq!(samples[0].phase, GesturePhase::Begin);
//! assert_eq!(samples[1].phase, GesturePhase::Change);
//! assert_eq!(samples[1].translation, -20.0);
//! ```

pub mod events;
pub mod fsm;
pub mod gesture;

pub use events::{Event, EventData, EventType};
pub use fsm::{EventId, StateMachine, StateTransitions, Transition};
pub use gesture::{should_begin, DragConfig, DragTracker, GesturePhase, GestureSample};
