//! State Machine Runtime
//!
//! Flat state machines over user-defined state enums. The state type maps
//! `(state, event)` pairs to the next state through [`StateTransitions`];
//! [`StateMachine`] holds the current value, reports real changes, and keeps a
//! bounded transition history for debugging.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Maximum number of transitions kept in the history ring
const HISTORY_LIMIT: usize = 64;

/// Trait for user-defined state types that can handle event transitions
///
/// # Example
///
/// ```
/// use swipekit_core::fsm::{EventId, StateTransitions};
///
/// const POINTER_ENTER: EventId = 1;
/// const POINTER_LEAVE: EventId = 2;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum HoverState {
///     #[default]
///     Idle,
///     Hovered,
/// }
///
/// impl StateTransitions for HoverState {
///     fn on_event(&self, event: EventId) -> Option<Self> {
///         match (self, event) {
///             (HoverState::Idle, POINTER_ENTER) => Some(HoverState::Hovered),
///             (HoverState::Hovered, POINTER_LEAVE) => Some(HoverState::Idle),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A recorded state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub from: S,
    pub event: EventId,
    pub to: S,
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state changes (for debugging)
    history: VecDeque<Transition<S>>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event would change the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current_state
            .on_event(event)
            .is_some_and(|next| next != self.current_state)
    }

    /// Send an event to the state machine.
    ///
    /// Returns the transition when the state value actually changed. Events
    /// with no mapping, or mapping back onto the current state, return `None`
    /// and leave no history entry.
    pub fn send(&mut self, event: EventId) -> Option<Transition<S>> {
        let current = self.current_state;
        let next = current.on_event(event)?;
        if next == current {
            return None;
        }

        self.current_state = next;

        let transition = Transition {
            from: current,
            event,
            to: next,
        };
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(transition);

        tracing::trace!(?current, ?next, event, "fsm transition");
        Some(transition)
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition<S>> {
        self.history.iter()
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
