//! State change observers
//!
//! A cell reports every change of its [`CellState`] to registered callbacks.
//! Callbacks run after the new state is in place, at most once per change.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};

use crate::cell::CellId;
use crate::state::CellState;

new_key_type! {
    pub struct ObserverId;
}

/// Callback invoked with the cell and its new state
pub type StateCallback = Box<dyn FnMut(CellId, CellState)>;

/// Receives state changes from the cells it is registered with
pub trait SwipeDelegate {
    fn cell_state_changed(&mut self, cell: CellId, state: CellState);
}

/// Registered observers of one cell
#[derive(Default)]
pub struct Observers {
    callbacks: SlotMap<ObserverId, StateCallback>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn add<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(CellId, CellState) + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Register a delegate without keeping it alive.
    ///
    /// Once the delegate is dropped its registration silently does nothing.
    /// A delegate that is already borrowed when the change fires (a
    /// re-entrant call) misses that notification.
    pub fn add_weak<T>(&mut self, delegate: &Rc<RefCell<T>>) -> ObserverId
    where
        T: SwipeDelegate + 'static,
    {
        let delegate: Weak<RefCell<T>> = Rc::downgrade(delegate);
        self.add(move |cell, state| {
            let Some(delegate) = delegate.upgrade() else {
                return;
            };
            match delegate.try_borrow_mut() {
                Ok(mut delegate) => delegate.cell_state_changed(cell, state),
                Err(_) => tracing::warn!(?cell, ?state, "delegate busy, state change dropped"),
            };
        })
    }

    /// Unregister a callback. Returns false if it was already gone.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Deliver a state change to every callback
    pub fn notify(&mut self, cell: CellId, state: CellState) {
        for callback in self.callbacks.values_mut() {
            callback(cell, state);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
