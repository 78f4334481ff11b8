//! Animation scheduler
//!
//! Owns all active springs and advances them each frame. Widgets hold a weak
//! handle to the scheduler and keep only [`SpringId`]s, so dropping a widget
//! never keeps the scheduler alive and vice versa.

use crate::spring::Spring;
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    pub struct SpringId;
}

/// The animation scheduler that ticks all active animations
pub struct AnimationScheduler {
    springs: SlotMap<SpringId, Spring>,
    last_frame: Instant,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            springs: SlotMap::with_key(),
            last_frame: Instant::now(),
        }
    }

    pub fn add_spring(&mut self, spring: Spring) -> SpringId {
        let id = self.springs.insert(spring);
        tracing::trace!(?id, active = self.springs.len(), "spring added");
        id
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
        self.springs.remove(id)
    }

    /// Tick all animations by the wall-clock time since the previous tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step_all(dt);
    }

    /// Tick all animations by a fixed `dt` (seconds), for hosts that own the clock
    pub fn tick_by(&mut self, dt: f32) {
        self.last_frame = Instant::now();
        self.step_all(dt);
    }

    fn step_all(&mut self, dt: f32) {
        for (_, spring) in self.springs.iter_mut() {
            spring.step(dt);
        }
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Get the number of springs in the scheduler
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
