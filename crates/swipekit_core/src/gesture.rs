//! Horizontal drag gesture tracking
//!
//! [`DragTracker`] turns a raw pointer stream into [`GestureSample`]s: one
//! `Begin`, any number of `Change`s carrying the horizontal translation since
//! the previous sample, and a terminal `End` or `Cancel`.
//!
//! The tracker only claims gestures whose dominant axis is horizontal, so a
//! vertical drag stays with the host list for scrolling.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::events::{event_types, Event};

/// Phase of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Begin,
    Change,
    End,
    Cancel,
}

impl GesturePhase {
    /// End and Cancel both terminate the gesture
    pub fn is_terminal(&self) -> bool {
        matches!(self, GesturePhase::End | GesturePhase::Cancel)
    }
}

/// One update of a horizontal drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureSample {
    pub phase: GesturePhase,
    /// Horizontal translation since the previous sample (pixels)
    pub translation: f32,
    /// Horizontal velocity (pixels per second)
    pub velocity: f32,
}

impl GestureSample {
    pub fn begin() -> Self {
        Self {
            phase: GesturePhase::Begin,
            translation: 0.0,
            velocity: 0.0,
        }
    }

    pub fn change(translation: f32) -> Self {
        Self {
            phase: GesturePhase::Change,
            translation,
            velocity: 0.0,
        }
    }

    pub fn end(translation: f32, velocity: f32) -> Self {
        Self {
            phase: GesturePhase::End,
            translation,
            velocity,
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: GesturePhase::Cancel,
            translation: 0.0,
            velocity: 0.0,
        }
    }

    /// Builder: set velocity
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Gesture arbitration: a horizontal swipe only claims the pointer when the
/// horizontal travel strictly dominates the vertical travel.
pub fn should_begin(translation_x: f32, translation_y: f32) -> bool {
    translation_x.abs() > translation_y.abs()
}

/// Configuration for drag tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Distance the pointer must travel before the axis is decided (pixels)
    pub slop: f32,
    /// Exponential moving average factor for velocity (0.0-1.0)
    pub velocity_smoothing: f32,
    /// Gap after which the pointer counts as stationary (milliseconds)
    pub stale_after_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            slop: 4.0,
            velocity_smoothing: 0.3,
            stale_after_ms: 500,
        }
    }
}

/// Tracker phase
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackPhase {
    /// No pointer down
    Idle,
    /// Pointer down, axis not decided yet
    Armed { origin_x: f32, origin_y: f32 },
    /// Horizontal drag claimed
    Tracking,
    /// Vertical drag, ignored until the next pointer down
    Rejected,
}

/// Samples produced by a single pointer event (at most Begin + Change)
pub type Samples = SmallVec<[GestureSample; 2]>;

/// Converts pointer events into horizontal drag samples
#[derive(Debug, Clone)]
pub struct DragTracker {
    config: DragConfig,
    phase: TrackPhase,
    last_x: f32,
    last_time: Option<u64>,
    velocity: f32,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl DragTracker {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            phase: TrackPhase::Idle,
            last_x: 0.0,
            last_time: None,
            velocity: 0.0,
        }
    }

    /// Whether a horizontal drag is currently claimed
    pub fn is_tracking(&self) -> bool {
        self.phase == TrackPhase::Tracking
    }

    /// Current smoothed velocity (pixels per second)
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Feed a pointer event.
    ///
    /// Events belonging to a claimed drag have their propagation stopped so
    /// the host does not also scroll.
    pub fn handle_event(&mut self, event: &mut Event) -> Samples {
        let mut samples = Samples::new();
        let Some((x, y)) = event.position() else {
            if event.event_type == event_types::POINTER_CANCEL {
                self.cancel(&mut samples);
            }
            return samples;
        };

        match event.event_type {
            event_types::POINTER_DOWN => {
                // A down without an up for the drag in flight: the up was lost
                if self.phase == TrackPhase::Tracking {
                    tracing::debug!("pointer down while tracking, cancelling drag");
                    samples.push(GestureSample::cancel());
                }
                self.phase = TrackPhase::Armed {
                    origin_x: x,
                    origin_y: y,
                };
                self.last_x = x;
                self.last_time = Some(event.timestamp);
                self.velocity = 0.0;
            }
            event_types::POINTER_MOVE | event_types::DRAG => match self.phase {
                TrackPhase::Armed { origin_x, origin_y } => {
                    let dx = x - origin_x;
                    let dy = y - origin_y;
                    if dx.hypot(dy) < self.config.slop {
                        return samples;
                    }
                    if !should_begin(dx, dy) {
                        tracing::trace!(dx, dy, "drag rejected: vertical axis dominates");
                        self.phase = TrackPhase::Rejected;
                        return samples;
                    }

                    self.phase = TrackPhase::Tracking;
                    self.track_velocity(dx, event.timestamp);
                    self.last_x = x;
                    samples.push(GestureSample::begin());
                    samples.push(GestureSample::change(dx).with_velocity(self.velocity));
                    event.stop_propagation();
                }
                TrackPhase::Tracking => {
                    let delta = x - self.last_x;
                    self.track_velocity(delta, event.timestamp);
                    self.last_x = x;
                    samples.push(GestureSample::change(delta).with_velocity(self.velocity));
                    event.stop_propagation();
                }
                TrackPhase::Idle | TrackPhase::Rejected => {}
            },
            event_types::POINTER_UP | event_types::DRAG_END => {
                if self.phase == TrackPhase::Tracking {
                    let delta = x - self.last_x;
                    self.track_velocity(delta, event.timestamp);
                    samples.push(GestureSample::end(delta, self.velocity));
                    event.stop_propagation();
                }
                self.reset();
            }
            event_types::POINTER_CANCEL => self.cancel(&mut samples),
            _ => {}
        }

        samples
    }

    fn cancel(&mut self, samples: &mut Samples) {
        if self.phase == TrackPhase::Tracking {
            samples.push(GestureSample::cancel());
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = TrackPhase::Idle;
        self.last_time = None;
    }

    /// Update the smoothed velocity from a delta observed at `timestamp`
    fn track_velocity(&mut self, delta: f32, timestamp: u64) {
        match self.last_time {
            Some(last_time) => {
                let dt_ms = timestamp.saturating_sub(last_time);
                if dt_ms >= self.config.stale_after_ms {
                    // Pointer rested; whatever it does now starts from rest
                    self.velocity = 0.0;
                } else if dt_ms > 0 {
                    let alpha = self.config.velocity_smoothing;
                    let instant = delta / (dt_ms as f32 / 1000.0);
                    self.velocity = self.velocity * (1.0 - alpha) + instant * alpha;
                }
            }
            None => {
                // Assume a 16ms frame when there is no previous timestamp
                self.velocity = delta * 60.0;
            }
        }
        self.last_time = Some(timestamp);
    }
}
