//! swipekit Animation System
//!
//! Spring physics and easing for gesture-driven widgets.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Easing Curves**: CSS-style cubic curves for timed transitions
//! - **Settle Curves**: Fixed-duration transitions driven by a spring or an easing
//! - **Interruptible**: Springs keep their velocity when retargeted

pub mod curve;
pub mod easing;
pub mod scheduler;
pub mod spring;

pub use curve::SettleCurve;
pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SpringId};
pub use spring::{Spring, SpringConfig};
