//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Springs are
//! interruptible: retargeting keeps the current velocity, so a gesture that
//! catches a moving surface continues smoothly.

use serde::{Deserialize, Serialize};

/// Largest integration step; bigger frame deltas are subdivided
const MAX_STEP: f32 = 1.0 / 240.0;

/// Displacement below which a spring may be considered at rest
const REST_DISPLACEMENT: f32 = 0.01;

/// Speed below which a spring may be considered at rest
const REST_VELOCITY: f32 = 0.01;

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Fast, barely any overshoot
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Quick with a small bounce
    pub const fn snappy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }

    /// Slow and soft
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible oscillation
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Unit-mass spring with the given damping ratio and natural angular
    /// frequency (radians per second). A ratio of 1.0 is critically damped.
    pub fn from_damping_ratio(damping_ratio: f32, angular_frequency: f32) -> Self {
        let mass = 1.0;
        Self {
            stiffness: angular_frequency * angular_frequency * mass,
            damping: 2.0 * damping_ratio * angular_frequency * mass,
            mass,
        }
    }

    /// Natural angular frequency ω₀ = √(k/m)
    pub fn angular_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio ζ = c / (2√(km))
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A single animated value pulled toward a target
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `value`
    pub fn new(config: SpringConfig, value: f32) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget, keeping the current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Jump to `value` and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Whether the spring is at rest on its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISPLACEMENT && self.velocity.abs() < REST_VELOCITY
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.is_settled() {
            return;
        }

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (x - self.target) - damping * v) / mass
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let (k1x, k1v) = (v, self.acceleration(x, v));
        let (x2, v2) = (x + 0.5 * h * k1x, v + 0.5 * h * k1v);
        let (k2x, k2v) = (v2, self.acceleration(x2, v2));
        let (x3, v3) = (x + 0.5 * h * k2x, v + 0.5 * h * k2v);
        let (k3x, k3v) = (v3, self.acceleration(x3, v3));
        let (x4, v4) = (x + h * k3x, v + h * k3v);
        let (k4x, k4v) = (v4, self.acceleration(x4, v4));

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_reaches_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);
        assert!(!spring.is_settled());

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_critically_damped_does_not_overshoot() {
        let config = SpringConfig::from_damping_ratio(1.0, 30.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-4);
        assert!((config.angular_frequency() - 30.0).abs() < 1e-3);

        let mut spring = Spring::new(config, -80.0);
        spring.set_target(0.0);
        for _ in 0..60 {
            spring.step(1.0 / 120.0);
            assert!(spring.value() <= 1e-3, "overshot to {}", spring.value());
        }
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::snappy(), 0.0);
        spring.set_target(100.0);
        for _ in 0..5 {
            spring.step(1.0 / 60.0);
        }
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(-100.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_large_dt_is_stable() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(50.0);
        spring.step(2.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_snap_to() {
        let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
        spring.set_target(10.0);
        spring.step(0.05);
        spring.snap_to(3.0);
        assert!(spring.is_settled());
        assert_eq!(spring.target(), 3.0);
        assert_eq!(spring.velocity(), 0.0);
    }
}
