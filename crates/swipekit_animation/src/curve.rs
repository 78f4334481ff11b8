//! Fixed-duration settle curves
//!
//! A settle moves a value from where a gesture left it to a resting target
//! within a fixed duration. The motion either follows a damped spring whose
//! frequency is derived from the duration, or a plain easing curve.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

/// ω·T for the derived spring. A critically damped spring has decayed to about
/// 0.1% of its travel after this many radians.
const SETTLE_OMEGA_T: f32 = 9.0;

/// Shape of a settle transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettleCurve {
    /// Spring response. `initial_velocity` is expressed in whole travel
    /// distances per second: 3.0 on a 80px settle starts at 240px/s.
    Spring {
        damping_ratio: f32,
        initial_velocity: f32,
    },
    /// Timed easing
    Eased { easing: Easing },
}

impl Default for SettleCurve {
    fn default() -> Self {
        SettleCurve::Spring {
            damping_ratio: 1.0,
            initial_velocity: 3.0,
        }
    }
}

impl SettleCurve {
    /// Spring parameters that bring a settle of `duration` seconds to rest by
    /// its end. `None` for eased curves.
    pub fn spring_config(&self, duration: f32) -> Option<SpringConfig> {
        match *self {
            SettleCurve::Spring { damping_ratio, .. } => {
                let omega = SETTLE_OMEGA_T / duration.max(f32::EPSILON);
                Some(SpringConfig::from_damping_ratio(damping_ratio, omega))
            }
            SettleCurve::Eased { .. } => None,
        }
    }

    /// Build the spring that carries a settle from `from` to `to`
    pub fn spring(&self, from: f32, to: f32, duration: f32) -> Option<Spring> {
        let config = self.spring_config(duration)?;
        let SettleCurve::Spring {
            initial_velocity, ..
        } = *self
        else {
            return None;
        };

        let mut spring = Spring::new(config, from);
        spring.set_target(to);
        spring.set_velocity(initial_velocity * (to - from));
        Some(spring)
    }

    /// Value of an eased settle at normalized time `t`. `None` for spring curves.
    pub fn eased_value(&self, from: f32, to: f32, t: f32) -> Option<f32> {
        match self {
            SettleCurve::Eased { easing } => Some(from + (to - from) * easing.apply(t)),
            SettleCurve::Spring { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spring_settles_within_duration() {
        let curve = SettleCurve::default();
        let duration = 0.3;
        let Some(mut spring) = curve.spring(-50.0, -80.0, duration) else {
            panic!("default curve should be a spring");
        };

        // Starts moving toward the target at 3 travel distances per second
        assert_eq!(spring.velocity(), -90.0);

        let frames = (duration * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
        assert!((spring.value() + 80.0).abs() < 0.5, "got {}", spring.value());
    }

    #[test]
    fn test_spring_config_tracks_duration() {
        let curve = SettleCurve::default();
        let fast = curve.spring_config(0.15).map(|c| c.angular_frequency());
        let slow = curve.spring_config(0.6).map(|c| c.angular_frequency());
        assert!(fast > slow);
    }

    #[test]
    fn test_eased_curve() {
        let curve = SettleCurve::Eased {
            easing: Easing::Linear,
        };
        assert!(curve.spring(0.0, -80.0, 0.3).is_none());
        assert_eq!(curve.eased_value(0.0, -80.0, 0.25), Some(-20.0));
        assert_eq!(curve.eased_value(0.0, -80.0, 1.0), Some(-80.0));
        assert_eq!(SettleCurve::default().eased_value(0.0, -80.0, 0.5), None);
    }
}
