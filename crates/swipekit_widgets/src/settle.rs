//! Settle resolver
//!
//! Decides where a released drag comes to rest: fully open at `-width` or
//! fully closed at `0`. A fast fling decides by direction alone; otherwise
//! the drag must have uncovered more than a threshold share of the panel.

/// Default divisor applied to the release velocity
pub const DEFAULT_VELOCITY_SCALE: f32 = 3.0;

/// Default share of the panel width that must be uncovered to open
pub const DEFAULT_OPEN_THRESHOLD: f32 = 0.5;

/// Settle policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettlePolicy {
    pub velocity_scale: f32,
    pub open_threshold: f32,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            velocity_scale: DEFAULT_VELOCITY_SCALE,
            open_threshold: DEFAULT_OPEN_THRESHOLD,
        }
    }
}

impl SettlePolicy {
    /// Resolve the resting offset for a release at `candidate` moving at
    /// `velocity`. Always returns `0.0` or `-width`.
    pub fn resolve(&self, candidate: f32, width: f32, velocity: f32) -> f32 {
        if width <= 0.0 {
            return 0.0;
        }

        let scaled = velocity / self.velocity_scale;
        if scaled.abs() > width {
            return if velocity < 0.0 { -width } else { 0.0 };
        }

        if candidate.abs() > width * self.open_threshold {
            -width
        } else {
            0.0
        }
    }
}

/// [`SettlePolicy::resolve`] with the default policy
pub fn resolve(candidate: f32, width: f32, velocity: f32) -> f32 {
    SettlePolicy::default().resolve(candidate, width, velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_decides_slow_release() {
        assert_eq!(resolve(-50.0, 80.0, 0.0), -80.0);
        assert_eq!(resolve(-10.0, 80.0, 0.0), 0.0);
        // Exactly half does not open
        assert_eq!(resolve(-40.0, 80.0, 0.0), 0.0);
    }

    #[test]
    fn test_fling_decides_by_direction() {
        // -300 / 3 = -100, beyond the 80 width
        assert_eq!(resolve(-10.0, 80.0, -300.0), -80.0);
        assert_eq!(resolve(-70.0, 80.0, 300.0), 0.0);
        // -210 / 3 = -70, not a fling; position decides
        assert_eq!(resolve(-10.0, 80.0, -210.0), 0.0);
    }

    #[test]
    fn test_zero_width_always_closes() {
        assert_eq!(resolve(-50.0, 0.0, -1000.0), 0.0);
        assert_eq!(resolve(0.0, -5.0, 0.0), 0.0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = SettlePolicy {
            velocity_scale: 10.0,
            open_threshold: 0.25,
        };
        assert_eq!(policy.resolve(-25.0, 80.0, 0.0), -80.0);
        assert_eq!(policy.resolve(-10.0, 80.0, -300.0), 0.0);
    }

    #[test]
    fn test_result_is_open_or_closed() {
        for candidate in [-200.0, -80.0, -41.0, -39.0, 0.0] {
            for velocity in [-1000.0, -100.0, 0.0, 100.0, 1000.0] {
                let target = resolve(candidate, 80.0, velocity);
                assert!(target == 0.0 || target == -80.0);
            }
        }
    }
}
