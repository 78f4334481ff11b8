//! Easing functions for timed transitions

use serde::{Deserialize, Serialize};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInOutQuad,
    EaseOutCubic,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The standard platform ease-in-out curve
    pub const STANDARD: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut | Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(3) / 2.0
                }
            }
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// CSS-style cubic bezier with endpoints (0,0) and (1,1).
///
/// Solves x(p) = t for the curve parameter by Newton iteration, then bisection
/// if the slope flattens out, and returns y(p).
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut p = target;
    let mut solved = false;
    for _ in 0..8 {
        let err = bezier_axis(p, x1, x2) - target;
        if err.abs() < 1e-7 {
            solved = true;
            break;
        }
        let slope = bezier_axis_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = target;
        for _ in 0..30 {
            let x = bezier_axis(p, x1, x2);
            if (x - target).abs() < 1e-7 {
                break;
            }
            if x < target {
                lo = p;
            } else {
                hi = p;
            }
            p = 0.5 * (lo + hi);
        }
    }

    bezier_axis(p, y1, y2) as f32
}

/// One axis of the curve: 3(1-p)²p·c1 + 3(1-p)p²·c2 + p³
#[inline]
fn bezier_axis(p: f64, c1: f64, c2: f64) -> f64 {
    let q = 1.0 - p;
    3.0 * q * q * p * c1 + 3.0 * q * p * p * c2 + p * p * p
}

#[inline]
fn bezier_axis_slope(p: f64, c1: f64, c2: f64) -> f64 {
    let q = 1.0 - p;
    3.0 * q * q * c1 + 6.0 * q * p * (c2 - c1) + 3.0 * p * p * (1.0 - c2)
}
