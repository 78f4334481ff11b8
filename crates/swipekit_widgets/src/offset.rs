//! Horizontal offset model
//!
//! Maps a drag delta onto the content offset. Offsets are never positive: the
//! content only slides toward the leading edge to uncover the trailing panel.
//! Once the panel is fully revealed further travel meets growing resistance
//! instead of a hard stop.

/// Default resistance divisor once the reveal exceeds the panel width
pub const DEFAULT_RESISTANCE: f32 = 1.8;

/// Apply a horizontal drag `delta` to the `current` offset.
///
/// Within the panel width the delta applies directly and the result is
/// clamped to 0 at the closed edge. Past the panel width the delta is damped
/// by `width / |current|` and divided by `resistance`, so the further the
/// overscroll the stiffer it gets. A zero-width panel therefore cannot be
/// dragged past its resting position.
///
/// The result is never positive, even for a single huge closing delta.
pub fn apply(current: f32, delta: f32, width: f32, resistance: f32) -> f32 {
    if current.abs() > width {
        let damping = width / current.abs();
        (damping / resistance * delta + current).min(0.0)
    } else {
        (current + delta).min(0.0)
    }
}
