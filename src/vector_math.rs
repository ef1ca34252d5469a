//! Small vector helpers shared by the foothold queries and the integrator.
use glam::Vec2;

use crate::DEGENERATE_EPSILON;

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
///
/// # Examples
/// ```
/// use footing::vector_math::move_toward;
/// assert_eq!(move_toward(0.0, 1.0, 0.25), 0.25);
/// assert_eq!(move_toward(0.9, 1.0, 0.25), 1.0);
/// assert_eq!(move_toward(-0.1, 0.0, 0.25), 0.0);
/// ```
#[must_use]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else if current > target {
        (current - max_delta).max(target)
    } else {
        current
    }
}

/// Returns the point on segment `a`-`b` closest to `point`.
///
/// Degenerate segments collapse to `a`.
///
/// # Examples
/// ```
/// use footing::vector_math::closest_point_on_segment;
/// use glam::Vec2;
/// let p = closest_point_on_segment(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(4.0, 3.0));
/// assert_eq!(p, Vec2::new(4.0, 0.0));
/// let clamped = closest_point_on_segment(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(-5.0, 1.0));
/// assert_eq!(clamped, Vec2::ZERO);
/// ```
#[must_use]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, point: Vec2) -> Vec2 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < DEGENERATE_EPSILON * DEGENERATE_EPSILON {
        return a;
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Blends two positions for rendering between physics steps.
///
/// `alpha` is clamped to `[0, 1]`; non-finite factors yield `current`.
#[must_use]
pub fn interpolate(previous: Vec2, current: Vec2, alpha: f32) -> Vec2 {
    if !alpha.is_finite() {
        return current;
    }
    previous.lerp(current, alpha.clamp(0.0, 1.0))
}
