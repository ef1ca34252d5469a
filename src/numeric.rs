//! Numeric guards used across the crate.
//!
//! Upstream bugs can hand the simulation `NaN` or infinite values. These
//! helpers keep such values out of persistent state so a single bad tick does
//! not poison every later one.

use glam::Vec2;

/// Returns `value` when it is finite, otherwise `fallback`.
///
/// # Examples
/// ```
/// use footing::numeric::finite_or;
/// assert_eq!(finite_or(2.5, 0.0), 2.5);
/// assert_eq!(finite_or(f32::NAN, 0.0), 0.0);
/// assert_eq!(finite_or(f32::INFINITY, 1.0), 1.0);
/// ```
#[must_use]
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Returns `value` when both components are finite, otherwise `fallback`.
#[must_use]
pub fn finite_vec_or(value: Vec2, fallback: Vec2) -> Vec2 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Converts a stat percentage into a linear scale factor.
///
/// # Examples
/// ```
/// use footing::numeric::percent_scale;
/// assert!((percent_scale(140) - 1.4).abs() < 1e-6);
/// assert_eq!(percent_scale(0), 0.0);
/// ```
#[must_use]
pub fn percent_scale(percent: u16) -> f32 {
    f32::from(percent) / 100.0
}

/// Sanitises a frame delta: non-finite or negative values become zero.
#[must_use]
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.25, 0.25)]
    #[case(-1.0, 0.0)]
    #[case(f32::NAN, 0.0)]
    #[case(f32::NEG_INFINITY, 0.0)]
    #[case(0.0, 0.0)]
    fn delta_sanitising(#[case] input: f32, #[case] expected: f32) {
        assert_eq!(sanitize_delta(input), expected);
    }

    #[rstest]
    fn non_finite_vectors_fall_back() {
        let fallback = Vec2::new(1.0, 2.0);
        assert_eq!(finite_vec_or(Vec2::new(f32::NAN, 0.0), fallback), fallback);
        assert_eq!(
            finite_vec_or(Vec2::new(0.0, f32::INFINITY), fallback),
            fallback
        );
        assert_eq!(finite_vec_or(Vec2::new(3.0, 4.0), fallback), Vec2::new(3.0, 4.0));
    }
}
