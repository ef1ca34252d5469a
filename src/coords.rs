//! Conversion between world space and game space.
//!
//! Footholds are authored in game units (pixels) with Y growing downward.
//! Bodies live in world units with Y growing upward. One world unit spans
//! [`PIXELS_PER_UNIT`] game units.

use glam::Vec2;

use crate::PIXELS_PER_UNIT;

/// Converts a world-space X coordinate to game units.
#[must_use]
pub fn x_to_game(x: f32) -> f32 {
    x * PIXELS_PER_UNIT
}

/// Converts a world-space Y coordinate to game units.
#[must_use]
pub fn y_to_game(y: f32) -> f32 {
    -y * PIXELS_PER_UNIT
}

/// Converts a game-space X coordinate to world units.
#[must_use]
pub fn x_to_world(x: f32) -> f32 {
    x / PIXELS_PER_UNIT
}

/// Converts a game-space Y coordinate to world units.
#[must_use]
pub fn y_to_world(y: f32) -> f32 {
    -y / PIXELS_PER_UNIT
}

/// Converts a world-space point to game units.
///
/// # Examples
/// ```
/// use footing::coords::{to_game, to_world};
/// use glam::Vec2;
/// let game = to_game(Vec2::new(1.5, 2.0));
/// assert_eq!(game, Vec2::new(150.0, -200.0));
/// assert_eq!(to_world(game), Vec2::new(1.5, 2.0));
/// ```
#[must_use]
pub fn to_game(point: Vec2) -> Vec2 {
    Vec2::new(x_to_game(point.x), y_to_game(point.y))
}

/// Converts a game-space point to world units.
#[must_use]
pub fn to_world(point: Vec2) -> Vec2 {
    Vec2::new(x_to_world(point.x), y_to_world(point.y))
}

/// Converts a game-space distance (always positive) to world units.
#[must_use]
pub fn distance_to_world(distance: f32) -> f32 {
    distance / PIXELS_PER_UNIT
}
