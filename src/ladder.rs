//! Climbable ladders and ropes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::LADDER_GRAB_TOLERANCE;

/// A vertical climbable segment in world units (Y up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    /// Horizontal position of the rungs.
    pub x: f32,
    /// Lowest reachable Y.
    pub bottom: f32,
    /// Highest reachable Y.
    pub top: f32,
    /// Ropes use a different climbing animation.
    #[serde(default)]
    pub rope: bool,
}

impl Ladder {
    /// Creates a ladder, ordering the ends if needed.
    #[must_use]
    pub fn new(x: f32, bottom: f32, top: f32) -> Self {
        Self {
            x,
            bottom: bottom.min(top),
            top: bottom.max(top),
            rope: false,
        }
    }

    /// Flags the ladder as a rope.
    #[must_use]
    pub const fn rope(mut self, rope: bool) -> Self {
        self.rope = rope;
        self
    }

    /// Whether `position` is close enough to grab.
    ///
    /// # Examples
    /// ```
    /// use footing::ladder::Ladder;
    /// use glam::Vec2;
    /// let ladder = Ladder::new(2.0, 0.0, 3.0);
    /// assert!(ladder.contains(Vec2::new(2.05, 1.0)));
    /// assert!(!ladder.contains(Vec2::new(2.5, 1.0)));
    /// assert!(!ladder.contains(Vec2::new(2.0, 3.5)));
    /// ```
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        (position.x - self.x).abs() <= LADDER_GRAB_TOLERANCE
            && position.y >= self.bottom
            && position.y <= self.top
    }

    /// Clamps a Y coordinate into the climbable span.
    #[must_use]
    pub fn clamp_y(&self, y: f32) -> f32 {
        y.max(self.bottom).min(self.top)
    }
}
