//! Read-only world context handed to bodies every fixed step.
//!
//! A `World` bundles the terrain a body collides with and the region flags
//! that change its physics. It is borrowed immutably for a whole scheduler
//! update, so terrain edits can only happen between updates.

use glam::Vec2;
use log::debug;

use crate::coords::{x_to_world, y_to_game};
use crate::foothold::{Area, Foothold, FootholdService, Platform, Terrain};
use crate::ladder::Ladder;

/// Terrain and region flags for one map.
#[derive(Debug, Default, Clone)]
pub struct World {
    /// Ground graph.
    pub footholds: FootholdService,
    /// Climbable segments, in world units.
    pub ladders: Vec<Ladder>,
    /// Whether the map is underwater.
    pub underwater: bool,
    /// Horizontal and vertical limits in game units.
    pub bounds: Option<Area>,
    /// Suggested spawn point in world units.
    pub spawn: Option<Vec2>,
}

impl World {
    /// Creates an empty dry world without bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world over `footholds`.
    #[must_use]
    pub fn with_footholds(footholds: impl IntoIterator<Item = Foothold>) -> Self {
        Self {
            footholds: FootholdService::from_footholds(footholds),
            ..Self::default()
        }
    }

    /// Builds a world from legacy platform records.
    ///
    /// Ladder and rope platforms become [`Ladder`]s; the rest become unlinked
    /// footholds.
    #[must_use]
    pub fn from_platforms(platforms: impl IntoIterator<Item = Platform>) -> Self {
        let mut footholds = Vec::new();
        let mut ladders = Vec::new();
        for platform in platforms {
            match platform.into_terrain() {
                Terrain::Foothold(fh) => footholds.push(fh),
                Terrain::Ladder(ladder) => ladders.push(ladder),
            }
        }
        debug!(
            "converted platforms into {} footholds and {} ladders",
            footholds.len(),
            ladders.len()
        );
        Self {
            ladders,
            ..Self::with_footholds(footholds)
        }
    }

    /// Adds a ladder.
    #[must_use]
    pub fn with_ladder(mut self, ladder: Ladder) -> Self {
        self.ladders.push(ladder);
        self
    }

    /// Sets the underwater flag.
    #[must_use]
    pub const fn underwater(mut self, underwater: bool) -> Self {
        self.underwater = underwater;
        self
    }

    /// Sets the map bounds.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Area) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// First ladder within grabbing reach of `point`.
    #[must_use]
    pub fn ladder_near(&self, point: Vec2) -> Option<&Ladder> {
        self.ladders.iter().find(|ladder| ladder.contains(point))
    }

    /// Clamps a body's centre X so its extents stay inside the bounds.
    ///
    /// Returns `x` unchanged when the world has no bounds or the bounds are
    /// narrower than the body.
    #[must_use]
    pub fn clamp_x(&self, x: f32, half_width: f32) -> f32 {
        let Some(bounds) = self.bounds else {
            return x;
        };
        let left = x_to_world(bounds.min_x) + half_width;
        let right = x_to_world(bounds.max_x) - half_width;
        if left > right {
            return x;
        }
        x.max(left).min(right)
    }

    /// Whether a world-space Y has fallen past the bottom of the bounds.
    #[must_use]
    pub fn below_bounds(&self, y: f32) -> bool {
        self.bounds
            .is_some_and(|bounds| y_to_game(y) > bounds.max_y)
    }
}
