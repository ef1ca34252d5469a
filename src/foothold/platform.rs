//! Legacy single-segment platforms.
//!
//! Older map data describes terrain as flat platform records without graph
//! links. They are converted into footholds (or ladders) on load so the rest
//! of the crate only deals with one terrain model.

use serde::{Deserialize, Serialize};

use super::Foothold;
use crate::coords::{x_to_world, y_to_world};
use crate::ladder::Ladder;

/// Kind tag of a legacy platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Solid ground.
    #[default]
    Normal,
    /// Ground that only blocks falling bodies.
    OneWay,
    /// Climbable ladder.
    Ladder,
    /// Climbable rope.
    Rope,
}

/// A legacy platform record in game units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Identifier, reused as the foothold id.
    pub id: u32,
    /// First endpoint X.
    pub x1: f32,
    /// First endpoint Y.
    pub y1: f32,
    /// Second endpoint X.
    pub x2: f32,
    /// Second endpoint Y.
    pub y2: f32,
    /// What the platform represents.
    #[serde(default)]
    pub kind: PlatformKind,
}

/// The canonical form of a converted [`Platform`].
#[derive(Debug, Clone, PartialEq)]
pub enum Terrain {
    /// Walkable ground.
    Foothold(Foothold),
    /// Climbable segment.
    Ladder(Ladder),
}

impl Platform {
    /// Converts the record into an unlinked foothold or a ladder.
    ///
    /// # Examples
    /// ```
    /// use footing::foothold::{Platform, PlatformKind, Terrain};
    /// let p = Platform { id: 4, x1: 0.0, y1: -100.0, x2: 200.0, y2: -100.0, kind: PlatformKind::OneWay };
    /// let Terrain::Foothold(fh) = p.into_terrain() else { panic!("expected a foothold") };
    /// assert!(fh.one_way);
    /// assert!(fh.prev.is_none() && fh.next.is_none());
    /// ```
    #[must_use]
    pub fn into_terrain(self) -> Terrain {
        match self.kind {
            PlatformKind::Normal => Terrain::Foothold(Foothold::new(
                self.id, self.x1, self.y1, self.x2, self.y2,
            )),
            PlatformKind::OneWay => Terrain::Foothold(
                Foothold::new(self.id, self.x1, self.y1, self.x2, self.y2).one_way(),
            ),
            PlatformKind::Ladder | PlatformKind::Rope => {
                // Game Y grows downward, so the larger Y is the bottom.
                let bottom = y_to_world(self.y1.max(self.y2));
                let top = y_to_world(self.y1.min(self.y2));
                let x = x_to_world((self.x1 + self.x2) * 0.5);
                Terrain::Ladder(Ladder::new(x, bottom, top).rope(self.kind == PlatformKind::Rope))
            }
        }
    }
}
