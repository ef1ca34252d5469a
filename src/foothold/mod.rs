//! Foothold graph.
//!
//! A foothold is one directed segment of terrain authored in game units, where
//! Y grows downward. Segments link to their horizontal neighbours through
//! `prev`/`next` ids so a walking body can follow a slope chain without
//! searching. [`FootholdService`] answers the spatial queries over a loaded
//! graph.

mod platform;
mod service;

use serde::{Deserialize, Serialize};

pub use platform::{Platform, PlatformKind, Terrain};
pub use service::FootholdService;

use crate::{DEGENERATE_EPSILON, WALL_WIDTH_EPSILON};

/// Identifier of a foothold within a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootholdId(pub u32);

impl FootholdId {
    /// Interprets a raw link value from map data, where `0` means "no link".
    ///
    /// # Examples
    /// ```
    /// use footing::foothold::FootholdId;
    /// assert_eq!(FootholdId::link(0), None);
    /// assert_eq!(FootholdId::link(7), Some(FootholdId(7)));
    /// ```
    #[must_use]
    pub const fn link(raw: u32) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self(raw))
        }
    }
}

impl From<u32> for FootholdId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Serde adapter for links stored as raw ids with `0` meaning none.
mod raw_link {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FootholdId;

    pub fn serialize<S: Serializer>(link: &Option<FootholdId>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(link.map_or(0, |id| id.0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FootholdId>, D::Error> {
        u32::deserialize(d).map(FootholdId::link)
    }
}

/// One segment of the foothold graph, in game units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foothold {
    /// Identifier, unique within a map.
    pub id: FootholdId,
    /// First endpoint X.
    pub x1: f32,
    /// First endpoint Y (down is positive).
    pub y1: f32,
    /// Second endpoint X.
    pub x2: f32,
    /// Second endpoint Y (down is positive).
    pub y2: f32,
    /// Neighbour to the left.
    #[serde(default, with = "raw_link")]
    pub prev: Option<FootholdId>,
    /// Neighbour to the right.
    #[serde(default, with = "raw_link")]
    pub next: Option<FootholdId>,
    /// Explicit wall flag. Near-vertical segments are walls regardless.
    #[serde(default)]
    pub wall: bool,
    /// Only blocks bodies that are not moving upward.
    #[serde(default)]
    pub one_way: bool,
    /// Ice surface with reduced ground friction.
    #[serde(default)]
    pub slippery: bool,
    /// Horizontal drift, in world units per second, applied to bodies standing
    /// here.
    #[serde(default)]
    pub conveyor: Option<f32>,
}

impl Foothold {
    /// Creates an unlinked solid foothold between two points.
    #[must_use]
    pub const fn new(id: u32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            id: FootholdId(id),
            x1,
            y1,
            x2,
            y2,
            prev: None,
            next: None,
            wall: false,
            one_way: false,
            slippery: false,
            conveyor: None,
        }
    }

    /// Sets the neighbour links using raw ids (`0` for none).
    #[must_use]
    pub const fn with_links(mut self, prev: u32, next: u32) -> Self {
        self.prev = FootholdId::link(prev);
        self.next = FootholdId::link(next);
        self
    }

    /// Marks the foothold as one-way.
    #[must_use]
    pub const fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }

    /// Marks the foothold as an explicit wall.
    #[must_use]
    pub const fn as_wall(mut self) -> Self {
        self.wall = true;
        self
    }

    /// Marks the foothold as an ice surface.
    #[must_use]
    pub const fn slippery(mut self) -> Self {
        self.slippery = true;
        self
    }

    /// Attaches a conveyor drift in world units per second.
    #[must_use]
    pub const fn with_conveyor(mut self, speed: f32) -> Self {
        self.conveyor = Some(speed);
        self
    }

    /// Leftmost X.
    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.x1.min(self.x2)
    }

    /// Rightmost X.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x1.max(self.x2)
    }

    /// Highest point on screen (smallest Y).
    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.y1.min(self.y2)
    }

    /// Lowest point on screen (largest Y).
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y1.max(self.y2)
    }

    /// Whether `x` lies inside the horizontal span, endpoints included.
    #[must_use]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }

    /// Whether this foothold blocks horizontal movement.
    #[must_use]
    pub fn is_wall(&self) -> bool {
        self.wall || (self.x2 - self.x1).abs() < WALL_WIDTH_EPSILON
    }

    /// Surface Y at `x`, or `NaN` when `x` is outside the span.
    ///
    /// Vertical and zero-length segments report their top endpoint.
    ///
    /// # Examples
    /// ```
    /// use footing::foothold::Foothold;
    /// let fh = Foothold::new(1, 0.0, 100.0, 100.0, 200.0);
    /// assert_eq!(fh.y_at_x(50.0), 150.0);
    /// assert!(fh.y_at_x(101.0).is_nan());
    /// ```
    #[must_use]
    pub fn y_at_x(&self, x: f32) -> f32 {
        if !self.spans(x) {
            return f32::NAN;
        }
        let dx = self.x2 - self.x1;
        if dx.abs() < DEGENERATE_EPSILON {
            return self.min_y();
        }
        let t = (x - self.x1) / dx;
        self.y1 + t * (self.y2 - self.y1)
    }

    /// Gradient `dy/dx` in game units. Zero for walls.
    #[must_use]
    pub fn slope(&self) -> f32 {
        if self.is_wall() {
            return 0.0;
        }
        (self.y2 - self.y1) / (self.x2 - self.x1)
    }

    /// Surface Y at `x` with `x` clamped into the span.
    #[must_use]
    pub fn clamped_y_at_x(&self, x: f32) -> f32 {
        self.y_at_x(x.max(self.min_x()).min(self.max_x()))
    }
}

/// Axis-aligned rectangle in game units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Left edge.
    pub min_x: f32,
    /// Top edge (smallest Y).
    pub min_y: f32,
    /// Right edge.
    pub max_x: f32,
    /// Bottom edge (largest Y).
    pub max_y: f32,
}

impl Area {
    /// Builds an area from two corners in any order.
    #[must_use]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Whether the point lies inside, edges included.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether the foothold's bounding box touches this area.
    #[must_use]
    pub fn overlaps(&self, fh: &Foothold) -> bool {
        fh.max_x() >= self.min_x
            && fh.min_x() <= self.max_x
            && fh.max_y() >= self.min_y
            && fh.min_y() <= self.max_y
    }
}
