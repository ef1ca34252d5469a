//! JSON map loading.
//!
//! Maps are authored as a [`MapDefinition`]: footholds and/or legacy
//! platforms in game units, ladders in world units, a water flag, optional
//! bounds and an optional spawn point. [`load_map`] reads one from disk and
//! turns it into a [`World`].

use std::path::Path;

use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::to_world;
use crate::foothold::{Area, Foothold, FootholdId, Platform, Terrain};
use crate::ladder::Ladder;
use crate::world::World;

/// Errors raised while loading a map file.
#[derive(Debug, Error)]
pub enum MapError {
    /// The file could not be read.
    #[error("failed to read map {path}: {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid map document.
    #[error("failed to parse map: {0}")]
    Parse(#[from] serde_json::Error),
    /// A foothold has non-finite coordinates.
    #[error("foothold {id:?} has non-finite coordinates")]
    NonFiniteFoothold {
        /// Offending foothold.
        id: FootholdId,
    },
    /// A ladder has non-finite coordinates.
    #[error("ladder at index {index} has non-finite coordinates")]
    NonFiniteLadder {
        /// Position of the ladder in the map file.
        index: usize,
    },
}

/// Spawn point in game units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position (down is positive).
    pub y: f32,
}

/// On-disk map document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDefinition {
    /// Display name.
    pub name: Option<String>,
    /// Linked foothold graph.
    pub footholds: Vec<Foothold>,
    /// Legacy platform records.
    pub platforms: Vec<Platform>,
    /// Ladders and ropes in world units.
    pub ladders: Vec<Ladder>,
    /// Whether the map is underwater.
    pub underwater: bool,
    /// Map limits in game units.
    pub bounds: Option<Area>,
    /// Suggested spawn point.
    pub spawn: Option<SpawnPoint>,
}

impl MapDefinition {
    /// Parses a map document from JSON.
    ///
    /// # Errors
    /// Returns [`MapError::Parse`] when the JSON does not describe a map.
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks that all geometry is finite.
    ///
    /// Degenerate segments are accepted; they act as single points.
    ///
    /// # Errors
    /// Returns the first non-finite foothold or ladder found.
    pub fn validate(&self) -> Result<(), MapError> {
        for fh in &self.footholds {
            if ![fh.x1, fh.y1, fh.x2, fh.y2].iter().all(|v| v.is_finite()) {
                return Err(MapError::NonFiniteFoothold { id: fh.id });
            }
        }
        for (index, ladder) in self.ladders.iter().enumerate() {
            if ![ladder.x, ladder.bottom, ladder.top]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(MapError::NonFiniteLadder { index });
            }
        }
        Ok(())
    }

    /// Converts the document into a [`World`].
    ///
    /// Platforms are merged after the footholds, so a platform sharing an id
    /// with a foothold replaces it.
    #[must_use]
    pub fn into_world(self) -> World {
        let mut footholds = self.footholds;
        let mut ladders = self.ladders;
        for platform in self.platforms {
            match platform.into_terrain() {
                Terrain::Foothold(fh) => footholds.push(fh),
                Terrain::Ladder(ladder) => ladders.push(ladder),
            }
        }
        let mut world = World::with_footholds(footholds).underwater(self.underwater);
        world.ladders = ladders;
        world.bounds = self.bounds;
        world.spawn = self.spawn.map(|p| to_world(Vec2::new(p.x, p.y)));
        world
    }
}

/// Reads, validates and converts a map file.
///
/// # Errors
/// Returns [`MapError::Io`] when the file cannot be read, otherwise the errors
/// of [`MapDefinition::from_json`] and [`MapDefinition::validate`].
pub fn load_map(path: impl AsRef<Path>) -> Result<World, MapError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let definition = MapDefinition::from_json(&text)?;
    definition.validate()?;
    if definition.footholds.is_empty() && definition.platforms.is_empty() {
        warn!("map {} has no terrain", path.display());
    }
    info!(
        "loaded map {}",
        definition.name.as_deref().unwrap_or("<unnamed>")
    );
    Ok(definition.into_world())
}
