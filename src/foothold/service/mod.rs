//! Spatial queries over a loaded foothold graph.
//!
//! All coordinates are game units with Y growing downward, so "below" means a
//! larger Y. Every query that depends on X goes through a column index; the
//! results match a linear scan over the loaded footholds in load order.

mod index;

use glam::Vec2;
use hashbrown::HashMap;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use self::index::ColumnIndex;
use super::{Area, Foothold, FootholdId};
use crate::vector_math::closest_point_on_segment;
use crate::{FOOTHOLD_PICK_TOLERANCE, GROUND_SINK_OFFSET};

/// Number of footholds echoed at debug level after a load.
const LOAD_LOG_SAMPLE: usize = 5;

/// Read-mostly query service over the foothold graph.
///
/// # Examples
/// ```
/// use footing::foothold::{Foothold, FootholdService};
/// let mut service = FootholdService::new();
/// service.load_footholds(vec![
///     Foothold::new(1, 0.0, 100.0, 200.0, 100.0),
///     Foothold::new(2, 0.0, 300.0, 200.0, 300.0),
/// ]);
/// assert_eq!(service.ground_below(50.0, 0.0), Some(99.0));
/// assert_eq!(service.ground_below(50.0, 150.0), Some(299.0));
/// assert_eq!(service.ground_below(50.0, 400.0), None);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FootholdService {
    footholds: Vec<Foothold>,
    by_id: HashMap<FootholdId, usize>,
    index: ColumnIndex,
}

impl FootholdService {
    /// Creates an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service loaded with `footholds`.
    #[must_use]
    pub fn from_footholds(footholds: impl IntoIterator<Item = Foothold>) -> Self {
        let mut service = Self::new();
        service.load_footholds(footholds);
        service
    }

    /// Replaces the whole graph.
    ///
    /// Ids are not validated. When an id repeats, the later foothold replaces
    /// the earlier one.
    pub fn load_footholds(&mut self, footholds: impl IntoIterator<Item = Foothold>) {
        self.clear();
        let mut duplicates = 0_usize;
        for fh in footholds {
            if self.by_id.contains_key(&fh.id) {
                duplicates += 1;
            }
            self.upsert(fh);
        }
        info!("loaded {} footholds", self.footholds.len());
        if duplicates > 0 {
            warn!("{duplicates} duplicate foothold ids were overwritten");
        }
        for fh in self.footholds.iter().take(LOAD_LOG_SAMPLE) {
            debug!(
                "foothold {}: x[{}, {}] y[{}, {}]",
                fh.id.0, fh.x1, fh.x2, fh.y1, fh.y2
            );
        }
        if self.footholds.len() > LOAD_LOG_SAMPLE {
            debug!("... and {} more", self.footholds.len() - LOAD_LOG_SAMPLE);
        }
    }

    /// Inserts `foothold`, replacing any foothold with the same id.
    pub fn update_foothold(&mut self, foothold: Foothold) {
        debug!("updating foothold {}", foothold.id.0);
        self.upsert(foothold);
    }

    fn upsert(&mut self, foothold: Foothold) {
        if let Some(&slot) = self.by_id.get(&foothold.id) {
            if let Some(existing) = self.footholds.get_mut(slot) {
                self.index.remove(slot, existing);
                self.index.insert(slot, &foothold);
                *existing = foothold;
                return;
            }
        }
        let slot = self.footholds.len();
        self.index.insert(slot, &foothold);
        self.by_id.insert(foothold.id, slot);
        self.footholds.push(foothold);
    }

    /// Drops every foothold.
    pub fn clear(&mut self) {
        self.footholds.clear();
        self.by_id.clear();
        self.index.clear();
    }

    /// Number of loaded footholds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.footholds.len()
    }

    /// Whether no footholds are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.footholds.is_empty()
    }

    /// Looks a foothold up by id.
    #[must_use]
    pub fn get(&self, id: FootholdId) -> Option<&Foothold> {
        self.by_id.get(&id).and_then(|&slot| self.footholds.get(slot))
    }

    /// Iterates over every foothold in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Foothold> {
        self.footholds.iter()
    }

    /// Footholds whose horizontal span contains `x`, in load order.
    pub fn footholds_spanning(&self, x: f32) -> impl Iterator<Item = &Foothold> {
        self.index
            .slots_at(x)
            .into_iter()
            .filter_map(move |slot| self.footholds.get(slot))
            .filter(move |fh| fh.spans(x))
    }

    /// Surfaces at `x` paired with their footholds, skipping `NaN` results.
    fn surfaces_at(&self, x: f32) -> impl Iterator<Item = (&Foothold, f32)> {
        self.footholds_spanning(x)
            .map(move |fh| (fh, fh.y_at_x(x)))
            .filter(|(_, surface)| !surface.is_nan())
    }

    /// Nearest ground at or below `(x, y)`, sunk by one unit.
    ///
    /// Returns `None` when no foothold spans `x` at or below `y`.
    #[must_use]
    pub fn ground_below(&self, x: f32, y: f32) -> Option<f32> {
        self.foothold_below(x, y)
            .map(|fh| fh.y_at_x(x) - GROUND_SINK_OFFSET)
    }

    /// Whether `(x, y)` rests on ground within `tolerance`.
    #[must_use]
    pub fn is_on_ground(&self, x: f32, y: f32, tolerance: f32) -> bool {
        self.ground_below(x, y - tolerance)
            .is_some_and(|ground| (y - (ground + GROUND_SINK_OFFSET)).abs() <= tolerance)
    }

    /// Foothold whose surface passes within a few units of `(x, y)`.
    ///
    /// The closest surface wins; equal distances prefer the higher surface.
    #[must_use]
    pub fn foothold_at(&self, x: f32, y: f32) -> Option<&Foothold> {
        self.surfaces_at(x)
            .filter(|(_, surface)| (surface - y).abs() <= FOOTHOLD_PICK_TOLERANCE)
            .min_by_key(|(_, surface)| (OrderedFloat((surface - y).abs()), OrderedFloat(*surface)))
            .map(|(fh, _)| fh)
    }

    /// Foothold with the nearest surface at or below `(x, y)`.
    #[must_use]
    pub fn foothold_below(&self, x: f32, y: f32) -> Option<&Foothold> {
        self.surfaces_at(x)
            .filter(|(_, surface)| *surface >= y)
            .min_by_key(|(_, surface)| OrderedFloat(*surface))
            .map(|(fh, _)| fh)
    }

    /// Neighbour of `current` in the direction of travel.
    ///
    /// Returns `None` for unlinked ends and dangling ids.
    #[must_use]
    pub fn connected_foothold(&self, current: &Foothold, moving_right: bool) -> Option<&Foothold> {
        let link = if moving_right {
            current.next
        } else {
            current.prev
        };
        link.and_then(|id| self.get(id))
    }

    /// Whether `foothold` blocks horizontal movement.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "classification is part of the query interface"
    )]
    pub fn is_wall(&self, foothold: &Foothold) -> bool {
        foothold.is_wall()
    }

    /// Gradient of `foothold` at `x`; zero outside its span and for walls.
    #[must_use]
    #[expect(
        clippy::unused_self,
        reason = "classification is part of the query interface"
    )]
    pub fn slope_at(&self, foothold: &Foothold, x: f32) -> f32 {
        if foothold.spans(x) {
            foothold.slope()
        } else {
            0.0
        }
    }

    /// Footholds whose bounding boxes touch `area`, in load order.
    #[must_use]
    pub fn footholds_in_area(&self, area: &Area) -> Vec<&Foothold> {
        self.index
            .slots_between(area.min_x, area.max_x)
            .into_iter()
            .filter_map(|slot| self.footholds.get(slot))
            .filter(|fh| area.overlaps(fh))
            .collect()
    }

    /// Foothold whose segment passes closest to `(x, y)`, strictly within
    /// `max_distance`.
    #[must_use]
    pub fn find_nearest_foothold(&self, x: f32, y: f32, max_distance: f32) -> Option<&Foothold> {
        let point = Vec2::new(x, y);
        let mut best: Option<&Foothold> = None;
        let mut best_sq = max_distance * max_distance;
        for slot in self.index.slots_between(x - max_distance, x + max_distance) {
            let Some(fh) = self.footholds.get(slot) else {
                continue;
            };
            let closest = closest_point_on_segment(
                Vec2::new(fh.x1, fh.y1),
                Vec2::new(fh.x2, fh.y2),
                point,
            );
            let dist_sq = closest.distance_squared(point);
            if dist_sq < best_sq {
                best = Some(fh);
                best_sq = dist_sq;
            }
        }
        best
    }
}
