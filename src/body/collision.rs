//! Box-versus-foothold contact.
//!
//! Bodies work in world units while footholds are stored in game units. The
//! helpers here take and return world coordinates and convert at the edge.

use glam::Vec2;
use ordered_float::OrderedFloat;

use crate::coords::{x_to_game, x_to_world, y_to_game, y_to_world};
use crate::foothold::{Area, Foothold, FootholdId, FootholdService};
use crate::{GROUND_SNAP_DISTANCE, LANDING_EPSILON, MAX_WALKABLE_SLOPE};

/// Slack when deciding whether a wall sits ahead of the leading edge, in game
/// units.
const WALL_CONTACT_SLACK: f32 = 1e-3;

/// A wall must rise this far above the feet to block, in game units.
const WALL_FOOT_CLEARANCE: f32 = 1.0;

/// Half extents of the body box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Extents {
    pub(super) half_width: f32,
    pub(super) half_height: f32,
}

impl Extents {
    pub(super) fn foot(self, centre: Vec2) -> f32 {
        centre.y - self.half_height
    }

    pub(super) fn centre_on(self, surface: f32) -> f32 {
        surface + self.half_height
    }
}

/// Surface height of `fh` under world `x`, in world units.
pub(super) fn surface_at(fh: &Foothold, x: f32) -> f32 {
    y_to_world(fh.y_at_x(x_to_game(x)))
}

/// Foothold the body rests on and the centre height that puts the feet on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Contact {
    pub(super) foothold: FootholdId,
    pub(super) centre_y: f32,
}

/// Result of walking a grounded body to a new X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum GroundStep {
    Supported(Contact),
    Blocked,
    Unsupported,
}

fn floors_under(service: &FootholdService, x: f32) -> impl Iterator<Item = (&Foothold, f32)> {
    service
        .footholds_spanning(x_to_game(x))
        .filter(|fh| !fh.is_wall())
        .map(move |fh| (fh, surface_at(fh, x)))
}

/// Clamps a horizontal move against walls between the old and new leading
/// edge. Returns the clamped centre X, or `None` when nothing is in the way.
///
/// Walls the body already overlaps are ignored so it can back out of them,
/// as are walls whose top sits at foot level.
pub(super) fn clamp_to_walls(
    service: &FootholdService,
    prev: Vec2,
    next_x: f32,
    ext: Extents,
) -> Option<f32> {
    let dx = next_x - prev.x;
    if dx.abs() < f32::EPSILON {
        return None;
    }
    let sign = dx.signum();
    let lead_from = x_to_game(prev.x + sign * ext.half_width);
    let lead_to = x_to_game(next_x + sign * ext.half_width);
    let foot = ext.foot(prev);
    let feet = y_to_game(foot);
    let head = y_to_game(foot + 2.0 * ext.half_height);
    let area = Area::new(lead_from - sign * WALL_CONTACT_SLACK, head, lead_to, feet);

    service
        .footholds_in_area(&area)
        .into_iter()
        .filter(|fh| fh.is_wall())
        .filter(|fh| fh.max_y() > head && fh.min_y() < feet - WALL_FOOT_CLEARANCE)
        .map(|fh| if sign > 0.0 { fh.min_x() } else { fh.max_x() })
        .filter(|wall| (wall - lead_from) * sign >= -WALL_CONTACT_SLACK)
        .min_by_key(|wall| OrderedFloat((wall - lead_from) * sign))
        .map(|wall| x_to_world(wall) - sign * ext.half_width)
}

/// Keeps a grounded body on the ground while it moves from `prev` to
/// `next_x`.
///
/// Support is looked up on the current foothold, then its neighbour in the
/// direction of travel, then any floor within snap reach of the feet.
pub(super) fn follow_ground(
    service: &FootholdService,
    current: Option<FootholdId>,
    prev: Vec2,
    next_x: f32,
    ext: Extents,
) -> GroundStep {
    let foot = ext.foot(prev);
    let dx = next_x - prev.x;
    let reach = dx.abs() * MAX_WALKABLE_SLOPE;
    let x = x_to_game(next_x);

    let current_fh = current.and_then(|id| service.get(id));
    let linked = current_fh
        .filter(|fh| !fh.spans(x))
        .and_then(|fh| service.connected_foothold(fh, dx > 0.0));
    let chained = current_fh
        .into_iter()
        .chain(linked)
        .find(|fh| !fh.is_wall() && fh.spans(x))
        .map(|fh| (fh.id, surface_at(fh, next_x)));
    let support = chained.or_else(|| {
        nearest_floor(service, next_x, foot, GROUND_SNAP_DISTANCE + reach)
    });

    let Some((foothold, surface)) = support else {
        let ledge = floors_under(service, next_x).any(|(fh, surface)| {
            !fh.one_way && surface > foot && surface <= foot + 2.0 * ext.half_height
        });
        return if ledge {
            GroundStep::Blocked
        } else {
            GroundStep::Unsupported
        };
    };

    if surface - foot > reach + LANDING_EPSILON {
        return GroundStep::Blocked;
    }
    GroundStep::Supported(Contact {
        foothold,
        centre_y: ext.centre_on(surface),
    })
}

fn nearest_floor(
    service: &FootholdService,
    x: f32,
    foot: f32,
    tolerance: f32,
) -> Option<(FootholdId, f32)> {
    floors_under(service, x)
        .filter(|(_, surface)| (surface - foot).abs() <= tolerance)
        .min_by_key(|(_, surface)| (OrderedFloat((surface - foot).abs()), OrderedFloat(-surface)))
        .map(|(fh, surface)| (fh.id, surface))
}

/// Floor within `tolerance` of the feet, if any.
pub(super) fn settle(
    service: &FootholdService,
    centre: Vec2,
    ext: Extents,
    tolerance: f32,
) -> Option<Contact> {
    nearest_floor(service, centre.x, ext.foot(centre), tolerance).map(|(foothold, surface)| {
        Contact {
            foothold,
            centre_y: ext.centre_on(surface),
        }
    })
}

/// Highest floor at or below the feet.
pub(super) fn ground_beneath(
    service: &FootholdService,
    centre: Vec2,
    ext: Extents,
) -> Option<Contact> {
    let foot = ext.foot(centre);
    floors_under(service, centre.x)
        .filter(|(_, surface)| *surface <= foot + LANDING_EPSILON)
        .max_by_key(|(_, surface)| OrderedFloat(*surface))
        .map(|(fh, surface)| Contact {
            foothold: fh.id,
            centre_y: ext.centre_on(surface),
        })
}

/// Where an airborne body touches down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Landing {
    pub(super) contact: Contact,
    /// Centre X at touchdown, in world units.
    pub(super) x: f32,
}

/// Swept landing test for an airborne body moving from `prev` to `next`.
///
/// A floor is crossed when the feet start on or above it and end on or below
/// it. Floors under either end of the move are candidates; one that ends
/// before `next` only catches the body if the feet met it inside its span, and
/// the body is held at that point. One-way floors only catch bodies that are
/// not rising. The highest crossed floor wins.
pub(super) fn sweep_landing(
    service: &FootholdService,
    prev: Vec2,
    next: Vec2,
    velocity_y: f32,
    ext: Extents,
) -> Option<Landing> {
    let prev_foot = ext.foot(prev);
    let next_foot = ext.foot(next);
    let prev_x = x_to_game(prev.x);
    let next_x = x_to_game(next.x);
    let left_behind = service
        .footholds_spanning(prev_x)
        .filter(move |fh| !fh.spans(next_x));
    service
        .footholds_spanning(next_x)
        .chain(left_behind)
        .filter(|fh| !fh.is_wall() && !(fh.one_way && velocity_y > 0.0))
        .filter_map(|fh| {
            let before = prev_foot - y_to_world(fh.clamped_y_at_x(prev_x));
            let after = next_foot - y_to_world(fh.clamped_y_at_x(next_x));
            if before + LANDING_EPSILON < 0.0 || after > 0.0 {
                return None;
            }
            let x = if fh.spans(next_x) {
                next.x
            } else {
                let t = if before - after > f32::EPSILON {
                    (before / (before - after)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let touch = prev_x + t * (next_x - prev_x);
                if !fh.spans(touch) {
                    return None;
                }
                x_to_world(touch)
            };
            Some(Landing {
                contact: Contact {
                    foothold: fh.id,
                    centre_y: ext.centre_on(surface_at(fh, x)),
                },
                x,
            })
        })
        .max_by_key(|landing| OrderedFloat(landing.contact.centre_y))
}

/// Whether some floor other than `current` lies under the feet.
pub(super) fn has_floor_below(
    service: &FootholdService,
    current: FootholdId,
    centre: Vec2,
    ext: Extents,
) -> bool {
    let foot = ext.foot(centre);
    floors_under(service, centre.x)
        .any(|(fh, surface)| fh.id != current && surface < foot - LANDING_EPSILON)
}
