//! Canned terrain.

use footing::foothold::Foothold;
use footing::ladder::Ladder;
use footing::World;

/// Links consecutive `points` into footholds numbered from `first_id`.
///
/// The ends of the chain are left unlinked.
#[must_use]
pub fn chain(first_id: u32, points: &[(f32, f32)]) -> Vec<Foothold> {
    let segments = u32::try_from(points.len().saturating_sub(1)).unwrap_or(u32::MAX);
    let last_id = first_id + segments.saturating_sub(1);
    points
        .windows(2)
        .zip(first_id..)
        .filter_map(|(pair, id)| match pair {
            [(x1, y1), (x2, y2)] => {
                let prev = if id == first_id { 0 } else { id - 1 };
                let next = if id == last_id { 0 } else { id + 1 };
                Some(Foothold::new(id, *x1, *y1, *x2, *y2).with_links(prev, next))
            }
            _ => None,
        })
        .collect()
}

/// A single floor from x = -10 to x = 10 at world height 0.
#[must_use]
pub fn flat_floor() -> World {
    World::with_footholds([Foothold::new(1, -1000.0, 0.0, 1000.0, 0.0)])
}

/// The flat floor plus a one-way shelf two units up between x = 1 and x = 3.
#[must_use]
pub fn shelf_world() -> World {
    World::with_footholds([
        Foothold::new(1, -1000.0, 0.0, 1000.0, 0.0),
        Foothold::new(2, 100.0, -200.0, 300.0, -200.0).one_way(),
    ])
}

/// The shelf world with a ladder at x = 2 running from the floor to the
/// shelf.
#[must_use]
pub fn ladder_world() -> World {
    shelf_world().with_ladder(Ladder::new(2.0, 0.0, 2.0))
}

/// The flat floor closed by walls at x = -3 and x = 3.
#[must_use]
pub fn walled_room() -> World {
    World::with_footholds([
        Foothold::new(1, -1000.0, 0.0, 1000.0, 0.0),
        Foothold::new(2, -300.0, 0.0, -300.0, -300.0).as_wall(),
        Foothold::new(3, 300.0, 0.0, 300.0, -300.0).as_wall(),
    ])
}
