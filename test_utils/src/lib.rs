//! Fixture builders shared by the integration tests.
//!
//! Terrain is authored in game units, as map files are. Bodies are placed and
//! inspected in world units.

mod recorder;
mod worlds;

pub use glam::Vec2;
pub use recorder::{Recorder, ViewCall};
pub use worlds::{chain, flat_floor, ladder_world, shelf_world, walled_room};

use footing::{Player, StepContext, World};

/// Places a default body on the highest floor under `x`.
///
/// # Panics
/// Panics when `world` has no floor under `x`.
#[must_use]
pub fn grounded_player(world: &World, x: f32) -> Player {
    standing_at(world, Vec2::new(x, 10.0))
}

/// Places a default body at `position` and drops it onto the first floor
/// under its feet.
///
/// # Panics
/// Panics when there is no floor under `position`.
#[must_use]
pub fn standing_at(world: &World, position: Vec2) -> Player {
    let mut player = Player::default().with_position(position);
    assert!(
        player.snap_to_ground(&world.footholds),
        "no floor under {position}"
    );
    player
}

/// Steps `player` directly, bypassing the scheduler, `ticks` times.
pub fn run_ticks(player: &mut Player, world: &World, ticks: u64) {
    for tick in 1..=ticks {
        player.step(&StepContext::fixed(world, tick));
    }
}
