//! End-to-end collision scenarios driven through the scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use footing::body::MovementState;
use footing::foothold::{Foothold, FootholdId};
use footing::{PhysicsScheduler, Player, World, FIXED_TIMESTEP};
use rstest::rstest;
use test_utils::{chain, grounded_player, shelf_world, standing_at, walled_room, Vec2};

/// Runs `player` for `frames` frames of exactly one step each.
fn simulate(player: Player, world: &World, frames: u32) -> Player {
    let body = Rc::new(RefCell::new(player));
    let mut scheduler = PhysicsScheduler::new();
    scheduler.register(body.clone());
    for _ in 0..frames {
        let report = scheduler.update(FIXED_TIMESTEP, world);
        assert!(report.failures.is_empty());
    }
    drop(scheduler);
    Rc::try_unwrap(body)
        .unwrap_or_else(|_| panic!("scheduler still holds the body"))
        .into_inner()
}

#[rstest]
fn walking_follows_a_linked_hill() {
    let world = World::with_footholds(chain(
        1,
        &[(-1000.0, 0.0), (0.0, 0.0), (200.0, -100.0), (1000.0, -100.0)],
    ));
    let mut player = grounded_player(&world, -1.0);
    player.move_right(true);

    let player = simulate(player, &world, 300);

    assert!(player.position().x > 3.0);
    assert!(player.is_grounded());
    assert_eq!(player.foothold(), Some(FootholdId(3)));
    assert_relative_eq!(player.position().y, 1.3, epsilon = 1e-3);
}

#[rstest]
#[case::right(true, 2.85)]
#[case::left(false, -2.85)]
fn walls_hold_the_body_inside_the_room(#[case] right: bool, #[case] expected: f32) {
    let world = walled_room();
    let mut player = grounded_player(&world, 0.0);
    if right {
        player.move_right(true);
    } else {
        player.move_left(true);
    }

    let player = simulate(player, &world, 300);

    assert_relative_eq!(player.position().x, expected, epsilon = 1e-3);
    assert_relative_eq!(player.velocity().x, 0.0);
    assert!(player.is_grounded());
}

#[rstest]
fn strong_jump_passes_up_through_a_shelf_and_lands_on_it() {
    let world = shelf_world();
    let mut player = standing_at(&world, Vec2::new(2.0, 0.5));
    assert_eq!(player.foothold(), Some(FootholdId(1)));
    player.set_jump_percent(200);
    player.jump();

    let player = simulate(player, &world, 120);

    assert!(player.is_grounded());
    assert_eq!(player.foothold(), Some(FootholdId(2)));
    assert_relative_eq!(player.position().y, 2.3, epsilon = 1e-4);
    assert_eq!(player.state(), MovementState::Standing);
}

#[rstest]
fn dropping_from_the_shelf_reaches_the_floor() {
    let world = shelf_world();
    let mut player = grounded_player(&world, 2.0);
    assert_eq!(player.foothold(), Some(FootholdId(2)));
    player.drop_through_platform();

    let player = simulate(player, &world, 90);

    assert_eq!(player.foothold(), Some(FootholdId(1)));
    assert_relative_eq!(player.position().y, 0.3, epsilon = 1e-4);
}

#[rstest]
fn walking_off_a_ledge_falls_to_the_floor_below() {
    let world = World::with_footholds([
        Foothold::new(1, -100.0, 0.0, 100.0, 0.0),
        Foothold::new(2, -1000.0, 100.0, 1000.0, 100.0),
    ]);
    let mut player = grounded_player(&world, 0.0);
    player.move_right(true);

    let player = simulate(player, &world, 180);

    assert!(player.is_grounded());
    assert_eq!(player.foothold(), Some(FootholdId(2)));
    assert_relative_eq!(player.position().y, -0.7, epsilon = 1e-4);
    assert!(player.position().x > 1.0);
}
