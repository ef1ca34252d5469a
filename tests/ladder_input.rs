//! Ladder climbing driven by scripted input providers.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use footing::body::{AnimationEvent, InputProvider, InputState, MovementState};
use footing::foothold::FootholdId;
use mockall::mock;
use test_utils::{ladder_world, run_ticks, standing_at, Recorder, Vec2};

mock! {
    Pad {}
    impl InputProvider for Pad {
        fn sample(&mut self) -> InputState;
    }
}

const UP: InputState = InputState {
    left: false,
    right: false,
    up: true,
    down: false,
    jump: false,
    attack: false,
};

#[test]
fn holding_up_climbs_onto_the_shelf() {
    let world = ladder_world();
    let mut player = standing_at(&world, Vec2::new(2.0, 0.5));
    let recorder = Recorder::shared();
    player.add_listener(Box::new(Rc::clone(&recorder)));

    let mut pad = MockPad::new();
    pad.expect_sample().times(150).return_const(UP);
    player.set_input_provider(Box::new(pad));

    run_ticks(&mut player, &world, 1);
    assert_eq!(player.state(), MovementState::Climbing);
    assert!(player.velocity().y > 0.0);

    run_ticks(&mut player, &world, 149);
    assert!(player.is_grounded());
    assert_eq!(player.foothold(), Some(FootholdId(2)));
    assert_relative_eq!(player.position().y, 2.3, epsilon = 1e-4);
    assert_eq!(
        recorder.borrow().events(),
        vec![AnimationEvent::StartClimb, AnimationEvent::StopClimb]
    );
    player.clear_input_provider();
}

#[test]
fn holding_down_climbs_back_to_the_floor() {
    let world = ladder_world();
    let mut player = standing_at(&world, Vec2::new(2.0, 0.5));
    assert!(player.is_grounded());

    let input = Rc::new(RefCell::new(UP));
    player.set_input_provider(Box::new(Rc::clone(&input)));
    run_ticks(&mut player, &world, 150);
    assert_eq!(player.foothold(), Some(FootholdId(2)));

    *input.borrow_mut() = InputState {
        down: true,
        ..InputState::default()
    };
    run_ticks(&mut player, &world, 1);
    assert_eq!(player.state(), MovementState::Climbing);

    run_ticks(&mut player, &world, 149);
    assert_eq!(player.foothold(), Some(FootholdId(1)));
    assert_relative_eq!(player.position().y, 0.3, epsilon = 1e-4);
    // Down is still held once the feet touch the floor.
    assert_eq!(player.state(), MovementState::Crouching);
}

#[test]
fn jumping_from_the_ladder_releases_it() {
    let world = ladder_world();
    let mut player = standing_at(&world, Vec2::new(2.0, 0.5));
    let input = Rc::new(RefCell::new(UP));
    player.set_input_provider(Box::new(Rc::clone(&input)));
    run_ticks(&mut player, &world, 20);
    assert_eq!(player.state(), MovementState::Climbing);

    *input.borrow_mut() = InputState {
        jump: true,
        right: true,
        ..InputState::default()
    };
    run_ticks(&mut player, &world, 1);
    assert_eq!(player.state(), MovementState::Jumping);
    assert!(player.ladder().is_none());
    assert!(player.velocity().x > 0.0);
}
