//! Kinematic helper functions.
//!
//! Pure functions over scalar velocities. The body integrator composes them
//! each tick, and the unit tests pin the MapleStory feel numbers on them
//! directly.

use crate::numeric::percent_scale;
use crate::vector_math::move_toward;
use crate::{
    AIR_CONTROL_FACTOR, FALL_DRAG, GRAVITY, JUMP_SPEED, MAX_FALL_SPEED, SWIM_GRAVITY,
    SWIM_MAX_FALL_SPEED, WALK_SPEED,
};

/// Walk speed for a speed stat given in percent.
///
/// # Examples
/// ```
/// use footing::walk_speed;
/// assert!((walk_speed(100) - 1.25).abs() < 1e-6);
/// assert!((walk_speed(140) - 1.75).abs() < 1e-6);
/// ```
#[must_use]
pub fn walk_speed(speed_percent: u16) -> f32 {
    WALK_SPEED * percent_scale(speed_percent)
}

/// Jump velocity for a jump stat given in percent.
///
/// `JUMP_SPEED` is the 100% value.
#[must_use]
pub fn jump_velocity(jump_percent: u16) -> f32 {
    JUMP_SPEED * percent_scale(jump_percent)
}

/// Accelerates `velocity` toward `target`.
///
/// Airborne bodies only get [`AIR_CONTROL_FACTOR`] of `acceleration`.
///
/// # Examples
/// ```
/// use footing::accelerate_toward;
/// let v = accelerate_toward(0.0, 1.25, 10.0, 0.1, true);
/// assert!((v - 1.0).abs() < 1e-6);
/// let capped = accelerate_toward(1.2, 1.25, 10.0, 0.1, true);
/// assert_eq!(capped, 1.25);
/// ```
#[must_use]
pub fn accelerate_toward(
    velocity: f32,
    target: f32,
    acceleration: f32,
    dt: f32,
    grounded: bool,
) -> f32 {
    let rate = if grounded {
        acceleration
    } else {
        acceleration * AIR_CONTROL_FACTOR
    };
    move_toward(velocity, target, rate * dt)
}

/// Decelerates horizontal velocity when no input is held.
///
/// Ground friction brings the body to rest without reversing it. In the air
/// only [`FALL_DRAG`] applies, which keeps momentum intact.
#[must_use]
pub fn apply_friction(velocity: f32, friction: f32, dt: f32, grounded: bool) -> f32 {
    let rate = if grounded { friction } else { FALL_DRAG };
    move_toward(velocity, 0.0, rate * dt)
}

/// Applies one step of gravity and clamps at terminal velocity.
///
/// # Examples
/// ```
/// use footing::apply_gravity;
/// let vy = apply_gravity(0.0, 1.0 / 60.0, false);
/// assert!((vy + 0.333_333).abs() < 1e-4);
/// assert_eq!(apply_gravity(-7.5, 1.0, false), -7.5);
/// ```
#[must_use]
pub fn apply_gravity(velocity_y: f32, dt: f32, underwater: bool) -> f32 {
    let (gravity, max_fall) = if underwater {
        (SWIM_GRAVITY, SWIM_MAX_FALL_SPEED)
    } else {
        (GRAVITY, MAX_FALL_SPEED)
    };
    (velocity_y - gravity * dt).max(-max_fall)
}
