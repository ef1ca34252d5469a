//! Movement state machine.

use serde::{Deserialize, Serialize};

/// Coarse movement state used by animation and input gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementState {
    /// Grounded with no horizontal velocity.
    #[default]
    Standing,
    /// Grounded and moving horizontally.
    Walking,
    /// Airborne, rising or falling.
    Jumping,
    /// Grounded and ducking; blocks walking and jumping.
    Crouching,
    /// Attached to a ladder or rope.
    Climbing,
    /// Airborne underwater.
    Swimming,
}

/// Discrete animation cues emitted alongside state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationEvent {
    /// Left the ground with an impulse.
    Jump,
    /// Touched down after being airborne.
    Land,
    /// Started walking from rest.
    StartWalk,
    /// Came to rest while grounded.
    StopWalk,
    /// Grabbed a ladder or rope.
    StartClimb,
    /// Let go of a ladder or rope.
    StopClimb,
    /// Ducked.
    Crouch,
    /// Stood back up from a crouch.
    StandUp,
}

/// State the body should be in after a tick.
///
/// Climbing and crouching are entered and left explicitly; this only settles
/// the ground and air states.
///
/// # Examples
/// ```
/// use footing::body::{settle_state, MovementState};
/// assert_eq!(settle_state(MovementState::Jumping, true, 0.0, false), MovementState::Standing);
/// assert_eq!(settle_state(MovementState::Jumping, true, 0.4, false), MovementState::Walking);
/// assert_eq!(settle_state(MovementState::Walking, false, 0.4, true), MovementState::Swimming);
/// ```
#[must_use]
pub fn settle_state(
    current: MovementState,
    grounded: bool,
    velocity_x: f32,
    underwater: bool,
) -> MovementState {
    match current {
        MovementState::Climbing => MovementState::Climbing,
        MovementState::Crouching if grounded => MovementState::Crouching,
        _ if !grounded && underwater => MovementState::Swimming,
        _ if !grounded => MovementState::Jumping,
        _ if velocity_x.abs() > 0.0 => MovementState::Walking,
        _ => MovementState::Standing,
    }
}

/// Cue implied by moving from `from` to `to`.
///
/// Jump and Land are raised by the impulse and landing code themselves.
#[must_use]
pub const fn transition_event(from: MovementState, to: MovementState) -> Option<AnimationEvent> {
    use MovementState::{Climbing, Crouching, Standing, Walking};
    match (from, to) {
        (Climbing, Climbing) | (Crouching, Crouching) => None,
        (_, Climbing) => Some(AnimationEvent::StartClimb),
        (Climbing, _) => Some(AnimationEvent::StopClimb),
        (_, Crouching) => Some(AnimationEvent::Crouch),
        (Crouching, _) => Some(AnimationEvent::StandUp),
        (Standing, Walking) => Some(AnimationEvent::StartWalk),
        (Walking, Standing) => Some(AnimationEvent::StopWalk),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use MovementState::*;

    #[rstest]
    #[case(Standing, true, 0.0, Standing)]
    #[case(Standing, true, 0.1, Walking)]
    #[case(Walking, true, 0.0, Standing)]
    #[case(Walking, false, 1.0, Jumping)]
    #[case(Jumping, true, 0.0, Standing)]
    #[case(Jumping, true, -0.3, Walking)]
    #[case(Crouching, true, 0.0, Crouching)]
    #[case(Crouching, false, 0.0, Jumping)]
    #[case(Climbing, false, 0.0, Climbing)]
    fn dry_transitions(
        #[case] from: MovementState,
        #[case] grounded: bool,
        #[case] vx: f32,
        #[case] expected: MovementState,
    ) {
        assert_eq!(settle_state(from, grounded, vx, false), expected);
    }

    #[rstest]
    #[case(Jumping, false, Swimming)]
    #[case(Swimming, true, Standing)]
    fn water_transitions(
        #[case] from: MovementState,
        #[case] grounded: bool,
        #[case] expected: MovementState,
    ) {
        assert_eq!(settle_state(from, grounded, 0.0, true), expected);
    }

    #[rstest]
    #[case(Standing, Walking, Some(AnimationEvent::StartWalk))]
    #[case(Walking, Standing, Some(AnimationEvent::StopWalk))]
    #[case(Walking, Climbing, Some(AnimationEvent::StartClimb))]
    #[case(Climbing, Jumping, Some(AnimationEvent::StopClimb))]
    #[case(Standing, Crouching, Some(AnimationEvent::Crouch))]
    #[case(Crouching, Standing, Some(AnimationEvent::StandUp))]
    #[case(Jumping, Standing, None)]
    #[case(Walking, Walking, None)]
    fn transition_cues(
        #[case] from: MovementState,
        #[case] to: MovementState,
        #[case] expected: Option<AnimationEvent>,
    ) {
        assert_eq!(transition_event(from, to), expected);
    }
}
