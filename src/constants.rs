//! Physics constants shared by the scheduler, the foothold service and the
//! kinematic body.
//!
//! Speeds are in world units per second and accelerations in world units per
//! second squared. One world unit is one hundred game units (pixels), which is
//! the space footholds are authored in.

/// Seconds simulated by one fixed physics step.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
/// Upper bound on fixed steps executed by a single scheduler update.
pub const MAX_STEPS_PER_FRAME: u32 = 4;

/// Game units (pixels) per world unit.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Walk speed at 100% speed.
pub const WALK_SPEED: f32 = 1.25;
/// Horizontal acceleration toward the walk target on the ground.
pub const WALK_ACCELERATION: f32 = 10.0;
/// Ground deceleration when no direction is held.
pub const WALK_FRICTION: f32 = 10.0;
/// Share of ground acceleration available while airborne.
pub const AIR_CONTROL_FACTOR: f32 = 0.8;
/// Horizontal deceleration while airborne. Momentum is kept in the air.
pub const FALL_DRAG: f32 = 0.0;

/// Jump velocity at 100% jump.
pub const JUMP_SPEED: f32 = 5.55;
/// Second jump strength relative to the first.
pub const DOUBLE_JUMP_MODIFIER: f32 = 0.7;

/// Downward acceleration in air.
pub const GRAVITY: f32 = 20.0;
/// Terminal fall speed.
pub const MAX_FALL_SPEED: f32 = 7.5;

/// Vertical speed on ladders and ropes.
pub const CLIMB_SPEED: f32 = 1.2;

/// Horizontal swim speed at 100% speed.
pub const SWIM_SPEED: f32 = 1.4;
/// Friction multiplier applied while underwater.
pub const SWIM_FRICTION_MULTIPLIER: f32 = 0.5;
/// Downward acceleration underwater.
pub const SWIM_GRAVITY: f32 = 2.8;
/// Terminal sink speed underwater, capped at the swim speed.
pub const SWIM_MAX_FALL_SPEED: f32 = SWIM_SPEED;
/// Upward velocity of a swim stroke.
pub const SWIM_JUMP_SPEED: f32 = 3.08;

/// Friction multiplier applied while standing on a slippery foothold.
pub const ICE_FRICTION_MULTIPLIER: f32 = 0.1;

/// Default body width in world units.
pub const BODY_WIDTH: f32 = 0.3;
/// Default body height in world units.
pub const BODY_HEIGHT: f32 = 0.6;

/// Offset subtracted from surfaces reported by
/// [`FootholdService::ground_below`](crate::foothold::FootholdService::ground_below).
pub const GROUND_SINK_OFFSET: f32 = 1.0;
/// Vertical tolerance, in game units, used when picking the foothold at a point.
pub const FOOTHOLD_PICK_TOLERANCE: f32 = 5.0;
/// Footholds narrower than this (game units) count as walls.
pub const WALL_WIDTH_EPSILON: f32 = 0.1;
/// Segment extents below this (game units) are treated as a single point.
pub const DEGENERATE_EPSILON: f32 = 1e-4;
/// Column width, in game units, of the foothold spatial index.
pub const INDEX_BUCKET_WIDTH: f32 = 256.0;

/// Slack, in world units, allowed when deciding that a foot crossed a surface.
pub const LANDING_EPSILON: f32 = 0.005;
/// Base distance, in world units, a grounded body may step up or down per tick.
pub const GROUND_SNAP_DISTANCE: f32 = 0.05;
/// Steepest slope (|dy/dx|) a grounded body may walk up.
pub const MAX_WALKABLE_SLOPE: f32 = 2.0;
/// Distance, in world units, a body is pushed below its foothold when dropping
/// through it.
pub const DROP_THROUGH_NUDGE: f32 = 0.02;
/// Horizontal reach, in world units, for grabbing a ladder.
pub const LADDER_GRAB_TOLERANCE: f32 = 0.1;
