#![cfg_attr(docsrs, feature(doc_cfg))]
//! Deterministic platformer physics over foothold graphs.
//!
//! The crate reproduces classic side-scroller movement: a kinematic box walks,
//! jumps, climbs and swims over a linked chain of line segments. Physics runs
//! at a fixed timestep driven by [`scheduler::PhysicsScheduler`], which hands
//! every registered body a read-only [`world::World`] each step.
pub mod body;
pub mod config;
pub mod constants;
pub mod coords;
pub mod foothold;
pub mod ladder;
pub mod logging;
pub mod map;
pub mod numeric;
pub mod physics;
pub mod scheduler;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use body::{MovementState, Player};
pub use config::BodyConfig;
pub use foothold::{Foothold, FootholdId, FootholdService};
pub use logging::init as init_logging;
pub use map::load_map;
pub use physics::{accelerate_toward, apply_friction, apply_gravity, jump_velocity, walk_speed};
pub use scheduler::{PhysicsBody, PhysicsScheduler, StepContext, StepError};
pub use vector_math::{interpolate, move_toward};
pub use world::World;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust
    //! use footing::prelude::*;
    //! let world = World::with_footholds([Foothold::new(1, -500.0, 0.0, 500.0, 0.0)]);
    //! let mut player = Player::default().with_position(Vec2::new(0.0, 1.0));
    //! player.step(&StepContext::fixed(&world, 1));
    //! assert_eq!(player.state(), MovementState::Jumping);
    //! ```

    pub use crate::body::{InputState, MovementState, Player, PlayerViewListener, TimedModifier};
    pub use crate::foothold::{Foothold, FootholdId, FootholdService};
    pub use crate::ladder::Ladder;
    pub use crate::scheduler::{PhysicsBody, PhysicsScheduler, StepContext};
    pub use crate::world::World;
    pub use glam::Vec2;
}
