//! Ladder and rope movement.

use glam::Vec2;

use super::collision;
use super::state::MovementState;
use super::Player;
use crate::world::World;
use crate::{CLIMB_SPEED, GROUND_SNAP_DISTANCE};

impl Player {
    /// Moves along the held ladder. Reaching either end lets go and stands
    /// the body on any floor there.
    pub(super) fn climb_step(&mut self, world: &World, dt: f32) {
        let Some(ladder) = self.ladder else {
            self.set_state(MovementState::Standing);
            return;
        };
        let ext = self.extents();
        let direction = self.intent.climb_direction();
        self.velocity = Vec2::new(0.0, direction * CLIMB_SPEED);
        self.position.x = ladder.x;
        if direction == 0.0 {
            return;
        }

        let foot = ext.foot(self.position) + self.velocity.y * dt;
        let at_end = if direction > 0.0 {
            foot >= ladder.top
        } else {
            foot <= ladder.bottom
        };
        self.position.y = ext.centre_on(ladder.clamp_y(foot));
        if !at_end {
            return;
        }

        self.ladder = None;
        self.velocity = Vec2::ZERO;
        self.set_state(MovementState::Standing);
        if let Some(contact) =
            collision::settle(&world.footholds, self.position, ext, GROUND_SNAP_DISTANCE)
        {
            self.rest_on(contact);
        }
    }
}
