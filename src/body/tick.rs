//! One fixed step of the player body.

use glam::Vec2;
use log::{debug, warn};

use super::collision::{self, GroundStep};
use super::state::{settle_state, AnimationEvent, MovementState};
use super::{Intent, ModifierEffect, Player};
use crate::physics::{accelerate_toward, apply_friction, apply_gravity};
use crate::scheduler::StepContext;
use crate::world::World;
use crate::{
    DROP_THROUGH_NUDGE, ICE_FRICTION_MULTIPLIER, LANDING_EPSILON, WALK_ACCELERATION,
    WALK_FRICTION,
};

/// Properties of the floor under a grounded body.
#[derive(Debug, Clone, Copy)]
struct Surface {
    friction: f32,
    drift: f32,
}

impl Surface {
    const AIR: Self = Self {
        friction: 1.0,
        drift: 0.0,
    };
}

impl Player {
    /// Advances the body by one fixed step.
    pub fn step(&mut self, ctx: &StepContext<'_>) {
        let world = ctx.world;
        let dt = ctx.dt;
        self.underwater = world.underwater;
        self.recover_non_finite();
        self.previous_position = self.position;

        let jump_pressed = self.sample_input(world);
        self.tick_modifiers(dt);
        let mut effect = self.movement_effect();
        if self.underwater {
            effect = effect.combine(ModifierEffect::SWIMMING);
        }

        if self.state == MovementState::Climbing {
            if jump_pressed {
                self.try_jump();
            } else {
                self.climb_step(world, dt);
            }
        } else {
            if std::mem::take(&mut self.intent.drop) {
                self.drop_through(world);
            }
            let surface = self.surface(world);
            self.integrate(effect, surface, dt);
            if jump_pressed {
                self.try_jump();
            }
            self.move_and_collide(world, surface.drift, dt);
        }

        let next = settle_state(self.state, self.grounded, self.velocity.x, self.underwater);
        self.set_state(next);
        self.apply_crouch();
        if world.below_bounds(self.foot_position().y) {
            debug!("body fell below the map at {}", self.position);
        }
        if self.position.is_finite() {
            self.last_valid_position = self.position;
        } else {
            self.recover_non_finite();
        }
        self.publish();
    }

    fn recover_non_finite(&mut self) {
        if !self.position.is_finite() {
            warn!(
                "non-finite position {}; restoring {}",
                self.position, self.last_valid_position
            );
            self.position = self.last_valid_position;
            self.velocity = Vec2::ZERO;
            if self.state != MovementState::Climbing {
                self.leave_ground();
            }
        }
        if !self.velocity.is_finite() {
            warn!("non-finite velocity {}; zeroing", self.velocity);
            self.velocity = Vec2::ZERO;
        }
    }

    /// Copies the provider's sample into the held controls and handles the
    /// input-only gestures: ladder grabs and drop-through. Returns whether a
    /// jump was pressed this tick.
    ///
    /// While a modifier prevents movement the sample is dropped and every
    /// held control is released.
    fn sample_input(&mut self, world: &World) -> bool {
        let Some(provider) = self.input.as_mut() else {
            return false;
        };
        let input = provider.sample();
        let pressed = self.jump_latch.press(input.jump);
        if self.movement_effect().prevents_movement {
            self.intent = Intent::default();
            return false;
        }
        self.intent.left = input.left;
        self.intent.right = input.right;
        self.intent.up = input.up;
        self.intent.down = input.down;

        if self.state == MovementState::Climbing {
            self.intent.crouch = false;
            return pressed;
        }
        let foot = self.foot_position();
        if input.up {
            let ladder = world
                .ladder_near(foot)
                .filter(|ladder| foot.y < ladder.top - LANDING_EPSILON)
                .copied();
            if let Some(ladder) = ladder {
                self.begin_climb(ladder);
                return false;
            }
        } else if input.down && pressed && self.grounded {
            self.intent.drop = true;
            return false;
        } else if input.down {
            let ladder = world
                .ladder_near(foot)
                .filter(|ladder| foot.y > ladder.bottom + LANDING_EPSILON)
                .copied();
            if let Some(ladder) = ladder {
                self.begin_climb(ladder);
                return false;
            }
        }
        self.intent.crouch = input.down;
        pressed
    }

    fn tick_modifiers(&mut self, dt: f32) {
        let before = self.modifiers.len();
        self.modifiers.retain_mut(|modifier| modifier.tick(dt));
        if self.modifiers.len() != before {
            debug!("{} movement modifiers expired", before - self.modifiers.len());
            self.notify_modifiers();
        }
    }

    fn surface(&self, world: &World) -> Surface {
        if !self.grounded {
            return Surface::AIR;
        }
        self.foothold
            .and_then(|id| world.footholds.get(id))
            .map_or(Surface::AIR, |fh| Surface {
                friction: if fh.slippery {
                    ICE_FRICTION_MULTIPLIER
                } else {
                    1.0
                },
                drift: fh.conveyor.unwrap_or(0.0),
            })
    }

    fn integrate(&mut self, effect: ModifierEffect, surface: Surface, dt: f32) {
        let direction = if effect.prevents_movement || self.state == MovementState::Crouching {
            0.0
        } else {
            self.intent.direction()
        };
        self.velocity.x = if direction == 0.0 {
            apply_friction(
                self.velocity.x,
                WALK_FRICTION * effect.friction * surface.friction,
                dt,
                self.grounded,
            )
        } else {
            accelerate_toward(
                self.velocity.x,
                direction * self.walk_target(effect),
                WALK_ACCELERATION * effect.acceleration,
                dt,
                self.grounded,
            )
        };
        self.velocity.y = if self.grounded {
            0.0
        } else {
            apply_gravity(self.velocity.y, dt, self.underwater)
        };
    }

    fn drop_through(&mut self, world: &World) {
        let Some(current) = self.foothold.filter(|_| self.grounded) else {
            return;
        };
        if !collision::has_floor_below(&world.footholds, current, self.position, self.extents()) {
            debug!("no floor below foothold {current:?}; drop ignored");
            return;
        }
        self.position.y -= DROP_THROUGH_NUDGE;
        self.leave_ground();
    }

    fn move_and_collide(&mut self, world: &World, drift: f32, dt: f32) {
        let ext = self.extents();
        let service = &world.footholds;
        let prev = self.position;
        let mut next = prev + (self.velocity + Vec2::new(drift, 0.0)) * dt;

        if let Some(x) = collision::clamp_to_walls(service, prev, next.x, ext) {
            next.x = x;
            self.velocity.x = 0.0;
        }
        let bounded = world.clamp_x(next.x, ext.half_width);
        if (bounded - next.x).abs() > 0.0 {
            next.x = bounded;
            self.velocity.x = 0.0;
        }

        if self.grounded {
            match collision::follow_ground(service, self.foothold, prev, next.x, ext) {
                GroundStep::Supported(contact) => {
                    self.position = next;
                    self.rest_on(contact);
                }
                GroundStep::Blocked => {
                    self.position = prev;
                    self.velocity.x = 0.0;
                }
                GroundStep::Unsupported => {
                    self.position = next;
                    self.leave_ground();
                }
            }
        } else {
            self.position = next;
            let touchdown =
                collision::sweep_landing(service, prev, next, self.velocity.y, ext);
            if let Some(landing) = touchdown {
                self.position.x = landing.x;
                self.rest_on(landing.contact);
                self.events.push(AnimationEvent::Land);
            }
        }
    }
}
