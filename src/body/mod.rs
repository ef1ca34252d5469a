//! Kinematic player body.
//!
//! A [`Player`] is an axis-aligned box that walks, jumps, climbs and swims
//! over the foothold graph. It is advanced one fixed step at a time through
//! [`PhysicsBody::fixed_update`]; every step it
//!
//! 1. restores the last valid position if its state went non-finite,
//! 2. samples the input provider and ticks its movement modifiers,
//! 3. integrates horizontal motion, gravity and jump impulses,
//! 4. resolves walls, bounds, landing and ground following,
//! 5. settles its [`MovementState`] and notifies view listeners.
//!
//! Control methods such as [`Player::jump`] and [`Player::crouch`] act
//! immediately and notify listeners before returning.

mod climb;
mod collision;
mod input;
mod modifiers;
mod state;
mod tick;
mod view;

use glam::Vec2;
use log::warn;

pub use input::{InputProvider, InputState};
pub use modifiers::{
    fold_effects, ModifierEffect, ModifierSnapshot, MovementModifier, TimedModifier,
};
pub use state::{settle_state, transition_event, AnimationEvent, MovementState};
pub use view::{ListenerId, PlayerViewListener};

use crate::config::BodyConfig;
use crate::foothold::{FootholdId, FootholdService};
use crate::ladder::Ladder;
use crate::numeric::percent_scale;
use crate::physics::{jump_velocity, walk_speed};
use crate::scheduler::{PhysicsBody, StepContext, StepError};
use crate::vector_math::interpolate;
use crate::{DOUBLE_JUMP_MODIFIER, SWIM_JUMP_SPEED};
use collision::{Contact, Extents};
use input::EdgeLatch;
use view::Listeners;

/// Held controls, set either by the control methods or by the input provider.
#[derive(Debug, Clone, Copy, Default)]
struct Intent {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    crouch: bool,
    drop: bool,
}

impl Intent {
    const fn direction(self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    const fn climb_direction(self) -> f32 {
        match (self.up, self.down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Values last reported to listeners.
#[derive(Debug, Clone, Copy)]
struct Published {
    position: Vec2,
    velocity: Vec2,
    grounded: bool,
    state: MovementState,
}

/// A controllable kinematic body.
pub struct Player {
    config: BodyConfig,
    position: Vec2,
    previous_position: Vec2,
    last_valid_position: Vec2,
    velocity: Vec2,
    grounded: bool,
    foothold: Option<FootholdId>,
    state: MovementState,
    ladder: Option<Ladder>,
    intent: Intent,
    jump_latch: EdgeLatch,
    double_jump_used: bool,
    underwater: bool,
    active: bool,
    modifiers: Vec<Box<dyn MovementModifier>>,
    input: Option<Box<dyn InputProvider>>,
    listeners: Listeners,
    events: Vec<AnimationEvent>,
    published: Published,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("grounded", &self.grounded)
            .field("foothold", &self.foothold)
            .field("state", &self.state)
            .field("modifiers", &self.modifiers.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(BodyConfig::default())
    }
}

impl Player {
    /// Creates an airborne body at the origin.
    #[must_use]
    pub fn new(config: BodyConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            previous_position: Vec2::ZERO,
            last_valid_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            grounded: false,
            foothold: None,
            state: MovementState::Standing,
            ladder: None,
            intent: Intent::default(),
            jump_latch: EdgeLatch::default(),
            double_jump_used: false,
            underwater: false,
            active: true,
            modifiers: Vec::new(),
            input: None,
            listeners: Listeners::default(),
            events: Vec::new(),
            published: Published {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                grounded: false,
                state: MovementState::Standing,
            },
        }
    }

    /// Places a new body at `position` without notifying anyone.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        if position.is_finite() {
            self.position = position;
            self.previous_position = position;
            self.last_valid_position = position;
            self.published.position = position;
        }
        self
    }

    /// Tunables in use.
    #[must_use]
    pub const fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// Centre position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Position at the start of the last tick.
    #[must_use]
    pub const fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    /// Velocity in world units per second.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Current movement state.
    #[must_use]
    pub const fn state(&self) -> MovementState {
        self.state
    }

    /// Whether the body rests on a foothold.
    #[must_use]
    pub const fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Supporting foothold while grounded.
    #[must_use]
    pub const fn foothold(&self) -> Option<FootholdId> {
        self.foothold
    }

    /// Ladder being climbed.
    #[must_use]
    pub const fn ladder(&self) -> Option<&Ladder> {
        self.ladder.as_ref()
    }

    /// Foot point: centre X at the bottom of the box.
    #[must_use]
    pub fn foot_position(&self) -> Vec2 {
        Vec2::new(self.position.x, self.extents().foot(self.position))
    }

    /// Position blended between the last two ticks for rendering.
    ///
    /// # Examples
    /// ```
    /// use footing::body::Player;
    /// use glam::Vec2;
    /// let player = Player::default().with_position(Vec2::new(1.0, 2.0));
    /// assert_eq!(player.render_position(0.5), Vec2::new(1.0, 2.0));
    /// ```
    #[must_use]
    pub fn render_position(&self, alpha: f32) -> Vec2 {
        interpolate(self.previous_position, self.position, alpha)
    }

    /// Teleports the body. Non-finite positions are rejected.
    ///
    /// The body becomes airborne until the next tick resolves its contact.
    pub fn set_position(&mut self, position: Vec2) {
        if !position.is_finite() {
            warn!("rejected non-finite position {position}");
            return;
        }
        self.position = position;
        self.previous_position = position;
        self.last_valid_position = position;
        if self.state != MovementState::Climbing {
            self.leave_ground();
        }
        self.publish();
    }

    /// Overrides the velocity. Non-finite velocities are rejected.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if !velocity.is_finite() {
            warn!("rejected non-finite velocity {velocity}");
            return;
        }
        self.velocity = velocity;
        self.publish();
    }

    /// Pauses or resumes physics for this body.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Changes the speed stat.
    pub const fn set_speed_percent(&mut self, percent: u16) {
        self.config.speed_percent = percent;
    }

    /// Changes the jump stat.
    pub const fn set_jump_percent(&mut self, percent: u16) {
        self.config.jump_percent = percent;
    }

    /// Grants or revokes the double jump.
    pub const fn set_double_jump(&mut self, enabled: bool) {
        self.config.double_jump = enabled;
    }

    /// Holds or releases left.
    pub const fn move_left(&mut self, held: bool) {
        self.intent.left = held;
    }

    /// Holds or releases right.
    pub const fn move_right(&mut self, held: bool) {
        self.intent.right = held;
    }

    /// Holds or releases climb up.
    pub const fn climb_up(&mut self, held: bool) {
        self.intent.up = held;
    }

    /// Holds or releases climb down.
    pub const fn climb_down(&mut self, held: bool) {
        self.intent.down = held;
    }

    /// Applies a jump impulse now, if the body may jump.
    ///
    /// Grounded bodies leave the ground, climbing bodies leave the ladder and
    /// airborne bodies use their double jump or a swim stroke when allowed.
    pub fn jump(&mut self) {
        self.try_jump();
        self.publish();
    }

    /// Starts or stops crouching. Only grounded, upright bodies crouch.
    pub fn crouch(&mut self, held: bool) {
        self.intent.crouch = held;
        self.apply_crouch();
        self.publish();
    }

    /// Grabs `ladder` when the feet are within reach of it.
    pub fn start_climbing(&mut self, ladder: &Ladder) {
        self.begin_climb(*ladder);
        self.publish();
    }

    /// Lets go of the ladder.
    pub fn stop_climbing(&mut self) {
        if self.state == MovementState::Climbing {
            self.ladder = None;
            self.velocity = Vec2::ZERO;
            self.set_state(MovementState::Standing);
        }
        self.publish();
    }

    /// Asks to fall through the current floor on the next tick.
    ///
    /// Ignored when the body is airborne or stands on the lowest floor.
    pub const fn drop_through_platform(&mut self) {
        if self.grounded {
            self.intent.drop = true;
        }
    }

    /// Adds a modifier, replacing one with the same id.
    pub fn add_movement_modifier(&mut self, modifier: Box<dyn MovementModifier>) {
        match self.modifiers.iter().position(|m| m.id() == modifier.id()) {
            Some(slot) => {
                if let Some(existing) = self.modifiers.get_mut(slot) {
                    *existing = modifier;
                }
            }
            None => self.modifiers.push(modifier),
        }
        self.notify_modifiers();
    }

    /// Removes the modifier with `id`. Returns `false` if none matched.
    pub fn remove_movement_modifier(&mut self, id: &str) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.id() != id);
        let removed = self.modifiers.len() != before;
        if removed {
            self.notify_modifiers();
        }
        removed
    }

    /// Snapshots of the active modifiers, in application order.
    #[must_use]
    pub fn modifiers(&self) -> Vec<ModifierSnapshot> {
        self.modifiers
            .iter()
            .map(|m| ModifierSnapshot::of(m.as_ref()))
            .collect()
    }

    /// Combined effect of the active modifiers.
    #[must_use]
    pub fn movement_effect(&self) -> ModifierEffect {
        fold_effects(&self.modifiers)
    }

    /// Drops the body onto the highest floor at or below its feet.
    ///
    /// Returns `false` and leaves the body untouched when there is none.
    pub fn snap_to_ground(&mut self, service: &FootholdService) -> bool {
        let Some(contact) = collision::ground_beneath(service, self.position, self.extents())
        else {
            return false;
        };
        self.ladder = None;
        self.rest_on(contact);
        self.previous_position = self.position;
        self.last_valid_position = self.position;
        let next = settle_state(MovementState::Standing, true, self.velocity.x, self.underwater);
        self.set_state(next);
        self.publish();
        true
    }

    /// Feeds the body from `provider` every tick.
    ///
    /// While a provider is attached its samples replace the held controls.
    pub fn set_input_provider(&mut self, provider: Box<dyn InputProvider>) {
        self.input = Some(provider);
    }

    /// Detaches the input provider.
    pub fn clear_input_provider(&mut self) {
        self.input = None;
    }

    /// Registers a view listener.
    pub fn add_listener(&mut self, listener: Box<dyn PlayerViewListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Removes a view listener. Returns `false` when `id` is unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn extents(&self) -> Extents {
        Extents {
            half_width: self.config.half_width(),
            half_height: self.config.half_height(),
        }
    }

    fn walk_target(&self, effect: ModifierEffect) -> f32 {
        walk_speed(self.config.speed_percent) * effect.speed
    }

    fn swim_stroke(&self, effect: ModifierEffect) -> f32 {
        SWIM_JUMP_SPEED * percent_scale(self.config.jump_percent) * effect.jump
    }

    const fn leave_ground(&mut self) {
        self.grounded = false;
        self.foothold = None;
    }

    const fn rest_on(&mut self, contact: Contact) {
        self.position.y = contact.centre_y;
        self.velocity.y = 0.0;
        self.grounded = true;
        self.foothold = Some(contact.foothold);
        self.double_jump_used = false;
    }

    fn set_state(&mut self, next: MovementState) {
        if next == self.state {
            return;
        }
        if let Some(event) = transition_event(self.state, next) {
            self.events.push(event);
        }
        self.state = next;
    }

    fn try_jump(&mut self) {
        let effect = self.movement_effect();
        if effect.prevents_jumping {
            return;
        }
        let impulse = jump_velocity(self.config.jump_percent) * effect.jump;
        match self.state {
            MovementState::Crouching => {}
            MovementState::Climbing => {
                let vx = self.intent.direction() * self.walk_target(effect);
                self.ladder = None;
                self.velocity = Vec2::new(vx, impulse);
                self.leave_ground();
                self.set_state(MovementState::Jumping);
                self.events.push(AnimationEvent::Jump);
            }
            _ if self.grounded => {
                self.velocity.y = if self.underwater {
                    self.swim_stroke(effect)
                } else {
                    impulse
                };
                self.leave_ground();
                self.double_jump_used = false;
                self.events.push(AnimationEvent::Jump);
                self.set_state(if self.underwater {
                    MovementState::Swimming
                } else {
                    MovementState::Jumping
                });
            }
            _ if self.underwater => {
                self.velocity.y = self.swim_stroke(effect);
                self.events.push(AnimationEvent::Jump);
                self.set_state(MovementState::Swimming);
            }
            _ if self.config.double_jump && !self.double_jump_used => {
                self.velocity.y = impulse * DOUBLE_JUMP_MODIFIER;
                self.double_jump_used = true;
                self.events.push(AnimationEvent::Jump);
            }
            _ => {}
        }
    }

    fn apply_crouch(&mut self) {
        let upright = matches!(
            self.state,
            MovementState::Standing | MovementState::Walking
        );
        if self.intent.crouch && self.grounded && upright {
            self.velocity.x = 0.0;
            self.set_state(MovementState::Crouching);
        } else if !self.intent.crouch && self.state == MovementState::Crouching {
            self.set_state(MovementState::Standing);
        }
    }

    fn begin_climb(&mut self, ladder: Ladder) -> bool {
        if self.state == MovementState::Climbing || !ladder.contains(self.foot_position()) {
            return false;
        }
        self.ladder = Some(ladder);
        self.position.x = ladder.x;
        self.velocity = Vec2::ZERO;
        self.leave_ground();
        self.double_jump_used = false;
        self.set_state(MovementState::Climbing);
        true
    }

    fn notify_modifiers(&mut self) {
        let snapshots = self.modifiers();
        self.listeners
            .each(|listener| listener.on_modifiers_changed(&snapshots));
    }

    /// Reports every value that changed since the last report, then queued
    /// animation cues.
    fn publish(&mut self) {
        let current = Published {
            position: self.position,
            velocity: self.velocity,
            grounded: self.grounded,
            state: self.state,
        };
        let last = self.published;
        let events = std::mem::take(&mut self.events);
        self.listeners.each(|listener| {
            if current.position != last.position {
                listener.on_position_changed(current.position);
            }
            if current.velocity != last.velocity {
                listener.on_velocity_changed(current.velocity);
            }
            if current.grounded != last.grounded {
                listener.on_grounded_changed(current.grounded);
            }
            if current.state != last.state {
                listener.on_state_changed(current.state);
            }
            for event in &events {
                listener.on_animation_event(*event);
            }
        });
        self.published = current;
    }
}

impl PhysicsBody for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn is_physics_active(&self) -> bool {
        self.active
    }

    fn fixed_update(&mut self, ctx: &StepContext<'_>) -> Result<(), StepError> {
        self.step(ctx);
        Ok(())
    }
}
