//! Movement modifiers.
//!
//! Buffs, debuffs and environmental effects scale the base movement constants.
//! Each active modifier contributes a [`ModifierEffect`]; the body folds them
//! in insertion order before integrating a tick.

use serde::Serialize;

use crate::{SWIM_FRICTION_MULTIPLIER, SWIM_SPEED, WALK_SPEED};

/// Multipliers and flags one modifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModifierEffect {
    /// Walk speed multiplier.
    pub speed: f32,
    /// Jump velocity multiplier.
    pub jump: f32,
    /// Horizontal acceleration multiplier.
    pub acceleration: f32,
    /// Ground friction multiplier.
    pub friction: f32,
    /// Ignores directional input.
    pub prevents_movement: bool,
    /// Ignores jump input.
    pub prevents_jumping: bool,
}

impl Default for ModifierEffect {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ModifierEffect {
    /// Effect that changes nothing.
    pub const NEUTRAL: Self = Self {
        speed: 1.0,
        jump: 1.0,
        acceleration: 1.0,
        friction: 1.0,
        prevents_movement: false,
        prevents_jumping: false,
    };

    /// Effect of being underwater: swim speed instead of walk speed and
    /// reduced friction.
    pub const SWIMMING: Self = Self {
        speed: SWIM_SPEED / WALK_SPEED,
        friction: SWIM_FRICTION_MULTIPLIER,
        ..Self::NEUTRAL
    };

    /// Stacks two effects: multipliers multiply, flags combine with OR.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            speed: self.speed * other.speed,
            jump: self.jump * other.jump,
            acceleration: self.acceleration * other.acceleration,
            friction: self.friction * other.friction,
            prevents_movement: self.prevents_movement || other.prevents_movement,
            prevents_jumping: self.prevents_jumping || other.prevents_jumping,
        }
    }
}

/// A pluggable effect on a body's movement.
pub trait MovementModifier {
    /// Identifier; adding a modifier with an existing id replaces it.
    fn id(&self) -> &str;
    /// Effect applied while active.
    fn effect(&self) -> ModifierEffect;
    /// Seconds left, or `None` for permanent modifiers.
    fn remaining(&self) -> Option<f32>;
    /// Advances the timer. Returns `false` once the modifier has expired.
    fn tick(&mut self, dt: f32) -> bool;
}

/// Modifier with a fixed effect and an optional countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedModifier {
    id: String,
    effect: ModifierEffect,
    remaining: Option<f32>,
}

impl TimedModifier {
    /// Creates a modifier. `duration` of `None` never expires.
    #[must_use]
    pub fn new(id: impl Into<String>, effect: ModifierEffect, duration: Option<f32>) -> Self {
        Self {
            id: id.into(),
            effect,
            remaining: duration,
        }
    }

    /// Speed buff or debuff.
    ///
    /// # Examples
    /// ```
    /// use footing::body::{MovementModifier, TimedModifier};
    /// let mut haste = TimedModifier::speed("haste", 1.5, Some(0.5));
    /// assert_eq!(haste.effect().speed, 1.5);
    /// assert!(haste.tick(0.25));
    /// assert!(!haste.tick(0.25));
    /// ```
    #[must_use]
    pub fn speed(id: impl Into<String>, multiplier: f32, duration: Option<f32>) -> Self {
        Self::new(
            id,
            ModifierEffect {
                speed: multiplier,
                ..ModifierEffect::NEUTRAL
            },
            duration,
        )
    }

    /// Jump buff or debuff.
    #[must_use]
    pub fn jump(id: impl Into<String>, multiplier: f32, duration: Option<f32>) -> Self {
        Self::new(
            id,
            ModifierEffect {
                jump: multiplier,
                ..ModifierEffect::NEUTRAL
            },
            duration,
        )
    }

    /// Blocks all movement and jumping for `duration` seconds.
    #[must_use]
    pub fn stun(duration: f32) -> Self {
        Self::new(
            "stun",
            ModifierEffect {
                speed: 0.0,
                jump: 0.0,
                prevents_movement: true,
                prevents_jumping: true,
                ..ModifierEffect::NEUTRAL
            },
            Some(duration),
        )
    }

    /// Removes ground friction until taken off.
    #[must_use]
    pub fn slippery() -> Self {
        Self::new(
            "slippery",
            ModifierEffect {
                friction: 0.0,
                ..ModifierEffect::NEUTRAL
            },
            None,
        )
    }
}

impl MovementModifier for TimedModifier {
    fn id(&self) -> &str {
        &self.id
    }

    fn effect(&self) -> ModifierEffect {
        self.effect
    }

    fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    fn tick(&mut self, dt: f32) -> bool {
        match self.remaining.as_mut() {
            None => true,
            Some(left) => {
                *left -= dt;
                *left > 0.0
            }
        }
    }
}

/// Read-only view of a modifier handed to listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierSnapshot {
    /// Modifier id.
    pub id: String,
    /// Effect applied.
    pub effect: ModifierEffect,
    /// Seconds left, `None` when permanent.
    pub remaining: Option<f32>,
}

impl ModifierSnapshot {
    /// Captures the current state of `modifier`.
    #[must_use]
    pub fn of(modifier: &dyn MovementModifier) -> Self {
        Self {
            id: modifier.id().to_owned(),
            effect: modifier.effect(),
            remaining: modifier.remaining(),
        }
    }
}

/// Folds a modifier list into one effect, in order.
#[must_use]
pub fn fold_effects<'a>(
    modifiers: impl IntoIterator<Item = &'a Box<dyn MovementModifier>>,
) -> ModifierEffect {
    modifiers
        .into_iter()
        .fold(ModifierEffect::NEUTRAL, |acc, m| acc.combine(m.effect()))
}
