//! View listener registry.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::modifiers::ModifierSnapshot;
use super::state::{AnimationEvent, MovementState};

/// Receives body changes for presentation.
///
/// Callbacks fire synchronously from the tick or API call that caused the
/// change. Every method defaults to a no-op.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerViewListener {
    /// Centre position moved.
    fn on_position_changed(&mut self, _position: Vec2) {}
    /// Velocity changed.
    fn on_velocity_changed(&mut self, _velocity: Vec2) {}
    /// Movement state changed.
    fn on_state_changed(&mut self, _state: MovementState) {}
    /// Grounded flag flipped.
    fn on_grounded_changed(&mut self, _grounded: bool) {}
    /// Animation cue raised.
    fn on_animation_event(&mut self, _event: AnimationEvent) {}
    /// Active modifier list changed.
    fn on_modifiers_changed(&mut self, _modifiers: &[ModifierSnapshot]) {}
}

impl<T: PlayerViewListener + ?Sized> PlayerViewListener for Rc<RefCell<T>> {
    fn on_position_changed(&mut self, position: Vec2) {
        self.borrow_mut().on_position_changed(position);
    }

    fn on_velocity_changed(&mut self, velocity: Vec2) {
        self.borrow_mut().on_velocity_changed(velocity);
    }

    fn on_state_changed(&mut self, state: MovementState) {
        self.borrow_mut().on_state_changed(state);
    }

    fn on_grounded_changed(&mut self, grounded: bool) {
        self.borrow_mut().on_grounded_changed(grounded);
    }

    fn on_animation_event(&mut self, event: AnimationEvent) {
        self.borrow_mut().on_animation_event(event);
    }

    fn on_modifiers_changed(&mut self, modifiers: &[ModifierSnapshot]) {
        self.borrow_mut().on_modifiers_changed(modifiers);
    }
}

/// Identifier handed out by [`crate::body::Player::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

#[derive(Default)]
pub(super) struct Listeners {
    next: u64,
    entries: Vec<(ListenerId, Box<dyn PlayerViewListener>)>,
}

impl Listeners {
    pub(super) fn add(&mut self, listener: Box<dyn PlayerViewListener>) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.entries.push((id, listener));
        id
    }

    pub(super) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn each(&mut self, mut f: impl FnMut(&mut dyn PlayerViewListener)) {
        for (_, listener) in &mut self.entries {
            f(listener.as_mut());
        }
    }
}
