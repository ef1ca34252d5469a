//! A view listener that remembers every callback.

use std::cell::RefCell;
use std::rc::Rc;

use footing::body::{AnimationEvent, ModifierSnapshot, MovementState, PlayerViewListener};
use glam::Vec2;

/// One recorded listener callback.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    /// `on_position_changed`
    Position(Vec2),
    /// `on_velocity_changed`
    Velocity(Vec2),
    /// `on_state_changed`
    State(MovementState),
    /// `on_grounded_changed`
    Grounded(bool),
    /// `on_animation_event`
    Event(AnimationEvent),
    /// `on_modifiers_changed`, reduced to the modifier ids.
    Modifiers(Vec<String>),
}

/// Records callbacks in arrival order.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Every callback received so far.
    pub calls: Vec<ViewCall>,
}

impl Recorder {
    /// A recorder that can be registered with a player and inspected later.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Animation cues received, in order.
    #[must_use]
    pub fn events(&self) -> Vec<AnimationEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Event(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// State changes received, in order.
    #[must_use]
    pub fn states(&self) -> Vec<MovementState> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::State(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PlayerViewListener for Recorder {
    fn on_position_changed(&mut self, position: Vec2) {
        self.calls.push(ViewCall::Position(position));
    }

    fn on_velocity_changed(&mut self, velocity: Vec2) {
        self.calls.push(ViewCall::Velocity(velocity));
    }

    fn on_state_changed(&mut self, state: MovementState) {
        self.calls.push(ViewCall::State(state));
    }

    fn on_grounded_changed(&mut self, grounded: bool) {
        self.calls.push(ViewCall::Grounded(grounded));
    }

    fn on_animation_event(&mut self, event: AnimationEvent) {
        self.calls.push(ViewCall::Event(event));
    }

    fn on_modifiers_changed(&mut self, modifiers: &[ModifierSnapshot]) {
        self.calls.push(ViewCall::Modifiers(
            modifiers.iter().map(|m| m.id.clone()).collect(),
        ));
    }
}
