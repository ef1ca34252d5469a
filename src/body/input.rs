//! Input sampling.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Buttons held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Walk left.
    pub left: bool,
    /// Walk right.
    pub right: bool,
    /// Climb up or grab a ladder.
    pub up: bool,
    /// Crouch, climb down or drop through with jump.
    pub down: bool,
    /// Jump. Only the press edge triggers an impulse.
    pub jump: bool,
    /// Attack. Sampled but unused by movement.
    pub attack: bool,
}

/// Source of per-tick input.
#[cfg_attr(test, mockall::automock)]
pub trait InputProvider {
    /// Buttons held this tick.
    fn sample(&mut self) -> InputState;
}

impl InputProvider for Rc<RefCell<InputState>> {
    fn sample(&mut self) -> InputState {
        *self.borrow()
    }
}

/// Turns held-button samples into press edges.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct EdgeLatch {
    held: bool,
}

impl EdgeLatch {
    /// `true` only on the sample where `pressed` goes from released to held.
    pub(super) const fn press(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn latch_fires_once_per_press() {
        let mut latch = EdgeLatch::default();
        let fired: Vec<bool> = [true, true, false, true]
            .into_iter()
            .map(|held| latch.press(held))
            .collect();
        assert_eq!(fired, vec![true, false, false, true]);
    }

    #[rstest]
    fn shared_state_reflects_latest_write() {
        let shared = Rc::new(RefCell::new(InputState::default()));
        let mut provider = shared.clone();
        shared.borrow_mut().right = true;
        assert!(provider.sample().right);
    }
}
