//! Fixed-timestep physics scheduler.
//!
//! The scheduler banks variable frame time in an accumulator and spends it in
//! whole [`FIXED_TIMESTEP`] steps, at most [`MAX_STEPS_PER_FRAME`] per
//! [`PhysicsScheduler::update`]. A frame that reaches the cap drops whatever
//! time is still banked, partial step included, instead of carrying it into
//! the next frame.
//!
//! Bodies are shared as `Rc<RefCell<_>>` handles and stepped in registration
//! order. A body that fails (or is already borrowed by its owner) is logged,
//! counted in the [`FrameReport`] and skipped for that step only.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec2;
use log::{debug, error, warn};
use thiserror::Error;

use crate::numeric::sanitize_delta;
use crate::world::World;
use crate::{FIXED_TIMESTEP, MAX_STEPS_PER_FRAME};

/// Identifier handed out by [`PhysicsScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicsId(pub u64);

/// Identifier handed out by [`PhysicsScheduler::add_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// Failure of a single body during one fixed step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The body was mutably borrowed elsewhere when its step came up.
    #[error("body {0:?} is busy")]
    BodyBusy(PhysicsId),
    /// The body reported a failure of its own.
    #[error("body step failed: {0}")]
    Failed(String),
}

/// Everything a body may read during one fixed step.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'w> {
    /// Step length in seconds. Always [`FIXED_TIMESTEP`] when driven by the
    /// scheduler.
    pub dt: f32,
    /// Cumulative step number, starting at 1.
    pub tick: u64,
    /// Terrain and region flags.
    pub world: &'w World,
}

impl<'w> StepContext<'w> {
    /// Context for a single fixed step outside the scheduler.
    #[must_use]
    pub const fn fixed(world: &'w World, tick: u64) -> Self {
        Self {
            dt: FIXED_TIMESTEP,
            tick,
            world,
        }
    }
}

/// Capability the scheduler needs from a simulated body.
pub trait PhysicsBody {
    /// Current centre position in world units.
    fn position(&self) -> Vec2;
    /// Current velocity in world units per second.
    fn velocity(&self) -> Vec2;
    /// Inactive bodies stay registered but are not stepped.
    fn is_physics_active(&self) -> bool {
        true
    }
    /// Advances the body by `ctx.dt`.
    ///
    /// # Errors
    /// Implementations return [`StepError::Failed`] when the step could not be
    /// applied. The scheduler logs the error and carries on.
    fn fixed_update(&mut self, ctx: &StepContext<'_>) -> Result<(), StepError>;
}

/// Shared handle to a registered body.
pub type BodyHandle = Rc<RefCell<dyn PhysicsBody>>;

/// Callbacks fired by the scheduler.
#[cfg_attr(test, mockall::automock)]
pub trait SchedulerObserver {
    /// Fired after every fixed step with the cumulative step count.
    fn on_step_completed(&mut self, _total_steps: u64) {}
    /// Fired once per [`PhysicsScheduler::update`].
    fn on_frame_completed(&mut self, _report: &FrameReport) {}
}

/// Outcome of one [`PhysicsScheduler::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Frame delta after sanitising.
    pub delta: f32,
    /// Fixed steps executed.
    pub steps: u32,
    /// Seconds dropped by the step cap.
    pub discarded: f32,
    /// Bodies that failed, with their errors.
    pub failures: Vec<(PhysicsId, StepError)>,
}

/// Counters for debugging overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerStats {
    /// Calls to [`PhysicsScheduler::update`].
    pub frames: u64,
    /// Fixed steps executed.
    pub total_steps: u64,
    /// Banked seconds.
    pub accumulator: f32,
    /// Seconds dropped by the step cap since the last reset.
    pub discarded: f32,
    /// Registered bodies.
    pub registered: usize,
    /// Registered bodies that are currently active.
    pub active: usize,
}

/// Fixed-timestep driver.
#[derive(Default)]
pub struct PhysicsScheduler {
    bodies: BTreeMap<PhysicsId, BodyHandle>,
    observers: BTreeMap<ObserverId, Box<dyn SchedulerObserver>>,
    next_body: u64,
    next_observer: u64,
    accumulator: f32,
    total_steps: u64,
    frames: u64,
    discarded: f32,
}

impl std::fmt::Debug for PhysicsScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicsScheduler")
            .field("bodies", &self.bodies.len())
            .field("observers", &self.observers.len())
            .field("accumulator", &self.accumulator)
            .field("total_steps", &self.total_steps)
            .finish_non_exhaustive()
    }
}

impl PhysicsScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body and returns its id.
    ///
    /// # Examples
    /// ```
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    /// use footing::body::Player;
    /// use footing::scheduler::PhysicsScheduler;
    ///
    /// let mut scheduler = PhysicsScheduler::new();
    /// let player = Rc::new(RefCell::new(Player::default()));
    /// let id = scheduler.register(player.clone());
    /// assert_eq!(scheduler.len(), 1);
    /// assert!(scheduler.unregister(id));
    /// ```
    pub fn register(&mut self, body: BodyHandle) -> PhysicsId {
        self.next_body += 1;
        let id = PhysicsId(self.next_body);
        self.bodies.insert(id, body);
        debug!("registered physics body {id:?}");
        id
    }

    /// Removes a body. Returns `false` when `id` was not registered.
    pub fn unregister(&mut self, id: PhysicsId) -> bool {
        let removed = self.bodies.remove(&id).is_some();
        if removed {
            debug!("unregistered physics body {id:?}");
        }
        removed
    }

    /// Number of registered bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no bodies are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registers an observer.
    pub fn add_observer(&mut self, observer: Box<dyn SchedulerObserver>) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.insert(id, observer);
        id
    }

    /// Removes an observer. Returns `false` when `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    /// Banks `delta` seconds and runs the fixed steps it pays for.
    ///
    /// Non-finite and negative deltas count as zero.
    pub fn update(&mut self, delta: f32, world: &World) -> FrameReport {
        let delta_secs = sanitize_delta(delta);
        if !(delta.is_finite() && delta >= 0.0) {
            warn!("ignoring invalid frame delta {delta}");
        }
        self.frames += 1;
        self.accumulator += delta_secs;

        let mut report = FrameReport {
            delta: delta_secs,
            ..FrameReport::default()
        };
        while self.accumulator >= FIXED_TIMESTEP && report.steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            self.total_steps += 1;
            self.step_bodies(world, &mut report);
            report.steps += 1;
            for observer in self.observers.values_mut() {
                observer.on_step_completed(self.total_steps);
            }
        }

        if report.steps == MAX_STEPS_PER_FRAME && self.accumulator > 0.0 {
            report.discarded = self.accumulator;
            self.discarded += self.accumulator;
            self.accumulator = 0.0;
            debug!(
                "step cap reached; discarded {:.4}s of simulation time",
                report.discarded
            );
        }

        for observer in self.observers.values_mut() {
            observer.on_frame_completed(&report);
        }
        report
    }

    fn step_bodies(&self, world: &World, report: &mut FrameReport) {
        let ctx = StepContext {
            dt: FIXED_TIMESTEP,
            tick: self.total_steps,
            world,
        };
        for (&id, handle) in &self.bodies {
            let result = match handle.try_borrow_mut() {
                Ok(mut body) => {
                    if !body.is_physics_active() {
                        continue;
                    }
                    body.fixed_update(&ctx)
                }
                Err(_) => Err(StepError::BodyBusy(id)),
            };
            if let Err(err) = result {
                error!("physics body {id:?} skipped step {}: {err}", ctx.tick);
                report.failures.push((id, err));
            }
        }
    }

    /// Fraction of a fixed step waiting in the accumulator, in `[0, 1)`.
    ///
    /// The view layer blends the last two physics states with it.
    #[must_use]
    pub fn interpolation_factor(&self) -> f32 {
        (self.accumulator / FIXED_TIMESTEP).clamp(0.0, 1.0 - f32::EPSILON)
    }

    /// Banked seconds.
    #[must_use]
    pub const fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Fixed steps executed since creation or the last reset.
    #[must_use]
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Snapshot of the debug counters.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            frames: self.frames,
            total_steps: self.total_steps,
            accumulator: self.accumulator,
            discarded: self.discarded,
            registered: self.bodies.len(),
            active: self
                .bodies
                .values()
                .filter(|body| body.try_borrow().is_ok_and(|b| b.is_physics_active()))
                .count(),
        }
    }

    /// Drops all bodies and zeroes every counter. Observers stay registered.
    pub fn reset(&mut self) {
        self.bodies.clear();
        self.next_body = 0;
        self.accumulator = 0.0;
        self.total_steps = 0;
        self.frames = 0;
        self.discarded = 0.0;
        debug!("physics scheduler reset");
    }
}

#[cfg(test)]
mod tests;
