//! Unit tests for the fixed-timestep scheduler.

use super::*;
use approx::assert_relative_eq;
use mockall::predicate::eq;
use mockall::Sequence;
use rstest::{fixture, rstest};

#[derive(Debug, Default)]
struct CountingBody {
    active: bool,
    fail: bool,
    dts: Vec<f32>,
    ticks: Vec<u64>,
}

impl CountingBody {
    fn active() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            active: true,
            ..Self::default()
        }))
    }
}

impl PhysicsBody for CountingBody {
    fn position(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn is_physics_active(&self) -> bool {
        self.active
    }

    fn fixed_update(&mut self, ctx: &StepContext<'_>) -> Result<(), StepError> {
        self.dts.push(ctx.dt);
        self.ticks.push(ctx.tick);
        if self.fail {
            return Err(StepError::Failed("boom".to_owned()));
        }
        Ok(())
    }
}

#[fixture]
fn world() -> World {
    World::new()
}

#[rstest]
fn bodies_receive_exact_fixed_timestep(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let body = CountingBody::active();
    scheduler.register(body.clone());

    let report = scheduler.update(0.1, &world);

    assert_eq!(report.steps, MAX_STEPS_PER_FRAME);
    let dts = body.borrow().dts.clone();
    assert_eq!(dts.len(), 4);
    assert!(dts.iter().all(|dt| dt.to_bits() == FIXED_TIMESTEP.to_bits()));
    assert_eq!(body.borrow().ticks, vec![1, 2, 3, 4]);
}

#[rstest]
fn step_cap_discards_whole_steps(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let report = scheduler.update(0.1, &world);
    assert_eq!(report.steps, 4);
    assert_relative_eq!(report.discarded, 0.1 - 4.0 * FIXED_TIMESTEP, epsilon = 1e-5);
    assert_eq!(scheduler.accumulator(), 0.0);
    assert_eq!(scheduler.interpolation_factor(), 0.0);
}

#[rstest]
fn step_cap_drops_partial_step(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let report = scheduler.update(4.5 * FIXED_TIMESTEP, &world);
    assert_eq!(report.steps, 4);
    assert_relative_eq!(report.discarded, 0.5 * FIXED_TIMESTEP, epsilon = 1e-5);
    assert_eq!(scheduler.accumulator(), 0.0);
    assert_eq!(scheduler.interpolation_factor(), 0.0);
    assert_eq!(scheduler.update(0.0, &world).steps, 0);
}

#[rstest]
fn huge_stall_runs_bounded_steps(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let report = scheduler.update(30.0, &world);
    assert_eq!(report.steps, MAX_STEPS_PER_FRAME);
    assert_eq!(scheduler.accumulator(), 0.0);
    let next = scheduler.update(0.0, &world);
    assert_eq!(next.steps, 0);
}

#[rstest]
fn small_frames_accumulate_to_floor_of_total(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let mut steps = 0_u32;
    for _ in 0..37 {
        steps += scheduler.update(0.011, &world).steps;
        assert!(scheduler.accumulator() >= 0.0);
        assert!(scheduler.accumulator() < FIXED_TIMESTEP);
    }
    // 37 * 0.011 = 0.407s, which pays for 24 whole steps.
    assert_eq!(steps, 24);
    assert_eq!(scheduler.total_steps(), 24);
}

#[rstest]
#[case(0.004)]
#[case(0.0161)]
#[case(0.0333)]
#[case(0.05)]
#[case(0.27)]
fn interpolation_factor_stays_in_unit_range(world: World, #[case] delta: f32) {
    let mut scheduler = PhysicsScheduler::new();
    for _ in 0..50 {
        scheduler.update(delta, &world);
        let alpha = scheduler.interpolation_factor();
        assert!((0.0..1.0).contains(&alpha), "alpha {alpha} out of range");
    }
}

#[rstest]
#[case::nan(f32::NAN)]
#[case::infinite(f32::INFINITY)]
#[case::negative(-0.5)]
fn invalid_deltas_are_ignored(world: World, #[case] delta: f32) {
    let mut scheduler = PhysicsScheduler::new();
    scheduler.update(0.01, &world);
    let report = scheduler.update(delta, &world);
    assert_eq!(report.steps, 0);
    assert_eq!(report.delta, 0.0);
    assert_relative_eq!(scheduler.accumulator(), 0.01);
}

#[rstest]
fn inactive_bodies_stay_registered(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let idle = Rc::new(RefCell::new(CountingBody::default()));
    let busy = CountingBody::active();
    scheduler.register(idle.clone());
    scheduler.register(busy.clone());

    scheduler.update(0.055, &world);

    assert!(idle.borrow().dts.is_empty());
    assert_eq!(busy.borrow().dts.len(), 3);
    let stats = scheduler.stats();
    assert_eq!(stats.registered, 2);
    assert_eq!(stats.active, 1);

    idle.borrow_mut().active = true;
    scheduler.update(FIXED_TIMESTEP, &world);
    assert_eq!(idle.borrow().dts.len(), 1);
}

#[rstest]
fn failing_body_does_not_disturb_bookkeeping(world: World) {
    let mut healthy = PhysicsScheduler::new();
    let mut faulty = PhysicsScheduler::new();
    let broken = CountingBody::active();
    broken.borrow_mut().fail = true;
    let neighbour = CountingBody::active();
    let broken_id = faulty.register(broken.clone());
    faulty.register(neighbour.clone());

    for delta in [0.02, 0.031, 0.007] {
        let expected = healthy.update(delta, &world);
        let report = faulty.update(delta, &world);
        assert_eq!(report.steps, expected.steps);
        assert_eq!(report.failures.len(), report.steps as usize);
        assert!(report.failures.iter().all(|(id, _)| *id == broken_id));
        assert_eq!(faulty.accumulator().to_bits(), healthy.accumulator().to_bits());
    }
    assert_eq!(neighbour.borrow().dts.len(), broken.borrow().dts.len());
}

#[rstest]
fn borrowed_body_is_reported_busy(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let body = CountingBody::active();
    let id = scheduler.register(body.clone());

    let guard = body.borrow_mut();
    let report = scheduler.update(FIXED_TIMESTEP * 1.5, &world);
    drop(guard);

    assert_eq!(report.failures, vec![(id, StepError::BodyBusy(id))]);
    assert!(body.borrow().dts.is_empty());
}

#[rstest]
fn unregistered_bodies_are_not_stepped(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    let body = CountingBody::active();
    let id = scheduler.register(body.clone());
    assert!(scheduler.unregister(id));
    assert!(!scheduler.unregister(id));
    scheduler.update(0.05, &world);
    assert!(body.borrow().dts.is_empty());
}

#[rstest]
fn observers_see_cumulative_steps(world: World) {
    let mut observer = MockSchedulerObserver::new();
    let mut seq = Sequence::new();
    for total in 1..=3_u64 {
        observer
            .expect_on_step_completed()
            .with(eq(total))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
    }
    observer
        .expect_on_frame_completed()
        .withf(|report| report.steps == 3)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let mut scheduler = PhysicsScheduler::new();
    scheduler.add_observer(Box::new(observer));
    scheduler.update(0.055, &world);
}

#[rstest]
fn removed_observers_stop_receiving(world: World) {
    let mut observer = MockSchedulerObserver::new();
    observer.expect_on_step_completed().never();
    observer.expect_on_frame_completed().never();
    let mut scheduler = PhysicsScheduler::new();
    let id = scheduler.add_observer(Box::new(observer));
    assert!(scheduler.remove_observer(id));
    scheduler.update(0.05, &world);
}

#[rstest]
fn reset_clears_state(world: World) {
    let mut scheduler = PhysicsScheduler::new();
    scheduler.register(CountingBody::active());
    scheduler.update(0.03, &world);
    scheduler.reset();
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.stats(), SchedulerStats::default());
    let id = scheduler.register(CountingBody::active());
    assert_eq!(id, PhysicsId(1));
}
