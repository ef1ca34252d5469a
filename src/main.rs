//! Headless simulator: runs one body over a map and prints its trajectory as
//! JSON lines on stdout.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use footing::body::{InputProvider, InputState, MovementState, Player};
use footing::{init_logging, load_map, BodyConfig, PhysicsScheduler, World};
use glam::Vec2;
use log::info;
use serde::Serialize;

/// Direction held for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Hold {
    None,
    Left,
    Right,
}

/// Fixed-timestep platformer physics simulator
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON map file
    #[arg(short, long)]
    map: PathBuf,

    /// JSON body config file
    #[arg(short, long)]
    body: Option<PathBuf>,

    /// Simulated seconds
    #[arg(short, long, default_value_t = 3.0)]
    seconds: f32,

    /// Frame length in milliseconds fed to the scheduler
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,

    /// Direction held throughout
    #[arg(long, value_enum, default_value_t = Hold::None)]
    hold: Hold,

    /// Frames on which jump is pressed
    #[arg(long, value_delimiter = ',')]
    jump_at: Vec<u32>,

    /// Spawn point in world units as X,Y; defaults to the map spawn
    #[arg(long, value_delimiter = ',', num_args = 2)]
    spawn: Option<Vec<f32>>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// One line of trajectory output.
#[derive(Serialize)]
struct Sample {
    frame: u32,
    steps: u32,
    position: [f32; 2],
    render: [f32; 2],
    velocity: [f32; 2],
    grounded: bool,
    state: MovementState,
}

/// Input that holds a direction and taps jump on chosen frames.
struct Script {
    held: Hold,
    jump_frames: Vec<u32>,
    frame: Rc<RefCell<u32>>,
}

impl InputProvider for Script {
    fn sample(&mut self) -> InputState {
        let frame = *self.frame.borrow();
        InputState {
            left: self.held == Hold::Left,
            right: self.held == Hold::Right,
            jump: self.jump_frames.contains(&frame),
            ..InputState::default()
        }
    }
}

fn spawn_point(args: &Args, world: &World) -> Result<Vec2> {
    match args.spawn.as_deref() {
        Some([x, y]) => Ok(Vec2::new(*x, *y)),
        Some(other) => bail!("--spawn takes two values, got {}", other.len()),
        None => Ok(world.spawn.unwrap_or(Vec2::ZERO)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let world = load_map(&args.map)
        .with_context(|| format!("loading map {}", args.map.display()))?;
    let config = match &args.body {
        Some(path) => BodyConfig::load(path)
            .with_context(|| format!("loading body config {}", path.display()))?,
        None => BodyConfig::default(),
    };
    if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
        bail!("--frame-ms must be a positive number");
    }

    let frame = Rc::new(RefCell::new(0_u32));
    let mut player = Player::new(config).with_position(spawn_point(&args, &world)?);
    player.snap_to_ground(&world.footholds);
    player.set_input_provider(Box::new(Script {
        held: args.hold,
        jump_frames: args.jump_at.clone(),
        frame: Rc::clone(&frame),
    }));
    let player = Rc::new(RefCell::new(player));

    let mut scheduler = PhysicsScheduler::new();
    scheduler.register(player.clone());

    let delta = args.frame_ms / 1000.0;
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "frame count is clamped to a non-negative finite value"
    )]
    let frames = (args.seconds.max(0.0) / delta).ceil().min(1e7) as u32;
    info!("simulating {frames} frames of {delta:.4}s");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for index in 0..frames {
        *frame.borrow_mut() = index;
        let report = scheduler.update(delta, &world);
        let alpha = scheduler.interpolation_factor();
        let body = player.borrow();
        let sample = Sample {
            frame: index,
            steps: report.steps,
            position: body.position().to_array(),
            render: body.render_position(alpha).to_array(),
            velocity: body.velocity().to_array(),
            grounded: body.is_grounded(),
            state: body.state(),
        };
        serde_json::to_writer(&mut out, &sample).context("writing trajectory")?;
        writeln!(out).context("writing trajectory")?;
    }
    let stats = scheduler.stats();
    info!(
        "ran {} steps over {} frames; {:.4}s discarded",
        stats.total_steps, stats.frames, stats.discarded
    );
    Ok(())
}
