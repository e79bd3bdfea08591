//! Headless demo: runs the kernel on a small room with a scripted player.
//!
//! Usage: `kestrel [config.json]`. Log verbosity follows `RUST_LOG`.

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kestrel_app::error::AppError;
use kestrel_app::game_loop::Scheduler;
use kestrel_app::input::ScriptedInput;
use kestrel_app::render::LogRenderer;
use kestrel_core::clock::SystemClock;
use kestrel_core::commands::InputEvent;
use kestrel_core::config::AppConfig;
use kestrel_core::enums::{CarriedKind, Direction4, Layer};
use kestrel_core::types::{Point, Rect};
use kestrel_sim::map::Map;
use kestrel_sim::world_setup;
use kestrel_sim::SimulationEngine;

const DEMO_ROOM: &str = "\
####################
#..................#
#..................#
#..................#
#.......~~~~.......#
#.......~~~~.......#
#..................#
#...OO.............#
#...OO.............#
#..................#
#..................#
#..................#
#..................#
####################
";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        error!(%err, "kestrel failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    let mut engine = SimulationEngine::new(config.sim.clone(), Map::parse(DEMO_ROOM)?);
    let world = engine.world_mut();
    world_setup::spawn_liftable(world, Point::new(96, 64), Layer::Low, CarriedKind::Pot);
    world_setup::spawn_pickable(world, Point::new(120, 96), Layer::Low, "rupee", 1);
    world_setup::spawn_sensor(world, Rect::new(128, 16, 16, 16), Layer::Low, "north_door");

    let mut input = demo_script();
    let mut renderer = LogRenderer::new();
    let mut scheduler = Scheduler::new(config.scheduler, SystemClock::new(), engine)?;
    let summary = scheduler.run(&mut input, &mut renderer, config.max_frames);

    info!(
        frames = summary.frames,
        steps = summary.steps,
        rendered = renderer.frames(),
        time_dropped = summary.time_dropped,
        "demo finished"
    );
    Ok(())
}

/// Walk up to the pot, lift it, carry it down and throw it.
fn demo_script() -> ScriptedInput {
    let right = Direction4::Right;
    let down = Direction4::Down;
    ScriptedInput::new()
        .at_frame(1, InputEvent::DirectionPressed { direction: right })
        .at_frame(25, InputEvent::DirectionReleased { direction: right })
        .at_frame(30, InputEvent::ActionPressed)
        .at_frame(31, InputEvent::ActionReleased)
        .at_frame(60, InputEvent::DirectionPressed { direction: down })
        .at_frame(90, InputEvent::DirectionReleased { direction: down })
        .at_frame(100, InputEvent::ActionPressed)
        .at_frame(101, InputEvent::ActionReleased)
        .at_frame(200, InputEvent::WindowClosed)
}
