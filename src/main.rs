//! Headless tour of the scene.
//!
//! ```text
//! orrery [config.json] [frames]
//! ```
//!
//! Loads the config (or uses defaults), then spends `frames` fixed 60 Hz
//! steps in each view mode and logs what the renderer would see. Set
//! `ORRERY_LOG=debug` for transition and regeneration detail.

mod logger;

use log::LevelFilter;
use orrery::prelude::*;
use std::env;
use std::process::ExitCode;

const DEFAULT_FRAMES: u32 = 180;

fn main() -> ExitCode {
    let level = env::var("ORRERY_LOG")
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info);
    if let Err(e) = logger::Logger::init(level) {
        eprintln!("failed to install logger: {}", e);
    }

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => match SpaceConfig::load(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SpaceConfig::default(),
    };
    let frames = match args.next().map(|f| f.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("invalid frame count: {}", e);
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    let mut scene = Scene::new(config);
    let mut timer = FrameTimer::fixed(1.0 / 60.0);

    for mode in [ViewMode::Solar, ViewMode::Galaxy, ViewMode::BlackHole] {
        scene.set_view_mode(mode);
        let mut last = FrameTime::default();
        for _ in 0..frames {
            last = scene.step(timer.update());
        }
        summarize(&scene, &last);
    }

    scene.toggle_pause();
    let frozen = scene.step(timer.update());
    log::info!(
        "paused at frame {}: sim {:.2}s, real {:.2}s, stepped at {:.0} fps",
        frozen.frame,
        frozen.sim_elapsed,
        frozen.real_elapsed,
        timer.fps()
    );

    ExitCode::SUCCESS
}

fn summarize(scene: &Scene, time: &FrameTime) {
    let particles: usize = scene.visible_fields().map(|(_, f)| f.len()).sum();
    log::info!(
        "{} after {:.1}s: {} groups, {} visible particles, camera at {:?}{}",
        scene.mode(),
        time.sim_elapsed,
        scene.active_groups().len(),
        particles,
        scene.camera().position,
        if scene.is_transitioning() { " (moving)" } else { "" }
    );

    if scene.mode() == ViewMode::Solar {
        for planet in scene.bodies().planets() {
            log::debug!(
                "  {:<8} θ={:.3} r={:.2}",
                planet.name,
                planet.angle(),
                planet.orbit().orbital_radius(planet.angle())
            );
        }
    }

    let ray = PickRay::new(scene.camera().position, scene.camera().target - scene.camera().position);
    if let Some(selection) = scene.pick(&ray) {
        log::info!("  looking at {}", selection.name);
    }
}
