//! Polygon Arena headless driver
//!
//! Runs the simulation against a `SimpleArena` with a scripted player:
//! it circles the arena and keeps firing at the closest enemy. Useful for
//! soak-testing the core and eyeballing logs (`RUST_LOG=debug`).
//!
//! Run with `--help` for the flags.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use glam::Vec2;

use polygon_arena::consts::{
    ARENA_HEIGHT, ARENA_WIDTH, FRAME_DT, SCREEN_FPS, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use polygon_arena::platform::{ArenaHost, InputState, SimpleArena};
use polygon_arena::render::RecordingSurface;
use polygon_arena::sim::{Entity, EntityKind};
use polygon_arena::{GameEvent, GameManager, GamePhase, Tuning};

#[derive(Parser, Debug)]
#[command(name = "polygon-arena")]
#[command(about = "Headless run of the polygon arena simulation")]
#[command(version)]
struct Options {
    /// Pace frames at the target frame rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Simulated seconds before the run stops
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,

    /// RNG seed for spawns and homing jitter
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// JSON tuning file; defaults are used when omitted
    #[arg(long)]
    tuning: Option<PathBuf>,
}

/// Circle the arena centre and aim at the nearest enemy
fn scripted_input(game: &GameManager, arena: &SimpleArena, clock: f32) -> InputState {
    let mut input = InputState::default();
    let Some(player) = game.player() else {
        return input;
    };
    let here = player.body.position();

    // Quarter turn of the movement keys every two seconds
    match (clock / 2.0) as u32 % 4 {
        0 => input.right = true,
        1 => input.down = true,
        2 => input.left = true,
        _ => input.up = true,
    }
    let to_center = arena.bounds().center() - here;
    if to_center.length() > 150.0 {
        input.left = to_center.x < 0.0;
        input.right = to_center.x > 0.0;
        input.up = to_center.y < 0.0;
        input.down = to_center.y > 0.0;
    }

    let nearest = game
        .store()
        .iter()
        .filter(|e| matches!(e.kind(), EntityKind::Triangle | EntityKind::Pentagon))
        .filter(|e| e.is_active())
        .map(|e| e.body().position())
        .min_by(|a, b| a.distance_squared(here).total_cmp(&b.distance_squared(here)));
    if let Some(target) = nearest {
        input.mouse_left = true;
        input.mouse_position = target;
    }
    input
}

fn main() {
    let options = Options::parse();

    env_logger::init();
    log::info!("Polygon Arena (headless) starting...");

    let tuning = options
        .tuning
        .as_deref()
        .map_or_else(Tuning::default, Tuning::load);

    let screen = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut arena = SimpleArena::centered(Vec2::new(ARENA_WIDTH, ARENA_HEIGHT), screen);
    let mut game = GameManager::new(tuning, options.seed);
    game.start(&arena);

    let mut surface = RecordingSurface::new(screen);
    let frame_budget = Duration::from_secs_f32(1.0 / SCREEN_FPS as f32);
    let frames = (options.seconds * SCREEN_FPS as f32) as u64;

    let (mut kills, mut hits, mut resizes) = (0u32, 0u32, 0u32);
    for _ in 0..frames {
        let frame_start = Instant::now();

        let input = scripted_input(&game, &arena, game.clock());
        game.update(FRAME_DT, &input, &mut arena);

        surface.clear();
        game.draw(&mut surface);

        for event in game.drain_events() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::PlayerHit { .. } => hits += 1,
                GameEvent::ArenaResize(_) => resizes += 1,
                GameEvent::PlayerDied => {}
                GameEvent::GameOver { score } => log::info!("Run over with {score} points"),
            }
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }

        if options.realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < frame_budget {
                std::thread::sleep(frame_budget - elapsed);
            }
        }
    }

    let live = game.store().iter().filter(|e| !matches!(e, Entity::Player(_))).count();
    log::info!(
        "Simulated {:.1}s: score {}, {kills} kills, {hits} hits taken, {resizes} arena resizes, {live} entities alive",
        game.clock(),
        game.score(),
    );
    log::info!("Final arena {:?}", arena.bounds());
}
