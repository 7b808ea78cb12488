//! Brick Collide headless runner
//!
//! Loads settings (optional JSON path as the first argument), builds a level
//! and lets the idle paddle play it out.

use std::path::Path;
use std::process::ExitCode;

use brick_collide::Settings;
use brick_collide::sim::{GamePhase, GameState, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Collide (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let max_ticks = settings.max_ticks;
    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&mut state, max_ticks) {
        Ok(phase) => {
            let outcome = match phase {
                GamePhase::Won => "won",
                GamePhase::Lost => "lost",
                GamePhase::Playing => "tick limit reached",
            };
            log::info!(
                "Game over: {outcome} after {} ticks, score {}, {} blocks left",
                state.time_ticks,
                state.score(),
                state.remaining_blocks.value()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Simulation aborted at tick {}: {e}", state.time_ticks);
            ExitCode::FAILURE
        }
    }
}
