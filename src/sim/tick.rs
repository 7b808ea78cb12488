//! Fixed timestep simulation tick
//!
//! One tick moves the paddle, steps every ball once against the registry and
//! then settles the game phase.

use super::collision::CollisionError;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Idle/demo mode - the paddle follows the lowest ball
    pub idle_mode: bool,
}

/// Advance the game by one tick. Does nothing once the game is over.
///
/// A ball whose step fails stops the ball loop: balls after it are not moved
/// this tick. Removed balls are still dropped and the phase is still updated
/// before the error is returned.
pub fn tick(state: &mut GameState, input: &TickInput) -> Result<(), CollisionError> {
    if state.phase.is_over() {
        return Ok(());
    }
    state.time_ticks += 1;

    if input.idle_mode {
        if let Some(x) = state.lowest_ball().map(|b| b.center().x) {
            state.paddle.track(x);
        }
    } else {
        if input.left {
            state.paddle.move_left();
        }
        if input.right {
            state.paddle.move_right();
        }
    }

    let bounds = state.settings.world_bounds();
    let stepped = state
        .balls
        .iter_mut()
        .filter(|b| !b.is_removed())
        .try_for_each(|ball| ball.move_one_step(&bounds).map(|_| ()));
    state.balls.retain(|b| !b.is_removed());

    state.update_phase();
    stepped
}

/// Run in idle mode until the game ends or `max_ticks` have elapsed
pub fn run(state: &mut GameState, max_ticks: u64) -> Result<GamePhase, CollisionError> {
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    while !state.phase.is_over() && state.time_ticks < max_ticks {
        tick(state, &input)?;
    }
    Ok(state.phase)
}
