//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::autopilot;
use super::body::Body;
use super::collision::first_collision;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (click/tap/space)
    pub jump: bool,
    /// Idle/demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// Advance the game state by one fixed step.
///
/// Order within a step: jump request, movement, score and speed, pruning,
/// spawning, then the collision check. Nothing moves once the phase is
/// `GameOver`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    if input.jump || (input.autopilot && autopilot::wants_jump(state)) {
        state.player.jump();
    }

    state.player.step();
    for obstacle in &mut state.obstacles {
        obstacle.step();
    }

    state.score += 1;
    state.global_speed += state.tuning.speed_increment;

    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.is_off_screen());
    if state.obstacles.len() != before {
        log::debug!("Pruned {} obstacle(s)", before - state.obstacles.len());
    }

    if state.spawner.advance(&state.tuning, &mut state.rng) {
        state.spawn_obstacle();
    }

    if let Some(index) = first_collision(&state.player, &state.obstacles) {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: hit obstacle {} at score {} (speed {:.3})",
            state.obstacles[index].id,
            state.score,
            state.global_speed
        );
    }

    log::trace!(
        "step {}: player y={:.1} vy={:.1}, {} obstacle(s)",
        state.score,
        state.player.pos.y,
        state.player.vy,
        state.obstacles.len()
    );
}
