//! Demo-mode player
//!
//! Jumps when the nearest obstacle ahead is close enough that the jump arc
//! will be high while the two overlap horizontally.

use super::body::Body;
use super::state::GameState;

/// Jump this many steps of travel before the obstacle reaches the player
const LEAD_STEPS: f32 = 8.0;

/// Should the autopilot jump this step?
pub fn wants_jump(state: &GameState) -> bool {
    if !state.player.on_ground {
        return false;
    }

    let player = state.player.bounds();
    state.obstacles.iter().any(|obstacle| {
        let gap = obstacle.pos.x - player.right();
        gap >= 0.0 && gap <= obstacle.speed() * LEAD_STEPS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Obstacle;
    use crate::tuning::Tuning;

    fn state_with_obstacle_at(x: f32) -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(3, tuning.clone());
        let mut obstacle = Obstacle::with_size(1, 7.0, 30, 80, &tuning);
        obstacle.pos.x = x;
        state.obstacles.push(obstacle);
        state
    }

    #[test]
    fn test_jumps_when_close() {
        // player right edge is at 100
        assert!(wants_jump(&state_with_obstacle_at(140.0)));
    }

    #[test]
    fn test_waits_when_far() {
        assert!(!wants_jump(&state_with_obstacle_at(400.0)));
    }

    #[test]
    fn test_ignores_passed_obstacles() {
        assert!(!wants_jump(&state_with_obstacle_at(20.0)));
    }

    #[test]
    fn test_no_jump_while_airborne() {
        let mut state = state_with_obstacle_at(140.0);
        state.player.jump();
        assert!(!wants_jump(&state));
    }
}
