//! Jump Runner - A fixed-timestep side-scrolling runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Session management (restart, autopilot) and the step loops
//! - `clock`: Fixed-rate stepper
//! - `input`/`draw`: Abstract event source and draw sink
//! - `terminal`: crossterm frontend
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod draw;
pub mod game;
pub mod input;
pub mod sim;
pub mod terminal;
pub mod tuning;

pub use clock::Stepper;
pub use draw::{DrawSink, Frame, JsonLinesSink, NullSink};
pub use game::{Game, RunSummary, StepOutcome, run_headless, run_realtime};
pub use input::{InputEvent, InputSource, ScriptedInput, StepInput};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation steps per second
    pub const STEPS_PER_SECOND: u32 = 60;
    /// Maximum steps run back-to-back to catch up after a stall
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;
    /// Walkable surface; player and obstacle bottoms rest here
    pub const GROUND_LINE: f32 = 400.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Added to vertical velocity every step
    pub const GRAVITY: f32 = 1.0;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -20.0;

    /// Obstacle speed at session start (pixels/step)
    pub const BASE_SPEED: f32 = 7.0;
    /// Global speed gain per step (~0.3 per second at 60 steps/s)
    pub const SPEED_INCREMENT: f32 = 0.005;

    /// Steps between spawns are drawn from this inclusive range
    pub const SPAWN_INTERVAL_MIN: u32 = 40;
    pub const SPAWN_INTERVAL_MAX: u32 = 100;

    /// Obstacle width range (inclusive) and height choices
    pub const OBSTACLE_WIDTH_MIN: u32 = 20;
    pub const OBSTACLE_WIDTH_MAX: u32 = 50;
    pub const OBSTACLE_HEIGHTS: [u32; 3] = [40, 60, 80];

    /// Internal score is divided by this for display
    pub const SCORE_DIVISOR: u64 = 10;
}

/// Score shown to the player for an internal step-count score
#[inline]
pub fn displayed_score(score: u64) -> u64 {
    score / consts::SCORE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayed_score_truncates() {
        assert_eq!(displayed_score(0), 0);
        assert_eq!(displayed_score(9), 0);
        assert_eq!(displayed_score(10), 1);
        assert_eq!(displayed_score(1234), 123);
    }
}
