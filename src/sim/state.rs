//! Game state and core simulation types
//!
//! One `GameState` is one session. Restarting builds a new value instead of
//! resetting this one.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::Player;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player hit an obstacle; everything is frozen
    GameOver,
}

/// Complete state of one session (deterministic for a given seed and input)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Drives spawn timing and obstacle sizes
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Steps survived
    pub score: u64,
    /// Speed handed to newly spawned obstacles
    pub global_speed: f32,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed.
    ///
    /// `tuning` is expected to have passed [`Tuning::validate`].
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = Spawner::new(&tuning, &mut rng);
        log::info!(
            "Session started (seed {}, first spawn after {} steps)",
            seed,
            spawner.threshold + 1
        );

        Self {
            seed,
            rng,
            player: Player::new(&tuning),
            global_speed: tuning.base_speed,
            tuning,
            phase: GamePhase::Running,
            score: 0,
            obstacles: Vec::new(),
            spawner,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle moving at the current global speed
    pub fn spawn_obstacle(&mut self) -> u32 {
        let id = self.next_entity_id();
        let obstacle = Obstacle::spawn(id, self.global_speed, &self.tuning, &mut self.rng);
        log::debug!(
            "Spawned obstacle {} ({}x{}) at speed {:.3}",
            id,
            obstacle.width,
            obstacle.height,
            obstacle.speed()
        );
        self.obstacles.push(obstacle);
        id
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score as shown to the player
    #[inline]
    pub fn displayed_score(&self) -> u64 {
        crate::displayed_score(self.score)
    }
}
