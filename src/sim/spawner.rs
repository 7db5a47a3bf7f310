//! Randomized obstacle spawn timing
//!
//! The gap between spawns is redrawn after every spawn, which keeps arrivals
//! irregular while bounding both bursts and droughts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Steps since the last spawn
    pub counter: u32,
    /// Spawn once `counter` exceeds this
    pub threshold: u32,
}

impl Spawner {
    /// New spawner with a freshly drawn threshold
    pub fn new<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            counter: 0,
            threshold: draw_threshold(tuning, rng),
        }
    }

    /// Count one step. Returns true when an obstacle should spawn this step,
    /// in which case the counter is reset and the threshold redrawn.
    pub fn advance<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> bool {
        self.counter += 1;
        if self.counter > self.threshold {
            self.counter = 0;
            self.threshold = draw_threshold(tuning, rng);
            true
        } else {
            false
        }
    }
}

fn draw_threshold<R: Rng>(tuning: &Tuning, rng: &mut R) -> u32 {
    rng.random_range(tuning.spawn_interval_min..=tuning.spawn_interval_max)
}
