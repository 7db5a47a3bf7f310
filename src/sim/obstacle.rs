//! Ground obstacles
//!
//! An obstacle's speed is copied from the global speed when it spawns and
//! never changes, so anything already on screen keeps a predictable pace.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use crate::tuning::Tuning;

/// A block sliding leftward along the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: u32,
    pub height: u32,
    /// Leftward speed (pixels/step)
    speed: f32,
}

impl Obstacle {
    /// Spawn at the right edge of the field with a random size, resting on the ground line
    pub fn spawn<R: Rng>(id: u32, speed: f32, tuning: &Tuning, rng: &mut R) -> Self {
        let width = rng.random_range(tuning.obstacle_width_min..=tuning.obstacle_width_max);
        let height = tuning.obstacle_heights[rng.random_range(0..tuning.obstacle_heights.len())];
        Self::with_size(id, speed, width, height, tuning)
    }

    /// Spawn with an explicit size
    pub fn with_size(id: u32, speed: f32, width: u32, height: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Vec2::new(tuning.field_width, tuning.ground_line - height as f32),
            width,
            height,
            speed,
        }
    }

    /// Speed captured at spawn
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Slide left by this obstacle's speed
    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    /// True once the right edge has passed the left edge of the field
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + (self.width as f32) < 0.0
    }
}

impl Body for Obstacle {
    fn step(&mut self) {
        self.update();
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::new(self.width as f32, self.height as f32),
        }
    }
}
