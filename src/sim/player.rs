//! The runner
//!
//! Vertical motion only: gravity is integrated once per step and the ground
//! line clamps the fall. Horizontal position never changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Rect};
use crate::tuning::Tuning;

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/step, negative = up)
    pub vy: f32,
    pub on_ground: bool,
    /// Added to `vy` every step
    pub gravity: f32,
    /// `vy` applied by a jump
    pub jump_impulse: f32,
    /// Top coordinate when standing on the ground line
    pub ground_y: f32,
}

impl Player {
    /// A grounded player at the start position
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.player_ground_y();
        Self {
            pos: Vec2::new(tuning.player_x, ground_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            on_ground: true,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            ground_y,
        }
    }

    /// Integrate gravity and land on the ground line
    pub fn update(&mut self) {
        self.vy += self.gravity;
        self.pos.y += self.vy;

        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.vy = 0.0;
            self.on_ground = true;
        }
    }

    /// Start a jump. Ignored while airborne, so there is no double jump.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.on_ground = false;
            self.vy = self.jump_impulse;
        }
    }
}

impl Body for Player {
    fn step(&mut self) {
        self.update();
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}
