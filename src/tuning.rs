//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("jump_impulse must be negative and stronger than gravity (impulse {impulse}, gravity {gravity})")]
    WeakJump { impulse: f32, gravity: f32 },
    #[error("{field} range is empty ({min} > {max})")]
    EmptyRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("obstacle_heights must be a non-empty list of positive heights")]
    BadHeights,
    #[error("{0} does not fit inside the field")]
    OutOfField(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub steps_per_second: u32,

    pub field_width: f32,
    pub field_height: f32,
    pub ground_line: f32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub base_speed: f32,
    pub speed_increment: f32,

    pub spawn_interval_min: u32,
    pub spawn_interval_max: u32,

    pub obstacle_width_min: u32,
    pub obstacle_width_max: u32,
    pub obstacle_heights: Vec<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            steps_per_second: STEPS_PER_SECOND,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_line: GROUND_LINE,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,

            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,

            obstacle_width_min: OBSTACLE_WIDTH_MIN,
            obstacle_width_max: OBSTACLE_WIDTH_MAX,
            obstacle_heights: OBSTACLE_HEIGHTS.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that the simulation can run with these parameters
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.steps_per_second == 0 {
            return Err(TuningError::NotPositive {
                field: "steps_per_second",
                value: 0.0,
            });
        }

        for (field, value) in [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ground_line", self.ground_line),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
        ] {
            // Written as a negated comparison so NaN is rejected too
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if !(self.jump_impulse < 0.0 && -self.jump_impulse > self.gravity) {
            return Err(TuningError::WeakJump {
                impulse: self.jump_impulse,
                gravity: self.gravity,
            });
        }

        for (field, min, max) in [
            ("spawn_interval", self.spawn_interval_min, self.spawn_interval_max),
            ("obstacle_width", self.obstacle_width_min, self.obstacle_width_max),
        ] {
            if min > max {
                return Err(TuningError::EmptyRange { field, min, max });
            }
        }
        if self.obstacle_width_min == 0 {
            return Err(TuningError::NotPositive {
                field: "obstacle_width_min",
                value: 0.0,
            });
        }

        if self.obstacle_heights.is_empty() || self.obstacle_heights.contains(&0) {
            return Err(TuningError::BadHeights);
        }

        if self.ground_line > self.field_height {
            return Err(TuningError::OutOfField("ground_line"));
        }
        if self.player_height > self.ground_line
            || self.player_x < 0.0
            || self.player_x + self.player_width > self.field_width
        {
            return Err(TuningError::OutOfField("player"));
        }
        if self
            .obstacle_heights
            .iter()
            .any(|&h| h as f32 > self.ground_line)
        {
            return Err(TuningError::OutOfField("obstacle height"));
        }

        Ok(())
    }

    /// Top coordinate at which the player rests on the ground line
    #[inline]
    pub fn player_ground_y(&self) -> f32 {
        self.ground_line - self.player_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.player_ground_y(), 350.0);
        assert_eq!(tuning.obstacle_heights, vec![40, 60, 80]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "base_speed": 9.5, "gravity": 2.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 9.5);
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.jump_impulse, JUMP_IMPULSE);
        assert_eq!(tuning.spawn_interval_max, SPAWN_INTERVAL_MAX);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_weak_jump() {
        let err = Tuning::from_json_str(r#"{ "jump_impulse": -0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::WeakJump { .. }));

        let err = Tuning::from_json_str(r#"{ "jump_impulse": 5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::WeakJump { .. }));
    }

    #[test]
    fn test_rejects_empty_ranges_and_heights() {
        let err = Tuning::from_json_str(r#"{ "spawn_interval_min": 120 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::EmptyRange {
                field: "spawn_interval",
                ..
            }
        ));

        let err = Tuning::from_json_str(r#"{ "obstacle_heights": [] }"#).unwrap_err();
        assert!(matches!(err, TuningError::BadHeights));
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let tuning = Tuning {
            speed_increment: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NotPositive {
                field: "speed_increment",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
        assert!(err.to_string().contains("tuning.json"));
    }
}
