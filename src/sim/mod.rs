//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Body, Rect};
pub use collision::{first_collision, rects_overlap};
pub use obstacle::Obstacle;
pub use player::Player;
pub use spawner::Spawner;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
