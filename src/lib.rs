//! Tank Arena - top-down arena tank battle
//!
//! Core modules:
//! - `sim`: Simulation (entities, movement, steering, collisions, session state)
//! - `highscores`: Top-10 leaderboard with flat-file persistence
//! - `tuning`: Data-driven game balance
//! - `error`: Crate error type for the fallible I/O edges

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::HighScores;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (screen space, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Minimum inset from the arena edge for a tank center
    pub const BOUNDS_MARGIN: f32 = 20.0;

    /// Square side of a tank body at scale 1
    pub const TANK_SIZE: f32 = 35.0;
    /// Square side of an obstacle block
    pub const BLOCK_SIZE: f32 = 40.0;

    /// Where the player tank starts every level
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 100.0;

    /// Highest level; clearing it wins the match
    pub const MAX_LEVEL: u32 = 5;
    /// Live enemies allowed at once
    pub const MAX_LIVE_ENEMIES: usize = 3;

    /// Fixed timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
}

/// Clamp a center point so a body with the given margin stays inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, margin: f32) -> Vec2 {
    use consts::{ARENA_HEIGHT, ARENA_WIDTH};
    Vec2::new(
        pos.x.clamp(margin, ARENA_WIDTH - margin),
        pos.y.clamp(margin, ARENA_HEIGHT - margin),
    )
}

/// True if a point lies inside the arena (edges count as inside)
#[inline]
pub fn inside_arena(pos: Vec2) -> bool {
    use consts::{ARENA_HEIGHT, ARENA_WIDTH};
    pos.x >= 0.0 && pos.x <= ARENA_WIDTH && pos.y >= 0.0 && pos.y <= ARENA_HEIGHT
}

/// Angle of a direction vector in degrees, `atan2(y, x)`
#[inline]
pub fn angle_degrees(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees()
}

/// Unit vector for an angle in degrees
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
