//! PathPrint - A path-planning puzzle about printing layers
//!
//! Core modules:
//! - `sim`: Deterministic simulation (levels, path tracing, extrusion, scoring)
//! - `submission`: Outcome sink and backend payload shape
//! - `highscores`: Local leaderboard
//! - `settings`: Player preferences
//! - `platform`: Browser bindings

pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod submission;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Default on-screen tile size in pixels
    pub const DEFAULT_TILE_SIZE: f32 = 28.0;

    /// Level id reserved for the date-seeded daily level
    pub const DAILY_LEVEL_ID: u32 = 1000;
    /// Only the first N catalog levels can seed the daily level
    pub const DAILY_BASE_POOL: usize = 8;
    /// Per-cell chance an empty cell becomes a target in the daily level
    pub const DAILY_TARGET_CHANCE: f64 = 0.06;
    /// Per-cell chance a target cell becomes a cooling zone in the daily level
    pub const DAILY_COOLING_CHANCE: f64 = 0.03;

    /// Cells per cooling zone in a level template
    pub const CELLS_PER_COOLING_ZONE: u32 = 40;

    /// Errors added when a committed path steps onto an obstacle
    pub const OBSTACLE_ERROR: u32 = 2;

    /// Score weights
    pub const SCORE_PER_PRINTED_CELL: i64 = 100;
    pub const SCORE_PER_SECOND_LEFT: i64 = 20;
    pub const SCORE_PER_FILAMENT_LEFT: i64 = 5;
    pub const SCORE_PENALTY_PER_ERROR: i64 = 50;
}

/// Grid coordinate (x = column, y = row)
pub type GridPos = IVec2;

/// Row-major index of a grid coordinate
#[inline]
pub fn idx(pos: GridPos, width: u32) -> usize {
    pos.y as usize * width as usize + pos.x as usize
}

/// Manhattan distance between two grid coordinates
#[inline]
pub fn manhattan(a: GridPos, b: GridPos) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
