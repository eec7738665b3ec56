//! Snake Arcade - a grid-based snake game core
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (movement, collisions, food, score)
//! - `effects`: Frame-driven visuals (position smoothing, particles, screen shake)
//! - `session`: Playing / Paused / GameOver state machine and frame driver
//! - `renderer`: Draw-command interface and frame composition
//! - `platform`: Input source abstraction
//! - `settings`: Persisted preferences and the settings store

pub mod effects;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod theme;

pub use error::{SimError, StoreError};
pub use session::{Session, SessionCommand};
pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore};
pub use theme::Theme;

use glam::Vec2;

use crate::sim::Cell;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions in cells
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 20;
    /// Pixel size of one grid cell
    pub const CELL_SIZE: f32 = 32.0;

    /// Fixed simulation interval between snake moves (seconds)
    pub const MOVE_INTERVAL: f32 = 0.12;
    /// Exponential approach rate for display positions (per second)
    pub const SMOOTH_RATE: f32 = 18.0;

    /// Score awarded per food eaten
    pub const FOOD_REWARD: u32 = 10;
    /// Snake length at session start
    pub const INITIAL_LENGTH: usize = 3;
    /// Minimum legal snake length once initialised
    pub const MIN_SNAKE_LENGTH: usize = 3;

    /// Head squash/stretch duration after eating
    pub const EAT_PULSE_DURATION: f32 = 0.15;

    /// Particle pool capacity
    pub const MAX_PARTICLES: usize = 256;
}

/// Bottom-left pixel position of a grid cell
#[inline]
pub fn cell_to_pixel(cell: Cell) -> Vec2 {
    Vec2::new(
        cell.x as f32 * consts::CELL_SIZE,
        cell.y as f32 * consts::CELL_SIZE,
    )
}

/// Pixel position of a cell's centre
#[inline]
pub fn cell_center(cell: Cell) -> Vec2 {
    cell_to_pixel(cell) + Vec2::splat(consts::CELL_SIZE / 2.0)
}
