//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick interval only
//! - Seeded RNG only
//! - No rendering, effects or platform dependencies

pub mod grid;
pub mod input;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction, Grid, Snake};
pub use input::TurnBuffer;
pub use state::{CrashCause, GamePhase, GameState, TickOutcome};
pub use tick::{advance, place_food, tick};
