//! Error types for the simulation core and the settings store

use thiserror::Error;

/// Invariant violations raised by the simulation.
///
/// These are fatal for the current round only; the session reacts by
/// resetting to a fresh initial state.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("no free cell left for food placement")]
    BoardFull,
    #[error("snake length {len} is below the minimum of 3")]
    SnakeTooShort { len: usize },
    #[error("invalid snake layout: {0}")]
    InvalidSnake(String),
}

/// Failures reported by a settings store collaborator
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
}
