//! Game state and core simulation types
//!
//! Everything the tick engine mutates lives in one owned `GameState`; there is
//! no ambient game singleton.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid, Snake};
use super::input::TurnBuffer;
use super::tick::place_food;
use crate::consts::INITIAL_LENGTH;
use crate::error::SimError;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake advancing on the tick clock
    Playing,
    /// Simulation frozen, waiting for resume or menu
    Paused,
    /// Round ended by a collision
    GameOver,
}

/// What ended the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Wall,
    SelfCollision,
}

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Snake advanced one cell. `old_head` is where the head was before the
    /// move; `ate` holds the food cell if one was eaten (the snake grew).
    Moved { old_head: Cell, ate: Option<Cell> },
    /// The move was rejected and the round is over. `head` is the unchanged
    /// head cell.
    Crashed { head: Cell, cause: CrashCause },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for this round's food placement
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub grid: Grid,
    pub snake: Snake,
    pub food: Cell,
    pub turns: TurnBuffer,
    pub score: u32,
    pub phase: GamePhase,
    /// Time accumulated toward the next tick
    pub move_timer: f32,
    /// Seconds spent in Playing this round
    pub play_time: f32,
    /// Ticks executed this round
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh round: a three-cell snake heading right from the grid centre
    pub fn new(grid: Grid, seed: u64) -> Result<Self, SimError> {
        if grid.width < INITIAL_LENGTH as i32 || grid.height < 1 {
            return Err(SimError::InvalidSnake(format!(
                "grid {}x{} cannot hold the starting snake",
                grid.width, grid.height
            )));
        }
        let center = grid.center();
        let head = Cell::new(center.x.max(INITIAL_LENGTH as i32 - 1), center.y);
        let snake = Snake::horizontal(head, INITIAL_LENGTH);
        Self::from_snake(grid, snake, Direction::Right, seed)
    }

    /// Round starting from an explicit body layout, head first
    pub fn with_snake(
        grid: Grid,
        cells: Vec<Cell>,
        direction: Direction,
        seed: u64,
    ) -> Result<Self, SimError> {
        let snake = Snake::from_cells(&grid, cells)?;
        Self::from_snake(grid, snake, direction, seed)
    }

    fn from_snake(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        seed: u64,
    ) -> Result<Self, SimError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let food = place_food(&grid, &snake, &mut rng)?;
        Ok(Self {
            seed,
            rng,
            grid,
            snake,
            food,
            turns: TurnBuffer::new(direction),
            score: 0,
            phase: GamePhase::Playing,
            move_timer: 0.0,
            play_time: 0.0,
            time_ticks: 0,
        })
    }

    /// Direction committed by the last tick
    pub fn direction(&self) -> Direction {
        self.turns.direction()
    }

    /// Buffer a turn; ignored outside Playing
    pub fn request_turn(&mut self, dir: Direction) -> bool {
        self.phase == GamePhase::Playing && self.turns.request(dir)
    }

    /// Toggle between Playing and Paused. GameOver is unaffected.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
