//! Grid model: cells, directions and the snake body
//!
//! The snake lives on a fixed-size integer grid. Occupancy is answered by a
//! linear scan of the body, which is plenty at 20x20.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SNAKE_LENGTH;
use crate::error::SimError;

/// Integer grid coordinate (x grows right, y grows up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Clockwise index (Up = 0 .. Left = 3), used for sprite lookups
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step in grid space (Up is +y)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    /// Direction of travel from `from` to an adjacent `to`.
    ///
    /// Horizontal difference wins over vertical, so the result is only
    /// meaningful for grid-adjacent cells.
    pub fn between(from: Cell, to: Cell) -> Direction {
        if to.x > from.x {
            Direction::Right
        } else if to.x < from.x {
            Direction::Left
        } else if to.y > from.y {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// Fixed-size playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::consts::GRID_WIDTH, crate::consts::GRID_HEIGHT)
    }
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}

/// Snake body, head first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    segments: Vec<Cell>,
}

impl Snake {
    /// Starting snake: `length` cells laid out leftwards from `head`
    pub fn horizontal(head: Cell, length: usize) -> Self {
        let segments = (0..length as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        Self { segments }
    }

    /// Build from explicit cells, checking every body invariant
    pub fn from_cells(grid: &Grid, cells: Vec<Cell>) -> Result<Self, SimError> {
        if cells.len() < MIN_SNAKE_LENGTH {
            return Err(SimError::SnakeTooShort { len: cells.len() });
        }
        if let Some(c) = cells.iter().find(|c| !grid.in_bounds(**c)) {
            return Err(SimError::InvalidSnake(format!(
                "cell ({}, {}) is outside the grid",
                c.x, c.y
            )));
        }
        for (i, pair) in cells.windows(2).enumerate() {
            if pair[0].manhattan(pair[1]) != 1 {
                return Err(SimError::InvalidSnake(format!(
                    "segments {} and {} are not adjacent",
                    i,
                    i + 1
                )));
            }
        }
        for (i, c) in cells.iter().enumerate() {
            if cells[i + 1..].contains(c) {
                return Err(SimError::InvalidSnake(format!(
                    "cell ({}, {}) appears twice",
                    c.x, c.y
                )));
            }
        }
        Ok(Self { segments: cells })
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    /// Push a new head without touching the tail
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.segments.insert(0, cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.segments.pop()
    }

    /// True when no two segments share a cell
    pub fn is_self_disjoint(&self) -> bool {
        self.segments
            .iter()
            .enumerate()
            .all(|(i, c)| !self.segments[i + 1..].contains(c))
    }
}
