//! Snake segment sprite selection
//!
//! Each segment picks a head, tail, straight body or one of four corner
//! sprites from its neighbours on the grid.

use crate::sim::{Cell, Direction};

/// Corner sprite orientation, named by the two neighbour directions it
/// joins. Indices follow the clockwise direction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    UpRight,
    RightDown,
    DownLeft,
    LeftUp,
}

impl Corner {
    pub fn index(self) -> usize {
        match self {
            Corner::UpRight => 0,
            Corner::RightDown => 1,
            Corner::DownLeft => 2,
            Corner::LeftUp => 3,
        }
    }

    /// Corner joining neighbours in directions `a` and `b`, or None if the
    /// segment runs straight
    pub fn between(a: Direction, b: Direction) -> Option<Corner> {
        if a == b || a.is_opposite(b) {
            return None;
        }
        let lo = a.index().min(b.index());
        let hi = a.index().max(b.index());
        Some(match (lo, hi) {
            (0, 1) => Corner::UpRight,
            (1, 2) => Corner::RightDown,
            (2, 3) => Corner::DownLeft,
            _ => Corner::LeftUp,
        })
    }
}

/// Everything the game asks a render target to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    /// Head facing the travel direction
    Head(Direction),
    Body,
    Corner(Corner),
    /// Tail pointing away from the body
    Tail(Direction),
    Food,
    Glow,
    Particle,
    Border,
    Overlay,
}

/// Sprite for segment `index` of `segments` (head first). `heading` is the
/// direction the snake is travelling.
pub fn segment_sprite(segments: &[Cell], index: usize, heading: Direction) -> Sprite {
    let last = segments.len() - 1;
    if index == 0 {
        return Sprite::Head(heading);
    }
    if index == last {
        return Sprite::Tail(Direction::between(segments[index - 1], segments[index]));
    }

    let prev = segments[index - 1];
    let cur = segments[index];
    let next = segments[index + 1];
    // Holds for any self-disjoint, connected body
    debug_assert!(prev != next && cur.manhattan(prev) == 1 && cur.manhattan(next) == 1);

    match Corner::between(Direction::between(cur, prev), Direction::between(cur, next)) {
        Some(corner) => Sprite::Corner(corner),
        None => Sprite::Body,
    }
}

/// Direction a segment is travelling, used to orient the slither wave
pub fn segment_heading(segments: &[Cell], index: usize, heading: Direction) -> Direction {
    if index == 0 {
        heading
    } else {
        Direction::between(segments[index], segments[index - 1])
    }
}
