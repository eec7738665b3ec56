//! Turn buffering
//!
//! Key presses arrive per frame but the snake only moves once per tick. Two
//! slots (`next` and `queued`) let a quick two-key combo such as Up then Left
//! land on consecutive ticks instead of the second press being dropped.

use serde::{Deserialize, Serialize};

use super::grid::Direction;

/// Buffered turn intentions plus the direction currently being executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnBuffer {
    /// Direction committed by the last tick
    direction: Direction,
    /// Direction applied at the upcoming tick
    next: Direction,
    /// Direction applied at the tick after that
    queued: Option<Direction>,
}

impl TurnBuffer {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            next: direction,
            queued: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next(&self) -> Direction {
        self.next
    }

    pub fn queued(&self) -> Option<Direction> {
        self.queued
    }

    /// Whether a turn is already waiting for the next tick
    pub fn has_pending_turn(&self) -> bool {
        self.next != self.direction
    }

    /// Register a turn request.
    ///
    /// Duplicates and reversals of the planned direction are ignored. With no
    /// turn pending the planned direction is the committed one, so a reversal
    /// of the current heading never lands. Returns true if either slot
    /// changed.
    pub fn request(&mut self, dir: Direction) -> bool {
        if dir == self.next || dir.is_opposite(self.next) {
            return false;
        }

        if self.has_pending_turn() {
            let changed = self.queued != Some(dir);
            self.queued = Some(dir);
            changed
        } else {
            self.next = dir;
            true
        }
    }

    /// Commit the planned direction for this tick and promote the queued one.
    ///
    /// The queued turn is dropped if it would reverse the direction just
    /// committed.
    pub fn commit(&mut self) -> Direction {
        self.direction = self.next;
        if let Some(q) = self.queued.take() {
            if !q.is_opposite(self.direction) {
                self.next = q;
            }
        }
        self.direction
    }
}
