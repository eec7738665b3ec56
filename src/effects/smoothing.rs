//! Frame-rate independent position smoothing
//!
//! One continuous position per snake segment, index-aligned with the body.
//! Rendering only; collisions always use grid cells.

use glam::Vec2;

use crate::cell_to_pixel;
use crate::consts::SMOOTH_RATE;
use crate::sim::Cell;

#[derive(Debug, Clone, Default)]
pub struct SmoothedBody {
    positions: Vec<Vec2>,
    rate: f32,
}

impl SmoothedBody {
    /// Start with every segment exactly on its cell
    pub fn new(cells: &[Cell]) -> Self {
        Self {
            positions: cells.iter().map(|c| cell_to_pixel(*c)).collect(),
            rate: SMOOTH_RATE,
        }
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Snap back onto `cells`, discarding any lag
    pub fn reset(&mut self, cells: &[Cell]) {
        self.positions.clear();
        self.positions.extend(cells.iter().map(|c| cell_to_pixel(*c)));
    }

    /// Mirror a head insertion. The new segment starts at the old head's
    /// pixel position so it slides forward instead of popping.
    pub fn on_head_inserted(&mut self, old_head: Cell) {
        self.positions.insert(0, cell_to_pixel(old_head));
    }

    /// Mirror a tail removal
    pub fn on_tail_removed(&mut self) {
        self.positions.pop();
    }

    /// Move every position toward its cell: `pos += (target - pos) * min(1, rate * dt)`
    pub fn update(&mut self, cells: &[Cell], dt: f32) {
        debug_assert_eq!(cells.len(), self.positions.len());
        let alpha = (self.rate * dt).min(1.0);
        for (pos, cell) in self.positions.iter_mut().zip(cells) {
            *pos = pos.lerp(cell_to_pixel(*cell), alpha);
        }
    }
}
