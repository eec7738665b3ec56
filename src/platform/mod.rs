//! Platform abstraction layer
//!
//! The core never talks to a keyboard or window directly. A host feeds one
//! `FrameInput` per frame through an `InputSource`.

use std::collections::VecDeque;

use crate::sim::Direction;

/// Edge-triggered input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Directional press this frame (held keys must not repeat)
    pub turn: Option<Direction>,
    /// Pause / resume toggle
    pub pause: bool,
    /// Start a new round after game over
    pub restart: bool,
    /// Leave for the menu (paused or game over)
    pub menu: bool,
}

impl FrameInput {
    pub fn turn(dir: Direction) -> Self {
        Self {
            turn: Some(dir),
            ..Default::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Default::default()
        }
    }

    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Default::default()
        }
    }

    pub fn menu() -> Self {
        Self {
            menu: true,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-frame input provider
pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

/// Replays a fixed list of frames, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: FrameInput) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}
