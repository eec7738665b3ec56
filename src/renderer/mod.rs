//! Rendering interface
//!
//! The core does not own a window or GPU. It describes each frame as a list
//! of draw commands handed to a `RenderTarget` supplied by the host.

pub mod frame;
pub mod sprites;

pub use frame::draw_frame;
pub use sprites::{Corner, Sprite, segment_sprite};

use glam::Vec2;

use crate::theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the viewport
    Clear { color: Color },
    /// World-space point at the centre of the viewport (shake applied)
    Camera { center: Vec2 },
    /// Textured quad, `pos` is the bottom-left corner
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
        tint: Color,
    },
    /// Shadowed text, `pos` is the baseline anchor
    Text {
        text: String,
        pos: Vec2,
        scale: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Sink for draw calls
pub trait RenderTarget {
    fn submit(&mut self, command: DrawCommand);
}

/// Collects every command; handy for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    pub commands: Vec<DrawCommand>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of quads drawn with `sprite`
    pub fn count_sprites(&self, sprite: Sprite) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn camera(&self) -> Option<Vec2> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Camera { center } => Some(*center),
            _ => None,
        })
    }
}

impl RenderTarget for RecordingTarget {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
