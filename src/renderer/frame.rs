//! Frame composition
//!
//! Turns a session snapshot into draw commands. Read-only: nothing here
//! mutates the session.

use glam::Vec2;

use super::sprites::{Sprite, segment_heading, segment_sprite};
use super::{DrawCommand, RenderTarget, TextAlign};
use crate::consts::CELL_SIZE;
use crate::session::Session;
use crate::sim::GamePhase;
use crate::theme::Color;

/// Segments overdraw their cell so neighbours join without seams
const SEGMENT_OVERLAP: f32 = 2.0;
/// Peak sideways slither offset in pixels
const SLITHER_AMPLITUDE: f32 = 2.5;

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const TEXT: Color = [0.95, 0.95, 0.9, 1.0];
const TEXT_DIM: Color = [0.9, 0.9, 0.85, 1.0];
const TEXT_HINT: Color = [0.8, 0.8, 0.75, 1.0];
const PAUSED_GREEN: Color = [0.3, 0.9, 0.4, 1.0];
const GAME_OVER_RED: Color = [0.95, 0.2, 0.2, 1.0];
const HIGH_SCORE_GOLD: Color = [1.0, 0.85, 0.2, 1.0];

fn with_alpha(mut color: Color, alpha: f32) -> Color {
    color[3] = alpha;
    color
}

fn quad(target: &mut dyn RenderTarget, sprite: Sprite, pos: Vec2, size: Vec2, tint: Color) {
    target.submit(DrawCommand::Sprite {
        sprite,
        pos,
        size,
        tint,
    });
}

fn text(
    target: &mut dyn RenderTarget,
    s: String,
    pos: Vec2,
    scale: f32,
    color: Color,
    align: TextAlign,
) {
    target.submit(DrawCommand::Text {
        text: s,
        pos,
        scale,
        color,
        align,
    });
}

/// Emit one complete frame for `session`
pub fn draw_frame(session: &Session, target: &mut dyn RenderTarget) {
    let palette = session.theme().palette();
    let glow = session.theme().has_glow();
    let state = &session.state;
    let width = state.grid.width as f32 * CELL_SIZE;
    let height = state.grid.height as f32 * CELL_SIZE;

    target.submit(DrawCommand::Clear {
        color: palette.background,
    });
    target.submit(DrawCommand::Camera {
        center: session.effects.camera(),
    });

    // Food glow sits under everything
    let food_pos = session.food_position();
    if glow {
        let glow_size = CELL_SIZE * 2.5;
        let inset = (glow_size - CELL_SIZE) / 2.0;
        quad(
            target,
            Sprite::Glow,
            food_pos - Vec2::splat(inset),
            Vec2::splat(glow_size),
            with_alpha(palette.food, 0.5),
        );
    }

    draw_snake(session, target, palette.snake_base);

    quad(target, Sprite::Food, food_pos, Vec2::splat(CELL_SIZE), WHITE);

    for p in session.effects.particles.iter() {
        let half = p.size / 2.0;
        quad(
            target,
            Sprite::Particle,
            p.pos - Vec2::splat(half),
            Vec2::splat(p.size),
            with_alpha(p.color, p.alpha()),
        );
    }

    draw_border(target, width, height, palette.border, glow);

    text(
        target,
        format!("Score: {}", state.score),
        Vec2::new(12.0, height - 12.0),
        2.0,
        TEXT,
        TextAlign::Left,
    );
    text(
        target,
        format!("Best: {}", session.high_score().max(state.score)),
        Vec2::new(12.0, height - 48.0),
        1.5,
        TEXT_HINT,
        TextAlign::Left,
    );

    let center = Vec2::new(width / 2.0, height / 2.0);
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Paused => {
            let size = Vec2::new(width, height);
            quad(target, Sprite::Overlay, Vec2::ZERO, size, palette.overlay);
            text(
                target,
                "PAUSED".into(),
                center + Vec2::new(0.0, 24.0),
                2.5,
                PAUSED_GREEN,
                TextAlign::Center,
            );
            text(
                target,
                "Press ESC to resume | M for menu".into(),
                center - Vec2::new(0.0, 24.0),
                2.5,
                TEXT_DIM,
                TextAlign::Center,
            );
        }
        GamePhase::GameOver => {
            let size = Vec2::new(width, height);
            quad(target, Sprite::Overlay, Vec2::ZERO, size, palette.overlay);
            text(
                target,
                "GAME OVER!".into(),
                center + Vec2::new(0.0, 80.0),
                2.5,
                GAME_OVER_RED,
                TextAlign::Center,
            );
            if session.is_new_high_score() {
                text(
                    target,
                    "NEW HIGH SCORE!".into(),
                    center + Vec2::new(0.0, 40.0),
                    2.5,
                    HIGH_SCORE_GOLD,
                    TextAlign::Center,
                );
            }
            text(target, stats_line(session), center, 1.8, TEXT_DIM, TextAlign::Center);
            text(
                target,
                "Press SPACE to restart | ESC for menu".into(),
                center - Vec2::new(0.0, 40.0),
                1.8,
                TEXT_HINT,
                TextAlign::Center,
            );
        }
    }
}

/// Summary shown on the game-over overlay
pub fn stats_line(session: &Session) -> String {
    let state = &session.state;
    format!(
        "Score: {}  |  Length: {}  |  Time: {}s",
        state.score,
        state.snake.len(),
        state.play_time as u32
    )
}

/// Tail first so the head draws on top
fn draw_snake(session: &Session, target: &mut dyn RenderTarget, tint: Color) {
    let segments = session.state.snake.segments();
    let positions = session.effects.body.positions();
    let heading = session.state.direction();
    let draw_size = CELL_SIZE + SEGMENT_OVERLAP * 2.0;

    for i in (0..segments.len().min(positions.len())).rev() {
        let (dx, dy) = segment_heading(segments, i, heading).delta();
        let perp = Vec2::new(-dy as f32, dx as f32);
        let wave = session.effects.slither_wave(i) * SLITHER_AMPLITUDE;
        let pos = positions[i] - Vec2::splat(SEGMENT_OVERLAP) + perp * wave;

        let scale = if i == 0 { session.effects.head_scale() } else { 1.0 };
        let size = draw_size * scale;
        let inset = (draw_size - size) / 2.0;

        quad(
            target,
            segment_sprite(segments, i, heading),
            pos + Vec2::splat(inset),
            Vec2::splat(size),
            tint,
        );
    }
}

fn draw_border(target: &mut dyn RenderTarget, width: f32, height: f32, color: Color, glow: bool) {
    let border = if glow { 6.0 } else { 4.0 };
    if glow {
        let g = border + 4.0;
        let tint = with_alpha(color, 0.3);
        let across = Vec2::new(width + 4.0, g + 4.0);
        let down = Vec2::new(g + 4.0, height + 4.0);
        quad(target, Sprite::Glow, Vec2::new(-2.0, height - g - 2.0), across, tint);
        quad(target, Sprite::Glow, Vec2::new(-2.0, -2.0), across, tint);
        quad(target, Sprite::Glow, Vec2::new(-2.0, -2.0), down, tint);
        quad(target, Sprite::Glow, Vec2::new(width - g - 2.0, -2.0), down, tint);
    }
    let across = Vec2::new(width, border);
    let down = Vec2::new(border, height);
    quad(target, Sprite::Border, Vec2::new(0.0, height - border), across, color);
    quad(target, Sprite::Border, Vec2::ZERO, across, color);
    quad(target, Sprite::Border, Vec2::ZERO, down, color);
    quad(target, Sprite::Border, Vec2::new(width - border, 0.0), down, color);
}
