//! Transient visual effects
//!
//! Driven once per frame with the variable frame delta, independent of the
//! fixed simulation tick. The session forwards tick outcomes here; nothing in
//! this module feeds back into gameplay.

pub mod particles;
pub mod shake;
pub mod smoothing;

pub use particles::{Particle, ParticleHandle, ParticlePool};
pub use shake::ScreenShake;
pub use smoothing::SmoothedBody;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{EAT_PULSE_DURATION, MAX_PARTICLES};
use crate::sim::Cell;
use crate::theme::Color;
use crate::{cell_center, settings::Settings};

/// Slither wave speed (radians per second)
const SLITHER_SPEED: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct Effects {
    pub body: SmoothedBody,
    pub particles: ParticlePool,
    pub shake: ScreenShake,
    /// Seconds left on the head squash/stretch
    eat_pulse: f32,
    /// Clock for the sideways slither wave, runs only while playing
    slither_time: f32,
    particles_enabled: bool,
    shake_enabled: bool,
}

impl Effects {
    pub fn new(cells: &[Cell], seed: u64) -> Self {
        // Separate streams so visuals never perturb food placement
        Self {
            body: SmoothedBody::new(cells),
            particles: ParticlePool::new(MAX_PARTICLES, Pcg32::seed_from_u64(seed ^ 0x0a02_bdbf)),
            shake: ScreenShake::new(Pcg32::seed_from_u64(seed ^ 0x5eed_5a4e)),
            eat_pulse: 0.0,
            slither_time: 0.0,
            particles_enabled: true,
            shake_enabled: true,
        }
    }

    /// Apply the user's effect toggles
    pub fn configure(&mut self, settings: &Settings) {
        self.particles_enabled = settings.particles;
        self.shake_enabled = settings.effective_screen_shake();
        if !self.shake_enabled {
            self.shake.stop();
        }
    }

    /// Back to a clean slate for a new round
    pub fn reset(&mut self, cells: &[Cell]) {
        self.body.reset(cells);
        self.particles.clear();
        self.shake.stop();
        self.eat_pulse = 0.0;
        self.slither_time = 0.0;
    }

    /// Mirror a successful move in the display positions
    pub fn on_moved(&mut self, old_head: Cell, grew: bool) {
        self.body.on_head_inserted(old_head);
        if !grew {
            self.body.on_tail_removed();
        }
    }

    pub fn on_eat(&mut self, food: Cell, color: Color) {
        if self.particles_enabled {
            self.particles.emit_eat(cell_center(food), color);
        }
        if self.shake_enabled {
            self.shake.shake_eat();
        }
        self.eat_pulse = EAT_PULSE_DURATION;
    }

    /// Crash at `head`: crash sparks, game-over confetti, heavy shake
    pub fn on_crash(&mut self, head: Cell) {
        if self.particles_enabled {
            let origin = cell_center(head);
            self.particles.emit_crash(origin);
            self.particles.emit_game_over(origin);
        }
        if self.shake_enabled {
            self.shake.shake_game_over();
        }
    }

    /// Per-frame update. Smoothing, particles and shake always run; the
    /// slither clock only advances while `playing`.
    pub fn update(&mut self, cells: &[Cell], camera_base: Vec2, dt: f32, playing: bool) {
        if playing {
            self.slither_time += dt;
        }
        self.body.update(cells, dt);
        self.particles.update(dt);
        self.shake.update(camera_base, dt);
        self.eat_pulse = (self.eat_pulse - dt).max(0.0);
    }

    /// Shake-adjusted camera centre for this frame
    pub fn camera(&self) -> Vec2 {
        self.shake.position()
    }

    /// Head scale: rises and falls once over the pulse duration
    pub fn head_scale(&self) -> f32 {
        if self.eat_pulse <= 0.0 {
            return 1.0;
        }
        let t = 1.0 - self.eat_pulse / EAT_PULSE_DURATION;
        1.0 + 0.25 * (t * std::f32::consts::PI).sin()
    }

    /// Sideways wave phase for segment `index`
    pub fn slither_wave(&self, index: usize) -> f32 {
        (self.slither_time * SLITHER_SPEED + index as f32 * 0.6).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells() -> Vec<Cell> {
        vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
    }

    #[test]
    fn test_crash_emits_both_bursts() {
        let mut fx = Effects::new(&cells(), 1);
        fx.on_crash(Cell::new(10, 10));
        assert_eq!(fx.particles.active_count(), 55);
        assert_eq!(fx.shake.intensity(), shake::SHAKE_GAME_OVER);
    }

    #[test]
    fn test_toggles_suppress_effects() {
        let mut fx = Effects::new(&cells(), 1);
        let settings = Settings {
            particles: false,
            reduced_motion: true,
            ..Settings::default()
        };
        fx.configure(&settings);
        fx.on_eat(Cell::new(3, 3), [1.0; 4]);
        fx.on_crash(Cell::new(10, 10));
        assert_eq!(fx.particles.active_count(), 0);
        assert_eq!(fx.shake.intensity(), 0.0);
    }

    #[test]
    fn test_eat_pulse_shape() {
        let mut fx = Effects::new(&cells(), 1);
        assert_eq!(fx.head_scale(), 1.0);
        fx.on_eat(Cell::new(3, 3), [1.0; 4]);
        fx.update(&cells(), Vec2::ZERO, EAT_PULSE_DURATION / 2.0, true);
        assert!((fx.head_scale() - 1.25).abs() < 1e-3);
        fx.update(&cells(), Vec2::ZERO, EAT_PULSE_DURATION, true);
        assert_eq!(fx.head_scale(), 1.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut fx = Effects::new(&cells(), 1);
        fx.on_crash(Cell::new(10, 10));
        fx.on_moved(Cell::new(10, 10), true);
        fx.reset(&cells());
        assert_eq!(fx.particles.active_count(), 0);
        assert_eq!(fx.shake.intensity(), 0.0);
        assert_eq!(fx.body.len(), 3);
    }
}
