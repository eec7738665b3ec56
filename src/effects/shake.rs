//! Screen shake
//!
//! Intensity is bumped by triggers, drains linearly, and bounds a random
//! per-frame camera offset. At zero intensity the camera sits exactly on its
//! base position.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Intensity drained per second
pub const SHAKE_DECAY: f32 = 8.0;

pub const SHAKE_EAT: f32 = 2.0;
pub const SHAKE_GAME_OVER: f32 = 8.0;

#[derive(Debug, Clone)]
pub struct ScreenShake {
    intensity: f32,
    decay: f32,
    base: Vec2,
    offset: Vec2,
    rng: Pcg32,
}

impl ScreenShake {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            intensity: 0.0,
            decay: SHAKE_DECAY,
            base: Vec2::ZERO,
            offset: Vec2::ZERO,
            rng,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Camera position for this frame
    pub fn position(&self) -> Vec2 {
        self.base + self.offset
    }

    /// Raise intensity to at least `intensity`; weaker requests never cut a
    /// stronger shake short
    pub fn shake(&mut self, intensity: f32) {
        self.intensity = self.intensity.max(intensity);
    }

    pub fn shake_eat(&mut self) {
        self.shake(SHAKE_EAT);
    }

    pub fn shake_game_over(&mut self) {
        self.shake(SHAKE_GAME_OVER);
    }

    /// Stop immediately
    pub fn stop(&mut self) {
        self.intensity = 0.0;
        self.offset = Vec2::ZERO;
    }

    /// Drain intensity and roll this frame's offset around `base`.
    /// Returns the camera position.
    pub fn update(&mut self, base: Vec2, dt: f32) -> Vec2 {
        self.base = base;
        self.intensity = (self.intensity - self.decay * dt).max(0.0);
        self.offset = if self.intensity > 0.0 {
            let x = (self.rng.random::<f32>() - 0.5) * 2.0 * self.intensity;
            let y = (self.rng.random::<f32>() - 0.5) * 2.0 * self.intensity;
            Vec2::new(x, y)
        } else {
            Vec2::ZERO
        };
        self.position()
    }
}
