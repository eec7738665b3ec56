//! Particle bursts for eat, crash and game-over events
//!
//! Particles live in a fixed-capacity arena. Slots are addressed by
//! generation-checked handles and recycled through a free list, so bursts
//! never allocate after construction.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::theme::Color;

/// Per-frame velocity multiplier (applied once per frame, not scaled by dt)
pub const PARTICLE_DRAG: f32 = 0.92;

const CRASH_RED: Color = [0.9, 0.2, 0.2, 1.0];
const GAME_OVER_GREEN: Color = [0.3, 0.9, 0.4, 1.0];
const GAME_OVER_YELLOW: Color = [0.9, 0.9, 0.3, 1.0];

/// A single particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Linear fade-out
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Emission profile for one kind of burst
#[derive(Debug, Clone, Copy)]
pub struct BurstProfile {
    pub count: usize,
    pub speed: (f32, f32),
    pub life: (f32, f32),
    pub size: (f32, f32),
}

pub const EAT_BURST: BurstProfile = BurstProfile {
    count: 12,
    speed: (40.0, 120.0),
    life: (0.3, 0.5),
    size: (3.0, 7.0),
};

pub const CRASH_BURST: BurstProfile = BurstProfile {
    count: 20,
    speed: (60.0, 180.0),
    life: (0.4, 0.7),
    size: (4.0, 9.0),
};

pub const GAME_OVER_BURST: BurstProfile = BurstProfile {
    count: 35,
    speed: (80.0, 230.0),
    life: (0.5, 0.9),
    size: (5.0, 11.0),
};

/// Stable reference to a live particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    particle: Particle,
    generation: u32,
    alive: bool,
}

/// Fixed-capacity particle arena
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live slots in spawn order
    active: Vec<u32>,
    rng: Pcg32,
}

impl ParticlePool {
    pub fn new(capacity: usize, rng: Pcg32) -> Self {
        let empty = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: [0.0; 4],
            life: 0.0,
            max_life: 0.0,
            size: 0.0,
        };
        Self {
            slots: vec![
                Slot {
                    particle: empty,
                    generation: 0,
                    alive: false,
                };
                capacity
            ],
            // Pop from the back hands out low indices first
            free: (0..capacity as u32).rev().collect(),
            active: Vec::with_capacity(capacity),
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Claim a slot. Returns None when the arena is saturated.
    pub fn spawn(&mut self, particle: Particle) -> Option<ParticleHandle> {
        let Some(index) = self.free.pop() else {
            log::debug!("Particle pool full ({}), dropping particle", self.slots.len());
            return None;
        };
        let slot = &mut self.slots[index as usize];
        slot.particle = particle;
        slot.alive = true;
        self.active.push(index);
        Some(ParticleHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Look up a particle; stale handles return None
    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.alive && s.generation == handle.generation)
            .map(|s| &s.particle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.active.iter().map(|&i| &self.slots[i as usize].particle)
    }

    /// Integrate every live particle and retire the expired ones
    pub fn update(&mut self, dt: f32) {
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.active.retain(|&index| {
            let slot = &mut slots[index as usize];
            let p = &mut slot.particle;
            p.pos += p.vel * dt;
            p.vel *= PARTICLE_DRAG;
            p.life -= dt;
            if p.life <= 0.0 {
                slot.alive = false;
                slot.generation = slot.generation.wrapping_add(1);
                free.push(index);
                false
            } else {
                true
            }
        });
    }

    /// Drop every live particle
    pub fn clear(&mut self) {
        for index in self.active.drain(..) {
            let slot = &mut self.slots[index as usize];
            slot.alive = false;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }

    /// Emit a radial burst from `origin`; `pick_color` chooses each colour
    /// from a uniform roll in [0, 1).
    pub fn burst(
        &mut self,
        origin: Vec2,
        profile: &BurstProfile,
        mut pick_color: impl FnMut(f32) -> Color,
    ) -> usize {
        let mut spawned = 0;
        for _ in 0..profile.count {
            let angle = self.rng.random::<f32>() * std::f32::consts::TAU;
            let speed = lerp_range(profile.speed, self.rng.random());
            let max_life = lerp_range(profile.life, self.rng.random());
            let size = lerp_range(profile.size, self.rng.random());
            let color = pick_color(self.rng.random());
            let particle = Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: max_life,
                max_life,
                size,
            };
            if self.spawn(particle).is_none() {
                break;
            }
            spawned += 1;
        }
        spawned
    }

    pub fn emit_eat(&mut self, origin: Vec2, color: Color) -> usize {
        self.burst(origin, &EAT_BURST, |_| color)
    }

    pub fn emit_crash(&mut self, origin: Vec2) -> usize {
        self.burst(origin, &CRASH_BURST, |_| CRASH_RED)
    }

    /// Red/green/yellow confetti, weighted 50/30/20
    pub fn emit_game_over(&mut self, origin: Vec2) -> usize {
        self.burst(origin, &GAME_OVER_BURST, |roll| {
            if roll < 0.5 {
                CRASH_RED
            } else if roll < 0.8 {
                GAME_OVER_GREEN
            } else {
                GAME_OVER_YELLOW
            }
        })
    }
}

fn lerp_range((lo, hi): (f32, f32), t: f32) -> f32 {
    lo + (hi - lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool(capacity: usize) -> ParticlePool {
        ParticlePool::new(capacity, Pcg32::seed_from_u64(17))
    }

    #[test]
    fn test_eat_burst_drains_to_zero() {
        let mut pool = pool(256);
        assert_eq!(pool.emit_eat(Vec2::new(100.0, 100.0), [1.0, 0.0, 0.0, 1.0]), 12);
        assert_eq!(pool.active_count(), 12);

        let longest = pool.iter().map(|p| p.max_life).fold(0.0, f32::max);
        assert!(longest <= EAT_BURST.life.1);

        let dt = 1.0 / 60.0;
        let mut t = 0.0;
        while t <= longest + dt {
            pool.update(dt);
            t += dt;
        }
        assert_eq!(pool.active_count(), 0);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_burst_sizes() {
        let mut pool = pool(256);
        assert_eq!(pool.emit_crash(Vec2::ZERO), 20);
        assert_eq!(pool.emit_game_over(Vec2::ZERO), 35);
        assert_eq!(pool.active_count(), 55);
        assert!(pool.iter().all(|p| p.life > 0.0 && p.alpha() == 1.0));
    }

    #[test]
    fn test_integration_and_fade() {
        let mut pool = pool(4);
        let handle = pool
            .spawn(Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(100.0, 0.0),
                color: [1.0; 4],
                life: 1.0,
                max_life: 1.0,
                size: 4.0,
            })
            .unwrap();

        pool.update(0.25);
        let p = pool.get(handle).unwrap();
        assert!((p.pos.x - 25.0).abs() < 1e-4);
        assert!((p.vel.x - 92.0).abs() < 1e-3);
        assert!((p.alpha() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_saturation_and_slot_reuse() {
        let mut pool = pool(8);
        assert_eq!(pool.emit_eat(Vec2::ZERO, [1.0; 4]), 8);
        assert_eq!(pool.emit_crash(Vec2::ZERO), 0);

        let stale = ParticleHandle {
            index: 0,
            generation: 0,
        };
        assert!(pool.get(stale).is_some());

        pool.update(10.0);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.get(stale).is_none());

        // Recycled slots are usable again
        assert_eq!(pool.emit_crash(Vec2::ZERO), 8);
    }

    #[test]
    fn test_clear() {
        let mut pool = pool(64);
        pool.emit_game_over(Vec2::ZERO);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.emit_game_over(Vec2::ZERO), 35);
    }
}
