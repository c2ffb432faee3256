//! Brick-hit sparks
//!
//! Purely cosmetic: particles never touch physics or scoring.

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLE_MIN_SIZE, PARTICLE_SHRINK, PARTICLES_PER_BURST};
use crate::platform::{Color, Display};

/// A single spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    /// Ticks left
    pub life: f32,
}

impl Particle {
    pub fn random<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)),
            size: rng.random_range(2.0..7.0),
            alpha: rng.random::<f32>(),
            life: rng.random_range(30.0..60.0),
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= 1.0;
        self.size *= PARTICLE_SHRINK;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0 && self.size > PARTICLE_MIN_SIZE
    }

    pub fn color(&self) -> Color {
        Color::rgba(255, 255, 0, self.alpha)
    }
}

/// Live particle pool with a hard cap
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
    cap: usize,
}

impl Particles {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap.min(256)),
            cap,
        }
    }

    /// Burst of sparks at `pos`; oldest sparks are evicted past the cap
    pub fn spawn<R: Rng + ?Sized>(&mut self, pos: Vec2, rng: &mut R) {
        if self.cap == 0 {
            return;
        }
        for _ in 0..PARTICLES_PER_BURST {
            if self.items.len() >= self.cap {
                self.items.remove(0);
            }
            self.items.push(Particle::random(pos, rng));
        }
    }

    /// Age every particle one tick and drop the dead ones
    pub fn update(&mut self) {
        for particle in self.items.iter_mut() {
            particle.update();
        }
        self.items.retain(Particle::is_alive);
    }

    pub fn draw(&self, display: &mut impl Display) {
        for particle in &self.items {
            display.fill_circle(particle.pos, particle.size, particle.color());
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }
}
