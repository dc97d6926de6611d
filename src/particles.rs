//! Background particle field: a fixed batch of drifting, glowing dots.
//!
//! Particles are plain records in a `Vec`. Each frame moves every particle by
//! its velocity once, regardless of elapsed time, and wraps coordinates that
//! leave the surface to the opposite edge. A resize throws the whole batch away
//! and draws a fresh one.

use crate::config::ParticleConfig;
use crate::surface::{Rgba, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
    pub vx: f64,
    pub vy: f64,
}

/// Create `config.count` particles scattered over a `width` x `height` surface.
///
/// A surface without a positive, finite area gets no particles.
pub fn initialize(
    width: f64,
    height: f64,
    config: &ParticleConfig,
    rng: &mut fastrand::Rng,
) -> Vec<Particle> {
    if !has_area(width, height) || config.palette.is_empty() {
        return Vec::new();
    }

    (0..config.count)
        .map(|_| Particle {
            x: rng.f64() * width,
            y: rng.f64() * height,
            radius: config.min_radius + rng.f64() * config.radius_spread,
            color: config.palette[rng.usize(..config.palette.len())],
            vx: (rng.f64() - 0.5) * 2.0 * config.max_speed,
            vy: (rng.f64() - 0.5) * 2.0 * config.max_speed,
        })
        .collect()
}

/// Move one particle a single frame step and wrap it back onto the surface.
pub fn advance(p: &mut Particle, width: f64, height: f64) {
    p.x = wrap(p.x + p.vx, width);
    p.y = wrap(p.y + p.vy, height);
}

/// Clear the whole surface and paint every particle.
pub fn draw<S: Surface>(particles: &[Particle], glow_blur: f64, surface: &mut S) {
    let (width, height) = surface.size();
    surface.clear(0.0, 0.0, width, height);
    for p in particles {
        surface.fill_glow_circle(p.x, p.y, p.radius, p.color, glow_blur);
    }
}

// Teleport, don't reflect: falling off one edge re-enters at the other.
fn wrap(v: f64, bound: f64) -> f64 {
    let mut v = v;
    if v < 0.0 {
        v = bound;
    }
    if v > bound {
        v = 0.0;
    }
    v
}

fn has_area(width: f64, height: f64) -> bool {
    width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
}

/// The particle batch together with the surface size it was generated for.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    config: ParticleConfig,
    rng: fastrand::Rng,
}

impl ParticleField {
    /// An empty field; nothing exists until the first [`ParticleField::resize`].
    pub fn new(config: ParticleConfig, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            config,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Regenerate the batch for a new surface size. In-flight motion is discarded.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.particles = initialize(width, height, &self.config, &mut self.rng);
        log::debug!(
            "particle field regenerated: {} particles on {}x{}",
            self.particles.len(),
            width,
            height
        );
    }

    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            advance(p, width, height);
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        draw(&self.particles, self.config.glow_blur, surface);
    }

    /// One animation frame: advance, then repaint.
    pub fn step<S: Surface>(&mut self, surface: &mut S) {
        self.tick();
        self.draw(surface);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
