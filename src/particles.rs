//! Ambient floating dust confined to a container.

use std::ops::Range;

use rand::Rng;

use crate::color::Rgb;
use crate::surface::{Paint, Point, Surface};
use crate::viewport::Viewport;

pub const DEFAULT_COUNT: usize = 20;
pub const SIZE_RANGE: Range<f64> = 1.0..4.0;
pub const VELOCITY_RANGE: Range<f64> = -0.25..0.25;
pub const OPACITY_RANGE: Range<f64> = 0.2..0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn random(bounds: Viewport, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen::<f64>() * bounds.width,
            y: rng.gen::<f64>() * bounds.height,
            size: rng.gen_range(SIZE_RANGE),
            vx: rng.gen_range(VELOCITY_RANGE),
            vy: rng.gen_range(VELOCITY_RANGE),
            opacity: rng.gen_range(OPACITY_RANGE),
        }
    }

    /// Advance one step, then reflect each axis that ended up outside
    /// `[0, bound]`. Position is not clamped, so it may overshoot a bound by
    /// one step before travelling back.
    pub fn advance(&mut self, bounds: Viewport) {
        self.x += self.vx;
        self.y += self.vy;
        if self.x < 0.0 || self.x > bounds.width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > bounds.height {
            self.vy = -self.vy;
        }
    }
}

/// A fixed-size particle set tied to one container size.
#[derive(Debug, Clone)]
pub struct ParticleField {
    bounds: Viewport,
    count: usize,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(bounds: Viewport, count: usize, rng: &mut impl Rng) -> Self {
        let mut field = Self {
            bounds,
            count,
            particles: Vec::with_capacity(count),
        };
        field.populate(rng);
        field
    }

    /// Build a field from hand-placed particles, for test fixtures.
    pub fn from_particles(bounds: Viewport, particles: Vec<Particle>) -> Self {
        Self {
            bounds,
            count: particles.len(),
            particles,
        }
    }

    /// Start a new size epoch: the whole set is discarded and regenerated.
    pub fn resize(&mut self, bounds: Viewport, rng: &mut impl Rng) {
        self.bounds = bounds;
        self.populate(rng);
    }

    fn populate(&mut self, rng: &mut impl Rng) {
        self.particles.clear();
        if !self.bounds.is_drawable() {
            return;
        }
        let bounds = self.bounds;
        self.particles
            .extend((0..self.count).map(|_| Particle::random(bounds, rng)));
    }

    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Draw the particles at their current positions, then advance them.
    pub fn step(&mut self, surface: &mut impl Surface) {
        if !self.bounds.is_drawable() {
            return;
        }
        surface.clear(self.bounds.width, self.bounds.height);
        for p in &self.particles {
            let paint = Paint::Solid(Rgb::WHITE.with_opacity(p.opacity));
            surface.fill_circle(Point::new(p.x, p.y), p.size, &paint);
        }
        self.update();
    }

    pub fn update(&mut self) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.advance(bounds);
        }
    }
}
