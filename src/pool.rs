//! The particle pool.
//!
//! Owns every particle and keeps the population proportional to viewport
//! area. Resizing appends freshly spawned particles or drops them from the
//! end; insertion order is draw order, so later particles land on top.

use crate::config::PopulationConfig;
use crate::particle::Particle;
use crate::spawn::SpawnContext;

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area in square pixels. Negative or non-finite dimensions count as zero.
    pub fn area(&self) -> f64 {
        let w = if self.width.is_finite() { self.width.max(0.0) } else { 0.0 };
        let h = if self.height.is_finite() { self.height.max(0.0) } else { 0.0 };
        w * h
    }
}

/// Upper bound on the population of any pool.
pub const MAX_POPULATION: usize = 1_000_000;

/// Number of particles a viewport should hold.
///
/// `max(floor, round(density * area / 10000))`, capped at [`MAX_POPULATION`].
pub fn target_population(config: &PopulationConfig, viewport: Viewport) -> usize {
    let scaled = (config.density * viewport.area() / 10_000.0).round();
    let by_area = if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        scaled.min(MAX_POPULATION as f64) as usize
    };
    by_area.max(config.floor).min(MAX_POPULATION)
}

/// What a call to [`ParticlePool::resize`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub added: usize,
    pub removed: usize,
}

impl ResizeOutcome {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Owner of all particle records.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    viewport: Viewport,
    config: PopulationConfig,
    spawner: SpawnContext,
}

impl ParticlePool {
    /// Create a pool already populated for `viewport`.
    pub fn new(config: PopulationConfig, viewport: Viewport, spawner: SpawnContext) -> Self {
        let mut pool = Self {
            particles: Vec::new(),
            viewport,
            config,
            spawner,
        };
        pool.resize(viewport);
        pool
    }

    /// Track a new viewport size.
    ///
    /// Appends particles spawned inside the new bounds until the target is
    /// reached, or truncates from the end. Repeating the call with the same
    /// dimensions changes nothing.
    pub fn resize(&mut self, viewport: Viewport) -> ResizeOutcome {
        self.viewport = viewport;
        let target = target_population(&self.config, viewport);
        let current = self.particles.len();

        if current < target {
            self.particles.reserve(target - current);
            for _ in current..target {
                let particle = self.spawner.particle(viewport, &self.config);
                self.particles.push(particle);
            }
            ResizeOutcome {
                added: target - current,
                removed: 0,
            }
        } else {
            self.particles.truncate(target);
            ResizeOutcome {
                added: 0,
                removed: current - target,
            }
        }
    }

    /// Visit every particle once, in insertion order.
    pub fn for_each_particle<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&mut Particle),
    {
        for particle in &mut self.particles {
            visitor(particle);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current bounds used for spawning and wraparound.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }
}
