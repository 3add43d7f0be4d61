//! Random initialization of new particles.
//!
//! [`SpawnContext`] wraps the random source used by the particle pool. Every
//! particle appended on resize comes from [`SpawnContext::particle`].

use crate::config::PopulationConfig;
use crate::particle::Particle;
use crate::pool::Viewport;
use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random source with helpers for spawning particles inside a viewport.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from system entropy, different every run.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic context for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f64 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f64, max: f64) -> f64 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Uniform position inside the viewport.
    pub fn random_position(&mut self, viewport: Viewport) -> DVec2 {
        DVec2::new(
            self.random_range(0.0, viewport.width),
            self.random_range(0.0, viewport.height),
        )
    }

    /// Velocity with both components uniform in `[-speed, speed)`.
    pub fn random_velocity(&mut self, speed: f64) -> DVec2 {
        DVec2::new(
            self.random_range(-speed, speed),
            self.random_range(-speed, speed),
        )
    }

    /// Hue phase in `[0, 360)`.
    pub fn random_hue_offset(&mut self) -> f64 {
        self.random_range(0.0, 360.0)
    }

    /// A freshly initialized particle somewhere inside `viewport`.
    pub fn particle(&mut self, viewport: Viewport, config: &PopulationConfig) -> Particle {
        Particle {
            position: self.random_position(viewport),
            velocity: self.random_velocity(config.initial_speed),
            size: self.random_range(config.size_min, config.size_max),
            hue_offset: self.random_hue_offset(),
        }
    }
}
