//! Per-frame kinematics for a single particle.

use crate::config::InteractionConfig;
use crate::particle::Particle;
use crate::pool::Viewport;
use glam::DVec2;

/// Advances particles one frame: kick, move, damp, wrap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    damping: f64,
}

impl Integrator {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            damping: config.damping,
        }
    }

    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Advance `particle` by one frame.
    ///
    /// `force` is the delta from the force field, zero when the pointer is
    /// released. Afterwards the position lies in `[0, width] × [0, height]`.
    pub fn step(&self, particle: &mut Particle, force: DVec2, viewport: Viewport) {
        particle.velocity += force;
        particle.position += particle.velocity;
        particle.velocity *= self.damping;

        particle.position.x = wrap_axis(particle.position.x, viewport.width);
        particle.position.y = wrap_axis(particle.position.y, viewport.height);
    }
}

/// Hard reset to the opposite edge. Not a modulo wrap.
#[inline]
fn wrap_axis(value: f64, max: f64) -> f64 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}
