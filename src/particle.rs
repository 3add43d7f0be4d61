//! The particle record.

use glam::DVec2;

/// One drifting particle.
///
/// Position and velocity are in viewport pixels and pixels per frame. `size`
/// and `hue_offset` are fixed at spawn; the color mapper modulates them at
/// render time without writing back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Base diameter in pixels.
    pub size: f64,
    /// Per-particle hue phase in degrees, `[0, 360)`.
    pub hue_offset: f64,
}

impl Particle {
    /// A particle at rest.
    pub fn at_rest(position: DVec2, size: f64, hue_offset: f64) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            size,
            hue_offset,
        }
    }
}
