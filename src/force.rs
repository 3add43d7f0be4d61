//! Pointer-driven swirl force.
//!
//! While the pointer is held, particles inside `max_distance` receive a
//! velocity kick made of two parts: a tangential component that spins them
//! around the pointer and a smaller radial component pushing them outward.
//! Both fall off linearly to zero at `max_distance`.
//!
//! ```text
//!            tangential
//!               ^
//!               |
//!   pointer ----+----> radial
//!            particle
//! ```

use crate::config::InteractionConfig;
use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

/// Whether a drag or touch is currently pressed, and where.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub active: bool,
    pub position: DVec2,
}

impl PointerState {
    /// A pressed pointer at `position`.
    pub fn pressed(position: DVec2) -> Self {
        Self {
            active: true,
            position,
        }
    }

    /// A released pointer. The last position is irrelevant.
    pub fn released() -> Self {
        Self::default()
    }
}

/// Velocity delta generator around the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceField {
    max_distance: f64,
    /// `base_force * force_multiplier`, the strength at zero distance.
    peak: f64,
    radial_ratio: f64,
}

impl ForceField {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            max_distance: config.max_distance,
            peak: config.base_force * config.force_multiplier,
            radial_ratio: config.radial_ratio,
        }
    }

    #[inline]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Scalar strength at `distance` from the pointer.
    ///
    /// Zero at the pointer itself and anywhere at or beyond `max_distance`.
    pub fn strength_at(&self, distance: f64) -> f64 {
        if distance <= 0.0 || distance >= self.max_distance {
            return 0.0;
        }
        (1.0 - distance / self.max_distance) * self.peak
    }

    /// Velocity delta for a particle at `position` this frame.
    ///
    /// Exactly zero when the pointer is not active.
    pub fn delta(&self, position: DVec2, pointer: &PointerState) -> DVec2 {
        if !pointer.active {
            return DVec2::ZERO;
        }

        let offset = position - pointer.position;
        let strength = self.strength_at(offset.length());
        if strength == 0.0 {
            return DVec2::ZERO;
        }

        let angle = offset.y.atan2(offset.x);
        let swirl = DVec2::from_angle(angle + FRAC_PI_2) * strength;
        let push = DVec2::from_angle(angle) * strength * self.radial_ratio;
        swirl + push
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> ForceField {
        ForceField::new(&InteractionConfig::desktop())
    }

    #[test]
    fn test_inactive_pointer_has_no_force() {
        let field = desktop();
        let pointer = PointerState {
            active: false,
            position: DVec2::new(50.0, 50.0),
        };
        for x in [0.0, 49.0, 50.0, 51.0, 120.0, 900.0] {
            for y in [0.0, 50.0, 75.0] {
                assert_eq!(field.delta(DVec2::new(x, y), &pointer), DVec2::ZERO);
            }
        }
    }

    #[test]
    fn test_swirl_direction() {
        let field = desktop();
        let pointer = PointerState::pressed(DVec2::ZERO);
        let delta = field.delta(DVec2::new(100.0, 0.0), &pointer);

        // strength = (1 - 100/200) * 0.5 = 0.25
        assert!((delta.y - 0.25).abs() < 1e-12);
        assert!((delta.x - 0.075).abs() < 1e-12);
    }

    #[test]
    fn test_zero_distance_is_no_force() {
        let field = desktop();
        let pointer = PointerState::pressed(DVec2::new(10.0, 10.0));
        assert_eq!(field.delta(DVec2::new(10.0, 10.0), &pointer), DVec2::ZERO);
    }

    #[test]
    fn test_boundary_distance_is_no_force() {
        let field = desktop();
        let pointer = PointerState::pressed(DVec2::ZERO);
        assert_eq!(field.delta(DVec2::new(200.0, 0.0), &pointer), DVec2::ZERO);
        assert_eq!(field.delta(DVec2::new(0.0, 250.0), &pointer), DVec2::ZERO);
    }

    #[test]
    fn test_force_decays_with_distance() {
        let field = desktop();
        let pointer = PointerState::pressed(DVec2::ZERO);
        let mut previous = f64::INFINITY;
        for step in 1..200 {
            let magnitude = field.delta(DVec2::new(step as f64, 0.0), &pointer).length();
            assert!(magnitude < previous, "not decreasing at {}", step);
            previous = magnitude;
        }
    }

    #[test]
    fn test_touch_preset_is_stronger_and_wider() {
        let desktop = desktop();
        let touch = ForceField::new(&InteractionConfig::touch());
        assert!(touch.strength_at(100.0) > desktop.strength_at(100.0));
        assert_eq!(desktop.strength_at(250.0), 0.0);
        assert!(touch.strength_at(250.0) > 0.0);
    }
}
