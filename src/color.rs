//! Particle color and size mapping.
//!
//! Colors are produced in the HSB model (hue in degrees, saturation,
//! brightness and alpha in `0..=100`). The mapper never clamps: brightness
//! can leave `[0, 100]` when amplitude is high, and it is up to the renderer
//! to clamp when converting with [`Hsba::to_rgba`].

use crate::config::AppearanceConfig;
use crate::particle::Particle;

/// An HSB color with alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsba {
    /// Degrees, `[0, 360)`.
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

impl Hsba {
    pub fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    /// Convert to linear-blend RGBA in `0.0..=1.0`, clamping every channel.
    pub fn to_rgba(&self) -> [f32; 4] {
        let h = wrap_degrees(self.hue) / 360.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness / 100.0).clamp(0.0, 1.0);
        let a = (self.alpha / 100.0).clamp(0.0, 1.0);
        let [r, g, b] = hsv_to_rgb(h, s, v);
        [r as f32, g as f32, b as f32, a as f32]
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Convert HSV (all components `0..=1`) to RGB.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Render-time color and diameter of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub color: Hsba,
    pub diameter: f64,
}

/// Derives a particle's color and size from its state and the global clock.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMapper {
    config: AppearanceConfig,
}

impl ColorMapper {
    pub fn new(config: AppearanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppearanceConfig {
        &self.config
    }

    /// `(hue_base + hue_offset + (x + y) * position_hue_scale) mod 360`.
    pub fn hue(&self, particle: &Particle, hue_base: f64) -> f64 {
        let scale = self.config.position_hue_scale;
        wrap_degrees(
            hue_base
                + particle.hue_offset
                + particle.position.x * scale
                + particle.position.y * scale,
        )
    }

    /// Brightness before renderer clamping.
    pub fn brightness(&self, particle: &Particle, frame: u64, amplitude: f64) -> f64 {
        let c = &self.config;
        let wobble = (frame as f64 * c.brightness_rate + particle.hue_offset).sin();
        c.base_brightness + amplitude * c.amp_brightness_weight + wobble * c.brightness_jitter
    }

    /// Diameter this frame. The stored base size is not modified.
    pub fn render_size(&self, particle: &Particle, frame: u64, amplitude: f64) -> f64 {
        let c = &self.config;
        let phase = frame as f64 * c.size_rate + particle.hue_offset * c.size_phase_scale;
        particle.size + amplitude * c.amp_size_weight + phase.sin() * c.size_jitter
    }

    /// Full appearance of `particle` for this frame.
    pub fn map(&self, particle: &Particle, hue_base: f64, frame: u64, amplitude: f64) -> Appearance {
        Appearance {
            color: Hsba::new(
                self.hue(particle, hue_base),
                self.config.saturation,
                self.brightness(particle, frame, amplitude),
                self.config.particle_alpha,
            ),
            diameter: self.render_size(particle, frame, amplitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn mapper() -> ColorMapper {
        ColorMapper::new(AppearanceConfig::default())
    }

    #[test]
    fn test_hue_formula() {
        let p = Particle::at_rest(DVec2::new(100.0, 200.0), 20.0, 45.0);
        // 10 + 45 + 10 + 20
        assert!((mapper().hue(&p, 10.0) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_wraps_into_range() {
        let p = Particle::at_rest(DVec2::new(1900.0, 1000.0), 20.0, 359.0);
        for base in [0.0, 90.5, 359.5] {
            let hue = mapper().hue(&p, base);
            assert!((0.0..360.0).contains(&hue), "hue {} out of range", hue);
        }
    }

    #[test]
    fn test_wrap_degrees_edges() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_brightness_at_frame_zero() {
        let p = Particle::at_rest(DVec2::ZERO, 20.0, 0.0);
        // sin(0) = 0, so only base + amplitude weight remain
        assert!((mapper().brightness(&p, 0, 50.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_brightness_is_not_clamped() {
        let p = Particle::at_rest(DVec2::ZERO, 20.0, std::f64::consts::FRAC_PI_2);
        assert!(mapper().brightness(&p, 0, 100.0) > 100.0);
    }

    #[test]
    fn test_render_size_leaves_base_untouched() {
        let p = Particle::at_rest(DVec2::ZERO, 20.0, 0.0);
        let size = mapper().render_size(&p, 0, 40.0);
        assert!((size - 26.0).abs() < 1e-9);
        assert_eq!(p.size, 20.0);
    }

    #[test]
    fn test_map_uses_configured_alpha_and_saturation() {
        let p = Particle::at_rest(DVec2::new(5.0, 5.0), 20.0, 10.0);
        let look = mapper().map(&p, 0.0, 3, 10.0);
        assert_eq!(look.color.alpha, 90.0);
        assert_eq!(look.color.saturation, 100.0);
    }

    #[test]
    fn test_hsv_to_rgb_red() {
        let red = Hsba::new(0.0, 100.0, 100.0, 100.0).to_rgba();
        assert!((red[0] - 1.0).abs() < 0.001);
        assert!(red[1] < 0.001);
        assert!(red[2] < 0.001);
        assert!((red[3] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_to_rgba_clamps_brightness() {
        let over = Hsba::new(120.0, 100.0, 140.0, 90.0).to_rgba();
        let full = Hsba::new(120.0, 100.0, 100.0, 90.0).to_rgba();
        assert_eq!(over, full);
        let under = Hsba::new(120.0, 100.0, -20.0, 90.0).to_rgba();
        assert_eq!(&under[..3], &[0.0, 0.0, 0.0]);
    }
}
