//! Configuration for driftfield simulations.
//!
//! Every tunable constant of the simulation lives here. Configurations can be
//! serialized to JSON and loaded back; missing sections fall back to their
//! defaults so partial files work.
//!
//! ```ignore
//! let mut config = SimConfig::default();
//! config.population.density = 1.2;
//! config.save("swirl.json")?;
//!
//! let config = SimConfig::load("swirl.json")?;
//! let interaction = config.interaction(DeviceProfile::Touch);
//! ```

use crate::error::ConfigError;
use crate::pool::MAX_POPULATION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Class of device the simulation runs on.
///
/// Supplied by the caller; selects one of the two interaction presets.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceProfile {
    /// Mouse-driven screens.
    #[default]
    Desktop,
    /// Touch screens. Larger interaction radius and stronger, less damped swirl.
    Touch,
}

/// Population sizing and particle initialization.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    /// Particles per 10 000 square pixels of viewport.
    pub density: f64,
    /// Minimum number of particles regardless of viewport area.
    pub floor: usize,
    /// Smallest base diameter assigned at spawn.
    pub size_min: f64,
    /// Largest base diameter assigned at spawn.
    pub size_max: f64,
    /// Initial velocity components are uniform in `[-initial_speed, initial_speed)`.
    pub initial_speed: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            floor: 150,
            size_min: 15.0,
            size_max: 35.0,
            initial_speed: 0.5,
        }
    }
}

/// Pointer interaction and integration constants for one device profile.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Radius around the pointer inside which particles feel the swirl.
    pub max_distance: f64,
    /// Force at the pointer itself, before the multiplier.
    pub base_force: f64,
    /// Per-profile scale applied on top of `base_force`.
    pub force_multiplier: f64,
    /// Outward push relative to the tangential swirl.
    pub radial_ratio: f64,
    /// Per-frame velocity multiplier.
    pub damping: f64,
}

impl InteractionConfig {
    /// Preset for mouse-driven screens.
    pub fn desktop() -> Self {
        Self {
            max_distance: 200.0,
            base_force: 0.5,
            force_multiplier: 1.0,
            radial_ratio: 0.3,
            damping: 0.98,
        }
    }

    /// Preset for touch screens.
    pub fn touch() -> Self {
        Self {
            max_distance: 300.0,
            base_force: 0.5,
            force_multiplier: 1.5,
            radial_ratio: 0.3,
            damping: 0.985,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

/// The two interaction presets, one per [`DeviceProfile`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionPresets {
    pub desktop: InteractionConfig,
    pub touch: InteractionConfig,
}

impl Default for InteractionPresets {
    fn default() -> Self {
        Self {
            desktop: InteractionConfig::desktop(),
            touch: InteractionConfig::touch(),
        }
    }
}

/// Color, brightness and size modulation.
///
/// Hue and brightness use the HSB model with ranges `[0, 360)` and `[0, 100]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Degrees the global hue base rotates each frame.
    pub hue_step: f64,
    /// Hue degrees added per pixel of x and y position.
    pub position_hue_scale: f64,
    pub saturation: f64,
    pub base_brightness: f64,
    pub amp_brightness_weight: f64,
    pub brightness_jitter: f64,
    /// Frequency of the brightness oscillation in radians per frame.
    pub brightness_rate: f64,
    pub amp_size_weight: f64,
    pub size_jitter: f64,
    /// Frequency of the size oscillation in radians per frame.
    pub size_rate: f64,
    /// Scale applied to the hue offset when used as the size phase.
    pub size_phase_scale: f64,
    /// Opacity of every particle, 0-100.
    pub particle_alpha: f64,
    /// Opacity of the black fill drawn over the previous frame, 0-100.
    pub fade_alpha: f64,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            hue_step: 0.5,
            position_hue_scale: 0.1,
            saturation: 100.0,
            base_brightness: 90.0,
            amp_brightness_weight: 0.2,
            brightness_jitter: 10.0,
            brightness_rate: 0.01,
            amp_size_weight: 0.15,
            size_jitter: 3.0,
            size_rate: 0.02,
            size_phase_scale: 0.1,
            particle_alpha: 90.0,
            fade_alpha: 8.0,
        }
    }
}

/// Amplitude smoothing and the synthetic fallback oscillator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmplitudeConfig {
    /// Exponential smoothing factor applied to live samples.
    pub smoothing: f64,
    /// Multiplier turning a raw input level into the `[0, ~100]` range.
    pub input_scale: f64,
    /// Fallback frequency in radians per frame.
    pub fallback_rate: f64,
    /// Fallback swing around its center.
    pub fallback_depth: f64,
    pub fallback_center: f64,
}

impl Default for AmplitudeConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            input_scale: 2000.0,
            fallback_rate: 0.02,
            fallback_depth: 50.0,
            fallback_center: 50.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub population: PopulationConfig,
    pub interaction: InteractionPresets,
    pub appearance: AppearanceConfig,
    pub amplitude: AmplitudeConfig,
}

impl SimConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Interaction preset for the given device profile.
    pub fn interaction(&self, profile: DeviceProfile) -> &InteractionConfig {
        match profile {
            DeviceProfile::Desktop => &self.interaction.desktop,
            DeviceProfile::Touch => &self.interaction.touch,
        }
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.population;
        non_negative("population.density", p.density)?;
        if p.density > MAX_DENSITY {
            return Err(invalid("population.density", "must not exceed 100"));
        }
        if p.floor > MAX_POPULATION {
            return Err(invalid("population.floor", "must not exceed 1000000"));
        }
        non_negative("population.size_min", p.size_min)?;
        non_negative("population.size_max", p.size_max)?;
        non_negative("population.initial_speed", p.initial_speed)?;
        if p.size_min > p.size_max {
            return Err(invalid("population.size_min", "must not exceed size_max"));
        }

        check_interaction(&self.interaction.desktop, &DESKTOP_FIELDS)?;
        check_interaction(&self.interaction.touch, &TOUCH_FIELDS)?;

        let a = &self.appearance;
        for (field, value) in [
            ("appearance.hue_step", a.hue_step),
            ("appearance.position_hue_scale", a.position_hue_scale),
            ("appearance.saturation", a.saturation),
            ("appearance.base_brightness", a.base_brightness),
            ("appearance.amp_brightness_weight", a.amp_brightness_weight),
            ("appearance.brightness_jitter", a.brightness_jitter),
            ("appearance.brightness_rate", a.brightness_rate),
            ("appearance.amp_size_weight", a.amp_size_weight),
            ("appearance.size_jitter", a.size_jitter),
            ("appearance.size_rate", a.size_rate),
            ("appearance.size_phase_scale", a.size_phase_scale),
        ] {
            finite(field, value)?;
        }
        percentage("appearance.particle_alpha", a.particle_alpha)?;
        percentage("appearance.fade_alpha", a.fade_alpha)?;

        let amp = &self.amplitude;
        finite("amplitude.smoothing", amp.smoothing)?;
        if !(0.0..=1.0).contains(&amp.smoothing) {
            return Err(invalid("amplitude.smoothing", "must be within [0, 1]"));
        }
        finite("amplitude.input_scale", amp.input_scale)?;
        finite("amplitude.fallback_rate", amp.fallback_rate)?;
        finite("amplitude.fallback_depth", amp.fallback_depth)?;
        finite("amplitude.fallback_center", amp.fallback_center)?;

        Ok(())
    }
}

/// Particles per 10 000 square pixels, i.e. one per square pixel.
const MAX_DENSITY: f64 = 100.0;

/// Field names used when reporting a bad interaction preset.
struct InteractionFields {
    max_distance: &'static str,
    force: &'static str,
    damping: &'static str,
}

const DESKTOP_FIELDS: InteractionFields = InteractionFields {
    max_distance: "interaction.desktop.max_distance",
    force: "interaction.desktop",
    damping: "interaction.desktop.damping",
};

const TOUCH_FIELDS: InteractionFields = InteractionFields {
    max_distance: "interaction.touch.max_distance",
    force: "interaction.touch",
    damping: "interaction.touch.damping",
};

fn check_interaction(i: &InteractionConfig, fields: &InteractionFields) -> Result<(), ConfigError> {
    if !i.max_distance.is_finite() || i.max_distance <= 0.0 {
        return Err(invalid(fields.max_distance, "must be finite and positive"));
    }
    for value in [i.base_force, i.force_multiplier, i.radial_ratio] {
        if !value.is_finite() {
            return Err(invalid(fields.force, "force values must be finite"));
        }
    }
    if !(0.0..=1.0).contains(&i.damping) {
        return Err(invalid(fields.damping, "must be within [0, 1]"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be finite and non-negative"))
    }
}

fn percentage(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 100]"))
    }
}
