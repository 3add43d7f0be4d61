//! Ambient amplitude input.
//!
//! Amplitude is a smoothed scalar in roughly `[0, 100]` that brightens and
//! enlarges particles. It comes from an optional live source such as a
//! microphone level meter. When no live sample is available the value
//! follows a deterministic oscillator instead, so the visuals stay
//! continuous whether or not the capability exists.
//!
//! # Sources
//!
//! Anything implementing [`AmplitudeSource`] can feed the simulation,
//! including plain closures:
//!
//! ```ignore
//! let mut level = 0.0;
//! let source = move || { level += 0.001; Some(level) };
//! ```
//!
//! For a capture running on another thread, [`SharedLevel`] publishes the
//! latest raw level through an atomic so the frame reads one consistent
//! snapshot.

use crate::config::AmplitudeConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A capability that may or may not yield a raw level this frame.
pub trait AmplitudeSource {
    /// The latest raw level, or `None` when the input is unavailable.
    fn sample(&mut self) -> Option<f64>;
}

impl<F> AmplitudeSource for F
where
    F: FnMut() -> Option<f64>,
{
    fn sample(&mut self) -> Option<f64> {
        (self)()
    }
}

/// Source for devices without any amplitude input.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silence;

impl AmplitudeSource for Silence {
    fn sample(&mut self) -> Option<f64> {
        None
    }
}

/// Reader half of a level shared with a capture thread.
#[derive(Debug, Clone)]
pub struct SharedLevel {
    bits: Arc<AtomicU64>,
}

/// Writer half handed to the capture thread.
#[derive(Debug, Clone)]
pub struct LevelWriter {
    bits: Arc<AtomicU64>,
}

impl SharedLevel {
    /// Create a linked reader/writer pair. Starts absent.
    pub fn channel() -> (SharedLevel, LevelWriter) {
        let bits = Arc::new(AtomicU64::new(f64::NAN.to_bits()));
        (
            SharedLevel { bits: bits.clone() },
            LevelWriter { bits },
        )
    }
}

impl AmplitudeSource for SharedLevel {
    fn sample(&mut self) -> Option<f64> {
        let level = f64::from_bits(self.bits.load(Ordering::Acquire));
        if level.is_nan() {
            None
        } else {
            Some(level)
        }
    }
}

impl LevelWriter {
    /// Publish the latest raw level.
    pub fn publish(&self, level: f64) {
        self.bits.store(level.to_bits(), Ordering::Release);
    }

    /// Mark the input as unavailable, e.g. after the device disappears.
    pub fn clear(&self) {
        self.bits.store(f64::NAN.to_bits(), Ordering::Release);
    }
}

/// The synthetic level used when no live input exists.
///
/// `sin(frame * rate) * depth + center`.
pub fn fallback_level(config: &AmplitudeConfig, frame: u64) -> f64 {
    (frame as f64 * config.fallback_rate).sin() * config.fallback_depth + config.fallback_center
}

/// Which kind of input drove the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplitudeMode {
    Live,
    Fallback,
}

/// Smoothed amplitude with automatic fallback.
#[derive(Debug, Clone)]
pub struct AmplitudeState {
    value: f64,
    mode: Option<AmplitudeMode>,
    config: AmplitudeConfig,
}

impl AmplitudeState {
    pub fn new(config: AmplitudeConfig) -> Self {
        Self {
            value: 0.0,
            mode: None,
            config,
        }
    }

    /// Current amplitude.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Mode of the most recent update, `None` before the first one.
    #[inline]
    pub fn mode(&self) -> Option<AmplitudeMode> {
        self.mode
    }

    /// Fold this frame's sample into the state and return the new value.
    ///
    /// A finite live sample moves the value toward `sample * input_scale` by
    /// the smoothing factor. A missing or non-finite sample sets the value to
    /// the fallback oscillator for `frame`.
    pub fn update(&mut self, sample: Option<f64>, frame: u64) -> f64 {
        let mode = match sample {
            Some(level) if level.is_finite() => {
                let target = level * self.config.input_scale;
                self.value += (target - self.value) * self.config.smoothing;
                AmplitudeMode::Live
            }
            _ => {
                self.value = fallback_level(&self.config, frame);
                AmplitudeMode::Fallback
            }
        };

        if self.mode != Some(mode) {
            log::debug!("amplitude input switched to {:?} at frame {}", mode, frame);
            self.mode = Some(mode);
        }
        self.value
    }
}
