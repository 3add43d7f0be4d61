//! Frame-based clocks.
//!
//! The simulation itself is driven purely by frame count: [`SimulationClock`]
//! counts frames and rotates the global hue. Wall-clock time only matters to
//! the viewer, which uses [`FpsCounter`] to report frame rate in the window
//! title.

use crate::color::wrap_degrees;
use std::time::{Duration, Instant};

/// Frame counter and rotating hue base.
///
/// Both advance once per simulated frame, never per particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    frame: u64,
    hue_base: f64,
    hue_step: f64,
}

impl SimulationClock {
    pub fn new(hue_step: f64) -> Self {
        Self {
            frame: 0,
            hue_base: 0.0,
            hue_step,
        }
    }

    /// Frames completed so far. The first frame is frame 0.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current global hue rotation in `[0, 360)`.
    #[inline]
    pub fn hue_base(&self) -> f64 {
        self.hue_base
    }

    /// Finish a frame: count it and rotate the hue base.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.hue_base = wrap_degrees(self.hue_base + self.hue_step);
    }
}

/// Frames-per-second estimate, refreshed periodically.
#[derive(Debug)]
pub struct FpsCounter {
    fps: f32,
    frames: u64,
    window_start: Instant,
    interval: Duration,
}

impl FpsCounter {
    /// Counter that refreshes its estimate every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            fps: 0.0,
            frames: 0,
            window_start: Instant::now(),
            interval,
        }
    }

    /// Record one presented frame.
    ///
    /// Returns the new estimate when it was refreshed by this call.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Latest estimate, 0 until the first refresh.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}
