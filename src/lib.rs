//! # driftfield
//!
//! Ambient particle field that drifts, cycles through hues and swirls around
//! the pointer.
//!
//! The simulation core is renderer-agnostic: every frame,
//! [`SimulationState::step`] consumes the pointer state and an optional
//! amplitude sample and returns a [`Frame`] of draw primitives. A wgpu window
//! viewer and a CPU raster canvas are provided to display those frames.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftfield::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut sim = SimulationState::with_seed(
//!         SimConfig::default(),
//!         DeviceProfile::Desktop,
//!         Viewport::new(800.0, 600.0),
//!         42,
//!     )?;
//!
//!     let mut canvas = Canvas::new(800, 600);
//!     for _ in 0..120 {
//!         let frame = sim.step(&FrameInputs {
//!             pointer: PointerState::pressed(DVec2::new(400.0, 300.0)),
//!             amplitude: None,
//!         });
//!         canvas.draw(&frame);
//!     }
//!     canvas.save_png("swirl.png")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Population
//!
//! The [`ParticlePool`] keeps `max(floor, round(density * area / 10000))`
//! particles. Growing the viewport appends new particles, shrinking it drops
//! particles from the end.
//!
//! ### Swirl
//!
//! While the pointer is pressed, particles within `max_distance` receive a
//! velocity delta perpendicular to the pointer direction plus a smaller
//! outward push. Strength falls off linearly to zero at `max_distance`.
//!
//! ### Device Profiles
//!
//! [`DeviceProfile`] selects between the desktop and touch interaction
//! presets (radius, force multiplier, damping). The caller decides which one
//! applies.
//!
//! ### Amplitude
//!
//! An optional [`AmplitudeSource`] brightens and enlarges particles. Without a
//! live sample the amplitude follows a deterministic sine so the visuals stay
//! continuous.

pub mod amplitude;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod force;
pub mod input;
pub mod integrator;
pub mod particle;
pub mod pool;
pub mod render;
pub mod simulation;
pub mod spawn;
pub mod time;
pub mod viewer;

pub use amplitude::{AmplitudeMode, AmplitudeSource, AmplitudeState, LevelWriter, SharedLevel, Silence};
pub use color::{ColorMapper, Hsba};
pub use config::{AmplitudeConfig, AppearanceConfig, DeviceProfile, InteractionConfig, PopulationConfig, SimConfig};
pub use draw::{DrawPrimitive, FadeFill, Frame};
pub use error::{ConfigError, GpuError, RenderError, ViewerError};
pub use force::{ForceField, PointerState};
pub use glam::DVec2;
pub use input::PointerTracker;
pub use integrator::Integrator;
pub use particle::Particle;
pub use pool::{ParticlePool, ResizeOutcome, Viewport};
pub use render::raster::Canvas;
pub use simulation::{FrameInputs, SimulationState};
pub use spawn::SpawnContext;
pub use time::{FpsCounter, SimulationClock};
pub use viewer::ViewerOptions;

/// Convenient imports for driftfield.
///
/// ```ignore
/// use driftfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::amplitude::{AmplitudeSource, SharedLevel, Silence};
    pub use crate::config::{DeviceProfile, SimConfig};
    pub use crate::draw::{DrawPrimitive, Frame};
    pub use crate::force::PointerState;
    pub use crate::input::PointerTracker;
    pub use crate::pool::Viewport;
    pub use crate::render::raster::Canvas;
    pub use crate::simulation::{FrameInputs, SimulationState};
    pub use crate::viewer::{self, ViewerOptions};
    pub use crate::DVec2;
}
