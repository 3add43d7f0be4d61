//! The per-frame simulation pass.
//!
//! [`SimulationState`] owns the particle pool, clock and amplitude, and turns
//! one frame of input into one [`Frame`] of draw primitives:
//!
//! ```ignore
//! let mut sim = SimulationState::new(SimConfig::default(), DeviceProfile::Desktop, Viewport::new(1280.0, 720.0))?;
//!
//! // Once per display refresh:
//! let frame = sim.step(&FrameInputs {
//!     pointer: tracker.state(),
//!     amplitude: source.sample(),
//! });
//! renderer.draw(&frame);
//! ```
//!
//! Input callbacks that may fire while a frame is being produced should use
//! [`SimulationState::request_resize`]; the new viewport is applied at the
//! top of the next step, before any particle is visited.

use crate::amplitude::AmplitudeState;
use crate::color::ColorMapper;
use crate::config::{DeviceProfile, SimConfig};
use crate::draw::{DrawPrimitive, FadeFill, Frame};
use crate::error::ConfigError;
use crate::force::{ForceField, PointerState};
use crate::integrator::Integrator;
use crate::pool::{ParticlePool, ResizeOutcome, Viewport};
use crate::spawn::SpawnContext;
use crate::time::SimulationClock;
use glam::DVec2;

/// Snapshot of everything external to the simulation for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInputs {
    pub pointer: PointerState,
    /// Raw live amplitude level, `None` when the input is unavailable.
    pub amplitude: Option<f64>,
}

/// All mutable simulation state.
#[derive(Debug, Clone)]
pub struct SimulationState {
    config: SimConfig,
    profile: DeviceProfile,
    pool: ParticlePool,
    force_field: ForceField,
    integrator: Integrator,
    color_mapper: ColorMapper,
    clock: SimulationClock,
    amplitude: AmplitudeState,
    pending_resize: Option<Viewport>,
}

impl SimulationState {
    /// Validate `config` and build a populated simulation for `viewport`.
    pub fn new(
        config: SimConfig,
        profile: DeviceProfile,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        Self::with_spawner(config, profile, viewport, SpawnContext::from_entropy())
    }

    /// Like [`SimulationState::new`] with a deterministic random source.
    pub fn with_seed(
        config: SimConfig,
        profile: DeviceProfile,
        viewport: Viewport,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_spawner(config, profile, viewport, SpawnContext::seeded(seed))
    }

    fn with_spawner(
        config: SimConfig,
        profile: DeviceProfile,
        viewport: Viewport,
        spawner: SpawnContext,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let interaction = config.interaction(profile);
        let force_field = ForceField::new(interaction);
        let integrator = Integrator::new(interaction);
        let pool = ParticlePool::new(config.population.clone(), viewport, spawner);
        log::info!(
            "spawned {} particles for {}x{} ({:?})",
            pool.len(),
            viewport.width,
            viewport.height,
            profile
        );

        Ok(Self {
            color_mapper: ColorMapper::new(config.appearance.clone()),
            clock: SimulationClock::new(config.appearance.hue_step),
            amplitude: AmplitudeState::new(config.amplitude.clone()),
            pool,
            force_field,
            integrator,
            profile,
            config,
            pending_resize: None,
        })
    }

    /// Queue a viewport change for the start of the next step.
    ///
    /// Later requests replace earlier ones that have not been applied yet.
    pub fn request_resize(&mut self, viewport: Viewport) {
        self.pending_resize = Some(viewport);
    }

    /// Apply a viewport change immediately.
    pub fn resize(&mut self, viewport: Viewport) -> ResizeOutcome {
        self.pending_resize = None;
        let outcome = self.pool.resize(viewport);
        if !outcome.is_noop() {
            log::info!(
                "viewport {}x{}: population {} (+{} -{})",
                viewport.width,
                viewport.height,
                self.pool.len(),
                outcome.added,
                outcome.removed
            );
        }
        outcome
    }

    /// Run one frame and return what to draw.
    pub fn step(&mut self, inputs: &FrameInputs) -> Frame {
        if let Some(viewport) = self.pending_resize.take() {
            self.resize(viewport);
        }

        let frame = self.clock.frame();
        let hue_base = self.clock.hue_base();
        let amplitude = self.amplitude.update(inputs.amplitude, frame);
        let viewport = self.pool.viewport();
        let pointer = inputs.pointer;

        let force_field = &self.force_field;
        let integrator = &self.integrator;
        let mapper = &self.color_mapper;
        let mut primitives = Vec::with_capacity(self.pool.len());

        self.pool.for_each_particle(|particle| {
            let force = if pointer.active {
                force_field.delta(particle.position, &pointer)
            } else {
                DVec2::ZERO
            };
            integrator.step(particle, force, viewport);

            let look = mapper.map(particle, hue_base, frame, amplitude);
            primitives.push(DrawPrimitive {
                x: particle.position.x,
                y: particle.position.y,
                diameter: look.diameter,
                color: look.color,
            });
        });

        self.clock.advance();

        Frame {
            index: frame,
            fade: FadeFill {
                viewport,
                alpha: self.config.appearance.fade_alpha,
            },
            primitives,
        }
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Amplitude used by the most recent step.
    pub fn amplitude(&self) -> f64 {
        self.amplitude.value()
    }

    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.pending_resize.unwrap_or_else(|| self.pool.viewport())
    }
}
