//! Interactive window that drives the simulation once per display refresh.
//!
//! ```ignore
//! viewer::run(ViewerOptions {
//!     profile: DeviceProfile::Touch,
//!     ..Default::default()
//! })?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::amplitude::{AmplitudeSource, Silence};
use crate::config::{DeviceProfile, SimConfig};
use crate::draw::Frame;
use crate::error::ViewerError;
use crate::input::PointerTracker;
use crate::pool::Viewport;
use crate::render::gpu::GpuRenderer;
use crate::simulation::{FrameInputs, SimulationState};
use crate::time::FpsCounter;

/// Settings for [`run`].
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub config: SimConfig,
    pub profile: DeviceProfile,
    /// Fixed random seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub title: String,
    /// Initial window size in logical pixels.
    pub initial_size: (u32, u32),
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            profile: DeviceProfile::Desktop,
            seed: None,
            title: "driftfield".to_string(),
            initial_size: (1280, 720),
        }
    }
}

/// Open a window and run until it is closed, with no amplitude input.
pub fn run(options: ViewerOptions) -> Result<(), ViewerError> {
    run_with_source(options, Box::new(Silence))
}

/// Open a window and run until it is closed, sampling `source` once per frame.
pub fn run_with_source(
    options: ViewerOptions,
    source: Box<dyn AmplitudeSource>,
) -> Result<(), ViewerError> {
    // Fail before opening a window if the configuration is unusable.
    options.config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(options, source);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Viewport for a window size, `None` while the window is minimized.
fn drawable_viewport(size: PhysicalSize<u32>) -> Option<Viewport> {
    if size.width == 0 || size.height == 0 {
        None
    } else {
        Some(Viewport::new(size.width as f64, size.height as f64))
    }
}

/// Step the simulation unless the window has no drawable area.
///
/// A zero-sized viewport would wrap every particle onto the origin.
fn advance(
    simulation: &mut SimulationState,
    size: PhysicalSize<u32>,
    inputs: &FrameInputs,
) -> Option<Frame> {
    drawable_viewport(size).map(|_| simulation.step(inputs))
}

struct App {
    options: ViewerOptions,
    source: Box<dyn AmplitudeSource>,
    window: Option<Arc<Window>>,
    renderer: Option<GpuRenderer>,
    simulation: Option<SimulationState>,
    pointer: PointerTracker,
    fps: FpsCounter,
    error: Option<ViewerError>,
}

impl App {
    fn new(options: ViewerOptions, source: Box<dyn AmplitudeSource>) -> Self {
        Self {
            options,
            source,
            window: None,
            renderer: None,
            simulation: None,
            pointer: PointerTracker::new(),
            fps: FpsCounter::default(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let (width, height) = self.options.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        log::info!("window created at {}x{}", size.width, size.height);

        let renderer = pollster::block_on(GpuRenderer::new(window.clone()))?;

        let viewport = Viewport::new(size.width as f64, size.height as f64);
        let config = self.options.config.clone();
        let profile = self.options.profile;
        let simulation = match self.options.seed {
            Some(seed) => SimulationState::with_seed(config, profile, viewport, seed)?,
            None => SimulationState::new(config, profile, viewport)?,
        };

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.simulation = Some(simulation);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(simulation)) = (&mut self.renderer, &mut self.simulation) else {
            return;
        };

        let Some(window) = &self.window else {
            return;
        };

        let inputs = FrameInputs {
            pointer: self.pointer.state(),
            amplitude: self.source.sample(),
        };
        if let Some(frame) = advance(simulation, window.inner_size(), &inputs) {
            match renderer.render(&frame) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    renderer.reconfigure()
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            if let Some(fps) = self.fps.tick() {
                window.set_title(&format!(
                    "{} - {} particles - {:.0} fps",
                    self.options.title,
                    frame.len(),
                    fps
                ));
            }
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
                if let (Some(simulation), Some(viewport)) =
                    (&mut self.simulation, drawable_viewport(physical_size))
                {
                    simulation.request_resize(viewport);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_zero_sized_window_has_no_viewport() {
        assert_eq!(drawable_viewport(PhysicalSize::new(0, 0)), None);
        assert_eq!(drawable_viewport(PhysicalSize::new(800, 0)), None);
        assert_eq!(drawable_viewport(PhysicalSize::new(0, 600)), None);
        assert_eq!(
            drawable_viewport(PhysicalSize::new(800, 600)),
            Some(Viewport::new(800.0, 600.0))
        );
    }

    #[test]
    fn test_minimize_and_restore_keeps_field_spread() {
        let mut simulation = SimulationState::with_seed(
            SimConfig::default(),
            DeviceProfile::Desktop,
            Viewport::new(800.0, 600.0),
            5,
        )
        .unwrap();
        let inputs = FrameInputs::default();
        let open = PhysicalSize::new(800, 600);
        let minimized = PhysicalSize::new(0, 0);

        for _ in 0..10 {
            assert!(advance(&mut simulation, open, &inputs).is_some());
        }
        let before = simulation.clock().frame();

        if let Some(viewport) = drawable_viewport(minimized) {
            simulation.request_resize(viewport);
        }
        for _ in 0..30 {
            assert!(advance(&mut simulation, minimized, &inputs).is_none());
        }
        assert_eq!(simulation.clock().frame(), before);

        let frame = advance(&mut simulation, open, &inputs).unwrap();
        assert_eq!(frame.fade.viewport, Viewport::new(800.0, 600.0));

        let corners = [
            DVec2::new(0.0, 0.0),
            DVec2::new(800.0, 0.0),
            DVec2::new(0.0, 600.0),
            DVec2::new(800.0, 600.0),
        ];
        let cornered = simulation
            .pool()
            .iter()
            .filter(|p| corners.iter().any(|c| p.position.distance(*c) < 2.0))
            .count();
        assert!(cornered < 5, "{} particles stuck on corners", cornered);
    }
}
