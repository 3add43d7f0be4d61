//! Integration tests for the public simulation API.
//!
//! These drive whole frames through `SimulationState` and the building
//! blocks it is made of, the way a frame driver would.

use driftfield::prelude::*;
use driftfield::{
    AmplitudeConfig, ConfigError, ForceField, InteractionConfig, Integrator, Particle, ParticlePool,
    PopulationConfig, SimulationClock, SpawnContext,
};

fn desktop_sim(width: f64, height: f64, seed: u64) -> SimulationState {
    SimulationState::with_seed(
        SimConfig::default(),
        DeviceProfile::Desktop,
        Viewport::new(width, height),
        seed,
    )
    .unwrap()
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_resize_growth_scenario() {
    let mut sim = desktop_sim(800.0, 600.0, 3);
    assert_eq!(sim.pool().len(), 150);
    let head: Vec<Particle> = sim.pool().iter().copied().collect();

    let outcome = sim.resize(Viewport::new(2000.0, 1500.0));
    assert_eq!(outcome.added, 150);
    assert_eq!(sim.pool().len(), 300);

    // Existing particles are kept in place, new ones land inside the new bounds.
    assert_eq!(&sim.pool().particles()[..150], head.as_slice());
    for p in &sim.pool().particles()[150..] {
        assert!((0.0..2000.0).contains(&p.position.x));
        assert!((0.0..1500.0).contains(&p.position.y));
    }
}

#[test]
fn test_population_after_resize_sequence() {
    let mut sim = desktop_sim(800.0, 600.0, 5);
    let config = PopulationConfig::default();
    for (w, h) in [(3000.0, 2000.0), (100.0, 100.0), (1234.0, 987.0), (1234.0, 987.0), (0.0, 0.0)] {
        sim.resize(Viewport::new(w, h));
        let expected = ((config.density * w * h / 10_000.0).round() as usize).max(config.floor);
        assert_eq!(sim.pool().len(), expected, "viewport {}x{}", w, h);
    }
}

#[test]
fn test_repeated_resize_is_noop() {
    let mut sim = desktop_sim(1600.0, 1200.0, 9);
    let before: Vec<Particle> = sim.pool().iter().copied().collect();
    let outcome = sim.resize(Viewport::new(1600.0, 1200.0));
    assert!(outcome.is_noop());
    assert_eq!(sim.pool().particles(), before.as_slice());
}

// ============================================================================
// Force and integration
// ============================================================================

#[test]
fn test_swirl_direction_scenario() {
    let config = InteractionConfig::desktop();
    let field = ForceField::new(&config);
    let integrator = Integrator::new(&config);
    let mut pool = ParticlePool::new(
        PopulationConfig {
            floor: 1,
            density: 0.0,
            ..Default::default()
        },
        Viewport::new(400.0, 400.0),
        SpawnContext::seeded(1),
    );
    assert_eq!(pool.len(), 1);

    let pointer = PointerState::pressed(DVec2::new(0.0, 0.0));
    let viewport = pool.viewport();
    pool.for_each_particle(|p| {
        p.position = DVec2::new(100.0, 0.0);
        p.velocity = DVec2::ZERO;
        let force = field.delta(p.position, &pointer);
        integrator.step(p, force, viewport);
    });

    let p = pool.particles()[0];
    // strength = (1 - 100/200) * 0.5 = 0.25, radial share 0.3
    assert!((p.position.x - 100.075).abs() < 1e-9);
    assert!((p.position.y - 0.25).abs() < 1e-9);
    assert!((p.velocity.y - 0.25 * 0.98).abs() < 1e-9);
    assert!((p.velocity.x - 0.075 * 0.98).abs() < 1e-9);
}

#[test]
fn test_released_pointer_leaves_velocity_to_damping() {
    let mut with_pointer_elsewhere = desktop_sim(800.0, 600.0, 21);
    let mut idle = desktop_sim(800.0, 600.0, 21);

    // A released pointer, wherever it is, contributes nothing.
    let released = FrameInputs {
        pointer: PointerState {
            active: false,
            position: DVec2::new(400.0, 300.0),
        },
        amplitude: None,
    };
    for _ in 0..30 {
        let a = with_pointer_elsewhere.step(&released);
        let b = idle.step(&FrameInputs::default());
        assert_eq!(a, b);
    }
}

#[test]
fn test_pressed_pointer_changes_nearby_particles_only() {
    let mut dragged = desktop_sim(800.0, 600.0, 4);
    let mut idle = desktop_sim(800.0, 600.0, 4);
    let pointer = DVec2::new(400.0, 300.0);
    let max = InteractionConfig::desktop().max_distance;

    let near: Vec<bool> = dragged
        .pool()
        .iter()
        .map(|p| {
            let d = p.position.distance(pointer);
            d > 0.0 && d < max
        })
        .collect();

    dragged.step(&FrameInputs {
        pointer: PointerState::pressed(pointer),
        amplitude: None,
    });
    idle.step(&FrameInputs::default());

    for ((a, b), near) in dragged.pool().iter().zip(idle.pool().iter()).zip(near) {
        if near {
            assert_ne!(a.velocity, b.velocity);
        } else {
            assert_eq!(a.velocity, b.velocity);
        }
    }
}

#[test]
fn test_particles_stay_in_bounds_while_dragging() {
    let mut sim = SimulationState::with_seed(
        SimConfig::default(),
        DeviceProfile::Touch,
        Viewport::new(640.0, 480.0),
        77,
    )
    .unwrap();

    for frame in 0..400u32 {
        // Circle the pointer around the middle of the screen.
        let t = frame as f64 * 0.05;
        let inputs = FrameInputs {
            pointer: PointerState::pressed(DVec2::new(320.0 + 150.0 * t.cos(), 240.0 + 150.0 * t.sin())),
            amplitude: None,
        };
        let out = sim.step(&inputs);
        for prim in &out.primitives {
            assert!((0.0..=640.0).contains(&prim.x), "x = {}", prim.x);
            assert!((0.0..=480.0).contains(&prim.y), "y = {}", prim.y);
        }
    }
}

#[test]
fn test_boundary_particle_at_rest_stays_put() {
    let integrator = Integrator::new(&InteractionConfig::desktop());
    let viewport = Viewport::new(300.0, 200.0);
    for corner in [
        DVec2::new(0.0, 0.0),
        DVec2::new(300.0, 0.0),
        DVec2::new(0.0, 200.0),
        DVec2::new(300.0, 200.0),
    ] {
        let mut p = Particle::at_rest(corner, 20.0, 0.0);
        for _ in 0..3 {
            integrator.step(&mut p, DVec2::ZERO, viewport);
            assert_eq!(p.position, corner);
        }
    }
}

// ============================================================================
// Color and clock
// ============================================================================

#[test]
fn test_frame_output_shape() {
    let mut sim = desktop_sim(1024.0, 768.0, 12);
    for _ in 0..50 {
        let frame = sim.step(&FrameInputs::default());
        assert_eq!(frame.fade.alpha, 8.0);
        assert_eq!(frame.fade.viewport, Viewport::new(1024.0, 768.0));
        assert_eq!(frame.len(), sim.pool().len());
        for prim in &frame.primitives {
            assert!((0.0..360.0).contains(&prim.color.hue));
            assert_eq!(prim.color.saturation, 100.0);
            assert_eq!(prim.color.alpha, 90.0);
            assert!(prim.diameter.is_finite());
        }
    }
}

#[test]
fn test_hue_base_period() {
    let mut clock = SimulationClock::new(0.5);
    let start = clock.hue_base();
    for _ in 0..720 {
        clock.advance();
        assert!((0.0..360.0).contains(&clock.hue_base()));
    }
    assert_eq!(clock.hue_base(), start);
    assert_eq!(clock.frame(), 720);
}

#[test]
fn test_frame_indices_count_from_zero() {
    let mut sim = desktop_sim(800.0, 600.0, 2);
    for expected in 0..5 {
        assert_eq!(sim.step(&FrameInputs::default()).index, expected);
    }
}

// ============================================================================
// Amplitude
// ============================================================================

#[test]
fn test_fallback_amplitude_is_deterministic() {
    let mut sim = desktop_sim(800.0, 600.0, 8);
    for n in 0..100u64 {
        sim.step(&FrameInputs::default());
        assert_eq!(sim.amplitude(), (n as f64 * 0.02).sin() * 50.0 + 50.0);
    }
}

#[test]
fn test_fallback_scenario_values() {
    let config = AmplitudeConfig::default();
    assert_eq!(driftfield::amplitude::fallback_level(&config, 0), 50.0);
    let at_25 = driftfield::amplitude::fallback_level(&config, 25);
    assert!((at_25 - (0.5f64.sin() * 50.0 + 50.0)).abs() < 1e-12);
    assert!((at_25 - 73.97).abs() < 0.01);
}

#[test]
fn test_shared_level_feeds_live_amplitude() {
    let (mut reader, writer) = SharedLevel::channel();
    let mut sim = desktop_sim(800.0, 600.0, 1);

    writer.publish(0.05);
    let inputs = FrameInputs {
        pointer: PointerState::released(),
        amplitude: reader.sample(),
    };
    sim.step(&inputs);
    assert!((sim.amplitude() - 10.0).abs() < 1e-9);

    // Losing the device switches back to the oscillator without error.
    writer.clear();
    let inputs = FrameInputs {
        pointer: PointerState::released(),
        amplitude: reader.sample(),
    };
    sim.step(&inputs);
    assert_eq!(sim.amplitude(), (0.02f64).sin() * 50.0 + 50.0);
}

#[test]
fn test_louder_input_draws_bigger_particles() {
    let mut quiet = desktop_sim(800.0, 600.0, 6);
    let mut loud = desktop_sim(800.0, 600.0, 6);

    let a = quiet.step(&FrameInputs {
        pointer: PointerState::released(),
        amplitude: Some(0.0),
    });
    let b = loud.step(&FrameInputs {
        pointer: PointerState::released(),
        amplitude: Some(0.05),
    });
    for (q, l) in a.primitives.iter().zip(&b.primitives) {
        assert!(l.diameter > q.diameter);
        assert!(l.color.brightness > q.color.brightness);
    }
}

// ============================================================================
// Configuration and rendering
// ============================================================================

#[test]
fn test_config_file_roundtrip() {
    let path = std::env::temp_dir().join("driftfield-config-roundtrip.json");
    let mut config = SimConfig::default();
    config.population.density = 1.2;
    config.interaction.touch.max_distance = 320.0;
    config.save(&path).unwrap();

    let loaded = SimConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.interaction(DeviceProfile::Touch).max_distance, 320.0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config = SimConfig::from_json(r#"{ "population": { "floor": 40 } }"#).unwrap();
    assert_eq!(config.population.floor, 40);
    assert_eq!(config.population.density, 1.0);
    assert_eq!(config.appearance.fade_alpha, 8.0);
}

#[test]
fn test_runaway_density_is_rejected_before_spawning() {
    let mut config = SimConfig::default();
    config.population.density = 1e300;
    let result = SimulationState::with_seed(config, DeviceProfile::Desktop, Viewport::new(800.0, 600.0), 0);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            field: "population.density",
            ..
        })
    ));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let result = SimConfig::load("/definitely/not/here/driftfield.json");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_snapshot_leaves_trails() {
    let mut sim = desktop_sim(200.0, 150.0, 31);
    let mut canvas = Canvas::new(200, 150);
    for _ in 0..60 {
        let frame = sim.step(&FrameInputs {
            pointer: PointerState::pressed(DVec2::new(100.0, 75.0)),
            amplitude: None,
        });
        canvas.draw(&frame);
    }

    let lit = canvas
        .image()
        .pixels()
        .filter(|px| px.0[0] > 0 || px.0[1] > 0 || px.0[2] > 0)
        .count();
    assert!(lit > 0);

    let path = std::env::temp_dir().join("driftfield-snapshot-test.png");
    canvas.save_png(&path).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_file(&path);
}
