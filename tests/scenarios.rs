use glam::{Vec2, Vec3};
use hexorbit::sim::{
    BounceConfig, BounceSim, Driver, OrbitConfig, OrbitSim, PrismConfig, PrismSim, Simulation, WakeConfig,
    WakeSim,
};
use hexorbit::{MeshCanvas, Settings};

fn run_frames<S: Simulation>(sim: S, settings: &Settings, frames: u32, frame_time: f32) -> (Driver<S>, MeshCanvas) {
    let mut driver = Driver::new(sim, settings.clock());
    let mut canvas = MeshCanvas::default();
    for _ in 0..frames {
        canvas.clear();
        driver.frame(frame_time, &mut canvas);
    }
    (driver, canvas)
}

#[test]
fn bounce_settles_toward_the_floor() {
    let settings = Settings::default();
    let (driver, canvas) = run_frames(BounceSim::new(&settings.bounce), &settings, 60 * 30, 1.0 / 60.0);

    let sim = &driver.sim;
    assert!(sim.hexagon.contains_circle(sim.ball.pos, sim.ball.radius - 1e-3));
    assert!(sim.bounces > 10);
    // Friction and restitution bleed energy: the ball ends up slow
    assert!(sim.ball.vel.length() < 8.0);
    assert!(canvas.triangle_count() > 0);
}

#[test]
fn spinning_container_keeps_a_resting_ball_inside() {
    let settings = Settings::default();
    let config = BounceConfig {
        hex_angular_speed: 3.0,
        ball_velocity: Vec2::ZERO,
        ..settings.bounce.clone()
    };
    let (driver, _) = run_frames(BounceSim::new(&config), &settings, 600, 1.0 / 60.0);
    for edge in driver.sim.hexagon.edges() {
        assert!(edge.signed_distance(driver.sim.ball.pos) >= driver.sim.ball.radius - 1e-4);
    }
}

#[test]
fn prism_ball_loses_height_over_time() {
    let settings = Settings::default();
    let config = PrismConfig {
        ball_velocity: Vec3::ZERO,
        ball_position: Vec3::new(0.0, 4.0, 0.0),
        ..settings.prism.clone()
    };
    let (driver, _) = run_frames(PrismSim::new(&config), &settings, 60 * 20, 1.0 / 60.0);
    let sim = &driver.sim;
    assert!(sim.pos.y < 0.0);
    assert!(sim.pos.y - sim.radius >= sim.floor_y - 1e-4);
}

#[test]
fn orbit_driver_tracks_elapsed_time() {
    let settings = Settings::default();
    let (driver, canvas) = run_frames(OrbitSim::new(&OrbitConfig::default()), &settings, 100, 0.05);

    assert!((driver.sim.elapsed - f64::from(driver.steps as f32 * settings.sim_dt)).abs() < 1e-3);
    let earth = &driver.sim.planets[0];
    let expected = earth.position_at(driver.sim.elapsed);
    assert!((earth.position() - expected).length() < 1e-3);
    // Sun and two planets, 32 triangles each
    assert_eq!(canvas.triangle_count(), 3 * 32);
}

#[test]
fn wake_runs_through_driver() {
    let settings = Settings {
        sim_dt: 0.1,
        ..Default::default()
    };
    let config = WakeConfig {
        width: 60,
        height: 30,
        particle_count: 100,
        ..Default::default()
    };
    let (driver, canvas) = run_frames(WakeSim::new(&config), &settings, 20, 0.1);

    assert_eq!(driver.steps, 20);
    assert!((driver.sim.elapsed - 2.0).abs() < 1e-4);
    assert!(canvas.triangle_count() > 0);
}

#[test]
fn settings_json_drives_simulations() {
    let settings = Settings::from_json(
        r#"{
            "bounce": { "restitution": 0.0, "hex_angular_speed": 0.0 },
            "orbit": { "sun_radius": 40.0 }
        }"#,
    )
    .expect("valid settings");

    assert_eq!(settings.orbit.sun_radius, 40.0);
    assert_eq!(settings.orbit.planets.len(), 2);

    let sim = BounceSim::new(&settings.bounce);
    assert_eq!(sim.material.restitution, 0.0);
    assert_eq!(sim.hexagon.angular_velocity, 0.0);
}
