//! hexorbit entry point
//!
//! Runs every simulation headless through the fixed-step driver, tessellating
//! each frame into a vertex mesh, and logs what happened. Set `RUST_LOG=debug`
//! (or `trace` for every bounce) for more detail.

use hexorbit::sim::{BounceSim, Driver, OrbitSim, PrismSim, Simulation, WakeSim};
use hexorbit::{MeshCanvas, Settings};

/// Display refresh the demo pretends to run at
const FRAME_TIME: f32 = 1.0 / 60.0;
/// Simulated seconds per demo
const DEMO_SECONDS: f32 = 5.0;

/// Drive a simulation for `seconds`, returning the driver and the last frame's mesh
fn run<S: Simulation>(sim: S, settings: &Settings, frame_time: f32, seconds: f32) -> (Driver<S>, MeshCanvas) {
    let mut driver = Driver::new(sim, settings.clock());
    let mut canvas = MeshCanvas::default();
    let frames = (seconds / frame_time).round() as u32;

    for _ in 0..frames {
        canvas.clear();
        driver.frame(frame_time, &mut canvas);
    }

    (driver, canvas)
}

fn main() {
    env_logger::init();
    log::info!("hexorbit (headless) starting...");

    let settings = Settings::default();
    if log::log_enabled!(log::Level::Debug) {
        match settings.to_json() {
            Ok(json) => log::debug!("Settings:\n{json}"),
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }

    let (bounce, mesh) = run(BounceSim::new(&settings.bounce), &settings, FRAME_TIME, DEMO_SECONDS);
    let frame = bounce.sim.snapshot();
    log::info!(
        "Hexagon bounce: {} frames, {} steps, {} bounces, ball at ({:.2}, {:.2}), {} triangles",
        bounce.frames,
        bounce.steps,
        bounce.sim.bounces,
        frame.ball_center.x,
        frame.ball_center.y,
        mesh.triangle_count()
    );

    let (prism, mesh) = run(PrismSim::new(&settings.prism), &settings, FRAME_TIME, DEMO_SECONDS);
    log::info!(
        "Prism bounce: {} steps, ball at ({:.2}, {:.2}, {:.2}), {} triangles",
        prism.steps,
        prism.sim.pos.x,
        prism.sim.pos.y,
        prism.sim.pos.z,
        mesh.triangle_count()
    );

    let (orbit, mesh) = run(OrbitSim::new(&settings.orbit), &settings, FRAME_TIME, DEMO_SECONDS);
    for planet in &orbit.sim.planets {
        let p = planet.position();
        log::info!(
            "Orbit: {} at ({:.1}, {:.1}) after {:.2}s",
            planet.name,
            p.x,
            p.y,
            orbit.sim.elapsed
        );
    }
    log::debug!("Orbit frame: {} triangles", mesh.triangle_count());

    // The wake animates at its own coarse frame rate, one step per frame
    let mut wake_settings = settings.clone();
    wake_settings.sim_dt = 0.1;
    let (wake, mesh) = run(WakeSim::new(&settings.wake), &wake_settings, 0.1, DEMO_SECONDS);
    let total: f32 = wake.sim.density.iter().sum();
    log::info!(
        "Wake: t={:.1}s, total smoke {:.1}, wake strength {:.3}, {} bytes of vertex data",
        wake.sim.elapsed,
        total,
        wake.sim.wake_strength,
        mesh.as_bytes().len()
    );

    println!("hexorbit: all simulations ran headless; set RUST_LOG=info to see the summary");
}
