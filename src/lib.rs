//! hexorbit - headless toy simulations
//!
//! Core modules:
//! - `sim`: Simulations (hexagon bounce, prism bounce, orbits, turbine wake) and the frame driver
//! - `renderer`: Drawing collaborator trait and a vertex-generating canvas
//! - `settings`: Serializable configuration for every simulation

pub mod renderer;
pub mod settings;
pub mod sim;

pub use renderer::{Canvas, MeshCanvas};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Simulation constants shared by the demo driver and the defaults
pub mod consts {
    /// Fixed simulation timestep (100 Hz, matches the bounce toys)
    pub const SIM_DT: f32 = 1.0 / 100.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will account for (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Standard gravity (m/s²)
    pub const GRAVITY: f32 = 9.81;

    /// Planar bounce defaults
    pub const HEX_CIRCUMRADIUS: f32 = 5.0;
    pub const HEX_ANGULAR_SPEED: f32 = 0.35; // radians per second
    pub const BALL_RADIUS: f32 = 0.3;
    pub const RESTITUTION: f32 = 0.8;
    pub const FRICTION: f32 = 0.1;

    /// Prism container caps
    pub const FLOOR_Y: f32 = -5.0;
    pub const CEILING_Y: f32 = 5.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
