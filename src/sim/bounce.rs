//! Ball bouncing inside a spinning hexagon
//!
//! Each step spins the container, integrates the ball under gravity
//! (semi-implicit Euler), then resolves contacts against the six walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contact, Material, resolve_hexagon};
use super::driver::Simulation;
use super::hexagon::{Hexagon, SIDES};
use crate::consts::*;
use crate::renderer::{Canvas, colors};

/// Outline width of the container walls in world units
const WALL_WIDTH: f32 = 0.06;

/// Physical constants and initial conditions for the planar bounce
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    pub gravity: Vec2,
    pub restitution: f32,
    pub friction: f32,
    pub hex_center: Vec2,
    pub hex_circumradius: f32,
    /// Initial rotation (radians)
    pub hex_rotation: f32,
    /// Spin rate (radians per second)
    pub hex_angular_speed: f32,
    /// Must be smaller than the hexagon inradius
    pub ball_radius: f32,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -GRAVITY),
            restitution: RESTITUTION,
            friction: FRICTION,
            hex_center: Vec2::ZERO,
            hex_circumradius: HEX_CIRCUMRADIUS,
            hex_rotation: 0.0,
            hex_angular_speed: HEX_ANGULAR_SPEED,
            ball_radius: BALL_RADIUS,
            ball_position: Vec2::ZERO,
            ball_velocity: Vec2::new(2.0, 5.0),
        }
    }
}

/// The bouncing ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        self.vel += gravity * dt;
        self.pos += self.vel * dt;
    }
}

/// What happened during one step
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub contacts: Vec<Contact>,
}

impl StepReport {
    /// Contacts that reflected the velocity
    pub fn bounces(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.bounced())
    }

    pub fn collided(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// Plain data handed to a renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceSnapshot {
    pub ball_center: Vec2,
    pub ball_radius: f32,
    pub vertices: [Vec2; SIDES],
}

/// Ball + hexagon simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BounceSim {
    pub ball: Ball,
    pub hexagon: Hexagon,
    pub gravity: Vec2,
    pub material: Material,
    /// Simulated seconds since start
    pub elapsed: f32,
    /// Total bounces since start
    pub bounces: u64,
}

impl BounceSim {
    pub fn new(config: &BounceConfig) -> Self {
        Self {
            ball: Ball::new(config.ball_position, config.ball_velocity, config.ball_radius),
            hexagon: Hexagon::new(
                config.hex_center,
                config.hex_circumradius,
                config.hex_rotation,
                config.hex_angular_speed,
            ),
            gravity: config.gravity,
            material: Material::new(config.restitution, config.friction),
            elapsed: 0.0,
            bounces: 0,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> StepReport {
        self.hexagon.rotate(dt);
        self.ball.integrate(self.gravity, dt);

        let contacts = resolve_hexagon(
            &mut self.ball.pos,
            &mut self.ball.vel,
            self.ball.radius,
            &self.hexagon,
            &self.material,
        );

        let report = StepReport { contacts };
        for contact in report.bounces() {
            self.bounces += 1;
            log::trace!(
                "bounce on edge {} at {:?}, impact speed {:.3}",
                contact.edge,
                self.ball.pos,
                contact.impact_speed
            );
        }
        self.elapsed += dt;
        report
    }

    pub fn snapshot(&self) -> BounceSnapshot {
        BounceSnapshot {
            ball_center: self.ball.pos,
            ball_radius: self.ball.radius,
            vertices: self.hexagon.vertices(),
        }
    }
}

impl Simulation for BounceSim {
    fn step(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let frame = self.snapshot();
        canvas.draw_polyline(&frame.vertices, true, WALL_WIDTH, colors::CONTAINER);
        canvas.draw_circle(frame.ball_center, frame.ball_radius, colors::BALL);
    }
}
