//! Ball in a spinning hexagonal prism
//!
//! 3D variant of the hexagon bounce: gravity runs along the prism axis (Y),
//! the six walls stand in the XZ plane, and a floor and ceiling cap the
//! prism. Wall contacts reuse the planar edge resolution on the (x, z)
//! projection of the ball.

use glam::{Vec2, Vec3, Vec3Swizzles};
use serde::{Deserialize, Serialize};

use super::collision::{Contact, Material, resolve_hexagon};
use super::driver::Simulation;
use super::hexagon::{Hexagon, SIDES};
use crate::consts::*;
use crate::renderer::{Canvas, Projection, colors};

const EDGE_WIDTH: f32 = 0.004;

/// Physical constants and initial conditions for the prism
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub gravity: Vec3,
    pub restitution: f32,
    pub friction: f32,
    pub hex_circumradius: f32,
    /// Initial rotation (radians)
    pub hex_rotation: f32,
    pub hex_angular_speed: f32,
    pub floor_y: f32,
    pub ceiling_y: f32,
    pub ball_radius: f32,
    pub ball_position: Vec3,
    pub ball_velocity: Vec3,
    pub projection: Projection,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -GRAVITY, 0.0),
            restitution: RESTITUTION,
            friction: FRICTION,
            hex_circumradius: HEX_CIRCUMRADIUS,
            hex_rotation: 50.0,
            hex_angular_speed: HEX_ANGULAR_SPEED,
            floor_y: FLOOR_Y,
            ceiling_y: CEILING_Y,
            ball_radius: BALL_RADIUS,
            ball_position: Vec3::ZERO,
            ball_velocity: Vec3::new(2.0, 5.0, 1.0),
            projection: Projection::default(),
        }
    }
}

/// Which cap the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Floor,
    Ceiling,
}

/// What happened during one prism step
#[derive(Debug, Clone, Default)]
pub struct PrismReport {
    pub cap: Option<Cap>,
    pub walls: Vec<Contact>,
}

/// Plain data handed to a renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrismSnapshot {
    pub ball_center: Vec3,
    pub ball_radius: f32,
    pub floor: [Vec3; SIDES],
    pub ceiling: [Vec3; SIDES],
}

/// Ball + prism simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismSim {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Cross-section in the XZ plane (x maps to x, y maps to z)
    pub hexagon: Hexagon,
    pub floor_y: f32,
    pub ceiling_y: f32,
    pub gravity: Vec3,
    pub material: Material,
    pub projection: Projection,
}

impl PrismSim {
    pub fn new(config: &PrismConfig) -> Self {
        Self {
            pos: config.ball_position,
            vel: config.ball_velocity,
            radius: config.ball_radius,
            hexagon: Hexagon::new(
                Vec2::ZERO,
                config.hex_circumradius,
                config.hex_rotation,
                config.hex_angular_speed,
            ),
            floor_y: config.floor_y,
            ceiling_y: config.ceiling_y,
            gravity: config.gravity,
            material: Material::new(config.restitution, config.friction),
            projection: config.projection,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> PrismReport {
        self.hexagon.rotate(dt);
        self.vel += self.gravity * dt;
        self.pos += self.vel * dt;

        let cap = self.resolve_caps();

        let mut horizontal = self.pos.xz();
        let mut horizontal_vel = self.vel.xz();
        let walls = resolve_hexagon(
            &mut horizontal,
            &mut horizontal_vel,
            self.radius,
            &self.hexagon,
            &self.material,
        );
        self.pos.x = horizontal.x;
        self.pos.z = horizontal.y;
        self.vel.x = horizontal_vel.x;
        self.vel.z = horizontal_vel.y;

        PrismReport { cap, walls }
    }

    fn resolve_caps(&mut self) -> Option<Cap> {
        if self.pos.y - self.radius < self.floor_y {
            self.pos.y = self.floor_y + self.radius;
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y * self.material.restitution;
                // Floor drag on the sliding components
                self.vel.x *= 1.0 - self.material.friction;
                self.vel.z *= 1.0 - self.material.friction;
            }
            return Some(Cap::Floor);
        }
        if self.pos.y + self.radius > self.ceiling_y {
            self.pos.y = self.ceiling_y - self.radius;
            if self.vel.y > 0.0 {
                self.vel.y = -self.vel.y * self.material.restitution;
            }
            return Some(Cap::Ceiling);
        }
        None
    }

    pub fn snapshot(&self) -> PrismSnapshot {
        let ring = self.hexagon.vertices();
        PrismSnapshot {
            ball_center: self.pos,
            ball_radius: self.radius,
            floor: ring.map(|v| Vec3::new(v.x, self.floor_y, v.y)),
            ceiling: ring.map(|v| Vec3::new(v.x, self.ceiling_y, v.y)),
        }
    }
}

impl Simulation for PrismSim {
    fn step(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let frame = self.snapshot();
        let project = |ring: &[Vec3; SIDES]| -> Option<Vec<Vec2>> {
            ring.iter().map(|p| self.projection.project(*p)).collect()
        };

        if let (Some(floor), Some(ceiling)) = (project(&frame.floor), project(&frame.ceiling)) {
            canvas.draw_polyline(&floor, true, EDGE_WIDTH, colors::CONTAINER);
            canvas.draw_polyline(&ceiling, true, EDGE_WIDTH, colors::CONTAINER);
            for (bottom, top) in floor.iter().zip(&ceiling) {
                canvas.draw_line(*bottom, *top, EDGE_WIDTH, colors::CONTAINER);
            }
        }

        if let Some((center, radius)) = self
            .projection
            .project_sphere(frame.ball_center, frame.ball_radius)
        {
            canvas.draw_circle(center, radius, colors::BALL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;

    #[test]
    fn test_floor_bounce() {
        let mut sim = PrismSim::new(&PrismConfig {
            gravity: Vec3::ZERO,
            hex_angular_speed: 0.0,
            ball_position: Vec3::new(0.0, FLOOR_Y + BALL_RADIUS + 0.01, 0.0),
            ball_velocity: Vec3::new(1.0, -2.0, 0.5),
            ..Default::default()
        });

        let report = sim.advance(0.01);
        assert_eq!(report.cap, Some(Cap::Floor));
        assert!((sim.vel.y - 2.0 * RESTITUTION).abs() < 1e-5);
        assert!((sim.vel.x - 1.0 * (1.0 - FRICTION)).abs() < 1e-5);
        assert!((sim.vel.z - 0.5 * (1.0 - FRICTION)).abs() < 1e-5);
        assert!((sim.pos.y - (FLOOR_Y + BALL_RADIUS)).abs() < 1e-5);
    }

    #[test]
    fn test_ceiling_bounce_keeps_horizontal_speed() {
        let mut sim = PrismSim::new(&PrismConfig {
            gravity: Vec3::ZERO,
            ball_position: Vec3::new(0.0, CEILING_Y - BALL_RADIUS - 0.01, 0.0),
            ball_velocity: Vec3::new(1.0, 3.0, 0.0),
            ..Default::default()
        });

        let report = sim.advance(0.01);
        assert_eq!(report.cap, Some(Cap::Ceiling));
        assert!((sim.vel.y + 3.0 * RESTITUTION).abs() < 1e-5);
        assert!((sim.vel.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_stays_inside() {
        let mut sim = PrismSim::new(&PrismConfig::default());
        for _ in 0..5000 {
            sim.advance(SIM_DT);
            assert!(sim.pos.y - sim.radius >= sim.floor_y - 1e-4);
            assert!(sim.pos.y + sim.radius <= sim.ceiling_y + 1e-4);
            for edge in sim.hexagon.edges() {
                assert!(edge.signed_distance(sim.pos.xz()) >= sim.radius - 1e-4);
            }
        }
    }

    #[test]
    fn test_wall_bounce_uses_xz_plane() {
        let mut sim = PrismSim::new(&PrismConfig {
            gravity: Vec3::ZERO,
            hex_rotation: 0.0,
            hex_angular_speed: 0.0,
            restitution: 1.0,
            friction: 0.0,
            ball_position: Vec3::new(0.0, 0.0, -3.95),
            ball_velocity: Vec3::new(0.0, 0.7, -5.0),
            ..Default::default()
        });

        let report = sim.advance(0.02);
        assert_eq!(report.walls.len(), 1);
        assert!((sim.vel.z - 5.0).abs() < 1e-4);
        assert!((sim.vel.y - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_render_projects_prism() {
        let sim = PrismSim::new(&PrismConfig::default());
        let mut canvas = RecordingCanvas::default();
        sim.render(&mut canvas);

        // Two rings plus the vertical edges
        assert_eq!(canvas.lines.len(), SIDES * 3);
        assert_eq!(canvas.circles.len(), 1);
        assert!(canvas.circles[0].1 > 0.0);
    }
}
