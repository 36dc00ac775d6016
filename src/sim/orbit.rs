//! Sun with planets on fixed circular orbits
//!
//! Positions are a closed-form function of elapsed time, so the animator
//! is fully restartable and never drifts.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::driver::Simulation;
use crate::polar_to_cartesian;
use crate::renderer::{Canvas, Color, colors};

/// Static description of one planet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetConfig {
    pub name: String,
    pub orbit_radius: f32,
    /// Radians per second
    pub angular_speed: f32,
    /// Drawn body radius
    pub body_radius: f32,
    pub color: Color,
}

/// Orbit animation setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub sun_radius: f32,
    pub sun_color: Color,
    /// Draw each orbit path as a faint circle
    pub show_paths: bool,
    pub planets: Vec<PlanetConfig>,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        // 1° and 0.8° per 50 ms update
        Self {
            sun_radius: 20.0,
            sun_color: colors::SUN,
            show_paths: false,
            planets: vec![
                PlanetConfig {
                    name: "Earth".into(),
                    orbit_radius: 100.0,
                    angular_speed: 20f32.to_radians(),
                    body_radius: 5.0,
                    color: colors::EARTH,
                },
                PlanetConfig {
                    name: "Mars".into(),
                    orbit_radius: 150.0,
                    angular_speed: 16f32.to_radians(),
                    body_radius: 7.0,
                    color: colors::MARS,
                },
            ],
        }
    }
}

/// A planet and its current angle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub orbit_radius: f32,
    pub angular_speed: f32,
    /// Current angle (radians, wrapped to [0, 2π))
    pub angle: f32,
    pub body_radius: f32,
    pub color: Color,
}

impl Planet {
    pub fn new(config: &PlanetConfig) -> Self {
        Self {
            name: config.name.clone(),
            orbit_radius: config.orbit_radius,
            angular_speed: config.angular_speed,
            angle: 0.0,
            body_radius: config.body_radius,
            color: config.color,
        }
    }

    /// Current position relative to the sun
    pub fn position(&self) -> Vec2 {
        polar_to_cartesian(self.orbit_radius, self.angle)
    }

    /// Angle after `t` seconds, computed in f64 so long runs stay exact
    pub fn angle_at(&self, t: f64) -> f32 {
        (f64::from(self.angular_speed) * t).rem_euclid(TAU) as f32
    }

    /// Position after `t` seconds: `(r cos ωt, r sin ωt)`
    pub fn position_at(&self, t: f64) -> Vec2 {
        polar_to_cartesian(self.orbit_radius, self.angle_at(t))
    }
}

/// Sun fixed at the origin with planets around it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitSim {
    pub sun_radius: f32,
    pub sun_color: Color,
    pub show_paths: bool,
    pub planets: Vec<Planet>,
    /// Simulated seconds since start
    pub elapsed: f64,
}

impl OrbitSim {
    pub fn new(config: &OrbitConfig) -> Self {
        Self {
            sun_radius: config.sun_radius,
            sun_color: config.sun_color,
            show_paths: config.show_paths,
            planets: config.planets.iter().map(Planet::new).collect(),
            elapsed: 0.0,
        }
    }

    /// Restart the animation at t = 0
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        for planet in &mut self.planets {
            planet.angle = 0.0;
        }
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    /// Sun plus every planet position, in planet order
    pub fn positions(&self) -> Vec<Vec2> {
        std::iter::once(Vec2::ZERO)
            .chain(self.planets.iter().map(Planet::position))
            .collect()
    }
}

impl Simulation for OrbitSim {
    fn step(&mut self, dt: f32) {
        self.elapsed += f64::from(dt);
        let t = self.elapsed;
        for planet in &mut self.planets {
            planet.angle = planet.angle_at(t);
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        if self.show_paths {
            for planet in &self.planets {
                canvas.draw_ring(Vec2::ZERO, planet.orbit_radius, 1.0, colors::ORBIT_PATH);
            }
        }
        canvas.draw_circle(Vec2::ZERO, self.sun_radius, self.sun_color);
        for planet in &self.planets {
            canvas.draw_circle(planet.position(), planet.body_radius, planet.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;

    #[test]
    fn test_start_position() {
        let sim = OrbitSim::new(&OrbitConfig::default());
        let earth = sim.planet("Earth").unwrap();
        assert_eq!(earth.position(), Vec2::new(100.0, 0.0));
        assert_eq!(earth.position_at(0.0), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_matches_closed_form_after_many_steps() {
        let mut sim = OrbitSim::new(&OrbitConfig::default());
        let dt = 0.05;
        for _ in 0..10_000 {
            sim.step(dt);
        }
        let t = sim.elapsed;
        for planet in &sim.planets {
            let w = f64::from(planet.angular_speed);
            let r = f64::from(planet.orbit_radius);
            let expected = Vec2::new((r * (w * t).cos()) as f32, (r * (w * t).sin()) as f32);
            assert!(
                (planet.position() - expected).length() < 1e-2,
                "{} at {:?}, expected {:?}",
                planet.name,
                planet.position(),
                expected
            );
        }
    }

    #[test]
    fn test_quarter_orbit() {
        let mut sim = OrbitSim::new(&OrbitConfig::default());
        // Earth moves 20°/s, so 4.5 s is a quarter turn
        for _ in 0..90 {
            sim.step(0.05);
        }
        let earth = sim.planet("Earth").unwrap().position();
        assert!(earth.x.abs() < 1e-2);
        assert!((earth.y - 100.0).abs() < 1e-2);
    }

    #[test]
    fn test_reset_restarts() {
        let mut sim = OrbitSim::new(&OrbitConfig::default());
        sim.step(3.0);
        sim.reset();
        assert_eq!(sim.elapsed, 0.0);
        assert_eq!(sim.positions()[1], Vec2::new(100.0, 0.0));
        assert_eq!(sim.positions()[2], Vec2::new(150.0, 0.0));
    }

    #[test]
    fn test_render_draws_sun_and_planets() {
        let sim = OrbitSim::new(&OrbitConfig {
            show_paths: true,
            ..Default::default()
        });
        let mut canvas = RecordingCanvas::default();
        sim.render(&mut canvas);

        assert_eq!(canvas.circles.len(), 3);
        assert_eq!(canvas.circles[0].0, Vec2::ZERO);
        assert_eq!(canvas.circles[0].1, 20.0);
        assert_eq!(canvas.rings.len(), 2);
    }
}
