//! Smoke carried past a spinning wind turbine
//!
//! A coarse grid holds smoke density and a velocity field. Each step feeds
//! smoke in from the left edge, advects it semi-Lagrangian style, drags
//! tracer particles along, and lets the turbine overwrite the flow at its
//! hub and slow/swirl it in a cone-shaped wake downstream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::driver::Simulation;
use crate::renderer::{Canvas, colors};

/// Turbine hub influence radius (cells)
pub const HUB_RADIUS: f32 = 15.0;
/// Extent of the wake cone downstream of the hub
pub const WAKE_LENGTH: f32 = 50.0;
/// Half-width of the wake cone at the hub
pub const WAKE_WIDTH: f32 = 25.0;
/// Blade speed imposed inside the hub
const BLADE_FLOW: f32 = 4.0;
/// Per-step growth of the smoke source and the wake
const RAMP_RATE: f32 = 0.001;
/// Chance per step of a turbulence burst in the wake
const TURBULENCE_CHANCE: f64 = 0.1;
const TURBULENCE_SIGMA: f32 = 0.2;
/// Density multiplier per advection step
const DISSIPATION: f32 = 0.995;

const BLADE_COUNT: usize = 3;
const BLADE_LENGTH: f32 = 15.0;
const BLADE_WIDTH: f32 = 2.0;
const HUB_DRAW_RADIUS: f32 = 3.0;
/// Cells fainter than this are not drawn
const DRAW_THRESHOLD: f32 = 0.02;

/// Wake field setup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub particle_count: usize,
    /// Free-stream wind speed (cells per second)
    pub wind_speed: f32,
    /// Faster inflow across the left quarter
    pub inlet_speed: f32,
    pub vortex_radius: f32,
    /// Blade rotation in degrees per second
    pub blade_speed: f32,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            seed: 0x5EED,
            particle_count: 1000,
            wind_speed: 2.0,
            inlet_speed: 3.0,
            vortex_radius: 10.0,
            // 5° per 0.1 s frame
            blade_speed: 50.0,
        }
    }
}

/// Grid smoke simulation
#[derive(Debug, Clone)]
pub struct WakeSim {
    pub width: usize,
    pub height: usize,
    /// Row-major fields, `index = y * width + x`
    pub density: Vec<f32>,
    pub vel_x: Vec<f32>,
    pub vel_y: Vec<f32>,
    pub vorticity: Vec<f32>,
    pub particles: Vec<Vec2>,
    /// Left-edge smoke source ramp, 0..=1
    pub smoke_buildup: f32,
    /// Wake development ramp, 0..=1
    pub wake_strength: f32,
    /// Blade angle in degrees
    pub blade_angle: f32,
    pub blade_speed: f32,
    pub elapsed: f32,
    rng: Pcg32,
}

impl WakeSim {
    pub fn new(config: &WakeConfig) -> Self {
        let (w, h) = (config.width, config.height);
        let cells = w * h;
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let quarter = w / 4;
        let spawn_x = quarter.max(1) as f32;
        let particles = (0..config.particle_count)
            .map(|_| {
                Vec2::new(
                    rng.random_range(0.0..spawn_x),
                    rng.random_range(0.0..h.max(1) as f32),
                )
            })
            .collect();

        let mut sim = Self {
            width: w,
            height: h,
            density: vec![0.0; cells],
            vel_x: vec![config.wind_speed; cells],
            vel_y: vec![0.0; cells],
            vorticity: vec![0.0; cells],
            particles,
            smoke_buildup: 0.0,
            wake_strength: 0.0,
            blade_angle: 0.0,
            blade_speed: config.blade_speed,
            elapsed: 0.0,
            rng,
        };

        for y in 0..h {
            for x in 0..w.min(5) {
                sim.density[y * w + x] = 0.2;
            }
            for x in 0..quarter {
                sim.vel_x[y * w + x] = config.inlet_speed;
            }
        }
        sim.add_vortex(Vec2::new(quarter as f32, (h / 2) as f32), config.vortex_radius);
        sim.compute_vorticity();
        sim
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn density_at(&self, x: usize, y: usize) -> f32 {
        self.density[self.index(x, y)]
    }

    pub fn velocity_at(&self, x: usize, y: usize) -> Vec2 {
        let i = self.index(x, y);
        Vec2::new(self.vel_x[i], self.vel_y[i])
    }

    pub fn vorticity_at(&self, x: usize, y: usize) -> f32 {
        self.vorticity[self.index(x, y)]
    }

    /// Grid cell containing `p`, clamped to the domain
    fn cell_of(&self, p: Vec2) -> (usize, usize) {
        let x = (p.x as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = (p.y as i64).clamp(0, self.height as i64 - 1) as usize;
        (x, y)
    }

    /// Grid center where the turbine hub sits
    pub fn hub(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    /// Add a counter-clockwise swirl of the given radius
    pub fn add_vortex(&mut self, center: Vec2, radius: f32) {
        let scale = 2.0 / (radius + 1e-6);
        for y in 0..self.height {
            for x in 0..self.width {
                let d = Vec2::new(x as f32, y as f32) - center;
                if d.length() <= radius {
                    let i = self.index(x, y);
                    self.vel_x[i] += -d.y * scale;
                    self.vel_y[i] += d.x * scale;
                }
            }
        }
    }

    /// Curl of the velocity field with periodic central differences
    pub fn compute_vorticity(&mut self) {
        let (w, h) = (self.width, self.height);
        for y in 0..h {
            let up = (y + 1) % h;
            let down = (y + h - 1) % h;
            for x in 0..w {
                let right = (x + 1) % w;
                let left = (x + w - 1) % w;
                let dvy = self.vel_y[y * w + right] - self.vel_y[y * w + left];
                let dvx = self.vel_x[up * w + x] - self.vel_x[down * w + x];
                self.vorticity[y * w + x] = dvy - dvx;
            }
        }
    }

    fn fill_columns(&mut self, columns: usize, value: f32) {
        for y in 0..self.height {
            for x in 0..self.width.min(columns) {
                let i = self.index(x, y);
                self.density[i] = value;
            }
        }
    }

    fn advect_density(&mut self, dt: f32) {
        let (w, h) = (self.width, self.height);
        let mut next = vec![0.0; self.density.len()];
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let back = Vec2::new(
                    (x as f32 - self.vel_x[i] * dt).clamp(0.0, (w - 1) as f32),
                    (y as f32 - self.vel_y[i] * dt).clamp(0.0, (h - 1) as f32),
                );
                let (sx, sy) = (back.x as usize, back.y as usize);
                next[i] = self.density[sy * w + sx] * DISSIPATION;
            }
        }
        self.density = next;
    }

    fn move_particles(&mut self, dt: f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        for i in 0..self.particles.len() {
            let (cx, cy) = self.cell_of(self.particles[i]);
            let vel = self.velocity_at(cx, cy);
            let mut p = self.particles[i] + vel * dt;
            if p.x > w || p.x < 0.0 || p.y > h || p.y < 0.0 {
                p = Vec2::new(0.0, self.rng.random_range(0.0..h.max(1.0)));
            }
            self.particles[i] = p;
        }
    }

    fn apply_turbine(&mut self) {
        let (w, h) = (self.width, self.height);
        let hub = self.hub();
        let angle = self.blade_angle.to_radians();
        let blade = Vec2::new(-angle.sin(), angle.cos()) * BLADE_FLOW;

        self.wake_strength = (self.wake_strength + RAMP_RATE).min(1.0);
        let strength = self.wake_strength;
        let turbulent = self.rng.random_bool(TURBULENCE_CHANCE);

        let mut next_x = self.vel_x.clone();
        let mut next_y = self.vel_y.clone();

        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let rel = Vec2::new(x as f32, y as f32) - hub;
                let r = rel.length();

                if r <= HUB_RADIUS {
                    next_x[i] = blade.x;
                    next_y[i] = blade.y;
                    continue;
                }

                let cone = WAKE_WIDTH * (rel.x / WAKE_LENGTH + 1.0);
                if !(rel.x > 0.0 && rel.y.abs() < cone && rel.x < WAKE_LENGTH) {
                    continue;
                }

                let falloff = (-rel.x / WAKE_LENGTH).exp();
                next_x[i] *= 1.0 - 0.5 * falloff * strength;

                let across = rel.y / (cone + 1e-6);
                let swirl = (-across * across).exp() * (rel.x / 10.0).sin();
                next_y[i] += swirl * 0.5 * falloff * strength;

                if turbulent {
                    let kick = gaussian(&mut self.rng, TURBULENCE_SIGMA) * falloff * strength;
                    next_x[i] += kick;
                    next_y[i] += kick;
                }
            }
        }

        self.vel_x = next_x;
        self.vel_y = next_y;
    }

    /// Advance the field by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let t = self.elapsed;

        self.smoke_buildup = (self.smoke_buildup + RAMP_RATE).min(1.0);
        self.fill_columns(5, self.smoke_buildup * (0.8 + 0.2 * t.sin()));

        for d in &mut self.density {
            *d = (*d + self.rng.random_range(-0.01..0.01)).clamp(0.0, 1.0);
        }

        self.advect_density(dt * 0.5);
        self.move_particles(dt);

        // Continuous inlet, deliberately allowed above 1
        self.fill_columns(2, 1.0 + 0.3 * t.sin());

        self.apply_turbine();
        self.compute_vorticity();

        self.blade_angle = (self.blade_angle + self.blade_speed * dt).rem_euclid(360.0);
        self.elapsed += dt;
    }

    /// Corners of each blade rectangle in grid space
    pub fn blades(&self) -> [[Vec2; 4]; BLADE_COUNT] {
        let hub = self.hub();
        let half = BLADE_WIDTH / 2.0;
        let local = [
            Vec2::new(-half, 0.0),
            Vec2::new(half, 0.0),
            Vec2::new(half, BLADE_LENGTH),
            Vec2::new(-half, BLADE_LENGTH),
        ];
        std::array::from_fn(|i| {
            let angle = (self.blade_angle + i as f32 * 360.0 / BLADE_COUNT as f32).to_radians();
            let rot = Vec2::from_angle(angle);
            local.map(|p| hub + rot.rotate(p))
        })
    }
}

/// Normally distributed sample (Box-Muller)
fn gaussian(rng: &mut Pcg32, sigma: f32) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    sigma * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

impl Simulation for WakeSim {
    fn step(&mut self, dt: f32) {
        self.advance(dt);
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        for y in 0..self.height {
            for x in 0..self.width {
                let d = self.density_at(x, y);
                if d < DRAW_THRESHOLD {
                    continue;
                }
                let (x0, y0) = (x as f32, y as f32);
                let cell = [
                    Vec2::new(x0, y0),
                    Vec2::new(x0 + 1.0, y0),
                    Vec2::new(x0 + 1.0, y0 + 1.0),
                    Vec2::new(x0, y0 + 1.0),
                ];
                canvas.draw_polygon(&cell, colors::smoke(d));
            }
        }

        for p in &self.particles {
            canvas.draw_point(*p, 1.0, colors::PARTICLE);
        }

        for blade in self.blades() {
            canvas.draw_polygon(&blade, colors::BLADE);
        }
        canvas.draw_circle(self.hub(), HUB_DRAW_RADIUS, colors::HUB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingCanvas;

    fn small() -> WakeConfig {
        WakeConfig {
            width: 80,
            height: 40,
            particle_count: 200,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_conditions() {
        let sim = WakeSim::new(&small());
        assert_eq!(sim.density.len(), 80 * 40);
        assert_eq!(sim.density_at(0, 0), 0.2);
        assert_eq!(sim.density_at(10, 0), 0.0);
        assert_eq!(sim.velocity_at(5, 0).x, 3.0);
        assert_eq!(sim.velocity_at(70, 0).x, 2.0);
        for p in &sim.particles {
            assert!(p.x >= 0.0 && p.x < 20.0);
        }
    }

    #[test]
    fn test_vortex_spins_counter_clockwise() {
        let sim = WakeSim::new(&small());
        // Vortex sits at (w/4, h/2)
        assert!(sim.vorticity_at(20, 20) > 0.0);
    }

    #[test]
    fn test_uniform_flow_has_no_vorticity() {
        let mut sim = WakeSim::new(&small());
        sim.vel_x.fill(2.0);
        sim.vel_y.fill(0.0);
        sim.compute_vorticity();
        assert!(sim.vorticity.iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = WakeSim::new(&small());
        let mut b = WakeSim::new(&small());
        for _ in 0..15 {
            a.advance(0.1);
            b.advance(0.1);
        }
        assert_eq!(a.density, b.density);
        assert_eq!(a.vel_x, b.vel_x);
        assert_eq!(a.particles, b.particles);
    }

    #[test]
    fn test_fields_stay_bounded() {
        let mut sim = WakeSim::new(&small());
        for _ in 0..30 {
            sim.advance(0.1);
            assert!(sim.density.iter().all(|d| (0.0..=1.3 + 1e-5).contains(d)));
            assert!(sim.particles.iter().all(|p| {
                p.x >= 0.0 && p.x <= 80.0 && p.y >= 0.0 && p.y <= 40.0
            }));
        }
    }

    #[test]
    fn test_hub_takes_blade_velocity() {
        let mut sim = WakeSim::new(&small());
        sim.advance(0.1);
        // Blade angle was 0° during the step, so flow points straight up
        let v = sim.velocity_at(40, 20);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - BLADE_FLOW).abs() < 1e-6);
        assert!((sim.blade_angle - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ramps_grow_per_step() {
        let mut sim = WakeSim::new(&small());
        for _ in 0..10 {
            sim.advance(0.1);
        }
        assert!((sim.smoke_buildup - 0.01).abs() < 1e-5);
        assert!((sim.wake_strength - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_render() {
        let sim = WakeSim::new(&small());
        let mut canvas = RecordingCanvas::default();
        sim.render(&mut canvas);

        assert_eq!(canvas.points.len(), 200);
        assert_eq!(canvas.circles.len(), 1);
        // Seeded smoke columns plus three blades
        assert_eq!(canvas.polygons.len(), 5 * 40 + BLADE_COUNT);
    }
}
