//! Rotating regular hexagon container geometry
//!
//! The hexagon stores only its center, circumradius and current rotation.
//! Vertices and edges are derived on demand so they always form a regular
//! hexagon around the fixed center.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

use crate::{polar_to_cartesian, wrap_angle};

/// Number of sides
pub const SIDES: usize = 6;

/// A straight wall of the container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec2,
    pub end: Vec2,
    /// Unit normal pointing toward the hexagon center
    pub inward_normal: Vec2,
}

impl Edge {
    /// Build an edge and orient its normal toward `center`
    pub fn new(start: Vec2, end: Vec2, center: Vec2) -> Self {
        let dir = (end - start).normalize_or_zero();
        let mut normal = dir.perp();
        let midpoint = (start + end) * 0.5;
        if normal.dot(center - midpoint) < 0.0 {
            normal = -normal;
        }
        Self {
            start,
            end,
            inward_normal: normal,
        }
    }

    /// Signed distance from `point` to the edge line (positive on the inside)
    #[inline]
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        (point - self.start).dot(self.inward_normal)
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// A regular hexagon spinning about its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hexagon {
    pub center: Vec2,
    /// Distance from center to each vertex
    pub circumradius: f32,
    /// Current rotation (radians, wrapped to [0, 2π))
    pub rotation: f32,
    /// Spin rate in radians per second
    pub angular_velocity: f32,
}

impl Hexagon {
    pub fn new(center: Vec2, circumradius: f32, rotation: f32, angular_velocity: f32) -> Self {
        Self {
            center,
            circumradius,
            rotation: wrap_angle(rotation),
            angular_velocity,
        }
    }

    /// Distance from center to each edge midpoint
    #[inline]
    pub fn inradius(&self) -> f32 {
        self.circumradius * FRAC_PI_6.cos()
    }

    /// Advance rotation by `angular_velocity * dt`
    pub fn rotate(&mut self, dt: f32) {
        self.rotation = wrap_angle(self.rotation + self.angular_velocity * dt);
    }

    /// Vertex positions at the current rotation, counter-clockwise
    pub fn vertices(&self) -> [Vec2; SIDES] {
        Self::vertices_at(self.center, self.circumradius, self.rotation)
    }

    /// Vertex positions for an arbitrary rotation
    pub fn vertices_at(center: Vec2, circumradius: f32, rotation: f32) -> [Vec2; SIDES] {
        std::array::from_fn(|i| center + polar_to_cartesian(circumradius, rotation + i as f32 * FRAC_PI_3))
    }

    /// The six walls; edge `i` runs from vertex `i` to vertex `i + 1`
    pub fn edges(&self) -> [Edge; SIDES] {
        let v = self.vertices();
        std::array::from_fn(|i| Edge::new(v[i], v[(i + 1) % SIDES], self.center))
    }

    /// Whether a circle lies fully inside (touching counts as inside)
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        self.edges()
            .iter()
            .all(|e| e.signed_distance(center) >= radius)
    }
}
