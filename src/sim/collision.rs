//! Collision detection and response against straight walls
//!
//! A ball is tested against each hexagon edge line in turn. Contacts are
//! resolved sequentially, which is not exact at corners but is stable for
//! visualization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hexagon::{Edge, Hexagon};

/// Surface response coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Fraction of normal speed kept through a bounce, in [0, 1]
    pub restitution: f32,
    /// Fraction of tangential speed removed per contact, in [0, 1]
    pub friction: f32,
}

impl Material {
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.clamp(0.0, 1.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(crate::consts::RESTITUTION, crate::consts::FRICTION)
    }
}

/// A resolved ball/edge contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the edge that was hit
    pub edge: usize,
    /// Edge normal pointing back into the container
    pub normal: Vec2,
    /// How far the ball surface had crossed the edge line
    pub penetration: f32,
    /// Normal speed into the edge before response (0 if the ball was not approaching)
    pub impact_speed: f32,
}

impl Contact {
    /// True when the velocity was reflected, not just the position corrected
    #[inline]
    pub fn bounced(&self) -> bool {
        self.impact_speed > 0.0
    }
}

/// Split `velocity` into (normal, tangential) parts relative to unit `normal`
#[inline]
pub fn decompose(velocity: Vec2, normal: Vec2) -> (Vec2, Vec2) {
    let vn = velocity.dot(normal) * normal;
    (vn, velocity - vn)
}

/// Bounce response: reflect and damp the normal part, drag the tangential part
///
/// `normal_out = -normal_in * restitution`, `tangential_out = tangential_in * (1 - friction)`
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, material: &Material) -> Vec2 {
    let (vn, vt) = decompose(velocity, normal);
    vt * (1.0 - material.friction) - vn * material.restitution
}

/// Test and resolve a single edge, mutating position and velocity
///
/// The ball is pushed out whenever it penetrates the edge line. The velocity
/// only changes when the ball is also moving toward the edge.
pub fn resolve_edge(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    edge: &Edge,
    index: usize,
    material: &Material,
) -> Option<Contact> {
    let distance = edge.signed_distance(*pos);
    if distance >= radius {
        return None;
    }

    let normal = edge.inward_normal;
    let penetration = radius - distance;
    let approach = vel.dot(normal);

    let impact_speed = if approach < 0.0 {
        *vel = bounce_velocity(*vel, normal, material);
        -approach
    } else {
        0.0
    };

    *pos += normal * penetration;

    Some(Contact {
        edge: index,
        normal,
        penetration,
        impact_speed,
    })
}

/// Resolve a ball against every edge of the hexagon in vertex order
pub fn resolve_hexagon(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    hexagon: &Hexagon,
    material: &Material,
) -> Vec<Contact> {
    hexagon
        .edges()
        .iter()
        .enumerate()
        .filter_map(|(i, edge)| resolve_edge(pos, vel, radius, edge, i, material))
        .collect()
}
