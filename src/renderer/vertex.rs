//! Vertex and color types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const CONTAINER: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: Color = [1.0, 0.0, 0.0, 1.0];
    pub const SUN: Color = [1.0, 1.0, 0.0, 1.0];
    pub const EARTH: Color = [0.0, 0.0, 1.0, 1.0];
    pub const MARS: Color = [1.0, 0.0, 0.0, 1.0];
    pub const ORBIT_PATH: Color = [0.3, 0.3, 0.4, 0.5];
    pub const PARTICLE: Color = [1.0, 1.0, 1.0, 0.1];
    pub const BLADE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const HUB: Color = [0.5, 0.5, 0.5, 1.0];
    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];

    /// Smoke ramp: black -> dark blue -> royal blue -> light blue -> white
    pub fn smoke(density: f32) -> Color {
        const STOPS: [[f32; 3]; 5] = [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.545],
            [0.255, 0.412, 0.882],
            [0.678, 0.847, 0.902],
            [1.0, 1.0, 1.0],
        ];

        let t = density.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
        let i = (t as usize).min(STOPS.len() - 2);
        let u = t - i as f32;
        let (a, b) = (STOPS[i], STOPS[i + 1]);

        [
            a[0] + (b[0] - a[0]) * u,
            a[1] + (b[1] - a[1]) * u,
            a[2] + (b[2] - a[2]) * u,
            1.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        let v = [Vertex::new(1.0, 2.0, colors::BALL)];
        let bytes: &[u8] = bytemuck::cast_slice(&v);
        assert_eq!(bytes.len(), Vertex::STRIDE);
    }

    #[test]
    fn test_smoke_ramp_ends() {
        assert_eq!(colors::smoke(0.0), [0.0, 0.0, 0.0, 1.0]);
        let white = colors::smoke(1.0);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
        // Saturates above 1
        assert_eq!(colors::smoke(1.3), white);
        let mid = colors::smoke(0.5);
        assert!((mid[2] - 0.882).abs() < 1e-4);
    }
}
