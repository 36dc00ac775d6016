//! Rendering boundary
//!
//! Simulations draw through the [`Canvas`] trait and never touch a graphics
//! API. [`MeshCanvas`] tessellates draw calls into a vertex list ready for
//! upload; [`RecordingCanvas`] keeps the raw calls for headless inspection.

pub mod projection;
pub mod shapes;
pub mod vertex;

pub use projection::Projection;
pub use vertex::{Color, Vertex, colors};

use glam::Vec2;

/// Minimal immediate-mode drawing collaborator
pub trait Canvas {
    /// Filled circle
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Filled convex polygon
    fn draw_polygon(&mut self, points: &[Vec2], color: Color);
    /// Single point drawn as a square of side `size`
    fn draw_point(&mut self, pos: Vec2, size: f32, color: Color);

    /// Thick line segment
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let perp = (to - from).normalize_or_zero().perp() * (width / 2.0);
        self.draw_polygon(&[from + perp, from - perp, to - perp, to + perp], color);
    }

    /// Connected segments, optionally closing back to the first point
    fn draw_polyline(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], width, color);
        }
        if closed && points.len() > 2 {
            self.draw_line(points[points.len() - 1], points[0], width, color);
        }
    }

    /// Hollow circle of the given stroke width
    fn draw_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        const SEGMENTS: usize = 48;
        let points: Vec<Vec2> = (0..SEGMENTS)
            .map(|i| center + Vec2::from_angle(i as f32 * std::f32::consts::TAU / SEGMENTS as f32) * radius)
            .collect();
        self.draw_polyline(&points, true, width, color);
    }
}

/// Canvas that tessellates everything into a triangle list
#[derive(Debug, Clone)]
pub struct MeshCanvas {
    vertices: Vec<Vertex>,
    /// Triangle count used for circles
    pub circle_segments: u32,
}

impl Default for MeshCanvas {
    fn default() -> Self {
        Self::new(32)
    }
}

impl MeshCanvas {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments: circle_segments.max(3),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex data as raw bytes for a GPU buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Canvas for MeshCanvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, self.circle_segments));
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        self.vertices.extend(shapes::polygon(points, color));
    }

    fn draw_point(&mut self, pos: Vec2, size: f32, color: Color) {
        self.vertices.extend(shapes::point(pos, size, color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let half = width / 2.0;
        self.vertices.extend(shapes::ring(
            center,
            radius - half,
            radius + half,
            color,
            self.circle_segments,
        ));
    }
}

/// Canvas that records draw calls verbatim
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub circles: Vec<(Vec2, f32, Color)>,
    pub polygons: Vec<(Vec<Vec2>, Color)>,
    pub points: Vec<(Vec2, f32, Color)>,
    pub lines: Vec<(Vec2, Vec2, f32, Color)>,
    pub rings: Vec<(Vec2, f32, f32, Color)>,
}

impl RecordingCanvas {
    /// Total number of draw calls recorded
    pub fn len(&self) -> usize {
        self.circles.len() + self.polygons.len() + self.points.len() + self.lines.len() + self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Canvas for RecordingCanvas {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circles.push((center, radius, color));
    }

    fn draw_polygon(&mut self, points: &[Vec2], color: Color) {
        self.polygons.push((points.to_vec(), color));
    }

    fn draw_point(&mut self, pos: Vec2, size: f32, color: Color) {
        self.points.push((pos, size, color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.lines.push((from, to, width, color));
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.rings.push((center, radius, width, color));
    }
}
