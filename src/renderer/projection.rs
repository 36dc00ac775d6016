//! Perspective projection for drawing 3D scenes on a 2D canvas

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Fixed perspective camera on the +Z axis looking at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view (radians)
    pub fov_y: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the camera to the origin
    pub eye_distance: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 100.0,
            eye_distance: 20.0,
        }
    }
}

impl Projection {
    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(self.fov_y, self.aspect.max(1e-6), self.near, self.far);
        projection * Mat4::from_translation(Vec3::new(0.0, 0.0, -self.eye_distance))
    }

    /// Map a world point to normalized device coordinates
    ///
    /// Returns `None` for points at or behind the near plane.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= self.near {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Projected center and apparent radius of a sphere
    pub fn project_sphere(&self, center: Vec3, radius: f32) -> Option<(Vec2, f32)> {
        let c = self.project(center)?;
        let edge = self.project(center + Vec3::X * radius)?;
        Some((c, (edge - c).length()))
    }
}
