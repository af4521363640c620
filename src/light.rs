//! Lighting for flat shading.

use crate::math::Vec3;

/// A distant light shining uniformly on the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Normalized vector pointing from the surface toward the light.
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.2, 0.3, 1.0))
    }
}

impl DirectionalLight {
    /// Creates a light toward `direction`. The direction is normalized here.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    /// Flat shading intensity in [0, 1] for a unit face normal.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        normal.dot(self.direction).clamp(0.0, 1.0)
    }
}
