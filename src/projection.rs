//! Perspective projection parameters.
//!
//! [`Projection`] holds field of view, aspect ratio and clip planes and builds
//! the projection matrix from them. The aspect ratio is the only value that
//! changes at runtime, on window resize.

use crate::math::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Width / height.
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// Creates a projection.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view in radians, derived from fov_y and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio from a framebuffer size. Ignores empty sizes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// OpenGL-style perspective matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn fov_x_matches_fov_y_for_square_aspect() {
        let proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_x(), proj.fov_y(), epsilon = 1e-6);
    }

    #[test]
    fn from_degrees_converts() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn resize_updates_aspect_and_matrix() {
        let mut proj = Projection::from_degrees(60.0, 1.0, 0.1, 100.0);
        proj.resize(800, 400);
        assert_relative_eq!(proj.aspect_ratio(), 2.0);
        let m = proj.matrix();
        assert_relative_eq!(m.get(0, 0) * 2.0, m.get(1, 1), epsilon = 1e-6);

        proj.resize(0, 400);
        assert_relative_eq!(proj.aspect_ratio(), 2.0);
    }
}
