//! 4x4 transformation matrices.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Right-handed, OpenGL-style clip space (camera looks down -Z, NDC z in [-1, 1])
//!
//! # Example
//! ```
//! use minirender::math::{Mat4, Vec3};
//!
//! let model = Mat4::translation(0.0, 0.0, -5.0) * Mat4::scaling(2.0, 2.0, 2.0);
//! let moved = model * Vec3::new(1.0, 0.0, 0.0);
//! assert_eq!(moved, Vec3::new(2.0, 0.0, -5.0));
//! ```

use std::ops::Mul;

use super::matrix::Matrix;
use super::vec3::Vec3;
use super::vec4::Vec4;

pub type Mat4 = Matrix<4, 4>;

impl Matrix<4, 4> {
    /// Creates a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the X axis (radians).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Y axis (radians).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around the Z axis (radians).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `angle` radians around an arbitrary axis (Rodrigues).
    ///
    /// The axis is normalized here; a zero axis produces NaNs.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        let Vec3 { x, y, z } = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Mat4::new([
            [c + x * x * t, x * y * t - z * s, x * z * t + y * s, 0.0],
            [y * x * t + z * s, c + y * y * t, y * z * t - x * s, 0.0],
            [z * x * t - y * s, z * y * t + x * s, c + z * z * t, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns `self * Mat4::translation(v)`.
    pub fn translate(&self, v: Vec3) -> Self {
        *self * Mat4::translation(v.x, v.y, v.z)
    }

    /// Returns `self * Mat4::scaling(v)`.
    pub fn scale(&self, v: Vec3) -> Self {
        *self * Mat4::scaling(v.x, v.y, v.z)
    }

    /// Returns `self * Mat4::rotation(angle, axis)`.
    pub fn rotate(&self, angle: f32, axis: Vec3) -> Self {
        *self * Mat4::rotation(angle, axis)
    }

    /// Creates a right-handed view matrix.
    ///
    /// Builds the camera basis as
    /// `z = normalize(eye - target)`, `x = normalize(up x z)`, `y = z x x`
    /// and combines the transposed basis with the translation to `eye`.
    /// Flipping any of these signs mirrors every downstream screen coordinate.
    pub fn look_at(eye: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let z_axis = (eye - target).normalize();
        let x_axis = world_up.cross(z_axis).normalize();
        let y_axis = z_axis.cross(x_axis);

        Mat4::new([
            [x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(eye)],
            [y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(eye)],
            [z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Symmetric perspective projection.
    ///
    /// # Arguments
    ///
    /// * `fov_y` - Vertical field of view in radians.
    /// * `aspect_ratio` - Width divided by height.
    /// * `near`, `far` - Positive distances to the clipping planes.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [
                0.0,
                0.0,
                (far + near) / (near - far),
                2.0 * far * near / (near - far),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Orthographic projection of the box `[left, right] x [bottom, top] x [-near, -far]`.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Mat4::new([
            [2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left)],
            [0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom)],
            [0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Matrix<4, 4> {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        let m = self.as_rows();
        let row = |r: usize| m[r][0] * v.x + m[r][1] * v.y + m[r][2] * v.z + m[r][3] * v.w;
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

/// Transform a point: Mat4 * Vec3 (treated as a column vector with w=1).
///
/// The resulting w is dropped, **not** divided through. Projection matrices
/// therefore yield un-normalized clip coordinates here; use `Mat4 * Vec4` to
/// keep w.
impl Mul<Vec3> for Matrix<4, 4> {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        (self * Vec4::from(v)).to_vec3()
    }
}
