//! Fly camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z at yaw -90)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles in degrees. The basis vectors
//! `front`, `right` and `up` are recomputed every time either angle changes and
//! always form an orthonormal frame.
//!
//! - **Yaw**: rotation around world up, measured from +X toward +Z
//! - **Pitch**: elevation above the horizontal plane, clamped to [-89, 89]

use crate::math::{Mat4, Vec3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
/// Units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees per pixel of mouse travel.
pub const DEFAULT_SENSITIVITY: f32 = 0.3;

const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Euler-angle fly camera.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,

    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::UP, DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Creates a camera with explicit world-up and yaw/pitch in degrees.
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::FORWARD,
            up: world_up,
            right: Vec3::RIGHT,
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    /// Moves the camera by `movement_speed * delta_time` along front or right.
    pub fn process_key_input(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Turns the camera by mouse offsets in pixels.
    ///
    /// Positive `x_offset` turns right, positive `y_offset` looks up.
    pub fn process_mouse_input(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.front, self.up)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front =
            Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}
