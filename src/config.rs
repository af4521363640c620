//! Renderer configuration.
//!
//! Everything the [`Renderer`](crate::renderer::Renderer) needs to open a surface
//! and draw a frame lives in [`RendererConfig`]. Defaults match an 800x600
//! window titled "Mini Renderer" with an uncapped frame rate.

use crate::colors;
use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::render::RenderMode;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Which presentation surface to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Off-screen surface that keeps the last frame in memory.
    Headless,
    /// SDL2 window. Requires the `sdl` cargo feature.
    Sdl,
}

impl Default for SurfaceKind {
    fn default() -> Self {
        if cfg!(feature = "sdl") {
            SurfaceKind::Sdl
        } else {
            SurfaceKind::Headless
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frame cap in frames per second. 0 means uncapped.
    pub target_fps: u16,
    /// Present through a separate front buffer instead of the buffer being drawn.
    pub double_buffer: bool,
    pub clear_color: u32,
    pub clear_alpha: u8,
    /// Base color of every mesh, scaled by the light intensity per face.
    pub mesh_color: u32,
    pub light_direction: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_position: Vec3,
    pub render_mode: RenderMode,
    pub surface: SurfaceKind,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            title: "Mini Renderer".to_string(),
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            target_fps: 0,
            double_buffer: true,
            clear_color: colors::BLACK,
            clear_alpha: 255,
            mesh_color: colors::YELLOW,
            light_direction: Vec3::new(0.2, 0.3, 1.0),
            fov_y: 60.0,
            z_near: 0.1,
            z_far: 100.0,
            camera_position: Vec3::new(0.0, 0.0, 3.0),
            render_mode: RenderMode::default(),
            surface: SurfaceKind::default(),
        }
    }
}

impl RendererConfig {
    /// Checks the values that would otherwise produce a broken projection.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov_y > 0.0 && self.fov_y < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_y
            )));
        }
        if !(self.z_near > 0.0 && self.z_far > self.z_near) {
            return Err(Error::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.z_near, self.z_far
            )));
        }
        if self.light_direction.magnitude() == 0.0 {
            return Err(Error::InvalidConfig("light direction must be non-zero".into()));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RendererConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.target_fps, 0);
        assert!(config.double_buffer);
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let config = RendererConfig {
            z_near: 10.0,
            z_far: 1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_sized_window() {
        let config = RendererConfig {
            height: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
