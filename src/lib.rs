//! A small CPU software rasterizer.
//!
//! Loads OBJ meshes, transforms them through a fly camera and a perspective
//! projection, flat-shades every face against one directional light and fills
//! the triangles into a double-buffered framebuffer. Finished frames go to a
//! [`Surface`](surface::Surface): an SDL2 window with the `sdl` feature, or an
//! off-screen buffer that can be saved as PNG.
//!
//! # Quick Start
//!
//! ```no_run
//! use minirender::prelude::*;
//!
//! # fn main() -> minirender::Result<()> {
//! let config = RendererConfig {
//!     surface: SurfaceKind::Headless,
//!     ..Default::default()
//! };
//! let mut renderer = Renderer::new(config)?;
//! renderer.load_model("assets/cube.obj")?;
//! renderer.run(Some(60))?;
//! # Ok(())
//! # }
//! ```

// Public API
pub mod camera;
pub mod colors;
pub mod config;
pub mod error;
pub mod events;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod renderer;
pub mod surface;
pub mod transform;

pub use config::RendererConfig;
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use model::Model;
pub use renderer::Renderer;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use minirender::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Camera, CameraMovement};

    // Configuration
    pub use crate::config::{RendererConfig, SurfaceKind};

    // Events
    pub use crate::events::{EventBus, Key, KeyEvent, MouseButton, MouseEvent, WindowEvent};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::{Mat4, Vec2, Vec2i, Vec3, Vec4};

    // Rendering
    pub use crate::render::{Framebuffer, Pipeline, RenderMode};
    pub use crate::renderer::Renderer;
    pub use crate::surface::{HeadlessSurface, Surface};
}
