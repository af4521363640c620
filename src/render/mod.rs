//! Frame production: buffers, rasterization and the per-model pipeline.

mod framebuffer;
mod pipeline;
pub mod rasterizer;
mod scheduler;
mod swapchain;

pub use framebuffer::Framebuffer;
pub use pipeline::{face_normal, viewport, Pipeline, RenderMode};
pub use rasterizer::{draw_line, draw_triangle, draw_triangle_wireframe};
pub use scheduler::FrameScheduler;
pub use swapchain::Swapchain;
