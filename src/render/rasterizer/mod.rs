//! Screen-space primitives.
//!
//! - [`draw_line`]: integer Bresenham
//! - [`draw_triangle`]: bounding box scan with a barycentric inside test
//! - [`draw_triangle_wireframe`]: the three edges of a triangle
//!
//! All of them take integer pixel coordinates, write alpha 255 and silently
//! skip pixels outside the target.

mod line;
mod triangle;

pub use line::draw_line;
pub use triangle::{barycentric, draw_triangle, draw_triangle_wireframe, DEGENERATE};
