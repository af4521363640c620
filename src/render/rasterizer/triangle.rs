//! Bounding-box triangle fill with a barycentric inside test.

use super::line::draw_line;
use crate::math::{Vec2i, Vec3};
use crate::render::framebuffer::Framebuffer;

/// Returned by [`barycentric`] for a zero-area triangle. Its negative weight
/// makes every pixel test as outside.
pub const DEGENERATE: Vec3 = Vec3::new(-1.0, 1.0, 1.0);

/// Barycentric weights of `p` relative to the triangle `points`.
///
/// Coordinates are integers, so `|u.z| < 1` means the signed area is exactly
/// zero and the triangle is degenerate.
#[inline]
pub fn barycentric(points: &[Vec2i; 3], p: Vec2i) -> Vec3 {
    // Widen before subtracting: saturated screen points span the whole i32 range.
    let [a, b, c] = (*points).map(|v| (v.x as f32, v.y as f32));
    let (px, py) = (p.x as f32, p.y as f32);
    let u = Vec3::new(c.0 - a.0, b.0 - a.0, a.0 - px)
        .cross(Vec3::new(c.1 - a.1, b.1 - a.1, a.1 - py));
    if u.z.abs() < 1.0 {
        return DEGENERATE;
    }
    Vec3::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
}

/// Fills a triangle with a flat color and alpha 255.
///
/// Only pixels inside the framebuffer are visited. A pixel is covered when all
/// three barycentric weights are non-negative, so edges belong to the triangle.
pub fn draw_triangle(points: [Vec2i; 3], color: u32, target: &mut Framebuffer) {
    let clamp = Vec2i::new(target.width() as i32 - 1, target.height() as i32 - 1);
    let mut bbox_min = clamp;
    let mut bbox_max = Vec2i::ZERO;
    for point in &points {
        bbox_min.x = bbox_min.x.min(point.x).max(0);
        bbox_min.y = bbox_min.y.min(point.y).max(0);
        bbox_max.x = bbox_max.x.max(point.x).min(clamp.x);
        bbox_max.y = bbox_max.y.max(point.y).min(clamp.y);
    }

    for x in bbox_min.x..=bbox_max.x {
        for y in bbox_min.y..=bbox_max.y {
            let weights = barycentric(&points, Vec2i::new(x, y));
            if weights.x < 0.0 || weights.y < 0.0 || weights.z < 0.0 {
                continue;
            }
            target.set_pixel(x, y, color, 255);
        }
    }
}

/// Outlines a triangle with three Bresenham edges.
pub fn draw_triangle_wireframe(points: [Vec2i; 3], color: u32, target: &mut Framebuffer) {
    for i in 0..3 {
        let (from, to) = (points[i], points[(i + 1) % 3]);
        draw_line(from.x, from.y, to.x, to.y, color, target);
    }
}
