//! Model to screen transform and flat shading.
//!
//! For every triangle of a model:
//!
//! 1. transform the vertices by the model matrix,
//! 2. take the face normal `normalize((v2 - v0) x (v1 - v0))` and light it,
//! 3. transform by `projection * view`,
//! 4. map to pixels with `(clip + 1) * size / 2`, truncated.
//!
//! Step 4 does **not** divide by w. Screen y grows with clip y, so the image
//! lands in the framebuffer with +Y pointing down the rows.

use log::trace;

use super::framebuffer::Framebuffer;
use super::rasterizer::{draw_triangle, draw_triangle_wireframe};
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::{Mat4, Vec2i, Vec3};
use crate::model::Model;
use crate::projection::Projection;

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Flat-shaded filled triangles.
    #[default]
    Filled,
    /// Unshaded triangle outlines in the model color.
    Wireframe,
}

#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    pub projection: Projection,
    pub light: DirectionalLight,
    pub mode: RenderMode,
}

impl Pipeline {
    pub fn new(projection: Projection, light: DirectionalLight, mode: RenderMode) -> Self {
        Self {
            projection,
            light,
            mode,
        }
    }

    /// Draws every mesh of `model`. Returns the number of triangles drawn.
    pub fn draw_model(&self, model: &Model, view: &Mat4, target: &mut Framebuffer) -> usize {
        (0..model.mesh_count())
            .map(|index| self.draw_mesh(model, index, view, target))
            .sum()
    }

    /// Draws one mesh of `model`. A mesh index past the end draws nothing.
    pub fn draw_mesh(
        &self,
        model: &Model,
        mesh_index: usize,
        view: &Mat4,
        target: &mut Framebuffer,
    ) -> usize {
        let Some(mesh) = model.mesh(mesh_index) else {
            return 0;
        };

        let mut projection = self.projection;
        projection.resize(target.width(), target.height());
        let model_matrix = model.transform().to_matrix();
        let projection_view = projection.matrix() * *view;
        let (width, height) = (target.width(), target.height());

        let mut drawn = 0;
        for triangle in mesh.triangles() {
            let world = triangle.map(|v| model_matrix * v);
            let screen = world.map(|v| viewport(projection_view * v, width, height));

            match self.mode {
                RenderMode::Filled => {
                    let intensity = self.light.intensity(face_normal(&world));
                    draw_triangle(screen, colors::modulate(model.color(), intensity), target);
                }
                RenderMode::Wireframe => draw_triangle_wireframe(screen, model.color(), target),
            }
            drawn += 1;
        }
        trace!("Mesh {mesh_index} of {}: {drawn} triangles", model.name());
        drawn
    }
}

/// Unit normal of a triangle as `(v2 - v0) x (v1 - v0)`.
///
/// Points toward a viewer who sees the vertices in clockwise order.
#[inline]
pub fn face_normal(vertices: &[Vec3; 3]) -> Vec3 {
    let [v0, v1, v2] = *vertices;
    (v2 - v0).cross(v1 - v0).normalize()
}

/// Maps clip-space x/y to pixel coordinates without a perspective divide.
#[inline]
pub fn viewport(clip: Vec3, width: u32, height: u32) -> Vec2i {
    Vec2i::new(
        ((clip.x + 1.0) * width as f32 / 2.0) as i32,
        ((clip.y + 1.0) * height as f32 / 2.0) as i32,
    )
}
