//! A model: the meshes of one file plus a world transform and a flat color.

use std::path::Path;

use crate::colors;
use crate::error::LoadError;
use crate::mesh::{self, Mesh};
use crate::transform::Transform;

/// One or more meshes drawn with a shared transform and color.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    transform: Transform,
    color: u32,
}

impl Model {
    /// Creates a model from already loaded meshes.
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            meshes,
            transform: Transform::default(),
            color: colors::YELLOW,
        }
    }

    /// Loads a model file. The model is named after the file stem.
    ///
    /// A file with an unsupported extension loads as a model with no meshes;
    /// check [`Model::is_empty`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let meshes = mesh::load(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, meshes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Flat color as `0x00RRGGBB`.
    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn set_color(&mut self, color: u32) -> &mut Self {
        self.color = color;
        self
    }

    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }
}
