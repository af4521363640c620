//! Error types for the renderer.
//!
//! Only conditions that stop a frame or a load are errors. Out-of-bounds pixel
//! writes, degenerate triangles and non-positive resizes are silently ignored
//! where they happen.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while loading mesh files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot determine mesh format of {path}: no file extension")]
    UnrecognizedFormat { path: PathBuf },

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read mesh data: {0}")]
    Read(#[source] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("mesh {mesh}: face index {index} out of range (mesh has {vertex_count} vertices)")]
    FaceIndexOutOfRange {
        mesh: usize,
        index: i64,
        vertex_count: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    #[error("failed to allocate a {width}x{height} framebuffer")]
    Allocation { width: i32, height: i32 },
}

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("failed to create surface: {0}")]
    Creation(String),

    #[error("failed to present frame: {0}")]
    Present(String),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("surface kind {0:?} is not available in this build")]
    Unavailable(crate::config::SurfaceKind),
}

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
