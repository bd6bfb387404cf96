//! Error types for uvtransfer.
//!
//! This module defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`TransferError`].
pub type Result<T> = std::result::Result<T, TransferError>;

/// Errors that can occur while building meshes or transferring positions.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Source and target refer to the same mesh.
    #[error("source and target are the same mesh")]
    SameMesh,

    /// A named mesh file does not exist.
    #[error("mesh not found: {path}")]
    MeshNotFound {
        /// The missing file path.
        path: PathBuf,
    },

    /// A mesh has no UV layer with the requested name.
    #[error("UV layer not found: {name}")]
    UvLayerNotFound {
        /// The requested layer name.
        name: String,
    },

    /// The resolved UV layer has no coordinates.
    #[error("UV layer {name} is empty")]
    EmptyUvLayer {
        /// The layer name.
        name: String,
    },

    /// A UV layer's coordinate count does not match the mesh corner count.
    #[error("UV layer {layer} has {coords} coordinates for a mesh with {corners} corners")]
    LoopCountMismatch {
        /// The layer name.
        layer: String,
        /// Number of coordinates in the layer.
        coords: usize,
        /// Number of corners in the mesh.
        corners: usize,
    },

    /// A mesh already has a UV layer with this name.
    #[error("UV layer already exists: {name}")]
    UvLayerExists {
        /// The duplicate layer name.
        name: String,
    },

    /// A polygon references a vertex index outside the mesh.
    #[error("polygon {polygon} references invalid vertex index {vertex} (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex {
        /// The polygon index.
        polygon: usize,
        /// The invalid vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A polygon has fewer than three distinct vertices.
    #[error("polygon {polygon} is degenerate (fewer than three distinct vertices)")]
    DegeneratePolygon {
        /// The polygon index.
        polygon: usize,
    },

    /// Operation cancelled by the progress callback.
    #[error("transfer cancelled after {copied} corners were copied")]
    Cancelled {
        /// Number of corners copied before cancellation.
        copied: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a mesh from a file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a mesh to a file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}
