//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes together
//! with their per-corner UV layers.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Positions, polygons and UVs |
//!
//! # Usage
//!
//! The easiest way to load and save meshes is using the automatic format
//! detection:
//!
//! ```no_run
//! use uvtransfer::io::{load, save};
//!
//! let mesh = load("model.obj").unwrap();
//! save(&mesh, "output.obj").unwrap();
//! ```
//!
//! You can also use format-specific functions:
//!
//! ```no_run
//! use uvtransfer::io::obj;
//!
//! let mesh = obj::load("model.obj").unwrap();
//! obj::save(&mesh, "output.obj").unwrap();
//! ```

pub mod obj;

use std::path::Path;

use crate::error::{Result, TransferError};
use crate::mesh::PolyMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
///
/// # Example
///
/// ```no_run
/// use uvtransfer::io::load;
///
/// let mesh = load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<PolyMesh> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| TransferError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Obj => obj::load(path),
    }
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension.
///
/// # Example
///
/// ```no_run
/// use uvtransfer::io::save;
/// use uvtransfer::mesh::PolyMesh;
///
/// let mesh = PolyMesh::new();
/// save(&mesh, "output.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &PolyMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| TransferError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        Format::Obj => obj::save(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_extension("obj"), Some(Format::Obj));
        assert_eq!(Format::from_extension("OBJ"), Some(Format::Obj));
        assert_eq!(Format::from_extension("stl"), None);

        assert_eq!(Format::from_path("model.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("model.glb"), None);
        assert_eq!(Format::from_path("no_extension"), None);
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let result = load("mesh.xyz");
        assert!(matches!(
            result,
            Err(TransferError::UnsupportedFormat { extension }) if extension == "xyz"
        ));
    }
}
