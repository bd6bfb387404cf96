//! Core mesh data structures.
//!
//! This module provides the polygon mesh representation and related types
//! for UV-driven position transfer.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], an indexed polygon mesh that pairs
//! vertex positions with named per-corner UV layers. Positions live on
//! vertices; UV coordinates live on corners (loops), so a vertex shared by
//! several polygons can carry a different UV in each one. The
//! [`PolyMesh::loop_vertex_map`] method bridges the two spaces.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`LoopId`] - Identifies a loop (face corner)
//!
//! # Construction
//!
//! Meshes are typically constructed from file I/O or programmatically:
//!
//! ```
//! use uvtransfer::mesh::{PolyMesh, DEFAULT_UV_LAYER};
//! use nalgebra::{Point2, Point3};
//!
//! let mut mesh = PolyMesh::new();
//! mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
//! mesh.add_polygon(&[0, 1, 2]).unwrap();
//! mesh.add_uv_layer(DEFAULT_UV_LAYER, vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.5, 1.0),
//! ]).unwrap();
//! ```

mod index;
mod poly;
mod uv;

pub use index::{LoopId, VertexId};
pub use poly::{PolyMesh, Polygon};
pub use uv::{UvLayer, DEFAULT_UV_LAYER};
