//! # uvtransfer
//!
//! A library for transferring vertex positions between meshes through their
//! shared UV layout.
//!
//! When two meshes are unwrapped onto the same UV map, every corner of the
//! target mesh can be matched to the source corner occupying the same spot
//! in UV space, and the source vertex's position copied across. This is how
//! sculpted detail is moved onto a retopologized mesh, or edits made on one
//! shape variant are replayed onto another, without the meshes sharing
//! topology or vertex order.
//!
//! ## Features
//!
//! - **Corner-accurate matching**: correspondence works on face corners,
//!   not vertices, so seams and UV islands behave correctly
//! - **k-d tree lookup**: nearest-neighbour queries over the source UV set
//!   with a deterministic tie-break
//! - **Strict threshold**: a corner is matched only when its UV distance is
//!   strictly below the configured threshold
//! - **Parallel queries**: correspondence search runs on all cores, with
//!   results identical to the sequential pass
//! - **Progress and cancellation**: long transfers report progress and can
//!   be cancelled between batches
//! - **OBJ I/O**: meshes and their UV layers round-trip through Wavefront
//!   OBJ files
//!
//! ## Quick Start
//!
//! ```
//! use uvtransfer::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! let uvs = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! // The source mesh holds the deformed positions.
//! let mut source = PolyMesh::new();
//! source.add_vertex(Point3::new(0.0, 0.0, 1.0));
//! source.add_vertex(Point3::new(1.0, 0.0, 1.0));
//! source.add_vertex(Point3::new(0.0, 1.0, 1.0));
//! source.add_polygon(&[0, 1, 2]).unwrap();
//! source.add_uv_layer(DEFAULT_UV_LAYER, uvs.clone()).unwrap();
//!
//! // The target mesh shares the UV layout but sits at z = 0.
//! let mut target = PolyMesh::new();
//! target.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! target.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! target.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! target.add_polygon(&[0, 1, 2]).unwrap();
//! target.add_uv_layer(DEFAULT_UV_LAYER, uvs).unwrap();
//!
//! let report = transfer_positions(&source, &mut target, &TransferOptions::default()).unwrap();
//!
//! assert_eq!(report.copied, 3);
//! assert_eq!(target.positions()[0].z, 1.0);
//! ```
//!
//! ## Working with Files
//!
//! ```no_run
//! use uvtransfer::prelude::*;
//!
//! let source = uvtransfer::io::load("sculpted.obj").unwrap();
//! let mut target = uvtransfer::io::load("retopo.obj").unwrap();
//!
//! let report = transfer_positions(&source, &mut target, &TransferOptions::default()).unwrap();
//! println!("copied {} of {} corners", report.copied, report.target_corners);
//!
//! uvtransfer::io::save(&target, "retopo_shaped.obj").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod kdtree;
pub mod mesh;
pub mod progress;
pub mod transfer;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use uvtransfer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TransferError};
    pub use crate::kdtree::{KdTree, Nearest};
    pub use crate::mesh::{LoopId, PolyMesh, Polygon, UvLayer, VertexId, DEFAULT_UV_LAYER};
    pub use crate::progress::Progress;
    pub use crate::transfer::{
        transfer_positions, transfer_positions_with_progress, TransferOptions, TransferReport,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::{Point2, Point3};

    #[test]
    fn test_quad_sheet_transfer() {
        // Two quads sharing an edge, with the same UV layout on both
        // meshes and a stepped source height.
        let mut source = PolyMesh::new();
        let mut target = PolyMesh::new();
        for (i, x) in [0.0, 1.0, 2.0].iter().enumerate() {
            for y in [0.0, 1.0] {
                source.add_vertex(Point3::new(*x, y, (i + 1) as f64));
                target.add_vertex(Point3::new(*x, y, 0.0));
            }
        }

        let finish = |m: &mut PolyMesh| -> Result<()> {
            m.add_polygon(&[0, 2, 3, 1])?;
            m.add_polygon(&[2, 4, 5, 3])?;
            let coords = [0usize, 2, 3, 1, 2, 4, 5, 3]
                .iter()
                .map(|&v| Point2::new((v / 2) as f64 * 0.5, (v % 2) as f64))
                .collect();
            m.add_uv_layer(DEFAULT_UV_LAYER, coords)
        };
        finish(&mut source).unwrap();
        finish(&mut target).unwrap();

        let report =
            transfer_positions(&source, &mut target, &TransferOptions::default()).unwrap();

        assert_eq!(report.copied, 8);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.vertices_written, 6);
        assert_eq!(target.positions(), source.positions());
    }
}
