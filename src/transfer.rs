//! UV-driven vertex position transfer.
//!
//! This module implements the transfer pass: given two meshes whose UV
//! layouts overlap, it copies vertex positions from the source mesh onto
//! the target mesh wherever a target corner's UV sits close enough to a
//! source corner's UV.
//!
//! The pass indexes every source corner in a k-d tree keyed by its UV
//! coordinate, then walks the target corners in global corner order. Each
//! corner's nearest source corner is accepted only when its UV distance is
//! strictly below the threshold; accepted matches are resolved through the
//! loop-to-vertex maps of both meshes and the source vertex position is
//! written to the target vertex. When several corners of one target vertex
//! match, the corner latest in global order determines the final position,
//! whether the queries ran in parallel or not.
//!
//! All validation happens before the first write: a failed precondition
//! leaves the target mesh untouched.

use nalgebra::{Point2, Point3};
use rayon::prelude::*;

use crate::error::{Result, TransferError};
use crate::kdtree::KdTree;
use crate::mesh::{PolyMesh, DEFAULT_UV_LAYER};
use crate::progress::Progress;

/// Options for [`transfer_positions`].
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Name of the UV layer to read on the source mesh.
    pub source_layer: String,

    /// Name of the UV layer to read on the target mesh.
    pub target_layer: String,

    /// Maximum UV distance for a match. The comparison is strict: a corner
    /// at exactly this distance is not matched.
    pub threshold: f64,

    /// Whether to run correspondence queries in parallel (default: true).
    pub parallel: bool,

    /// Number of corners processed between progress and cancellation checks.
    pub progress_interval: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            source_layer: DEFAULT_UV_LAYER.to_string(),
            target_layer: DEFAULT_UV_LAYER.to_string(),
            threshold: 1e-6,
            parallel: true,
            progress_interval: 1024,
        }
    }
}

impl TransferOptions {
    /// Set the UV layer name for both meshes.
    pub fn with_uv_layer(mut self, name: &str) -> Self {
        self.source_layer = name.to_string();
        self.target_layer = name.to_string();
        self
    }

    /// Set the UV layer name for the source mesh.
    pub fn with_source_layer(mut self, name: &str) -> Self {
        self.source_layer = name.to_string();
        self
    }

    /// Set the UV layer name for the target mesh.
    pub fn with_target_layer(mut self, name: &str) -> Self {
        self.target_layer = name.to_string();
        self
    }

    /// Set the match threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the number of corners processed between progress checks.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }
}

/// Statistics from a completed transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReport {
    /// Number of corners in the target UV layer.
    pub target_corners: usize,

    /// Corners whose nearest source corner was within the threshold.
    pub copied: usize,

    /// Corners with no source corner within the threshold.
    pub skipped: usize,

    /// Distinct target vertices that received a position.
    pub vertices_written: usize,

    /// Largest accepted UV distance (0 when nothing was copied).
    pub max_distance: f64,
}

/// Copy vertex positions from `source` onto `target` by matching UVs.
///
/// # Arguments
///
/// * `source` - The mesh positions are read from
/// * `target` - The mesh positions are written to (modified in place)
/// * `options` - Layer names, threshold, and execution parameters
///
/// # Algorithm
///
/// 1. Resolve the UV layer on each mesh and validate both before touching
///    the target.
/// 2. Index all source corner UVs in a k-d tree.
/// 3. For each target corner, find the nearest source corner; accept it if
///    the UV distance is strictly below `options.threshold`.
/// 4. Write the matched source vertex's position to the target corner's
///    vertex. Writes happen in global corner order, so the last matching
///    corner of a vertex wins.
///
/// # Example
///
/// ```
/// use uvtransfer::mesh::{PolyMesh, DEFAULT_UV_LAYER};
/// use uvtransfer::transfer::{transfer_positions, TransferOptions};
/// use nalgebra::{Point2, Point3};
///
/// let uvs = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
///
/// let mut source = PolyMesh::new();
/// source.add_vertex(Point3::new(0.0, 0.0, 2.0));
/// source.add_vertex(Point3::new(1.0, 0.0, 2.0));
/// source.add_vertex(Point3::new(0.0, 1.0, 2.0));
/// source.add_polygon(&[0, 1, 2]).unwrap();
/// source.add_uv_layer(DEFAULT_UV_LAYER, uvs.clone()).unwrap();
///
/// let mut target = PolyMesh::new();
/// target.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// target.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// target.add_vertex(Point3::new(0.0, 1.0, 0.0));
/// target.add_polygon(&[0, 1, 2]).unwrap();
/// target.add_uv_layer(DEFAULT_UV_LAYER, uvs).unwrap();
///
/// let report = transfer_positions(&source, &mut target, &TransferOptions::default()).unwrap();
/// assert_eq!(report.copied, 3);
/// assert_eq!(target.positions()[0].z, 2.0);
/// ```
pub fn transfer_positions(
    source: &PolyMesh,
    target: &mut PolyMesh,
    options: &TransferOptions,
) -> Result<TransferReport> {
    transfer_positions_with_progress(source, target, options, &Progress::none())
}

/// [`transfer_positions`] with progress reporting and cancellation.
///
/// The callback is invoked before the source index is built and then after
/// every `options.progress_interval` corners. Returning `false` from the
/// callback cancels the transfer: positions already written stay written,
/// and the returned [`TransferError::Cancelled`] carries the number of
/// corners copied up to that point.
pub fn transfer_positions_with_progress(
    source: &PolyMesh,
    target: &mut PolyMesh,
    options: &TransferOptions,
    progress: &Progress,
) -> Result<TransferReport> {
    let source_layer =
        source
            .uv_layer(&options.source_layer)
            .ok_or_else(|| TransferError::UvLayerNotFound {
                name: options.source_layer.clone(),
            })?;
    let target_layer =
        target
            .uv_layer(&options.target_layer)
            .ok_or_else(|| TransferError::UvLayerNotFound {
                name: options.target_layer.clone(),
            })?;

    if source_layer.is_empty() {
        return Err(TransferError::EmptyUvLayer {
            name: options.source_layer.clone(),
        });
    }
    if target_layer.is_empty() {
        return Err(TransferError::EmptyUvLayer {
            name: options.target_layer.clone(),
        });
    }
    if source_layer.len() != source.num_corners() {
        return Err(TransferError::LoopCountMismatch {
            layer: options.source_layer.clone(),
            coords: source_layer.len(),
            corners: source.num_corners(),
        });
    }
    if target_layer.len() != target.num_corners() {
        return Err(TransferError::LoopCountMismatch {
            layer: options.target_layer.clone(),
            coords: target_layer.len(),
            corners: target.num_corners(),
        });
    }

    let total = target_layer.len();
    if !progress.report(0, total) {
        return Err(TransferError::Cancelled { copied: 0 });
    }

    let source_map = source.loop_vertex_map();
    let target_map = target.loop_vertex_map();

    // Index source corners by UV, embedded into the tree's 3D space.
    let tree = KdTree::build(
        source_layer
            .iter()
            .map(|(l, uv)| (Point3::new(uv.x, uv.y, 0.0), l.index()))
            .collect(),
    );

    // Snapshot the target coordinates so position writes during the pass
    // cannot alias the values still being matched.
    let target_uvs: Vec<Point2<f64>> = target_layer.as_slice().to_vec();

    let interval = options.progress_interval.max(1);
    let mut written = vec![false; target.num_vertices()];
    let mut report = TransferReport {
        target_corners: total,
        copied: 0,
        skipped: 0,
        vertices_written: 0,
        max_distance: 0.0,
    };

    let mut processed = 0;
    while processed < total {
        let end = (processed + interval).min(total);
        let batch = &target_uvs[processed..end];

        let matches: Vec<Option<(usize, f64)>> = if options.parallel {
            batch
                .par_iter()
                .map(|uv| find_match(&tree, uv, options.threshold))
                .collect()
        } else {
            batch
                .iter()
                .map(|uv| find_match(&tree, uv, options.threshold))
                .collect()
        };

        // Apply in corner order: when several corners of one vertex match,
        // the last corner wins, in parallel and sequential runs alike.
        for (offset, matched) in matches.iter().enumerate() {
            match *matched {
                Some((source_corner, distance)) => {
                    let source_vertex = source_map[source_corner];
                    let target_vertex = target_map[processed + offset];
                    target.set_position(target_vertex, *source.position(source_vertex));

                    if !written[target_vertex.index()] {
                        written[target_vertex.index()] = true;
                        report.vertices_written += 1;
                    }
                    report.copied += 1;
                    report.max_distance = report.max_distance.max(distance);
                }
                None => report.skipped += 1,
            }
        }

        processed = end;
        if !progress.report(processed, total) && processed < total {
            return Err(TransferError::Cancelled {
                copied: report.copied,
            });
        }
    }

    Ok(report)
}

#[inline]
fn find_match(tree: &KdTree, uv: &Point2<f64>, threshold: f64) -> Option<(usize, f64)> {
    let nearest = tree.nearest(&Point3::new(uv.x, uv.y, 0.0));
    if nearest.distance < threshold {
        Some((nearest.index, nearest.distance))
    } else {
        None
    }
}
