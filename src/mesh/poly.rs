//! Polygon mesh storage.
//!
//! This module provides [`PolyMesh`], a flat indexed polygon mesh with
//! named per-corner UV layers. Unlike connectivity-heavy representations,
//! the mesh stores exactly what UV-driven transfer needs: vertex positions,
//! polygon corner lists, and UV layers aligned with the corners.

use nalgebra::{Point2, Point3};

use super::index::VertexId;
use super::uv::UvLayer;
use crate::error::{Result, TransferError};

/// A polygon, stored as an ordered list of vertex indices.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<VertexId>,
}

impl Polygon {
    /// Get the vertices of this polygon, in corner order.
    #[inline]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }
}

/// An indexed polygon mesh with named per-corner UV layers.
///
/// Corners (loops) are numbered globally: polygon 0 contributes the first
/// `k0` corners, polygon 1 the next `k1`, and so on. Every UV layer holds
/// exactly one coordinate per corner, in that same order.
///
/// # Example
///
/// ```
/// use uvtransfer::mesh::PolyMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = PolyMesh::new();
/// mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
/// mesh.add_polygon(&[0, 1, 2]).unwrap();
///
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_polygons(), 1);
/// assert_eq!(mesh.num_corners(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    positions: Vec<Point3<f64>>,
    polygons: Vec<Polygon>,
    corner_count: usize,
    uv_layers: Vec<UvLayer>,
}

impl PolyMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with preallocated storage.
    pub fn with_capacity(num_vertices: usize, num_polygons: usize) -> Self {
        Self {
            positions: Vec::with_capacity(num_vertices),
            polygons: Vec::with_capacity(num_polygons),
            corner_count: 0,
            uv_layers: Vec::new(),
        }
    }

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of polygons.
    #[inline]
    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    /// Get the total number of corners across all polygons.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corner_count
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.positions.len());
        self.positions.push(position);
        id
    }

    /// Add a polygon from vertex indices.
    ///
    /// The polygon must have at least three corners, all distinct, and every
    /// index must refer to an existing vertex.
    pub fn add_polygon(&mut self, vertices: &[usize]) -> Result<()> {
        let polygon = self.polygons.len();

        if vertices.len() < 3 {
            return Err(TransferError::DegeneratePolygon { polygon });
        }
        for (i, &vi) in vertices.iter().enumerate() {
            if vi >= self.positions.len() {
                return Err(TransferError::InvalidVertexIndex {
                    polygon,
                    vertex: vi,
                    vertex_count: self.positions.len(),
                });
            }
            if vertices[..i].contains(&vi) {
                return Err(TransferError::DegeneratePolygon { polygon });
            }
        }

        self.polygons.push(Polygon {
            vertices: vertices.iter().map(|&vi| VertexId::new(vi)).collect(),
        });
        self.corner_count += vertices.len();
        Ok(())
    }

    /// Get a polygon by index.
    #[inline]
    pub fn polygon(&self, i: usize) -> &Polygon {
        &self.polygons[i]
    }

    /// Get all polygons.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.positions[v.index()]
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.positions[v.index()] = pos;
    }

    /// Get all vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Build the loop-to-vertex map.
    ///
    /// The returned vector has one entry per corner, in global corner order:
    /// entry `i` is the vertex that corner `i` belongs to. This is the bridge
    /// from per-corner UV space back to per-vertex position storage, since a
    /// vertex shared by several polygons appears once per incident corner.
    ///
    /// # Example
    ///
    /// ```
    /// use uvtransfer::mesh::{PolyMesh, VertexId};
    /// use nalgebra::Point3;
    ///
    /// let mut mesh = PolyMesh::new();
    /// for i in 0..4 {
    ///     mesh.add_vertex(Point3::new(i as f64, 0.0, 0.0));
    /// }
    /// mesh.add_polygon(&[0, 1, 2]).unwrap();
    /// mesh.add_polygon(&[2, 1, 3]).unwrap();
    ///
    /// let map = mesh.loop_vertex_map();
    /// assert_eq!(map.len(), 6);
    /// assert_eq!(map[2], VertexId::new(2));
    /// assert_eq!(map[3], VertexId::new(2)); // same vertex, different corner
    /// ```
    pub fn loop_vertex_map(&self) -> Vec<VertexId> {
        let mut map = Vec::with_capacity(self.corner_count);
        for polygon in &self.polygons {
            map.extend_from_slice(&polygon.vertices);
        }
        map
    }

    /// Add a UV layer.
    ///
    /// The layer must have exactly one coordinate per corner, and its name
    /// must not collide with an existing layer.
    pub fn add_uv_layer(&mut self, name: &str, coords: Vec<Point2<f64>>) -> Result<()> {
        if coords.len() != self.corner_count {
            return Err(TransferError::LoopCountMismatch {
                layer: name.to_string(),
                coords: coords.len(),
                corners: self.corner_count,
            });
        }
        if self.uv_layers.iter().any(|l| l.name() == name) {
            return Err(TransferError::UvLayerExists {
                name: name.to_string(),
            });
        }
        self.uv_layers.push(UvLayer::new(name, coords));
        Ok(())
    }

    /// Look up a UV layer by name.
    pub fn uv_layer(&self, name: &str) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|l| l.name() == name)
    }

    /// Get all UV layers, in insertion order.
    #[inline]
    pub fn uv_layers(&self) -> &[UvLayer] {
        &self.uv_layers
    }

    /// Compute the axis-aligned bounding box of all vertex positions.
    ///
    /// Returns `None` if the mesh has no vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min = self.positions[0];
        let mut max = self.positions[0];

        for p in &self.positions {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }

        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{LoopId, DEFAULT_UV_LAYER};

    fn quad_and_triangle() -> PolyMesh {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Point3::new(2.0, 0.5, 0.0));
        mesh.add_polygon(&[0, 1, 2, 3]).unwrap();
        mesh.add_polygon(&[1, 4, 2]).unwrap();
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = quad_and_triangle();
        assert_eq!(mesh.num_vertices(), 5);
        assert_eq!(mesh.num_polygons(), 2);
        assert_eq!(mesh.num_corners(), 7);
    }

    #[test]
    fn test_loop_vertex_map_concatenates_in_polygon_order() {
        let mesh = quad_and_triangle();
        let map = mesh.loop_vertex_map();

        let expected: Vec<VertexId> = [0usize, 1, 2, 3, 1, 4, 2]
            .iter()
            .map(|&v| VertexId::new(v))
            .collect();
        assert_eq!(map, expected);

        // A vertex shared by both polygons appears once per incident corner.
        assert_eq!(map[1], map[4]);
        assert_eq!(map[2], map[6]);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let mut mesh = PolyMesh::new();
        mesh.add_vertex(Point3::origin());
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));

        let result = mesh.add_polygon(&[0, 1, 7]);
        assert!(matches!(
            result,
            Err(TransferError::InvalidVertexIndex {
                polygon: 0,
                vertex: 7,
                vertex_count: 3,
            })
        ));
        assert_eq!(mesh.num_polygons(), 0);
        assert_eq!(mesh.num_corners(), 0);
    }

    #[test]
    fn test_degenerate_polygons_rejected() {
        let mut mesh = PolyMesh::new();
        for i in 0..3 {
            mesh.add_vertex(Point3::new(i as f64, 0.0, 0.0));
        }

        assert!(matches!(
            mesh.add_polygon(&[0, 1]),
            Err(TransferError::DegeneratePolygon { polygon: 0 })
        ));
        assert!(matches!(
            mesh.add_polygon(&[0, 1, 1]),
            Err(TransferError::DegeneratePolygon { polygon: 0 })
        ));
    }

    #[test]
    fn test_uv_layer_length_must_match_corners() {
        let mut mesh = quad_and_triangle();

        let too_short = vec![Point2::origin(); 3];
        assert!(matches!(
            mesh.add_uv_layer(DEFAULT_UV_LAYER, too_short),
            Err(TransferError::LoopCountMismatch {
                coords: 3,
                corners: 7,
                ..
            })
        ));

        let exact = vec![Point2::origin(); 7];
        assert!(mesh.add_uv_layer(DEFAULT_UV_LAYER, exact).is_ok());
    }

    #[test]
    fn test_duplicate_layer_name_rejected() {
        let mut mesh = quad_and_triangle();
        mesh.add_uv_layer("UVMap", vec![Point2::origin(); 7]).unwrap();

        let result = mesh.add_uv_layer("UVMap", vec![Point2::origin(); 7]);
        assert!(matches!(result, Err(TransferError::UvLayerExists { .. })));
    }

    #[test]
    fn test_uv_layer_lookup() {
        let mut mesh = quad_and_triangle();
        mesh.add_uv_layer("UVMap", vec![Point2::origin(); 7]).unwrap();
        mesh.add_uv_layer("lightmap", vec![Point2::new(0.5, 0.5); 7])
            .unwrap();

        assert!(mesh.uv_layer("UVMap").is_some());
        assert_eq!(
            mesh.uv_layer("lightmap").unwrap().get(LoopId::new(0)),
            Point2::new(0.5, 0.5)
        );
        assert!(mesh.uv_layer("missing").is_none());
        assert_eq!(mesh.uv_layers().len(), 2);
    }

    #[test]
    fn test_bounding_box() {
        let mesh = quad_and_triangle();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(2.0, 1.0, 0.0));

        assert!(PolyMesh::new().bounding_box().is_none());
    }

    #[test]
    fn test_set_position() {
        let mut mesh = quad_and_triangle();
        let v = VertexId::new(4);
        mesh.set_position(v, Point3::new(9.0, 9.0, 9.0));
        assert_eq!(*mesh.position(v), Point3::new(9.0, 9.0, 9.0));
    }
}
