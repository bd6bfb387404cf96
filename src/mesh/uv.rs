//! Per-corner UV coordinate storage.
//!
//! This module provides the [`UvLayer`] type, a named list of 2D texture
//! coordinates with exactly one entry per face corner of the owning mesh.
//! Storing coordinates per corner rather than per vertex allows a vertex
//! shared by several polygons to carry a different UV in each of them,
//! which is what makes UV seams possible.

use nalgebra::Point2;

use super::index::LoopId;

/// Name of the UV layer used when no layer is specified.
pub const DEFAULT_UV_LAYER: &str = "UVMap";

/// A named UV layer storing one coordinate per face corner.
///
/// The coordinate at position `i` belongs to the corner with global loop
/// index `i`. UV coordinates are typically in the range [0, 1] but may
/// extend outside it.
#[derive(Debug, Clone)]
pub struct UvLayer {
    name: String,
    coords: Vec<Point2<f64>>,
}

impl UvLayer {
    /// Create a new UV layer with the given name and per-corner coordinates.
    pub fn new(name: &str, coords: Vec<Point2<f64>>) -> Self {
        Self {
            name: name.to_string(),
            coords,
        }
    }

    /// Get the layer name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the UV coordinates for a corner.
    #[inline]
    pub fn get(&self, l: LoopId) -> Point2<f64> {
        self.coords[l.index()]
    }

    /// Get the number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if the layer has no coordinates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over all coordinates with their loop indices.
    pub fn iter(&self) -> impl Iterator<Item = (LoopId, Point2<f64>)> + '_ {
        self.coords
            .iter()
            .enumerate()
            .map(|(i, &uv)| (LoopId::new(i), uv))
    }

    /// Get the raw coordinates slice.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Compute the bounding box of the coordinates.
    ///
    /// Returns `None` if the layer is empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        if self.coords.is_empty() {
            return None;
        }

        let mut min = self.coords[0];
        let mut max = self.coords[0];

        for uv in &self.coords {
            min.x = min.x.min(uv.x);
            min.y = min.y.min(uv.y);
            max.x = max.x.max(uv.x);
            max.y = max.y.max(uv.y);
        }

        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_layer_basic() {
        let coords = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ];
        let layer = UvLayer::new("UVMap", coords);

        assert_eq!(layer.name(), "UVMap");
        assert_eq!(layer.len(), 3);
        assert!(!layer.is_empty());

        assert_eq!(layer.get(LoopId::new(0)), Point2::new(0.0, 0.0));
        assert_eq!(layer.get(LoopId::new(1)), Point2::new(1.0, 0.0));
        assert_eq!(layer.get(LoopId::new(2)), Point2::new(0.5, 1.0));
    }

    #[test]
    fn test_uv_layer_iter() {
        let coords = vec![Point2::new(0.25, 0.75), Point2::new(0.5, 0.5)];
        let layer = UvLayer::new("lightmap", coords);

        let collected: Vec<_> = layer.iter().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0], (LoopId::new(0), Point2::new(0.25, 0.75)));
        assert_eq!(collected[1], (LoopId::new(1), Point2::new(0.5, 0.5)));
    }

    #[test]
    fn test_uv_layer_bounding_box() {
        let coords = vec![
            Point2::new(-1.0, 0.5),
            Point2::new(2.0, -0.5),
            Point2::new(0.5, 3.0),
        ];
        let layer = UvLayer::new("UVMap", coords);

        let (min, max) = layer.bounding_box().unwrap();
        assert_eq!(min, Point2::new(-1.0, -0.5));
        assert_eq!(max, Point2::new(2.0, 3.0));
    }

    #[test]
    fn test_empty_layer() {
        let layer = UvLayer::new("UVMap", Vec::new());
        assert!(layer.is_empty());
        assert!(layer.bounding_box().is_none());
    }
}
