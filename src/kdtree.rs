//! Balanced k-d tree over 3D points.
//!
//! This module provides a static spatial index built once from a point set
//! and queried for exact nearest neighbours. The tree is balanced by
//! construction: each subtree root is the median of its range along the
//! splitting axis, and the axis cycles x, y, z with depth. Building is
//! O(N log N); a query visits O(log N) nodes on average and never returns
//! an approximate answer, because a subtree is only skipped when the
//! splitting plane is strictly farther than the best match found so far.
//!
//! Points are stored flat in subtree order, so a node's children are
//! addressed by range splitting rather than stored pointers.
//!
//! # Example
//!
//! ```
//! use uvtransfer::kdtree::KdTree;
//! use nalgebra::Point3;
//!
//! let tree = KdTree::from_points(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]);
//!
//! let hit = tree.nearest(&Point3::new(0.9, 0.1, 0.0));
//! assert_eq!(hit.index, 1);
//! ```

use nalgebra::Point3;

/// Result of a nearest-neighbour query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// The matched point.
    pub point: Point3<f64>,
    /// The index the point was inserted with.
    pub index: usize,
    /// Euclidean distance between the query and the matched point.
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    point: Point3<f64>,
    index: usize,
}

/// A balanced k-d tree over 3D points with exact nearest-neighbour queries.
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<Node>,
}

impl KdTree {
    /// Build a balanced tree from points paired with caller-chosen indices.
    ///
    /// Indices are returned by [`nearest`](Self::nearest) and need not be
    /// unique or contiguous.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn build(points: Vec<(Point3<f64>, usize)>) -> Self {
        assert!(!points.is_empty(), "cannot build a k-d tree from no points");

        let mut nodes: Vec<Node> = points
            .into_iter()
            .map(|(point, index)| Node { point, index })
            .collect();
        build_range(&mut nodes, 0);
        Self { nodes }
    }

    /// Build a tree over a slice of points, indexed by slice position.
    ///
    /// # Panics
    ///
    /// Panics if `points` is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Self {
        Self::build(points.iter().enumerate().map(|(i, &p)| (p, i)).collect())
    }

    /// Get the number of points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no points. Construction rejects empty input,
    /// so this is always false for a built tree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the nearest stored point to `query`.
    ///
    /// When several stored points are equidistant from the query (equal
    /// computed squared distance), the one inserted with the lowest index
    /// wins. This makes query results independent of construction order,
    /// which matters for duplicate points in particular.
    pub fn nearest(&self, query: &Point3<f64>) -> Nearest {
        // Seed with the root so the search never tracks an empty best.
        let root = self.nodes.len() / 2;
        let mut best_slot = root;
        let mut best_sq = (self.nodes[root].point - query).norm_squared();
        self.search(0, self.nodes.len(), 0, query, &mut best_slot, &mut best_sq);

        let node = &self.nodes[best_slot];
        Nearest {
            point: node.point,
            index: node.index,
            distance: best_sq.sqrt(),
        }
    }

    fn search(
        &self,
        lo: usize,
        hi: usize,
        depth: usize,
        query: &Point3<f64>,
        best_slot: &mut usize,
        best_sq: &mut f64,
    ) {
        if lo >= hi {
            return;
        }

        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        let dist_sq = (node.point - query).norm_squared();

        if dist_sq < *best_sq || (dist_sq == *best_sq && node.index < self.nodes[*best_slot].index)
        {
            *best_slot = mid;
            *best_sq = dist_sq;
        }

        let axis = depth % 3;
        let delta = query[axis] - node.point[axis];
        let (near, far) = if delta < 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search(near.0, near.1, depth + 1, query, best_slot, best_sq);

        // The far side can still hold a point at exactly the best distance,
        // so equality must not prune it or the lowest-index rule would miss
        // ties sitting on the splitting plane.
        if delta * delta <= *best_sq {
            self.search(far.0, far.1, depth + 1, query, best_slot, best_sq);
        }
    }
}

/// Recursively partition a node range around its median on the depth axis.
///
/// After this the node at the middle of every subtree range is the subtree
/// root, with no larger coordinate on its left and no smaller on its right.
fn build_range(nodes: &mut [Node], depth: usize) {
    if nodes.len() <= 1 {
        return;
    }

    let axis = depth % 3;
    let mid = nodes.len() / 2;
    nodes.select_nth_unstable_by(mid, |a, b| a.point[axis].total_cmp(&b.point[axis]));

    let (left, rest) = nodes.split_at_mut(mid);
    build_range(left, depth + 1);
    build_range(&mut rest[1..], depth + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force(points: &[(Point3<f64>, usize)], query: &Point3<f64>) -> (usize, f64) {
        let mut best_index = usize::MAX;
        let mut best_sq = f64::INFINITY;
        for &(p, i) in points {
            let d = (p - query).norm_squared();
            if d < best_sq || (d == best_sq && i < best_index) {
                best_index = i;
                best_sq = d;
            }
        }
        (best_index, best_sq)
    }

    fn random_points(rng: &mut StdRng, n: usize) -> Vec<(Point3<f64>, usize)> {
        (0..n)
            .map(|i| {
                (
                    Point3::new(
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                    ),
                    i,
                )
            })
            .collect()
    }

    #[test]
    fn test_matches_brute_force_on_random_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let points = random_points(&mut rng, 500);
        let tree = KdTree::build(points.clone());

        for _ in 0..200 {
            let query = Point3::new(
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-1.5..1.5),
            );
            let found = tree.nearest(&query);
            let (index, dist_sq) = brute_force(&points, &query);
            assert_eq!(found.index, index);
            assert_eq!(found.distance, dist_sq.sqrt());
        }

        // Queries placed exactly on stored points must come back at distance 0.
        for &(p, i) in points.iter().step_by(37) {
            let found = tree.nearest(&p);
            assert_eq!(found.index, i);
            assert_eq!(found.distance, 0.0);
        }
    }

    #[test]
    fn test_planar_points() {
        // UV-style input: everything on the z = 0 plane.
        let mut rng = StdRng::seed_from_u64(12);
        let points: Vec<_> = (0..300)
            .map(|i| {
                (
                    Point3::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), 0.0),
                    i,
                )
            })
            .collect();
        let tree = KdTree::build(points.clone());

        for _ in 0..100 {
            let query = Point3::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), 0.0);
            let found = tree.nearest(&query);
            let (index, dist_sq) = brute_force(&points, &query);
            assert_eq!(found.index, index);
            assert_eq!(found.distance, dist_sq.sqrt());
        }
    }

    #[test]
    fn test_collinear_points() {
        // Degenerate distribution: all points on the x axis.
        let points: Vec<_> = (0..101)
            .map(|i| (Point3::new(i as f64, 0.0, 0.0), i))
            .collect();
        let tree = KdTree::build(points.clone());

        for query_x in [-3.0, 0.2, 49.5, 100.9] {
            let query = Point3::new(query_x, 1.0, 0.0);
            let found = tree.nearest(&query);
            let (index, dist_sq) = brute_force(&points, &query);
            assert_eq!(found.index, index);
            assert_eq!(found.distance, dist_sq.sqrt());
        }
    }

    #[test]
    fn test_tie_break_prefers_lowest_index() {
        // The same point inserted under several indices, deliberately shuffled.
        let p = Point3::new(0.25, -0.5, 0.75);
        let far = Point3::new(5.0, 5.0, 5.0);
        let tree = KdTree::build(vec![(far, 0), (p, 9), (p, 4), (far, 2), (p, 7)]);

        let found = tree.nearest(&p);
        assert_eq!(found.index, 4);
        assert_eq!(found.distance, 0.0);
    }

    #[test]
    fn test_tie_break_between_distinct_points() {
        // Two points equidistant from the query on opposite sides.
        let tree = KdTree::build(vec![
            (Point3::new(1.0, 0.0, 0.0), 3),
            (Point3::new(-1.0, 0.0, 0.0), 1),
            (Point3::new(0.0, 4.0, 0.0), 0),
        ]);

        let found = tree.nearest(&Point3::origin());
        assert_eq!(found.index, 1);
        assert_eq!(found.distance, 1.0);
    }

    #[test]
    fn test_single_point() {
        let tree = KdTree::from_points(&[Point3::new(1.0, 2.0, 3.0)]);
        assert_eq!(tree.len(), 1);

        let found = tree.nearest(&Point3::origin());
        assert_eq!(found.index, 0);
        assert_eq!(found.point, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "no points")]
    fn test_empty_build_panics() {
        KdTree::build(Vec::new());
    }

    fn check_partition(nodes: &[Node], depth: usize) {
        if nodes.len() <= 1 {
            return;
        }
        let axis = depth % 3;
        let mid = nodes.len() / 2;
        let pivot = nodes[mid].point[axis];
        assert!(nodes[..mid].iter().all(|n| n.point[axis] <= pivot));
        assert!(nodes[mid + 1..].iter().all(|n| n.point[axis] >= pivot));
        check_partition(&nodes[..mid], depth + 1);
        check_partition(&nodes[mid + 1..], depth + 1);
    }

    #[test]
    fn test_balanced_median_layout() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = KdTree::build(random_points(&mut rng, 257));
        check_partition(&tree.nodes, 0);
    }
}
