//! An n-dimensional kd-tree over an immutable point set.
//!
//! Built fresh for every partitioning call and discarded afterwards; the
//! tree owns a row-major copy of the points (one row per point) so queries
//! never touch the caller's coordinate arrays.

use crate::error::SplitError;
use quadra_core::{check_coordinates, CoordArray};
use smallvec::SmallVec;

/// Nearest-neighbor and range queries over a fixed point set.
///
/// The seam between partitioning logic and the index structure: block
/// splitting only needs `nearest`, rolling windows only need
/// `within_chebyshev`. Any balanced spatial index satisfies this contract.
pub trait PointIndex {
    /// Index of the point closest (Euclidean) to `point`, or `None` for an
    /// empty set. Ties keep the first candidate found; the order is
    /// deterministic for a fixed point set.
    fn nearest(&self, point: &[f64]) -> Option<usize>;

    /// Indices of all points within Chebyshev (infinity-norm) distance
    /// `radius` of `point`, boundary inclusive, in ascending index order.
    fn within_chebyshev(&self, point: &[f64], radius: f64) -> Vec<usize>;
}

const LEAF_SIZE: usize = 16;
const NO_CHILD: u32 = u32::MAX;

#[derive(Clone, Debug)]
struct KdNode {
    min: SmallVec<[f64; 4]>,
    max: SmallVec<[f64; 4]>,
    left: u32,
    right: u32,
    // Leaf payload: indices[start..end].
    start: u32,
    end: u32,
    split_val: f64,
    axis: u8,
}

impl KdNode {
    fn is_leaf(&self) -> bool {
        self.left == NO_CHILD
    }
}

/// A balanced kd-tree with median splits and bucket leaves.
#[derive(Clone, Debug)]
pub struct KdTree {
    ndim: usize,
    points: Vec<f64>,
    nodes: Vec<KdNode>,
    indices: Vec<usize>,
    root: u32,
}

impl KdTree {
    /// Build a tree over a point set given as one coordinate array per
    /// dimension.
    ///
    /// The arrays must share one shape; their flat element order defines
    /// the point indices returned by queries.
    pub fn build(coordinates: &[CoordArray]) -> Result<Self, SplitError> {
        check_coordinates(coordinates).map_err(SplitError::from)?;
        let ndim = coordinates.len();
        let count = coordinates.first().map_or(0, |c| c.len());
        let mut points = Vec::with_capacity(count * ndim);
        for i in 0..count {
            for array in coordinates {
                points.push(array.values()[i]);
            }
        }
        Ok(Self::from_rows(points, ndim))
    }

    /// Build a tree from a row-major point table (`count * ndim` values).
    pub fn from_rows(points: Vec<f64>, ndim: usize) -> Self {
        let count = if ndim == 0 { 0 } else { points.len() / ndim };
        let mut tree = Self {
            ndim,
            points,
            nodes: Vec::new(),
            indices: (0..count).collect(),
            root: NO_CHILD,
        };
        if count > 0 {
            tree.nodes.reserve(2 * count / LEAF_SIZE + 1);
            tree.root = tree.build_recursive(0, count);
        }
        tree
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of dimensions per point.
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// The `k` points closest to `point`, as `(distance, index)` pairs in
    /// ascending distance order. Returns fewer than `k` entries if the tree
    /// holds fewer points.
    pub fn k_nearest(&self, point: &[f64], k: usize) -> Vec<(f64, usize)> {
        let mut best: Vec<(f64, usize)> = Vec::with_capacity(k + 1);
        if k > 0 && !self.nodes.is_empty() {
            self.k_nearest_recursive(self.root, point, k, &mut best);
        }
        for entry in &mut best {
            entry.0 = entry.0.sqrt();
        }
        best
    }

    fn coord(&self, index: usize, dim: usize) -> f64 {
        self.points[index * self.ndim + dim]
    }

    fn dist_sq(&self, index: usize, point: &[f64]) -> f64 {
        (0..self.ndim)
            .map(|d| {
                let diff = self.coord(index, d) - point[d];
                diff * diff
            })
            .sum()
    }

    /// Squared Euclidean distance from `point` to the node's bounding box.
    fn box_dist_sq(&self, node: &KdNode, point: &[f64]) -> f64 {
        (0..self.ndim)
            .map(|d| {
                let v = point[d];
                let gap = if v < node.min[d] {
                    node.min[d] - v
                } else if v > node.max[d] {
                    v - node.max[d]
                } else {
                    0.0
                };
                gap * gap
            })
            .sum()
    }

    fn build_recursive(&mut self, start: usize, end: usize) -> u32 {
        let count = end - start;
        let mut min: SmallVec<[f64; 4]> = SmallVec::from_elem(f64::INFINITY, self.ndim);
        let mut max: SmallVec<[f64; 4]> = SmallVec::from_elem(f64::NEG_INFINITY, self.ndim);
        for &index in &self.indices[start..end] {
            for d in 0..self.ndim {
                let v = self.points[index * self.ndim + d];
                min[d] = min[d].min(v);
                max[d] = max[d].max(v);
            }
        }

        if count <= LEAF_SIZE {
            let node = self.nodes.len() as u32;
            self.nodes.push(KdNode {
                min,
                max,
                left: NO_CHILD,
                right: NO_CHILD,
                start: start as u32,
                end: end as u32,
                split_val: 0.0,
                axis: 0,
            });
            return node;
        }

        // Split the widest axis at the median point.
        let axis = (0..self.ndim)
            .max_by(|&a, &b| {
                let wa = max[a] - min[a];
                let wb = max[b] - min[b];
                wa.partial_cmp(&wb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(0);
        let mid = start + count / 2;
        let ndim = self.ndim;
        let points = std::mem::take(&mut self.points);
        self.indices[start..end].select_nth_unstable_by(count / 2, |&a, &b| {
            let va = points[a * ndim + axis];
            let vb = points[b * ndim + axis];
            va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
        });
        self.points = points;
        let split_val = self.coord(self.indices[mid], axis);

        let left = self.build_recursive(start, mid);
        let right = self.build_recursive(mid, end);
        let node = self.nodes.len() as u32;
        self.nodes.push(KdNode {
            min,
            max,
            left,
            right,
            start: 0,
            end: 0,
            split_val,
            axis: axis as u8,
        });
        node
    }

    fn nearest_recursive(&self, node: u32, point: &[f64], best: &mut (f64, usize)) {
        let n = &self.nodes[node as usize];
        if self.box_dist_sq(n, point) >= best.0 {
            return;
        }
        if n.is_leaf() {
            for &index in &self.indices[n.start as usize..n.end as usize] {
                let d = self.dist_sq(index, point);
                if d < best.0 {
                    *best = (d, index);
                }
            }
            return;
        }
        let (near, far) = if point[n.axis as usize] <= n.split_val {
            (n.left, n.right)
        } else {
            (n.right, n.left)
        };
        self.nearest_recursive(near, point, best);
        self.nearest_recursive(far, point, best);
    }

    fn k_nearest_recursive(
        &self,
        node: u32,
        point: &[f64],
        k: usize,
        best: &mut Vec<(f64, usize)>,
    ) {
        let n = &self.nodes[node as usize];
        if best.len() == k && self.box_dist_sq(n, point) >= best[k - 1].0 {
            return;
        }
        if n.is_leaf() {
            for &index in &self.indices[n.start as usize..n.end as usize] {
                let d = self.dist_sq(index, point);
                if best.len() == k && d >= best[k - 1].0 {
                    continue;
                }
                let at = best.partition_point(|&(bd, _)| bd <= d);
                best.insert(at, (d, index));
                best.truncate(k);
            }
            return;
        }
        let (near, far) = if point[n.axis as usize] <= n.split_val {
            (n.left, n.right)
        } else {
            (n.right, n.left)
        };
        self.k_nearest_recursive(near, point, k, best);
        self.k_nearest_recursive(far, point, k, best);
    }

    fn range_recursive(&self, node: u32, point: &[f64], radius: f64, out: &mut Vec<usize>) {
        let n = &self.nodes[node as usize];
        for d in 0..self.ndim {
            if point[d] - radius > n.max[d] || point[d] + radius < n.min[d] {
                return;
            }
        }
        if n.is_leaf() {
            for &index in &self.indices[n.start as usize..n.end as usize] {
                let inside = (0..self.ndim)
                    .all(|d| (self.coord(index, d) - point[d]).abs() <= radius);
                if inside {
                    out.push(index);
                }
            }
            return;
        }
        self.range_recursive(n.left, point, radius, out);
        self.range_recursive(n.right, point, radius, out);
    }
}

impl PointIndex for KdTree {
    fn nearest(&self, point: &[f64]) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best = (f64::INFINITY, usize::MAX);
        self.nearest_recursive(self.root, point, &mut best);
        (best.1 != usize::MAX).then_some(best.1)
    }

    fn within_chebyshev(&self, point: &[f64], radius: f64) -> Vec<usize> {
        let mut out = Vec::new();
        if !self.nodes.is_empty() {
            self.range_recursive(self.root, point, radius, &mut out);
        }
        out.sort_unstable();
        out
    }
}
