use itertools::Itertools;
use kiddo::SquaredEuclidean;
use kiddo::float::kdtree::KdTree;
use nalgebra::Point3;

/// Points per k-d tree leaf.
///
/// A leaf can only be split if its points do not all share one coordinate on
/// the split axis, so no coordinate value may occur this many times on any axis.
const BUCKET_SIZE: usize = 32;

type Tree = KdTree<f64, u64, 3, BUCKET_SIZE, u32>;

/// Radius queries over a fixed set of atom positions.
pub struct AtomIndex {
    tree: Tree,
    points: Vec<[f64; 3]>,
}

impl AtomIndex {
    /// Builds the index, or returns `None` when the positions cannot be held by
    /// the tree: non-finite coordinates, or a coordinate value shared by
    /// [`BUCKET_SIZE`] or more points on one axis (unplaced atoms stacked at the
    /// origin, planar models).
    pub fn new<'p>(positions: impl IntoIterator<Item = &'p Point3<f64>>) -> Option<Self> {
        let points: Vec<[f64; 3]> = positions.into_iter().map(|p| [p.x, p.y, p.z]).collect();
        if points.iter().flatten().any(|v| !v.is_finite())
            || max_axis_multiplicity(&points) >= BUCKET_SIZE
        {
            return None;
        }
        let tree: Tree = (&points).into();
        Some(Self { tree, points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Indices of the points within `radius` of point `index`, excluding itself,
    /// in ascending order.
    pub fn neighbors_of(&self, index: usize, radius: f64) -> Vec<usize> {
        let Some(query) = self.points.get(index) else {
            return Vec::new();
        };
        let mut neighbors: Vec<usize> = self
            .tree
            .within_unsorted::<SquaredEuclidean>(query, radius * radius)
            .into_iter()
            .map(|neighbor| neighbor.item as usize)
            .filter(|&other| other != index)
            .collect();
        neighbors.sort_unstable();
        neighbors
    }
}

/// The largest number of points sharing one coordinate value on any axis.
fn max_axis_multiplicity(points: &[[f64; 3]]) -> usize {
    (0..3)
        .filter_map(|axis| {
            points
                .iter()
                // `+ 0.0` folds -0.0 into 0.0; the tree compares them as equal.
                .map(|point| (point[axis] + 0.0).to_bits())
                .counts()
                .into_values()
                .max()
        })
        .max()
        .unwrap_or(0)
}
