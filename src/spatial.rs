//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

use glam::Vec2;
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// Wrapper around a 2D KD-tree of site positions
///
/// The nearest site to a point is the site whose Voronoi cell contains it, so
/// a nearest-neighbour query answers "which cell is this position in".
///
/// # Performance
///
/// - Construction: O(n log n)
/// - Query: O(log n)
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f32, usize, 2, 32>>,
    len: usize,
}

impl SpatialIndex {
    /// Build spatial index from site positions
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map::SpatialIndex;
    /// use glam::Vec2;
    ///
    /// let sites = vec![
    ///     Vec2::new(-5.0, 0.0),
    ///     Vec2::new(5.0, 0.0),
    ///     Vec2::new(0.0, 5.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(Vec2::new(4.0, 1.0)), Some(1));
    /// ```
    pub fn new(sites: &[Vec2]) -> Self {
        let points: Vec<[f32; 2]> = sites.iter().map(|s| s.to_array()).collect();

        Self {
            tree: (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points)),
            len: points.len(),
        }
    }

    /// Number of indexed sites
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no site is indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the site nearest to `position`
    ///
    /// Returns `None` when the index is empty.
    pub fn find_nearest(&self, position: Vec2) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        Some(result.item)
    }
}
