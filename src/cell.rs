//! Voronoi Cell Structure
//!
//! Represents an individual bounded cell of the map with its neighbours and
//! polygon.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::generation::RawCell;
use crate::geometry::{is_convex_ccw, polygon_area, polygon_centroid, polygon_contains};

/// A single Voronoi cell of the map
///
/// Each cell represents the region of the rectangle closer to its site than
/// to any other site:
/// - A unique ID (the index of its site)
/// - The site position
/// - Neighbour connectivity for pathfinding
/// - A counter-clockwise polygon for rendering and hit testing
///
/// # Design Notes
///
/// Cells are regenerated from `MapConfig` (or the site list) rather than
/// edited in place; all relations are plain indices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Unique identifier for this cell (0 to cell_count-1)
    ///
    /// Equal to the index of the cell's site in the input.
    pub id: usize,

    /// Site position of the cell
    pub center: Vec2,

    /// IDs of adjacent cells (Delaunay neighbours of the site), sorted
    ///
    /// Used for:
    /// - A* pathfinding (graph edges)
    /// - Flood-fill and radius queries
    pub neighbors: Vec<usize>,

    /// Polygon of the cell clipped to the map rectangle
    ///
    /// Ordered counter-clockwise. Empty when the cell degenerated.
    pub vertices: Vec<Vec2>,

    /// Whether the cell touches the convex hull of the sites
    pub is_boundary: bool,
}

impl VoronoiCell {
    /// Create a new Voronoi cell
    ///
    /// This is typically called during map generation, not by user code.
    pub fn new(
        id: usize,
        center: Vec2,
        neighbors: Vec<usize>,
        vertices: Vec<Vec2>,
        is_boundary: bool,
    ) -> Self {
        Self {
            id,
            center,
            neighbors,
            vertices,
            is_boundary,
        }
    }

    /// Get the number of neighboring cells
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Check if this cell is a neighbor of another cell
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbors.binary_search(&other_cell_id).is_ok()
    }

    /// Get the vertex count (polygon complexity)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the cell has no polygon
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Area of the cell polygon (shoelace formula)
    pub fn area(&self) -> f32 {
        polygon_area(&self.vertices)
    }

    /// Area centroid of the polygon
    ///
    /// Differs from `center` unless the sites are relaxed. `None` for an
    /// empty cell.
    pub fn centroid(&self) -> Option<Vec2> {
        polygon_centroid(&self.vertices)
    }

    /// Whether a position lies inside or on the cell polygon
    pub fn contains_point(&self, position: Vec2) -> bool {
        polygon_contains(&self.vertices, position)
    }

    /// Whether the polygon is convex and counter-clockwise
    pub fn is_convex(&self) -> bool {
        is_convex_ccw(&self.vertices)
    }

    /// Euclidean distance between the two cells' sites
    #[inline]
    pub fn distance_to(&self, other: &VoronoiCell) -> f32 {
        self.center.distance(other.center)
    }
}

impl From<RawCell> for VoronoiCell {
    fn from(raw: RawCell) -> Self {
        Self::new(raw.id, raw.center, raw.neighbors, raw.vertices, raw.is_boundary)
    }
}
