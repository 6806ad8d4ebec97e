//! VoronoiMap main structure

use glam::Vec2;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::cell::VoronoiCell;
use crate::config::MapConfig;
use crate::error::{Result, VoronoiError};
use crate::generation::{
    generate_cells, generate_sites, DiagramParams, DiagramReport, Triangulation, VoronoiVertex,
};
use crate::geometry::Bounds;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A bounded Voronoi map over a rectangle
///
/// Stores the sites, the Delaunay triangulation they produced, the Voronoi
/// vertices and one clipped cell per site, for queries and pathfinding.
///
/// # Examples
///
/// ```
/// use voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Tiny)
///     .build()
///     .unwrap();
///
/// let map = VoronoiMap::generate(config).unwrap();
/// assert_eq!(map.cell_count(), 12);
///
/// // Cells tile the rectangle
/// let total: f32 = map.cells().iter().map(|c| c.area()).sum();
/// assert!((total - map.bounds().area()).abs() < 0.01);
/// ```
#[derive(Clone)]
pub struct VoronoiMap {
    /// Configuration used to generate this map
    config: MapConfig,

    /// Site positions, indexed by cell ID
    sites: Vec<Vec2>,

    /// Delaunay triangulation of the sites
    triangulation: Triangulation,

    /// Voronoi vertices, one per Delaunay face
    vertices: Vec<VoronoiVertex>,

    /// All cells (indexed by cell ID)
    cells: Vec<VoronoiCell>,

    /// Extension and corner decisions of the last pass
    report: DiagramReport,

    /// Spatial index for fast position-to-cell lookups (requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl VoronoiMap {
    /// Generate a map from configuration
    ///
    /// Places sites according to the configured distribution, relaxes them
    /// with Lloyd's algorithm and builds the cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is invalid, or any error
    /// from cell generation.
    pub fn generate(config: MapConfig) -> Result<Self> {
        let sites = generate_sites(&config)?;
        Self::build(sites, config)
    }

    /// Build a map from explicit sites
    ///
    /// The configuration supplies the rectangle and diagram settings; its
    /// seed, distribution and Lloyd settings are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_map::*;
    /// use glam::Vec2;
    ///
    /// let config = MapConfigBuilder::new()
    ///     .map_size(MapSize::Custom { site_count: 4, width: 4.0, height: 4.0 })
    ///     .build()
    ///     .unwrap();
    /// let sites = vec![
    ///     Vec2::new(-1.0, -1.0),
    ///     Vec2::new(1.0, -1.0),
    ///     Vec2::new(1.0, 1.0),
    ///     Vec2::new(-1.0, 1.0),
    /// ];
    ///
    /// let map = VoronoiMap::from_sites(sites, config).unwrap();
    /// assert!((map.get_cell(0).unwrap().area() - 4.0).abs() < 1e-4);
    /// ```
    pub fn from_sites(sites: Vec<Vec2>, config: MapConfig) -> Result<Self> {
        Self::build(sites, config)
    }

    fn build(sites: Vec<Vec2>, config: MapConfig) -> Result<Self> {
        let diagram = generate_cells(&sites, &config.diagram_params())?;

        let cells: Vec<VoronoiCell> = diagram.cells.into_iter().map(VoronoiCell::from).collect();

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Vec2> = cells.iter().map(|c| c.center).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            sites,
            triangulation: diagram.triangulation,
            vertices: diagram.vertices,
            cells,
            report: diagram.report,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to generate this map
    #[inline]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Parameters the cells were built with
    #[inline]
    pub fn diagram_params(&self) -> DiagramParams {
        self.config.diagram_params()
    }

    /// The map rectangle
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    /// Site positions, indexed by cell ID
    #[inline]
    pub fn sites(&self) -> &[Vec2] {
        &self.sites
    }

    /// Delaunay triangulation of the sites
    #[inline]
    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    /// Voronoi vertices (circumcenters of the Delaunay faces)
    #[inline]
    pub fn voronoi_vertices(&self) -> &[VoronoiVertex] {
        &self.vertices
    }

    /// Boundary extension and corner decisions
    #[inline]
    pub fn report(&self) -> &DiagramReport {
        &self.report
    }

    /// Get the number of cells on this map
    ///
    /// Zero when the sites produced no diagram (fewer than 3, or collinear).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the map has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by ID
    ///
    /// Returns `None` if the cell ID is out of bounds.
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// Get all cells as a slice
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Get neighbor IDs for a cell
    ///
    /// Returns empty slice if cell ID is invalid.
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbors.as_slice())
            .unwrap_or(&[])
    }

    /// Find the cell containing a position (requires spatial-index feature)
    ///
    /// Uses the KD-tree for an O(log n) nearest-site lookup. Returns `None`
    /// for positions outside the map rectangle or when the map is empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_map::*;
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let config = MapConfigBuilder::new().seed(7).map_size(MapSize::Tiny).build().unwrap();
    /// let map = VoronoiMap::generate(config).unwrap();
    ///
    /// let center = map.get_cell(3).unwrap().center;
    /// assert_eq!(map.find_cell_at(center), Some(3));
    /// # }
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: Vec2) -> Option<usize> {
        if !self.bounds().contains(position) {
            return None;
        }
        self.spatial_index.find_nearest(position)
    }

    /// Find cells within a given hop count from a center cell (BFS)
    ///
    /// # Arguments
    ///
    /// * `center_id` - Starting cell ID
    /// * `hops` - Maximum number of cell hops (0 = just the center cell)
    ///
    /// # Returns
    ///
    /// Cell IDs within reach, including the center cell, in visiting order.
    /// Returns empty vec if center_id is invalid.
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.cells.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut found = vec![center_id];
        let mut current = vec![center_id];
        visited.insert(center_id);

        // BFS with hop limit
        for _ in 0..hops {
            let mut next = Vec::new();
            for &cell_id in &current {
                for &neighbor in self.get_neighbors(cell_id) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            found.extend_from_slice(&next);
            current = next;
        }

        found
    }

    /// Shortest path between two cells over the neighbour graph (A*)
    ///
    /// Edge costs are the distances between neighbouring sites; the heuristic
    /// is the straight-line distance to the goal, which never overestimates.
    ///
    /// # Returns
    ///
    /// Cell IDs from `start` to `goal` inclusive, or `None` when the goal is
    /// unreachable.
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if either ID is invalid.
    pub fn find_path(&self, start: usize, goal: usize) -> Result<Option<Vec<usize>>> {
        let goal_center = self
            .cells
            .get(goal)
            .map(|c| c.center)
            .ok_or(VoronoiError::CellNotFound(goal))?;
        if start >= self.cells.len() {
            return Err(VoronoiError::CellNotFound(start));
        }

        let mut cost = vec![f32::INFINITY; self.cells.len()];
        let mut came_from: Vec<Option<usize>> = vec![None; self.cells.len()];
        let mut frontier = BinaryHeap::new();

        cost[start] = 0.0;
        frontier.push(Frontier {
            estimate: self.cells[start].center.distance(goal_center),
            cell: start,
        });

        while let Some(Frontier { cell, estimate }) = frontier.pop() {
            if cell == goal {
                return Ok(Some(reconstruct_path(&came_from, goal)));
            }
            // Stale entry, a cheaper route was queued later
            if estimate > cost[cell] + self.cells[cell].center.distance(goal_center) {
                continue;
            }

            for &next in self.get_neighbors(cell) {
                let step = self.cells[cell].distance_to(&self.cells[next]);
                let tentative = cost[cell] + step;
                if tentative < cost[next] {
                    cost[next] = tentative;
                    came_from[next] = Some(cell);
                    frontier.push(Frontier {
                        estimate: tentative + self.cells[next].center.distance(goal_center),
                        cell: next,
                    });
                }
            }
        }

        Ok(None)
    }
}

/// Open-set entry ordered so the heap pops the lowest estimate first
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    estimate: f32,
    cell: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn reconstruct_path(came_from: &[Option<usize>], goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = came_from[current] {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapConfigBuilder, MapSize};

    fn tiny_map(seed: u32) -> VoronoiMap {
        let config = MapConfigBuilder::new()
            .seed(seed)
            .map_size(MapSize::Tiny)
            .build()
            .unwrap();
        VoronoiMap::generate(config).unwrap()
    }

    #[test]
    fn test_map_generation() {
        let map = tiny_map(42);

        assert_eq!(map.cell_count(), 12);
        assert_eq!(map.sites().len(), 12);
        assert_eq!(map.voronoi_vertices().len(), map.triangulation().faces().len());

        let total: f32 = map.cells().iter().map(VoronoiCell::area).sum();
        assert!((total - 100.0).abs() < 0.01, "total area {total}");
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = tiny_map(7);
        let b = tiny_map(7);
        assert_eq!(a.sites(), b.sites());
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn test_get_cell() {
        let map = tiny_map(42);

        assert!(map.get_cell(0).is_some());
        assert!(map.get_cell(map.cell_count()).is_none());
    }

    #[test]
    fn test_get_neighbors() {
        let map = tiny_map(42);

        for cell in map.cells() {
            let neighbors = map.get_neighbors(cell.id);
            assert!(!neighbors.is_empty());
            for &n in neighbors {
                assert!(map.get_neighbors(n).contains(&cell.id));
            }
        }
    }

    #[test]
    fn test_invalid_cell_id() {
        let map = tiny_map(42);

        assert!(map.get_neighbors(999_999).is_empty());
        assert!(map.find_cells_within_radius(999_999, 5).is_empty());
        assert_eq!(map.find_path(0, 999_999), Err(VoronoiError::CellNotFound(999_999)));
        assert_eq!(map.find_path(999_999, 0), Err(VoronoiError::CellNotFound(999_999)));
    }

    #[test]
    fn test_find_cells_within_radius() {
        let map = tiny_map(42);

        let cells_r0 = map.find_cells_within_radius(0, 0);
        assert_eq!(cells_r0, vec![0]);

        let cells_r1 = map.find_cells_within_radius(0, 1);
        assert_eq!(cells_r1.len(), 1 + map.get_neighbors(0).len());

        // The neighbour graph is connected, so enough hops reach everything
        let all = map.find_cells_within_radius(0, map.cell_count());
        assert_eq!(all.len(), map.cell_count());
    }

    #[test]
    fn test_find_path() {
        let map = tiny_map(42);

        assert_eq!(map.find_path(3, 3).unwrap(), Some(vec![3]));

        let last = map.cell_count() - 1;
        let path = map.find_path(0, last).unwrap().unwrap();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&last));
        for pair in path.windows(2) {
            assert!(map.get_cell(pair[0]).unwrap().is_neighbor_of(pair[1]));
        }

        let first_neighbor = map.get_neighbors(0)[0];
        assert_eq!(map.find_path(0, first_neighbor).unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_too_few_sites_give_empty_map() {
        let config = MapConfigBuilder::new().map_size(MapSize::Tiny).build().unwrap();
        let map = VoronoiMap::from_sites(vec![Vec2::ZERO], config).unwrap();

        assert!(map.is_empty());
        assert_eq!(map.cell_count(), 0);
        assert!(map.find_cells_within_radius(0, 1).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let map = tiny_map(42);

        for cell in map.cells() {
            assert_eq!(map.find_cell_at(cell.center), Some(cell.id));
            if let Some(centroid) = cell.centroid() {
                assert_eq!(map.find_cell_at(centroid), Some(cell.id));
            }
        }
        assert_eq!(map.find_cell_at(Vec2::new(100.0, 0.0)), None);
    }
}
