//! Bounded Voronoi cell construction from the Delaunay triangulation
//!
//! Each Delaunay face becomes a Voronoi vertex at its circumcenter. A site's
//! cell is formed by the vertices of its incident faces, extended outward for
//! hull sites, clipped to the bounds and finally completed with the corners of
//! the rectangle.

use glam::Vec2;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::clipping::{clip_polygon, discard_degenerate, repair_corners, CornerAssignment};
use super::delaunay::{
    CocircularPolicy, Connection, Face, Triangulation, TriangulationOptions,
    DEFAULT_COCIRCULAR_POLICY,
};
use super::extension::{extend_cell, ExtensionOutcome, FallbackReason};
use crate::error::{Result, VoronoiError};
use crate::geometry::Bounds;

/// Default ray length as a multiple of the bounds diagonal
pub const DEFAULT_RAY_LENGTH_FACTOR: f32 = 4.0;

/// Circumcenter of a Delaunay face, connected like the face
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiVertex {
    /// Same as the index of the face it came from
    pub index: usize,
    /// Circumcenter of the face
    pub position: Vec2,
    /// The face's edges; non-empty ones lead to adjacent vertices
    pub connections: [Connection; 3],
    /// Whether the circumcenter lies inside its own triangle
    pub inside_face: bool,
}

impl VoronoiVertex {
    /// Indices of adjacent Voronoi vertices
    pub fn neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        self.connections.iter().filter_map(Connection::other_face)
    }

    /// Whether one of the face's edges lies on the convex hull
    pub fn on_hull(&self) -> bool {
        self.connections.iter().any(Connection::is_empty)
    }
}

/// Inputs of [`generate_cells`] besides the sites
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramParams {
    /// Clipping rectangle, centred on the origin
    pub bounds: Bounds,
    /// Minimum distance of synthetic hull points from their site
    ///
    /// Must exceed the bounds diagonal so that every extended cell reaches
    /// past the rectangle.
    pub ray_length: f32,
    /// Faces with a larger circumradius are dropped
    pub max_circumradius: Option<f32>,
    /// Tie-break for exactly co-circular sites
    pub cocircular: CocircularPolicy,
}

impl DiagramParams {
    /// Parameters for a rectangle of the given size with default settings
    pub fn new(width: f32, height: f32) -> Self {
        let bounds = Bounds::new(width, height);
        Self {
            bounds,
            ray_length: bounds.diagonal() * DEFAULT_RAY_LENGTH_FACTOR,
            max_circumradius: None,
            cocircular: DEFAULT_COCIRCULAR_POLICY,
        }
    }

    /// Check the parameters before any computation
    ///
    /// # Errors
    ///
    /// [`VoronoiError::InvalidConfig`] for non-positive dimensions, a ray
    /// length not exceeding the diagonal or a non-positive circumradius limit.
    pub fn validate(&self) -> Result<()> {
        let bounds = &self.bounds;
        if !(bounds.half_width.is_finite() && bounds.half_width > 0.0) {
            return Err(VoronoiError::InvalidConfig(format!(
                "width must be positive, got {}",
                bounds.width()
            )));
        }
        if !(bounds.half_height.is_finite() && bounds.half_height > 0.0) {
            return Err(VoronoiError::InvalidConfig(format!(
                "height must be positive, got {}",
                bounds.height()
            )));
        }
        if !(self.ray_length.is_finite() && self.ray_length > bounds.diagonal()) {
            return Err(VoronoiError::InvalidConfig(format!(
                "ray length {} must exceed the bounds diagonal {}",
                self.ray_length,
                bounds.diagonal()
            )));
        }
        if let Some(limit) = self.max_circumradius {
            if limit.is_nan() || limit <= 0.0 {
                return Err(VoronoiError::InvalidConfig(format!(
                    "max circumradius must be positive, got {limit}"
                )));
            }
        }
        Ok(())
    }

    fn triangulation_options(&self) -> TriangulationOptions {
        TriangulationOptions {
            max_circumradius: self.max_circumradius,
            cocircular: self.cocircular,
        }
    }
}

/// A Voronoi cell without map-level data (geometry only)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RawCell {
    /// Index of the cell's site
    pub id: usize,
    /// Site position
    pub center: Vec2,
    /// Indices of Delaunay-adjacent sites, sorted
    pub neighbors: Vec<usize>,
    /// Polygon ordered counter-clockwise; empty for degenerate cells
    pub vertices: Vec<Vec2>,
    /// Whether any face feeding the cell touches the convex hull
    pub is_boundary: bool,
}

/// Per-pass record of the decisions taken while building cells
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagramReport {
    /// Boundary extension outcome, one per cell
    pub extensions: Vec<ExtensionOutcome>,
    /// Which cell received each rectangle corner
    pub corners: Vec<CornerAssignment>,
    /// Cells left with an empty polygon
    pub empty_cells: Vec<usize>,
}

impl DiagramReport {
    /// Cells whose extension fell back, with the reason
    pub fn fallbacks(&self) -> impl Iterator<Item = (usize, FallbackReason)> + '_ {
        self.extensions
            .iter()
            .enumerate()
            .filter_map(|(cell, outcome)| match outcome {
                ExtensionOutcome::FellBack { reason } => Some((cell, *reason)),
                _ => None,
            })
    }
}

/// Everything produced by one pass of [`generate_cells`]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDiagram {
    /// Sites and Delaunay faces
    pub triangulation: Triangulation,
    /// One vertex per face
    pub vertices: Vec<VoronoiVertex>,
    /// One cell per site, or none when no face exists
    pub cells: Vec<RawCell>,
    /// Extension and corner decisions
    pub report: DiagramReport,
}

impl RawDiagram {
    /// Whether the diagram has no cells
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Generate bounded Voronoi cells from a set of sites
///
/// This is the main entry point for cell construction. Fewer than 3 sites, or
/// sites without any Delaunay face (all collinear), give an empty diagram
/// rather than an error.
///
/// # Arguments
///
/// * `points` - Site positions; indices become cell IDs
/// * `params` - Bounds, ray length and triangulation settings
///
/// # Errors
///
/// - [`VoronoiError::InvalidConfig`] when `params` fail validation
/// - [`VoronoiError::InvalidSite`] / [`VoronoiError::DuplicateSite`] for bad sites
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use voronoi_map::generation::{generate_cells, DiagramParams};
///
/// let sites = [
///     Vec2::new(-1.0, -1.0),
///     Vec2::new(1.0, -1.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(-1.0, 1.0),
/// ];
/// let diagram = generate_cells(&sites, &DiagramParams::new(4.0, 4.0)).unwrap();
///
/// assert_eq!(diagram.cells.len(), 4);
/// assert_eq!(diagram.triangulation.faces().len(), 2);
/// ```
pub fn generate_cells(points: &[Vec2], params: &DiagramParams) -> Result<RawDiagram> {
    params.validate()?;
    let start = Instant::now();

    let triangulation = Triangulation::new(points, params.triangulation_options())?;
    if triangulation.is_empty() {
        tracing::debug!(sites = points.len(), "no Delaunay faces, diagram is empty");
        return Ok(RawDiagram {
            triangulation,
            ..Default::default()
        });
    }

    let vertices = build_vertices(triangulation.faces());
    let site_faces = faces_per_site(&triangulation);

    let mut extensions = Vec::with_capacity(points.len());
    let mut polygons = Vec::with_capacity(points.len());
    for site in triangulation.sites() {
        let faces = &site_faces[site.index];
        let extended = extend_cell(site, faces, &triangulation, &vertices, params.ray_length);
        polygons.push(clip_polygon(&extended.polygon, &params.bounds));
        extensions.push(extended.outcome);
    }

    let centers: Vec<Vec2> = triangulation.sites().iter().map(|s| s.position).collect();
    let corners = repair_corners(&mut polygons, &centers, &params.bounds);
    let empty_cells = discard_degenerate(&mut polygons);

    let cells: Vec<RawCell> = triangulation
        .sites()
        .iter()
        .zip(polygons)
        .map(|(site, polygon)| RawCell {
            id: site.index,
            center: site.position,
            neighbors: site.neighbors.clone(),
            vertices: polygon,
            is_boundary: site_faces[site.index]
                .iter()
                .any(|&f| vertices[f].on_hull()),
        })
        .collect();

    let report = DiagramReport {
        extensions,
        corners,
        empty_cells,
    };

    tracing::debug!(
        cells = cells.len(),
        vertices = vertices.len(),
        fallbacks = report.fallbacks().count(),
        empty = report.empty_cells.len(),
        elapsed = ?start.elapsed(),
        "voronoi cells generated"
    );

    Ok(RawDiagram {
        triangulation,
        vertices,
        cells,
        report,
    })
}

/// One Voronoi vertex per face, at its circumcenter
pub fn build_vertices(faces: &[Face]) -> Vec<VoronoiVertex> {
    faces
        .iter()
        .map(|face| {
            // Accepted faces are never collinear, the centroid only guards the type
            let position = face
                .triangle
                .circumcenter()
                .unwrap_or_else(|| face.triangle.centroid());
            VoronoiVertex {
                index: face.index,
                position,
                connections: face.connections,
                inside_face: face.triangle.contains_point(position),
            }
        })
        .collect()
}

/// Incident face indices for every site, in face order
fn faces_per_site(triangulation: &Triangulation) -> Vec<Vec<usize>> {
    let mut map = vec![Vec::new(); triangulation.sites().len()];
    for face in triangulation.faces() {
        for &site in &face.sites {
            map[site].push(face.index);
        }
    }
    map
}
