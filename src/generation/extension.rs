//! Boundary extension for cells of convex-hull sites
//!
//! A site on the convex hull owns an unbounded Voronoi cell. Its finite
//! Voronoi vertices alone describe only the inner part of that cell, so two
//! synthetic points are pushed out along the unbounded edges (one per hull
//! edge through the site) far enough to leave the clipping rectangle. Three
//! wedge points inside the hull's outward normal cone at the site keep the
//! truncated polygon outside the rectangle between those two rays.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::delaunay::{Connection, Site, Triangulation};
use super::voronoi::VoronoiVertex;
use crate::geometry::{gift_wrap, missing_from_hull};

/// Shape of the face fan around a hull site
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionCase {
    /// One face contributes; both hull edges through the site belong to it
    SingleFace,
    /// Two faces contribute, one hull edge each
    HullEdge,
    /// Three or more faces contribute; the hull faces are at the fan's ends
    Fan,
}

impl ExtensionCase {
    fn from_face_count(count: usize) -> Self {
        match count {
            0 | 1 => ExtensionCase::SingleFace,
            2 => ExtensionCase::HullEdge,
            _ => ExtensionCase::Fan,
        }
    }
}

/// Why a hull cell was left un-extended
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The site has no incident face (all of them were pruned)
    NoFaces,
    /// The site does not touch exactly two hull edges
    UnpairedHullEdges {
        /// Number of hull edges found through the site
        found: usize,
    },
    /// The two hull faces of a fan share an edge
    AdjacentHullFaces,
    /// Extension swallowed some of the original Voronoi vertices
    MissingVertices {
        /// Number of original vertices left strictly inside the polygon
        missing: usize,
    },
    /// No outward direction or no polygon could be formed
    DegenerateHull,
}

/// What happened to a cell during boundary extension
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// The site is not on the convex hull; its cell is already bounded
    Interior,
    /// Synthetic points were added
    Extended {
        /// Fan shape that was extended
        case: ExtensionCase,
        /// Number of rays pushed out along unbounded edges
        rays: usize,
    },
    /// The un-extended vertices were kept
    FellBack {
        /// Why extension was abandoned
        reason: FallbackReason,
    },
}

impl ExtensionOutcome {
    /// Whether the cell fell back to its un-extended vertices
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExtensionOutcome::FellBack { .. })
    }
}

/// A cell polygon after boundary extension, with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryExtension {
    /// Counter-clockwise polygon, or the raw vertices when no hull exists
    pub polygon: Vec<Vec2>,
    /// Extension decision for the cell
    pub outcome: ExtensionOutcome,
}

/// A hull edge through the site with the Voronoi vertex of its face
struct HullRay {
    face: usize,
    vertex: Vec2,
    direction: Vec2,
}

/// Build the (possibly extended) polygon of one site's cell
///
/// # Arguments
///
/// * `site` - The cell's site
/// * `site_faces` - Indices of the faces incident to the site
/// * `triangulation` - Sites and faces the cell was derived from
/// * `vertices` - Voronoi vertices, one per face
/// * `ray_length` - Minimum distance of synthetic points from the site
pub fn extend_cell(
    site: &Site,
    site_faces: &[usize],
    triangulation: &Triangulation,
    vertices: &[VoronoiVertex],
    ray_length: f32,
) -> BoundaryExtension {
    let originals: Vec<Vec2> = site_faces.iter().map(|&f| vertices[f].position).collect();

    if site_faces.is_empty() {
        return fall_back(site, originals, FallbackReason::NoFaces);
    }

    let hull_edges: Vec<&Connection> = site_faces
        .iter()
        .flat_map(|&f| triangulation.faces()[f].empty_connections())
        .filter(|conn| conn.touches(site.index))
        .collect();

    if hull_edges.is_empty() {
        return BoundaryExtension {
            polygon: order_or_raw(originals),
            outcome: ExtensionOutcome::Interior,
        };
    }
    if hull_edges.len() != 2 {
        let reason = FallbackReason::UnpairedHullEdges {
            found: hull_edges.len(),
        };
        return fall_back(site, originals, reason);
    }

    let case = ExtensionCase::from_face_count(site_faces.len());
    if case == ExtensionCase::Fan {
        let (first, second) = (hull_edges[0].owner, hull_edges[1].owner);
        if triangulation.faces()[first].is_adjacent_to(second) {
            return fall_back(site, originals, FallbackReason::AdjacentHullFaces);
        }
    }

    let mut rays = Vec::with_capacity(2);
    for conn in &hull_edges {
        match hull_ray(site, conn, triangulation, vertices) {
            Some(ray) => rays.push(ray),
            None => return fall_back(site, originals, FallbackReason::DegenerateHull),
        }
    }

    let mut candidates = originals.clone();
    for ray in &rays {
        let reach = ray_length + ray.vertex.distance(site.position);
        candidates.push(ray.vertex + ray.direction * reach);
    }

    let interior = interior_direction(site, site_faces, triangulation);
    for direction in wedge_directions(rays[0].direction, rays[1].direction, interior) {
        candidates.push(site.position + direction * ray_length);
    }

    let polygon = match gift_wrap(&candidates) {
        Ok(polygon) => polygon,
        Err(_) => return fall_back(site, originals, FallbackReason::DegenerateHull),
    };

    let missing = missing_from_hull(&polygon, &originals);
    if !missing.is_empty() {
        let reason = FallbackReason::MissingVertices {
            missing: missing.len(),
        };
        return fall_back(site, originals, reason);
    }

    tracing::debug!(
        site = site.index,
        ?case,
        faces = ?rays.iter().map(|ray| ray.face).collect::<Vec<_>>(),
        "extended hull cell"
    );

    BoundaryExtension {
        polygon,
        outcome: ExtensionOutcome::Extended {
            case,
            rays: rays.len(),
        },
    }
}

/// Outward direction of the unbounded Voronoi edge across a hull edge
///
/// The edge's exact perpendicular, oriented away from the incident face. The
/// face centroid only picks the sign, so thin hull triangles keep an exact
/// direction.
fn hull_ray(
    site: &Site,
    conn: &Connection,
    triangulation: &Triangulation,
    vertices: &[VoronoiVertex],
) -> Option<HullRay> {
    let sites = triangulation.sites();
    let face = &triangulation.faces()[conn.owner];

    let [from, to] = conn.endpoints;
    let edge = sites[to].position - sites[from].position;
    let toward_centroid = face.triangle.centroid() - site.position;

    let normal = edge.perp().try_normalize()?;
    let direction = if normal.dot(toward_centroid) > 0.0 {
        -normal
    } else {
        normal
    };
    Some(HullRay {
        face: conn.owner,
        vertex: vertices[conn.owner].position,
        direction,
    })
}

/// Average direction from the site into its incident faces
fn interior_direction(site: &Site, site_faces: &[usize], triangulation: &Triangulation) -> Vec2 {
    let sum: Vec2 = site_faces
        .iter()
        .map(|&f| triangulation.faces()[f].triangle.centroid() - site.position)
        .sum();
    sum.normalize_or_zero()
}

/// Directions spanning the outward normal cone between two hull edge normals
fn wedge_directions(first: Vec2, second: Vec2, interior: Vec2) -> [Vec2; 3] {
    let middle = match (first + second).try_normalize() {
        Some(middle) => middle,
        None => {
            // Opposite normals: the site sits on a straight stretch of hull
            let turned = first.perp();
            if turned.dot(interior) > 0.0 {
                -turned
            } else {
                turned
            }
        }
    };
    [first, middle, second]
}

fn fall_back(site: &Site, originals: Vec<Vec2>, reason: FallbackReason) -> BoundaryExtension {
    tracing::warn!(site = site.index, ?reason, "hull cell not extended, keeping finite vertices");
    BoundaryExtension {
        polygon: order_or_raw(originals),
        outcome: ExtensionOutcome::FellBack { reason },
    }
}

/// Hull-order the points when they form a polygon, otherwise keep them as is
pub(crate) fn order_or_raw(points: Vec<Vec2>) -> Vec<Vec2> {
    if points.len() < 3 {
        return points;
    }
    gift_wrap(&points).unwrap_or(points)
}
