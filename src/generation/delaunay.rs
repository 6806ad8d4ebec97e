//! Brute-force Delaunay triangulation
//!
//! Every unordered triple of sites is a candidate triangle. A candidate is kept
//! when no other site lies inside its circumcircle, decided with the lifted
//! (paraboloid) determinant. Adjacency between the kept faces is then resolved
//! edge by edge. O(N⁴) overall, which limits practical inputs to a few hundred
//! sites; the rest of the pipeline only depends on the [`Face`]/[`Connection`]
//! model, not on how the faces were found.

use glam::{DVec2, DVec3, Vec2};
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::geometry::{Triangle, Winding};

/// How a site lying exactly on a candidate's circumcircle is treated
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CocircularPolicy {
    /// Reject the candidate triangle
    ///
    /// Four co-circular sites then produce no faces at all.
    Reject,
    /// Break the tie by symbolically lifting lower-indexed sites higher
    ///
    /// Exactly one consistent diagonal of a co-circular quad survives.
    Perturb,
}

/// Tie-break used unless configured otherwise
pub const DEFAULT_COCIRCULAR_POLICY: CocircularPolicy = CocircularPolicy::Perturb;

impl Default for CocircularPolicy {
    fn default() -> Self {
        DEFAULT_COCIRCULAR_POLICY
    }
}

/// Knobs for [`Triangulation::new`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TriangulationOptions {
    /// Faces whose circumradius exceeds this are dropped
    pub max_circumradius: Option<f32>,
    /// Tie-break for exactly co-circular sites
    pub cocircular: CocircularPolicy,
}

/// An input point with a stable index and its Delaunay neighbours
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    /// Index of the site in the input slice
    pub index: usize,
    /// Position of the site
    pub position: Vec2,
    /// Indices of sites sharing a Delaunay edge with this one, sorted
    pub neighbors: Vec<usize>,
}

/// Edge of a face, linked to the face across it
///
/// A connection whose `other` face equals its `owner` is empty: the edge lies
/// on the convex hull and nothing is on the other side.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Face this connection belongs to
    pub owner: usize,
    /// Site indices at both ends of the edge
    pub endpoints: [usize; 2],
    /// Face sharing the edge, or `owner` when there is none
    pub other: usize,
}

impl Connection {
    fn new(owner: usize, from: usize, to: usize) -> Self {
        Self {
            owner,
            endpoints: [from, to],
            other: owner,
        }
    }

    /// Whether the edge has no face on its other side
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.other == self.owner
    }

    /// The face across the edge, if any
    #[inline]
    pub fn other_face(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.other)
    }

    /// Whether the edge has `site` as one of its endpoints
    #[inline]
    pub fn touches(&self, site: usize) -> bool {
        self.endpoints.contains(&site)
    }

    /// The endpoint that is not `site`
    pub fn opposite(&self, site: usize) -> Option<usize> {
        match self.endpoints {
            [a, b] if a == site => Some(b),
            [a, b] if b == site => Some(a),
            _ => None,
        }
    }

    /// Whether both connections describe the same edge, in either direction
    #[inline]
    pub fn same_edge(&self, other: &Connection) -> bool {
        let [a, b] = self.endpoints;
        other.endpoints == [a, b] || other.endpoints == [b, a]
    }
}

/// A Delaunay triangle with its three edge connections
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Index of the face in the triangulation
    pub index: usize,
    /// Corner site indices
    pub sites: [usize; 3],
    /// Corner positions
    pub triangle: Triangle,
    /// Edges A–B, B–C, C–A
    pub connections: [Connection; 3],
}

impl Face {
    fn new(index: usize, sites: [usize; 3], triangle: Triangle) -> Self {
        let [a, b, c] = sites;
        Self {
            index,
            sites,
            triangle,
            connections: [
                Connection::new(index, a, b),
                Connection::new(index, b, c),
                Connection::new(index, c, a),
            ],
        }
    }

    /// Whether `site` is one of the corners
    #[inline]
    pub fn has_site(&self, site: usize) -> bool {
        self.sites.contains(&site)
    }

    /// Whether the face shares an edge with face `other`
    pub fn is_adjacent_to(&self, other: usize) -> bool {
        self.connections.iter().any(|c| c.other_face() == Some(other))
    }

    /// Indices of faces across non-empty edges
    pub fn neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        self.connections.iter().filter_map(Connection::other_face)
    }

    /// Edges lying on the convex hull
    pub fn empty_connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter().filter(|c| c.is_empty())
    }
}

/// Sites and Delaunay faces of a point set
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    sites: Vec<Site>,
    faces: Vec<Face>,
}

impl Triangulation {
    /// Triangulate a point set
    ///
    /// Fewer than 3 points produce sites but no faces, as do point sets that
    /// are entirely collinear. Callers treat an empty face set as "no diagram".
    ///
    /// # Errors
    ///
    /// - [`VoronoiError::InvalidSite`] for non-finite coordinates
    /// - [`VoronoiError::DuplicateSite`] when two points coincide
    pub fn new(points: &[Vec2], options: TriangulationOptions) -> Result<Self> {
        validate_points(points)?;

        let start = Instant::now();
        let mut sites: Vec<Site> = points
            .iter()
            .enumerate()
            .map(|(index, &position)| Site {
                index,
                position,
                neighbors: Vec::new(),
            })
            .collect();

        let mut faces = find_faces(&sites, options);
        resolve_adjacency(&mut faces);
        link_site_neighbors(&mut sites, &faces);

        tracing::debug!(
            sites = sites.len(),
            faces = faces.len(),
            elapsed = ?start.elapsed(),
            "triangulation finished"
        );

        Ok(Self { sites, faces })
    }

    /// All sites, indexed by input order
    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// All accepted faces, indexed by face index
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Whether no face was produced
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Indices of faces that have `site` as a corner
    pub fn faces_of_site(&self, site: usize) -> Vec<usize> {
        self.faces
            .iter()
            .filter(|face| face.has_site(site))
            .map(|face| face.index)
            .collect()
    }
}

/// Whether `point` lies strictly outside the triangle's circumcircle
///
/// `indices` are the site indices of the triangle corners followed by the
/// tested point; they only matter for the [`CocircularPolicy::Perturb`]
/// tie-break. Collinear triangles are never accepted.
pub fn is_delaunay_triangle(
    triangle: &Triangle,
    point: Vec2,
    indices: [usize; 4],
    policy: CocircularPolicy,
) -> bool {
    let winding = triangle.winding();
    if winding == Winding::Collinear {
        return false;
    }

    let d = point.as_dvec2();
    let (a, b, c) = (
        triangle.a.as_dvec2(),
        triangle.b.as_dvec2(),
        triangle.c.as_dvec2(),
    );

    let determinant = lift(a, d).dot(lift(b, d).cross(lift(c, d)));
    let sign = if determinant != 0.0 {
        determinant.signum()
    } else {
        match policy {
            CocircularPolicy::Reject => return false,
            CocircularPolicy::Perturb => perturbed_sign(a, b, c, d, indices),
        }
    };

    match winding {
        Winding::Clockwise => sign > 0.0,
        Winding::CounterClockwise => sign < 0.0,
        Winding::Collinear => false,
    }
}

/// Row of the in-circle determinant for a triangle corner relative to `d`
fn lift(corner: DVec2, d: DVec2) -> DVec3 {
    let relative = corner - d;
    DVec3::new(relative.x, relative.y, relative.length_squared())
}

/// Sign of the in-circle determinant after raising each site's lifted height
/// by an infinitesimal that shrinks with the site index
///
/// Raising a triangle corner adds its cofactor, raising the tested point
/// subtracts twice the triangle's signed area. The lowest-indexed site with a
/// non-zero coefficient dominates.
fn perturbed_sign(a: DVec2, b: DVec2, c: DVec2, d: DVec2, indices: [usize; 4]) -> f64 {
    let coefficients = [
        (b - d).perp_dot(c - d),
        (c - d).perp_dot(a - d),
        (a - d).perp_dot(b - d),
        -(b - a).perp_dot(c - a),
    ];

    let mut order = [0usize, 1, 2, 3];
    order.sort_by_key(|&slot| indices[slot]);

    order
        .iter()
        .map(|&slot| coefficients[slot])
        .find(|&coefficient| coefficient != 0.0)
        .map_or(0.0, f64::signum)
}

fn validate_points(points: &[Vec2]) -> Result<()> {
    for (index, point) in points.iter().enumerate() {
        if !point.is_finite() {
            return Err(VoronoiError::InvalidSite {
                index,
                reason: format!("non-finite coordinate {point}"),
            });
        }
    }

    for first in 0..points.len() {
        for second in first + 1..points.len() {
            if points[first] == points[second] {
                return Err(VoronoiError::DuplicateSite { first, second });
            }
        }
    }

    Ok(())
}

fn find_faces(sites: &[Site], options: TriangulationOptions) -> Vec<Face> {
    let n = sites.len();
    let mut faces = Vec::new();
    if n < 3 {
        return faces;
    }

    for a in 0..n - 2 {
        for b in a + 1..n - 1 {
            for c in b + 1..n {
                let triangle =
                    Triangle::new(sites[a].position, sites[b].position, sites[c].position);

                let accepted = sites
                    .iter()
                    .filter(|site| site.index != a && site.index != b && site.index != c)
                    .all(|site| {
                        is_delaunay_triangle(
                            &triangle,
                            site.position,
                            [a, b, c, site.index],
                            options.cocircular,
                        )
                    });

                // With exactly three sites there is nothing to test against
                if !accepted || triangle.winding() == Winding::Collinear {
                    continue;
                }

                if let Some(limit) = options.max_circumradius {
                    if triangle.circumradius() > limit {
                        continue;
                    }
                }

                faces.push(Face::new(faces.len(), [a, b, c], triangle));
            }
        }
    }

    faces
}

fn resolve_adjacency(faces: &mut [Face]) {
    let mut links = Vec::new();

    for i in 0..faces.len() {
        for j in i + 1..faces.len() {
            for (edge_i, conn_i) in faces[i].connections.iter().enumerate() {
                for (edge_j, conn_j) in faces[j].connections.iter().enumerate() {
                    if conn_i.same_edge(conn_j) {
                        links.push((i, edge_i, j, edge_j));
                    }
                }
            }
        }
    }

    for (i, edge_i, j, edge_j) in links {
        if !faces[i].connections[edge_i].is_empty() || !faces[j].connections[edge_j].is_empty() {
            tracing::warn!(
                face_a = i,
                face_b = j,
                "edge shared by more than two faces, keeping the last link"
            );
        }
        faces[i].connections[edge_i].other = j;
        faces[j].connections[edge_j].other = i;
    }
}

fn link_site_neighbors(sites: &mut [Site], faces: &[Face]) {
    for face in faces {
        for &site in &face.sites {
            for &other in &face.sites {
                if other != site {
                    sites[site].neighbors.push(other);
                }
            }
        }
    }

    for site in sites.iter_mut() {
        site.neighbors.sort_unstable();
        site.neighbors.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn test_single_triangle() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(1.0, 2.0)];
        let tri = Triangulation::new(&points, TriangulationOptions::default()).unwrap();

        assert_eq!(tri.faces().len(), 1);
        let face = &tri.faces()[0];
        assert_eq!(face.sites, [0, 1, 2]);
        assert!(face.connections.iter().all(Connection::is_empty));
        assert_eq!(tri.sites()[0].neighbors, vec![1, 2]);
    }

    #[test]
    fn test_square_perturbed_yields_one_diagonal() {
        let tri = Triangulation::new(&square(), TriangulationOptions::default()).unwrap();

        assert_eq!(tri.faces().len(), 2);
        let [first, second] = [&tri.faces()[0], &tri.faces()[1]];

        // Shared diagonal between sites 1 and 3
        assert!(first.has_site(1) && first.has_site(3));
        assert!(second.has_site(1) && second.has_site(3));
        assert!(first.is_adjacent_to(second.index));
        assert!(second.is_adjacent_to(first.index));
        assert_eq!(first.empty_connections().count(), 2);
        assert_eq!(second.empty_connections().count(), 2);
    }

    #[test]
    fn test_square_rejected_when_cocircular_ties_reject() {
        let options = TriangulationOptions {
            cocircular: CocircularPolicy::Reject,
            ..Default::default()
        };
        let tri = Triangulation::new(&square(), options).unwrap();
        assert!(tri.is_empty());
    }

    #[test]
    fn test_default_policy_is_perturb() {
        assert_eq!(DEFAULT_COCIRCULAR_POLICY, CocircularPolicy::Perturb);
        assert_eq!(CocircularPolicy::default(), CocircularPolicy::Perturb);
    }

    #[test]
    fn test_collinear_points_have_no_faces() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        let tri = Triangulation::new(&points, TriangulationOptions::default()).unwrap();
        assert!(tri.is_empty());
        assert_eq!(tri.sites().len(), 3);
    }

    #[test]
    fn test_too_few_points() {
        let tri = Triangulation::new(&[Vec2::ZERO], TriangulationOptions::default()).unwrap();
        assert!(tri.is_empty());
        assert_eq!(tri.sites().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_points() {
        let duplicate = vec![Vec2::ZERO, Vec2::ONE, Vec2::ZERO];
        assert_eq!(
            Triangulation::new(&duplicate, TriangulationOptions::default()),
            Err(VoronoiError::DuplicateSite { first: 0, second: 2 })
        );

        let non_finite = vec![Vec2::ZERO, Vec2::new(f32::NAN, 1.0), Vec2::ONE];
        assert!(matches!(
            Triangulation::new(&non_finite, TriangulationOptions::default()),
            Err(VoronoiError::InvalidSite { index: 1, .. })
        ));
    }

    #[test]
    fn test_in_circle_test() {
        let ccw = Triangle::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0));
        let cw = Triangle::new(ccw.a, ccw.c, ccw.b);
        let policy = CocircularPolicy::Reject;

        for tri in [ccw, cw] {
            assert!(!is_delaunay_triangle(&tri, Vec2::new(1.0, 1.0), [0, 1, 2, 3], policy));
            assert!(is_delaunay_triangle(&tri, Vec2::new(5.0, 5.0), [0, 1, 2, 3], policy));
            // (2, 2) lies exactly on the circumcircle
            assert!(!is_delaunay_triangle(&tri, Vec2::new(2.0, 2.0), [0, 1, 2, 3], policy));
        }
    }

    #[test]
    fn test_neighbor_symmetry_and_delaunay_property() {
        let points = vec![
            Vec2::new(-3.1, -2.2),
            Vec2::new(2.4, -3.0),
            Vec2::new(3.3, 2.1),
            Vec2::new(-2.6, 3.4),
            Vec2::new(0.2, 0.4),
            Vec2::new(1.7, -0.8),
            Vec2::new(-1.2, 1.1),
        ];
        let tri = Triangulation::new(&points, TriangulationOptions::default()).unwrap();
        assert!(!tri.is_empty());

        for site in tri.sites() {
            for &neighbor in &site.neighbors {
                assert!(tri.sites()[neighbor].neighbors.contains(&site.index));
            }
        }

        for face in tri.faces() {
            let center = face.triangle.circumcenter().unwrap();
            let radius = face.triangle.circumradius();
            for site in tri.sites() {
                if !face.has_site(site.index) {
                    assert!(site.position.distance(center) > radius - 1e-4);
                }
            }
        }

        // Euler: interior edges are shared by exactly two faces
        for face in tri.faces() {
            for conn in &face.connections {
                if let Some(other) = conn.other_face() {
                    assert!(tri.faces()[other].is_adjacent_to(face.index));
                }
            }
        }
    }

    #[test]
    fn test_max_circumradius_prunes_faces() {
        let points = vec![
            Vec2::new(-4.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(0.0, 0.3),
            Vec2::new(0.0, 3.0),
        ];
        let all = Triangulation::new(&points, TriangulationOptions::default()).unwrap();
        let pruned = Triangulation::new(
            &points,
            TriangulationOptions {
                max_circumradius: Some(5.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(pruned.faces().len() < all.faces().len());
        for face in pruned.faces() {
            assert!(face.triangle.circumradius() <= 5.0);
        }
    }
}
