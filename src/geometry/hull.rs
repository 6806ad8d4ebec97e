//! Convex hull ordering (gift wrapping)

use glam::Vec2;

use super::{dedup_points, orientation, Orientation, POINT_EPSILON};
use crate::error::{Result, VoronoiError};

/// Order a point set counter-clockwise along its convex hull
///
/// Jarvis march: starts at the leftmost point (lowest y on ties, so the start
/// is always a hull vertex) and repeatedly picks the point with no other point
/// to its right. Collinear candidates resolve to the farthest one, so points
/// in the middle of a hull edge are dropped. Near-duplicate points are merged
/// before the walk. Runs in O(n·h).
///
/// # Errors
///
/// - [`VoronoiError::DegenerateHull`] when fewer than 3 distinct points are
///   supplied, or all of them are collinear
/// - [`VoronoiError::HullDidNotClose`] when the walk fails to return to its
///   start within n steps (inconsistent predicates on near-degenerate input)
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use voronoi_map::geometry::gift_wrap;
///
/// let square = [
///     Vec2::new(1.0, 1.0),
///     Vec2::new(-1.0, -1.0),
///     Vec2::new(-1.0, 1.0),
///     Vec2::new(1.0, -1.0),
///     Vec2::new(0.0, 0.0),
/// ];
/// let hull = gift_wrap(&square).unwrap();
/// assert_eq!(hull, vec![
///     Vec2::new(-1.0, -1.0),
///     Vec2::new(1.0, -1.0),
///     Vec2::new(1.0, 1.0),
///     Vec2::new(-1.0, 1.0),
/// ]);
/// ```
pub fn gift_wrap(points: &[Vec2]) -> Result<Vec<Vec2>> {
    let points = dedup_points(points);
    let n = points.len();

    if n < 3 {
        tracing::debug!(count = n, "cannot order a polygon from fewer than 3 points");
        return Err(VoronoiError::DegenerateHull { count: n });
    }

    let start = leftmost(&points);
    let mut hull = Vec::with_capacity(n);
    let mut p = start;

    loop {
        hull.push(points[p]);

        let mut q = (p + 1) % n;
        for i in 0..n {
            if i == p || i == q {
                continue;
            }
            match orientation(points[p], points[i], points[q]) {
                // i lies to the right of p → q, so q cannot be the next hull vertex
                Orientation::CounterClockwise => q = i,
                Orientation::Collinear
                    if points[p].distance_squared(points[i])
                        > points[p].distance_squared(points[q]) =>
                {
                    q = i
                }
                _ => {}
            }
        }

        p = q;
        if p == start {
            break;
        }
        if hull.len() >= n {
            tracing::warn!(steps = hull.len(), "gift wrap did not return to its start point");
            return Err(VoronoiError::HullDidNotClose { steps: hull.len() });
        }
    }

    if hull.len() < 3 {
        tracing::debug!(count = n, "all points are collinear, no polygon exists");
        return Err(VoronoiError::DegenerateHull { count: hull.len() });
    }

    Ok(hull)
}

/// Points that ended up strictly inside a hull instead of on it
///
/// A point counts as present when it matches a hull vertex or lies on a hull
/// edge within a tolerance scaled to the hull's extent. `hull` must be ordered
/// counter-clockwise, as returned by [`gift_wrap`].
pub fn missing_from_hull(hull: &[Vec2], points: &[Vec2]) -> Vec<Vec2> {
    if hull.len() < 3 {
        return points.to_vec();
    }

    let extent = hull
        .iter()
        .fold(1.0_f32, |acc, v| acc.max(v.x.abs()).max(v.y.abs()));
    let tolerance = f64::from(extent) * 1e-5;

    points
        .iter()
        .copied()
        .filter(|&point| {
            if hull
                .iter()
                .any(|v| v.distance_squared(point) <= POINT_EPSILON * POINT_EPSILON)
            {
                return false;
            }
            let point = point.as_dvec2();
            hull.iter().zip(hull.iter().cycle().skip(1)).all(|(a, b)| {
                let (a, b) = (a.as_dvec2(), b.as_dvec2());
                let edge = b - a;
                let length = edge.length();
                length > 0.0 && edge.perp_dot(point - a) / length > tolerance
            })
        })
        .collect()
}

/// Index of the leftmost point, lowest y on ties
fn leftmost(points: &[Vec2]) -> usize {
    let mut best = 0;
    for (i, point) in points.iter().enumerate().skip(1) {
        let current = points[best];
        if point.x < current.x || (point.x == current.x && point.y < current.y) {
            best = i;
        }
    }
    best
}
