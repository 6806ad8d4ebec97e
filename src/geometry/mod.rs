//! 2D geometry primitives
//!
//! Orientation tests, convex hull ordering, triangles (circumcircle and
//! winding), planes and the clipping rectangle. Working precision is `f32`
//! (`glam::Vec2`); predicates and circumcircle maths are evaluated in `f64`
//! (`glam::DVec2`) and narrowed at the end.

mod hull;
mod plane;
mod polygon;
mod triangle;

pub use hull::{gift_wrap, missing_from_hull};
pub use plane::{project_vector, Bounds, Corner, Plane, PlaneOverlap};
pub use polygon::{is_convex_ccw, polygon_area, polygon_centroid, polygon_contains};
pub use triangle::{Triangle, Winding};

use glam::Vec2;

/// Distance below which two points are treated as the same vertex
pub const POINT_EPSILON: f32 = 1e-5;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points lie on one line
    Collinear,
    /// p → q → r turns right
    Clockwise,
    /// p → q → r turns left
    CounterClockwise,
}

/// Sign of the cross product `(q - p) × (r - q)`
///
/// Evaluated in `f64`; an exact zero is reported as [`Orientation::Collinear`].
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let (p, q, r) = (p.as_dvec2(), q.as_dvec2(), r.as_dvec2());
    let cross = (q - p).perp_dot(r - q);

    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Remove points closer than [`POINT_EPSILON`] to an earlier point
///
/// Keeps the first occurrence so input order is preserved.
pub fn dedup_points(points: &[Vec2]) -> Vec<Vec2> {
    let mut unique: Vec<Vec2> = Vec::with_capacity(points.len());
    for &point in points {
        if !unique
            .iter()
            .any(|kept| kept.distance_squared(point) <= POINT_EPSILON * POINT_EPSILON)
        {
            unique.push(point);
        }
    }
    unique
}
