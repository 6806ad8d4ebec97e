//! Measurements on ordered polygons

use glam::{DVec2, Vec2};

/// Signed area of a closed polygon (shoelace), positive when counter-clockwise
pub fn polygon_area(vertices: &[Vec2]) -> f32 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let twice_area: f64 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.as_dvec2().perp_dot(b.as_dvec2()))
        .sum();

    (twice_area / 2.0) as f32
}

/// Area-weighted centroid of a closed polygon
///
/// Falls back to the vertex average for polygons without area.
pub fn polygon_centroid(vertices: &[Vec2]) -> Option<Vec2> {
    if vertices.is_empty() {
        return None;
    }

    let mut twice_area = 0.0_f64;
    let mut weighted = DVec2::ZERO;
    for (a, b) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        let (a, b) = (a.as_dvec2(), b.as_dvec2());
        let cross = a.perp_dot(b);
        twice_area += cross;
        weighted += (a + b) * cross;
    }

    if twice_area.abs() <= f64::EPSILON {
        let sum: Vec2 = vertices.iter().copied().sum();
        return Some(sum / vertices.len() as f32);
    }

    Some((weighted / (3.0 * twice_area)).as_vec2())
}

/// Whether a point lies inside or on a convex counter-clockwise polygon
pub fn polygon_contains(vertices: &[Vec2], point: Vec2) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let point = point.as_dvec2();
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .all(|(a, b)| {
            let (a, b) = (a.as_dvec2(), b.as_dvec2());
            (b - a).perp_dot(point - a) >= -1e-9
        })
}

/// Whether a polygon is convex with counter-clockwise winding
///
/// Collinear consecutive edges are tolerated.
pub fn is_convex_ccw(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let scale = vertices
        .iter()
        .fold(1.0_f64, |acc, v| acc.max(f64::from(v.x.abs().max(v.y.abs()))));
    let tolerance = scale * scale * 1e-6;

    (0..n).all(|i| {
        let a = vertices[i].as_dvec2();
        let b = vertices[(i + 1) % n].as_dvec2();
        let c = vertices[(i + 2) % n].as_dvec2();
        (b - a).perp_dot(c - b) >= -tolerance
    }) && polygon_area(vertices) > 0.0
}
