//! Triangles: winding, circumcircle, containment

use glam::{DVec2, Vec2};

use super::{orientation, Orientation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Winding order of a triangle's corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Corners run clockwise
    Clockwise,
    /// Corners run counter-clockwise
    CounterClockwise,
    /// Corners are collinear, the triangle has no area
    Collinear,
}

/// Three points in the plane
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner
    pub a: Vec2,
    /// Second corner
    pub b: Vec2,
    /// Third corner
    pub c: Vec2,
}

impl Triangle {
    /// Create a triangle from its corners
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Winding order of a → b → c
    pub fn winding(&self) -> Winding {
        match orientation(self.a, self.b, self.c) {
            Orientation::CounterClockwise => Winding::CounterClockwise,
            Orientation::Clockwise => Winding::Clockwise,
            Orientation::Collinear => Winding::Collinear,
        }
    }

    /// Average of the three corners
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Centre of the circle through all three corners
    ///
    /// Barycentric combination of the corners weighted by `sin(2·angle)` at
    /// each corner, evaluated in `f64`. Returns `None` for collinear corners.
    pub fn circumcenter(&self) -> Option<Vec2> {
        let (a, b, c) = (self.a.as_dvec2(), self.b.as_dvec2(), self.c.as_dvec2());

        let weight_a = sin_double_angle(a, b, c);
        let weight_b = sin_double_angle(b, c, a);
        let weight_c = sin_double_angle(c, a, b);
        let total = weight_a + weight_b + weight_c;

        if total == 0.0 || !total.is_finite() {
            return None;
        }

        let center = (a * weight_a + b * weight_b + c * weight_c) / total;
        Some(center.as_vec2())
    }

    /// Radius of the circle through all three corners
    ///
    /// Infinite for collinear corners.
    pub fn circumradius(&self) -> f32 {
        if self.winding() == Winding::Collinear {
            return f32::INFINITY;
        }

        let (a, b, c) = (self.a.as_dvec2(), self.b.as_dvec2(), self.c.as_dvec2());
        let ab = (b - a).length();
        let bc = (c - b).length();
        let ca = (a - c).length();

        let heron = (ab + bc + ca) * (bc + ca - ab) * (ca + ab - bc) * (ab + bc - ca);
        if heron <= 0.0 {
            return f32::INFINITY;
        }
        ((ab * bc * ca) / heron.sqrt()) as f32
    }

    /// Whether a point lies inside or on the triangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let turns = [
            orientation(self.a, self.b, point),
            orientation(self.b, self.c, point),
            orientation(self.c, self.a, point),
        ];
        let any_left = turns.contains(&Orientation::CounterClockwise);
        let any_right = turns.contains(&Orientation::Clockwise);
        !(any_left && any_right)
    }
}

/// `sin(2θ)` for the angle θ at `apex` between the edges to `p` and `q`
fn sin_double_angle(apex: DVec2, p: DVec2, q: DVec2) -> f64 {
    let u = p - apex;
    let v = q - apex;
    let denominator = u.length_squared() * v.length_squared();
    if denominator == 0.0 {
        return 0.0;
    }
    // sin θ = |u × v| / (|u||v|), cos θ = u·v / (|u||v|)
    2.0 * u.perp_dot(v).abs() * u.dot(v) / denominator
}
