//! Planes (2D half-planes) and the centred clipping rectangle

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Project `vector` onto the direction of `onto`
///
/// Returns zero when `onto` has no length.
pub fn project_vector(vector: Vec2, onto: Vec2) -> Vec2 {
    let length_squared = onto.length_squared();
    if length_squared == 0.0 {
        return Vec2::ZERO;
    }
    onto * (vector.dot(onto) / length_squared)
}

/// How a line segment relates to a single plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneOverlap {
    /// Both endpoints are on the inner side
    Inside,
    /// The endpoints are on opposite sides
    Overlapping,
    /// Both endpoints are on the outer side
    Outside,
}

/// A boundary line with an outward unit normal
///
/// Points with `normal · p <= offset` are inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Outward unit normal
    pub normal: Vec2,
    /// Distance of the line from the origin along `normal`
    pub offset: f32,
}

impl Plane {
    /// Create a plane from an outward normal (normalized here) and offset
    pub fn new(normal: Vec2, offset: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            offset,
        }
    }

    /// Signed distance to the plane, positive on the outer side
    #[inline]
    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// Classify the segment `start → end` against this plane
    pub fn segment_overlap(&self, start: Vec2, end: Vec2) -> PlaneOverlap {
        let start_outside = self.signed_distance(start) > 0.0;
        let end_outside = self.signed_distance(end) > 0.0;

        match (start_outside, end_outside) {
            (false, false) => PlaneOverlap::Inside,
            (true, true) => PlaneOverlap::Outside,
            _ => PlaneOverlap::Overlapping,
        }
    }

    /// Intersection of the segment `start → end` with the plane's line
    ///
    /// Returns `None` when the segment is parallel to the plane or does not
    /// reach it.
    pub fn line_intersection(&self, start: Vec2, end: Vec2) -> Option<Vec2> {
        let normal = self.normal.as_dvec2();
        let offset = f64::from(self.offset);
        let (start, end) = (start.as_dvec2(), end.as_dvec2());

        let start_distance = normal.dot(start) - offset;
        let end_distance = normal.dot(end) - offset;
        let denominator = start_distance - end_distance;
        if denominator == 0.0 {
            return None;
        }

        let t = start_distance / denominator;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        Some((start + (end - start) * t).as_vec2())
    }
}

/// One of the four rectangle corners
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// (-half_width, +half_height)
    TopLeft,
    /// (+half_width, +half_height)
    TopRight,
    /// (+half_width, -half_height)
    BottomRight,
    /// (-half_width, -half_height)
    BottomLeft,
}

impl Corner {
    /// All corners, clockwise from the top left
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Whether this corner lies on the top edge
    #[inline]
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Axis-aligned clipping rectangle centred on the origin
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Half of the rectangle width
    pub half_width: f32,
    /// Half of the rectangle height
    pub half_height: f32,
}

impl Bounds {
    /// Create bounds from full width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    /// Full width
    #[inline]
    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Full height
    #[inline]
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    /// Rectangle area
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Length of the rectangle diagonal
    #[inline]
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width(), self.height()).length()
    }

    /// Slack allowed when testing points produced by intersection maths
    #[inline]
    pub fn tolerance(&self) -> f32 {
        (self.half_width + self.half_height) * 1e-5
    }

    /// The four boundary planes: top, right, bottom, left
    pub fn planes(&self) -> [Plane; 4] {
        [
            Plane::new(Vec2::Y, self.half_height),
            Plane::new(Vec2::X, self.half_width),
            Plane::new(Vec2::NEG_Y, self.half_height),
            Plane::new(Vec2::NEG_X, self.half_width),
        ]
    }

    /// Position of a corner
    pub fn corner(&self, corner: Corner) -> Vec2 {
        match corner {
            Corner::TopLeft => Vec2::new(-self.half_width, self.half_height),
            Corner::TopRight => Vec2::new(self.half_width, self.half_height),
            Corner::BottomRight => Vec2::new(self.half_width, -self.half_height),
            Corner::BottomLeft => Vec2::new(-self.half_width, -self.half_height),
        }
    }

    /// Whether a point lies inside or on the rectangle
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x.abs() <= self.half_width && point.y.abs() <= self.half_height
    }

    /// Whether a point lies inside the rectangle grown by [`Bounds::tolerance`]
    #[inline]
    pub fn contains_approx(&self, point: Vec2) -> bool {
        let slack = self.tolerance();
        point.x.abs() <= self.half_width + slack && point.y.abs() <= self.half_height + slack
    }

    /// Clamp a point onto the rectangle extents
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(-self.half_width, self.half_width),
            point.y.clamp(-self.half_height, self.half_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_vector() {
        let projected = project_vector(Vec2::new(3.0, 4.0), Vec2::new(2.0, 0.0));
        assert_eq!(projected, Vec2::new(3.0, 0.0));
        assert_eq!(project_vector(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane::new(Vec2::X, 5.0);
        assert_relative_eq!(plane.signed_distance(Vec2::new(7.0, 1.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(Vec2::new(-1.0, 0.0)), -6.0);
    }

    #[test]
    fn test_segment_overlap() {
        let plane = Plane::new(Vec2::Y, 1.0);
        assert_eq!(
            plane.segment_overlap(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.5)),
            PlaneOverlap::Inside
        );
        assert_eq!(
            plane.segment_overlap(Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)),
            PlaneOverlap::Overlapping
        );
        assert_eq!(
            plane.segment_overlap(Vec2::new(0.0, 3.0), Vec2::new(4.0, 2.0)),
            PlaneOverlap::Outside
        );
    }

    #[test]
    fn test_line_intersection() {
        let plane = Plane::new(Vec2::X, 5.0);

        let hit = plane
            .line_intersection(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0))
            .unwrap();
        assert_relative_eq!(hit.x, 5.0);
        assert_relative_eq!(hit.y, 5.0);

        // Parallel and too short
        assert!(plane.line_intersection(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0)).is_none());
        assert!(plane.line_intersection(Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)).is_none());
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds::new(10.0, 6.0);

        assert_eq!(bounds.corner(Corner::TopLeft), Vec2::new(-5.0, 3.0));
        assert_eq!(bounds.corner(Corner::BottomRight), Vec2::new(5.0, -3.0));
        assert!(bounds.contains(Vec2::new(5.0, -3.0)));
        assert!(!bounds.contains(Vec2::new(5.1, 0.0)));
        assert_eq!(bounds.clamp(Vec2::new(9.0, -9.0)), Vec2::new(5.0, -3.0));
        assert_relative_eq!(bounds.area(), 60.0);

        for plane in bounds.planes() {
            assert!(plane.signed_distance(Vec2::ZERO) < 0.0);
        }
    }
}
