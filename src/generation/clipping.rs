//! Rectangle clipping ("cookie cutter") and corner repair
//!
//! Each cell polygon is cut against the four planes of the bounds. Clipping
//! alone cannot produce the rectangle corners, which are never Voronoi
//! vertices, so afterwards every corner is handed to the cell that owns it.

use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::extension::order_or_raw;
use crate::geometry::{dedup_points, gift_wrap, Bounds, Corner, PlaneOverlap};

/// A rectangle corner and the cell it was appended to
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerAssignment {
    /// Which corner
    pub corner: Corner,
    /// Index of the receiving cell
    pub cell: usize,
}

/// Classify one polygon edge against the rectangle and collect what survives
///
/// Returns the edge status and the kept points: the endpoints inside the
/// rectangle followed by the plane intersections that land on it.
pub fn clip_edge(start: Vec2, end: Vec2, bounds: &Bounds) -> (PlaneOverlap, Vec<Vec2>) {
    let start_inside = bounds.contains(start);
    let end_inside = bounds.contains(end);

    if start_inside && end_inside {
        return (PlaneOverlap::Inside, vec![start, end]);
    }

    let intersections: Vec<Vec2> = bounds
        .planes()
        .iter()
        .filter(|plane| plane.segment_overlap(start, end) == PlaneOverlap::Overlapping)
        .filter_map(|plane| plane.line_intersection(start, end))
        .filter(|&hit| bounds.contains_approx(hit))
        .map(|hit| bounds.clamp(hit))
        .collect();

    let status = if start_inside != end_inside || !intersections.is_empty() {
        PlaneOverlap::Overlapping
    } else {
        PlaneOverlap::Outside
    };

    let mut kept = Vec::with_capacity(intersections.len() + 1);
    if start_inside {
        kept.push(start);
    }
    if end_inside {
        kept.push(end);
    }
    kept.extend(intersections);

    (status, kept)
}

/// Clip a convex polygon to the rectangle
///
/// Walks every edge including the closing one. The surviving points are
/// hull-ordered when there are at least three of them; fewer are returned as
/// they are, since corner repair may still complete them.
pub fn clip_polygon(polygon: &[Vec2], bounds: &Bounds) -> Vec<Vec2> {
    let n = polygon.len();
    if n == 0 {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(n * 2);
    for i in 0..n {
        let (_, kept) = clip_edge(polygon[i], polygon[(i + 1) % n], bounds);
        points.extend(kept);
    }

    order_or_raw(dedup_points(&points))
}

/// Append every rectangle corner to the cell whose site is nearest to it
///
/// Equidistant sites are resolved by larger y for the top corners and smaller
/// y for the bottom corners, then by lower index. Each receiving cell is
/// re-ordered.
pub fn repair_corners(
    polygons: &mut [Vec<Vec2>],
    centers: &[Vec2],
    bounds: &Bounds,
) -> Vec<CornerAssignment> {
    let mut assignments = Vec::with_capacity(Corner::ALL.len());

    for corner in Corner::ALL {
        let Some(cell) = nearest_site(centers, bounds.corner(corner), corner) else {
            continue;
        };

        let mut points = std::mem::take(&mut polygons[cell]);
        points.push(bounds.corner(corner));
        polygons[cell] = order_or_raw(dedup_points(&points));

        assignments.push(CornerAssignment { corner, cell });
    }

    assignments
}

/// Clear polygons that cannot enclose any area, returning their indices
///
/// That is fewer than three points, or points left unordered because they
/// are collinear.
pub fn discard_degenerate(polygons: &mut [Vec<Vec2>]) -> Vec<usize> {
    let mut discarded = Vec::new();
    for (index, polygon) in polygons.iter_mut().enumerate() {
        if polygon.len() < 3 || gift_wrap(polygon).is_err() {
            if !polygon.is_empty() {
                tracing::warn!(cell = index, points = polygon.len(), "cell polygon is degenerate");
            }
            polygon.clear();
            discarded.push(index);
        }
    }
    discarded
}

fn nearest_site(centers: &[Vec2], position: Vec2, corner: Corner) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &center) in centers.iter().enumerate() {
        let distance = center.distance_squared(position);
        let better = match best {
            None => true,
            Some((current, best_distance)) => {
                if distance != best_distance {
                    distance < best_distance
                } else if corner.is_top() {
                    center.y > centers[current].y
                } else {
                    center.y < centers[current].y
                }
            }
        };
        if better {
            best = Some((index, distance));
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_area;
    use approx::assert_relative_eq;

    fn bounds() -> Bounds {
        Bounds::new(4.0, 4.0)
    }

    #[test]
    fn test_clip_edge_inside() {
        let (status, kept) = clip_edge(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0), &bounds());
        assert_eq!(status, PlaneOverlap::Inside);
        assert_eq!(kept, vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_clip_edge_crossing() {
        let (status, kept) = clip_edge(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0), &bounds());
        assert_eq!(status, PlaneOverlap::Overlapping);
        assert_eq!(kept, vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)]);

        // Both endpoints outside, passing through
        let (status, kept) = clip_edge(Vec2::new(-10.0, 0.5), Vec2::new(10.0, 0.5), &bounds());
        assert_eq!(status, PlaneOverlap::Overlapping);
        assert_eq!(kept.len(), 2);
        assert!(kept.contains(&Vec2::new(2.0, 0.5)));
        assert!(kept.contains(&Vec2::new(-2.0, 0.5)));
    }

    #[test]
    fn test_clip_edge_outside() {
        let (status, kept) = clip_edge(Vec2::new(3.0, -10.0), Vec2::new(3.0, 10.0), &bounds());
        assert_eq!(status, PlaneOverlap::Outside);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_clip_polygon_large_triangle() {
        let polygon = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(0.0, 100.0),
        ];
        let clipped = clip_polygon(&polygon, &bounds());

        // The quadrant part of the rectangle minus its far corner
        assert_eq!(
            clipped,
            vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)]
        );
    }

    #[test]
    fn test_clip_polygon_inside_is_unchanged() {
        let polygon = vec![Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(0.0, 1.0)];
        assert_eq!(clip_polygon(&polygon, &bounds()), polygon);
    }

    #[test]
    fn test_repair_corners() {
        let centers = vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        let mut polygons = vec![
            vec![Vec2::new(0.0, -2.0), Vec2::new(0.0, 0.0), Vec2::new(-2.0, 0.0)],
            vec![Vec2::new(0.0, -2.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 0.0)],
            vec![Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 2.0)],
            vec![Vec2::new(-2.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)],
        ];

        let assignments = repair_corners(&mut polygons, &centers, &bounds());
        assert_eq!(assignments.len(), 4);
        assert!(assignments.contains(&CornerAssignment {
            corner: Corner::BottomLeft,
            cell: 0
        }));
        assert!(assignments.contains(&CornerAssignment {
            corner: Corner::TopRight,
            cell: 2
        }));

        for polygon in &polygons {
            assert_eq!(polygon.len(), 4);
            assert_relative_eq!(polygon_area(polygon), 4.0);
        }
    }

    #[test]
    fn test_corner_ties() {
        // Equidistant from the left corners
        let centers = vec![Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0)];
        assert_eq!(nearest_site(&centers, Vec2::new(-2.0, 2.0), Corner::TopLeft), Some(1));

        let centers = vec![Vec2::new(-1.0, 0.0), Vec2::new(0.0, -1.0)];
        assert_eq!(nearest_site(&centers, Vec2::new(-2.0, -2.0), Corner::BottomLeft), Some(1));

        let centers = vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)];
        assert_eq!(nearest_site(&centers, Vec2::new(-2.0, 2.0), Corner::TopLeft), Some(0));
        assert_eq!(nearest_site(&[], Vec2::ZERO, Corner::TopLeft), None);
    }

    #[test]
    fn test_discard_degenerate() {
        let mut polygons = vec![
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            vec![Vec2::ZERO, Vec2::X],
            Vec::new(),
        ];
        assert_eq!(discard_degenerate(&mut polygons), vec![1, 2]);
        assert!(polygons[1].is_empty());
        assert_eq!(polygons[0].len(), 3);
    }

    #[test]
    fn test_collinear_clip_is_kept_raw_then_discarded() {
        let polygon = vec![Vec2::new(-1.0, 0.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        let clipped = clip_polygon(&polygon, &bounds());
        assert_eq!(clipped, polygon);

        let mut polygons = vec![clipped, vec![Vec2::ZERO, Vec2::X, Vec2::Y]];
        assert_eq!(discard_degenerate(&mut polygons), vec![0]);
        assert!(polygons[0].is_empty());
        assert_eq!(polygons[1].len(), 3);
    }
}
