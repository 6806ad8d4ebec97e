//! Lloyd's Relaxation for uniform site distribution
//!
//! Lloyd's Relaxation iteratively improves the uniformity of the site
//! distribution by moving each site to the area centroid of its clipped
//! Voronoi cell.

use glam::Vec2;
use std::time::Instant;

use super::voronoi::{generate_cells, DiagramParams, RawCell};
use crate::error::Result;
use crate::geometry::polygon_centroid;

/// Options for Lloyd's relaxation algorithm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Maximum number of iterations to run
    pub max_iterations: usize,
    /// Convergence threshold - stop when max displacement < this value
    /// (as a fraction of the bounds diagonal). Set to 0.0 to disable early
    /// termination
    pub convergence_threshold: f32,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.001,
        }
    }
}

/// Apply Lloyd's Relaxation to improve site distribution uniformity
///
/// # Arguments
///
/// * `points` - Initial site distribution
/// * `params` - Diagram parameters used for every intermediate diagram
/// * `iterations` - Number of relaxation iterations (typically 2-5)
///
/// # Returns
///
/// Relaxed sites, in the same order as the input
///
/// # Errors
///
/// Propagates any error from [`generate_cells`]
pub fn lloyd_relaxation(
    points: Vec<Vec2>,
    params: &DiagramParams,
    iterations: usize,
) -> Result<Vec<Vec2>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, params, options)
}

/// Apply Lloyd's Relaxation with custom options
///
/// Stops early once no site moves further than
/// `options.convergence_threshold * diagonal`, or when the diagram turns out
/// empty (nothing to relax).
///
/// # Errors
///
/// Propagates any error from [`generate_cells`]
pub fn lloyd_relaxation_with_options(
    mut points: Vec<Vec2>,
    params: &DiagramParams,
    options: LloydOptions,
) -> Result<Vec<Vec2>> {
    let convergence_threshold = options.convergence_threshold * params.bounds.diagonal();
    let total_start = Instant::now();

    tracing::info!(
        sites = points.len(),
        max_iterations = options.max_iterations,
        threshold = convergence_threshold,
        "lloyd relaxation starting"
    );

    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let diagram = generate_cells(&points, params)?;
        if diagram.is_empty() {
            tracing::debug!(iteration = iteration + 1, "diagram is empty, nothing to relax");
            break;
        }

        let (new_points, max_displacement) = compute_new_points(&points, &diagram.cells, params);
        points = new_points;
        iterations_run = iteration + 1;

        tracing::debug!(
            iteration = iterations_run,
            elapsed = ?iter_start.elapsed(),
            max_displacement,
            "lloyd iteration"
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            converged = true;
            break;
        }
    }

    tracing::info!(
        iterations = iterations_run,
        converged,
        elapsed = ?total_start.elapsed(),
        "lloyd relaxation finished"
    );

    Ok(points)
}

/// Compute new site positions and track maximum displacement
///
/// Sites whose cell came out empty stay where they are.
fn compute_new_points(
    points: &[Vec2],
    cells: &[RawCell],
    params: &DiagramParams,
) -> (Vec<Vec2>, f32) {
    let mut max_displacement: f32 = 0.0;

    let new_points = points
        .iter()
        .zip(cells)
        .map(|(&old, cell)| {
            let new = polygon_centroid(&cell.vertices)
                .map(|centroid| params.bounds.clamp(centroid))
                .unwrap_or(old);
            max_displacement = max_displacement.max(old.distance(new));
            new
        })
        .collect();

    (new_points, max_displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::points::generate_random_sites;
    use crate::geometry::polygon_area;

    fn params() -> DiagramParams {
        DiagramParams::new(20.0, 20.0)
    }

    /// Variance of cell areas, lower is more uniform
    fn area_variance(points: &[Vec2]) -> f32 {
        let diagram = generate_cells(points, &params()).unwrap();
        let areas: Vec<f32> = diagram.cells.iter().map(|c| polygon_area(&c.vertices)).collect();
        let mean = areas.iter().sum::<f32>() / areas.len() as f32;
        areas.iter().map(|a| (a - mean).powi(2)).sum::<f32>() / areas.len() as f32
    }

    #[test]
    fn test_lloyd_relaxation() {
        let params = params();
        let points = generate_random_sites(20, &params.bounds, 42);
        let relaxed = lloyd_relaxation(points.clone(), &params, 3).unwrap();

        assert_eq!(relaxed.len(), 20);
        assert!(relaxed.iter().all(|&p| params.bounds.contains(p)));
        assert!(area_variance(&relaxed) < area_variance(&points));
    }

    #[test]
    fn test_lloyd_relaxation_determinism() {
        let params = params();
        let points = generate_random_sites(15, &params.bounds, 12345);

        let relaxed1 = lloyd_relaxation(points.clone(), &params, 2).unwrap();
        let relaxed2 = lloyd_relaxation(points, &params, 2).unwrap();
        assert_eq!(relaxed1, relaxed2);
    }

    #[test]
    fn test_lloyd_options_default() {
        let options = LloydOptions::default();
        assert_eq!(options.max_iterations, 5);
        assert!((options.convergence_threshold - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_lloyd_zero_iterations_is_identity() {
        let params = params();
        let points = generate_random_sites(10, &params.bounds, 3);
        let options = LloydOptions {
            max_iterations: 0,
            convergence_threshold: 0.0,
        };
        let relaxed = lloyd_relaxation_with_options(points.clone(), &params, options).unwrap();
        assert_eq!(relaxed, points);
    }

    #[test]
    fn test_lloyd_too_few_sites() {
        let points = vec![Vec2::new(1.0, 1.0), Vec2::new(-2.0, 0.5)];
        let relaxed = lloyd_relaxation(points.clone(), &params(), 3).unwrap();
        assert_eq!(relaxed, points);
    }
}
