//! Core Voronoi generation algorithm
//!
//! Places sites in the map rectangle, relaxes them with Lloyd's algorithm and
//! builds bounded cells: Delaunay triangulation, Voronoi vertices, boundary
//! extension of hull cells, then clipping to the rectangle.

mod clipping;
mod delaunay;
mod extension;
mod lloyd;
mod points;
mod voronoi;

pub use clipping::{clip_edge, clip_polygon, repair_corners, CornerAssignment};
pub use delaunay::{
    is_delaunay_triangle, CocircularPolicy, Connection, Face, Site, Triangulation,
    TriangulationOptions, DEFAULT_COCIRCULAR_POLICY,
};
pub use extension::{
    extend_cell, BoundaryExtension, ExtensionCase, ExtensionOutcome, FallbackReason,
};
pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::{generate_jittered_sites, generate_random_sites};
pub use voronoi::{
    build_vertices, generate_cells, DiagramParams, DiagramReport, RawCell, RawDiagram,
    VoronoiVertex, DEFAULT_RAY_LENGTH_FACTOR,
};

use glam::Vec2;

use crate::config::{MapConfig, SiteDistribution};
use crate::error::Result;

/// Place and relax the sites described by a configuration
///
/// # Errors
///
/// Returns `InvalidConfig` for invalid diagram parameters, or any error
/// raised while relaxing.
pub fn generate_sites(config: &MapConfig) -> Result<Vec<Vec2>> {
    let params = config.diagram_params();
    params.validate()?;

    // Step 1: Place initial sites
    let bounds = params.bounds;
    let points = match config.distribution {
        SiteDistribution::Uniform => {
            points::generate_random_sites(config.site_count(), &bounds, config.seed)
        }
        SiteDistribution::JitteredGrid { jitter } => {
            points::generate_jittered_sites(config.site_count(), &bounds, jitter, config.seed)
        }
    };

    // Step 2: Apply Lloyd's relaxation with convergence detection
    if config.lloyd_iterations > 0 {
        lloyd::lloyd_relaxation_with_options(points, &params, config.lloyd_options())
    } else {
        Ok(points)
    }
}

/// Generate raw Voronoi cells from configuration
///
/// Returns the whole diagram (triangulation, vertices, cells and report).
pub fn generate_raw_cells(config: &MapConfig) -> Result<RawDiagram> {
    let points = generate_sites(config)?;

    // Step 3: Triangulate, extend and clip
    voronoi::generate_cells(&points, &config.diagram_params())
}
