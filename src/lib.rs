//! Bounded 2D Voronoi maps
//!
//! Builds a Voronoi diagram clipped to an axis-aligned rectangle: one convex
//! polygon per site, tiling the rectangle without gaps or overlaps, with
//! neighbour relations for pathfinding. Suitable as the cell layer of map
//! generators and editors.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_map::*;
//!
//! let config = MapConfigBuilder::new()
//!     .seed(42)
//!     .map_size(MapSize::Small)
//!     .lloyd_iterations(2).unwrap()
//!     .build().unwrap();
//!
//! let map = VoronoiMap::generate(config).unwrap();
//! for cell in map.cells() {
//!     assert!(cell.is_empty() || cell.is_convex());
//! }
//! ```
//!
//! The pure pipeline is also available directly:
//!
//! ```rust
//! use voronoi_map::generation::{generate_cells, DiagramParams};
//! use glam::Vec2;
//!
//! let sites = [Vec2::new(-2.0, -1.0), Vec2::new(2.5, -0.5), Vec2::new(0.0, 2.0)];
//! let diagram = generate_cells(&sites, &DiagramParams::new(10.0, 8.0)).unwrap();
//! assert_eq!(diagram.cells.len(), 3);
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, cells and diagrams

// Modules
pub mod error;
pub mod geometry;
pub mod config;
pub mod cell;
pub mod generation;
pub mod map;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{MapConfig, MapConfigBuilder, MapSize, SiteDistribution};
pub use cell::VoronoiCell;
pub use map::VoronoiMap;
pub use generation::{
    CocircularPolicy, DiagramParams, DiagramReport, ExtensionOutcome, LloydOptions, RawCell,
    RawDiagram,
};
pub use geometry::Bounds;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec2 for convenience
pub use glam::Vec2;
