//! Error types for Voronoi map generation

use thiserror::Error;

/// Errors that can occur during diagram generation or queries
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input site has a non-finite coordinate
    #[error("site {index} is invalid: {reason}")]
    InvalidSite {
        /// Index of the offending site in the input slice
        index: usize,
        /// Human-readable description of the problem
        reason: String,
    },

    /// Two input sites share the same position
    #[error("sites {first} and {second} share the same position")]
    DuplicateSite {
        /// Lower index of the duplicated pair
        first: usize,
        /// Higher index of the duplicated pair
        second: usize,
    },

    /// Convex hull ordering needs at least three distinct points
    #[error("cannot order a polygon from {count} distinct points")]
    DegenerateHull {
        /// Number of distinct points that were supplied
        count: usize,
    },

    /// Gift wrapping failed to return to its start point
    #[error("convex hull walk did not close after {steps} steps")]
    HullDidNotClose {
        /// Number of hull steps taken before giving up
        steps: usize,
    },

    /// Requested cell ID does not exist
    #[error("cell not found: {0}")]
    CellNotFound(usize),
}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
