//! Voronoi Map Configuration and Builder
//!
//! This module provides configuration types for deterministic map generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::generation::{
    CocircularPolicy, DiagramParams, LloydOptions, DEFAULT_COCIRCULAR_POLICY,
    DEFAULT_RAY_LENGTH_FACTOR,
};
use crate::geometry::Bounds;

/// Map size presets
///
/// Each size maps to a site count and rectangle dimensions with a similar
/// site density. Triangulation is O(N⁴), so presets stay small.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MapSize {
    /// 12 sites on 10 × 10 units
    Tiny,
    /// 24 sites on 20 × 20 units
    Small,
    /// 48 sites on 40 × 30 units (default)
    #[default]
    Medium,
    /// 96 sites on 80 × 60 units
    Large,
    /// Custom site count and dimensions
    Custom {
        /// Number of sites to generate
        site_count: usize,
        /// Rectangle width in world units
        width: f32,
        /// Rectangle height in world units
        height: f32,
    },
}

impl MapSize {
    /// Number of sites generated for this size
    pub fn site_count(self) -> usize {
        match self {
            MapSize::Tiny => 12,
            MapSize::Small => 24,
            MapSize::Medium => 48,
            MapSize::Large => 96,
            MapSize::Custom { site_count, .. } => site_count,
        }
    }

    /// Rectangle width and height
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            MapSize::Tiny => (10.0, 10.0),
            MapSize::Small => (20.0, 20.0),
            MapSize::Medium => (40.0, 30.0),
            MapSize::Large => (80.0, 60.0),
            MapSize::Custom { width, height, .. } => (width, height),
        }
    }

    /// Get a human-readable name for this map size
    pub fn name(self) -> &'static str {
        match self {
            MapSize::Tiny => "Tiny",
            MapSize::Small => "Small",
            MapSize::Medium => "Medium",
            MapSize::Large => "Large",
            MapSize::Custom { .. } => "Custom",
        }
    }
}

/// How initial sites are placed before relaxation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SiteDistribution {
    /// Uniformly random inside the rectangle
    #[default]
    Uniform,
    /// Grid slots with random displacement
    JitteredGrid {
        /// Fraction of the grid spacing a site may move, in `[0, 1)`
        jitter: f32,
    },
}

/// Configuration for deterministic Voronoi map generation
///
/// The same configuration always produces the identical map.
///
/// # Example
///
/// ```rust
/// use voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(42)
///     .map_size(MapSize::Tiny)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.site_count(), 12);
///
/// // Config is serializable (with "serde" feature)
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: MapConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    /// Random seed for site placement
    pub seed: u32,

    /// Map size preset (site count and rectangle dimensions)
    pub map_size: MapSize,

    /// Initial site placement
    pub distribution: SiteDistribution,

    /// Number of Lloyd's Relaxation iterations
    ///
    /// - 0: Random cells (irregular)
    /// - 2-3: Decent uniformity (default 2)
    /// - 10+: Diminishing returns, slower generation
    pub lloyd_iterations: usize,

    /// Convergence threshold for Lloyd's relaxation (fraction of the diagonal)
    ///
    /// 0.0 disables early termination.
    pub lloyd_convergence: f32,

    /// Override the default ray length (4 × diagonal)
    pub ray_length_override: Option<f32>,

    /// Drop Delaunay faces with a larger circumradius
    pub max_circumradius: Option<f32>,

    /// Tie-break for exactly co-circular sites
    pub cocircular: CocircularPolicy,
}

impl MapConfig {
    /// Get the site count for this configuration
    #[inline]
    pub fn site_count(&self) -> usize {
        self.map_size.site_count()
    }

    /// Clipping rectangle of the map
    #[inline]
    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.map_size.dimensions();
        Bounds::new(width, height)
    }

    /// Ray length used for hull cells
    ///
    /// Returns the override if set, otherwise 4 × the bounds diagonal.
    #[inline]
    pub fn ray_length(&self) -> f32 {
        self.ray_length_override
            .unwrap_or_else(|| self.bounds().diagonal() * DEFAULT_RAY_LENGTH_FACTOR)
    }

    /// Parameters for [`crate::generation::generate_cells`]
    pub fn diagram_params(&self) -> DiagramParams {
        DiagramParams {
            bounds: self.bounds(),
            ray_length: self.ray_length(),
            max_circumradius: self.max_circumradius,
            cocircular: self.cocircular,
        }
    }

    /// Relaxation options derived from this configuration
    pub fn lloyd_options(&self) -> LloydOptions {
        LloydOptions {
            max_iterations: self.lloyd_iterations,
            convergence_threshold: self.lloyd_convergence,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            map_size: MapSize::default(),
            distribution: SiteDistribution::default(),
            lloyd_iterations: DEFAULT_LLOYD_ITERATIONS,
            lloyd_convergence: DEFAULT_LLOYD_CONVERGENCE,
            ray_length_override: None,
            max_circumradius: None,
            cocircular: DEFAULT_COCIRCULAR_POLICY,
        }
    }
}

const DEFAULT_LLOYD_ITERATIONS: usize = 2;
const DEFAULT_LLOYD_CONVERGENCE: f32 = 0.001;
const MAX_LLOYD_ITERATIONS: usize = 20;

/// Builder for creating MapConfig with validation
///
/// # Example
///
/// ```rust
/// use voronoi_map::*;
///
/// let config = MapConfigBuilder::new()
///     .seed(12345)
///     .map_size(MapSize::Small)
///     .distribution(SiteDistribution::JitteredGrid { jitter: 0.6 })
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.lloyd_iterations, 3);
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigBuilder {
    seed: Option<u32>,
    map_size: MapSize,
    distribution: SiteDistribution,
    lloyd_iterations: usize,
    lloyd_convergence: f32,
    ray_length_override: Option<f32>,
    max_circumradius: Option<f32>,
    cocircular: CocircularPolicy,
}

impl MapConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random
    /// - map_size: Medium (48 sites)
    /// - distribution: Uniform
    /// - lloyd_iterations: 2
    /// - lloyd_convergence: 0.001
    /// - no ray length override, no circumradius limit
    /// - cocircular: Perturb
    pub fn new() -> Self {
        Self {
            seed: None,
            map_size: MapSize::default(),
            distribution: SiteDistribution::default(),
            lloyd_iterations: DEFAULT_LLOYD_ITERATIONS,
            lloyd_convergence: DEFAULT_LLOYD_CONVERGENCE,
            ray_length_override: None,
            max_circumradius: None,
            cocircular: DEFAULT_COCIRCULAR_POLICY,
        }
    }

    /// Set the random seed for site placement
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the map size preset
    ///
    /// Custom dimensions are checked by [`MapConfigBuilder::build`].
    pub fn map_size(mut self, size: MapSize) -> Self {
        self.map_size = size;
        self
    }

    /// Set the initial site distribution
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a grid jitter is outside `[0, 1)`
    pub fn distribution(mut self, distribution: SiteDistribution) -> Result<Self> {
        if let SiteDistribution::JitteredGrid { jitter } = distribution {
            if !(0.0..1.0).contains(&jitter) {
                return Err(VoronoiError::InvalidConfig(format!(
                    "grid jitter must be in [0, 1) (got {jitter})"
                )));
            }
        }
        self.distribution = distribution;
        Ok(self)
    }

    /// Set the number of Lloyd's Relaxation iterations
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd iterations must be <= {MAX_LLOYD_ITERATIONS} (got {iterations})"
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// Set the convergence threshold for Lloyd's relaxation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if threshold is negative
    pub fn lloyd_convergence(mut self, threshold: f32) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {threshold})"
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Override the ray length used for hull cells
    ///
    /// Must exceed the bounds diagonal; that is checked by
    /// [`MapConfigBuilder::build`] once the size is final.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if length <= 0.0
    pub fn ray_length(mut self, length: f32) -> Result<Self> {
        if length.is_nan() || length <= 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "ray length must be positive (got {length})"
            )));
        }
        self.ray_length_override = Some(length);
        Ok(self)
    }

    /// Drop Delaunay faces whose circumradius exceeds `radius`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius <= 0.0
    pub fn max_circumradius(mut self, radius: f32) -> Result<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "max circumradius must be positive (got {radius})"
            )));
        }
        self.max_circumradius = Some(radius);
        Ok(self)
    }

    /// Set the tie-break for co-circular sites
    pub fn cocircular(mut self, policy: CocircularPolicy) -> Self {
        self.cocircular = policy;
        self
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for non-positive dimensions or a ray length
    /// that does not exceed the bounds diagonal.
    pub fn build(self) -> Result<MapConfig> {
        let config = MapConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            map_size: self.map_size,
            distribution: self.distribution,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
            ray_length_override: self.ray_length_override,
            max_circumradius: self.max_circumradius,
            cocircular: self.cocircular,
        };

        config.diagram_params().validate()?;
        Ok(config)
    }
}

impl Default for MapConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
