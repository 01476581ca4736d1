//! Seeded synthetic point sets for benchmarks.

use std::fmt;

use junction_core::{PointError, PointStore};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Side length of the cube points are drawn from, matching the magnitude of
/// puzzle inputs.
pub const DEFAULT_EXTENT: f64 = 100_000.0;

/// Parameters for a synthetic point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Coordinates are drawn uniformly from `[0, extent)` on every axis.
    pub extent: f64,
    /// RNG seed.
    pub seed: u64,
}

impl fmt::Display for SyntheticConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.point_count)
    }
}

/// Errors raised while generating synthetic points.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested point count is too small to cluster.
    #[error("point_count must be at least 2 (got {got})")]
    TooFewPoints {
        /// Requested point count.
        got: usize,
    },
    /// The extent must be positive and finite.
    #[error("extent must be positive and finite (got {got})")]
    InvalidExtent {
        /// Requested extent.
        got: f64,
    },
    /// The generated coordinates were rejected by the point store.
    #[error(transparent)]
    Points(#[from] PointError),
}

/// Generates a uniformly distributed point cloud.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is invalid.
///
/// # Examples
/// ```
/// use junction_benches::source::{DEFAULT_EXTENT, SyntheticConfig, generate};
///
/// let points = generate(&SyntheticConfig { point_count: 8, extent: DEFAULT_EXTENT, seed: 1 })
///     .map_err(|err| err.to_string())?;
/// assert_eq!(points.len(), 8);
/// # Ok::<(), String>(())
/// ```
pub fn generate(config: &SyntheticConfig) -> Result<PointStore, SyntheticError> {
    if config.point_count < 2 {
        return Err(SyntheticError::TooFewPoints {
            got: config.point_count,
        });
    }
    if !(config.extent.is_finite() && config.extent > 0.0) {
        return Err(SyntheticError::InvalidExtent { got: config.extent });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let coordinates: Vec<[f64; 3]> = (0..config.point_count)
        .map(|_| {
            [
                rng.gen_range(0.0..config.extent),
                rng.gen_range(0.0..config.extent),
                rng.gen_range(0.0..config.extent),
            ]
        })
        .collect();
    Ok(PointStore::from_coordinates(coordinates)?)
}
