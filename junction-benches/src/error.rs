//! Benchmark setup error type.

use junction_core::JunctionError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic point generation failed: {0}")]
    Synthetic(#[from] crate::source::SyntheticError),
    /// Configuring or running the clustering pipeline failed.
    #[error("clustering failed: {0}")]
    Junction(#[from] JunctionError),
}
