//! Builder utilities for configuring [`Junction`] runs.
//!
//! Validation that does not depend on the point set happens in
//! [`JunctionBuilder::build`]; bounds that depend on the point count are
//! checked by [`Junction::run`] before any merging starts.

use std::num::NonZeroUsize;

use crate::{
    Result,
    distance::Metric,
    edges::EdgeStrategy,
    error::ConfigurationIssue,
    junction::Junction,
    merge::MergeTarget,
};

/// Number of largest clusters multiplied in bounded mode unless overridden.
pub const DEFAULT_TOP_M: usize = 3;

/// Configures and constructs [`Junction`] instances.
///
/// # Examples
/// ```
/// use junction_core::{EdgeStrategy, JunctionBuilder, MergeTarget};
///
/// let junction = JunctionBuilder::new()
///     .with_merge_target(MergeTarget::Merges(10))
///     .with_top_m(3)
///     .with_edge_strategy(EdgeStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(junction.merge_target(), MergeTarget::Merges(10));
/// assert_eq!(junction.top_m().get(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct JunctionBuilder {
    merge_target: MergeTarget,
    top_m: usize,
    metric: Metric,
    edge_strategy: EdgeStrategy,
}

impl Default for JunctionBuilder {
    fn default() -> Self {
        Self {
            merge_target: MergeTarget::UntilTwo,
            top_m: DEFAULT_TOP_M,
            metric: Metric::Euclidean,
            edge_strategy: EdgeStrategy::Auto,
        }
    }
}

impl JunctionBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use junction_core::{EdgeStrategy, JunctionBuilder, MergeTarget};
    ///
    /// let builder = JunctionBuilder::new();
    /// assert_eq!(builder.merge_target(), MergeTarget::UntilTwo);
    /// assert_eq!(builder.top_m(), 3);
    /// assert_eq!(builder.edge_strategy(), EdgeStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the termination policy.
    #[must_use]
    pub fn with_merge_target(mut self, target: MergeTarget) -> Self {
        self.merge_target = target;
        self
    }

    /// Returns the configured termination policy.
    #[must_use]
    pub fn merge_target(&self) -> MergeTarget {
        self.merge_target
    }

    /// Overrides how many of the largest clusters bounded mode multiplies.
    #[must_use]
    pub fn with_top_m(mut self, top_m: usize) -> Self {
        self.top_m = top_m;
        self
    }

    /// Returns the configured top-`M` value.
    #[must_use]
    pub fn top_m(&self) -> usize {
        self.top_m
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Returns the configured metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Sets how edge distances are computed.
    #[must_use]
    pub fn with_edge_strategy(mut self, strategy: EdgeStrategy) -> Self {
        self.edge_strategy = strategy;
        self
    }

    /// Returns the configured edge strategy.
    #[must_use]
    pub fn edge_strategy(&self) -> EdgeStrategy {
        self.edge_strategy
    }

    /// Validates the configuration and constructs a [`Junction`] instance.
    ///
    /// # Errors
    /// Returns [`crate::JunctionError::InvalidConfiguration`] for a zero
    /// `top_m` or a zero bounded merge target, and
    /// [`crate::JunctionError::BackendUnavailable`] when the edge strategy is
    /// not compiled into this build.
    pub fn build(self) -> Result<Junction> {
        let top_m = NonZeroUsize::new(self.top_m).ok_or(ConfigurationIssue::ZeroTopM)?;
        if self.merge_target == MergeTarget::Merges(0) {
            return Err(ConfigurationIssue::ZeroMergeTarget.into());
        }
        self.edge_strategy.resolve()?;

        Ok(Junction::new(
            self.merge_target,
            top_m,
            self.metric,
            self.edge_strategy,
        ))
    }
}
