//! Clustering orchestration for the Junction library.
//!
//! Provides the [`Junction`] runtime entry point, which validates the run
//! against the point set, builds the edge sequence, and dispatches to bounded
//! or convergence mode from a fresh forest.

use std::num::NonZeroUsize;

use tracing::{info, instrument};

use crate::{
    Result,
    bridge::find_bridge,
    distance::Metric,
    edges::{EdgeSequence, EdgeStrategy, build_edge_sequence},
    error::JunctionError,
    merge::{MergeTarget, greedy_merge},
    points::{Axis, PointStore},
    result::{BoundedReport, ClusterSizes, ClusteringReport, ConvergenceReport},
};

/// Entry point for running the clustering pipeline.
///
/// # Examples
/// ```
/// use junction_core::{ClusteringReport, JunctionBuilder, MergeTarget, PointStore};
///
/// let points = PointStore::parse_str("0,0,0\n0,0,3\n10,10,10\n10,10,13\n")
///     .expect("input is valid");
/// let junction = JunctionBuilder::new()
///     .with_merge_target(MergeTarget::Merges(1))
///     .build()
///     .expect("builder must succeed");
/// let ClusteringReport::Bounded(report) = junction.run(&points).expect("run must succeed") else {
///     panic!("bounded target yields a bounded report");
/// };
/// assert_eq!(report.sizes.as_slice(), &[2, 1, 1]);
/// assert_eq!(report.product, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Junction {
    merge_target: MergeTarget,
    top_m: NonZeroUsize,
    metric: Metric,
    edge_strategy: EdgeStrategy,
}

impl Junction {
    pub(crate) fn new(
        merge_target: MergeTarget,
        top_m: NonZeroUsize,
        metric: Metric,
        edge_strategy: EdgeStrategy,
    ) -> Self {
        Self {
            merge_target,
            top_m,
            metric,
            edge_strategy,
        }
    }

    /// Returns the termination policy.
    #[must_use]
    pub fn merge_target(&self) -> MergeTarget {
        self.merge_target
    }

    /// Returns how many of the largest clusters bounded mode multiplies.
    #[must_use]
    pub fn top_m(&self) -> NonZeroUsize {
        self.top_m
    }

    /// Returns the distance metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns the edge construction strategy.
    #[must_use]
    pub fn edge_strategy(&self) -> EdgeStrategy {
        self.edge_strategy
    }

    /// Builds the sorted edge sequence for `points` with this instance's
    /// metric and strategy.
    ///
    /// # Errors
    /// See [`build_edge_sequence`].
    pub fn build_edges(&self, points: &PointStore) -> Result<EdgeSequence> {
        build_edge_sequence(points, self.metric, self.edge_strategy)
    }

    /// Validates the configuration against `points`, builds the edge sequence,
    /// and runs the configured mode.
    ///
    /// # Errors
    /// Returns [`JunctionError::InvalidInput`] for fewer than two points and
    /// [`JunctionError::InvalidConfiguration`] for an out-of-range merge
    /// target, both before any edge is built. Errors from the merge walk and
    /// bridge scan are propagated.
    #[instrument(
        name = "core.run",
        err,
        skip(self, points),
        fields(
            points = points.len(),
            target = ?self.merge_target,
            top_m = %self.top_m,
            strategy = ?self.edge_strategy,
        ),
    )]
    pub fn run(&self, points: &PointStore) -> Result<ClusteringReport> {
        self.merge_target.required_merges(points.len())?;
        let edges = self.build_edges(points)?;
        self.run_with_edges(points, &edges)
    }

    /// Runs the configured mode over an edge sequence that was already built
    /// for `points`, so several runs can share one sequence.
    ///
    /// # Errors
    /// Returns [`JunctionError::EdgeSetMismatch`] when `edges` was built for a
    /// different number of points, plus the errors documented on
    /// [`Self::run`].
    pub fn run_with_edges(
        &self,
        points: &PointStore,
        edges: &EdgeSequence,
    ) -> Result<ClusteringReport> {
        if edges.point_count() != points.len() {
            return Err(JunctionError::EdgeSetMismatch {
                points: points.len(),
                edge_points: edges.point_count(),
            });
        }

        match self.merge_target {
            MergeTarget::Merges(_) => self.run_bounded(edges).map(ClusteringReport::Bounded),
            MergeTarget::UntilTwo => {
                Self::run_convergence(points, edges).map(ClusteringReport::Convergence)
            }
        }
    }

    fn run_bounded(&self, edges: &EdgeSequence) -> Result<BoundedReport> {
        let outcome = greedy_merge(edges, self.merge_target)?;
        let sizes = ClusterSizes::new(outcome.cluster_sizes());
        let product = sizes.top_product(self.top_m)?;
        info!(
            merges = outcome.merge_count(),
            clusters = sizes.cluster_count(),
            product,
            "bounded merge complete"
        );
        Ok(BoundedReport {
            merges: outcome.merge_count(),
            edges_consumed: outcome.edges_consumed(),
            sizes,
            top_m: self.top_m,
            product,
        })
    }

    fn run_convergence(points: &PointStore, edges: &EdgeSequence) -> Result<ConvergenceReport> {
        let outcome = find_bridge(edges)?;
        let bridge = outcome.bridge();
        let x_product = bridge
            .coordinate_product(points, Axis::X)
            .ok_or_else(|| JunctionError::InvariantViolation {
                invariant: "bridge endpoints must exist in the point store",
                points: points.len(),
                clusters: outcome.merge().forest().cluster_count(),
            })?;
        let x_product_integer = bridge.integer_coordinate_product(points, Axis::X);
        Ok(ConvergenceReport {
            merges: outcome.merge().merge_count(),
            edges_consumed: outcome.merge().edges_consumed(),
            sizes: ClusterSizes::new(outcome.merge().cluster_sizes()),
            bridge,
            x_product,
            x_product_integer,
        })
    }
}
