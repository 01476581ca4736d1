//! Greedy nearest-pair merging over a sorted edge sequence.
//!
//! The walk visits edges in ascending order and attempts a union for each.
//! Edges whose endpoints already share a cluster are consumed as skips; every
//! other edge is a merge. The walk stops as soon as the configured number of
//! merges has happened. It is inherently sequential: each decision depends on
//! every union before it.

use tracing::{debug, instrument, trace};

use crate::{
    Result,
    edges::{Edge, EdgeSequence},
    error::{ConfigurationIssue, JunctionError},
    forest::ClusterForest,
};

/// When the merge walk stops.
///
/// # Examples
/// ```
/// use junction_core::MergeTarget;
///
/// assert_eq!(MergeTarget::Merges(3).required_merges(10), Ok(3));
/// assert_eq!(MergeTarget::UntilTwo.required_merges(10), Ok(8));
/// assert!(MergeTarget::Merges(10).required_merges(10).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MergeTarget {
    /// Bounded mode: stop after exactly this many successful merges.
    Merges(usize),
    /// Convergence mode: stop when two clusters remain.
    UntilTwo,
}

impl MergeTarget {
    /// Returns the number of successful merges this target requires over
    /// `points` points.
    ///
    /// # Errors
    /// Returns [`JunctionError::InvalidInput`] for fewer than two points and
    /// [`JunctionError::InvalidConfiguration`] when a bounded target lies
    /// outside `1..=points - 1`.
    pub fn required_merges(self, points: usize) -> Result<usize> {
        if points < 2 {
            return Err(JunctionError::InvalidInput { points });
        }
        match self {
            Self::Merges(0) => Err(ConfigurationIssue::ZeroMergeTarget.into()),
            Self::Merges(requested) if requested > points - 1 => {
                Err(ConfigurationIssue::MergeTargetTooLarge { requested, points }.into())
            }
            Self::Merges(requested) => Ok(requested),
            Self::UntilTwo => Ok(points - 2),
        }
    }
}

/// The forest produced by a merge walk together with its trace.
#[derive(Clone, Debug)]
pub struct MergeOutcome {
    forest: ClusterForest,
    merged: Vec<Edge>,
    edges_consumed: usize,
}

impl MergeOutcome {
    /// Returns the final forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn forest(&self) -> &ClusterForest { &self.forest }

    /// Consumes the outcome and returns the final forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_forest(self) -> ClusterForest { self.forest }

    /// Returns the accepted edges in merge order.
    #[must_use]
    #[rustfmt::skip]
    pub fn merged_edges(&self) -> &[Edge] { &self.merged }

    /// Returns the number of successful merges.
    #[must_use]
    #[rustfmt::skip]
    pub fn merge_count(&self) -> usize { self.merged.len() }

    /// Returns how many edges were visited, merges and skips combined.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges_consumed(&self) -> usize { self.edges_consumed }

    /// Returns the final cluster sizes, largest first.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.forest.cluster_sizes()
    }
}

/// Runs the merge walk over `edges` from a fresh forest until `target` is
/// reached.
///
/// # Errors
/// Returns the validation errors of [`MergeTarget::required_merges`] before
/// any merging happens, and [`JunctionError::InvariantViolation`] if the edge
/// sequence runs out before the target is met.
///
/// # Examples
/// ```
/// use junction_core::{EdgeStrategy, MergeTarget, Metric, PointStore, build_edge_sequence, greedy_merge};
///
/// let points = PointStore::from_coordinates([
///     [0.0, 0.0, 0.0],
///     [0.0, 0.0, 3.0],
///     [10.0, 10.0, 10.0],
///     [10.0, 10.0, 13.0],
/// ])
/// .expect("coordinates are finite");
/// let edges = build_edge_sequence(&points, Metric::Euclidean, EdgeStrategy::Auto)
///     .expect("graph must build");
/// let outcome = greedy_merge(&edges, MergeTarget::Merges(1)).expect("K is valid");
/// assert_eq!(outcome.cluster_sizes(), vec![2, 1, 1]);
/// assert_eq!(outcome.merged_edges()[0].endpoints(), (0, 1));
/// ```
#[instrument(
    name = "core.merge",
    err,
    skip(edges),
    fields(points = edges.point_count(), edges = edges.len(), target = ?target),
)]
pub fn greedy_merge(edges: &EdgeSequence, target: MergeTarget) -> Result<MergeOutcome> {
    let point_count = edges.point_count();
    let required = target.required_merges(point_count)?;

    let mut forest = ClusterForest::new(point_count);
    let mut merged = Vec::with_capacity(required);
    let mut edges_consumed = 0usize;

    for edge in edges {
        if merged.len() == required {
            break;
        }
        edges_consumed += 1;
        if forest.union(edge.a(), edge.b()) {
            trace!(a = edge.a(), b = edge.b(), distance = edge.distance(), "merge");
            merged.push(*edge);
        }
    }

    if merged.len() < required {
        return Err(JunctionError::InvariantViolation {
            invariant: "complete graph must supply enough cross-cluster edges",
            points: point_count,
            clusters: forest.cluster_count(),
        });
    }

    debug!(
        merges = merged.len(),
        edges_consumed,
        clusters = forest.cluster_count(),
        "merge walk finished"
    );

    Ok(MergeOutcome {
        forest,
        merged,
        edges_consumed,
    })
}
