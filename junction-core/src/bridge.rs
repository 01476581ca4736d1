//! Convergence mode: the shortest edge joining the last two clusters.
//!
//! The merge walk runs until two clusters remain. Because the graph is
//! complete and the sequence ascends, the first edge whose endpoints lie in
//! different clusters is the globally shortest link between them.

use tracing::{info, instrument};

use crate::{
    Result,
    edges::{Edge, EdgeSequence},
    error::JunctionError,
    forest::ClusterForest,
    merge::{MergeOutcome, MergeTarget, greedy_merge},
    points::{Axis, PointId, PointStore},
};

/// The cheapest edge linking the two final clusters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bridge {
    edge: Edge,
}

impl Bridge {
    /// Returns the underlying edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge(&self) -> Edge { self.edge }

    /// Returns the endpoint ids as `(a, b)` with `a < b`.
    #[must_use]
    #[rustfmt::skip]
    pub fn endpoints(&self) -> (PointId, PointId) { self.edge.endpoints() }

    /// Returns the bridge length.
    #[must_use]
    #[rustfmt::skip]
    pub fn distance(&self) -> f64 { self.edge.distance() }

    /// Multiplies the `axis` coordinates of both endpoints.
    ///
    /// Returns `None` when `points` is not the store the bridge was found in.
    #[must_use]
    pub fn coordinate_product(&self, points: &PointStore, axis: Axis) -> Option<f64> {
        let left = points.get(self.edge.a())?;
        let right = points.get(self.edge.b())?;
        Some(left.coordinate(axis) * right.coordinate(axis))
    }

    /// Multiplies the `axis` coordinates of both endpoints exactly.
    ///
    /// Returns `None` when either coordinate is not a whole number within
    /// `i64` range, or when `points` is not the store the bridge was found in.
    #[must_use]
    pub fn integer_coordinate_product(&self, points: &PointStore, axis: Axis) -> Option<i128> {
        let left = whole_number(points.get(self.edge.a())?.coordinate(axis))?;
        let right = whole_number(points.get(self.edge.b())?.coordinate(axis))?;
        Some(i128::from(left) * i128::from(right))
    }
}

// 2^63 is exactly representable; every whole f64 below it fits in i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn whole_number(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < I64_BOUND).then_some(value as i64)
}

/// A bridge together with the merge walk that isolated it.
#[derive(Clone, Debug)]
pub struct BridgeOutcome {
    bridge: Bridge,
    merge: MergeOutcome,
}

impl BridgeOutcome {
    /// Returns the bridge.
    #[must_use]
    #[rustfmt::skip]
    pub fn bridge(&self) -> Bridge { self.bridge }

    /// Returns the merge walk that left two clusters.
    #[must_use]
    #[rustfmt::skip]
    pub fn merge(&self) -> &MergeOutcome { &self.merge }
}

/// Runs convergence mode over `edges` from a fresh forest.
///
/// # Errors
/// Returns [`JunctionError::InvalidInput`] for fewer than two points and
/// [`JunctionError::InvariantViolation`] when no cross-cluster edge exists,
/// which indicates a defect in graph construction or the forest.
///
/// # Examples
/// ```
/// use junction_core::{EdgeStrategy, Metric, PointStore, build_edge_sequence, find_bridge};
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
/// let outcome = find_bridge(&edges).expect("bridge exists");
/// assert_eq!(outcome.bridge().endpoints(), (1, 2));
/// ```
#[instrument(
    name = "core.bridge",
    err,
    skip(edges),
    fields(points = edges.point_count(), edges = edges.len()),
)]
pub fn find_bridge(edges: &EdgeSequence) -> Result<BridgeOutcome> {
    let merge = greedy_merge(edges, MergeTarget::UntilTwo)?;
    let mut forest = merge.forest().clone();
    let edge = first_crossing_edge(edges, &mut forest)?;

    info!(
        a = edge.a(),
        b = edge.b(),
        distance = edge.distance(),
        "bridge found"
    );

    Ok(BridgeOutcome {
        bridge: Bridge { edge },
        merge,
    })
}

/// Scans `edges` from the start for the first edge whose endpoints lie in
/// different clusters of `forest`.
///
/// # Errors
/// Returns [`JunctionError::InvariantViolation`] when every edge is internal
/// to a cluster.
pub fn first_crossing_edge(edges: &EdgeSequence, forest: &mut ClusterForest) -> Result<Edge> {
    edges
        .iter()
        .find(|edge| !forest.same_cluster(edge.a(), edge.b()))
        .copied()
        .ok_or_else(|| JunctionError::InvariantViolation {
            invariant: "two clusters must be joined by at least one edge",
            points: edges.point_count(),
            clusters: forest.cluster_count(),
        })
}
