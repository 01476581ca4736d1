//! Complete-graph edge construction.
//!
//! Every unordered pair of points becomes one [`Edge`]. The resulting
//! [`EdgeSequence`] is sorted by `(distance, a, b)`, which is a total order
//! because each pair occurs once, so the merge walk is reproducible no matter
//! how the distances were computed.
//!
//! With the `cpu` feature the distance rows are filled in parallel via Rayon.
//! Each row owns a disjoint slice of the output buffer and the buffer is
//! sorted in place, so no intermediate copies are made.

use std::cmp::Ordering;

#[cfg(feature = "cpu")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    Result,
    distance::Metric,
    error::JunctionError,
    points::{Point, PointId, PointStore},
};

/// A weighted pair of points in canonical form (`a < b`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    a: PointId,
    b: PointId,
    distance: f64,
}

impl Edge {
    const PLACEHOLDER: Self = Self {
        a: 0,
        b: 0,
        distance: 0.0,
    };

    /// Builds an edge between two distinct points, ordering the endpoints.
    ///
    /// Returns `None` for self-pairs.
    #[must_use]
    pub fn new(left: PointId, right: PointId, distance: f64) -> Option<Self> {
        match left.cmp(&right) {
            Ordering::Less => Some(Self {
                a: left,
                b: right,
                distance,
            }),
            Ordering::Greater => Some(Self {
                a: right,
                b: left,
                distance,
            }),
            Ordering::Equal => None,
        }
    }

    fn between(left: &Point, right: &Point, metric: Metric) -> Self {
        Self {
            a: left.id(),
            b: right.id(),
            distance: metric.distance(left, right),
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn a(&self) -> PointId { self.a }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn b(&self) -> PointId { self.b }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub fn distance(&self) -> f64 { self.distance }

    /// Returns both endpoints as `(a, b)`.
    #[must_use]
    #[rustfmt::skip]
    pub fn endpoints(&self) -> (PointId, PointId) { (self.a, self.b) }
}

impl Eq for Edge {}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.a.cmp(&other.a))
            .then_with(|| self.b.cmp(&other.b))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All edges of the complete graph over a point set, sorted ascending.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSequence {
    edges: Vec<Edge>,
    point_count: usize,
}

impl EdgeSequence {
    /// Returns the sorted edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the number of points the graph was built over.
    #[must_use]
    #[rustfmt::skip]
    pub fn point_count(&self) -> usize { self.point_count }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when the sequence holds no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Iterates over the edges in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }
}

impl<'a> IntoIterator for &'a EdgeSequence {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Selects how pairwise distances are computed.
///
/// `Auto` resolves to `Parallel` when the `cpu` feature is compiled in and to
/// `Sequential` otherwise. Every strategy yields an identical sequence.
///
/// # Examples
/// ```
/// use junction_core::EdgeStrategy;
///
/// assert_eq!(EdgeStrategy::default(), EdgeStrategy::Auto);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EdgeStrategy {
    /// Let the library pick the fastest available strategy.
    #[default]
    Auto,
    /// Compute every distance on the calling thread.
    Sequential,
    /// Compute distance rows on the Rayon pool.
    Parallel,
}

impl EdgeStrategy {
    /// Resolves `Auto` and checks availability in the current build.
    ///
    /// # Errors
    /// Returns [`JunctionError::BackendUnavailable`] when `Parallel` is
    /// requested without the `cpu` feature.
    pub fn resolve(self) -> Result<Self> {
        match self {
            Self::Auto if cfg!(feature = "cpu") => Ok(Self::Parallel),
            Self::Auto | Self::Sequential => Ok(Self::Sequential),
            Self::Parallel if cfg!(feature = "cpu") => Ok(Self::Parallel),
            Self::Parallel => Err(JunctionError::BackendUnavailable { requested: self }),
        }
    }
}

/// Returns the number of unordered pairs over `points` items.
#[must_use]
pub fn pair_count(points: usize) -> usize {
    points.saturating_mul(points.saturating_sub(1)) / 2
}

/// Builds the sorted edge sequence for the complete graph over `points`.
///
/// # Errors
/// Returns [`JunctionError::InvalidInput`] when fewer than two points are
/// supplied, [`JunctionError::BackendUnavailable`] when `strategy` cannot be
/// honoured by this build, and [`JunctionError::DistanceOverflow`] when some
/// pair lies further apart than `f64::MAX`.
///
/// # Examples
/// ```
/// use junction_core::{EdgeStrategy, Metric, PointStore, build_edge_sequence};
///
/// let points = PointStore::from_coordinates([
///     [0.0, 0.0, 0.0],
///     [0.0, 0.0, 3.0],
///     [0.0, 0.0, 1.0],
/// ])
/// .expect("coordinates are finite");
/// let edges = build_edge_sequence(&points, Metric::Euclidean, EdgeStrategy::Sequential)
///     .expect("three points form a graph");
/// let pairs: Vec<_> = edges.iter().map(|edge| edge.endpoints()).collect();
/// assert_eq!(pairs, vec![(0, 2), (1, 2), (0, 1)]);
/// ```
#[instrument(
    name = "core.build_edges",
    err,
    skip(points),
    fields(points = points.len(), strategy = ?strategy),
)]
pub fn build_edge_sequence(
    points: &PointStore,
    metric: Metric,
    strategy: EdgeStrategy,
) -> Result<EdgeSequence> {
    let point_count = points.len();
    if point_count < 2 {
        return Err(JunctionError::InvalidInput {
            points: point_count,
        });
    }

    let resolved = strategy.resolve()?;
    let mut edges = vec![Edge::PLACEHOLDER; pair_count(point_count)];
    let rows = split_rows(point_count, &mut edges);
    let slice = points.as_slice();

    match resolved {
        #[cfg(feature = "cpu")]
        EdgeStrategy::Parallel => {
            rows.into_par_iter()
                .for_each(|(row, out)| fill_row(slice, row, out, metric));
            edges.par_sort_unstable();
        }
        _ => {
            for (row, out) in rows {
                fill_row(slice, row, out, metric);
            }
            edges.sort_unstable();
        }
    }

    // Infinite distances sort last, so checking the tail covers every edge.
    if let Some(edge) = edges.last().filter(|edge| !edge.distance().is_finite()) {
        return Err(JunctionError::DistanceOverflow {
            a: edge.a(),
            b: edge.b(),
        });
    }

    debug!(edges = edges.len(), resolved = ?resolved, "edge sequence built");
    Ok(EdgeSequence { edges, point_count })
}

/// Splits the output buffer into one slice per source point; row `i` holds
/// the pairs `(i, j)` for every `j > i`.
fn split_rows(point_count: usize, mut rest: &mut [Edge]) -> Vec<(usize, &mut [Edge])> {
    let mut rows = Vec::with_capacity(point_count.saturating_sub(1));
    for row in 0..point_count.saturating_sub(1) {
        let width = point_count - 1 - row;
        let (out, tail) = std::mem::take(&mut rest).split_at_mut(width);
        rows.push((row, out));
        rest = tail;
    }
    rows
}

fn fill_row(points: &[Point], row: usize, out: &mut [Edge], metric: Metric) {
    let Some((left, later)) = points.get(row..).and_then(<[Point]>::split_first) else {
        return;
    };
    for (slot, right) in out.iter_mut().zip(later) {
        *slot = Edge::between(left, right, metric);
    }
}
