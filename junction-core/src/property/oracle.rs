//! Naive reference for the merge walk.
//!
//! Tracks membership as one label per point and relabels a whole cluster on
//! every merge. Quadratic per merge, which is fine at property-test sizes.

use crate::{Point, PointStore, euclidean_distance};

/// Result of the oracle walk.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct OracleWalk {
    /// Cluster label of every point.
    pub(super) labels: Vec<usize>,
    /// Merged pairs in merge order.
    pub(super) merged: Vec<(usize, usize)>,
}

impl OracleWalk {
    /// Cluster sizes, largest first.
    pub(super) fn sizes(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.labels.len()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        let mut sizes: Vec<usize> = counts.into_iter().filter(|&c| c > 0).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes
    }
}

/// Every pair `(distance, a, b)` with `a < b`, sorted lexicographically.
pub(super) fn sorted_pairs(points: &PointStore) -> Vec<(f64, usize, usize)> {
    let slice: &[Point] = points.as_slice();
    let mut pairs = Vec::new();
    for (a, left) in slice.iter().enumerate() {
        for (offset, right) in slice[a + 1..].iter().enumerate() {
            pairs.push((euclidean_distance(left, right), a, a + 1 + offset));
        }
    }
    pairs.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then_with(|| x.1.cmp(&y.1))
            .then_with(|| x.2.cmp(&y.2))
    });
    pairs
}

/// Performs `merges` successful merges by relabelling.
pub(super) fn relabel_walk(points: &PointStore, merges: usize) -> OracleWalk {
    let mut labels: Vec<usize> = (0..points.len()).collect();
    let mut merged = Vec::with_capacity(merges);
    for (_, a, b) in sorted_pairs(points) {
        if merged.len() == merges {
            break;
        }
        let (keep, drop) = (labels[a], labels[b]);
        if keep == drop {
            continue;
        }
        for label in &mut labels {
            if *label == drop {
                *label = keep;
            }
        }
        merged.push((a, b));
    }
    OracleWalk { labels, merged }
}

/// The shortest pair joining two different labels, by `(distance, a, b)`.
pub(super) fn brute_force_bridge(
    points: &PointStore,
    labels: &[usize],
) -> Option<(f64, usize, usize)> {
    sorted_pairs(points)
        .into_iter()
        .find(|&(_, a, b)| labels[a] != labels[b])
}

/// Product of the `top_m` largest sizes, widened so it cannot overflow here.
pub(super) fn top_product(sizes: &[usize], top_m: usize) -> u128 {
    sizes.iter().take(top_m).map(|&s| s as u128).product()
}
