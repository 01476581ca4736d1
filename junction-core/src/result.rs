//! Report types produced by [`crate::Junction::run`].

use std::num::NonZeroUsize;

use crate::{Result, bridge::Bridge, error::JunctionError};

/// Final cluster sizes, largest first.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use junction_core::ClusterSizes;
///
/// let sizes = ClusterSizes::new(vec![1, 5, 2]);
/// assert_eq!(sizes.as_slice(), &[5, 2, 1]);
/// let top = NonZeroUsize::new(2).expect("non-zero");
/// assert_eq!(sizes.top_product(top), Ok(10));
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ClusterSizes {
    sizes: Vec<usize>,
}

impl ClusterSizes {
    /// Wraps `sizes`, sorting them largest first.
    #[must_use]
    pub fn new(mut sizes: Vec<usize>) -> Self {
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        Self { sizes }
    }

    /// Returns the sizes, largest first.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[usize] { &self.sizes }

    /// Returns the number of clusters.
    #[must_use]
    #[rustfmt::skip]
    pub fn cluster_count(&self) -> usize { self.sizes.len() }

    /// Returns the number of points across all clusters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// Returns the largest cluster size, if any cluster exists.
    #[must_use]
    pub fn largest(&self) -> Option<usize> {
        self.sizes.first().copied()
    }

    /// Multiplies the `top_m` largest sizes.
    ///
    /// When fewer than `top_m` clusters exist only the existing sizes are
    /// multiplied; missing clusters are not padded with any value.
    ///
    /// # Errors
    /// Returns [`JunctionError::ProductOverflow`] when the product does not
    /// fit in a `u64`.
    pub fn top_product(&self, top_m: NonZeroUsize) -> Result<u64> {
        self.sizes
            .iter()
            .take(top_m.get())
            .try_fold(1u64, |acc, &size| {
                u64::try_from(size)
                    .ok()
                    .and_then(|size| acc.checked_mul(size))
            })
            .ok_or(JunctionError::ProductOverflow { top_m: top_m.get() })
    }
}

/// Outcome of bounded mode.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedReport {
    /// Number of successful merges performed.
    pub merges: usize,
    /// Number of edges visited, merges and skips combined.
    pub edges_consumed: usize,
    /// Final cluster sizes.
    pub sizes: ClusterSizes,
    /// How many of the largest sizes were multiplied.
    pub top_m: NonZeroUsize,
    /// Product of the `top_m` largest sizes.
    pub product: u64,
}

/// Outcome of convergence mode.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceReport {
    /// Number of successful merges performed before the bridge scan.
    pub merges: usize,
    /// Number of edges visited by the merge walk.
    pub edges_consumed: usize,
    /// Sizes of the two remaining clusters.
    pub sizes: ClusterSizes,
    /// Shortest edge between the two remaining clusters.
    pub bridge: Bridge,
    /// Product of the bridge endpoints' x coordinates.
    pub x_product: f64,
    /// Exact x product when both coordinates are whole numbers.
    pub x_product_integer: Option<i128>,
}

/// Result of a [`crate::Junction`] run in either mode.
#[derive(Clone, Debug, PartialEq)]
pub enum ClusteringReport {
    /// Bounded mode stopped after a fixed number of merges.
    Bounded(BoundedReport),
    /// Convergence mode stopped at two clusters and found their bridge.
    Convergence(ConvergenceReport),
}

impl ClusteringReport {
    /// Returns the final cluster sizes for either mode.
    #[must_use]
    pub fn sizes(&self) -> &ClusterSizes {
        match self {
            Self::Bounded(report) => &report.sizes,
            Self::Convergence(report) => &report.sizes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn top(m: usize) -> NonZeroUsize {
        NonZeroUsize::new(m).expect("test uses non-zero m")
    }

    #[rstest]
    #[case::exact(vec![2, 1, 1], 3, 2)]
    #[case::fewer_clusters_than_m(vec![2], 3, 2)]
    #[case::larger_first(vec![1, 4, 3, 2], 2, 12)]
    #[case::single(vec![7, 5], 1, 7)]
    fn top_product_uses_existing_sizes_only(
        #[case] sizes: Vec<usize>,
        #[case] m: usize,
        #[case] expected: u64,
    ) {
        assert_eq!(ClusterSizes::new(sizes).top_product(top(m)), Ok(expected));
    }

    #[test]
    fn top_product_reports_overflow() {
        let big = usize::try_from(u32::MAX).expect("usize holds u32");
        let sizes = ClusterSizes::new(vec![big, big, big]);
        assert_eq!(
            sizes.top_product(top(3)),
            Err(JunctionError::ProductOverflow { top_m: 3 })
        );
    }

    #[test]
    fn accessors_reflect_sorted_sizes() {
        let sizes = ClusterSizes::new(vec![1, 3, 2]);
        assert_eq!(sizes.largest(), Some(3));
        assert_eq!(sizes.total(), 6);
        assert_eq!(sizes.cluster_count(), 3);
        assert_eq!(ClusterSizes::default().largest(), None);
    }
}
