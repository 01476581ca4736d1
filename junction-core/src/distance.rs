//! Distance primitives for the complete point graph.
//!
//! Only the straight-line Euclidean metric is supported. Points are validated
//! as finite when the [`crate::PointStore`] is built, so these routines are
//! infallible.

use crate::points::Point;

/// Metric used to weigh the edges of the complete graph.
///
/// # Examples
/// ```
/// use junction_core::{Metric, PointStore};
///
/// let points = PointStore::from_coordinates([[0.0, 0.0, 0.0], [1.0, 2.0, 2.0]])
///     .expect("coordinates are finite");
/// let [a, b] = points.as_slice() else { unreachable!() };
/// assert_eq!(Metric::Euclidean.distance(a, b), 3.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Metric {
    /// Straight-line distance in 3-space.
    #[default]
    Euclidean,
}

impl Metric {
    /// Computes the distance between two points under this metric.
    #[must_use]
    pub fn distance(self, left: &Point, right: &Point) -> f64 {
        match self {
            Self::Euclidean => euclidean_distance(left, right),
        }
    }
}

/// Computes the Euclidean distance between two points.
///
/// Squares are summed directly when that sum is a normal float. Otherwise the
/// differences are rescaled by the largest one first, so coordinates near the
/// ends of the `f64` range neither overflow to infinity nor flush to zero. The
/// result is infinite only when the true distance exceeds `f64::MAX`.
#[must_use]
pub fn euclidean_distance(left: &Point, right: &Point) -> f64 {
    let (l, r) = (left.coords(), right.coords());
    let diffs = [(l[0] - r[0]).abs(), (l[1] - r[1]).abs(), (l[2] - r[2]).abs()];

    let mut sum = 0.0f64;
    for diff in diffs {
        sum += diff * diff;
    }
    if sum.is_normal() {
        return sum.sqrt();
    }

    let scale = diffs.iter().copied().fold(0.0f64, f64::max);
    if scale == 0.0 || scale.is_infinite() {
        return scale;
    }
    let mut scaled = 0.0f64;
    for diff in diffs {
        let ratio = diff / scale;
        scaled += ratio * ratio;
    }
    scale * scaled.sqrt()
}
