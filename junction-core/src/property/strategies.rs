//! Point-cloud strategies for property tests.
//!
//! Continuous clouds rarely tie; lattice clouds tie constantly and include
//! duplicate points, which exercises the `(distance, a, b)` ordering.

use junction_test_support::fixtures::{lattice_cloud, seeded_cloud};
use proptest::prelude::*;

const MIN_POINTS: usize = 2;
const MAX_POINTS: usize = 24;
const CONTINUOUS_EXTENT: f64 = 1_000.0;
const LATTICE_SIDE: u32 = 4;

/// Coordinate layout of a generated cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CloudShape {
    Continuous,
    Lattice,
}

/// A generated cloud plus a bounded merge count valid for it.
#[derive(Clone, Debug)]
pub(super) struct CloudFixture {
    pub(super) shape: CloudShape,
    pub(super) coords: Vec<[f64; 3]>,
    pub(super) merges: usize,
}

/// Builds the fixture for one shape and seed.
pub(super) fn generate_cloud(
    shape: CloudShape,
    seed: u64,
    count: usize,
    merge_pick: usize,
) -> CloudFixture {
    let coords = match shape {
        CloudShape::Continuous => seeded_cloud(seed, count, CONTINUOUS_EXTENT),
        CloudShape::Lattice => lattice_cloud(seed, count, LATTICE_SIDE),
    };
    let merges = 1 + merge_pick % (count - 1);
    CloudFixture {
        shape,
        coords,
        merges,
    }
}

pub(super) fn cloud_strategy() -> impl Strategy<Value = CloudFixture> {
    (
        prop_oneof![Just(CloudShape::Continuous), Just(CloudShape::Lattice)],
        any::<u64>(),
        MIN_POINTS..=MAX_POINTS,
        any::<usize>(),
    )
        .prop_map(|(shape, seed, count, merge_pick)| {
            generate_cloud(shape, seed, count, merge_pick)
        })
}
