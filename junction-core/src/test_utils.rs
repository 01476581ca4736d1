//! Shared test utilities for `junction-core`.

use junction_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{EdgeSequence, EdgeStrategy, Metric, PointStore, build_edge_sequence};

/// Builds a proptest configuration from the shared CI profile so every
/// property suite honours `JUNCTION_PBT_CASES` and `JUNCTION_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Wraps raw coordinates in a store and builds its edge sequence with the
/// given strategy.
pub(crate) fn store_and_edges(
    coords: &[[f64; 3]],
    strategy: EdgeStrategy,
) -> (PointStore, EdgeSequence) {
    let points = PointStore::from_coordinates(coords.iter().copied())
        .expect("fixture coordinates must be finite");
    let edges = build_edge_sequence(&points, Metric::Euclidean, strategy)
        .expect("fixture must have at least two points");
    (points, edges)
}
