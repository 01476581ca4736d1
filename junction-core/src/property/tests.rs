//! Property runners and parameterised cases for the merge walk.

use std::num::NonZeroUsize;

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rstest::rstest;

use crate::{
    ClusterSizes, EdgeStrategy, MergeTarget, find_bridge, greedy_merge,
    test_utils::{store_and_edges, suite_proptest_config},
};

use super::oracle::{brute_force_bridge, relabel_walk, top_product};
use super::strategies::{CloudFixture, CloudShape, cloud_strategy, generate_cloud};

const TOP_M: usize = 3;

fn describe(fixture: &CloudFixture) -> String {
    format!(
        "shape={:?}, points={}, merges={}",
        fixture.shape,
        fixture.coords.len(),
        fixture.merges
    )
}

fn run_bounded_matches_oracle(fixture: &CloudFixture) -> TestCaseResult {
    let (points, edges) = store_and_edges(&fixture.coords, EdgeStrategy::Sequential);
    let outcome = greedy_merge(&edges, MergeTarget::Merges(fixture.merges))
        .map_err(|err| TestCaseError::fail(format!("merge failed: {err} ({})", describe(fixture))))?;
    let oracle = relabel_walk(&points, fixture.merges);

    let merged: Vec<_> = outcome.merged_edges().iter().map(|e| e.endpoints()).collect();
    prop_assert_eq!(&merged, &oracle.merged, "merge order ({})", describe(fixture));
    prop_assert_eq!(outcome.cluster_sizes(), oracle.sizes(), "sizes ({})", describe(fixture));

    let sizes = ClusterSizes::new(outcome.cluster_sizes());
    prop_assert_eq!(sizes.total(), fixture.coords.len());
    prop_assert_eq!(sizes.cluster_count(), fixture.coords.len() - fixture.merges);

    let top_m = NonZeroUsize::new(TOP_M).ok_or_else(|| TestCaseError::fail("zero top_m"))?;
    let product = sizes
        .top_product(top_m)
        .map_err(|err| TestCaseError::fail(format!("product failed: {err}")))?;
    prop_assert_eq!(u128::from(product), top_product(&oracle.sizes(), TOP_M));
    Ok(())
}

fn run_bridge_is_minimal(fixture: &CloudFixture) -> TestCaseResult {
    let (points, edges) = store_and_edges(&fixture.coords, EdgeStrategy::Sequential);
    let outcome = find_bridge(&edges)
        .map_err(|err| TestCaseError::fail(format!("bridge failed: {err} ({})", describe(fixture))))?;
    let walk = relabel_walk(&points, points.len() - 2);
    let expected = brute_force_bridge(&points, &walk.labels)
        .ok_or_else(|| TestCaseError::fail("oracle found no crossing pair"))?;

    let bridge = outcome.bridge();
    prop_assert_eq!(bridge.endpoints(), (expected.1, expected.2), "{}", describe(fixture));
    prop_assert_eq!(bridge.distance().to_bits(), expected.0.to_bits());
    prop_assert_eq!(outcome.merge().forest().cluster_count(), 2);

    let mut forest = outcome.merge().forest().clone();
    prop_assert!(!forest.same_cluster(bridge.endpoints().0, bridge.endpoints().1));
    Ok(())
}

fn run_merges_only_coarsen(fixture: &CloudFixture) -> TestCaseResult {
    let (_, edges) = store_and_edges(&fixture.coords, EdgeStrategy::Sequential);
    let n = fixture.coords.len();
    let mut previous: Option<crate::ClusterForest> = None;
    let mut previous_largest = 1usize;

    for k in 1..n {
        let outcome = greedy_merge(&edges, MergeTarget::Merges(k))
            .map_err(|err| TestCaseError::fail(format!("K={k} failed: {err}")))?;
        let mut forest = outcome.into_forest();
        prop_assert_eq!(forest.cluster_count(), n - k);

        let largest = forest.cluster_sizes().first().copied().unwrap_or(0);
        prop_assert!(largest >= previous_largest, "largest cluster shrank at K={}", k);
        previous_largest = largest;

        if let Some(mut earlier) = previous.take() {
            for a in 0..n {
                for b in (a + 1)..n {
                    if earlier.same_cluster(a, b) {
                        prop_assert!(forest.same_cluster(a, b), "K={} split ({}, {})", k, a, b);
                    }
                }
            }
        }
        previous = Some(forest);
    }
    Ok(())
}

fn run_strategies_agree(fixture: &CloudFixture) -> TestCaseResult {
    let (_, sequential) = store_and_edges(&fixture.coords, EdgeStrategy::Sequential);
    let (_, repeated) = store_and_edges(&fixture.coords, EdgeStrategy::Sequential);
    prop_assert_eq!(&sequential, &repeated);

    #[cfg(feature = "cpu")]
    {
        let (_, parallel) = store_and_edges(&fixture.coords, EdgeStrategy::Parallel);
        prop_assert_eq!(&sequential, &parallel, "{}", describe(fixture));
    }

    let first = greedy_merge(&sequential, MergeTarget::Merges(fixture.merges))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let second = greedy_merge(&repeated, MergeTarget::Merges(fixture.merges))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(first.merged_edges(), second.merged_edges());
    prop_assert_eq!(first.cluster_sizes(), second.cluster_sizes());
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn bounded_walk_matches_relabel_oracle(fixture in cloud_strategy()) {
        run_bounded_matches_oracle(&fixture)?;
    }

    #[test]
    fn bridge_is_shortest_crossing_pair(fixture in cloud_strategy()) {
        run_bridge_is_minimal(&fixture)?;
    }

    #[test]
    fn increasing_merges_only_coarsen_the_partition(fixture in cloud_strategy()) {
        run_merges_only_coarsen(&fixture)?;
    }

    #[test]
    fn edge_strategies_and_reruns_agree(fixture in cloud_strategy()) {
        run_strategies_agree(&fixture)?;
    }
}

#[rstest]
#[case::continuous_small(CloudShape::Continuous, 42, 3)]
#[case::continuous_large(CloudShape::Continuous, 999, 24)]
#[case::lattice_small(CloudShape::Lattice, 42, 5)]
#[case::lattice_dense(CloudShape::Lattice, 7777, 24)]
#[case::lattice_pair(CloudShape::Lattice, 3, 2)]
fn seeded_clouds_satisfy_every_property(
    #[case] shape: CloudShape,
    #[case] seed: u64,
    #[case] count: usize,
) {
    let fixture = generate_cloud(shape, seed, count, usize::try_from(seed).unwrap_or(0));
    run_bounded_matches_oracle(&fixture).expect("bounded walk must match the oracle");
    run_bridge_is_minimal(&fixture).expect("bridge must be minimal");
    run_merges_only_coarsen(&fixture).expect("partitions must only coarsen");
    run_strategies_agree(&fixture).expect("strategies must agree");
}

#[test]
fn oracle_merges_tight_pairs_first() {
    let (points, _) = store_and_edges(
        &[
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 3.0],
            [10.0, 10.0, 10.0],
            [10.0, 10.0, 13.0],
        ],
        EdgeStrategy::Sequential,
    );
    let walk = relabel_walk(&points, 2);
    assert_eq!(walk.merged, vec![(0, 1), (2, 3)]);
    assert_eq!(walk.sizes(), vec![2, 2]);
    let bridge = brute_force_bridge(&points, &walk.labels).expect("two clusters remain");
    assert_eq!((bridge.1, bridge.2), (1, 2));
}
