//! Junction core library.
//!
//! Greedy nearest-pair clustering over points in 3-space: build the complete
//! graph of Euclidean distances, then merge the closest pair of clusters
//! repeatedly, either for a fixed number of merges or until two clusters
//! remain and the shortest edge between them (the bridge) can be reported.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod bridge;
mod builder;
mod distance;
mod edges;
mod error;
mod forest;
mod junction;
mod merge;
mod points;
mod result;

pub use crate::{
    bridge::{Bridge, BridgeOutcome, find_bridge, first_crossing_edge},
    builder::{DEFAULT_TOP_M, JunctionBuilder},
    distance::{Metric, euclidean_distance},
    edges::{Edge, EdgeSequence, EdgeStrategy, build_edge_sequence, pair_count},
    error::{
        ConfigurationIssue, JunctionError, JunctionErrorCode, PointError, PointErrorCode, Result,
    },
    forest::ClusterForest,
    junction::Junction,
    merge::{MergeOutcome, MergeTarget, greedy_merge},
    points::{Axis, Point, PointId, PointStore},
    result::{BoundedReport, ClusterSizes, ClusteringReport, ConvergenceReport},
};

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;
