//! Shared test utilities for `sixdeg-core`.

use proptest::test_runner::Config as ProptestConfig;
use sixdeg_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::graph::{AdjacencyGraph, NodeId};

/// Builds a proptest configuration from the shared CI profile, so every suite
/// honours `PROPTEST_CASES` and `SIXDEG_PBT_FORK` the same way.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Converts fixture rows into a graph, panicking on invalid fixtures.
pub(crate) fn graph_from_rows(rows: Vec<Vec<NodeId>>) -> AdjacencyGraph {
    let actors = rows.len();
    AdjacencyGraph::try_from_rows(actors, rows).expect("fixture rows must form a valid graph")
}
