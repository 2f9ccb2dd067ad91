//! Helpers shared by the `sixdeg-core` integration tests.

use sixdeg_core::AdjacencyGraph;
use sixdeg_test_support::graphs::{Rows, illustrative_rows};

/// Builds a graph from fixture rows.
pub fn graph(rows: Rows) -> AdjacencyGraph {
    let actors = rows.len();
    AdjacencyGraph::try_from_rows(actors, rows).expect("fixture rows must be valid")
}

/// Five actors with edges `0-2`, `1-2`, and `3-4`.
pub fn illustrative() -> AdjacencyGraph {
    graph(illustrative_rows())
}
