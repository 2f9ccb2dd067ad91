//! Graph fixtures shared by the core, loader, CLI, and benchmark crates.
//!
//! Fixtures are plain adjacency rows (`Vec<Vec<usize>>`) so this crate does
//! not depend on `sixdeg-core`; callers convert them with
//! `AdjacencyGraph::try_from_rows`. Every generator produces symmetric rows
//! with ids in `[0, rows.len())`.

use std::fmt::Write as _;

use proptest::prelude::*;
use rand::Rng;

/// Adjacency rows for one graph.
pub type Rows = Vec<Vec<usize>>;

/// Five actors with edges `0-2`, `1-2`, and `3-4`.
#[must_use]
pub fn illustrative_rows() -> Rows {
    vec![vec![2], vec![2], vec![0, 1], vec![4], vec![3]]
}

/// The illustrative graph in the loader's text format, tab separated.
pub const ILLUSTRATIVE_TEXT: &str = "5\n0\t2\n1\t2\n2\t0\t1\n3\t4\n4\t3\n";

/// A simple path `0 - 1 - ... - (len - 1)`.
#[must_use]
pub fn path_rows(len: usize) -> Rows {
    let mut rows = vec![Vec::new(); len];
    for node in 1..len {
        link(&mut rows, node - 1, node);
    }
    rows
}

/// A star whose hub is node `0`, connected to `leaves` other nodes.
#[must_use]
pub fn star_rows(leaves: usize) -> Rows {
    let mut rows = vec![Vec::new(); leaves + 1];
    for leaf in 1..=leaves {
        link(&mut rows, 0, leaf);
    }
    rows
}

/// Random undirected graph with `nodes` actors and roughly `edges` edges.
///
/// Self-loops are skipped; duplicate draws are kept, as real co-appearance
/// exports list repeated collaborations.
pub fn random_rows<R: Rng + ?Sized>(rng: &mut R, nodes: usize, edges: usize) -> Rows {
    let mut rows = vec![Vec::new(); nodes];
    if nodes < 2 {
        return rows;
    }
    for _ in 0..edges {
        let left = rng.gen_range(0..nodes);
        let right = rng.gen_range(0..nodes);
        if left != right {
            link(&mut rows, left, right);
        }
    }
    rows
}

/// Proptest strategy producing symmetric graphs of `1..=max_nodes` actors.
pub fn undirected_rows(max_nodes: usize) -> impl Strategy<Value = Rows> {
    (1..=max_nodes.max(1)).prop_flat_map(|nodes| {
        proptest::collection::vec((0..nodes, 0..nodes), 0..=nodes * 2).prop_map(move |pairs| {
            let mut rows = vec![Vec::new(); nodes];
            for (left, right) in pairs {
                link(&mut rows, left, right);
            }
            rows
        })
    })
}

/// Renders rows in the loader's text format: the actor count, then one line
/// per actor holding its id followed by its neighbours.
#[must_use]
pub fn to_adjacency_text(rows: &[Vec<usize>]) -> String {
    let mut text = format!("{}\n", rows.len());
    for (node, neighbours) in rows.iter().enumerate() {
        let _ = write!(text, "{node}");
        for neighbour in neighbours {
            let _ = write!(text, "\t{neighbour}");
        }
        text.push('\n');
    }
    text
}

fn link(rows: &mut [Vec<usize>], left: usize, right: usize) {
    if let Some(row) = rows.get_mut(left) {
        row.push(right);
    }
    if left != right {
        if let Some(row) = rows.get_mut(right) {
            row.push(left);
        }
    }
}
