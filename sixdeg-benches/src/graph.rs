//! Seeded synthetic co-appearance graphs.
//!
//! Every actor sits on a ring, so the whole graph is one component, and
//! receives a fixed number of random chords to other actors. The chords keep
//! mean distances small, which resembles real co-appearance data far more
//! than a bare ring does.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use sixdeg_core::{AdjacencyGraph, NodeId};

use crate::error::BenchSetupError;

/// Errors raised for unusable synthetic graph configurations.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticGraphError {
    /// A ring needs at least three actors.
    #[error("a synthetic graph needs at least 3 actors (got {actors})")]
    TooFewActors {
        /// Requested actor count.
        actors: usize,
    },
}

/// Configuration for [`synthetic_graph`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of actors.
    pub actors: usize,
    /// Random chords added per actor.
    pub chords_per_actor: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a connected, undirected graph from `config`.
///
/// # Errors
/// Returns [`SyntheticGraphError::TooFewActors`] for fewer than three actors.
///
/// # Examples
/// ```
/// use sixdeg_benches::graph::{SyntheticGraphConfig, synthetic_graph};
///
/// let config = SyntheticGraphConfig { actors: 10, chords_per_actor: 1, seed: 42 };
/// let graph = synthetic_graph(&config).expect("valid config");
/// assert_eq!(graph.len(), 10);
/// ```
pub fn synthetic_graph(config: &SyntheticGraphConfig) -> Result<AdjacencyGraph, BenchSetupError> {
    let actors = config.actors;
    if actors < 3 {
        return Err(SyntheticGraphError::TooFewActors { actors }.into());
    }

    let mut rows = AdjacencyGraph::try_empty_rows(actors)?;
    for node in 1..actors {
        link(&mut rows, node - 1, node);
    }
    link(&mut rows, actors - 1, 0);

    let mut rng = SmallRng::seed_from_u64(config.seed);
    for node in 0..actors {
        for _ in 0..config.chords_per_actor {
            let other = rng.gen_range(0..actors);
            if other != node {
                link(&mut rows, node, other);
            }
        }
    }

    Ok(AdjacencyGraph::try_from_rows(actors, rows)?)
}

fn link(rows: &mut [Vec<NodeId>], left: NodeId, right: NodeId) {
    if let Some(row) = rows.get_mut(left) {
        row.push(right);
    }
    if let Some(row) = rows.get_mut(right) {
        row.push(left);
    }
}
