//! Benchmark parameter types.

use std::fmt;

/// Shape of a synthetic graph used as a benchmark input.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of actors.
    pub actors: usize,
    /// Random collaborations added per actor on top of the ring backbone.
    pub chords_per_actor: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},c={}", self.actors, self.chords_per_actor)
    }
}
