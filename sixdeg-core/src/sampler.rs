//! Randomised selection of peers from the reference node's component.
//!
//! The permutation draws every swap partner from the whole sequence rather
//! than from the shrinking unsorted tail. Keep it that way: recorded runs
//! depend on this exact draw pattern for a given seed.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::instrument;

use crate::{component::Component, graph::NodeId};

/// Ordered component members, excluding the reference node.
///
/// # Examples
/// ```
/// use sixdeg_core::{AdjacencyGraph, SampleSet, find_component};
///
/// let graph = AdjacencyGraph::try_from_rows(3, vec![vec![1, 2], vec![0], vec![0]])?;
/// let component = find_component(&graph, 0)?;
/// let sample = SampleSet::from_component(&component, 0);
/// assert_eq!(sample.as_slice(), &[1, 2]);
/// assert_eq!(sample.evaluation_prefix(), &[1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleSet {
    members: Vec<NodeId>,
}

impl SampleSet {
    /// Builds the sample from `component`, dropping `reference`.
    #[must_use]
    pub fn from_component(component: &Component, reference: NodeId) -> Self {
        Self::from_members(component.iter(), reference)
    }

    /// Builds the sample from arbitrary members, dropping `reference`.
    #[must_use]
    pub fn from_members(members: impl IntoIterator<Item = NodeId>, reference: NodeId) -> Self {
        Self {
            members: members
                .into_iter()
                .filter(|&node| node != reference)
                .collect(),
        }
    }

    /// Number of candidate peers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether there are no candidate peers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns whether `node` is a candidate peer.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    /// Candidate peers in their current order.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.members
    }

    /// The first `floor(len / 2)` peers; these are the ones evaluated.
    #[must_use]
    pub fn evaluation_prefix(&self) -> &[NodeId] {
        let half = self.members.len() / 2;
        self.members.get(..half).unwrap_or_default()
    }
}

/// Owns the random generator used to permute a [`SampleSet`].
///
/// Construct with [`Sampler::seeded`] for reproducible runs; two samplers with
/// the same seed produce the same permutation of the same input.
///
/// # Examples
/// ```
/// use sixdeg_core::{SampleSet, Sampler};
///
/// let mut left = SampleSet::from_members(0..10, 0);
/// let mut right = left.clone();
/// Sampler::seeded(7).shuffle(&mut left);
/// Sampler::seeded(7).shuffle(&mut right);
/// assert_eq!(left, right);
/// ```
#[derive(Clone, Debug)]
pub struct Sampler<R = SmallRng> {
    rng: R,
}

impl Sampler<SmallRng> {
    /// Creates a sampler with a deterministic seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Creates a sampler seeded from operating-system entropy. Repeated runs
    /// select different samples.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> Sampler<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Permutes `sample` in place.
    ///
    /// For each position `i` in `0..len - 1`, swaps it with a position drawn
    /// uniformly from the full range `0..len`.
    #[instrument(name = "core.shuffle", skip_all, fields(len = sample.len()))]
    pub fn shuffle(&mut self, sample: &mut SampleSet) {
        let len = sample.members.len();
        for i in 0..len.saturating_sub(1) {
            let j = self.rng.gen_range(0..len);
            sample.members.swap(i, j);
        }
    }
}
