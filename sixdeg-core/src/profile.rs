//! Single-source shortest hop counts via breadth-first search.
//!
//! Every call allocates its own [`DistanceMap`]; no traversal state survives
//! between profiles, so repeated calls on the same graph agree exactly.

use std::collections::VecDeque;

use tracing::{instrument, trace};

use crate::{
    error::{Result, SixdegError},
    graph::{AdjacencyGraph, NodeId},
};

/// Shortest hop count from one start node to every node of the graph.
///
/// `None` marks a node the search never reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMap {
    hops: Vec<Option<u32>>,
}

impl DistanceMap {
    fn unreached(actors: usize) -> Self {
        Self {
            hops: vec![None; actors],
        }
    }

    /// Distance to `node`, or `None` when it is unreachable or unknown.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<u32> {
        self.hops.get(node).copied().flatten()
    }

    /// Number of nodes reached, including the start node.
    #[must_use]
    pub fn reached(&self) -> usize {
        self.hops.iter().filter(|hop| hop.is_some()).count()
    }

    /// Iterates over `(node, distance)` for every reached node in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.hops
            .iter()
            .enumerate()
            .filter_map(|(node, hop)| hop.map(|distance| (node, distance)))
    }

    /// Number of slots, which equals the graph's actor count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Returns whether the map covers an empty graph.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Sum and count of the strictly positive distances in a [`DistanceMap`].
///
/// # Examples
/// ```
/// use sixdeg_core::MeanDistance;
///
/// let mean = MeanDistance::new(3, 2).expect("two nodes were reached");
/// assert_eq!(mean.value(), 1.5);
/// assert!(MeanDistance::new(0, 0).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeanDistance {
    total: u64,
    reachable: usize,
}

impl MeanDistance {
    /// Returns `None` when `reachable` is zero, because no mean exists.
    #[must_use]
    pub fn new(total: u64, reachable: usize) -> Option<Self> {
        (reachable > 0).then_some(Self { total, reachable })
    }

    /// Sum of hop counts over reachable nodes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of nodes reached at a positive distance.
    #[must_use]
    pub fn reachable(&self) -> usize {
        self.reachable
    }

    /// The mean hop count.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.total as f64 / self.reachable as f64
    }
}

/// Result of profiling one start node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceProfile {
    start: NodeId,
    distances: DistanceMap,
    mean: Option<MeanDistance>,
}

impl DistanceProfile {
    /// Node the search started from.
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Per-node hop counts.
    #[must_use]
    pub fn distances(&self) -> &DistanceMap {
        &self.distances
    }

    /// Mean distance to every other reachable node, or `None` when the start
    /// node reaches nothing but itself. `None` means no comparison is possible.
    #[must_use]
    pub fn mean(&self) -> Option<MeanDistance> {
        self.mean
    }

    /// Consumes the profile, keeping only the mean.
    #[must_use]
    pub fn into_mean(self) -> Option<MeanDistance> {
        self.mean
    }
}

/// Runs a breadth-first search from `start` and summarises the distances.
///
/// # Errors
/// Returns [`SixdegError::NodeOutOfRange`] when `start` is not a node of
/// `graph`.
///
/// # Examples
/// ```
/// use sixdeg_core::{AdjacencyGraph, profile};
///
/// let graph = AdjacencyGraph::try_from_rows(
///     5,
///     vec![vec![2], vec![2], vec![0, 1], vec![4], vec![3]],
/// )?;
/// let result = profile(&graph, 0)?;
/// assert_eq!(result.distances().get(1), Some(2));
/// assert_eq!(result.distances().get(3), None);
/// assert_eq!(result.mean().map(|mean| mean.value()), Some(1.5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(name = "core.profile", err, skip(graph), fields(actors = graph.len()))]
pub fn profile(graph: &AdjacencyGraph, start: NodeId) -> Result<DistanceProfile> {
    if !graph.contains(start) {
        return Err(SixdegError::NodeOutOfRange {
            node: start,
            actors: graph.len(),
        });
    }

    let distances = breadth_first(graph, start);
    let (total, reachable) = distances
        .iter()
        .filter(|&(_, hops)| hops > 0)
        .fold((0_u64, 0_usize), |(total, count), (_, hops)| {
            (total + u64::from(hops), count + 1)
        });
    let mean = MeanDistance::new(total, reachable);
    trace!(reachable, total, "profile computed");

    Ok(DistanceProfile {
        start,
        distances,
        mean,
    })
}

fn breadth_first(graph: &AdjacencyGraph, start: NodeId) -> DistanceMap {
    let mut distances = DistanceMap::unreached(graph.len());
    let mut queue = VecDeque::new();
    if let Some(slot) = distances.hops.get_mut(start) {
        *slot = Some(0);
        queue.push_back((start, 0_u32));
    }

    while let Some((node, hops)) = queue.pop_front() {
        let next = hops + 1;
        for &neighbour in graph.neighbours(node) {
            match distances.hops.get_mut(neighbour) {
                Some(slot) if slot.is_none() => {
                    *slot = Some(next);
                    queue.push_back((neighbour, next));
                }
                _ => {}
            }
        }
    }
    distances
}
