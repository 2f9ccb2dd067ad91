//! Connected-component discovery via iterative depth-first search.
//!
//! The walk keeps an explicit stack so very deep or skewed components never
//! grow the call stack. Nodes are marked visited when pushed, which bounds
//! every node to a single expansion; the resulting set is independent of the
//! order neighbours are explored.

use tracing::{debug, instrument};

use crate::{
    error::{Result, SixdegError},
    graph::{AdjacencyGraph, NodeId},
};

/// Nodes reachable from a start node, including the start itself.
///
/// # Examples
/// ```
/// use sixdeg_core::{AdjacencyGraph, find_component};
///
/// let graph = AdjacencyGraph::try_from_rows(
///     5,
///     vec![vec![2], vec![2], vec![0, 1], vec![4], vec![3]],
/// )?;
/// let component = find_component(&graph, 2)?;
/// assert_eq!(component.members(), &[0, 1, 2]);
/// assert!(!component.contains(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    start: NodeId,
    visited: Vec<bool>,
    members: Vec<NodeId>,
}

impl Component {
    /// Node the search started from.
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Returns whether `node` belongs to the component.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Component members in ascending identifier order.
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Number of members, including the start node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a component contains at least its start node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over members in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }
}

/// Collects every node reachable from `start`.
///
/// # Errors
/// Returns [`SixdegError::NodeOutOfRange`] when `start` is not a node of
/// `graph`.
#[instrument(name = "core.find_component", err, skip(graph), fields(actors = graph.len()))]
pub fn find_component(graph: &AdjacencyGraph, start: NodeId) -> Result<Component> {
    if !graph.contains(start) {
        return Err(SixdegError::NodeOutOfRange {
            node: start,
            actors: graph.len(),
        });
    }

    let mut visited = vec![false; graph.len()];
    let mut stack = vec![start];
    mark(&mut visited, start);

    while let Some(node) = stack.pop() {
        for &neighbour in graph.neighbours(node) {
            if mark(&mut visited, neighbour) {
                stack.push(neighbour);
            }
        }
    }

    let members: Vec<NodeId> = visited
        .iter()
        .enumerate()
        .filter_map(|(node, &seen)| seen.then_some(node))
        .collect();
    debug!(size = members.len(), "component discovered");

    Ok(Component {
        start,
        visited,
        members,
    })
}

/// Marks `node` visited, returning `true` when it was not seen before.
fn mark(visited: &mut [bool], node: NodeId) -> bool {
    match visited.get_mut(node) {
        Some(seen) if !*seen => {
            *seen = true;
            true
        }
        _ => false,
    }
}
