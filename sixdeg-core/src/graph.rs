//! Immutable adjacency storage for the co-appearance graph.
//!
//! Nodes are dense integer identifiers in `[0, actors)`. Every slot holds the
//! ordered neighbour list read from the input; actors without a row keep an
//! empty list. Bounds are validated once at construction so traversals can
//! look up neighbours without re-checking identifiers.

use tracing::instrument;

use crate::error::MalformedInputError;

/// Dense identifier of an actor. Identity is the index into the graph.
pub type NodeId = usize;

/// Undirected, unweighted graph stored as one neighbour list per actor.
///
/// # Examples
/// ```
/// use sixdeg_core::AdjacencyGraph;
///
/// let graph = AdjacencyGraph::try_from_rows(3, vec![vec![1], vec![0, 2], vec![1]])
///     .expect("rows are well formed");
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.neighbours(1), &[0, 2]);
/// assert_eq!(graph.edge_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph {
    rows: Vec<Vec<NodeId>>,
}

impl AdjacencyGraph {
    /// Returns `actors` empty neighbour lists, ready for a loader to fill.
    ///
    /// # Errors
    /// Returns [`MalformedInputError::ActorCountTooLarge`] when storage for
    /// `actors` rows cannot be reserved.
    ///
    /// # Examples
    /// ```
    /// use sixdeg_core::AdjacencyGraph;
    ///
    /// let rows = AdjacencyGraph::try_empty_rows(4)?;
    /// assert_eq!(rows.len(), 4);
    /// assert!(rows.iter().all(Vec::is_empty));
    /// assert!(AdjacencyGraph::try_empty_rows(usize::MAX).is_err());
    /// # Ok::<(), sixdeg_core::MalformedInputError>(())
    /// ```
    pub fn try_empty_rows(actors: usize) -> Result<Vec<Vec<NodeId>>, MalformedInputError> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(actors)
            .map_err(|_| MalformedInputError::ActorCountTooLarge { declared: actors })?;
        rows.resize_with(actors, Vec::new);
        Ok(rows)
    }

    /// Validates `rows` against the declared actor count and freezes them.
    ///
    /// # Errors
    /// Returns [`MalformedInputError::ActorCountMismatch`] when `rows.len()`
    /// differs from `actors`, and [`MalformedInputError::NeighbourOutOfRange`]
    /// for the first neighbour identifier outside `[0, actors)`.
    #[instrument(name = "core.graph.build", err, skip(rows), fields(row_count = rows.len()))]
    pub fn try_from_rows(
        actors: usize,
        rows: Vec<Vec<NodeId>>,
    ) -> Result<Self, MalformedInputError> {
        if rows.len() != actors {
            return Err(MalformedInputError::ActorCountMismatch {
                declared: actors,
                rows: rows.len(),
            });
        }

        for (node, neighbours) in rows.iter().enumerate() {
            if let Some(&neighbour) = neighbours.iter().find(|&&id| id >= actors) {
                return Err(MalformedInputError::NeighbourOutOfRange {
                    node,
                    neighbour,
                    actors,
                });
            }
        }

        Ok(Self { rows })
    }

    /// Number of actors in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the graph has no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns whether `node` is a valid identifier for this graph.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node < self.rows.len()
    }

    /// Neighbours of `node` in input order.
    ///
    /// Identifiers outside the graph have no neighbours.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> &[NodeId] {
        self.rows.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of adjacency entries. An undirected edge listed in both
    /// rows counts twice.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn try_empty_rows_reports_unallocatable_counts() {
        let err = AdjacencyGraph::try_empty_rows(usize::MAX).expect_err("cannot reserve");
        assert_eq!(
            err,
            MalformedInputError::ActorCountTooLarge {
                declared: usize::MAX
            }
        );
    }

    #[rstest]
    fn try_from_rows_rejects_row_count_mismatch() {
        let err = AdjacencyGraph::try_from_rows(3, vec![vec![1], vec![0]])
            .expect_err("two rows cannot describe three actors");
        assert_eq!(
            err,
            MalformedInputError::ActorCountMismatch {
                declared: 3,
                rows: 2
            }
        );
    }

    #[rstest]
    #[case::just_past_end(vec![vec![2], vec![]], 0, 2)]
    #[case::second_row(vec![vec![1], vec![0, 7]], 1, 7)]
    fn try_from_rows_rejects_out_of_range_neighbours(
        #[case] rows: Vec<Vec<NodeId>>,
        #[case] node: NodeId,
        #[case] neighbour: NodeId,
    ) {
        let err = AdjacencyGraph::try_from_rows(2, rows).expect_err("neighbour must be rejected");
        assert_eq!(
            err,
            MalformedInputError::NeighbourOutOfRange {
                node,
                neighbour,
                actors: 2
            }
        );
    }

    #[rstest]
    fn neighbours_of_unknown_node_are_empty() {
        let graph = AdjacencyGraph::try_from_rows(1, vec![vec![]]).expect("graph must build");
        assert!(graph.neighbours(5).is_empty());
        assert!(!graph.contains(1));
        assert!(graph.contains(0));
    }

    #[rstest]
    fn empty_graph_is_valid() {
        let graph = AdjacencyGraph::try_from_rows(0, Vec::new()).expect("empty graph must build");
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
