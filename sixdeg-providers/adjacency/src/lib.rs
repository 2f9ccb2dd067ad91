//! Loader for the line-oriented adjacency format.
//!
//! The first non-blank line holds the actor count `N`. Every following
//! non-blank line holds a primary node id and then that node's neighbour ids,
//! separated by any ASCII whitespace. Actors without a line keep an empty
//! neighbour list.
//!
//! ```text
//! 5
//! 0	2
//! 1	2
//! 2	0	1
//! 3	4
//! 4	3
//! ```

use std::io::{self, BufRead};

use sixdeg_core::{AdjacencyGraph, MalformedInputError, NodeId};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while loading an adjacency listing.
#[derive(Debug, Error)]
pub enum AdjacencyLoadError {
    /// Reading from the underlying source failed.
    #[error("failed to read line {line}: {source}")]
    Io {
        /// One-based line number being read.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The listing was readable but structurally invalid.
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),
}

/// Parses an adjacency listing into an [`AdjacencyGraph`].
///
/// # Errors
/// Returns [`AdjacencyLoadError::Io`] when reading fails and
/// [`AdjacencyLoadError::Malformed`] for any structural problem: a missing or
/// unparsable actor count, an actor count too large to allocate, an
/// unparsable id, a primary id outside `[0, N)`, a primary id listed twice,
/// or a neighbour outside `[0, N)`.
///
/// # Examples
/// ```
/// use sixdeg_providers_adjacency::load_adjacency;
///
/// let graph = load_adjacency("3\n0 1\n1 0 2\n2 1\n".as_bytes())?;
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.neighbours(1), &[0, 2]);
/// # Ok::<(), sixdeg_providers_adjacency::AdjacencyLoadError>(())
/// ```
#[instrument(name = "adjacency.load", err, skip(reader))]
pub fn load_adjacency(reader: impl BufRead) -> Result<AdjacencyGraph, AdjacencyLoadError> {
    let mut lines = numbered_lines(reader);

    let actors = match lines.next().transpose()? {
        Some((_, text)) => parse_actor_count(&text)?,
        None => return Err(MalformedInputError::MissingActorCount.into()),
    };

    let mut rows = AdjacencyGraph::try_empty_rows(actors)?;
    let mut listed = unlisted_flags(actors)?;
    for entry in lines {
        let (line, text) = entry?;
        let (node, neighbours) = parse_row(line, &text, actors)?;
        let (Some(seen), Some(row)) = (listed.get_mut(node), rows.get_mut(node)) else {
            continue;
        };
        if std::mem::replace(seen, true) {
            return Err(MalformedInputError::DuplicateRow { line, node }.into());
        }
        *row = neighbours;
    }

    let graph = AdjacencyGraph::try_from_rows(actors, rows)?;
    debug!(
        actors = graph.len(),
        entries = graph.edge_count(),
        "adjacency listing loaded"
    );
    Ok(graph)
}

/// Parses an in-memory adjacency listing.
///
/// # Errors
/// Same as [`load_adjacency`], minus I/O failures.
pub fn parse_adjacency(text: &str) -> Result<AdjacencyGraph, AdjacencyLoadError> {
    load_adjacency(text.as_bytes())
}

/// Yields `(line number, text)` for every non-blank line.
fn numbered_lines(
    reader: impl BufRead,
) -> impl Iterator<Item = Result<(usize, String), AdjacencyLoadError>> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line_number = index + 1;
            line.map(|text| (line_number, text))
                .map_err(|source| AdjacencyLoadError::Io {
                    line: line_number,
                    source,
                })
        })
        .filter(|entry| !matches!(entry, Ok((_, text)) if text.trim().is_empty()))
}

fn unlisted_flags(actors: usize) -> Result<Vec<bool>, MalformedInputError> {
    let mut flags = Vec::new();
    flags
        .try_reserve_exact(actors)
        .map_err(|_| MalformedInputError::ActorCountTooLarge { declared: actors })?;
    flags.resize(actors, false);
    Ok(flags)
}

fn parse_actor_count(text: &str) -> Result<usize, MalformedInputError> {
    let token = text.trim();
    token
        .parse()
        .map_err(|_| MalformedInputError::InvalidActorCount {
            token: token.to_owned(),
        })
}

fn parse_row(
    line: usize,
    text: &str,
    actors: usize,
) -> Result<(NodeId, Vec<NodeId>), MalformedInputError> {
    let mut tokens = text.split_whitespace();
    let node = parse_id(line, tokens.next().unwrap_or_default())?;
    if node >= actors {
        return Err(MalformedInputError::NodeOutOfRange { line, node, actors });
    }
    let neighbours = tokens
        .map(|token| parse_id(line, token))
        .collect::<Result<_, _>>()?;
    Ok((node, neighbours))
}

fn parse_id(line: usize, token: &str) -> Result<NodeId, MalformedInputError> {
    token
        .parse()
        .map_err(|_| MalformedInputError::UnparsableToken {
            line,
            token: token.to_owned(),
        })
}
