//! Error types for the sixdeg core library.
//!
//! Load-time structural failures are reported as [`MalformedInputError`];
//! everything the comparison pipeline can reject at run time is a
//! [`SixdegError`]. Both carry stable machine-readable codes so the CLI can
//! log them without matching on message text.

use std::fmt;

use thiserror::Error;

use crate::builder::ExecutionStrategy;
use crate::graph::NodeId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Structural problems detected while building an [`crate::AdjacencyGraph`].
///
/// Any of these is fatal to a run: no partially built graph is ever handed
/// to the traversal code.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedInputError {
    /// The input did not start with an actor count.
    #[error("input is missing the leading actor count")]
    MissingActorCount,
    /// The actor count line could not be parsed as a non-negative integer.
    #[error("actor count `{token}` is not a valid non-negative integer")]
    InvalidActorCount {
        /// Raw token found where the actor count was expected.
        token: String,
    },
    /// Storage for the declared actor count could not be reserved.
    #[error("cannot reserve adjacency storage for {declared} declared actors")]
    ActorCountTooLarge {
        /// Actor count declared by the input.
        declared: usize,
    },
    /// A node or neighbour identifier could not be parsed.
    #[error("line {line}: `{token}` is not a valid node id")]
    UnparsableToken {
        /// One-based line number in the source text.
        line: usize,
        /// Raw token that failed to parse.
        token: String,
    },
    /// A row's primary identifier exceeded the declared actor count.
    #[error("line {line}: node {node} is outside the declared range [0, {actors})")]
    NodeOutOfRange {
        /// One-based line number in the source text.
        line: usize,
        /// Offending primary identifier.
        node: NodeId,
        /// Declared actor count.
        actors: usize,
    },
    /// The same primary identifier appeared on more than one line.
    #[error("line {line}: node {node} already has an adjacency row")]
    DuplicateRow {
        /// One-based line number of the repeated row.
        line: usize,
        /// Identifier listed twice.
        node: NodeId,
    },
    /// The number of adjacency rows differs from the declared actor count.
    #[error("declared {declared} actors but received {rows} adjacency rows")]
    ActorCountMismatch {
        /// Actor count declared by the input.
        declared: usize,
        /// Number of rows actually supplied.
        rows: usize,
    },
    /// A neighbour identifier fell outside `[0, actors)`.
    #[error("node {node} lists neighbour {neighbour} outside the range [0, {actors})")]
    NeighbourOutOfRange {
        /// Row containing the bad neighbour.
        node: NodeId,
        /// Offending neighbour identifier.
        neighbour: NodeId,
        /// Declared actor count.
        actors: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MalformedInputError`] variants.
    enum MalformedInputErrorCode for MalformedInputError {
        /// The input did not start with an actor count.
        MissingActorCount => MissingActorCount => "MALFORMED_MISSING_ACTOR_COUNT",
        /// The actor count could not be parsed.
        InvalidActorCount => InvalidActorCount { .. } => "MALFORMED_INVALID_ACTOR_COUNT",
        /// The declared actor count could not be allocated.
        ActorCountTooLarge => ActorCountTooLarge { .. } => "MALFORMED_ACTOR_COUNT_TOO_LARGE",
        /// A node identifier could not be parsed.
        UnparsableToken => UnparsableToken { .. } => "MALFORMED_UNPARSABLE_TOKEN",
        /// A row's primary identifier exceeded the declared actor count.
        NodeOutOfRange => NodeOutOfRange { .. } => "MALFORMED_NODE_OUT_OF_RANGE",
        /// The same primary identifier appeared twice.
        DuplicateRow => DuplicateRow { .. } => "MALFORMED_DUPLICATE_ROW",
        /// Row count and declared actor count disagree.
        ActorCountMismatch => ActorCountMismatch { .. } => "MALFORMED_ACTOR_COUNT_MISMATCH",
        /// A neighbour identifier fell outside the graph.
        NeighbourOutOfRange => NeighbourOutOfRange { .. } => "MALFORMED_NEIGHBOUR_OUT_OF_RANGE",
    }
}

/// Error type produced when configuring or running a comparison.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SixdegError {
    /// A traversal was requested from a node the graph does not contain.
    #[error("node {node} is outside the graph (actors = {actors})")]
    NodeOutOfRange {
        /// Requested start node.
        node: NodeId,
        /// Number of actors in the graph.
        actors: usize,
    },
    /// The baseline mean distance must be finite and non-negative.
    #[error("baseline must be a finite, non-negative mean distance (got {value})")]
    InvalidBaseline {
        /// Rejected baseline value.
        value: f64,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// Graph construction failed.
    #[error(transparent)]
    MalformedInput {
        /// Structural problem reported by the graph builder.
        #[from]
        source: MalformedInputError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SixdegError`] variants.
    enum SixdegErrorCode for SixdegError {
        /// A traversal was requested from a node the graph does not contain.
        NodeOutOfRange => NodeOutOfRange { .. } => "SIXDEG_NODE_OUT_OF_RANGE",
        /// The baseline mean distance was rejected.
        InvalidBaseline => InvalidBaseline { .. } => "SIXDEG_INVALID_BASELINE",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "SIXDEG_BACKEND_UNAVAILABLE",
        /// Graph construction failed.
        MalformedInput => MalformedInput { .. } => "SIXDEG_MALFORMED_INPUT",
    }
}

impl SixdegError {
    /// Retrieve the inner [`MalformedInputErrorCode`] when graph construction failed.
    pub const fn malformed_input_code(&self) -> Option<MalformedInputErrorCode> {
        match self {
            Self::MalformedInput { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SixdegError>;
