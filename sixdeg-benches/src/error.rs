//! Benchmark setup error type.
//!
//! Setup functions propagate failures with `?` and the bench entry points
//! turn them into a single panic message.

use sixdeg_core::{MalformedInputError, SixdegError};

use crate::graph::SyntheticGraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation was misconfigured.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticGraphError),
    /// The generated rows did not form a valid graph.
    #[error("generated graph was rejected: {0}")]
    Malformed(#[from] MalformedInputError),
    /// Building or running a comparison failed.
    #[error("comparison failed: {0}")]
    Core(#[from] SixdegError),
}
