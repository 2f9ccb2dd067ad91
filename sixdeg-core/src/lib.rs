//! Sixdeg core library.
//!
//! Measures how well connected a reference actor is compared with its peers
//! in an undirected co-appearance graph. The pipeline finds the reference
//! node's connected component, shuffles the other members, profiles the first
//! half by breadth-first search, and counts how many have a mean distance no
//! greater than the reference's precomputed baseline.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the comparison engine emits:
//!
//! - `sixdeg_profiles_total` (counter)
//! - `sixdeg_better_connected_total` (counter)
//! - `sixdeg_no_comparison_total` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod comparison;
mod component;
mod error;
mod graph;
mod profile;
mod sampler;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{ComparisonBuilder, ExecutionStrategy},
    comparison::{
        Baseline, BaselineParseError, ComparisonEngine, ComparisonReport, ResultCounters,
        is_better_connected,
    },
    component::{Component, find_component},
    error::{MalformedInputError, MalformedInputErrorCode, Result, SixdegError, SixdegErrorCode},
    graph::{AdjacencyGraph, NodeId},
    profile::{DistanceMap, DistanceProfile, MeanDistance, profile},
    sampler::{SampleSet, Sampler},
};
