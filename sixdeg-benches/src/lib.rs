//! Benchmark support crate for sixdeg.
//!
//! Provides seeded synthetic co-appearance graphs and parameter types used by
//! the Criterion benchmarks for component search, distance profiling, and
//! full comparison runs.

pub mod error;
pub mod graph;
pub mod params;
