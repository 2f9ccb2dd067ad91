//! Builder utilities for configuring a [`ComparisonEngine`].
//!
//! Exposes the execution strategy selection surface and the validation that
//! runs before an engine is constructed.

use crate::{
    Result,
    comparison::{Baseline, ComparisonEngine},
    graph::NodeId,
};

/// Indicates how [`ComparisonEngine`] profiles the evaluation prefix.
///
/// Both strategies produce identical counters; `Parallel` spreads the
/// independent breadth-first searches across the `rayon` pool and is only
/// available when the `parallel` feature is compiled in.
///
/// # Examples
/// ```
/// use sixdeg_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Profile sampled peers one after another on the calling thread.
    #[default]
    Sequential,
    /// Profile sampled peers concurrently.
    Parallel,
}

/// Configures and constructs [`ComparisonEngine`] instances.
///
/// The reference node and its baseline mean distance are supplied by the
/// caller; the engine never derives the baseline from the graph.
///
/// # Examples
/// ```
/// use sixdeg_core::{ComparisonBuilder, ExecutionStrategy};
///
/// let engine = ComparisonBuilder::new(2, 1.0)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(engine.reference(), 2);
/// assert_eq!(engine.baseline().get(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonBuilder {
    reference: NodeId,
    baseline: f64,
    execution_strategy: ExecutionStrategy,
}

impl ComparisonBuilder {
    /// Creates a builder for comparing peers against `reference`, whose mean
    /// distance is `baseline`.
    #[must_use]
    pub fn new(reference: NodeId, baseline: f64) -> Self {
        Self {
            reference,
            baseline,
            execution_strategy: ExecutionStrategy::default(),
        }
    }

    /// Overrides the reference node.
    #[must_use]
    pub fn with_reference(mut self, reference: NodeId) -> Self {
        self.reference = reference;
        self
    }

    /// Returns the configured reference node.
    #[must_use]
    pub fn reference(&self) -> NodeId {
        self.reference
    }

    /// Overrides the baseline mean distance.
    ///
    /// # Examples
    /// ```
    /// use sixdeg_core::ComparisonBuilder;
    ///
    /// let builder = ComparisonBuilder::new(0, 1.0).with_baseline(2.5);
    /// assert_eq!(builder.baseline(), 2.5);
    /// ```
    #[must_use]
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Returns the configured baseline, which has not been validated yet.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Sets the execution strategy used when evaluating samples.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs a [`ComparisonEngine`].
    ///
    /// # Errors
    /// Returns [`crate::SixdegError::InvalidBaseline`] when the baseline is
    /// negative, infinite, or NaN.
    ///
    /// # Examples
    /// ```
    /// use sixdeg_core::{ComparisonBuilder, SixdegError};
    ///
    /// let err = ComparisonBuilder::new(0, f64::NAN).build().unwrap_err();
    /// assert!(matches!(err, SixdegError::InvalidBaseline { .. }));
    /// ```
    pub fn build(self) -> Result<ComparisonEngine> {
        let baseline = Baseline::new(self.baseline)?;
        Ok(ComparisonEngine::new(
            self.reference,
            baseline,
            self.execution_strategy,
        ))
    }
}
