//! Comparison of sampled peers against the reference node's baseline.
//!
//! The decision itself ([`is_better_connected`]) is a pure function. Logging
//! and metrics for each outcome happen in [`ComparisonEngine`] after the
//! decision is made, so the predicate can be tested in isolation.

use std::{fmt, str::FromStr};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    component::find_component,
    error::SixdegError,
    graph::{AdjacencyGraph, NodeId},
    profile::{DistanceProfile, MeanDistance, profile},
    sampler::{SampleSet, Sampler},
};

/// Precomputed mean shortest-path distance of the reference node.
///
/// Always finite and non-negative.
///
/// # Examples
/// ```
/// use sixdeg_core::Baseline;
///
/// let baseline: Baseline = "3/2".parse()?;
/// assert_eq!(baseline.get(), 1.5);
/// assert_eq!(Baseline::from_ratio(3, 2)?, baseline);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Baseline(f64);

impl Baseline {
    /// Wraps `value` after checking that it is a usable mean distance.
    ///
    /// # Errors
    /// Returns [`SixdegError::InvalidBaseline`] for negative, infinite, or NaN
    /// values.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(SixdegError::InvalidBaseline { value })
        }
    }

    /// Builds a baseline from a hop-count total and the number of nodes it
    /// was summed over.
    ///
    /// # Errors
    /// Returns [`SixdegError::InvalidBaseline`] when `denominator` is zero.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Result<Self> {
        Self::new(numerator as f64 / denominator as f64)
    }

    /// The baseline as a float.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when parsing a [`Baseline`] from text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BaselineParseError {
    /// The text was neither a number nor a `numerator/denominator` ratio.
    #[error("`{raw}` is not a number or a `numerator/denominator` ratio")]
    Unparsable {
        /// Text supplied by the caller.
        raw: String,
    },
    /// The value parsed but is not a usable mean distance.
    #[error("`{raw}` evaluates to {value}, which is not a finite, non-negative distance")]
    OutOfRange {
        /// Text supplied by the caller.
        raw: String,
        /// Value the text evaluated to.
        value: f64,
    },
}

impl FromStr for Baseline {
    type Err = BaselineParseError;

    fn from_str(raw: &str) -> core::result::Result<Self, Self::Err> {
        let unparsable = || BaselineParseError::Unparsable {
            raw: raw.to_owned(),
        };
        let parse = |text: &str| text.trim().parse::<f64>().map_err(|_| unparsable());

        let value = match raw.split_once('/') {
            Some((numerator, denominator)) => parse(numerator)? / parse(denominator)?,
            None => parse(raw)?,
        };
        Self::new(value).map_err(|_| BaselineParseError::OutOfRange {
            raw: raw.to_owned(),
            value,
        })
    }
}

/// Returns whether a peer with mean distance `mean` is at least as well
/// connected as the reference: its mean is no greater than `baseline`.
///
/// # Examples
/// ```
/// use sixdeg_core::{Baseline, MeanDistance, is_better_connected};
///
/// let baseline = Baseline::new(1.5)?;
/// let equal = MeanDistance::new(3, 2).expect("reachable");
/// let worse = MeanDistance::new(4, 2).expect("reachable");
/// assert!(is_better_connected(equal, baseline));
/// assert!(!is_better_connected(worse, baseline));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn is_better_connected(mean: MeanDistance, baseline: Baseline) -> bool {
    mean.value() <= baseline.get()
}

/// Aggregate outcome of evaluating a sample.
///
/// # Examples
/// ```
/// use sixdeg_core::ResultCounters;
///
/// let counters = ResultCounters::new(1, 4, 9);
/// assert_eq!(counters.as_triple(), (1, 4, 9));
/// assert_eq!(counters.better_ratio(), Some(0.25));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultCounters {
    better_than_reference: usize,
    total_evaluated: usize,
    sample_component_size: usize,
}

impl ResultCounters {
    /// Creates counters from their three components.
    #[must_use]
    pub fn new(
        better_than_reference: usize,
        total_evaluated: usize,
        sample_component_size: usize,
    ) -> Self {
        Self {
            better_than_reference,
            total_evaluated,
            sample_component_size,
        }
    }

    /// Peers whose mean distance did not exceed the baseline.
    #[must_use]
    pub fn better_than_reference(&self) -> usize {
        self.better_than_reference
    }

    /// Peers profiled, including those with no computable mean.
    #[must_use]
    pub fn total_evaluated(&self) -> usize {
        self.total_evaluated
    }

    /// Size of the sample set, i.e. the component without the reference.
    #[must_use]
    pub fn sample_component_size(&self) -> usize {
        self.sample_component_size
    }

    /// `(better, evaluated, sample size)` in output order.
    #[must_use]
    pub fn as_triple(&self) -> (usize, usize, usize) {
        (
            self.better_than_reference,
            self.total_evaluated,
            self.sample_component_size,
        )
    }

    /// Fraction of evaluated peers that were better connected, if any were
    /// evaluated.
    #[must_use]
    pub fn better_ratio(&self) -> Option<f64> {
        (self.total_evaluated > 0)
            .then(|| self.better_than_reference as f64 / self.total_evaluated as f64)
    }
}

/// Counters from a full run together with the context they were computed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonReport {
    reference: NodeId,
    baseline: Baseline,
    component_size: usize,
    counters: ResultCounters,
}

impl ComparisonReport {
    /// Assembles a report from its parts.
    #[must_use]
    pub fn new(
        reference: NodeId,
        baseline: Baseline,
        component_size: usize,
        counters: ResultCounters,
    ) -> Self {
        Self {
            reference,
            baseline,
            component_size,
            counters,
        }
    }

    /// Reference node the peers were compared against.
    #[must_use]
    pub fn reference(&self) -> NodeId {
        self.reference
    }

    /// Baseline used for the comparison.
    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Size of the reference node's component, including the reference.
    #[must_use]
    pub fn component_size(&self) -> usize {
        self.component_size
    }

    /// Counters produced by the evaluation.
    #[must_use]
    pub fn counters(&self) -> ResultCounters {
        self.counters
    }
}

/// Compares randomly sampled peers of a reference node against its baseline.
///
/// # Examples
/// ```
/// use sixdeg_core::{AdjacencyGraph, ComparisonBuilder, Sampler};
///
/// let graph = AdjacencyGraph::try_from_rows(
///     5,
///     vec![vec![2], vec![2], vec![0, 1], vec![4], vec![3]],
/// )?;
/// let engine = ComparisonBuilder::new(2, 1.0).build()?;
/// let report = engine.run(&graph, &mut Sampler::seeded(11))?;
/// assert_eq!(report.component_size(), 3);
/// assert_eq!(report.counters().as_triple(), (0, 1, 2));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    reference: NodeId,
    baseline: Baseline,
    execution_strategy: ExecutionStrategy,
}

impl ComparisonEngine {
    pub(crate) fn new(
        reference: NodeId,
        baseline: Baseline,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            reference,
            baseline,
            execution_strategy,
        }
    }

    /// Reference node peers are compared against.
    #[must_use]
    pub fn reference(&self) -> NodeId {
        self.reference
    }

    /// Baseline mean distance of the reference node.
    #[must_use]
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Strategy used to profile the evaluation prefix.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Finds the reference node's component, samples half of its other
    /// members with `sampler`, and evaluates them.
    ///
    /// # Errors
    /// Returns [`SixdegError::NodeOutOfRange`] when the reference node is not
    /// in `graph`, and [`SixdegError::BackendUnavailable`] when the configured
    /// strategy is not compiled in.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph, sampler),
        fields(
            reference = self.reference,
            baseline = self.baseline.get(),
            actors = graph.len(),
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn run<R: Rng>(
        &self,
        graph: &AdjacencyGraph,
        sampler: &mut Sampler<R>,
    ) -> Result<ComparisonReport> {
        let component = find_component(graph, self.reference)?;
        let mut sample = SampleSet::from_component(&component, self.reference);
        sampler.shuffle(&mut sample);
        let counters = self.evaluate(graph, &sample)?;
        info!(
            component = component.len(),
            better = counters.better_than_reference(),
            evaluated = counters.total_evaluated(),
            "comparison completed"
        );
        Ok(ComparisonReport::new(
            self.reference,
            self.baseline,
            component.len(),
            counters,
        ))
    }

    /// Profiles the evaluation prefix of `sample` and counts how many peers
    /// are at least as well connected as the reference.
    ///
    /// Peers that reach no other node still count as evaluated.
    ///
    /// # Errors
    /// Returns [`SixdegError::NodeOutOfRange`] when the sample names a node
    /// outside `graph`, and [`SixdegError::BackendUnavailable`] when the
    /// configured strategy is not compiled in.
    #[instrument(
        name = "core.evaluate",
        err,
        skip(self, graph, sample),
        fields(sample = sample.len(), evaluated = sample.evaluation_prefix().len()),
    )]
    pub fn evaluate(&self, graph: &AdjacencyGraph, sample: &SampleSet) -> Result<ResultCounters> {
        let prefix = sample.evaluation_prefix();
        let means = match self.execution_strategy {
            ExecutionStrategy::Sequential => profile_sequential(graph, prefix)?,
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => profile_parallel(graph, prefix)?,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(SixdegError::BackendUnavailable {
                    requested: ExecutionStrategy::Parallel,
                });
            }
        };
        Ok(self.tally(prefix, means, sample.len()))
    }

    fn tally(
        &self,
        prefix: &[NodeId],
        means: Vec<Option<MeanDistance>>,
        sample_len: usize,
    ) -> ResultCounters {
        let mut better = 0;
        for (&node, mean) in prefix.iter().zip(means) {
            match mean {
                Some(mean) if is_better_connected(mean, self.baseline) => {
                    better += 1;
                    info!(
                        node,
                        mean = mean.value(),
                        baseline = self.baseline.get(),
                        "impressive: peer is at least as well connected as the reference"
                    );
                    record_outcome(Outcome::Better);
                }
                Some(mean) => {
                    debug!(node, mean = mean.value(), "peer is less well connected");
                    record_outcome(Outcome::Worse);
                }
                None => {
                    debug!(node, "no comparison possible: peer reaches no other node");
                    record_outcome(Outcome::NoComparison);
                }
            }
        }
        ResultCounters::new(better, prefix.len(), sample_len)
    }
}

fn profile_sequential(
    graph: &AdjacencyGraph,
    prefix: &[NodeId],
) -> Result<Vec<Option<MeanDistance>>> {
    prefix
        .iter()
        .map(|&node| profile(graph, node).map(DistanceProfile::into_mean))
        .collect()
}

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
fn profile_parallel(
    graph: &AdjacencyGraph,
    prefix: &[NodeId],
) -> Result<Vec<Option<MeanDistance>>> {
    use rayon::prelude::*;

    prefix
        .par_iter()
        .map(|&node| profile(graph, node).map(DistanceProfile::into_mean))
        .collect()
}

#[derive(Clone, Copy)]
enum Outcome {
    Better,
    Worse,
    NoComparison,
}

#[cfg(feature = "metrics")]
fn record_outcome(outcome: Outcome) {
    metrics::counter!("sixdeg_profiles_total").increment(1);
    match outcome {
        Outcome::Better => metrics::counter!("sixdeg_better_connected_total").increment(1),
        Outcome::NoComparison => metrics::counter!("sixdeg_no_comparison_total").increment(1),
        Outcome::Worse => {}
    }
}

#[cfg(not(feature = "metrics"))]
fn record_outcome(_outcome: Outcome) {}
