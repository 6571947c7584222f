//! Builder utilities for configuring the Monte Carlo estimator.
//!
//! Exposes the execution strategy selection surface and the validation that
//! runs before any [`MonteCarloEstimator`] is constructed, so malformed inputs
//! fail before a single graph is sampled.

use std::{num::NonZeroUsize, ops::Range};

use crate::{
    Result, error::PlanariaError, estimator::MonteCarloEstimator, sampler::RandomGraphSampler,
};

/// Vertex count used by the reference study.
pub const DEFAULT_VERTEX_COUNT: usize = 20;
/// Trials per probability point used by the reference study.
pub const DEFAULT_TRIALS: usize = 10_000;
/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Indicates how [`MonteCarloEstimator`] schedules trials.
///
/// Results never depend on the strategy: every block of trials draws from its
/// own seeded RNG and planar counts are merged by summation.
///
/// # Examples
/// ```
/// use planaria_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Use the parallel backend when it is compiled in, otherwise run
    /// sequentially.
    Auto,
    /// Run every trial on the calling thread, one point after another.
    Sequential,
    /// Spread sweep points and trial blocks over the rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Resolves `Auto` to the concrete strategy this build will use.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            #[cfg(feature = "parallel")]
            Self::Auto => Self::Parallel,
            #[cfg(not(feature = "parallel"))]
            Self::Auto => Self::Sequential,
            other => other,
        }
    }
}

/// Configures and constructs [`MonteCarloEstimator`] instances.
///
/// # Examples
/// ```
/// use planaria_core::{EstimatorBuilder, ExecutionStrategy};
///
/// let estimator = EstimatorBuilder::new()
///     .with_vertex_count(8)
///     .with_trials(100)
///     .with_edge_range(0..29)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(estimator.vertex_count(), 8);
/// assert_eq!(estimator.trials().get(), 100);
/// assert_eq!(estimator.edge_range(), 0..29);
/// ```
#[derive(Debug, Clone)]
pub struct EstimatorBuilder {
    vertex_count: usize,
    trials: usize,
    edge_range: Option<Range<usize>>,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Default for EstimatorBuilder {
    fn default() -> Self {
        Self {
            vertex_count: DEFAULT_VERTEX_COUNT,
            trials: DEFAULT_TRIALS,
            edge_range: None,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl EstimatorBuilder {
    /// Creates a builder populated with the reference study parameters.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::{EstimatorBuilder, ExecutionStrategy};
    ///
    /// let builder = EstimatorBuilder::new();
    /// assert_eq!(builder.vertex_count(), 20);
    /// assert_eq!(builder.trials(), 10_000);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of vertices in every sampled graph.
    #[must_use]
    pub fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    /// Returns the configured vertex count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Overrides the number of trials behind each probability point.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Restricts the sweep to `range` (start inclusive, end exclusive).
    ///
    /// Without an explicit range the sweep covers `1..C(V, 2)`, every edge
    /// count except the empty and the complete graph.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::EstimatorBuilder;
    ///
    /// let estimator = EstimatorBuilder::new().build().expect("defaults are valid");
    /// assert_eq!(estimator.edge_range(), 1..190);
    /// ```
    #[must_use]
    pub fn with_edge_range(mut self, range: Range<usize>) -> Self {
        self.edge_range = Some(range);
        self
    }

    /// Returns the explicitly configured range, if any.
    #[must_use]
    pub fn edge_range(&self) -> Option<Range<usize>> {
        self.edge_range.clone()
    }

    /// Seeds trial generation so sweeps are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the execution strategy used for sweeps and point estimates.
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

    /// Validates the configuration and constructs a [`MonteCarloEstimator`].
    ///
    /// # Errors
    /// Returns [`PlanariaError::InvalidVertexCount`] for fewer than two vertices,
    /// [`PlanariaError::EdgeUniverseOverflow`] when `C(V, 2)` overflows,
    /// [`PlanariaError::InvalidTrials`] for zero trials,
    /// [`PlanariaError::InvalidEdgeRange`] for a reversed range or one that
    /// reaches past the complete graph, and
    /// [`PlanariaError::BackendUnavailable`] when the parallel backend is
    /// requested but not compiled in.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::{EstimatorBuilder, PlanariaError};
    ///
    /// let err = EstimatorBuilder::new()
    ///     .with_vertex_count(5)
    ///     .with_edge_range(0..12)
    ///     .build()
    ///     .expect_err("K5 has only 10 edges");
    /// assert!(matches!(err, PlanariaError::InvalidEdgeRange { .. }));
    /// ```
    pub fn build(self) -> Result<MonteCarloEstimator> {
        let sampler = RandomGraphSampler::new(self.vertex_count)?;
        let trials = NonZeroUsize::new(self.trials)
            .ok_or(PlanariaError::InvalidTrials { got: self.trials })?;
        let max = sampler.max_edges();
        let edge_range = match self.edge_range {
            Some(range) => validate_edge_range(range, max)?,
            None => 1..max,
        };
        let execution_strategy = self.execution_strategy.resolve();
        if cfg!(not(feature = "parallel")) && execution_strategy == ExecutionStrategy::Parallel {
            return Err(PlanariaError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            });
        }

        Ok(MonteCarloEstimator::new(
            sampler,
            trials,
            edge_range,
            self.seed,
            execution_strategy,
        ))
    }
}

/// Checks that `range` is ascending and stays within `0..=max`.
pub(crate) fn validate_edge_range(range: Range<usize>, max: usize) -> Result<Range<usize>> {
    if range.start > range.end || range.end > max.saturating_add(1) {
        return Err(PlanariaError::InvalidEdgeRange {
            start: range.start,
            end: range.end,
            max,
        });
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::full(0..11)]
    #[case::empty(4..4)]
    #[case::single(10..11)]
    fn accepts_ranges_within_complete_graph(#[case] range: Range<usize>) {
        assert_eq!(validate_edge_range(range.clone(), 10), Ok(range));
    }

    #[rstest]
    #[case::reversed(5..3)]
    #[case::past_complete(0..12)]
    fn rejects_invalid_ranges(#[case] range: Range<usize>) {
        let err = validate_edge_range(range, 10).expect_err("range is invalid");
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn default_range_skips_empty_and_complete_graphs() {
        let estimator = EstimatorBuilder::new()
            .with_vertex_count(6)
            .build()
            .expect("defaults are valid");
        assert_eq!(estimator.edge_range(), 1..15);
    }

    #[test]
    fn two_vertices_have_an_empty_default_range() {
        let estimator = EstimatorBuilder::new()
            .with_vertex_count(2)
            .build()
            .expect("two vertices are valid");
        assert_eq!(estimator.edge_range(), 1..1);
    }

    #[test]
    fn rejects_zero_trials() {
        let err = EstimatorBuilder::new()
            .with_trials(0)
            .build()
            .expect_err("zero trials are invalid");
        assert_eq!(err, PlanariaError::InvalidTrials { got: 0 });
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_fewer_than_two_vertices(#[case] vertices: usize) {
        let err = EstimatorBuilder::new()
            .with_vertex_count(vertices)
            .build()
            .expect_err("no edge fits");
        assert_eq!(err, PlanariaError::InvalidVertexCount { got: vertices });
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn auto_resolves_to_parallel_when_available() {
        assert_eq!(ExecutionStrategy::Auto.resolve(), ExecutionStrategy::Parallel);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn parallel_is_unavailable_without_backend() {
        let err = EstimatorBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect_err("parallel backend is not compiled in");
        assert!(matches!(err, PlanariaError::BackendUnavailable { .. }));
    }
}
