//! Monte Carlo estimation of planarity probabilities.
//!
//! Provides the [`MonteCarloEstimator`] runtime entry point together with the
//! point and curve types it produces.

use std::{num::NonZeroUsize, ops::Range, sync::Arc};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::{ExecutionStrategy, validate_edge_range},
    cancel::CancellationToken,
    error::PlanariaError,
    graph::planar_edge_bound,
    oracle::PlanarityOracle,
    sampler::RandomGraphSampler,
    seed::block_rng,
};

/// Number of trials that share one seeded RNG.
///
/// Blocks are the unit of parallel work inside a point. Changing this value
/// changes which graphs a given seed produces.
pub const TRIAL_BLOCK: usize = 256;

/// The empirical planarity estimate at a single edge count.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use planaria_core::ProbabilityPoint;
///
/// let trials = NonZeroUsize::new(4).expect("non-zero");
/// let point = ProbabilityPoint::new(12, 3, trials).expect("3 <= 4");
/// assert_eq!(point.probability(), 0.75);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProbabilityPoint {
    edge_count: usize,
    planar: usize,
    trials: NonZeroUsize,
}

impl ProbabilityPoint {
    /// Creates a point from raw counts, or `None` when `planar > trials`.
    #[must_use]
    pub fn new(edge_count: usize, planar: usize, trials: NonZeroUsize) -> Option<Self> {
        (planar <= trials.get()).then_some(Self {
            edge_count,
            planar,
            trials,
        })
    }

    /// Edge count shared by every graph behind this estimate.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Number of sampled graphs the oracle accepted as planar.
    #[must_use]
    #[rustfmt::skip]
    pub fn planar(&self) -> usize { self.planar }

    /// Number of sampled graphs.
    #[must_use]
    #[rustfmt::skip]
    pub fn trials(&self) -> NonZeroUsize { self.trials }

    /// Fraction of planar samples, always within `[0, 1]`.
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.planar as f64 / self.trials.get() as f64
    }

    /// Binomial standard error `sqrt(p(1−p)/N)` of [`Self::probability`].
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        let p = self.probability();
        (p * (1.0 - p) / self.trials.get() as f64).sqrt()
    }

    /// Pools two independent estimates at the same edge count.
    ///
    /// Returns `None` when the edge counts differ or the pooled trial count
    /// overflows.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    /// use planaria_core::ProbabilityPoint;
    ///
    /// let n = NonZeroUsize::new(10).expect("non-zero");
    /// let a = ProbabilityPoint::new(5, 10, n).expect("valid");
    /// let b = ProbabilityPoint::new(5, 0, n).expect("valid");
    /// let pooled = a.merge(b).expect("same edge count");
    /// assert_eq!(pooled.probability(), 0.5);
    /// assert_eq!(pooled.trials().get(), 20);
    /// ```
    #[must_use]
    pub fn merge(self, other: Self) -> Option<Self> {
        if self.edge_count != other.edge_count {
            return None;
        }
        Some(Self {
            edge_count: self.edge_count,
            planar: self.planar.checked_add(other.planar)?,
            trials: self.trials.checked_add(other.trials.get())?,
        })
    }
}

/// Planarity probabilities over a range of edge counts.
///
/// Points are strictly ascending by edge count.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityCurve {
    vertex_count: usize,
    points: Vec<ProbabilityPoint>,
}

impl ProbabilityCurve {
    /// Wraps `points`, or returns `None` unless their edge counts strictly
    /// increase.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    /// use planaria_core::{ProbabilityCurve, ProbabilityPoint};
    ///
    /// let n = NonZeroUsize::new(2).expect("non-zero");
    /// let points = vec![
    ///     ProbabilityPoint::new(1, 2, n).expect("valid"),
    ///     ProbabilityPoint::new(2, 1, n).expect("valid"),
    /// ];
    /// let curve = ProbabilityCurve::from_points(5, points).expect("ascending");
    /// assert_eq!(curve.edge_counts(), vec![1.0, 2.0]);
    /// assert_eq!(curve.probabilities(), vec![1.0, 0.5]);
    /// ```
    #[must_use]
    pub fn from_points(vertex_count: usize, points: Vec<ProbabilityPoint>) -> Option<Self> {
        points
            .windows(2)
            .all(|pair| pair[0].edge_count < pair[1].edge_count)
            .then_some(Self {
                vertex_count,
                points,
            })
    }

    /// Number of vertices in the sampled graphs.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// The ordered points of the curve.
    #[must_use]
    #[rustfmt::skip]
    pub fn points(&self) -> &[ProbabilityPoint] { &self.points }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when the sweep covered no edge counts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Looks up the point estimated at `edge_count`.
    #[must_use]
    pub fn get(&self, edge_count: usize) -> Option<&ProbabilityPoint> {
        self.points
            .binary_search_by_key(&edge_count, ProbabilityPoint::edge_count)
            .ok()
            .map(|index| &self.points[index])
    }

    /// Edge counts as `f64`, ready for curve fitting.
    #[must_use]
    pub fn edge_counts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.edge_count as f64).collect()
    }

    /// Probabilities in edge-count order.
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.points.iter().map(ProbabilityPoint::probability).collect()
    }

    /// Iterates over the points in ascending edge-count order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProbabilityPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a ProbabilityCurve {
    type Item = &'a ProbabilityPoint;
    type IntoIter = std::slice::Iter<'a, ProbabilityPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Estimates `P(planar | V, E)` by sampling graphs and querying an oracle.
///
/// Construct one through [`crate::EstimatorBuilder`]. Every estimate is a
/// pure function of the configuration and the oracle's answers: the same
/// seed yields the same curve under either execution strategy.
///
/// # Examples
/// ```
/// use planaria_core::{EstimatorBuilder, OracleError, PlanarityOracle, SimpleGraph};
///
/// /// Accepts graphs within Euler's bound; exact for very sparse graphs only.
/// struct Sparse;
///
/// impl PlanarityOracle for Sparse {
///     fn name(&self) -> &str { "sparse" }
///     fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
///         Ok(graph.edge_count() <= 3 * graph.vertex_count() - 6)
///     }
/// }
///
/// let estimator = EstimatorBuilder::new()
///     .with_vertex_count(6)
///     .with_trials(50)
///     .build()
///     .expect("builder configuration is valid");
/// let curve = estimator.sweep(&Sparse).expect("sweep must succeed");
/// assert_eq!(curve.len(), 14);
/// assert_eq!(curve.get(12).map(|p| p.probability()), Some(1.0));
/// assert_eq!(curve.get(13).map(|p| p.probability()), Some(0.0));
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloEstimator {
    sampler: RandomGraphSampler,
    trials: NonZeroUsize,
    edge_range: Range<usize>,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl MonteCarloEstimator {
    pub(crate) fn new(
        sampler: RandomGraphSampler,
        trials: NonZeroUsize,
        edge_range: Range<usize>,
        seed: u64,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            sampler,
            trials,
            edge_range,
            seed,
            execution_strategy,
        }
    }

    /// Number of vertices in every sampled graph.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.sampler.vertex_count()
    }

    /// Edge count of the complete graph on [`Self::vertex_count`] vertices.
    #[must_use]
    pub fn max_edges(&self) -> usize {
        self.sampler.max_edges()
    }

    /// Euler's bound `3V−6`, past which no graph is planar.
    #[must_use]
    pub fn theoretical_threshold(&self) -> Option<usize> {
        planar_edge_bound(self.vertex_count())
    }

    /// Trials behind each probability point.
    #[must_use]
    pub fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Edge counts covered by [`Self::sweep`].
    #[must_use]
    pub fn edge_range(&self) -> Range<usize> {
        self.edge_range.clone()
    }

    /// Base seed for every trial block.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The resolved execution strategy (never `Auto`).
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Estimates the planarity probability at a single edge count.
    ///
    /// # Errors
    /// Returns [`PlanariaError::EdgeCountOutOfRange`] when `edge_count`
    /// exceeds the complete graph and [`PlanariaError::Oracle`] when the
    /// oracle fails on any sample.
    #[instrument(
        name = "core.estimate",
        err,
        skip(self, oracle),
        fields(oracle = %oracle.name(), trials = self.trials.get()),
    )]
    pub fn estimate<O>(&self, oracle: &O, edge_count: usize) -> Result<ProbabilityPoint>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        self.sampler.check_edge_count(edge_count)?;
        self.estimate_point(oracle, edge_count)
    }

    /// Estimates every edge count in the configured range.
    ///
    /// # Errors
    /// Returns [`PlanariaError::Oracle`] when the oracle fails; no partial
    /// curve is produced.
    pub fn sweep<O>(&self, oracle: &O) -> Result<ProbabilityCurve>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        self.run_sweep(oracle, self.edge_range.clone(), None)
    }

    /// Estimates every edge count in `range` instead of the configured one.
    ///
    /// # Errors
    /// Returns [`PlanariaError::InvalidEdgeRange`] for a reversed range or one
    /// past the complete graph, and [`PlanariaError::Oracle`] when the oracle
    /// fails.
    pub fn sweep_range<O>(&self, oracle: &O, range: Range<usize>) -> Result<ProbabilityCurve>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        let range = validate_edge_range(range, self.max_edges())?;
        self.run_sweep(oracle, range, None)
    }

    /// Sweeps the configured range, polling `token` before each point.
    ///
    /// # Errors
    /// Returns [`PlanariaError::Cancelled`] once the token is observed as
    /// cancelled, alongside the errors of [`Self::sweep`]. A cancelled sweep
    /// discards the points it already finished.
    pub fn sweep_with_cancel<O>(
        &self,
        oracle: &O,
        token: &CancellationToken,
    ) -> Result<ProbabilityCurve>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        self.run_sweep(oracle, self.edge_range.clone(), Some(token))
    }

    #[instrument(
        name = "core.sweep",
        err,
        skip(self, oracle, range, token),
        fields(
            oracle = %oracle.name(),
            vertices = self.vertex_count(),
            trials = self.trials.get(),
            start = range.start,
            end = range.end,
            strategy = ?self.execution_strategy,
        ),
    )]
    fn run_sweep<O>(
        &self,
        oracle: &O,
        range: Range<usize>,
        token: Option<&CancellationToken>,
    ) -> Result<ProbabilityCurve>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        let points = match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel | ExecutionStrategy::Auto => {
                self.sweep_parallel(oracle, range, token)?
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(PlanariaError::BackendUnavailable {
                    requested: ExecutionStrategy::Parallel,
                });
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => self.sweep_sequential(oracle, range, token)?,
            ExecutionStrategy::Sequential => self.sweep_sequential(oracle, range, token)?,
        };
        #[cfg(feature = "metrics")]
        metrics::counter!("planaria_sweep_points_total").increment(points.len() as u64);
        info!(points = points.len(), "sweep completed");
        Ok(ProbabilityCurve {
            vertex_count: self.vertex_count(),
            points,
        })
    }

    fn sweep_sequential<O>(
        &self,
        oracle: &O,
        range: Range<usize>,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<ProbabilityPoint>>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        let mut points = Vec::with_capacity(range.len());
        for edge_count in range {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(PlanariaError::Cancelled {
                    completed: points.len(),
                });
            }
            points.push(self.estimate_point(oracle, edge_count)?);
        }
        Ok(points)
    }

    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    fn sweep_parallel<O>(
        &self,
        oracle: &O,
        range: Range<usize>,
        token: Option<&CancellationToken>,
    ) -> Result<Vec<ProbabilityPoint>>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let completed = AtomicUsize::new(0);
        range
            .into_par_iter()
            .map(|edge_count| {
                if token.is_some_and(CancellationToken::is_cancelled) {
                    return Err(PlanariaError::Cancelled {
                        completed: completed.load(Ordering::Relaxed),
                    });
                }
                let point = self.estimate_point(oracle, edge_count)?;
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(point)
            })
            .collect()
    }

    fn estimate_point<O>(&self, oracle: &O, edge_count: usize) -> Result<ProbabilityPoint>
    where
        O: PlanarityOracle + Sync + ?Sized,
    {
        let blocks = self.trials.get().div_ceil(TRIAL_BLOCK);
        let planar = match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel | ExecutionStrategy::Auto => (0..blocks)
                .into_par_iter()
                .map(|block| self.run_block(oracle, edge_count, block))
                .try_reduce(|| 0, |left, right| Ok(left + right))?,
            _ => (0..blocks)
                .map(|block| self.run_block(oracle, edge_count, block))
                .sum::<Result<usize>>()?,
        };
        debug!(
            edge_count,
            planar,
            trials = self.trials.get(),
            "point estimated"
        );
        Ok(ProbabilityPoint {
            edge_count,
            planar,
            trials: self.trials,
        })
    }

    fn run_block<O>(&self, oracle: &O, edge_count: usize, block: usize) -> Result<usize>
    where
        O: PlanarityOracle + ?Sized,
    {
        let start = block * TRIAL_BLOCK;
        let len = TRIAL_BLOCK.min(self.trials.get() - start);
        let mut rng = block_rng(self.seed, edge_count, block);
        let mut planar = 0;
        for _ in 0..len {
            let graph = self.sampler.sample(edge_count, &mut rng)?;
            let accepted = oracle
                .is_planar(&graph)
                .map_err(|error| PlanariaError::Oracle {
                    oracle: Arc::from(oracle.name()),
                    edge_count,
                    error,
                })?;
            if accepted {
                planar += 1;
            }
        }
        #[cfg(feature = "metrics")]
        metrics::counter!("planaria_trials_total").increment(len as u64);
        Ok(planar)
    }
}
