//! End-to-end study: sweep the edge range, then fit the logistic model.

use tracing::{info, instrument, warn};

use crate::{
    Result,
    cancel::CancellationToken,
    error::FitFailure,
    estimator::{MonteCarloEstimator, ProbabilityCurve},
    fit::{FitReport, SigmoidCurveFitter},
    oracle::PlanarityOracle,
};

/// Outcome of the fitting stage.
#[derive(Clone, Debug, PartialEq)]
pub enum FitOutcome {
    /// The optimiser converged.
    Fitted(FitReport),
    /// No fitted curve is available; the empirical curve is still valid.
    Unavailable(FitFailure),
}

impl FitOutcome {
    /// Returns the report when the fit succeeded.
    #[must_use]
    pub fn report(&self) -> Option<&FitReport> {
        match self {
            Self::Fitted(report) => Some(report),
            Self::Unavailable(_) => None,
        }
    }

    /// Returns the failure when no fit is available.
    #[must_use]
    pub fn failure(&self) -> Option<&FitFailure> {
        match self {
            Self::Fitted(_) => None,
            Self::Unavailable(failure) => Some(failure),
        }
    }
}

/// The empirical curve and, when available, its fitted model.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanarityStudy {
    curve: ProbabilityCurve,
    fit: FitOutcome,
}

impl PlanarityStudy {
    /// The estimated probabilities.
    #[must_use]
    #[rustfmt::skip]
    pub fn curve(&self) -> &ProbabilityCurve { &self.curve }

    /// The fitting outcome.
    #[must_use]
    #[rustfmt::skip]
    pub fn fit(&self) -> &FitOutcome { &self.fit }

    /// Splits the study into its parts.
    #[must_use]
    pub fn into_parts(self) -> (ProbabilityCurve, FitOutcome) {
        (self.curve, self.fit)
    }
}

/// Sweeps the estimator's configured range and fits the resulting curve.
///
/// # Errors
/// Propagates sweep errors. A failed fit is not an error: it is logged and
/// recorded as [`FitOutcome::Unavailable`].
///
/// # Examples
/// ```
/// use planaria_core::{
///     EstimatorBuilder, FitOptions, OracleError, PlanarityOracle, SigmoidCurveFitter,
///     SimpleGraph, run_study,
/// };
///
/// struct Forests;
///
/// impl PlanarityOracle for Forests {
///     fn name(&self) -> &str { "forests" }
///     fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
///         Ok(graph.edge_count() < graph.vertex_count())
///     }
/// }
///
/// let estimator = EstimatorBuilder::new()
///     .with_vertex_count(4)
///     .with_trials(10)
///     .build()
///     .expect("builder configuration is valid");
/// let fitter = SigmoidCurveFitter::new(FitOptions::for_vertex_count(4));
/// let study = run_study(&estimator, &Forests, &fitter).expect("sweep must succeed");
/// assert_eq!(study.curve().len(), 5);
/// ```
pub fn run_study<O>(
    estimator: &MonteCarloEstimator,
    oracle: &O,
    fitter: &SigmoidCurveFitter,
) -> Result<PlanarityStudy>
where
    O: PlanarityOracle + Sync + ?Sized,
{
    let curve = estimator.sweep(oracle)?;
    Ok(fit_curve(curve, fitter))
}

/// Like [`run_study`] but stops between sweep points once `token` is
/// cancelled.
///
/// # Errors
/// Returns [`crate::PlanariaError::Cancelled`] on cancellation alongside the
/// errors of [`run_study`].
pub fn run_study_with_cancel<O>(
    estimator: &MonteCarloEstimator,
    oracle: &O,
    fitter: &SigmoidCurveFitter,
    token: &CancellationToken,
) -> Result<PlanarityStudy>
where
    O: PlanarityOracle + Sync + ?Sized,
{
    let curve = estimator.sweep_with_cancel(oracle, token)?;
    Ok(fit_curve(curve, fitter))
}

#[instrument(name = "core.study", skip_all, fields(points = curve.len()))]
fn fit_curve(curve: ProbabilityCurve, fitter: &SigmoidCurveFitter) -> PlanarityStudy {
    let fit = match fitter.fit(&curve) {
        Ok(fit) => {
            let report = FitReport::new(fit, curve.vertex_count());
            info!(
                l = report.parameters().l,
                x0 = report.parameters().x0,
                k = report.parameters().k,
                "sigmoid fitted"
            );
            FitOutcome::Fitted(report)
        }
        Err(failure) => {
            warn!(code = %failure.code(), error = %failure, "sigmoid fit unavailable");
            FitOutcome::Unavailable(failure)
        }
    };
    PlanarityStudy { curve, fit }
}
