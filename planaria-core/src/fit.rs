//! Three-parameter logistic fitting of probability curves.
//!
//! The model is `p(E) = L / (1 + exp(−k·(E − x0)))`, fitted by
//! Levenberg–Marquardt over `(L, x0, k)` with one `tiny_solver` residual block
//! per observation. A fit either yields parameters or a [`FitFailure`];
//! numerical trouble never escapes as a panic.

use std::collections::HashMap;

use tiny_solver::{
    LevenbergMarquardtOptimizer, Optimizer, OptimizerOptions, Problem,
    factors::{Factor, na},
};
use tracing::{debug, instrument};

use crate::{error::FitFailure, estimator::ProbabilityCurve, graph::planar_edge_bound};

/// Default cap on optimiser iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;
/// Initial slope used when no better guess is available.
pub const DEFAULT_SLOPE_GUESS: f64 = 0.1;

const PARAMETERS: &str = "logistic";
const MIN_DIAGONAL: f64 = 1e-6;
const MAX_DIAGONAL: f64 = 1e32;
// Initial damping is the reciprocal of the radius.
const INITIAL_TRUST_REGION_RADIUS: f64 = 1.0;
// A fit must remove at least this share of the spread about the mean.
const MIN_EXPLAINED_SHARE: f64 = 1e-3;
// Series whose spread is below this carry no transition.
const DEGENERATE_SPREAD: f64 = 1e-12;

/// The fitted parameters of the logistic model.
///
/// # Examples
/// ```
/// use planaria_core::SigmoidParameters;
///
/// let params = SigmoidParameters::new(1.0, 54.0, -0.2);
/// assert_eq!(params.evaluate(54.0), 0.5);
/// assert!(params.evaluate(10.0) > 0.99);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmoidParameters {
    /// Upper asymptote.
    pub l: f64,
    /// Midpoint, where the model equals `L/2`.
    pub x0: f64,
    /// Slope; negative for curves that fall with the edge count.
    pub k: f64,
}

impl SigmoidParameters {
    /// Bundles the three model parameters.
    #[must_use]
    pub const fn new(l: f64, x0: f64, k: f64) -> Self {
        Self { l, x0, k }
    }

    /// Evaluates the model at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.l * logistic(self.k * (x - self.x0))
    }

    /// Model value at the fitted midpoint. Always `L/2`.
    #[must_use]
    pub fn midpoint_probability(&self) -> f64 {
        self.evaluate(self.x0)
    }

    /// Evaluates the model at `points` evenly spaced abscissae spanning
    /// `[start, end]` inclusive.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::SigmoidParameters;
    ///
    /// let overlay = SigmoidParameters::new(1.0, 5.0, 1.0).sample(0.0, 10.0, 3);
    /// assert_eq!(overlay.len(), 3);
    /// assert_eq!(overlay[1], (5.0, 0.5));
    /// assert_eq!(overlay[2].0, 10.0);
    /// ```
    #[must_use]
    pub fn sample(&self, start: f64, end: f64, points: usize) -> Vec<(f64, f64)> {
        match points {
            0 => Vec::new(),
            1 => vec![(start, self.evaluate(start))],
            _ => {
                let step = (end - start) / (points - 1) as f64;
                (0..points)
                    .map(|i| {
                        let x = if i + 1 == points {
                            end
                        } else {
                            start + step * i as f64
                        };
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }

    fn is_finite(&self) -> bool {
        self.l.is_finite() && self.x0.is_finite() && self.k.is_finite()
    }

    fn to_vector(self) -> na::DVector<f64> {
        na::DVector::from_vec(vec![self.l, self.x0, self.k])
    }
}

// Evaluates `1 / (1 + exp(−z))` without overflowing `exp` for either sign.
fn logistic<T: na::RealField>(z: T) -> T {
    if z >= T::zero() {
        T::one() / (T::one() + (-z).exp())
    } else {
        let e = z.exp();
        e.clone() / (T::one() + e)
    }
}

/// Residual `model(x) − y` of a single observation.
#[derive(Debug, Clone)]
struct LogisticResidual {
    x: f64,
    y: f64,
}

impl<T: na::RealField> Factor<T> for LogisticResidual {
    fn residual_func(&self, params: &[na::DVector<T>]) -> na::DVector<T> {
        let p = &params[0];
        let (l, x0, k) = (p[0].clone(), p[1].clone(), p[2].clone());
        let x: T = na::convert(self.x);
        let y: T = na::convert(self.y);
        na::DVector::from_vec(vec![l * logistic(k * (x - x0)) - y])
    }
}

/// Optimiser settings for [`SigmoidCurveFitter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    initial_guess: Option<SigmoidParameters>,
    max_iterations: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            initial_guess: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl FitOptions {
    /// Options whose initial guess centres the transition on Euler's bound:
    /// `L₀ = 1`, `x0₀ = 3V−6`, `k₀ = 0.1`.
    ///
    /// For `V < 3` the bound is undefined and the midpoint of the fitted
    /// abscissae is used instead.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::{FitOptions, SigmoidParameters};
    ///
    /// let options = FitOptions::for_vertex_count(20);
    /// assert_eq!(
    ///     options.initial_guess(),
    ///     Some(SigmoidParameters::new(1.0, 54.0, 0.1)),
    /// );
    /// assert_eq!(FitOptions::for_vertex_count(2).initial_guess(), None);
    /// ```
    #[must_use]
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        Self {
            initial_guess: planar_edge_bound(vertex_count)
                .map(|bound| SigmoidParameters::new(1.0, bound as f64, DEFAULT_SLOPE_GUESS)),
            ..Self::default()
        }
    }

    /// Overrides the starting point of the optimiser.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: SigmoidParameters) -> Self {
        self.initial_guess = Some(guess);
        self
    }

    /// Caps the number of optimiser iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the configured initial guess, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn initial_guess(&self) -> Option<SigmoidParameters> { self.initial_guess }

    /// Returns the iteration cap.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_iterations(&self) -> usize { self.max_iterations }
}

/// A successful fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SigmoidFit {
    parameters: SigmoidParameters,
    residual_sum_of_squares: f64,
}

impl SigmoidFit {
    /// The fitted `(L, x0, k)`.
    #[must_use]
    #[rustfmt::skip]
    pub fn parameters(&self) -> SigmoidParameters { self.parameters }

    /// Sum of squared residuals at the solution.
    #[must_use]
    #[rustfmt::skip]
    pub fn residual_sum_of_squares(&self) -> f64 { self.residual_sum_of_squares }
}

/// A fit together with the probabilities derived from it.
///
/// `probability_at_midpoint` evaluates the model at its own `x0` and so always
/// equals `L/2`; it is a consistency check on `L`, not an independent
/// measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitReport {
    fit: SigmoidFit,
    vertex_count: usize,
    theoretical_threshold: Option<usize>,
    probability_at_threshold: Option<f64>,
    probability_at_midpoint: f64,
}

impl FitReport {
    /// Derives the threshold and midpoint probabilities for a graph of
    /// `vertex_count` vertices.
    ///
    /// # Examples
    /// ```
    /// use planaria_core::{FitReport, SigmoidCurveFitter, FitOptions};
    ///
    /// let xs: Vec<f64> = (1..80).map(f64::from).collect();
    /// let ys: Vec<f64> = xs.iter().map(|x| 0.9 / (1.0 + (0.3 * (x - 30.0)).exp())).collect();
    /// let fitter = SigmoidCurveFitter::new(FitOptions::for_vertex_count(12));
    /// let fit = fitter.fit_series(&xs, &ys).expect("clean data fits");
    /// let report = FitReport::new(fit, 12);
    /// assert_eq!(report.theoretical_threshold(), Some(30));
    /// assert!((report.probability_at_midpoint() - report.parameters().l / 2.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new(fit: SigmoidFit, vertex_count: usize) -> Self {
        let parameters = fit.parameters;
        let theoretical_threshold = planar_edge_bound(vertex_count);
        Self {
            fit,
            vertex_count,
            theoretical_threshold,
            probability_at_threshold: theoretical_threshold
                .map(|bound| parameters.evaluate(bound as f64)),
            probability_at_midpoint: parameters.midpoint_probability(),
        }
    }

    /// The underlying fit.
    #[must_use]
    #[rustfmt::skip]
    pub fn fit(&self) -> &SigmoidFit { &self.fit }

    /// Shorthand for `fit().parameters()`.
    #[must_use]
    pub fn parameters(&self) -> SigmoidParameters {
        self.fit.parameters
    }

    /// Vertex count the report was derived for.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Euler's bound `3V−6`, or `None` for `V < 3`.
    #[must_use]
    #[rustfmt::skip]
    pub fn theoretical_threshold(&self) -> Option<usize> { self.theoretical_threshold }

    /// Model prediction at the theoretical threshold.
    #[must_use]
    #[rustfmt::skip]
    pub fn probability_at_threshold(&self) -> Option<f64> { self.probability_at_threshold }

    /// Model prediction at the fitted midpoint (`L/2`).
    #[must_use]
    #[rustfmt::skip]
    pub fn probability_at_midpoint(&self) -> f64 { self.probability_at_midpoint }
}

/// Fits the logistic model to probability curves by nonlinear least squares.
///
/// # Examples
/// ```
/// use planaria_core::{FitFailure, FitOptions, SigmoidCurveFitter};
///
/// let fitter = SigmoidCurveFitter::new(FitOptions::default());
/// let err = fitter
///     .fit_series(&[1.0, 2.0, 3.0, 4.0], &[0.0; 4])
///     .expect_err("a flat series has no transition");
/// assert!(matches!(err, FitFailure::DegenerateCurve { .. }));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SigmoidCurveFitter {
    options: FitOptions,
}

impl SigmoidCurveFitter {
    /// Creates a fitter with the supplied options.
    #[must_use]
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Returns the options this fitter runs with.
    #[must_use]
    #[rustfmt::skip]
    pub fn options(&self) -> &FitOptions { &self.options }

    /// Fits the model to an estimated curve.
    ///
    /// # Errors
    /// See [`Self::fit_series`].
    pub fn fit(&self, curve: &ProbabilityCurve) -> Result<SigmoidFit, FitFailure> {
        self.fit_series(&curve.edge_counts(), &curve.probabilities())
    }

    /// Fits the model to paired observations.
    ///
    /// # Errors
    /// Returns [`FitFailure::LengthMismatch`] or [`FitFailure::TooFewPoints`]
    /// for malformed input, [`FitFailure::NonFiniteData`] for NaN or infinite
    /// observations and [`FitFailure::DegenerateCurve`] when `ys` is constant.
    /// Returns [`FitFailure::NotConverged`] when the optimiser fails or stalls
    /// on parameters that explain none of the transition, and
    /// [`FitFailure::NonFiniteParameters`] when the solution is not finite.
    #[instrument(
        name = "core.fit",
        skip(self, xs, ys),
        fields(points = xs.len(), max_iterations = self.options.max_iterations),
    )]
    pub fn fit_series(&self, xs: &[f64], ys: &[f64]) -> Result<SigmoidFit, FitFailure> {
        validate_series(xs, ys)?;
        let guess = self
            .options
            .initial_guess
            .unwrap_or_else(|| default_guess(xs));
        let parameters = self.optimise(xs, ys, guess)?;
        let rss = residual_sum_of_squares(xs, ys, parameters);
        if !explains_transition(xs, ys, parameters, rss) {
            debug!(
                l = parameters.l,
                x0 = parameters.x0,
                k = parameters.k,
                rss,
                "optimiser stalled on a flat model"
            );
            return Err(self.not_converged());
        }
        debug!(
            l = parameters.l,
            x0 = parameters.x0,
            k = parameters.k,
            rss,
            "sigmoid fit converged"
        );
        Ok(SigmoidFit {
            parameters,
            residual_sum_of_squares: rss,
        })
    }

    fn optimise(
        &self,
        xs: &[f64],
        ys: &[f64],
        guess: SigmoidParameters,
    ) -> Result<SigmoidParameters, FitFailure> {
        let max_iterations = self.options.max_iterations;
        if max_iterations == 0 {
            return Err(self.not_converged());
        }

        let mut problem = Problem::new();
        for (&x, &y) in xs.iter().zip(ys) {
            problem.add_residual_block(1, &[PARAMETERS], Box::new(LogisticResidual { x, y }), None);
        }
        let initial_values = HashMap::from([(PARAMETERS.to_owned(), guess.to_vector())]);

        let optimizer = LevenbergMarquardtOptimizer::new(
            MIN_DIAGONAL,
            MAX_DIAGONAL,
            INITIAL_TRUST_REGION_RADIUS,
        );
        // Rejected steps leave the error unchanged, so any positive decrease
        // threshold would end the search on the first rejection.
        let options = OptimizerOptions {
            max_iteration: max_iterations,
            min_abs_error_decrease_threshold: 0.0,
            min_rel_error_decrease_threshold: 0.0,
            ..OptimizerOptions::default()
        };
        let solution = optimizer
            .optimize(&problem, &initial_values, Some(options))
            .ok_or_else(|| self.not_converged())?;
        let values = solution
            .get(PARAMETERS)
            .filter(|values| values.len() == 3)
            .ok_or_else(|| self.not_converged())?;
        let parameters = SigmoidParameters::new(values[0], values[1], values[2]);
        if !parameters.is_finite() {
            return Err(FitFailure::NonFiniteParameters);
        }
        Ok(parameters)
    }

    fn not_converged(&self) -> FitFailure {
        FitFailure::NotConverged {
            iterations: self.options.max_iterations,
        }
    }
}

fn validate_series(xs: &[f64], ys: &[f64]) -> Result<(), FitFailure> {
    if xs.len() != ys.len() {
        return Err(FitFailure::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < 3 {
        return Err(FitFailure::TooFewPoints { got: xs.len() });
    }
    if let Some(index) = xs
        .iter()
        .zip(ys)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(FitFailure::NonFiniteData { index });
    }
    let (low, high) = extent(ys);
    if high - low < DEGENERATE_SPREAD {
        return Err(FitFailure::DegenerateCurve { value: ys[0] });
    }
    Ok(())
}

fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn default_guess(xs: &[f64]) -> SigmoidParameters {
    let (low, high) = extent(xs);
    SigmoidParameters::new(1.0, (low + high) / 2.0, DEFAULT_SLOPE_GUESS)
}

fn residual_sum_of_squares(xs: &[f64], ys: &[f64], model: SigmoidParameters) -> f64 {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| {
            let r = model.evaluate(x) - y;
            r * r
        })
        .sum()
}

/// A fit explains the transition when it beats the flat mean by a margin and
/// places its midpoint within one span of the observed edge counts.
fn explains_transition(xs: &[f64], ys: &[f64], model: SigmoidParameters, rss: f64) -> bool {
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    let spread: f64 = ys.iter().map(|y| (y - mean) * (y - mean)).sum();
    let (low, high) = extent(xs);
    let span = high - low;
    rss < (1.0 - MIN_EXPLAINED_SHARE) * spread && (low - span..=high + span).contains(&model.x0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn grid(start: i32, end: i32) -> Vec<f64> {
        (start..end).map(f64::from).collect()
    }

    fn sigmoid_series(xs: &[f64], truth: SigmoidParameters) -> Vec<f64> {
        xs.iter().map(|&x| truth.evaluate(x)).collect()
    }

    #[rstest]
    #[case::falling(SigmoidParameters::new(1.0, 22.0, -0.35), SigmoidParameters::new(1.0, 30.0, -0.1))]
    #[case::rising(SigmoidParameters::new(0.8, 40.0, 0.2), SigmoidParameters::new(1.0, 35.0, 0.1))]
    #[case::partial_height(SigmoidParameters::new(0.6, 15.0, -0.5), SigmoidParameters::new(1.0, 20.0, -0.2))]
    fn recovers_clean_sigmoid(#[case] truth: SigmoidParameters, #[case] guess: SigmoidParameters) {
        let xs = grid(1, 90);
        let ys = sigmoid_series(&xs, truth);
        let fitter = SigmoidCurveFitter::new(FitOptions::default().with_initial_guess(guess));
        let fit = fitter.fit_series(&xs, &ys).expect("clean data fits");
        let got = fit.parameters();
        assert!((got.l - truth.l).abs() < 1e-4, "L = {}", got.l);
        assert!((got.x0 - truth.x0).abs() < 1e-3, "x0 = {}", got.x0);
        assert!((got.k - truth.k).abs() < 1e-4, "k = {}", got.k);
        assert!(fit.residual_sum_of_squares() < 1e-10);
    }

    #[test]
    fn crosses_slope_sign_from_euler_guess() {
        // Planarity curves fall with edge count; the reference guess has k > 0.
        let xs = grid(1, 190);
        let truth = SigmoidParameters::new(1.0, 22.0, -0.35);
        let ys = sigmoid_series(&xs, truth);
        let fit = SigmoidCurveFitter::new(FitOptions::for_vertex_count(20))
            .fit_series(&xs, &ys)
            .expect("clean data fits");
        let got = fit.parameters();
        assert!(got.k < 0.0);
        assert!((got.x0 - truth.x0).abs() < 1e-2, "x0 = {}", got.x0);
    }

    #[rstest]
    #[case::all_zero(0.0)]
    #[case::all_one(1.0)]
    fn constant_series_is_degenerate(#[case] value: f64) {
        let xs = grid(1, 50);
        let ys = vec![value; xs.len()];
        let err = SigmoidCurveFitter::default()
            .fit_series(&xs, &ys)
            .expect_err("constant data has no transition");
        assert_eq!(err, FitFailure::DegenerateCurve { value });
        assert_eq!(err.code().as_str(), "FIT_DEGENERATE_CURVE");
    }

    #[rstest]
    #[case::mismatch(vec![1.0, 2.0, 3.0], vec![1.0, 0.0], FitFailure::LengthMismatch { xs: 3, ys: 2 })]
    #[case::too_few(vec![1.0, 2.0], vec![1.0, 0.0], FitFailure::TooFewPoints { got: 2 })]
    #[case::nan(vec![1.0, 2.0, 3.0], vec![1.0, f64::NAN, 0.0], FitFailure::NonFiniteData { index: 1 })]
    #[case::infinite_x(vec![1.0, f64::INFINITY, 3.0], vec![1.0, 0.5, 0.0], FitFailure::NonFiniteData { index: 1 })]
    fn malformed_series_fail_fast(
        #[case] xs: Vec<f64>,
        #[case] ys: Vec<f64>,
        #[case] expected: FitFailure,
    ) {
        let err = SigmoidCurveFitter::default()
            .fit_series(&xs, &ys)
            .expect_err("input is malformed");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::single_iteration(1)]
    #[case::no_iterations(0)]
    fn exhausted_budget_is_not_converged(#[case] iterations: usize) {
        let xs = grid(1, 60);
        let ys = sigmoid_series(&xs, SigmoidParameters::new(1.0, 20.0, -0.4));
        let options = FitOptions::for_vertex_count(20).with_max_iterations(iterations);
        let err = SigmoidCurveFitter::new(options)
            .fit_series(&xs, &ys)
            .expect_err("the budget is too small to converge");
        assert_eq!(err, FitFailure::NotConverged { iterations });
    }

    #[test]
    fn drop_after_first_edge_count_fits_inside_sweep() {
        let xs = grid(1, 190);
        let mut ys = vec![0.0; xs.len()];
        ys[0] = 1.0;
        let fit = SigmoidCurveFitter::new(FitOptions::for_vertex_count(20))
            .fit_series(&xs, &ys)
            .expect("a one-point drop is still a transition");
        let got = fit.parameters();
        assert!((1.0..=189.0).contains(&got.x0), "x0 = {}", got.x0);
        assert!(got.k < 0.0, "k = {}", got.k);
        assert!(fit.residual_sum_of_squares() < 1e-3);
    }

    #[rstest]
    #[case::distant_midpoint(SigmoidParameters::new(0.072, 109_803.0, 0.000_26))]
    #[case::flat_mean(SigmoidParameters::new(1.0 / 189.0, 95.0, 0.0))]
    fn stalled_models_do_not_explain_a_transition(#[case] model: SigmoidParameters) {
        let xs = grid(1, 190);
        let mut ys = vec![0.0; xs.len()];
        ys[0] = 1.0;
        let rss = residual_sum_of_squares(&xs, &ys, model);
        assert!(!explains_transition(&xs, &ys, model, rss));
    }

    #[test]
    fn good_model_explains_its_own_curve() {
        let xs = grid(1, 190);
        let model = SigmoidParameters::new(1.0, 27.0, -0.5);
        let ys = sigmoid_series(&xs, model);
        assert!(explains_transition(&xs, &ys, model, 0.0));
    }

    #[test]
    fn residual_matches_model_error() {
        let residual = LogisticResidual { x: 3.0, y: 0.25 };
        let params = [na::DVector::from_vec(vec![1.0, 3.0, -2.0])];
        let value: na::DVector<f64> = residual.residual_func(&params);
        assert_eq!(value.len(), 1);
        assert!((value[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn default_guess_centres_on_abscissae() {
        let guess = default_guess(&[4.0, 10.0, 20.0]);
        assert_eq!(guess, SigmoidParameters::new(1.0, 12.0, DEFAULT_SLOPE_GUESS));
    }

    #[test]
    fn logistic_is_stable_for_large_arguments() {
        assert_eq!(logistic(-1_000.0), 0.0);
        assert_eq!(logistic(1_000.0), 1.0);
        assert_eq!(logistic(0.0), 0.5);
    }

    #[test]
    fn sample_handles_degenerate_counts() {
        let params = SigmoidParameters::new(1.0, 0.0, 1.0);
        assert!(params.sample(0.0, 1.0, 0).is_empty());
        assert_eq!(params.sample(2.0, 9.0, 1), vec![(2.0, params.evaluate(2.0))]);
    }

    #[test]
    fn report_without_threshold_for_tiny_graphs() {
        let fit = SigmoidFit {
            parameters: SigmoidParameters::new(0.8, 0.5, -1.0),
            residual_sum_of_squares: 0.0,
        };
        let report = FitReport::new(fit, 2);
        assert_eq!(report.theoretical_threshold(), None);
        assert_eq!(report.probability_at_threshold(), None);
        assert_eq!(report.probability_at_midpoint(), 0.4);
    }

    #[test]
    fn report_evaluates_model_at_threshold() {
        let parameters = SigmoidParameters::new(1.0, 20.0, -0.3);
        let fit = SigmoidFit {
            parameters,
            residual_sum_of_squares: 0.1,
        };
        let report = FitReport::new(fit, 20);
        assert_eq!(report.theoretical_threshold(), Some(54));
        assert_eq!(report.probability_at_threshold(), Some(parameters.evaluate(54.0)));
        assert_eq!(report.probability_at_midpoint(), 0.5);
    }
}
