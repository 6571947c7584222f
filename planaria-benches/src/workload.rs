//! Deterministic benchmark inputs.

use std::num::NonZeroUsize;

use planaria_core::{
    ProbabilityCurve, ProbabilityPoint, RandomGraphSampler, SigmoidParameters, SimpleGraph,
};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Draws `count` random graphs of the given shape from a seeded RNG.
///
/// # Errors
/// Returns [`BenchSetupError::Planaria`] when the shape is invalid.
pub fn sample_graphs(
    params: GraphBenchParams,
    count: usize,
    seed: u64,
) -> Result<Vec<SimpleGraph>, BenchSetupError> {
    let sampler = RandomGraphSampler::new(params.vertices)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Ok(sampler.sample(params.edges, &mut rng)?))
        .collect()
}

/// Builds the curve a perfect estimator would report for `model`: one point
/// per edge count in `1..C(V, 2)` with `round(model(E) · trials)` planar
/// graphs.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for zero trials and
/// [`BenchSetupError::MalformedCurve`] if the model leaves `[0, 1]`.
pub fn synthetic_curve(
    vertices: usize,
    trials: usize,
    model: SigmoidParameters,
) -> Result<ProbabilityCurve, BenchSetupError> {
    let trials_nz = NonZeroUsize::new(trials).ok_or(BenchSetupError::ZeroValue {
        context: "synthetic curve trials",
    })?;
    let max = planaria_core::max_edge_count(vertices)
        .ok_or(BenchSetupError::MalformedCurve { vertices })?;
    let points = (1..max)
        .map(|edges| {
            let expected = (model.evaluate(edges as f64) * trials as f64).round();
            let planar = expected.clamp(0.0, trials as f64) as usize;
            ProbabilityPoint::new(edges, planar, trials_nz)
                .ok_or(BenchSetupError::MalformedCurve { vertices })
        })
        .collect::<Result<Vec<_>, _>>()?;
    ProbabilityCurve::from_points(vertices, points)
        .ok_or(BenchSetupError::MalformedCurve { vertices })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sampled_graphs_have_requested_shape() {
        let params = GraphBenchParams {
            vertices: 12,
            edges: 20,
        };
        let graphs = sample_graphs(params, 5, 1).expect("shape is valid");
        assert_eq!(graphs.len(), 5);
        assert!(
            graphs
                .iter()
                .all(|g| g.vertex_count() == 12 && g.edge_count() == 20)
        );
        assert_eq!(graphs, sample_graphs(params, 5, 1).expect("shape is valid"));
    }

    #[rstest]
    fn oversized_shape_is_rejected() {
        let params = GraphBenchParams {
            vertices: 4,
            edges: 7,
        };
        assert!(matches!(
            sample_graphs(params, 1, 0),
            Err(BenchSetupError::Planaria(_))
        ));
    }

    #[rstest]
    fn synthetic_curve_follows_model() {
        let model = SigmoidParameters::new(1.0, 27.0, -0.5);
        let curve = synthetic_curve(20, 1_000, model).expect("model stays in [0, 1]");
        assert_eq!(curve.len(), 189);
        let at_midpoint = curve.get(27).expect("27 is swept").probability();
        assert!((at_midpoint - 0.5).abs() < 1e-3);
        assert!(matches!(
            synthetic_curve(20, 0, model),
            Err(BenchSetupError::ZeroValue { .. })
        ));
    }
}
