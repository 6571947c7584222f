//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so Criterion ids render
//! consistently across groups.

use std::fmt;

/// Shape of the random graphs fed to a benchmark.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Vertices per graph.
    pub vertices: usize,
    /// Edges per graph.
    pub edges: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V={},E={}", self.vertices, self.edges)
    }
}

/// Parameters for a point-estimation benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct EstimateBenchParams {
    /// Graph shape at the estimated point.
    pub graph: GraphBenchParams,
    /// Trials behind the estimate.
    pub trials: usize,
    /// Whether trial blocks run on the rayon pool.
    pub parallel: bool,
}

impl fmt::Display for EstimateBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.parallel { "par" } else { "seq" };
        write!(f, "{},n={},{mode}", self.graph, self.trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, "V=20,E=27,n=1000,seq")]
    #[case(true, "V=20,E=27,n=1000,par")]
    fn estimate_params_render_mode(#[case] parallel: bool, #[case] expected: &str) {
        let params = EstimateBenchParams {
            graph: GraphBenchParams {
                vertices: 20,
                edges: 27,
            },
            trials: 1_000,
            parallel,
        };
        assert_eq!(params.to_string(), expected);
    }
}
