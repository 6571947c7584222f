//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?` instead of `.expect()`.

use planaria_core::{FitFailure, PlanariaError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Estimator configuration or sampling failed.
    #[error("estimator setup failed: {0}")]
    Planaria(#[from] PlanariaError),
    /// Fitting a reference curve failed.
    #[error("sigmoid fit failed: {0}")]
    Fit(#[from] FitFailure),
    /// A synthetic curve could not be assembled from its points.
    #[error("synthetic curve for {vertices} vertices is malformed")]
    MalformedCurve {
        /// Vertex count of the curve being built.
        vertices: usize,
    },
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
