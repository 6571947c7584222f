//! Oracles shared by the core integration tests.

use planaria_core::{OracleError, PlanarityOracle, SimpleGraph};

/// Accepts graphs within Euler's `3V−6` bound. Exact only for the trivially
/// decided extremes, which is all these tests rely on.
pub struct EulerBound;

impl PlanarityOracle for EulerBound {
    fn name(&self) -> &str {
        "euler-bound"
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        let v = graph.vertex_count();
        Ok(v < 3 || graph.edge_count() <= 3 * v - 6)
    }
}

/// Rejects every graph with [`OracleError::Unsupported`].
pub struct Refusing;

impl PlanarityOracle for Refusing {
    fn name(&self) -> &str {
        "refusing"
    }

    fn is_planar(&self, _graph: &SimpleGraph) -> Result<bool, OracleError> {
        Err(OracleError::Unsupported {
            reason: "refuses every graph".to_owned(),
        })
    }
}
