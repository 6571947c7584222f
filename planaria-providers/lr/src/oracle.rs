//! [`PlanarityOracle`] adapter for the Left-Right test.

use planaria_core::{OracleError, PlanarityOracle, SimpleGraph};

use crate::{errors::LrPlanarityError, lr};

/// Decides planarity exactly with the Left-Right criterion.
///
/// # Examples
/// ```
/// use planaria_core::{PlanarityOracle, SimpleGraph};
/// use planaria_providers_lr::LrPlanarityOracle;
///
/// let oracle = LrPlanarityOracle::new();
/// assert!(oracle.is_planar(&SimpleGraph::complete(4))?);
/// assert!(!oracle.is_planar(&SimpleGraph::complete(5))?);
/// # Ok::<(), planaria_core::OracleError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LrPlanarityOracle {
    name: String,
}

impl LrPlanarityOracle {
    /// Creates the oracle under its default name, `left-right`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("left-right")
    }

    /// Creates the oracle under a caller-chosen name, which appears in
    /// tracing fields and error context.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Runs the test, surfacing internal failures with their specific kind.
    ///
    /// # Errors
    /// Returns [`LrPlanarityError`] if the test reaches an inconsistent
    /// state.
    pub fn check(&self, graph: &SimpleGraph) -> Result<bool, LrPlanarityError> {
        lr::is_planar(graph)
    }
}

impl Default for LrPlanarityOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanarityOracle for LrPlanarityOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        self.check(graph).map_err(|err| {
            tracing::error!(
                oracle = %self.name,
                vertices = graph.vertex_count(),
                edges = graph.edge_count(),
                error = %err,
                "left-right test failed"
            );
            OracleError::from(err)
        })
    }
}
