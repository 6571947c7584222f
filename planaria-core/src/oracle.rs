//! Planarity oracle abstraction consumed by the Monte Carlo estimator.

use crate::{error::OracleError, graph::SimpleGraph};

/// Decides whether a graph is planar.
///
/// The estimator is generic over this trait so faster or alternative
/// planarity algorithms can be swapped in without touching sampling or
/// fitting. Implementations must be exact: the estimate is only as good as
/// the oracle's answers.
///
/// # Examples
/// ```
/// use planaria_core::{OracleError, PlanarityOracle, SimpleGraph};
///
/// /// Only recognises forests, which are always planar.
/// struct ForestsOnly;
///
/// impl PlanarityOracle for ForestsOnly {
///     fn name(&self) -> &str { "forests-only" }
///     fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
///         if graph.edge_count() < graph.vertex_count() {
///             Ok(true)
///         } else {
///             Err(OracleError::Unsupported { reason: "graph may contain a cycle".into() })
///         }
///     }
/// }
///
/// let oracle = ForestsOnly;
/// assert_eq!(oracle.is_planar(&SimpleGraph::empty(3))?, true);
/// assert!(oracle.is_planar(&SimpleGraph::complete(3)).is_err());
/// # Ok::<(), OracleError>(())
/// ```
pub trait PlanarityOracle {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns `true` when `graph` admits a crossing-free drawing in the
    /// plane.
    ///
    /// # Errors
    /// Returns [`OracleError`] when the oracle cannot decide the input.
    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError>;
}

impl<O: PlanarityOracle + ?Sized> PlanarityOracle for &O {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        (**self).is_planar(graph)
    }
}
