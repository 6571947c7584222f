//! Errors surfaced by the Left-Right planarity test.

use planaria_core::OracleError;
use thiserror::Error;

/// Internal inconsistencies detected while running the Left-Right test.
///
/// These indicate a defect in the test rather than a property of the input
/// graph; the oracle reports them as [`OracleError::Internal`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LrPlanarityError {
    /// The conflict-pair stack ran out while merging the constraints of an
    /// edge.
    #[error("conflict stack exhausted while merging constraints of edge {edge}")]
    ConflictStackUnderflow {
        /// Index of the edge being merged.
        edge: usize,
    },
    /// An edge with return edges below its source left no conflict pair
    /// behind.
    #[error("edge {edge} has return edges but no conflict pair records them")]
    MissingReturnEdges {
        /// Index of the edge whose return edges are missing.
        edge: usize,
    },
}

impl From<LrPlanarityError> for OracleError {
    fn from(err: LrPlanarityError) -> Self {
        Self::Internal {
            reason: err.to_string(),
        }
    }
}
