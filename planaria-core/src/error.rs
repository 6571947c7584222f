//! Error types for the Planaria core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.
//! Every enum carries a stable machine-readable code so logs and exit paths can
//! report failures without matching on display strings.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::SimpleGraph`] from an explicit
/// edge list.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a vertex outside `0..vertex_count`.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex label.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// An edge joined a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed in a simple graph")]
    SelfLoop {
        /// The vertex carrying the loop.
        vertex: usize,
    },
    /// The same unordered pair appeared more than once.
    #[error("edge ({left}, {right}) appears more than once")]
    DuplicateEdge {
        /// Smaller endpoint of the repeated edge.
        left: usize,
        /// Larger endpoint of the repeated edge.
        right: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a vertex outside `0..vertex_count`.
        VertexOutOfRange => VertexOutOfRange { .. } => "GRAPH_VERTEX_OUT_OF_RANGE",
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The same unordered pair appeared more than once.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// An error produced by a [`crate::PlanarityOracle`] implementation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OracleError {
    /// The oracle cannot decide planarity for this input.
    #[error("oracle does not support this graph: {reason}")]
    Unsupported {
        /// Human-readable explanation supplied by the oracle.
        reason: String,
    },
    /// The oracle hit an internal failure while deciding planarity.
    #[error("oracle failed internally: {reason}")]
    Internal {
        /// Human-readable explanation supplied by the oracle.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`OracleError`] variants.
    enum OracleErrorCode for OracleError {
        /// The oracle cannot decide planarity for this input.
        Unsupported => Unsupported { .. } => "ORACLE_UNSUPPORTED",
        /// The oracle hit an internal failure while deciding planarity.
        Internal => Internal { .. } => "ORACLE_INTERNAL",
    }
}

/// Error type produced when configuring or running the Monte Carlo estimator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PlanariaError {
    /// The vertex count must be at least two.
    #[error("vertex_count must be at least 2 (got {got})")]
    InvalidVertexCount {
        /// The invalid vertex count supplied by the caller.
        got: usize,
    },
    /// `V·(V−1)/2` does not fit in `usize`.
    #[error("edge universe for {vertex_count} vertices overflows the host pointer width")]
    EdgeUniverseOverflow {
        /// The vertex count whose universe overflowed.
        vertex_count: usize,
    },
    /// The requested edge count exceeds the complete-graph bound.
    #[error("edge_count {edge_count} exceeds the maximum {max} for {vertex_count} vertices")]
    EdgeCountOutOfRange {
        /// Requested number of edges.
        edge_count: usize,
        /// Number of vertices in the sampled graphs.
        vertex_count: usize,
        /// Edge count of the complete graph on `vertex_count` vertices.
        max: usize,
    },
    /// The sweep range is reversed or reaches beyond the complete graph.
    #[error("edge range {start}..{end} is invalid; bounds must satisfy start <= end <= {max} + 1")]
    InvalidEdgeRange {
        /// Inclusive lower bound of the requested range.
        start: usize,
        /// Exclusive upper bound of the requested range.
        end: usize,
        /// Edge count of the complete graph.
        max: usize,
    },
    /// Each probability point needs at least one trial.
    #[error("trials must be at least 1 (got {got})")]
    InvalidTrials {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A [`crate::PlanarityOracle`] failed while deciding a sampled graph.
    #[error("planarity oracle `{oracle}` failed at edge_count {edge_count}: {error}")]
    Oracle {
        /// Name reported by the failing oracle.
        oracle: Arc<str>,
        /// Edge count of the point being estimated.
        edge_count: usize,
        #[source]
        /// Underlying oracle failure.
        error: OracleError,
    },
    /// The sweep observed a cancellation request before finishing.
    #[error("sweep cancelled after {completed} completed points")]
    Cancelled {
        /// Number of points finished before the request was observed.
        completed: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PlanariaError`] variants.
    enum PlanariaErrorCode for PlanariaError {
        /// The vertex count must be at least one.
        InvalidVertexCount => InvalidVertexCount { .. } => "PLANARIA_INVALID_VERTEX_COUNT",
        /// `V·(V−1)/2` does not fit in `usize`.
        EdgeUniverseOverflow => EdgeUniverseOverflow { .. } => "PLANARIA_EDGE_UNIVERSE_OVERFLOW",
        /// The requested edge count exceeds the complete-graph bound.
        EdgeCountOutOfRange => EdgeCountOutOfRange { .. } => "PLANARIA_EDGE_COUNT_OUT_OF_RANGE",
        /// The sweep range is reversed or reaches beyond the complete graph.
        InvalidEdgeRange => InvalidEdgeRange { .. } => "PLANARIA_INVALID_EDGE_RANGE",
        /// Each probability point needs at least one trial.
        InvalidTrials => InvalidTrials { .. } => "PLANARIA_INVALID_TRIALS",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "PLANARIA_BACKEND_UNAVAILABLE",
        /// A planarity oracle failed while deciding a sampled graph.
        OracleFailure => Oracle { .. } => "PLANARIA_ORACLE_FAILURE",
        /// The sweep observed a cancellation request before finishing.
        Cancelled => Cancelled { .. } => "PLANARIA_CANCELLED",
    }
}

impl PlanariaError {
    /// Retrieve the inner [`OracleErrorCode`] when the error originated in a
    /// [`crate::PlanarityOracle`].
    pub const fn oracle_code(&self) -> Option<OracleErrorCode> {
        match self {
            Self::Oracle { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Returns `true` for malformed vertex, edge or trial inputs that are
    /// rejected before any sampling happens.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidVertexCount { .. }
                | Self::EdgeUniverseOverflow { .. }
                | Self::EdgeCountOutOfRange { .. }
                | Self::InvalidEdgeRange { .. }
                | Self::InvalidTrials { .. }
        )
    }
}

/// Reasons a sigmoid fit produced no parameters.
///
/// A fit failure never invalidates the empirical curve it was attempted on;
/// callers keep reporting the curve and mark the fitted overlay as missing.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FitFailure {
    /// Three parameters need at least three observations.
    #[error("sigmoid fit needs at least 3 points (got {got})")]
    TooFewPoints {
        /// Number of observations supplied.
        got: usize,
    },
    /// The abscissa and ordinate series had different lengths.
    #[error("series length mismatch: {xs} edge counts but {ys} probabilities")]
    LengthMismatch {
        /// Length of the abscissa series.
        xs: usize,
        /// Length of the ordinate series.
        ys: usize,
    },
    /// An observation was NaN or infinite.
    #[error("observation {index} is not finite")]
    NonFiniteData {
        /// Position of the offending observation.
        index: usize,
    },
    /// Every observation had the same value so no transition exists to fit.
    #[error("probability series is constant at {value}; no transition to fit")]
    DegenerateCurve {
        /// The constant observed value.
        value: f64,
    },
    /// The optimiser gave up, or stalled on parameters that explain none of
    /// the transition.
    #[error("optimal parameters not found within {iterations} iterations")]
    NotConverged {
        /// Iteration budget the optimiser ran with.
        iterations: usize,
    },
    /// The optimiser produced NaN or infinite parameters.
    #[error("optimiser produced non-finite parameters")]
    NonFiniteParameters,
}

define_error_codes! {
    /// Stable codes describing [`FitFailure`] variants.
    enum FitFailureCode for FitFailure {
        /// Three parameters need at least three observations.
        TooFewPoints => TooFewPoints { .. } => "FIT_TOO_FEW_POINTS",
        /// The abscissa and ordinate series had different lengths.
        LengthMismatch => LengthMismatch { .. } => "FIT_LENGTH_MISMATCH",
        /// An observation was NaN or infinite.
        NonFiniteData => NonFiniteData { .. } => "FIT_NON_FINITE_DATA",
        /// Every observation had the same value.
        DegenerateCurve => DegenerateCurve { .. } => "FIT_DEGENERATE_CURVE",
        /// The optimiser exhausted its evaluation budget.
        NotConverged => NotConverged { .. } => "FIT_NOT_CONVERGED",
        /// The optimiser produced NaN or infinite parameters.
        NonFiniteParameters => NonFiniteParameters => "FIT_NON_FINITE_PARAMETERS",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PlanariaError>;
