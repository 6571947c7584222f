//! Planaria core library.
//!
//! Estimates the probability that a uniformly random simple graph with `V`
//! vertices and `E` edges is planar, then fits a logistic curve to the
//! estimates across a range of edge counts. Planarity itself is decided by a
//! pluggable [`PlanarityOracle`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cancel;
mod error;
mod estimator;
mod fit;
mod graph;
mod oracle;
mod sampler;
mod seed;
mod study;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{
        DEFAULT_SEED, DEFAULT_TRIALS, DEFAULT_VERTEX_COUNT, EstimatorBuilder, ExecutionStrategy,
    },
    cancel::CancellationToken,
    error::{
        FitFailure, FitFailureCode, GraphError, GraphErrorCode, OracleError, OracleErrorCode,
        PlanariaError, PlanariaErrorCode, Result,
    },
    estimator::{MonteCarloEstimator, ProbabilityCurve, ProbabilityPoint, TRIAL_BLOCK},
    fit::{
        DEFAULT_MAX_ITERATIONS, DEFAULT_SLOPE_GUESS, FitOptions, FitReport, SigmoidCurveFitter,
        SigmoidFit, SigmoidParameters,
    },
    graph::{EdgeUniverse, SimpleGraph, max_edge_count, planar_edge_bound},
    oracle::PlanarityOracle,
    sampler::{MIN_VERTEX_COUNT, RandomGraphSampler},
    study::{FitOutcome, PlanarityStudy, run_study, run_study_with_cancel},
};
