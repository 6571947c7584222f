//! Benchmark support crate for planaria.
//!
//! Provides parameter types, pre-sampled graph sets and synthetic probability
//! curves used by the Criterion benchmarks for sampling, the Left-Right
//! oracle, point estimation and curve fitting.

pub mod error;
pub mod params;
pub mod workload;
