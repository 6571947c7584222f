//! Shared test utilities used across planaria crates.

pub mod ci;
pub mod tracing;
