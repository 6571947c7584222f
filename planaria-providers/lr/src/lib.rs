//! Left-Right planarity testing for `planaria-core`.
//!
//! [`LrPlanarityOracle`] decides planarity of a [`planaria_core::SimpleGraph`]
//! in linear time using the Left-Right criterion of de Fraysseix and
//! Rosenstiehl, in the formulation of Brandes. Both depth-first passes run on
//! explicit stacks, so recursion depth never limits graph size.

mod conflict;
mod errors;
mod lr;
mod oracle;

pub use crate::{errors::LrPlanarityError, oracle::LrPlanarityOracle};

#[cfg(test)]
mod tests;
