//! Support library for the planaria CLI binary.
//!
//! Re-exports the command, logging and output modules so doctests and
//! integration tests can exercise the pipeline without forking a subprocess.

pub mod cli;
pub mod logging;
pub mod sink;
