//! Command-line interface orchestration for planaria.
//!
//! The CLI offers a single `run` command that sweeps the edge range with the
//! Left-Right oracle, fits the logistic model and writes the CSV artifacts.

mod commands;

pub use commands::{
    Cli, CliError, Command, DEFAULT_FIT_POINTS, DEFAULT_OUTPUT, RunCommand, StrategyArg,
    StudySummary, run_cli,
};
