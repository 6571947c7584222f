//! Command implementations and argument parsing for the planaria CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use planaria_core::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_SEED, DEFAULT_TRIALS, DEFAULT_VERTEX_COUNT, EstimatorBuilder,
    ExecutionStrategy, FitOptions, PlanariaError, PlanarityOracle, PlanarityStudy,
    SigmoidCurveFitter, SigmoidParameters, max_edge_count, run_study,
};
use planaria_providers_lr::LrPlanarityOracle;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::{
    logging::LogArgs,
    sink::{write_curve_csv, write_fit_curve_csv},
};

/// Path of the empirical curve when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "planarity.csv";
/// Number of overlay samples written to `--fit-output`.
pub const DEFAULT_FIT_POINTS: usize = 1_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "planaria",
    about = "Estimate how often random graphs are planar and fit a logistic curve."
)]
pub struct Cli {
    /// Diagnostic output settings.
    #[command(flatten)]
    pub log: LogArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sweep the edge range, fit the sigmoid and write the results.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of vertices in every sampled graph.
    #[arg(long, default_value_t = DEFAULT_VERTEX_COUNT)]
    pub vertices: usize,

    /// Random graphs drawn per edge count.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Smallest edge count in the sweep (defaults to 1).
    #[arg(long = "min-edges")]
    pub min_edges: Option<usize>,

    /// Largest edge count in the sweep, inclusive (defaults to one below the
    /// complete graph).
    #[arg(long = "max-edges")]
    pub max_edges: Option<usize>,

    /// Seed for trial generation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// How trials are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Destination of the empirical curve.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Destination of the fitted overlay; skipped when absent or when no fit
    /// is available.
    #[arg(long = "fit-output")]
    pub fit_output: Option<PathBuf>,

    /// Samples in the fitted overlay.
    #[arg(long = "fit-points", default_value_t = DEFAULT_FIT_POINTS)]
    pub fit_points: usize,

    /// Iteration cap for the curve fit.
    #[arg(long = "max-iterations", default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, sequential otherwise.
    Auto,
    /// Single-threaded.
    Sequential,
    /// Rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an output artifact failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Estimation failed.
    #[error(transparent)]
    Core(#[from] PlanariaError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct StudySummary {
    /// Name reported by the planarity oracle.
    pub oracle: String,
    /// Trials behind each probability point.
    pub trials: usize,
    /// Swept edge counts, end exclusive.
    pub edge_range: Range<usize>,
    /// Curve and fit produced by the study.
    pub study: PlanarityStudy,
    /// Where the empirical curve was written.
    pub output: PathBuf,
    /// Where the fitted overlay was written, if it was.
    pub fit_output: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when estimation or writing an artifact fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use planaria_cli::cli::{Cli, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let output = dir.path().join("curve.csv");
/// let cli = Cli::try_parse_from([
///     "planaria".to_owned(),
///     "run".to_owned(),
///     "--vertices=6".to_owned(),
///     "--trials=32".to_owned(),
///     format!("--output={}", output.display()),
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.study.curve().len(), 14);
/// assert!(output.exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<StudySummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(vertices = command.vertices, trials = command.trials, strategy = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<StudySummary, CliError> {
    let mut builder = EstimatorBuilder::new()
        .with_vertex_count(command.vertices)
        .with_trials(command.trials)
        .with_seed(command.seed)
        .with_execution_strategy(command.strategy.into());
    if let Some(range) = requested_range(command.vertices, command.min_edges, command.max_edges) {
        builder = builder.with_edge_range(range);
    }
    let estimator = builder.build()?;
    Span::current().record("strategy", field::debug(estimator.execution_strategy()));

    let oracle = LrPlanarityOracle::new();
    let fitter = SigmoidCurveFitter::new(
        FitOptions::for_vertex_count(command.vertices)
            .with_max_iterations(command.max_iterations),
    );
    let study = run_study(&estimator, &oracle, &fitter)?;

    write_artifact(&command.output, |writer| write_curve_csv(study.curve(), writer))?;
    let edge_range = estimator.edge_range();
    let fit_output = match (command.fit_output, study.fit().report()) {
        (Some(path), Some(report)) => {
            let overlay = overlay_domain(&edge_range);
            write_fit_path(&path, report.parameters(), overlay, command.fit_points)?;
            Some(path)
        }
        _ => None,
    };

    info!(
        oracle = oracle.name(),
        points = study.curve().len(),
        fitted = study.fit().report().is_some(),
        output = %command.output.display(),
        "command completed"
    );
    Ok(StudySummary {
        oracle: oracle.name().to_owned(),
        trials: estimator.trials().get(),
        edge_range,
        study,
        output: command.output,
        fit_output,
    })
}

/// Translates the inclusive `--min-edges`/`--max-edges` pair into the
/// estimator's half-open range. `None` keeps the estimator's default.
pub(super) fn requested_range(
    vertices: usize,
    min_edges: Option<usize>,
    max_edges: Option<usize>,
) -> Option<Range<usize>> {
    if min_edges.is_none() && max_edges.is_none() {
        return None;
    }
    let start = min_edges.unwrap_or(1);
    let end = match max_edges {
        Some(max) => max.saturating_add(1),
        None => max_edge_count(vertices).unwrap_or(usize::MAX),
    };
    Some(start..end)
}

/// Abscissae covered by the fitted overlay: the swept edge counts.
pub(super) fn overlay_domain(range: &Range<usize>) -> (f64, f64) {
    let start = range.start as f64;
    let end = range.end.saturating_sub(1).max(range.start) as f64;
    (start, end)
}

#[instrument(name = "cli.write_fit", err, skip(parameters), fields(path = %path.display()))]
fn write_fit_path(
    path: &Path,
    parameters: SigmoidParameters,
    domain: (f64, f64),
    points: usize,
) -> Result<(), CliError> {
    let (start, end) = domain;
    write_artifact(path, |writer| {
        write_fit_curve_csv(&parameters.sample(start, end, points), writer)
    })
}

pub(super) fn write_artifact(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), CliError> {
    let to_cli = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_cli)?;
    let mut writer = BufWriter::new(file);
    write(&mut writer).map_err(to_cli)?;
    writer.flush().map_err(to_cli)
}
