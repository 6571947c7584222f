//! Diagnostics for the planaria CLI.
//!
//! Sweeps emit one `debug` event per edge count and the fitter reports how the
//! optimiser ended. The global `--log-format` and `--verbose` flags decide how
//! much of that reaches `stderr`; `RUST_LOG` overrides the level when set.

use std::env;

use clap::{Args, ValueEnum};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_log::{LogTracer, log::SetLoggerError};
use tracing_subscriber::{
    EnvFilter, Layer, filter::ParseError, fmt::format::FmtSpan, layer::SubscriberExt,
};

/// Environment variable read when `--log-format` is absent.
pub const LOG_FORMAT_ENV: &str = "PLANARIA_LOG_FORMAT";

const QUIET_DIRECTIVES: &str = "info";
const VERBOSE_DIRECTIVES: &str = "info,planaria_core=debug,planaria_cli=debug";

/// How diagnostics are written to `stderr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Text lines meant for terminals.
    #[default]
    Human,
    /// One JSON object per event, with the span list attached.
    Json,
}

/// Logging flags shared by every subcommand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct LogArgs {
    /// Diagnostic output format.
    #[arg(
        long = "log-format",
        value_enum,
        env = LOG_FORMAT_ENV,
        default_value_t = LogFormat::Human,
        global = true
    )]
    pub format: LogFormat,

    /// Log per-edge-count progress, span timings and optimiser detail.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl LogArgs {
    /// Filter directives used when `RUST_LOG` is unset.
    #[must_use]
    pub const fn default_directives(&self) -> &'static str {
        if self.verbose {
            VERBOSE_DIRECTIVES
        } else {
            QUIET_DIRECTIVES
        }
    }

    /// Builds the level filter from explicit `directives`, falling back to
    /// [`Self::default_directives`].
    ///
    /// # Errors
    /// Returns [`LoggingError::InvalidFilter`] when `directives` do not parse.
    pub fn filter(&self, directives: Option<&str>) -> Result<EnvFilter, LoggingError> {
        match directives {
            Some(raw) => EnvFilter::try_new(raw).map_err(|source| LoggingError::InvalidFilter {
                directives: raw.to_owned(),
                source,
            }),
            None => Ok(EnvFilter::new(self.default_directives())),
        }
    }
}

/// Errors raised while installing the diagnostics pipeline.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `RUST_LOG` held directives that do not parse.
    #[error("invalid log filter `{directives}`: {source}")]
    InvalidFilter {
        /// Raw directives as supplied.
        directives: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// Another `log` backend was already registered.
    #[error("failed to bridge `log` records: {source}")]
    LogBridge {
        /// Error raised by the `log` facade.
        #[source]
        source: SetLoggerError,
    },
    /// Another `tracing` subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing`.
        #[source]
        source: SetGlobalDefaultError,
    },
}

/// Installs the global subscriber described by `args`.
///
/// Call once, before any command runs. Records from crates that use the `log`
/// facade, such as the curve optimiser, are forwarded into the same pipeline.
///
/// # Errors
/// Returns [`LoggingError`] when `RUST_LOG` does not parse or a logger is
/// already installed.
pub fn install(args: &LogArgs) -> Result<(), LoggingError> {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = args.filter(directives.as_deref())?;

    let span_events = if args.verbose {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(span_events)
        .with_writer(std::io::stderr);
    let layer = match args.format {
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => layer.with_target(args.verbose).boxed(),
    };

    LogTracer::init().map_err(|source| LoggingError::LogBridge { source })?;
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|source| LoggingError::InstallFailed { source })
}
