//! CLI entry point for the planaria planarity study.
//!
//! Parses command-line arguments with clap and installs logging from the
//! global flags. It then runs the sweep and fit, writes the CSV artifacts and
//! renders the report to stdout. Failures map to a failing exit code.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use planaria_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
    sink::render_report,
};
use tracing::{error, field};

/// Execute the command, render the report and flush the output stream.
fn try_main(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_report(&summary, &mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::install(&cli.log) {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main(cli) {
        let (code, oracle_code) = err
            .downcast_ref::<CliError>()
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some((Some(core.code()), core.oracle_code())),
                CliError::Io { .. } => None,
            })
            .unwrap_or((None, None));

        let code_field = code.map(|code| field::display(code.as_str()));
        let oracle_code_field = oracle_code.map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            code = code_field,
            oracle_code = oracle_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
