//! Output artifacts: the CSV series and the human-readable report.
//!
//! Both CSV files share the `Arcos,Probabilidad` header so downstream
//! plotting reads the empirical and fitted curves the same way. Floats are
//! printed with Rust's shortest round-trip formatting.

use std::io::{self, Write};

use planaria_core::{FitOutcome, ProbabilityCurve};

use crate::cli::StudySummary;

/// Header shared by both CSV artifacts.
pub const CSV_HEADER: &str = "Arcos,Probabilidad";

/// Writes one `edge_count,probability` row per point of `curve`.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// # use std::num::NonZeroUsize;
/// # use planaria_cli::sink::write_curve_csv;
/// # use planaria_core::{ProbabilityCurve, ProbabilityPoint};
/// #
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let trials = NonZeroUsize::new(4).ok_or("zero trials")?;
/// let points = vec![
///     ProbabilityPoint::new(1, 4, trials).ok_or("invalid point")?,
///     ProbabilityPoint::new(2, 1, trials).ok_or("invalid point")?,
/// ];
/// let curve = ProbabilityCurve::from_points(5, points).ok_or("unsorted")?;
/// let mut buffer = Vec::new();
/// write_curve_csv(&curve, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "Arcos,Probabilidad\n1,1.0\n2,0.25\n");
/// # Ok(())
/// # }
/// ```
pub fn write_curve_csv(curve: &ProbabilityCurve, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for point in curve {
        writeln!(writer, "{},{:?}", point.edge_count(), point.probability())?;
    }
    Ok(())
}

/// Writes the sampled sigmoid overlay as `x,model(x)` rows.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
pub fn write_fit_curve_csv(samples: &[(f64, f64)], mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for (x, y) in samples {
        writeln!(writer, "{x:?},{y:?}")?;
    }
    Ok(())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_report(summary: &StudySummary, mut writer: impl Write) -> io::Result<()> {
    let curve = summary.study.curve();
    writeln!(writer, "oracle: {}", summary.oracle)?;
    writeln!(writer, "vertices: {}", curve.vertex_count())?;
    writeln!(writer, "trials per point: {}", summary.trials)?;
    let range = &summary.edge_range;
    if range.is_empty() {
        writeln!(writer, "edge range: empty")?;
    } else {
        writeln!(writer, "edge range: {}..={}", range.start, range.end - 1)?;
    }
    writeln!(writer, "points: {}", curve.len())?;

    match planaria_core::planar_edge_bound(curve.vertex_count()) {
        Some(threshold) => writeln!(writer, "theoretical threshold (3V-6): {threshold}")?,
        None => writeln!(writer, "theoretical threshold (3V-6): undefined")?,
    }

    match summary.study.fit() {
        FitOutcome::Fitted(report) => {
            let params = report.parameters();
            writeln!(
                writer,
                "sigmoid fit: L = {:.6}, x0 = {:.6}, k = {:.6}",
                params.l, params.x0, params.k
            )?;
            if let Some(at_threshold) = report.probability_at_threshold() {
                writeln!(writer, "model probability at threshold: {at_threshold:.6}")?;
            }
            writeln!(
                writer,
                "model probability at x0: {:.6}",
                report.probability_at_midpoint()
            )?;
            writeln!(
                writer,
                "residual sum of squares: {:.6}",
                report.fit().residual_sum_of_squares()
            )?;
        }
        FitOutcome::Unavailable(failure) => {
            writeln!(writer, "sigmoid fit: unavailable ({failure})")?;
        }
    }

    writeln!(writer, "curve written to: {}", summary.output.display())?;
    if let Some(path) = &summary.fit_output {
        writeln!(writer, "fit curve written to: {}", path.display())?;
    }
    Ok(())
}
