//! Output formatting for lint results.

use anyhow::Result;
use archgraph_core::{LintResult, ViolationDiagnostic};
use std::io::Write;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(&mut std::io::stdout().lock(), result)?,
        OutputFormat::Json => print_json(result)?,
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result)?,
    }
    Ok(())
}

fn write_text<W: Write>(w: &mut W, result: &LintResult) -> std::io::Result<()> {
    for violation in &result.violations {
        writeln!(w, "{}", violation.format())?;
    }
    write_summary(w, result)
}

fn write_summary<W: Write>(w: &mut W, result: &LintResult) -> std::io::Result<()> {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    writeln!(
        w,
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult) -> std::io::Result<()> {
    for violation in &result.violations {
        let report = miette::Report::new(ViolationDiagnostic::from(violation));
        println!("{report:?}");
    }
    write_summary(&mut std::io::stdout().lock(), result)
}
