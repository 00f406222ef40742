//! Report rendering.
//!
//! Rows go to the given writer (stdout in practice) either as plain text, one
//! key per line in `authorized_keys` order with an age annotation, or as a
//! JSON array. Diagnostics stay on the log channel so both formats remain
//! machine-parseable.

use crate::report::ReportRow;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render the report rows in the selected format.
pub fn print_report<W: Write>(out: &mut W, rows: &[ReportRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for row in rows {
                writeln!(out, "{row}").context("failed to write report row")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows).context("failed to serialize report")?;
            writeln!(out).context("failed to write report")?;
        }
    }
    Ok(())
}
