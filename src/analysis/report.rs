//! Summary report generation
//!
//! This module writes the per-run summary in two forms: an ASCII text
//! report (`stash-analysis.txt`) and a machine-readable JSON export
//! (`stash-analysis.json`).

use crate::common::tables::{format_summary_table, SummaryRow};
use std::fs;
use std::path::Path;

/// Errors that can occur during report generation
#[derive(Debug)]
pub enum ReportError {
    FileWrite(std::io::Error),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::FileWrite(e) => write!(f, "Failed to write report: {}", e),
            ReportError::Serialization(e) => write!(f, "Failed to serialize summary: {}", e),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::FileWrite(err)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Serialization(err)
    }
}

type Result<T> = core::result::Result<T, ReportError>;

/// Generate the summary report files for a completed run
///
/// Writes `stash-analysis.txt` (title, summary table, and totals footer)
/// and `stash-analysis.json` (the same rows as pretty-printed JSON) into
/// `output_dir`, overwriting existing files.
///
/// # Arguments
/// * `rows` - Per-configuration summary rows, in analysis order
/// * `output_dir` - Directory where the report files should be saved
///
/// # Returns
/// * `Ok(())` - If both report files were written
/// * `Err(ReportError)` - If serialization or a file write failed
pub fn generate_summary_report(rows: &[SummaryRow], output_dir: &Path) -> Result<()> {
    let table = format_summary_table(rows, Some("Stash Size Exceedance Summary"));

    let footer = format!(
        "Summary\n{}\nConfigurations analyzed: {}",
        "=".repeat(7),
        rows.len()
    );

    let text_report = format!(
        "Stash Analysis\n{}\n\n{}\n\n{}",
        "=".repeat(14),
        table,
        footer
    );
    fs::write(output_dir.join("stash-analysis.txt"), text_report)?;

    let json_report = serde_json::to_string_pretty(rows)?;
    fs::write(output_dir.join("stash-analysis.json"), json_report)?;

    Ok(())
}
