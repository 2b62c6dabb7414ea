//! Summary table rows and ASCII table formatting
//!
//! This module provides the per-configuration summary representation shared
//! by the stdout output, the text report, and the JSON export:
//! - [`SummaryRow`] derived from a record and its exceedance curve
//! - ASCII table formatting using the [`tabled`] crate

use crate::analysis::ExceedanceCurve;
use crate::common::StashRecord;
use serde::Serialize;
use tabled::{Table, Tabled};

/// Per-configuration summary of the analyzed stash distribution
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SummaryRow {
    /// Configuration label (e.g. "Z4")
    #[tabled(rename = "Configuration")]
    pub configuration: String,
    /// Total number of measured accesses
    #[tabled(rename = "Total Accesses")]
    pub total_accesses: u64,
    /// Number of distinct stash sizes observed
    #[tabled(rename = "Distinct Sizes")]
    pub distinct_sizes: usize,
    /// Largest stash size observed
    #[tabled(rename = "Max Stash Size")]
    pub max_stash_size: u32,
    /// Largest log2(1/δ(R)) value on the curve
    #[tabled(rename = "Peak log2(1/δ)")]
    pub peak_log_delta_inv: String,
}

impl SummaryRow {
    /// Creates a summary row from a record and its computed curve
    pub fn new(configuration: &str, record: &StashRecord, curve: &ExceedanceCurve) -> Self {
        let max_stash_size = record.histogram.keys().next_back().copied().unwrap_or(0);
        let peak_log_delta_inv = match curve.peak_log_delta_inv() {
            Some(peak) => format!("{:.3}", peak),
            None => "n/a".to_string(),
        };

        Self {
            configuration: configuration.to_string(),
            total_accesses: record.total_accesses,
            distinct_sizes: record.histogram.len(),
            max_stash_size,
            peak_log_delta_inv,
        }
    }
}

/// Formats summary rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - A slice of [`SummaryRow`] to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_summary_table(rows: &[SummaryRow], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No configurations analyzed".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}
