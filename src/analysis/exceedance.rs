//! Exceedance probability computation
//!
//! Converts a parsed [`StashRecord`] into the δ(R) probability sequence and
//! the log2(1/δ(R)) curve rendered by the plotting module.
//!
//! The simulator pre-aggregates tail sums before writing the file: the count
//! stored at stash size R is the number of accesses whose stash size was at
//! least R. The per-row quotient `count / total_accesses` is therefore the
//! exceedance probability δ(R) directly; no re-aggregation happens here.

use crate::common::StashRecord;
use thiserror::Error;

/// Sentinel stored for rows with a zero occurrence count, where
/// log2(1/δ(R)) is undefined.
pub const ZERO_COUNT_LOG_SENTINEL: f64 = 0.0;

/// Errors that can occur during exceedance computation
#[derive(Error, Debug)]
pub enum ExceedanceError {
    #[error("Total access count is zero, probabilities are undefined")]
    UndefinedProbability,
}

type Result<T> = core::result::Result<T, ExceedanceError>;

/// Exceedance probability curve of one configuration
///
/// Stores parallel vectors over the stash sizes of the source record, in
/// ascending stash-size order:
/// - δ(R), the empirical exceedance probability at each stash size
/// - log2(1/δ(R)), the value plotted on the y-axis
#[derive(Debug, Clone)]
pub struct ExceedanceCurve {
    /// Stash sizes in ascending order.
    pub stash_sizes: Vec<u32>,
    /// δ(R) per stash size.
    pub deltas: Vec<f64>,
    /// log2(1/δ(R)) per stash size, [`ZERO_COUNT_LOG_SENTINEL`] where
    /// δ(R) = 0.
    pub log_delta_inv: Vec<f64>,
}

impl ExceedanceCurve {
    /// Computes the exceedance curve from a parsed stash record
    ///
    /// For each stash size R in ascending order:
    /// - `δ(R) = histogram[R] / total_accesses`
    /// - `log2(1/δ(R))` when δ(R) > 0, the zero-count sentinel otherwise
    ///
    /// # Arguments
    /// * `record` - The parsed stash statistics record
    ///
    /// # Returns
    /// * `Ok(ExceedanceCurve)` - The computed curve
    /// * `Err(ExceedanceError)` - If `total_accesses` is zero; the
    ///   denominator is degenerate whether or not data rows are present
    pub fn from_record(record: &StashRecord) -> Result<Self> {
        if record.total_accesses == 0 {
            return Err(ExceedanceError::UndefinedProbability);
        }

        let total = record.total_accesses as f64;
        let mut stash_sizes = Vec::with_capacity(record.histogram.len());
        let mut deltas = Vec::with_capacity(record.histogram.len());
        let mut log_delta_inv = Vec::with_capacity(record.histogram.len());

        for (&stash_size, &count) in &record.histogram {
            let delta = count as f64 / total;
            stash_sizes.push(stash_size);
            deltas.push(delta);
            log_delta_inv.push(if delta > 0.0 {
                f64::log2(1.0 / delta)
            } else {
                ZERO_COUNT_LOG_SENTINEL
            });
        }

        Ok(Self {
            stash_sizes,
            deltas,
            log_delta_inv,
        })
    }

    /// Returns the curve as (stash size, log2(1/δ(R))) points for plotting
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.stash_sizes
            .iter()
            .zip(&self.log_delta_inv)
            .map(|(&stash_size, &log_value)| (stash_size as f64, log_value))
            .collect()
    }

    /// Number of stash sizes on the curve
    pub fn len(&self) -> usize {
        self.stash_sizes.len()
    }

    /// Whether the curve has no points
    pub fn is_empty(&self) -> bool {
        self.stash_sizes.is_empty()
    }

    /// Largest log2(1/δ(R)) value on the curve, if any
    pub fn peak_log_delta_inv(&self) -> Option<f64> {
        self.log_delta_inv.iter().copied().reduce(f64::max)
    }
}
