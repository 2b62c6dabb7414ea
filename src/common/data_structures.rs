use std::collections::BTreeMap;
use std::path::PathBuf;

/// Parsed contents of a single stash statistics file
///
/// The ORAM simulator writes one such file per configuration: a header line
/// carrying the total number of measured accesses, followed by one line per
/// stash size with its observed occurrence count.
#[derive(Debug, Clone)]
pub struct StashRecord {
    /// Total number of accesses measured by the simulation; the denominator
    /// for every probability derived from this record.
    pub total_accesses: u64,
    /// Occurrence count per stash size. A `BTreeMap` keeps the stash sizes
    /// in ascending order for every downstream consumer.
    pub histogram: BTreeMap<u32, u64>,
}

/// A named ORAM configuration bound to its stash statistics file
///
/// The set of configurations to analyze is built explicitly at the call site
/// and passed down; nothing reads it from shared state.
#[derive(Debug, Clone)]
pub struct StashConfiguration {
    /// Display label of the configuration (e.g. "Z4" for bucket capacity 4).
    pub label: String,
    /// Path of the input file produced by the simulator.
    pub input_path: PathBuf,
}

impl StashConfiguration {
    /// Creates a configuration entry from a label and input path
    pub fn new(label: impl Into<String>, input_path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            input_path: input_path.into(),
        }
    }
}
