//! File parsing functionality for stash statistics data
//!
//! This module handles loading and parsing the `stash_data_N*_Z*_B*.txt`
//! files written by the ORAM simulator.

use crate::common::StashRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during file parsing
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Input file is empty, expected a `label,total_accesses` header line")]
    MissingHeader,

    #[error("Malformed line {line}: expected 2 comma-separated fields, found {fields}")]
    FieldCount { line: usize, fields: usize },

    #[error("Malformed line {line}: {value:?} is not a valid integer")]
    IntParse { line: usize, value: String },
}

type Result<T> = core::result::Result<T, ParsingError>;

/// Parse a stash statistics file into a [`StashRecord`]
///
/// The expected format is one record per line, comma-separated:
/// - Line 1: `<label>,<total_accesses>`; the simulator writes a `-1`
///   marker in the label field, which is read and discarded.
/// - Lines 2+: `<stash_size>,<occurrence_count>`, both integers.
///
/// Fields are not trimmed, so a blank trailing line is rejected as a
/// malformed record rather than skipped. Fields beyond the second are
/// ignored. If the same stash size appears on more than one line, the
/// later line wins; the simulator emits each stash size exactly once, so
/// a duplicate only arises in hand-edited files.
///
/// The first malformed line aborts the load; there is no partial recovery.
///
/// # Arguments
/// * `path` - Path to the stash statistics file
///
/// # Returns
/// * `Ok(StashRecord)` - Total access count and stash size histogram
/// * `Err(ParsingError)` - If the file could not be read or a line was malformed
pub fn parse_stash_record(path: &Path) -> Result<StashRecord> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();

    // Header line: second field is the total access count, first is discarded
    let header = lines.next().ok_or(ParsingError::MissingHeader)?;
    let total_accesses = parse_field::<u64>(header, 1, 1)?;

    // Remaining lines: stash size and occurrence count
    let mut histogram = BTreeMap::new();
    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let stash_size = parse_field::<u32>(line, 0, line_number)?;
        let count = parse_field::<u64>(line, 1, line_number)?;
        histogram.insert(stash_size, count);
    }

    Ok(StashRecord {
        total_accesses,
        histogram,
    })
}

/// Splits `line` on commas and integer-parses the field at `field_index`
///
/// # Arguments
/// * `line` - The raw input line, untrimmed
/// * `field_index` - Zero-based index of the field to parse
/// * `line_number` - One-based line number, used in error values
fn parse_field<T: std::str::FromStr>(
    line: &str,
    field_index: usize,
    line_number: usize,
) -> Result<T> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 2 {
        return Err(ParsingError::FieldCount {
            line: line_number,
            fields: fields.len(),
        });
    }

    fields[field_index]
        .parse::<T>()
        .map_err(|_| ParsingError::IntParse {
            line: line_number,
            value: fields[field_index].to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_input(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_well_formed_file() {
        let file = write_input("header,100\n0,50\n1,30\n2,20\n");
        let record = parse_stash_record(file.path()).unwrap();

        assert_eq!(record.total_accesses, 100);
        assert_eq!(record.histogram.len(), 3);
        assert_eq!(record.histogram[&0], 50);
        assert_eq!(record.histogram[&1], 30);
        assert_eq!(record.histogram[&2], 20);
    }

    #[test]
    fn test_parse_producer_marker_header() {
        // The simulator writes a `-1` marker in the header's label field
        let file = write_input("-1,1048576\n0,1048576\n1,52\n");
        let record = parse_stash_record(file.path()).unwrap();

        assert_eq!(record.total_accesses, 1048576);
        assert_eq!(record.histogram[&0], 1048576);
        assert_eq!(record.histogram[&1], 52);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_stash_record(Path::new("no_such_stash_data.txt"));
        assert!(matches!(result, Err(ParsingError::FileRead(_))));
    }

    #[test]
    fn test_parse_empty_file() {
        let file = write_input("");
        let result = parse_stash_record(file.path());
        assert!(matches!(result, Err(ParsingError::MissingHeader)));
    }

    #[test]
    fn test_parse_header_with_single_field() {
        let file = write_input("100\n0,50\n");
        let result = parse_stash_record(file.path());
        assert!(matches!(
            result,
            Err(ParsingError::FieldCount { line: 1, fields: 1 })
        ));
    }

    #[test]
    fn test_parse_header_with_non_integer_total() {
        let file = write_input("header,lots\n0,50\n");
        let result = parse_stash_record(file.path());
        match result {
            Err(ParsingError::IntParse { line, value }) => {
                assert_eq!(line, 1);
                assert_eq!(value, "lots");
            }
            other => panic!("expected IntParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_data_line_with_non_integer_count() {
        let file = write_input("header,100\n0,50\n1,x\n");
        let result = parse_stash_record(file.path());
        match result {
            Err(ParsingError::IntParse { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "x");
            }
            other => panic!("expected IntParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_stash_size_rejected() {
        let file = write_input("header,100\n-3,50\n");
        let result = parse_stash_record(file.path());
        assert!(matches!(result, Err(ParsingError::IntParse { line: 2, .. })));
    }

    #[test]
    fn test_parse_blank_trailing_line_rejected() {
        // lines() drops the final newline, so the blank line must be interior
        let file = write_input("header,100\n0,50\n\n1,30\n");
        let result = parse_stash_record(file.path());
        assert!(matches!(
            result,
            Err(ParsingError::FieldCount { line: 3, fields: 1 })
        ));
    }

    #[test]
    fn test_parse_extra_fields_ignored() {
        let file = write_input("header,100,junk\n0,50,junk\n");
        let record = parse_stash_record(file.path()).unwrap();
        assert_eq!(record.total_accesses, 100);
        assert_eq!(record.histogram[&0], 50);
    }

    #[test]
    fn test_parse_duplicate_stash_size_last_wins() {
        let file = write_input("header,100\n0,50\n0,70\n");
        let record = parse_stash_record(file.path()).unwrap();
        assert_eq!(record.histogram.len(), 1);
        assert_eq!(record.histogram[&0], 70);
    }

    #[test]
    fn test_parse_header_only_file() {
        let file = write_input("header,100\n");
        let record = parse_stash_record(file.path()).unwrap();
        assert_eq!(record.total_accesses, 100);
        assert!(record.histogram.is_empty());
    }
}
