mod analysis;
mod common;
mod parsing;

use std::path::Path;
use thiserror::Error;

use analysis::{generate_summary_report, ExceedanceCurve};
use common::plots::{create_combined_plot, create_exceedance_plot};
use common::tables::{format_summary_table, SummaryRow};
use common::StashConfiguration;
use parsing::parse_stash_record;

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] parsing::ParsingError),

    #[error("Exceedance computation error: {0}")]
    Exceedance(#[from] analysis::ExceedanceError),

    #[error("Plot generation error: {0}")]
    Plot(#[from] common::PlotError),

    #[error("Report generation error: {0}")]
    Report(#[from] analysis::report::ReportError),
}

type Result<T> = core::result::Result<T, AnalysisError>;

/// The fixed set of ORAM configurations to analyze
///
/// Each label is bound to the stash statistics file the simulator wrote for
/// that configuration, resolved against the current working directory.
/// Changing configurations means editing this table; there are no
/// command-line flags or environment overrides.
fn stash_configurations() -> Vec<StashConfiguration> {
    vec![
        StashConfiguration::new("Z2", "stash_data_N1048576_Z2_B32.txt"),
        StashConfiguration::new("Z4", "stash_data_N1048576_Z4_B32.txt"),
        StashConfiguration::new("Z6", "stash_data_N1048576_Z6_B32.txt"),
    ]
}

/// Runs the load, analyze, and plot pipeline over all configurations
///
/// Configurations are processed independently in table order. The first
/// failure aborts the whole run; output files already written stay on disk.
/// After the per-configuration charts, renders the combined overlay chart
/// and writes the summary table to stdout and to the report files.
fn run_analysis(configurations: &[StashConfiguration], output_dir: &Path) -> Result<()> {
    let mut curves: Vec<(String, ExceedanceCurve)> = Vec::new();
    let mut rows: Vec<SummaryRow> = Vec::new();

    for configuration in configurations {
        let record = parse_stash_record(&configuration.input_path)?;
        let curve = ExceedanceCurve::from_record(&record)?;

        println!(
            "Stash sizes (R) for {}: {:?}",
            configuration.label, curve.stash_sizes
        );

        let output_path = create_exceedance_plot(&curve, &configuration.label, output_dir)?;

        println!(
            "log2(1/δ(R)) for {}: {:?}",
            configuration.label, curve.log_delta_inv
        );
        println!("Plot saved as {}", output_path.display());

        rows.push(SummaryRow::new(&configuration.label, &record, &curve));
        curves.push((configuration.label.clone(), curve));
    }

    let combined_path = create_combined_plot(&curves, output_dir)?;
    println!("Plot saved as {}", combined_path.display());

    println!();
    println!(
        "{}",
        format_summary_table(&rows, Some("Stash Size Exceedance Summary"))
    );
    generate_summary_report(&rows, output_dir)?;

    Ok(())
}

fn main() -> Result<()> {
    // Outputs land next to the input files, in the current working directory
    let configurations = stash_configurations();
    run_analysis(&configurations, Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_config(dir: &Path, label: &str, contents: &str) -> StashConfiguration {
        let path = dir.join(format!("stash_data_{}.txt", label));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        StashConfiguration::new(label, path)
    }

    #[test]
    fn test_stash_configurations_table() {
        let configurations = stash_configurations();

        assert_eq!(configurations.len(), 3);
        assert_eq!(configurations[0].label, "Z2");
        assert_eq!(configurations[1].label, "Z4");
        assert_eq!(configurations[2].label, "Z6");
        assert_eq!(
            configurations[0].input_path,
            PathBuf::from("stash_data_N1048576_Z2_B32.txt")
        );
    }

    #[test]
    fn test_run_analysis_missing_input_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let configurations = vec![StashConfiguration::new(
            "Z2",
            temp_dir.path().join("missing.txt"),
        )];

        let result = run_analysis(&configurations, temp_dir.path());
        assert!(matches!(result, Err(AnalysisError::Parsing(_))));
    }

    #[test]
    fn test_run_analysis_zero_total_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let configurations = vec![write_config(temp_dir.path(), "Z2", "x,0\n0,50\n")];

        let result = run_analysis(&configurations, temp_dir.path());
        assert!(matches!(
            result,
            Err(AnalysisError::Exceedance(
                analysis::ExceedanceError::UndefinedProbability
            ))
        ));
    }

    #[test]
    fn test_run_analysis_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let configurations = vec![
            write_config(temp_dir.path(), "Z2", ""),
            write_config(temp_dir.path(), "Z4", "header,100\n0,50\n"),
        ];

        let result = run_analysis(&configurations, temp_dir.path());
        assert!(matches!(result, Err(AnalysisError::Parsing(_))));
        // The failing first configuration prevents any output for the second
        assert!(!temp_dir.path().join("stash_plot_Z4.png").exists());
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_run_analysis_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let configurations = vec![
            write_config(temp_dir.path(), "Z2", "header,100\n0,50\n1,30\n2,20\n"),
            write_config(temp_dir.path(), "Z4", "header,100\n0,80\n1,15\n2,5\n"),
        ];

        run_analysis(&configurations, temp_dir.path()).unwrap();

        for name in [
            "stash_plot_Z2.png",
            "stash_plot_Z4.png",
            "oram_stash_plot.png",
        ] {
            let path = temp_dir.path().join(name);
            assert!(path.exists());
            assert!(path.metadata().unwrap().len() > 0);
        }
        assert!(temp_dir.path().join("stash-analysis.txt").exists());
        assert!(temp_dir.path().join("stash-analysis.json").exists());
    }
}
