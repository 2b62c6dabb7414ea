//! Plotting infrastructure for exceedance probability charts
//!
//! This module renders log2(1/δ(R)) curves using the [`plotters`] crate.
//! Charts are saved as PNG files with fixed 1200x800 resolution: one
//! line-and-marker chart per configuration, plus a combined overlay chart
//! with one colored series per configuration and a legend.

use crate::analysis::ExceedanceCurve;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save plot to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Chart resolution in pixels
const CHART_SIZE: (u32, u32) = (1200, 800);

/// Marker radius for per-configuration charts, in pixels
const MARKER_SIZE: i32 = 4;

/// Series colors for the combined overlay chart, cycled by configuration index
const SERIES_COLORS: [RGBColor; 3] = [BLUE, RED, GREEN];

/// Creates the exceedance probability chart for one configuration
///
/// Renders the curve as a line with circle markers at each stash size and
/// saves it as `stash_plot_<label>.png` inside `output_dir`, overwriting any
/// existing file of that name.
///
/// # Arguments
/// * `curve` - The computed exceedance curve
/// * `label` - Configuration label embedded in the caption and file name
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written PNG file
/// * `Err(PlotError)` - If the curve is empty or rendering failed
///
/// # Chart Properties
/// * Resolution: 1200x800 pixels, PNG
/// * X-axis: stash sizes (linear, ascending) with label "R (Stash Size)"
/// * Y-axis: log2(1/δ(R)) values with label "log2(1/δ(R))"
/// * Grid: enabled for better readability
/// * Caption embeds the configuration label
pub fn create_exceedance_plot(
    curve: &ExceedanceCurve,
    label: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    if curve.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "Configuration {} has no stash size data to plot",
            label
        )));
    }

    let points = curve.points();
    let output_path = output_dir.join(format!("stash_plot_{}.png", label));
    let caption = format!(
        "Logarithmic Plot of Stash Size Exceedance Probability for {}",
        label
    );

    let drawing_area = BitMapBackend::new(&output_path, CHART_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (x_range, y_range) = axis_ranges(&points);
    let mut chart = ChartBuilder::on(&drawing_area)
        .caption(caption, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("R (Stash Size)")
        .x_label_style(("sans-serif", 35))
        .y_desc("log2(1/δ(R))")
        .y_label_style(("sans-serif", 35))
        .label_style(("sans-serif", 25))
        .x_label_formatter(&|x| format!("{:.0}", x.round()))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // Circle markers at each stash size, on top of the line
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, BLUE.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    drop(chart);
    drop(drawing_area);

    Ok(output_path)
}

/// Creates the combined overlay chart across all configurations
///
/// Renders every configuration's curve into one chart with a legend mapping
/// series color to configuration label, saved as `oram_stash_plot.png`
/// inside `output_dir`.
///
/// # Arguments
/// * `curves` - (label, curve) pairs, drawn in the given order
/// * `output_dir` - Directory where the PNG file should be saved
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the written PNG file
/// * `Err(PlotError)` - If no curve has any data point or rendering failed
pub fn create_combined_plot(
    curves: &[(String, ExceedanceCurve)],
    output_dir: &Path,
) -> Result<PathBuf> {
    let all_points: Vec<(f64, f64)> = curves
        .iter()
        .flat_map(|(_, curve)| curve.points())
        .collect();
    if all_points.is_empty() {
        return Err(PlotError::InvalidData(
            "No stash size data to plot across configurations".to_string(),
        ));
    }

    let output_path = output_dir.join("oram_stash_plot.png");

    let drawing_area = BitMapBackend::new(&output_path, CHART_SIZE).into_drawing_area();
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (x_range, y_range) = axis_ranges(&all_points);
    let mut chart = ChartBuilder::on(&drawing_area)
        .caption("Stash Size Analysis", ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("R (Stash Size)")
        .x_label_style(("sans-serif", 35))
        .y_desc("log2(1/δ(R))")
        .y_label_style(("sans-serif", 35))
        .label_style(("sans-serif", 25))
        .x_label_formatter(&|x| format!("{:.0}", x.round()))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (index, (label, curve)) in curves.iter().enumerate() {
        let color = SERIES_COLORS[index % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(curve.points().into_iter(), color))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    drop(chart);
    drop(drawing_area);

    Ok(output_path)
}

/// Computes the chart axis ranges covering the given points
///
/// Degenerate ranges (single point, flat curve) are widened so the
/// coordinate system stays valid. The y-axis starts at 0 unless a point
/// dips below it, and leaves headroom above the highest value.
fn axis_ranges(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let x_min = points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let mut x_max = points
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);
    if x_min >= x_max {
        x_max = x_min + 1.0;
    }

    let y_min = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::INFINITY, f64::min)
        .min(0.0);
    let mut y_max = points
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    y_max += (y_max - y_min).abs() * 0.05;
    if y_min >= y_max {
        y_max = y_min + 1.0;
    }

    (x_min..x_max, y_min..y_max)
}
