//! SVG figures rendered with Plotters.
//!
//! Each panel becomes one file. Linear panels start the y-axis at zero; CCDF
//! panels use a log y-axis with values clamped to a floor so exact zeros in
//! the far tail do not break the scale.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use crate::error::AppError;
use crate::plot::{Panel, Series};

const LOG_FLOOR: f64 = 1e-12;

/// Write every panel into `dir` (created if missing). Returns the written paths.
pub fn write_figures(
    dir: &Path,
    panels: &[Panel],
    size: (u32, u32),
) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::new(2, format!("Failed to create output directory '{}': {e}", dir.display()))
    })?;

    let mut written = Vec::with_capacity(panels.len());
    for panel in panels {
        let path = dir.join(panel.file_name);
        write_svg(&path, panel, size)?;
        info!(path = %path.display(), series = panel.series.len(), "wrote figure");
        written.push(path);
    }
    Ok(written)
}

/// Render a single panel to an SVG file.
pub fn write_svg(path: &Path, panel: &Panel, size: (u32, u32)) -> Result<(), AppError> {
    draw_panel(path, panel, size)
        .map_err(|e| AppError::new(2, format!("Failed to render '{}': {e}", path.display())))
}

fn draw_panel(path: &Path, panel: &Panel, size: (u32, u32)) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = x_bounds(&panel.series);

    if panel.log_y {
        let y0 = min_positive(&panel.series).max(LOG_FLOOR);
        let mut chart = ChartBuilder::on(&root)
            .caption(&panel.title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, (y0..1.5).log_scale())?;

        chart
            .configure_mesh()
            .x_desc("Σmν [eV]")
            .y_desc(panel.y_desc)
            .y_label_formatter(&|v| format!("{v:.0e}"))
            .draw()?;

        for (i, s) in panel.series.iter().enumerate() {
            let color = Palette99::pick(i).mix(0.9);
            let points = s.points.iter().map(|&(x, y)| (x, y.max(y0)));
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(s.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::LowerLeft)
            .draw()?;
    } else {
        let y1 = max_value(&panel.series) * 1.05;
        let mut chart = ChartBuilder::on(&root)
            .caption(&panel.title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x0..x1, 0.0..y1)?;

        chart
            .configure_mesh()
            .x_desc("Σmν [eV]")
            .y_desc(panel.y_desc)
            .draw()?;

        for (i, s) in panel.series.iter().enumerate() {
            let color = Palette99::pick(i).mix(0.9);
            chart
                .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
                .label(s.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn x_bounds(series: &[Series]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &(x, _) in series.iter().flat_map(|s| s.points.iter()) {
        if x.is_finite() {
            lo = lo.min(x);
            hi = hi.max(x);
        }
    }
    if lo.is_finite() && hi > lo {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

fn max_value(series: &[Series]) -> f64 {
    let max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .filter(|y| y.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 { max } else { 1.0 }
}

fn min_positive(series: &[Series]) -> f64 {
    let min = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .filter(|y| y.is_finite() && *y > 0.0)
        .fold(f64::INFINITY, f64::min);
    if min.is_finite() { min } else { LOG_FLOOR }
}
