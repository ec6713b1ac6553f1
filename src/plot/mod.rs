//! Plotting: SVG figures and terminal ASCII panels.
//!
//! Panels are computed once (data only) and then handed to either renderer,
//! so `nuprior plot` and `nuprior plot --terminal` show the same curves.

pub mod ascii;
pub mod figures;

pub use ascii::*;
pub use figures::*;

use crate::app::pipeline::{ccdf_series, mixture_series, weighted_ordering_series};
use crate::domain::{DensityGrid, MassOrdering, PlotConfig};
use crate::error::AppError;
use crate::math::linspace;

/// A labelled polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// One figure: a file name, axis text and its series.
#[derive(Debug, Clone)]
pub struct Panel {
    pub file_name: &'static str,
    pub title: String,
    pub y_desc: &'static str,
    pub log_y: bool,
    pub series: Vec<Series>,
}

/// Compute the five standard panels.
pub fn figure_panels(config: &PlotConfig) -> Result<Vec<Panel>, AppError> {
    let dens = config.density_grid;
    let xs = linspace(dens.x_min, dens.x_max, dens.points)?;
    let ccdf = config.ccdf_grid;
    let xs_ccdf = linspace(ccdf.x_min, ccdf.x_max, ccdf.points)?;

    let mut panels = vec![
        Panel {
            file_name: "1_figure6a.svg",
            title: "Weighted priors, normal ordering".to_string(),
            y_desc: "w_NO · p(Σmν)",
            log_y: false,
            series: weighted_ordering_series(MassOrdering::Normal, &xs),
        },
        Panel {
            file_name: "1_figure6b.svg",
            title: "Weighted priors, inverted ordering".to_string(),
            y_desc: "w_IO · p(Σmν)",
            log_y: false,
            series: weighted_ordering_series(MassOrdering::Inverted, &xs),
        },
        Panel {
            file_name: "1_figure7.svg",
            title: "Priors marginalised over the ordering".to_string(),
            y_desc: "p(Σmν)",
            log_y: false,
            series: mixture_series(&xs),
        },
    ];

    for (ordering, file_name) in [
        (MassOrdering::Normal, "2_cdf_NO.svg"),
        (MassOrdering::Inverted, "2_cdf_IO.svg"),
    ] {
        panels.push(Panel {
            file_name,
            title: format!("Tail probability, {}", ordering.short_name()),
            y_desc: "P(> Σmν)",
            log_y: true,
            series: ccdf_series(ordering, &xs_ccdf, config.quadrature)?,
        });
    }

    Ok(panels)
}

/// One series per column of a saved density grid.
pub fn grid_series(grid: &DensityGrid) -> Vec<Series> {
    grid.columns
        .iter()
        .map(|c| Series {
            label: c.label.clone(),
            points: grid.mass_ev.iter().copied().zip(c.values.iter().copied()).collect(),
        })
        .collect()
}

/// Render every panel as an ASCII plot, one after the other.
pub fn render_terminal(panels: &[Panel], width: usize, height: usize) -> String {
    let mut out = String::new();
    for p in panels {
        out.push_str(&format!("== {} ({}) ==\n", p.title, p.file_name));
        out.push_str(&render_ascii_plot(&p.series, width, height, p.log_y));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridSpec;
    use crate::math::Quadrature;

    fn small_config() -> PlotConfig {
        PlotConfig {
            output_dir: std::path::PathBuf::from("unused"),
            density_grid: GridSpec {
                x_min: 0.0,
                x_max: 0.3,
                points: 61,
            },
            ccdf_grid: GridSpec {
                x_min: 1e-4,
                x_max: 0.3,
                points: 13,
            },
            terminal: true,
            width: 60,
            height: 12,
            quadrature: Quadrature::default(),
        }
    }

    #[test]
    fn five_panels_with_three_series_each() {
        let panels = figure_panels(&small_config()).unwrap();
        let names: Vec<_> = panels.iter().map(|p| p.file_name).collect();
        assert_eq!(
            names,
            [
                "1_figure6a.svg",
                "1_figure6b.svg",
                "1_figure7.svg",
                "2_cdf_NO.svg",
                "2_cdf_IO.svg"
            ]
        );
        for p in &panels {
            assert_eq!(p.series.len(), 3, "{}", p.file_name);
        }
        assert!(panels[3].log_y && !panels[0].log_y);

        // CCDFs start near one and decrease.
        for s in &panels[3].series {
            let first = s.points[0].1;
            let last = s.points[s.points.len() - 1].1;
            assert!(first > 0.99 && last < first, "{}", s.label);
        }
    }

    #[test]
    fn grid_columns_become_series() {
        let grid = DensityGrid {
            mass_ev: vec![0.0, 0.1, 0.2],
            columns: vec![crate::domain::GridColumn {
                label: "D_NO".to_string(),
                values: vec![0.0, 3.0, 1.0],
            }],
        };
        let series = grid_series(&grid);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "D_NO");
        assert_eq!(series[0].points, vec![(0.0, 0.0), (0.1, 3.0), (0.2, 1.0)]);
    }

    #[test]
    fn terminal_output_lists_every_panel() {
        let panels = figure_panels(&small_config()).unwrap();
        let txt = render_terminal(&panels, 60, 12);
        assert_eq!(txt.matches("Plot: x=").count(), 5);
        assert!(txt.contains("Majorana NO+IO"));
        assert!(txt.contains("log10(y)"));
    }
}
