//! Text-mode plots for the terminal.
//!
//! Series are drawn as polylines on a fixed character grid, one marker per
//! series. Where lines cross, the series drawn first keeps the cell, so the
//! output is fully deterministic (see the golden test). CCDF panels use a
//! log10 y-axis.

use crate::plot::Series;

const MARKERS: [char; 6] = ['*', '+', 'o', 'x', '#', '@'];

/// Smallest value kept on a log axis (CCDFs reach exactly zero).
const LOG_FLOOR: f64 = 1e-12;

/// Render one panel as text.
pub fn render_ascii_plot(series: &[Series], width: usize, height: usize, log_y: bool) -> String {
    let scale_y = |v: f64| if log_y { v.max(LOG_FLOOR).log10() } else { v };

    let x = extent(series.iter().flat_map(|s| s.points.iter().map(|p| p.0))).unwrap_or((0.0, 1.0));
    let y = extent(series.iter().flat_map(|s| s.points.iter().map(|p| scale_y(p.1))))
        .unwrap_or((0.0, 1.0));
    let y = widen(y, 0.05);

    let mut canvas = Canvas::new(width.max(10), height.max(5), x, y);
    for (s, marker) in series.iter().zip(MARKERS.iter().cycle()) {
        let scaled: Vec<(f64, f64)> = s.points.iter().map(|&(px, py)| (px, scale_y(py))).collect();
        canvas.polyline(&scaled, *marker);
    }

    let axis = if log_y { "log10(y)" } else { "y" };
    let mut out = format!(
        "Plot: x=[{:.4}, {:.4}] eV | {axis}=[{:.2}, {:.2}]\n",
        x.0, x.1, y.0, y.1
    );
    out.push_str(&canvas.render());
    for (s, marker) in series.iter().zip(MARKERS.iter().cycle()) {
        out.push_str(&format!("  {marker} {}\n", s.label));
    }
    out
}

/// Finite min/max of the values, if they span a non-empty interval.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    (lo.is_finite() && hi > lo).then_some((lo, hi))
}

fn widen((lo, hi): (f64, f64), frac: f64) -> (f64, f64) {
    let margin = ((hi - lo).abs() * frac).max(1e-12);
    (lo - margin, hi + margin)
}

/// Character grid with data ranges; row 0 is the top of the plot.
struct Canvas {
    cells: Vec<Vec<char>>,
    x: (f64, f64),
    y: (f64, f64),
}

impl Canvas {
    fn new(cols: usize, rows: usize, x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; cols]; rows],
            x,
            y,
        }
    }

    fn cell(&self, px: f64, py: f64) -> (isize, isize) {
        let last_col = (self.cells[0].len() - 1) as f64;
        let last_row = (self.cells.len() - 1) as f64;
        let fx = ((px - self.x.0) / (self.x.1 - self.x.0)).clamp(0.0, 1.0);
        let fy = ((py - self.y.0) / (self.y.1 - self.y.0)).clamp(0.0, 1.0);
        (
            (fx * last_col).round() as isize,
            (last_row - fy * last_row).round() as isize,
        )
    }

    /// Set a cell unless it is off-grid or already taken.
    fn mark(&mut self, col: isize, row: isize, ch: char) {
        let (Ok(c), Ok(r)) = (usize::try_from(col), usize::try_from(row)) else {
            return;
        };
        if let Some(cell) = self.cells.get_mut(r).and_then(|line| line.get_mut(c)) {
            if *cell == ' ' {
                *cell = ch;
            }
        }
    }

    /// Bresenham segment between two cells, both ends included.
    fn segment(&mut self, from: (isize, isize), to: (isize, isize), ch: char) {
        let (mut col, mut row) = from;
        let d_col = (to.0 - col).abs();
        let d_row = -(to.1 - row).abs();
        let step_col = if col < to.0 { 1 } else { -1 };
        let step_row = if row < to.1 { 1 } else { -1 };
        let mut err = d_col + d_row;

        loop {
            self.mark(col, row, ch);
            if (col, row) == to {
                break;
            }
            let twice = 2 * err;
            if twice >= d_row {
                err += d_row;
                col += step_col;
            }
            if twice <= d_col {
                err += d_col;
                row += step_row;
            }
        }
    }

    /// Connect consecutive finite points; a non-finite point breaks the line.
    fn polyline(&mut self, points: &[(f64, f64)], ch: char) {
        let mut prev = None;
        for &(px, py) in points {
            if !(px.is_finite() && py.is_finite()) {
                prev = None;
                continue;
            }
            let here = self.cell(px, py);
            self.segment(prev.unwrap_or(here), here, ch);
            prev = Some(here);
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.cells {
            out.extend(line.iter());
            out.push('\n');
        }
        out
    }
}
