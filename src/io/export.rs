//! CSV exports of density grids and prior samples.
//!
//! The files are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{DensityGrid, ModelVariant};
use crate::error::AppError;

/// Write a density grid: one row per mass, one column per curve.
pub fn write_grid_csv(path: &Path, grid: &DensityGrid) -> Result<(), AppError> {
    if let Some(bad) = grid.columns.iter().find(|c| c.values.len() != grid.mass_ev.len()) {
        return Err(AppError::new(
            2,
            format!(
                "Grid column '{}' has {} values for {} masses.",
                bad.label,
                bad.values.len(),
                grid.mass_ev.len()
            ),
        ));
    }

    let mut file = create(path)?;

    let mut header = String::from("mass_ev");
    for c in &grid.columns {
        header.push(',');
        header.push_str(&c.label);
    }
    writeln!(file, "{header}").map_err(write_err)?;

    for (i, x) in grid.mass_ev.iter().enumerate() {
        let mut line = format!("{x:.10}");
        for c in &grid.columns {
            line.push_str(&format!(",{:.10e}", c.values[i]));
        }
        writeln!(file, "{line}").map_err(write_err)?;
    }

    file.flush().map_err(write_err)?;
    Ok(())
}

/// Write prior draws, one per row.
pub fn write_samples_csv(
    path: &Path,
    variant: ModelVariant,
    seed: u64,
    samples: &[f64],
) -> Result<(), AppError> {
    let mut file = create(path)?;
    writeln!(file, "index,variant,seed,mass_ev").map_err(write_err)?;
    for (i, x) in samples.iter().enumerate() {
        writeln!(file, "{i},{},{seed},{x:.10}", variant.code()).map_err(write_err)?;
    }
    file.flush().map_err(write_err)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    File::create(path).map(BufWriter::new).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write export CSV: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GridColumn;

    #[test]
    fn grid_csv_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.csv");
        let grid = DensityGrid {
            mass_ev: vec![0.0, 0.1],
            columns: vec![
                GridColumn {
                    label: "M_NO".to_string(),
                    values: vec![0.0, 9.25],
                },
                GridColumn {
                    label: "M_MIX".to_string(),
                    values: vec![0.0, 8.5],
                },
            ],
        };
        write_grid_csv(&path, &grid).unwrap();

        let txt = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = txt.lines().collect();
        assert_eq!(lines[0], "mass_ev,M_NO,M_MIX");
        assert_eq!(lines.len(), 3);
        let cells: Vec<f64> = lines[2].split(',').map(|c| c.parse().unwrap()).collect();
        assert_eq!(cells, vec![0.1, 9.25, 8.5]);
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let grid = DensityGrid {
            mass_ev: vec![0.0, 0.1],
            columns: vec![GridColumn {
                label: "D_IO".to_string(),
                values: vec![0.0],
            }],
        };
        let err = write_grid_csv(&dir.path().join("g.csv"), &grid).unwrap_err();
        assert!(err.to_string().contains("D_IO"));
    }

    #[test]
    fn samples_csv_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.csv");
        write_samples_csv(&path, ModelVariant::SeesawNormal, 7, &[0.06, 0.07]).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            txt,
            "index,variant,seed,mass_ev\n0,S_NO,7,0.0600000000\n1,S_NO,7,0.0700000000\n"
        );
    }
}
