//! Read/write prior JSON files.
//!
//! A prior file is the portable description of all six priors:
//! measurement constants, minimal masses, parameter tuples, evidences,
//! mixture weights, and a precomputed density grid for quick replotting.
//!
//! The schema is defined by `domain::PriorFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::domain::PriorFile;
use crate::error::AppError;

/// Write a prior JSON file.
pub fn write_prior_json(path: &Path, prior: &PriorFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create prior JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), prior)
        .map_err(|e| AppError::new(2, format!("Failed to write prior JSON: {e}")))?;
    Ok(())
}

/// Read a prior JSON file.
pub fn read_prior_json(path: &Path) -> Result<PriorFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open prior JSON '{}': {e}", path.display()))
    })?;
    let prior: PriorFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid prior JSON: {e}")))?;

    let n = prior.grid.mass_ev.len();
    if let Some(c) = prior.grid.columns.iter().find(|c| c.values.len() != n) {
        return Err(AppError::new(
            2,
            format!("Invalid prior JSON: column '{}' does not match the mass grid.", c.label),
        ));
    }
    Ok(prior)
}
