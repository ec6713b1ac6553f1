use serde::Serialize;

use crate::dist::{Ccdf, Density};
use crate::domain::{BoundsConfig, ModelVariant};
use crate::error::NumericError;
use crate::math::Brent;
use crate::models::Curve;

/// An unrounded upper bound on Σmν for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceBound {
    pub variant: ModelVariant,
    /// Tail probability the bound was solved for.
    pub target: f64,
    pub mass: f64,
}

/// Solve `ccdf(x) = target` for `x` in `[lower, upper]`.
///
/// Fails with `NumericError::Bracket` when the CCDF does not cross `target`
/// inside the bracket; the bracket is never widened automatically.
pub fn solve_tail_mass<D: Density + ?Sized>(
    ccdf: &Ccdf<'_, D>,
    target: f64,
    lower: f64,
    upper: f64,
    solver: &Brent,
) -> Result<f64, NumericError> {
    if !(target > 0.0 && target < 1.0) {
        return Err(NumericError::InvalidInput(format!(
            "Tail probability must be in (0, 1), got {target}."
        )));
    }
    solver.solve(|x| Ok(ccdf.eval(x)? - target), lower, upper)
}

/// Confidence bound for one variant using the configured bracket and tolerances.
pub fn confidence_bound(
    variant: ModelVariant,
    config: &BoundsConfig,
) -> Result<ConfidenceBound, NumericError> {
    let curve = Curve::for_variant(variant);
    let ccdf = Ccdf::new(&curve, config.quadrature)?;
    let mass = solve_tail_mass(
        &ccdf,
        config.target,
        config.bracket_lower,
        config.bracket_upper,
        &config.solver,
    )?;
    Ok(ConfidenceBound {
        variant,
        target: config.target,
        mass,
    })
}
