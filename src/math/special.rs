//! The smooth step shared by every gate in the prior formula.
//!
//! `step(x; μ, σ) = ½ (1 + erf((x − μ) / (√2 σ)))`
//!
//! i.e. the Gaussian CDF centred at `μ` with width `σ`. A negative `σ` mirrors
//! the step (it falls instead of rising); some fitted skewness values rely on that.
//!
//! Numerical notes:
//! - The `1 + erf` form is used on purpose instead of `erfc`. Far on the low
//!   side `erf` rounds to exactly `-1`, so the gate is exactly zero there, and
//!   the fitted constants were produced with that behaviour.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf;

/// Evaluate the smooth step at `x` for the given `center` and `width`.
pub fn smooth_step(x: f64, center: f64, width: f64) -> f64 {
    0.5 * (1.0 + erf((x - center) / (SQRT_2 * width)))
}
