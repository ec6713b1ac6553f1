//! Bracketed scalar root finding (Brent's method).
//!
//! Given `f(lower)` and `f(upper)` of opposite sign, Brent combines inverse
//! quadratic interpolation, secant steps and bisection, and is guaranteed to
//! converge. The objective is fallible because ours (a CCDF) runs a quadrature
//! per evaluation.
//!
//! Convergence test: `|m| <= 2·rtol·|b| + xtol/2`, where `m` is half the width
//! of the current bracket.

use crate::error::NumericError;

/// Brent solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brent {
    pub xtol: f64,
    pub rtol: f64,
    pub max_iter: usize,
}

impl Default for Brent {
    fn default() -> Self {
        Self {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

impl Brent {
    /// Find `x` in `[lower, upper]` with `f(x) = 0`.
    pub fn solve<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64, NumericError>
    where
        F: FnMut(f64) -> Result<f64, NumericError>,
    {
        if !(lower.is_finite() && upper.is_finite() && upper > lower) {
            return Err(NumericError::InvalidInput(format!(
                "Invalid root bracket [{lower}, {upper}] (must be finite with upper>lower)."
            )));
        }

        let mut a = lower;
        let mut b = upper;
        let mut fa = finite(a, f(a)?)?;
        let mut fb = finite(b, f(b)?)?;

        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(NumericError::Bracket {
                lower,
                upper,
                f_lower: fa,
                f_upper: fb,
            });
        }

        // `c` is the contrapoint: the root always lies between `b` and `c`.
        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.max_iter {
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * self.rtol * b.abs() + 0.5 * self.xtol;
            let m = 0.5 * (c - b);
            if m.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // Secant step.
                    (2.0 * m * s, 1.0 - s)
                } else {
                    // Inverse quadratic interpolation.
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                } else {
                    p = -p;
                }

                if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = m;
                }
            } else {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(m) };
            fb = finite(b, f(b)?)?;
        }

        Err(NumericError::NoConvergence {
            iterations: self.max_iter,
            estimate: b,
        })
    }
}

fn finite(x: f64, y: f64) -> Result<f64, NumericError> {
    if y.is_finite() {
        Ok(y)
    } else {
        Err(NumericError::NonFinite { at: x })
    }
}
