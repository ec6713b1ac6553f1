//! Adaptive Gauss–Kronrod quadrature.
//!
//! We integrate smooth, bounded functions with sharp (but continuous) gates:
//!
//! ```text
//! ∫_a^b f(x) dx     (b may be +∞)
//! ```
//!
//! Implementation choices:
//! - 15-point Kronrod rule with the embedded 7-point Gauss rule as the local
//!   error estimate.
//! - Global subdivision: the segment with the largest error estimate is
//!   bisected until the summed error meets `max(abs_tol, rel_tol·|I|)`.
//! - A `+∞` upper bound is handled by the substitution `x = a + t/(1−t)`,
//!   which maps `[a, ∞)` onto `[0, 1)`. Kronrod nodes are interior, so `t = 1`
//!   is never evaluated.

use crate::error::NumericError;

/// Gauss–Kronrod abscissae on `[0, 1]` (the rule is symmetric).
/// Odd indices are shared with the 7-point Gauss rule.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Result of a successful integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    pub value: f64,
    pub abs_error: f64,
    pub segments: usize,
}

/// Adaptive quadrature settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_segments: usize,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self {
            abs_tol: 1e-10,
            rel_tol: 1e-10,
            max_segments: 200,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl Quadrature {
    /// Integrate `f` over `[lower, upper]`. `upper` may be `f64::INFINITY`.
    ///
    /// `lower == upper` yields an exact zero.
    pub fn integrate<F>(&self, f: F, lower: f64, upper: f64) -> Result<Integral, NumericError>
    where
        F: Fn(f64) -> f64,
    {
        if lower.is_nan() || upper.is_nan() || !lower.is_finite() {
            return Err(NumericError::InvalidInput(format!(
                "Invalid integration bounds [{lower}, {upper}]."
            )));
        }
        if upper < lower {
            return Err(NumericError::InvalidInput(format!(
                "Integration bounds out of order: [{lower}, {upper}]."
            )));
        }
        if upper == lower {
            return Ok(Integral {
                value: 0.0,
                abs_error: 0.0,
                segments: 0,
            });
        }

        if upper.is_infinite() {
            let mapped = |t: f64| {
                if t >= 1.0 {
                    return 0.0;
                }
                let one_minus = 1.0 - t;
                f(lower + t / one_minus) / (one_minus * one_minus)
            };
            return self.adaptive(mapped, 0.0, 1.0).map_err(|e| match e {
                // Report the caller's bounds, not the mapped ones.
                NumericError::Integration {
                    estimate,
                    abs_error,
                    segments,
                    ..
                } => NumericError::Integration {
                    lower,
                    upper,
                    estimate,
                    abs_error,
                    segments,
                },
                NumericError::NonFinite { at } if at < 1.0 => NumericError::NonFinite {
                    at: lower + at / (1.0 - at),
                },
                other => other,
            });
        }

        self.adaptive(f, lower, upper)
    }

    fn adaptive<F>(&self, f: F, lower: f64, upper: f64) -> Result<Integral, NumericError>
    where
        F: Fn(f64) -> f64,
    {
        let first = kronrod_segment(&f, lower, upper)?;
        let mut total = first.value;
        let mut total_err = first.error;
        let mut segments = vec![first];

        while total_err > self.abs_tol.max(self.rel_tol * total.abs()) {
            if segments.len() >= self.max_segments {
                return Err(NumericError::Integration {
                    lower,
                    upper,
                    estimate: total,
                    abs_error: total_err,
                    segments: segments.len(),
                });
            }

            // Bisect the worst segment.
            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, l), (_, r)| {
                    l.error
                        .partial_cmp(&r.error)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i)
                .unwrap_or(0);
            let seg = segments.swap_remove(worst);
            let mid = 0.5 * (seg.a + seg.b);
            if !(mid > seg.a && mid < seg.b) {
                // Segment collapsed to machine resolution; cannot refine further.
                return Err(NumericError::Integration {
                    lower,
                    upper,
                    estimate: total,
                    abs_error: total_err,
                    segments: segments.len() + 1,
                });
            }

            let left = kronrod_segment(&f, seg.a, mid)?;
            let right = kronrod_segment(&f, mid, seg.b)?;
            total += left.value + right.value - seg.value;
            total_err += left.error + right.error - seg.error;
            segments.push(left);
            segments.push(right);
        }

        // Re-sum to avoid drift from the incremental updates.
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let abs_error: f64 = segments.iter().map(|s| s.error).sum();
        Ok(Integral {
            value,
            abs_error,
            segments: segments.len(),
        })
    }
}

fn kronrod_segment<F>(f: &F, a: f64, b: f64) -> Result<Segment, NumericError>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = eval(f, center)?;
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = eval(f, center - dx)? + eval(f, center + dx)?;
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Ok(Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}

fn eval<F>(f: &F, x: f64) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(NumericError::NonFinite { at: x })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrates_polynomial_exactly() {
        let q = Quadrature::default();
        let r = q.integrate(|x| 3.0 * x * x, 0.0, 2.0).unwrap();
        assert!((r.value - 8.0).abs() < 1e-12, "got {}", r.value);
        assert_eq!(r.segments, 1);
    }

    #[test]
    fn integrates_gaussian_to_infinity() {
        let q = Quadrature::default();
        let norm = (2.0 * std::f64::consts::PI).sqrt();
        let r = q
            .integrate(|x| (-0.5 * x * x).exp() / norm, 0.0, f64::INFINITY)
            .unwrap();
        assert!((r.value - 0.5).abs() < 1e-9, "got {}", r.value);
    }

    #[test]
    fn integrates_power_law_tail() {
        // ∫_1^∞ x^-10 dx = 1/9
        let q = Quadrature::default();
        let r = q.integrate(|x| x.powi(-10), 1.0, f64::INFINITY).unwrap();
        assert!((r.value - 1.0 / 9.0).abs() < 1e-9, "got {}", r.value);
    }

    #[test]
    fn resolves_a_narrow_step() {
        // A step of width 1e-4 at 0.3: integral over [0, 1] is 0.7.
        let q = Quadrature::default();
        let r = q
            .integrate(|x| crate::math::smooth_step(x, 0.3, 1e-4), 0.0, 1.0)
            .unwrap();
        assert!((r.value - 0.7).abs() < 1e-8, "got {}", r.value);
        assert!(r.segments > 1);
    }

    #[test]
    fn empty_interval_is_zero() {
        let q = Quadrature::default();
        let r = q.integrate(|x| x, 0.25, 0.25).unwrap();
        assert_eq!(r.value, 0.0);
    }

    #[test]
    fn reports_non_finite_integrand() {
        let q = Quadrature::default();
        let err = q.integrate(|_| f64::NAN, 0.0, 1.0).unwrap_err();
        assert!(matches!(err, NumericError::NonFinite { .. }));
    }

    #[test]
    fn reports_non_convergence() {
        let q = Quadrature {
            abs_tol: 1e-14,
            rel_tol: 1e-14,
            max_segments: 2,
        };
        let err = q
            .integrate(|x| crate::math::smooth_step(x, 0.3, 1e-6), 0.0, 1.0)
            .unwrap_err();
        assert!(matches!(err, NumericError::Integration { segments: 2, .. }), "{err:?}");
    }

    #[test]
    fn rejects_reversed_bounds() {
        let q = Quadrature::default();
        assert!(matches!(
            q.integrate(|x| x, 1.0, 0.0),
            Err(NumericError::InvalidInput(_))
        ));
    }
}
