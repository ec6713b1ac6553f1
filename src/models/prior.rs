//! The closed-form prior over Σmν.
//!
//! ```text
//! density(x) = N · step(x; m_min, σ_min) · (lobe(x) + tail(x))
//! lobe(x)    = √(2/π)/σ · step(x; μ, skew) · exp(−(x−μ)²/(2σ²))
//! tail(x)    = A · step(x; p, σ_p) · (x/p)^k
//! ```
//!
//! All three gates are the same `smooth_step` with different (center, width).
//!
//! Numerical notes:
//! - `x <= 0` (and NaN) is outside the support and returns exactly zero.
//! - For very small `x`, `(x/p)^k` with `k ≈ -10..-16` overflows while its gate
//!   is exactly zero. A zero gate therefore short-circuits before the
//!   multiplication so `0 · ∞` never produces NaN.

use std::f64::consts::{PI, SQRT_2};

use crate::domain::{FittingParameters, ModelVariant};
use crate::math::smooth_step;
use crate::models::tables::fitting_parameters;

/// Prior density at `x` for the given parameters.
pub fn density(x: f64, p: &FittingParameters) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return 0.0;
    }

    let min_cut = smooth_step(x, p.minimal_mass, p.minimal_mass_sigma);
    if min_cut == 0.0 {
        return 0.0;
    }

    p.normalization * min_cut * (skew_lobe(x, p) + power_tail(x, p))
}

/// Elementwise `density` over a slice; output has the same length and order.
pub fn density_many(xs: &[f64], p: &FittingParameters) -> Vec<f64> {
    xs.iter().map(|&x| density(x, p)).collect()
}

fn skew_lobe(x: f64, p: &FittingParameters) -> f64 {
    let gate = smooth_step(x, p.mean, p.skewness);
    if gate == 0.0 {
        return 0.0;
    }
    let z = (x - p.mean) / p.sigma;
    SQRT_2 / PI.sqrt() / p.sigma * gate * (-0.5 * z * z).exp()
}

fn power_tail(x: f64, p: &FittingParameters) -> f64 {
    let gate = smooth_step(x, p.power_center, p.power_sigma);
    if gate == 0.0 {
        return 0.0;
    }
    p.power_amplitude * gate * (x / p.power_center).powf(p.power_exponent)
}

/// A prior density with its parameters bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    params: FittingParameters,
}

impl Curve {
    pub fn new(params: FittingParameters) -> Self {
        Self { params }
    }

    pub fn for_variant(variant: ModelVariant) -> Self {
        Self::new(*fitting_parameters(variant))
    }

    pub fn params(&self) -> &FittingParameters {
        &self.params
    }

    pub fn eval(&self, x: f64) -> f64 {
        density(x, &self.params)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        density_many(xs, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::linspace;
    use rand::prelude::*;
    use rand::rngs::StdRng;

    fn peak(curve: &Curve) -> f64 {
        linspace(0.0, 0.3, 3001)
            .unwrap()
            .into_iter()
            .map(|x| curve.eval(x))
            .fold(0.0, f64::max)
    }

    #[test]
    fn zero_at_and_below_zero() {
        for v in ModelVariant::ALL {
            let c = Curve::for_variant(v);
            for x in [0.0, -0.0, -1e-12, -0.5, -1e300, f64::NEG_INFINITY, f64::NAN] {
                assert_eq!(c.eval(x), 0.0, "{v:?} at {x}");
            }
        }
    }

    #[test]
    fn finite_and_non_negative_over_wide_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for v in ModelVariant::ALL {
            let c = Curve::for_variant(v);
            for _ in 0..2000 {
                // Log-uniform masses from 1e-30 to 1e6 eV.
                let x = 10f64.powf(rng.gen_range(-30.0..6.0));
                let y = c.eval(x);
                assert!(y.is_finite() && y >= 0.0, "{v:?}: density({x}) = {y}");
            }
            for x in linspace(0.0, 0.3, 1000).unwrap() {
                let y = c.eval(x);
                assert!(y.is_finite() && y >= 0.0, "{v:?}: density({x}) = {y}");
            }
        }
    }

    #[test]
    fn majorana_normal_is_suppressed_below_minimal_mass() {
        let c = Curve::for_variant(ModelVariant::MajoranaNormal);
        assert_eq!(c.eval(0.0), 0.0);
        assert!(c.params().minimal_mass > 0.058 && c.params().minimal_mass < 0.06);
        let pk = peak(&c);
        assert!(pk > 25.0 && pk < 35.0, "peak {pk}");
        assert!(c.eval(0.01) < 1e-3 * pk);
    }

    #[test]
    fn continuous_across_minimal_mass() {
        for v in ModelVariant::ALL {
            let c = Curve::for_variant(v);
            let m = c.params().minimal_mass;
            let s = c.params().minimal_mass_sigma;
            let pk = peak(&c);
            // Step well below the gate width: neighbouring values must stay close.
            let h = s * 1e-3;
            let mut x = m - 8.0 * s;
            while x < m + 8.0 * s {
                let jump = (c.eval(x + h) - c.eval(x)).abs();
                assert!(jump < 1e-2 * pk, "{v:?}: jump {jump} at {x}");
                x += h;
            }
        }
    }

    #[test]
    fn seesaw_magnitudes_stay_finite() {
        // Seesaw normalizations are ~1e26 / ~1e65; the product must still be O(1..1e3).
        for v in [ModelVariant::SeesawNormal, ModelVariant::SeesawInverted] {
            let pk = peak(&Curve::for_variant(v));
            assert!(pk.is_finite() && pk > 1.0 && pk < 1e3, "{v:?}: peak {pk}");
        }
    }

    #[test]
    fn vectorized_matches_scalar() {
        let c = Curve::for_variant(ModelVariant::DiracInverted);
        let xs = [-1.0, 0.0, 0.05, 0.1, 0.2, 1.0];
        let ys = c.eval_many(&xs);
        assert_eq!(ys.len(), xs.len());
        for (x, y) in xs.iter().zip(ys) {
            assert_eq!(y, c.eval(*x));
        }
    }

    #[test]
    fn gates_are_shared_between_terms() {
        // With zero tail amplitude and a huge minimal-mass width the density is
        // N · step(x; m, σ_m) · lobe(x); check one point by hand.
        let p = FittingParameters {
            normalization: 2.0,
            mean: 0.1,
            sigma: 0.02,
            skewness: 0.01,
            power_amplitude: 0.0,
            power_center: 0.1,
            power_sigma: 0.01,
            power_exponent: -10.0,
            minimal_mass: 0.1,
            minimal_mass_sigma: 0.01,
        };
        // At x = mean = minimal, both gates are 1/2 and the Gaussian is 1.
        let expected = 2.0 * 0.5 * ((2.0 / PI).sqrt() / 0.02 * 0.5);
        assert!((density(0.1, &p) - expected).abs() < 1e-12);
    }
}
