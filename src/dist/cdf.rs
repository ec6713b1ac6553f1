//! Complementary CDF of a prior density.
//!
//! `ccdf(x) = ∫_x^∞ f / ∫_0^∞ f`
//!
//! The fitted curves are normalized to ~1 but not exactly, so the total is
//! integrated once at construction and every evaluation divides by it.
//! Both integrals run to `+∞` through the quadrature's interval mapping, which
//! keeps the support in view for any `x`. A finite `[0, x]` panel does not:
//! for `x` far above the support its nodes all miss the density.

use rayon::prelude::*;

use crate::dist::Density;
use crate::error::NumericError;
use crate::math::{Integral, Quadrature};

pub struct Ccdf<'a, D: Density + ?Sized> {
    density: &'a D,
    total: Integral,
    quadrature: Quadrature,
}

impl<'a, D: Density + ?Sized> Ccdf<'a, D> {
    pub fn new(density: &'a D, quadrature: Quadrature) -> Result<Self, NumericError> {
        let total = quadrature.integrate(|x| density.density(x), 0.0, f64::INFINITY)?;
        if !(total.value > 0.0) {
            return Err(NumericError::InvalidInput(format!(
                "Density has non-positive total mass {:.6e}.",
                total.value
            )));
        }
        Ok(Self {
            density,
            total,
            quadrature,
        })
    }

    /// `∫_0^∞` of the underlying density.
    pub fn total(&self) -> &Integral {
        &self.total
    }

    /// Tail probability above `x`. Equals 1 for `x <= 0` and 0 at `+∞`.
    pub fn eval(&self, x: f64) -> Result<f64, NumericError> {
        if x.is_nan() {
            return Err(NumericError::InvalidInput("CCDF evaluated at NaN.".to_string()));
        }
        if x <= 0.0 {
            return Ok(1.0);
        }
        if x.is_infinite() {
            return Ok(0.0);
        }
        let tail = self
            .quadrature
            .integrate(|t| self.density.density(t), x, f64::INFINITY)?;
        // Separate quadratures can overshoot by ~tolerance; keep it a probability.
        Ok((tail.value / self.total.value).clamp(0.0, 1.0))
    }

    /// Elementwise evaluation (parallel); output keeps the input order.
    pub fn eval_many(&self, xs: &[f64]) -> Result<Vec<f64>, NumericError> {
        xs.par_iter().map(|&x| self.eval(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelVariant;
    use crate::math::linspace;
    use crate::models::Curve;

    #[test]
    fn starts_at_one_and_decays_to_zero() {
        for v in ModelVariant::ALL {
            let curve = Curve::for_variant(v);
            let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
            assert_eq!(ccdf.eval(0.0).unwrap(), 1.0);
            assert!((ccdf.eval(1e-4).unwrap() - 1.0).abs() < 1e-8, "{v:?}");
            assert!(ccdf.eval(5.0).unwrap() < 1e-6, "{v:?}");
            assert_eq!(ccdf.eval(f64::INFINITY).unwrap(), 0.0);
        }
    }

    #[test]
    fn is_monotonically_non_increasing() {
        for v in ModelVariant::ALL {
            let curve = Curve::for_variant(v);
            let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
            let xs = linspace(0.0, 1.0, 400).unwrap();
            let ys = ccdf.eval_many(&xs).unwrap();
            assert_eq!(ys.len(), xs.len());
            for w in ys.windows(2) {
                assert!(w[1] <= w[0] + 1e-8, "{v:?}: {} -> {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn far_tail_stays_at_zero() {
        let xs = [0.5, 5.0, 50.0, 1e3, 1e4, 1e6];
        for v in ModelVariant::ALL {
            let curve = Curve::for_variant(v);
            let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
            let ys = ccdf.eval_many(&xs).unwrap();
            for (x, y) in xs.iter().zip(&ys).skip(1) {
                assert!(*y < 1e-6, "{v:?}: ccdf({x}) = {y}");
            }
            for w in ys.windows(2) {
                assert!(w[1] <= w[0] + 1e-8, "{v:?}: {} -> {}", w[0], w[1]);
            }
        }
    }

    #[test]
    fn fitted_curves_are_close_to_unit_mass() {
        for v in ModelVariant::ALL {
            let curve = Curve::for_variant(v);
            let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
            let total = ccdf.total().value;
            assert!((total - 1.0).abs() < 5e-3, "{v:?}: total {total}");
        }
    }

    #[test]
    fn self_normalization_round_trip() {
        let curve = Curve::for_variant(ModelVariant::SeesawInverted);
        let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
        let q = Quadrature::default();
        let upper = q.integrate(|x| curve.eval(x), 0.0, 10.0).unwrap().value;
        let tail = q.integrate(|x| curve.eval(x), 10.0, f64::INFINITY).unwrap().value;
        assert!(((upper + tail) / ccdf.total().value - 1.0).abs() < 1e-8);
    }

    #[test]
    fn rejects_nan_and_zero_density() {
        let curve = Curve::for_variant(ModelVariant::DiracNormal);
        let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
        assert!(ccdf.eval(f64::NAN).is_err());

        struct Nothing;
        impl Density for Nothing {
            fn density(&self, _x: f64) -> f64 {
                0.0
            }
        }
        assert!(matches!(
            Ccdf::new(&Nothing, Quadrature::default()),
            Err(NumericError::InvalidInput(_))
        ));
    }
}
