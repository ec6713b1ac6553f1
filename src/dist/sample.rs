//! Inverse-transform sampling of Σmν.
//!
//! The cumulative mass is tabulated once on a uniform grid over `[0, upper]`
//! as `total − ∫_g^∞ f` at every grid point `g` (in parallel), so each entry
//! sees the whole support through the `+∞` mapping. Draws are uniform
//! variates mapped through the piecewise-linear inverse of that table.
//!
//! Mass above `upper` is not sampled; `tail_mass()` reports how much that is.
//! A grid so coarse that one cell carries more than `MAX_CELL_FRACTION` of the
//! tabulated mass is rejected.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::dist::Density;
use crate::error::{AppError, NumericError};
use crate::math::{Quadrature, linspace};

/// Largest share of the tabulated mass a single cell may hold.
pub const MAX_CELL_FRACTION: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct InverseCdfSampler {
    grid: Vec<f64>,
    /// Normalized cumulative mass at each grid point: `0` first, `1` last.
    cumulative: Vec<f64>,
    tail_mass: f64,
}

impl InverseCdfSampler {
    pub fn new<D: Density + ?Sized>(
        density: &D,
        upper: f64,
        cells: usize,
        quadrature: Quadrature,
    ) -> Result<Self, AppError> {
        if !(upper.is_finite() && upper > 0.0) {
            return Err(AppError::new(2, format!("Invalid sampler upper bound {upper}.")));
        }
        let grid = linspace(0.0, upper, cells.max(1) + 1)?;

        let total = quadrature.integrate(|x| density.density(x), 0.0, f64::INFINITY)?;
        let tails: Vec<f64> = grid
            .par_iter()
            .map(|&g| {
                quadrature
                    .integrate(|x| density.density(x), g, f64::INFINITY)
                    .map(|i| i.value)
            })
            .collect::<Result<_, NumericError>>()?;

        // Running max absorbs quadrature noise between neighbouring tails.
        let mut cumulative = Vec::with_capacity(grid.len());
        let mut acc = 0.0_f64;
        for (i, tail) in tails.iter().enumerate() {
            if i > 0 {
                acc = acc.max(total.value - tail);
            }
            cumulative.push(acc);
        }

        if !(acc > 0.0) {
            return Err(AppError::new(
                4,
                format!("Density has no mass on [0, {upper}]; cannot sample."),
            ));
        }
        let widest = cumulative
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(0.0_f64, f64::max);
        if widest > MAX_CELL_FRACTION * acc {
            return Err(AppError::new(
                2,
                format!(
                    "Sampling grid too coarse: one of {} cells over [0, {upper}] holds {:.1}% \
                     of the mass. Lower --upper or raise --cells.",
                    grid.len() - 1,
                    100.0 * widest / acc
                ),
            ));
        }

        for c in &mut cumulative {
            *c /= acc;
        }
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        let tail_mass = (1.0 - acc / total.value).max(0.0);

        Ok(Self {
            grid,
            cumulative,
            tail_mass,
        })
    }

    /// Fraction of the total mass above `upper` (excluded from sampling).
    pub fn tail_mass(&self) -> f64 {
        self.tail_mass
    }

    /// Inverse CDF for `u ∈ [0, 1]` (values outside are clamped).
    pub fn quantile(&self, u: f64) -> Result<f64, NumericError> {
        if u.is_nan() {
            return Err(NumericError::InvalidInput("Quantile requested at NaN.".to_string()));
        }
        Ok(self.invert(u.clamp(0.0, 1.0)))
    }

    fn invert(&self, u: f64) -> f64 {
        // First index whose cumulative value exceeds `u`.
        let i = self.cumulative.partition_point(|&c| c <= u);
        if i >= self.cumulative.len() {
            return self.grid[self.grid.len() - 1];
        }
        let (c0, c1) = (self.cumulative[i - 1], self.cumulative[i]);
        let (x0, x1) = (self.grid[i - 1], self.grid[i]);
        x0 + (u - c0) / (c1 - c0) * (x1 - x0)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.invert(rng.gen_range(0.0..1.0))
    }

    /// Draw `count` samples from a seeded generator (deterministic per seed).
    pub fn draw(&self, count: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count).map(|_| self.sample(&mut rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::solve_tail_mass;
    use crate::dist::Ccdf;
    use crate::domain::ModelVariant;
    use crate::math::Brent;
    use crate::models::Curve;

    #[test]
    fn uniform_density_has_linear_quantiles() {
        struct Flat;
        impl Density for Flat {
            fn density(&self, x: f64) -> f64 {
                if (0.0..=2.0).contains(&x) { 0.5 } else { 0.0 }
            }
        }
        let s = InverseCdfSampler::new(&Flat, 2.0, 40, Quadrature::default()).unwrap();
        assert!((s.quantile(0.25).unwrap() - 0.5).abs() < 1e-8);
        assert!((s.quantile(0.5).unwrap() - 1.0).abs() < 1e-8);
        assert_eq!(s.quantile(1.0).unwrap(), 2.0);
        assert_eq!(s.quantile(-3.0).unwrap(), 0.0);
        assert!(s.tail_mass() < 1e-9);
    }

    #[test]
    fn draws_are_deterministic_and_in_support() {
        let curve = Curve::for_variant(ModelVariant::MajoranaNormal);
        let s = InverseCdfSampler::new(&curve, 1.0, 4000, Quadrature::default()).unwrap();
        let a = s.draw(500, 42);
        let b = s.draw(500, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| x > 0.05 && x <= 1.0));
        assert!(s.tail_mass() < 1e-4);
    }

    #[test]
    fn half_the_draws_fall_below_the_median() {
        let curve = Curve::for_variant(ModelVariant::DiracInverted);
        let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
        let median = solve_tail_mass(&ccdf, 0.5, 1e-4, 0.5, &Brent::default()).unwrap();

        let s = InverseCdfSampler::new(&curve, 1.0, 4000, Quadrature::default()).unwrap();
        let draws = s.draw(4000, 7);
        let below = draws.iter().filter(|&&x| x < median).count() as f64 / draws.len() as f64;
        assert!((below - 0.5).abs() < 0.03, "fraction below median {below}");
    }

    #[test]
    fn rejects_bad_upper_bound() {
        let curve = Curve::for_variant(ModelVariant::DiracNormal);
        assert!(InverseCdfSampler::new(&curve, 0.0, 10, Quadrature::default()).is_err());
    }

    #[test]
    fn rejects_grid_coarser_than_the_support() {
        let curve = Curve::for_variant(ModelVariant::MajoranaNormal);
        let err = InverseCdfSampler::new(&curve, 1e4, 10, Quadrature::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("too coarse"), "{err}");
    }

    #[test]
    fn wide_table_with_enough_cells_keeps_the_median() {
        let curve = Curve::for_variant(ModelVariant::MajoranaNormal);
        let ccdf = Ccdf::new(&curve, Quadrature::default()).unwrap();
        let median = solve_tail_mass(&ccdf, 0.5, 1e-4, 0.5, &Brent::default()).unwrap();

        let s = InverseCdfSampler::new(&curve, 5.0, 10_000, Quadrature::default()).unwrap();
        let q = s.quantile(0.5).unwrap();
        assert!((q - median).abs() < 1e-3, "quantile(0.5) = {q}, median {median}");
    }

    #[test]
    fn nan_quantile_is_an_error() {
        let curve = Curve::for_variant(ModelVariant::DiracInverted);
        let s = InverseCdfSampler::new(&curve, 1.0, 400, Quadrature::default()).unwrap();
        assert!(matches!(s.quantile(f64::NAN), Err(NumericError::InvalidInput(_))));
    }
}
