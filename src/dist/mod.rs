//! Distribution post-processing on top of the prior formula.
//!
//! Responsibilities:
//!
//! - a `Density` seam shared by single-variant curves and ordering mixtures
//! - complementary CDFs normalized against the integral to infinity
//! - evidence-weighted mixtures over orderings
//! - inverse-transform sampling of Σmν

pub mod cdf;
pub mod mixture;
pub mod sample;

pub use cdf::*;
pub use mixture::*;
pub use sample::*;

use crate::models::Curve;

/// A non-negative density over Σmν.
pub trait Density: Sync {
    fn density(&self, x: f64) -> f64;

    /// Elementwise evaluation; output has the same length and order as `xs`.
    fn densities(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.density(x)).collect()
    }
}

impl Density for Curve {
    fn density(&self, x: f64) -> f64 {
        self.eval(x)
    }
}
