//! Evidence-weighted mixture over mass orderings.
//!
//! For a mechanism `m`:
//!
//! ```text
//! mixture(x) = w_NO · f_NO(x) + w_IO · f_IO(x),   w_o = E_o / (E_NO + E_IO)
//! ```

use crate::dist::Density;
use crate::domain::{MassOrdering, Mechanism, MixtureWeights, ModelVariant};
use crate::models::{Curve, mixture_weights};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderingMixture {
    mechanism: Mechanism,
    weights: MixtureWeights,
    normal: Curve,
    inverted: Curve,
}

impl OrderingMixture {
    pub fn new(mechanism: Mechanism) -> Self {
        Self {
            mechanism,
            weights: mixture_weights(mechanism),
            normal: Curve::for_variant(ModelVariant::new(mechanism, MassOrdering::Normal)),
            inverted: Curve::for_variant(ModelVariant::new(mechanism, MassOrdering::Inverted)),
        }
    }

    pub fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    pub fn weights(&self) -> MixtureWeights {
        self.weights
    }

    /// One ordering's contribution `w_o · f_o(x)`.
    pub fn weighted_component(&self, ordering: MassOrdering, x: f64) -> f64 {
        let curve = match ordering {
            MassOrdering::Normal => &self.normal,
            MassOrdering::Inverted => &self.inverted,
        };
        self.weights.for_ordering(ordering) * curve.eval(x)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.weighted_component(MassOrdering::Normal, x)
            + self.weighted_component(MassOrdering::Inverted, x)
    }
}

impl Density for OrderingMixture {
    fn density(&self, x: f64) -> f64 {
        self.eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Ccdf;
    use crate::math::Quadrature;

    #[test]
    fn majorana_mixture_is_weighted_sum() {
        let mix = OrderingMixture::new(Mechanism::Majorana);
        let w = mixture_weights(Mechanism::Majorana);
        let no = Curve::for_variant(ModelVariant::MajoranaNormal).eval(0.1);
        let io = Curve::for_variant(ModelVariant::MajoranaInverted).eval(0.1);
        assert_eq!(mix.eval(0.1), w.normal * no + w.inverted * io);
        assert!(mix.eval(0.1) > 0.0);
    }

    #[test]
    fn mixture_is_zero_outside_support() {
        for m in Mechanism::ALL {
            let mix = OrderingMixture::new(m);
            assert_eq!(mix.eval(0.0), 0.0);
            assert_eq!(mix.eval(-1.0), 0.0);
        }
    }

    #[test]
    fn mixture_mass_is_weighted_mass_of_components() {
        let q = Quadrature::default();
        for m in Mechanism::ALL {
            let mix = OrderingMixture::new(m);
            let w = mix.weights();
            let no = Curve::for_variant(ModelVariant::new(m, MassOrdering::Normal));
            let io = Curve::for_variant(ModelVariant::new(m, MassOrdering::Inverted));
            let total = Ccdf::new(&mix, q).unwrap().total().value;
            let expected = w.normal * Ccdf::new(&no, q).unwrap().total().value
                + w.inverted * Ccdf::new(&io, q).unwrap().total().value;
            assert!((total - expected).abs() < 1e-8, "{m:?}: {total} vs {expected}");
        }
    }
}
