//! Fixed constants of the prior models.
//!
//! - mass-squared splittings (PDG 2016)
//! - minimal Σmν per ordering, with first-order error propagation
//! - best-fit shape constants per variant
//! - log10 Bayesian evidence per variant
//!
//! The minimal masses need `sqrt`, so the full parameter table is built once
//! on first use and is read-only afterwards.

use std::sync::LazyLock;

use crate::domain::{
    EvidenceWeight, FittingParameters, MassOrdering, MassSplittings, Mechanism, MinimalMass,
    MixtureWeights, ModelVariant, ShapeConstants,
};

/// PDG 2016 splittings in eV².
pub const PDG_2016: MassSplittings = MassSplittings {
    delta_m21: 7.37e-5,
    delta_m21_sigma: 0.17e-5,
    delta_m_normal: 2.50e-3,
    delta_m_normal_sigma: 0.04e-3,
    delta_m_inverted: 2.46e-3,
    delta_m_inverted_sigma: 0.04e-3,
};

const SHAPE_M_NO: ShapeConstants = ShapeConstants {
    normalization: 0.9766,
    mean: 0.06164,
    sigma: 0.02416,
    skewness: 0.003215,
    power_amplitude: 1.565,
    power_center: 0.1336,
    power_sigma: 0.01251,
    power_exponent: -10.0,
};

const SHAPE_M_IO: ShapeConstants = ShapeConstants {
    normalization: 0.9389,
    mean: 0.1039,
    sigma: 0.0249,
    skewness: 0.003634,
    power_amplitude: 2.781,
    power_center: 0.1705,
    power_sigma: 0.01359,
    power_exponent: -10.0,
};

const SHAPE_D_NO: ShapeConstants = ShapeConstants {
    normalization: 0.9862,
    mean: 0.06109,
    sigma: 0.017,
    skewness: 0.002484,
    power_amplitude: 0.2275,
    power_center: 0.1315,
    power_sigma: 0.01603,
    power_exponent: -16.0,
};

const SHAPE_D_IO: ShapeConstants = ShapeConstants {
    normalization: 0.9695,
    mean: 0.1033,
    sigma: 0.01792,
    skewness: 0.002936,
    power_amplitude: 0.5281,
    power_center: 0.1713,
    power_sigma: 0.01876,
    power_exponent: -16.0,
};

// The seesaw fits pair a huge normalization with a tiny tail amplitude.
const SHAPE_S_NO: ShapeConstants = ShapeConstants {
    normalization: 8.235e26,
    mean: -0.4099,
    sigma: 0.04301,
    skewness: 0.01624,
    power_amplitude: 5.5e-27,
    power_center: 0.0779,
    power_sigma: 0.007016,
    power_exponent: -12.0,
};

const SHAPE_S_IO: ShapeConstants = ShapeConstants {
    normalization: 1.186e65,
    mean: 5.791e-6,
    sigma: 0.01851,
    skewness: -0.006123,
    power_amplitude: 1.124e-63,
    power_center: 0.09837,
    power_sigma: 0.003094,
    power_exponent: -12.0,
};

/// Best-fit shape constants for a variant.
pub fn shape_constants(variant: ModelVariant) -> ShapeConstants {
    match variant {
        ModelVariant::MajoranaNormal => SHAPE_M_NO,
        ModelVariant::MajoranaInverted => SHAPE_M_IO,
        ModelVariant::DiracNormal => SHAPE_D_NO,
        ModelVariant::DiracInverted => SHAPE_D_IO,
        ModelVariant::SeesawNormal => SHAPE_S_NO,
        ModelVariant::SeesawInverted => SHAPE_S_IO,
    }
}

/// log10 of the Bayesian evidence for a variant.
pub fn evidence(variant: ModelVariant) -> EvidenceWeight {
    let log10 = match variant {
        ModelVariant::MajoranaNormal => 3.5756,
        ModelVariant::MajoranaInverted => 2.3055,
        ModelVariant::DiracNormal => 3.0760,
        ModelVariant::DiracInverted => 0.9593,
        ModelVariant::SeesawNormal => 5.9995,
        ModelVariant::SeesawInverted => 3.3313,
    };
    EvidenceWeight { log10 }
}

/// Minimal Σmν for an ordering, with the uncertainty propagated from the splittings.
///
/// Normal:   `m = √Δ21 + √(Δ + Δ21/2)`
/// Inverted: `m = √(Δ − Δ21/2) + √(Δ + Δ21/2)`
pub fn minimal_mass(s: &MassSplittings, ordering: MassOrdering) -> MinimalMass {
    match ordering {
        MassOrdering::Normal => {
            let r21 = s.delta_m21.sqrt();
            let r = (s.delta_m_normal + 0.5 * s.delta_m21).sqrt();
            let d_delta = 1.0 / (2.0 * r);
            let d_delta21 = 1.0 / (4.0 * r) + 1.0 / (2.0 * r21);
            MinimalMass {
                value: r21 + r,
                sigma: propagate(&[
                    (d_delta, s.delta_m_normal_sigma),
                    (d_delta21, s.delta_m21_sigma),
                ]),
            }
        }
        MassOrdering::Inverted => {
            let lo = (s.delta_m_inverted - 0.5 * s.delta_m21).sqrt();
            let hi = (s.delta_m_inverted + 0.5 * s.delta_m21).sqrt();
            let d_delta = 1.0 / (2.0 * lo) + 1.0 / (2.0 * hi);
            let d_delta21 = -1.0 / (4.0 * lo) + 1.0 / (4.0 * hi);
            MinimalMass {
                value: lo + hi,
                sigma: propagate(&[
                    (d_delta, s.delta_m_inverted_sigma),
                    (d_delta21, s.delta_m21_sigma),
                ]),
            }
        }
    }
}

/// Gaussian error propagation: `√Σ (∂f/∂xᵢ · σᵢ)²`.
fn propagate(terms: &[(f64, f64)]) -> f64 {
    terms
        .iter()
        .map(|&(partial, sigma)| (partial * sigma).powi(2))
        .sum::<f64>()
        .sqrt()
}

static PARAMETERS: LazyLock<[FittingParameters; 6]> = LazyLock::new(|| {
    ModelVariant::ALL.map(|v| {
        FittingParameters::from_shape(shape_constants(v), minimal_mass(&PDG_2016, v.ordering()))
    })
});

/// Full ten-parameter tuple for a variant.
pub fn fitting_parameters(variant: ModelVariant) -> &'static FittingParameters {
    &PARAMETERS[variant.index()]
}

/// Evidence-normalized ordering weights for a mechanism.
///
/// The dominant ordering's weight is computed by division and the other one as
/// its complement, so the two always sum to exactly `1.0`.
pub fn mixture_weights(mechanism: Mechanism) -> MixtureWeights {
    let e_no = evidence(ModelVariant::new(mechanism, MassOrdering::Normal)).value();
    let e_io = evidence(ModelVariant::new(mechanism, MassOrdering::Inverted)).value();
    let total = e_no + e_io;
    if e_no >= e_io {
        let normal = e_no / total;
        MixtureWeights {
            normal,
            inverted: 1.0 - normal,
        }
    } else {
        let inverted = e_io / total;
        MixtureWeights {
            normal: 1.0 - inverted,
            inverted,
        }
    }
}
