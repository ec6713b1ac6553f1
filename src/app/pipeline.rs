//! Shared computation pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! constant tables -> curves / mixtures -> integrals -> bounds / grids
//!
//! The command handlers can then focus on presentation (printing vs files).
//! Per-variant work is independent and runs in parallel; results keep the
//! order of `ModelVariant::ALL`.

use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::confidence::{ConfidenceBound, confidence_bound};
use crate::dist::{Ccdf, OrderingMixture};
use crate::domain::{
    BoundsConfig, DensityGrid, GridColumn, GridSpec, MassOrdering, Mechanism, MixtureEntry,
    ModelVariant, PriorFile, VariantEntry,
};
use crate::error::{AppError, NumericError};
use crate::math::{Integral, Quadrature, linspace};
use crate::models::{Curve, PDG_2016, evidence, fitting_parameters, minimal_mass};
use crate::plot::Series;

/// Confidence bound (or the reason it failed) for one variant.
#[derive(Debug, Clone)]
pub struct BoundRow {
    pub variant: ModelVariant,
    pub result: Result<ConfidenceBound, NumericError>,
}

/// Normalization integrals for one variant.
#[derive(Debug, Clone)]
pub struct NormalizationRow {
    pub variant: ModelVariant,
    pub to_one: Result<Integral, NumericError>,
    pub to_infinity: Result<Integral, NumericError>,
}

impl NormalizationRow {
    /// Both integrals met their tolerance.
    pub fn is_ok(&self) -> bool {
        self.to_one.is_ok() && self.to_infinity.is_ok()
    }
}

/// Solve the confidence bound of every variant.
///
/// A failure on one variant is recorded on its row; the others still run.
pub fn run_bounds(config: &BoundsConfig) -> Vec<BoundRow> {
    ModelVariant::ALL
        .par_iter()
        .map(|&variant| {
            let result = confidence_bound(variant, config);
            match &result {
                Ok(b) => debug!(variant = variant.code(), mass = b.mass, "solved bound"),
                Err(e) => warn!(variant = variant.code(), error = %e, "bound failed"),
            }
            BoundRow { variant, result }
        })
        .collect()
}

/// Integrate every variant over `[0, 1]` and `[0, ∞)`.
pub fn run_normalization(quadrature: &Quadrature) -> Vec<NormalizationRow> {
    ModelVariant::ALL
        .par_iter()
        .map(|&variant| {
            let curve = Curve::for_variant(variant);
            let to_one = quadrature.integrate(|x| curve.eval(x), 0.0, 1.0);
            let to_infinity = quadrature.integrate(|x| curve.eval(x), 0.0, f64::INFINITY);
            NormalizationRow {
                variant,
                to_one,
                to_infinity,
            }
        })
        .collect()
}

/// Label of a mechanism's mixture column.
pub fn mixture_label(mechanism: Mechanism) -> String {
    format!("{}_MIX", &mechanism.display_name()[..1])
}

/// Densities of all six variants plus the three mixtures on one grid.
pub fn density_grid(spec: GridSpec) -> Result<DensityGrid, AppError> {
    let mass_ev = linspace(spec.x_min, spec.x_max, spec.points)?;

    let mut columns: Vec<GridColumn> = ModelVariant::ALL
        .iter()
        .map(|&v| GridColumn {
            label: v.code().to_string(),
            values: Curve::for_variant(v).eval_many(&mass_ev),
        })
        .collect();

    for mix in Mechanism::ALL.map(OrderingMixture::new) {
        columns.push(GridColumn {
            label: mixture_label(mix.mechanism()),
            values: mass_ev.iter().map(|&x| mix.eval(x)).collect(),
        });
    }

    Ok(DensityGrid { mass_ev, columns })
}

/// Weighted single-ordering series `w_o · f_o(x)` for each mechanism (figure 6 panels).
pub fn weighted_ordering_series(ordering: MassOrdering, mass_ev: &[f64]) -> Vec<Series> {
    Mechanism::ALL
        .iter()
        .map(|&m| {
            let mix = OrderingMixture::new(m);
            Series {
                label: format!("{} {}", mix.mechanism().display_name(), ordering.short_name()),
                points: mass_ev
                    .iter()
                    .map(|&x| (x, mix.weighted_component(ordering, x)))
                    .collect(),
            }
        })
        .collect()
}

/// Full ordering mixtures for each mechanism (figure 7).
pub fn mixture_series(mass_ev: &[f64]) -> Vec<Series> {
    Mechanism::ALL
        .iter()
        .map(|&m| {
            let mix = OrderingMixture::new(m);
            Series {
                label: format!("{} NO+IO", m.display_name()),
                points: mass_ev.iter().map(|&x| (x, mix.eval(x))).collect(),
            }
        })
        .collect()
}

/// CCDF series of the three mechanisms for one ordering.
pub fn ccdf_series(
    ordering: MassOrdering,
    mass_ev: &[f64],
    quadrature: Quadrature,
) -> Result<Vec<Series>, AppError> {
    let mut out = Vec::with_capacity(Mechanism::ALL.len());
    for m in Mechanism::ALL {
        let variant = ModelVariant::new(m, ordering);
        let curve = Curve::for_variant(variant);
        let ccdf = Ccdf::new(&curve, quadrature)?;
        let values = ccdf.eval_many(mass_ev)?;
        debug!(variant = variant.code(), points = values.len(), "evaluated ccdf");
        out.push(Series {
            label: variant.display_name(),
            points: mass_ev.iter().copied().zip(values).collect(),
        });
    }
    Ok(out)
}

/// Assemble the exportable description of all priors.
pub fn build_prior_file(grid: DensityGrid) -> PriorFile {
    PriorFile {
        tool: "nuprior".to_string(),
        generated_at: Utc::now(),
        splittings: PDG_2016,
        minimal_mass_normal: minimal_mass(&PDG_2016, MassOrdering::Normal),
        minimal_mass_inverted: minimal_mass(&PDG_2016, MassOrdering::Inverted),
        variants: ModelVariant::ALL
            .iter()
            .map(|&v| VariantEntry {
                variant: v,
                parameters: *fitting_parameters(v),
                evidence: evidence(v),
            })
            .collect(),
        mixtures: Mechanism::ALL
            .iter()
            .map(|&m| MixtureEntry {
                mechanism: m,
                weights: OrderingMixture::new(m).weights(),
            })
            .collect(),
        grid,
    }
}
