//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the formula, CCDF and solver code
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::math::{Brent, Quadrature};

/// Neutrino mass generation mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    Majorana,
    Dirac,
    Seesaw,
}

impl Mechanism {
    pub const ALL: [Mechanism; 3] = [Mechanism::Majorana, Mechanism::Dirac, Mechanism::Seesaw];

    pub fn display_name(self) -> &'static str {
        match self {
            Mechanism::Majorana => "Majorana",
            Mechanism::Dirac => "Dirac",
            Mechanism::Seesaw => "Seesaw",
        }
    }
}

/// Neutrino mass ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MassOrdering {
    Normal,
    Inverted,
}

impl MassOrdering {
    pub const ALL: [MassOrdering; 2] = [MassOrdering::Normal, MassOrdering::Inverted];

    /// Short label used in tables and file names (`NO` / `IO`).
    pub fn short_name(self) -> &'static str {
        match self {
            MassOrdering::Normal => "NO",
            MassOrdering::Inverted => "IO",
        }
    }
}

/// One of the six (mechanism, ordering) prior models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ModelVariant {
    #[serde(rename = "M_NO")]
    #[value(name = "m-no")]
    MajoranaNormal,
    #[serde(rename = "M_IO")]
    #[value(name = "m-io")]
    MajoranaInverted,
    #[serde(rename = "D_NO")]
    #[value(name = "d-no")]
    DiracNormal,
    #[serde(rename = "D_IO")]
    #[value(name = "d-io")]
    DiracInverted,
    #[serde(rename = "S_NO")]
    #[value(name = "s-no")]
    SeesawNormal,
    #[serde(rename = "S_IO")]
    #[value(name = "s-io")]
    SeesawInverted,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 6] = [
        ModelVariant::MajoranaNormal,
        ModelVariant::MajoranaInverted,
        ModelVariant::DiracNormal,
        ModelVariant::DiracInverted,
        ModelVariant::SeesawNormal,
        ModelVariant::SeesawInverted,
    ];

    pub fn new(mechanism: Mechanism, ordering: MassOrdering) -> Self {
        match (mechanism, ordering) {
            (Mechanism::Majorana, MassOrdering::Normal) => ModelVariant::MajoranaNormal,
            (Mechanism::Majorana, MassOrdering::Inverted) => ModelVariant::MajoranaInverted,
            (Mechanism::Dirac, MassOrdering::Normal) => ModelVariant::DiracNormal,
            (Mechanism::Dirac, MassOrdering::Inverted) => ModelVariant::DiracInverted,
            (Mechanism::Seesaw, MassOrdering::Normal) => ModelVariant::SeesawNormal,
            (Mechanism::Seesaw, MassOrdering::Inverted) => ModelVariant::SeesawInverted,
        }
    }

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            ModelVariant::MajoranaNormal => 0,
            ModelVariant::MajoranaInverted => 1,
            ModelVariant::DiracNormal => 2,
            ModelVariant::DiracInverted => 3,
            ModelVariant::SeesawNormal => 4,
            ModelVariant::SeesawInverted => 5,
        }
    }

    pub fn mechanism(self) -> Mechanism {
        match self {
            ModelVariant::MajoranaNormal | ModelVariant::MajoranaInverted => Mechanism::Majorana,
            ModelVariant::DiracNormal | ModelVariant::DiracInverted => Mechanism::Dirac,
            ModelVariant::SeesawNormal | ModelVariant::SeesawInverted => Mechanism::Seesaw,
        }
    }

    pub fn ordering(self) -> MassOrdering {
        match self {
            ModelVariant::MajoranaNormal
            | ModelVariant::DiracNormal
            | ModelVariant::SeesawNormal => MassOrdering::Normal,
            _ => MassOrdering::Inverted,
        }
    }

    /// Compact code (`M_NO`, `S_IO`, ...) used as a CSV column name.
    pub fn code(self) -> &'static str {
        match self {
            ModelVariant::MajoranaNormal => "M_NO",
            ModelVariant::MajoranaInverted => "M_IO",
            ModelVariant::DiracNormal => "D_NO",
            ModelVariant::DiracInverted => "D_IO",
            ModelVariant::SeesawNormal => "S_NO",
            ModelVariant::SeesawInverted => "S_IO",
        }
    }

    /// Human-readable label for terminal output and legends.
    pub fn display_name(self) -> String {
        format!(
            "{} {}",
            self.mechanism().display_name(),
            self.ordering().short_name()
        )
    }
}

/// Measured mass-squared splittings (eV²) and their 1σ uncertainties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassSplittings {
    pub delta_m21: f64,
    pub delta_m21_sigma: f64,
    /// Atmospheric splitting assuming normal ordering.
    pub delta_m_normal: f64,
    pub delta_m_normal_sigma: f64,
    /// Atmospheric splitting assuming inverted ordering.
    pub delta_m_inverted: f64,
    pub delta_m_inverted_sigma: f64,
}

/// Smallest Σmν allowed by the splittings for one ordering, with propagated error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimalMass {
    pub value: f64,
    pub sigma: f64,
}

/// Best-fit shape constants of one variant (everything except the minimal mass).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeConstants {
    pub normalization: f64,
    pub mean: f64,
    pub sigma: f64,
    pub skewness: f64,
    pub power_amplitude: f64,
    pub power_center: f64,
    pub power_sigma: f64,
    pub power_exponent: f64,
}

/// The ten scalars fed to the prior formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittingParameters {
    pub normalization: f64,
    pub mean: f64,
    pub sigma: f64,
    pub skewness: f64,
    pub power_amplitude: f64,
    pub power_center: f64,
    pub power_sigma: f64,
    pub power_exponent: f64,
    pub minimal_mass: f64,
    pub minimal_mass_sigma: f64,
}

impl FittingParameters {
    pub fn from_shape(shape: ShapeConstants, minimal: MinimalMass) -> Self {
        Self {
            normalization: shape.normalization,
            mean: shape.mean,
            sigma: shape.sigma,
            skewness: shape.skewness,
            power_amplitude: shape.power_amplitude,
            power_center: shape.power_center,
            power_sigma: shape.power_sigma,
            power_exponent: shape.power_exponent,
            minimal_mass: minimal.value,
            minimal_mass_sigma: minimal.sigma,
        }
    }
}

/// Relative Bayesian evidence of a variant, stored as its base-10 logarithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceWeight {
    pub log10: f64,
}

impl EvidenceWeight {
    pub fn value(self) -> f64 {
        10f64.powf(self.log10)
    }
}

/// Normalized ordering weights within one mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureWeights {
    pub normal: f64,
    pub inverted: f64,
}

impl MixtureWeights {
    pub fn for_ordering(&self, ordering: MassOrdering) -> f64 {
        match ordering {
            MassOrdering::Normal => self.normal,
            MassOrdering::Inverted => self.inverted,
        }
    }
}

/// Settings for the tail-probability (confidence bound) computation.
#[derive(Debug, Clone, Copy)]
pub struct BoundsConfig {
    /// Target tail probability `p` in `ccdf(x) = p`.
    pub target: f64,
    pub bracket_lower: f64,
    pub bracket_upper: f64,
    pub quadrature: Quadrature,
    pub solver: Brent,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            target: 1.0 - 0.997,
            bracket_lower: 1e-4,
            bracket_upper: 0.5,
            quadrature: Quadrature::default(),
            solver: Brent::default(),
        }
    }
}

/// A uniform mass grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub x_min: f64,
    pub x_max: f64,
    pub points: usize,
}

/// Settings for the figure/plot commands.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub output_dir: PathBuf,
    pub density_grid: GridSpec,
    pub ccdf_grid: GridSpec,
    pub terminal: bool,
    pub width: usize,
    pub height: usize,
    pub quadrature: Quadrature,
}

/// One named column of a density grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    pub label: String,
    pub values: Vec<f64>,
}

/// Densities tabulated on a shared mass grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityGrid {
    pub mass_ev: Vec<f64>,
    pub columns: Vec<GridColumn>,
}

/// Per-variant entry in a saved prior file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub variant: ModelVariant,
    pub parameters: FittingParameters,
    pub evidence: EvidenceWeight,
}

/// Per-mechanism entry in a saved prior file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureEntry {
    pub mechanism: Mechanism,
    pub weights: MixtureWeights,
}

/// A saved prior file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub splittings: MassSplittings,
    pub minimal_mass_normal: MinimalMass,
    pub minimal_mass_inverted: MinimalMass,
    pub variants: Vec<VariantEntry>,
    pub mixtures: Vec<MixtureEntry>,
    pub grid: DensityGrid,
}
