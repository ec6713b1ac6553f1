//! Command-line parsing for the neutrino mass prior tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the formula/integration code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Mechanism, ModelVariant};
use crate::math::Quadrature;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nuprior",
    version,
    about = "Priors on the sum of neutrino masses (Majorana, Dirac, Seesaw)"
)]
pub struct Cli {
    /// Log verbosity (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value_t = tracing::Level::WARN)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print minimal masses, fitting parameters, evidences and ordering weights.
    Params,
    /// Evaluate a density (one variant) or an ordering mixture (one mechanism).
    Eval(EvalArgs),
    /// Integrate every variant over [0, 1] and [0, inf).
    Norm(NormArgs),
    /// Solve the upper bound on the mass sum for every variant.
    Bounds(BoundsArgs),
    /// Render the standard figures (SVG, or ASCII with --terminal).
    Plot(PlotArgs),
    /// Export the density grid to CSV and/or the full prior description to JSON.
    Export(ExportArgs),
    /// Draw samples of the mass sum from one variant.
    Sample(SampleArgs),
    /// Plot the density grid stored in a prior JSON file.
    Show(ShowArgs),
}

/// Quadrature tolerances shared by every command that integrates.
#[derive(Debug, Clone, Copy, Args)]
pub struct QuadArgs {
    /// Absolute tolerance of the adaptive quadrature.
    #[arg(long, default_value_t = 1e-10)]
    pub abs_tol: f64,

    /// Relative tolerance of the adaptive quadrature.
    #[arg(long, default_value_t = 1e-10)]
    pub rel_tol: f64,

    /// Maximum number of subintervals per integral.
    #[arg(long, default_value_t = 200)]
    pub max_segments: usize,
}

impl QuadArgs {
    pub fn quadrature(&self) -> Quadrature {
        Quadrature {
            abs_tol: self.abs_tol,
            rel_tol: self.rel_tol,
            max_segments: self.max_segments,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct EvalArgs {
    /// Masses (eV) to evaluate at.
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub masses: Vec<f64>,

    /// Evaluate a single variant.
    #[arg(long, value_enum, conflicts_with = "mechanism")]
    pub variant: Option<ModelVariant>,

    /// Evaluate the ordering mixture of a mechanism.
    #[arg(long, value_enum)]
    pub mechanism: Option<Mechanism>,
}

#[derive(Debug, Clone, Args)]
pub struct NormArgs {
    #[command(flatten)]
    pub quad: QuadArgs,
}

#[derive(Debug, Clone, Args)]
pub struct BoundsArgs {
    /// Tail probability p in ccdf(x) = p.
    #[arg(long, default_value_t = 0.003)]
    pub target: f64,

    /// Lower end of the search bracket (eV).
    #[arg(long, default_value_t = 1e-4)]
    pub lower: f64,

    /// Upper end of the search bracket (eV).
    #[arg(long, default_value_t = 0.5)]
    pub upper: f64,

    /// Maximum root-finder iterations.
    #[arg(long, default_value_t = 100)]
    pub max_iter: usize,

    #[command(flatten)]
    pub quad: QuadArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PlotArgs {
    /// Output directory for SVG files (overrides NUPRIOR_OUTPUT_DIR).
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Grid points per curve.
    #[arg(long, default_value_t = 1000)]
    pub points: usize,

    /// Largest mass on the x-axis (eV).
    #[arg(long, default_value_t = 0.3)]
    pub x_max: f64,

    /// Smallest mass on the CCDF x-axis (eV).
    #[arg(long, default_value_t = 1e-4)]
    pub ccdf_min: f64,

    /// Draw ASCII plots in the terminal instead of writing files.
    #[arg(long)]
    pub terminal: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    #[command(flatten)]
    pub quad: QuadArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Write the density grid to this CSV file.
    #[arg(long, value_name = "CSV")]
    pub csv: Option<PathBuf>,

    /// Write the full prior description to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,

    /// Grid points.
    #[arg(long, default_value_t = 301)]
    pub points: usize,

    /// Largest mass in the grid (eV).
    #[arg(long, default_value_t = 0.3)]
    pub x_max: f64,
}

#[derive(Debug, Clone, Args)]
pub struct SampleArgs {
    /// Variant to sample from.
    #[arg(long, value_enum)]
    pub variant: ModelVariant,

    /// Number of draws.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Upper end of the tabulated support (eV).
    #[arg(long, default_value_t = 1.0)]
    pub upper: f64,

    /// Number of cells in the cumulative table.
    #[arg(long, default_value_t = 4000)]
    pub cells: usize,

    /// Write the draws to CSV instead of printing a summary.
    #[arg(long, value_name = "CSV")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Prior JSON file produced by `nuprior export --json`.
    #[arg(long, value_name = "JSON")]
    pub from: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
