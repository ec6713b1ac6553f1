//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs the log subscriber
//! - turns flags into solver/plot configurations
//! - runs the shared pipeline
//! - prints reports/plots or writes files

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{
    BoundsArgs, Cli, Command, EvalArgs, ExportArgs, NormArgs, PlotArgs, SampleArgs, ShowArgs,
};
use crate::config::Settings;
use crate::dist::{InverseCdfSampler, OrderingMixture};
use crate::domain::{BoundsConfig, GridSpec, ModelVariant, PlotConfig};
use crate::error::AppError;
use crate::math::{Brent, Quadrature};
use crate::models::Curve;

pub mod pipeline;

/// Entry point for the `nuprior` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Params => {
            println!("{}", crate::report::format_parameters());
            Ok(())
        }
        Command::Eval(args) => handle_eval(args),
        Command::Norm(args) => handle_norm(args),
        Command::Bounds(args) => handle_bounds(args),
        Command::Plot(args) => handle_plot(args),
        Command::Export(args) => handle_export(args),
        Command::Sample(args) => handle_sample(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let columns: Vec<(String, Vec<f64>)> = match (args.variant, args.mechanism) {
        (Some(v), _) => {
            let values = Curve::for_variant(v).eval_many(&args.masses);
            vec![(v.code().to_string(), values)]
        }
        (None, Some(m)) => {
            let mix = OrderingMixture::new(m);
            vec![(
                pipeline::mixture_label(m),
                args.masses.iter().map(|&x| mix.eval(x)).collect(),
            )]
        }
        (None, None) => ModelVariant::ALL
            .iter()
            .map(|&v| (v.code().to_string(), Curve::for_variant(v).eval_many(&args.masses)))
            .collect(),
    };
    println!("{}", crate::report::format_evaluations(&args.masses, &columns));
    Ok(())
}

fn handle_norm(args: NormArgs) -> Result<(), AppError> {
    let rows = pipeline::run_normalization(&args.quad.quadrature());
    println!("{}", crate::report::format_normalization(&rows));
    normalization_status(&rows)
}

fn normalization_status(rows: &[pipeline::NormalizationRow]) -> Result<(), AppError> {
    if rows.iter().all(|r| !r.is_ok()) {
        return Err(AppError::new(4, "No variant could be normalized."));
    }
    Ok(())
}

fn handle_bounds(args: BoundsArgs) -> Result<(), AppError> {
    let config = bounds_config_from_args(&args);
    let rows = pipeline::run_bounds(&config);
    println!("{}", crate::report::format_bounds(&rows, config.target));

    if rows.iter().all(|r| r.result.is_err()) {
        return Err(AppError::new(4, "No confidence bound could be solved."));
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let config = plot_config_from_args(&args, Settings::from_env());
    debug!(?config, "plot configuration");

    let panels = crate::plot::figure_panels(&config)?;
    if config.terminal {
        print!(
            "{}",
            crate::plot::render_terminal(&panels, config.width, config.height)
        );
        return Ok(());
    }

    let written = crate::plot::write_figures(&config.output_dir, &panels, (1024, 768))?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    if args.csv.is_none() && args.json.is_none() {
        return Err(AppError::new(2, "Nothing to export: pass --csv and/or --json."));
    }

    let grid = pipeline::density_grid(GridSpec {
        x_min: 0.0,
        x_max: args.x_max,
        points: args.points,
    })?;

    if let Some(path) = &args.csv {
        crate::io::write_grid_csv(path, &grid)?;
        info!(path = %path.display(), "wrote density grid");
    }
    if let Some(path) = &args.json {
        let prior = pipeline::build_prior_file(grid);
        crate::io::write_prior_json(path, &prior)?;
        info!(path = %path.display(), "wrote prior file");
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    if args.count == 0 {
        return Err(AppError::new(2, "Sample count must be at least 1."));
    }
    let curve = Curve::for_variant(args.variant);
    let sampler = InverseCdfSampler::new(&curve, args.upper, args.cells, Quadrature::default())?;
    let draws = sampler.draw(args.count, args.seed);
    info!(
        variant = args.variant.code(),
        count = draws.len(),
        tail_mass = sampler.tail_mass(),
        "drew samples"
    );

    if let Some(path) = &args.out {
        crate::io::write_samples_csv(path, args.variant, args.seed, &draws)?;
        println!("{}", path.display());
        return Ok(());
    }

    let mean = draws.iter().sum::<f64>() / draws.len() as f64;
    let mut sorted = draws.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];
    println!(
        "{}: n={} seed={} mean={mean:.5} eV median={median:.5} eV min={:.5} eV max={:.5} eV (mass above {} eV: {:.2e})",
        args.variant.display_name(),
        draws.len(),
        args.seed,
        sorted[0],
        sorted[sorted.len() - 1],
        args.upper,
        sampler.tail_mass(),
    );
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let prior = crate::io::read_prior_json(&args.from)?;
    debug!(tool = %prior.tool, generated_at = %prior.generated_at, "loaded prior file");

    let series = crate::plot::grid_series(&prior.grid);
    println!(
        "{}",
        crate::plot::render_ascii_plot(&series, args.width, args.height, false)
    );
    Ok(())
}

pub fn bounds_config_from_args(args: &BoundsArgs) -> BoundsConfig {
    BoundsConfig {
        target: args.target,
        bracket_lower: args.lower,
        bracket_upper: args.upper,
        quadrature: args.quad.quadrature(),
        solver: Brent {
            max_iter: args.max_iter,
            ..Brent::default()
        },
    }
}

pub fn plot_config_from_args(args: &PlotArgs, settings: Settings) -> PlotConfig {
    PlotConfig {
        output_dir: args.outdir.clone().unwrap_or(settings.output_dir),
        density_grid: GridSpec {
            x_min: 0.0,
            x_max: args.x_max,
            points: args.points,
        },
        ccdf_grid: GridSpec {
            x_min: args.ccdf_min,
            x_max: args.x_max,
            points: args.points,
        },
        terminal: args.terminal,
        width: args.width,
        height: args.height,
        quadrature: args.quad.quadrature(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(argv: &[&str]) -> Command {
        Cli::try_parse_from(argv.iter().copied()).unwrap().command
    }

    #[test]
    fn outdir_flag_overrides_environment() {
        let Command::Plot(args) = parse(&["nuprior", "plot", "--outdir", "figs"]) else {
            panic!("expected plot");
        };
        let settings = Settings {
            output_dir: PathBuf::from("./results"),
        };
        let config = plot_config_from_args(&args, settings.clone());
        assert_eq!(config.output_dir, PathBuf::from("figs"));
        assert_eq!(config.density_grid.points, 1000);
        assert_eq!(config.ccdf_grid.x_min, 1e-4);

        let Command::Plot(args) = parse(&["nuprior", "plot"]) else {
            panic!("expected plot");
        };
        assert_eq!(
            plot_config_from_args(&args, settings).output_dir,
            PathBuf::from("./results")
        );
    }

    #[test]
    fn bounds_flags_map_to_config() {
        let Command::Bounds(args) = parse(&[
            "nuprior",
            "bounds",
            "--target",
            "0.05",
            "--upper",
            "1.0",
            "--max-iter",
            "50",
        ]) else {
            panic!("expected bounds");
        };
        let config = bounds_config_from_args(&args);
        assert_eq!(config.target, 0.05);
        assert_eq!(config.bracket_lower, 1e-4);
        assert_eq!(config.bracket_upper, 1.0);
        assert_eq!(config.solver.max_iter, 50);
        assert_eq!(config.solver.xtol, Brent::default().xtol);
    }

    #[test]
    fn norm_fails_only_when_every_row_fails() {
        use crate::error::NumericError;
        use pipeline::NormalizationRow;

        let failed = |variant| NormalizationRow {
            variant,
            to_one: Err(NumericError::NonFinite { at: 0.5 }),
            to_infinity: Err(NumericError::NonFinite { at: 0.5 }),
        };
        let mut rows: Vec<_> = ModelVariant::ALL.into_iter().map(failed).collect();
        let err = normalization_status(&rows).unwrap_err();
        assert_eq!(err.exit_code(), 4);

        rows[2] = pipeline::run_normalization(&Quadrature::default()).swap_remove(2);
        assert_eq!(rows[2].variant, ModelVariant::DiracNormal);
        assert!(rows[2].is_ok());
        assert!(normalization_status(&rows).is_ok());
    }
}
