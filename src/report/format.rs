//! Terminal formatting for parameter tables, normalization checks and bounds.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::{BoundRow, NormalizationRow};
use crate::domain::{MassOrdering, Mechanism, ModelVariant};
use crate::models::{PDG_2016, evidence, fitting_parameters, minimal_mass, mixture_weights};

/// Minimal masses, the six parameter tuples, evidences and mixture weights.
pub fn format_parameters() -> String {
    let mut out = String::new();

    out.push_str("=== nuprior - Neutrino mass priors ===\n");
    out.push_str(&format!(
        "Splittings (eV^2): dm21={:.3e}±{:.2e} | dm(NO)={:.3e}±{:.2e} | dm(IO)={:.3e}±{:.2e}\n",
        PDG_2016.delta_m21,
        PDG_2016.delta_m21_sigma,
        PDG_2016.delta_m_normal,
        PDG_2016.delta_m_normal_sigma,
        PDG_2016.delta_m_inverted,
        PDG_2016.delta_m_inverted_sigma,
    ));
    for ordering in MassOrdering::ALL {
        let m = minimal_mass(&PDG_2016, ordering);
        out.push_str(&format!(
            "Minimal mass {}: {:.6} ± {:.6} eV\n",
            ordering.short_name(),
            m.value,
            m.sigma
        ));
    }

    out.push_str("\nFitting parameters:\n");
    out.push_str(
        format!(
            "{:<12} {:>11} {:>9} {:>9} {:>10} {:>11} {:>8} {:>9} {:>5} {:>9}\n",
            "variant", "norm", "mean", "sigma", "skew", "p_amp", "p_mean", "p_sigma", "p_exp", "log10 E"
        )
        .trim_end(),
    );
    out.push('\n');
    for v in ModelVariant::ALL {
        let p = fitting_parameters(v);
        out.push_str(
            format!(
                "{:<12} {:>11.4e} {:>9.4} {:>9.5} {:>10.6} {:>11.4e} {:>8.5} {:>9.6} {:>5} {:>9.4}\n",
                v.display_name(),
                p.normalization,
                p.mean,
                p.sigma,
                p.skewness,
                p.power_amplitude,
                p.power_center,
                p.power_sigma,
                p.power_exponent,
                evidence(v).log10,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out.push_str("\nOrdering weights:\n");
    for m in Mechanism::ALL {
        let w = mixture_weights(m);
        out.push_str(&format!(
            "{:<9} w_NO={:.6} w_IO={:.6}\n",
            m.display_name(),
            w.normal,
            w.inverted
        ));
    }

    out
}

/// Integrals over `[0, 1]` and `[0, ∞)` for every variant.
pub fn format_normalization(rows: &[NormalizationRow]) -> String {
    let mut out = String::new();
    out.push_str("Normalization of the fitting functions:\n");
    out.push_str(&format!("{:<12} {:>22} {:>22}\n", "variant", "[0, 1]", "[0, inf)"));
    out.push_str(&format!("{:-<12} {:-<22} {:-<22}\n", "", "", ""));
    for row in rows {
        out.push_str(
            format!(
                "{:<12} {:>22} {:>22}\n",
                row.variant.display_name(),
                fmt_integral(&row.to_one),
                fmt_integral(&row.to_infinity),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Confidence bounds rounded for reporting (two decimals, eV).
pub fn format_bounds(rows: &[BoundRow], target: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Upper bounds on the neutrino mass sum (tail probability {target}, {:.1}% one-sided):\n",
        (1.0 - target) * 100.0
    ));
    for row in rows {
        let value = match &row.result {
            Ok(b) => format!("{:.2}", b.mass),
            Err(e) => format!("n/a ({e})"),
        };
        out.push_str(&format!("{:<12}: {value}\n", row.variant.display_name()));
    }
    out
}

/// Point evaluations as a table: one row per mass, one column per label.
pub fn format_evaluations(masses: &[f64], columns: &[(String, Vec<f64>)]) -> String {
    let mut out = String::new();
    let mut header = format!("{:>10}", "mass_ev");
    for (label, _) in columns {
        header.push_str(&format!(" {label:>14}"));
    }
    out.push_str(&header);
    out.push('\n');

    for (i, x) in masses.iter().enumerate() {
        let mut line = format!("{x:>10.5}");
        for (_, values) in columns {
            line.push_str(&format!(" {:>14.6e}", values[i]));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn fmt_integral(r: &Result<crate::math::Integral, crate::error::NumericError>) -> String {
    match r {
        Ok(i) => format!("{:.8} (±{:.1e})", i.value, i.abs_error),
        Err(e) => format!("n/a ({e})"),
    }
}
