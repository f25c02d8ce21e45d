//! Text reports for fits and datasets.
//!
//! Formatting lives here so the fitting and plotting code stays free of
//! presentation details.

use crate::domain::{Diagnostics, FitMode, PowerLawFit};

pub mod format;

pub use format::*;

/// Summary block printed by `hplot fit`.
pub fn format_fit_summary(fit: &PowerLawFit, ivar: &str, var: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== hplot fit: {var} vs {ivar} ===\n"));
    out.push_str(&format!("Mode: {:?}\n", fit.mode));
    out.push_str(&format!("Points: n={}", fit.x.len()));
    if let (Some(first), Some(last)) = (fit.x.first(), fit.x.last()) {
        out.push_str(&format!(" | {ivar}={}", fmt_range((*first, *last))));
    }
    out.push('\n');

    match fit.mode {
        FitMode::Log => {
            out.push_str(&format!("- coefficient: {}\n", fmt_g(fit.coefficient(), 6)));
            out.push_str(&format!("- exponent   : {}\n", fmt_g(fit.exponent(), 6)));
        }
        FitMode::Linear => {
            out.push_str(&format!("- slope      : {}\n", fmt_g(fit.slope, 6)));
            out.push_str(&format!("- intercept  : {}\n", fmt_g(fit.intercept, 6)));
        }
    }
    out.push_str(&format!("Label: {}\n", fit.label));

    out
}

/// One line per diagnostics series: name, length and value range.
pub fn format_diagnostics_listing(diag: &Diagnostics) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:>8} {:>28}\n", "name", "n", "range").trim_end().to_string());
    out.push('\n');

    for name in diag.names() {
        let Ok(values) = diag.get(name) else {
            continue;
        };
        let range = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            });
        let range = range.map(fmt_range).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("{name:<16} {:>8} {range:>28}", values.len()).trim_end().to_string());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_summary_mentions_coefficients() {
        let fit = PowerLawFit {
            x: vec![1.0, 10.0],
            y: vec![2.0, 20.0],
            label: "2 * x^1".to_string(),
            slope: 1.0,
            intercept: 2f64.ln(),
            mode: FitMode::Log,
        };
        let txt = format_fit_summary(&fit, "r", "rho");
        assert!(txt.contains("rho vs r"));
        assert!(txt.contains("Points: n=2 | r=[1, 10]"));
        assert!(txt.contains("- coefficient: 2\n"));
        assert!(txt.contains("- exponent   : 1\n"));
    }

    #[test]
    fn listing_reports_each_series() {
        let diag = Diagnostics::new()
            .with("time", vec![0.0, 10.0])
            .with("Mdot", vec![-3.0, 2.0]);
        let txt = format_diagnostics_listing(&diag);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Mdot"));
        assert!(lines[1].ends_with("[-3, 2]"));
        assert!(lines[2].starts_with("time"));
    }
}
