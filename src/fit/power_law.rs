//! Degree-1 fits in linear or log-log space.
//!
//! In log mode the regression is done on `ln x`, `ln y`, so a straight line
//! `ln y = k ln x + ln c` corresponds to the power law `y = c x^k`.

use tracing::debug;

use crate::domain::{FitMode, PowerLawFit};
use crate::error::AppError;
use crate::math::polyfit1;
use crate::plot::{Axes, LegendLoc, LineStyle, Rgb};
use crate::report::fmt_g;

/// Fitted curves are drawn in black over the palette-coloured data.
const FIT_COLOR: Rgb = Rgb(0, 0, 0);

/// Fit `y` against `x` and evaluate the fit at the original `x` samples.
pub fn fit(x: &[f64], y: &[f64], mode: FitMode) -> Result<PowerLawFit, AppError> {
    if x.len() != y.len() {
        return Err(AppError::data(format!(
            "Cannot fit arrays of different lengths ({} vs {}).",
            x.len(),
            y.len()
        )));
    }

    let (slope, intercept) = match mode {
        FitMode::Log => {
            let lx: Vec<f64> = x.iter().map(|v| v.ln()).collect();
            let ly: Vec<f64> = y.iter().map(|v| v.ln()).collect();
            if lx.iter().chain(ly.iter()).any(|v| !v.is_finite()) {
                return Err(AppError::numeric(
                    "Log-log fit needs strictly positive, finite samples.",
                ));
            }
            polyfit1(&lx, &ly)
        }
        FitMode::Linear => polyfit1(x, y),
    }
    .ok_or_else(|| AppError::numeric(format!("Degenerate {mode:?} fit over {} samples.", x.len())))?;

    let label = match mode {
        FitMode::Log => format!("{} * x^{}", fmt_g(intercept.exp(), 2), fmt_g(slope, 2)),
        FitMode::Linear => format!("{:>2}*x + {:>2}", fmt_g(slope, 6), fmt_g(intercept, 6)),
    };
    debug!(?mode, slope, intercept, n = x.len(), "fitted line");

    let mut out = PowerLawFit {
        x: x.to_vec(),
        y: Vec::new(),
        label,
        slope,
        intercept,
        mode,
    };
    out.y = x.iter().map(|&v| out.eval(v)).collect();
    Ok(out)
}

/// Draw a fit on `ax` as a labelled curve and enable the legend.
pub fn plot_fit(ax: &mut Axes, fit: &PowerLawFit) -> Result<(), AppError> {
    let style = LineStyle {
        color: Some(FIT_COLOR),
        width: 2,
    };
    ax.plot(fit.x.clone(), fit.y.clone(), Some(fit.label.clone()), style)?;
    ax.legend(LegendLoc::default());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_fit_recovers_power_law() {
        let x: Vec<f64> = (1..=20).map(|i| i as f64 * 2.5).collect();
        let y: Vec<f64> = x.iter().map(|v| 3.2 * v.powf(-1.5)).collect();

        let f = fit(&x, &y, FitMode::Log).unwrap();
        assert!((f.coefficient() - 3.2).abs() < 1e-9, "c = {}", f.coefficient());
        assert!((f.exponent() + 1.5).abs() < 1e-9, "k = {}", f.exponent());
        assert_eq!(f.x, x);
        for (fitted, expected) in f.y.iter().zip(&y) {
            assert!((fitted - expected).abs() < 1e-9 * expected.abs().max(1.0));
        }
        assert_eq!(f.label, "3.2 * x^-1.5");
    }

    #[test]
    fn linear_fit_recovers_line() {
        let x = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 3.0).collect();

        let f = fit(&x, &y, FitMode::Linear).unwrap();
        assert!((f.slope - 2.0).abs() < 1e-10);
        assert!((f.intercept - 3.0).abs() < 1e-10);
        assert_eq!(f.label, " 2*x +  3");
    }

    #[test]
    fn linear_fit_on_tiny_abscissae() {
        let x = [1e-13, 2e-13, 3e-13, 4e-13];
        let y: Vec<f64> = x.iter().map(|v| 2e12 * v + 1.0).collect();

        let f = fit(&x, &y, FitMode::Linear).unwrap();
        assert!((f.slope / 2e12 - 1.0).abs() < 1e-9, "m = {}", f.slope);
        assert!((f.intercept - 1.0).abs() < 1e-9, "b = {}", f.intercept);
        assert_eq!(f.label, "2e+12*x +  1");
    }

    #[test]
    fn log_fit_rejects_non_positive_samples() {
        let err = fit(&[1.0, 2.0, 3.0], &[1.0, 0.0, 2.0], FitMode::Log).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        assert!(fit(&[1.0, 2.0], &[1.0], FitMode::Linear).is_err());
    }

    #[test]
    fn plot_fit_adds_labelled_curve() {
        let f = fit(&[1.0, 2.0], &[1.0, 2.0], FitMode::Linear).unwrap();
        let mut ax = Axes::new();
        plot_fit(&mut ax, &f).unwrap();
        assert_eq!(ax.lines.len(), 1);
        assert_eq!(ax.lines[0].label.as_deref(), Some(f.label.as_str()));
        assert!(ax.legend.is_some());
    }
}
