//! Figure-building steps shared by the CLI commands, the frame renderer and
//! the terminal viewer.
//!
//! Each function builds a complete `Figure` in memory; emitting it (SVG,
//! ASCII, terminal) is up to the caller.

use tracing::info;

use crate::data::{AnalysisResults, resolve};
use crate::domain::{Diagnostics, FigureConfig, FitMode, PowerLawFit, ResultLookup, VarSpec};
use crate::error::AppError;
use crate::fit::{fit, plot_fit};
use crate::plot::{
    AxisLabel, DiagOptions, DiagOutcome, Figure, HistOptions, TickLabels, plot_diag, plot_hst,
    plot_t, pretty, render::write_svg, render_ascii,
};

/// One `plot_hst` panel per variable, stacked, sharing the bottom time axis.
pub fn history_figure(
    diag: &Diagnostics,
    vars: &[String],
    tline: Option<f64>,
    xlabel: Option<&str>,
    size: (u32, u32),
) -> Result<Figure, AppError> {
    let mut figure = Figure::stacked(vars.len(), size);
    let last = vars.len().saturating_sub(1);

    for (i, (ax, var)) in figure.panels.iter_mut().zip(vars).enumerate() {
        let opts = HistOptions {
            tline,
            xlabel: if i == last { xlabel.map(str::to_string) } else { None },
            ..HistOptions::default()
        };
        plot_hst(ax, diag, &VarSpec::named(var.as_str()), &opts)?;
        if i != last {
            ax.set_xticklabels(TickLabels::Hidden);
        }
    }

    Ok(figure)
}

/// One `plot_t` panel per variable inside `range`; only the bottom panel
/// gets tick labels, and only when `xticks` is given.
pub fn range_figure(
    diag: &Diagnostics,
    vars: &[String],
    range: (f64, f64),
    xticks: Option<&[f64]>,
    size: (u32, u32),
) -> Result<Figure, AppError> {
    let time = diag.time()?;
    let mut figure = Figure::stacked(vars.len(), size);
    let last = vars.len().saturating_sub(1);

    for (i, (ax, var)) in figure.panels.iter_mut().zip(vars).enumerate() {
        let values = resolve(diag, var)?;
        let ticks = if i == last { xticks } else { None };
        plot_t(ax, time, &values, range, Some(&pretty(var)), ticks)?;
        ax.legend(Default::default());
    }

    Ok(figure)
}

/// A single `plot_diag` panel. `None` when the variables are unknown.
pub fn diag_figure<R: AnalysisResults + ?Sized>(
    results: &R,
    ivar: &str,
    var: &str,
    opts: &DiagOptions,
    size: (u32, u32),
) -> Result<Option<Figure>, AppError> {
    let mut figure = Figure::stacked(1, size);
    let outcome = plot_diag(
        &mut figure.panels[0],
        results,
        &VarSpec::named(ivar),
        &VarSpec::named(var),
        opts,
    )?;
    Ok((outcome == DiagOutcome::Plotted).then_some(figure))
}

/// Fetch `var(ivar)` (nonzero samples), optionally cut to a window, and fit it.
///
/// Returns the observed samples alongside the fit; `fit.x` holds the
/// matching independent values.
pub fn fit_result<R: AnalysisResults + ?Sized>(
    results: &R,
    ivar: &str,
    var: &str,
    mode: FitMode,
    within: Option<(f64, f64)>,
) -> Result<(Vec<f64>, PowerLawFit), AppError> {
    let ResultLookup::Found { ivar: x, var: y } = results.get_result(ivar, var, true) else {
        return Err(AppError::data(format!(
            "Unknown analysis variables: {var} as function of {ivar}."
        )));
    };

    let (x, y): (Vec<f64>, Vec<f64>) = match within {
        Some((lo, hi)) => x
            .into_iter()
            .zip(y)
            .filter(|(xv, _)| (lo..=hi).contains(xv))
            .unzip(),
        None => (x, y),
    };

    let fitted = fit(&x, &y, mode)?;
    Ok((y, fitted))
}

/// Observed samples plus the fitted curve on one panel (log-log for power laws).
pub fn fit_figure(
    observed: &[f64],
    fitted: &PowerLawFit,
    ivar: &str,
    var: &str,
    size: (u32, u32),
) -> Result<Figure, AppError> {
    let log = fitted.mode == FitMode::Log;
    let opts = DiagOptions {
        logx: log,
        logy: log,
        xlabel: AxisLabel::Text(pretty(ivar)),
        ylabel: Some(pretty(var)),
        ..DiagOptions::default()
    };

    let mut figure = Figure::stacked(1, size);
    let ax = &mut figure.panels[0];
    plot_diag(
        ax,
        &NoResults,
        &VarSpec::Data(fitted.x.clone()),
        &VarSpec::Data(observed.to_vec()),
        &opts,
    )?;
    plot_fit(ax, fitted)?;
    Ok(figure)
}

/// Accessor for plots whose variables are all raw data.
struct NoResults;

impl AnalysisResults for NoResults {
    fn get_result(&self, _ivar: &str, _var: &str, _only_nonzero: bool) -> ResultLookup {
        ResultLookup::NotFound
    }

    fn get_ivar(&self, _ivar: &str) -> Option<Vec<f64>> {
        None
    }
}

/// Write `figure` as SVG, or print one ASCII preview per panel.
pub fn emit(figure: &Figure, config: &FigureConfig) -> Result<(), AppError> {
    match &config.out {
        Some(path) => {
            write_svg(figure, path)?;
            info!(path = %path.display(), panels = figure.panels.len(), "wrote figure");
        }
        None => {
            let (cols, rows) = config.ascii_size;
            for ax in &figure.panels {
                println!("{}", render_ascii(ax, cols, rows));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ResultsFile;
    use crate::plot::Scale;

    fn diag() -> Diagnostics {
        Diagnostics::new()
            .with("time", vec![0.0, 5000.0, 7500.0, 10000.0])
            .with("Mdot", vec![-4.0, -9.0, 0.0, -16.0])
            .with("Phi_EH", vec![2.0, 6.0, 8.0, 8.0])
    }

    fn results() -> ResultsFile {
        let mut res = ResultsFile::new();
        let r = vec![1.0, 2.0, 4.0, 8.0];
        let rho = r.iter().map(|v: &f64| 3.0 * v.powf(-1.5)).collect();
        res.insert_ivar("r", r);
        res.insert_var("r", "rho", rho);
        res
    }

    #[test]
    fn history_panels_share_the_bottom_axis() {
        let vars = vec!["mdot".to_string(), "phi_b".to_string()];
        let figure = history_figure(&diag(), &vars, Some(5000.0), Some("t"), (400, 600)).unwrap();

        assert_eq!(figure.panels.len(), 2);
        assert_eq!(figure.panels[0].xticks, TickLabels::Hidden);
        assert_eq!(figure.panels[0].xlabel, None);
        assert_eq!(figure.panels[1].xticks, TickLabels::Auto);
        assert_eq!(figure.panels[1].xlabel.as_deref(), Some("t"));
        assert!(figure.panels.iter().all(|ax| ax.vlines.len() == 1));
    }

    #[test]
    fn range_panels_drop_zero_samples() {
        let vars = vec!["Mdot".to_string()];
        let figure = range_figure(&diag(), &vars, (5000.0, 10000.0), Some(&[6000.0]), (400, 300))
            .unwrap();
        let ax = &figure.panels[0];
        assert_eq!(ax.lines[0].x, vec![0.0, 5000.0, 10000.0]);
        assert_eq!(ax.lines[0].label.as_deref(), Some("Ṁ"));
        assert_eq!(ax.xticks, TickLabels::Custom(vec![(6000.0, "6000".to_string())]));
    }

    #[test]
    fn unknown_diag_variables_give_no_figure() {
        let figure = diag_figure(&results(), "th", "rho", &DiagOptions::default(), (400, 300))
            .unwrap();
        assert!(figure.is_none());
        let figure = diag_figure(&results(), "r", "rho", &DiagOptions::default(), (400, 300))
            .unwrap();
        assert!(figure.is_some());
    }

    #[test]
    fn power_law_fit_and_figure() {
        let (observed, fitted) = fit_result(&results(), "r", "rho", FitMode::Log, None).unwrap();
        assert!((fitted.exponent() + 1.5).abs() < 1e-9);
        assert!((fitted.coefficient() - 3.0).abs() < 1e-9);
        assert_eq!(observed.len(), 4);

        let figure = fit_figure(&observed, &fitted, "r", "rho", (400, 300)).unwrap();
        let ax = &figure.panels[0];
        assert_eq!(ax.lines.len(), 2);
        assert_eq!(ax.lines[1].label.as_deref(), Some(fitted.label.as_str()));
        assert_eq!(ax.xscale, Scale::Log);
        assert_eq!(ax.yscale, Scale::Log);
        assert_eq!(ax.xlabel.as_deref(), Some("r"));
        assert_eq!(ax.ylabel.as_deref(), Some("ρ"));
    }

    #[test]
    fn fit_window_and_unknown_variables() {
        let (_, fitted) =
            fit_result(&results(), "r", "rho", FitMode::Log, Some((2.0, 8.0))).unwrap();
        assert_eq!(fitted.x, vec![2.0, 4.0, 8.0]);

        let err = fit_result(&results(), "r", "Pg", FitMode::Log, None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
