//! History traces: one diagnostics variable against simulation time.

use crate::data::resolve;
use crate::domain::{Diagnostics, VarSpec};
use crate::error::AppError;
use crate::plot::{Axes, LegendLoc, LineStyle, MARKER_RED, TickLabels, pretty};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistOptions {
    /// Reference time marked with a vertical line.
    pub tline: Option<f64>,
    /// Replaces the x tick labels.
    pub xticklabels: Option<Vec<(f64, String)>>,
    pub xlabel: Option<String>,
    pub style: LineStyle,
}

/// Plot `var` against `diag["time"]`.
///
/// Named variables go through the derived-variable registry first
/// (`mdot`, `phi_b`, ...), then the raw diagnostics.
pub fn plot_hst(
    ax: &mut Axes,
    diag: &Diagnostics,
    var: &VarSpec,
    opts: &HistOptions,
) -> Result<(), AppError> {
    let (values, name) = match var {
        VarSpec::Named(name) => (resolve(diag, name)?, name.as_str()),
        VarSpec::Data(values) => (values.clone(), ""),
    };

    let time = diag.time()?;
    let (Some(&t0), Some(&t1)) = (time.first(), time.last()) else {
        return Err(AppError::data("Diagnostics time series is empty."));
    };

    let label = Some(pretty(name)).filter(|l| !l.is_empty());
    ax.plot(time.to_vec(), values, label, opts.style)?;
    if let Some(t) = opts.tline {
        ax.axvline(t, MARKER_RED);
    }
    ax.legend(LegendLoc::UpperLeft);
    ax.grid(true);
    ax.set_xlim(t0, t1);

    if let Some(ticks) = &opts.xticklabels {
        ax.set_xticklabels(TickLabels::Custom(ticks.clone()));
    }
    if let Some(xlabel) = &opts.xlabel {
        ax.set_xlabel(xlabel.clone());
    }

    Ok(())
}
