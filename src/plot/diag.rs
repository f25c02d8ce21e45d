//! Analysis-variable plots for movie frames.
//!
//! One dependent variable against an independent one, both optionally
//! resolved by name through an [`AnalysisResults`] accessor. Unknown names
//! are not an error here: a frame with a missing panel is still useful, so
//! the panel is skipped with a warning.

use tracing::warn;

use crate::data::AnalysisResults;
use crate::domain::{ResultLookup, VarSpec};
use crate::error::AppError;
use crate::plot::{Axes, LineStyle, MARKER_RED, Scale, TickLabels, pretty};

/// X axis label policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AxisLabel {
    /// No label and no tick labels (panel sits above another one).
    #[default]
    Hidden,
    /// Prettified independent-variable name, when it is known.
    FromName,
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagOptions {
    pub tline: Option<f64>,
    pub ylabel: Option<String>,
    pub ylim: Option<(f64, f64)>,
    pub logy: bool,
    pub xlabel: AxisLabel,
    pub xlim: Option<(f64, f64)>,
    pub logx: bool,
    /// Drop samples where the dependent variable is exactly zero.
    pub only_nonzero: bool,
    pub style: LineStyle,
}

impl Default for DiagOptions {
    fn default() -> Self {
        Self {
            tline: None,
            ylabel: None,
            ylim: None,
            logy: false,
            xlabel: AxisLabel::Hidden,
            xlim: None,
            logx: false,
            only_nonzero: true,
            style: LineStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagOutcome {
    Plotted,
    /// A variable could not be resolved; nothing was drawn.
    Skipped,
}

/// Plot `var` as a function of `ivar`.
///
/// Returns an error only for unplottable resolved data (empty or
/// mismatched arrays); unknown variables yield [`DiagOutcome::Skipped`].
pub fn plot_diag<R: AnalysisResults + ?Sized>(
    ax: &mut Axes,
    results: &R,
    ivar: &VarSpec,
    var: &VarSpec,
    opts: &DiagOptions,
) -> Result<DiagOutcome, AppError> {
    let (resolved, ivarname, varname) = match (ivar, var) {
        (VarSpec::Named(i), VarSpec::Named(v)) => {
            let found = match results.get_result(i, v, opts.only_nonzero) {
                ResultLookup::Found { ivar, var } => Some((ivar, var)),
                ResultLookup::NotFound => None,
            };
            (found, Some(i.as_str()), Some(v.as_str()))
        }
        (VarSpec::Named(i), VarSpec::Data(v)) => {
            (results.get_ivar(i).map(|iv| (iv, v.clone())), Some(i.as_str()), None)
        }
        (VarSpec::Data(i), VarSpec::Data(v)) => (Some((i.clone(), v.clone())), None, None),
        // The accessor has no dependent-only fetch.
        (VarSpec::Data(_), VarSpec::Named(v)) => (None, None, Some(v.as_str())),
    };

    let Some((ivar, var)) = resolved else {
        warn!(
            "Not plotting unknown analysis variables: {} as function of {}",
            varname.unwrap_or("None"),
            ivarname.unwrap_or("None")
        );
        return Ok(DiagOutcome::Skipped);
    };

    let (Some(&x0), Some(&x1)) = (ivar.first(), ivar.last()) else {
        return Err(AppError::data(format!(
            "No samples to plot for {} as function of {}.",
            varname.unwrap_or("data"),
            ivarname.unwrap_or("data")
        )));
    };

    ax.plot(ivar, var, None, opts.style)?;

    if let Some(t) = opts.tline {
        ax.axvline(t, MARKER_RED);
    }

    if let Some(ylabel) = &opts.ylabel {
        ax.set_ylabel(ylabel.clone());
    } else if let Some(name) = varname {
        ax.set_ylabel(pretty(name));
    }

    if let Some((lo, hi)) = opts.ylim {
        ax.set_ylim(lo, hi);
    }
    if opts.logy {
        ax.set_yscale(Scale::Log);
    }

    match &opts.xlabel {
        AxisLabel::FromName => {
            if let Some(name) = ivarname {
                ax.set_xlabel(pretty(name));
            }
        }
        AxisLabel::Hidden => ax.set_xticklabels(TickLabels::Hidden),
        AxisLabel::Text(text) => ax.set_xlabel(text.clone()),
    }

    let (lo, hi) = opts.xlim.unwrap_or((x0, x1));
    ax.set_xlim(lo, hi);
    if opts.logx {
        ax.set_xscale(Scale::Log);
    }

    Ok(DiagOutcome::Plotted)
}
