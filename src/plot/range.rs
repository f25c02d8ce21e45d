//! Range-restricted traces.
//!
//! Tick labels are off unless asked for, since these panels are usually
//! stacked above a shared time axis.

use crate::data::nonzero_pairs;
use crate::error::AppError;
use crate::plot::{Axes, LineStyle, TickLabels};
use crate::report::fmt_g;

/// Default window for `plot_t`, in simulation time.
pub const DEFAULT_T_RANGE: (f64, f64) = (5000.0, 10000.0);

/// Plot the nonzero samples of `var` against `ivar` inside `range`.
pub fn plot_t(
    ax: &mut Axes,
    ivar: &[f64],
    var: &[f64],
    range: (f64, f64),
    label: Option<&str>,
    xticks: Option<&[f64]>,
) -> Result<(), AppError> {
    if ivar.len() != var.len() {
        return Err(AppError::data(format!(
            "ivar and var must have the same length, got {} and {}.",
            ivar.len(),
            var.len()
        )));
    }

    let (x, y) = nonzero_pairs(ivar, var);
    ax.plot(x, y, label.map(str::to_string), LineStyle::default())?;
    ax.set_xlim(range.0, range.1);

    match xticks {
        None => ax.set_xticklabels(TickLabels::Hidden),
        Some(ticks) => ax.set_xticklabels(TickLabels::Custom(
            ticks.iter().map(|&t| (t, fmt_g(t, 6))).collect(),
        )),
    }

    Ok(())
}
