//! Power-law and linear fits to analysis arrays.
//!
//! - `fit` performs the regression and builds the display label
//! - `plot_fit` overlays the fitted curve on a plotting surface

pub mod power_law;

pub use power_law::*;
