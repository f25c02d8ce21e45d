//! Mathematical utilities: least squares and degree-1 polynomial fits.

pub mod ols;
pub mod polyfit;

pub use ols::*;
pub use polyfit::*;
