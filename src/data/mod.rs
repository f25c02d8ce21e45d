//! Data sources for the plot helpers.
//!
//! - `registry`: variables derived from a diagnostics set
//! - `results`: the analysis-results accessor contract and a file-backed implementation
//! - `synthetic`: seeded synthetic datasets for demos and tests

pub mod registry;
pub mod results;
pub mod synthetic;

pub use registry::*;
pub use results::*;
pub use synthetic::*;

/// Keep the positions where `var` is nonzero, in order, in both arrays.
///
/// Exact comparison with `0.0`: samples an analysis pass never filled are
/// written as zeros.
pub fn nonzero_pairs(ivar: &[f64], var: &[f64]) -> (Vec<f64>, Vec<f64>) {
    ivar.iter()
        .zip(var)
        .filter(|&(_, &v)| v != 0.0)
        .map(|(&i, &v)| (i, v))
        .unzip()
}
