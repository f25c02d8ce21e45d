//! Variables derived from a diagnostics set.
//!
//! The table is fixed at compile time and only ever read.

use crate::domain::Diagnostics;
use crate::error::AppError;

/// Computes a derived series from the raw diagnostics.
pub type DerivedFn = fn(&Diagnostics) -> Result<Vec<f64>, AppError>;

/// Name -> derivation. Looked up before the raw diagnostics.
pub const DERIVED: &[(&str, DerivedFn)] = &[
    ("mdot", abs_mdot),
    ("Mdot", abs_mdot),
    ("phi_b", phi_b),
];

pub fn lookup_derived(name: &str) -> Option<DerivedFn> {
    DERIVED.iter().find(|(n, _)| *n == name).map(|(_, f)| *f)
}

/// Resolve `name` to a series: a registered derivation if there is one,
/// otherwise the raw diagnostics entry.
pub fn resolve(diag: &Diagnostics, name: &str) -> Result<Vec<f64>, AppError> {
    match lookup_derived(name) {
        Some(f) => f(diag),
        None => Ok(diag.get(name)?.to_vec()),
    }
}

/// `|Mdot|`: the sign only encodes direction (inflow is negative).
fn abs_mdot(diag: &Diagnostics) -> Result<Vec<f64>, AppError> {
    Ok(diag.get("Mdot")?.iter().map(|v| v.abs()).collect())
}

/// Normalized horizon flux `Phi_EH / sqrt(|Mdot|)`.
fn phi_b(diag: &Diagnostics) -> Result<Vec<f64>, AppError> {
    let phi = diag.get("Phi_EH")?;
    let mdot = diag.get("Mdot")?;
    if phi.len() != mdot.len() {
        return Err(AppError::data(format!(
            "Phi_EH and Mdot lengths differ ({} vs {}).",
            phi.len(),
            mdot.len()
        )));
    }
    Ok(phi.iter().zip(mdot).map(|(p, m)| p / m.abs().sqrt()).collect())
}
