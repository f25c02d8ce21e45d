//! Synthetic accretion-run data for demos and tests.
//!
//! Produces a diagnostics set (`time`, `Mdot`, `Phi_EH`) and an analysis
//! results set (radial density profile plus the same time series keyed by
//! `t`) with roughly the shapes a MAD/SANE run shows:
//!
//! - `Mdot` is negative (inflow) with log-normal fluctuations
//! - `Phi_EH` tracks `sqrt(|Mdot|)` so `phi_b` hovers around a constant
//! - `rho(r) ~ r^-1.5`, with the innermost radius left unfilled (zero)

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::ResultsFile;
use crate::domain::{Diagnostics, TIME_KEY};
use crate::error::AppError;

/// Mean accretion rate, code units.
const MDOT_MEAN: f64 = 10.0;

/// Log-space scatter of the accretion rate.
const MDOT_SIGMA: f64 = 0.3;

/// Mean of `Phi_EH / sqrt(|Mdot|)`.
const PHI_B_MEAN: f64 = 15.0;

/// Density profile slope.
const RHO_SLOPE: f64 = -1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub n_times: usize,
    pub t_max: f64,
    pub n_radii: usize,
    pub r_min: f64,
    pub r_max: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_times: 2001,
            t_max: 10000.0,
            n_radii: 128,
            r_min: 1.5,
            r_max: 50.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntheticData {
    pub diagnostics: Diagnostics,
    pub results: ResultsFile,
}

pub fn generate(config: &SyntheticConfig) -> Result<SyntheticData, AppError> {
    if config.n_times < 2 || config.n_radii < 2 {
        return Err(AppError::io("Synthetic data needs at least 2 times and 2 radii."));
    }
    if !(config.t_max.is_finite() && config.t_max > 0.0) {
        return Err(AppError::io("Synthetic t_max must be positive."));
    }
    if !(config.r_min > 0.0 && config.r_max > config.r_min && config.r_max.is_finite()) {
        return Err(AppError::io("Synthetic radii must satisfy 0 < r_min < r_max."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;

    let time = linspace(0.0, config.t_max, config.n_times);

    let mut mdot = Vec::with_capacity(config.n_times);
    let mut phi = Vec::with_capacity(config.n_times);
    for _ in 0..config.n_times {
        // Mean-corrected log-normal so E[|Mdot|] stays at MDOT_MEAN.
        let z: f64 = normal.sample(&mut rng);
        let m = MDOT_MEAN * (MDOT_SIGMA * z - 0.5 * MDOT_SIGMA * MDOT_SIGMA).exp();
        let w: f64 = normal.sample(&mut rng);
        mdot.push(-m);
        phi.push(PHI_B_MEAN * m.sqrt() * (1.0 + 0.1 * w));
    }

    let radii = logspace(config.r_min, config.r_max, config.n_radii);
    let rho: Vec<f64> = radii
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if i == 0 {
                return 0.0;
            }
            let z: f64 = normal.sample(&mut rng);
            2.0 * r.powf(RHO_SLOPE) * (1.0 + 0.02 * z)
        })
        .collect();

    let mut results = ResultsFile::new();
    results.insert_ivar("r", radii);
    results.insert_ivar("t", time.clone());
    results.insert_var("r", "rho", rho);
    results.insert_var("t", "Mdot", mdot.clone());
    results.insert_var("t", "Phi_EH", phi.clone());

    let diagnostics = Diagnostics::new()
        .with(TIME_KEY, time)
        .with("Mdot", mdot)
        .with("Phi_EH", phi);

    Ok(SyntheticData {
        diagnostics,
        results,
    })
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n as f64 - 1.0))
        .collect()
}

fn logspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    linspace(lo.ln(), hi.ln(), n).into_iter().map(f64::exp).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AnalysisResults, resolve};
    use crate::domain::ResultLookup;

    fn small() -> SyntheticConfig {
        SyntheticConfig {
            seed: 7,
            n_times: 50,
            t_max: 100.0,
            n_radii: 16,
            r_min: 2.0,
            r_max: 40.0,
        }
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate(&small()).unwrap();
        let b = generate(&small()).unwrap();
        assert_eq!(a.diagnostics, b.diagnostics);
        assert_eq!(a.results, b.results);

        let c = generate(&SyntheticConfig { seed: 8, ..small() }).unwrap();
        assert_ne!(a.diagnostics, c.diagnostics);
    }

    #[test]
    fn shapes_and_signs() {
        let data = generate(&small()).unwrap();
        let time = data.diagnostics.time().unwrap();
        assert_eq!(time.len(), 50);
        assert_eq!(time[0], 0.0);
        assert!((time[49] - 100.0).abs() < 1e-9);

        let mdot = data.diagnostics.get("Mdot").unwrap();
        assert!(mdot.iter().all(|&m| m < 0.0));
        let phi_b = resolve(&data.diagnostics, "phi_b").unwrap();
        assert!(phi_b.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn innermost_density_is_unfilled() {
        let data = generate(&small()).unwrap();
        match data.results.get_result("r", "rho", true) {
            ResultLookup::Found { ivar, var } => {
                assert_eq!(ivar.len(), 15);
                assert!(var.iter().all(|&v| v > 0.0));
            }
            ResultLookup::NotFound => panic!("rho_r missing"),
        }
    }

    #[test]
    fn rejects_bad_config() {
        assert!(generate(&SyntheticConfig { n_times: 1, ..small() }).is_err());
        assert!(generate(&SyntheticConfig { r_min: 0.0, ..small() }).is_err());
    }
}
