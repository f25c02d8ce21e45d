//! Shared domain types.
//!
//! These are the values passed between the data accessors, the plot helpers
//! and the fitter. Arrays are plain `Vec<f64>`: time series are correlated
//! purely by index, exactly as they come out of the analysis files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Name of the time column every diagnostics set is expected to carry.
pub const TIME_KEY: &str = "time";

/// A variable argument: either data the caller already has, or a name to
/// resolve through a registry or an accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum VarSpec {
    Data(Vec<f64>),
    Named(String),
}

impl VarSpec {
    pub fn named(name: impl Into<String>) -> Self {
        VarSpec::Named(name.into())
    }

    /// The variable name, if this is a named reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            VarSpec::Named(name) => Some(name),
            VarSpec::Data(_) => None,
        }
    }
}

impl From<Vec<f64>> for VarSpec {
    fn from(value: Vec<f64>) -> Self {
        VarSpec::Data(value)
    }
}

impl From<&str> for VarSpec {
    fn from(value: &str) -> Self {
        VarSpec::Named(value.to_string())
    }
}

/// Named time series from a simulation run (`time`, `Mdot`, `Phi_EH`, ...).
///
/// Read-only from the plotting helpers' point of view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    series: BTreeMap<String, Vec<f64>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    pub fn with(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Look up a series by name; an absent key is a data error.
    pub fn get(&self, name: &str) -> Result<&[f64], AppError> {
        self.series
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::data(format!("Unknown diagnostics variable '{name}'.")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    pub fn time(&self) -> Result<&[f64], AppError> {
        self.get(TIME_KEY)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl FromIterator<(String, Vec<f64>)> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a combined (independent, dependent) lookup on an accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultLookup {
    Found { ivar: Vec<f64>, var: Vec<f64> },
    NotFound,
}

/// Linear vs log-log fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// `y = m*x + b`
    Linear,
    /// `y = c*x^k`, fitted as a line in `ln x`/`ln y`.
    Log,
}

/// Result of a degree-1 fit.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawFit {
    /// Independent samples, echoed from the input.
    pub x: Vec<f64>,
    /// Fitted values at `x`.
    pub y: Vec<f64>,
    /// Display label encoding the coefficients.
    pub label: String,
    /// Slope of the fitted line (the exponent in log mode).
    pub slope: f64,
    /// Intercept of the fitted line (`ln c` in log mode).
    pub intercept: f64,
    pub mode: FitMode,
}

impl PowerLawFit {
    /// Power-law prefactor `c` (log mode) or the intercept (linear mode).
    pub fn coefficient(&self) -> f64 {
        match self.mode {
            FitMode::Log => self.intercept.exp(),
            FitMode::Linear => self.intercept,
        }
    }

    /// Power-law exponent `k` (log mode) or the slope (linear mode).
    pub fn exponent(&self) -> f64 {
        self.slope
    }

    /// Evaluate the fitted curve at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self.mode {
            FitMode::Log => (self.slope * x.ln() + self.intercept).exp(),
            FitMode::Linear => self.slope * x + self.intercept,
        }
    }
}

/// Where and how big to draw a figure, as understood by the app layer.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    /// SVG output path; `None` prints an ASCII preview instead.
    pub out: Option<PathBuf>,
    /// SVG size in pixels (width, height).
    pub size: (u32, u32),
    /// ASCII preview size in characters (width, height) per panel.
    pub ascii_size: (usize, usize),
}

/// Movie-frame rendering settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    pub vars: Vec<String>,
    pub frames: usize,
    pub out_dir: PathBuf,
    pub size: (u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_diagnostics_key_is_data_error() {
        let diag = Diagnostics::new().with("time", vec![0.0, 1.0]);
        let err = diag.get("Mdot").unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("Mdot"));
    }

    #[test]
    fn var_spec_conversions() {
        assert_eq!(VarSpec::from("Mdot").name(), Some("Mdot"));
        assert_eq!(VarSpec::from(vec![1.0]).name(), None);
    }

    #[test]
    fn diagnostics_json_is_a_plain_object() {
        let diag = Diagnostics::new().with("time", vec![0.0, 5.0]);
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(json, r#"{"time":[0.0,5.0]}"#);
    }
}
