//! Analysis-results accessor.
//!
//! Analysis passes reduce simulation dumps to 1D profiles and time series.
//! Each dependent variable is stored against one independent variable
//! (`r`, `th`, `t`, ...); the plot helpers fetch pairs by name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::nonzero_pairs;
use crate::domain::ResultLookup;

/// Lookup contract used by `plot_diag`.
pub trait AnalysisResults {
    /// Fetch `var` as a function of `ivar`.
    ///
    /// With `only_nonzero`, positions where `var` is exactly zero are removed
    /// from both arrays.
    fn get_result(&self, ivar: &str, var: &str, only_nonzero: bool) -> ResultLookup;

    /// Fetch an independent variable on its own.
    fn get_ivar(&self, ivar: &str) -> Option<Vec<f64>>;
}

/// Results stored as JSON:
///
/// ```text
/// { "ivars": { "r": [...], "t": [...] },
///   "vars":  { "rho_r": [...], "Mdot_t": [...] } }
/// ```
///
/// Dependent arrays are keyed `{var}_{ivar}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsFile {
    #[serde(default)]
    pub ivars: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub vars: BTreeMap<String, Vec<f64>>,
}

impl ResultsFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_key(ivar: &str, var: &str) -> String {
        format!("{var}_{ivar}")
    }

    pub fn insert_ivar(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.ivars.insert(name.into(), values);
    }

    pub fn insert_var(&mut self, ivar: &str, var: &str, values: Vec<f64>) {
        self.vars.insert(Self::result_key(ivar, var), values);
    }
}

impl AnalysisResults for ResultsFile {
    fn get_result(&self, ivar: &str, var: &str, only_nonzero: bool) -> ResultLookup {
        let key = Self::result_key(ivar, var);
        let (Some(iv), Some(v)) = (self.ivars.get(ivar), self.vars.get(&key)) else {
            debug!(ivar, var, "no such result");
            return ResultLookup::NotFound;
        };
        if iv.len() != v.len() {
            debug!(ivar, var, ivar_len = iv.len(), var_len = v.len(), "result length mismatch");
            return ResultLookup::NotFound;
        }

        let (ivar, var) = if only_nonzero {
            nonzero_pairs(iv, v)
        } else {
            (iv.clone(), v.clone())
        };
        ResultLookup::Found { ivar, var }
    }

    fn get_ivar(&self, ivar: &str) -> Option<Vec<f64>> {
        self.ivars.get(ivar).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> ResultsFile {
        let mut res = ResultsFile::new();
        res.insert_ivar("r", vec![1.0, 2.0, 3.0]);
        res.insert_var("r", "rho", vec![0.0, 0.5, 0.25]);
        res.insert_var("r", "bad", vec![1.0]);
        res
    }

    #[test]
    fn finds_pairs_and_filters_zeros() {
        let res = results();
        assert_eq!(
            res.get_result("r", "rho", true),
            ResultLookup::Found {
                ivar: vec![2.0, 3.0],
                var: vec![0.5, 0.25]
            }
        );
        assert_eq!(
            res.get_result("r", "rho", false),
            ResultLookup::Found {
                ivar: vec![1.0, 2.0, 3.0],
                var: vec![0.0, 0.5, 0.25]
            }
        );
    }

    #[test]
    fn unknown_or_inconsistent_results_are_not_found() {
        let res = results();
        assert_eq!(res.get_result("r", "Pg", true), ResultLookup::NotFound);
        assert_eq!(res.get_result("th", "rho", true), ResultLookup::NotFound);
        assert_eq!(res.get_result("r", "bad", true), ResultLookup::NotFound);
    }

    #[test]
    fn ivar_lookup() {
        let res = results();
        assert_eq!(res.get_ivar("r"), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(res.get_ivar("t"), None);
    }

    #[test]
    fn json_layout() {
        let res: ResultsFile =
            serde_json::from_str(r#"{"ivars":{"t":[0.0,1.0]},"vars":{"Mdot_t":[3.0,4.0]}}"#).unwrap();
        assert_eq!(
            res.get_result("t", "Mdot", false),
            ResultLookup::Found {
                ivar: vec![0.0, 1.0],
                var: vec![3.0, 4.0]
            }
        );
    }
}
