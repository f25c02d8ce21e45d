//! Diagnostics and results loading.
//!
//! Diagnostics come either as CSV (header row of variable names, one numeric
//! column per variable) or as a JSON object of name -> array. Results are
//! JSON in the `ResultsFile` layout.
//!
//! Empty CSV cells load as NaN; renderers skip non-finite samples.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::data::ResultsFile;
use crate::domain::{Diagnostics, TIME_KEY};
use crate::error::AppError;
use crate::io::DataFormat;

/// Load a diagnostics file, picking the parser from the extension.
pub fn load_diagnostics(path: &Path) -> Result<Diagnostics, AppError> {
    let format = DataFormat::from_path(path).ok_or_else(|| {
        AppError::io(format!(
            "Unsupported diagnostics file '{}' (expected .csv or .json).",
            path.display()
        ))
    })?;
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open diagnostics '{}': {e}", path.display())))?;

    let diag = match format {
        DataFormat::Csv => read_diagnostics_csv(file)?,
        DataFormat::Json => serde_json::from_reader(file)
            .map_err(|e| AppError::io(format!("Invalid diagnostics JSON '{}': {e}", path.display())))?,
    };

    if !diag.contains(TIME_KEY) {
        warn!(path = %path.display(), "diagnostics have no '{TIME_KEY}' column");
    }
    debug!(path = %path.display(), n_vars = diag.len(), "loaded diagnostics");
    Ok(diag)
}

/// Parse diagnostics CSV from any reader.
pub fn read_diagnostics_csv<R: Read>(reader: R) -> Result<Diagnostics, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| AppError::io(format!("Failed to read CSV header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().any(String::is_empty) {
        return Err(AppError::io("CSV header must name every column."));
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (idx, record) in rdr.records().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let record = record.map_err(|e| AppError::io(format!("CSV line {line}: {e}")))?;
        if record.len() != headers.len() {
            return Err(AppError::io(format!(
                "CSV line {line}: expected {} fields, found {}.",
                headers.len(),
                record.len()
            )));
        }
        for (col, field) in record.iter().enumerate() {
            let value = if field.is_empty() {
                f64::NAN
            } else {
                field.parse::<f64>().map_err(|e| {
                    AppError::io(format!("CSV line {line}, column '{}': {e}", headers[col]))
                })?
            };
            columns[col].push(value);
        }
    }

    Ok(headers.into_iter().zip(columns).collect())
}

/// Load an analysis results JSON file.
pub fn load_results(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open results '{}': {e}", path.display())))?;
    let results: ResultsFile = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid results JSON '{}': {e}", path.display())))?;
    debug!(
        path = %path.display(),
        n_ivars = results.ivars.len(),
        n_vars = results.vars.len(),
        "loaded results"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_by_header() {
        let data = "time, Mdot ,Phi_EH\n0,-1.5,2\n5,-2.5,\n";
        let diag = read_diagnostics_csv(data.as_bytes()).unwrap();
        assert_eq!(diag.time().unwrap(), &[0.0, 5.0]);
        assert_eq!(diag.get("Mdot").unwrap(), &[-1.5, -2.5]);
        let phi = diag.get("Phi_EH").unwrap();
        assert_eq!(phi[0], 2.0);
        assert!(phi[1].is_nan());
    }

    #[test]
    fn csv_errors_name_the_line() {
        let err = read_diagnostics_csv("time,Mdot\n0,1\n1,abc\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("line 3"), "{}", err.message());
        assert!(err.message().contains("Mdot"));
    }

    #[test]
    fn json_diagnostics_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("diag.json");
        std::fs::write(&path, r#"{"time":[0,1,2],"Mdot":[1,2,3]}"#).unwrap();
        let diag = load_diagnostics(&path).unwrap();
        assert_eq!(diag.get("Mdot").unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_diagnostics(Path::new("run.h5")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_results_file() {
        let err = load_results(Path::new("/nonexistent/results.json")).unwrap_err();
        assert!(err.message().contains("Failed to open results"));
    }
}
