//! Write diagnostics and results back to disk.
//!
//! Used by `hplot demo` and handy for converting CSV histories to JSON.

use std::fs::File;
use std::path::Path;

use crate::data::ResultsFile;
use crate::domain::Diagnostics;
use crate::error::AppError;
use crate::io::DataFormat;

/// Write diagnostics as CSV or JSON depending on the extension.
pub fn write_diagnostics(path: &Path, diag: &Diagnostics) -> Result<(), AppError> {
    match DataFormat::from_path(path) {
        Some(DataFormat::Csv) => write_diagnostics_csv(path, diag),
        Some(DataFormat::Json) => write_json(path, diag),
        None => Err(AppError::io(format!(
            "Unsupported diagnostics file '{}' (expected .csv or .json).",
            path.display()
        ))),
    }
}

/// Write results JSON.
pub fn write_results(path: &Path, results: &ResultsFile) -> Result<(), AppError> {
    write_json(path, results)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))
}

fn write_diagnostics_csv(path: &Path, diag: &Diagnostics) -> Result<(), AppError> {
    let names: Vec<&str> = diag.names().collect();
    let columns = names
        .iter()
        .map(|name| diag.get(name))
        .collect::<Result<Vec<_>, _>>()?;

    let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
    if columns.iter().any(|c| c.len() != n_rows) {
        return Err(AppError::data("CSV export needs all diagnostics series to have the same length."));
    }

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    wtr.write_record(&names)
        .map_err(|e| AppError::io(format!("Failed to write CSV header: {e}")))?;
    for row in 0..n_rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| if c[row].is_nan() { String::new() } else { c[row].to_string() })
            .collect();
        wtr.write_record(&record)
            .map_err(|e| AppError::io(format!("Failed to write CSV row: {e}")))?;
    }
    wtr.flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::load_diagnostics;

    fn diag() -> Diagnostics {
        Diagnostics::new()
            .with("time", vec![0.0, 0.5, 1.0])
            .with("Mdot", vec![-1.25, f64::NAN, 3.0])
    }

    #[test]
    fn csv_preserves_values_and_gaps() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("diag.csv");
        write_diagnostics(&path, &diag()).unwrap();

        let back = load_diagnostics(&path).unwrap();
        assert_eq!(back.time().unwrap(), &[0.0, 0.5, 1.0]);
        let mdot = back.get("Mdot").unwrap();
        assert_eq!(mdot[0], -1.25);
        assert!(mdot[1].is_nan());
    }

    #[test]
    fn ragged_diagnostics_cannot_be_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ragged = Diagnostics::new().with("time", vec![0.0]).with("Mdot", vec![1.0, 2.0]);
        let err = write_diagnostics(&dir.path().join("d.csv"), &ragged).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn results_json_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("res.json");
        let mut res = ResultsFile::new();
        res.insert_ivar("r", vec![1.0, 2.0]);
        res.insert_var("r", "rho", vec![3.0, 4.0]);
        write_results(&path, &res).unwrap();
        assert_eq!(crate::io::load_results(&path).unwrap(), res);
    }
}
