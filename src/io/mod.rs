//! Input/output helpers.
//!
//! - diagnostics and results loading (`ingest`)
//! - diagnostics and results writing (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;

use std::path::Path;

/// On-disk format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(DataFormat::Csv),
            "json" => Some(DataFormat::Json),
            _ => None,
        }
    }
}
