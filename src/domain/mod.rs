//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - variable references (`VarSpec`) and diagnostics series (`Diagnostics`)
//! - accessor lookup results (`ResultLookup`)
//! - fit outputs (`PowerLawFit`, `FitMode`)
//! - run configuration (`FigureConfig`, `FrameConfig`)

pub mod types;

pub use types::*;
