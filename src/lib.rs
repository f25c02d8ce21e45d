//! `diag-plots` library crate.
//!
//! Plotting helpers for accretion-simulation diagnostics: history traces,
//! analysis-variable plots, windowed nonzero plots and power-law fits, drawn
//! onto an in-memory `Axes` and rendered to SVG, the terminal or ASCII.
//!
//! The binary (`hplot`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the helpers are reusable from other analysis tools

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
