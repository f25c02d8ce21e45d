//! Command-line parsing for `hplot`.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! plotting code; `app` turns these structs into plain configs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::FitMode;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hplot", version, about = "Plot simulation diagnostics and analysis results")]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plot diagnostics variables against time, one panel per variable.
    Hist(HistArgs),
    /// Plot an analysis variable against its independent variable.
    Diag(DiagArgs),
    /// Plot the nonzero samples of diagnostics variables inside a time window.
    Range(RangeArgs),
    /// Fit a power law (or line) to an analysis variable.
    Fit(FitArgs),
    /// Render movie frames with a time marker sweeping across the run.
    Frames(FramesArgs),
    /// Browse history panels in the terminal.
    View(ViewArgs),
    /// List the series in a diagnostics file.
    List(ListArgs),
    /// Write a synthetic diagnostics + results dataset.
    Demo(DemoArgs),
}

/// Output options shared by the plotting commands.
#[derive(Debug, Args, Clone)]
pub struct FigureArgs {
    /// Write an SVG figure here instead of printing an ASCII preview.
    #[arg(short, long, value_name = "SVG")]
    pub out: Option<PathBuf>,

    /// SVG width (pixels).
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// SVG height per panel (pixels).
    #[arg(long, default_value_t = 300)]
    pub panel_height: u32,

    /// ASCII preview width (columns).
    #[arg(long, default_value_t = 100)]
    pub cols: usize,

    /// ASCII preview height per panel (rows).
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
}

#[derive(Debug, Args, Clone)]
pub struct HistArgs {
    /// Diagnostics file (.csv or .json) with a `time` column.
    #[arg(long, value_name = "FILE")]
    pub diag: PathBuf,

    /// Variable to plot (repeatable). Derived names: mdot, Mdot, phi_b.
    #[arg(long = "var", required = true)]
    pub vars: Vec<String>,

    /// Mark this time with a vertical line.
    #[arg(long)]
    pub tline: Option<f64>,

    /// Label for the shared time axis.
    #[arg(long)]
    pub xlabel: Option<String>,

    #[command(flatten)]
    pub figure: FigureArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DiagArgs {
    /// Analysis results JSON.
    #[arg(long, value_name = "FILE")]
    pub results: PathBuf,

    /// Independent variable (e.g. r, th, t).
    #[arg(long)]
    pub ivar: String,

    /// Dependent variable.
    #[arg(long)]
    pub var: String,

    #[arg(long)]
    pub tline: Option<f64>,

    #[arg(long)]
    pub ylabel: Option<String>,

    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub ylim: Option<Vec<f64>>,

    #[arg(long)]
    pub logy: bool,

    /// X axis label; omit to hide x tick labels.
    #[arg(long, conflicts_with = "xlabel_from_name")]
    pub xlabel: Option<String>,

    /// Label the x axis with the independent variable's name.
    #[arg(long)]
    pub xlabel_from_name: bool,

    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub xlim: Option<Vec<f64>>,

    #[arg(long)]
    pub logx: bool,

    /// Keep samples where the variable is exactly zero.
    #[arg(long)]
    pub keep_zeros: bool,

    #[command(flatten)]
    pub figure: FigureArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RangeArgs {
    #[arg(long, value_name = "FILE")]
    pub diag: PathBuf,

    /// Variable to plot (repeatable), one panel each.
    #[arg(long = "var", required = true)]
    pub vars: Vec<String>,

    /// Window start (simulation time).
    #[arg(long, default_value_t = 5000.0)]
    pub from: f64,

    /// Window end (simulation time).
    #[arg(long, default_value_t = 10000.0)]
    pub to: f64,

    /// Tick positions for the bottom panel, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub xticks: Option<Vec<f64>>,

    #[command(flatten)]
    pub figure: FigureArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[arg(long, value_name = "FILE")]
    pub results: PathBuf,

    #[arg(long)]
    pub ivar: String,

    #[arg(long)]
    pub var: String,

    #[arg(long, value_enum, default_value_t = FitMode::Log)]
    pub mode: FitMode,

    /// Restrict the fit to this independent-variable window.
    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub within: Option<Vec<f64>>,

    /// Also plot data and fit to this SVG.
    #[arg(short, long, value_name = "SVG")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FramesArgs {
    #[arg(long, value_name = "FILE")]
    pub diag: PathBuf,

    #[arg(long = "var", required = true)]
    pub vars: Vec<String>,

    /// Number of frames.
    #[arg(long, default_value_t = 100)]
    pub frames: usize,

    /// Output directory for `frame_NNNN.svg`.
    #[arg(long, value_name = "DIR", default_value = "frames")]
    pub out_dir: PathBuf,

    #[arg(long, default_value_t = 900)]
    pub width: u32,

    #[arg(long, default_value_t = 300)]
    pub panel_height: u32,
}

#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    #[arg(long, value_name = "FILE")]
    pub diag: PathBuf,

    /// Variable to show (repeatable).
    #[arg(long = "var", default_values = ["mdot", "phi_b"])]
    pub vars: Vec<String>,

    /// Number of marker positions across the run.
    #[arg(long, default_value_t = 200)]
    pub steps: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ListArgs {
    #[arg(long, value_name = "FILE")]
    pub diag: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Diagnostics output (.csv or .json).
    #[arg(long, default_value = "diag.json")]
    pub diag_out: PathBuf,

    /// Results output (.json).
    #[arg(long, default_value = "results.json")]
    pub results_out: PathBuf,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of time samples.
    #[arg(long, default_value_t = 2001)]
    pub n_times: usize,
}
