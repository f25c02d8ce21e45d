//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs the log subscriber
//! - loads diagnostics / analysis results
//! - builds figures with the plot helpers
//! - prints ASCII previews or writes SVG / data files

use std::io;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{
    Cli, Command, DemoArgs, DiagArgs, FigureArgs, FitArgs, FramesArgs, HistArgs, ListArgs,
    RangeArgs, ViewArgs,
};
use crate::data::{SyntheticConfig, generate};
use crate::domain::{FigureConfig, FrameConfig};
use crate::error::AppError;
use crate::io::{load_diagnostics, load_results, write_diagnostics, write_results};
use crate::plot::{AxisLabel, DiagOptions};

pub mod frames;
pub mod pipeline;

/// Entry point for the `hplot` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Hist(args) => handle_hist(args),
        Command::Diag(args) => handle_diag(args),
        Command::Range(args) => handle_range(args),
        Command::Fit(args) => handle_fit(args),
        Command::Frames(args) => handle_frames(args),
        Command::View(args) => handle_view(args),
        Command::List(args) => handle_list(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn handle_hist(args: HistArgs) -> Result<(), AppError> {
    let diag = load_diagnostics(&args.diag)?;
    let config = figure_config_from_args(&args.figure, args.vars.len());
    let figure = pipeline::history_figure(
        &diag,
        &args.vars,
        args.tline,
        args.xlabel.as_deref(),
        config.size,
    )?;
    pipeline::emit(&figure, &config)
}

fn handle_diag(args: DiagArgs) -> Result<(), AppError> {
    let results = load_results(&args.results)?;
    let config = figure_config_from_args(&args.figure, 1);
    let opts = diag_options_from_args(&args)?;

    match pipeline::diag_figure(&results, &args.ivar, &args.var, &opts, config.size)? {
        Some(figure) => pipeline::emit(&figure, &config),
        // The warning has already been logged.
        None => Ok(()),
    }
}

fn handle_range(args: RangeArgs) -> Result<(), AppError> {
    let diag = load_diagnostics(&args.diag)?;
    let config = figure_config_from_args(&args.figure, args.vars.len());
    let figure = pipeline::range_figure(
        &diag,
        &args.vars,
        (args.from, args.to),
        args.xticks.as_deref(),
        config.size,
    )?;
    pipeline::emit(&figure, &config)
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let results = load_results(&args.results)?;
    let within = args.within.as_deref().map(pair).transpose()?;
    let (observed, fitted) =
        pipeline::fit_result(&results, &args.ivar, &args.var, args.mode, within)?;

    println!(
        "{}",
        crate::report::format_fit_summary(&fitted, &args.ivar, &args.var)
    );

    if let Some(path) = &args.out {
        let figure = pipeline::fit_figure(&observed, &fitted, &args.ivar, &args.var, (900, 600))?;
        crate::plot::render::write_svg(&figure, path)?;
        info!(path = %path.display(), "wrote fit figure");
    }

    Ok(())
}

fn handle_frames(args: FramesArgs) -> Result<(), AppError> {
    let diag = load_diagnostics(&args.diag)?;
    let config = frame_config_from_args(&args);
    let written = frames::render_frames(&diag, &config)?;
    info!(frames = written.len(), dir = %config.out_dir.display(), "rendered frames");
    Ok(())
}

fn handle_view(args: ViewArgs) -> Result<(), AppError> {
    let diag = load_diagnostics(&args.diag)?;
    crate::tui::run(diag, args.vars, args.steps)
}

fn handle_list(args: ListArgs) -> Result<(), AppError> {
    let diag = load_diagnostics(&args.diag)?;
    print!("{}", crate::report::format_diagnostics_listing(&diag));
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = SyntheticConfig {
        seed: args.seed,
        n_times: args.n_times,
        ..SyntheticConfig::default()
    };
    debug!(?config, "generating synthetic run");
    let data = generate(&config)?;

    write_diagnostics(&args.diag_out, &data.diagnostics)?;
    write_results(&args.results_out, &data.results)?;
    info!(
        diag = %args.diag_out.display(),
        results = %args.results_out.display(),
        "wrote synthetic dataset"
    );
    Ok(())
}

/// Panel heights stack: the SVG is `n_panels` panels tall.
pub fn figure_config_from_args(args: &FigureArgs, n_panels: usize) -> FigureConfig {
    let n = n_panels.max(1) as u32;
    FigureConfig {
        out: args.out.clone(),
        size: (args.width, args.panel_height.saturating_mul(n)),
        ascii_size: (args.cols, args.rows),
    }
}

pub fn frame_config_from_args(args: &FramesArgs) -> FrameConfig {
    let n = args.vars.len().max(1) as u32;
    FrameConfig {
        vars: args.vars.clone(),
        frames: args.frames,
        out_dir: args.out_dir.clone(),
        size: (args.width, args.panel_height.saturating_mul(n)),
    }
}

pub fn diag_options_from_args(args: &DiagArgs) -> Result<DiagOptions, AppError> {
    let xlabel = match (&args.xlabel, args.xlabel_from_name) {
        (Some(text), _) => AxisLabel::Text(text.clone()),
        (None, true) => AxisLabel::FromName,
        (None, false) => AxisLabel::Hidden,
    };

    Ok(DiagOptions {
        tline: args.tline,
        ylabel: args.ylabel.clone(),
        ylim: args.ylim.as_deref().map(pair).transpose()?,
        logy: args.logy,
        xlabel,
        xlim: args.xlim.as_deref().map(pair).transpose()?,
        logx: args.logx,
        only_nonzero: !args.keep_zeros,
        ..DiagOptions::default()
    })
}

fn pair(values: &[f64]) -> Result<(f64, f64), AppError> {
    match values {
        [lo, hi] => Ok((*lo, *hi)),
        _ => Err(AppError::io(format!(
            "Expected two values (LO HI), got {}.",
            values.len()
        ))),
    }
}

/// Rewrite argv so `hplot FILE` opens the viewer on `FILE`.
///
/// Rules:
/// - `hplot run.csv ...`              -> `hplot view --diag run.csv ...`
/// - `hplot <subcommand> ...`         -> unchanged
/// - `hplot`, flags, `help`           -> unchanged (clap prints usage)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_subcommand = matches!(
        arg1.as_str(),
        "hist" | "diag" | "range" | "fit" | "frames" | "view" | "list" | "demo" | "help"
    );
    if is_subcommand || arg1.starts_with('-') {
        return argv;
    }

    argv.splice(1..1, ["view".to_string(), "--diag".to_string()]);
    argv
}
