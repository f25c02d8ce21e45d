//! Movie frames: the same history panels redrawn with the time marker at
//! evenly spaced positions across the run.
//!
//! Frames are independent, so they are rendered in parallel; each owns its
//! own `Figure`.

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::debug;

use crate::app::pipeline::history_figure;
use crate::domain::{Diagnostics, FrameConfig};
use crate::error::AppError;
use crate::plot::render::write_svg;
use crate::plot::pretty;

/// Marker times for `n` frames spanning `[t0, t1]`, endpoints included.
pub fn frame_times(t0: f64, t1: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![t0],
        _ => {
            let step = (t1 - t0) / (n - 1) as f64;
            (0..n).map(|i| t0 + step * i as f64).collect()
        }
    }
}

pub fn frame_path(config: &FrameConfig, index: usize) -> PathBuf {
    config.out_dir.join(format!("frame_{index:04}.svg"))
}

/// Render every frame into `config.out_dir`, returning the written paths in
/// frame order.
pub fn render_frames(diag: &Diagnostics, config: &FrameConfig) -> Result<Vec<PathBuf>, AppError> {
    if config.frames == 0 {
        return Err(AppError::io("Frame count must be at least 1."));
    }
    let time = diag.time()?;
    let (Some(&t0), Some(&t1)) = (time.first(), time.last()) else {
        return Err(AppError::data("Diagnostics 'time' is empty."));
    };

    fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::io(format!(
            "Failed to create frame directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    let xlabel = pretty("time");
    frame_times(t0, t1, config.frames)
        .into_par_iter()
        .enumerate()
        .map(|(i, t)| {
            let figure = history_figure(diag, &config.vars, Some(t), Some(&xlabel), config.size)?;
            let path = frame_path(config, i);
            write_svg(&figure, &path)?;
            debug!(frame = i, tline = t, "rendered frame");
            Ok(path)
        })
        .collect()
}
