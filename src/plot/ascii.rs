//! ASCII preview of a single panel.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks when no SVG viewer is at hand
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - curves: `-`
//! - reference-time markers: `|` (drawn over curves)

use crate::plot::{Axes, Scale, View};
use crate::report::fmt_range;

/// Render `ax` into a `width` x `height` character grid with a range header.
///
/// Labels and legend entries follow the grid, one per line.
pub fn render_ascii(ax: &Axes, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let view = ax.view();

    let mut grid = vec![vec![' '; width]; height];

    for line in &ax.lines {
        for run in ax.clipped(line, &view) {
            draw_curve(&mut grid, &run, &view);
        }
    }

    for v in &ax.vlines {
        let Some(x) = ax.xscale.project(v.x) else {
            continue;
        };
        if x < view.x.0 || x > view.x.1 {
            continue;
        }
        let col = map_x(x, &view, width);
        for row in grid.iter_mut() {
            row[col] = '|';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x={}{} | y={}{}\n",
        fmt_range(unproject(ax.xscale, view.x)),
        scale_tag(ax.xscale),
        fmt_range(unproject(ax.yscale, view.y)),
        scale_tag(ax.yscale),
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if let Some(label) = &ax.xlabel {
        out.push_str(&format!("x: {label}\n"));
    }
    if let Some(label) = &ax.ylabel {
        out.push_str(&format!("y: {label}\n"));
    }
    if ax.legend.is_some() {
        for line in &ax.lines {
            if let Some(label) = line.label.as_deref().filter(|l| !l.is_empty()) {
                out.push_str(&format!("- {label}\n"));
            }
        }
    }

    out
}

fn unproject(scale: Scale, (lo, hi): (f64, f64)) -> (f64, f64) {
    (scale.unproject(lo), scale.unproject(hi))
}

fn scale_tag(scale: Scale) -> &'static str {
    match scale {
        Scale::Linear => "",
        Scale::Log => " (log)",
    }
}

fn map_x(x: f64, view: &View, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - view.x.0) / (view.x.1 - view.x.0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, view: &View, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - view.y.0) / (view.y.1 - view.y.0)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], points: &[(f64, f64)], view: &View) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, view, width);
        let row = map_y(y, view, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, '-'),
            None => grid[row][col] = '-',
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{LegendLoc, LineStyle, MARKER_RED};

    #[test]
    fn plot_golden_snapshot_small() {
        let mut ax = Axes::new();
        ax.plot(vec![0.0, 10.0], vec![0.0, 10.0], Some("Ṁ".to_string()), LineStyle::default())
            .unwrap();
        ax.axvline(5.0, MARKER_RED);
        ax.legend(LegendLoc::UpperLeft);
        ax.set_xlabel("t");

        let txt = render_ascii(&ax, 10, 5);
        let expected = concat!(
            "Plot: x=[0, 10] | y=[-0.5, 10.5]\n",
            "     |  --\n",
            "     |--  \n",
            "    -|    \n",
            "  -- |    \n",
            "--   |    \n",
            "x: t\n",
            "- Ṁ\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn log_axis_header_is_in_data_units() {
        let mut ax = Axes::new();
        ax.plot(vec![1.0, 100.0], vec![1.0, 2.0], None, LineStyle::default()).unwrap();
        ax.set_xscale(Scale::Log);
        ax.set_xlim(1.0, 1000.0);
        let txt = render_ascii(&ax, 20, 5);
        let header = txt.lines().next().unwrap();
        assert!(header.starts_with("Plot: x=[1, 1000] (log) | y="), "{header}");
    }

    #[test]
    fn markers_outside_the_window_are_skipped() {
        let mut ax = Axes::new();
        ax.set_xlim(0.0, 1.0);
        ax.axvline(2.0, MARKER_RED);
        let txt = render_ascii(&ax, 10, 5);
        // The header separates the ranges with '|'; only the grid matters.
        assert!(txt.lines().skip(1).all(|l| !l.contains('|')), "{txt}");
    }
}
