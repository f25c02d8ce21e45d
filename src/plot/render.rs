//! Plotters rendering of `Axes` and `Figure`.
//!
//! `draw_axes` works on any Plotters drawing area, so the same code renders
//! SVG files and the terminal viewer (via `plotters-ratatui-backend`).
//!
//! Log axes are drawn on linear coordinates holding `log10` of the data;
//! tick labels are converted back to data units.

use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::AppError;
use crate::plot::{Axes, Figure, LegendLoc, Rgb, TickLabels};
use crate::report::fmt_g;

/// Colours and spacing for one output medium.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub font_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub ticks: usize,
}

impl Theme {
    /// Print-style figures.
    pub const LIGHT: Theme = Theme {
        background: RGBColor(255, 255, 255),
        foreground: RGBColor(0, 0, 0),
        font_size: 14,
        margin: 10,
        x_label_area: 40,
        y_label_area: 60,
        ticks: 6,
    };

    /// Terminal cells are low-res, so keep label areas compact.
    pub const TERMINAL: Theme = Theme {
        background: RGBColor(0, 0, 0),
        foreground: RGBColor(255, 255, 255),
        font_size: 10,
        margin: 1,
        x_label_area: 3,
        y_label_area: 6,
        ticks: 5,
    };
}

/// Draw one panel onto `area`.
pub fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    ax: &Axes,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let view = ax.view();
    let (x0, x1) = view.x;
    let (y0, y1) = view.y;

    let mut chart = ChartBuilder::on(area)
        .margin(theme.margin)
        .set_label_area_size(LabelAreaPosition::Left, theme.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, theme.x_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let fg = theme.foreground;
    let xscale = ax.xscale;
    let yscale = ax.yscale;
    let fmt_x = move |v: &f64| fmt_g(xscale.unproject(*v), 4);
    let fmt_y = move |v: &f64| fmt_g(yscale.unproject(*v), 4);
    let blank = |_: &f64| String::new();
    let font = ("sans-serif", theme.font_size).into_font().color(&fg);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(theme.ticks)
        .y_labels(theme.ticks)
        .y_label_formatter(&fmt_y)
        .label_style(font.clone())
        .axis_style(&fg)
        .bold_line_style(&fg.mix(0.3))
        .light_line_style(&fg.mix(0.1));
    match ax.xticks {
        TickLabels::Auto => mesh.x_label_formatter(&fmt_x),
        TickLabels::Hidden | TickLabels::Custom(_) => mesh.x_label_formatter(&blank),
    };
    if !ax.grid {
        mesh.disable_x_mesh().disable_y_mesh();
    }
    if let Some(label) = &ax.xlabel {
        mesh.x_desc(label.as_str());
    }
    if let Some(label) = &ax.ylabel {
        mesh.y_desc(label.as_str());
    }
    mesh.draw()?;

    if let TickLabels::Custom(ticks) = &ax.xticks {
        // Drawn on the parent area so the labels land in the bottom label
        // area, below the axis line.
        let (base_x, base_y) = area.get_base_pixel();
        let tick_font = font.clone().pos(Pos::new(HPos::Center, VPos::Top));
        for (pos, text) in ticks {
            let Some(x) = xscale.project(*pos).filter(|x| (x0..=x1).contains(x)) else {
                continue;
            };
            let (px, py) = chart.backend_coord(&(x, y0));
            area.draw(&PathElement::new(
                vec![(px - base_x, py - base_y), (px - base_x, py - base_y + 4)],
                fg,
            ))?;
            area.draw(&Text::new(
                text.clone(),
                (px - base_x, py - base_y + 6),
                tick_font.clone(),
            ))?;
        }
    }

    for (i, line) in ax.lines.iter().enumerate() {
        let style = rgb(ax.line_color(i)).stroke_width(line.style.width);
        let mut runs = ax.clipped(line, &view).into_iter();
        // The first run carries the legend entry, even when empty.
        let series = chart.draw_series(LineSeries::new(runs.next().unwrap_or_default(), style))?;
        if let Some(label) = line.label.as_deref().filter(|l| !l.is_empty()) {
            series
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], style));
        }
        for run in runs {
            chart.draw_series(LineSeries::new(run, style))?;
        }
    }

    for v in &ax.vlines {
        if let Some(x) = xscale.project(v.x).filter(|x| (x0..=x1).contains(x)) {
            chart.draw_series(LineSeries::new(
                vec![(x, y0), (x, y1)],
                rgb(v.color).stroke_width(1),
            ))?;
        }
    }

    let has_labels = ax
        .lines
        .iter()
        .any(|l| l.label.as_deref().is_some_and(|s| !s.is_empty()));
    if let (Some(loc), true) = (ax.legend, has_labels) {
        chart
            .configure_series_labels()
            .position(series_label_position(loc))
            .background_style(&theme.background.mix(0.8))
            .border_style(&fg)
            .label_font(font.clone())
            .draw()?;
    }

    Ok(())
}

/// Draw every panel of `figure`, stacked top to bottom, onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&theme.background)?;
    let areas = root.split_evenly((figure.panels.len().max(1), 1));
    for (area, ax) in areas.iter().zip(&figure.panels) {
        draw_axes(area, ax, theme)?;
    }
    Ok(())
}

/// Render a figure to an SVG document.
pub fn render_svg_string(figure: &Figure) -> Result<String, AppError> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, figure.size).into_drawing_area();
        draw_figure(&root, figure, &Theme::LIGHT).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    Ok(buf)
}

/// Render a figure to an SVG file.
pub fn write_svg(figure: &Figure, path: &Path) -> Result<(), AppError> {
    let svg = render_svg_string(figure)?;
    fs::write(path, svg)
        .map_err(|e| AppError::io(format!("Failed to write figure '{}': {e}", path.display())))
}

fn render_error(e: impl std::fmt::Display) -> AppError {
    AppError::numeric(format!("Failed to render figure: {e}"))
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn series_label_position(loc: LegendLoc) -> SeriesLabelPosition {
    match loc {
        LegendLoc::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLoc::UpperRight => SeriesLabelPosition::UpperRight,
        LegendLoc::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLoc::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{LineStyle, MARKER_RED, Scale};

    fn panel() -> Axes {
        let mut ax = Axes::new();
        ax.plot(
            vec![1.0, 10.0, 100.0],
            vec![2.0, 4.0, 8.0],
            Some("Ṁ".to_string()),
            LineStyle::default(),
        )
        .unwrap();
        ax.axvline(10.0, MARKER_RED);
        ax.legend(LegendLoc::UpperLeft);
        ax.set_ylabel("accretion");
        ax
    }

    #[test]
    fn svg_contains_labels() {
        let figure = Figure {
            panels: vec![panel()],
            size: (640, 360),
        };
        let svg = render_svg_string(&figure).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("accretion"));
        assert!(svg.contains("Ṁ"));
    }

    #[test]
    fn stacked_log_panels_render() {
        let mut top = panel();
        top.set_xscale(Scale::Log);
        top.set_xticklabels(TickLabels::Hidden);
        let mut bottom = panel();
        bottom.set_xticklabels(TickLabels::Custom(vec![(50.0, "fifty".to_string())]));
        let figure = Figure {
            panels: vec![top, bottom],
            size: (640, 480),
        };
        let svg = render_svg_string(&figure).unwrap();
        assert!(svg.contains("fifty"));
    }

    #[test]
    fn custom_ticks_sit_below_the_axis() {
        let mut ax = panel();
        ax.set_xticklabels(TickLabels::Custom(vec![(50.0, "fifty".to_string())]));
        let figure = Figure {
            panels: vec![ax],
            size: (640, 240),
        };
        let svg = render_svg_string(&figure).unwrap();

        let end = svg.find(">fifty<").expect("tick label");
        let start = svg[..end].rfind("<text").expect("text element");
        let tag = &svg[start..end];
        let y_at = tag.find(" y=\"").expect("y attribute") + 4;
        let y: f64 = tag[y_at..]
            .split('"')
            .next()
            .and_then(|v| v.parse().ok())
            .expect("numeric y");

        // Plotting area ends at height - margin - x label area.
        let axis_y = f64::from(240 - Theme::LIGHT.margin - Theme::LIGHT.x_label_area);
        assert!(y > axis_y, "tick label at y={y}, axis at {axis_y}");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fig.svg");
        write_svg(&Figure::stacked(1, (320, 240)), &path).unwrap();
        assert!(path.exists());
    }
}
