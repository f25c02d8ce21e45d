//! Plotters-powered figure widget for Ratatui.
//!
//! The panels are drawn by the same `draw_axes` used for SVG output, rendered
//! into the Ratatui buffer through `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::Figure;
use crate::plot::render::{Theme, draw_axes};

/// Render-only view of a stacked figure.
pub struct FigureChart<'a> {
    pub figure: &'a Figure,
}

/// Smallest cell area per panel Plotters can lay out a chart in.
const MIN_PANEL_WIDTH: u16 = 20;
const MIN_PANEL_HEIGHT: u16 = 8;

impl FigureChart<'_> {
    pub fn fits(&self, area: Rect) -> bool {
        let panels = self.figure.panels.len().max(1) as u16;
        area.width >= MIN_PANEL_WIDTH && area.height >= MIN_PANEL_HEIGHT.saturating_mul(panels)
    }
}

impl Widget for FigureChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters fails to build a chart in tiny areas; show a hint instead.
        if !self.fits(area) {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let widget = widget_fn(move |root| {
            let areas = root.split_evenly((figure.panels.len().max(1), 1));
            for (area, ax) in areas.iter().zip(&figure.panels) {
                draw_axes(area, ax, &Theme::TERMINAL)?;
            }
            Ok(())
        });

        widget.render(area, buf);
    }
}
