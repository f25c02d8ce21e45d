//! Ratatui-based history viewer.
//!
//! Shows the history panels of a diagnostics file with the time marker at one
//! of `steps` evenly spaced positions; the arrow keys move it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::frames::frame_times;
use crate::app::pipeline::history_figure;
use crate::domain::Diagnostics;
use crate::error::AppError;
use crate::plot::{Figure, pretty};
use crate::report::{fmt_g, fmt_range};

mod plotters_chart;

use plotters_chart::FigureChart;

/// Start the viewer.
pub fn run(diag: Diagnostics, vars: Vec<String>, steps: usize) -> Result<(), AppError> {
    let mut app = App::new(diag, vars, steps)?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::numeric(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::numeric(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::numeric(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Marker steps per PageUp/PageDown.
const PAGE: usize = 10;

struct App {
    diag: Diagnostics,
    vars: Vec<String>,
    times: Vec<f64>,
    step: usize,
    figure: Option<Figure>,
    status: String,
}

impl App {
    fn new(diag: Diagnostics, vars: Vec<String>, steps: usize) -> Result<Self, AppError> {
        let time = diag.time()?;
        let (Some(&t0), Some(&t1)) = (time.first(), time.last()) else {
            return Err(AppError::data("Diagnostics 'time' is empty."));
        };
        // Fail on unknown variables before the terminal is taken over.
        history_figure(&diag, &vars, None, None, (1, 1))?;

        let mut app = Self {
            diag,
            vars,
            times: frame_times(t0, t1, steps.max(2)),
            step: 0,
            figure: None,
            status: String::new(),
        };
        app.rebuild();
        Ok(app)
    }

    fn tline(&self) -> f64 {
        self.times[self.step]
    }

    fn rebuild(&mut self) {
        let xlabel = pretty("time");
        match history_figure(&self.diag, &self.vars, Some(self.tline()), Some(&xlabel), (1, 1)) {
            Ok(figure) => {
                self.figure = Some(figure);
                self.status = format!("t = {}", fmt_g(self.tline(), 6));
            }
            Err(err) => {
                self.figure = None;
                self.status = err.to_string();
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::numeric(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::numeric(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::numeric(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the viewer should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let last = self.times.len() - 1;
        let step = match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.step.saturating_sub(1),
            KeyCode::Right => (self.step + 1).min(last),
            KeyCode::PageDown => self.step.saturating_sub(PAGE),
            KeyCode::PageUp => (self.step + PAGE).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return false,
        };
        if step != self.step {
            self.step = step;
            self.rebuild();
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let names = self.vars.iter().map(|v| pretty(v)).collect::<Vec<_>>().join(", ");
        let span = (self.times[0], self.times[self.times.len() - 1]);
        let line = Line::from(vec![
            Span::styled("hplot", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {names}")),
            Span::styled(
                format!(
                    " | t={} | step {}/{}",
                    fmt_range(span),
                    self.step + 1,
                    self.times.len()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(Text::from(line)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("History").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match &self.figure {
            Some(figure) => frame.render_widget(FigureChart { figure }, inner),
            None => {
                let msg = Paragraph::new("Nothing to draw.")
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ step  PgUp/PgDn page  Home/End ends  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let diag = Diagnostics::new()
            .with("time", vec![0.0, 50.0, 100.0])
            .with("Mdot", vec![-1.0, -2.0, -3.0]);
        App::new(diag, vec!["mdot".to_string()], 5).unwrap()
    }

    #[test]
    fn marker_starts_at_first_time() {
        let app = app();
        assert_eq!(app.tline(), 0.0);
        let figure = app.figure.as_ref().unwrap();
        assert_eq!(figure.panels[0].vlines[0].x, 0.0);
    }

    #[test]
    fn keys_move_marker_within_bounds() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.step, 0);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.tline(), 25.0);
        app.handle_key(KeyCode::End);
        assert_eq!(app.tline(), 100.0);
        app.handle_key(KeyCode::PageUp);
        assert_eq!(app.step, 4);
        app.handle_key(KeyCode::Home);
        assert_eq!(app.figure.as_ref().unwrap().panels[0].vlines[0].x, 0.0);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn unknown_variable_fails_up_front() {
        let diag = Diagnostics::new().with("time", vec![0.0, 1.0]);
        let err = App::new(diag, vec!["nope".to_string()], 10).err().unwrap();
        assert_eq!(err.exit_code(), 3);
    }
}
