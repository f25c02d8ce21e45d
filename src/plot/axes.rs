//! In-memory plotting surface.
//!
//! `Axes` records what has been drawn on one panel and how the panel is
//! configured, without committing to any backend. The plot helpers mutate
//! it; `render` and `ascii` turn it into pixels or characters afterwards.
//! Keeping the surface as plain data also makes the helpers testable: two
//! surfaces that received the same calls compare equal.

use crate::error::AppError;

/// Axis scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// Map a data value into drawing coordinates (`log10` for log axes).
    ///
    /// Values that cannot be shown on this scale (non-finite, or
    /// non-positive on a log axis) map to `None`.
    pub fn project(self, v: f64) -> Option<f64> {
        match self {
            Scale::Linear => v.is_finite().then_some(v),
            Scale::Log => (v.is_finite() && v > 0.0).then(|| v.log10()),
        }
    }

    /// Inverse of [`Scale::project`].
    pub fn unproject(self, v: f64) -> f64 {
        match self {
            Scale::Linear => v,
            Scale::Log => 10f64.powf(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendLoc {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// X tick label policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TickLabels {
    /// Backend picks tick positions and labels.
    #[default]
    Auto,
    /// Ticks are drawn without labels (stacked panels share the bottom axis).
    Hidden,
    /// Explicit `(position, label)` pairs, positions in data units.
    Custom(Vec<(f64, String)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour of reference-time markers.
pub const MARKER_RED: Rgb = Rgb(214, 39, 40);

/// Cycle used for curves without an explicit colour.
pub const PALETTE: [Rgb; 6] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Option<Rgb>,
    pub width: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: None,
            width: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: Option<String>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VLine {
    pub x: f64,
    pub color: Rgb,
}

/// One plotting panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub lines: Vec<Line>,
    pub vlines: Vec<VLine>,
    pub legend: Option<LegendLoc>,
    pub grid: bool,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xscale: Scale,
    pub yscale: Scale,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xticks: TickLabels,
}

/// Visible window of an `Axes`, in projected (scale-applied) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve. `x` and `y` must have the same length.
    pub fn plot(
        &mut self,
        x: Vec<f64>,
        y: Vec<f64>,
        label: Option<String>,
        style: LineStyle,
    ) -> Result<(), AppError> {
        if x.len() != y.len() {
            return Err(AppError::data(format!(
                "x and y must have the same length, got {} and {}.",
                x.len(),
                y.len()
            )));
        }
        self.lines.push(Line { x, y, label, style });
        Ok(())
    }

    pub fn axvline(&mut self, x: f64, color: Rgb) {
        self.vlines.push(VLine { x, color });
    }

    pub fn legend(&mut self, loc: LegendLoc) {
        self.legend = Some(loc);
    }

    pub fn grid(&mut self, on: bool) {
        self.grid = on;
    }

    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    pub fn set_xscale(&mut self, scale: Scale) {
        self.xscale = scale;
    }

    pub fn set_yscale(&mut self, scale: Scale) {
        self.yscale = scale;
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = Some(label.into());
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = Some(label.into());
    }

    pub fn set_xticklabels(&mut self, ticks: TickLabels) {
        self.xticks = ticks;
    }

    /// Number of drawn primitives (curves plus markers).
    pub fn draw_count(&self) -> usize {
        self.lines.len() + self.vlines.len()
    }

    /// Colour of the `i`-th curve: its explicit style, else the palette.
    pub fn line_color(&self, i: usize) -> Rgb {
        self.lines
            .get(i)
            .and_then(|l| l.style.color)
            .unwrap_or(PALETTE[i % PALETTE.len()])
    }

    /// Curve points in projected coordinates, unplottable samples dropped.
    pub fn projected(&self, line: &Line) -> Vec<(f64, f64)> {
        line.x
            .iter()
            .zip(&line.y)
            .filter_map(|(&x, &y)| Some((self.xscale.project(x)?, self.yscale.project(y)?)))
            .collect()
    }

    /// Projected runs of `line` inside the x window of `view`, with y
    /// clamped to the window.
    ///
    /// Segments crossing the window edge are cut at the edge by linear
    /// interpolation; a curve that leaves and re-enters the window yields
    /// separate runs. Backends draw out-of-window segments past the plotting
    /// area, so renderers use this rather than `projected`.
    pub fn clipped(&self, line: &Line, view: &View) -> Vec<Vec<(f64, f64)>> {
        let (lo, hi) = view.x;
        let clamp_y = |(x, y): (f64, f64)| (x, y.clamp(view.y.0, view.y.1));
        let inside = |x: f64| x >= lo && x <= hi;

        let pts = self.projected(line);
        let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut run: Vec<(f64, f64)> = Vec::new();

        if let [only] = pts.as_slice() {
            if inside(only.0) {
                runs.push(vec![clamp_y(*only)]);
            }
            return runs;
        }

        for pair in pts.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            let Some((a, b)) = clip_segment(p, q, lo, hi) else {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                continue;
            };
            if run.last() != Some(&clamp_y(a)) {
                if !run.is_empty() {
                    runs.push(std::mem::take(&mut run));
                }
                run.push(clamp_y(a));
            }
            run.push(clamp_y(b));
            // Leaving the window ends the run.
            if b != q {
                runs.push(std::mem::take(&mut run));
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    }

    /// Compute the visible window.
    ///
    /// Explicit limits win; otherwise the window covers all plotted data
    /// (y padded by 5%). Empty or degenerate ranges are widened so callers
    /// always get `lo < hi`.
    pub fn view(&self) -> View {
        let mut x_data = Extent::default();
        let mut y_data = Extent::default();
        for line in &self.lines {
            for (x, y) in self.projected(line) {
                x_data.add(x);
                y_data.add(y);
            }
        }
        for v in &self.vlines {
            if let Some(x) = self.xscale.project(v.x) {
                x_data.add(x);
            }
        }

        let x = self
            .xlim
            .and_then(|lim| project_range(self.xscale, lim))
            .or(x_data.range())
            .unwrap_or((0.0, 1.0));
        let y = self
            .ylim
            .and_then(|lim| project_range(self.yscale, lim))
            .or_else(|| y_data.range().map(|(lo, hi)| pad_range(lo, hi, 0.05)))
            .unwrap_or((0.0, 1.0));

        View {
            x: widen(x),
            y: widen(y),
        }
    }
}

/// A vertical stack of panels sharing one output image.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub panels: Vec<Axes>,
    pub size: (u32, u32),
}

impl Figure {
    pub fn stacked(n: usize, size: (u32, u32)) -> Self {
        Self {
            panels: vec![Axes::new(); n.max(1)],
            size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    lo: f64,
    hi: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            lo: f64::INFINITY,
            hi: f64::NEG_INFINITY,
        }
    }
}

impl Extent {
    fn add(&mut self, v: f64) {
        self.lo = self.lo.min(v);
        self.hi = self.hi.max(v);
    }

    fn range(&self) -> Option<(f64, f64)> {
        (self.lo.is_finite() && self.hi.is_finite()).then_some((self.lo, self.hi))
    }
}

/// Part of segment `p`-`q` with `lo <= x <= hi`, endpoints interpolated.
fn clip_segment(
    p: (f64, f64),
    q: (f64, f64),
    lo: f64,
    hi: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let at = |x: f64| {
        let t = (x - p.0) / (q.0 - p.0);
        (x, p.1 + t * (q.1 - p.1))
    };
    let (x_min, x_max) = if p.0 <= q.0 { (p.0, q.0) } else { (q.0, p.0) };
    if x_max < lo || x_min > hi {
        return None;
    }
    let clip = |pt: (f64, f64)| {
        if pt.0 < lo {
            at(lo)
        } else if pt.0 > hi {
            at(hi)
        } else {
            pt
        }
    };
    Some((clip(p), clip(q)))
}

fn project_range(scale: Scale, (lo, hi): (f64, f64)) -> Option<(f64, f64)> {
    Some((scale.project(lo)?, scale.project(hi)?))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = span * frac;
    (min - pad, max + pad)
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
    if hi - lo > 1e-12 {
        return (lo, hi);
    }
    let pad = (lo.abs() * 0.05).max(0.5);
    (lo - pad, hi + pad)
}
