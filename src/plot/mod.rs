//! Plotting surface, plot helpers and renderers.
//!
//! The helpers (`plot_hst`, `plot_diag`, `plot_t`) only ever mutate an
//! [`Axes`] owned by the caller. Turning the result into an image is a
//! separate step: `render` (SVG, terminal) or `ascii` (plain text).

pub mod ascii;
pub mod axes;
pub mod diag;
pub mod hist;
pub mod pretty;
pub mod range;
pub mod render;

pub use ascii::render_ascii;
pub use axes::*;
pub use diag::*;
pub use hist::*;
pub use pretty::pretty;
pub use range::*;
