//! Figure preparation and rendering.
//!
//! - render-independent figure data (`figure`)
//! - Plotters drawing shared by SVG and the terminal viewer (`chart`)
//! - SVG files (`svg`)
//! - ASCII terminal plots (`ascii`)

pub mod ascii;
pub mod chart;
pub mod figure;
pub mod svg;

pub use ascii::render_ascii_figure;
pub use figure::*;
pub use svg::save_figures;
