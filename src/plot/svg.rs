//! SVG figure files.
//!
//! Comparison figures are written as `comp_<kind>.svg`, ranking figures as
//! `diff_<kind>.svg`, where `<kind>` is `v`, `d1` or `d2`.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::AppError;
use crate::plot::chart::{ChartTheme, draw_comparison, draw_ranking};
use crate::plot::figure::{ComparisonFigure, RankingFigure};

pub const FIGURE_SIZE: (u32, u32) = (1024, 768);

pub fn comparison_path(dir: &Path, fig: &ComparisonFigure) -> PathBuf {
    dir.join(format!("comp_{}.svg", fig.kind.prefix()))
}

pub fn ranking_path(dir: &Path, fig: &RankingFigure) -> PathBuf {
    dir.join(format!("diff_{}.svg", fig.kind.prefix()))
}

pub fn write_comparison_svg(path: &Path, fig: &ComparisonFigure) -> Result<(), AppError> {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    draw_comparison(&root, fig, &ChartTheme::SVG)
        .map_err(|e| AppError::render(format!("Failed to draw '{}': {e}", fig.title)))?;
    root.present()
        .map_err(|e| AppError::render(format!("Failed to write '{}': {e}", path.display())))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn write_ranking_svg(path: &Path, fig: &RankingFigure) -> Result<(), AppError> {
    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    draw_ranking(&root, fig, &ChartTheme::SVG)
        .map_err(|e| AppError::render(format!("Failed to draw '{}': {e}", fig.title)))?;
    root.present()
        .map_err(|e| AppError::render(format!("Failed to write '{}': {e}", path.display())))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Write every figure into `dir` (created if needed) and return the paths.
pub fn save_figures(
    dir: &Path,
    comparisons: &[ComparisonFigure],
    rankings: &[RankingFigure],
) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::input(format!("Failed to create output directory '{}': {e}", dir.display())))?;

    let mut written = Vec::with_capacity(comparisons.len() + rankings.len());
    for fig in comparisons {
        let path = comparison_path(dir, fig);
        write_comparison_svg(&path, fig)?;
        written.push(path);
    }
    for fig in rankings {
        let path = ranking_path(dir, fig);
        write_ranking_svg(&path, fig)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GaussianParams, QuantityKind, Series, SeriesKey};
    use crate::plot::figure::comparison_figure;

    #[test]
    fn writes_comparison_svg_with_title_and_legend() {
        let dir = tempfile::tempdir().unwrap();
        let x: Vec<f64> = (0..51).map(|i| -2.5 + 0.1 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|x| (-x * x).exp() + 0.01).collect();
        let series = Series {
            key: SeriesKey::parse("v_0_0_NN").unwrap(),
            x,
            y,
        };
        let fig = comparison_figure(QuantityKind::Value, &[&series], GaussianParams::default(), (-2.5, 2.5)).unwrap();

        let written = save_figures(dir.path(), &[fig], &[]).unwrap();
        assert_eq!(written, vec![dir.path().join("comp_v.svg")]);

        let svg = fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Fitted NNs vs. Gaussian"));
        assert!(svg.contains("Gauss"));
        assert!(svg.contains("0_0_NN"));
    }
}
