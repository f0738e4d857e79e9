//! Render-independent figure descriptions.
//!
//! All data prep (reference evaluation, clipping to the x window, axis
//! bounds) happens here so the SVG, ASCII and terminal renderers only draw.

use crate::domain::{GaussianParams, QuantityKind, Series};
use crate::io::ingest::Dataset;
use crate::math::evaluate;
use crate::report::Ranking;

/// Label of the analytic curve in every comparison legend.
pub const REFERENCE_LABEL: &str = "Gauss";

/// A labelled polyline in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Analytic curve plus every loaded series of one quantity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonFigure {
    pub kind: QuantityKind,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub reference: Curve,
    /// Drawn dashed, in dataset order.
    pub overlays: Vec<Curve>,
}

/// RMSE per series, worst first, plotted against the rank index.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingFigure {
    pub kind: QuantityKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub y_range: (f64, f64),
}

impl RankingFigure {
    pub fn x_range(&self) -> (f64, f64) {
        (-0.5, self.values.len() as f64 - 0.5)
    }

    /// Tick label for an x position; empty between ranks.
    pub fn tick_label(&self, x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        self.labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

/// One comparison figure per quantity kind that has series.
pub fn comparison_figures(dataset: &Dataset, params: GaussianParams, x_range: (f64, f64)) -> Vec<ComparisonFigure> {
    QuantityKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let series: Vec<&Series> = dataset.of_kind(kind).collect();
            let fig = comparison_figure(kind, &series, params, x_range);
            if fig.is_none() {
                log::debug!("No {} series loaded; skipping figure", kind.display_name());
            }
            fig
        })
        .collect()
}

/// Build the figure for one kind, or `None` when `series` is empty.
///
/// The analytic curve is evaluated once, on the first series' x values.
pub fn comparison_figure(
    kind: QuantityKind,
    series: &[&Series],
    params: GaussianParams,
    x_range: (f64, f64),
) -> Option<ComparisonFigure> {
    let first = series.first()?;
    let (x0, x1) = x_range;
    let in_window = |&(x, _): &(f64, f64)| x >= x0 && x <= x1;

    let reference = Curve {
        label: REFERENCE_LABEL.to_string(),
        points: first
            .x
            .iter()
            .map(|&x| (x, evaluate(kind, x, params)))
            .filter(in_window)
            .collect(),
    };

    let overlays: Vec<Curve> = series
        .iter()
        .map(|s| Curve {
            label: s.key.legend_label().to_string(),
            points: s.points().filter(in_window).collect(),
        })
        .collect();

    let ys = reference
        .points
        .iter()
        .chain(overlays.iter().flat_map(|c| c.points.iter()))
        .map(|&(_, y)| y);
    let y_range = y_bounds(ys).map(|(lo, hi)| padded_range(lo, hi)).unwrap_or((-1.0, 1.0));

    Some(ComparisonFigure {
        kind,
        title: kind.comparison_title(),
        x_label: "x",
        y_label: kind.y_label(),
        x_range,
        y_range,
        reference,
        overlays,
    })
}

/// One ranking figure per ranked kind.
pub fn ranking_figures(rankings: &[Ranking]) -> Vec<RankingFigure> {
    rankings
        .iter()
        .map(|r| {
            let values: Vec<f64> = r.scores.iter().map(|s| s.rmse).collect();
            let hi = values.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max);
            let hi = if hi > 0.0 { hi * 1.1 } else { 1.0 };
            RankingFigure {
                kind: r.kind,
                title: r.kind.ranking_title(),
                labels: r.scores.iter().map(|s| s.key.legend_label().to_string()).collect(),
                values,
                y_range: (0.0, hi),
            }
        })
        .collect()
}

fn y_bounds(ys: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for y in ys.filter(|y| y.is_finite()) {
        lo = lo.min(y);
        hi = hi.max(y);
    }
    (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
}

/// Pad a range by 5%, or by a fixed amount when it is degenerate.
pub fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span < 1e-9 { 0.5 } else { span * 0.05 };
    (min - pad, max + pad)
}
