//! Plotters drawing routines shared by the SVG writer and the terminal viewer.
//!
//! The functions are generic over the drawing backend; a `ChartTheme` carries
//! the few things that differ between a white SVG page and a dark,
//! low-resolution terminal.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::plot::figure::{ComparisonFigure, RankingFigure};

/// Overlay colors, cycled per series.
const PALETTE: [RGBColor; 6] = [
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
];

#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub reference: RGBColor,
    /// Fill the whole area before drawing.
    pub fill_background: bool,
    pub draw_caption: bool,
    pub draw_mesh: bool,
    pub font_size: u32,
    pub title_size: u32,
    pub margin: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
    pub line_width: u32,
    /// Ranking marker radius in pixels; `0` draws single pixels.
    pub marker_radius: u32,
    pub dash: (u32, u32),
}

impl ChartTheme {
    pub const SVG: ChartTheme = ChartTheme {
        background: WHITE,
        foreground: BLACK,
        reference: RGBColor(31, 119, 180),
        fill_background: true,
        draw_caption: true,
        draw_mesh: true,
        font_size: 16,
        title_size: 24,
        margin: 15,
        x_label_area: 50,
        y_label_area: 70,
        line_width: 2,
        marker_radius: 4,
        dash: (10, 6),
    };

    /// Terminal cells are low-res: compact label areas, no mesh, and pixel
    /// markers (circle radii are mis-scaled by the ratatui backend).
    pub const TERMINAL: ChartTheme = ChartTheme {
        background: BLACK,
        foreground: WHITE,
        reference: RGBColor(0, 255, 255),
        fill_background: false,
        draw_caption: false,
        draw_mesh: false,
        font_size: 10,
        title_size: 10,
        margin: 1,
        x_label_area: 3,
        y_label_area: 8,
        line_width: 1,
        marker_radius: 0,
        dash: (2, 2),
    };

    pub fn overlay_color(&self, idx: usize) -> RGBColor {
        PALETTE[idx % PALETTE.len()]
    }
}

/// Draw the analytic curve, dashed overlays, and an upper-right legend.
pub fn draw_comparison<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    fig: &ComparisonFigure,
    theme: &ChartTheme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if theme.fill_background {
        root.fill(&theme.background)?;
    }

    let (x0, x1) = fig.x_range;
    let (y0, y1) = fig.y_range;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .x_label_area_size(theme.x_label_area)
        .y_label_area_size(theme.y_label_area);
    if theme.draw_caption {
        builder.caption(
            &fig.title,
            ("sans-serif", theme.title_size).into_font().color(&theme.foreground),
        );
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(fig.x_label)
            .y_desc(fig.y_label)
            .x_labels(11)
            .y_labels(8)
            .label_style(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
            .axis_style(theme.foreground);
        if !theme.draw_mesh {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    let reference_style = theme.reference.stroke_width(theme.line_width);
    chart
        .draw_series(LineSeries::new(fig.reference.points.iter().copied(), reference_style))?
        .label(fig.reference.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    let (dash, gap) = theme.dash;
    for (idx, curve) in fig.overlays.iter().enumerate() {
        let style = theme.overlay_color(idx).stroke_width(theme.line_width);
        chart
            .draw_series(DashedLineSeries::new(curve.points.iter().copied(), dash, gap, style))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(theme.background.mix(0.8))
        .border_style(theme.foreground)
        .label_font(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
        .draw()?;

    Ok(())
}

/// Draw RMSE against rank with point markers and series names as ticks.
pub fn draw_ranking<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    fig: &RankingFigure,
    theme: &ChartTheme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    if theme.fill_background {
        root.fill(&theme.background)?;
    }

    let (x0, x1) = fig.x_range();
    let (y0, y1) = fig.y_range;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(theme.margin)
        .x_label_area_size(theme.x_label_area)
        .y_label_area_size(theme.y_label_area);
    if theme.draw_caption {
        builder.caption(
            &fig.title,
            ("sans-serif", theme.title_size).into_font().color(&theme.foreground),
        );
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let tick = |v: &f64| fig.tick_label(*v);
    {
        let mut mesh = chart.configure_mesh();
        mesh.y_desc("RMSE")
            .x_labels(fig.values.len() + 1)
            .y_labels(8)
            .x_label_formatter(&tick)
            .label_style(("sans-serif", theme.font_size).into_font().color(&theme.foreground))
            .axis_style(theme.foreground);
        if !theme.draw_mesh {
            mesh.disable_mesh();
        }
        mesh.draw()?;
    }

    let style = theme.reference.stroke_width(theme.line_width);
    let points: Vec<(f64, f64)> = fig
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), style))?;
    if theme.marker_radius > 0 {
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, theme.marker_radius, theme.reference.filled())),
        )?;
    } else {
        chart.draw_series(points.iter().map(|&p| Pixel::new(p, theme.foreground)))?;
    }

    Ok(())
}
