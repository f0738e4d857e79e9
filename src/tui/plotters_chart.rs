//! Plotters-powered figure widget for Ratatui.
//!
//! The same drawing routines that produce the SVG files render here into the
//! Ratatui buffer via `plotters-ratatui-backend`, with the terminal theme.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::chart::{ChartTheme, draw_comparison, draw_ranking};
use crate::plot::{ComparisonFigure, RankingFigure};

/// Which figure to draw.
#[derive(Debug, Clone, Copy)]
pub enum FigureRef<'a> {
    Comparison(&'a ComparisonFigure),
    Ranking(&'a RankingFigure),
}

/// A render-only chart: all data prep happens before `render()`.
pub struct FigureChart<'a> {
    pub figure: FigureRef<'a>,
    pub theme: ChartTheme,
}

impl<'a> Widget for FigureChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let figure = self.figure;
        let theme = self.theme;
        let widget = widget_fn(move |root| {
            match figure {
                FigureRef::Comparison(fig) => draw_comparison(&root, fig, &theme)?,
                FigureRef::Ranking(fig) => draw_ranking(&root, fig, &theme)?,
            }
            Ok(())
        });

        widget.render(area, buf);
    }
}
