//! Ratatui-based figure viewer.
//!
//! Pages through the comparison figures (value, first derivative, second
//! derivative) and, on request, the RMSE ranking figures. The scores of the
//! current quantity kind are listed under the chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::app::pipeline::RunOutput;
use crate::domain::QuantityKind;
use crate::error::AppError;
use crate::plot::chart::ChartTheme;

mod plotters_chart;

use plotters_chart::{FigureChart, FigureRef};

/// Start the viewer on a finished run.
pub fn run(output: RunOutput) -> Result<(), AppError> {
    if output.figures.is_empty() {
        return Err(AppError::no_data("Nothing to show: no comparison figures were built."));
    }

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::render(format!("Failed to initialize terminal: {e}")))?;

    let mut app = Viewer::new(output);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::render(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::render(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Comparison(usize),
    Ranking(usize),
}

struct Viewer {
    run: RunOutput,
    show_rankings: bool,
    selected: usize,
    status: String,
}

impl Viewer {
    fn new(run: RunOutput) -> Self {
        Self {
            run,
            show_rankings: false,
            selected: 0,
            status: String::new(),
        }
    }

    fn pages(&self) -> Vec<Page> {
        let mut pages: Vec<Page> = (0..self.run.figures.len()).map(Page::Comparison).collect();
        if self.show_rankings {
            pages.extend((0..self.run.ranking_figures.len()).map(Page::Ranking));
        }
        pages
    }

    fn current(&self) -> Page {
        let pages = self.pages();
        pages[self.selected.min(pages.len() - 1)]
    }

    fn page_kind(&self, page: Page) -> QuantityKind {
        match page {
            Page::Comparison(i) => self.run.figures[i].kind,
            Page::Ranking(i) => self.run.ranking_figures[i].kind,
        }
    }

    fn page_title(&self, page: Page) -> String {
        match page {
            Page::Comparison(i) => self.run.figures[i].title.clone(),
            Page::Ranking(i) => self.run.ranking_figures[i].title.clone(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::render(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::render(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::render(format!("Event read error: {e}")))? {
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
        let n = self.pages().len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % n;
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.selected = (self.selected + n - 1) % n;
            }
            KeyCode::Char('r') => {
                self.show_rankings = !self.show_rankings;
                self.selected = self.selected.min(self.pages().len() - 1);
                self.status = if self.show_rankings {
                    "RMSE ranking pages on.".to_string()
                } else {
                    "RMSE ranking pages off.".to_string()
                };
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let kind = self.page_kind(self.current());
        let n_scores = self.run.scores.iter().filter(|s| s.key.kind == kind).count();
        let scores_height = (n_scores as u16 + 3).min(10);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(scores_height),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_scores(frame, chunks[2], kind);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let current = self.current();
        let mut spans = vec![Span::styled("gcmp", Style::default().fg(Color::Cyan)), Span::raw(" | ")];
        for (i, page) in self.pages().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let label = match page {
                Page::Comparison(_) => self.page_kind(page).prefix().to_string(),
                Page::Ranking(_) => format!("rmse:{}", self.page_kind(page).prefix()),
            };
            let style = if page == current {
                Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let page = self.current();
        let block = Block::default().title(self.page_title(page)).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let figure = match page {
            Page::Comparison(i) => FigureRef::Comparison(&self.run.figures[i]),
            Page::Ranking(i) => FigureRef::Ranking(&self.run.ranking_figures[i]),
        };
        frame.render_widget(
            FigureChart {
                figure,
                theme: ChartTheme::TERMINAL,
            },
            inner,
        );
    }

    fn draw_scores(&self, frame: &mut ratatui::Frame<'_>, area: Rect, kind: QuantityKind) {
        let mut lines: Vec<Line> = Vec::new();
        for s in self.run.scores.iter().filter(|s| s.key.kind == kind) {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<24}", s.key.name), Style::default().fg(Color::White)),
                Span::styled(
                    format!(" n={:<6} rmse={:.4e}  max={:.4e}", s.n, s.rmse, s.max_abs_error),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled("(no series)", Style::default().fg(Color::Yellow))));
        }

        let title = format!("Scores: {} ({})", kind.display_name(), kind.y_label());
        let p = Paragraph::new(Text::from(lines)).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ figure  r rankings  q quit";
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
    use crate::app::pipeline::run_compare_with_dataset;
    use crate::domain::{CompareConfig, Series, SeriesKey};
    use crate::io::ingest::Dataset;

    fn viewer() -> Viewer {
        let mut dataset = Dataset::default();
        for name in ["v_0_0_NN", "d1_0_0_NN"] {
            dataset.insert(Series {
                key: SeriesKey::parse(name).unwrap(),
                x: vec![0.0, 1.0],
                y: vec![1.0, 0.5],
            });
        }
        Viewer::new(run_compare_with_dataset(&CompareConfig::default(), dataset).unwrap())
    }

    #[test]
    fn arrows_cycle_through_figures() {
        let mut v = viewer();
        assert_eq!(v.current(), Page::Comparison(0));
        assert!(!v.handle_key(KeyCode::Right));
        assert_eq!(v.current(), Page::Comparison(1));
        v.handle_key(KeyCode::Right);
        assert_eq!(v.current(), Page::Comparison(0));
        v.handle_key(KeyCode::Left);
        assert_eq!(v.page_kind(v.current()), QuantityKind::FirstDerivative);
    }

    #[test]
    fn ranking_pages_toggle() {
        let mut v = viewer();
        assert_eq!(v.pages().len(), 2);
        v.handle_key(KeyCode::Char('r'));
        assert_eq!(v.pages().len(), 4);
        v.selected = 3;
        v.handle_key(KeyCode::Char('r'));
        assert_eq!(v.pages().len(), 2);
        assert_eq!(v.current(), Page::Comparison(1));
    }

    #[test]
    fn quit_keys_exit() {
        let mut v = viewer();
        assert!(v.handle_key(KeyCode::Char('q')));
        assert!(v.handle_key(KeyCode::Esc));
    }
}
