//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - analytic curve: `-` line
//! - overlay series: one marker per series (`o`, `x`, `+`, ...), drawn as points

use crate::plot::figure::ComparisonFigure;

const MARKERS: [char; 6] = ['o', 'x', '+', '*', '#', '@'];

/// Render a comparison figure on a `width` x `height` character grid.
pub fn render_ascii_figure(fig: &ComparisonFigure, width: usize, height: usize) -> String {
    let mut canvas = Canvas::new(width.max(10), height.max(5), fig.x_range, fig.y_range);

    // Curve first so points can overlay.
    canvas.polyline(&fig.reference.points, '-');
    for (idx, curve) in fig.overlays.iter().enumerate() {
        for &p in &curve.points {
            canvas.put(p, marker(idx));
        }
    }

    let (x_min, x_max) = fig.x_range;
    let (y_min, y_max) = fig.y_range;
    let mut out = format!(
        "{} | x=[{x_min:.3}, {x_max:.3}] | {}=[{y_min:.3}, {y_max:.3}]\n",
        fig.title, fig.y_label
    );
    out.push_str(&canvas.to_text());

    out.push_str(&format!("- {}", fig.reference.label));
    for (idx, curve) in fig.overlays.iter().enumerate() {
        out.push_str(&format!("  {} {}", marker(idx), curve.label));
    }
    out.push('\n');

    out
}

fn marker(idx: usize) -> char {
    MARKERS[idx % MARKERS.len()]
}

/// Character grid addressed in data coordinates; row 0 is the top.
struct Canvas {
    cells: Vec<Vec<char>>,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            x_range,
            y_range,
        }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    /// Map a data point to `(col, row)`, clamped to the grid.
    fn cell(&self, (x, y): (f64, f64)) -> (usize, usize) {
        let unit = |v: f64, (lo, hi): (f64, f64)| ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        let last_col = (self.width() - 1) as f64;
        let last_row = (self.height() - 1) as f64;
        let col = (unit(x, self.x_range) * last_col).round() as usize;
        let row = (last_row - unit(y, self.y_range) * last_row).round() as usize;
        (col, row)
    }

    fn put(&mut self, p: (f64, f64), ch: char) {
        let (col, row) = self.cell(p);
        self.cells[row][col] = ch;
    }

    /// Connect consecutive points, leaving already drawn cells alone.
    fn polyline(&mut self, points: &[(f64, f64)], ch: char) {
        let cells: Vec<(usize, usize)> = points.iter().map(|&p| self.cell(p)).collect();
        if let [only] = cells.as_slice() {
            self.cells[only.1][only.0] = ch;
        }
        for pair in cells.windows(2) {
            self.segment(pair[0], pair[1], ch);
        }
    }

    /// Bresenham between two cells.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (mut c, mut r) = (from.0 as isize, from.1 as isize);
        let (c1, r1) = (to.0 as isize, to.1 as isize);
        let dc = (c1 - c).abs();
        let dr = -(r1 - r).abs();
        let step_c = if c < c1 { 1 } else { -1 };
        let step_r = if r < r1 { 1 } else { -1 };
        let mut err = dc + dr;

        loop {
            let cell = &mut self.cells[r as usize][c as usize];
            if *cell == ' ' {
                *cell = ch;
            }
            if c == c1 && r == r1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += step_c;
            }
            if e2 <= dc {
                err += dc;
                r += step_r;
            }
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.height() * (self.width() + 1));
        for row in &self.cells {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuantityKind;
    use crate::plot::figure::Curve;

    #[test]
    fn plot_golden_snapshot_small() {
        let fig = ComparisonFigure {
            kind: QuantityKind::Value,
            title: "Fitted NNs vs. Gaussian".to_string(),
            x_label: "x",
            y_label: "f(x)",
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
            reference: Curve {
                label: "Gauss".to_string(),
                points: vec![(0.0, 0.0), (1.0, 0.0)],
            },
            overlays: vec![Curve {
                label: "0_0_NN".to_string(),
                points: vec![(0.0, 1.0), (1.0, 0.0)],
            }],
        };

        let txt = render_ascii_figure(&fig, 10, 5);
        let expected = concat!(
            "Fitted NNs vs. Gaussian | x=[0.000, 1.000] | f(x)=[0.000, 1.000]\n",
            "o         \n",
            "          \n",
            "          \n",
            "          \n",
            "---------o\n",
            "- Gauss  o 0_0_NN\n",
        );
        assert_eq!(txt, expected);
    }
}
