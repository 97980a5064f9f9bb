//! ASCII rendering of the plane.
//!
//! [`render`] is a pure function from points and groups to a [`Canvas`]; it holds
//! no state between calls. Cells are layered in this order, later layers winning:
//!
//! 1. `.` at every integer grid intersection inside the window
//! 2. the x axis (`-`, or `+` where it crosses the grid)
//! 3. the y axis (`|`, or `+` where it crosses the grid or the x axis)
//! 4. tick labels every two units, written only over blank or `.` cells
//! 5. points (group symbol, or `O` when ungrouped) followed by up to four
//!    characters of their name, again only over blank or `.` cells

use crate::cluster::Group;
use crate::error::{Error, Result};
use crate::geometry::Point;
use std::fmt;

/// Symbol for points without a group.
pub const UNGROUPED_SYMBOL: char = 'O';

const LABEL_CHARS: usize = 4;
const TICK_STEP: usize = 2;

/// The region of the plane that is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Bottom edge.
    pub y_min: f64,
    /// Top edge.
    pub y_max: f64,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -7.0,
            y_max: 7.0,
        }
    }
}

/// A window mapped onto a `width × height` character grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Plane region.
    pub window: Window,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            window: Window::default(),
            width: 63,
            height: 29,
        }
    }
}

impl Viewport {
    /// Create a viewport, checking that the window is non-degenerate and that
    /// every integer grid line gets a cell of its own.
    pub fn new(window: Window, width: usize, height: usize) -> Result<Self> {
        if width < 2 || height < 2 {
            return Err(Error::InvalidParameter {
                name: "viewport",
                message: "width and height must be at least 2",
            });
        }
        let finite = [window.x_min, window.x_max, window.y_min, window.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || window.x_min >= window.x_max || window.y_min >= window.y_max {
            return Err(Error::InvalidParameter {
                name: "window",
                message: "bounds must be finite with min < max",
            });
        }
        if window.x_max - window.x_min > (width - 1) as f64
            || window.y_max - window.y_min > (height - 1) as f64
        {
            return Err(Error::InvalidParameter {
                name: "window",
                message: "span must not exceed one unit per cell",
            });
        }
        Ok(Self {
            window,
            width,
            height,
        })
    }

    /// Column of horizontal coordinate `x`.
    pub fn column(&self, x: f64) -> usize {
        scale(x, self.window.x_min, self.window.x_max, self.width)
    }

    /// Row of vertical coordinate `y` (row 0 is the top edge).
    pub fn row(&self, y: f64) -> usize {
        let w = &self.window;
        scale(w.y_max - y, 0.0, w.y_max - w.y_min, self.height)
    }
}

/// Map `value` in `[min, max]` linearly onto cells `0..cells`, clamping outside values.
pub fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if cells == 0 || max <= min {
        return 0;
    }
    let last = (cells - 1) as f64;
    let r = (value - min) / (max - min);
    let c = (r * last).round();
    if c.is_nan() {
        0
    } else {
        c.clamp(0.0, last) as usize
    }
}

/// A rendered character grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`, if inside the canvas.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    fn set(&mut self, row: usize, col: usize, ch: char) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = ch;
        }
    }

    /// Write `text` starting at `(row, col)` over blank or grid cells only.
    fn write_soft(&mut self, row: usize, col: usize, text: &str) {
        for (k, ch) in text.chars().enumerate() {
            if matches!(self.get(row, col + k), Some(' ' | '.')) {
                self.set(row, col + k, ch);
            }
        }
    }

    /// Row `row` as a string, if inside the canvas.
    pub fn line(&self, row: usize) -> Option<String> {
        self.lines().nth(row)
    }

    fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }

    /// The canvas inside a border with a centred title and a group legend.
    pub fn framed(&self, title: &str, groups: &[Group]) -> String {
        let inner = self.width + 2;
        let rule = format!("  +{}+\n", "-".repeat(inner));
        let title_len = title.chars().count();
        let pad = inner.saturating_sub(title_len) / 2;
        let rest = inner.saturating_sub(pad + title_len);

        let mut out = String::new();
        out.push('\n');
        out.push_str(&rule);
        out.push_str(&format!("  |{}{}{}|\n", " ".repeat(pad), title, " ".repeat(rest)));
        out.push_str(&rule);
        for line in self.lines() {
            out.push_str(&format!("  | {line} |\n"));
        }
        out.push_str(&rule);
        if !groups.is_empty() {
            out.push_str("  Legend:");
            for g in groups {
                out.push_str(&format!("  [{}]={}", g.symbol, g.name));
            }
            out.push('\n');
        }
        out.push_str("  '.': integer grid | '+': axis crossing\n");
        out
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Draw `points` on the plane described by `viewport`.
///
/// A point's symbol comes from `groups[point.group]`; points without a valid
/// group index are drawn as [`UNGROUPED_SYMBOL`].
pub fn render(points: &[Point], groups: &[Group], viewport: &Viewport) -> Canvas {
    let mut canvas = Canvas::blank(viewport.width, viewport.height);
    let w = viewport.window;

    let xs = integer_range(w.x_min, w.x_max, viewport.width);
    let ys = integer_range(w.y_min, w.y_max, viewport.height);

    for &yi in &ys {
        for &xi in &xs {
            canvas.set(viewport.row(yi as f64), viewport.column(xi as f64), '.');
        }
    }

    let axis_row = viewport.row(0.0);
    for col in 0..canvas.width {
        let ch = match canvas.get(axis_row, col) {
            Some('.' | '+') => '+',
            _ => '-',
        };
        canvas.set(axis_row, col, ch);
    }

    let axis_col = viewport.column(0.0);
    for row in 0..canvas.height {
        let ch = match canvas.get(row, axis_col) {
            Some('.' | '+' | '-') => '+',
            _ => '|',
        };
        canvas.set(row, axis_col, ch);
    }

    for &xi in xs.iter().step_by(TICK_STEP).filter(|&&v| v != 0) {
        canvas.write_soft(axis_row + 1, viewport.column(xi as f64), &xi.to_string());
    }
    for &yi in ys.iter().step_by(TICK_STEP).filter(|&&v| v != 0) {
        canvas.write_soft(viewport.row(yi as f64), axis_col + 1, &yi.to_string());
    }

    for p in points {
        let row = viewport.row(p.y);
        let col = viewport.column(p.x);
        let symbol = p
            .group
            .and_then(|g| groups.get(g))
            .map_or(UNGROUPED_SYMBOL, |g| g.symbol);
        canvas.set(row, col, symbol);
        let label: String = p.name.chars().take(LABEL_CHARS).collect();
        canvas.write_soft(row, col + 1, &label);
    }

    canvas
}

/// Integers in `[min, max]`, or none when there are more of them than `cells`.
fn integer_range(min: f64, max: f64, cells: usize) -> Vec<i64> {
    let (lo, hi) = (min.ceil(), max.floor());
    if !lo.is_finite() || !hi.is_finite() || hi < lo || hi - lo >= cells as f64 {
        return Vec::new();
    }
    (lo as i64..=hi as i64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Palette;
    use crate::geometry::Coord;

    #[test]
    fn test_scale_edges_and_clamp() {
        assert_eq!(scale(-10.0, -10.0, 10.0, 63), 0);
        assert_eq!(scale(10.0, -10.0, 10.0, 63), 62);
        assert_eq!(scale(0.0, -10.0, 10.0, 63), 31);
        assert_eq!(scale(-50.0, -10.0, 10.0, 63), 0);
        assert_eq!(scale(50.0, -10.0, 10.0, 63), 62);
        assert_eq!(scale(f64::NAN, -10.0, 10.0, 63), 0);
    }

    #[test]
    fn test_viewport_mapping() {
        let vp = Viewport::default();
        assert_eq!(vp.column(0.0), 31);
        assert_eq!(vp.row(0.0), 14);
        assert_eq!(vp.row(7.0), 0);
        assert_eq!(vp.row(-7.0), 28);
        assert_eq!(vp.row(100.0), 0);
    }

    #[test]
    fn test_viewport_validation() {
        let w = Window::default();
        assert!(Viewport::new(w, 1, 10).is_err());
        let flat = Window { y_max: -7.0, ..w };
        assert!(Viewport::new(flat, 20, 10).is_err());
        assert!(Viewport::new(w, 21, 15).is_ok());
    }

    #[test]
    fn test_viewport_rejects_window_wider_than_grid() {
        let huge = Window {
            x_min: -1e15,
            x_max: 1e15,
            ..Window::default()
        };
        assert!(Viewport::new(huge, 63, 29).is_err());
        assert!(Viewport::new(Window::default(), 20, 29).is_err());
        assert!(Viewport::new(Window::default(), 63, 14).is_err());
    }

    #[test]
    fn test_render_huge_window_skips_grid() {
        // Public fields allow bypassing `Viewport::new`; rendering stays bounded.
        let vp = Viewport {
            window: Window {
                x_min: -1e15,
                x_max: 1e15,
                y_min: -1e15,
                y_max: 1e15,
            },
            width: 11,
            height: 5,
        };
        let c = render(&[Point::new("P", 0.0, 0.0)], &[], &vp);
        assert_eq!(c.get(0, 0), Some(' '));
        assert_eq!(c.get(2, 0), Some('-'));
        assert_eq!(c.get(0, 5), Some('|'));
        assert_eq!(c.get(2, 5), Some(UNGROUPED_SYMBOL));
        assert!(integer_range(-1e15, 1e15, 11).is_empty());
        assert_eq!(integer_range(-1.5, 1.5, 3), vec![-1, 0, 1]);
    }

    #[test]
    fn test_render_axes_and_grid() {
        let vp = Viewport::default();
        let c = render(&[], &[], &vp);
        assert_eq!(c.width(), 63);
        assert_eq!(c.height(), 29);
        assert_eq!(c.get(14, 31), Some('+'));
        assert_eq!(c.get(14, 1), Some('-'));
        assert_eq!(c.get(14, 0), Some('+'));
        assert_eq!(c.get(1, 31), Some('|'));
        assert_eq!(c.get(2, 31), Some('+'));
        assert_eq!(c.get(0, 0), Some('.'));
        assert!(c.line(15).unwrap().starts_with("-10"));
        assert_eq!(c.line(28).map(|l| l.len()), Some(63));
        assert_eq!(c.line(29), None);
        assert_eq!(c.get(0, 32), Some('7'));
    }

    #[test]
    fn test_render_points() {
        let vp = Viewport::default();
        let palette = Palette::default();
        let groups = vec![Group::new(0, Coord::new(0.0, 0.0), &palette)];
        let mut grouped = Point::new("Alpha", 5.0, 5.0);
        grouped.group = Some(0);
        let loose = Point::new("Beta", -5.0, -5.0);
        let stale = Point {
            group: Some(7),
            ..Point::new("Gam", -5.0, 5.0)
        };

        let c = render(&[grouped, loose, stale], &groups, &vp);

        let (r, col) = (vp.row(5.0), vp.column(5.0));
        assert_eq!(c.get(r, col), Some('o'));
        let label: String = (1..=4).filter_map(|k| c.get(r, col + k)).collect();
        assert_eq!(label, "Alph");

        assert_eq!(c.get(vp.row(-5.0), vp.column(-5.0)), Some(UNGROUPED_SYMBOL));
        assert_eq!(c.get(vp.row(5.0), vp.column(-5.0)), Some(UNGROUPED_SYMBOL));
    }

    #[test]
    fn test_render_clamps_far_points() {
        let vp = Viewport::default();
        let c = render(&[Point::new("far", 1e6, -1e6)], &[], &vp);
        assert_eq!(c.get(28, 62), Some(UNGROUPED_SYMBOL));
    }

    #[test]
    fn test_framed_has_title_and_legend() {
        let vp = Viewport::default();
        let palette = Palette::default();
        let groups = vec![Group::new(0, Coord::new(0.0, 0.0), &palette)];
        let text = render(&[], &groups, &vp).framed("PLANE", &groups);
        assert!(text.contains("PLANE"));
        assert!(text.contains("[o]=Group-1"));
        // Blank lead line, three rules, title, 29 rows, legend, footer.
        assert_eq!(text.lines().count(), 36);
    }
}
