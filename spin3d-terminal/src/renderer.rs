/// Cell-grid canvas implementing the engine's drawing surface
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use spin3d_core::{Rgb, Surface};
use std::io::Write;

/// Approximate pixel footprint of one terminal cell. Cells are roughly
/// twice as tall as wide, so advertising 9x18 keeps projected geometry
/// at its true aspect ratio.
pub const CELL_WIDTH: f32 = 9.0;
pub const CELL_HEIGHT: f32 = 18.0;

const FILL_CHAR: char = '░';
const STROKE_CHAR: char = '█';

// Degenerate projections (depth near zero) produce unbounded
// coordinates; edges that long are skipped rather than walked.
const MAX_EDGE_CELLS: i32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Rasterizes filled and stroked polygons into a grid of colored
/// characters, then queues the grid to a terminal writer.
pub struct TermCanvas {
    cols: usize,
    rows: usize,
    frame_width: f32,
    frame_height: f32,
    cells: Vec<Cell>,
}

impl TermCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            frame_width: 1.0,
            frame_height: 1.0,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Adopt a new terminal size; called on resize events
    pub fn set_grid(&mut self, cols: u16, rows: u16) {
        let cols = cols as usize;
        let rows = rows as usize;
        if cols != self.cols || rows != self.rows {
            self.cols = cols;
            self.rows = rows;
            self.cells = vec![EMPTY; cols * rows];
        }
    }

    /// Map a frame-space point onto the cell grid
    fn to_cell(&self, p: &Point2<f32>) -> (f32, f32) {
        (
            p.x / self.frame_width * self.cols as f32,
            p.y / self.frame_height * self.rows as f32,
        )
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols + col as usize] = Cell { ch, color };
    }

    fn fill_triangle(
        &mut self,
        v0: (f32, f32),
        v1: (f32, f32),
        v2: (f32, f32),
        ch: char,
        color: Color,
    ) {
        // Bounding box, clipped to the grid
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.cols as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.rows as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(x, y, ch, color);
                    }
                }
            }
        }
    }

    fn stroke_line(&mut self, a: (f32, f32), b: (f32, f32), ch: char, color: Color) {
        // Clamp before the integer cast so non-finite endpoints cannot
        // wrap the arithmetic below
        let clip = |v: f32| v.clamp(-1e6, 1e6).round() as i32;
        let (mut x0, mut y0) = (clip(a.0), clip(a.1));
        let (x1, y1) = (clip(b.0), clip(b.1));

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        if dx > MAX_EDGE_CELLS || -dy > MAX_EDGE_CELLS {
            return;
        }

        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Queue the grid to the terminal, eliding redundant color changes
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TermCanvas {
    fn size(&self) -> (f32, f32) {
        (
            self.cols as f32 * CELL_WIDTH,
            self.rows as f32 * CELL_HEIGHT,
        )
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.frame_width = width.max(1.0);
        self.frame_height = height.max(1.0);
        self.cells.fill(EMPTY);
    }

    fn draw_polygon(&mut self, points: &[Point2<f32>], fill: Rgb, stroke: Rgb, _line_width: f32) {
        if points.len() < 3 {
            return;
        }
        let cells: Vec<(f32, f32)> = points.iter().map(|p| self.to_cell(p)).collect();

        // Fan triangulation covers the interior
        let fill_color = to_color(fill);
        for i in 1..cells.len() - 1 {
            self.fill_triangle(cells[0], cells[i], cells[i + 1], FILL_CHAR, fill_color);
        }

        // Stroke each edge of the closed path on top of the fill
        let stroke_color = to_color(stroke);
        for i in 0..cells.len() {
            let j = (i + 1) % cells.len();
            self.stroke_line(cells[i], cells[j], STROKE_CHAR, stroke_color);
        }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
