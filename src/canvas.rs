//! Drawing surface for winds and chimes
//!
//! World coordinates are mapped onto a braille dot grid (2x4 dots per
//! terminal cell), then blitted into the terminal back buffer.

use crate::terminal::Terminal;
use crossterm::style::Color;

// Braille constants (2x4 dot grid per character)
const BRAILLE_BASE: u32 = 0x2800;
const DOTS_X: usize = 2;
const DOTS_Y: usize = 4;

/// Minimal turtle-style drawing capability
pub trait Canvas {
    /// Save the current origin
    fn push(&mut self);
    /// Restore the last saved origin
    fn pop(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    /// Line from the origin to origin + (dx, dy)
    fn line(&mut self, dx: f64, dy: f64, color: Color);
    /// Single dot at the origin
    fn dot(&mut self, color: Color);
}

/// Encode a 2x4 dot pattern as a braille character
fn encode_braille(dots: u8) -> char {
    // Braille dot positions:
    // 0 3
    // 1 4
    // 2 5
    // 6 7
    char::from_u32(BRAILLE_BASE + dots as u32).unwrap_or(' ')
}

/// Bit for the dot at (dx, dy) inside one cell
fn dot_bit(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 3) => 1 << 6,
        (1, 3) => 1 << 7,
        (0, y) => 1 << y,
        (_, y) => 1 << (y + 3),
    }
}

pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
    colors: Vec<Option<Color>>,
    scale: f64,
    offset: (f64, f64),
    origin: (f64, f64),
    stack: Vec<(f64, f64)>,
}

impl BrailleCanvas {
    /// Fit a square world of side `world` into `cols` x `rows` cells
    pub fn new(cols: u16, rows: u16, world: f64) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        let dots_w = (cols * DOTS_X) as f64;
        let dots_h = (rows * DOTS_Y) as f64;
        let scale = (dots_w.min(dots_h) / world).max(f64::MIN_POSITIVE);
        let offset = ((dots_w - world * scale) / 2.0, (dots_h - world * scale) / 2.0);

        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
            colors: vec![None; cols * rows],
            scale,
            offset,
            origin: (0.0, 0.0),
            stack: Vec::new(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.colors.fill(None);
        self.origin = (0.0, 0.0);
        self.stack.clear();
    }

    /// World point to dot coordinates
    fn to_dots(&self, x: f64, y: f64) -> (f64, f64) {
        (self.offset.0 + x * self.scale, self.offset.1 + y * self.scale)
    }

    /// Terminal cell that holds a world point, if it is on screen
    #[allow(dead_code)]
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let (px, py) = self.to_dots(x, y);
        if px < 0.0 || py < 0.0 {
            return None;
        }
        let (cx, cy) = (px as usize / DOTS_X, py as usize / DOTS_Y);
        (cx < self.cols && cy < self.rows).then_some((cx, cy))
    }

    fn plot(&mut self, px: f64, py: f64, color: Color) {
        if px < 0.0 || py < 0.0 {
            return;
        }
        let (gx, gy) = (px as usize, py as usize);
        let (cx, cy) = (gx / DOTS_X, gy / DOTS_Y);
        if cx >= self.cols || cy >= self.rows {
            return;
        }
        let idx = cy * self.cols + cx;
        self.cells[idx] |= dot_bit(gx % DOTS_X, gy % DOTS_Y);
        self.colors[idx] = Some(color);
    }

    /// Number of cells with at least one dot set
    #[allow(dead_code)]
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Character and color for one cell, if anything was drawn there
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, Color)> {
        let idx = cy * self.cols + cx;
        let bits = *self.cells.get(idx)?;
        if bits == 0 {
            return None;
        }
        Some((encode_braille(bits), self.colors[idx].unwrap_or(Color::White)))
    }

    /// Copy every lit cell into the terminal back buffer
    pub fn blit(&self, term: &mut Terminal) {
        for cy in 0..self.rows {
            for cx in 0..self.cols {
                if let Some((ch, color)) = self.cell(cx, cy) {
                    term.set(cx as i32, cy as i32, ch, Some(color));
                }
            }
        }
    }
}

impl Canvas for BrailleCanvas {
    fn push(&mut self) {
        self.stack.push(self.origin);
    }

    fn pop(&mut self) {
        if let Some(origin) = self.stack.pop() {
            self.origin = origin;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.origin.0 += x;
        self.origin.1 += y;
    }

    fn line(&mut self, dx: f64, dy: f64, color: Color) {
        let (x0, y0) = self.to_dots(self.origin.0, self.origin.1);
        let (x1, y1) = self.to_dots(self.origin.0 + dx, self.origin.1 + dy);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            self.plot(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, color);
        }
    }

    fn dot(&mut self, color: Color) {
        let (px, py) = self.to_dots(self.origin.0, self.origin.1);
        self.plot(px, py, color);
    }
}
