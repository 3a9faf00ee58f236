//! Turtle interpretation of a production, a batch of symbols at a time

use crate::lsystem::{Production, Symbol};
use crate::ring::{Segment, SegmentRing};
use crossterm::style::Color;

/// What one `advance` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub produced: usize,
    /// Segments the ring dropped to stay within its capacity
    pub evicted: usize,
    pub offset: usize,
}

/// Exact +90° turn
fn turn_left((x, y): (f64, f64)) -> (f64, f64) {
    (-y, x)
}

/// Exact -90° turn
fn turn_right((x, y): (f64, f64)) -> (f64, f64) {
    (y, -x)
}

pub struct CurveCursor {
    x: f64,
    y: f64,
    heading: (f64, f64),
    offset: usize,
}

impl CurveCursor {
    /// Heading starts as (0, step) rotated by `phase` quarter turns
    pub fn new(origin: (f64, f64), step_length: f64, phase: u8) -> Self {
        let mut heading = (0.0, step_length);
        for _ in 0..phase % 4 {
            heading = turn_left(heading);
        }
        Self {
            x: origin.0,
            y: origin.1,
            heading,
            offset: 0,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[allow(dead_code)]
    pub fn heading(&self) -> (f64, f64) {
        self.heading
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Interpret up to `max_symbols` symbols, appending one segment per draw
    /// symbol. Stops at the end of the production.
    pub fn advance(
        &mut self,
        production: &Production,
        max_symbols: usize,
        ring: &mut SegmentRing,
        color: Color,
    ) -> Advance {
        let symbols = production.symbols();
        let start = self.offset.min(symbols.len());
        let end = start.saturating_add(max_symbols).min(symbols.len());

        let mut produced = 0;
        let mut evicted = 0;
        for &sym in &symbols[start..end] {
            match sym {
                Symbol::F | Symbol::H => {
                    let (dx, dy) = self.heading;
                    let pushed = ring.push(Segment { x: self.x, y: self.y, dx, dy, color });
                    if pushed.evicted.is_some() {
                        evicted += 1;
                    }
                    self.x += dx;
                    self.y += dy;
                    produced += 1;
                }
                Symbol::Plus => self.heading = turn_left(self.heading),
                Symbol::Minus => self.heading = turn_right(self.heading),
            }
        }

        self.offset = end;
        Advance { produced, evicted, offset: end }
    }
}
