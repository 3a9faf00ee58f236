//! A single dragon-curve wind: grows a batch per frame, then fades from the tail

use crate::canvas::Canvas;
use crate::chimes::ChimeField;
use crate::config::WindParams;
use crate::cursor::CurveCursor;
use crate::error::WindError;
use crate::lsystem::{self, Production};
use crate::ring::SegmentRing;
use crossterm::style::Color;
use rand::Rng;

/// Number of distinct quadrant orientations (and pool slots)
pub const PHASES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindState {
    /// Still interpreting the production
    Growing,
    /// Fully interpreted; evicting from the tail each frame
    Draining,
    Done,
}

/// Result of one frame for one wind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Indices of the chimes that rang this frame
    pub hits: Vec<usize>,
    pub state: WindState,
}

pub struct DragonWind {
    phase: u8,
    color: Color,
    production: Production,
    cursor: CurveCursor,
    ring: SegmentRing,
    state: WindState,
    growth_batch: usize,
    decay_batch: usize,
}

impl DragonWind {
    /// Build a wind and generate its production up front
    pub fn new(phase: u8, color: Color, params: &WindParams) -> Result<Self, WindError> {
        if phase >= PHASES {
            return Err(WindError::InvalidPhase(phase));
        }

        let production = lsystem::dragon(params.generations, params.base_length);
        let cursor = CurveCursor::new(params.origin, production.step_length(), phase);
        let growth_batch = params.growth_batch.max(1);

        tracing::debug!(
            phase,
            generations = params.generations,
            symbols = production.len(),
            "wind generated"
        );

        Ok(Self {
            phase,
            color,
            production,
            cursor,
            ring: SegmentRing::new(params.ring_capacity),
            state: WindState::Growing,
            growth_batch,
            decay_batch: (growth_batch / 2).max(1),
        })
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn state(&self) -> WindState {
        self.state
    }

    pub fn ring(&self) -> &SegmentRing {
        &self.ring
    }

    #[allow(dead_code)]
    pub fn production(&self) -> &Production {
        &self.production
    }

    /// Current drawing position
    pub fn head_position(&self) -> (f64, f64) {
        self.cursor.position()
    }

    /// Playback progress through the production in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.production.is_empty() {
            return 1.0;
        }
        self.cursor.offset() as f64 / self.production.len() as f64
    }

    /// Advance one frame. Chimes are tested at the start-of-frame position.
    pub fn step<R: Rng + ?Sized>(&mut self, field: &ChimeField, rng: &mut R) -> StepOutcome {
        if self.state == WindState::Done {
            return StepOutcome { hits: Vec::new(), state: WindState::Done };
        }

        let (x, y) = self.head_position();
        let hits = field.hits(x, y, rng);

        self.state = match self.state {
            WindState::Growing => self.grow(),
            WindState::Draining => self.drain(),
            WindState::Done => WindState::Done,
        };

        debug_assert!(self.state != WindState::Done || self.ring.is_empty());
        debug_assert!(self.cursor.offset() <= self.production.len());

        StepOutcome { hits, state: self.state }
    }

    fn grow(&mut self) -> WindState {
        let adv = self.cursor.advance(&self.production, self.growth_batch, &mut self.ring, self.color);
        if adv.offset < self.production.len() {
            return WindState::Growing;
        }
        // Trail was capped this frame; fading starts next frame
        if adv.evicted > 0 {
            return WindState::Draining;
        }
        self.drain()
    }

    fn drain(&mut self) -> WindState {
        self.ring.enforce_capacity();
        self.ring.evict(self.decay_batch);
        if self.ring.is_empty() {
            tracing::debug!(phase = self.phase, head = self.ring.head(), "wind faded");
            WindState::Done
        } else {
            WindState::Draining
        }
    }

    /// Interpret the rest of the production at once, leaving the ring intact
    pub fn fast_forward(&mut self) {
        if self.state != WindState::Growing {
            return;
        }
        let remaining = self.production.len() - self.cursor.offset();
        self.cursor.advance(&self.production, remaining, &mut self.ring, self.color);
        self.state = if self.ring.is_empty() { WindState::Done } else { WindState::Draining };
    }

    /// Draw every live segment, oldest first
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for (_, seg) in self.ring.iter() {
            canvas.push();
            canvas.translate(seg.x, seg.y);
            canvas.line(seg.dx, seg.dy, seg.color);
            canvas.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chimes::{Chime, ChimeField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(generations: u32, growth_batch: usize, ring_capacity: usize) -> WindParams {
        WindParams {
            generations,
            base_length: 500.0,
            origin: (360.0, 360.0),
            growth_batch,
            ring_capacity,
        }
    }

    fn run_to_done(wind: &mut DragonWind, field: &ChimeField, limit: usize) -> usize {
        let mut rng = StdRng::seed_from_u64(7);
        for frame in 1..=limit {
            if wind.step(field, &mut rng).state == WindState::Done {
                return frame;
            }
        }
        panic!("wind did not finish within {} frames", limit);
    }

    #[test]
    fn test_rejects_phase_out_of_range() {
        assert!(matches!(
            DragonWind::new(4, Color::Red, &params(2, 10, 100)),
            Err(WindError::InvalidPhase(4))
        ));
    }

    #[test]
    fn test_grows_then_drains_then_done() {
        let mut wind = DragonWind::new(0, Color::Red, &params(10, 100, 100_000)).unwrap();
        let field = ChimeField::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(wind.step(&field, &mut rng).state, WindState::Growing);
        assert!(wind.ring().len() > 0);

        let mut saw_draining = false;
        let mut frames = 1;
        loop {
            let outcome = wind.step(&field, &mut rng);
            frames += 1;
            match outcome.state {
                WindState::Draining => saw_draining = true,
                WindState::Done => break,
                WindState::Growing => assert!(!saw_draining, "grew again after draining"),
            }
            assert!(frames < 1000);
        }
        assert!(saw_draining);
        assert!(wind.ring().is_empty());
        assert_eq!(wind.progress(), 1.0);
    }

    #[test]
    fn test_frames_to_done_are_bounded() {
        // 2047 symbols at 100 per frame, 1024 segments at 50 per frame
        let mut wind = DragonWind::new(1, Color::Red, &params(10, 100, 100_000)).unwrap();
        let frames = run_to_done(&mut wind, &ChimeField::default(), 1000);
        let growth = (2047 + 99) / 100;
        let decay = (1024 + 49) / 50;
        assert!(frames <= growth + decay + 2, "took {} frames", frames);
        assert!(frames >= growth);
    }

    #[test]
    fn test_capped_trail_during_growth() {
        let mut wind = DragonWind::new(2, Color::Red, &params(10, 100, 64)).unwrap();
        let field = ChimeField::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            wind.step(&field, &mut rng);
            assert!(wind.ring().len() <= 64);
        }
        assert_eq!(wind.state(), WindState::Growing);
        let frames = run_to_done(&mut wind, &field, 1000);
        assert!(frames > 0);
    }

    #[test]
    fn test_zero_generations_finishes() {
        let mut wind = DragonWind::new(3, Color::Red, &params(0, 10, 100)).unwrap();
        let frames = run_to_done(&mut wind, &ChimeField::default(), 10);
        assert!(frames <= 2);
    }

    #[test]
    fn test_done_is_terminal() {
        let mut wind = DragonWind::new(0, Color::Red, &params(1, 10, 100)).unwrap();
        run_to_done(&mut wind, &ChimeField::default(), 10);
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = wind.step(&ChimeField::default(), &mut rng);
        assert_eq!(outcome.state, WindState::Done);
        assert!(outcome.hits.is_empty());
    }

    #[test]
    fn test_hits_use_start_of_frame_position() {
        let mut wind = DragonWind::new(0, Color::Red, &params(4, 1000, 100)).unwrap();
        let field = ChimeField::new(vec![Chime { x: 360.2, y: 360.2 }]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(wind.step(&field, &mut rng).hits, vec![0]);
        assert_ne!(wind.head_position(), (360.0, 360.0));
    }

    #[test]
    fn test_fast_forward_keeps_whole_curve() {
        let mut wind = DragonWind::new(1, Color::Red, &params(9, 10, 100_000)).unwrap();
        wind.fast_forward();
        assert_eq!(wind.state(), WindState::Draining);
        assert_eq!(wind.ring().len(), 512);
        assert_eq!(wind.progress(), 1.0);
    }

    #[test]
    fn test_render_draws_oldest_first() {
        struct Recorder(Vec<(f64, f64)>, (f64, f64), Vec<(f64, f64)>);
        impl Canvas for Recorder {
            fn push(&mut self) {
                self.2.push(self.1);
            }
            fn pop(&mut self) {
                self.1 = self.2.pop().unwrap_or((0.0, 0.0));
            }
            fn translate(&mut self, x: f64, y: f64) {
                self.1 = (self.1 .0 + x, self.1 .1 + y);
            }
            fn line(&mut self, _dx: f64, _dy: f64, _color: Color) {
                self.0.push(self.1);
            }
            fn dot(&mut self, _color: Color) {}
        }

        let mut wind = DragonWind::new(0, Color::Red, &params(3, 1000, 100)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        wind.step(&ChimeField::default(), &mut rng);
        let mut rec = Recorder(Vec::new(), (0.0, 0.0), Vec::new());
        wind.render(&mut rec);

        let expected: Vec<(f64, f64)> = wind.ring().iter().map(|(_, s)| (s.x, s.y)).collect();
        assert_eq!(rec.0, expected);
        assert!(rec.2.is_empty());
    }
}
