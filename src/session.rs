//! One running instance: the wind pool, the chime field and their settings

use crate::audio::NoteSink;
use crate::canvas::Canvas;
use crate::chimes::ChimeField;
use crate::colors::{self, CHIME_GLOW, CHIME_IDLE};
use crate::config::{SessionConfig, MAX_CHIMES, WORLD_SIZE};
use crate::error::WindError;
use crate::notes::{Chord, NoteLength};
use crate::pool::{ChimeHit, WindPool};
use rand::rngs::StdRng;

/// Frames a chime stays lit after ringing
const GLOW_FRAMES: u8 = 6;

pub struct Session {
    config: SessionConfig,
    pool: WindPool,
    field: ChimeField,
    glow: Vec<u8>,
    rng: StdRng,
    frame: u64,
    rung: u64,
}

impl Session {
    pub fn new(config: SessionConfig, mut rng: StdRng) -> Self {
        let field = ChimeField::scatter(config.chime_count, WORLD_SIZE, WORLD_SIZE, &mut rng);
        let glow = vec![0; field.len()];
        Self {
            config,
            pool: WindPool::new(),
            field,
            glow,
            rng,
            frame: 0,
            rung: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pool(&self) -> &WindPool {
        &self.pool
    }

    pub fn field(&self) -> &ChimeField {
        &self.field
    }

    #[allow(dead_code)]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Total chimes rung since the last reset
    pub fn rung(&self) -> u64 {
        self.rung
    }

    pub fn is_pool_full(&self) -> bool {
        self.pool.is_full()
    }

    /// Start another wind if a slot is free
    pub fn add_wind(&mut self) -> Result<usize, WindError> {
        self.pool
            .allocate(&self.config.wind, colors::choose_wind_color, &mut self.rng)
    }

    /// Hard reset: new chime field, every wind dropped. An unchanged count
    /// leaves the session alone.
    pub fn set_chime_count(&mut self, count: usize) {
        let count = count.min(MAX_CHIMES);
        if count == self.config.chime_count {
            return;
        }
        tracing::info!(from = self.config.chime_count, to = count, "chime count changed, resetting");
        self.config.chime_count = count;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.pool.clear();
        self.field = ChimeField::scatter(self.config.chime_count, WORLD_SIZE, WORLD_SIZE, &mut self.rng);
        self.glow = vec![0; self.field.len()];
        self.rung = 0;
    }

    pub fn set_chord(&mut self, chord: Chord) {
        self.config.chord = chord;
    }

    /// Advance every wind by one frame and ring the chimes they hit
    pub fn frame(&mut self, sink: &mut dyn NoteSink) -> Vec<ChimeHit> {
        self.frame += 1;
        for g in &mut self.glow {
            *g = g.saturating_sub(1);
        }

        let hits = self.pool.step_all(&self.field, &mut self.rng);
        for hit in &hits {
            let note = self.config.chord.pick(&mut self.rng);
            tracing::trace!(slot = hit.slot, chime = hit.chime, note = %note, "chime rang");
            sink.trigger_note(&note, NoteLength::Sixteenth);
            if let Some(g) = self.glow.get_mut(hit.chime) {
                *g = GLOW_FRAMES;
            }
        }
        self.rung += hits.len() as u64;
        hits
    }

    /// Chimes first, winds over them
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for (chime, &glow) in self.field.iter().zip(&self.glow) {
            canvas.push();
            canvas.translate(chime.x, chime.y);
            canvas.dot(if glow > 0 { CHIME_GLOW } else { CHIME_IDLE });
            canvas.pop();
        }
        self.pool.render(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentSink;
    use crate::config::WindParams;
    use crate::pool::SLOTS;
    use rand::SeedableRng;

    fn session(chimes: usize) -> Session {
        let config = SessionConfig {
            chime_count: chimes,
            wind: WindParams {
                generations: 8,
                growth_batch: 50,
                ..WindParams::default()
            },
            ..SessionConfig::default()
        };
        Session::new(config, StdRng::seed_from_u64(21))
    }

    #[test]
    fn test_pool_fills_and_reports_full() {
        let mut s = session(5);
        for _ in 0..SLOTS {
            assert!(!s.is_pool_full());
            s.add_wind().unwrap();
        }
        assert!(s.is_pool_full());
        assert_eq!(s.add_wind(), Err(WindError::PoolExhausted(SLOTS)));
    }

    #[test]
    fn test_chime_count_change_is_hard_reset() {
        let mut s = session(5);
        s.add_wind().unwrap();
        s.add_wind().unwrap();
        let mut sink = SilentSink::default();
        s.frame(&mut sink);

        s.set_chime_count(12);
        assert_eq!(s.field().len(), 12);
        assert_eq!(s.pool().occupied(), 0);
        assert_eq!(s.rung(), 0);

        s.set_chime_count(500);
        assert_eq!(s.field().len(), MAX_CHIMES);
    }

    #[test]
    fn test_unchanged_chime_count_keeps_winds() {
        let mut s = session(MAX_CHIMES);
        s.add_wind().unwrap();
        let before: Vec<(f64, f64)> = s.field().iter().map(|c| (c.x, c.y)).collect();

        // `+` at the maximum asks for the same count again
        s.set_chime_count(s.field().len() + 1);
        assert_eq!(s.pool().occupied(), 1);
        assert_eq!(s.field().iter().map(|c| (c.x, c.y)).collect::<Vec<_>>(), before);

        s.set_chime_count(MAX_CHIMES - 1);
        assert_eq!(s.pool().occupied(), 0);
        assert_eq!(s.field().len(), MAX_CHIMES - 1);
    }

    #[test]
    fn test_every_hit_triggers_one_note() {
        let mut s = session(40);
        for _ in 0..SLOTS {
            s.add_wind().unwrap();
        }
        let mut sink = SilentSink::default();
        let mut total = 0;
        for _ in 0..200 {
            total += s.frame(&mut sink).len();
        }
        assert_eq!(sink.triggered, total);
        assert_eq!(s.rung(), total as u64);
        assert_eq!(s.frame_count(), 200);
    }

    #[test]
    fn test_winds_eventually_all_finish() {
        let mut s = session(3);
        s.add_wind().unwrap();
        s.add_wind().unwrap();
        let mut sink = SilentSink::default();
        for _ in 0..100 {
            s.frame(&mut sink);
        }
        assert_eq!(s.pool().occupied(), 0);
    }
}
