//! Four slots of concurrent winds

use crate::canvas::Canvas;
use crate::chimes::ChimeField;
use crate::config::WindParams;
use crate::error::WindError;
use crate::wind::{DragonWind, WindState, PHASES};
use crossterm::style::Color;
use rand::seq::SliceRandom;
use rand::Rng;

pub const SLOTS: usize = PHASES as usize;

/// A chime rung by the wind in `slot`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChimeHit {
    pub slot: usize,
    pub chime: usize,
}

#[derive(Default)]
pub struct WindPool {
    slots: [Option<DragonWind>; SLOTS],
}

impl WindPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[allow(dead_code)]
    pub fn get(&self, slot: usize) -> Option<&DragonWind> {
        self.slots.get(slot)?.as_ref()
    }

    /// Occupied slots in slot order
    pub fn winds(&self) -> impl Iterator<Item = (usize, &DragonWind)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|w| (i, w)))
    }

    /// Start a new wind in a random free slot. Its phase is the slot index.
    /// A full pool is left untouched and the chooser is never called.
    pub fn allocate<R, F>(&mut self, params: &WindParams, choose_color: F, rng: &mut R) -> Result<usize, WindError>
    where
        R: Rng + ?Sized,
        F: FnOnce(&mut R) -> Color,
    {
        if self.is_full() {
            return Err(WindError::PoolExhausted(SLOTS));
        }

        let mut order: [usize; SLOTS] = std::array::from_fn(|i| i);
        order.shuffle(rng);
        let slot = order
            .into_iter()
            .find(|&i| self.slots[i].is_none())
            .ok_or(WindError::PoolExhausted(SLOTS))?;

        let color = choose_color(rng);
        let wind = DragonWind::new(slot as u8, color, params)?;
        self.slots[slot] = Some(wind);

        tracing::debug!(slot, occupied = self.occupied(), "wind allocated");
        Ok(slot)
    }

    /// Step every wind in slot order, freeing the slots of finished winds
    pub fn step_all<R: Rng + ?Sized>(&mut self, field: &ChimeField, rng: &mut R) -> Vec<ChimeHit> {
        let mut hits = Vec::new();

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            let Some(wind) = entry else {
                continue;
            };
            let outcome = wind.step(field, rng);
            hits.extend(outcome.hits.into_iter().map(|chime| ChimeHit { slot, chime }));
            if outcome.state == WindState::Done {
                tracing::debug!(slot, "wind slot freed");
                *entry = None;
            }
        }

        hits
    }

    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for (_, wind) in self.winds() {
            wind.render(canvas);
        }
    }

    /// Drop every wind immediately
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
