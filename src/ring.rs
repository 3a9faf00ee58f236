//! Bounded store of drawn segments
//!
//! Segments are appended at the head and evicted at the tail. Indices grow
//! monotonically and are never reused, so `head - tail` is always the number
//! of live segments.

use crossterm::style::Color;
use std::collections::VecDeque;

/// Default bound on live segments per wind
pub const DEFAULT_CAPACITY: usize = 100_000;

/// One drawn line from (x, y) to (x + dx, y + dy)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub color: Color,
}

/// Result of a push: the assigned index and the index dropped to stay in bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pushed {
    pub index: u64,
    pub evicted: Option<u64>,
}

pub struct SegmentRing {
    segments: VecDeque<Segment>,
    tail: u64,
    capacity: usize,
}

impl SegmentRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            segments: VecDeque::new(),
            tail: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[allow(dead_code)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index the next appended segment will receive
    pub fn head(&self) -> u64 {
        self.tail + self.segments.len() as u64
    }

    /// Index of the oldest live segment (equals `head()` when empty)
    #[allow(dead_code)]
    pub fn tail(&self) -> u64 {
        self.tail
    }

    /// Append at the head and drop the oldest entry if the bound is exceeded
    pub fn push(&mut self, segment: Segment) -> Pushed {
        let index = self.head();
        self.segments.push_back(segment);
        let evicted = if self.segments.len() > self.capacity {
            self.evict_oldest()
        } else {
            None
        };
        Pushed { index, evicted }
    }

    #[allow(dead_code)]
    pub fn append(&mut self, segment: Segment) -> u64 {
        self.push(segment).index
    }

    /// Remove the tail entry. No-op on an empty ring.
    pub fn evict_oldest(&mut self) -> Option<u64> {
        self.segments.pop_front()?;
        let removed = self.tail;
        self.tail += 1;
        Some(removed)
    }

    /// Evict up to `count` entries, returns how many were removed
    pub fn evict(&mut self, count: usize) -> usize {
        let mut removed = 0;
        while removed < count && self.evict_oldest().is_some() {
            removed += 1;
        }
        removed
    }

    pub fn enforce_capacity(&mut self) -> usize {
        let excess = self.segments.len().saturating_sub(self.capacity);
        self.evict(excess)
    }

    #[allow(dead_code)]
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        self.enforce_capacity()
    }

    #[allow(dead_code)]
    pub fn get(&self, index: u64) -> Option<&Segment> {
        let offset = index.checked_sub(self.tail)?;
        self.segments.get(usize::try_from(offset).ok()?)
    }

    /// Live segments, oldest first, so newer ones paint over older ones
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Segment)> + '_ {
        (self.tail..).zip(self.segments.iter())
    }

    #[allow(dead_code)]
    pub fn clear(&mut self) {
        let head = self.head();
        self.segments.clear();
        self.tail = head;
    }
}

impl Default for SegmentRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
