use crate::notes::Chord;
use crate::ring::DEFAULT_CAPACITY;

/// Side of the square world the winds are drawn in
pub const WORLD_SIZE: f64 = 720.0;

/// Step length of a generation-0 curve
pub const BASE_LENGTH: f64 = 500.0;

pub const DEFAULT_GENERATIONS: u32 = 19;
pub const DEFAULT_CHIMES: usize = 15;
pub const MAX_CHIMES: usize = 50;
/// Symbols interpreted per frame
pub const DEFAULT_GROWTH_BATCH: usize = 1000;
/// Seconds per frame (20 fps)
pub const DEFAULT_FRAME_TIME: f32 = 0.05;

/// Slowest frame time accepted from flags or settings
pub const MAX_FRAME_TIME: f32 = 2.0;

/// Bring a requested frame time into `0..=MAX_FRAME_TIME`; NaN falls back
/// to the default
pub fn clamp_frame_time(seconds: f32) -> f32 {
    if seconds.is_nan() {
        return DEFAULT_FRAME_TIME;
    }
    seconds.clamp(0.0, MAX_FRAME_TIME)
}

/// Everything a wind needs at construction
#[derive(Clone, Debug)]
pub struct WindParams {
    pub generations: u32,
    pub base_length: f64,
    pub origin: (f64, f64),
    pub growth_batch: usize,
    pub ring_capacity: usize,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            generations: DEFAULT_GENERATIONS,
            base_length: BASE_LENGTH,
            origin: (WORLD_SIZE / 2.0, WORLD_SIZE / 2.0),
            growth_batch: DEFAULT_GROWTH_BATCH,
            ring_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Resolved configuration for an interactive session
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub chime_count: usize,
    pub chord: Chord,
    pub wind: WindParams,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub mute: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chime_count: DEFAULT_CHIMES,
            chord: Chord::default(),
            wind: WindParams::default(),
            time_step: DEFAULT_FRAME_TIME,
            seed: None,
            mute: false,
        }
    }
}

/// Configuration for printing a single grown curve
#[derive(Clone, Debug)]
pub struct SketchConfig {
    pub generations: u32,
    pub phase: u8,
    pub seed: Option<u64>,
}
