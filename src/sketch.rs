//! Print a single fully grown wind to stdout

use crate::canvas::BrailleCanvas;
use crate::colors;
use crate::config::{SketchConfig, WindParams, WORLD_SIZE};
use crate::error::WindError;
use crate::terminal::Terminal;
use crate::wind::DragonWind;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deepest curve sketch mode will draw (about two million segments)
pub const MAX_SKETCH_GENERATIONS: u32 = 21;

/// Grow one wind without decay and draw it into a `cols` x `rows` buffer
pub fn draw(config: &SketchConfig, cols: u16, rows: u16) -> Result<Terminal, WindError> {
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
    let generations = config.generations.min(MAX_SKETCH_GENERATIONS);
    let params = WindParams {
        generations,
        ring_capacity: 1usize << generations,
        ..WindParams::default()
    };

    let mut wind = DragonWind::new(config.phase, colors::choose_wind_color(&mut rng), &params)?;
    wind.fast_forward();
    tracing::debug!(generations, segments = wind.ring().len(), "sketch grown");

    let mut canvas = BrailleCanvas::new(cols, rows, WORLD_SIZE);
    wind.render(&mut canvas);

    let mut term = Terminal::offscreen(cols, rows);
    canvas.blit(&mut term);
    Ok(term)
}

pub fn run(config: SketchConfig) -> std::io::Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 40));
    let term = draw(&config, cols, rows.saturating_sub(1).max(1))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    term.print_to_stdout();
    Ok(())
}
