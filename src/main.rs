mod audio;
mod canvas;
mod chimes;
mod colors;
mod config;
mod cursor;
mod error;
mod help;
mod logging;
mod lsystem;
mod notes;
mod play;
mod pool;
mod ring;
mod session;
mod settings;
mod sketch;
mod terminal;
mod wind;

use clap::{Parser, Subcommand};
use config::{SessionConfig, SketchConfig, WindParams, DEFAULT_CHIMES, DEFAULT_FRAME_TIME,
    DEFAULT_GENERATIONS, DEFAULT_GROWTH_BATCH, MAX_CHIMES};
use notes::Chord;
use ring::DEFAULT_CAPACITY;
use settings::Settings;
use std::io;

#[derive(Parser)]
#[command(name = "windchimes")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Dragon-curve winds that grow, fade away, and ring chimes in your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive wind chimes
    Play {
        /// Number of chimes (1-50)
        #[arg(short, long)]
        chimes: Option<usize>,

        /// Curve depth; each extra generation doubles the segment count
        #[arg(short, long)]
        generations: Option<u32>,

        /// Animation speed (seconds per frame)
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Chord: colorful, classic, debussy, austere, haunting, aliens, airy
        #[arg(short = 'C', long)]
        chord: Option<String>,

        /// Symbols drawn per frame
        #[arg(short, long)]
        batch: Option<usize>,

        /// Start without sound
        #[arg(short, long)]
        mute: bool,
    },

    /// Print one fully grown dragon curve and exit
    Sketch {
        /// Curve depth
        #[arg(short, long, default_value = "12")]
        generations: u32,

        /// Quadrant orientation (0-3)
        #[arg(short, long, default_value = "0")]
        phase: u8,

        /// Random seed (picks the color)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn parse_chord(name: &str) -> Chord {
    Chord::from_name(name).unwrap_or_else(|| {
        let names: Vec<&str> = Chord::ALL.iter().map(|c| c.name()).collect();
        eprintln!("Unknown chord: {}. Using classic.", name);
        eprintln!("Available: {}", names.join(", "));
        Chord::Classic
    })
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let _log_guard = match logging::init(matches!(cli.command, Commands::Sketch { .. })) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    };

    match cli.command {
        Commands::Play {
            chimes,
            generations,
            time,
            seed,
            chord,
            batch,
            mute,
        } => {
            let settings = Settings::load().play;
            let config = SessionConfig {
                chime_count: chimes.or(settings.chimes).unwrap_or(DEFAULT_CHIMES).clamp(1, MAX_CHIMES),
                chord: chord
                    .as_deref()
                    .map(parse_chord)
                    .or(settings.chord)
                    .unwrap_or_default(),
                wind: WindParams {
                    generations: generations.or(settings.generations).unwrap_or(DEFAULT_GENERATIONS).min(24),
                    growth_batch: batch.or(settings.batch).unwrap_or(DEFAULT_GROWTH_BATCH).max(2),
                    ring_capacity: settings.ring_capacity.unwrap_or(DEFAULT_CAPACITY).max(1),
                    ..WindParams::default()
                },
                time_step: config::clamp_frame_time(time.or(settings.time).unwrap_or(DEFAULT_FRAME_TIME)),
                seed,
                mute: mute || settings.mute.unwrap_or(false),
            };
            play::run(config)?;
        }
        Commands::Sketch {
            generations,
            phase,
            seed,
        } => {
            sketch::run(SketchConfig {
                generations,
                phase,
                seed,
            })?;
        }
    }

    Ok(())
}
