use thiserror::Error;

/// Recoverable failures of the wind pool and curve construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindError {
    #[error("all {0} wind slots are occupied")]
    PoolExhausted(usize),

    #[error("phase {0} is outside 0..4")]
    InvalidPhase(u8),
}

/// Failures while opening the audio output
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("no supported output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}
