use crate::notes::Chord;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional defaults from `~/.config/windchimes/config.toml`.
/// Command-line flags win over anything set here.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub play: PlaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaySettings {
    pub chimes: Option<usize>,
    pub generations: Option<u32>,
    pub time: Option<f32>,
    pub chord: Option<Chord>,
    pub mute: Option<bool>,
    pub batch: Option<usize>,
    pub ring_capacity: Option<usize>,
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
                Self::default()
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read settings");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("windchimes")
            .join("config.toml")
    }
}
