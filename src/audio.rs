//! Bell voices for ringing chimes
//!
//! `ChimeSynth` owns a cpal output stream that mixes a small bank of decaying
//! sine voices. `SilentSink` stands in when audio is muted or unavailable.

use crate::error::AudioError;
use crate::notes::{Note, NoteLength};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

const MAX_VOICES: usize = 32;
const ATTACK_SECS: f32 = 0.05;
/// Time constant of the ring-out while a note is held
const DECAY_SECS: f32 = 3.0;
/// Time constant after release
const RELEASE_SECS: f32 = 0.4;
const VOICE_GAIN: f32 = 0.08;
const SILENCE: f32 = 1e-4;

/// Fire-and-forget note trigger
pub trait NoteSink {
    fn trigger_note(&mut self, note: &Note, length: NoteLength);
}

/// Swallows notes, counting them
#[derive(Debug, Default)]
pub struct SilentSink {
    pub triggered: usize,
}

impl NoteSink for SilentSink {
    fn trigger_note(&mut self, note: &Note, _length: NoteLength) {
        self.triggered += 1;
        tracing::trace!(note = %note, "muted note");
    }
}

#[derive(Debug, Clone)]
struct Voice {
    freq: f32,
    phase: f32,
    age: f32,
    hold: f32,
    released_level: Option<f32>,
}

impl Voice {
    fn level(&self) -> f32 {
        let attack = (self.age / ATTACK_SECS).min(1.0);
        let ring = (-self.age / DECAY_SECS).exp();
        match self.released_level {
            Some(level) => level * (-(self.age - self.hold) / RELEASE_SECS).exp(),
            None => attack * ring,
        }
    }
}

/// Mix of decaying sine voices, advanced one sample at a time
#[derive(Debug, Default)]
pub struct VoiceBank {
    voices: Vec<Voice>,
}

impl VoiceBank {
    pub fn trigger(&mut self, freq: f32, hold: f32) {
        if self.voices.len() >= MAX_VOICES {
            self.voices.remove(0);
        }
        self.voices.push(Voice {
            freq,
            phase: 0.0,
            age: 0.0,
            hold: hold.max(0.0),
            released_level: None,
        });
    }

    pub fn active(&self) -> usize {
        self.voices.len()
    }

    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let dt = 1.0 / sample_rate.max(1.0);
        let mut mix = 0.0;

        for voice in &mut self.voices {
            mix += voice.phase.sin() * voice.level();
            voice.phase = (voice.phase + TAU * voice.freq * dt) % TAU;
            voice.age += dt;
            if voice.released_level.is_none() && voice.age >= voice.hold {
                voice.released_level = Some(voice.level());
            }
        }

        self.voices
            .retain(|v| v.released_level.is_none() || v.level() > SILENCE);

        (mix * VOICE_GAIN).clamp(-1.0, 1.0)
    }
}

/// Live audio output. Dropping it stops the stream.
pub struct ChimeSynth {
    bank: Arc<Mutex<VoiceBank>>,
    _stream: cpal::Stream,
}

impl ChimeSynth {
    /// Open the default output device
    pub fn open() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device.default_output_config()?;
        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();
        let bank = Arc::new(Mutex::new(VoiceBank::default()));

        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            "audio output opened"
        );

        let stream = match format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&bank))?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&bank))?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&bank))?,
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        };
        stream.play()?;

        Ok(Self { bank, _stream: stream })
    }
}

impl NoteSink for ChimeSynth {
    fn trigger_note(&mut self, note: &Note, length: NoteLength) {
        let Some(freq) = note.frequency() else {
            tracing::warn!(note = %note, "unplayable note");
            return;
        };
        if let Ok(mut bank) = self.bank.lock() {
            bank.trigger(freq, length.seconds());
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    bank: Arc<Mutex<VoiceBank>>,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
{
    let sample_rate = config.sample_rate.0 as f32;
    let channels = (config.channels as usize).max(1);

    let stream = device.build_output_stream(
        config,
        move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut bank) = bank.lock() else {
                return;
            };
            for frame in output.chunks_mut(channels) {
                let v = T::from_sample(bank.next_sample(sample_rate));
                for ch in frame.iter_mut() {
                    *ch = v;
                }
            }
        },
        |err| tracing::error!(error = %err, "audio stream error"),
        None,
    )?;

    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_rings_then_dies() {
        let mut bank = VoiceBank::default();
        bank.trigger(440.0, 0.125);
        assert_eq!(bank.active(), 1);

        let sr = 8000.0;
        let peak = (0..800).map(|_| bank.next_sample(sr).abs()).fold(0.0f32, f32::max);
        assert!(peak > 0.01);

        for _ in 0..(sr as usize * 10) {
            bank.next_sample(sr);
        }
        assert_eq!(bank.active(), 0);
    }

    #[test]
    fn test_voice_limit_steals_oldest() {
        let mut bank = VoiceBank::default();
        for i in 0..(MAX_VOICES + 5) {
            bank.trigger(200.0 + i as f32, 1.0);
        }
        assert_eq!(bank.active(), MAX_VOICES);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut bank = VoiceBank::default();
        for _ in 0..MAX_VOICES {
            bank.trigger(100.0, 1.0);
        }
        for _ in 0..2000 {
            let s = bank.next_sample(8000.0);
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_silent_sink_counts() {
        let mut sink = SilentSink::default();
        sink.trigger_note(&Note::new("C", 5), NoteLength::Sixteenth);
        sink.trigger_note(&Note::new("G", 4), NoteLength::Sixteenth);
        assert_eq!(sink.triggered, 2);
    }
}
