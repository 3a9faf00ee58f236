//! Chords the chimes are tuned to, and pitch labels for the synth

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::fmt;

/// Octaves a chime may ring in
const OCTAVES: [u8; 3] = [4, 5, 6];

/// Tuning for the chime field. Each chord has five pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chord {
    Colorful,
    #[default]
    Classic,
    Debussy,
    Austere,
    Haunting,
    Aliens,
    Airy,
}

impl Chord {
    pub const ALL: [Chord; 7] = [
        Chord::Colorful,
        Chord::Classic,
        Chord::Debussy,
        Chord::Austere,
        Chord::Haunting,
        Chord::Aliens,
        Chord::Airy,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "colorful" => Some(Chord::Colorful),
            "classic" => Some(Chord::Classic),
            "debussy" => Some(Chord::Debussy),
            "austere" => Some(Chord::Austere),
            "haunting" => Some(Chord::Haunting),
            "aliens" => Some(Chord::Aliens),
            "airy" => Some(Chord::Airy),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chord::Colorful => "colorful",
            Chord::Classic => "classic",
            Chord::Debussy => "debussy",
            Chord::Austere => "austere",
            Chord::Haunting => "haunting",
            Chord::Aliens => "aliens",
            Chord::Airy => "airy",
        }
    }

    pub fn pitch_classes(self) -> [&'static str; 5] {
        match self {
            Chord::Colorful => ["C", "F", "Bb", "Eb", "Ab"],
            Chord::Classic => ["C", "D", "E", "G", "A"],
            Chord::Debussy => ["C", "D", "E", "F#", "G#"],
            Chord::Austere => ["C", "G", "C", "G", "C"],
            Chord::Haunting => ["C", "D", "Eb", "G", "A"],
            Chord::Aliens => ["D", "E", "C", "C", "G"],
            Chord::Airy => ["G", "D", "G", "A", "C#"],
        }
    }

    /// Next chord in the cycle (wraps)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Random pitch class from this chord in a random octave
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> Note {
        let classes = self.pitch_classes();
        let class = classes.choose(rng).copied().unwrap_or("C");
        let octave = OCTAVES.choose(rng).copied().unwrap_or(5);
        Note::new(class, octave)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long a note is held before release
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLength {
    Sixteenth,
    Eighth,
    Quarter,
}

impl NoteLength {
    /// Hold time at 120 bpm
    pub fn seconds(self) -> f32 {
        match self {
            NoteLength::Sixteenth => 0.125,
            NoteLength::Eighth => 0.25,
            NoteLength::Quarter => 0.5,
        }
    }
}

/// A pitch label such as "Bb5"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    label: String,
}

impl Note {
    pub fn new(class: &str, octave: u8) -> Self {
        Self { label: format!("{}{}", class, octave) }
    }

    #[allow(dead_code)]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// MIDI note number, or None for a malformed label
    pub fn midi(&self) -> Option<i32> {
        let mut chars = self.label.chars();
        let base = match chars.next()? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let rest: String = chars.collect();
        let (shift, octave) = if let Some(o) = rest.strip_prefix('#') {
            (1, o)
        } else if let Some(o) = rest.strip_prefix('b') {
            (-1, o)
        } else {
            (0, rest.as_str())
        };
        let octave: i32 = octave.parse().ok()?;
        Some(12 * (octave + 1) + base + shift)
    }

    /// Equal-tempered frequency with A4 = 440 Hz
    pub fn frequency(&self) -> Option<f32> {
        let midi = self.midi()?;
        Some(440.0 * 2f32.powf((midi - 69) as f32 / 12.0))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_a4_is_440() {
        let f = Note::new("A", 4).frequency().unwrap();
        assert!((f - 440.0).abs() < 1e-3);
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(Note::new("C", 4).midi(), Some(60));
        assert_eq!(Note::new("C#", 4).midi(), Some(61));
        assert_eq!(Note::new("Bb", 5).midi(), Some(82));
        assert_eq!(Note::new("X", 4).midi(), None);
    }

    #[test]
    fn test_pick_stays_in_chord() {
        let mut rng = StdRng::seed_from_u64(5);
        for chord in Chord::ALL {
            for _ in 0..20 {
                let note = chord.pick(&mut rng);
                let label = note.label();
                let octave = &label[label.len() - 1..];
                let class = &label[..label.len() - 1];
                assert!(chord.pitch_classes().contains(&class), "{} not in {}", label, chord);
                assert!(["4", "5", "6"].contains(&octave));
            }
        }
    }

    #[test]
    fn test_chord_cycle_and_names() {
        let mut chord = Chord::Colorful;
        for _ in 0..Chord::ALL.len() {
            assert_eq!(Chord::from_name(chord.name()), Some(chord));
            chord = chord.next();
        }
        assert_eq!(chord, Chord::Colorful);
        assert_eq!(Chord::from_name("DEBUSSY"), Some(Chord::Debussy));
        assert_eq!(Chord::from_name("polka"), None);
    }
}
