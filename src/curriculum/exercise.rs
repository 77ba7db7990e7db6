use serde::{Deserialize, Serialize};
use std::fmt;

/// Tonic an exercise is played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    C,
    D,
    E,
    BFlat,
    GFlat,
    EFlat,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::C,
        Key::D,
        Key::E,
        Key::BFlat,
        Key::GFlat,
        Key::EFlat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::BFlat => "Bb",
            Key::GFlat => "Gb",
            Key::EFlat => "Eb",
        }
    }
}

/// Scale or arpeggio pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Form {
    Major,
    MinorMelodic,
    MinorHarmonic,
    Dominant7Solid,
    Dominant7Broken,
    Diminished7Solid,
    Diminished7Broken,
    Dominant7Arpeggio,
    Diminished7Arpeggio,
    MinorTonic4,
    MajorTonic4,
    MinorArpeggio,
    MajorArpeggio,
    MajorFormula,
    MinorFormula,
    Chromatic,
}

const ARPEGGIO_BPM: u32 = 60;
const TONIC_4_BPM: u32 = 75;

impl Form {
    pub const ALL: [Form; 16] = [
        Form::Major,
        Form::MinorMelodic,
        Form::MinorHarmonic,
        Form::Dominant7Solid,
        Form::Dominant7Broken,
        Form::Diminished7Solid,
        Form::Diminished7Broken,
        Form::Dominant7Arpeggio,
        Form::Diminished7Arpeggio,
        Form::MinorTonic4,
        Form::MajorTonic4,
        Form::MinorArpeggio,
        Form::MajorArpeggio,
        Form::MajorFormula,
        Form::MinorFormula,
        Form::Chromatic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Form::Major => "Major",
            Form::MinorMelodic => "Minor Melodic",
            Form::MinorHarmonic => "Minor Harmonic",
            Form::Dominant7Solid => "Dominant 7th Solid",
            Form::Dominant7Broken => "Dominant 7th Broken",
            Form::Diminished7Solid => "Diminished 7th Solid",
            Form::Diminished7Broken => "Diminished 7th Broken",
            Form::Dominant7Arpeggio => "Dominant 7th Arpeggio",
            Form::Diminished7Arpeggio => "Diminished 7th Arpeggio",
            Form::MinorTonic4 => "Minor Tonic 4 Note",
            Form::MajorTonic4 => "Major Tonic 4 Note",
            Form::MinorArpeggio => "Minor Arpeggio",
            Form::MajorArpeggio => "Major Arpeggio",
            Form::MajorFormula => "Major Formula Pattern",
            Form::MinorFormula => "Minor Formula Pattern",
            Form::Chromatic => "Chromatic",
        }
    }

    /// Target tempo in beats per minute.
    pub fn target_tempo(self) -> u32 {
        match self {
            Form::Major | Form::MinorMelodic | Form::MinorHarmonic => 88,
            Form::Dominant7Solid | Form::Diminished7Solid => 100,
            Form::Dominant7Broken | Form::Diminished7Broken => 80,
            Form::Dominant7Arpeggio | Form::Diminished7Arpeggio => 65,
            Form::MinorTonic4 | Form::MajorTonic4 => TONIC_4_BPM,
            Form::MinorArpeggio | Form::MajorArpeggio => ARPEGGIO_BPM,
            Form::MajorFormula | Form::MinorFormula => 88,
            Form::Chromatic => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exercise {
    pub key: Key,
    pub form: Form,
}

impl Exercise {
    pub fn new(key: Key, form: Form) -> Self {
        Self { key, form }
    }

    pub fn target_tempo(&self) -> u32 {
        self.form.target_tempo()
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key.name(), self.form.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_form_has_a_positive_tempo() {
        for form in Form::ALL {
            assert!(form.target_tempo() > 0, "{:?}", form);
        }
    }

    #[test]
    fn tempo_table_matches_practice_targets() {
        assert_eq!(Form::Major.target_tempo(), 88);
        assert_eq!(Form::MinorHarmonic.target_tempo(), 88);
        assert_eq!(Form::Dominant7Broken.target_tempo(), 80);
        assert_eq!(Form::Diminished7Arpeggio.target_tempo(), 65);
        assert_eq!(Form::MajorTonic4.target_tempo(), 75);
        assert_eq!(Form::MinorArpeggio.target_tempo(), 60);
        assert_eq!(Form::Chromatic.target_tempo(), 100);
    }

    #[test]
    fn label_joins_key_and_form_names() {
        let exercise = Exercise::new(Key::BFlat, Form::Dominant7Arpeggio);
        assert_eq!(exercise.to_string(), "Bb Dominant 7th Arpeggio");
    }
}
