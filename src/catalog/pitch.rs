use std::fmt;

use serde::Serialize;

use crate::error::QuizError;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn alter(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// A note spelled the way the staff renderer spells it: lowercase letter,
/// optional `#`/`b`, a slash, then the octave (`"eb/2"`, `"f#/3"`).
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PitchKey {
    pub letter: char,
    pub accidental: Accidental,
    pub octave: i32,
}

pub fn midi_from_pitch(step: char, alter: i32, octave: i32) -> i32 {
    let base = match step.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => 0,
    };
    (octave + 1) * 12 + base + alter
}

impl PitchKey {
    pub fn new(letter: char, accidental: Accidental, octave: i32) -> Self {
        PitchKey {
            letter,
            accidental,
            octave,
        }
    }

    /// Parse a key such as `"c/2"` or `"bb/2"`. Spelling is case sensitive:
    /// `"Eb/2"` is rejected, matching the lowercase ids the diagrams emit.
    /// Octaves are plain decimal without leading zeros (`"eb/02"` is rejected).
    pub fn parse(key: &str) -> Result<Self, QuizError> {
        let invalid = || QuizError::InvalidPitchKey(key.to_string());

        let (class, octave_str) = key.split_once('/').ok_or_else(invalid)?;
        let mut chars = class.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        if !matches!(letter, 'a'..='g') {
            return Err(invalid());
        }

        let rest: String = chars.collect();
        let accidental = match rest.as_str() {
            "" => Accidental::Natural,
            "#" => Accidental::Sharp,
            "b" => Accidental::Flat,
            _ => return Err(invalid()),
        };

        if octave_str.is_empty()
            || !octave_str.chars().all(|c| c.is_ascii_digit())
            || (octave_str.len() > 1 && octave_str.starts_with('0'))
        {
            return Err(invalid());
        }
        let octave: i32 = octave_str.parse().map_err(|_| invalid())?;

        Ok(PitchKey::new(letter, accidental, octave))
    }

    /// Pitch class as spelled, e.g. `"eb"`.
    pub fn pitch_class(&self) -> String {
        format!("{}{}", self.letter, self.accidental.suffix())
    }

    /// Collapse the five black-key flat spellings onto their sharp twins
    /// (Db→C#, Eb→D#, Gb→F#, Ab→G#, Bb→A#). Every other spelling is left
    /// alone, so Fb and Cb stay distinct from E and B.
    pub fn canonical_class(&self) -> (char, Accidental) {
        match (self.letter, self.accidental) {
            ('d', Accidental::Flat) => ('c', Accidental::Sharp),
            ('e', Accidental::Flat) => ('d', Accidental::Sharp),
            ('g', Accidental::Flat) => ('f', Accidental::Sharp),
            ('a', Accidental::Flat) => ('g', Accidental::Sharp),
            ('b', Accidental::Flat) => ('a', Accidental::Sharp),
            other => other,
        }
    }

    pub fn is_enharmonic_with(&self, other: &PitchKey) -> bool {
        self.octave == other.octave && self.canonical_class() == other.canonical_class()
    }

    pub fn midi(&self) -> i32 {
        midi_from_pitch(self.letter, self.accidental.alter(), self.octave)
    }

    /// Frequency in Hz with A4 = 440.
    pub fn frequency(&self) -> f64 {
        440.0 * 2.0f64.powf((self.midi() - 69) as f64 / 12.0)
    }

    /// Uppercase step letter as used by MusicXML `<step>`.
    pub fn step(&self) -> char {
        self.letter.to_ascii_uppercase()
    }
}

impl fmt::Display for PitchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.pitch_class(), self.octave)
    }
}
