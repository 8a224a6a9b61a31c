use std::ops::Index;

use serde::Serialize;

use crate::catalog::pitch::PitchKey;
use crate::error::QuizError;

/// Strings of the cello, lowest first.
pub const CELLO_STRINGS: [&str; 4] = ["C", "G", "D", "A"];

pub const MAX_FINGER: u8 = 4;

/// Raw catalog row: staff key, display name, string, finger label.
pub struct NoteEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub string: &'static str,
    pub finger: &'static str,
}

const fn entry(
    key: &'static str,
    name: &'static str,
    string: &'static str,
    finger: &'static str,
) -> NoteEntry {
    NoteEntry {
        key,
        name,
        string,
        finger,
    }
}

/// First-position cello notes, C2 to D4.
pub const BASS_CLEF_NOTES: [NoteEntry; 20] = [
    // C string
    entry("c/2", "C", "C", "0 (Open)"),
    entry("d/2", "D", "C", "1"),
    entry("eb/2", "Eb", "C", "2"),
    entry("e/2", "E", "C", "3"),
    entry("f/2", "F", "C", "4"),
    // G string
    entry("g/2", "G", "G", "0 (Open)"),
    entry("a/2", "A", "G", "1"),
    entry("bb/2", "Bb", "G", "2"),
    entry("b/2", "B", "G", "3"),
    entry("c/3", "C", "G", "4"),
    // D string
    entry("d/3", "D", "D", "0 (Open)"),
    entry("e/3", "E", "D", "1"),
    entry("f/3", "F", "D", "2"),
    entry("f#/3", "F#", "D", "3"),
    entry("g/3", "G", "D", "4"),
    // A string
    entry("a/3", "A", "A", "0 (Open)"),
    entry("b/3", "B", "A", "1"),
    entry("c/4", "C", "A", "2"),
    entry("c#/4", "C#", "A", "3"),
    entry("d/4", "D", "A", "4"),
];

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Note {
    pub pitch_key: String,
    pub display_name: String,
    pub string_name: String,
    pub finger_label: String,
    #[serde(skip)]
    key: PitchKey,
}

impl Note {
    pub fn new(
        pitch_key: &str,
        display_name: &str,
        string_name: &str,
        finger_label: &str,
    ) -> Result<Self, QuizError> {
        let key = PitchKey::parse(pitch_key)?;

        if display_name.is_empty() {
            return Err(QuizError::InvalidConfig(format!(
                "note {} has an empty display name",
                pitch_key
            )));
        }

        if !CELLO_STRINGS.contains(&string_name) {
            return Err(QuizError::UnknownString(string_name.to_string()));
        }

        let note = Note {
            pitch_key: pitch_key.to_string(),
            display_name: display_name.to_string(),
            string_name: string_name.to_string(),
            finger_label: finger_label.to_string(),
            key,
        };

        match note.finger_number() {
            Some(n) if n <= MAX_FINGER => Ok(note),
            _ => Err(QuizError::InvalidFinger(finger_label.to_string())),
        }
    }

    pub fn key(&self) -> &PitchKey {
        &self.key
    }

    /// Leading token of the finger label: `"0 (Open)"` -> `"0"`.
    pub fn finger_prefix(&self) -> &str {
        self.finger_label.split(' ').next().unwrap_or("")
    }

    pub fn finger_number(&self) -> Option<u8> {
        self.finger_prefix().parse().ok()
    }

    pub fn is_open_string(&self) -> bool {
        self.finger_number() == Some(0)
    }
}

/// Read-only, ordered list of playable notes.
#[derive(Clone, Debug)]
pub struct Catalog {
    notes: Vec<Note>,
}

impl Catalog {
    pub fn new(notes: Vec<Note>) -> Result<Self, QuizError> {
        if notes.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }
        Ok(Catalog { notes })
    }

    pub fn from_entries(entries: &[NoteEntry]) -> Result<Self, QuizError> {
        let notes = entries
            .iter()
            .map(|e| Note::new(e.key, e.name, e.string, e.finger))
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::new(notes)
    }

    /// The built-in cello catalog. A malformed built-in row is a programming
    /// error and aborts construction.
    pub fn bass_clef() -> Self {
        match Catalog::from_entries(&BASS_CLEF_NOTES) {
            Ok(catalog) => catalog,
            Err(e) => panic!("built-in note catalog is malformed: {}", e),
        }
    }

    pub fn count(&self) -> usize {
        self.notes.len()
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::bass_clef()
    }
}

impl Index<usize> for Catalog {
    type Output = Note;

    fn index(&self, index: usize) -> &Note {
        &self.notes[index]
    }
}
