use serde::{Deserialize, Serialize};

use crate::catalog::Note;
use crate::matching::Judgement;

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// Staff shown, pitch name typed.
    #[default]
    ClefToNote,
    /// Staff shown, position clicked on the instrument.
    ClefToFinger,
    /// Fingering shown, pitch name typed.
    FingerToNote,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    #[default]
    Cello,
    Piano,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Untimed,
    /// Countdown per note; mode is fixed to clef-to-note.
    Timed,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Feedback {
    #[default]
    None,
    Correct(String),
    Wrong(String),
}

impl Feedback {
    pub fn is_none(&self) -> bool {
        matches!(self, Feedback::None)
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Feedback::None => "",
            Feedback::Correct(m) | Feedback::Wrong(m) => m,
        }
    }
}

/// Everything the host can tell a running quiz.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizEvent {
    /// New contents of the answer box.
    Input { value: String },
    FingerClick { string: String, finger: String },
    KeyClick { key: String },
    SelectMode { mode: QuizMode },
    SelectInstrument { instrument: Instrument },
    ToggleTimer,
    Replay,
    /// Clock advance only.
    Tick,
}

/// Side effects for the host to carry out; never awaited by the session.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    PlayNote {
        pitch_key: String,
        instrument: Instrument,
    },
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Dropped by a gate: feedback pending, wrong modality, or no change.
    Ignored,
    /// State changed without a judgement.
    Updated,
    Judged(Judgement),
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingInput,
    Feedback,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Fingerboard,
    Keyboard,
}

/// What the host needs to draw the quiz screen.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct QuizSnapshot {
    pub round: u64,
    pub note_index: usize,
    pub note: Note,
    pub phase: Phase,
    pub score: u32,
    pub input: String,
    pub feedback: Feedback,
    pub variant: Variant,
    pub mode: QuizMode,
    pub instrument: Instrument,
    pub time_remaining: Option<u32>,
    pub timer_enabled: Option<bool>,
    pub show_staff: bool,
    pub diagram: Option<DiagramKind>,
    pub diagram_clickable: bool,
    pub highlight_string: Option<String>,
    pub highlight_finger: Option<String>,
    pub keyboard_active: bool,
    pub input_enabled: bool,
    pub prompt: String,
}
