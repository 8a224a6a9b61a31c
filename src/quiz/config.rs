use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::quiz::types::{Instrument, Millis, QuizMode, Variant};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    pub variant: Variant,
    pub countdown_secs: u32,
    pub correct_delay_ms: Millis,
    pub wrong_delay_ms: Millis,
    pub timeout_delay_ms: Millis,
    pub tick_ms: Millis,
    pub max_input_len: usize,
    pub mode: QuizMode,
    pub instrument: Instrument,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            variant: Variant::Untimed,
            countdown_secs: 5,
            correct_delay_ms: 1500,
            wrong_delay_ms: 800,
            timeout_delay_ms: 1000,
            tick_ms: 1000,
            max_input_len: 2,
            mode: QuizMode::ClefToNote,
            instrument: Instrument::Cello,
        }
    }
}

impl QuizConfig {
    pub fn timed() -> Self {
        QuizConfig {
            variant: Variant::Timed,
            ..QuizConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        let delays = [
            ("correct_delay_ms", self.correct_delay_ms),
            ("wrong_delay_ms", self.wrong_delay_ms),
            ("timeout_delay_ms", self.timeout_delay_ms),
            ("tick_ms", self.tick_ms),
        ];
        for (name, value) in delays {
            if value == 0 {
                return Err(QuizError::InvalidConfig(format!("{} must be positive", name)));
            }
        }
        if self.countdown_secs == 0 {
            return Err(QuizError::InvalidConfig(
                "countdown_secs must be positive".to_string(),
            ));
        }
        if self.max_input_len == 0 {
            return Err(QuizError::InvalidConfig(
                "max_input_len must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
