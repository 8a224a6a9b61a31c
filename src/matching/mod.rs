//! Answer checking. Each predicate is pure: it reads the guess and the
//! current note and nothing else.

use serde::Serialize;

use crate::catalog::{Note, PitchKey};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Judgement {
    Pending,
    Correct,
    Wrong,
}

/// Upper-case the first character of a typed guess and leave the rest as
/// typed, so `"eb"` becomes `"Eb"` but `"EB"` stays `"EB"`.
pub fn normalize_guess(guess: &str) -> String {
    let mut chars = guess.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Judge a typed pitch name. No verdict until the guess is as long as the
/// display name; a longer guess is wrong.
pub fn text_match(guess: &str, note: &Note) -> Judgement {
    let guess = normalize_guess(guess);
    let expected = note.display_name.as_str();
    let guess_len = guess.chars().count();
    let expected_len = expected.chars().count();

    if guess_len < expected_len {
        Judgement::Pending
    } else if guess == expected {
        Judgement::Correct
    } else {
        Judgement::Wrong
    }
}

pub fn finger_match(clicked_string: &str, clicked_finger: &str, note: &Note) -> Judgement {
    if clicked_string == note.string_name && clicked_finger == note.finger_prefix() {
        Judgement::Correct
    } else {
        Judgement::Wrong
    }
}

/// Judge a clicked keyboard key, accepting the other spelling of a black key
/// in the same octave.
pub fn keyboard_match(clicked_key: &str, note: &Note) -> Judgement {
    if clicked_key == note.pitch_key {
        return Judgement::Correct;
    }
    match PitchKey::parse(clicked_key) {
        Ok(clicked) if clicked.is_enharmonic_with(note.key()) => Judgement::Correct,
        _ => Judgement::Wrong,
    }
}
