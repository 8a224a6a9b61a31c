use wasm_bindgen::prelude::*;

pub mod audio;
pub mod catalog;
pub mod diagram;
pub mod error;
pub mod matching;
pub mod notation;
pub mod quiz;
mod xml;

use catalog::{Catalog, PitchKey};
use diagram::keyboard::KeyboardLayout;
use error::QuizError;
use quiz::{Instrument, QuizConfig, QuizEvent, QuizSession};

use std::cell::RefCell;

thread_local! {
    static SESSION: RefCell<Option<QuizSession>> = const { RefCell::new(None) };
    static KEYBOARD: KeyboardLayout = KeyboardLayout::new();
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn quiz_err(e: QuizError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn with_session<R>(f: impl FnOnce(&mut QuizSession) -> R) -> Result<R, JsValue> {
    SESSION.with(|cell| match cell.borrow_mut().as_mut() {
        Some(session) => Ok(f(session)),
        None => Err(quiz_err(QuizError::NoSession)),
    })
}

/// Mount the quiz screen: build a session and present the first note.
/// `config_js` may be null/undefined for defaults. Returns a snapshot.
#[wasm_bindgen]
pub fn start_quiz(config_js: JsValue, seed: u64, now_ms: f64) -> Result<JsValue, JsValue> {
    let config: QuizConfig = if config_js.is_null() || config_js.is_undefined() {
        QuizConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config_js).map_err(|e| JsValue::from_str(&e.to_string()))?
    };

    let session =
        QuizSession::start(config, Catalog::bass_clef(), seed, now_ms as u64).map_err(quiz_err)?;
    let snapshot = session.snapshot();
    SESSION.with(|cell| *cell.borrow_mut() = Some(session));
    to_js(&snapshot)
}

/// Unmount: drop the session and any pending timers with it.
#[wasm_bindgen]
pub fn end_quiz() {
    SESSION.with(|cell| cell.borrow_mut().take());
}

/// Apply one user event at `now_ms`, returning `{ outcome, snapshot }`.
#[wasm_bindgen]
pub fn handle_event(event_js: JsValue, now_ms: f64) -> Result<JsValue, JsValue> {
    let event: QuizEvent =
        serde_wasm_bindgen::from_value(event_js).map_err(|e| JsValue::from_str(&e.to_string()))?;

    #[derive(serde::Serialize)]
    struct Handled {
        outcome: quiz::types::Outcome,
        snapshot: quiz::QuizSnapshot,
    }

    let handled = with_session(|session| {
        let outcome = session.handle(event, now_ms as u64);
        Handled {
            outcome,
            snapshot: session.snapshot(),
        }
    })?;
    to_js(&handled)
}

/// Fire due timers; call from the host's animation or interval loop.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<JsValue, JsValue> {
    let snapshot = with_session(|session| {
        session.advance(now_ms as u64);
        session.snapshot()
    })?;
    to_js(&snapshot)
}

#[wasm_bindgen]
pub fn snapshot() -> Result<JsValue, JsValue> {
    let snapshot = with_session(|session| session.snapshot())?;
    to_js(&snapshot)
}

/// Audio requests queued since the last call.
#[wasm_bindgen]
pub fn drain_effects() -> Result<JsValue, JsValue> {
    let effects = with_session(|session| session.drain_effects())?;
    to_js(&effects)
}

#[wasm_bindgen]
pub fn get_catalog() -> Result<JsValue, JsValue> {
    let catalog = Catalog::bass_clef();
    to_js(&catalog.notes())
}

/// MusicXML for a bass-clef staff holding `pitch_key`.
#[wasm_bindgen]
pub fn render_notation(pitch_key: &str) -> Result<String, JsValue> {
    let key = PitchKey::parse(pitch_key).map_err(quiz_err)?;
    notation::musicxml::note_document(&key).map_err(quiz_err)
}

#[wasm_bindgen]
pub fn render_fingerboard(
    string: Option<String>,
    finger: Option<String>,
    clickable: bool,
) -> Result<String, JsValue> {
    diagram::fingerboard::render_svg(string.as_deref(), finger.as_deref(), clickable)
        .map_err(quiz_err)
}

/// Returns `[string, finger]`, or undefined when the point misses the board.
#[wasm_bindgen]
pub fn fingerboard_hit(x: f32, y: f32) -> Result<JsValue, JsValue> {
    match diagram::fingerboard::hit_test(x, y) {
        Some(hit) => to_js(&hit),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen]
pub fn render_keyboard(active_note: Option<String>, active: bool) -> Result<String, JsValue> {
    KEYBOARD.with(|layout| {
        layout
            .render_svg(active_note.as_deref(), active)
            .map_err(quiz_err)
    })
}

#[wasm_bindgen]
pub fn keyboard_keys() -> Result<JsValue, JsValue> {
    KEYBOARD.with(to_js)
}

#[wasm_bindgen]
pub fn keyboard_hit(x: f32, y: f32) -> Option<String> {
    KEYBOARD.with(|layout| layout.hit_test(x, y).map(str::to_string))
}

/// Mono PCM for one note; the host copies it into an AudioBuffer and plays
/// it without waiting.
#[wasm_bindgen]
pub fn render_note_audio(
    pitch_key: &str,
    instrument_js: JsValue,
    sample_rate: f32,
) -> Result<js_sys::Float32Array, JsValue> {
    let key = PitchKey::parse(pitch_key).map_err(quiz_err)?;
    let instrument: Instrument = serde_wasm_bindgen::from_value(instrument_js)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let samples = audio::render_note(&key, instrument, sample_rate);
    Ok(js_sys::Float32Array::from(samples.as_slice()))
}
