use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::catalog::{Catalog, Note};
use crate::error::QuizError;
use crate::matching::{self, Judgement};
use crate::quiz::config::QuizConfig;
use crate::quiz::timers::{Countdown, Timer, TimerAction, TimerSlot};
use crate::quiz::types::*;

const WRONG_MESSAGE: &str = "Try again!";

/// State of one quiz screen, from mount to unmount.
///
/// All input goes through [`QuizSession::handle`]. Before applying an event
/// the session fires every timer that fell due up to the event's timestamp,
/// in due order, so a stale click can never land on a note that a timer
/// already replaced.
pub struct QuizSession {
    config: QuizConfig,
    catalog: Catalog,
    rng: StdRng,
    now: Millis,
    round: u64,
    current: usize,
    input: String,
    feedback: Feedback,
    score: u32,
    mode: QuizMode,
    instrument: Instrument,
    feedback_timer: TimerSlot,
    countdown: Option<Countdown>,
    effects: Vec<Effect>,
}

impl QuizSession {
    /// Validate the config and present the first note.
    pub fn start(
        config: QuizConfig,
        catalog: Catalog,
        seed: u64,
        now: Millis,
    ) -> Result<Self, QuizError> {
        config.validate()?;

        let (mode, countdown) = match config.variant {
            Variant::Untimed => (config.mode, None),
            Variant::Timed => (
                QuizMode::ClefToNote,
                Some(Countdown::new(config.countdown_secs, config.tick_ms, now)),
            ),
        };

        let mut session = QuizSession {
            instrument: config.instrument,
            config,
            catalog,
            rng: StdRng::seed_from_u64(seed),
            now,
            round: 0,
            current: 0,
            input: String::new(),
            feedback: Feedback::None,
            score: 0,
            mode,
            feedback_timer: TimerSlot::default(),
            countdown,
            effects: Vec::new(),
        };
        session.present(now);
        Ok(session)
    }

    pub fn handle(&mut self, event: QuizEvent, now: Millis) -> Outcome {
        self.advance(now);
        let now = self.now;

        match event {
            QuizEvent::Input { value } => self.on_input(&value),
            QuizEvent::FingerClick { string, finger } => {
                if !self.accepts_click(Instrument::Cello) {
                    debug!(%string, %finger, "finger click ignored");
                    return Outcome::Ignored;
                }
                let judgement = matching::finger_match(&string, &finger, self.current_note());
                self.judge(judgement)
            }
            QuizEvent::KeyClick { key } => {
                if !self.accepts_click(Instrument::Piano) {
                    debug!(%key, "key click ignored");
                    return Outcome::Ignored;
                }
                let judgement = matching::keyboard_match(&key, self.current_note());
                self.judge(judgement)
            }
            QuizEvent::SelectMode { mode } => {
                if self.config.variant == Variant::Timed || mode == self.mode {
                    return Outcome::Ignored;
                }
                info!(?mode, "quiz mode changed");
                self.mode = mode;
                self.present(now);
                Outcome::Updated
            }
            QuizEvent::SelectInstrument { instrument } => {
                if instrument == self.instrument {
                    return Outcome::Ignored;
                }
                info!(?instrument, "instrument changed");
                self.instrument = instrument;
                self.present(now);
                Outcome::Updated
            }
            QuizEvent::ToggleTimer => match self.countdown.as_mut() {
                Some(countdown) => {
                    let enabled = countdown.toggle(now);
                    debug!(enabled, "countdown toggled");
                    Outcome::Updated
                }
                None => Outcome::Ignored,
            },
            QuizEvent::Replay => {
                self.play_current();
                Outcome::Updated
            }
            QuizEvent::Tick => Outcome::Updated,
        }
    }

    /// Fire every timer due by `now`, earliest first. Time never runs
    /// backwards: an older timestamp is treated as the current one.
    pub fn advance(&mut self, now: Millis) {
        let now = now.max(self.now);
        loop {
            let feedback_due = self.feedback_timer.due_at().filter(|&t| t <= now);
            let tick_due = self
                .countdown
                .as_ref()
                .and_then(Countdown::due_at)
                .filter(|&t| t <= now);

            match (feedback_due, tick_due) {
                (Some(f), Some(t)) if t < f => self.fire_tick(t),
                (Some(f), _) => self.fire_feedback_timer(f),
                (None, Some(t)) => self.fire_tick(t),
                (None, None) => break,
            }
        }
        self.now = now;
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn current_note(&self) -> &Note {
        &self.catalog[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of notes presented so far, counting repeats.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn pending_timer(&self) -> Option<Timer> {
        self.feedback_timer.pending()
    }

    pub fn time_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    pub fn timer_enabled(&self) -> Option<bool> {
        self.countdown.as_ref().map(Countdown::is_enabled)
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn phase(&self) -> Phase {
        if self.feedback.is_none() {
            Phase::AwaitingInput
        } else {
            Phase::Feedback
        }
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let note = self.current_note();
        let reveal = self.mode == QuizMode::FingerToNote || self.feedback.is_correct();
        let diagram = match (self.mode, self.instrument) {
            (QuizMode::ClefToNote, _) => None,
            (_, Instrument::Cello) => Some(DiagramKind::Fingerboard),
            (_, Instrument::Piano) => Some(DiagramKind::Keyboard),
        };
        let prompt = match self.mode {
            QuizMode::ClefToFinger => "Click the correct position on the Instrument!",
            _ => "Type the pitch name (A-G):",
        };

        QuizSnapshot {
            round: self.round,
            note_index: self.current,
            note: note.clone(),
            phase: self.phase(),
            score: self.score,
            input: self.input.clone(),
            feedback: self.feedback.clone(),
            variant: self.config.variant,
            mode: self.mode,
            instrument: self.instrument,
            time_remaining: self.time_remaining(),
            timer_enabled: self.timer_enabled(),
            show_staff: self.mode != QuizMode::FingerToNote,
            diagram,
            diagram_clickable: self.mode == QuizMode::ClefToFinger,
            highlight_string: reveal.then(|| note.string_name.clone()),
            highlight_finger: reveal.then(|| note.finger_label.clone()),
            keyboard_active: reveal,
            input_enabled: self.feedback.is_none() && self.mode != QuizMode::ClefToFinger,
            prompt: prompt.to_string(),
        }
    }

    fn on_input(&mut self, value: &str) -> Outcome {
        if !self.feedback.is_none() || self.mode == QuizMode::ClefToFinger {
            debug!(value, "text input ignored");
            return Outcome::Ignored;
        }
        self.input = matching::normalize_guess(value)
            .chars()
            .take(self.config.max_input_len)
            .collect();
        let judgement = matching::text_match(&self.input, self.current_note());
        self.judge(judgement)
    }

    fn accepts_click(&self, instrument: Instrument) -> bool {
        self.feedback.is_none()
            && self.mode == QuizMode::ClefToFinger
            && self.instrument == instrument
    }

    fn judge(&mut self, judgement: Judgement) -> Outcome {
        match judgement {
            Judgement::Pending => {}
            Judgement::Correct => {
                let note = self.current_note();
                let message = match self.instrument {
                    Instrument::Cello => format!(
                        "Correct! ({} String, Finger {})",
                        note.string_name, note.finger_label
                    ),
                    Instrument::Piano => "Correct!".to_string(),
                };
                let pitch_key = note.pitch_key.clone();
                self.score += 1;
                info!(score = self.score, %pitch_key, "correct answer");
                self.feedback = Feedback::Correct(message);
                self.play_current();
                self.feedback_timer
                    .schedule(self.now, self.config.correct_delay_ms, TimerAction::NextNote);
            }
            Judgement::Wrong => {
                info!(pitch_key = %self.current_note().pitch_key, "wrong answer");
                self.feedback = Feedback::Wrong(WRONG_MESSAGE.to_string());
                self.feedback_timer
                    .schedule(self.now, self.config.wrong_delay_ms, TimerAction::Retry);
            }
        }
        Outcome::Judged(judgement)
    }

    /// Enter the presenting state with a uniformly random note.
    fn present(&mut self, now: Millis) {
        self.now = now;
        self.round += 1;
        self.current = self.rng.random_range(0..self.catalog.count());
        self.input.clear();
        self.feedback = Feedback::None;
        self.feedback_timer.cancel();
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.reset(self.config.countdown_secs, now);
        }
        debug!(
            round = self.round,
            index = self.current,
            pitch_key = %self.current_note().pitch_key,
            "presenting note"
        );
        self.play_current();
    }

    fn play_current(&mut self) {
        let pitch_key = self.current_note().pitch_key.clone();
        self.effects.push(Effect::PlayNote {
            pitch_key,
            instrument: self.instrument,
        });
    }

    fn fire_feedback_timer(&mut self, at: Millis) {
        self.now = at;
        let Some(timer) = self.feedback_timer.take_due(at) else {
            return;
        };
        debug!(?timer, "feedback timer fired");
        match timer.action {
            TimerAction::NextNote => self.present(at),
            TimerAction::Retry => {
                self.feedback = Feedback::None;
                self.input.clear();
            }
        }
    }

    fn fire_tick(&mut self, at: Millis) {
        self.now = at;
        let feedback_pending = !self.feedback.is_none();
        let expired = match self.countdown.as_mut() {
            Some(countdown) => {
                countdown.take_due(at);
                !feedback_pending && countdown.decrement()
            }
            None => false,
        };
        if expired {
            self.time_up();
        }
    }

    fn time_up(&mut self) {
        let name = self.current_note().display_name.clone();
        info!(pitch_key = %self.current_note().pitch_key, "time's up");
        self.feedback = Feedback::Wrong(format!("Time's up! It was {}", name));
        self.feedback_timer
            .schedule(self.now, self.config.timeout_delay_ms, TimerAction::NextNote);
    }
}
