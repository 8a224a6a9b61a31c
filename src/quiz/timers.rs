use crate::quiz::types::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Clear feedback and present a fresh note.
    NextNote,
    /// Clear feedback and the answer box, keep the note.
    Retry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    pub due: Millis,
    pub action: TimerAction,
}

/// Holds at most one pending feedback transition. Scheduling replaces
/// whatever was there; presenting a new note cancels it.
#[derive(Clone, Debug, Default)]
pub struct TimerSlot {
    pending: Option<Timer>,
}

impl TimerSlot {
    pub fn schedule(&mut self, now: Millis, delay: Millis, action: TimerAction) {
        self.pending = Some(Timer {
            due: now.saturating_add(delay),
            action,
        });
    }

    pub fn cancel(&mut self) -> Option<Timer> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<Timer> {
        self.pending
    }

    pub fn due_at(&self) -> Option<Millis> {
        self.pending.map(|t| t.due)
    }

    /// Remove and return the timer if it is due by `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<Timer> {
        match self.pending {
            Some(timer) if timer.due <= now => self.pending.take(),
            _ => None,
        }
    }
}

/// Per-note countdown for the timed variant. Ticks keep arriving while
/// feedback is showing; the session decides whether a tick counts.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: u32,
    enabled: bool,
    period: Millis,
    next_tick: Option<Millis>,
}

impl Countdown {
    pub fn new(secs: u32, period: Millis, now: Millis) -> Self {
        Countdown {
            remaining: secs,
            enabled: true,
            period,
            next_tick: Some(now.saturating_add(period)),
        }
    }

    pub fn reset(&mut self, secs: u32, now: Millis) {
        self.remaining = secs;
        self.next_tick = self.enabled.then(|| now.saturating_add(self.period));
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip pause state; the first tick after resuming is one period out.
    pub fn toggle(&mut self, now: Millis) -> bool {
        self.enabled = !self.enabled;
        self.next_tick = self.enabled.then(|| now.saturating_add(self.period));
        self.enabled
    }

    pub fn due_at(&self) -> Option<Millis> {
        self.next_tick
    }

    /// Consume a due tick and schedule the next one.
    pub fn take_due(&mut self, now: Millis) -> Option<Millis> {
        match self.next_tick {
            Some(at) if at <= now => {
                self.next_tick = Some(at.saturating_add(self.period));
                Some(at)
            }
            _ => None,
        }
    }

    /// Count one second down. Returns true when the countdown just hit zero.
    /// Never goes below zero.
    pub fn decrement(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_holds_one_timer() {
        let mut slot = TimerSlot::default();
        slot.schedule(0, 800, TimerAction::Retry);
        slot.schedule(100, 1500, TimerAction::NextNote);
        assert_eq!(
            slot.pending(),
            Some(Timer {
                due: 1600,
                action: TimerAction::NextNote
            })
        );
    }

    #[test]
    fn test_slot_take_due() {
        let mut slot = TimerSlot::default();
        slot.schedule(1000, 800, TimerAction::Retry);
        assert!(slot.take_due(1799).is_none());
        assert_eq!(slot.take_due(1800).map(|t| t.action), Some(TimerAction::Retry));
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_slot_cancel() {
        let mut slot = TimerSlot::default();
        slot.schedule(0, 800, TimerAction::Retry);
        assert!(slot.cancel().is_some());
        assert!(slot.take_due(u64::MAX).is_none());
    }

    #[test]
    fn test_countdown_ticks_and_stops_at_zero() {
        let mut countdown = Countdown::new(2, 1000, 0);
        assert_eq!(countdown.take_due(999), None);
        assert_eq!(countdown.take_due(1000), Some(1000));
        assert!(!countdown.decrement());
        assert_eq!(countdown.take_due(2500), Some(2000));
        assert!(countdown.decrement());
        assert_eq!(countdown.remaining(), 0);
        assert!(!countdown.decrement());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_countdown_pause_and_resume() {
        let mut countdown = Countdown::new(5, 1000, 0);
        assert!(!countdown.toggle(300));
        assert_eq!(countdown.due_at(), None);
        assert_eq!(countdown.take_due(10_000), None);
        assert!(countdown.toggle(10_000));
        assert_eq!(countdown.due_at(), Some(11_000));
        countdown.reset(5, 12_000);
        assert_eq!(countdown.due_at(), Some(13_000));
    }
}
