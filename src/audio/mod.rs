//! Tone generation for the "play note" side effect. The host owns the
//! audio context; this module only turns a pitch key into samples.

pub mod synth;

use crate::catalog::PitchKey;
use crate::quiz::Instrument;

use synth::{Envelope, FmModulator, Patch, Waveform};

/// Seconds per beat at the 120 bpm transport the note lengths assume.
const BEAT_SECS: f32 = 0.5;

/// Bowed-string approximation: FM with a square modulator and a slow attack.
pub fn cello_patch() -> Patch {
    Patch {
        carrier: Waveform::Triangle,
        modulator: Some(FmModulator {
            harmonicity: 3.01,
            index: 14.0,
            waveform: Waveform::Square,
            envelope: Envelope {
                attack: 0.2,
                decay: 0.01,
                sustain: 1.0,
                release: 0.5,
            },
        }),
        envelope: Envelope {
            attack: 0.2,
            decay: 0.3,
            sustain: 0.9,
            release: 1.2,
        },
        gain_db: -6.0,
        // half note
        hold: 2.0 * BEAT_SECS,
    }
}

/// Plucked/struck approximation: triangle with no sustain.
pub fn piano_patch() -> Patch {
    Patch {
        carrier: Waveform::Triangle,
        modulator: None,
        envelope: Envelope {
            attack: 0.02,
            decay: 0.8,
            sustain: 0.0,
            release: 1.5,
        },
        gain_db: -4.0,
        // eighth note
        hold: 0.5 * BEAT_SECS,
    }
}

pub fn patch_for(instrument: Instrument) -> Patch {
    match instrument {
        Instrument::Cello => cello_patch(),
        Instrument::Piano => piano_patch(),
    }
}

/// Mono samples for one note, covering hold and release.
pub fn render_note(key: &PitchKey, instrument: Instrument, sample_rate: f32) -> Vec<f32> {
    patch_for(instrument).render(key.frequency() as f32, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(samples: &[f32]) -> f32 {
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_note_lengths() {
        let key = PitchKey::parse("c/2").unwrap();
        let cello = render_note(&key, Instrument::Cello, 1000.0);
        let piano = render_note(&key, Instrument::Piano, 1000.0);
        // 1 s hold + 1.2 s release, 0.25 s hold + 1.5 s release
        assert!((cello.len() as i32 - 2200).abs() <= 1);
        assert!((piano.len() as i32 - 1750).abs() <= 1);
    }

    #[test]
    fn test_cello_is_quieter_than_unity_and_audible() {
        let key = PitchKey::parse("a/3").unwrap();
        let samples = render_note(&key, Instrument::Cello, 22050.0);
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= cello_patch().gain() + 1e-6);
        assert!(rms(&samples[4410..17640]) > 0.1);
    }

    #[test]
    fn test_piano_decays_to_silence() {
        let key = PitchKey::parse("d/4").unwrap();
        let samples = render_note(&key, Instrument::Piano, 22050.0);
        let head = rms(&samples[..2205]);
        let tail = rms(&samples[samples.len() - 2205..]);
        assert!(head > tail * 10.0);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let key = PitchKey::parse("d/4").unwrap();
        assert!(render_note(&key, Instrument::Piano, 0.0).is_empty());
        assert!(render_note(&key, Instrument::Piano, f32::INFINITY).is_empty());
    }
}
