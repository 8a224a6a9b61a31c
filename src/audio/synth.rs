use serde::Serialize;

/// Highest sample rate `render` will produce audio for.
pub const MAX_SAMPLE_RATE: f32 = 384_000.0;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Triangle,
    Square,
}

impl Waveform {
    /// Sample the waveform at `phase` cycles (only the fractional part matters).
    pub fn sample(self, phase: f32) -> f32 {
        let p = phase - phase.floor();
        match self {
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Linear ADSR, times in seconds, sustain as a 0-1 level.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Envelope {
    fn held_level(&self, t: f32) -> f32 {
        if t < self.attack {
            t / self.attack
        } else if t < self.attack + self.decay {
            let progress = (t - self.attack) / self.decay;
            1.0 - (1.0 - self.sustain) * progress
        } else {
            self.sustain
        }
    }

    /// Level `t` seconds after note-on for a note released at `hold`.
    pub fn level(&self, t: f32, hold: f32) -> f32 {
        if t < hold {
            return self.held_level(t);
        }
        if self.release <= 0.0 {
            return 0.0;
        }
        let start = self.held_level(hold);
        let progress = (t - hold) / self.release;
        (start * (1.0 - progress)).max(0.0)
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct FmModulator {
    pub harmonicity: f32,
    pub index: f32,
    pub waveform: Waveform,
    pub envelope: Envelope,
}

/// A single-voice instrument: carrier oscillator, optional frequency
/// modulator, amplitude envelope and output gain.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Patch {
    pub carrier: Waveform,
    pub modulator: Option<FmModulator>,
    pub envelope: Envelope,
    pub gain_db: f32,
    /// Seconds between note-on and note-off.
    pub hold: f32,
}

impl Patch {
    pub fn duration(&self) -> f32 {
        let mut tail = self.envelope.release;
        if let Some(m) = &self.modulator {
            tail = tail.max(m.envelope.release);
        }
        self.hold + tail
    }

    pub fn gain(&self) -> f32 {
        10f32.powf(self.gain_db / 20.0)
    }

    /// Render one note at `freq_hz` into mono samples. Out-of-range or
    /// non-finite rates and frequencies yield an empty buffer.
    pub fn render(&self, freq_hz: f32, sample_rate: f32) -> Vec<f32> {
        let rate_ok =
            sample_rate.is_finite() && sample_rate > 0.0 && sample_rate <= MAX_SAMPLE_RATE;
        if !rate_ok || !freq_hz.is_finite() || freq_hz <= 0.0 {
            return Vec::new();
        }

        let len = (self.duration() * sample_rate).ceil() as usize;
        let gain = self.gain();
        let dt = 1.0 / sample_rate;

        let mut samples = Vec::with_capacity(len);
        let mut carrier_phase = 0.0f32;
        let mut mod_phase = 0.0f32;

        for i in 0..len {
            let t = i as f32 * dt;

            let deviation = match &self.modulator {
                Some(m) => {
                    let mod_freq = freq_hz * m.harmonicity;
                    let depth = m.index * mod_freq * m.envelope.level(t, self.hold);
                    let value = m.waveform.sample(mod_phase) * depth;
                    mod_phase = (mod_phase + mod_freq * dt).fract();
                    value
                }
                None => 0.0,
            };

            let amp = self.envelope.level(t, self.hold);
            samples.push(self.carrier.sample(carrier_phase) * amp * gain);

            // Negative instantaneous frequency just runs the phase backwards
            carrier_phase = (carrier_phase + (freq_hz + deviation) * dt).rem_euclid(1.0);
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(hold: f32) -> Patch {
        Patch {
            carrier: Waveform::Triangle,
            modulator: None,
            envelope: Envelope {
                attack: 0.01,
                decay: 0.1,
                sustain: 0.5,
                release: 0.2,
            },
            gain_db: 0.0,
            hold,
        }
    }

    #[test]
    fn test_waveform_shapes() {
        assert!((Waveform::Triangle.sample(0.0) + 1.0).abs() < 1e-6);
        assert!((Waveform::Triangle.sample(0.5) - 1.0).abs() < 1e-6);
        assert_eq!(Waveform::Square.sample(0.25), 1.0);
        assert_eq!(Waveform::Square.sample(0.75), -1.0);
        assert!((Waveform::Triangle.sample(1.25) - Waveform::Triangle.sample(0.25)).abs() < 1e-5);
    }

    #[test]
    fn test_envelope_stages() {
        let env = plain(1.0).envelope;
        assert_eq!(env.level(0.0, 1.0), 0.0);
        assert!((env.level(0.01, 1.0) - 1.0).abs() < 1e-6);
        assert!((env.level(0.5, 1.0) - 0.5).abs() < 1e-6);
        assert!((env.level(1.1, 1.0) - 0.25).abs() < 1e-6);
        assert_eq!(env.level(1.5, 1.0), 0.0);
    }

    #[test]
    fn test_release_starts_from_current_level() {
        let env = plain(0.005).envelope;
        // Released mid-attack at half level
        assert!((env.level(0.005, 0.005) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_render_length_and_fade() {
        let patch = plain(0.3);
        let samples = patch.render(220.0, 8000.0);
        assert!((samples.len() as i32 - 4000).abs() <= 1);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        assert!(samples.last().unwrap().abs() < 1e-2);
    }

    #[test]
    fn test_render_pitch_by_zero_crossings() {
        let patch = plain(1.0);
        let sr = 44100.0;
        let samples = patch.render(220.0, sr);
        let window = &samples[(0.2 * sr) as usize..(0.7 * sr) as usize];
        let rising = window
            .windows(2)
            .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
            .count();
        // 220 Hz over half a second
        assert!((rising as i32 - 110).abs() <= 1, "got {} crossings", rising);
    }

    #[test]
    fn test_render_rejects_bad_rate() {
        assert!(plain(0.1).render(220.0, 0.0).is_empty());
        assert!(plain(0.1).render(220.0, -1.0).is_empty());
        assert!(plain(0.1).render(0.0, 8000.0).is_empty());
        assert!(plain(0.1).render(220.0, f32::INFINITY).is_empty());
        assert!(plain(0.1).render(220.0, f32::NAN).is_empty());
        assert!(plain(0.1).render(220.0, 1e12).is_empty());
        assert!(plain(0.1).render(f32::NAN, 8000.0).is_empty());
        assert!(!plain(0.1).render(220.0, MAX_SAMPLE_RATE).is_empty());
    }
}
