//! Declarative tone descriptions and the gain automation used to play them.
//!
//! A [`ToneSpec`] is pure data. Backends (WebAudio on the web, fakes in tests)
//! implement [`ToneSink`] and turn a spec into sound; the envelope maths lives
//! here so every backend shapes a cue the same way.

use smallvec::SmallVec;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Optional biquad stage between the oscillator and the gain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub frequency_hz: f32,
    pub q: f32,
}

/// Linear attack and release around the held level. Zero means a hard gate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Envelope {
    pub attack_sec: f64,
    pub release_sec: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneSpec {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub duration_sec: f64,
    pub volume: f32,
    pub envelope: Envelope,
    pub filter: Option<FilterSpec>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToneError {
    #[error("tone frequency must be positive, got {0} Hz")]
    Frequency(f32),
    #[error("tone duration must be positive, got {0} s")]
    Duration(f64),
    #[error("tone volume must be within [0, 1], got {0}")]
    Volume(f32),
    #[error("envelope times must be finite and non-negative, got attack {attack} s, release {release} s")]
    Envelope { attack: f64, release: f64 },
    #[error("filter frequency and Q must be positive, got {frequency} Hz, Q {q}")]
    Filter { frequency: f32, q: f32 },
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

// NaN and negative times collapse to zero.
fn sanitized(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainStep {
    /// Jump to the value at the given time.
    Set,
    /// Ramp linearly from the previous point to the value.
    Ramp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainPoint {
    pub at_sec: f64,
    pub gain: f32,
    pub step: GainStep,
}

pub type GainSchedule = SmallVec<[GainPoint; 4]>;

impl ToneSpec {
    /// Plain gated oscillator, the shape every catalog cue uses.
    pub const fn gated(waveform: Waveform, frequency_hz: f32, duration_sec: f64, volume: f32) -> Self {
        Self {
            waveform,
            frequency_hz,
            duration_sec,
            volume,
            envelope: Envelope {
                attack_sec: 0.0,
                release_sec: 0.0,
            },
            filter: None,
        }
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn validate(&self) -> Result<(), ToneError> {
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(ToneError::Frequency(self.frequency_hz));
        }
        if !(self.duration_sec.is_finite() && self.duration_sec > 0.0) {
            return Err(ToneError::Duration(self.duration_sec));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ToneError::Volume(self.volume));
        }
        let Envelope {
            attack_sec,
            release_sec,
        } = self.envelope;
        if !(non_negative(attack_sec) && non_negative(release_sec)) {
            return Err(ToneError::Envelope {
                attack: attack_sec,
                release: release_sec,
            });
        }
        if let Some(f) = self.filter {
            if !(positive(f.frequency_hz) && positive(f.q)) {
                return Err(ToneError::Filter {
                    frequency: f.frequency_hz,
                    q: f.q,
                });
            }
        }
        Ok(())
    }

    /// Gain automation for a tone starting at `t0` (seconds on the audio clock).
    ///
    /// Attack and release are clipped so they always fit inside the duration.
    /// The last point is always silence at `t0 + duration_sec`. Unvalidated
    /// specs are tolerated: non-finite or negative times count as zero.
    pub fn gain_schedule(&self, t0: f64) -> GainSchedule {
        let dur = sanitized(self.duration_sec);
        let attack = sanitized(self.envelope.attack_sec).min(dur);
        let release = sanitized(self.envelope.release_sec).min(dur - attack);
        let end = t0 + dur;

        let mut points = GainSchedule::new();
        if attack > 0.0 {
            points.push(GainPoint {
                at_sec: t0,
                gain: 0.0,
                step: GainStep::Set,
            });
            points.push(GainPoint {
                at_sec: t0 + attack,
                gain: self.volume,
                step: GainStep::Ramp,
            });
        } else {
            points.push(GainPoint {
                at_sec: t0,
                gain: self.volume,
                step: GainStep::Set,
            });
        }
        if release > 0.0 {
            points.push(GainPoint {
                at_sec: (end - release).max(t0 + attack),
                gain: self.volume,
                step: GainStep::Set,
            });
            points.push(GainPoint {
                at_sec: end,
                gain: 0.0,
                step: GainStep::Ramp,
            });
        } else {
            points.push(GainPoint {
                at_sec: end,
                gain: 0.0,
                step: GainStep::Set,
            });
        }
        points
    }

    /// When the oscillator should be stopped for a tone starting at `t0`.
    #[inline]
    pub fn stop_at(&self, t0: f64) -> f64 {
        t0 + sanitized(self.duration_sec)
    }
}

/// Anything that can voice a tone. Implementations must never fail loudly:
/// an unavailable backend turns `play` into a logged no-op.
pub trait ToneSink {
    fn play(&mut self, spec: &ToneSpec);
}
