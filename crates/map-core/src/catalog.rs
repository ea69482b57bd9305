//! Named sound cues.
//!
//! The catalog is filled once at start-up and only read afterwards. Lookups
//! by string are what UI code and debugging hooks use; gesture dispatch goes
//! through the typed [`SoundName`].

use crate::tone::{ToneError, ToneSpec, Waveform};
use fnv::FnvHashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundName {
    Click,
    ZoomIn,
    ZoomOut,
    Pitch,
    Bearing,
}

impl SoundName {
    pub const ALL: [SoundName; 5] = [
        SoundName::Click,
        SoundName::ZoomIn,
        SoundName::ZoomOut,
        SoundName::Pitch,
        SoundName::Bearing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundName::Click => "click",
            SoundName::ZoomIn => "zoomIn",
            SoundName::ZoomOut => "zoomOut",
            SoundName::Pitch => "pitch",
            SoundName::Bearing => "bearing",
        }
    }

    /// Label shown in the SFX panel.
    pub fn label(self) -> &'static str {
        match self {
            SoundName::Click => "Map Click",
            SoundName::ZoomIn => "Zoom In",
            SoundName::ZoomOut => "Zoom Out",
            SoundName::Pitch => "Pitch",
            SoundName::Bearing => "Bearing",
        }
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown sound \"{0}\"")]
pub struct UnknownSound(pub String);

impl FromStr for SoundName {
    type Err = UnknownSound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| UnknownSound(s.to_string()))
    }
}

#[derive(Clone, Debug)]
pub struct SoundCatalog {
    sounds: FnvHashMap<String, ToneSpec>,
}

impl Default for SoundCatalog {
    /// Short, quiet clicks: high square for map clicks, sawtooth detents for
    /// zoom, a soft sine for pitch and a triangle for bearing.
    fn default() -> Self {
        let mut sounds = FnvHashMap::default();
        let mut put = |name: SoundName, spec: ToneSpec| {
            sounds.insert(name.as_str().to_string(), spec);
        };
        put(
            SoundName::Click,
            ToneSpec::gated(Waveform::Square, 5555.0, 0.02, 0.125),
        );
        put(
            SoundName::ZoomIn,
            ToneSpec::gated(Waveform::Sawtooth, 5600.0, 0.02, 0.05),
        );
        put(
            SoundName::ZoomOut,
            ToneSpec::gated(Waveform::Sawtooth, 5000.0, 0.02, 0.05),
        );
        put(
            SoundName::Pitch,
            ToneSpec::gated(Waveform::Sine, 1600.0, 0.02, 0.05),
        );
        put(
            SoundName::Bearing,
            ToneSpec::gated(Waveform::Triangle, 800.0, 0.02, 0.05),
        );
        Self { sounds }
    }
}

impl SoundCatalog {
    pub fn empty() -> Self {
        Self {
            sounds: FnvHashMap::default(),
        }
    }

    /// Register or replace a cue. Invalid specs are rejected so that `play`
    /// never sees a negative duration or an out-of-range volume.
    pub fn insert(&mut self, name: impl Into<String>, spec: ToneSpec) -> Result<(), ToneError> {
        spec.validate()?;
        self.sounds.insert(name.into(), spec);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&ToneSpec> {
        let found = self.sounds.get(name);
        if found.is_none() {
            log::warn!(
                "[sfx] sound \"{}\" not found; available: {:?}",
                name,
                self.names()
            );
        }
        found
    }

    #[inline]
    pub fn lookup_sound(&self, name: SoundName) -> Option<&ToneSpec> {
        self.lookup(name.as_str())
    }

    /// Sorted so diagnostics are stable.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sounds.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}
