//! Transient indicators that light up on change and dim after a quiet period.

use crate::readout::Reading;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorId {
    Coordinates,
    Zoom,
    Pitch,
    Altitude,
    Scale,
    Compass,
}

impl IndicatorId {
    pub const ALL: [IndicatorId; 6] = [
        IndicatorId::Coordinates,
        IndicatorId::Zoom,
        IndicatorId::Pitch,
        IndicatorId::Altitude,
        IndicatorId::Scale,
        IndicatorId::Compass,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorId::Coordinates => "coordinates",
            IndicatorId::Zoom => "zoom",
            IndicatorId::Pitch => "pitch",
            IndicatorId::Altitude => "altitude",
            IndicatorId::Scale => "scale",
            IndicatorId::Compass => "compass",
        }
    }
}

/// The UI side of the indicators. Implementations must tolerate missing
/// elements; the coordinator never checks.
pub trait IndicatorSurface {
    fn update(&mut self, reading: &Reading);
    fn set_opacity(&mut self, id: IndicatorId, opacity: f32);
}

/// One fade timer per indicator. Showing always replaces the pending fade,
/// so there is never more than one deadline outstanding.
#[derive(Clone, Debug)]
pub struct DebouncedIndicator {
    id: IndicatorId,
    fade_delay: Duration,
    fade_deadline: Option<Duration>,
    dimmed: bool,
}

impl DebouncedIndicator {
    pub fn new(id: IndicatorId, fade_delay: Duration) -> Self {
        Self {
            id,
            fade_delay,
            fade_deadline: None,
            dimmed: false,
        }
    }

    #[inline]
    pub fn id(&self) -> IndicatorId {
        self.id
    }

    /// Bring the indicator to full opacity and restart its fade.
    pub fn show(&mut self, now: Duration) {
        self.dimmed = false;
        self.schedule_fade_in(now, self.fade_delay);
    }

    pub fn schedule_fade_in(&mut self, now: Duration, delay: Duration) {
        self.fade_deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.fade_deadline = None;
    }

    #[inline]
    pub fn fade_deadline(&self) -> Option<Duration> {
        self.fade_deadline
    }

    #[inline]
    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    /// Returns true exactly once per scheduled fade, when its deadline passes.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.fade_deadline {
            Some(deadline) if deadline <= now => {
                self.fade_deadline = None;
                self.dimmed = true;
                true
            }
            _ => false,
        }
    }
}
