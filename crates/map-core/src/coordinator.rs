//! Routes map notifications to indicators, fade timers and sound cues.
//!
//! Everything runs on one thread and time is passed in explicitly: callers
//! feed events as they arrive and call [`FeedbackCoordinator::tick`] from
//! their frame loop to expire fades and release debounced elevation lookups.

use crate::catalog::{SoundCatalog, SoundName};
use crate::config::FeedbackConfig;
use crate::constants::SHOWN_OPACITY;
use crate::gesture::{GestureBatch, GestureClassifier, LngLat, MapView, PointerEdge};
use crate::indicator::{DebouncedIndicator, IndicatorId, IndicatorSurface};
use crate::readout::{AltitudeReadout, Reading};
use crate::tone::ToneSink;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    Move,
    Zoom,
    Pitch,
    Rotate,
    Click,
}

impl MapEventKind {
    pub const ALL: [MapEventKind; 5] = [
        MapEventKind::Move,
        MapEventKind::Zoom,
        MapEventKind::Pitch,
        MapEventKind::Rotate,
        MapEventKind::Click,
    ];

    /// Event name on the map SDK.
    pub fn as_str(self) -> &'static str {
        match self {
            MapEventKind::Move => "move",
            MapEventKind::Zoom => "zoom",
            MapEventKind::Pitch => "pitch",
            MapEventKind::Rotate => "rotate",
            MapEventKind::Click => "click",
        }
    }

    /// Indicators refreshed straight from the camera for this event.
    fn indicators(self) -> &'static [IndicatorId] {
        use IndicatorId::*;
        match self {
            MapEventKind::Move => &[Coordinates, Scale, Pitch],
            MapEventKind::Zoom => &[Coordinates, Zoom, Scale],
            MapEventKind::Pitch => &[Coordinates, Scale, Pitch, Compass],
            MapEventKind::Rotate => &[Coordinates, Pitch, Compass],
            MapEventKind::Click => &[],
        }
    }

    fn refreshes_altitude(self) -> bool {
        matches!(
            self,
            MapEventKind::Move | MapEventKind::Pitch | MapEventKind::Rotate
        )
    }
}

/// Identifies one elevation lookup. Only the most recently issued token is
/// accepted back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElevationToken(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationRequest {
    pub token: ElevationToken,
    pub at: LngLat,
}

#[derive(Clone, Debug, Default)]
struct ElevationDebounce {
    deadline: Option<Duration>,
    at: LngLat,
    issued: u64,
}

pub struct FeedbackCoordinator<S, T> {
    config: FeedbackConfig,
    classifier: GestureClassifier,
    catalog: SoundCatalog,
    indicators: Vec<DebouncedIndicator>,
    elevation: ElevationDebounce,
    surface: S,
    tones: T,
}

impl<S: IndicatorSurface, T: ToneSink> FeedbackCoordinator<S, T> {
    pub fn new(config: FeedbackConfig, catalog: SoundCatalog, surface: S, tones: T) -> Self {
        let indicators = IndicatorId::ALL
            .iter()
            .map(|&id| DebouncedIndicator::new(id, config.fade_delay))
            .collect();
        Self {
            classifier: GestureClassifier::new(config.gestures),
            config,
            catalog,
            indicators,
            elevation: ElevationDebounce::default(),
            surface,
            tones,
        }
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SoundCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn indicator(&self, id: IndicatorId) -> &DebouncedIndicator {
        &self.indicators[id.index()]
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn tones(&self) -> &T {
        &self.tones
    }

    #[inline]
    pub fn sound_enabled(&self) -> bool {
        self.config.sound_enabled
    }

    /// Returns whether the flag changed. Takes effect for the very next
    /// dispatch, including ticks of a drag that is already under way.
    pub fn set_sound_enabled(&mut self, enabled: bool) -> bool {
        if self.config.sound_enabled == enabled {
            return false;
        }
        self.config.sound_enabled = enabled;
        log::info!(
            "[sfx] map sounds {}",
            if enabled { "enabled" } else { "disabled" }
        );
        true
    }

    pub fn toggle_sound(&mut self) -> bool {
        let next = !self.config.sound_enabled;
        self.set_sound_enabled(next);
        next
    }

    /// Handle one map change notification. Returns the gestures it produced,
    /// whether or not they were voiced.
    pub fn on_map_event(&mut self, kind: MapEventKind, view: &MapView, now: Duration) -> GestureBatch {
        let mut gestures = GestureBatch::new();
        match kind {
            MapEventKind::Zoom => gestures.extend(self.classifier.observe_zoom(view.zoom)),
            MapEventKind::Pitch => gestures.extend(self.classifier.observe_pitch(view.pitch)),
            MapEventKind::Rotate => gestures.extend(self.classifier.observe_bearing(view.bearing)),
            MapEventKind::Move | MapEventKind::Click => {}
        }

        for &id in kind.indicators() {
            if let Some(reading) = Reading::from_view(id, view, self.config.max_pitch_deg) {
                self.show(&reading, now);
            }
        }
        if kind.refreshes_altitude() {
            self.debounce_elevation(view.center, now);
        }

        if kind == MapEventKind::Click {
            self.play(SoundName::Click);
        }
        for g in &gestures {
            self.play(g.sound());
        }
        gestures
    }

    pub fn on_pointer(&mut self, edge: PointerEdge, view: &MapView) {
        let was_dragging = self.classifier.is_dragging();
        self.classifier.on_pointer(edge, &view.sample());
        match (was_dragging, self.classifier.is_dragging()) {
            (false, true) => log::debug!("[gesture] drag started"),
            (true, false) => log::debug!("[gesture] drag ended"),
            _ => {}
        }
    }

    /// Voice a cue if sounds are on. Returns whether a tone was dispatched.
    pub fn play(&mut self, name: SoundName) -> bool {
        if !self.config.sound_enabled {
            return false;
        }
        match self.catalog.lookup_sound(name) {
            Some(spec) => {
                self.tones.play(spec);
                true
            }
            None => false,
        }
    }

    /// Update an indicator, bring it to full opacity and restart its fade.
    pub fn show(&mut self, reading: &Reading, now: Duration) {
        let id = reading.indicator();
        self.surface.update(reading);
        self.surface.set_opacity(id, SHOWN_OPACITY);
        self.indicators[id.index()].show(now);
    }

    /// Restart the quiet window before the next elevation lookup.
    pub fn debounce_elevation(&mut self, at: LngLat, now: Duration) {
        self.elevation.at = at;
        self.elevation.deadline = Some(now + self.config.elevation_debounce);
    }

    /// Expire due fades and release a due elevation lookup.
    pub fn tick(&mut self, now: Duration) -> Option<ElevationRequest> {
        for ind in self.indicators.iter_mut() {
            if ind.expire(now) {
                self.surface.set_opacity(ind.id(), self.config.dim_opacity);
            }
        }

        match self.elevation.deadline {
            Some(deadline) if deadline <= now => {
                self.elevation.deadline = None;
                self.elevation.issued += 1;
                Some(ElevationRequest {
                    token: ElevationToken(self.elevation.issued),
                    at: self.elevation.at,
                })
            }
            _ => None,
        }
    }

    /// Apply an elevation result. `None` means the lookup failed and reads as
    /// sea level. Results for superseded requests are dropped.
    pub fn apply_elevation(
        &mut self,
        token: ElevationToken,
        meters: Option<f64>,
        now: Duration,
    ) -> bool {
        if token.0 != self.elevation.issued {
            log::debug!(
                "[elevation] dropping stale result {:?} (latest {})",
                token,
                self.elevation.issued
            );
            return false;
        }
        self.show(&Reading::Altitude(AltitudeReadout::new(meters)), now);
        true
    }
}
