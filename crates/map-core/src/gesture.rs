//! Reduces the continuous stream of map camera samples to discrete gesture
//! events: zoom detents every 0.1 zoom level and pitch/bearing ticks while a
//! secondary-button drag is held.

use crate::catalog::SoundName;
use crate::constants::{BEARING_TICK_DEG, DRAG_BUTTON, PITCH_TICK_DEG, ZOOM_SNAP_STEP};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// The camera values the classifier cares about.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapSample {
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// Full camera state as read from the map after a change notification.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapView {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl MapView {
    #[inline]
    pub fn sample(&self) -> MapSample {
        MapSample {
            zoom: self.zoom,
            pitch: self.pitch,
            bearing: self.bearing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureEvent {
    ZoomCrossed(ZoomDirection),
    PitchTick,
    BearingTick,
}

impl GestureEvent {
    pub fn sound(self) -> SoundName {
        match self {
            GestureEvent::ZoomCrossed(ZoomDirection::In) => SoundName::ZoomIn,
            GestureEvent::ZoomCrossed(ZoomDirection::Out) => SoundName::ZoomOut,
            GestureEvent::PitchTick => SoundName::Pitch,
            GestureEvent::BearingTick => SoundName::Bearing,
        }
    }
}

pub type GestureBatch = SmallVec<[GestureEvent; 3]>;

/// Pointer-button edges over the map canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEdge {
    Down { button: i16 },
    Up { button: i16 },
    Leave,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureThresholds {
    pub zoom_snap_step: f64,
    pub pitch_deg: f64,
    pub bearing_deg: f64,
    pub drag_button: i16,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            zoom_snap_step: ZOOM_SNAP_STEP,
            pitch_deg: PITCH_TICK_DEG,
            bearing_deg: BEARING_TICK_DEG,
            drag_button: DRAG_BUTTON,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SnapState {
    pub previous_zoom_snap: Option<f64>,
    pub previous_pitch: Option<f64>,
    pub previous_bearing: Option<f64>,
    pub drag_active: bool,
}

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    thresholds: GestureThresholds,
    // 1 / zoom_snap_step, rounded so 0.1 quantizes as `floor(z * 10)`
    snaps_per_level: f64,
    state: SnapState,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

impl GestureClassifier {
    pub fn new(thresholds: GestureThresholds) -> Self {
        let snaps_per_level = (1.0 / thresholds.zoom_snap_step).round().max(1.0);
        Self {
            thresholds,
            snaps_per_level,
            state: SnapState::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &SnapState {
        &self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state.drag_active
    }

    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Quantize a zoom level down to its snap point.
    #[inline]
    pub fn snap(&self, zoom: f64) -> f64 {
        (zoom * self.snaps_per_level).floor() / self.snaps_per_level
    }

    /// One event at most per sample, however many detents a fling skipped.
    /// The snap memory is updated on every sample so a later sample compares
    /// against the most recent position, not the last one that made a sound.
    pub fn observe_zoom(&mut self, zoom: f64) -> Option<GestureEvent> {
        let snap = self.snap(zoom);
        let event = match self.state.previous_zoom_snap {
            Some(prev) if snap > prev => Some(GestureEvent::ZoomCrossed(ZoomDirection::In)),
            Some(prev) if snap < prev => Some(GestureEvent::ZoomCrossed(ZoomDirection::Out)),
            _ => None,
        };
        self.state.previous_zoom_snap = Some(snap);
        event
    }

    pub fn observe_pitch(&mut self, pitch: f64) -> Option<GestureEvent> {
        if !self.state.drag_active {
            return None;
        }
        let threshold = self.thresholds.pitch_deg;
        drag_tick(&mut self.state.previous_pitch, pitch, threshold, |a, b| {
            (a - b).abs()
        })
        .then_some(GestureEvent::PitchTick)
    }

    pub fn observe_bearing(&mut self, bearing: f64) -> Option<GestureEvent> {
        if !self.state.drag_active {
            return None;
        }
        let threshold = self.thresholds.bearing_deg;
        drag_tick(
            &mut self.state.previous_bearing,
            bearing,
            threshold,
            bearing_distance,
        )
        .then_some(GestureEvent::BearingTick)
    }

    /// Run every axis over one sample.
    pub fn observe(&mut self, sample: &MapSample) -> GestureBatch {
        let mut out = GestureBatch::new();
        out.extend(self.observe_zoom(sample.zoom));
        out.extend(self.observe_pitch(sample.pitch));
        out.extend(self.observe_bearing(sample.bearing));
        out
    }

    pub fn on_pointer(&mut self, edge: PointerEdge, sample: &MapSample) {
        match edge {
            PointerEdge::Down { button } if button == self.thresholds.drag_button => {
                self.begin_drag(sample)
            }
            PointerEdge::Up { button } if button == self.thresholds.drag_button => self.end_drag(),
            PointerEdge::Leave => self.end_drag(),
            _ => {}
        }
    }

    /// Start a drag, recording where pitch and bearing are now.
    pub fn begin_drag(&mut self, sample: &MapSample) {
        self.state.drag_active = true;
        self.state.previous_pitch = Some(sample.pitch);
        self.state.previous_bearing = Some(sample.bearing);
    }

    pub fn end_drag(&mut self) {
        self.state.drag_active = false;
        self.state.previous_pitch = None;
        self.state.previous_bearing = None;
    }
}

fn drag_tick(
    last: &mut Option<f64>,
    current: f64,
    threshold: f64,
    distance: impl Fn(f64, f64) -> f64,
) -> bool {
    match *last {
        None => {
            *last = Some(current);
            false
        }
        Some(prev) if distance(current, prev) >= threshold => {
            *last = Some(current);
            true
        }
        Some(_) => false,
    }
}

/// Shortest arc between two bearings, in degrees.
#[inline]
pub fn bearing_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
