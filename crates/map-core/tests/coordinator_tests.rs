// Host-side tests for the feedback coordinator: fades, sound gating and
// debounced elevation lookups, driven by a fake clock.

use map_core::*;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Default)]
struct RecordingSurface {
    readings: Vec<Reading>,
    opacity: HashMap<IndicatorId, f32>,
    dim_count: HashMap<IndicatorId, usize>,
}

impl IndicatorSurface for RecordingSurface {
    fn update(&mut self, reading: &Reading) {
        self.readings.push(reading.clone());
    }

    fn set_opacity(&mut self, id: IndicatorId, opacity: f32) {
        if opacity < 1.0 {
            *self.dim_count.entry(id).or_default() += 1;
        }
        self.opacity.insert(id, opacity);
    }
}

impl RecordingSurface {
    fn opacity(&self, id: IndicatorId) -> Option<f32> {
        self.opacity.get(&id).copied()
    }

    fn dims(&self, id: IndicatorId) -> usize {
        self.dim_count.get(&id).copied().unwrap_or(0)
    }
}

#[derive(Default)]
struct RecordingTones {
    played: Vec<ToneSpec>,
}

impl ToneSink for RecordingTones {
    fn play(&mut self, spec: &ToneSpec) {
        self.played.push(*spec);
    }
}

type Coordinator = FeedbackCoordinator<RecordingSurface, RecordingTones>;

fn coordinator() -> Coordinator {
    FeedbackCoordinator::new(
        FeedbackConfig::default(),
        SoundCatalog::default(),
        RecordingSurface::default(),
        RecordingTones::default(),
    )
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn view(zoom: f64, pitch: f64, bearing: f64) -> MapView {
    MapView {
        center: LngLat {
            lng: 21.78,
            lat: 36.84,
        },
        zoom,
        pitch,
        bearing,
    }
}

fn played_names(c: &Coordinator) -> Vec<&'static str> {
    let catalog = SoundCatalog::default();
    c.tones()
        .played
        .iter()
        .map(|spec| {
            SoundName::ALL
                .into_iter()
                .find(|n| catalog.lookup_sound(*n) == Some(spec))
                .map(SoundName::as_str)
                .unwrap_or("?")
        })
        .collect()
}

#[test]
fn move_shows_indicators_and_fades_after_a_second() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Move, &view(3.0, 0.0, 0.0), ms(0));

    for id in [IndicatorId::Coordinates, IndicatorId::Scale, IndicatorId::Pitch] {
        assert_eq!(c.surface().opacity(id), Some(1.0));
        assert_eq!(c.indicator(id).fade_deadline(), Some(ms(1000)));
    }
    assert_eq!(c.surface().opacity(IndicatorId::Zoom), None);

    c.tick(ms(999));
    assert_eq!(c.surface().opacity(IndicatorId::Coordinates), Some(1.0));

    c.tick(ms(1000));
    assert_eq!(c.surface().opacity(IndicatorId::Coordinates), Some(0.20));
    assert!(c.indicator(IndicatorId::Coordinates).is_dimmed());
    assert_eq!(c.indicator(IndicatorId::Coordinates).fade_deadline(), None);
}

#[test]
fn show_half_a_second_later_postpones_the_fade() {
    let mut c = coordinator();
    let v = view(3.0, 0.0, 0.0);
    c.on_map_event(MapEventKind::Zoom, &v, ms(0));
    c.tick(ms(400));
    c.on_map_event(MapEventKind::Zoom, &v, ms(500));

    for t in (500..1500).step_by(50) {
        c.tick(ms(t));
        assert_eq!(c.surface().dims(IndicatorId::Zoom), 0, "dimmed at {} ms", t);
    }
    c.tick(ms(1500));
    assert_eq!(c.surface().dims(IndicatorId::Zoom), 1);
    assert_eq!(c.surface().opacity(IndicatorId::Zoom), Some(0.20));
}

#[test]
fn each_indicator_has_at_most_one_pending_fade() {
    let mut c = coordinator();
    let v = view(3.0, 10.0, 20.0);
    for t in [0, 100, 200, 300] {
        c.on_map_event(MapEventKind::Pitch, &v, ms(t));
    }
    assert_eq!(c.indicator(IndicatorId::Compass).fade_deadline(), Some(ms(1300)));
    c.tick(ms(5000));
    assert_eq!(c.surface().dims(IndicatorId::Compass), 1);
    c.tick(ms(6000));
    assert_eq!(c.surface().dims(IndicatorId::Compass), 1);
}

#[test]
fn zoom_detents_play_direction_sounds() {
    let mut c = coordinator();
    for (i, z) in [2.04, 2.13, 2.09].into_iter().enumerate() {
        c.on_map_event(MapEventKind::Zoom, &view(z, 0.0, 0.0), ms(i as u64 * 16));
    }
    assert_eq!(played_names(&c), vec!["zoomIn", "zoomOut"]);
}

#[test]
fn zoom_state_tracks_even_while_muted() {
    let mut c = coordinator();
    c.set_sound_enabled(false);
    c.on_map_event(MapEventKind::Zoom, &view(2.0, 0.0, 0.0), ms(0));
    c.on_map_event(MapEventKind::Zoom, &view(2.5, 0.0, 0.0), ms(16));
    c.set_sound_enabled(true);
    // 2.5 was remembered, so staying in that detent is silent
    c.on_map_event(MapEventKind::Zoom, &view(2.55, 0.0, 0.0), ms(32));
    assert!(c.tones().played.is_empty());
}

#[test]
fn click_plays_click_cue() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Click, &view(2.0, 0.0, 0.0), ms(0));
    assert_eq!(played_names(&c), vec!["click"]);
}

#[test]
fn muting_mid_drag_silences_remaining_ticks() {
    let mut c = coordinator();
    let start = view(3.0, 10.0, 0.0);
    c.on_pointer(PointerEdge::Down { button: 2 }, &start);

    c.on_map_event(MapEventKind::Pitch, &view(3.0, 11.0, 0.0), ms(16));
    assert_eq!(c.tones().played.len(), 1);

    c.set_sound_enabled(false);
    c.on_map_event(MapEventKind::Pitch, &view(3.0, 14.0, 0.0), ms(32));
    c.on_map_event(MapEventKind::Rotate, &view(3.0, 14.0, 30.0), ms(48));
    c.on_map_event(MapEventKind::Click, &view(3.0, 14.0, 30.0), ms(64));
    assert_eq!(c.tones().played.len(), 1);
    assert!(c.classifier().is_dragging());
}

#[test]
fn sound_toggle_is_idempotent() {
    let mut c = coordinator();
    assert!(c.sound_enabled());
    assert!(!c.set_sound_enabled(true));
    assert!(c.set_sound_enabled(false));
    assert!(!c.set_sound_enabled(false));
    assert!(!c.sound_enabled());
    assert!(c.toggle_sound());
    assert!(c.sound_enabled());
}

#[test]
fn drag_ticks_play_pitch_and_bearing_cues() {
    let mut c = coordinator();
    c.on_pointer(PointerEdge::Down { button: 2 }, &view(3.0, 10.0, 0.0));
    c.on_map_event(MapEventKind::Pitch, &view(3.0, 10.3, 0.0), ms(16));
    c.on_map_event(MapEventKind::Pitch, &view(3.0, 10.6, 0.0), ms(32));
    c.on_map_event(MapEventKind::Rotate, &view(3.0, 10.6, 1.5), ms(48));
    c.on_pointer(PointerEdge::Up { button: 2 }, &view(3.0, 10.6, 1.5));
    c.on_map_event(MapEventKind::Rotate, &view(3.0, 10.6, 20.0), ms(64));
    assert_eq!(played_names(&c), vec!["pitch", "bearing"]);
}

#[test]
fn elevation_lookup_waits_for_a_quiet_period() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Move, &view(3.0, 0.0, 0.0), ms(0));
    assert_eq!(c.tick(ms(50)), None);

    let mut moved = view(3.0, 0.0, 0.0);
    moved.center.lng = 22.0;
    c.on_map_event(MapEventKind::Move, &moved, ms(80));
    assert_eq!(c.tick(ms(150)), None);

    let req = c.tick(ms(180)).expect("lookup due 100 ms after the last move");
    assert_eq!(req.at.lng, 22.0);
    assert_eq!(c.tick(ms(400)), None);
}

#[test]
fn zoom_alone_does_not_query_elevation() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Zoom, &view(3.0, 0.0, 0.0), ms(0));
    assert_eq!(c.tick(ms(500)), None);
}

#[test]
fn elevation_result_shows_altitude() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Rotate, &view(3.0, 0.0, 10.0), ms(0));
    let req = c.tick(ms(100)).unwrap();
    assert!(c.apply_elevation(req.token, Some(1234.4), ms(300)));

    assert_eq!(c.surface().opacity(IndicatorId::Altitude), Some(1.0));
    let last = c.surface().readings.last().unwrap();
    match last {
        Reading::Altitude(a) => assert_eq!(a.label, "1234m"),
        other => panic!("unexpected reading {:?}", other),
    }
    assert_eq!(c.indicator(IndicatorId::Altitude).fade_deadline(), Some(ms(1300)));
}

#[test]
fn stale_elevation_results_are_discarded() {
    let mut c = coordinator();
    let v = view(3.0, 0.0, 0.0);
    c.on_map_event(MapEventKind::Move, &v, ms(0));
    let first = c.tick(ms(100)).unwrap();
    c.on_map_event(MapEventKind::Move, &v, ms(200));
    let second = c.tick(ms(300)).unwrap();
    assert!(second.token > first.token);

    // the newer lookup resolves first, the older one straggles in later
    assert!(c.apply_elevation(second.token, Some(500.0), ms(350)));
    assert!(!c.apply_elevation(first.token, Some(9000.0), ms(400)));

    let altitudes: Vec<f64> = c
        .surface()
        .readings
        .iter()
        .filter_map(|r| match r {
            Reading::Altitude(a) => Some(a.meters),
            _ => None,
        })
        .collect();
    assert_eq!(altitudes, vec![500.0]);
}

#[test]
fn failed_elevation_reads_as_sea_level() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Pitch, &view(3.0, 5.0, 0.0), ms(0));
    let req = c.tick(ms(100)).unwrap();
    assert!(c.apply_elevation(req.token, None, ms(120)));
    match c.surface().readings.last() {
        Some(Reading::Altitude(a)) => assert_eq!(a.meters, 0.0),
        other => panic!("unexpected reading {:?}", other),
    }
}

#[test]
fn event_fan_out_matches_indicator_sets() {
    let mut c = coordinator();
    c.on_map_event(MapEventKind::Rotate, &view(3.0, 0.0, 10.0), ms(0));
    let ids: Vec<IndicatorId> = c
        .surface()
        .readings
        .iter()
        .map(Reading::indicator)
        .collect();
    assert_eq!(
        ids,
        vec![
            IndicatorId::Coordinates,
            IndicatorId::Pitch,
            IndicatorId::Compass
        ]
    );
}
