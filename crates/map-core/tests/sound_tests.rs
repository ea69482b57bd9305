// Host-side tests for tone specs and the sound catalog.

use map_core::*;

#[test]
fn default_catalog_covers_every_cue() {
    let catalog = SoundCatalog::default();
    assert_eq!(catalog.len(), SoundName::ALL.len());
    for name in SoundName::ALL {
        let spec = catalog.lookup(name.as_str()).expect("cue present");
        assert!(spec.validate().is_ok(), "{} is invalid", name);
    }
}

#[test]
fn catalog_values() {
    let catalog = SoundCatalog::default();
    let click = catalog.lookup_sound(SoundName::Click).unwrap();
    assert_eq!(click.waveform, Waveform::Square);
    assert_eq!(click.frequency_hz, 5555.0);
    assert_eq!(click.volume, 0.125);

    let zoom_in = catalog.lookup("zoomIn").unwrap();
    let zoom_out = catalog.lookup("zoomOut").unwrap();
    assert_eq!(zoom_in.waveform, Waveform::Sawtooth);
    assert!(zoom_in.frequency_hz > zoom_out.frequency_hz);
    assert_eq!(catalog.lookup("bearing").unwrap().waveform, Waveform::Triangle);
    assert_eq!(catalog.lookup("pitch").unwrap().waveform, Waveform::Sine);
}

#[test]
fn unknown_name_is_none() {
    let catalog = SoundCatalog::default();
    assert!(catalog.lookup("nonexistent").is_none());
    assert!(SoundCatalog::empty().lookup("click").is_none());
}

#[test]
fn names_are_sorted() {
    let catalog = SoundCatalog::default();
    assert_eq!(
        catalog.names(),
        vec!["bearing", "click", "pitch", "zoomIn", "zoomOut"]
    );
}

#[test]
fn insert_rejects_invalid_specs() {
    let mut catalog = SoundCatalog::empty();
    assert_eq!(
        catalog.insert("loud", ToneSpec::gated(Waveform::Sine, 440.0, 0.1, 1.5)),
        Err(ToneError::Volume(1.5))
    );
    assert_eq!(
        catalog.insert("silent", ToneSpec::gated(Waveform::Sine, 0.0, 0.1, 0.5)),
        Err(ToneError::Frequency(0.0))
    );
    assert_eq!(
        catalog.insert("instant", ToneSpec::gated(Waveform::Sine, 440.0, 0.0, 0.5)),
        Err(ToneError::Duration(0.0))
    );
    assert!(catalog.is_empty());

    catalog
        .insert("hover", ToneSpec::gated(Waveform::Sine, 800.0, 0.05, 0.1))
        .unwrap();
    assert!(catalog.lookup("hover").is_some());
}

#[test]
fn sound_names_parse_and_label() {
    for name in SoundName::ALL {
        assert_eq!(name.as_str().parse::<SoundName>(), Ok(name));
    }
    assert_eq!(
        "ZoomIn".parse::<SoundName>(),
        Err(UnknownSound("ZoomIn".to_string()))
    );
    assert_eq!(
        UnknownSound("hover".to_string()).to_string(),
        "unknown sound \"hover\""
    );
    assert_eq!(SoundName::Click.label(), "Map Click");
}

#[test]
fn gated_tone_holds_then_cuts() {
    let spec = ToneSpec::gated(Waveform::Square, 5555.0, 0.02, 0.125);
    let points = spec.gain_schedule(1.0);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].gain, 0.125);
    assert_eq!(points[0].at_sec, 1.0);
    assert_eq!(points[0].step, GainStep::Set);
    assert_eq!(points[1].gain, 0.0);
    assert!((points[1].at_sec - 1.02).abs() < 1e-12);
    assert!((spec.stop_at(1.0) - 1.02).abs() < 1e-12);
}

#[test]
fn enveloped_tone_ramps_in_and_out() {
    let spec = ToneSpec::gated(Waveform::Sine, 800.0, 0.1, 0.4).with_envelope(Envelope {
        attack_sec: 0.01,
        release_sec: 0.05,
    });
    let points = spec.gain_schedule(0.0);
    let steps: Vec<_> = points.iter().map(|p| (p.step, p.gain)).collect();
    assert_eq!(
        steps,
        vec![
            (GainStep::Set, 0.0),
            (GainStep::Ramp, 0.4),
            (GainStep::Set, 0.4),
            (GainStep::Ramp, 0.0),
        ]
    );
    assert!((points[1].at_sec - 0.01).abs() < 1e-12);
    assert!((points[2].at_sec - 0.05).abs() < 1e-12);
    assert!((points[3].at_sec - 0.1).abs() < 1e-12);
}

#[test]
fn envelope_is_clipped_to_duration() {
    let spec = ToneSpec::gated(Waveform::Triangle, 300.0, 0.05, 0.2).with_envelope(Envelope {
        attack_sec: 0.04,
        release_sec: 0.04,
    });
    let points = spec.gain_schedule(0.0);
    // times never go backwards and never pass the end
    for pair in points.windows(2) {
        assert!(pair[0].at_sec <= pair[1].at_sec);
    }
    assert!((points.last().unwrap().at_sec - 0.05).abs() < 1e-12);
}

#[test]
fn filter_is_optional() {
    let plain = ToneSpec::gated(Waveform::Sine, 800.0, 0.1, 0.4);
    assert!(plain.filter.is_none());
    let filtered = plain.with_filter(FilterSpec {
        kind: FilterKind::Highpass,
        frequency_hz: 1000.0,
        q: 10.0,
    });
    assert_eq!(filtered.filter.map(|f| f.kind), Some(FilterKind::Highpass));
    assert_eq!(Waveform::Sawtooth.as_str(), "sawtooth");
}

#[test]
fn insert_rejects_bad_envelope_and_filter() {
    let base = ToneSpec::gated(Waveform::Sine, 440.0, 0.1, 0.5);
    let mut catalog = SoundCatalog::empty();

    let nan_attack = base.with_envelope(Envelope {
        attack_sec: f64::NAN,
        release_sec: 0.0,
    });
    assert!(matches!(
        catalog.insert("nan-attack", nan_attack),
        Err(ToneError::Envelope { .. })
    ));

    let negative_release = base.with_envelope(Envelope {
        attack_sec: 0.01,
        release_sec: -0.02,
    });
    assert!(matches!(
        catalog.insert("negative-release", negative_release),
        Err(ToneError::Envelope { .. })
    ));

    let endless_release = base.with_envelope(Envelope {
        attack_sec: 0.0,
        release_sec: f64::INFINITY,
    });
    assert!(endless_release.validate().is_err());

    for (frequency_hz, q) in [(0.0, 1.0), (f32::NAN, 1.0), (1000.0, 0.0), (1000.0, f32::INFINITY)] {
        let filtered = base.with_filter(FilterSpec {
            kind: FilterKind::Lowpass,
            frequency_hz,
            q,
        });
        assert!(matches!(
            catalog.insert("filtered", filtered),
            Err(ToneError::Filter { .. })
        ));
    }
    assert!(catalog.is_empty());
}

#[test]
fn gain_schedule_tolerates_unvalidated_times() {
    let specs = [
        ToneSpec::gated(Waveform::Sine, 440.0, 0.1, 0.5).with_envelope(Envelope {
            attack_sec: f64::NAN,
            release_sec: 0.0,
        }),
        ToneSpec::gated(Waveform::Sine, 440.0, 0.1, 0.5).with_envelope(Envelope {
            attack_sec: 0.02,
            release_sec: f64::NAN,
        }),
        ToneSpec::gated(Waveform::Sine, 440.0, 0.1, 0.5).with_envelope(Envelope {
            attack_sec: -1.0,
            release_sec: f64::INFINITY,
        }),
        ToneSpec::gated(Waveform::Sine, 440.0, f64::NAN, 0.5),
    ];
    for spec in specs {
        let points = spec.gain_schedule(2.0);
        assert!(points.iter().all(|p| p.at_sec.is_finite()));
        for pair in points.windows(2) {
            assert!(pair[0].at_sec <= pair[1].at_sec);
        }
        let last = points.last().unwrap();
        assert_eq!(last.gain, 0.0);
        assert!(spec.stop_at(2.0).is_finite());
    }

    // NaN attack reads as a hard gate
    let points = specs[0].gain_schedule(0.0);
    assert_eq!(points[0].step, GainStep::Set);
    assert_eq!(points[0].gain, 0.5);
}
