// Host-side tests for drawing modes and snapshot persistence, using an
// in-memory stand-in for the drawing toolkit.

use map_core::*;
use serde_json::json;

#[derive(Default)]
struct FakeToolkit {
    started: usize,
    modes: Vec<DrawMode>,
    features: Vec<Feature>,
}

impl DrawingToolkit for FakeToolkit {
    fn start(&mut self) -> Result<(), DrawingError> {
        self.started += 1;
        Ok(())
    }

    fn set_mode(&mut self, mode: DrawMode) -> Result<(), DrawingError> {
        self.modes.push(mode);
        Ok(())
    }

    fn snapshot(&self) -> Vec<Feature> {
        self.features.clone()
    }

    fn add_features(&mut self, features: &[Feature]) -> Result<(), DrawingError> {
        self.features.extend_from_slice(features);
        Ok(())
    }

    fn remove_features(&mut self, ids: &[String]) {
        self.features
            .retain(|f| f.id.as_ref().map_or(true, |id| !ids.contains(id)));
    }

    fn clear(&mut self) {
        self.features.clear();
    }
}

fn feature(id: &str, props: serde_json::Value) -> Feature {
    serde_json::from_value(json!({
        "id": id,
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [21.5, 36.8] },
        "properties": props,
    }))
    .unwrap()
}

fn polygon(id: &str) -> Feature {
    serde_json::from_value(json!({
        "id": id,
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
        },
        "properties": { "mode": "polygon" },
    }))
    .unwrap()
}

fn controller_with(features: Vec<Feature>) -> DrawingController<FakeToolkit> {
    let toolkit = FakeToolkit {
        features,
        ..Default::default()
    };
    DrawingController::new(toolkit, "terra-draw-data")
}

#[test]
fn draw_mode_names_round_trip() {
    for mode in DrawMode::ALL {
        assert_eq!(mode.as_str().parse::<DrawMode>().unwrap(), mode);
    }
    assert_eq!(DrawMode::default(), DrawMode::Polygon);
    assert!(matches!(
        "lasso".parse::<DrawMode>(),
        Err(DrawingError::UnknownMode(m)) if m == "lasso"
    ));
}

#[test]
fn set_mode_starts_toolkit_once() {
    let mut c = controller_with(Vec::new());
    assert!(!c.is_active());
    assert_eq!(c.status_text(), "Ready");
    assert_eq!(c.status_icon(), "pan_tool");

    c.set_mode(DrawMode::Circle).unwrap();
    c.set_mode(DrawMode::Select).unwrap();
    assert!(c.is_active());
    assert_eq!(c.toolkit().started, 1);
    assert_eq!(c.toolkit().modes, vec![DrawMode::Circle, DrawMode::Select]);
    assert_eq!(c.status_text(), "select mode");
    assert_eq!(c.status_icon(), "edit");

    c.reset_to_polygon().unwrap();
    assert_eq!(c.mode(), DrawMode::Polygon);
}

#[test]
fn save_then_load_drops_editing_helpers() {
    let drawn = vec![
        polygon("a"),
        feature("b", json!({ "mode": "point" })),
        feature("h1", json!({ "selectionPoint": true })),
        feature("h2", json!({ "midPoint": true })),
    ];
    let mut store = MemoryStore::default();
    let saved = controller_with(drawn.clone()).save(&mut store).unwrap();
    assert_eq!(saved, 2);

    let mut fresh = controller_with(Vec::new());
    assert_eq!(fresh.load(&store).unwrap(), Some(2));
    assert_eq!(fresh.toolkit().features, vec![drawn[0].clone(), drawn[1].clone()]);
    assert_eq!(fresh.toolkit().features[0].mode(), Some(DrawMode::Polygon));
}

#[test]
fn load_without_saved_data_is_none() {
    let mut c = controller_with(Vec::new());
    assert_eq!(c.load(&MemoryStore::default()).unwrap(), None);
}

#[test]
fn malformed_saved_data_is_an_error() {
    let mut store = MemoryStore::default();
    store.set("terra-draw-data", "{not json").unwrap();
    let mut c = controller_with(Vec::new());
    assert!(matches!(c.load(&store), Err(DrawingError::Malformed(_))));
    assert!(c.toolkit().features.is_empty());
}

#[test]
fn delete_selected_only_in_select_mode() {
    let drawn = vec![
        feature("keep", json!({})),
        feature("gone", json!({ "selected": true })),
    ];
    let mut c = controller_with(drawn);
    c.start().unwrap();
    assert!(c.delete_selected().is_empty());
    assert_eq!(c.toolkit().features.len(), 2);

    c.set_mode(DrawMode::Select).unwrap();
    assert_eq!(c.delete_selected(), vec!["gone".to_string()]);
    assert_eq!(c.toolkit().features.len(), 1);
    assert_eq!(c.toolkit().features[0].id.as_deref(), Some("keep"));
}

#[test]
fn clear_empties_toolkit() {
    let mut c = controller_with(vec![polygon("a")]);
    c.clear();
    assert!(c.toolkit().features.is_empty());
}

#[test]
fn features_decode_without_optional_fields() {
    let decoded = decode_features(r#"[{"geometry":{"type":"Point","coordinates":[1,2]}}]"#).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].kind, "Feature");
    assert!(decoded[0].id.is_none());
    assert!(decoded[0].properties.is_empty());

    let encoded = encode_features(&decoded).unwrap();
    assert!(!encoded.contains("\"id\""));
    assert!(encoded.contains("\"type\":\"Feature\""));
}
