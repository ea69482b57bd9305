//! Drawing modes, drawn features and their persistence.
//!
//! Geometry editing belongs to the external drawing toolkit. This module only
//! knows which mode is active, how to ask the toolkit for a snapshot, and how
//! to store that snapshot as one JSON array under a fixed key.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Point,
    LineString,
    #[default]
    Polygon,
    Rectangle,
    Circle,
    Freehand,
    FreehandLineString,
    AngledRectangle,
    Sector,
    Sensor,
    Select,
}

impl DrawMode {
    pub const ALL: [DrawMode; 11] = [
        DrawMode::Point,
        DrawMode::LineString,
        DrawMode::Polygon,
        DrawMode::Rectangle,
        DrawMode::Circle,
        DrawMode::Freehand,
        DrawMode::FreehandLineString,
        DrawMode::AngledRectangle,
        DrawMode::Sector,
        DrawMode::Sensor,
        DrawMode::Select,
    ];

    /// Mode name understood by the drawing toolkit.
    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::Point => "point",
            DrawMode::LineString => "linestring",
            DrawMode::Polygon => "polygon",
            DrawMode::Rectangle => "rectangle",
            DrawMode::Circle => "circle",
            DrawMode::Freehand => "freehand",
            DrawMode::FreehandLineString => "freehand-linestring",
            DrawMode::AngledRectangle => "angled-rectangle",
            DrawMode::Sector => "sector",
            DrawMode::Sensor => "sensor",
            DrawMode::Select => "select",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = DrawingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DrawingError::UnknownMode(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("unknown drawing mode \"{0}\"")]
    UnknownMode(String),
    #[error("drawing toolkit rejected the request: {0}")]
    Toolkit(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("saved drawings are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

fn feature_kind() -> String {
    "Feature".to_string()
}

/// A GeoJSON feature as produced by the drawing toolkit. Geometry and
/// properties are kept opaque apart from the flags this crate reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "feature_kind")]
    pub kind: String,
    pub geometry: Value,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    fn flag(&self, key: &str) -> bool {
        self.properties
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Vertex handles and midpoints the toolkit adds while editing.
    pub fn is_helper(&self) -> bool {
        self.flag("selectionPoint") || self.flag("midPoint")
    }

    pub fn is_selected(&self) -> bool {
        self.flag("selected")
    }

    pub fn mode(&self) -> Option<DrawMode> {
        self.properties
            .get("mode")
            .and_then(Value::as_str)
            .and_then(|m| m.parse().ok())
    }
}

/// Drop editing helpers; what remains is what the user drew.
pub fn persistent_features(snapshot: Vec<Feature>) -> Vec<Feature> {
    snapshot.into_iter().filter(|f| !f.is_helper()).collect()
}

pub fn encode_features(features: &[Feature]) -> Result<String, DrawingError> {
    Ok(serde_json::to_string(features)?)
}

pub fn decode_features(json: &str) -> Result<Vec<Feature>, DrawingError> {
    Ok(serde_json::from_str(json)?)
}

/// String key/value persistence, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DrawingError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DrawingError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FnvHashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DrawingError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DrawingError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The external drawing toolkit's method surface.
pub trait DrawingToolkit {
    fn start(&mut self) -> Result<(), DrawingError>;
    fn set_mode(&mut self, mode: DrawMode) -> Result<(), DrawingError>;
    fn snapshot(&self) -> Vec<Feature>;
    fn add_features(&mut self, features: &[Feature]) -> Result<(), DrawingError>;
    fn remove_features(&mut self, ids: &[String]);
    fn clear(&mut self);
}

pub struct DrawingController<T> {
    toolkit: T,
    mode: DrawMode,
    active: bool,
    storage_key: String,
}

impl<T: DrawingToolkit> DrawingController<T> {
    pub fn new(toolkit: T, storage_key: impl Into<String>) -> Self {
        Self {
            toolkit,
            mode: DrawMode::default(),
            active: false,
            storage_key: storage_key.into(),
        }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    #[inline]
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start the toolkit and apply the current mode.
    pub fn start(&mut self) -> Result<(), DrawingError> {
        if !self.active {
            self.toolkit.start()?;
            self.active = true;
        }
        self.toolkit.set_mode(self.mode)
    }

    /// Switch modes, starting the toolkit first if needed.
    pub fn set_mode(&mut self, mode: DrawMode) -> Result<(), DrawingError> {
        self.mode = mode;
        if !self.active {
            return self.start();
        }
        self.toolkit.set_mode(mode)?;
        if mode == DrawMode::Select {
            log::info!("[draw] mode set to {}", mode);
        }
        Ok(())
    }

    /// Shortcut back to polygon drawing.
    pub fn reset_to_polygon(&mut self) -> Result<(), DrawingError> {
        self.set_mode(DrawMode::Polygon)
    }

    pub fn status_text(&self) -> String {
        if self.active {
            format!("{} mode", self.mode)
        } else {
            "Ready".to_string()
        }
    }

    /// Material icon shown next to the status text.
    pub fn status_icon(&self) -> &'static str {
        if self.active {
            "edit"
        } else {
            "pan_tool"
        }
    }

    /// Remove selected features. Only meaningful in select mode; returns the
    /// removed ids.
    pub fn delete_selected(&mut self) -> Vec<String> {
        if !self.active || self.mode != DrawMode::Select {
            return Vec::new();
        }
        let ids: Vec<String> = self
            .toolkit
            .snapshot()
            .into_iter()
            .filter(Feature::is_selected)
            .filter_map(|f| f.id)
            .collect();
        if !ids.is_empty() {
            self.toolkit.remove_features(&ids);
            log::info!("[draw] deleted features {:?}", ids);
        }
        ids
    }

    /// Persist the drawn features, without editing helpers. Returns how many
    /// were saved.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<usize, DrawingError> {
        let features = persistent_features(self.toolkit.snapshot());
        store.set(&self.storage_key, &encode_features(&features)?)?;
        Ok(features.len())
    }

    /// Add previously saved features to the toolkit. `Ok(None)` when nothing
    /// was saved.
    pub fn load(&mut self, store: &impl KeyValueStore) -> Result<Option<usize>, DrawingError> {
        let Some(json) = store.get(&self.storage_key)? else {
            return Ok(None);
        };
        let features = decode_features(&json)?;
        self.toolkit.add_features(&features)?;
        Ok(Some(features.len()))
    }

    pub fn clear(&mut self) {
        self.toolkit.clear();
    }
}
