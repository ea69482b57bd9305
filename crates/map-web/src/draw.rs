//! TerraDraw bindings and browser storage for saved drawings.

use crate::map::Map;
use js_sys::{Array, JSON};
use map_core::{
    decode_features, encode_features, DrawMode, DrawingError, Feature, KeyValueStore, MemoryStore,
};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    pub type TerraDraw;

    // Page-supplied factory; it owns the adapter and mode list.
    #[wasm_bindgen(js_name = createTerraDraw, catch)]
    fn create_terra_draw(map: &Map) -> Result<TerraDraw, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn start(this: &TerraDraw) -> Result<(), JsValue>;
    #[wasm_bindgen(method, js_name = setMode, catch)]
    fn set_mode(this: &TerraDraw, mode: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(method, js_name = getSnapshot)]
    fn get_snapshot(this: &TerraDraw) -> JsValue;
    #[wasm_bindgen(method, js_name = addFeatures, catch)]
    fn add_features(this: &TerraDraw, features: &JsValue) -> Result<JsValue, JsValue>;
    #[wasm_bindgen(method, js_name = removeFeatures)]
    fn remove_features(this: &TerraDraw, ids: &Array);
    #[wasm_bindgen(method)]
    fn clear(this: &TerraDraw);
}

fn toolkit_err(e: JsValue) -> DrawingError {
    DrawingError::Toolkit(format!("{:?}", e))
}

pub struct TerraDrawToolkit {
    draw: TerraDraw,
}

impl TerraDrawToolkit {
    pub fn attach(map: &Map) -> Result<Self, DrawingError> {
        let draw = create_terra_draw(map).map_err(toolkit_err)?;
        Ok(Self { draw })
    }
}

impl map_core::DrawingToolkit for TerraDrawToolkit {
    fn start(&mut self) -> Result<(), DrawingError> {
        self.draw.start().map_err(toolkit_err)
    }

    fn set_mode(&mut self, mode: DrawMode) -> Result<(), DrawingError> {
        self.draw.set_mode(mode.as_str()).map_err(toolkit_err)
    }

    fn snapshot(&self) -> Vec<Feature> {
        let json = JSON::stringify(&self.draw.get_snapshot())
            .ok()
            .and_then(|s| s.as_string())
            .unwrap_or_else(|| "[]".to_string());
        match decode_features(&json) {
            Ok(features) => features,
            Err(e) => {
                log::warn!("[draw] unreadable snapshot: {}", e);
                Vec::new()
            }
        }
    }

    fn add_features(&mut self, features: &[Feature]) -> Result<(), DrawingError> {
        let value = JSON::parse(&encode_features(features)?).map_err(toolkit_err)?;
        self.draw.add_features(&value).map_err(toolkit_err)?;
        Ok(())
    }

    fn remove_features(&mut self, ids: &[String]) {
        let ids: Array = ids.iter().map(|id| JsValue::from_str(id)).collect();
        self.draw.remove_features(&ids);
    }

    fn clear(&mut self) {
        self.draw.clear();
    }
}

/// `localStorage`, or an in-memory map for the session when the browser
/// refuses storage (private windows, sandboxed frames).
pub enum BrowserStore {
    Local(web::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match web::window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                log::warn!("[draw] localStorage unavailable; drawings last for this session only");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, DrawingError> {
        match self {
            BrowserStore::Local(s) => s
                .get_item(key)
                .map_err(|e| DrawingError::Storage(format!("{:?}", e))),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DrawingError> {
        match self {
            BrowserStore::Local(s) => s
                .set_item(key, value)
                .map_err(|e| DrawingError::Storage(format!("{:?}", e))),
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }
}
