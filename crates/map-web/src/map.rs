//! Bindings to the MapTiler SDK map and its elevation service.

use js_sys::{Array, Function, Promise, Reflect, JSON};
use map_core::{BasemapStyle, LngLat, MapView, StyleSource, ViewerConfig};
use serde_json::json;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[wasm_bindgen(js_namespace = maptilersdk)]
extern "C" {
    #[derive(Clone)]
    pub type Map;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &Map) -> JsLngLat;
    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;
    #[wasm_bindgen(method, js_name = getPitch)]
    pub fn get_pitch(this: &Map) -> f64;
    #[wasm_bindgen(method, js_name = getBearing)]
    pub fn get_bearing(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = setCenter)]
    fn set_center_array(this: &Map, center: &Array);
    #[wasm_bindgen(method, js_name = setZoom)]
    pub fn set_zoom(this: &Map, zoom: f64);
    #[wasm_bindgen(method, js_name = setPitch)]
    pub fn set_pitch(this: &Map, pitch: f64);
    #[wasm_bindgen(method, js_name = setBearing)]
    pub fn set_bearing(this: &Map, bearing: f64);
    #[wasm_bindgen(method, js_name = setStyle)]
    fn set_style_value(this: &Map, style: &JsValue);

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, listener: &Function);
    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &Map) -> web::HtmlCanvasElement;
    #[wasm_bindgen(method, js_name = isStyleLoaded)]
    pub fn is_style_loaded(this: &Map) -> bool;

    type JsLngLat;
    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLngLat) -> f64;
    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLngLat) -> f64;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["maptilersdk", "elevation"], js_name = at, catch)]
    fn elevation_at(position: &Array) -> Result<Promise, JsValue>;
}

impl Map {
    pub fn center(&self) -> LngLat {
        let c = self.get_center();
        LngLat {
            lng: c.lng(),
            lat: c.lat(),
        }
    }

    pub fn set_center(&self, center: LngLat) {
        self.set_center_array(&Array::of2(&center.lng.into(), &center.lat.into()));
    }

    pub fn set_style(&self, style: BasemapStyle) {
        self.set_style_value(&style_value(style));
        log::info!("[map] style {}", style.name());
    }

    /// Current camera, read after a change notification.
    pub fn view(&self) -> MapView {
        MapView {
            center: self.center(),
            zoom: self.get_zoom(),
            pitch: self.get_pitch(),
            bearing: self.get_bearing(),
        }
    }
}

fn sdk() -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &"maptilersdk".into())
        .ok()
        .filter(|v| !v.is_undefined())
}

fn json_value(doc: &serde_json::Value) -> Option<JsValue> {
    JSON::parse(&doc.to_string()).ok()
}

/// Resolve a style to what `setStyle` expects. Anything that cannot be
/// resolved falls back to the default inline raster style.
pub fn style_value(style: BasemapStyle) -> JsValue {
    let resolved = match style.source() {
        StyleSource::Inline(doc) => json_value(&doc),
        StyleSource::Url(url) => Some(JsValue::from_str(url)),
        StyleSource::Preset(path) => sdk().and_then(|sdk| {
            let mut v = Reflect::get(&sdk, &"MapStyle".into()).ok()?;
            for part in path.split('.') {
                v = Reflect::get(&v, &part.into()).ok()?;
            }
            (!v.is_undefined()).then_some(v)
        }),
    };
    resolved.unwrap_or_else(|| {
        log::warn!("[map] style {} unavailable, using default", style.name());
        match BasemapStyle::default().source() {
            StyleSource::Inline(doc) => json_value(&doc).unwrap_or(JsValue::NULL),
            _ => JsValue::NULL,
        }
    })
}

/// The API key is provided by the page as a global.
pub fn api_key_from_page() -> Option<String> {
    Reflect::get(&js_sys::global(), &"MAPTILER_API_KEY".into())
        .ok()?
        .as_string()
}

pub fn configure_sdk(api_key: Option<&str>) -> anyhow::Result<()> {
    let sdk = sdk().ok_or_else(|| anyhow::anyhow!("maptilersdk is not loaded"))?;
    let config = Reflect::get(&sdk, &"config".into()).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    match api_key {
        Some(key) => {
            _ = Reflect::set(&config, &"apiKey".into(), &key.into());
        }
        None => log::warn!("[map] no MAPTILER_API_KEY; SDK styles and elevation will fail"),
    }
    _ = Reflect::set(&config, &"telemetry".into(), &false.into());
    Ok(())
}

pub fn create_map(config: &ViewerConfig, style: BasemapStyle) -> anyhow::Result<Map> {
    let options = json!({
        "container": config.container_id,
        "center": [config.initial_center.lng, config.initial_center.lat],
        "zoom": config.initial_zoom,
        "pitch": config.initial_pitch,
        "maxPitch": config.max_pitch_deg,
        "projection": "globe",
        "projectionControl": true,
        "terrainControl": true,
        "terrain": true,
        "terrainExaggeration": config.terrain_exaggeration,
        "attributionControl": false,
    });
    let options =
        json_value(&options).ok_or_else(|| anyhow::anyhow!("map options did not serialize"))?;
    _ = Reflect::set(&options, &"style".into(), &style_value(style));
    Map::new(&options).map_err(|e| anyhow::anyhow!("map construction failed: {:?}", e))
}

/// Tile decoding hiccups, rate limits and duplicate sources are routine and
/// only clutter the console.
pub fn is_benign_map_error(message: &str) -> bool {
    const BENIGN: [&str; 7] = [
        "Expected value to be of type number",
        "but found null instead",
        "429",
        "Failed to fetch",
        "CORS",
        "Source \"maptiler-terrain\" already exists",
        "Attempting to run(), but is already running",
    ];
    BENIGN.iter().any(|b| message.contains(b))
}

pub fn wire_error_filter(map: &Map) {
    let closure = Closure::wrap(Box::new(move |ev: JsValue| {
        let message = Reflect::get(&ev, &"error".into())
            .ok()
            .and_then(|err| Reflect::get(&err, &"message".into()).ok())
            .and_then(|m| m.as_string())
            .unwrap_or_default();
        if !is_benign_map_error(&message) {
            log::warn!("[map] error: {}", message);
        }
    }) as Box<dyn FnMut(JsValue)>);
    map.on("error", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Ground elevation in metres at `at`. Any failure reads as `None`.
pub async fn fetch_elevation(at: LngLat) -> Option<f64> {
    let position = Array::of2(&at.lng.into(), &at.lat.into());
    let result = match elevation_at(&position) {
        Ok(promise) => JsFuture::from(promise).await,
        Err(e) => Err(e),
    };
    match result {
        // resolves to [lng, lat, elevation]
        Ok(v) => v
            .dyn_into::<Array>()
            .ok()
            .and_then(|a| a.get(2).as_f64()),
        Err(e) => {
            log::warn!("[elevation] lookup failed: {:?}", e);
            None
        }
    }
}
