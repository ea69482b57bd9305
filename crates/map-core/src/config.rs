//! Runtime configuration. Defaults come from `constants.rs`.

use crate::constants::*;
use crate::gesture::{GestureThresholds, LngLat};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackConfig {
    pub fade_delay: Duration,
    pub dim_opacity: f32,
    pub elevation_debounce: Duration,
    pub gestures: GestureThresholds,
    pub max_pitch_deg: f64,
    pub sound_enabled: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            fade_delay: Duration::from_millis(FADE_DELAY_MS),
            dim_opacity: DIM_OPACITY,
            elevation_debounce: Duration::from_millis(ELEVATION_DEBOUNCE_MS),
            gestures: GestureThresholds::default(),
            max_pitch_deg: MAX_PITCH_DEG,
            sound_enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub container_id: String,
    pub initial_center: LngLat,
    pub initial_zoom: f64,
    pub initial_pitch: f64,
    pub max_pitch_deg: f64,
    pub terrain_exaggeration: f64,
    pub reset_center: LngLat,
    pub reset_zoom: f64,
    pub storage_key: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            initial_center: LngLat {
                lng: INITIAL_CENTER[0],
                lat: INITIAL_CENTER[1],
            },
            initial_zoom: INITIAL_ZOOM,
            initial_pitch: 0.0,
            max_pitch_deg: MAX_PITCH_DEG,
            terrain_exaggeration: TERRAIN_EXAGGERATION,
            reset_center: LngLat {
                lng: RESET_CENTER[0],
                lat: RESET_CENTER[1],
            },
            reset_zoom: RESET_ZOOM,
            storage_key: DRAWINGS_STORAGE_KEY.to_string(),
        }
    }
}
