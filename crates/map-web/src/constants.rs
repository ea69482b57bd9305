// DOM ids and front-end timings. Elements are looked up by these ids; a
// missing element is skipped rather than treated as an error.

// Indicator pills
pub const COORDS_PILL: &str = "coords-pill";
pub const PILL_LAT: &str = "pill-lat";
pub const PILL_LNG: &str = "pill-lng";
pub const ZOOM_PILL: &str = "zoom-pill";
pub const PILL_ZOOM: &str = "pill-zoom";
pub const SCALE_PILL: &str = "scale-pill";
pub const IMPERIAL_LABEL: &str = "imperial-label";
pub const METRIC_LABEL: &str = "metric-label";
pub const ALTITUDE_PILL: &str = "altitude-pill";
pub const ALTITUDE_VALUE: &str = "altitude-value";
pub const ALTITUDE_FILL: &str = "altitude-line-fill";
pub const ALTITUDE_CONTENT: &str = ".altitude-content";
pub const PITCH_PILL: &str = "pitch-details-pill";
pub const PITCH_VALUE: &str = "pitch-details-value";
pub const PITCH_FILL: &str = "pitch-details-line-fill";
pub const PITCH_CONTENT: &str = ".pitch-details-content";
pub const COMPASS_RING: &str = "compass-ring";

// Sliders: (input id, value label id)
pub const SLIDER_LNG: (&str, &str) = ("lng", "lng-val");
pub const SLIDER_LAT: (&str, &str) = ("lat", "lat-val");
pub const SLIDER_ZOOM: (&str, &str) = ("zoom", "zoom-val");
pub const SLIDER_PITCH: (&str, &str) = ("pitch", "pitch-val");
pub const SLIDER_BEARING: (&str, &str) = ("bearing", "bearing-val");
pub const STYLE_SELECT: &str = "style";
pub const RESET_BUTTON: &str = "reset";

// Drawing toolbar
pub const TOOLBAR_MODE_BUTTONS: &str = ".toolbar-btn[data-mode]";
pub const TOOLBAR_BUTTONS: &str = ".toolbar-btn";
pub const SAVE_BUTTON: &str = "save-btn";
pub const LOAD_BUTTON: &str = "load-btn";
pub const CLEAR_BUTTON: &str = "clear-btn";
pub const DRAW_STATUS: &str = "terradraw-status";
pub const DRAW_STATUS_TEXT: &str = ".status-text";
pub const DRAW_STATUS_ICON: &str = ".material-icons";

// SFX panel
pub const SFX_TOGGLE: &str = "sfx-toggle";
pub const SFX_EVENTS: &str = "sfx-events";

// Content offset follows the fill: 100% fill = 100px from the bottom
pub const FILL_TRAVEL_PX: f64 = 100.0;

pub const NOTIFICATION_MS: i32 = 3000;
