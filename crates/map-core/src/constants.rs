// Tuning constants shared by the web front-end and host-side tests.

// Indicator fading
pub const FADE_DELAY_MS: u64 = 1000; // quiet period before an indicator dims
pub const DIM_OPACITY: f32 = 0.20; // resting opacity of a faded indicator
pub const SHOWN_OPACITY: f32 = 1.0;

// Altitude lookups hit a remote service; wait for the map to settle first
pub const ELEVATION_DEBOUNCE_MS: u64 = 100;

// Gesture detents
pub const ZOOM_SNAP_STEP: f64 = 0.1; // one mechanical "click" per 0.1 zoom
pub const PITCH_TICK_DEG: f64 = 0.5;
pub const BEARING_TICK_DEG: f64 = 1.0;

// Mouse button that drives pitch/bearing drags (secondary / right)
pub const DRAG_BUTTON: i16 = 2;

// Readouts
pub const MAX_PITCH_DEG: f64 = 75.0;
pub const MAX_ALTITUDE_M: f64 = 9400.0;
pub const SCALE_BAR_PX: f64 = 60.0; // matches the CSS width of the scale lines
pub const EARTH_METERS_PER_PIXEL_Z0: f64 = 156_543.033_92;
pub const FEET_PER_METER: f64 = 3.280_84;
pub const FEET_PER_MILE: f64 = 5280.0;

// Initial camera
pub const INITIAL_CENTER: [f64; 2] = [21.785771, 36.846991]; // [lng, lat]
pub const INITIAL_ZOOM: f64 = 2.10;
pub const TERRAIN_EXAGGERATION: f64 = 1.5;

// Reset camera
pub const RESET_CENTER: [f64; 2] = [0.0, 20.0];
pub const RESET_ZOOM: f64 = 3.0;

// Drawings persist under one fixed key
pub const DRAWINGS_STORAGE_KEY: &str = "terra-draw-data";
