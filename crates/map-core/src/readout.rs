//! Display values for the on-map indicators.

use crate::constants::{
    EARTH_METERS_PER_PIXEL_Z0, FEET_PER_METER, FEET_PER_MILE, MAX_ALTITUDE_M, SCALE_BAR_PX,
};
use crate::gesture::{LngLat, MapView};
use crate::indicator::IndicatorId;

#[inline]
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

/// Slider labels for zoom, pitch and bearing. Longitude and latitude use
/// [`format_coordinate`].
#[inline]
pub fn format_slider(value: f64) -> String {
    format!("{:.3}", value)
}

#[inline]
pub fn format_zoom(zoom: f64) -> String {
    format!("{:.2}", zoom)
}

/// Ground resolution at the given latitude and zoom (Web Mercator, 256px tiles).
#[inline]
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    EARTH_METERS_PER_PIXEL_Z0 * lat.to_radians().cos() / 2f64.powf(zoom)
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleReadout {
    pub meters_per_pixel: f64,
    pub imperial: String,
    pub metric: String,
}

impl ScaleReadout {
    pub fn new(lat: f64, zoom: f64) -> Self {
        let mpp = meters_per_pixel(lat, zoom);
        let bar_m = SCALE_BAR_PX * mpp;

        let feet = (bar_m * FEET_PER_METER).round();
        let imperial = if feet >= FEET_PER_MILE {
            format!("{} mi", (feet / FEET_PER_MILE).round())
        } else {
            format!("{} ft", feet)
        };
        let metric = if bar_m >= 1000.0 {
            format!("{:.1} km", bar_m / 1000.0)
        } else {
            format!("{} m", bar_m.round())
        };
        Self {
            meters_per_pixel: mpp,
            imperial,
            metric,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AltitudeReadout {
    pub meters: f64,
    pub label: String,
    pub fill_percent: f64,
}

impl AltitudeReadout {
    /// A missing or non-finite elevation reads as sea level.
    pub fn new(meters: Option<f64>) -> Self {
        let meters = meters
            .filter(|m| m.is_finite())
            .unwrap_or(0.0)
            .clamp(0.0, MAX_ALTITUDE_M);
        Self {
            meters,
            label: format!("{:.0}m", meters),
            fill_percent: meters / MAX_ALTITUDE_M * 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PitchReadout {
    pub degrees: f64,
    pub label: String,
    pub fill_percent: f64,
}

impl PitchReadout {
    pub fn new(pitch: f64, max_pitch: f64) -> Self {
        let fill = if max_pitch > 0.0 {
            (pitch / max_pitch * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            degrees: pitch,
            label: format!("{:.1}°", pitch),
            fill_percent: fill,
        }
    }
}

/// The compass counter-rotates against the map and tilts with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompassReadout {
    pub rotate_z_deg: f64,
    pub tilt_x_deg: f64,
}

impl CompassReadout {
    pub fn new(bearing: f64, pitch: f64) -> Self {
        Self {
            rotate_z_deg: -bearing,
            tilt_x_deg: pitch,
        }
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate(-50%, -50%) rotateX({}deg) rotateZ({}deg)",
            self.tilt_x_deg, self.rotate_z_deg
        )
    }
}

/// One indicator update, already formatted.
#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    Coordinates(LngLat),
    Zoom(f64),
    Pitch(PitchReadout),
    Altitude(AltitudeReadout),
    Scale(ScaleReadout),
    Compass(CompassReadout),
}

impl Reading {
    pub fn indicator(&self) -> IndicatorId {
        match self {
            Reading::Coordinates(_) => IndicatorId::Coordinates,
            Reading::Zoom(_) => IndicatorId::Zoom,
            Reading::Pitch(_) => IndicatorId::Pitch,
            Reading::Altitude(_) => IndicatorId::Altitude,
            Reading::Scale(_) => IndicatorId::Scale,
            Reading::Compass(_) => IndicatorId::Compass,
        }
    }

    /// Everything but altitude can be read straight off the camera.
    pub fn from_view(id: IndicatorId, view: &MapView, max_pitch: f64) -> Option<Reading> {
        match id {
            IndicatorId::Coordinates => Some(Reading::Coordinates(view.center)),
            IndicatorId::Zoom => Some(Reading::Zoom(view.zoom)),
            IndicatorId::Pitch => Some(Reading::Pitch(PitchReadout::new(view.pitch, max_pitch))),
            IndicatorId::Scale => Some(Reading::Scale(ScaleReadout::new(
                view.center.lat,
                view.zoom,
            ))),
            IndicatorId::Compass => Some(Reading::Compass(CompassReadout::new(
                view.bearing,
                view.pitch,
            ))),
            IndicatorId::Altitude => None,
        }
    }
}
