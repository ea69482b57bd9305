//! Basemap styles offered by the style selector.

use serde_json::{json, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BasemapStyle {
    #[default]
    EsriSatellite,
    Osm,
    StreetsDark,
    Streets,
    Satellite,
    Hybrid,
    OfmLiberty,
    OfmBright,
    OfmPositron,
    OfmFiord,
}

/// How a style is handed to the map SDK.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleSource {
    /// A complete style document.
    Inline(Value),
    /// Dotted path under the SDK's `MapStyle` namespace, e.g. `STREETS.DARK`.
    Preset(&'static str),
    Url(&'static str),
}

// Styles cycled with the `S` key; both are free raster layers without API limits.
pub const KEY_CYCLE: [BasemapStyle; 2] = [BasemapStyle::EsriSatellite, BasemapStyle::Osm];

impl BasemapStyle {
    pub const ALL: [BasemapStyle; 10] = [
        BasemapStyle::EsriSatellite,
        BasemapStyle::Osm,
        BasemapStyle::StreetsDark,
        BasemapStyle::Streets,
        BasemapStyle::Satellite,
        BasemapStyle::Hybrid,
        BasemapStyle::OfmLiberty,
        BasemapStyle::OfmBright,
        BasemapStyle::OfmPositron,
        BasemapStyle::OfmFiord,
    ];

    /// Option value used by the style selector.
    pub fn name(self) -> &'static str {
        match self {
            BasemapStyle::EsriSatellite => "ESRI_SATELLITE",
            BasemapStyle::Osm => "OSM",
            BasemapStyle::StreetsDark => "STREETS.DARK",
            BasemapStyle::Streets => "STREETS",
            BasemapStyle::Satellite => "SATELLITE",
            BasemapStyle::Hybrid => "HYBRID",
            BasemapStyle::OfmLiberty => "OFM_LIBERTY",
            BasemapStyle::OfmBright => "OFM_BRIGHT",
            BasemapStyle::OfmPositron => "OFM_POSITRON",
            BasemapStyle::OfmFiord => "OFM_FIORD",
        }
    }

    /// Unknown names fall back to Esri satellite.
    pub fn from_name(name: &str) -> Self {
        BasemapStyle::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .unwrap_or_default()
    }

    pub fn source(self) -> StyleSource {
        match self {
            BasemapStyle::EsriSatellite => StyleSource::Inline(raster_style(
                "esri-satellite",
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                "© Esri",
            )),
            BasemapStyle::Osm => StyleSource::Inline(raster_style(
                "osm",
                "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
                "© OpenStreetMap contributors",
            )),
            BasemapStyle::StreetsDark => StyleSource::Preset("STREETS.DARK"),
            BasemapStyle::Streets => StyleSource::Preset("STREETS"),
            BasemapStyle::Satellite => StyleSource::Preset("SATELLITE"),
            BasemapStyle::Hybrid => StyleSource::Preset("HYBRID"),
            BasemapStyle::OfmLiberty => {
                StyleSource::Url("https://tiles.openfreemap.org/styles/liberty")
            }
            BasemapStyle::OfmBright => StyleSource::Url("https://tiles.openfreemap.org/styles/bright"),
            BasemapStyle::OfmPositron => {
                StyleSource::Url("https://tiles.openfreemap.org/styles/positron")
            }
            BasemapStyle::OfmFiord => StyleSource::Url("https://tiles.openfreemap.org/styles/fiord"),
        }
    }
}

/// Position in [`KEY_CYCLE`] after `index`.
#[inline]
pub fn next_cycle_index(index: usize) -> usize {
    (index + 1) % KEY_CYCLE.len()
}

/// Minimal version-8 style with a single raster layer.
pub fn raster_style(id: &str, tiles: &str, attribution: &str) -> Value {
    json!({
        "version": 8,
        "sources": {
            id: {
                "type": "raster",
                "tiles": [tiles],
                "tileSize": 256,
                "attribution": attribution,
            }
        },
        "layers": [{
            "id": id,
            "type": "raster",
            "source": id,
        }]
    })
}
