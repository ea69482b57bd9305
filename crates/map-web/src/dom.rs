use crate::constants::*;
use map_core::{
    format_coordinate, format_slider, format_zoom, IndicatorId, IndicatorSurface, MapView, Reading,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Attach a listener that lives for the rest of the page.
pub fn add_listener<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &web::Element, property: &str, value: &str) {
    if let Some(el) = el.dyn_ref::<web::HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_style_by_id(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        set_style(&el, property, value);
    }
}

pub fn query(root: &web::Element, selector: &str) -> Option<web::Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all(root: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

pub fn input_value(document: &web::Document, id: &str) -> Option<f64> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()?
        .value()
        .parse()
        .ok()
}

fn set_input_value(document: &web::Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

/// Label text for a slider: coordinates at six decimals, the rest at three.
pub fn slider_label(slider: (&str, &str), value: f64) -> String {
    if slider == SLIDER_LNG || slider == SLIDER_LAT {
        format_coordinate(value)
    } else {
        format_slider(value)
    }
}

/// Mirror the camera into the control sliders and their labels.
pub fn sync_controls(document: &web::Document, view: &MapView) {
    let sliders = [
        (SLIDER_LNG, view.center.lng),
        (SLIDER_LAT, view.center.lat),
        (SLIDER_ZOOM, view.zoom),
        (SLIDER_PITCH, view.pitch),
        (SLIDER_BEARING, view.bearing),
    ];
    for (slider, value) in sliders {
        let text = slider_label(slider, value);
        set_input_value(document, slider.0, &text);
        set_text(document, slider.1, &text);
    }
}

fn pill_id(id: IndicatorId) -> &'static str {
    match id {
        IndicatorId::Coordinates => COORDS_PILL,
        IndicatorId::Zoom => ZOOM_PILL,
        IndicatorId::Pitch => PITCH_PILL,
        IndicatorId::Altitude => ALTITUDE_PILL,
        IndicatorId::Scale => SCALE_PILL,
        IndicatorId::Compass => COMPASS_RING,
    }
}

/// Indicator pills and the compass ring in the page.
pub struct DomIndicators {
    document: web::Document,
}

impl DomIndicators {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    // Vertical gauge: fill height plus the label riding on top of it.
    fn set_gauge(&self, fill_id: &str, content_selector: &str, fill_percent: f64) {
        set_style_by_id(&self.document, fill_id, "height", &format!("{}%", fill_percent));
        if let Ok(Some(content)) = self.document.query_selector(content_selector) {
            let bottom = fill_percent / 100.0 * FILL_TRAVEL_PX;
            set_style(&content, "bottom", &format!("{}px", bottom));
        }
    }

    // Lit: whole ring. Dimmed: only north and its marker stay visible.
    fn set_compass_detail(&self, ring: &web::Element, lit: bool) {
        let off = if lit { "1" } else { "0" };
        if let Some(stroke) = query(ring, ".ring-stroke") {
            set_style(&stroke, "opacity", off);
        }
        if let Ok(markers) = ring.query_selector_all(".main-marker:not(.north)") {
            for m in (0..markers.length()).filter_map(|i| markers.get(i)) {
                if let Ok(m) = m.dyn_into::<web::Element>() {
                    set_style(&m, "opacity", off);
                }
            }
        }
        for always in [".main-marker.north", ".north-x-marker"] {
            if let Some(el) = query(ring, always) {
                set_style(&el, "opacity", "1");
            }
        }
    }
}

impl IndicatorSurface for DomIndicators {
    fn update(&mut self, reading: &Reading) {
        let doc = &self.document;
        match reading {
            Reading::Coordinates(c) => {
                set_text(doc, PILL_LAT, &format_coordinate(c.lat));
                set_text(doc, PILL_LNG, &format_coordinate(c.lng));
            }
            Reading::Zoom(z) => set_text(doc, PILL_ZOOM, &format_zoom(*z)),
            Reading::Scale(s) => {
                set_text(doc, IMPERIAL_LABEL, &s.imperial);
                set_text(doc, METRIC_LABEL, &s.metric);
            }
            Reading::Altitude(a) => {
                set_text(doc, ALTITUDE_VALUE, &a.label);
                self.set_gauge(ALTITUDE_FILL, ALTITUDE_CONTENT, a.fill_percent);
            }
            Reading::Pitch(p) => {
                set_text(doc, PITCH_VALUE, &p.label);
                self.set_gauge(PITCH_FILL, PITCH_CONTENT, p.fill_percent);
            }
            Reading::Compass(c) => {
                set_style_by_id(doc, COMPASS_RING, "transform", &c.css_transform());
            }
        }
    }

    fn set_opacity(&mut self, id: IndicatorId, opacity: f32) {
        let Some(el) = self.document.get_element_by_id(pill_id(id)) else {
            return;
        };
        set_style(&el, "opacity", &opacity.to_string());
        if id == IndicatorId::Compass {
            self.set_compass_detail(&el, opacity >= 1.0);
        }
    }
}
