use crate::constants::*;
use crate::dom;
use crate::draw::TerraDrawToolkit;
use crate::overlay;
use crate::App;
use map_core::{
    next_cycle_index, shortcut_for_key, BasemapStyle, DrawMode, DrawingController, LngLat,
    MapEventKind, PointerEdge, Shortcut, KEY_CYCLE,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Camera change notifications feed the coordinator and keep the sliders in
/// step with the map.
pub fn wire_map_events(app: &App) {
    for kind in MapEventKind::ALL {
        let handler_app = app.clone();
        let closure = Closure::wrap(Box::new(move |_ev: JsValue| {
            let app = &handler_app;
            let view = app.map.view();
            let gestures = app
                .coordinator
                .borrow_mut()
                .on_map_event(kind, &view, app.clock.now());
            for g in &gestures {
                log::debug!("[gesture] {:?} -> {}", g, g.sound());
            }
            if kind != MapEventKind::Click {
                dom::sync_controls(&app.document, &view);
            }
        }) as Box<dyn FnMut(JsValue)>);
        app.map.on(kind.as_str(), closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Mouse edges on the map canvas drive drag tracking.
pub fn wire_pointer(app: &App) {
    let canvas = app.map.get_canvas();
    for event in ["mousedown", "mouseup", "mouseleave"] {
        let app = app.clone();
        dom::add_listener(&canvas, event, move |ev: web::MouseEvent| {
            let edge = match event {
                "mousedown" => PointerEdge::Down { button: ev.button() },
                "mouseup" => PointerEdge::Up { button: ev.button() },
                _ => PointerEdge::Leave,
            };
            let view = app.map.view();
            app.coordinator.borrow_mut().on_pointer(edge, &view);
        });
    }
}

fn apply_slider(app: &App, slider: (&str, &str), value: f64) {
    let center = app.map.center();
    match slider {
        SLIDER_LNG => app.map.set_center(LngLat { lng: value, ..center }),
        SLIDER_LAT => app.map.set_center(LngLat { lat: value, ..center }),
        SLIDER_ZOOM => app.map.set_zoom(value),
        SLIDER_PITCH => app.map.set_pitch(value),
        _ => app.map.set_bearing(value),
    }
}

/// Sliders, style picker and reset button.
pub fn wire_controls(app: &App) {
    let doc = &app.document;
    for slider in [SLIDER_LNG, SLIDER_LAT, SLIDER_ZOOM, SLIDER_PITCH, SLIDER_BEARING] {
        let Some(input) = doc.get_element_by_id(slider.0) else {
            log::warn!("[ui] missing slider #{}", slider.0);
            continue;
        };
        let app = app.clone();
        dom::add_listener(&input, "input", move |_ev: web::Event| {
            let Some(value) = dom::input_value(&app.document, slider.0) else {
                return;
            };
            dom::set_text(&app.document, slider.1, &dom::slider_label(slider, value));
            apply_slider(&app, slider, value);
        });
    }

    if let Some(select) = doc
        .get_element_by_id(STYLE_SELECT)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
    {
        let app = app.clone();
        let picked = select.clone();
        dom::add_listener(&select, "change", move |_ev: web::Event| {
            app.map.set_style(BasemapStyle::from_name(&picked.value()));
        });
    }

    let app = app.clone();
    dom::add_click_listener(doc, RESET_BUTTON, move || reset_view(&app));
}

pub fn reset_view(app: &App) {
    app.map.set_center(app.viewer.reset_center);
    app.map.set_zoom(app.viewer.reset_zoom);
    app.map.set_pitch(0.0);
    app.map.set_bearing(0.0);
    app.map.set_style(BasemapStyle::default());
    app.style_cycle.set(0);
    dom::sync_controls(&app.document, &app.map.view());
}

pub fn wire_keyboard(app: &App) {
    let app = app.clone();
    let target = app.document.clone();
    dom::add_listener(&target, "keydown", move |ev: web::KeyboardEvent| {
        let Some(shortcut) = shortcut_for_key(&ev.key(), ev.shift_key()) else {
            return;
        };
        match shortcut {
            Shortcut::CycleStyle => {
                ev.prevent_default();
                let index = next_cycle_index(app.style_cycle.get());
                app.style_cycle.set(index);
                app.map.set_style(KEY_CYCLE[index]);
                log::info!("[map] style {}/{}", index + 1, KEY_CYCLE.len());
            }
            Shortcut::PolygonMode => {
                ev.prevent_default();
                set_draw_mode(&app, DrawMode::Polygon);
            }
            Shortcut::DeleteSelected => {
                let removed = match app.drawing.borrow_mut().as_mut() {
                    Some(d) => d.delete_selected(),
                    None => Vec::new(),
                };
                if !removed.is_empty() {
                    ev.prevent_default();
                }
            }
        }
    });
}

/// Switch the drawing mode and reflect it in the toolbar.
pub fn set_draw_mode(app: &App, mode: DrawMode) {
    let status = {
        let mut drawing = app.drawing.borrow_mut();
        let Some(d) = drawing.as_mut() else {
            log::warn!("[draw] toolkit not ready; ignoring {} mode", mode);
            return;
        };
        if let Err(e) = d.set_mode(mode) {
            log::error!("[draw] {}", e);
        }
        (d.status_text(), d.status_icon())
    };
    overlay::set_draw_status(&app.document, &status.0, status.1);
    overlay::select_mode_button(&app.document, mode.as_str());
}

pub fn wire_toolbar(app: &App) {
    for button in dom::query_all(&app.document, TOOLBAR_MODE_BUTTONS) {
        let app = app.clone();
        let clicked = button.clone();
        dom::add_listener(&button, "click", move |ev: web::Event| {
            ev.prevent_default();
            let Some(name) = clicked.get_attribute("data-mode") else {
                return;
            };
            match name.parse::<DrawMode>() {
                Ok(mode) => set_draw_mode(&app, mode),
                Err(e) => log::warn!("[draw] {}", e),
            }
        });
    }

    let doc = &app.document;
    {
        let app = app.clone();
        dom::add_click_listener(doc, SAVE_BUTTON, move || save_drawings(&app));
    }
    {
        let app = app.clone();
        dom::add_click_listener(doc, LOAD_BUTTON, move || load_drawings(&app));
    }
    {
        let app = app.clone();
        dom::add_click_listener(doc, CLEAR_BUTTON, move || {
            if let Some(d) = app.drawing.borrow_mut().as_mut() {
                d.clear();
                overlay::notify(&app.document, "All features cleared");
            }
        });
    }
}

fn save_drawings(app: &App) {
    let saved = match app.drawing.borrow().as_ref() {
        Some(d) => d.save(&mut *app.store.borrow_mut()),
        None => return,
    };
    match saved {
        Ok(count) => {
            log::info!("[draw] saved {} features", count);
            overlay::notify(&app.document, "Data saved to local storage");
        }
        Err(e) => log::error!("[draw] save failed: {}", e),
    }
}

fn load_drawings(app: &App) {
    let loaded = match app.drawing.borrow_mut().as_mut() {
        Some(d) => d.load(&*app.store.borrow()),
        None => return,
    };
    match loaded {
        Ok(Some(count)) => {
            log::info!("[draw] loaded {} features", count);
            overlay::notify(&app.document, "Data loaded from local storage");
        }
        Ok(None) => overlay::notify(&app.document, "No saved data found"),
        Err(e) => log::error!("[draw] load failed: {}", e),
    }
}

/// Attach the drawing toolkit once the style is ready. Style reloads after a
/// basemap switch fire the same event; only the first one attaches.
pub fn wire_drawing(app: &App) {
    if app.map.is_style_loaded() {
        attach_drawing(app);
        return;
    }
    let handler_app = app.clone();
    let closure = Closure::wrap(Box::new(move |_ev: JsValue| {
        if handler_app.drawing.borrow().is_none() {
            attach_drawing(&handler_app);
        }
    }) as Box<dyn FnMut(JsValue)>);
    app.map.on("style.load", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn attach_drawing(app: &App) {
    let toolkit = match TerraDrawToolkit::attach(&app.map) {
        Ok(t) => t,
        Err(e) => {
            log::error!("[draw] {}", e);
            return;
        }
    };
    let mut controller = DrawingController::new(toolkit, app.viewer.storage_key.clone());
    if let Err(e) = controller.start() {
        log::error!("[draw] start failed: {}", e);
    }
    overlay::set_draw_status(
        &app.document,
        &controller.status_text(),
        controller.status_icon(),
    );
    overlay::select_mode_button(&app.document, controller.mode().as_str());
    *app.drawing.borrow_mut() = Some(controller);
    log::info!("[draw] toolkit ready");
}

pub fn wire_sfx_panel(app: &App) {
    let app = app.clone();
    overlay::render_sfx_panel(&app.document, app.coordinator.borrow().sound_enabled());
    let doc = app.document.clone();
    dom::add_click_listener(&doc, SFX_TOGGLE, move || {
        let enabled = app.coordinator.borrow_mut().toggle_sound();
        overlay::render_sfx_panel(&app.document, enabled);
    });
}
