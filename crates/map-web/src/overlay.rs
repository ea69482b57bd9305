use crate::constants::*;
use crate::dom;
use map_core::SoundName;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn span(document: &web::Document, class: &str, text: &str) -> Option<web::Element> {
    let el = document.create_element("span").ok()?;
    el.set_class_name(class);
    el.set_text_content(Some(text));
    Some(el)
}

/// Toast in the corner of the map: an info icon and the message, removed
/// after a few seconds.
pub fn notify(document: &web::Document, message: &str) {
    log::info!("[ui] {}", message);
    let (Some(body), Ok(toast)) = (document.body(), document.create_element("div")) else {
        return;
    };
    toast.set_class_name("terradraw-notification");
    for part in [
        span(document, "material-icons", "info"),
        span(document, "notification-text", message),
    ]
    .into_iter()
    .flatten()
    {
        let _ = toast.append_child(&part);
    }
    if body.append_child(&toast).is_err() {
        return;
    }
    let remove = Closure::once_into_js(move || toast.remove());
    if let Some(w) = web::window() {
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            remove.unchecked_ref(),
            NOTIFICATION_MS,
        );
    }
}

/// Status line under the toolbar. Only its text and icon children change.
pub fn set_draw_status(document: &web::Document, text: &str, icon: &str) {
    let Some(status) = document.get_element_by_id(DRAW_STATUS) else {
        return;
    };
    if let Some(el) = dom::query(&status, DRAW_STATUS_TEXT) {
        el.set_text_content(Some(text));
    }
    if let Some(el) = dom::query(&status, DRAW_STATUS_ICON) {
        el.set_text_content(Some(icon));
    }
}

/// Highlight one toolbar button, clearing the rest.
pub fn select_toolbar_button(document: &web::Document, selected: &web::Element) {
    for btn in dom::query_all(document, TOOLBAR_BUTTONS) {
        let _ = btn.class_list().remove_1("active");
    }
    let _ = selected.class_list().add_1("active");
}

pub fn select_mode_button(document: &web::Document, mode: &str) {
    let selector = format!("{}[data-mode=\"{}\"]", TOOLBAR_BUTTONS, mode);
    if let Some(btn) = dom::query_all(document, &selector).into_iter().next() {
        select_toolbar_button(document, &btn);
    }
}

/// SFX panel: master switch plus one row per cue.
pub fn render_sfx_panel(document: &web::Document, enabled: bool) {
    if let Some(toggle) = document.get_element_by_id(SFX_TOGGLE) {
        toggle.set_text_content(Some(if enabled { "ON" } else { "OFF" }));
        let _ = toggle.class_list().toggle_with_force("off", !enabled);
    }
    let Some(list) = document.get_element_by_id(SFX_EVENTS) else {
        return;
    };
    list.set_text_content(None);
    let state = if enabled { "Active" } else { "Muted" };
    for name in SoundName::ALL {
        let Ok(row) = document.create_element("div") else {
            continue;
        };
        row.set_class_name("sfx-event");
        row.set_text_content(Some(&format!("{}: {}", name.label(), state)));
        let _ = list.append_child(&row);
    }
}
