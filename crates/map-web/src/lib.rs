#![cfg(target_arch = "wasm32")]
use map_core::{
    BasemapStyle, DrawingController, FeedbackConfig, FeedbackCoordinator, SoundCatalog,
    ViewerConfig,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod draw;
mod events;
mod frame;
mod map;
mod overlay;

use audio::WebToneEngine;
use dom::DomIndicators;
use draw::{BrowserStore, TerraDrawToolkit};
use frame::SessionClock;
use map::Map;

pub type Coordinator = FeedbackCoordinator<DomIndicators, WebToneEngine>;
pub type Drawing = DrawingController<TerraDrawToolkit>;

/// Handles shared by every event handler and the frame loop.
#[derive(Clone)]
pub struct App {
    pub map: Map,
    pub document: web::Document,
    pub viewer: Rc<ViewerConfig>,
    pub clock: SessionClock,
    pub coordinator: Rc<RefCell<Coordinator>>,
    pub drawing: Rc<RefCell<Option<Drawing>>>,
    pub store: Rc<RefCell<BrowserStore>>,
    pub style_cycle: Rc<Cell<usize>>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("map-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let viewer = ViewerConfig::default();
    document
        .get_element_by_id(&viewer.container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", viewer.container_id))?;

    map::configure_sdk(map::api_key_from_page().as_deref())?;
    let map = map::create_map(&viewer, BasemapStyle::default())?;
    map::wire_error_filter(&map);

    let catalog = SoundCatalog::default();
    log::info!("[sfx] sounds: {:?}", catalog.names());
    let coordinator = FeedbackCoordinator::new(
        FeedbackConfig::default(),
        catalog,
        DomIndicators::new(document.clone()),
        WebToneEngine::default(),
    );

    let app = App {
        map,
        document,
        viewer: Rc::new(viewer),
        clock: SessionClock::start(),
        coordinator: Rc::new(RefCell::new(coordinator)),
        drawing: Rc::new(RefCell::new(None)),
        store: Rc::new(RefCell::new(BrowserStore::open())),
        style_cycle: Rc::new(Cell::new(0)),
    };

    events::wire_map_events(&app);
    events::wire_pointer(&app);
    events::wire_controls(&app);
    events::wire_keyboard(&app);
    events::wire_toolbar(&app);
    events::wire_sfx_panel(&app);
    events::wire_drawing(&app);
    dom::sync_controls(&app.document, &app.map.view());

    frame::start_loop(app);
    log::info!("map-web ready");
    Ok(())
}
