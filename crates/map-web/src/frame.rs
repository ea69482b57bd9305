use crate::map;
use crate::App;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Monotonic time since page start, the clock every fade and debounce
/// deadline is measured on.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// One animation frame: dim expired indicators and launch a due elevation
/// lookup. The lookup result is applied whenever it resolves.
pub fn frame(app: &App) {
    let now = app.clock.now();
    let Some(request) = app.coordinator.borrow_mut().tick(now) else {
        return;
    };
    let app = app.clone();
    spawn_local(async move {
        let meters = map::fetch_elevation(request.at).await;
        let now = app.clock.now();
        app.coordinator
            .borrow_mut()
            .apply_elevation(request.token, meters, now);
    });
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(app: App) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame(&app);
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
