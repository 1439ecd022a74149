//! Page entry point: builds the browser host, boots a [`DesktopRuntime`], and feeds it DOM input.

use std::{cell::RefCell, fmt, rc::Rc};

use desktop_runtime::{logging, DesktopConfig, DesktopRuntime, HitTarget, InputEvent, Key};
use platform_host::TickScheduler;
use tracing::{debug, Level};

use crate::dom::{self, DomEvent, EventReply};
use crate::hit_test::{self, Landing};
use crate::{
    build_host_services, ConsoleMakeWriter, DomSurfaceConfig, WebTickScheduler, WebToastService,
};

/// Document-level events the desktop listens to.
const LISTENED_EVENTS: [&str; 10] = [
    "mousedown",
    "mousemove",
    "mouseup",
    "click",
    "keydown",
    "contextmenu",
    "dragstart",
    "dragend",
    "dragover",
    "drop",
];

/// Shared handle to a mounted desktop.
///
/// Clones share the runtime; page features use [`DesktopController::runtime`] to register
/// context-menu handlers and shortcut callbacks.
#[derive(Clone)]
pub struct DesktopController {
    runtime: Rc<RefCell<DesktopRuntime>>,
    surface: DomSurfaceConfig,
}

impl fmt::Debug for DesktopController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopController")
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

/// Mounts the desktop onto the current page.
///
/// Installs console logging, boots the runtime against the page's frames, wires deferred work to
/// `setTimeout`, and attaches the document listeners. On native targets the listeners are inert.
pub fn mount(config: DesktopConfig, surface: DomSurfaceConfig) -> DesktopController {
    logging::init_with_writer(ConsoleMakeWriter, Level::INFO);

    let scheduler = WebTickScheduler::default();
    let host = build_host_services(surface.clone(), toast_service(&config), &scheduler);
    let mut runtime = DesktopRuntime::new(config, host);
    runtime.boot();
    let controller = DesktopController::new(runtime, surface);

    let weak = Rc::downgrade(&controller.runtime);
    let retry = scheduler.clone();
    scheduler.set_callback(move || {
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        let Ok(mut runtime) = runtime.try_borrow_mut() else {
            debug!("runtime busy; retrying tick");
            retry.request_tick(0);
            return;
        };
        runtime.tick();
    });

    for event_type in LISTENED_EVENTS {
        let controller = controller.clone();
        dom::listen(
            event_type,
            Box::new(move |event| controller.handle(event_type, event)),
        );
    }
    controller
}

fn toast_service(config: &DesktopConfig) -> WebToastService {
    WebToastService::new(config.toast.visible_ms, config.toast.exit_ms)
}

impl DesktopController {
    fn new(runtime: DesktopRuntime, surface: DomSurfaceConfig) -> Self {
        Self {
            runtime: Rc::new(RefCell::new(runtime)),
            surface,
        }
    }

    /// The mounted runtime.
    pub fn runtime(&self) -> Rc<RefCell<DesktopRuntime>> {
        Rc::clone(&self.runtime)
    }

    pub(crate) fn handle(&self, event_type: &str, event: &DomEvent) -> EventReply {
        let landing = hit_test::resolve(&event.path, &self.surface);
        let Ok(mut runtime) = self.runtime.try_borrow_mut() else {
            debug!(event_type, "event dropped while the runtime is busy");
            return EventReply::default();
        };
        let (input, reply) = translate(event_type, event, landing, &runtime);
        if let Some(input) = input {
            runtime.handle_input(input);
        }
        reply
    }
}

fn prevent() -> EventReply {
    EventReply {
        prevent_default: true,
        transfer: None,
    }
}

fn translate(
    event_type: &str,
    event: &DomEvent,
    landing: Landing,
    runtime: &DesktopRuntime,
) -> (Option<InputEvent>, EventReply) {
    let pointer = event.pointer;
    let state = runtime.state();
    let dragging =
        state.windows.dragging_window().is_some() || state.icons.dragging_icon().is_some();

    match (event_type, landing) {
        // Presses inside the menu must not close it before the click picks an entry.
        ("mousedown", Landing::Menu(_)) => (None, EventReply::default()),
        ("mousedown", Landing::Target(target)) => (
            Some(InputEvent::PointerDown {
                target,
                pointer,
                button: hit_test::pointer_button(event.button),
            }),
            EventReply::default(),
        ),
        ("mousemove", _) if dragging => {
            (Some(InputEvent::PointerMove { pointer }), EventReply::default())
        }
        ("mouseup" | "dragend", _) if dragging => {
            (Some(InputEvent::PointerUp { pointer }), EventReply::default())
        }
        ("click", Landing::Menu(Some(action))) => {
            (Some(InputEvent::MenuChoice(action)), EventReply::default())
        }
        ("keydown", _) => {
            let key = event
                .key
                .as_deref()
                .map(Key::from_dom_key)
                .unwrap_or(Key::Other);
            let input = (key != Key::Other).then_some(InputEvent::KeyDown(key));
            (input, EventReply::default())
        }
        ("contextmenu", Landing::Menu(_)) => (None, prevent()),
        ("contextmenu", Landing::Target(HitTarget::Outside | HitTarget::Trash)) => {
            (None, EventReply::default())
        }
        ("contextmenu", Landing::Target(target)) => {
            (Some(InputEvent::ContextMenu { target, pointer }), prevent())
        }
        ("dragstart", Landing::Target(HitTarget::Icon(icon))) => (
            None,
            EventReply {
                prevent_default: false,
                transfer: state.icons.drag_payload(&icon),
            },
        ),
        ("dragover", Landing::Target(HitTarget::Trash)) => (None, prevent()),
        ("drop", Landing::Target(HitTarget::Trash)) => {
            let input = event
                .transfer
                .clone()
                .map(|payload| InputEvent::DropOnTrash { payload });
            (input, prevent())
        }
        _ => (None, EventReply::default()),
    }
}

/// Mounts the desktop with an optional JSON configuration override.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = startDesktop)]
pub fn start_desktop(config_json: Option<String>) -> Result<(), wasm_bindgen::JsValue> {
    let config = match config_json {
        Some(raw) => DesktopConfig::from_json_str(&raw)
            .map_err(|err| wasm_bindgen::JsValue::from_str(&err.to_string()))?,
        None => DesktopConfig::default(),
    };
    mount(config, DomSurfaceConfig::default());
    Ok(())
}
