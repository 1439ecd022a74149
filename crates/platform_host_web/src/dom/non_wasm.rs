use platform_host::{IconStyle, Point, Size};

use super::{Declaration, EventHandler, MenuEntry};

pub(crate) fn viewport() -> Size {
    Size::default()
}

pub(crate) fn element_size(_id: &str) -> Option<Size> {
    None
}

pub(crate) fn client_size(_id: &str) -> Option<Size> {
    None
}

pub(crate) fn apply_style(
    _id: &str,
    _declarations: &[Declaration],
    _classes: &[(&str, bool)],
) -> bool {
    false
}

pub(crate) fn remove_element(_id: &str) -> bool {
    false
}

pub(crate) fn upsert_icon(_container_id: &str, _style: &IconStyle, _declarations: &[Declaration]) {}

pub(crate) fn render_menu(_menu_id: &str, _menu: Option<(Point, &[MenuEntry])>) {}

pub(crate) fn show_toast(
    _container_id: Option<&str>,
    message: &str,
    _visible_ms: u64,
    _exit_ms: u64,
) {
    tracing::info!(message, "toast");
}

pub(crate) fn dispatch_custom_event(_event_type: &str, _detail: &str) {}

pub(crate) fn set_timeout(_delay_ms: u64, _callback: Box<dyn FnOnce()>) {}

pub(crate) fn console_log(line: &str) {
    eprintln!("{line}");
}

pub(crate) fn listen(_event_type: &'static str, _handler: EventHandler) {}
