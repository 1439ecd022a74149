use platform_host::{IconStyle, Point, Size};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, DragEvent, Element, Event, HtmlElement, KeyboardEvent,
    MouseEvent,
};

use super::{Declaration, DomEvent, ElementInfo, EventHandler, EventReply, MenuEntry};

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn element(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

fn html_element(id: &str) -> Option<HtmlElement> {
    element(id)?.dyn_into::<HtmlElement>().ok()
}

fn px(value: &str) -> Option<i32> {
    value
        .trim()
        .strip_suffix("px")?
        .parse::<f64>()
        .ok()
        .map(|v| v.round() as i32)
}

fn js_dimension(value: Result<JsValue, JsValue>) -> i32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .map(|v| v.max(0.0).round() as i32)
        .unwrap_or_default()
}

pub(crate) fn viewport() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::default();
    };
    Size::new(
        js_dimension(window.inner_width()),
        js_dimension(window.inner_height()),
    )
}

// Hidden frames lay out at zero; their stylesheet size is the extent they will open with.
pub(crate) fn element_size(id: &str) -> Option<Size> {
    let el = html_element(id)?;
    let (w, h) = (el.offset_width(), el.offset_height());
    if w > 0 && h > 0 {
        return Some(Size::new(w, h));
    }
    let computed = web_sys::window()?.get_computed_style(&el).ok().flatten()?;
    let w = computed
        .get_property_value("width")
        .ok()
        .as_deref()
        .and_then(px);
    let h = computed
        .get_property_value("height")
        .ok()
        .as_deref()
        .and_then(px);
    Some(Size::new(w.unwrap_or_default(), h.unwrap_or_default()))
}

pub(crate) fn client_size(id: &str) -> Option<Size> {
    let el = element(id)?;
    let size = Size::new(el.client_width(), el.client_height());
    (size.w > 0 && size.h > 0).then_some(size)
}

pub(crate) fn apply_style(
    id: &str,
    declarations: &[Declaration],
    classes: &[(&str, bool)],
) -> bool {
    let Some(el) = html_element(id) else {
        return false;
    };
    let style = el.style();
    for (property, value) in declarations {
        if let Err(err) = style.set_property(property, value) {
            tracing::warn!(id, property, ?err, "style write rejected");
        }
    }
    let list = el.class_list();
    for (class, on) in classes {
        let _ = list.toggle_with_force(class, *on);
    }
    true
}

pub(crate) fn remove_element(id: &str) -> bool {
    match element(id) {
        Some(el) => {
            el.remove();
            true
        }
        None => false,
    }
}

fn create_icon(doc: &Document, container: &Element, style: &IconStyle) -> Result<(), JsValue> {
    let icon = doc.create_element("div")?;
    icon.set_id(&style.id);
    icon.set_class_name("desktop-icon");
    icon.set_attribute("draggable", "true")?;

    let image = doc.create_element("img")?;
    image.set_attribute("src", &style.image)?;
    image.set_attribute("alt", &style.label)?;
    icon.append_child(&image)?;

    let label = doc.create_element("span")?;
    label.set_text_content(Some(&style.label));
    icon.append_child(&label)?;

    container.append_child(&icon)?;
    Ok(())
}

pub(crate) fn upsert_icon(container_id: &str, style: &IconStyle, declarations: &[Declaration]) {
    let Some(doc) = document() else {
        return;
    };
    if doc.get_element_by_id(&style.id).is_none() {
        let Some(container) = doc.get_element_by_id(container_id) else {
            tracing::warn!(container_id, "icon container missing");
            return;
        };
        if let Err(err) = create_icon(&doc, &container, style) {
            tracing::warn!(id = %style.id, ?err, "icon element could not be created");
            return;
        }
    }
    apply_style(
        &style.id,
        declarations,
        &[("selected", style.selected), ("deleting", style.deleting)],
    );
}

fn fill_menu(doc: &Document, menu: &HtmlElement, entries: &[MenuEntry]) -> Result<(), JsValue> {
    menu.set_inner_html("");
    for (token, label) in entries {
        let item = doc.create_element("div")?;
        item.set_class_name("context-menu-item");
        item.set_attribute("data-action", token)?;
        item.set_text_content(Some(label));
        menu.append_child(&item)?;
    }
    Ok(())
}

pub(crate) fn render_menu(menu_id: &str, menu: Option<(Point, &[MenuEntry])>) {
    let (Some(doc), Some(el)) = (document(), html_element(menu_id)) else {
        return;
    };
    let style = el.style();
    let Some((position, entries)) = menu else {
        let _ = style.set_property("display", "none");
        return;
    };
    if let Err(err) = fill_menu(&doc, &el, entries) {
        tracing::warn!(menu_id, ?err, "context menu could not be rendered");
        return;
    }
    let _ = style.set_property("left", &format!("{}px", position.x));
    let _ = style.set_property("top", &format!("{}px", position.y));
    let _ = style.set_property("display", "block");
}

pub(crate) fn show_toast(
    container_id: Option<&str>,
    message: &str,
    visible_ms: u64,
    exit_ms: u64,
) {
    let Some(doc) = document() else {
        return;
    };
    let parent: Option<Element> = match container_id {
        Some(id) => doc.get_element_by_id(id),
        None => doc.body().map(Into::into),
    };
    let Some(parent) = parent else {
        return;
    };
    let Ok(toast) = doc.create_element("div") else {
        return;
    };
    toast.set_class_name("notification");
    toast.set_text_content(Some(message));
    if parent.append_child(&toast).is_err() {
        return;
    }
    set_timeout(
        visible_ms,
        Box::new(move || {
            let _ = toast.class_list().add_1("hide");
            set_timeout(
                exit_ms,
                Box::new(move || {
                    if toast.is_connected() {
                        toast.remove();
                    }
                }),
            );
        }),
    );
}

pub(crate) fn dispatch_custom_event(event_type: &str, detail: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(detail));
    match CustomEvent::new_with_event_init_dict(event_type, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(err) => tracing::warn!(event_type, ?err, "custom event could not be created"),
    }
}

pub(crate) fn set_timeout(delay_ms: u64, callback: Box<dyn FnOnce()>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let handler = Closure::once_into_js(move || callback());
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(handler.unchecked_ref(), delay)
    {
        tracing::warn!(delay_ms, ?err, "setTimeout rejected");
    }
}

pub(crate) fn console_log(line: &str) {
    web_sys::console::log_1(&JsValue::from_str(line));
}

fn element_info(el: &Element) -> ElementInfo {
    ElementInfo {
        id: el.id(),
        classes: el
            .class_name()
            .split_whitespace()
            .map(str::to_owned)
            .collect(),
        action: el.get_attribute("data-action"),
        window_control: el.get_attribute("data-window-control"),
    }
}

fn read_event(event: &Event) -> DomEvent {
    let mut path = Vec::new();
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(el) = current {
        path.push(element_info(&el));
        current = el.parent_element();
    }

    let mut read = DomEvent {
        path,
        ..DomEvent::default()
    };
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        read.pointer = Point::new(mouse.client_x(), mouse.client_y());
        read.button = mouse.button();
    }
    if let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() {
        read.key = Some(keyboard.key());
    }
    if let Some(drag) = event.dyn_ref::<DragEvent>() {
        read.transfer = drag
            .data_transfer()
            .and_then(|transfer| transfer.get_data("text/plain").ok())
            .filter(|data| !data.is_empty());
    }
    read
}

fn apply_reply(event: &Event, reply: EventReply) {
    if reply.prevent_default {
        event.prevent_default();
    }
    let Some(payload) = reply.transfer else {
        return;
    };
    let Some(transfer) = event
        .dyn_ref::<DragEvent>()
        .and_then(DragEvent::data_transfer)
    else {
        return;
    };
    if let Err(err) = transfer.set_data("text/plain", &payload) {
        tracing::warn!(?err, "drag payload rejected");
        return;
    }
    transfer.set_effect_allowed("move");
}

pub(crate) fn listen(event_type: &'static str, mut handler: EventHandler) {
    let Some(doc) = document() else {
        return;
    };
    let callback = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |event: Event| {
        let reply = handler(&read_event(&event));
        apply_reply(&event, reply);
    }));
    if let Err(err) =
        doc.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())
    {
        tracing::warn!(event_type, ?err, "listener could not be attached");
    }
    // Listeners live as long as the page.
    callback.forget();
}
