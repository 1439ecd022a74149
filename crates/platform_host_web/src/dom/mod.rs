//! Thin DOM transport shared by the browser adapters.
//!
//! Every function has a `wasm32` implementation and an inert native one with the same signature,
//! so the adapters above compile and unit-test on any target.

use platform_host::Point;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::*;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(not(target_arch = "wasm32"))]
pub(crate) use non_wasm::*;

/// One `context-menu-item` entry: stable action token and its label.
pub(crate) type MenuEntry = (&'static str, &'static str);

/// Inline style property and value.
pub(crate) type Declaration = (&'static str, String);

/// Identity of one element on an event's target-to-root path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ElementInfo {
    pub id: String,
    pub classes: Vec<String>,
    /// `data-action` attribute of context-menu entries.
    pub action: Option<String>,
    /// `data-window-control` attribute of title-bar buttons (`close`, `maximize`).
    pub window_control: Option<String>,
}

impl ElementInfo {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Fields read off a DOM event before the desktop sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DomEvent {
    /// Target element first, then each ancestor.
    pub path: Vec<ElementInfo>,
    /// Client coordinates for mouse and drag events.
    pub pointer: Point,
    /// `MouseEvent.button`.
    pub button: i16,
    /// `KeyboardEvent.key`.
    pub key: Option<String>,
    /// `text/plain` drag-and-drop data.
    pub transfer: Option<String>,
}

/// What the listener does to the live event after the desktop handled it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EventReply {
    pub prevent_default: bool,
    /// `text/plain` data to attach to a starting drag.
    pub transfer: Option<String>,
}

pub(crate) type EventHandler = Box<dyn FnMut(&DomEvent) -> EventReply>;
