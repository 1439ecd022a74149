//! DOM projection of the desktop model.

use platform_host::{
    ContextMenuStyle, DesktopSurface, IconStyle, Size, WindowPlacement, WindowStyle,
};

use crate::dom::{self, Declaration, MenuEntry};

/// Opacity applied to a frame while it is being dragged.
const DRAGGING_OPACITY: &str = "0.9";

/// Element ids the surface writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSurfaceConfig {
    /// Container holding desktop icons; also measured as the desktop extent.
    pub desktop_id: String,
    /// Context-menu element.
    pub context_menu_id: String,
    /// Trash drop target.
    pub trash_id: String,
}

impl Default for DomSurfaceConfig {
    fn default() -> Self {
        Self {
            desktop_id: "desktop".to_string(),
            context_menu_id: "contextMenu".to_string(),
            trash_id: "trashIcon".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// [`DesktopSurface`] backed by inline styles on existing page elements.
pub struct DomSurface {
    config: DomSurfaceConfig,
}

impl DomSurface {
    /// Creates a surface writing into the given element ids.
    pub fn new(config: DomSurfaceConfig) -> Self {
        Self { config }
    }
}

/// Display label for a context-menu action token.
pub fn action_label(token: &str) -> &'static str {
    match token {
        "add-to-desktop" => "Add to Desktop",
        "close-window" => "Close",
        "open-icon" => "Open",
        "delete-icon" => "Delete",
        "organize-icons" => "Organize Icons",
        _ => "",
    }
}

pub(crate) fn window_declarations(style: &WindowStyle) -> Vec<Declaration> {
    let (left, top, transform) = match style.placement {
        WindowPlacement::Free(origin) => (
            format!("{}px", origin.x),
            format!("{}px", origin.y),
            "none".to_string(),
        ),
        WindowPlacement::Centered => (
            "50%".to_string(),
            "50%".to_string(),
            "translate(-50%, -50%)".to_string(),
        ),
    };
    vec![
        ("left", left),
        ("top", top),
        ("transform", transform),
        ("width", format!("{}px", style.size.w)),
        ("height", format!("{}px", style.size.h)),
        ("z-index", style.z_index.to_string()),
        (
            "display",
            if style.visible { "block" } else { "none" }.to_string(),
        ),
        (
            "opacity",
            if style.dragging { DRAGGING_OPACITY } else { "1" }.to_string(),
        ),
    ]
}

pub(crate) fn icon_declarations(style: &IconStyle) -> Vec<Declaration> {
    vec![
        ("left", format!("{}px", style.position.x)),
        ("top", format!("{}px", style.position.y)),
    ]
}

pub(crate) fn menu_entries(menu: &ContextMenuStyle) -> Vec<MenuEntry> {
    menu.actions
        .iter()
        .map(|token| (*token, action_label(token)))
        .collect()
}

impl DesktopSurface for DomSurface {
    fn viewport(&self) -> Size {
        dom::viewport()
    }

    fn desktop_size(&self) -> Size {
        dom::client_size(&self.config.desktop_id).unwrap_or_else(dom::viewport)
    }

    fn frame_size(&self, element_id: &str) -> Option<Size> {
        dom::element_size(element_id)
    }

    fn apply_window_style(&self, element_id: &str, style: &WindowStyle) -> bool {
        dom::apply_style(
            element_id,
            &window_declarations(style),
            &[("maximized", style.maximized), ("dragging", style.dragging)],
        )
    }

    fn remove_window(&self, element_id: &str) -> bool {
        dom::remove_element(element_id)
    }

    fn apply_icon_style(&self, style: &IconStyle) {
        dom::upsert_icon(&self.config.desktop_id, style, &icon_declarations(style));
    }

    fn remove_icon(&self, icon_id: &str) -> bool {
        dom::remove_element(icon_id)
    }

    fn apply_context_menu(&self, menu: Option<&ContextMenuStyle>) {
        let entries = menu.map(menu_entries);
        let projection = menu
            .zip(entries.as_deref())
            .map(|(menu, entries)| (menu.position, entries));
        dom::render_menu(&self.config.context_menu_id, projection);
    }
}
