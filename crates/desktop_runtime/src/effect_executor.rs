//! Executes the host-facing subset of reducer-emitted effects and projects model state onto the
//! rendering surface.

use platform_host::{ContextMenuStyle, HostServices, IconStyle, Point, WindowPlacement, WindowStyle};
use tracing::debug;

use crate::context_menu::{visible_actions, ContextMenuState};
use crate::model::{DesktopIcon, DesktopState, InteractionState, LayoutMode, WindowRecord};
use crate::reducer::RuntimeEffect;

pub(crate) fn window_style(window: &WindowRecord) -> WindowStyle {
    WindowStyle {
        placement: match window.layout {
            LayoutMode::Free { x, y } => WindowPlacement::Free(Point::new(x, y)),
            LayoutMode::Centered => WindowPlacement::Centered,
        },
        size: window.size,
        z_index: window.z_index,
        visible: window.visible,
        dragging: window.dragging,
        maximized: window.maximized,
    }
}

pub(crate) fn icon_style(icon: &DesktopIcon) -> IconStyle {
    IconStyle {
        id: icon.id.as_str().to_string(),
        label: icon.title.clone(),
        image: icon.image.clone(),
        position: icon.position,
        selected: icon.selected,
        deleting: icon.is_deleting(),
    }
}

pub(crate) fn context_menu_style(menu: &ContextMenuState) -> Option<ContextMenuStyle> {
    menu.menu().map(|open| ContextMenuStyle {
        position: open.position,
        actions: visible_actions(&open.target)
            .iter()
            .map(|action| action.as_str())
            .collect(),
    })
}

/// Applies `effect` when it only needs host services.
///
/// Effects that need the runtime itself (timers, handler tables) are handed back unchanged.
pub(crate) fn run_host_effect(
    host: &HostServices,
    state: &DesktopState,
    interaction: &InteractionState,
    effect: RuntimeEffect,
) -> Option<RuntimeEffect> {
    match effect {
        RuntimeEffect::SyncWindow(panel) => {
            let window = state.windows.get(panel)?;
            if !host
                .surface
                .apply_window_style(panel.dom_id(), &window_style(window))
            {
                debug!(?panel, "window frame is not on the surface");
            }
        }
        RuntimeEffect::RemoveWindow(panel) => {
            host.surface.remove_window(panel.dom_id());
        }
        RuntimeEffect::SyncIcon(icon) => {
            if let Some(icon) = state.icons.get(&icon) {
                host.surface.apply_icon_style(&icon_style(icon));
            }
        }
        RuntimeEffect::SyncIcons => {
            for icon in state.icons.icons() {
                host.surface.apply_icon_style(&icon_style(icon));
            }
        }
        RuntimeEffect::RemoveIcon(icon) => {
            if !host.surface.remove_icon(icon.as_str()) {
                debug!(%icon, "icon element already gone");
            }
        }
        RuntimeEffect::SyncContextMenu => {
            host.surface
                .apply_context_menu(context_menu_style(&interaction.context_menu).as_ref());
        }
        RuntimeEffect::Notify(message) => host.toasts.notify(&message),
        RuntimeEffect::PlaySound(cue) => host.sounds.play(cue),
        other => return Some(other),
    }
    None
}

#[cfg(test)]
mod tests {
    use platform_host::{Rect, Size};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context_menu::ContextTarget;
    use crate::model::{IconId, IconPhase, IconTarget, MaximizeGeometry, PanelId};

    #[test]
    fn centered_windows_project_without_coordinates() {
        let window = WindowRecord {
            id: PanelId::About,
            size: Size::new(520, 420),
            layout: LayoutMode::Centered,
            handle: Rect::new(0, 0, 520, 32),
            z_index: 1_030,
            visible: true,
            maximized: false,
            restore: None,
            dragging: true,
            snap_to_center_on_release: true,
            maximize: MaximizeGeometry::Fraction {
                width_pct: 90,
                height_pct: 90,
            },
        };
        assert_eq!(
            window_style(&window),
            WindowStyle {
                placement: WindowPlacement::Centered,
                size: Size::new(520, 420),
                z_index: 1_030,
                visible: true,
                dragging: true,
                maximized: false,
            }
        );
    }

    #[test]
    fn deleting_icons_project_their_phase() {
        let icon = DesktopIcon {
            id: IconId("shortcut_resume_9".into()),
            title: "Resume.pdf".into(),
            image: "images/pdf.png".into(),
            target: IconTarget::Generic("resume".into()),
            position: Point::new(40, 60),
            selected: false,
            phase: IconPhase::Deleting,
        };
        let style = icon_style(&icon);
        assert_eq!(style.id, "shortcut_resume_9");
        assert!(style.deleting);
    }

    #[test]
    fn menu_projection_lists_action_tokens_in_order() {
        let mut menu = ContextMenuState::default();
        assert_eq!(context_menu_style(&menu), None);
        menu.open(
            ContextTarget::Window(PanelId::Hero),
            Point::new(50, 50),
            Size::new(1200, 800),
            Default::default(),
        );
        assert_eq!(
            context_menu_style(&menu),
            Some(ContextMenuStyle {
                position: Point::new(50, 50),
                actions: vec!["add-to-desktop", "close-window"],
            })
        );
    }
}
