//! Translation of raw pointer/keyboard input into reducer actions.

use platform_host::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::context_menu::{ContextAction, ContextTarget};
use crate::model::{DesktopState, IconId, InteractionState, PanelId};
use crate::reducer::DesktopAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowControl {
    Close,
    Maximize,
}

/// Element under the pointer, as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    /// Anywhere on a window frame except its title-bar controls.
    Window(PanelId),
    WindowControl(PanelId, WindowControl),
    Icon(IconId),
    Trash,
    /// Empty desktop surface.
    Desktop,
    /// Taskbar, start menu, and other chrome the core does not manage.
    Outside,
}

impl HitTarget {
    fn context_target(&self) -> Option<ContextTarget> {
        match self {
            Self::Window(panel) | Self::WindowControl(panel, _) => {
                Some(ContextTarget::Window(*panel))
            }
            Self::Icon(icon) => Some(ContextTarget::Icon(icon.clone())),
            Self::Desktop => Some(ContextTarget::Desktop),
            Self::Trash | Self::Outside => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Delete" => Self::Delete,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown {
        target: HitTarget,
        pointer: Point,
        button: PointerButton,
    },
    PointerMove {
        pointer: Point,
    },
    PointerUp {
        pointer: Point,
    },
    KeyDown(Key),
    /// Secondary-click request for a context menu.
    ContextMenu {
        target: HitTarget,
        pointer: Point,
    },
    /// Drag-and-drop onto the trash target.
    DropOnTrash {
        payload: String,
    },
    /// Entry chosen from the open context menu.
    MenuChoice(ContextAction),
}

/// Routes one input event to the actions it implies, in dispatch order.
pub fn route_input(
    state: &DesktopState,
    interaction: &InteractionState,
    viewport: Size,
    event: InputEvent,
) -> Vec<DesktopAction> {
    let mut actions = Vec::new();
    match event {
        InputEvent::PointerDown {
            target,
            pointer,
            button,
        } => {
            if interaction.context_menu.is_open() {
                actions.push(DesktopAction::CloseContextMenu);
            }
            if button != PointerButton::Primary {
                return actions;
            }
            match target {
                HitTarget::Window(panel) => {
                    if state.windows.handle_contains(panel, pointer, viewport) {
                        actions.push(DesktopAction::BeginWindowDrag { panel, pointer });
                    } else {
                        actions.push(DesktopAction::FocusPanel { panel });
                    }
                }
                HitTarget::WindowControl(panel, WindowControl::Close) => {
                    actions.push(DesktopAction::ClosePanel { panel });
                }
                HitTarget::WindowControl(panel, WindowControl::Maximize) => {
                    actions.push(DesktopAction::ToggleMaximize { panel });
                }
                HitTarget::Icon(icon) => {
                    actions.push(DesktopAction::BeginIconDrag { icon, pointer });
                }
                HitTarget::Trash => actions.push(DesktopAction::TrashClicked),
                HitTarget::Desktop => actions.push(DesktopAction::DeselectAllIcons),
                HitTarget::Outside => {}
            }
        }
        InputEvent::PointerMove { pointer } => {
            if state.windows.dragging_window().is_some() {
                actions.push(DesktopAction::UpdateWindowDrag { pointer });
            }
            if state.icons.dragging_icon().is_some() {
                actions.push(DesktopAction::UpdateIconDrag { pointer });
            }
        }
        InputEvent::PointerUp { pointer } => {
            if state.windows.dragging_window().is_some() {
                actions.push(DesktopAction::UpdateWindowDrag { pointer });
                actions.push(DesktopAction::EndWindowDrag);
            }
            if state.icons.dragging_icon().is_some() {
                actions.push(DesktopAction::EndIconDrag);
            }
        }
        InputEvent::KeyDown(Key::Delete) => actions.push(DesktopAction::DeleteSelectedIcon),
        InputEvent::KeyDown(Key::Escape) => {
            actions.push(DesktopAction::CloseContextMenu);
            actions.push(DesktopAction::CloseModalPanels);
        }
        InputEvent::KeyDown(Key::Other) => {}
        InputEvent::ContextMenu { target, pointer } => {
            if let Some(target) = target.context_target() {
                actions.push(DesktopAction::OpenContextMenu { target, pointer });
            }
        }
        InputEvent::DropOnTrash { payload } => {
            actions.push(DesktopAction::DropOnTrash { payload });
        }
        InputEvent::MenuChoice(action) => {
            actions.push(DesktopAction::InvokeContextAction(action));
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::panel_descriptor;
    use crate::config::DesktopConfig;
    use crate::window_manager::WindowManager;

    const VIEWPORT: Size = Size::new(1200, 800);

    fn state_with_navigation() -> DesktopState {
        let config = DesktopConfig::default();
        let mut state = DesktopState::new(&config);
        state.windows.register(WindowManager::registration_for(
            PanelId::Navigation,
            panel_descriptor(PanelId::Navigation).default_size,
            config.drag_handle_height_px,
        ));
        state
    }

    fn down(target: HitTarget, pointer: Point, button: PointerButton) -> InputEvent {
        InputEvent::PointerDown {
            target,
            pointer,
            button,
        }
    }

    #[test]
    fn press_on_title_bar_drags_and_elsewhere_focuses() {
        let state = state_with_navigation();
        let interaction = InteractionState::default();
        let on_handle = Point::new(60, 60);
        let in_body = Point::new(60, 300);

        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                down(HitTarget::Window(PanelId::Navigation), on_handle, PointerButton::Primary)
            ),
            vec![DesktopAction::BeginWindowDrag {
                panel: PanelId::Navigation,
                pointer: on_handle
            }]
        );
        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                down(HitTarget::Window(PanelId::Navigation), in_body, PointerButton::Primary)
            ),
            vec![DesktopAction::FocusPanel {
                panel: PanelId::Navigation
            }]
        );
    }

    #[test]
    fn only_primary_presses_start_gestures() {
        let state = state_with_navigation();
        let interaction = InteractionState::default();
        assert!(route_input(
            &state,
            &interaction,
            VIEWPORT,
            down(
                HitTarget::Window(PanelId::Navigation),
                Point::new(60, 60),
                PointerButton::Secondary
            )
        )
        .is_empty());
    }

    #[test]
    fn any_press_dismisses_an_open_menu_first() {
        let state = state_with_navigation();
        let mut interaction = InteractionState::default();
        interaction.context_menu.open(
            ContextTarget::Desktop,
            Point::new(5, 5),
            VIEWPORT,
            DesktopConfig::default().context_menu,
        );
        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                down(HitTarget::Desktop, Point::new(500, 500), PointerButton::Primary)
            ),
            vec![
                DesktopAction::CloseContextMenu,
                DesktopAction::DeselectAllIcons
            ]
        );
    }

    #[test]
    fn moves_without_a_gesture_are_dropped() {
        let state = state_with_navigation();
        assert!(route_input(
            &state,
            &InteractionState::default(),
            VIEWPORT,
            InputEvent::PointerMove {
                pointer: Point::new(1, 1)
            }
        )
        .is_empty());
    }

    #[test]
    fn keys_map_to_delete_and_dismiss() {
        let state = DesktopState::default();
        let interaction = InteractionState::default();
        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                InputEvent::KeyDown(Key::from_dom_key("Delete"))
            ),
            vec![DesktopAction::DeleteSelectedIcon]
        );
        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                InputEvent::KeyDown(Key::from_dom_key("Escape"))
            ),
            vec![DesktopAction::CloseContextMenu, DesktopAction::CloseModalPanels]
        );
        assert!(route_input(
            &state,
            &interaction,
            VIEWPORT,
            InputEvent::KeyDown(Key::from_dom_key("a"))
        )
        .is_empty());
    }

    #[test]
    fn context_requests_on_chrome_are_ignored() {
        let state = DesktopState::default();
        let interaction = InteractionState::default();
        assert!(route_input(
            &state,
            &interaction,
            VIEWPORT,
            InputEvent::ContextMenu {
                target: HitTarget::Trash,
                pointer: Point::new(3, 3)
            }
        )
        .is_empty());
        assert_eq!(
            route_input(
                &state,
                &interaction,
                VIEWPORT,
                InputEvent::ContextMenu {
                    target: HitTarget::WindowControl(PanelId::Hero, WindowControl::Close),
                    pointer: Point::new(3, 3)
                }
            ),
            vec![DesktopAction::OpenContextMenu {
                target: ContextTarget::Window(PanelId::Hero),
                pointer: Point::new(3, 3)
            }]
        );
    }
}
