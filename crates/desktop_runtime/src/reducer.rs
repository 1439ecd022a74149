//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use platform_host::{Point, RandomSource, Size, SoundCue};
use tracing::debug;

use crate::catalog::panel_descriptor;
use crate::config::DesktopConfig;
use crate::context_menu::{visible_actions, ContextAction, ContextTarget};
use crate::icons::Rejection;
use crate::model::{
    DesktopState, GalleryContext, IconGesture, IconId, IconSpec, IconTarget, InteractionState,
    PanelId,
};
use crate::window_manager::WindowManager;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Put a panel measured at `size` under management.
    RegisterPanel {
        /// Panel to register.
        panel: PanelId,
        /// Measured frame size.
        size: Size,
    },
    /// Drop a panel from management.
    UnregisterPanel {
        /// Panel to unregister.
        panel: PanelId,
    },
    /// Show a panel (synthesizing overlays on demand) and raise it.
    OpenPanel {
        /// Panel to open.
        panel: PanelId,
    },
    /// Hide a static panel or remove a synthesized overlay.
    ClosePanel {
        /// Panel to close.
        panel: PanelId,
    },
    /// Close every visible panel that Escape dismisses.
    CloseModalPanels,
    /// Open the image viewer on a gallery.
    OpenGallery {
        /// Gallery to show.
        context: GalleryContext,
    },
    /// Raise a panel without moving it.
    FocusPanel {
        /// Panel to raise.
        panel: PanelId,
    },
    /// Start dragging a panel by its handle.
    BeginWindowDrag {
        /// Panel under the pointer.
        panel: PanelId,
        /// Pointer position at drag start.
        pointer: Point,
    },
    /// Follow the pointer with the dragged panel.
    UpdateWindowDrag {
        /// Current pointer position.
        pointer: Point,
    },
    /// Release the dragged panel.
    EndWindowDrag,
    /// Swap a panel between its maximized and restored rectangles.
    ToggleMaximize {
        /// Panel to toggle.
        panel: PanelId,
    },
    /// Place a new desktop shortcut.
    AddIcon(IconSpec),
    /// Select one icon, clearing all others.
    SelectIcon {
        /// Icon to select.
        icon: IconId,
    },
    /// Clear the icon selection (click on empty desktop).
    DeselectAllIcons,
    /// Press on an icon; becomes a click or a drag depending on movement.
    BeginIconDrag {
        /// Pressed icon.
        icon: IconId,
        /// Pointer position at press.
        pointer: Point,
    },
    /// Pointer moved while an icon is pressed.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: Point,
    },
    /// Pointer released after pressing an icon.
    EndIconDrag,
    /// Open whatever the icon references.
    ActivateIcon {
        /// Icon to activate.
        icon: IconId,
    },
    /// Start the deletion sequence for an icon.
    RequestDeleteIcon {
        /// Icon to delete.
        icon: IconId,
    },
    /// Delete the selected icon if any (keyboard `Delete`).
    DeleteSelectedIcon,
    /// Trash target clicked: delete the selected icon or complain.
    TrashClicked,
    /// Something was dropped on the trash target.
    DropOnTrash {
        /// Text payload carried by the drop.
        payload: String,
    },
    /// Re-lay icons out in a grid.
    OrganizeIcons,
    /// Open the context menu for a target at the pointer.
    OpenContextMenu {
        /// Menu target.
        target: ContextTarget,
        /// Pointer position.
        pointer: Point,
    },
    /// Dismiss the context menu.
    CloseContextMenu,
    /// A context-menu entry was chosen.
    InvokeContextAction(ContextAction),
    /// A timer queued by an earlier transition fired.
    Deferred(DeferredAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Work a transition postpones to a later tick.
pub enum DeferredAction {
    /// Remove an icon whose deletion animation finished.
    FinalizeIconDeletion(IconId),
    /// Play a cue partway through a sequence.
    PlaySound(SoundCue),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime to execute.
pub enum RuntimeEffect {
    /// Re-project one window onto the surface.
    SyncWindow(PanelId),
    /// Remove a synthesized window frame from the surface.
    RemoveWindow(PanelId),
    /// Re-project one icon.
    SyncIcon(IconId),
    /// Re-project every icon.
    SyncIcons,
    /// Remove an icon element.
    RemoveIcon(IconId),
    /// Re-project the context menu (open or closed).
    SyncContextMenu,
    /// Show a user-facing notice.
    Notify(String),
    /// Play a UI cue.
    PlaySound(SoundCue),
    /// Queue a deferred action.
    Schedule {
        /// Delay from now.
        delay_ms: u64,
        /// Action to dispatch when the delay elapses.
        action: DeferredAction,
    },
    /// Resolve a context-menu choice through the registered handlers.
    RunContextAction {
        /// Chosen entry.
        action: ContextAction,
        /// Target the menu was opened on.
        target: ContextTarget,
    },
    /// Hand a generic shortcut activation to the feature that owns `key`.
    ActivateShortcut(String),
}

/// Environment inputs a transition may read.
#[derive(Clone, Copy)]
pub struct ReduceEnv<'a> {
    pub config: &'a DesktopConfig,
    pub viewport: Size,
    /// Extent of the icon area.
    pub desktop: Size,
    pub now_ms: u64,
    pub random: &'a dyn RandomSource,
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// Preconditions that do not hold (absent panels, re-entrant drags, repeat deletions) make the
/// action a no-op. Requests the user must hear about produce a notice instead.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &ReduceEnv<'_>,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::RegisterPanel { panel, size } => {
            let registration =
                WindowManager::registration_for(panel, size, env.config.drag_handle_height_px);
            if state.windows.register(registration) {
                effects.push(RuntimeEffect::SyncWindow(panel));
            }
        }
        DesktopAction::UnregisterPanel { panel } => {
            if state.windows.unregister(panel).is_some() {
                effects.push(RuntimeEffect::RemoveWindow(panel));
            }
        }
        DesktopAction::OpenPanel { panel } => {
            open_panel(state, env, panel, &mut effects);
        }
        DesktopAction::ClosePanel { panel } => {
            if close_panel(state, panel, &mut effects) {
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
        }
        DesktopAction::CloseModalPanels => {
            if close_modal_panels(state, &mut effects) {
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
        }
        DesktopAction::OpenGallery { context } => {
            state.image_viewer_context = Some(context);
            open_panel(state, env, PanelId::ImageViewer, &mut effects);
        }
        DesktopAction::FocusPanel { panel } => {
            let visible = state.windows.get(panel).is_some_and(|w| w.visible);
            if visible && state.windows.bring_to_front(panel).is_some() {
                effects.push(RuntimeEffect::SyncWindow(panel));
            }
        }
        DesktopAction::BeginWindowDrag { panel, pointer } => {
            if state.windows.begin_drag(panel, pointer, env.viewport) {
                effects.push(RuntimeEffect::SyncWindow(panel));
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
        }
        DesktopAction::UpdateWindowDrag { pointer } => {
            if let Some(panel) = state.windows.continue_drag(pointer, env.viewport) {
                effects.push(RuntimeEffect::SyncWindow(panel));
            }
        }
        DesktopAction::EndWindowDrag => {
            if let Some(panel) = state.windows.end_drag() {
                effects.push(RuntimeEffect::SyncWindow(panel));
            }
        }
        DesktopAction::ToggleMaximize { panel } => {
            if state.windows.toggle_maximize(panel, env.viewport).is_some() {
                effects.push(RuntimeEffect::SyncWindow(panel));
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            }
        }
        DesktopAction::AddIcon(spec) => {
            let title = spec.title.clone();
            match state
                .icons
                .add_icon(spec, env.desktop, env.random, env.now_ms)
            {
                Ok(id) => {
                    effects.push(RuntimeEffect::SyncIcon(id));
                    effects.push(RuntimeEffect::Notify(format!("{title} added to desktop!")));
                    effects.push(RuntimeEffect::PlaySound(SoundCue::Startup));
                }
                Err(rejection) => effects.push(RuntimeEffect::Notify(rejection.to_string())),
            }
        }
        DesktopAction::SelectIcon { icon } => {
            if state.icons.select(&icon) {
                effects.push(RuntimeEffect::SyncIcons);
            }
        }
        DesktopAction::DeselectAllIcons => {
            if state.icons.deselect_all() {
                effects.push(RuntimeEffect::SyncIcons);
            }
        }
        DesktopAction::BeginIconDrag { icon, pointer } => {
            if !state.icons.begin_icon_drag(&icon, pointer) {
                debug!(%icon, "icon press ignored");
            }
        }
        DesktopAction::UpdateIconDrag { pointer } => {
            if let Some(icon) = state.icons.continue_icon_drag(pointer, env.desktop) {
                effects.push(RuntimeEffect::SyncIcon(icon));
            }
        }
        DesktopAction::EndIconDrag => {
            match state
                .icons
                .end_icon_drag(env.now_ms, env.config.double_click_ms)
            {
                IconGesture::Ignored => {}
                IconGesture::Dragged(icon) => {
                    effects.push(RuntimeEffect::SyncIcon(icon));
                    effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
                }
                IconGesture::Selected(_) => effects.push(RuntimeEffect::SyncIcons),
                IconGesture::Activated(icon) => {
                    effects.push(RuntimeEffect::SyncIcons);
                    activate_icon(state, env, &icon, &mut effects);
                }
            }
        }
        DesktopAction::ActivateIcon { icon } => {
            activate_icon(state, env, &icon, &mut effects);
        }
        DesktopAction::RequestDeleteIcon { icon } => {
            request_delete(state, env, &icon, &mut effects);
        }
        DesktopAction::DeleteSelectedIcon => {
            match state.icons.selected_icon().map(|icon| icon.id.clone()) {
                Some(icon) => request_delete(state, env, &icon, &mut effects),
                None => debug!("delete key pressed with nothing selected"),
            }
        }
        DesktopAction::TrashClicked => {
            match state.icons.selected_icon().map(|icon| icon.id.clone()) {
                Some(icon) => request_delete(state, env, &icon, &mut effects),
                None => {
                    effects.push(RuntimeEffect::Notify(
                        Rejection::NothingSelected.to_string(),
                    ));
                    effects.push(RuntimeEffect::PlaySound(SoundCue::Error));
                }
            }
        }
        DesktopAction::DropOnTrash { payload } => match state.icons.resolve_payload(&payload) {
            Some(icon) => request_delete(state, env, &icon, &mut effects),
            None => debug!(payload = %payload, "trash drop did not name a desktop icon"),
        },
        DesktopAction::OrganizeIcons => {
            state.icons.reflow(env.desktop.w, env.config.icon_grid);
            effects.push(RuntimeEffect::SyncIcons);
            effects.push(RuntimeEffect::Notify("Desktop reorganized!".to_string()));
            effects.push(RuntimeEffect::PlaySound(SoundCue::Startup));
        }
        DesktopAction::OpenContextMenu { target, pointer } => {
            let available = match &target {
                ContextTarget::Window(panel) => {
                    state.windows.get(*panel).is_some_and(|w| w.visible)
                }
                ContextTarget::Icon(icon) => {
                    let selected = state.icons.select(icon);
                    if selected {
                        effects.push(RuntimeEffect::SyncIcons);
                    }
                    selected
                }
                ContextTarget::Desktop => true,
            };
            if available {
                interaction.context_menu.open(
                    target,
                    pointer,
                    env.viewport,
                    env.config.context_menu,
                );
                effects.push(RuntimeEffect::SyncContextMenu);
                effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            } else {
                debug!(?target, "context menu target is not on the desktop");
            }
        }
        DesktopAction::CloseContextMenu => {
            if interaction.context_menu.close() {
                effects.push(RuntimeEffect::SyncContextMenu);
            }
        }
        DesktopAction::InvokeContextAction(action) => {
            let Some(target) = interaction.context_menu.target().cloned() else {
                debug!(action = action.as_str(), "no context menu is open");
                return effects;
            };
            interaction.context_menu.close();
            effects.push(RuntimeEffect::SyncContextMenu);
            effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
            if visible_actions(&target).contains(&action) {
                effects.push(RuntimeEffect::RunContextAction { action, target });
            }
        }
        DesktopAction::Deferred(DeferredAction::FinalizeIconDeletion(icon)) => {
            if let Some(removed) = state.icons.finalize_delete(&icon) {
                effects.push(RuntimeEffect::RemoveIcon(icon));
                effects.push(RuntimeEffect::Notify(format!("{} deleted!", removed.title)));
            }
        }
        DesktopAction::Deferred(DeferredAction::PlaySound(cue)) => {
            effects.push(RuntimeEffect::PlaySound(cue));
        }
    }
    effects
}

fn open_panel(
    state: &mut DesktopState,
    env: &ReduceEnv<'_>,
    panel: PanelId,
    effects: &mut Vec<RuntimeEffect>,
) {
    if !state.windows.is_registered(panel) {
        let descriptor = panel_descriptor(panel);
        if !descriptor.overlay {
            debug!(?panel, "panel frame is not on this page");
            return;
        }
        let registration = WindowManager::registration_for(
            panel,
            descriptor.default_size,
            env.config.drag_handle_height_px,
        );
        state.windows.register(registration);
    }
    if state.windows.show(panel) {
        effects.push(RuntimeEffect::SyncWindow(panel));
        effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
    }
}

/// Returns whether anything was closed.
fn close_panel(state: &mut DesktopState, panel: PanelId, effects: &mut Vec<RuntimeEffect>) -> bool {
    if panel == PanelId::ImageViewer {
        state.image_viewer_context = None;
    }
    if panel_descriptor(panel).overlay {
        if state.windows.unregister(panel).is_none() {
            return false;
        }
        effects.push(RuntimeEffect::RemoveWindow(panel));
        return true;
    }
    let was_visible = state.windows.get(panel).is_some_and(|w| w.visible);
    if was_visible && state.windows.hide(panel) {
        effects.push(RuntimeEffect::SyncWindow(panel));
        return true;
    }
    false
}

fn close_modal_panels(state: &mut DesktopState, effects: &mut Vec<RuntimeEffect>) -> bool {
    let open: Vec<PanelId> = state
        .windows
        .windows()
        .iter()
        .filter(|w| w.visible && panel_descriptor(w.id).dismissed_by_escape)
        .map(|w| w.id)
        .collect();
    let mut closed = false;
    for panel in open {
        closed |= close_panel(state, panel, effects);
    }
    closed
}

fn activate_icon(
    state: &mut DesktopState,
    env: &ReduceEnv<'_>,
    icon: &IconId,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(target) = state
        .icons
        .get(icon)
        .filter(|entry| !entry.is_deleting())
        .map(|entry| entry.target.clone())
    else {
        debug!(%icon, "activation of an absent icon ignored");
        return;
    };
    match target {
        IconTarget::Window(panel) => open_panel(state, env, panel, effects),
        IconTarget::Gallery(context) => {
            state.image_viewer_context = Some(context);
            open_panel(state, env, PanelId::ImageViewer, effects);
        }
        IconTarget::Generic(key) => effects.push(RuntimeEffect::ActivateShortcut(key)),
    }
    effects.push(RuntimeEffect::PlaySound(SoundCue::Startup));
}

fn request_delete(
    state: &mut DesktopState,
    env: &ReduceEnv<'_>,
    icon: &IconId,
    effects: &mut Vec<RuntimeEffect>,
) {
    if state.icons.request_delete(icon).is_none() {
        return;
    }
    let timing = env.config.deletion;
    effects.push(RuntimeEffect::SyncIcon(icon.clone()));
    effects.push(RuntimeEffect::PlaySound(SoundCue::Click));
    effects.push(RuntimeEffect::Schedule {
        delay_ms: timing.sound_delay_ms,
        action: DeferredAction::PlaySound(SoundCue::Delete),
    });
    effects.push(RuntimeEffect::Schedule {
        delay_ms: timing.removal_delay_ms,
        action: DeferredAction::FinalizeIconDeletion(icon.clone()),
    });
}
