//! Context-menu targets, placement, and the per-action handler table features register into.

use std::collections::HashMap;
use std::fmt;

use platform_host::{geometry::clamp_axis, Point, Size};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ContextMenuFootprint;
use crate::model::{DesktopState, IconId, IconSpec, PanelId};
use crate::reducer::DesktopAction;

/// What a context menu was opened on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextTarget {
    Window(PanelId),
    Icon(IconId),
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextAction {
    AddToDesktop,
    CloseWindow,
    OpenIcon,
    DeleteIcon,
    OrganizeIcons,
}

impl ContextAction {
    /// Stable token used by surfaces to label and report menu entries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddToDesktop => "add-to-desktop",
            Self::CloseWindow => "close-window",
            Self::OpenIcon => "open-icon",
            Self::DeleteIcon => "delete-icon",
            Self::OrganizeIcons => "organize-icons",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "add-to-desktop" => Some(Self::AddToDesktop),
            "close-window" => Some(Self::CloseWindow),
            "open-icon" => Some(Self::OpenIcon),
            "delete-icon" => Some(Self::DeleteIcon),
            "organize-icons" => Some(Self::OrganizeIcons),
            _ => None,
        }
    }
}

/// Actions offered for a target kind, in display order.
pub fn visible_actions(target: &ContextTarget) -> &'static [ContextAction] {
    match target {
        ContextTarget::Window(_) => &[ContextAction::AddToDesktop, ContextAction::CloseWindow],
        ContextTarget::Icon(_) => &[
            ContextAction::OpenIcon,
            ContextAction::DeleteIcon,
            ContextAction::OrganizeIcons,
        ],
        ContextTarget::Desktop => &[ContextAction::OrganizeIcons],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenMenu {
    pub target: ContextTarget,
    /// Top-left corner after clamping into the viewport.
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContextMenuState {
    open: Option<OpenMenu>,
}

impl ContextMenuState {
    /// Opens (or moves) the menu for `target`, keeping its footprint inside the viewport.
    pub fn open(
        &mut self,
        target: ContextTarget,
        pointer: Point,
        viewport: Size,
        footprint: ContextMenuFootprint,
    ) -> Point {
        let position = Point::new(
            clamp_axis(
                pointer.x,
                footprint.edge_gap,
                viewport.w - footprint.width - footprint.edge_gap,
            ),
            clamp_axis(
                pointer.y,
                footprint.edge_gap,
                viewport.h - footprint.height - footprint.edge_gap,
            ),
        );
        self.open = Some(OpenMenu { target, position });
        position
    }

    /// Returns whether a menu was open.
    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn menu(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    pub fn target(&self) -> Option<&ContextTarget> {
        self.open.as_ref().map(|menu| &menu.target)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

/// Handler a feature contributes for one [`ContextAction`].
///
/// Returning `None` defers to the next handler, and finally to the built-in behavior.
pub type ContextHandler = Box<dyn Fn(&ContextTarget, &DesktopState) -> Option<DesktopAction>>;

#[derive(Default)]
pub struct ContextMenuDispatch {
    handlers: HashMap<ContextAction, Vec<ContextHandler>>,
}

impl fmt::Debug for ContextMenuDispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&'static str, usize)> = self
            .handlers
            .iter()
            .map(|(action, handlers)| (action.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("ContextMenuDispatch")
            .field("handlers", &counts)
            .finish()
    }
}

impl ContextMenuDispatch {
    /// Dispatch table with every built-in feature handler installed.
    pub fn with_builtin_handlers() -> Self {
        let mut dispatch = Self::default();
        dispatch.register(
            ContextAction::AddToDesktop,
            Box::new(image_viewer_add_to_desktop),
        );
        dispatch
    }

    /// Adds a handler consulted after every handler registered earlier for `action`.
    pub fn register(&mut self, action: ContextAction, handler: ContextHandler) {
        self.handlers.entry(action).or_default().push(handler);
    }

    pub fn visible_actions(&self, target: &ContextTarget) -> &'static [ContextAction] {
        visible_actions(target)
    }

    /// Resolves a menu choice to the action it should dispatch.
    ///
    /// Returns `None` when the action is not offered for `target` or nothing applies.
    pub fn invoke(
        &self,
        action: ContextAction,
        target: &ContextTarget,
        state: &DesktopState,
    ) -> Option<DesktopAction> {
        if !visible_actions(target).contains(&action) {
            debug!(action = action.as_str(), ?target, "action not offered for target");
            return None;
        }
        self.handlers
            .get(&action)
            .into_iter()
            .flatten()
            .find_map(|handler| handler(target, state))
            .or_else(|| default_action(action, target))
    }
}

fn default_action(action: ContextAction, target: &ContextTarget) -> Option<DesktopAction> {
    match (action, target) {
        (ContextAction::AddToDesktop, ContextTarget::Window(panel)) => {
            IconSpec::for_panel(*panel).map(DesktopAction::AddIcon)
        }
        (ContextAction::CloseWindow, ContextTarget::Window(panel)) => {
            Some(DesktopAction::ClosePanel { panel: *panel })
        }
        (ContextAction::OpenIcon, ContextTarget::Icon(icon)) => Some(DesktopAction::ActivateIcon {
            icon: icon.clone(),
        }),
        (ContextAction::DeleteIcon, ContextTarget::Icon(icon)) => {
            Some(DesktopAction::RequestDeleteIcon { icon: icon.clone() })
        }
        (ContextAction::OrganizeIcons, _) => Some(DesktopAction::OrganizeIcons),
        _ => None,
    }
}

/// Pins the gallery the image viewer is showing instead of the viewer window itself.
fn image_viewer_add_to_desktop(
    target: &ContextTarget,
    state: &DesktopState,
) -> Option<DesktopAction> {
    match target {
        ContextTarget::Window(PanelId::ImageViewer) => state
            .image_viewer_context
            .map(|context| DesktopAction::AddIcon(IconSpec::for_gallery(context))),
        _ => None,
    }
}
