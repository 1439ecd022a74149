use platform_host::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::catalog::{gallery_descriptor, panel_descriptor};
use crate::config::DesktopConfig;
use crate::context_menu::ContextMenuState;
use crate::icons::DesktopIconRegistry;
use crate::window_manager::{WindowLimits, WindowManager};

/// Closed set of movable panels the desktop knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PanelId {
    Navigation,
    Hero,
    About,
    Skills,
    Activities,
    MediaPlayer,
    ImageViewer,
}

impl PanelId {
    pub const ALL: [PanelId; 7] = [
        Self::Navigation,
        Self::Hero,
        Self::About,
        Self::Skills,
        Self::Activities,
        Self::MediaPlayer,
        Self::ImageViewer,
    ];

    pub fn title(self) -> &'static str {
        panel_descriptor(self).title
    }

    pub fn dom_id(self) -> &'static str {
        panel_descriptor(self).dom_id
    }

    pub fn from_dom_id(dom_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.dom_id() == dom_id)
    }
}

/// Content contexts the image viewer can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GalleryContext {
    Moodboards,
    Styling,
    Stage,
    Editing,
    Photography,
}

impl GalleryContext {
    pub const ALL: [GalleryContext; 5] = [
        Self::Moodboards,
        Self::Styling,
        Self::Stage,
        Self::Editing,
        Self::Photography,
    ];

    pub fn slug(self) -> &'static str {
        gallery_descriptor(self).slug
    }

    pub fn title(self) -> &'static str {
        gallery_descriptor(self).title
    }
}

/// How a window frame is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Explicit top-left coordinates.
    Free { x: i32, y: i32 },
    /// Translated to the viewport center.
    Centered,
}

/// Rectangle a window occupies while maximized, derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaximizeGeometry {
    /// Anchored at `(margin, margin)`, spanning the viewport minus both side margins horizontally
    /// and minus `bottom_reserve` vertically.
    Inset { margin: i32, bottom_reserve: i32 },
    /// Centered, sized to a percentage of the viewport.
    Fraction { width_pct: i32, height_pct: i32 },
}

impl MaximizeGeometry {
    pub fn resolve(self, viewport: Size) -> (LayoutMode, Size) {
        match self {
            Self::Inset {
                margin,
                bottom_reserve,
            } => (
                LayoutMode::Free {
                    x: margin,
                    y: margin,
                },
                Size::new(viewport.w - 2 * margin, viewport.h - bottom_reserve),
            ),
            Self::Fraction {
                width_pct,
                height_pct,
            } => (
                LayoutMode::Centered,
                Size::new(viewport.w * width_pct / 100, viewport.h * height_pct / 100),
            ),
        }
    }
}

/// Frame rectangle remembered while a window is maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreState {
    pub size: Size,
    pub layout: LayoutMode,
}

/// Everything needed to put a window under management.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRegistration {
    pub id: PanelId,
    pub size: Size,
    pub layout: LayoutMode,
    /// Drag-handle hit region, relative to the frame's top-left corner.
    pub handle: Rect,
    pub visible: bool,
    pub snap_to_center_on_release: bool,
    pub maximize: MaximizeGeometry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: PanelId,
    pub size: Size,
    pub layout: LayoutMode,
    pub handle: Rect,
    pub z_index: i32,
    pub visible: bool,
    pub maximized: bool,
    pub restore: Option<RestoreState>,
    pub dragging: bool,
    pub snap_to_center_on_release: bool,
    pub maximize: MaximizeGeometry,
}

impl WindowRecord {
    /// Frame rectangle in viewport coordinates.
    pub fn resolved_rect(&self, viewport: Size) -> Rect {
        let origin = match self.layout {
            LayoutMode::Free { x, y } => Point::new(x, y),
            LayoutMode::Centered => Point::new(
                (viewport.w - self.size.w) / 2,
                (viewport.h - self.size.h) / 2,
            ),
        };
        Rect::from_parts(origin, self.size)
    }

    /// Changes the frame size, stretching the drag handle by the same width delta and keeping it
    /// inside the frame.
    pub fn resize(&mut self, size: Size) {
        let handle = self.handle;
        let w = (handle.w + size.w - self.size.w).clamp(0, (size.w - handle.x).max(0));
        let h = handle.h.min((size.h - handle.y).max(0));
        self.handle = Rect::new(handle.x, handle.y, w, h);
        self.size = size;
    }

    /// Drag-handle region in viewport coordinates.
    pub fn handle_rect(&self, viewport: Size) -> Rect {
        let frame = self.resolved_rect(viewport);
        self.handle.offset(frame.x, frame.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub window: PanelId,
    /// Pointer offset from the frame's top-left corner at drag start.
    pub grab_offset: Point,
}

/// Stable desktop icon identifier, also used as the drag-and-drop payload.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(pub String);

impl IconId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconKind {
    WindowShortcut,
    ImageViewerShortcut,
    Generic,
}

/// What an icon reopens. At most one icon may exist per target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconTarget {
    Window(PanelId),
    Gallery(GalleryContext),
    Generic(String),
}

impl IconTarget {
    pub fn kind(&self) -> IconKind {
        match self {
            Self::Window(_) => IconKind::WindowShortcut,
            Self::Gallery(_) => IconKind::ImageViewerShortcut,
            Self::Generic(_) => IconKind::Generic,
        }
    }

    /// Key embedded in generated icon ids.
    pub fn reference_key(&self) -> &str {
        match self {
            Self::Window(panel) => panel.dom_id(),
            Self::Gallery(context) => context.slug(),
            Self::Generic(key) => key,
        }
    }
}

/// Request to place a new shortcut on the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub title: String,
    pub image: String,
    pub target: IconTarget,
}

impl IconSpec {
    /// Shortcut for a panel, or `None` for panels that cannot be pinned directly.
    pub fn for_panel(panel: PanelId) -> Option<Self> {
        let descriptor = panel_descriptor(panel);
        descriptor.pinnable.then(|| Self {
            title: descriptor.title.to_string(),
            image: descriptor.icon_image.to_string(),
            target: IconTarget::Window(panel),
        })
    }

    pub fn for_gallery(context: GalleryContext) -> Self {
        let descriptor = gallery_descriptor(context);
        Self {
            title: descriptor.title.to_string(),
            image: descriptor.icon_image.to_string(),
            target: IconTarget::Gallery(context),
        }
    }

    pub fn generic(
        key: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            target: IconTarget::Generic(key.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconPhase {
    Idle,
    /// Deletion animation running; removal is pending on a timer.
    Deleting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopIcon {
    pub id: IconId,
    pub title: String,
    pub image: String,
    pub target: IconTarget,
    pub position: Point,
    pub selected: bool,
    pub phase: IconPhase,
}

impl DesktopIcon {
    pub fn kind(&self) -> IconKind {
        self.target.kind()
    }

    pub fn is_deleting(&self) -> bool {
        self.phase == IconPhase::Deleting
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon: IconId,
    pub pointer_start: Point,
    pub origin: Point,
    /// Latched once movement exceeds the drag threshold.
    pub moved: bool,
}

/// Outcome of a completed pointer gesture on an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconGesture {
    Ignored,
    Dragged(IconId),
    Selected(IconId),
    Activated(IconId),
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Authoritative desktop model: managed windows, desktop icons, and image-viewer content.
pub struct DesktopState {
    pub windows: WindowManager,
    pub icons: DesktopIconRegistry,
    /// Gallery the image viewer is showing while it is open.
    pub image_viewer_context: Option<GalleryContext>,
}

impl DesktopState {
    pub fn new(config: &DesktopConfig) -> Self {
        Self {
            windows: WindowManager::new(WindowLimits {
                z_index_floor: config.z_index_floor,
                z_index_step: config.z_index_step,
                taskbar_reserve: config.taskbar_reserve_px,
            }),
            icons: DesktopIconRegistry::new(config.icon_placement, config.icon_drag),
            image_viewer_context: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Transient UI state that is not part of the window/icon model.
pub struct InteractionState {
    pub context_menu: ContextMenuState,
}
