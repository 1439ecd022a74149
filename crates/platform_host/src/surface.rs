//! Rendering-surface contract: geometry queries in, style mutations out.
//!
//! The desktop model is the source of truth; a surface only ever receives projections of it. Every
//! mutation returns whether the addressed element existed so callers can treat an absent panel as
//! a silent no-op instead of a fault.

use std::{cell::RefCell, collections::BTreeMap};

use crate::geometry::{Point, Size};

/// Where a window frame is anchored on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPlacement {
    /// Explicit top-left coordinates.
    Free(Point),
    /// Translated to the viewport center.
    Centered,
}

/// Style projection of one window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStyle {
    /// Frame anchoring.
    pub placement: WindowPlacement,
    /// Frame extent.
    pub size: Size,
    /// Stacking order.
    pub z_index: i32,
    /// Whether the frame is displayed at all.
    pub visible: bool,
    /// Whether a drag gesture is in progress (rendered with reduced opacity).
    pub dragging: bool,
    /// Whether the frame is in its maximized rectangle.
    pub maximized: bool,
}

/// Style projection of one desktop icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconStyle {
    /// Stable icon identifier (also the drag-and-drop payload).
    pub id: String,
    /// Label shown under the image.
    pub label: String,
    /// Image asset path.
    pub image: String,
    /// Top-left position inside the desktop surface.
    pub position: Point,
    /// Whether the icon is highlighted as selected.
    pub selected: bool,
    /// Whether the deletion animation is playing.
    pub deleting: bool,
}

/// Style projection of the open context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuStyle {
    /// Top-left corner, already clamped into the viewport.
    pub position: Point,
    /// Stable tokens of the actions to display, in display order.
    pub actions: Vec<&'static str>,
}

/// Opaque rendering surface the desktop core reads from and writes to.
pub trait DesktopSurface {
    /// Current viewport extent.
    fn viewport(&self) -> Size;

    /// Current extent of the desktop icon area.
    fn desktop_size(&self) -> Size;

    /// Measured extent of the frame element with the given id, or `None` when it is absent.
    fn frame_size(&self, element_id: &str) -> Option<Size>;

    /// Applies a window projection. Returns `false` when the frame element is absent.
    fn apply_window_style(&self, element_id: &str, style: &WindowStyle) -> bool;

    /// Removes a synthesized window frame. Returns `false` when it was already gone.
    fn remove_window(&self, element_id: &str) -> bool;

    /// Creates or updates the element for an icon.
    fn apply_icon_style(&self, style: &IconStyle);

    /// Removes the element for an icon. Returns `false` when it was already gone.
    fn remove_icon(&self, icon_id: &str) -> bool;

    /// Shows (`Some`) or hides (`None`) the context menu.
    fn apply_context_menu(&self, menu: Option<&ContextMenuStyle>);
}

#[derive(Debug, Default)]
struct MemorySurfaceInner {
    viewport: Size,
    desktop: Size,
    frames: BTreeMap<String, Size>,
    windows: BTreeMap<String, WindowStyle>,
    icons: BTreeMap<String, IconStyle>,
    menu: Option<ContextMenuStyle>,
}

/// In-memory surface recording the latest projection of every element.
///
/// Frames must be declared with [`MemorySurface::with_frame`] to count as present; synthesized
/// overlays are accepted on first styling.
#[derive(Debug, Default)]
pub struct MemorySurface {
    inner: RefCell<MemorySurfaceInner>,
}

impl MemorySurface {
    /// Creates a surface where the desktop area covers the whole viewport.
    pub fn new(viewport: Size) -> Self {
        Self::with_desktop(viewport, viewport)
    }

    /// Creates a surface with distinct viewport and desktop extents.
    pub fn with_desktop(viewport: Size, desktop: Size) -> Self {
        Self {
            inner: RefCell::new(MemorySurfaceInner {
                viewport,
                desktop,
                ..MemorySurfaceInner::default()
            }),
        }
    }

    /// Declares a pre-existing frame element.
    pub fn with_frame(self, element_id: &str, size: Size) -> Self {
        self.inner
            .borrow_mut()
            .frames
            .insert(element_id.to_string(), size);
        self
    }

    /// Resizes the viewport and desktop area.
    pub fn resize(&self, viewport: Size, desktop: Size) {
        let mut inner = self.inner.borrow_mut();
        inner.viewport = viewport;
        inner.desktop = desktop;
    }

    /// Latest projection applied to a window frame.
    pub fn window(&self, element_id: &str) -> Option<WindowStyle> {
        self.inner.borrow().windows.get(element_id).copied()
    }

    /// Latest projection applied to an icon.
    pub fn icon(&self, icon_id: &str) -> Option<IconStyle> {
        self.inner.borrow().icons.get(icon_id).cloned()
    }

    /// Number of icon elements currently displayed.
    pub fn icon_count(&self) -> usize {
        self.inner.borrow().icons.len()
    }

    /// Currently displayed context menu.
    pub fn context_menu(&self) -> Option<ContextMenuStyle> {
        self.inner.borrow().menu.clone()
    }
}

impl DesktopSurface for MemorySurface {
    fn viewport(&self) -> Size {
        self.inner.borrow().viewport
    }

    fn desktop_size(&self) -> Size {
        self.inner.borrow().desktop
    }

    fn frame_size(&self, element_id: &str) -> Option<Size> {
        self.inner.borrow().frames.get(element_id).copied()
    }

    fn apply_window_style(&self, element_id: &str, style: &WindowStyle) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.frames.insert(element_id.to_string(), style.size);
        inner.windows.insert(element_id.to_string(), *style);
        true
    }

    fn remove_window(&self, element_id: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.frames.remove(element_id);
        inner.windows.remove(element_id).is_some()
    }

    fn apply_icon_style(&self, style: &IconStyle) {
        self.inner
            .borrow_mut()
            .icons
            .insert(style.id.clone(), style.clone());
    }

    fn remove_icon(&self, icon_id: &str) -> bool {
        self.inner.borrow_mut().icons.remove(icon_id).is_some()
    }

    fn apply_context_menu(&self, menu: Option<&ContextMenuStyle>) {
        self.inner.borrow_mut().menu = menu.cloned();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn declared_frames_are_measurable_and_undeclared_are_absent() {
        let surface =
            MemorySurface::new(Size::new(1024, 768)).with_frame("navWindow", Size::new(500, 400));
        assert_eq!(surface.frame_size("navWindow"), Some(Size::new(500, 400)));
        assert_eq!(surface.frame_size("heroWindow"), None);
    }

    #[test]
    fn removing_an_icon_twice_reports_absence() {
        let surface = MemorySurface::new(Size::new(800, 600));
        surface.apply_icon_style(&IconStyle {
            id: "icon_1".to_string(),
            label: "Media".to_string(),
            image: "assets/video.ico".to_string(),
            position: Point::new(20, 20),
            selected: false,
            deleting: false,
        });
        assert_eq!(surface.icon_count(), 1);
        assert!(surface.remove_icon("icon_1"));
        assert!(!surface.remove_icon("icon_1"));
    }
}
