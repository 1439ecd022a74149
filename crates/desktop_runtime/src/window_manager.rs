//! Window registration, drag physics, stacking order, and maximize/restore.
//!
//! All operations degrade to no-ops when the referenced window is not registered: panels are
//! optional per page configuration, so absence is expected rather than exceptional.

use platform_host::{geometry::clamp_axis, Point, Rect, Size};
use tracing::debug;

use crate::catalog::panel_descriptor;
use crate::model::{
    DragSession, LayoutMode, PanelId, RestoreState, WindowRecord, WindowRegistration,
};

/// Stacking and geometry limits applied by the [`WindowManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLimits {
    pub z_index_floor: i32,
    pub z_index_step: i32,
    /// Bottom band a dragged frame's top edge may not enter.
    pub taskbar_reserve: i32,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            z_index_floor: 1_000,
            z_index_step: 10,
            taskbar_reserve: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowManager {
    limits: WindowLimits,
    windows: Vec<WindowRecord>,
    drag: Option<DragSession>,
}

impl WindowManager {
    pub fn new(limits: WindowLimits) -> Self {
        Self {
            limits,
            windows: Vec::new(),
            drag: None,
        }
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: PanelId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn is_registered(&self, id: PanelId) -> bool {
        self.get(id).is_some()
    }

    /// Window currently holding the global drag lock.
    pub fn dragging_window(&self) -> Option<PanelId> {
        self.drag.map(|session| session.window)
    }

    /// Window with the highest stacking order.
    pub fn front_window(&self) -> Option<PanelId> {
        self.windows
            .iter()
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    /// Frame rectangle of a registered window in viewport coordinates.
    pub fn resolved_rect(&self, id: PanelId, viewport: Size) -> Option<Rect> {
        self.get(id).map(|w| w.resolved_rect(viewport))
    }

    /// Builds the registration for a catalog panel measured at `size`.
    pub fn registration_for(id: PanelId, size: Size, handle_height: i32) -> WindowRegistration {
        let descriptor = panel_descriptor(id);
        WindowRegistration {
            id,
            size,
            layout: descriptor.default_layout,
            handle: Rect::new(0, 0, size.w, handle_height.min(size.h)),
            visible: descriptor.initially_visible,
            snap_to_center_on_release: descriptor.snap_to_center_on_release,
            maximize: descriptor.maximize,
        }
    }

    /// Puts a window under management above every existing window.
    ///
    /// Returns `false` when the window is already registered or its drag handle does not lie
    /// inside its frame.
    pub fn register(&mut self, registration: WindowRegistration) -> bool {
        if self.is_registered(registration.id) {
            debug!(window = ?registration.id, "window already registered");
            return false;
        }
        let frame = Rect::from_parts(Point::default(), registration.size);
        if !frame.contains_rect(registration.handle) {
            debug!(window = ?registration.id, "drag handle lies outside the frame");
            return false;
        }
        let z_index = self.next_z_index();
        self.windows.push(WindowRecord {
            id: registration.id,
            size: registration.size,
            layout: registration.layout,
            handle: registration.handle,
            z_index,
            visible: registration.visible,
            maximized: false,
            restore: None,
            dragging: false,
            snap_to_center_on_release: registration.snap_to_center_on_release,
            maximize: registration.maximize,
        });
        true
    }

    /// Drops a window from management, releasing the drag lock if it held it.
    pub fn unregister(&mut self, id: PanelId) -> Option<WindowRecord> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        if self.dragging_window() == Some(id) {
            self.drag = None;
        }
        Some(self.windows.remove(index))
    }

    pub fn show(&mut self, id: PanelId) -> bool {
        let Some(window) = self.find_mut(id) else {
            return false;
        };
        window.visible = true;
        self.bring_to_front(id);
        true
    }

    pub fn hide(&mut self, id: PanelId) -> bool {
        if self.dragging_window() == Some(id) {
            self.drag = None;
        }
        let Some(window) = self.find_mut(id) else {
            return false;
        };
        window.visible = false;
        window.dragging = false;
        true
    }

    /// Returns whether `pointer` lands on the window's drag handle.
    pub fn handle_contains(&self, id: PanelId, pointer: Point, viewport: Size) -> bool {
        self.get(id)
            .map(|w| w.visible && w.handle_rect(viewport).contains(pointer))
            .unwrap_or(false)
    }

    /// Starts dragging `id` from `pointer`.
    ///
    /// Ignored while another drag holds the lock, for hidden or unknown windows, and for presses
    /// outside the drag handle. On success the window is raised and switched to free layout at
    /// its current on-screen position.
    pub fn begin_drag(&mut self, id: PanelId, pointer: Point, viewport: Size) -> bool {
        if let Some(active) = self.dragging_window() {
            debug!(window = ?id, ?active, "drag already in progress");
            return false;
        }
        if !self.handle_contains(id, pointer, viewport) {
            return false;
        }
        let Some(window) = self.find_mut(id) else {
            return false;
        };
        let frame = window.resolved_rect(viewport);
        window.layout = LayoutMode::Free {
            x: frame.x,
            y: frame.y,
        };
        window.dragging = true;
        self.drag = Some(DragSession {
            window: id,
            grab_offset: pointer.delta(frame.origin()),
        });
        self.bring_to_front(id);
        true
    }

    /// Moves the dragged window so the grab point follows `pointer`, clamped to the viewport.
    pub fn continue_drag(&mut self, pointer: Point, viewport: Size) -> Option<PanelId> {
        let session = self.drag?;
        let taskbar_reserve = self.limits.taskbar_reserve;
        let Some(window) = self.find_mut(session.window) else {
            self.drag = None;
            return None;
        };
        let target = pointer.delta(session.grab_offset);
        window.layout = LayoutMode::Free {
            x: clamp_axis(target.x, 0, viewport.w - window.size.w),
            y: clamp_axis(target.y, 0, viewport.h - taskbar_reserve),
        };
        Some(session.window)
    }

    /// Releases the drag lock. Snap-to-center windows return to centered layout.
    pub fn end_drag(&mut self) -> Option<PanelId> {
        let session = self.drag.take()?;
        let window = self.find_mut(session.window)?;
        window.dragging = false;
        if window.snap_to_center_on_release {
            window.layout = LayoutMode::Centered;
        }
        Some(session.window)
    }

    /// Raises `id` to `max(floor, every z-index) + step`.
    pub fn bring_to_front(&mut self, id: PanelId) -> Option<i32> {
        if !self.is_registered(id) {
            return None;
        }
        let z_index = self.next_z_index();
        let window = self.find_mut(id)?;
        window.z_index = z_index;
        Some(z_index)
    }

    /// Swaps between the remembered rectangle and the viewport-derived maximized rectangle.
    ///
    /// Returns the new maximized flag.
    pub fn toggle_maximize(&mut self, id: PanelId, viewport: Size) -> Option<bool> {
        let window = self.find_mut(id)?;
        if window.maximized {
            if let Some(restore) = window.restore.take() {
                window.resize(restore.size);
                window.layout = restore.layout;
            }
            window.maximized = false;
        } else {
            if window.restore.is_none() {
                window.restore = Some(RestoreState {
                    size: window.size,
                    layout: window.layout,
                });
            }
            let (layout, size) = window.maximize.resolve(viewport);
            window.layout = layout;
            window.resize(size);
            window.maximized = true;
        }
        Some(window.maximized)
    }

    fn next_z_index(&self) -> i32 {
        let max = self
            .windows
            .iter()
            .map(|w| w.z_index)
            .fold(self.limits.z_index_floor, i32::max);
        max + self.limits.z_index_step
    }

    fn find_mut(&mut self, id: PanelId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }
}
