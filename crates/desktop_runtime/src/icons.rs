//! Desktop shortcut registry: placement, selection, click/drag disambiguation, deletion, and
//! grid reflow.

use platform_host::{geometry::clamp_axis, Point, RandomSource, Size};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{IconDragConfig, IconGridConfig, IconPlacementConfig};
use crate::model::{
    DesktopIcon, IconDragSession, IconGesture, IconId, IconKind, IconPhase, IconSpec, IconTarget,
};

/// A request the user made that cannot proceed. The display text is the notice shown to them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("{title} is already on the desktop!")]
    DuplicateIcon { title: String },
    #[error("Select an icon first!")]
    NothingSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LastClick {
    icon: IconId,
    at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesktopIconRegistry {
    placement: IconPlacementConfig,
    drag_limits: IconDragConfig,
    icons: Vec<DesktopIcon>,
    drag: Option<IconDragSession>,
    last_click: Option<LastClick>,
}

impl DesktopIconRegistry {
    pub fn new(placement: IconPlacementConfig, drag_limits: IconDragConfig) -> Self {
        Self {
            placement,
            drag_limits,
            ..Self::default()
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn get(&self, id: &IconId) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| &icon.id == id)
    }

    pub fn icon_for_target(&self, target: &IconTarget) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| &icon.target == target)
    }

    pub fn selected_icon(&self) -> Option<&DesktopIcon> {
        self.icons.iter().find(|icon| icon.selected)
    }

    pub fn dragging_icon(&self) -> Option<&IconId> {
        self.drag.as_ref().map(|session| &session.icon)
    }

    /// Places a new shortcut at a random spot whose footprint stays inside the desktop.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::DuplicateIcon`] without touching the registry when an icon already
    /// reopens the same target.
    pub fn add_icon(
        &mut self,
        spec: IconSpec,
        desktop: Size,
        random: &dyn RandomSource,
        issued_at_ms: u64,
    ) -> Result<IconId, Rejection> {
        if self.icon_for_target(&spec.target).is_some() {
            return Err(Rejection::DuplicateIcon { title: spec.title });
        }

        let id = IconId(format!(
            "{}_{}_{issued_at_ms}",
            id_prefix(spec.target.kind()),
            spec.target.reference_key()
        ));
        let margin = self.placement.margin;
        let span_x = (desktop.w - self.placement.reserve_x - margin).max(0);
        let span_y = (desktop.h - self.placement.reserve_y - margin).max(0);
        let position = Point::new(
            margin + scaled(random.next_unit(), span_x),
            margin + scaled(random.next_unit(), span_y),
        );

        info!(icon = %id, ?position, "desktop icon added");
        self.icons.push(DesktopIcon {
            id: id.clone(),
            title: spec.title,
            image: spec.image,
            target: spec.target,
            position,
            selected: false,
            phase: IconPhase::Idle,
        });
        Ok(id)
    }

    /// Selects `id` and clears every other selection. Icons being deleted cannot be selected.
    pub fn select(&mut self, id: &IconId) -> bool {
        if !self.get(id).is_some_and(|icon| !icon.is_deleting()) {
            return false;
        }
        for icon in &mut self.icons {
            icon.selected = &icon.id == id;
        }
        true
    }

    pub fn deselect_all(&mut self) -> bool {
        let mut changed = false;
        for icon in self.icons.iter_mut().filter(|icon| icon.selected) {
            icon.selected = false;
            changed = true;
        }
        changed
    }

    pub fn begin_icon_drag(&mut self, id: &IconId, pointer: Point) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(icon) = self.get(id).filter(|icon| !icon.is_deleting()) else {
            return false;
        };
        self.drag = Some(IconDragSession {
            icon: id.clone(),
            pointer_start: pointer,
            origin: icon.position,
            moved: false,
        });
        true
    }

    /// Follows the pointer once it has moved past the drag threshold on either axis.
    ///
    /// Returns the icon whose position changed.
    pub fn continue_icon_drag(&mut self, pointer: Point, desktop: Size) -> Option<IconId> {
        let limits = self.drag_limits;
        let session = self.drag.as_mut()?;
        let delta = pointer.delta(session.pointer_start);
        if !session.moved
            && delta.x.abs() <= limits.threshold_px
            && delta.y.abs() <= limits.threshold_px
        {
            return None;
        }
        session.moved = true;
        let position = Point::new(
            clamp_axis(
                session.origin.x + delta.x,
                limits.edge_margin,
                desktop.w - limits.far_reserve,
            ),
            clamp_axis(
                session.origin.y + delta.y,
                limits.edge_margin,
                desktop.h - limits.far_reserve,
            ),
        );
        let id = session.icon.clone();
        match self.icons.iter_mut().find(|icon| icon.id == id) {
            Some(icon) if !icon.is_deleting() => {
                icon.position = position;
                Some(id)
            }
            _ => {
                self.drag = None;
                None
            }
        }
    }

    /// Finishes a press on an icon.
    ///
    /// A press that never crossed the drag threshold counts as a click: it selects the icon, and
    /// a second click on the same icon within `double_click_ms` activates it.
    pub fn end_icon_drag(&mut self, now_ms: u64, double_click_ms: u64) -> IconGesture {
        let Some(session) = self.drag.take() else {
            return IconGesture::Ignored;
        };
        if session.moved {
            self.last_click = None;
            return IconGesture::Dragged(session.icon);
        }
        if !self.select(&session.icon) {
            return IconGesture::Ignored;
        }
        let is_double = self.last_click.as_ref().is_some_and(|last| {
            last.icon == session.icon && now_ms.saturating_sub(last.at_ms) <= double_click_ms
        });
        if is_double {
            self.last_click = None;
            IconGesture::Activated(session.icon)
        } else {
            self.last_click = Some(LastClick {
                icon: session.icon.clone(),
                at_ms: now_ms,
            });
            IconGesture::Selected(session.icon)
        }
    }

    /// Marks `id` as deleting and returns its title.
    ///
    /// Returns `None` for unknown icons and for icons whose deletion is already under way.
    pub fn request_delete(&mut self, id: &IconId) -> Option<String> {
        let icon = self.icons.iter_mut().find(|icon| &icon.id == id)?;
        if icon.is_deleting() {
            debug!(icon = %id, "deletion already pending");
            return None;
        }
        icon.phase = IconPhase::Deleting;
        icon.selected = false;
        let title = icon.title.clone();
        if self.dragging_icon() == Some(id) {
            self.drag = None;
        }
        Some(title)
    }

    /// Removes an icon whose deletion timer fired. Absent icons are ignored.
    pub fn finalize_delete(&mut self, id: &IconId) -> Option<DesktopIcon> {
        let index = self.icons.iter().position(|icon| &icon.id == id)?;
        if self.last_click.as_ref().is_some_and(|last| &last.icon == id) {
            self.last_click = None;
        }
        let removed = self.icons.remove(index);
        info!(icon = %id, "desktop icon removed");
        Some(removed)
    }

    /// Text payload carried by a drag-and-drop of `id`.
    pub fn drag_payload(&self, id: &IconId) -> Option<String> {
        self.get(id).map(|icon| icon.id.0.clone())
    }

    /// Resolves a drag-and-drop payload back to a registered icon.
    pub fn resolve_payload(&self, payload: &str) -> Option<IconId> {
        self.icons
            .iter()
            .find(|icon| icon.id.as_str() == payload.trim())
            .map(|icon| icon.id.clone())
    }

    /// Lays icons out left-to-right, top-to-bottom in registry order.
    pub fn reflow(&mut self, desktop_width: i32, grid: IconGridConfig) {
        let pitch_x = grid.cell_width + grid.gutter;
        let pitch_y = grid.cell_height + grid.gutter;
        let per_row = usize::try_from(desktop_width / pitch_x.max(1))
            .unwrap_or(0)
            .max(1);
        for (index, icon) in self.icons.iter_mut().enumerate() {
            let row = (index / per_row) as i32;
            let col = (index % per_row) as i32;
            icon.position = Point::new(grid.origin + col * pitch_x, grid.origin + row * pitch_y);
        }
    }
}

fn id_prefix(kind: IconKind) -> &'static str {
    match kind {
        IconKind::WindowShortcut => "desktop_icon",
        IconKind::ImageViewerShortcut => "image_viewer",
        IconKind::Generic => "shortcut",
    }
}

fn scaled(unit: f64, span: i32) -> i32 {
    ((unit.clamp(0.0, 1.0) * f64::from(span)).round() as i32).min(span)
}

#[cfg(test)]
mod tests {
    use platform_host::SequenceRandom;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{GalleryContext, PanelId};

    const DESKTOP: Size = Size::new(1000, 800);

    fn registry() -> DesktopIconRegistry {
        DesktopIconRegistry::new(IconPlacementConfig::default(), IconDragConfig::default())
    }

    fn add(registry: &mut DesktopIconRegistry, panel: PanelId, at: u64) -> IconId {
        registry
            .add_icon(
                IconSpec::for_panel(panel).expect("pinnable"),
                DESKTOP,
                &SequenceRandom::new(vec![0.5]),
                at,
            )
            .expect("added")
    }

    #[test]
    fn placement_spans_the_footprint_safe_area() {
        let mut registry = registry();
        let low = SequenceRandom::new(vec![0.0]);
        let high = SequenceRandom::new(vec![0.999_999]);
        let a = registry
            .add_icon(IconSpec::for_panel(PanelId::About).unwrap(), DESKTOP, &low, 1)
            .unwrap();
        let b = registry
            .add_icon(IconSpec::for_panel(PanelId::Skills).unwrap(), DESKTOP, &high, 2)
            .unwrap();
        assert_eq!(registry.get(&a).unwrap().position, Point::new(20, 20));
        assert_eq!(registry.get(&b).unwrap().position, Point::new(820, 660));
    }

    #[test]
    fn ids_encode_kind_reference_and_timestamp() {
        let mut registry = registry();
        let window = add(&mut registry, PanelId::MediaPlayer, 42);
        let gallery = registry
            .add_icon(
                IconSpec::for_gallery(GalleryContext::Styling),
                DESKTOP,
                &SequenceRandom::new(vec![0.1]),
                43,
            )
            .unwrap();
        assert_eq!(window.as_str(), "desktop_icon_xpVideoPlayer_42");
        assert_eq!(gallery.as_str(), "image_viewer_styling_43");
    }

    #[test]
    fn duplicate_target_is_rejected_without_mutation() {
        let mut registry = registry();
        add(&mut registry, PanelId::MediaPlayer, 1);
        let before = registry.clone();
        let err = registry
            .add_icon(
                IconSpec::for_panel(PanelId::MediaPlayer).unwrap(),
                DESKTOP,
                &SequenceRandom::new(vec![0.3]),
                2,
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Windows Media Player is already on the desktop!"
        );
        assert_eq!(registry, before);
    }

    #[test]
    fn selecting_clears_every_other_icon() {
        let mut registry = registry();
        let a = add(&mut registry, PanelId::About, 1);
        let b = add(&mut registry, PanelId::Skills, 2);
        assert!(registry.select(&a));
        assert!(registry.select(&b));
        let selected: Vec<&IconId> = registry
            .icons()
            .iter()
            .filter(|icon| icon.selected)
            .map(|icon| &icon.id)
            .collect();
        assert_eq!(selected, vec![&b]);
        assert!(registry.deselect_all());
        assert!(registry.selected_icon().is_none());
        assert!(!registry.select(&IconId("missing".into())));
    }

    #[test]
    fn small_moves_stay_a_click_and_large_moves_drag_with_clamping() {
        let mut registry = registry();
        let id = add(&mut registry, PanelId::About, 1);
        let origin = registry.get(&id).unwrap().position;

        assert!(registry.begin_icon_drag(&id, Point::new(100, 100)));
        assert_eq!(
            registry.continue_icon_drag(Point::new(105, 95), DESKTOP),
            None
        );
        assert_eq!(registry.get(&id).unwrap().position, origin);
        assert_eq!(
            registry.end_icon_drag(0, 500),
            IconGesture::Selected(id.clone())
        );

        assert!(registry.begin_icon_drag(&id, Point::new(100, 100)));
        assert_eq!(
            registry.continue_icon_drag(Point::new(106, 100), DESKTOP),
            Some(id.clone())
        );
        assert_eq!(
            registry.get(&id).unwrap().position,
            Point::new(origin.x + 6, origin.y)
        );
        registry.continue_icon_drag(Point::new(-5_000, 9_000), DESKTOP);
        assert_eq!(registry.get(&id).unwrap().position, Point::new(10, 720));
        assert_eq!(
            registry.end_icon_drag(10_000, 500),
            IconGesture::Dragged(id)
        );
    }

    #[test]
    fn second_click_within_window_activates() {
        let mut registry = registry();
        let id = add(&mut registry, PanelId::About, 1);

        registry.begin_icon_drag(&id, Point::new(10, 10));
        assert_eq!(
            registry.end_icon_drag(1_000, 500),
            IconGesture::Selected(id.clone())
        );
        registry.begin_icon_drag(&id, Point::new(10, 10));
        assert_eq!(
            registry.end_icon_drag(1_400, 500),
            IconGesture::Activated(id.clone())
        );
        registry.begin_icon_drag(&id, Point::new(10, 10));
        assert_eq!(
            registry.end_icon_drag(3_000, 500),
            IconGesture::Selected(id)
        );
    }

    #[test]
    fn slow_second_click_only_selects() {
        let mut registry = registry();
        let id = add(&mut registry, PanelId::About, 1);
        registry.begin_icon_drag(&id, Point::new(10, 10));
        registry.end_icon_drag(1_000, 500);
        registry.begin_icon_drag(&id, Point::new(10, 10));
        assert_eq!(
            registry.end_icon_drag(1_501, 500),
            IconGesture::Selected(id)
        );
    }

    #[test]
    fn delete_request_is_idempotent_until_finalized() {
        let mut registry = registry();
        let id = add(&mut registry, PanelId::About, 1);
        registry.select(&id);

        assert_eq!(registry.request_delete(&id), Some("About Me.txt".to_string()));
        assert_eq!(registry.request_delete(&id), None);
        assert!(registry.selected_icon().is_none());
        assert!(!registry.select(&id));
        assert!(!registry.begin_icon_drag(&id, Point::new(0, 0)));
        assert_eq!(registry.len(), 1);

        assert!(registry.finalize_delete(&id).is_some());
        assert!(registry.finalize_delete(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn payload_round_trips_to_the_same_icon() {
        let mut registry = registry();
        let id = add(&mut registry, PanelId::Hero, 7);
        let payload = registry.drag_payload(&id).unwrap();
        assert_eq!(registry.resolve_payload(&payload), Some(id));
        assert_eq!(registry.resolve_payload("desktop_icon_nope_1"), None);
    }

    #[test]
    fn reflow_fills_rows_by_desktop_width() {
        let mut registry = registry();
        let ids: Vec<IconId> = [
            PanelId::Navigation,
            PanelId::Hero,
            PanelId::About,
            PanelId::Skills,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, panel)| add(&mut registry, panel, i as u64))
        .collect();

        registry.reflow(350, IconGridConfig::default());
        let positions: Vec<Point> = ids
            .iter()
            .map(|id| registry.get(id).unwrap().position)
            .collect();
        assert_eq!(
            positions,
            vec![
                Point::new(20, 20),
                Point::new(120, 20),
                Point::new(220, 20),
                Point::new(20, 110),
            ]
        );
    }

    #[test]
    fn reflow_on_a_narrow_desktop_uses_one_column() {
        let mut registry = registry();
        let a = add(&mut registry, PanelId::Navigation, 1);
        let b = add(&mut registry, PanelId::Hero, 2);
        registry.reflow(40, IconGridConfig::default());
        assert_eq!(registry.get(&a).unwrap().position, Point::new(20, 20));
        assert_eq!(registry.get(&b).unwrap().position, Point::new(20, 110));
    }
}
