//! Compile-time descriptors for every panel and gallery context.

use platform_host::Size;

use crate::model::{GalleryContext, LayoutMode, MaximizeGeometry, PanelId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDescriptor {
    pub id: PanelId,
    pub dom_id: &'static str,
    pub title: &'static str,
    pub icon_image: &'static str,
    /// Synthesized on demand rather than present in the page from the start.
    pub overlay: bool,
    pub initially_visible: bool,
    /// Can be turned into a window-shortcut icon directly.
    pub pinnable: bool,
    pub snap_to_center_on_release: bool,
    /// Hidden by Escape along with the other modal panels.
    pub dismissed_by_escape: bool,
    pub default_size: Size,
    pub default_layout: LayoutMode,
    pub maximize: MaximizeGeometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryDescriptor {
    pub context: GalleryContext,
    pub slug: &'static str,
    pub title: &'static str,
    pub icon_image: &'static str,
    pub can_set_wallpaper: bool,
}

const INSET_MAXIMIZE: MaximizeGeometry = MaximizeGeometry::Inset {
    margin: 20,
    bottom_reserve: 100,
};

const XP_MAXIMIZE: MaximizeGeometry = MaximizeGeometry::Fraction {
    width_pct: 90,
    height_pct: 90,
};

static PANEL_REGISTRY: [PanelDescriptor; 7] = [
    PanelDescriptor {
        id: PanelId::Navigation,
        dom_id: "navWindow",
        title: "Navigation.exe",
        icon_image: "assets/navigation.ico",
        overlay: false,
        initially_visible: true,
        pinnable: true,
        snap_to_center_on_release: false,
        dismissed_by_escape: false,
        default_size: Size::new(500, 420),
        default_layout: LayoutMode::Free { x: 50, y: 50 },
        maximize: INSET_MAXIMIZE,
    },
    PanelDescriptor {
        id: PanelId::Hero,
        dom_id: "heroWindow",
        title: "Portfolio.exe",
        icon_image: "assets/portfolio.ico",
        overlay: false,
        initially_visible: true,
        pinnable: true,
        snap_to_center_on_release: false,
        dismissed_by_escape: false,
        default_size: Size::new(600, 460),
        default_layout: LayoutMode::Free { x: 120, y: 80 },
        maximize: INSET_MAXIMIZE,
    },
    PanelDescriptor {
        id: PanelId::About,
        dom_id: "aboutPopup",
        title: "About Me.txt",
        icon_image: "assets/folder.ico",
        overlay: false,
        initially_visible: false,
        pinnable: true,
        snap_to_center_on_release: true,
        dismissed_by_escape: true,
        default_size: Size::new(520, 420),
        default_layout: LayoutMode::Centered,
        maximize: XP_MAXIMIZE,
    },
    PanelDescriptor {
        id: PanelId::Skills,
        dom_id: "skillsPanel",
        title: "Skills Config",
        icon_image: "assets/gear.ico",
        overlay: false,
        initially_visible: false,
        pinnable: true,
        snap_to_center_on_release: true,
        dismissed_by_escape: true,
        default_size: Size::new(560, 440),
        default_layout: LayoutMode::Centered,
        maximize: XP_MAXIMIZE,
    },
    PanelDescriptor {
        id: PanelId::Activities,
        dom_id: "activitiesWindow",
        title: "activities.exe",
        icon_image: "assets/activities.ico",
        overlay: false,
        initially_visible: false,
        pinnable: true,
        snap_to_center_on_release: false,
        dismissed_by_escape: true,
        default_size: Size::new(720, 520),
        default_layout: LayoutMode::Centered,
        maximize: MaximizeGeometry::Fraction {
            width_pct: 95,
            height_pct: 90,
        },
    },
    PanelDescriptor {
        id: PanelId::MediaPlayer,
        dom_id: "xpVideoPlayer",
        title: "Windows Media Player",
        icon_image: "assets/video.ico",
        overlay: true,
        initially_visible: false,
        pinnable: true,
        snap_to_center_on_release: true,
        dismissed_by_escape: true,
        default_size: Size::new(800, 600),
        default_layout: LayoutMode::Centered,
        maximize: XP_MAXIMIZE,
    },
    PanelDescriptor {
        id: PanelId::ImageViewer,
        dom_id: "xpImageViewer",
        title: "Image Viewer",
        icon_image: "assets/photography.ico",
        overlay: true,
        initially_visible: false,
        pinnable: false,
        snap_to_center_on_release: true,
        dismissed_by_escape: true,
        default_size: Size::new(800, 600),
        default_layout: LayoutMode::Centered,
        maximize: XP_MAXIMIZE,
    },
];

static GALLERY_REGISTRY: [GalleryDescriptor; 5] = [
    GalleryDescriptor {
        context: GalleryContext::Moodboards,
        slug: "moodboards",
        title: "Moodboards Viewer",
        icon_image: "assets/moodboard.ico",
        can_set_wallpaper: false,
    },
    GalleryDescriptor {
        context: GalleryContext::Styling,
        slug: "styling",
        title: "Styling Viewer",
        icon_image: "assets/styling.ico",
        can_set_wallpaper: false,
    },
    GalleryDescriptor {
        context: GalleryContext::Stage,
        slug: "stage",
        title: "Stage Setup Viewer",
        icon_image: "assets/stage.ico",
        can_set_wallpaper: false,
    },
    GalleryDescriptor {
        context: GalleryContext::Editing,
        slug: "editing",
        title: "Editing Suite Viewer",
        icon_image: "assets/editing.ico",
        can_set_wallpaper: false,
    },
    GalleryDescriptor {
        context: GalleryContext::Photography,
        slug: "photography",
        title: "Photography Viewer",
        icon_image: "assets/photography.ico",
        can_set_wallpaper: true,
    },
];

pub fn panel_registry() -> &'static [PanelDescriptor] {
    &PANEL_REGISTRY
}

pub fn panel_descriptor(id: PanelId) -> &'static PanelDescriptor {
    let index = match id {
        PanelId::Navigation => 0,
        PanelId::Hero => 1,
        PanelId::About => 2,
        PanelId::Skills => 3,
        PanelId::Activities => 4,
        PanelId::MediaPlayer => 5,
        PanelId::ImageViewer => 6,
    };
    &PANEL_REGISTRY[index]
}

pub fn gallery_descriptor(context: GalleryContext) -> &'static GalleryDescriptor {
    let index = match context {
        GalleryContext::Moodboards => 0,
        GalleryContext::Styling => 1,
        GalleryContext::Stage => 2,
        GalleryContext::Editing => 3,
        GalleryContext::Photography => 4,
    };
    &GALLERY_REGISTRY[index]
}

/// Panels present in the page from the start, in registration order.
pub fn static_panels() -> impl Iterator<Item = &'static PanelDescriptor> {
    PANEL_REGISTRY.iter().filter(|panel| !panel.overlay)
}
