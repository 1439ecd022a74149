use std::{cell::Cell, rc::Rc};

use desktop_runtime::{
    ContextAction, DesktopAction, DesktopConfig, DesktopRuntime, GalleryContext, HitTarget,
    IconId, IconSpec, IconTarget, InputEvent, Key, LayoutMode, PanelId, PointerButton,
};
use platform_host::{
    MemoryHost, MemorySurface, Point, SequenceRandom, Size, SoundCue, WindowPlacement,
};
use pretty_assertions::assert_eq;

const VIEWPORT: Size = Size::new(1200, 800);

fn memory_host(desktop: Size) -> MemoryHost {
    MemoryHost::new(
        MemorySurface::with_desktop(VIEWPORT, desktop)
            .with_frame("navWindow", Size::new(500, 420))
            .with_frame("heroWindow", Size::new(600, 460))
            .with_frame("aboutPopup", Size::new(520, 420))
            .with_frame("skillsPanel", Size::new(560, 440)),
    )
}

fn booted(host: &MemoryHost, random: Vec<f64>) -> DesktopRuntime {
    let mut runtime = DesktopRuntime::new(
        DesktopConfig::default(),
        host.services(Rc::new(SequenceRandom::new(random))),
    );
    runtime.boot();
    runtime
}

fn press(runtime: &mut DesktopRuntime, target: HitTarget, pointer: Point) {
    runtime.handle_input(InputEvent::PointerDown {
        target,
        pointer,
        button: PointerButton::Primary,
    });
}

fn icon_for(runtime: &DesktopRuntime, target: IconTarget) -> IconId {
    runtime
        .state()
        .icons
        .icon_for_target(&target)
        .expect("icon on desktop")
        .id
        .clone()
}

fn z(runtime: &DesktopRuntime, panel: PanelId) -> i32 {
    runtime.state().windows.get(panel).expect("registered").z_index
}

#[test]
fn boot_registers_only_frames_present_on_the_page() {
    let host = memory_host(VIEWPORT);
    let runtime = booted(&host, vec![0.5]);
    let registered: Vec<PanelId> = runtime
        .state()
        .windows
        .windows()
        .iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(
        registered,
        vec![
            PanelId::Navigation,
            PanelId::Hero,
            PanelId::About,
            PanelId::Skills
        ]
    );
    assert!(host.surface.window("navWindow").expect("projected").visible);
    assert!(!host.surface.window("aboutPopup").expect("projected").visible);
}

#[test]
fn front_most_window_always_outranks_every_other() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);

    for panel in [
        PanelId::Navigation,
        PanelId::Hero,
        PanelId::Navigation,
        PanelId::Hero,
        PanelId::Hero,
    ] {
        let previous_max = runtime
            .state()
            .windows
            .windows()
            .iter()
            .map(|w| w.z_index)
            .max()
            .unwrap_or(1_000);
        runtime.dispatch(DesktopAction::FocusPanel { panel });
        assert_eq!(z(&runtime, panel), previous_max + 10);
        for other in runtime.state().windows.windows() {
            if other.id != panel {
                assert!(other.z_index < z(&runtime, panel));
            }
        }
    }
}

#[test]
fn two_windows_alternating_in_front_step_by_ten() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);

    runtime.dispatch(DesktopAction::FocusPanel {
        panel: PanelId::Navigation,
    });
    runtime.dispatch(DesktopAction::FocusPanel {
        panel: PanelId::Hero,
    });
    let b = z(&runtime, PanelId::Hero);
    assert!(b > z(&runtime, PanelId::Navigation));

    runtime.dispatch(DesktopAction::FocusPanel {
        panel: PanelId::Navigation,
    });
    let a = z(&runtime, PanelId::Navigation);
    assert!(a > b);
    assert_eq!(a - b, 10);
    assert_eq!(host.surface.window("navWindow").expect("projected").z_index, a);
}

#[test]
fn second_drag_is_ignored_while_one_is_active() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);

    press(
        &mut runtime,
        HitTarget::Window(PanelId::Navigation),
        Point::new(60, 60),
    );
    let hero_before = runtime.state().windows.get(PanelId::Hero).cloned();
    press(
        &mut runtime,
        HitTarget::Window(PanelId::Hero),
        Point::new(130, 90),
    );

    assert_eq!(
        runtime.state().windows.dragging_window(),
        Some(PanelId::Navigation)
    );
    assert_eq!(runtime.state().windows.get(PanelId::Hero).cloned(), hero_before);
    let dragging: Vec<PanelId> = runtime
        .state()
        .windows
        .windows()
        .iter()
        .filter(|w| w.dragging)
        .map(|w| w.id)
        .collect();
    assert_eq!(dragging, vec![PanelId::Navigation]);
}

#[test]
fn dragged_window_never_leaves_the_clamped_area() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    press(
        &mut runtime,
        HitTarget::Window(PanelId::Navigation),
        Point::new(60, 60),
    );

    for x in (-2_000..=4_000).step_by(250) {
        for y in (-2_000..=4_000).step_by(250) {
            runtime.handle_input(InputEvent::PointerMove {
                pointer: Point::new(x, y),
            });
            let rect = runtime
                .state()
                .windows
                .resolved_rect(PanelId::Navigation, VIEWPORT)
                .expect("registered");
            assert!((0..=700).contains(&rect.x), "x out of bounds: {rect:?}");
            assert!((0..=700).contains(&rect.y), "y out of bounds: {rect:?}");
        }
    }

    runtime.handle_input(InputEvent::PointerUp {
        pointer: Point::new(4_000, 4_000),
    });
    assert_eq!(runtime.state().windows.dragging_window(), None);
    assert_eq!(
        host.surface.window("navWindow").expect("projected").placement,
        WindowPlacement::Free(Point::new(700, 700))
    );
}

#[test]
fn snap_to_center_windows_spring_back_wherever_they_are_dropped() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);

    for drop_at in [Point::new(0, 0), Point::new(900, 50), Point::new(5_000, 5_000)] {
        runtime.dispatch(DesktopAction::OpenPanel {
            panel: PanelId::About,
        });
        press(
            &mut runtime,
            HitTarget::Window(PanelId::About),
            Point::new(350, 200),
        );
        assert!(runtime.state().windows.get(PanelId::About).expect("registered").dragging);
        runtime.handle_input(InputEvent::PointerMove { pointer: drop_at });
        runtime.handle_input(InputEvent::PointerUp { pointer: drop_at });

        assert_eq!(
            runtime.state().windows.get(PanelId::About).expect("registered").layout,
            LayoutMode::Centered
        );
        let style = host.surface.window("aboutPopup").expect("projected");
        assert_eq!(style.placement, WindowPlacement::Centered);
        assert!(!style.dragging);
    }
}

#[test]
fn media_icon_scenario_on_a_1000_by_800_desktop() {
    let host = memory_host(Size::new(1_000, 800));
    let mut runtime = booted(&host, vec![0.37, 0.81]);
    let media = || IconSpec::for_panel(PanelId::MediaPlayer).expect("pinnable");

    runtime.dispatch(DesktopAction::AddIcon(media()));
    let icon = icon_for(&runtime, IconTarget::Window(PanelId::MediaPlayer));
    let position = runtime.state().icons.get(&icon).expect("present").position;
    assert!((20..=820).contains(&position.x));
    assert!((20..=660).contains(&position.y));

    runtime.dispatch(DesktopAction::AddIcon(media()));
    assert_eq!(runtime.state().icons.len(), 1);
    assert_eq!(
        host.toasts.count_containing("is already on the desktop!"),
        1
    );

    runtime.dispatch(DesktopAction::RequestDeleteIcon { icon: icon.clone() });
    assert_eq!(runtime.state().icons.len(), 1);
    host.clock.advance(800);
    runtime.tick();
    assert!(runtime.state().icons.is_empty());
    assert_eq!(host.surface.icon_count(), 0);
    assert_eq!(
        host.toasts.messages().last().map(String::as_str),
        Some("Windows Media Player deleted!")
    );
}

#[test]
fn repeated_delete_requests_run_one_sequence() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.2, 0.4]);
    runtime.dispatch(DesktopAction::AddIcon(
        IconSpec::for_panel(PanelId::About).expect("pinnable"),
    ));
    let icon = icon_for(&runtime, IconTarget::Window(PanelId::About));
    runtime.dispatch(DesktopAction::SelectIcon { icon: icon.clone() });
    let clicks_before = host.sounds.count(SoundCue::Click);

    runtime.handle_input(InputEvent::KeyDown(Key::Delete));
    runtime.handle_input(InputEvent::KeyDown(Key::Delete));
    runtime.handle_input(InputEvent::DropOnTrash {
        payload: icon.as_str().to_string(),
    });
    runtime.dispatch(DesktopAction::RequestDeleteIcon { icon: icon.clone() });

    assert_eq!(host.sounds.count(SoundCue::Click), clicks_before + 1);
    assert_eq!(host.scheduler.requested(), vec![300, 800]);
    assert!(host.surface.icon(icon.as_str()).expect("still shown").deleting);

    host.clock.advance(300);
    assert_eq!(runtime.tick(), 1);
    assert_eq!(host.sounds.count(SoundCue::Delete), 1);
    assert_eq!(runtime.state().icons.len(), 1);

    host.clock.advance(500);
    assert_eq!(runtime.tick(), 1);
    assert_eq!(runtime.tick(), 0);
    assert!(runtime.state().icons.is_empty());
    assert_eq!(host.toasts.count_containing("deleted!"), 1);
    assert_eq!(runtime.next_deadline(), None);
}

#[test]
fn trash_click_needs_a_selection() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    press(&mut runtime, HitTarget::Trash, Point::new(1_150, 700));
    assert_eq!(host.toasts.messages(), vec!["Select an icon first!".to_string()]);
    assert_eq!(host.sounds.count(SoundCue::Error), 1);
}

#[test]
fn at_most_one_icon_is_ever_selected() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.1, 0.9, 0.5]);
    for panel in [PanelId::Navigation, PanelId::Hero, PanelId::Skills] {
        runtime.dispatch(DesktopAction::AddIcon(
            IconSpec::for_panel(panel).expect("pinnable"),
        ));
    }
    let ids: Vec<IconId> = runtime
        .state()
        .icons
        .icons()
        .iter()
        .map(|icon| icon.id.clone())
        .collect();

    let picks = [0, 2, 2, 1, 0, 1, 2];
    for (step, pick) in picks.into_iter().enumerate() {
        if step == 4 {
            press(&mut runtime, HitTarget::Desktop, Point::new(900, 600));
            assert!(runtime.state().icons.selected_icon().is_none());
        }
        runtime.dispatch(DesktopAction::SelectIcon {
            icon: ids[pick].clone(),
        });
        let selected = runtime
            .state()
            .icons
            .icons()
            .iter()
            .filter(|icon| icon.selected)
            .count();
        assert_eq!(selected, 1);
        assert_eq!(
            runtime.state().icons.selected_icon().map(|icon| &icon.id),
            Some(&ids[pick])
        );
    }
}

#[test]
fn double_clicking_a_window_icon_opens_its_panel() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    runtime.dispatch(DesktopAction::AddIcon(
        IconSpec::for_panel(PanelId::Skills).expect("pinnable"),
    ));
    let icon = icon_for(&runtime, IconTarget::Window(PanelId::Skills));
    let at = runtime.state().icons.get(&icon).expect("present").position;

    for _ in 0..2 {
        press(&mut runtime, HitTarget::Icon(icon.clone()), at);
        runtime.handle_input(InputEvent::PointerUp { pointer: at });
        host.clock.advance(120);
    }

    assert!(runtime.state().windows.get(PanelId::Skills).expect("registered").visible);
    assert_eq!(runtime.state().windows.front_window(), Some(PanelId::Skills));
    assert!(host.surface.window("skillsPanel").expect("projected").visible);
}

#[test]
fn dragging_an_icon_moves_it_without_selecting() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    runtime.dispatch(DesktopAction::AddIcon(
        IconSpec::for_panel(PanelId::Hero).expect("pinnable"),
    ));
    let icon = icon_for(&runtime, IconTarget::Window(PanelId::Hero));
    let at = runtime.state().icons.get(&icon).expect("present").position;

    press(&mut runtime, HitTarget::Icon(icon.clone()), at);
    runtime.handle_input(InputEvent::PointerMove {
        pointer: Point::new(at.x + 40, at.y + 25),
    });
    runtime.handle_input(InputEvent::PointerUp {
        pointer: Point::new(at.x + 40, at.y + 25),
    });

    let moved = runtime.state().icons.get(&icon).expect("present");
    assert_eq!(moved.position, Point::new(at.x + 40, at.y + 25));
    assert!(!moved.selected);
    assert_eq!(
        host.surface.icon(icon.as_str()).expect("shown").position,
        moved.position
    );
}

#[test]
fn image_viewer_menu_pins_the_open_gallery() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    runtime.dispatch(DesktopAction::OpenGallery {
        context: GalleryContext::Photography,
    });
    runtime.handle_input(InputEvent::ContextMenu {
        target: HitTarget::Window(PanelId::ImageViewer),
        pointer: Point::new(1_190, 790),
    });
    assert_eq!(
        host.surface.context_menu().expect("menu shown").position,
        Point::new(970, 640)
    );

    runtime.handle_input(InputEvent::MenuChoice(ContextAction::AddToDesktop));

    assert!(host.surface.context_menu().is_none());
    let icon = icon_for(&runtime, IconTarget::Gallery(GalleryContext::Photography));
    assert!(icon.as_str().starts_with("image_viewer_photography_"));
    assert_eq!(
        host.toasts.messages().last().cloned(),
        Some(format!(
            "{} added to desktop!",
            GalleryContext::Photography.title()
        ))
    );
}

#[test]
fn generic_shortcuts_reach_their_feature_callback() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    let opened = Rc::new(Cell::new(0));
    let counter = opened.clone();
    runtime.on_shortcut("resume", move || counter.set(counter.get() + 1));

    runtime.dispatch(DesktopAction::AddIcon(IconSpec::generic(
        "resume",
        "Resume.pdf",
        "images/pdf.png",
    )));
    let icon = icon_for(&runtime, IconTarget::Generic("resume".into()));
    runtime.dispatch(DesktopAction::ActivateIcon { icon });

    assert_eq!(opened.get(), 1);
    assert_eq!(host.sounds.count(SoundCue::Startup), 2);
}

#[test]
fn escape_closes_menu_and_modal_panels_only() {
    let host = memory_host(VIEWPORT);
    let mut runtime = booted(&host, vec![0.5]);
    runtime.dispatch(DesktopAction::OpenPanel {
        panel: PanelId::About,
    });
    runtime.dispatch(DesktopAction::OpenPanel {
        panel: PanelId::MediaPlayer,
    });
    runtime.handle_input(InputEvent::ContextMenu {
        target: HitTarget::Desktop,
        pointer: Point::new(400, 300),
    });

    runtime.handle_input(InputEvent::KeyDown(Key::Escape));

    let windows = &runtime.state().windows;
    assert!(host.surface.context_menu().is_none());
    assert!(!windows.is_registered(PanelId::MediaPlayer));
    assert!(host.surface.window("xpVideoPlayer").is_none());
    assert!(!windows.get(PanelId::About).expect("about").visible);
    assert!(windows.get(PanelId::Navigation).expect("navigation").visible);
    assert!(windows.get(PanelId::Hero).expect("hero").visible);
}

#[test]
fn organize_lays_icons_on_the_grid() {
    let host = memory_host(Size::new(250, 600));
    let mut runtime = booted(&host, vec![0.9]);
    for panel in [PanelId::Navigation, PanelId::Hero, PanelId::About] {
        runtime.dispatch(DesktopAction::AddIcon(
            IconSpec::for_panel(panel).expect("pinnable"),
        ));
    }
    runtime.handle_input(InputEvent::ContextMenu {
        target: HitTarget::Desktop,
        pointer: Point::new(100, 100),
    });
    runtime.handle_input(InputEvent::MenuChoice(ContextAction::OrganizeIcons));

    let positions: Vec<Point> = runtime
        .state()
        .icons
        .icons()
        .iter()
        .map(|icon| icon.position)
        .collect();
    assert_eq!(
        positions,
        vec![Point::new(20, 20), Point::new(120, 20), Point::new(20, 110)]
    );
    assert_eq!(
        host.toasts.messages().last().map(String::as_str),
        Some("Desktop reorganized!")
    );
}
