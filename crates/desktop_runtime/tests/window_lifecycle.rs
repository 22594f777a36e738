use std::{rc::Rc, time::Duration};

use desktop_app_contract::{AppCategory, AppDescriptor, ApplicationId};
use desktop_runtime::{
    apps::{NotepadDocument, PlaceholderApp, NOTEPAD_STORAGE_KEY},
    DesktopConfig, DesktopRuntime, HitTarget, PointerInput, PointerPhase, PointerPosition,
    RegistryError, ResizeEdge, TouchPhase, WindowId, WindowRect,
};
use platform_host::{
    load_typed, save_typed, DisplayEnvironment, HostServices, KeyValueStore, ManualTimerHost,
    MemoryKeyValueStore,
};
use pretty_assertions::assert_eq;
use serde_json::json;

struct Harness {
    runtime: DesktopRuntime,
    store: Rc<MemoryKeyValueStore>,
    timers: ManualTimerHost,
}

fn harness() -> Harness {
    let store = Rc::new(MemoryKeyValueStore::default());
    let timers = ManualTimerHost::default();
    let services = HostServices::headless(
        store.clone(),
        Rc::new(timers.clone()),
        DisplayEnvironment::default(),
    );
    Harness {
        runtime: DesktopRuntime::with_builtin_apps(DesktopConfig::default(), services),
        store,
        timers,
    }
}

fn id(raw: &str) -> ApplicationId {
    ApplicationId::trusted(raw)
}

fn rect_of(runtime: &DesktopRuntime, window_id: WindowId) -> WindowRect {
    runtime.state().window(window_id).expect("window open").rect
}

fn z_of(runtime: &DesktopRuntime, window_id: WindowId) -> u32 {
    runtime.state().window(window_id).expect("window open").z_index
}

fn touch(phase: TouchPhase, x: i32, y: i32) -> PointerInput {
    PointerInput::from_touches(phase, &[PointerPosition::new(x, y)]).expect("single touch")
}

#[test]
fn each_launch_stacks_above_the_previous_window() {
    let mut h = harness();
    let ids: Vec<WindowId> = ["calculator", "snake", "paint"]
        .into_iter()
        .map(|app| h.runtime.launch(&id(app)).expect("launch"))
        .collect();

    let z: Vec<u32> = ids.iter().map(|w| z_of(&h.runtime, *w)).collect();
    assert_eq!(z, vec![100, 101, 102]);
    assert_eq!(h.runtime.state().focused_window_id(), Some(ids[2]));

    assert!(h.runtime.focus(ids[0]));
    assert_eq!(z_of(&h.runtime, ids[0]), 103);
    assert_eq!(h.runtime.state().focused_window_id(), Some(ids[0]));
}

#[test]
fn closing_twice_is_harmless() {
    let mut h = harness();
    let window_id = h.runtime.launch(&id("terminal")).expect("launch");
    assert_eq!(h.runtime.session_count(), 1);

    assert!(h.runtime.close(window_id));
    assert!(!h.runtime.close(window_id));
    assert!(h.runtime.state().windows.is_empty());
    assert_eq!(h.runtime.session_count(), 0);
}

#[test]
fn operations_on_a_closed_window_leave_others_untouched() {
    let mut h = harness();
    let gone = h.runtime.launch(&id("calculator")).expect("launch");
    let kept = h.runtime.launch(&id("music")).expect("launch");
    h.runtime.close(gone);

    let before = h.runtime.state().clone();
    assert!(!h.runtime.focus(gone));
    assert!(!h.runtime.minimize(gone));
    assert!(!h.runtime.toggle_maximize(gone));
    assert!(!h.runtime.activate_from_taskbar(gone));
    assert_eq!(h.runtime.state(), &before);
    assert_eq!(z_of(&h.runtime, kept), 101);
}

#[test]
fn minimize_toggles_and_taskbar_entry_survives() {
    let mut h = harness();
    let first = h.runtime.launch(&id("calculator")).expect("launch");
    let second = h.runtime.launch(&id("notepad")).expect("launch");

    assert!(h.runtime.minimize(second));
    assert!(h.runtime.state().window(second).expect("open").minimized);
    assert_eq!(h.runtime.state().focused_window_id(), Some(first));

    let entries = h.runtime.taskbar_entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[1].minimized);
    assert_eq!(entries[1].label, "📝 Notepad");

    assert!(h.runtime.minimize(second));
    assert!(!h.runtime.state().window(second).expect("open").minimized);

    h.runtime.minimize(second);
    assert!(h.runtime.activate_from_taskbar(second));
    let window = h.runtime.state().window(second).expect("open");
    assert!(!window.minimized);
    assert_eq!(h.runtime.state().focused_window_id(), Some(second));
}

#[test]
fn mouse_and_touch_drags_land_on_the_same_rect() {
    let mut mouse = harness();
    let mouse_window = mouse.runtime.launch(&id("calculator")).expect("launch");
    let start = rect_of(&mouse.runtime, mouse_window);

    assert!(mouse.runtime.pointer_down(
        mouse_window,
        HitTarget::Titlebar,
        PointerInput::from_mouse(PointerPhase::Start(PointerPosition::new(500, 120))),
    ));
    mouse.runtime.pointer_event(PointerInput::from_mouse(PointerPhase::Move(
        PointerPosition::new(530, 140),
    )));
    mouse.runtime.pointer_event(PointerInput::from_mouse(PointerPhase::Move(
        PointerPosition::new(560, 170),
    )));
    mouse
        .runtime
        .pointer_event(PointerInput::from_mouse(PointerPhase::End));

    let mut finger = harness();
    let touch_window = finger.runtime.launch(&id("calculator")).expect("launch");
    assert!(finger.runtime.pointer_down(
        touch_window,
        HitTarget::Titlebar,
        touch(TouchPhase::Start, 500, 120),
    ));
    finger.runtime.pointer_event(touch(TouchPhase::Move, 560, 170));
    finger.runtime.pointer_event(
        PointerInput::from_touches(TouchPhase::End, &[]).expect("touch end"),
    );

    let expected = start.offset(60, 50);
    assert_eq!(rect_of(&mouse.runtime, mouse_window), expected);
    assert_eq!(rect_of(&finger.runtime, touch_window), expected);
    assert!(mouse.runtime.interaction().is_idle());
    assert!(finger.runtime.interaction().is_idle());
}

#[test]
fn north_west_resize_stops_at_minimum_and_keeps_far_edges() {
    let mut h = harness();
    let window_id = h.runtime.launch(&id("calculator")).expect("launch");
    let start = rect_of(&h.runtime, window_id);
    assert_eq!(
        start,
        WindowRect {
            x: 440,
            y: 105,
            w: 400,
            h: 550
        }
    );

    assert!(h.runtime.pointer_down(
        window_id,
        HitTarget::ResizeHandle(ResizeEdge::NorthWest),
        PointerInput::from_mouse(PointerPhase::Start(PointerPosition::new(440, 105))),
    ));
    h.runtime.pointer_event(PointerInput::from_mouse(PointerPhase::Move(
        PointerPosition::new(600, 600),
    )));
    h.runtime
        .pointer_event(PointerInput::from_mouse(PointerPhase::End));

    let resized = rect_of(&h.runtime, window_id);
    assert_eq!(
        resized,
        WindowRect {
            x: 540,
            y: 455,
            w: 300,
            h: 200
        }
    );
    assert_eq!(resized.right(), start.right());
    assert_eq!(resized.bottom(), start.bottom());
}

#[test]
fn gesture_listeners_are_dropped_when_the_window_closes_mid_drag() {
    let mut h = harness();
    let window_id = h.runtime.launch(&id("paint")).expect("launch");
    assert!(h.runtime.pointer_down(
        window_id,
        HitTarget::Titlebar,
        touch(TouchPhase::Start, 300, 80),
    ));
    h.runtime.attach_gesture_listener(|| {});
    h.runtime.attach_gesture_listener(|| {});
    assert_eq!(h.runtime.gesture_listener_count(), 2);

    h.runtime.close(window_id);
    assert_eq!(h.runtime.gesture_listener_count(), 0);
    assert!(h.runtime.interaction().is_idle());
}

#[test]
fn multi_touch_never_starts_a_drag() {
    let two_fingers = [PointerPosition::new(10, 10), PointerPosition::new(50, 50)];
    assert_eq!(
        PointerInput::from_touches(TouchPhase::Start, &two_fingers),
        None
    );

    let mut h = harness();
    let window_id = h.runtime.launch(&id("calculator")).expect("launch");
    let start = rect_of(&h.runtime, window_id);
    h.runtime.pointer_event(touch(TouchPhase::Move, 900, 900));
    assert_eq!(rect_of(&h.runtime, window_id), start);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut h = harness();
    let before = h.runtime.registry().len();
    let duplicate = AppDescriptor::new(
        id("calculator"),
        "Calculator Two",
        "🧮",
        AppCategory::Utilities,
        Rc::new(PlaceholderApp::new("Calculator Two", "🧮")),
    );

    assert_eq!(
        h.runtime.register(duplicate),
        Err(RegistryError::DuplicateAppId(id("calculator")))
    );
    assert_eq!(h.runtime.registry().len(), before);
    assert_eq!(
        h.runtime
            .registry()
            .lookup(&id("calculator"))
            .expect("registered")
            .name,
        "Calculator"
    );
}

#[test]
fn clock_interval_is_cancelled_when_its_window_closes() {
    let mut h = harness();
    let window_id = h.runtime.launch(&id("clock")).expect("launch");
    assert_eq!(h.timers.active_count(), 1);
    assert_eq!(
        h.runtime
            .container(window_id)
            .expect("session")
            .active_timer_count(),
        1
    );

    h.timers.advance(Duration::from_millis(2_500));
    h.runtime.close(window_id);
    assert_eq!(h.timers.active_count(), 0);
    assert!(h.runtime.container(window_id).is_none());

    h.timers.advance(Duration::from_secs(5));
    assert_eq!(h.timers.active_count(), 0);
}

#[test]
fn notepad_text_is_kept_across_windows() {
    let mut h = harness();
    save_typed(
        h.store.as_ref(),
        NOTEPAD_STORAGE_KEY,
        &NotepadDocument {
            text: "shopping list".to_string(),
        },
    )
    .expect("seed document");

    let first = h
        .runtime
        .launch_with_params(&id("notepad"), json!({ "text": "meeting at noon" }))
        .expect("launch");
    h.runtime.close(first);

    // Only the second window's close can repopulate the store.
    let second = h.runtime.launch(&id("notepad")).expect("launch");
    h.store.remove(NOTEPAD_STORAGE_KEY).expect("clear");
    h.runtime.close(second);

    let stored: Option<NotepadDocument> =
        load_typed(h.store.as_ref(), NOTEPAD_STORAGE_KEY).expect("readable document");
    assert_eq!(
        stored,
        Some(NotepadDocument {
            text: "meeting at noon".to_string()
        })
    );
}

#[test]
fn reopening_a_minimized_folder_restores_it() {
    let mut h = harness();
    let other = h.runtime.launch(&id("calculator")).expect("launch");
    let folder = h
        .runtime
        .open_folder(AppCategory::Games, None)
        .expect("games folder");

    assert!(h.runtime.minimize(folder));
    assert_eq!(h.runtime.state().focused_window_id(), Some(other));
    assert!(h.runtime.taskbar_entries().iter().all(|e| e.window_id != folder));

    assert_eq!(h.runtime.open_folder(AppCategory::Games, None), Some(folder));
    let reopened = h.runtime.state().window(folder).expect("folder open");
    assert!(!reopened.minimized);
    assert_eq!(h.runtime.state().focused_window_id(), Some(folder));
    assert_eq!(h.runtime.state().windows.len(), 2);
}
