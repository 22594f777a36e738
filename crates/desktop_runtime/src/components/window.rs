use desktop_app_contract::AppCategory;

use super::*;
use crate::{
    interaction::HitTarget,
    model::{ResizeEdge, WindowKind, WindowRecord},
    window_manager::work_area,
};

fn window_frame_style(win: &WindowRecord, runtime: DesktopRuntimeContext) -> String {
    let rect = if win.maximized {
        runtime.read_untracked(|rt| work_area(rt.viewport(), rt.config().taskbar_height))
    } else {
        win.rect
    };
    let display = if win.minimized { "display:none;" } else { "" };
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};{}",
        rect.x, rect.y, rect.w, rect.h, win.z_index, display
    )
}

/// Starts a gesture on `target` and wires the global listeners when one began.
fn begin_gesture(
    runtime: DesktopRuntimeContext,
    window_id: WindowId,
    target: HitTarget,
    input: PointerInput,
) {
    let started = runtime
        .update(|rt| rt.pointer_down(window_id, target, input))
        .unwrap_or(false);
    if started {
        attach_gesture_listeners(runtime);
    }
}

fn mouse_start(ev: &web_sys::MouseEvent) -> Option<PointerInput> {
    (ev.button() == 0)
        .then(|| PointerInput::from_mouse(PointerPhase::Start(pointer_from_mouse_event(ev))))
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(initial) = runtime.read_untracked(|rt| rt.state().window(window_id).cloned()) else {
        return ().into_view();
    };

    let window = Signal::derive(move || {
        runtime.read(|rt| {
            rt.state()
                .window(window_id)
                .cloned()
                .map(|win| (win, rt.state().focused_window_id() == Some(window_id)))
        })
    });
    let maximized = move || window.with(|w| w.as_ref().is_some_and(|(w, _)| w.maximized));

    let frame_class = move || {
        let Some((win, focused)) = window.get() else {
            return "desktop-window".to_string();
        };
        format!(
            "desktop-window{}{}{}{}",
            if focused { " focused" } else { "" },
            if win.minimized { " minimized" } else { "" },
            if win.maximized { " maximized" } else { "" },
            if win.is_folder() { " folder-window" } else { "" },
        )
    };
    let frame_style = move || {
        window
            .get()
            .map(|(win, _)| window_frame_style(&win, runtime))
            .unwrap_or_default()
    };

    let begin_move_mouse = move |ev: web_sys::MouseEvent| {
        let Some(input) = mouse_start(&ev) else {
            return;
        };
        ev.prevent_default();
        ev.stop_propagation();
        begin_gesture(runtime, window_id, HitTarget::Titlebar, input);
    };
    let begin_move_touch = move |ev: web_sys::TouchEvent| {
        if let Some(input) = PointerInput::from_touches(TouchPhase::Start, &touch_points(&ev)) {
            ev.stop_propagation();
            begin_gesture(runtime, window_id, HitTarget::Titlebar, input);
        }
    };
    let focus_body_mouse = move |ev: web_sys::MouseEvent| {
        if let Some(input) = mouse_start(&ev) {
            begin_gesture(runtime, window_id, HitTarget::Body, input);
        }
    };
    let focus_body_touch = move |ev: web_sys::TouchEvent| {
        if let Some(input) = PointerInput::from_touches(TouchPhase::Start, &touch_points(&ev)) {
            begin_gesture(runtime, window_id, HitTarget::Body, input);
        }
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.update(|rt| rt.toggle_maximize(window_id));
    };

    let body = match initial.kind {
        WindowKind::App(_) => view! { <AppWindowBody window_id=window_id /> }.into_view(),
        WindowKind::Folder(category) => {
            view! { <FolderWindowBody window_id=window_id category=category /> }.into_view()
        }
    };

    view! {
        <section
            id=window_dom_id(window_id)
            class=frame_class
            style=frame_style
            tabindex="-1"
            on:mousedown=focus_body_mouse
            on:touchstart=focus_body_touch
            role="dialog"
            aria-label=initial.title.clone()
        >
            <header
                class="titlebar"
                on:mousedown=begin_move_mouse
                on:touchstart=begin_move_touch
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-title">
                    <span>{initial.title.clone()}</span>
                </div>
                <div class="titlebar-controls">
                    <WindowControlButton
                        label=Signal::derive(|| "Minimize window")
                        glyph=Signal::derive(|| "−")
                        on_press=move || {
                            runtime.update(|rt| rt.minimize(window_id));
                        }
                    />
                    <WindowControlButton
                        label=Signal::derive(move || {
                            if maximized() { "Restore window" } else { "Maximize window" }
                        })
                        glyph=Signal::derive(move || if maximized() { "❐" } else { "□" })
                        on_press=move || {
                            runtime.update(|rt| rt.toggle_maximize(window_id));
                        }
                    />
                    <WindowControlButton
                        label=Signal::derive(|| "Close window")
                        glyph=Signal::derive(|| "×")
                        on_press=move || {
                            runtime.update(|rt| rt.close(window_id));
                        }
                    />
                </div>
            </header>
            <div class="window-body">{body}</div>
            <Show when=move || !maximized() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
    .into_view()
}

#[component]
fn WindowControlButton<F>(
    label: Signal<&'static str>,
    glyph: Signal<&'static str>,
    on_press: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            type="button"
            aria-label=move || label.get()
            on:mousedown=move |ev| stop_mouse_event(&ev)
            on:touchstart=move |ev: web_sys::TouchEvent| ev.stop_propagation()
            on:click=move |ev| {
                stop_mouse_event(&ev);
                on_press();
            }
        >
            {move || glyph.get()}
        </button>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle edge-{}", edge.token());
    let target = HitTarget::ResizeHandle(edge);

    let on_mousedown = move |ev: web_sys::MouseEvent| {
        let Some(input) = mouse_start(&ev) else {
            return;
        };
        stop_mouse_event(&ev);
        begin_gesture(runtime, window_id, target, input);
    };
    let on_touchstart = move |ev: web_sys::TouchEvent| {
        if let Some(input) = PointerInput::from_touches(TouchPhase::Start, &touch_points(&ev)) {
            ev.prevent_default();
            ev.stop_propagation();
            begin_gesture(runtime, window_id, target, input);
        }
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:mousedown=on_mousedown
            on:touchstart=on_touchstart
        />
    }
}

/// Mounts the app's view once; later state changes never rebuild it.
#[component]
fn AppWindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    runtime
        .read_untracked(|rt| rt.render_window(window_id))
        .unwrap_or_else(|| view! { <p class="window-error">"App session unavailable"</p> }.into_view())
}

#[component]
fn FolderWindowBody(window_id: WindowId, category: AppCategory) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let items = runtime.read_untracked(|rt| rt.folder_contents(category));

    view! {
        <ul class="folder-launchers" role="list">
            {items
                .into_iter()
                .map(|item| {
                    let app_id = item.app_id.clone();
                    view! {
                        <li>
                            <button
                                type="button"
                                class="folder-launcher"
                                on:click=move |_| {
                                    let _ = runtime.update(|rt| rt.launch_from_folder(window_id, &app_id));
                                }
                            >
                                <span class="folder-launcher-icon" aria-hidden="true">{item.icon}</span>
                                <span class="folder-launcher-label">{item.name}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
