//! Desktop shell UI composition and interaction surfaces.

mod menus;
mod mobile;
mod taskbar;
mod window;

use leptos::*;

use self::{
    menus::{DesktopContextMenu, StartMenu},
    mobile::MobileAppGrid,
    taskbar::Taskbar,
    window::DesktopWindow,
};

use crate::{
    interaction::{PointerInput, PointerPhase, TouchPhase},
    model::{ContextMenuTarget, PointerPosition, WindowId},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Root desktop surface: launcher icons or the mobile grid, windows, menus, and the taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let is_mobile = runtime.read_untracked(|rt| rt.layout_mode().is_mobile());

    let resize_listener = window_event_listener(ev::resize, move |_| {
        if let Some((width, height)) = viewport_size() {
            runtime.update(|rt| rt.set_viewport_size(width, height));
        }
    });
    on_cleanup(move || resize_listener.remove());

    create_effect(move |_| {
        runtime.revision.with(|_| ());
        let requested = runtime
            .runtime
            .try_update_value(|rt| rt.take_input_focus_request())
            .flatten();
        if let Some(window_id) = requested {
            focus_window_element(window_id);
        }
    });

    let open_desktop_menu = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let position = pointer_from_mouse_event(&ev);
        runtime.update(|rt| rt.open_context_menu(ContextMenuTarget::Desktop, position));
    };
    let dismiss_menus = move |_| {
        let (start_open, menu_open) = runtime.read_untracked(|rt| {
            (rt.state().start_menu_open, rt.state().context_menu.is_some())
        });
        if start_open || menu_open {
            runtime.update(|rt| {
                rt.close_start_menu();
                rt.close_context_menu();
            });
        }
    };

    let window_ids = move || {
        runtime.read(|rt| {
            rt.state()
                .windows
                .iter()
                .map(|w| w.id)
                .collect::<Vec<WindowId>>()
        })
    };

    view! {
        <div
            class=if is_mobile { "desktop-shell mobile" } else { "desktop-shell" }
            on:contextmenu=open_desktop_menu
            on:click=dismiss_menus
        >
            <div class="desktop-surface">
                {if is_mobile {
                    view! { <MobileAppGrid /> }.into_view()
                } else {
                    view! { <DesktopFolderIcons /> }.into_view()
                }}
            </div>
            <div class="desktop-window-layer">
                <For each=window_ids key=|window_id| *window_id let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <StartMenu />
            <DesktopContextMenu />
            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopFolderIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let folders = move || runtime.read(|rt| rt.desktop_folders());

    view! {
        <div class="desktop-icons" role="list">
            <For each=folders key=|folder| folder.category let:folder>
                <button
                    type="button"
                    class="desktop-icon"
                    role="listitem"
                    aria-label=folder.label
                    on:dblclick=move |_| {
                        runtime.update(|rt| rt.open_folder(folder.category, None));
                    }
                    on:contextmenu=move |ev: web_sys::MouseEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        let position = pointer_from_mouse_event(&ev);
                        runtime.update(|rt| {
                            rt.open_context_menu(ContextMenuTarget::Folder(folder.category), position)
                        });
                    }
                >
                    <span class="desktop-icon-image" aria-hidden="true">{folder.icon}</span>
                    <span class="desktop-icon-label">{folder.label}</span>
                </button>
            </For>
        </div>
    }
}

/// Attaches document-level move/up listeners for the gesture that just started. Their removal
/// handles go into the runtime's gesture scope.
fn attach_gesture_listeners(runtime: DesktopRuntimeContext) {
    let mouse_move = window_event_listener(ev::mousemove, move |ev| {
        let input = PointerInput::from_mouse(PointerPhase::Move(pointer_from_mouse_event(&ev)));
        runtime.pointer_event(input);
    });
    let mouse_up = window_event_listener(ev::mouseup, move |_| {
        runtime.pointer_event(PointerInput::from_mouse(PointerPhase::End));
    });
    let touch_move = window_event_listener(ev::touchmove, move |ev| {
        if let Some(input) = PointerInput::from_touches(TouchPhase::Move, &touch_points(&ev)) {
            ev.prevent_default();
            runtime.pointer_event(input);
        }
    });
    let touch_end = window_event_listener(ev::touchend, move |ev| {
        if let Some(input) = PointerInput::from_touches(TouchPhase::End, &touch_points(&ev)) {
            runtime.pointer_event(input);
        }
    });

    runtime.update(move |rt| {
        rt.attach_gesture_listener(move || mouse_move.remove());
        rt.attach_gesture_listener(move || mouse_up.remove());
        rt.attach_gesture_listener(move || touch_move.remove());
        rt.attach_gesture_listener(move || touch_end.remove());
    });
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_mouse_event(ev: &web_sys::MouseEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn touch_points(ev: &web_sys::TouchEvent) -> Vec<PointerPosition> {
    let touches = ev.touches();
    (0..touches.length())
        .filter_map(|index| touches.get(index))
        .map(|touch| PointerPosition::new(touch.client_x(), touch.client_y()))
        .collect()
}

fn window_dom_id(window_id: WindowId) -> String {
    format!("desktop-window-{}", window_id.0)
}

#[cfg(target_arch = "wasm32")]
fn viewport_size() -> Option<(i32, i32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()? as i32;
    let height = window.inner_height().ok()?.as_f64()? as i32;
    Some((width, height))
}

#[cfg(not(target_arch = "wasm32"))]
fn viewport_size() -> Option<(i32, i32)> {
    None
}

#[cfg(target_arch = "wasm32")]
fn focus_window_element(window_id: WindowId) {
    use wasm_bindgen::JsCast;

    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(&window_dom_id(window_id)))
    else {
        return;
    };
    if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
        let _ = element.focus();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn focus_window_element(_: WindowId) {}
