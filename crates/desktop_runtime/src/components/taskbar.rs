use std::time::Duration;

use platform_host::local_clock_time;

use super::*;

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock_now = create_rw_signal(local_clock_time());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(local_clock_time()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let start_open = move || runtime.read(|rt| rt.state().start_menu_open);
    let entries = move || runtime.read(|rt| rt.taskbar_entries());
    let toggle_start = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.update(|rt| {
            rt.close_context_menu();
            rt.toggle_start_menu();
        });
    };

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            style=move || format!("height:{}px;", runtime.read(|rt| rt.config().taskbar_height))
        >
            <button
                type="button"
                class=move || if start_open() { "taskbar-start active" } else { "taskbar-start" }
                aria-haspopup="menu"
                aria-expanded=move || start_open().to_string()
                on:click=toggle_start
            >
                "Start"
            </button>
            <div class="taskbar-windows" role="list">
                <For each=entries key=|entry| (entry.window_id, entry.minimized, entry.focused) let:entry>
                    <button
                        type="button"
                        role="listitem"
                        class=format!(
                            "taskbar-app{}{}",
                            if entry.focused { " focused" } else { "" },
                            if entry.minimized { " minimized" } else { "" },
                        )
                        aria-pressed=entry.focused.to_string()
                        on:click=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            runtime.update(|rt| rt.activate_from_taskbar(entry.window_id));
                        }
                    >
                        {entry.label}
                    </button>
                </For>
            </div>
            <div class="taskbar-clock" aria-live="off">
                {move || clock_now.get().hh_mm()}
            </div>
        </footer>
    }
}
