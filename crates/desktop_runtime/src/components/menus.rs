use super::*;

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let open = move || runtime.read(|rt| rt.state().start_menu_open);

    view! {
        <Show when=open fallback=|| ()>
            <div
                class="start-menu"
                role="menu"
                aria-label="Start menu"
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                {move || {
                    runtime
                        .read(|rt| rt.start_menu_groups())
                        .into_iter()
                        .map(|group| {
                            view! {
                                <section class="start-menu-group">
                                    <h3 class="start-menu-header">{group.header}</h3>
                                    {group
                                        .items
                                        .into_iter()
                                        .map(|item| {
                                            let app_id = item.app_id.clone();
                                            view! {
                                                <button
                                                    type="button"
                                                    role="menuitem"
                                                    class="start-menu-item"
                                                    on:click=move |_| {
                                                        let _ = runtime
                                                            .update(|rt| rt.launch_from_start_menu(&app_id));
                                                    }
                                                >
                                                    <span aria-hidden="true">{item.icon}</span>
                                                    <span>{item.name}</span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </section>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </Show>
    }
}

#[component]
pub(super) fn DesktopContextMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let menu = move || runtime.read(|rt| rt.state().context_menu);

    move || {
        menu().map(|state| {
            let items = runtime.read_untracked(|rt| rt.context_menu_items());
            view! {
                <div
                    class="desktop-context-menu"
                    role="menu"
                    style=format!("left:{}px;top:{}px;", state.position.x, state.position.y)
                    on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                    on:contextmenu=move |ev: web_sys::MouseEvent| stop_mouse_event(&ev)
                >
                    {items
                        .into_iter()
                        .map(|item| {
                            let command = item.command.clone();
                            view! {
                                <button
                                    type="button"
                                    role="menuitem"
                                    class="desktop-context-menu-item"
                                    on:click=move |_| {
                                        runtime.update(|rt| rt.run_context_command(&command));
                                    }
                                >
                                    {item.label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            }
        })
    }
}
