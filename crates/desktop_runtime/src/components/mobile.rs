use super::*;

/// Paginated launcher grid shown instead of desktop folders on small touch screens.
#[component]
pub(super) fn MobileAppGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let swipe_start = create_rw_signal(None::<i32>);
    let swipe_dx = create_rw_signal(0_i32);

    let viewport_width = move || f64::from(runtime.read(|rt| rt.viewport().w));
    let track_style = move || {
        let dx = f64::from(swipe_dx.get());
        let offset = runtime.read(|rt| rt.pager().drag_offset_percent(dx, viewport_width()));
        let transition = if swipe_start.get().is_some() {
            "none"
        } else {
            "transform 0.3s ease"
        };
        format!("transform:translateX({offset}%);transition:{transition};")
    };

    let on_touchstart = move |ev: web_sys::TouchEvent| {
        if let [point] = touch_points(&ev).as_slice() {
            swipe_start.set(Some(point.x));
            swipe_dx.set(0);
        }
    };
    let on_touchmove = move |ev: web_sys::TouchEvent| {
        let Some(start_x) = swipe_start.get_untracked() else {
            return;
        };
        if let [point] = touch_points(&ev).as_slice() {
            swipe_dx.set(point.x - start_x);
        }
    };
    let on_touchend = move |_: web_sys::TouchEvent| {
        if swipe_start.get_untracked().is_none() {
            return;
        }
        let dx = f64::from(swipe_dx.get_untracked());
        let width = viewport_width();
        swipe_start.set(None);
        swipe_dx.set(0);
        runtime.update(|rt| rt.pager_mut().swipe(dx, width));
    };

    let pages = move || runtime.read(|rt| rt.pager().pages().to_vec());
    let dots = move || runtime.read(|rt| rt.pager().dots());

    view! {
        <div
            class="mobile-app-grid"
            on:touchstart=on_touchstart
            on:touchmove=on_touchmove
            on:touchend=on_touchend
            on:touchcancel=on_touchend
        >
            <div class="mobile-app-track" style=track_style>
                {move || {
                    pages()
                        .into_iter()
                        .map(|page| {
                            view! {
                                <div class="mobile-app-page" role="list">
                                    {page
                                        .into_iter()
                                        .map(|item| {
                                            let app_id = item.app_id.clone();
                                            view! {
                                                <button
                                                    type="button"
                                                    role="listitem"
                                                    class="mobile-app-icon"
                                                    on:click=move |_| {
                                                        let _ = runtime.update(|rt| rt.launch(&app_id));
                                                    }
                                                >
                                                    <span class="mobile-app-glyph" aria-hidden="true">
                                                        {item.icon}
                                                    </span>
                                                    <span class="mobile-app-label">{item.name}</span>
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <Show when=move || runtime.read(|rt| rt.pager().shows_left_arrow()) fallback=|| ()>
                <button
                    type="button"
                    class="mobile-page-arrow left"
                    aria-label="Previous page"
                    on:click=move |_| {
                        runtime.update(|rt| rt.pager_mut().prev());
                    }
                >
                    "‹"
                </button>
            </Show>
            <Show when=move || runtime.read(|rt| rt.pager().shows_right_arrow()) fallback=|| ()>
                <button
                    type="button"
                    class="mobile-page-arrow right"
                    aria-label="Next page"
                    on:click=move |_| {
                        runtime.update(|rt| rt.pager_mut().next());
                    }
                >
                    "›"
                </button>
            </Show>
            <div class="mobile-page-dots">
                {move || {
                    dots()
                        .into_iter()
                        .enumerate()
                        .map(|(page, active)| {
                            view! {
                                <button
                                    type="button"
                                    class=if active { "mobile-page-dot active" } else { "mobile-page-dot" }
                                    aria-label=format!("Page {}", page + 1)
                                    on:click=move |_| {
                                        runtime.update(|rt| rt.pager_mut().go_to(page));
                                    }
                                />
                            }
                        })
                        .collect_view()
                }}
            </div>
        </div>
    }
}
