use desktop_runtime::{DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="SimpleOS" />
        <Meta name="description" content="A desktop-style window manager running in the browser." />
        <Meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no" />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

/// Desktop shell wired to the browser host services.
#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider host_services=platform_host_web::build_host_services()>
            <DesktopShell />
        </DesktopProvider>
    }
}
