//! Leptos context wiring for the desktop runtime.
//!
//! The [`DesktopRuntime`] lives in a [`StoredValue`]; a revision signal is bumped after every
//! mutation so components that read through [`DesktopRuntimeContext::read`] re-render.

use leptos::*;
use platform_host::HostServices;

use crate::{config::DesktopConfig, interaction::PointerInput, runtime::DesktopRuntime};

#[derive(Clone, Copy)]
/// Leptos handle to the shared [`DesktopRuntime`].
pub struct DesktopRuntimeContext {
    /// The runtime itself.
    pub runtime: StoredValue<DesktopRuntime>,
    /// Bumped after each mutation.
    pub revision: RwSignal<u64>,
}

impl DesktopRuntimeContext {
    /// Reads runtime state and subscribes the caller to later changes.
    pub fn read<R>(&self, f: impl FnOnce(&DesktopRuntime) -> R) -> R {
        self.revision.with(|_| ());
        self.runtime.with_value(f)
    }

    /// Reads runtime state without subscribing.
    pub fn read_untracked<R>(&self, f: impl FnOnce(&DesktopRuntime) -> R) -> R {
        self.runtime.with_value(f)
    }

    /// Mutates the runtime and notifies readers. `None` if the runtime was disposed.
    pub fn update<R>(&self, f: impl FnOnce(&mut DesktopRuntime) -> R) -> Option<R> {
        let out = self.runtime.try_update_value(f);
        self.revision.update(|revision| *revision = revision.wrapping_add(1));
        out
    }

    /// Routes a global move/up event to the active gesture.
    pub fn pointer_event(&self, input: PointerInput) {
        let idle = self.read_untracked(|runtime| runtime.interaction().is_idle());
        if !idle {
            self.update(|runtime| runtime.pointer_event(input));
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Desktop constants; defaults apply when omitted.
    #[prop(optional)]
    config: Option<DesktopConfig>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let auto_open = config.auto_open_folders;
    let mut desktop = DesktopRuntime::with_builtin_apps(config, host_services);
    if auto_open {
        desktop.auto_open_category_folders();
    }

    let runtime = DesktopRuntimeContext {
        runtime: store_value(desktop),
        revision: create_rw_signal(0),
    };
    provide_context(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
