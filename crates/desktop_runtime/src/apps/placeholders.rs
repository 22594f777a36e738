//! Placeholder app used for catalog entries whose behavior lives outside the window manager.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::{AppInstance, AppLifecycleEvent, AppModule, WindowContainer};
use leptos::*;

/// Renders a static card naming the app.
#[derive(Debug, Clone)]
pub struct PlaceholderApp {
    name: String,
    icon: String,
}

impl PlaceholderApp {
    pub fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

impl AppModule for PlaceholderApp {
    fn on_launch(&self, container: &WindowContainer) -> Box<dyn AppInstance> {
        logging::log!(
            "placeholder `{}` mounted in window {}",
            container.app_id(),
            container.window_id()
        );
        Box::new(PlaceholderInstance {
            name: self.name.clone(),
            icon: self.icon.clone(),
            last_event: None,
            status: Rc::new(RefCell::new(None)),
        })
    }
}

struct PlaceholderInstance {
    name: String,
    icon: String,
    last_event: Option<AppLifecycleEvent>,
    /// Status bar text, present once the view is mounted.
    status: Rc<RefCell<Option<RwSignal<String>>>>,
}

impl PlaceholderInstance {
    fn status_text(&self) -> String {
        self.last_event
            .map(|event| format!("Last event: {}", event.token()))
            .unwrap_or_else(|| "Ready".to_string())
    }
}

impl AppInstance for PlaceholderInstance {
    fn render(&self) -> View {
        let name = self.name.clone();
        let icon = self.icon.clone();
        let status = create_rw_signal(self.status_text());
        *self.status.borrow_mut() = Some(status);
        view! {
            <div class="app-shell app-placeholder-shell">
                <div class="app-placeholder-card">
                    <div class="app-placeholder-icon" aria-hidden="true">{icon}</div>
                    <p><strong>{name}</strong></p>
                    <p>"This app is not available in this build."</p>
                </div>
                <div class="app-statusbar">
                    <span>{move || status.get()}</span>
                </div>
            </div>
        }
        .into_view()
    }

    fn on_lifecycle(&mut self, event: AppLifecycleEvent) {
        self.last_event = Some(event);
        if let Some(signal) = *self.status.borrow() {
            let _ = signal.try_set(self.status_text());
        }
    }
}
