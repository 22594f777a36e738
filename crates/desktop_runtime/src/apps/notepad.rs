//! Notepad app: a single text buffer persisted through the host key-value store.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::{AppInstance, AppLifecycleEvent, AppModule, WindowContainer};
use leptos::*;
use platform_host::{load_typed, save_typed};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store key holding the serialized [`NotepadDocument`].
pub const NOTEPAD_STORAGE_KEY: &str = "simpleos.notepad.v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotepadDocument {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotepadApp;

impl NotepadApp {
    /// Opens the persisted document for `container`. Unreadable documents start empty.
    ///
    /// A `{"text": ...}` launch parameter replaces the buffer and is saved right away.
    pub fn open(container: &WindowContainer) -> NotepadInstance {
        let document = match load_typed::<_, NotepadDocument>(container.store(), NOTEPAD_STORAGE_KEY)
        {
            Ok(document) => document.unwrap_or_default(),
            Err(err) => {
                logging::warn!("notepad document unreadable, starting empty: {err}");
                NotepadDocument::default()
            }
        };
        let instance = NotepadInstance {
            container: container.clone(),
            document: Rc::new(RefCell::new(document)),
        };
        if let Some(text) = container.launch_params().get("text").and_then(Value::as_str) {
            instance.set_text(text);
        }
        instance
    }
}

impl AppModule for NotepadApp {
    fn on_launch(&self, container: &WindowContainer) -> Box<dyn AppInstance> {
        Box::new(Self::open(container))
    }
}

pub struct NotepadInstance {
    container: WindowContainer,
    document: Rc<RefCell<NotepadDocument>>,
}

impl NotepadInstance {
    pub fn text(&self) -> String {
        self.document.borrow().text.clone()
    }

    /// Replaces the buffer and writes it through to the store.
    pub fn set_text(&self, text: impl Into<String>) {
        write_text(&self.container, &self.document, text.into());
    }
}

fn write_text(container: &WindowContainer, document: &RefCell<NotepadDocument>, text: String) {
    document.borrow_mut().text = text;
    persist(container, &document.borrow());
}

fn persist(container: &WindowContainer, document: &NotepadDocument) {
    if let Err(err) = save_typed(container.store(), NOTEPAD_STORAGE_KEY, document) {
        logging::warn!("notepad save failed: {err}");
    }
}

impl AppInstance for NotepadInstance {
    fn render(&self) -> View {
        let container = self.container.clone();
        let document = self.document.clone();
        let initial = self.text();
        view! {
            <div class="app-shell app-notepad-shell">
                <textarea
                    class="app-notepad-editor"
                    aria-label="Notepad text"
                    spellcheck="false"
                    prop:value=initial
                    on:input=move |ev| write_text(&container, &document, event_target_value(&ev))
                ></textarea>
            </div>
        }
        .into_view()
    }

    fn on_lifecycle(&mut self, event: AppLifecycleEvent) {
        if event == AppLifecycleEvent::Closing {
            persist(&self.container, &self.document.borrow());
        }
    }
}
