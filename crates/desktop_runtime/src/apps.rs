//! Built-in app catalog.
//!
//! Metadata comes from `apps.manifest.toml`, validated at build time and embedded as JSON. Each
//! entry names the module that backs it.

mod clock;
mod notepad;
mod placeholders;

use std::rc::Rc;

use desktop_app_contract::{AppCategory, AppDescriptor, AppModule, ApplicationId};
use leptos::logging::warn;
use serde::Deserialize;

pub use clock::{ClockApp, ClockInstance};
pub use notepad::{NotepadApp, NotepadDocument, NotepadInstance, NOTEPAD_STORAGE_KEY};
pub use placeholders::PlaceholderApp;

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

#[derive(Debug, Clone, Deserialize)]
struct CatalogWindow {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogEntry {
    app_id: String,
    display_name: String,
    icon: String,
    category: String,
    module: String,
    window: Option<CatalogWindow>,
}

fn module_for(entry: &CatalogEntry) -> Rc<dyn AppModule> {
    match entry.module.as_str() {
        "clock" => Rc::new(ClockApp),
        "notepad" => Rc::new(NotepadApp),
        _ => Rc::new(PlaceholderApp::new(&entry.display_name, &entry.icon)),
    }
}

/// Parses a catalog JSON document into descriptors, skipping entries with invalid ids.
///
/// # Errors
///
/// Returns the JSON parse error message when the document is malformed.
pub fn descriptors_from_catalog(raw: &str) -> Result<Vec<AppDescriptor>, String> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let mut descriptors = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = match ApplicationId::new(entry.app_id.clone()) {
            Ok(id) => id,
            Err(err) => {
                warn!("skipping catalog entry: {err}");
                continue;
            }
        };
        let mut descriptor = AppDescriptor::new(
            id,
            entry.display_name.clone(),
            entry.icon.clone(),
            AppCategory::parse_or_default(&entry.category),
            module_for(&entry),
        );
        if let Some(window) = &entry.window {
            descriptor = descriptor.with_window_size(window.width, window.height);
        }
        descriptors.push(descriptor);
    }
    Ok(descriptors)
}

/// Descriptors for every built-in app, in catalog order.
pub fn builtin_descriptors() -> Vec<AppDescriptor> {
    descriptors_from_catalog(APP_MANIFEST_CATALOG_JSON).unwrap_or_else(|err| {
        warn!("built-in app catalog is unreadable: {err}");
        Vec::new()
    })
}
