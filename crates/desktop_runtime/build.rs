use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const KNOWN_CATEGORIES: [&str; 8] = [
    "utilities",
    "games",
    "entertainment",
    "productivity",
    "system",
    "ai",
    "external",
    "custom",
];

const KNOWN_MODULES: [&str; 3] = ["placeholder", "clock", "notepad"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    app_id: String,
    display_name: String,
    icon: String,
    category: String,
    module: String,
    #[serde(default)]
    window: Option<WindowDefaults>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    schema_version: u32,
    apps: Vec<AppManifest>,
}

fn valid_app_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw.len() <= 48
        && raw.starts_with(|c: char| c.is_ascii_lowercase())
        && !raw.ends_with('-')
        && !raw.contains("--")
        && raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("apps.manifest.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: CatalogFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for app in &catalog.apps {
        if !valid_app_id(&app.app_id) {
            panic!("invalid app id `{}` in {}", app.app_id, path.display());
        }
        if !seen.insert(app.app_id.clone()) {
            panic!("duplicate app id `{}` in {}", app.app_id, path.display());
        }
        if !KNOWN_CATEGORIES.contains(&app.category.as_str()) {
            panic!(
                "unknown category `{}` for app `{}`",
                app.category, app.app_id
            );
        }
        if !KNOWN_MODULES.contains(&app.module.as_str()) {
            panic!("unknown module `{}` for app `{}`", app.module, app.app_id);
        }
        if let Some(window) = &app.window {
            if window.width <= 0 || window.height <= 0 {
                panic!("non-positive window size for app `{}`", app.app_id);
            }
        }
    }

    // Registration order is menu order, so the manifest order is kept.
    let json = serde_json::to_string_pretty(&catalog.apps).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
