//! Tunable desktop constants.

use desktop_app_contract::WindowSize;
use serde::{Deserialize, Serialize};

/// Layout and interaction constants for one desktop runtime.
///
/// Missing fields fall back to [`DesktopConfig::default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Smallest size a resize gesture may produce.
    pub min_window_size: WindowSize,
    /// First value of the global z-order counter.
    pub z_index_base: u32,
    /// Height reserved for the taskbar when centering new windows.
    pub taskbar_height: i32,
    /// Widest touch viewport still treated as mobile.
    pub mobile_breakpoint: i32,
    /// Launcher icons per mobile grid page.
    pub apps_per_page: usize,
    /// Fraction of the viewport width a swipe must travel to change page.
    pub swipe_threshold: f64,
    /// Size of category folder windows.
    pub folder_window_size: WindowSize,
    /// Gap between tiled folder windows and the viewport edge.
    pub folder_tile_padding: i32,
    /// Offset applied to each cascaded folder beyond the tiled grid.
    pub folder_cascade_step: i32,
    /// Tile every category folder open at startup (desktop layout only).
    pub auto_open_folders: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            min_window_size: WindowSize::new(300, 200),
            z_index_base: 100,
            taskbar_height: 40,
            mobile_breakpoint: 768,
            apps_per_page: 20,
            swipe_threshold: 0.2,
            folder_window_size: WindowSize::new(400, 500),
            folder_tile_padding: 20,
            folder_cascade_step: 30,
            auto_open_folders: false,
        }
    }
}

impl DesktopConfig {
    /// Parses a JSON config document, applying defaults for omitted fields.
    ///
    /// # Errors
    ///
    /// Returns the JSON parse error message.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DesktopConfig::from_json(r#"{ "apps_per_page": 12 }"#).expect("parse");
        assert_eq!(config.apps_per_page, 12);
        assert_eq!(config.min_window_size, WindowSize::new(300, 200));
        assert_eq!(config.z_index_base, 100);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DesktopConfig::from_json("{").is_err());
    }
}
