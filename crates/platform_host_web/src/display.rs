//! Viewport and touch-capability probing.

use platform_host::DisplayEnvironment;

/// Samples the current viewport size and touch capability.
///
/// Non-wasm targets return [`DisplayEnvironment::default`].
pub fn probe_display_environment() -> DisplayEnvironment {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return DisplayEnvironment::default();
        };
        let fallback = DisplayEnvironment::default();
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as i32)
            .unwrap_or(fallback.viewport_width);
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as i32)
            .unwrap_or(fallback.viewport_height);
        let has_touch_handler =
            js_sys::Reflect::has(&window, &"ontouchstart".into()).unwrap_or(false);
        let touch_capable = has_touch_handler || window.navigator().max_touch_points() > 0;

        DisplayEnvironment {
            viewport_width,
            viewport_height,
            touch_capable,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        DisplayEnvironment::default()
    }
}
