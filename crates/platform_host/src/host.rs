//! Shared host-bundle and environment models for browser and headless runtime composition.

use std::rc::Rc;

use crate::{KeyValueStore, MemoryKeyValueStore, NoopTimerHost, TimerHost};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// In-process composition without a browser (tests, native tooling).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Display characteristics sampled once when the host bundle is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEnvironment {
    /// Viewport width in CSS pixels.
    pub viewport_width: i32,
    /// Viewport height in CSS pixels.
    pub viewport_height: i32,
    /// Whether the device reports touch input.
    pub touch_capable: bool,
}

impl Default for DisplayEnvironment {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            viewport_height: 800,
            touch_capable: false,
        }
    }
}

/// Runtime-selected host service bundle injected into the shared desktop runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `desktop_runtime`, which keeps the runtime and app crates decoupled from browser adapter
/// details.
#[derive(Clone)]
pub struct HostServices {
    /// Key-value store apps may opt into for their own settings and content.
    pub store: Rc<dyn KeyValueStore>,
    /// Interval timer facility; every timer an app starts goes through it.
    pub timers: Rc<dyn TimerHost>,
    /// Display characteristics used for the startup layout decision.
    pub display: DisplayEnvironment,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a headless bundle from explicit store and timer services.
    pub fn headless(
        store: Rc<dyn KeyValueStore>,
        timers: Rc<dyn TimerHost>,
        display: DisplayEnvironment,
    ) -> Self {
        Self {
            store,
            timers,
            display,
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::headless(
            Rc::new(MemoryKeyValueStore::default()),
            Rc::new(NoopTimerHost),
            DisplayEnvironment::default(),
        )
    }
}
