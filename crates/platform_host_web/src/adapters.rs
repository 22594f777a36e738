use std::{rc::Rc, time::Duration};

use platform_host::{
    HostServices, HostStrategy, KeyValueStore, NoopKeyValueStore, NoopTimerHost, TimerCallback,
    TimerHost, TimerId,
};

use crate::{probe_display_environment, BrowserTimerHost, LocalStorageStore};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "desktop-host-stub")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "desktop-host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete key-value backend behind [`KeyValueStore`].
#[derive(Debug, Clone, Copy)]
pub enum KeyValueStoreAdapter {
    /// Browser `localStorage` persistence.
    Browser(LocalStorageStore),
    /// No-op fallback used when the host is intentionally stubbed.
    Stub(NoopKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.get(key),
            Self::Stub(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.set(key, value),
            Self::Stub(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.remove(key),
            Self::Stub(store) => store.remove(key),
        }
    }
}

/// Adapter enum that erases the concrete timer backend behind [`TimerHost`].
#[derive(Clone)]
pub enum TimerHostAdapter {
    /// Browser `setInterval` timers.
    Browser(BrowserTimerHost),
    /// Timers that never fire.
    Stub(NoopTimerHost),
}

impl TimerHost for TimerHostAdapter {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        match self {
            Self::Browser(host) => host.set_interval(period, callback),
            Self::Stub(host) => host.set_interval(period, callback),
        }
    }

    fn clear_interval(&self, id: TimerId) {
        match self {
            Self::Browser(host) => host.clear_interval(id),
            Self::Stub(host) => host.clear_interval(id),
        }
    }
}

/// Builds the key-value store adapter for the selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(LocalStorageStore),
        HostStrategy::Headless => KeyValueStoreAdapter::Stub(NoopKeyValueStore),
    }
}

/// Builds the timer host adapter for the selected host strategy.
pub fn timer_host() -> TimerHostAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => TimerHostAdapter::Browser(BrowserTimerHost::default()),
        HostStrategy::Headless => TimerHostAdapter::Stub(NoopTimerHost),
    }
}

/// Assembles the full host service bundle for the selected strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        store: Rc::new(key_value_store()),
        timers: Rc::new(timer_host()),
        display: probe_display_environment(),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_build_selects_browser_adapters() {
        assert_eq!(host_strategy_name(), "browser");
        assert!(matches!(key_value_store(), KeyValueStoreAdapter::Browser(_)));
        assert!(matches!(timer_host(), TimerHostAdapter::Browser(_)));
    }

    #[test]
    fn native_fallbacks_are_inert() {
        let services = build_host_services();
        assert_eq!(services.store.get("missing").expect("get"), None);
        services.store.set("k", "v").expect("set");
        let id = services.timers.set_interval(Duration::from_secs(1), Box::new(|| {}));
        services.timers.clear_interval(id);
    }
}
