//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for key-value persistence
//! (`localStorage`), interval timers (`setInterval`), and display probing. Every adapter compiles
//! on non-wasm targets with inert fallbacks so the runtime can be tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod display;
pub mod storage;
pub mod timers;

pub use adapters::{
    build_host_services, host_strategy_name, key_value_store, selected_host_strategy, timer_host,
    KeyValueStoreAdapter, TimerHostAdapter,
};
pub use display::probe_display_environment;
pub use storage::local_storage::LocalStorageStore;
pub use timers::BrowserTimerHost;
