//! Typed host-domain contracts shared by the desktop runtime, apps, and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the key-value
//! persistence contract apps may opt into, the interval timer contract whose handles the window
//! manager cancels on close, and time helpers. Concrete browser adapters live in
//! `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod storage;
pub mod time;
pub mod timers;

pub use host::{DisplayEnvironment, HostServices, HostStrategy};
pub use storage::kv::{
    load_typed, save_typed, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore,
};
pub use time::{local_clock_time, unix_time_ms_now, ClockTime};
pub use timers::{ManualTimerHost, NoopTimerHost, TimerCallback, TimerHost, TimerId};
