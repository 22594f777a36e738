//! Window and app lifecycle manager for the SimpleOS browser desktop.
//!
//! [`DesktopRuntime`] owns the app registry, window state, and live app sessions. Pure state
//! transitions live in [`reduce_desktop`]; the Leptos layer in [`components`] only forwards
//! user input and renders what the runtime exposes.

pub mod apps;
pub mod components;
pub mod config;
pub mod interaction;
pub mod model;
pub mod presenter;
pub mod reducer;
pub mod registry;
pub mod runtime;
pub mod runtime_context;
pub mod window_manager;

pub use components::{DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::DesktopConfig;
pub use interaction::{HitTarget, PointerInput, PointerPhase, TouchPhase};
pub use model::*;
pub use presenter::LayoutMode;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use registry::{AppRegistry, RegistryError};
pub use runtime::{DesktopError, DesktopRuntime};
