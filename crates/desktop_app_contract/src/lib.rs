//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! An app is registered as an [`AppDescriptor`]: static metadata plus an [`AppModule`] whose
//! [`AppModule::on_launch`] hook runs once per opened window. The hook receives the window's
//! [`WindowContainer`], which scopes every timer and teardown hook the app creates to the
//! lifetime of that window.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{cell::RefCell, fmt, rc::Rc, time::Duration};

use leptos::View;
use platform_host::{KeyValueStore, TimerCallback, TimerHost, TimerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Stable identifier for an installable app.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lowercase kebab-case token.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected lowercase kebab-case"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 48 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() || raw.ends_with('-') || raw.contains("--") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Grouping tag used for start-menu and desktop-folder organization.
pub enum AppCategory {
    /// Small tools.
    Utilities,
    /// Games.
    Games,
    /// Media and fun.
    Entertainment,
    /// Documents and editing.
    Productivity,
    /// Settings and help.
    System,
    /// Assistant apps.
    Ai,
    /// Launchers for external sites.
    External,
    /// User-defined apps.
    Custom,
}

impl AppCategory {
    /// Every category in menu order.
    pub const ALL: [AppCategory; 8] = [
        Self::Utilities,
        Self::Games,
        Self::Entertainment,
        Self::Productivity,
        Self::System,
        Self::Ai,
        Self::External,
        Self::Custom,
    ];

    /// Parses a category token, falling back to [`AppCategory::Utilities`] for unknown input.
    pub fn parse_or_default(raw: &str) -> Self {
        Self::from_token(raw).unwrap_or(Self::Utilities)
    }

    /// Parses a category token.
    pub fn from_token(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.token() == raw.trim())
    }

    /// Returns the stable lowercase token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Utilities => "utilities",
            Self::Games => "games",
            Self::Entertainment => "entertainment",
            Self::Productivity => "productivity",
            Self::System => "system",
            Self::Ai => "ai",
            Self::External => "external",
            Self::Custom => "custom",
        }
    }

    /// Returns the category glyph.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Utilities => "🛠️",
            Self::Games => "🎮",
            Self::Entertainment => "🎬",
            Self::Productivity => "📝",
            Self::System => "⚙️",
            Self::Ai => "🤖",
            Self::External => "🚀",
            Self::Custom => "⚡",
        }
    }

    /// Returns the display name without the glyph.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utilities => "Utilities",
            Self::Games => "Games",
            Self::Entertainment => "Entertainment",
            Self::Productivity => "Productivity",
            Self::System => "System",
            Self::Ai => "AI",
            Self::External => "External Apps",
            Self::Custom => "Custom Apps",
        }
    }

    /// Returns the start-menu header label (`glyph name`).
    pub fn label(self) -> String {
        format!("{} {}", self.icon(), self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Preferred initial window size in CSS pixels.
pub struct WindowSize {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl WindowSize {
    /// Creates a size.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Lifecycle events emitted by the desktop window manager to a launched app.
pub enum AppLifecycleEvent {
    /// Window became the topmost focused window.
    Focused,
    /// Window was minimized.
    Minimized,
    /// Window was restored from minimized state.
    Restored,
    /// Window was maximized.
    Maximized,
    /// Window left maximized state.
    Unmaximized,
    /// Window close sequence started; teardown follows.
    Closing,
}

impl AppLifecycleEvent {
    /// Returns a stable string token for debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Focused => "focused",
            Self::Minimized => "minimized",
            Self::Restored => "restored",
            Self::Maximized => "maximized",
            Self::Unmaximized => "unmaximized",
            Self::Closing => "closing",
        }
    }
}

type TeardownHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct ContainerResources {
    timers: Vec<TimerId>,
    teardown: Vec<TeardownHook>,
    torn_down: bool,
}

#[derive(Clone)]
/// Per-window container handed to [`AppModule::on_launch`].
///
/// Clones share the same resource scope. Timers and teardown hooks registered here are released
/// exactly once, when the window closes.
pub struct WindowContainer {
    window_id: WindowRuntimeId,
    app_id: ApplicationId,
    launch_params: Value,
    store: Rc<dyn KeyValueStore>,
    timers: Rc<dyn TimerHost>,
    resources: Rc<RefCell<ContainerResources>>,
}

impl WindowContainer {
    /// Creates a container for a freshly launched window.
    pub fn new(
        window_id: WindowRuntimeId,
        app_id: ApplicationId,
        launch_params: Value,
        store: Rc<dyn KeyValueStore>,
        timers: Rc<dyn TimerHost>,
    ) -> Self {
        Self {
            window_id,
            app_id,
            launch_params,
            store,
            timers,
            resources: Rc::new(RefCell::new(ContainerResources::default())),
        }
    }

    /// Runtime window id this container belongs to.
    pub fn window_id(&self) -> WindowRuntimeId {
        self.window_id
    }

    /// App id that was launched into this container.
    pub fn app_id(&self) -> &ApplicationId {
        &self.app_id
    }

    /// Launch parameters supplied by the opener.
    pub fn launch_params(&self) -> &Value {
        &self.launch_params
    }

    /// Key-value store for app-owned settings and content.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Starts an interval owned by this window. It is cancelled when the window closes.
    ///
    /// After teardown the callback is dropped without being scheduled.
    pub fn set_interval(&self, period: Duration, callback: TimerCallback) -> Option<TimerId> {
        if self.resources.borrow().torn_down {
            return None;
        }
        let id = self.timers.set_interval(period, callback);
        self.resources.borrow_mut().timers.push(id);
        Some(id)
    }

    /// Cancels an interval early.
    pub fn clear_interval(&self, id: TimerId) {
        self.resources.borrow_mut().timers.retain(|live| *live != id);
        self.timers.clear_interval(id);
    }

    /// Registers a hook that runs when the window closes. Runs immediately after teardown.
    pub fn on_teardown(&self, hook: impl FnOnce() + 'static) {
        if self.resources.borrow().torn_down {
            hook();
            return;
        }
        self.resources.borrow_mut().teardown.push(Box::new(hook));
    }

    /// Number of intervals still owned by this window.
    pub fn active_timer_count(&self) -> usize {
        self.resources.borrow().timers.len()
    }

    /// Returns whether the container has been torn down.
    pub fn is_torn_down(&self) -> bool {
        self.resources.borrow().torn_down
    }

    /// Cancels every owned interval and runs teardown hooks in registration order.
    ///
    /// Called by the window manager on close. Later calls are no-ops.
    pub fn teardown(&self) {
        let (timers, hooks) = {
            let mut resources = self.resources.borrow_mut();
            if resources.torn_down {
                return;
            }
            resources.torn_down = true;
            (
                std::mem::take(&mut resources.timers),
                std::mem::take(&mut resources.teardown),
            )
        };
        for id in timers {
            self.timers.clear_interval(id);
        }
        for hook in hooks {
            hook();
        }
    }
}

impl fmt::Debug for WindowContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowContainer")
            .field("window_id", &self.window_id)
            .field("app_id", &self.app_id)
            .field("active_timers", &self.active_timer_count())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

/// A running app bound to one window.
pub trait AppInstance {
    /// Builds the app's view for the window body.
    fn render(&self) -> View;

    /// Receives window lifecycle transitions.
    fn on_lifecycle(&mut self, _event: AppLifecycleEvent) {}
}

/// Launch capability implemented per app.
pub trait AppModule {
    /// Lifecycle hook invoked once per launched window.
    fn on_launch(&self, container: &WindowContainer) -> Box<dyn AppInstance>;
}

#[derive(Clone)]
/// Static registration data for an installable app.
pub struct AppDescriptor {
    /// Unique app id.
    pub id: ApplicationId,
    /// Display name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
    /// Menu/desktop grouping.
    pub category: AppCategory,
    /// Preferred initial window size; category defaults apply when absent.
    pub window_size: Option<WindowSize>,
    /// Launch hook.
    pub module: Rc<dyn AppModule>,
}

impl AppDescriptor {
    /// Creates a descriptor without a preferred window size.
    pub fn new(
        id: ApplicationId,
        name: impl Into<String>,
        icon: impl Into<String>,
        category: AppCategory,
        module: Rc<dyn AppModule>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            icon: icon.into(),
            category,
            window_size: None,
            module,
        }
    }

    /// Sets the preferred initial window size.
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_size = Some(WindowSize::new(width, height));
        self
    }

    /// Returns the `icon name` label used by taskbar entries and window titles.
    pub fn title(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

impl fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("icon", &self.icon)
            .field("category", &self.category)
            .field("window_size", &self.window_size)
            .finish_non_exhaustive()
    }
}
