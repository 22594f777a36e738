//! The desktop runtime controller.
//!
//! [`DesktopRuntime`] owns every piece of desktop state: the registry, window records, the active
//! gesture, and one app session per open app window. Operations on windows that no longer exist
//! are benign no-ops and report `false`.

use std::collections::BTreeMap;

use desktop_app_contract::{
    AppCategory, AppDescriptor, AppInstance, AppLifecycleEvent, ApplicationId, WindowContainer,
};
use leptos::{
    logging::{log, warn},
    View,
};
use platform_host::HostServices;
use serde_json::Value;
use thiserror::Error;

use crate::{
    apps::builtin_descriptors,
    config::DesktopConfig,
    interaction::{
        gesture_follow_up_action, gesture_start_action, GestureListeners, HitTarget, PointerInput,
    },
    model::{
        ContextMenuTarget, DesktopState, InteractionState, OpenWindowRequest, PointerPosition,
        WindowId, WindowKind, WindowRect,
    },
    presenter::{self, ContextMenuCommand, LayoutMode, MobilePager},
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    registry::{AppRegistry, RegistryError},
    window_manager::{centered_rect, initial_window_size, tile_folder_positions},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by [`DesktopRuntime`] operations.
pub enum DesktopError {
    /// Launch requested for an id the registry does not know.
    #[error("unknown app `{0}`")]
    UnknownApp(ApplicationId),
    /// Registry rejected an operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

const DEFAULT_FOLDER_POSITION: PointerPosition = PointerPosition::new(100, 100);

struct AppSession {
    container: WindowContainer,
    instance: Box<dyn AppInstance>,
}

/// Single owner of desktop state and app sessions.
pub struct DesktopRuntime {
    config: DesktopConfig,
    services: HostServices,
    layout: LayoutMode,
    registry: AppRegistry,
    state: DesktopState,
    interaction: InteractionState,
    sessions: BTreeMap<WindowId, AppSession>,
    listeners: GestureListeners,
    pager: MobilePager,
    pending_launch_params: Option<Value>,
    pending_input_focus: Option<WindowId>,
}

impl DesktopRuntime {
    /// Creates an empty desktop. The layout mode is decided here, once.
    pub fn new(config: DesktopConfig, services: HostServices) -> Self {
        let layout = LayoutMode::detect(&services.display, config.mobile_breakpoint);
        let registry = AppRegistry::default();
        let pager = MobilePager::new(&registry, config.apps_per_page, config.swipe_threshold);
        log!(
            "desktop runtime starting: host={} layout={:?}",
            services.host_strategy.as_str(),
            layout
        );
        Self {
            state: DesktopState::with_z_base(config.z_index_base),
            config,
            services,
            layout,
            registry,
            interaction: InteractionState::default(),
            sessions: BTreeMap::new(),
            listeners: GestureListeners::default(),
            pager,
            pending_launch_params: None,
            pending_input_focus: None,
        }
    }

    /// Creates a desktop with the built-in app catalog registered.
    pub fn with_builtin_apps(config: DesktopConfig, services: HostServices) -> Self {
        let mut runtime = Self::new(config, services);
        runtime.register_all(builtin_descriptors());
        runtime
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn services(&self) -> &HostServices {
        &self.services
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Current viewport as a rect anchored at the origin.
    pub fn viewport(&self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.services.display.viewport_width,
            h: self.services.display.viewport_height,
        }
    }

    /// Records a new viewport size for window placement. The layout mode does not change.
    pub fn set_viewport_size(&mut self, width: i32, height: i32) {
        self.services.display.viewport_width = width;
        self.services.display.viewport_height = height;
    }

    /// Adds an app to the registry. Its launcher shows up on the next render.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateAppId`] when the id is taken; the first registration
    /// stays active.
    pub fn register(&mut self, descriptor: AppDescriptor) -> Result<(), RegistryError> {
        if let Err(err) = self.registry.register(descriptor) {
            warn!("app registration rejected: {err}");
            return Err(err);
        }
        self.rebuild_pager();
        Ok(())
    }

    /// Registers a batch, returning the rejected registrations.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = AppDescriptor>,
    ) -> Vec<RegistryError> {
        let errors = self.registry.register_all(descriptors);
        for err in &errors {
            warn!("app registration rejected: {err}");
        }
        self.rebuild_pager();
        errors
    }

    fn rebuild_pager(&mut self) {
        let page = self.pager.current_page();
        self.pager = MobilePager::new(
            &self.registry,
            self.config.apps_per_page,
            self.config.swipe_threshold,
        );
        self.pager.go_to(page);
    }

    /// Opens a new window for `app_id` and runs the app's launch hook in it.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::UnknownApp`] when `app_id` is not registered; nothing changes.
    pub fn launch(&mut self, app_id: &ApplicationId) -> Result<WindowId, DesktopError> {
        self.launch_with_params(app_id, Value::Null)
    }

    /// Like [`DesktopRuntime::launch`], passing `params` to the app's window container.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::UnknownApp`] when `app_id` is not registered.
    pub fn launch_with_params(
        &mut self,
        app_id: &ApplicationId,
        params: Value,
    ) -> Result<WindowId, DesktopError> {
        let Ok(descriptor) = self.registry.lookup(app_id) else {
            warn!("launch ignored: app `{app_id}` is not registered");
            return Err(DesktopError::UnknownApp(app_id.clone()));
        };
        let rect = centered_rect(
            initial_window_size(descriptor),
            self.viewport(),
            self.config.taskbar_height,
        );
        let request = OpenWindowRequest {
            kind: WindowKind::App(app_id.clone()),
            title: descriptor.title(),
            icon: descriptor.icon.clone(),
            rect,
            maximized: self.layout.is_mobile(),
        };

        let window_id = WindowId(self.state.next_window_id);
        self.pending_launch_params = Some(params);
        self.apply(DesktopAction::OpenWindow(request));
        log!("launched `{app_id}` in window {}", window_id.0);
        Ok(window_id)
    }

    pub fn focus(&mut self, window_id: WindowId) -> bool {
        self.apply(DesktopAction::FocusWindow { window_id })
    }

    /// Toggles the minimized flag.
    pub fn minimize(&mut self, window_id: WindowId) -> bool {
        self.apply(DesktopAction::ToggleMinimize { window_id })
    }

    pub fn toggle_maximize(&mut self, window_id: WindowId) -> bool {
        self.apply(DesktopAction::ToggleMaximize { window_id })
    }

    /// Closes a window, tearing down its app session. Closing twice is a no-op.
    pub fn close(&mut self, window_id: WindowId) -> bool {
        let closed = self.apply(DesktopAction::CloseWindow { window_id });
        if closed {
            log!("closed window {}", window_id.0);
        }
        closed
    }

    /// Taskbar click: restore if minimized, then focus.
    pub fn activate_from_taskbar(&mut self, window_id: WindowId) -> bool {
        self.apply(DesktopAction::ActivateFromTaskbar { window_id })
    }

    /// Opens the folder window for `category`, or restores and focuses the one already open.
    ///
    /// Returns `None` when the category has no registered apps.
    pub fn open_folder(
        &mut self,
        category: AppCategory,
        position: Option<PointerPosition>,
    ) -> Option<WindowId> {
        if let Some(existing) = self.state.folder_window(category).map(|w| w.id) {
            self.activate_from_taskbar(existing);
            return Some(existing);
        }
        if self.registry.apps_in_category(category).next().is_none() {
            return None;
        }
        let position = position.unwrap_or(DEFAULT_FOLDER_POSITION);
        let size = self.config.folder_window_size;
        let request = OpenWindowRequest {
            kind: WindowKind::Folder(category),
            title: format!("📁 {}", category.label()),
            icon: category.icon().to_string(),
            rect: WindowRect {
                x: position.x,
                y: position.y,
                w: size.width,
                h: size.height,
            },
            maximized: false,
        };
        let window_id = WindowId(self.state.next_window_id);
        self.apply(DesktopAction::OpenWindow(request));
        Some(window_id)
    }

    /// Opens every category folder, tiled across the viewport. Desktop layout only.
    pub fn auto_open_category_folders(&mut self) -> Vec<WindowId> {
        if self.layout.is_mobile() {
            return Vec::new();
        }
        let categories = self.registry.categories();
        let positions = tile_folder_positions(
            categories.len(),
            self.viewport(),
            self.config.folder_window_size,
            self.config.folder_tile_padding,
            self.config.folder_cascade_step,
            self.config.taskbar_height,
        );
        categories
            .into_iter()
            .zip(positions)
            .filter_map(|(category, position)| self.open_folder(category, Some(position)))
            .collect()
    }

    /// Launches an app picked inside a folder window, then closes that folder.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::UnknownApp`] when `app_id` is not registered; the folder stays open.
    pub fn launch_from_folder(
        &mut self,
        folder_window: WindowId,
        app_id: &ApplicationId,
    ) -> Result<WindowId, DesktopError> {
        let window_id = self.launch(app_id)?;
        self.close(folder_window);
        Ok(window_id)
    }

    /// Launches an app picked in the start menu. The menu closes either way.
    ///
    /// # Errors
    ///
    /// Returns [`DesktopError::UnknownApp`] when `app_id` is not registered.
    pub fn launch_from_start_menu(
        &mut self,
        app_id: &ApplicationId,
    ) -> Result<WindowId, DesktopError> {
        self.apply(DesktopAction::CloseStartMenu);
        self.launch(app_id)
    }

    pub fn toggle_start_menu(&mut self) {
        self.apply(DesktopAction::ToggleStartMenu);
    }

    pub fn close_start_menu(&mut self) {
        self.apply(DesktopAction::CloseStartMenu);
    }

    pub fn open_context_menu(&mut self, target: ContextMenuTarget, position: PointerPosition) {
        self.apply(DesktopAction::OpenContextMenu { target, position });
    }

    pub fn close_context_menu(&mut self) {
        self.apply(DesktopAction::CloseContextMenu);
    }

    /// Runs a context-menu entry and closes the menu.
    pub fn run_context_command(&mut self, command: &ContextMenuCommand) {
        self.close_context_menu();
        match command {
            ContextMenuCommand::Launch(app_id) => {
                if let Err(err) = self.launch(app_id) {
                    warn!("context menu launch failed: {err}");
                }
            }
            ContextMenuCommand::OpenFolder(category) => {
                self.open_folder(*category, None);
            }
        }
    }

    /// Pointer-down on a window frame part.
    ///
    /// Returns `true` when a drag or resize started; the caller then attaches its global
    /// move/up listeners through [`DesktopRuntime::attach_gesture_listener`].
    pub fn pointer_down(
        &mut self,
        window_id: WindowId,
        target: HitTarget,
        input: PointerInput,
    ) -> bool {
        let Some(action) =
            gesture_start_action(window_id, target, input, self.config.min_window_size)
        else {
            return false;
        };
        self.listeners.release();
        self.apply(action);
        !self.interaction.is_idle()
    }

    /// Routes a global move/up event to the active gesture.
    pub fn pointer_event(&mut self, input: PointerInput) {
        if let Some(action) = gesture_follow_up_action(&self.interaction, input) {
            self.apply(action);
        }
    }

    /// Hands a listener removal hook to the active gesture's scope.
    ///
    /// Without an active gesture the hook runs immediately.
    pub fn attach_gesture_listener(&mut self, remover: impl FnOnce() + 'static) {
        if self.interaction.is_idle() {
            remover();
        } else {
            self.listeners.attach(remover);
        }
    }

    pub fn gesture_listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Window whose primary input should receive keyboard focus, if one was just focused.
    pub fn take_input_focus_request(&mut self) -> Option<WindowId> {
        self.pending_input_focus.take()
    }

    pub fn pager(&self) -> &MobilePager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut MobilePager {
        &mut self.pager
    }

    pub fn desktop_folders(&self) -> Vec<presenter::DesktopFolder> {
        presenter::desktop_folders(&self.registry, self.layout)
    }

    pub fn start_menu_groups(&self) -> Vec<presenter::CategoryGroup> {
        presenter::start_menu_groups(&self.registry)
    }

    pub fn taskbar_entries(&self) -> Vec<presenter::TaskbarEntry> {
        presenter::taskbar_entries(&self.state)
    }

    pub fn folder_contents(&self, category: AppCategory) -> Vec<presenter::LauncherItem> {
        presenter::folder_contents(&self.registry, category)
    }

    pub fn context_menu_items(&self) -> Vec<presenter::ContextMenuItem> {
        self.state
            .context_menu
            .map(|menu| presenter::context_menu_items(menu.target))
            .unwrap_or_default()
    }

    /// Renders the app view for an open app window.
    pub fn render_window(&self, window_id: WindowId) -> Option<View> {
        self.sessions
            .get(&window_id)
            .map(|session| session.instance.render())
    }

    /// Window container of an open app window.
    pub fn container(&self, window_id: WindowId) -> Option<&WindowContainer> {
        self.sessions.get(&window_id).map(|session| &session.container)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Applies an action and executes the resulting effects in order.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::WindowNotFound`] for actions on windows that are not open.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<Vec<RuntimeEffect>, ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action)?;
        for effect in &effects {
            self.run_effect(effect);
        }
        Ok(effects)
    }

    fn apply(&mut self, action: DesktopAction) -> bool {
        self.dispatch(action).is_ok()
    }

    fn run_effect(&mut self, effect: &RuntimeEffect) {
        match effect {
            RuntimeEffect::MountApp(window_id) => self.mount_app(*window_id),
            RuntimeEffect::TeardownApp(window_id) => self.teardown_app(*window_id),
            RuntimeEffect::ReleaseGesture => {
                self.listeners.release();
            }
            RuntimeEffect::FocusWindowInput(window_id) => {
                self.pending_input_focus = Some(*window_id);
            }
            RuntimeEffect::Lifecycle { window_id, event } => {
                if let Some(session) = self.sessions.get_mut(window_id) {
                    session.instance.on_lifecycle(*event);
                }
            }
        }
    }

    fn mount_app(&mut self, window_id: WindowId) {
        let params = self.pending_launch_params.take().unwrap_or(Value::Null);
        let Some(app_id) = self
            .state
            .window(window_id)
            .and_then(|window| window.kind.app_id())
            .cloned()
        else {
            return;
        };
        let module = match self.registry.lookup(&app_id) {
            Ok(descriptor) => descriptor.module.clone(),
            Err(err) => {
                warn!("cannot mount window {}: {err}", window_id.0);
                return;
            }
        };
        let container = WindowContainer::new(
            window_id.0,
            app_id,
            params,
            self.services.store.clone(),
            self.services.timers.clone(),
        );
        let instance = module.on_launch(&container);
        self.sessions
            .insert(window_id, AppSession { container, instance });
    }

    fn teardown_app(&mut self, window_id: WindowId) {
        if let Some(mut session) = self.sessions.remove(&window_id) {
            session.instance.on_lifecycle(AppLifecycleEvent::Closing);
            session.container.teardown();
        }
    }
}

impl Drop for DesktopRuntime {
    fn drop(&mut self) {
        let open: Vec<WindowId> = self.sessions.keys().copied().collect();
        for window_id in open {
            self.teardown_app(window_id);
        }
    }
}
