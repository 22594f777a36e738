//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use desktop_app_contract::{AppLifecycleEvent, WindowSize};
use thiserror::Error;

use crate::{
    model::{
        ContextMenuState, ContextMenuTarget, DesktopState, DragSession, InteractionState,
        OpenWindowRequest, PointerPosition, ResizeEdge, ResizeSession, WindowId, WindowKind,
        WindowRecord,
    },
    window_manager::{dragged_rect, raise_window, resize_rect},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a new window using the supplied request.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise a window to the top of the stack.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Flip a window's minimized flag.
    ToggleMinimize {
        /// Window to minimize or restore.
        window_id: WindowId,
    },
    /// Flip a window's maximized flag.
    ToggleMaximize {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Taskbar click: restore the window if minimized, then focus it.
    ActivateFromTaskbar {
        /// Window associated with the taskbar button.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Show a context menu.
    OpenContextMenu {
        /// What was right-clicked.
        target: ContextMenuTarget,
        /// Where the menu appears.
        position: PointerPosition,
    },
    /// Hide the context menu.
    CloseContextMenu,
    /// Begin dragging a window.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window drag.
    EndMove,
    /// Begin resizing a window.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
        /// Smallest size the gesture may produce.
        min_size: WindowSize,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active window resize.
    EndResize,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the runtime controller to execute.
pub enum RuntimeEffect {
    /// Construct the app session for a freshly opened app window.
    MountApp(WindowId),
    /// Tear down the app session of a closed window.
    TeardownApp(WindowId),
    /// Drop the global move/up listeners of the active gesture.
    ReleaseGesture,
    /// Move focus into the newly focused window's primary input.
    FocusWindowInput(WindowId),
    /// Forward a lifecycle transition to the window's app instance.
    Lifecycle {
        /// Window whose app is notified.
        window_id: WindowId,
        /// Transition that happened.
        event: AppLifecycleEvent,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    /// The target window id was not found in the current state.
    #[error("window not found")]
    WindowNotFound,
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// State is left untouched when an error is returned.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when an action references a window that is not present.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let window_id = next_window_id(state);
            let mount = matches!(req.kind, WindowKind::App(_));
            state.windows.push(WindowRecord {
                id: window_id,
                kind: req.kind,
                title: req.title,
                icon: req.icon,
                rect: req.rect,
                z_index: 0,
                minimized: false,
                maximized: req.maximized,
            });
            raise_window(state, window_id);
            state.start_menu_open = false;
            state.context_menu = None;
            if mount {
                effects.push(RuntimeEffect::MountApp(window_id));
            }
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            let index = window_index(state, window_id)?;
            let record = state.windows.remove(index);
            if interaction.gesture_window() == Some(window_id) {
                *interaction = InteractionState::default();
                effects.push(RuntimeEffect::ReleaseGesture);
            }
            if let WindowKind::Folder(category) = record.kind {
                if state
                    .context_menu
                    .is_some_and(|menu| menu.target == ContextMenuTarget::Folder(category))
                {
                    state.context_menu = None;
                }
            } else {
                effects.push(RuntimeEffect::TeardownApp(window_id));
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window(state, window_id, &mut effects)?;
            state.start_menu_open = false;
        }
        DesktopAction::ToggleMinimize { window_id } => {
            let window = find_window_mut(state, window_id)?;
            window.minimized = !window.minimized;
            let event = if window.minimized {
                AppLifecycleEvent::Minimized
            } else {
                AppLifecycleEvent::Restored
            };
            effects.push(RuntimeEffect::Lifecycle { window_id, event });
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let window = find_window_mut(state, window_id)?;
            window.maximized = !window.maximized;
            let event = if window.maximized {
                AppLifecycleEvent::Maximized
            } else {
                AppLifecycleEvent::Unmaximized
            };
            effects.push(RuntimeEffect::Lifecycle { window_id, event });
        }
        DesktopAction::ActivateFromTaskbar { window_id } => {
            let window = find_window_mut(state, window_id)?;
            if window.minimized {
                window.minimized = false;
                effects.push(RuntimeEffect::Lifecycle {
                    window_id,
                    event: AppLifecycleEvent::Restored,
                });
            }
            focus_window(state, window_id, &mut effects)?;
            state.start_menu_open = false;
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
            state.context_menu = None;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::OpenContextMenu { target, position } => {
            state.context_menu = Some(ContextMenuState { target, position });
            state.start_menu_open = false;
        }
        DesktopAction::CloseContextMenu => {
            state.context_menu = None;
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let rect = find_window_mut(state, window_id)?.rect;
            focus_window(state, window_id, &mut effects)?;
            if window_is_fixed(state, window_id) {
                return Ok(effects);
            }
            interaction.resizing = None;
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start: rect,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            let Some(session) = interaction.dragging.clone() else {
                return Ok(effects);
            };
            let Some(window) = state.windows.iter_mut().find(|w| w.id == session.window_id) else {
                interaction.dragging = None;
                effects.push(RuntimeEffect::ReleaseGesture);
                return Ok(effects);
            };
            if !window.maximized {
                window.rect = dragged_rect(session.rect_start, session.pointer_start, pointer);
            }
        }
        DesktopAction::EndMove => {
            if interaction.dragging.take().is_some() {
                effects.push(RuntimeEffect::ReleaseGesture);
            }
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
            min_size,
        } => {
            let rect = find_window_mut(state, window_id)?.rect;
            focus_window(state, window_id, &mut effects)?;
            if window_is_fixed(state, window_id) {
                return Ok(effects);
            }
            interaction.dragging = None;
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start: rect,
                min_size,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            let Some(session) = interaction.resizing.clone() else {
                return Ok(effects);
            };
            let Some(window) = state.windows.iter_mut().find(|w| w.id == session.window_id) else {
                interaction.resizing = None;
                effects.push(RuntimeEffect::ReleaseGesture);
                return Ok(effects);
            };
            if !window.maximized {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                window.rect =
                    resize_rect(session.rect_start, session.edge, dx, dy, session.min_size);
            }
        }
        DesktopAction::EndResize => {
            if interaction.resizing.take().is_some() {
                effects.push(RuntimeEffect::ReleaseGesture);
            }
        }
    }

    Ok(effects)
}

fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

fn window_index(state: &DesktopState, window_id: WindowId) -> Result<usize, ReducerError> {
    state
        .windows
        .iter()
        .position(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound)
}

fn find_window_mut(
    state: &mut DesktopState,
    window_id: WindowId,
) -> Result<&mut WindowRecord, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| w.id == window_id)
        .ok_or(ReducerError::WindowNotFound)
}

// Maximized and minimized windows do not move or resize.
fn window_is_fixed(state: &DesktopState, window_id: WindowId) -> bool {
    state
        .window(window_id)
        .map(|w| w.maximized || w.minimized)
        .unwrap_or(true)
}

fn focus_window(
    state: &mut DesktopState,
    window_id: WindowId,
    effects: &mut Vec<RuntimeEffect>,
) -> Result<(), ReducerError> {
    let previously_focused = state.focused_window_id();
    if !raise_window(state, window_id) {
        return Err(ReducerError::WindowNotFound);
    }
    let focused = state.focused_window_id() == Some(window_id);
    if focused && previously_focused != Some(window_id) {
        effects.push(RuntimeEffect::Lifecycle {
            window_id,
            event: AppLifecycleEvent::Focused,
        });
    }
    if focused {
        effects.push(RuntimeEffect::FocusWindowInput(window_id));
    }
    Ok(())
}
