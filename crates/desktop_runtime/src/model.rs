use desktop_app_contract::{AppCategory, ApplicationId, WindowSize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

/// What a window hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowKind {
    /// A launched app session.
    App(ApplicationId),
    /// A transient category folder listing launchers.
    Folder(AppCategory),
}

impl WindowKind {
    pub fn app_id(&self) -> Option<&ApplicationId> {
        match self {
            Self::App(app_id) => Some(app_id),
            Self::Folder(_) => None,
        }
    }

    pub fn folder_category(&self) -> Option<AppCategory> {
        match self {
            Self::App(_) => None,
            Self::Folder(category) => Some(*category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKind,
    pub title: String,
    pub icon: String,
    /// Normal-state geometry. Kept while maximized so restore needs no extra field.
    pub rect: WindowRect,
    pub z_index: u32,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowRecord {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, WindowKind::Folder(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextMenuTarget {
    Desktop,
    Folder(AppCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuState {
    pub target: ContextMenuTarget,
    pub position: PointerPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub next_window_id: u64,
    /// Global stacking counter; each focus takes the current value and increments it.
    pub next_z_index: u32,
    /// Live windows in launch order.
    pub windows: Vec<WindowRecord>,
    pub start_menu_open: bool,
    pub context_menu: Option<ContextMenuState>,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::with_z_base(100)
    }
}

impl DesktopState {
    pub fn with_z_base(z_index_base: u32) -> Self {
        Self {
            next_window_id: 1,
            next_z_index: z_index_base,
            windows: Vec::new(),
            start_menu_open: false,
            context_menu: None,
        }
    }

    /// The non-minimized window with the highest z-order.
    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn folder_window(&self, category: AppCategory) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .find(|w| w.kind == WindowKind::Folder(category))
    }

    pub fn app_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| !w.is_folder())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub kind: WindowKind,
    pub title: String,
    pub icon: String,
    pub rect: WindowRect,
    pub maximized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Compass token used for handle class names.
    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    pub const fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub const fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub const fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub const fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    pub min_size: WindowSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    /// Window targeted by the active gesture, if any.
    pub fn gesture_window(&self) -> Option<WindowId> {
        self.dragging
            .as_ref()
            .map(|s| s.window_id)
            .or_else(|| self.resizing.as_ref().map(|s| s.window_id))
    }

    pub fn is_idle(&self) -> bool {
        self.dragging.is_none() && self.resizing.is_none()
    }
}
