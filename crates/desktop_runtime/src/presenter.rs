//! View models for the desktop surface: folders, start menu, taskbar, context menus, and the
//! paginated launcher grid used on small touch screens.
//!
//! Everything here is derived from the registry and [`DesktopState`] on demand. Nothing is
//! cached, so a registration or window change shows up on the next render.

use desktop_app_contract::{AppCategory, AppDescriptor, ApplicationId};
use platform_host::DisplayEnvironment;

use crate::{
    model::{ContextMenuTarget, DesktopState, WindowId},
    registry::AppRegistry,
};

/// Startup layout decision. Not re-evaluated on resize or rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Desktop,
    Mobile,
}

impl LayoutMode {
    /// Mobile when the device is touch-capable and the viewport is at most `breakpoint` wide.
    pub fn detect(display: &DisplayEnvironment, breakpoint: i32) -> Self {
        if display.touch_capable && display.viewport_width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherItem {
    pub app_id: ApplicationId,
    pub name: String,
    pub icon: String,
}

impl From<&AppDescriptor> for LauncherItem {
    fn from(app: &AppDescriptor) -> Self {
        Self {
            app_id: app.id.clone(),
            name: app.name.clone(),
            icon: app.icon.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopFolder {
    pub category: AppCategory,
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: AppCategory,
    pub header: String,
    pub items: Vec<LauncherItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    pub label: String,
    pub minimized: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextMenuCommand {
    Launch(ApplicationId),
    OpenFolder(AppCategory),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuItem {
    pub label: &'static str,
    pub command: ContextMenuCommand,
}

/// One folder icon per category with registered apps. The mobile grid replaces folders.
pub fn desktop_folders(registry: &AppRegistry, layout: LayoutMode) -> Vec<DesktopFolder> {
    if layout.is_mobile() {
        return Vec::new();
    }
    registry
        .categories()
        .into_iter()
        .map(|category| DesktopFolder {
            category,
            icon: category.icon(),
            label: category.name(),
        })
        .collect()
}

pub fn start_menu_groups(registry: &AppRegistry) -> Vec<CategoryGroup> {
    registry
        .categories()
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            header: category.label(),
            items: folder_contents(registry, category),
        })
        .collect()
}

pub fn folder_contents(registry: &AppRegistry, category: AppCategory) -> Vec<LauncherItem> {
    registry
        .apps_in_category(category)
        .map(LauncherItem::from)
        .collect()
}

/// Taskbar buttons for open app windows in launch order. Folder windows have none.
pub fn taskbar_entries(state: &DesktopState) -> Vec<TaskbarEntry> {
    let focused = state.focused_window_id();
    state
        .app_windows()
        .map(|window| TaskbarEntry {
            window_id: window.id,
            label: window.title.clone(),
            minimized: window.minimized,
            focused: focused == Some(window.id),
        })
        .collect()
}

pub fn context_menu_items(target: ContextMenuTarget) -> Vec<ContextMenuItem> {
    match target {
        ContextMenuTarget::Desktop => vec![
            ContextMenuItem {
                label: "⚙️ Settings",
                command: ContextMenuCommand::Launch(ApplicationId::trusted("settings")),
            },
            ContextMenuItem {
                label: "❓ Help",
                command: ContextMenuCommand::Launch(ApplicationId::trusted("help")),
            },
        ],
        ContextMenuTarget::Folder(category) => vec![ContextMenuItem {
            label: "📂 Open",
            command: ContextMenuCommand::OpenFolder(category),
        }],
    }
}

/// Paginated launcher grid for [`LayoutMode::Mobile`].
#[derive(Debug, Clone, PartialEq)]
pub struct MobilePager {
    pages: Vec<Vec<LauncherItem>>,
    current: usize,
    swipe_threshold: f64,
}

impl MobilePager {
    /// Lays every registered app out in category order, `per_page` to a page.
    pub fn new(registry: &AppRegistry, per_page: usize, swipe_threshold: f64) -> Self {
        let items: Vec<LauncherItem> = registry
            .categories()
            .into_iter()
            .flat_map(|category| folder_contents(registry, category))
            .collect();
        let pages = items
            .chunks(per_page.max(1))
            .map(<[LauncherItem]>::to_vec)
            .collect();
        Self {
            pages,
            current: 0,
            swipe_threshold,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn items(&self) -> &[LauncherItem] {
        self.pages.get(self.current).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pages(&self) -> &[Vec<LauncherItem>] {
        &self.pages
    }

    /// Jumps to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.current = page.min(self.page_count().saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.go_to(self.current.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    /// Finishes a horizontal swipe of `dx` pixels. Rightward swipes go back.
    ///
    /// Returns whether the page changed.
    pub fn swipe(&mut self, dx: f64, viewport_width: f64) -> bool {
        let before = self.current;
        let threshold = viewport_width * self.swipe_threshold;
        if dx > threshold {
            self.prev();
        } else if dx < -threshold {
            self.next();
        }
        before != self.current
    }

    /// Horizontal offset in percent of the viewport for a swipe still in progress.
    pub fn drag_offset_percent(&self, dx: f64, viewport_width: f64) -> f64 {
        let base = -(self.current as f64) * 100.0;
        if viewport_width <= 0.0 {
            return base;
        }
        base + dx / viewport_width * 100.0
    }

    /// Page dots, `true` for the active page. Empty when there is a single page.
    pub fn dots(&self) -> Vec<bool> {
        if !self.shows_indicator() {
            return Vec::new();
        }
        (0..self.page_count())
            .map(|page| page == self.current)
            .collect()
    }

    pub fn shows_indicator(&self) -> bool {
        self.page_count() > 1
    }

    pub fn shows_left_arrow(&self) -> bool {
        self.shows_indicator() && self.current > 0
    }

    pub fn shows_right_arrow(&self) -> bool {
        self.shows_indicator() && self.current + 1 < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use desktop_app_contract::{AppInstance, AppModule, WindowContainer};
    use leptos::{IntoView, View};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowKind, WindowRecord, WindowRect};

    struct Blank;

    impl AppInstance for Blank {
        fn render(&self) -> View {
            ().into_view()
        }
    }

    impl AppModule for Blank {
        fn on_launch(&self, _container: &WindowContainer) -> Box<dyn AppInstance> {
            Box::new(Blank)
        }
    }

    fn registry_with(apps: &[(&str, AppCategory)]) -> AppRegistry {
        let mut registry = AppRegistry::default();
        for (id, category) in apps {
            registry
                .register(AppDescriptor::new(
                    ApplicationId::trusted(*id),
                    id.to_uppercase(),
                    "🧪",
                    *category,
                    Rc::new(Blank),
                ))
                .expect("register");
        }
        registry
    }

    fn numbered_registry(count: usize) -> AppRegistry {
        let ids: Vec<String> = (0..count).map(|n| format!("app{n}")).collect();
        let apps: Vec<(&str, AppCategory)> = ids
            .iter()
            .map(|id| (id.as_str(), AppCategory::Games))
            .collect();
        registry_with(&apps)
    }

    fn record(id: u64, kind: WindowKind, z_index: u32, minimized: bool) -> WindowRecord {
        WindowRecord {
            id: WindowId(id),
            kind,
            title: format!("🧪 Window {id}"),
            icon: "🧪".to_string(),
            rect: WindowRect {
                x: 0,
                y: 0,
                w: 400,
                h: 300,
            },
            z_index,
            minimized,
            maximized: false,
        }
    }

    #[test]
    fn layout_is_mobile_only_for_small_touch_screens() {
        let display = |width, touch| DisplayEnvironment {
            viewport_width: width,
            viewport_height: 900,
            touch_capable: touch,
        };
        assert_eq!(LayoutMode::detect(&display(768, true), 768), LayoutMode::Mobile);
        assert_eq!(LayoutMode::detect(&display(769, true), 768), LayoutMode::Desktop);
        assert_eq!(LayoutMode::detect(&display(400, false), 768), LayoutMode::Desktop);
    }

    #[test]
    fn folders_and_menu_groups_follow_registration_order() {
        let registry = registry_with(&[
            ("snake", AppCategory::Games),
            ("calc", AppCategory::Utilities),
            ("memory", AppCategory::Games),
        ]);

        let folders = desktop_folders(&registry, LayoutMode::Desktop);
        assert_eq!(
            folders,
            vec![
                DesktopFolder {
                    category: AppCategory::Games,
                    icon: "🎮",
                    label: "Games"
                },
                DesktopFolder {
                    category: AppCategory::Utilities,
                    icon: "🛠️",
                    label: "Utilities"
                },
            ]
        );
        assert!(desktop_folders(&registry, LayoutMode::Mobile).is_empty());

        let groups = start_menu_groups(&registry);
        assert_eq!(groups[0].header, "🎮 Games");
        let names: Vec<&str> = groups[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["SNAKE", "MEMORY"]);
    }

    #[test]
    fn taskbar_lists_app_windows_only_and_flags_focus() {
        let mut state = DesktopState::default();
        state.windows = vec![
            record(1, WindowKind::App(ApplicationId::trusted("clock")), 100, false),
            record(2, WindowKind::Folder(AppCategory::Games), 103, false),
            record(3, WindowKind::App(ApplicationId::trusted("notepad")), 102, true),
        ];

        let entries = taskbar_entries(&state);
        assert_eq!(
            entries,
            vec![
                TaskbarEntry {
                    window_id: WindowId(1),
                    label: "🧪 Window 1".to_string(),
                    minimized: false,
                    focused: false,
                },
                TaskbarEntry {
                    window_id: WindowId(3),
                    label: "🧪 Window 3".to_string(),
                    minimized: true,
                    focused: false,
                },
            ]
        );
    }

    #[test]
    fn context_menus_offer_settings_help_and_open() {
        let desktop: Vec<&str> = context_menu_items(ContextMenuTarget::Desktop)
            .iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(desktop, vec!["⚙️ Settings", "❓ Help"]);
        assert_eq!(
            context_menu_items(ContextMenuTarget::Folder(AppCategory::System)),
            vec![ContextMenuItem {
                label: "📂 Open",
                command: ContextMenuCommand::OpenFolder(AppCategory::System),
            }]
        );
    }

    #[test]
    fn pager_splits_twenty_per_page_and_clamps_navigation() {
        let registry = numbered_registry(45);
        let mut pager = MobilePager::new(&registry, 20, 0.2);

        assert_eq!(pager.page_count(), 3);
        assert_eq!(pager.items().len(), 20);
        assert!(!pager.shows_left_arrow());
        assert!(pager.shows_right_arrow());

        pager.prev();
        assert_eq!(pager.current_page(), 0);
        pager.go_to(10);
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.items().len(), 5);
        assert!(!pager.shows_right_arrow());
        assert_eq!(pager.dots(), vec![false, false, true]);
        pager.next();
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn swipe_needs_twenty_percent_of_the_width() {
        let registry = numbered_registry(30);
        let mut pager = MobilePager::new(&registry, 20, 0.2);

        assert!(!pager.swipe(-70.0, 400.0));
        assert!(pager.swipe(-90.0, 400.0));
        assert_eq!(pager.current_page(), 1);
        assert!(!pager.swipe(-200.0, 400.0));
        assert!(pager.swipe(81.0, 400.0));
        assert_eq!(pager.current_page(), 0);
        assert_eq!(pager.drag_offset_percent(-40.0, 400.0), -10.0);
    }

    #[test]
    fn single_page_has_no_indicator() {
        let registry = numbered_registry(3);
        let pager = MobilePager::new(&registry, 20, 0.2);
        assert_eq!(pager.page_count(), 1);
        assert!(pager.dots().is_empty());
        assert!(!pager.shows_left_arrow());
        assert!(!pager.shows_right_arrow());
    }
}
