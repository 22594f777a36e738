//! Window-manager geometry and stacking helpers used by the desktop reducer and runtime.

use desktop_app_contract::{AppCategory, AppDescriptor, WindowSize};

use crate::model::{DesktopState, PointerPosition, ResizeEdge, WindowId, WindowRect};

/// Closest a centered window may sit to the viewport's top-left corner.
pub const MIN_WINDOW_MARGIN: i32 = 20;

/// Default window size for apps that declare none.
pub fn category_default_size(category: AppCategory) -> WindowSize {
    match category {
        AppCategory::Games => WindowSize::new(500, 600),
        AppCategory::Utilities => WindowSize::new(600, 500),
        AppCategory::Productivity => WindowSize::new(700, 500),
        AppCategory::Entertainment => WindowSize::new(650, 550),
        AppCategory::System => WindowSize::new(700, 600),
        AppCategory::Ai | AppCategory::External | AppCategory::Custom => WindowSize::new(600, 400),
    }
}

/// Preferred size of `descriptor`, falling back to its category default.
pub fn initial_window_size(descriptor: &AppDescriptor) -> WindowSize {
    descriptor
        .window_size
        .unwrap_or_else(|| category_default_size(descriptor.category))
}

/// Centers `size` in `viewport` with the taskbar strip removed.
pub fn centered_rect(size: WindowSize, viewport: WindowRect, taskbar_height: i32) -> WindowRect {
    WindowRect {
        x: viewport.x + ((viewport.w - size.width) / 2).max(MIN_WINDOW_MARGIN),
        y: viewport.y + ((viewport.h - size.height - taskbar_height) / 2).max(MIN_WINDOW_MARGIN),
        w: size.width,
        h: size.height,
    }
}

/// Area windows maximize into: the viewport minus the taskbar.
pub fn work_area(viewport: WindowRect, taskbar_height: i32) -> WindowRect {
    WindowRect {
        h: (viewport.h - taskbar_height).max(0),
        ..viewport
    }
}

/// Gives `window_id` the next z-order value.
///
/// Returns `false` when the window does not exist; nothing changes in that case.
pub fn raise_window(state: &mut DesktopState, window_id: WindowId) -> bool {
    let z_index = state.next_z_index;
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.z_index = z_index;
    state.next_z_index = state.next_z_index.saturating_add(1);
    true
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Width and height never drop below the minimum. North and west edges move the origin so the
/// opposite edge stays where it was, including while clamped.
pub fn resize_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    min: WindowSize,
) -> WindowRect {
    let mut rect = start;

    if edge.moves_east() {
        rect.w = (start.w + dx).max(min.width);
    } else if edge.moves_west() {
        rect.w = (start.w - dx).max(min.width);
        rect.x = start.right() - rect.w;
    }

    if edge.moves_south() {
        rect.h = (start.h + dy).max(min.height);
    } else if edge.moves_north() {
        rect.h = (start.h - dy).max(min.height);
        rect.y = start.bottom() - rect.h;
    }

    rect
}

/// Moves a drag-start rect by the pointer travel since the drag began.
pub fn dragged_rect(
    rect_start: WindowRect,
    pointer_start: PointerPosition,
    pointer: PointerPosition,
) -> WindowRect {
    rect_start.offset(pointer.x - pointer_start.x, pointer.y - pointer_start.y)
}

/// Positions for `count` folder windows: a grid of at most three columns, then a cascade for
/// folders whose row would run past the bottom of the work area.
pub fn tile_folder_positions(
    count: usize,
    viewport: WindowRect,
    folder: WindowSize,
    padding: i32,
    cascade_step: i32,
    taskbar_height: i32,
) -> Vec<PointerPosition> {
    let available_w = viewport.w - padding * 2;
    let available_h = viewport.h - taskbar_height - padding * 2;
    let cell_w = folder.width + padding;
    let cell_h = folder.height + padding;
    let cols = (available_w / cell_w).clamp(1, 3) as usize;
    let rows_that_fit = (available_h / cell_h).max(0) as usize;

    (0..count)
        .map(|index| {
            let col = (index % cols) as i32;
            let row = (index / cols) as i32;
            let y = padding + row * cell_h;
            if y + folder.height < available_h {
                PointerPosition::new(viewport.x + padding + col * cell_w, viewport.y + y)
            } else {
                let overflow = index.saturating_sub(cols * rows_that_fit) as i32;
                let offset = overflow * cascade_step;
                PointerPosition::new(
                    viewport.x + padding + offset,
                    viewport.y + padding + offset,
                )
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MIN: WindowSize = WindowSize::new(300, 200);

    fn rect(x: i32, y: i32, w: i32, h: i32) -> WindowRect {
        WindowRect { x, y, w, h }
    }

    #[test]
    fn centered_rect_respects_taskbar_and_margin() {
        let viewport = rect(0, 0, 1280, 800);
        assert_eq!(
            centered_rect(WindowSize::new(600, 500), viewport, 40),
            rect(340, 130, 600, 500)
        );
        assert_eq!(
            centered_rect(WindowSize::new(900, 700), rect(0, 0, 800, 600), 40),
            rect(20, 20, 900, 700)
        );
    }

    #[test]
    fn category_defaults_cover_known_and_other_categories() {
        assert_eq!(
            category_default_size(AppCategory::Games),
            WindowSize::new(500, 600)
        );
        assert_eq!(
            category_default_size(AppCategory::System),
            WindowSize::new(700, 600)
        );
        assert_eq!(
            category_default_size(AppCategory::Custom),
            WindowSize::new(600, 400)
        );
    }

    #[test]
    fn east_and_south_resize_keep_origin() {
        let start = rect(100, 100, 400, 300);
        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, 50, -40, MIN),
            rect(100, 100, 450, 260)
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::East, -500, 0, MIN),
            rect(100, 100, 300, 300)
        );
    }

    #[test]
    fn north_west_resize_moves_origin_and_anchors_opposite_edges() {
        let start = rect(100, 100, 400, 300);
        assert_eq!(
            resize_rect(start, ResizeEdge::NorthWest, 30, 20, MIN),
            rect(130, 120, 370, 280)
        );

        let clamped = resize_rect(start, ResizeEdge::NorthWest, 250, 250, MIN);
        assert_eq!(clamped, rect(200, 200, 300, 200));
        assert_eq!(clamped.right(), start.right());
        assert_eq!(clamped.bottom(), start.bottom());
    }

    #[test]
    fn single_axis_edges_leave_the_other_axis_alone() {
        let start = rect(50, 60, 400, 300);
        assert_eq!(
            resize_rect(start, ResizeEdge::North, 99, -10, MIN),
            rect(50, 50, 400, 310)
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::West, 10, 99, MIN),
            rect(60, 60, 390, 300)
        );
    }

    #[test]
    fn raise_window_uses_counter_and_ignores_missing_ids() {
        let mut state = DesktopState::default();
        assert!(!raise_window(&mut state, WindowId(9)));
        assert_eq!(state.next_z_index, 100);
    }

    #[test]
    fn folders_tile_in_three_columns_then_cascade() {
        let positions = tile_folder_positions(
            5,
            rect(0, 0, 1400, 1200),
            WindowSize::new(400, 500),
            20,
            30,
            40,
        );
        assert_eq!(
            positions,
            vec![
                PointerPosition::new(20, 20),
                PointerPosition::new(440, 20),
                PointerPosition::new(860, 20),
                PointerPosition::new(20, 540),
                PointerPosition::new(440, 540),
            ]
        );

        let cascaded = tile_folder_positions(
            4,
            rect(0, 0, 1400, 800),
            WindowSize::new(400, 500),
            20,
            30,
            40,
        );
        assert_eq!(
            cascaded,
            vec![
                PointerPosition::new(20, 20),
                PointerPosition::new(440, 20),
                PointerPosition::new(860, 20),
                PointerPosition::new(20, 20),
            ]
        );
    }

    #[test]
    fn narrow_viewport_still_gets_one_column() {
        let positions =
            tile_folder_positions(2, rect(0, 0, 300, 2000), WindowSize::new(400, 500), 20, 30, 40);
        assert_eq!(positions[1], PointerPosition::new(20, 540));
    }
}
