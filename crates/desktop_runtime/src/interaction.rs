//! Pointer normalization and gesture routing for window drag and resize.
//!
//! Mouse and touch events are reduced to one [`PointerInput`] shape before they reach the
//! reducer, so a gesture produces the same geometry whichever device drove it. Only
//! single-touch gestures are recognized.

use std::fmt;

use desktop_app_contract::WindowSize;

use crate::{
    model::{InteractionState, PointerPosition, ResizeEdge, WindowId},
    reducer::DesktopAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start(PointerPosition),
    Move(PointerPosition),
    /// Release. Touch ends carry no position.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub source: PointerSource,
    pub phase: PointerPhase,
}

/// Raw touch event family, mirroring `touchstart` / `touchmove` / `touchend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerInput {
    pub fn from_mouse(phase: PointerPhase) -> Self {
        Self {
            source: PointerSource::Mouse,
            phase,
        }
    }

    /// Normalizes a touch event from its active touch points.
    ///
    /// Returns `None` for start and move events that do not carry exactly one touch point.
    pub fn from_touches(phase: TouchPhase, touches: &[PointerPosition]) -> Option<Self> {
        let phase = match phase {
            TouchPhase::End | TouchPhase::Cancel => PointerPhase::End,
            TouchPhase::Start | TouchPhase::Move => {
                let [point] = touches else {
                    return None;
                };
                if phase == TouchPhase::Start {
                    PointerPhase::Start(*point)
                } else {
                    PointerPhase::Move(*point)
                }
            }
        };
        Some(Self {
            source: PointerSource::Touch,
            phase,
        })
    }
}

/// Part of a window frame a gesture started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Titlebar,
    /// Minimize/maximize/close buttons; never starts a drag.
    ControlButton,
    ResizeHandle(ResizeEdge),
    Body,
}

/// Action that begins a gesture for a pointer-down on `target`, if any.
pub fn gesture_start_action(
    window_id: WindowId,
    target: HitTarget,
    input: PointerInput,
    min_size: WindowSize,
) -> Option<DesktopAction> {
    let PointerPhase::Start(pointer) = input.phase else {
        return None;
    };
    match target {
        HitTarget::Titlebar => Some(DesktopAction::BeginMove { window_id, pointer }),
        HitTarget::ResizeHandle(edge) => Some(DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
            min_size,
        }),
        HitTarget::Body => Some(DesktopAction::FocusWindow { window_id }),
        HitTarget::ControlButton => None,
    }
}

/// Action continuing or ending the active gesture, if one is running.
pub fn gesture_follow_up_action(
    interaction: &InteractionState,
    input: PointerInput,
) -> Option<DesktopAction> {
    match (input.phase, &interaction.dragging, &interaction.resizing) {
        (PointerPhase::Move(pointer), Some(_), _) => Some(DesktopAction::UpdateMove { pointer }),
        (PointerPhase::Move(pointer), None, Some(_)) => {
            Some(DesktopAction::UpdateResize { pointer })
        }
        (PointerPhase::End, Some(_), _) => Some(DesktopAction::EndMove),
        (PointerPhase::End, None, Some(_)) => Some(DesktopAction::EndResize),
        _ => None,
    }
}

type ListenerRemover = Box<dyn FnOnce()>;

/// Owns the removal handles of the global move/up listeners attached for one gesture.
///
/// Removers run exactly once: on [`GestureListeners::release`] or when the scope is dropped.
#[derive(Default)]
pub struct GestureListeners {
    removers: Vec<ListenerRemover>,
}

impl GestureListeners {
    pub fn attach(&mut self, remover: impl FnOnce() + 'static) {
        self.removers.push(Box::new(remover));
    }

    /// Detaches every listener. Returns how many were released.
    pub fn release(&mut self) -> usize {
        let removers = std::mem::take(&mut self.removers);
        let count = removers.len();
        for remove in removers {
            remove();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.removers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.removers.is_empty()
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for GestureListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureListeners")
            .field("attached", &self.removers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::DragSession;

    const MIN: WindowSize = WindowSize::new(300, 200);

    #[test]
    fn touch_start_and_move_require_exactly_one_point() {
        let one = [PointerPosition::new(4, 5)];
        let two = [PointerPosition::new(4, 5), PointerPosition::new(9, 9)];

        assert_eq!(
            PointerInput::from_touches(TouchPhase::Start, &one),
            Some(PointerInput {
                source: PointerSource::Touch,
                phase: PointerPhase::Start(PointerPosition::new(4, 5)),
            })
        );
        assert_eq!(PointerInput::from_touches(TouchPhase::Move, &two), None);
        assert_eq!(PointerInput::from_touches(TouchPhase::Start, &[]), None);
        assert_eq!(
            PointerInput::from_touches(TouchPhase::End, &[]).map(|input| input.phase),
            Some(PointerPhase::End)
        );
        assert_eq!(
            PointerInput::from_touches(TouchPhase::Cancel, &two).map(|input| input.phase),
            Some(PointerPhase::End)
        );
    }

    #[test]
    fn hit_targets_map_to_gesture_actions() {
        let start = PointerInput::from_mouse(PointerPhase::Start(PointerPosition::new(1, 2)));
        let window_id = WindowId(3);

        assert_eq!(
            gesture_start_action(window_id, HitTarget::Titlebar, start, MIN),
            Some(DesktopAction::BeginMove {
                window_id,
                pointer: PointerPosition::new(1, 2)
            })
        );
        assert_eq!(
            gesture_start_action(
                window_id,
                HitTarget::ResizeHandle(ResizeEdge::SouthWest),
                start,
                MIN
            ),
            Some(DesktopAction::BeginResize {
                window_id,
                edge: ResizeEdge::SouthWest,
                pointer: PointerPosition::new(1, 2),
                min_size: MIN,
            })
        );
        assert_eq!(
            gesture_start_action(window_id, HitTarget::ControlButton, start, MIN),
            None
        );
        let moving = PointerInput::from_mouse(PointerPhase::Move(PointerPosition::new(1, 2)));
        assert_eq!(
            gesture_start_action(window_id, HitTarget::Titlebar, moving, MIN),
            None
        );
    }

    #[test]
    fn follow_up_needs_an_active_gesture() {
        let moving = PointerInput::from_mouse(PointerPhase::Move(PointerPosition::new(7, 8)));
        let idle = InteractionState::default();
        assert_eq!(gesture_follow_up_action(&idle, moving), None);

        let dragging = InteractionState {
            dragging: Some(DragSession {
                window_id: WindowId(1),
                pointer_start: PointerPosition::new(0, 0),
                rect_start: crate::model::WindowRect {
                    x: 0,
                    y: 0,
                    w: 400,
                    h: 300,
                },
            }),
            resizing: None,
        };
        assert_eq!(
            gesture_follow_up_action(&dragging, moving),
            Some(DesktopAction::UpdateMove {
                pointer: PointerPosition::new(7, 8)
            })
        );
        assert_eq!(
            gesture_follow_up_action(
                &dragging,
                PointerInput::from_touches(TouchPhase::End, &[]).expect("end")
            ),
            Some(DesktopAction::EndMove)
        );
    }

    #[test]
    fn listeners_are_released_once_on_release_or_drop() {
        let released = Rc::new(Cell::new(0));

        let mut listeners = GestureListeners::default();
        for _ in 0..2 {
            let counter = released.clone();
            listeners.attach(move || counter.set(counter.get() + 1));
        }
        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners.release(), 2);
        assert_eq!(listeners.release(), 0);
        assert!(listeners.is_empty());

        let counter = released.clone();
        listeners.attach(move || counter.set(counter.get() + 1));
        drop(listeners);
        assert_eq!(released.get(), 3);
    }
}
