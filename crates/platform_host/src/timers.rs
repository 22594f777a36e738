//! Interval timer contracts.
//!
//! Every periodic callback an app starts must be cancellable by the window manager when the
//! owning window closes, so timers are created through a [`TimerHost`] and identified by a
//! [`TimerId`] that the caller keeps.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

/// Callback invoked on every interval tick.
pub type TimerCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Handle identifying an interval registered with a [`TimerHost`].
pub struct TimerId(pub u64);

/// Host service for periodic callbacks (`setInterval` / `clearInterval` semantics).
pub trait TimerHost {
    /// Registers `callback` to run every `period` until cleared.
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerId;

    /// Cancels an interval. Clearing an unknown or already cleared id is a no-op.
    fn clear_interval(&self, id: TimerId);
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer host that never fires, for targets without a timer facility.
pub struct NoopTimerHost;

impl TimerHost for NoopTimerHost {
    fn set_interval(&self, _period: Duration, _callback: TimerCallback) -> TimerId {
        TimerId(0)
    }

    fn clear_interval(&self, _id: TimerId) {}
}

struct ManualTimer {
    period_ms: u64,
    next_due_ms: u64,
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct ManualTimerState {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<TimerId, ManualTimer>,
}

#[derive(Clone, Default)]
/// Deterministic timer host driven by [`ManualTimerHost::advance`]. Clones share one clock.
pub struct ManualTimerHost {
    inner: Rc<RefCell<ManualTimerState>>,
}

impl ManualTimerHost {
    /// Returns the number of live intervals.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Returns whether `id` is still registered.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.contains_key(&id)
    }

    /// Returns the simulated clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Advances the simulated clock, firing due intervals in due-time order.
    ///
    /// Callbacks may register or clear timers while running.
    pub fn advance(&self, by: Duration) {
        let target = self
            .inner
            .borrow()
            .now_ms
            .saturating_add(by.as_millis() as u64);

        loop {
            let due = {
                let mut state = self.inner.borrow_mut();
                let next = state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.next_due_ms <= target)
                    .min_by_key(|(id, timer)| (timer.next_due_ms, **id))
                    .map(|(id, timer)| (*id, timer.next_due_ms));
                match next {
                    Some((id, due_ms)) => {
                        state.now_ms = due_ms;
                        state.timers.get_mut(&id).and_then(|timer| {
                            timer.next_due_ms = due_ms.saturating_add(timer.period_ms);
                            timer.callback.take().map(|callback| (id, callback))
                        })
                    }
                    None => break,
                }
            };

            let Some((id, mut callback)) = due else {
                continue;
            };
            callback();
            if let Some(timer) = self.inner.borrow_mut().timers.get_mut(&id) {
                timer.callback = Some(callback);
            }
        }

        self.inner.borrow_mut().now_ms = target;
    }
}

impl TimerHost for ManualTimerHost {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let period_ms = (period.as_millis() as u64).max(1);
        let next_due_ms = state.now_ms.saturating_add(period_ms);
        state.timers.insert(
            id,
            ManualTimer {
                period_ms,
                next_due_ms,
                callback: Some(callback),
            },
        );
        id
    }

    fn clear_interval(&self, id: TimerId) {
        self.inner.borrow_mut().timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn manual_host_fires_each_elapsed_period() {
        let host = ManualTimerHost::default();
        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();
        let id = host.set_interval(
            Duration::from_secs(1),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        host.advance(Duration::from_millis(999));
        assert_eq!(ticks.get(), 0);
        host.advance(Duration::from_millis(1));
        assert_eq!(ticks.get(), 1);
        host.advance(Duration::from_secs(3));
        assert_eq!(ticks.get(), 4);
        assert!(host.is_active(id));
        assert_eq!(host.now_ms(), 4_000);
    }

    #[test]
    fn cleared_interval_stops_firing() {
        let host = ManualTimerHost::default();
        let ticks = Rc::new(Cell::new(0));
        let counter = ticks.clone();
        let id = host.set_interval(
            Duration::from_millis(100),
            Box::new(move || counter.set(counter.get() + 1)),
        );
        host.advance(Duration::from_millis(250));
        host.clear_interval(id);
        host.clear_interval(id);
        host.advance(Duration::from_secs(1));

        assert_eq!(ticks.get(), 2);
        assert_eq!(host.active_count(), 0);
    }

    #[test]
    fn callback_may_clear_its_own_interval() {
        let host = ManualTimerHost::default();
        let ticks = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None::<TimerId>));

        let counter = ticks.clone();
        let handle = host.clone();
        let id_slot = own_id.clone();
        let id = host.set_interval(
            Duration::from_millis(10),
            Box::new(move || {
                counter.set(counter.get() + 1);
                if let Some(id) = id_slot.get() {
                    handle.clear_interval(id);
                }
            }),
        );
        own_id.set(Some(id));

        host.advance(Duration::from_millis(100));
        assert_eq!(ticks.get(), 1);
        assert!(!host.is_active(id));
    }
}
