//! Clock app: a face refreshed by a one-second interval owned by its window.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use desktop_app_contract::{AppInstance, AppModule, WindowContainer};
use leptos::*;
use platform_host::{local_clock_time, ClockTime};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default)]
pub struct ClockApp;

impl ClockApp {
    /// Starts the clock for `container` and returns the concrete instance.
    pub fn start(container: &WindowContainer) -> ClockInstance {
        let instance = ClockInstance {
            now: Rc::new(Cell::new(local_clock_time())),
            ticks: Rc::new(Cell::new(0)),
            display: Rc::new(RefCell::new(None)),
        };

        let now = instance.now.clone();
        let ticks = instance.ticks.clone();
        let display = instance.display.clone();
        let timer = container.set_interval(
            TICK,
            Box::new(move || {
                let time = local_clock_time();
                now.set(time);
                ticks.set(ticks.get() + 1);
                if let Some(signal) = *display.borrow() {
                    let _ = signal.try_set(time.hh_mm_ss());
                }
            }),
        );
        if timer.is_none() {
            logging::warn!("clock window {} closed before start", container.window_id());
        }
        instance
    }
}

impl AppModule for ClockApp {
    fn on_launch(&self, container: &WindowContainer) -> Box<dyn AppInstance> {
        Box::new(Self::start(container))
    }
}

pub struct ClockInstance {
    now: Rc<Cell<ClockTime>>,
    ticks: Rc<Cell<u64>>,
    display: Rc<RefCell<Option<RwSignal<String>>>>,
}

impl ClockInstance {
    /// Number of interval ticks received so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    pub fn now(&self) -> ClockTime {
        self.now.get()
    }
}

impl AppInstance for ClockInstance {
    fn render(&self) -> View {
        let text = create_rw_signal(self.now.get().hh_mm_ss());
        *self.display.borrow_mut() = Some(text);
        view! {
            <div class="app-shell app-clock-shell">
                <div class="app-clock-face" role="timer" aria-live="off">
                    {move || text.get()}
                </div>
            </div>
        }
        .into_view()
    }
}
