//! `setInterval`-backed timer host.

#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
use std::{cell::RefCell, rc::Rc, time::Duration};

use platform_host::{TimerCallback, TimerHost, TimerId};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Default)]
struct BrowserTimers {
    #[cfg(target_arch = "wasm32")]
    live: HashMap<i32, Closure<dyn FnMut()>>,
    // Closures cleared from inside their own tick cannot be dropped until the tick returns.
    #[cfg(target_arch = "wasm32")]
    retired: Vec<Closure<dyn FnMut()>>,
    #[cfg(not(target_arch = "wasm32"))]
    _native: (),
}

#[derive(Clone, Default)]
/// Browser timer host keeping each interval closure alive until it is cleared.
pub struct BrowserTimerHost {
    timers: Rc<RefCell<BrowserTimers>>,
}

impl TimerHost for BrowserTimerHost {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return TimerId(0);
            };
            let mut timers = self.timers.borrow_mut();
            timers.retired.clear();

            let closure = Closure::wrap(callback);
            let millis = period.as_millis().min(i32::MAX as u128) as i32;
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            ) {
                Ok(handle) => {
                    timers.live.insert(handle, closure);
                    TimerId(handle as u64)
                }
                Err(_) => TimerId(0),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (period, callback, &self.timers);
            TimerId(0)
        }
    }

    fn clear_interval(&self, id: TimerId) {
        #[cfg(target_arch = "wasm32")]
        {
            let handle = id.0 as i32;
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
            let mut timers = self.timers.borrow_mut();
            if let Some(closure) = timers.live.remove(&handle) {
                timers.retired.push(closure);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = id;
        }
    }
}
