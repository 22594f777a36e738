//! Time helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Wall-clock time of day.
pub struct ClockTime {
    /// Hour (0-23).
    pub hours: u32,
    /// Minute (0-59).
    pub minutes: u32,
    /// Second (0-59).
    pub seconds: u32,
}

impl ClockTime {
    /// Derives the UTC time of day from a unix millisecond timestamp.
    pub fn from_unix_ms(unix_ms: u64) -> Self {
        let secs_of_day = (unix_ms / 1_000) % 86_400;
        Self {
            hours: (secs_of_day / 3_600) as u32,
            minutes: ((secs_of_day % 3_600) / 60) as u32,
            seconds: (secs_of_day % 60) as u32,
        }
    }

    /// Formats as `HH:MM`.
    pub fn hh_mm(self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }

    /// Formats as `HH:MM:SS`.
    pub fn hh_mm_ss(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Returns the local time of day (browser local time on wasm, UTC elsewhere).
pub fn local_clock_time() -> ClockTime {
    #[cfg(target_arch = "wasm32")]
    {
        let now = js_sys::Date::new_0();
        ClockTime {
            hours: now.get_hours(),
            minutes: now.get_minutes(),
            seconds: now.get_seconds(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        ClockTime::from_unix_ms(unix_time_ms_now())
    }
}
