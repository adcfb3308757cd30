//! Wall-clock access and relative time phrasing.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

/// Source of "now". Injected everywhere a render depends on the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Clock fixed at `epoch_ms` milliseconds since the Unix epoch.
/// Out-of-range values clamp to the epoch itself.
pub fn fixed_clock(epoch_ms: i64) -> Arc<dyn Clock> {
    let at = Utc
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or_default();
    Arc::new(FixedClock::new(at))
}

/// Short relative phrase for `date` as seen from `now`: "45s ago", "in 2h", "3d ago".
///
/// Each unit is rounded from the already-rounded smaller unit, and the first
/// unit whose magnitude stays under its bound wins. Days are unbounded.
pub fn relative_time_string(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (date - now).num_milliseconds() as f64;
    let seconds = (diff_ms / 1000.0).round();
    let minutes = (seconds / 60.0).round();
    let hours = (minutes / 60.0).round();
    let days = (hours / 24.0).round();

    let (value, unit) = if seconds.abs() < 60.0 {
        (seconds, 's')
    } else if minutes.abs() < 60.0 {
        (minutes, 'm')
    } else if hours.abs() < 24.0 {
        (hours, 'h')
    } else {
        (days, 'd')
    };

    let magnitude = value.abs() as i64;
    if value < 0.0 {
        format!("{magnitude}{unit} ago")
    } else {
        format!("in {magnitude}{unit}")
    }
}
