//! Test clock: deterministic `Clock` implementation for tests.

use chrono::{DateTime, Utc};
use echotrace_core::clock::Clock;

/// A clock that always returns a fixed point in time. Its time of day is the
/// UTC time of that instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock fixed at `hour:minute` UTC on an arbitrary day.
    ///
    /// # Panics
    ///
    /// Panics if `hour` or `minute` is out of range.
    #[must_use]
    pub fn at(hour: u32, minute: u32) -> Self {
        use chrono::TimeZone;
        Self(
            Utc.with_ymd_and_hms(2026, 1, 15, hour, minute, 0)
                .single()
                .expect("FixedClock::at requires a valid time of day"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
