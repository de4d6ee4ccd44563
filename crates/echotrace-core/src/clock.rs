//! Clock abstraction for determinism.

use chrono::{DateTime, Local, NaiveTime, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the wall-clock time of day at the installation.
    ///
    /// Quiet-hours windows are expressed in local time, so production clocks
    /// override this. The default reads the time of day off [`Clock::now`].
    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }
}
