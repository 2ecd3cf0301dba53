//! Clock capability passed into every calculation instead of reading ambient time.

use crate::progress::Instant;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The host's local clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at one instant. Used by tests and the `--at` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Instant);

impl FixedClock {
    pub fn new(at: Instant) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// Parse a local instant given as `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`
/// or a bare `YYYY-MM-DD` (midnight).
pub fn parse_instant(s: &str) -> Result<Instant, chrono::ParseError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|e| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|_| e)
        })
}
