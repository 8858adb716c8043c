//! Time source for comment timestamps.
//!
//! Comments are dated on the client at submission time, in local time.
//! The clock is injected into the comment store so tests can pin it.

use chrono::{Local, NaiveDateTime};

/// Display format of a comment date: `HH:MM DD.MM.YYYY`.
pub const COMMENT_DATE_FORMAT: &str = "%H:%M %d.%m.%Y";

pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn format_comment_date(at: &NaiveDateTime) -> String {
    at.format(COMMENT_DATE_FORMAT).to_string()
}
