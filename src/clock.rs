//! Time sources for the engine.
//!
//! Every operation that reads "now" takes a [`Clock`] so hosts can pin time
//! in tests. Production code passes [`DefaultClock`].

use chrono::{DateTime, Local, Utc};
pub use mockable::{Clock, DefaultClock};

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
