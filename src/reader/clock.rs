// src/reader/clock.rs
use chrono::{DateTime, Utc};

/// Time source used to stamp aggregated readings
///
/// Injected into [`StreamReader`] so tests can supply deterministic instants
/// instead of the wall clock.
///
/// [`StreamReader`]: crate::reader::StreamReader
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock UTC time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
