use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

/// Source of wall-clock time for everything that reasons about rest
/// intervals.
pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// A [`Clock`] backed by the operating system's real-time clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A [`Clock`] which follows tokio's clock from a fixed wall-clock anchor and
/// can additionally be moved forward by hand.
///
/// Under a paused tokio runtime this makes wall-clock time fully
/// deterministic: sleeping advances it together with every tokio timer, and
/// [`ManualClock::advance`] jumps it without firing any timer, which is what
/// happens to a suspended process.
#[derive(Debug)]
pub struct ManualClock {
    anchor: DateTime<Utc>,
    origin: Instant,
    offset: Mutex<TimeDelta>,
}

impl ManualClock {
    /// Creates a new [`ManualClock`] which reads `anchor` right now.
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            origin: Instant::now(),
            offset: Mutex::new(TimeDelta::zero()),
        }
    }

    /// Jump the wall clock forward without touching tokio's clock.
    pub fn advance(&self, duration: Duration) {
        let delta = TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX);
        let mut offset = self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        *offset = offset.checked_add(&delta).unwrap_or(TimeDelta::MAX);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = TimeDelta::from_std(self.origin.elapsed()).unwrap_or_default();
        let offset = *self.offset.lock().unwrap_or_else(PoisonError::into_inner);
        self.anchor + elapsed + offset
    }
}
