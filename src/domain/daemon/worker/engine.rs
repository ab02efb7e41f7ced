use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::clock::Clock;

/// Snapshot of what a [`TimerEngine`] is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub running: bool,
    pub remaining: Duration,
}

/// A repeating tick source bound to one target instant.
///
/// Every tick recomputes `until - now` from the [`Clock`], so the countdown
/// corrects itself after the process was suspended. The callback given to
/// [`TimerEngine::start`] runs at most once, and never after
/// [`TimerEngine::stop`] or after the engine was dropped.
pub struct TimerEngine {
    clock: Arc<dyn Clock>,
    tick: Duration,
    target: Option<DateTime<Utc>>,
    task: Option<JoinHandle<()>>,
}

impl TimerEngine {
    /// Creates a new stopped [`TimerEngine`] ticking every `tick`.
    pub fn new(clock: Arc<dyn Clock>, tick: Duration) -> Self {
        Self {
            clock,
            tick,
            target: None,
            task: None,
        }
    }

    /// Count down to `until` and invoke `on_expire` once it is reached. A
    /// previous countdown is cancelled without invoking its callback.
    ///
    /// If `until` has already passed, `on_expire` runs right away on the
    /// caller's task and the engine stays stopped.
    pub fn start<F>(&mut self, until: DateTime<Utc>, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.stop();

        if until <= self.clock.now() {
            tracing::debug!(%until, "Timer target already reached");
            on_expire();
            return;
        }

        let clock = Arc::clone(&self.clock);
        let tick = self.tick;
        self.target = Some(until);
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let remaining = until - clock.now();
                tracing::trace!(remaining = remaining.num_seconds(), "Tick");
                if remaining <= TimeDelta::zero() {
                    break;
                }
            }
            on_expire();
        }));
    }

    /// Cancel the countdown without invoking the callback. Stopping a stopped
    /// engine does nothing.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.target = None;
    }

    /// Returns `true` if a countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Time left until the target, zero when stopped.
    pub fn remaining_duration(&self) -> Duration {
        match self.target {
            Some(target) if self.is_running() => (target - self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO),
            _ => Duration::ZERO,
        }
    }

    /// Whole seconds left until the target, zero when stopped.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_duration().as_secs()
    }

    /// Returns `true` if the engine is running and its target lies before
    /// `instant`.
    pub fn will_expire_before(&self, instant: DateTime<Utc>) -> bool {
        self.is_running() && self.target.is_some_and(|target| target < instant)
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            running: self.is_running(),
            remaining: self.remaining_duration(),
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::clock::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn timer_engine_monotonic_countdown() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(10), callback);
        assert!(engine.is_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        for k in 0..10u64 {
            let remaining = engine.remaining_seconds();
            assert!(remaining + 1 >= 10 - k && remaining <= 10 - k, "{k}: {remaining}");
            assert_eq!(fired.load(Ordering::SeqCst), 0);
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_duration(), Duration::ZERO);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_never_fires_early() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(3), callback);

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_immediate_expiry() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() - TimeDelta::seconds(1), callback);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_stop_idempotent() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(5), callback);

        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_seconds(), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        engine.stop();
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_restart_replaces_countdown() {
        let (clock, mut engine) = new_engine();
        let (first, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(5), callback);
        let (second, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(8), callback);

        tokio::time::sleep(Duration::from_millis(6_500)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_drop_does_not_fire() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(2), callback);
        drop(engine);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_catches_up_after_suspension() {
        let (clock, mut engine) = new_engine();
        let (fired, callback) = new_counter();
        engine.start(clock.now() + TimeDelta::seconds(60), callback);

        clock.advance(Duration::from_secs(59));
        assert_eq!(engine.remaining_seconds(), 1);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_engine_will_expire_before() {
        let (clock, mut engine) = new_engine();
        let now = clock.now();
        assert!(!engine.will_expire_before(now + TimeDelta::hours(1)));

        engine.start(now + TimeDelta::seconds(30), || {});
        assert!(engine.will_expire_before(now + TimeDelta::seconds(31)));
        assert!(!engine.will_expire_before(now + TimeDelta::seconds(30)));

        engine.stop();
        assert!(!engine.will_expire_before(now + TimeDelta::seconds(31)));
    }

    fn new_engine() -> (Arc<ManualClock>, TimerEngine) {
        let clock = Arc::new(ManualClock::default());
        let engine = TimerEngine::new(clock.clone(), Duration::from_secs(1));
        (clock, engine)
    }

    fn new_counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let counter = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&counter);
        (counter, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }
}
