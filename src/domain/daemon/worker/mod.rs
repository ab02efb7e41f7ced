mod engine;
mod handle;
mod manager;
mod routine;

pub use engine::{EngineStatus, TimerEngine};
pub use handle::{Request, RestTimerHandle, WorkerGoneError};
pub use routine::TimerPolicy;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::domain::clock::Clock;
use crate::domain::daemon::outbound::AlertPort;
use crate::domain::repository::{SlotStorage, StateGateway};

use manager::RestTimerManager;
use routine::WorkerRoutine;

const COMMAND_BUFFER: usize = 16;

/// Spawn the rest timer worker. The persisted state is restored and
/// reconciled before this function returns, so the handle never exposes a
/// state that disagrees with the wall clock.
pub async fn spawn(
    clock: Arc<dyn Clock>,
    storage: Arc<dyn SlotStorage>,
    alerts: Arc<dyn AlertPort>,
    policy: TimerPolicy,
) -> RestTimerHandle {
    let (requester, commands) = mpsc::channel(COMMAND_BUFFER);
    let (notifier, events) = mpsc::unbounded_channel();
    let (publisher, observer) = watch::channel(None);

    let gateway = StateGateway::new(storage);
    let mut manager = RestTimerManager::new(clock, gateway, alerts, policy, notifier, publisher);
    manager.restore_state().await;

    let worker = WorkerRoutine::new(manager, commands, events).spawn();
    RestTimerHandle::new(requester, observer, worker)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use chrono::{TimeDelta, Utc};
    use uuid::Uuid;

    use crate::daemon::repository::MemorySlotStorage;
    use crate::domain::clock::ManualClock;
    use crate::domain::daemon::outbound::AlertError;
    use crate::domain::entity::state::MAX_REST_SECONDS;
    use crate::domain::entity::{RestPhase, RestTimerState, StartRest, WorkoutRef};
    use crate::domain::repository::REST_TIMER_SLOT;

    #[tokio::test(start_paused = true)]
    async fn full_lifecycle() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        assert_eq!(handle.current(), None);

        let started = handle.start_rest(new_request(60)).await?.unwrap();
        assert_eq!(started.phase, RestPhase::Running);
        assert_eq!(fixture.persisted(), Some(started.clone()));
        assert!(handle.engine_status().await?.running);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let paused = handle.pause_rest().await?.unwrap();
        assert_eq!(paused.phase, RestPhase::Paused);
        assert_eq!(paused.remaining_seconds(fixture.clock.now()), 50);
        assert!(!handle.engine_status().await?.running);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(paused.remaining_seconds(fixture.clock.now()), 50);
        let resumed = handle.resume_rest().await?.unwrap();
        assert_eq!(resumed.id, started.id);
        assert_eq!(resumed.phase, RestPhase::Running);
        assert_eq!(resumed.paused_at, None);
        assert_eq!(resumed.remaining_seconds(fixture.clock.now()), 50);
        assert_eq!(fixture.persisted(), Some(resumed.clone()));

        tokio::time::sleep(Duration::from_millis(50_500)).await;
        let expired = handle.current().unwrap();
        assert_eq!(expired.phase, RestPhase::Expired);
        assert_eq!(fixture.persisted(), Some(expired));

        let completed = handle.acknowledge_expired().await?.unwrap();
        assert_eq!(completed.phase, RestPhase::Completed);
        assert_eq!(fixture.persisted().map(|state| state.phase), Some(RestPhase::Completed));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(handle.current(), None);
        assert_eq!(fixture.persisted(), None);

        assert_eq!(
            fixture.alerts.calls(),
            vec![
                AlertCall::Reschedule(RestPhase::Running),
                AlertCall::Reschedule(RestPhase::Paused),
                AlertCall::Reschedule(RestPhase::Running),
                AlertCall::Expired(started.id),
                AlertCall::Cancel,
            ]
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn start_replaces_current_timer() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;

        let first = handle.start_rest(new_request(1)).await?.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(handle.acknowledge_expired().await?.unwrap().id, first.id);

        let second = handle.start_rest(new_request(90)).await?.unwrap();
        assert_ne!(second.id, first.id);

        tokio::time::sleep(Duration::from_secs(1)).await;
        let current = handle.current().unwrap();
        assert_eq!(current.id, second.id);
        assert_eq!(current.phase, RestPhase::Running);
        assert_eq!(fixture.persisted(), Some(current));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn start_with_negative_duration_expires_at_once() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;

        let state = handle.start_rest(new_request(-10)).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Expired);
        assert_eq!(state.total_seconds, 0);
        assert!(fixture.alerts.calls().contains(&AlertCall::Expired(state.id)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        assert_eq!(handle.cancel_rest().await?, None);

        handle.start_rest(new_request(60)).await?;
        assert_eq!(handle.cancel_rest().await?, None);
        assert_eq!(handle.cancel_rest().await?, None);
        assert_eq!(fixture.persisted(), None);
        assert!(!handle.engine_status().await?.running);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(handle.current(), None);
        assert!(!fixture
            .alerts
            .calls()
            .iter()
            .any(|call| matches!(call, AlertCall::Expired(_))));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn pause_is_idempotent() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        assert_eq!(handle.pause_rest().await?, None);

        handle.start_rest(new_request(60)).await?;
        let first = handle.pause_rest().await?.unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;
        let second = handle.pause_rest().await?.unwrap();
        assert_eq!(first, second);
        assert_eq!(fixture.persisted(), Some(second));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn misplaced_operations_are_ignored() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        assert_eq!(handle.resume_rest().await?, None);
        assert_eq!(handle.acknowledge_expired().await?, None);
        assert_eq!(handle.update_heart_rate(120).await?, None);
        assert_eq!(handle.adjust_rest(30).await?, None);

        let running = handle.start_rest(new_request(60)).await?.unwrap();
        assert_eq!(handle.resume_rest().await?, Some(running.clone()));
        assert_eq!(handle.acknowledge_expired().await?, Some(running));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn heart_rate_is_throttled() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;

        let heart_rate = |state: Option<RestTimerState>| state.and_then(|s| s.current_heart_rate);
        assert_eq!(heart_rate(handle.update_heart_rate(140).await?), Some(140));
        assert_eq!(heart_rate(handle.update_heart_rate(145).await?), Some(140));
        assert_eq!(heart_rate(handle.update_heart_rate(150).await?), Some(140));
        assert_eq!(heart_rate(fixture.persisted()), Some(140));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(heart_rate(handle.update_heart_rate(155).await?), Some(155));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(heart_rate(handle.update_heart_rate(300).await?), Some(155));
        assert_eq!(heart_rate(handle.update_heart_rate(160).await?), Some(160));
        assert_eq!(heart_rate(fixture.persisted()), Some(160));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn heart_rate_throttle_resets_on_start() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;
        handle.update_heart_rate(140).await?;

        let state = handle.start_rest(new_request(60)).await?.unwrap();
        assert_eq!(state.current_heart_rate, None);
        let state = handle.update_heart_rate(150).await?.unwrap();
        assert_eq!(state.current_heart_rate, Some(150));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn adjust_running_timer() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        let started = handle.start_rest(new_request(60)).await?.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        let longer = handle.adjust_rest(30).await?.unwrap();
        assert_eq!(longer.id, started.id);
        assert_eq!(longer.phase, RestPhase::Running);
        assert_eq!(longer.remaining_seconds(fixture.clock.now()), 80);
        assert_eq!(longer.total_seconds, 90);
        assert_eq!(longer.start_date, started.start_date);
        assert_eq!(handle.engine_status().await?.remaining, Duration::from_secs(80));

        let shorter = handle.adjust_rest(-70).await?.unwrap();
        assert_eq!(shorter.remaining_seconds(fixture.clock.now()), 10);
        assert_eq!(shorter.total_seconds, 20);

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(handle.current().unwrap().phase, RestPhase::Expired);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn adjust_to_zero_expires() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        let started = handle.start_rest(new_request(60)).await?.unwrap();

        let expired = handle.adjust_rest(-600).await?.unwrap();
        assert_eq!(expired.phase, RestPhase::Expired);
        assert_eq!(expired.id, started.id);
        assert!(!handle.engine_status().await?.running);
        assert_eq!(fixture.alerts.calls().last(), Some(&AlertCall::Expired(started.id)));

        assert_eq!(handle.adjust_rest(30).await?, Some(expired));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn adjust_paused_timer_stays_paused() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;
        tokio::time::sleep(Duration::from_secs(10)).await;
        handle.pause_rest().await?;

        let adjusted = handle.adjust_rest(-20).await?.unwrap();
        assert_eq!(adjusted.phase, RestPhase::Paused);
        assert_eq!(adjusted.remaining_seconds(fixture.clock.now()), 30);
        assert_eq!(adjusted.total_seconds, 40);
        assert!(!handle.engine_status().await?.running);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let resumed = handle.resume_rest().await?.unwrap();
        assert_eq!(resumed.remaining_seconds(fixture.clock.now()), 30);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn set_remaining() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;

        let state = handle.set_remaining(20, None).await?.unwrap();
        assert_eq!(state.remaining_seconds(fixture.clock.now()), 20);
        assert_eq!(state.total_seconds, 60);

        let state = handle.set_remaining(120, None).await?.unwrap();
        assert_eq!(state.remaining_seconds(fixture.clock.now()), 120);
        assert_eq!(state.total_seconds, 120);

        let state = handle.set_remaining(45, Some(150)).await?.unwrap();
        assert_eq!(state.remaining_seconds(fixture.clock.now()), 45);
        assert_eq!(state.total_seconds, 150);
        assert!(state.is_valid());

        let state = handle.set_remaining(-5, None).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Expired);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn crash_recovery_resumes_countdown() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        let started = handle.start_rest(new_request(60)).await?.unwrap();
        handle.terminate().await;

        fixture.clock.advance(Duration::from_secs(15));
        let handle = fixture.spawn().await;
        let restored = handle.current().unwrap();
        assert_eq!(restored.id, started.id);
        assert_eq!(restored.phase, RestPhase::Running);
        assert_eq!(restored.remaining_seconds(fixture.clock.now()), 45);
        assert!(handle.engine_status().await?.running);

        tokio::time::sleep(Duration::from_millis(45_500)).await;
        assert_eq!(handle.current().unwrap().phase, RestPhase::Expired);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn expire_while_closed() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        let started = handle.start_rest(new_request(5)).await?.unwrap();
        handle.terminate().await;

        fixture.clock.advance(Duration::from_secs(10));
        let handle = fixture.spawn().await;
        let restored = handle.current().unwrap();
        assert_eq!(restored.id, started.id);
        assert_eq!(restored.phase, RestPhase::Expired);
        assert_eq!(fixture.persisted(), Some(restored));
        assert!(!handle.engine_status().await?.running);
        assert_eq!(fixture.alerts.calls().last(), Some(&AlertCall::Expired(started.id)));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn paused_timer_restores_paused() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;
        tokio::time::sleep(Duration::from_secs(20)).await;
        handle.pause_rest().await?;
        handle.terminate().await;

        fixture.clock.advance(Duration::from_secs(30));
        let handle = fixture.spawn().await;
        let restored = handle.current().unwrap();
        assert_eq!(restored.phase, RestPhase::Paused);
        assert_eq!(restored.remaining_seconds(fixture.clock.now()), 40);
        assert!(!handle.engine_status().await?.running);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn restore_discards_invalid_states() {
        let fixture = Fixture::new();
        let now = fixture.clock.now();
        let valid = RestTimerState::create(&new_request(60), now);

        let mut negative_index = valid.clone();
        negative_index.exercise_index = -1;
        let mut reversed = valid.clone();
        reversed.end_date = reversed.start_date - TimeDelta::seconds(1);
        let mut unpaused = valid.clone();
        unpaused.phase = RestPhase::Paused;
        let mut paused_late = valid.clone();
        paused_late.phase = RestPhase::Paused;
        paused_late.paused_at = Some(paused_late.end_date + TimeDelta::seconds(5));
        let mut heart_rate = valid;
        heart_rate.current_heart_rate = Some(300);

        for state in [negative_index, reversed, unpaused, paused_late, heart_rate] {
            fixture.gateway().save(&state).unwrap();
            let handle = fixture.spawn().await;
            assert_eq!(handle.current(), None);
            assert_eq!(fixture.persisted(), None);
            handle.terminate().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn restore_discards_corrupt_record() {
        let fixture = Fixture::new();
        fixture
            .storage
            .write(REST_TIMER_SLOT, b"{\"id\": 42")
            .unwrap();

        let handle = fixture.spawn().await;
        assert_eq!(handle.current(), None);
        assert_eq!(fixture.storage.read(REST_TIMER_SLOT).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_applies_staleness() {
        let fixture = Fixture::new();
        let now = fixture.clock.now();

        let mut stale = RestTimerState::create(&new_request(60), now - TimeDelta::hours(25));
        stale.end_date = now + TimeDelta::seconds(60);
        fixture.gateway().save(&stale).unwrap();
        let handle = fixture.spawn().await;
        assert_eq!(handle.current(), None);
        assert_eq!(fixture.persisted(), None);
        handle.terminate().await;

        let recent = now - TimeDelta::hours(24) + TimeDelta::minutes(1);
        let mut fresh = RestTimerState::create(&new_request(60), recent);
        fresh.end_date = now + TimeDelta::seconds(60);
        fixture.gateway().save(&fresh).unwrap();
        let handle = fixture.spawn().await;
        let restored = handle.current().unwrap();
        assert_eq!(restored.id, fresh.id);
        assert_eq!(restored.phase, RestPhase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_discards_completed_state() {
        let fixture = Fixture::new();
        let mut state = RestTimerState::create(&new_request(60), fixture.clock.now());
        state.phase = RestPhase::Completed;
        fixture.gateway().save(&state).unwrap();

        let handle = fixture.spawn().await;
        assert_eq!(handle.current(), None);
        assert_eq!(fixture.persisted(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_observe_every_mutation() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        let mut observer = handle.subscribe();
        assert_eq!(*observer.borrow_and_update(), None);

        handle.start_rest(new_request(60)).await?;
        assert!(observer.has_changed().unwrap());
        assert_eq!(
            observer.borrow_and_update().as_ref().map(|state| state.phase),
            Some(RestPhase::Running)
        );

        handle.cancel_rest().await?;
        assert!(observer.has_changed().unwrap());
        assert_eq!(*observer.borrow_and_update(), None);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn alert_failures_are_absorbed() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        fixture.alerts.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        let handle = fixture.spawn().await;

        let state = handle.start_rest(new_request(60)).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Running);
        assert_eq!(handle.cancel_rest().await?, None);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn huge_durations_are_clamped() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;

        let state = handle.start_rest(new_request(10_000_000_000_000)).await?.unwrap();
        assert_eq!(state.total_seconds, MAX_REST_SECONDS);
        assert_eq!(state.remaining_seconds(fixture.clock.now()), MAX_REST_SECONDS);

        let state = handle.adjust_rest(i64::MAX).await?.unwrap();
        assert_eq!(state.total_seconds, MAX_REST_SECONDS);
        assert_eq!(state.remaining_seconds(fixture.clock.now()), MAX_REST_SECONDS);

        let state = handle.set_remaining(i64::MAX, Some(i64::MAX)).await?.unwrap();
        assert_eq!(state.total_seconds, MAX_REST_SECONDS);
        assert_eq!(state.remaining_seconds(fixture.clock.now()), MAX_REST_SECONDS);
        assert!(state.is_valid());

        let state = handle.adjust_rest(i64::MIN).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Expired);
        assert_eq!(state.total_seconds, 0);

        let state = handle.start_rest(new_request(60)).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Running);
        assert_eq!(handle.query().await?, Some(state));
        assert!(handle.is_alive());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn huge_adjustments_keep_paused_timer() -> Result<(), WorkerGoneError> {
        let fixture = Fixture::new();
        let handle = fixture.spawn().await;
        handle.start_rest(new_request(60)).await?;
        handle.pause_rest().await?;

        let state = handle.adjust_rest(i64::MAX).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Paused);
        assert_eq!(state.remaining_seconds(fixture.clock.now()), MAX_REST_SECONDS);
        assert!(state.is_valid());

        let state = handle.set_remaining(i64::MIN, Some(i64::MIN)).await?.unwrap();
        assert_eq!(state.phase, RestPhase::Expired);
        assert_eq!(state.total_seconds, 0);
        assert_eq!(handle.query().await?, Some(state));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn gone_worker_is_reported() {
        let fixture = Fixture::new();
        let handle = spawn(
            fixture.clock.clone(),
            Arc::new(fixture.storage.clone()),
            Arc::new(PanickingAlerts),
            TimerPolicy::default(),
        )
        .await;
        assert!(handle.is_alive());

        assert_eq!(handle.start_rest(new_request(60)).await, Err(WorkerGoneError));
        assert!(!handle.is_alive());
        assert_eq!(handle.query().await, Err(WorkerGoneError));
        assert_eq!(handle.cancel_rest().await, Err(WorkerGoneError));
        assert!(handle.engine_status().await.is_err());
    }

    struct PanickingAlerts;

    #[async_trait::async_trait]
    impl AlertPort for PanickingAlerts {
        async fn reschedule(&self, _state: &RestTimerState) -> Result<(), AlertError> {
            panic!("notification backend crashed");
        }

        async fn cancel(&self) -> Result<(), AlertError> {
            panic!("notification backend crashed");
        }

        async fn expired(&self, _state: &RestTimerState) -> Result<(), AlertError> {
            panic!("notification backend crashed");
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum AlertCall {
        Reschedule(RestPhase),
        Cancel,
        Expired(Uuid),
    }

    #[derive(Default)]
    struct RecordingAlerts {
        calls: Mutex<Vec<AlertCall>>,
        fail: std::sync::atomic::AtomicBool,
    }

    impl RecordingAlerts {
        fn calls(&self) -> Vec<AlertCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: AlertCall) -> Result<(), AlertError> {
            self.calls.lock().unwrap().push(call);
            if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
                snafu::whatever!("alerts are broken");
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl AlertPort for RecordingAlerts {
        async fn reschedule(&self, state: &RestTimerState) -> Result<(), AlertError> {
            self.record(AlertCall::Reschedule(state.phase))
        }

        async fn cancel(&self) -> Result<(), AlertError> {
            self.record(AlertCall::Cancel)
        }

        async fn expired(&self, state: &RestTimerState) -> Result<(), AlertError> {
            self.record(AlertCall::Expired(state.id))
        }
    }

    struct Fixture {
        clock: Arc<ManualClock>,
        storage: MemorySlotStorage,
        alerts: Arc<RecordingAlerts>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                clock: Arc::new(ManualClock::new(Utc::now())),
                storage: MemorySlotStorage::new(),
                alerts: Arc::new(RecordingAlerts::default()),
            }
        }

        async fn spawn(&self) -> RestTimerHandle {
            spawn(
                self.clock.clone(),
                Arc::new(self.storage.clone()),
                self.alerts.clone(),
                TimerPolicy::default(),
            )
            .await
        }

        fn gateway(&self) -> StateGateway {
            StateGateway::new(Arc::new(self.storage.clone()))
        }

        fn persisted(&self) -> Option<RestTimerState> {
            self.gateway().load().unwrap()
        }
    }

    fn new_request(duration: i64) -> StartRest {
        StartRest::new(WorkoutRef::new(Uuid::new_v4(), "Upper Body"), 2, 1, duration)
            .with_exercises(Some("Overhead Press".to_owned()), Some("Pull-up".to_owned()))
    }
}
