use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch::Sender as WatchSender;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::clock::Clock;
use crate::domain::daemon::outbound::AlertPort;
use crate::domain::daemon::worker::engine::{EngineStatus, TimerEngine};
use crate::domain::daemon::worker::handle::Request;
use crate::domain::daemon::worker::routine::TimerPolicy;
use crate::domain::entity::state::{self, MAX_REST_SECONDS};
use crate::domain::entity::{HeartRate, RestPhase, RestTimerState, StartRest};
use crate::domain::repository::{LoadStateError, StateGateway};
use crate::tracing_report;

/// Things that happen to the current timer on their own. Each event names the
/// instance it belongs to and is ignored once that instance was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Expired { id: Uuid },
    GraceElapsed { id: Uuid },
}

/// The rest timer state machine. It owns the current state and applies every
/// transition: it drives the engine, writes through the gateway, publishes to
/// subscribers and tells the alert collaborators.
///
/// A manager is only ever used from its worker routine, so none of its state
/// is guarded.
pub struct RestTimerManager {
    clock: Arc<dyn Clock>,
    gateway: StateGateway,
    alerts: Arc<dyn AlertPort>,
    policy: TimerPolicy,
    engine: TimerEngine,
    events: UnboundedSender<TimerEvent>,
    publisher: WatchSender<Option<RestTimerState>>,
    current: Option<RestTimerState>,
    last_heart_rate: Option<DateTime<Utc>>,
    grace: Option<JoinHandle<()>>,
}

impl RestTimerManager {
    /// Creates a new [`RestTimerManager`] without any state. Call
    /// [`RestTimerManager::restore_state`] before handing it to a routine.
    pub fn new(
        clock: Arc<dyn Clock>,
        gateway: StateGateway,
        alerts: Arc<dyn AlertPort>,
        policy: TimerPolicy,
        events: UnboundedSender<TimerEvent>,
        publisher: WatchSender<Option<RestTimerState>>,
    ) -> Self {
        let engine = TimerEngine::new(Arc::clone(&clock), policy.tick_interval);
        Self {
            clock,
            gateway,
            alerts,
            policy,
            engine,
            events,
            publisher,
            current: None,
            last_heart_rate: None,
            grace: None,
        }
    }

    /// The current state, if any.
    pub fn current(&self) -> Option<&RestTimerState> {
        self.current.as_ref()
    }

    pub fn engine_status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// Apply one operation. Operations that make no sense in the current phase
    /// are ignored.
    pub async fn apply(&mut self, request: Request) {
        match request {
            Request::Start(request) => self.start_rest(request).await,
            Request::Pause => self.pause_rest().await,
            Request::Resume => self.resume_rest().await,
            Request::Cancel => self.cancel_rest().await,
            Request::Acknowledge => self.acknowledge_expired().await,
            Request::HeartRate(bpm) => self.update_heart_rate(bpm),
            Request::Adjust(delta) => self.adjust_rest(delta).await,
            Request::SetRemaining { seconds, total } => self.set_remaining(seconds, total).await,
            Request::Query => {}
        }
    }

    /// React to an engine expiry or an elapsed grace delay.
    pub async fn handle_event(&mut self, event: TimerEvent) {
        let now = self.clock.now();
        match event {
            TimerEvent::Expired { id } => {
                let due = self.current.as_ref().is_some_and(|state| {
                    state.id == id && state.phase == RestPhase::Running && state.has_expired(now)
                });
                if due {
                    self.expire(now).await;
                } else {
                    tracing::debug!(%id, "Ignoring stale expiry");
                }
            }
            TimerEvent::GraceElapsed { id } => {
                let due = self
                    .current
                    .as_ref()
                    .is_some_and(|state| state.id == id && state.phase == RestPhase::Completed);
                if due {
                    tracing::info!(%id, "Clearing completed rest timer");
                    self.grace = None;
                    self.replace(None);
                } else {
                    tracing::debug!(%id, "Ignoring stale grace delay");
                }
            }
        }
    }

    /// Rebuild the state persisted by a previous run and reconcile it with the
    /// wall clock. Unreadable, invalid or stale snapshots are erased.
    pub async fn restore_state(&mut self) {
        let now = self.clock.now();
        let state = match self.gateway.load() {
            Ok(Some(state)) => self.screen(state, now),
            Ok(None) => {
                tracing::info!("No rest timer to restore");
                None
            }
            Err(err @ LoadStateError::Corrupt { .. }) => {
                tracing::warn!(
                    err = %snafu::Report::from_error(&err),
                    "Discarding corrupt rest timer"
                );
                self.erase();
                None
            }
            Err(err) => {
                tracing_report!(err, "Could not restore the rest timer");
                None
            }
        };

        let Some(state) = state else {
            self.current = None;
            self.publish();
            return;
        };

        tracing::info!(state = %state.summary(now), "Restoring rest timer");
        let phase = state.phase;
        let end_date = state.end_date;
        self.current = Some(state);
        match phase {
            RestPhase::Running | RestPhase::Paused if now >= end_date => {
                tracing::info!("Rest timer expired while the worker was gone");
                self.expire(now).await;
            }
            RestPhase::Running => {
                self.arm();
                self.publish();
            }
            _ => self.publish(),
        }
    }

    async fn start_rest(&mut self, request: StartRest) {
        let now = self.clock.now();
        self.cancel_grace();
        self.last_heart_rate = None;

        let state = RestTimerState::create(&request, now);
        tracing::info!(state = %state.summary(now), "Starting rest timer");
        self.replace(Some(state));
        self.arm();
        self.reschedule().await;
    }

    async fn pause_rest(&mut self) {
        let now = self.clock.now();
        let Some(mut state) = self.current_in(RestPhase::Running) else {
            tracing::debug!("Nothing running to pause");
            return;
        };
        if state.has_expired(now) {
            self.expire(now).await;
            return;
        }

        self.engine.stop();
        state.phase = RestPhase::Paused;
        state.paused_at = Some(now);
        state.last_update_date = now;
        tracing::info!(state = %state.summary(now), "Paused rest timer");
        self.replace(Some(state));
        self.reschedule().await;
    }

    async fn resume_rest(&mut self) {
        let now = self.clock.now();
        let Some(mut state) = self.current_in(RestPhase::Paused) else {
            tracing::debug!("Nothing paused to resume");
            return;
        };

        let remaining = state.remaining(now);
        state.end_date = state::offset(now, remaining);
        state.paused_at = None;
        state.phase = RestPhase::Running;
        state.last_update_date = now;
        tracing::info!(state = %state.summary(now), "Resumed rest timer");
        self.replace(Some(state));
        self.arm();
        self.reschedule().await;
    }

    async fn cancel_rest(&mut self) {
        self.engine.stop();
        self.cancel_grace();
        self.last_heart_rate = None;
        if let Some(state) = &self.current {
            tracing::info!(id = %state.id, "Cancelled rest timer");
        }
        self.replace(None);
        self.cancel_alerts().await;
    }

    async fn acknowledge_expired(&mut self) {
        let now = self.clock.now();
        let Some(mut state) = self.current_in(RestPhase::Expired) else {
            tracing::debug!("Nothing expired to acknowledge");
            return;
        };

        state.phase = RestPhase::Completed;
        state.last_update_date = now;
        let id = state.id;
        tracing::info!(%id, "Acknowledged rest timer");
        self.replace(Some(state));
        self.cancel_alerts().await;

        self.cancel_grace();
        let events = self.events.clone();
        let delay = self.policy.grace_delay;
        self.grace = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(TimerEvent::GraceElapsed { id });
        }));
    }

    fn update_heart_rate(&mut self, bpm: i64) {
        let now = self.clock.now();
        let Some(mut state) = self.current.clone() else {
            tracing::debug!(bpm, "No rest timer for heart rate");
            return;
        };

        let heart_rate = match HeartRate::try_new(bpm) {
            Ok(heart_rate) => heart_rate,
            Err(err) => {
                tracing::warn!(err = %err, "Rejected heart rate");
                return;
            }
        };

        let throttle = to_delta(self.policy.heart_rate_throttle);
        if let Some(last) = self.last_heart_rate {
            if now - last < throttle {
                tracing::debug!(bpm, "Throttled heart rate");
                return;
            }
        }

        state.current_heart_rate = Some(heart_rate.bpm());
        state.last_update_date = now;
        self.last_heart_rate = Some(now);
        tracing::debug!(bpm, "Updated heart rate");
        self.replace(Some(state));
    }

    async fn adjust_rest(&mut self, delta_seconds: i64) {
        let now = self.clock.now();
        let Some(state) = self.current.clone().filter(RestTimerState::is_active) else {
            tracing::debug!("Nothing active to adjust");
            return;
        };

        let delta = TimeDelta::try_seconds(delta_seconds.clamp(-MAX_REST_SECONDS, MAX_REST_SECONDS))
            .unwrap_or_default();
        let remaining = state
            .remaining(now)
            .checked_add(&delta)
            .unwrap_or(TimeDelta::zero())
            .clamp(TimeDelta::zero(), TimeDelta::seconds(MAX_REST_SECONDS));
        let total = state::clamp_rest_seconds(
            state
                .total_seconds
                .saturating_add(delta_seconds)
                .max(ceil_seconds(remaining)),
        );
        tracing::info!(delta_seconds, "Adjusting rest timer");
        self.reshape(state, now, remaining, total).await;
    }

    async fn set_remaining(&mut self, seconds: i64, total: Option<i64>) {
        let now = self.clock.now();
        let Some(state) = self.current.clone().filter(RestTimerState::is_active) else {
            tracing::debug!("Nothing active to set");
            return;
        };

        let seconds = state::clamp_rest_seconds(seconds);
        let total = state::clamp_rest_seconds(total.unwrap_or(state.total_seconds.max(seconds)));
        tracing::info!(seconds, total, "Setting rest timer");
        self.reshape(state, now, TimeDelta::seconds(seconds), total)
            .await;
    }

    /// Give an active timer a new remaining time and total, keeping its
    /// identity, phase and metadata.
    async fn reshape(
        &mut self,
        mut state: RestTimerState,
        now: DateTime<Utc>,
        remaining: TimeDelta,
        total: i64,
    ) {
        let reference = match (state.phase, state.paused_at) {
            (RestPhase::Paused, Some(paused_at)) => paused_at,
            _ => now,
        };
        state.end_date = state::offset(reference, remaining).max(state.start_date);
        state.total_seconds = total;
        state.last_update_date = now;

        if remaining <= TimeDelta::zero() {
            self.current = Some(state);
            self.expire(now).await;
            return;
        }

        let running = state.phase == RestPhase::Running;
        self.replace(Some(state));
        if running {
            self.arm();
        }
        self.reschedule().await;
    }

    /// Move the current timer to [`RestPhase::Expired`] and fan the expiry out.
    async fn expire(&mut self, now: DateTime<Utc>) {
        self.engine.stop();
        let Some(mut state) = self.current.clone() else {
            return;
        };

        state.phase = RestPhase::Expired;
        state.paused_at = None;
        state.last_update_date = now;
        tracing::info!(state = %state.summary(now), "Rest timer expired");
        self.replace(Some(state.clone()));

        if let Err(err) = self.alerts.expired(&state).await {
            tracing_report!(err, "Could not fan out the expiry");
        }
    }

    /// Drop a snapshot that must not be restored.
    fn screen(&mut self, state: RestTimerState, now: DateTime<Utc>) -> Option<RestTimerState> {
        let rejection = if !state.is_valid() {
            Some("invalid")
        } else if state.age(now) > to_delta(self.policy.max_state_age) {
            Some("stale")
        } else if state.phase == RestPhase::Completed {
            Some("completed")
        } else {
            None
        };

        match rejection {
            Some(reason) => {
                tracing::warn!(
                    reason,
                    state = %state.summary(now),
                    "Discarding persisted rest timer"
                );
                self.erase();
                None
            }
            None => Some(state),
        }
    }

    /// Start the engine against the current end date.
    fn arm(&mut self) {
        let Some(state) = &self.current else {
            return;
        };
        let id = state.id;
        let events = self.events.clone();
        self.engine.start(state.end_date, move || {
            let _ = events.send(TimerEvent::Expired { id });
        });
    }

    /// Make `state` current, persist it and publish it.
    fn replace(&mut self, state: Option<RestTimerState>) {
        self.current = state;
        match &self.current {
            Some(state) => {
                if let Err(err) = self.gateway.save(state) {
                    tracing_report!(err, "Could not persist the rest timer");
                }
            }
            None => self.erase(),
        }
        self.publish();
    }

    fn erase(&self) {
        if let Err(err) = self.gateway.erase() {
            tracing_report!(err, "Could not erase the rest timer");
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.current.clone());
    }

    fn current_in(&self, phase: RestPhase) -> Option<RestTimerState> {
        self.current.clone().filter(|state| state.phase == phase)
    }

    fn cancel_grace(&mut self) {
        if let Some(grace) = self.grace.take() {
            grace.abort();
        }
    }

    async fn reschedule(&self) {
        let Some(state) = &self.current else {
            return;
        };
        if let Err(err) = self.alerts.reschedule(state).await {
            tracing_report!(err, "Could not reschedule alerts");
        }
    }

    async fn cancel_alerts(&self) {
        if let Err(err) = self.alerts.cancel().await {
            tracing_report!(err, "Could not cancel alerts");
        }
    }
}

impl Drop for RestTimerManager {
    fn drop(&mut self) {
        self.cancel_grace();
    }
}

fn to_delta(duration: Duration) -> TimeDelta {
    TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX)
}

fn ceil_seconds(delta: TimeDelta) -> i64 {
    let seconds = delta.num_seconds();
    if delta > TimeDelta::seconds(seconds) {
        seconds + 1
    } else {
        seconds
    }
}
