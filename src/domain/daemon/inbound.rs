use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::daemon::worker::WorkerGoneError;
use crate::domain::entity::{RestPhase, RestTimerState, StartRest};

/// A public port for driving the rest timer. Every operation returns the
/// resulting timer, or `None` when no timer is current afterwards.
///
/// Operations fail with [`WorkerGoneError`] once the worker has stopped.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RestTimerPort: Send + Sync + 'static {
    /// Start a new rest interval, replacing the current one.
    async fn start(&self, request: StartRest) -> TimerResult;

    /// Suspend a running timer.
    async fn pause(&self) -> TimerResult;

    /// Continue a paused timer.
    async fn resume(&self) -> TimerResult;

    /// Drop the current timer, whatever its phase.
    async fn cancel(&self) -> TimerResult;

    /// Confirm that an expired timer was noticed.
    async fn acknowledge(&self) -> TimerResult;

    /// Attach a heart rate sample to the current timer.
    async fn heart_rate(&self, bpm: i64) -> TimerResult;

    /// Shift the remaining time of an active timer.
    async fn adjust(&self, delta_seconds: i64) -> TimerResult;

    /// Set the remaining time of an active timer.
    async fn set_remaining(&self, seconds: i64, total: Option<i64>) -> TimerResult;

    /// Read the current timer.
    async fn query(&self) -> TimerResult;
}

pub type TimerResult = Result<Option<TimerSnapshot>, WorkerGoneError>;

/// A view of the current timer at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub id: Uuid,
    pub workout: String,
    pub exercise: Option<String>,
    pub next_exercise: Option<String>,
    /// One-based set number.
    pub set: i64,
    pub phase: RestPhase,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    /// Elapsed share of the interval in percent.
    pub progress: u8,
    pub heart_rate: Option<i64>,
}

impl TimerSnapshot {
    /// Capture `state` as seen at `now`.
    pub fn capture(state: &RestTimerState, now: DateTime<Utc>) -> Self {
        Self {
            id: state.id,
            workout: state.workout_name.clone(),
            exercise: state.current_exercise_name.clone(),
            next_exercise: state.next_exercise_name.clone(),
            set: state.set_index + 1,
            phase: state.phase,
            total_seconds: state.total_seconds,
            remaining_seconds: state.remaining_seconds(now),
            progress: (state.progress(now) * 100.0).round() as u8,
            heart_rate: state.current_heart_rate,
        }
    }
}
