use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::daemon::inbound::{RestTimerPort, TimerResult, TimerSnapshot};
use crate::domain::daemon::worker::{RestTimerHandle, WorkerGoneError};
use crate::domain::entity::{RestTimerState, StartRest};

/// A [`RestTimerPort`] implementation over the rest timer worker.
pub struct RestTimerService {
    worker: Arc<RestTimerHandle>,
    clock: Arc<dyn Clock>,
}

impl RestTimerService {
    pub fn new(worker: Arc<RestTimerHandle>, clock: Arc<dyn Clock>) -> Self {
        Self { worker, clock }
    }

    fn snapshot(&self, state: Result<Option<RestTimerState>, WorkerGoneError>) -> TimerResult {
        let now = self.clock.now();
        Ok(state?.map(|state| TimerSnapshot::capture(&state, now)))
    }
}

#[async_trait::async_trait]
impl RestTimerPort for RestTimerService {
    async fn start(&self, request: StartRest) -> TimerResult {
        let state = self.worker.start_rest(request).await;
        self.snapshot(state)
    }

    async fn pause(&self) -> TimerResult {
        let state = self.worker.pause_rest().await;
        self.snapshot(state)
    }

    async fn resume(&self) -> TimerResult {
        let state = self.worker.resume_rest().await;
        self.snapshot(state)
    }

    async fn cancel(&self) -> TimerResult {
        let state = self.worker.cancel_rest().await;
        self.snapshot(state)
    }

    async fn acknowledge(&self) -> TimerResult {
        let state = self.worker.acknowledge_expired().await;
        self.snapshot(state)
    }

    async fn heart_rate(&self, bpm: i64) -> TimerResult {
        let state = self.worker.update_heart_rate(bpm).await;
        self.snapshot(state)
    }

    async fn adjust(&self, delta_seconds: i64) -> TimerResult {
        let state = self.worker.adjust_rest(delta_seconds).await;
        self.snapshot(state)
    }

    async fn set_remaining(&self, seconds: i64, total: Option<i64>) -> TimerResult {
        let state = self.worker.set_remaining(seconds, total).await;
        self.snapshot(state)
    }

    async fn query(&self) -> TimerResult {
        let state = self.worker.query().await;
        self.snapshot(state)
    }
}
