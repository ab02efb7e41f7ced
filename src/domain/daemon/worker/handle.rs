use snafu::prelude::*;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};
use tokio::sync::watch::Receiver as WatchReceiver;
use tokio::task::JoinHandle;

use crate::domain::daemon::worker::engine::EngineStatus;
use crate::domain::entity::{RestTimerState, StartRest};

/// Operations that mutate or read the rest timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Start(StartRest),
    Pause,
    Resume,
    Cancel,
    Acknowledge,
    HeartRate(i64),
    Adjust(i64),
    SetRemaining { seconds: i64, total: Option<i64> },
    Query,
}

/// Messages that a [`WorkerRoutine`](super::routine::WorkerRoutine) runs.
#[derive(Debug)]
pub enum Command {
    Apply {
        request: Request,
        responder: OneshotSender<Option<RestTimerState>>,
    },
    EngineStatus {
        responder: OneshotSender<EngineStatus>,
    },
}

/// Handle that controls the rest timer worker. Every method waits until the
/// worker has applied and persisted the operation, and returns the resulting
/// state. Once the worker task has stopped, every method fails with
/// [`WorkerGoneError`].
#[derive(Debug)]
pub struct RestTimerHandle {
    requester: Sender<Command>,
    observer: WatchReceiver<Option<RestTimerState>>,
    worker: JoinHandle<()>,
}

impl RestTimerHandle {
    /// Creates a new [`RestTimerHandle`].
    pub fn new(
        requester: Sender<Command>,
        observer: WatchReceiver<Option<RestTimerState>>,
        worker: JoinHandle<()>,
    ) -> Self {
        Self {
            requester,
            observer,
            worker,
        }
    }

    /// Replace any current timer with a new running one.
    pub async fn start_rest(
        &self,
        request: StartRest,
    ) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Start(request)).await
    }

    pub async fn pause_rest(&self) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Pause).await
    }

    pub async fn resume_rest(&self) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Resume).await
    }

    pub async fn cancel_rest(&self) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Cancel).await
    }

    pub async fn acknowledge_expired(&self) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Acknowledge).await
    }

    pub async fn update_heart_rate(
        &self,
        bpm: i64,
    ) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::HeartRate(bpm)).await
    }

    /// Shift the remaining time by `delta_seconds`, which may be negative.
    pub async fn adjust_rest(
        &self,
        delta_seconds: i64,
    ) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Adjust(delta_seconds)).await
    }

    /// Set the remaining time, and optionally the total, to absolute values.
    pub async fn set_remaining(
        &self,
        seconds: i64,
        total: Option<i64>,
    ) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::SetRemaining { seconds, total }).await
    }

    /// Read the state through the worker, after every queued operation.
    pub async fn query(&self) -> Result<Option<RestTimerState>, WorkerGoneError> {
        self.apply(Request::Query).await
    }

    /// Ask the worker what its engine is doing.
    pub async fn engine_status(&self) -> Result<EngineStatus, WorkerGoneError> {
        let (responder, receiver) = oneshot::channel();
        self.requester
            .send(Command::EngineStatus { responder })
            .await
            .ok()
            .context(WorkerGoneSnafu)?;
        receiver.await.ok().context(WorkerGoneSnafu)
    }

    /// Returns `true` while the worker task is running.
    pub fn is_alive(&self) -> bool {
        !self.worker.is_finished()
    }

    /// The latest published state.
    pub fn current(&self) -> Option<RestTimerState> {
        self.observer.borrow().clone()
    }

    /// Watch every published state.
    pub fn subscribe(&self) -> WatchReceiver<Option<RestTimerState>> {
        self.observer.clone()
    }

    /// Stop the worker at once, like a killed process: no tick, callback or
    /// write happens afterwards.
    pub async fn terminate(self) {
        self.worker.abort();
        let _ = self.worker.await;
    }

    async fn apply(&self, request: Request) -> Result<Option<RestTimerState>, WorkerGoneError> {
        let (responder, receiver) = oneshot::channel();
        if self
            .requester
            .send(Command::Apply { request, responder })
            .await
            .is_err()
        {
            tracing::error!("Rest timer worker is gone");
            return WorkerGoneSnafu.fail();
        }
        receiver.await.ok().context(WorkerGoneSnafu)
    }
}

/// The worker task has stopped and no longer applies operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("Rest timer worker is gone"))]
pub struct WorkerGoneError;
