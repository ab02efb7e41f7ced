use snafu::prelude::*;

use crate::client::outbound::endpoint::{Endpoint, ExchangeError};
use crate::domain::client::outbound::{BadResponseSnafu, FailureSnafu, UnavailableSnafu};
use crate::domain::client::outbound::{
    RequestDaemonError, TimerPort, TimerRequest, TimerSnapshot,
};
use crate::protocol::{Protocol, Request, Response, TimerView};

/// A [`TimerPort`] implementation which talks to the daemon at an
/// [`Endpoint`], one connection per request.
pub struct TimerService {
    endpoint: Endpoint,
}

impl TimerService {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait::async_trait]
impl TimerPort for TimerService {
    async fn request(
        &self,
        request: TimerRequest,
    ) -> Result<Option<TimerSnapshot>, RequestDaemonError> {
        let response = match self
            .endpoint
            .exchange(Protocol::Request(request.into()))
            .await
        {
            Ok(response) => response,
            Err(ExchangeError::DaemonDown { endpoint }) => {
                return UnavailableSnafu { endpoint }.fail()
            }
            Err(err) => return Err(err).whatever_context("Could not talk to the daemon"),
        };

        match response {
            Protocol::Response(Response::Timer { timer }) => timer.map(snapshot).transpose(),
            Protocol::Response(Response::Failure { reason }) => FailureSnafu { reason }.fail(),
            Protocol::Request(_) => BadResponseSnafu.fail(),
        }
    }
}

impl From<TimerRequest> for Request {
    fn from(value: TimerRequest) -> Self {
        match value {
            TimerRequest::Start(start) => Request::Start {
                workout_id: start.workout.id,
                workout: start.workout.name,
                exercise_index: start.exercise_index,
                set_index: start.set_index,
                duration: start.duration_seconds,
                exercise: start.current_exercise_name,
                next_exercise: start.next_exercise_name,
            },
            TimerRequest::Pause => Request::Pause,
            TimerRequest::Resume => Request::Resume,
            TimerRequest::Cancel => Request::Cancel,
            TimerRequest::Acknowledge => Request::Acknowledge,
            TimerRequest::HeartRate(bpm) => Request::HeartRate { bpm },
            TimerRequest::Adjust(delta) => Request::Adjust { delta },
            TimerRequest::SetRemaining { seconds, total } => {
                Request::SetRemaining { seconds, total }
            }
            TimerRequest::Query => Request::Query,
        }
    }
}

fn snapshot(view: TimerView) -> Result<TimerSnapshot, RequestDaemonError> {
    let phase = view.phase.parse().map_err(|_| BadResponseSnafu.build())?;
    Ok(TimerSnapshot {
        id: view.id,
        workout: view.workout,
        exercise: view.exercise,
        next_exercise: view.next_exercise,
        set: view.set,
        phase,
        total_seconds: view.total,
        remaining_seconds: view.remaining,
        progress: view.progress,
        heart_rate: view.heart_rate,
    })
}
