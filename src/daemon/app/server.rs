use std::sync::Arc;

use snafu::prelude::*;
use tracing::{field::Empty, Instrument, Span};

use crate::domain::daemon::inbound::TimerSnapshot;
use crate::domain::daemon::worker::WorkerGoneError;
use crate::domain::daemon::ApplicationCore;
use crate::domain::entity::{StartRest, WorkoutRef};
use crate::protocol::{
    Connection, Protocol, ReceiveMessageError, Request, Response, SendMessageError, TimerView,
};
use crate::tracing_report;
use crate::utils::stream::Stream;

use super::listener::{ListenError, Listener};

/// An dedicated server which listens on a UNIX socket and handles
/// requests from clients.
pub struct Server {
    listener: Box<dyn Listener>,
    core: Arc<ApplicationCore>,
}

impl Server {
    /// Creates a new [`Server`].
    pub fn new(listener: Box<dyn Listener>, core: ApplicationCore) -> Self {
        Self {
            listener,
            core: Arc::new(core),
        }
    }

    /// Accept connections from a [`Listener`] and handle requests.
    ///
    /// # Errors
    ///
    /// This function will return an error if the server fails to accept
    /// connections.
    #[tracing::instrument(skip(self))]
    pub async fn serve(&self) -> Result<(), ServerError> {
        loop {
            let stream = match self.listener.accept().await {
                Ok(stream) => {
                    tracing::info!("Accepted connection");
                    stream
                }
                Err(err) => {
                    tracing_report!(err);
                    return Err(err).context(ListenSnafu);
                }
            };

            let core = Arc::clone(&self.core);
            let connection = Connection::from(stream);

            let span = tracing::info_span!("handle", req = Empty).or_current();
            tokio::spawn(
                async move {
                    if let Err(err) = Self::handle(core, connection).await {
                        tracing_report!(err, "Could not handle requests");
                    }
                }
                .instrument(span),
            );
        }
    }

    /// Handle one request from an accepted connection.
    ///
    /// # Errors
    ///
    /// This function will return an error if handling connection fails.
    async fn handle<S: Stream>(
        core: Arc<ApplicationCore>,
        mut connection: Connection<S>,
    ) -> Result<(), ServerError> {
        let request = match connection.receive().await {
            Ok(Protocol::Request(request)) => request,
            Ok(protocol) => return BadRequestSnafu { protocol }.fail(),
            Err(err) => return Err(err).context(ReceiveSnafu),
        };

        Span::current().record("req", format!("{request:?}"));
        tracing::info!("Received request");

        let timer = &core.timer;
        let result = match request {
            Request::Start {
                workout_id,
                workout,
                exercise_index,
                set_index,
                duration,
                exercise,
                next_exercise,
            } => {
                let request = StartRest::new(
                    WorkoutRef::new(workout_id, workout),
                    exercise_index,
                    set_index,
                    duration,
                )
                .with_exercises(exercise, next_exercise);
                timer.start(request).await
            }
            Request::Pause => timer.pause().await,
            Request::Resume => timer.resume().await,
            Request::Cancel => timer.cancel().await,
            Request::Acknowledge => timer.acknowledge().await,
            Request::HeartRate { bpm } => timer.heart_rate(bpm).await,
            Request::Adjust { delta } => timer.adjust(delta).await,
            Request::SetRemaining { seconds, total } => timer.set_remaining(seconds, total).await,
            Request::Query => timer.query().await,
        };

        let (response, outcome) = match result {
            Ok(snapshot) => {
                tracing::info!("Handled request");
                let timer = snapshot.map(TimerView::from);
                (Response::Timer { timer }, Ok(()))
            }
            Err(err) => {
                let reason = err.to_string();
                (Response::Failure { reason }, Err(err))
            }
        };
        connection
            .send(&Protocol::Response(response))
            .await
            .context(SendSnafu)
            .inspect(|_| tracing::info!("Sent response"))?;
        outcome.context(WorkerSnafu)
    }
}

impl From<TimerSnapshot> for TimerView {
    fn from(value: TimerSnapshot) -> Self {
        TimerView {
            id: value.id,
            workout: value.workout,
            exercise: value.exercise,
            next_exercise: value.next_exercise,
            set: value.set,
            phase: value.phase.to_string(),
            total: value.total_seconds,
            remaining: value.remaining_seconds,
            progress: value.progress,
            heart_rate: value.heart_rate,
        }
    }
}

/// An error type for server.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ServerError {
    #[snafu(display("Could not accept a connection"))]
    Listen { source: ListenError },
    #[snafu(display("Could not receive a request"))]
    Receive { source: ReceiveMessageError },
    #[snafu(display("Could not handle {protocol:?}"))]
    BadRequest { protocol: Protocol },
    #[snafu(display("Could not send a response"))]
    Send { source: SendMessageError },
    #[snafu(display("Could not reach the rest timer"))]
    Worker { source: WorkerGoneError },
}
