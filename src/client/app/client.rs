use std::sync::Arc;

use snafu::prelude::*;
use uuid::Uuid;

use crate::client::app::command::{Command, QueryArguments, StartArguments};
use crate::domain::client::outbound::{
    InitDaemonError, RequestDaemonError, TimerRequest, TimerSnapshot,
};
use crate::domain::client::ApplicationCore;
use crate::domain::entity::{format_clock, StartRest, WorkoutRef};

/// Defaults a [`Client`] falls back to when a command leaves them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Rest duration of `start` in seconds.
    pub default_rest: i64,
    /// Amount of `add` and `subtract` in seconds.
    pub adjust_step: i64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            default_rest: 90,
            adjust_step: 30,
        }
    }
}

/// Main business logic implementation in client side.
pub struct Client {
    core: Arc<ApplicationCore>,
    settings: ClientSettings,
}

impl Client {
    /// Creates a new [`Client`].
    pub fn new(core: Arc<ApplicationCore>, settings: ClientSettings) -> Self {
        Self { core, settings }
    }

    /// Run specific function according to `command`.
    ///
    /// # Errors
    ///
    /// This function will return an error if any error occurs.
    pub async fn run(&self, command: Command) -> Result<(), ClientError> {
        let Some((request, args)) = self.translate(command) else {
            return self.core.init.init().await.context(InitDaemonSnafu);
        };

        let timer = self.core.timer.request(request).await.context(RequestSnafu)?;
        for line in render(timer.as_ref(), &args) {
            println!("{line}");
        }
        Ok(())
    }

    /// Turn a command into the request sent to the daemon and the fields shown
    /// for its reply. `init` never reaches the daemon's socket.
    fn translate(&self, command: Command) -> Option<(TimerRequest, QueryArguments)> {
        let request = match command {
            Command::Init => return None,
            Command::Start(args) => TimerRequest::Start(self.start_rest(args)),
            Command::Pause => TimerRequest::Pause,
            Command::Resume => TimerRequest::Resume,
            Command::Cancel => TimerRequest::Cancel,
            Command::Acknowledge => TimerRequest::Acknowledge,
            Command::HeartRate { bpm } => TimerRequest::HeartRate(bpm),
            Command::Add { seconds } => {
                TimerRequest::Adjust(seconds.unwrap_or(self.settings.adjust_step))
            }
            Command::Subtract { seconds } => {
                TimerRequest::Adjust(-seconds.unwrap_or(self.settings.adjust_step))
            }
            Command::Set { seconds, total } => TimerRequest::SetRemaining { seconds, total },
            Command::Query(args) => return Some((TimerRequest::Query, args)),
        };
        Some((request, QueryArguments::default()))
    }

    fn start_rest(&self, args: StartArguments) -> StartRest {
        let duration = args.duration_seconds(self.settings.default_rest);
        let workout = WorkoutRef::new(args.workout_id.unwrap_or_else(Uuid::new_v4), args.workout);
        StartRest::new(
            workout,
            args.exercise_index,
            args.set.saturating_sub(1),
            duration,
        )
        .with_exercises(args.exercise, args.next_exercise)
    }
}

/// Lay out the requested fields of `timer` as aligned `key = value` lines.
fn render(timer: Option<&TimerSnapshot>, args: &QueryArguments) -> Vec<String> {
    let Some(timer) = timer else {
        return vec!["No rest timer".to_owned()];
    };

    let mut outputs = Vec::new();

    if args.wants_context() {
        outputs.push(("Workout", timer.workout.clone()));
        if let Some(exercise) = &timer.exercise {
            outputs.push(("Exercise", exercise.clone()));
        }
        outputs.push(("Set", timer.set.to_string()));
        if let Some(next) = &timer.next_exercise {
            outputs.push(("Next", next.clone()));
        }
    }

    if args.wants_phase() {
        outputs.push(("Phase", timer.phase.to_string()));
    }

    if args.wants_remaining() {
        outputs.push(("Remaining", format_clock(timer.remaining_seconds)));
    }

    if args.wants_total() {
        outputs.push(("Total", format_clock(timer.total_seconds)));
    }

    if args.wants_progress() {
        outputs.push(("Progress", format!("{}%", timer.progress)));
    }

    if args.wants_heart_rate() {
        let value = timer
            .heart_rate
            .map_or_else(|| "-".to_owned(), |bpm| format!("{bpm} bpm"));
        outputs.push(("Heart rate", value));
    }

    let key_align = outputs
        .iter()
        .map(|(key, _)| key.len())
        .max()
        .unwrap_or_default();

    outputs
        .into_iter()
        .map(|(key, value)| format!("{key:<key_align$} = {value}"))
        .collect()
}

/// An error for client's operations.
#[derive(Debug, Snafu)]
pub enum ClientError {
    #[snafu(display("Could not initialize daemon"))]
    InitDaemon { source: InitDaemonError },
    #[snafu(display("Could not request daemon"))]
    Request { source: RequestDaemonError },
}
