use std::time::Duration;

use tokio::sync::mpsc::{Receiver, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::domain::daemon::worker::handle::Command;
use crate::domain::daemon::worker::manager::{RestTimerManager, TimerEvent};

/// Tunables of the rest timer, loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerPolicy {
    /// Period of the engine's tick.
    pub tick_interval: Duration,
    /// Delay between acknowledging an expired timer and clearing it.
    pub grace_delay: Duration,
    /// Minimum distance between two accepted heart rate updates.
    pub heart_rate_throttle: Duration,
    /// Persisted states older than this are discarded on restore.
    pub max_state_age: Duration,
}

impl Default for TimerPolicy {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            grace_delay: Duration::from_millis(500),
            heart_rate_throttle: Duration::from_secs(5),
            max_state_age: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// The single execution context of the rest timer. A [`WorkerRoutine`] runs
/// on background, receiving [`Command`]s from a
/// [`RestTimerHandle`](super::RestTimerHandle) and [`TimerEvent`]s from the
/// engine, and feeds both to the [`RestTimerManager`] one at a time.
pub struct WorkerRoutine {
    manager: RestTimerManager,
    commands: Receiver<Command>,
    events: UnboundedReceiver<TimerEvent>,
}

impl WorkerRoutine {
    /// Creates a new [`WorkerRoutine`].
    pub fn new(
        manager: RestTimerManager,
        commands: Receiver<Command>,
        events: UnboundedReceiver<TimerEvent>,
    ) -> Self {
        Self {
            manager,
            commands,
            events,
        }
    }

    /// Spawn the routine on background.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = self;
            worker.run().await;
        })
    }

    async fn run(&mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
                Some(event) = self.events.recv() => self.manager.handle_event(event).await,
            }
        }
        tracing::info!("Rest timer worker stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Apply { request, responder } => {
                self.manager.apply(request).await;
                self.drain_events().await;
                let _ = responder.send(self.manager.current().cloned());
            }
            Command::EngineStatus { responder } => {
                let _ = responder.send(self.manager.engine_status());
            }
        }
    }

    /// Handle events raised while the last command ran, so that its caller
    /// observes their outcome.
    async fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.manager.handle_event(event).await;
        }
    }
}
