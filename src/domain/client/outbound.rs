use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::StartRest;

pub use crate::domain::daemon::inbound::TimerSnapshot;

/// A public port for launching and initializing a daemon.
#[async_trait::async_trait]
pub trait InitPort: Send + Sync + 'static {
    /// Do the initialization operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if daemon is already running or the
    /// initialization failed.
    async fn init(&self) -> Result<(), InitDaemonError>;
}

/// An error type of initializing a daemon.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InitDaemonError {
    #[snafu(display("Could not find daemon executable"))]
    NotFound,
    #[snafu(display("Daemon is already running"))]
    AlreadyRunning,
    #[snafu(whatever, display("Initialization failed: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// An operation a client asks the daemon's rest timer to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerRequest {
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

/// A public port for sending rest timer requests to the daemon.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TimerPort: Send + Sync + 'static {
    /// Send `request` and wait for the resulting timer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the daemon could not be reached
    /// or replied with garbage.
    async fn request(&self, request: TimerRequest)
        -> Result<Option<TimerSnapshot>, RequestDaemonError>;
}

/// An error type of sending requests to daemon.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub))]
pub enum RequestDaemonError {
    #[snafu(display("Endpoint {endpoint} is unavailable"))]
    Unavailable { endpoint: String },
    #[snafu(display("Daemon could not serve the request: {reason}"))]
    Failure { reason: String },
    #[snafu(display("Could not receive a valid response"))]
    BadResponse,
    #[snafu(whatever, display("Request failed: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}
