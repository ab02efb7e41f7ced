use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::RestTimerState;

/// A public port for the collaborators that alert the user about a rest
/// interval: scheduled notifications, overlays, haptics and so on.
///
/// Failures are reported back to the caller, which logs them and carries on.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AlertPort: Send + Sync + 'static {
    /// Arm or rearm the alert for `state`. A paused state disarms it.
    ///
    /// # Errors
    ///
    /// This function will return an error if the alert could not be scheduled.
    async fn reschedule(&self, state: &RestTimerState) -> Result<(), AlertError>;

    /// Drop every pending alert.
    ///
    /// # Errors
    ///
    /// This function will return an error if pending alerts could not be
    /// dropped.
    async fn cancel(&self) -> Result<(), AlertError>;

    /// The rest interval of `state` has just expired.
    ///
    /// # Errors
    ///
    /// This function will return an error if the user could not be alerted.
    async fn expired(&self, state: &RestTimerState) -> Result<(), AlertError>;
}

/// An error type of the alert operations.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub))]
pub enum AlertError {
    #[snafu(whatever, display("Could not alert: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}
