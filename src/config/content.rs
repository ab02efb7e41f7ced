use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use snafu::prelude::*;

use crate::domain::daemon::worker::TimerPolicy;
use crate::domain::entity::notification::TryNewNotificationMessageError;
use crate::domain::entity::NotificationMessage;

/// Content of the configuration file. Every section may be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub notification: NotificationSection,
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub runtime: RuntimeSection,
}

impl Configuration {
    /// Build the [`TimerPolicy`] described by the `timer` section.
    ///
    /// # Errors
    ///
    /// This function will return an error if a setting is zero where that
    /// makes no sense.
    pub fn policy(&self) -> Result<TimerPolicy, InvalidPolicyError> {
        TimerPolicy::try_from(&self.timer)
    }

    /// Build the message shown when a rest interval expires.
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn notification(&self) -> Result<NotificationMessage, TryNewNotificationMessageError> {
        NotificationMessage::try_new(
            self.notification.summary.clone(),
            self.notification.body.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerSection {
    pub tick_interval_ms: u64,
    pub grace_delay_ms: u64,
    pub heart_rate_throttle_secs: u64,
    pub max_state_age_hours: u64,
    pub adjust_step_secs: u64,
    pub default_rest_secs: u64,
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            grace_delay_ms: 500,
            heart_rate_throttle_secs: 5,
            max_state_age_hours: 24,
            adjust_step_secs: 30,
            default_rest_secs: 90,
        }
    }
}

impl TryFrom<&TimerSection> for TimerPolicy {
    type Error = InvalidPolicyError;

    fn try_from(value: &TimerSection) -> Result<Self, Self::Error> {
        ensure!(value.tick_interval_ms > 0, ZeroSnafu { key: "tick_interval_ms" });
        ensure!(
            value.heart_rate_throttle_secs > 0,
            ZeroSnafu { key: "heart_rate_throttle_secs" }
        );
        ensure!(value.max_state_age_hours > 0, ZeroSnafu { key: "max_state_age_hours" });

        Ok(TimerPolicy {
            tick_interval: Duration::from_millis(value.tick_interval_ms),
            grace_delay: Duration::from_millis(value.grace_delay_ms),
            heart_rate_throttle: Duration::from_secs(value.heart_rate_throttle_secs),
            max_state_age: Duration::from_secs(value.max_state_age_hours.saturating_mul(3600)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationSection {
    /// Show a desktop notification when a rest interval expires.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default = "default_summary")]
    pub summary: String,
    pub body: Option<String>,
}

impl Default for NotificationSection {
    fn default() -> Self {
        Self {
            enabled: true,
            summary: default_summary(),
            body: Some("Time for your next set.".to_owned()),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

fn default_summary() -> String {
    "Rest is over".to_owned()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageSection {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuntimeSection {
    pub socket: Option<PathBuf>,
    pub pid: Option<PathBuf>,
}

/// An error type of building a [`TimerPolicy`] from configuration.
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidPolicyError {
    #[snafu(display("Timer setting `{key}` must be positive"))]
    Zero { key: &'static str },
}
