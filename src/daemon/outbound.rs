use notify_rust::Notification;
use snafu::prelude::*;

use crate::domain::daemon::outbound::{AlertError, AlertPort};
use crate::domain::entity::{NotificationMessage, RestPhase, RestTimerState};

/// An [`AlertPort`] which shows a desktop notification once a rest interval
/// expires. Scheduling is driven by the daemon's own timer, so rescheduling
/// and cancelling only leave a trace in the log.
///
/// A disabled service never shows anything.
#[derive(Debug, Clone)]
pub struct NotifyService {
    app_name: String,
    message: NotificationMessage,
    enabled: bool,
}

impl NotifyService {
    pub fn new(app_name: String, message: NotificationMessage, enabled: bool) -> Self {
        Self {
            app_name,
            message,
            enabled,
        }
    }
}

#[async_trait::async_trait]
impl AlertPort for NotifyService {
    async fn reschedule(&self, state: &RestTimerState) -> Result<(), AlertError> {
        match state.phase {
            RestPhase::Paused => tracing::debug!(id = %state.id, "Alert disarmed while paused"),
            _ => tracing::debug!(id = %state.id, end = %state.end_date, "Alert armed"),
        }
        Ok(())
    }

    async fn cancel(&self) -> Result<(), AlertError> {
        tracing::debug!("Alerts cancelled");
        Ok(())
    }

    async fn expired(&self, state: &RestTimerState) -> Result<(), AlertError> {
        if !self.enabled {
            tracing::info!(id = %state.id, "Notifications are disabled, expiry not shown");
            return Ok(());
        }

        let (summary, body) = self.message.render(state);

        let mut notification = Notification::new();
        notification.appname(&self.app_name);
        notification.summary(&summary);

        if let Some(body) = body {
            notification.body(&body);
        }

        let _ = whatever!(
            notification.show_async().await,
            "Could not show notification",
        );

        tracing::info!(id = %state.id, "Notified expiry");
        Ok(())
    }
}
