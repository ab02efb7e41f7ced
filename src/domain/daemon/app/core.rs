use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::daemon::app::service::RestTimerService;
use crate::domain::daemon::inbound::RestTimerPort;
use crate::domain::daemon::outbound::AlertPort;
use crate::domain::daemon::worker::{self, TimerPolicy};
use crate::domain::repository::SlotStorage;

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub timer: Arc<dyn RestTimerPort>,
}

impl ApplicationCore {
    /// Initialize the application by injecting external repositories and
    /// adapters. The persisted rest timer is restored before this returns.
    pub async fn setup(
        clock: Arc<dyn Clock>,
        storage: Arc<dyn SlotStorage>,
        alerts: Arc<dyn AlertPort>,
        policy: TimerPolicy,
    ) -> ApplicationCore {
        let worker = worker::spawn(Arc::clone(&clock), storage, alerts, policy).await;
        let timer = Arc::new(RestTimerService::new(Arc::new(worker), clock));
        ApplicationCore { timer }
    }
}
