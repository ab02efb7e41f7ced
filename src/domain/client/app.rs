use std::sync::Arc;

use crate::domain::client::outbound::{InitPort, TimerPort};

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub init: Arc<dyn InitPort>,
    pub timer: Arc<dyn TimerPort>,
}

impl ApplicationCore {
    /// Create a new [`ApplicationCore`] by injecting external adapters.
    pub fn setup(init: Arc<dyn InitPort>, timer: Arc<dyn TimerPort>) -> ApplicationCore {
        Self { init, timer }
    }
}
