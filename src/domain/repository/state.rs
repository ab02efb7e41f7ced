use std::sync::Arc;

use serde_json::Error as SerdeError;
use snafu::prelude::*;

use crate::domain::entity::RestTimerState;
use crate::domain::repository::slot::{SlotStorage, SlotStorageError};

/// The slot holding the current rest timer. An empty slot means that no rest
/// timer is active.
pub const REST_TIMER_SLOT: &str = "rest-timer-state";

/// The only component that reads or writes the persisted rest timer.
#[derive(Clone)]
pub struct StateGateway {
    storage: Arc<dyn SlotStorage>,
    key: String,
}

impl StateGateway {
    /// Creates a new [`StateGateway`] over the default slot.
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self::with_key(storage, REST_TIMER_SLOT)
    }

    /// Creates a new [`StateGateway`] over a custom slot.
    pub fn with_key(storage: Arc<dyn SlotStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Load the persisted state, `None` if nothing was persisted.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage fails or the content
    /// could not be deserialized.
    pub fn load(&self) -> Result<Option<RestTimerState>, LoadStateError> {
        let Some(content) = self.storage.read(&self.key).context(StorageSnafuL)? else {
            return Ok(None);
        };

        let state = serde_json::from_slice(&content).context(CorruptSnafuL)?;
        Ok(Some(state))
    }

    /// Persist `state`, replacing whatever was persisted before. The state is
    /// serialized completely before the storage is touched.
    ///
    /// # Errors
    ///
    /// This function will return an error if serialization or the storage
    /// fails.
    pub fn save(&self, state: &RestTimerState) -> Result<(), SaveStateError> {
        let content = serde_json::to_vec(state).context(SerializeSnafuS)?;
        self.storage
            .write(&self.key, &content)
            .context(StorageSnafuS)?;
        tracing::debug!(bytes = content.len(), "Persisted rest timer");
        Ok(())
    }

    /// Erase the persisted state.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage fails.
    pub fn erase(&self) -> Result<(), EraseStateError> {
        self.storage.remove(&self.key).context(EraseSnafu)?;
        tracing::debug!("Erased persisted rest timer");
        Ok(())
    }
}

/// An error type of loading the persisted state.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(context(suffix(SnafuL)))]
pub enum LoadStateError {
    #[snafu(display("Could not read the rest timer slot"))]
    Storage { source: SlotStorageError },
    #[snafu(display("Persisted rest timer is corrupt"))]
    Corrupt { source: SerdeError },
}

/// An error type of persisting the state.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(context(suffix(SnafuS)))]
pub enum SaveStateError {
    #[snafu(display("Could not serialize the rest timer"))]
    Serialize { source: SerdeError },
    #[snafu(display("Could not write the rest timer slot"))]
    Storage { source: SlotStorageError },
}

/// An error type of erasing the persisted state.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EraseStateError {
    #[snafu(display("Could not erase the rest timer slot"))]
    Erase { source: SlotStorageError },
}
