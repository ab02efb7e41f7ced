use std::error::Error as StdError;

use snafu::prelude::*;

/// An abstract durable key-value store holding opaque byte slots.
#[cfg_attr(test, mockall::automock)]
pub trait SlotStorage: Send + Sync + 'static {
    /// Read the content of a slot, or `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage is unreadable.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotStorageError>;

    /// Replace the content of a slot as a whole.
    ///
    /// # Errors
    ///
    /// This function will return an error if the content could not be made
    /// durable. The previous content must be left intact in that case.
    fn write(&self, key: &str, content: &[u8]) -> Result<(), SlotStorageError>;

    /// Erase a slot. Erasing an empty slot succeeds.
    ///
    /// # Errors
    ///
    /// This function will return an error if the slot could not be removed.
    fn remove(&self, key: &str) -> Result<(), SlotStorageError>;
}

/// An error type of accessing a [`SlotStorage`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub))]
pub enum SlotStorageError {
    #[snafu(whatever, display("Slot storage failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}
