use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::repository::{SlotStorage, SlotStorageError};

/// A [`SlotStorage`] implementation which keeps slots in memory. Clones share
/// the same slots, so the content outlives any single owner.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStorage {
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemorySlotStorage {
    /// Creates a new empty [`MemorySlotStorage`].
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotStorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn write(&self, key: &str, content: &[u8]) -> Result<(), SlotStorageError> {
        self.slots().insert(key.to_owned(), content.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotStorageError> {
        self.slots().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_slot_storage_operation() {
        let storage = MemorySlotStorage::new();
        assert_eq!(storage.read("slot").unwrap(), None);

        storage.write("slot", b"first").unwrap();
        storage.write("slot", b"second").unwrap();
        assert_eq!(storage.read("slot").unwrap(), Some(b"second".to_vec()));

        storage.remove("slot").unwrap();
        storage.remove("slot").unwrap();
        assert_eq!(storage.read("slot").unwrap(), None);
    }

    #[test]
    fn memory_slot_storage_clones_share_slots() {
        let storage = MemorySlotStorage::new();
        let other = storage.clone();
        storage.write("slot", b"shared").unwrap();
        assert_eq!(other.read("slot").unwrap(), Some(b"shared".to_vec()));
        assert_eq!(other.read("elsewhere").unwrap(), None);
    }
}
