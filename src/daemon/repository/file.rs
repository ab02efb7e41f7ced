use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use snafu::prelude::*;
use tempfile::NamedTempFile;

use crate::domain::repository::{SlotStorage, SlotStorageError};

/// A [`SlotStorage`] implementation which keeps every slot in its own
/// `<key>.json` file under one directory.
///
/// Writes go to a temporary file in the same directory, which is synced and
/// then renamed over the slot, so a crash leaves either the old or the new
/// content behind.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    directory: PathBuf,
}

impl FileSlotStorage {
    /// Creates a new [`FileSlotStorage`]. The directory is created on the first
    /// write.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Path of the file backing `key`.
    pub fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, SlotStorageError> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_whatever_context(|_| format!("Could not read {}", path.display()))
            }
        }
    }

    fn write(&self, key: &str, content: &[u8]) -> Result<(), SlotStorageError> {
        let path = self.path(key);
        fs::create_dir_all(&self.directory).with_whatever_context(|_| {
            format!("Could not create {}", self.directory.display())
        })?;

        let mut temp = NamedTempFile::new_in(&self.directory)
            .whatever_context("Could not create a temporary slot file")?;
        temp.write_all(content)
            .whatever_context("Could not write the temporary slot file")?;
        temp.as_file()
            .sync_all()
            .whatever_context("Could not sync the temporary slot file")?;
        temp.persist(&path)
            .map_err(|err| err.error)
            .with_whatever_context(|_| format!("Could not replace {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Wrote slot");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SlotStorageError> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_whatever_context(|_| format!("Could not remove {}", path.display()))
            }
        }
    }
}
