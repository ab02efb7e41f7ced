use std::fs::{self, DirBuilder, Permissions};
use std::io::Error as IoError;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

/// Mode of the directories the daemon owns.
const PRIVATE_MODE: u32 = 0o700;

/// Who may look into a directory the daemon uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// A directory chosen by the user. Its mode is left alone.
    Shared,
    /// A directory the daemon owns, readable by its owner only.
    Private,
}

/// The directories the daemon needs before it binds its socket, writes its
/// PID file and persists the timer.
#[derive(Debug, Default)]
pub struct Environment {
    directories: Vec<(PathBuf, Access)>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `directory` to exist. A directory required twice is private if
    /// either requirement says so.
    pub fn require<P: AsRef<Path>>(&mut self, directory: P, access: Access) {
        let directory = directory.as_ref();
        match self.directories.iter_mut().find(|(path, _)| path == directory) {
            Some((_, existing)) if access == Access::Private => *existing = access,
            Some(_) => {}
            None => self.directories.push((directory.to_path_buf(), access)),
        }
    }

    /// Create the required directories and restrict the private ones.
    ///
    /// # Errors
    ///
    /// This function will return an error if a directory cannot be created or
    /// its mode cannot be changed.
    pub fn setup(&self) -> Result<(), SetupEnvironmentError> {
        for (directory, access) in &self.directories {
            let mut builder = DirBuilder::new();
            builder.recursive(true);
            if *access == Access::Private {
                builder.mode(PRIVATE_MODE);
            }
            builder
                .create(directory)
                .context(CreateDirectorySnafu { dir: directory })?;

            if *access == Access::Private {
                restrict(directory)?;
            }
            tracing::debug!(dir = %directory.display(), ?access, "Prepared directory");
        }
        Ok(())
    }
}

/// Enforce [`PRIVATE_MODE`] on a directory that may predate the daemon or
/// have been created under a permissive umask.
fn restrict(directory: &Path) -> Result<(), SetupEnvironmentError> {
    let mode = fs::metadata(directory)
        .context(RestrictSnafu { dir: directory })?
        .permissions()
        .mode();
    if mode & 0o777 != PRIVATE_MODE {
        fs::set_permissions(directory, Permissions::from_mode(PRIVATE_MODE))
            .context(RestrictSnafu { dir: directory })?;
    }
    Ok(())
}

/// An error for setting up the running environment.
#[derive(Debug, Snafu, Clone)]
pub enum SetupEnvironmentError {
    #[snafu(display("Could not create directory {}", dir.display()))]
    CreateDirectory {
        dir: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not make directory {} private", dir.display()))]
    Restrict {
        dir: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
