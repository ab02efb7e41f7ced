use std::io::Error as IoError;
use std::path::PathBuf;
use std::sync::Arc;

use snafu::prelude::*;
use xdg::{BaseDirectories, BaseDirectoriesError};

/// The XDG base directories of one application. Every path lies in a
/// subdirectory named after the application.
pub struct Xdg {
    base: BaseDirectories,
}

impl Xdg {
    /// # Errors
    ///
    /// This function will return an error if `HOME` is not set.
    pub fn new(app_name: &str) -> Result<Self, XdgError> {
        let base = BaseDirectories::with_prefix(app_name).context(InitSnafu)?;
        Ok(Self { base })
    }

    /// The configuration file `name`. Its directory is created.
    ///
    /// # Errors
    ///
    /// This function will return an error if the directory cannot be created.
    pub fn config_file(&self, name: &str) -> Result<PathBuf, XdgError> {
        self.base
            .place_config_file(name)
            .context(PlaceConfigSnafu { name })
    }

    /// The runtime file `name`, such as a socket. Nothing is created.
    ///
    /// # Errors
    ///
    /// This function will return an error if `XDG_RUNTIME_DIR` is unset or
    /// unsafe to use.
    pub fn runtime_file(&self, name: &str) -> Result<PathBuf, XdgError> {
        self.base.get_runtime_file(name).context(RuntimeSnafu)
    }

    /// The entry `name` of the data directory. Nothing is created.
    pub fn data_path(&self, name: &str) -> PathBuf {
        self.base.get_data_file(name)
    }
}

/// An error for XDG-related operations.
#[derive(Debug, Snafu, Clone)]
pub enum XdgError {
    #[snafu(display("Could not read XDG settings"))]
    Init {
        #[snafu(source(from(BaseDirectoriesError, Arc::new)))]
        source: Arc<BaseDirectoriesError>,
    },
    #[snafu(display("Could not create the configuration directory for {name}"))]
    PlaceConfig {
        name: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("XDG runtime directory is not available"))]
    Runtime {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
