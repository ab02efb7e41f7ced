//! Configuration shared by the daemon and the client.

mod content;
mod reader;

use std::path::Path;

pub use content::{
    Configuration, InvalidPolicyError, NotificationSection, RuntimeSection, StorageSection,
    TimerSection,
};
pub use reader::{ReadContentError, DEFAULT_CONTENT};

use snafu::prelude::*;
use toml::de::Error as DeError;

use crate::domain::entity::notification::TryNewNotificationMessageError;
use crate::utils::xdg::{Xdg, XdgError};

/// An error type for loading configuraton from files.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum LoadConfigurationError {
    #[snafu(display("Could not resolve XDG configuration directory"))]
    XdgConfig { source: XdgError },
    #[snafu(display("Could not read content from file"))]
    Read { source: ReadContentError },
    #[snafu(display("Could not parse invalid configurations"))]
    Parse { source: DeError },
    #[snafu(display("Could not accept timer settings"))]
    Policy { source: InvalidPolicyError },
    #[snafu(display("Could not accept notification settings"))]
    Notification {
        source: TryNewNotificationMessageError,
    },
}

/// Read configuration from given path. Optionally create one from default
/// template if it doesn't exists. The returned configuration is validated.
///
/// # Errors
///
/// This function will return an error if reading content from file fails,
/// parsing configuration fails or some setting is out of range.
pub fn load<P: AsRef<Path>>(
    path: P,
    create_new: bool,
) -> Result<Configuration, LoadConfigurationError> {
    let content = reader::read_content(path.as_ref(), create_new).context(ReadSnafu)?;
    parse(&content)
}

/// Read configuration from a custom path. This won't create any new file by
/// default.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_path<P: AsRef<Path>>(path: P) -> Result<Configuration, LoadConfigurationError> {
    load(path, false)
}

/// Read configuration from XDG configuration directory. Create one from default
/// template if it doesn't exists.
///
/// # Errors
///
/// This function will return an error if reading content from file fails or
/// parsing configuration fails.
pub fn load_with_xdg(app_name: String) -> Result<Configuration, LoadConfigurationError> {
    let path = Xdg::new(&app_name)
        .and_then(|xdg| xdg.config_file("config.toml"))
        .context(XdgConfigSnafu)?;
    load(path, true)
}

fn parse(content: &str) -> Result<Configuration, LoadConfigurationError> {
    let configuration: Configuration = toml::from_str(content).context(ParseSnafu)?;
    configuration.policy().context(PolicySnafu)?;
    configuration.notification().context(NotificationSnafu)?;
    Ok(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn load_creates_default() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        let configuration = load(file.path(), true).unwrap();
        assert_eq!(configuration, Configuration::default());
        file.assert(DEFAULT_CONTENT);
    }

    #[test]
    fn load_with_path_missing() {
        let tmp = TempDir::new().expect("Test environment should support temporary directories");
        let file = tmp.child("config.toml");

        assert!(matches!(
            load_with_path(file.path()),
            Err(LoadConfigurationError::Read { .. })
        ));
    }

    #[test]
    fn parse_rejects_zero_staleness() {
        let result = parse("[timer]\nmax_state_age_hours = 0\n");
        assert!(matches!(result, Err(LoadConfigurationError::Policy { .. })));
    }

    #[test]
    fn parse_rejects_blank_summary() {
        let result = parse("[notification]\nsummary = \"  \"\n");
        assert!(matches!(
            result,
            Err(LoadConfigurationError::Notification { .. })
        ));
    }

    #[test]
    fn parse_rejects_malformed() {
        let result = parse("[timer]\ntick_interval_ms = \"fast\"\n");
        assert!(matches!(result, Err(LoadConfigurationError::Parse { .. })));
    }
}
