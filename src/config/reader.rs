use std::fs::{self, OpenOptions};
use std::io::{Error as IoError, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# Settings of rest-timer. This file was written on first use, edit it freely.
# Every section and every key is optional.

[timer]
# Period of the countdown tick in milliseconds.
tick_interval_ms = 1000
# Delay before an acknowledged timer is cleared, in milliseconds.
grace_delay_ms = 500
# Minimum distance between two accepted heart rate samples, in seconds.
heart_rate_throttle_secs = 5
# Persisted timers older than this are dropped when the daemon starts.
max_state_age_hours = 24
# Step used by `rest-timer add` and `rest-timer subtract` without an amount.
adjust_step_secs = 30
# Rest duration used by `rest-timer start` without a duration.
default_rest_secs = 90

# Desktop notification shown when a rest interval expires. `body` may be
# removed. Both may refer to `{workout}`, `{exercise}`, `{next}`, `{set}` and
# `{total}`.
[notification]
enabled = true
summary = "Rest is over"
body = "Time for your next set."

# Where the running timer is persisted. Defaults to the XDG data directory.
# [storage]
# directory = "/path/to/state/directory"

# Socket and PID file of the daemon. Defaults to the XDG runtime directory.
# [runtime]
# socket = "/path/to/rest-timer.socket"
# pid = "/path/to/rest-timer-daemon.pid"
"#;

/// Read the configuration text at `path`. A missing file is written from
/// [`DEFAULT_CONTENT`] first when `create_new` is set.
///
/// # Errors
///
/// This function will return an error if the file is missing and may not be
/// created, or if it cannot be read or written.
pub fn read_content(path: &Path, create_new: bool) -> Result<String, ReadContentError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            ensure!(create_new, NotFoundSnafu { path });
            write_default(path)?;
            tracing::info!(path = %path.display(), "Wrote default configuration");
            Ok(DEFAULT_CONTENT.to_owned())
        }
        Err(err) => Err(err).context(AccessSnafu { path }),
    }
}

fn write_default(path: &Path) -> Result<(), ReadContentError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .context(CreateSnafu { path })?;
    file.write_all(DEFAULT_CONTENT.as_bytes())
        .context(CreateSnafu { path })
}

/// An error type for reading the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Configuration file {} does not exist", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not read configuration file {}", path.display()))]
    Access {
        path: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not write default configuration to {}", path.display()))]
    Create {
        path: PathBuf,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
