use std::fs::{self, File};
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use daemonize::{Daemonize, Error as DaemonizeError};
use snafu::prelude::*;
use sysinfo::{Pid, System};

/// A process manager responsible for daemonization and preventing multiple
/// running instance.
#[derive(Debug)]
pub struct ProcessController {
    app_name: String,
    pid_file: PathBuf,
    daemonize: bool,
}

impl ProcessController {
    /// Creates a new [`ProcessController`].
    pub fn new(app_name: String, pid_file: PathBuf, daemonize: bool) -> Self {
        Self {
            app_name,
            pid_file,
            daemonize,
        }
    }

    /// Finish process-related work, such as daemonization and multiple instance
    /// detection.
    ///
    /// # Errors
    ///
    /// This function will return an error if the preapration fails.
    pub fn start(self) -> Result<(), ControlProcessError> {
        let system = System::new_all();
        Self::detect_instance(&system, &self.pid_file, &self.app_name)?;

        if self.daemonize {
            Daemonize::new()
                .pid_file(&self.pid_file)
                .start()
                .context(DaemonizeSnafu)?;
        } else {
            let pid =
                sysinfo::get_current_pid().map_err(|err| GetPidSnafu { message: err }.build())?;
            Self::write_pid(&self.pid_file, pid)?;
        }

        Ok(())
    }

    /// Remove the PID file once the daemon shuts down. A missing file is not
    /// an error.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file could not be removed.
    pub fn release<P: AsRef<Path>>(pid_file: P) -> Result<(), ControlProcessError> {
        match fs::remove_file(pid_file) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context(FileSystemSnafu {
                message: "Could not remove PID file",
            }),
        }
    }

    /// Fail if the process recorded in `pid_file` is still alive and looks
    /// like `app_name`. A missing PID file or a dead process is fine.
    ///
    /// # Errors
    ///
    /// This function will return an error if another instance is running or
    /// the PID file is unreadable.
    pub fn detect_instance<P: AsRef<Path>>(
        system: &System,
        pid_file: P,
        app_name: &str,
    ) -> Result<(), ControlProcessError> {
        let mut file = match File::open(pid_file) {
            Ok(file) => file,
            Err(err) => match err.kind() {
                IoErrorKind::NotFound => return Ok(()),
                _ => {
                    return Err(err).context(FileSystemSnafu {
                        message: "Could not open PID file",
                    })
                }
            },
        };

        let mut content = String::new();
        file.read_to_string(&mut content).context(FileSystemSnafu {
            message: "Could not read PID file",
        })?;

        let pid = content
            .trim()
            .parse::<Pid>()
            .map_err(|_| InvalidPidFileSnafu.build())?;

        match system.process(pid) {
            Some(process) if Self::looks_like(&process.name().to_string_lossy(), app_name) => {
                MultipleProcessesSnafu.fail()
            }
            _ => {
                tracing::debug!(%pid, "Ignoring PID file of a dead process");
                Ok(())
            }
        }
    }

    /// Kernels may truncate process names, so a prefix of `app_name` counts.
    fn looks_like(name: &str, app_name: &str) -> bool {
        !name.is_empty() && (name.contains(app_name) || app_name.starts_with(name))
    }

    fn write_pid<P: AsRef<Path>>(pid_file: P, pid: Pid) -> Result<(), ControlProcessError> {
        let mut file = File::create(pid_file).context(FileSystemSnafu {
            message: "Could not write PID",
        })?;
        file.write_all(pid.to_string().as_bytes())
            .context(FileSystemSnafu {
                message: "Could not write PID",
            })?;
        Ok(())
    }
}

#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ControlProcessError {
    #[snafu(display("File system error: {message}"))]
    FileSystem {
        message: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not start multiple daemon processes"))]
    MultipleProcesses,
    #[snafu(display("Could not ensure process uniqueness with invalid PID file"))]
    InvalidPidFile,
    #[snafu(display("Failed to get PID: {message}"))]
    GetPid { message: String },
    #[snafu(display("Could not daemonize the process"))]
    Daemonize {
        #[snafu(source(from(DaemonizeError, Arc::new)))]
        source: Arc<DaemonizeError>,
    },
}
