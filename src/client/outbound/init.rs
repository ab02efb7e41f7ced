use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use sysinfo::System;
use tokio::process::Command;
use tracing::Level;

use crate::client::outbound::endpoint::Endpoint;
use crate::daemon::runtime::{ControlProcessError, ProcessController};
use crate::domain::client::outbound::{InitDaemonError, InitPort};

const READY_ATTEMPTS: u32 = 20;
const READY_INTERVAL: Duration = Duration::from_millis(100);

/// An [`InitPort`] implementation which spawns the daemon executable and
/// waits until its socket accepts connections.
pub struct InitService {
    executable: Option<PathBuf>,
    pid_file: PathBuf,
    daemon_name: String,
    config: Option<PathBuf>,
    verbosity: Level,
    endpoint: Endpoint,
}

impl InitService {
    pub fn new(
        executable: Option<PathBuf>,
        pid_file: PathBuf,
        daemon_name: String,
        config: Option<PathBuf>,
        verbosity: Level,
        endpoint: Endpoint,
    ) -> Self {
        Self {
            executable,
            pid_file,
            daemon_name,
            config,
            verbosity,
            endpoint,
        }
    }

    fn detect_instance(&self) -> Result<(), InitDaemonError> {
        let system = System::new_all();
        match ProcessController::detect_instance(&system, &self.pid_file, &self.daemon_name) {
            Ok(()) => Ok(()),
            Err(ControlProcessError::MultipleProcesses) => Err(InitDaemonError::AlreadyRunning),
            Err(err) => Err(InitDaemonError::Unknown {
                message: "Could not detect daemon".to_owned(),
                source: Some(err.into()),
            }),
        }
    }

    async fn wait_ready(&self) -> Result<(), InitDaemonError> {
        for _ in 0..READY_ATTEMPTS {
            if self.endpoint.connect().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(READY_INTERVAL).await;
        }
        Err(InitDaemonError::Unknown {
            message: "Daemon did not start listening".to_owned(),
            source: None,
        })
    }
}

#[async_trait::async_trait]
impl InitPort for InitService {
    async fn init(&self) -> Result<(), InitDaemonError> {
        self.detect_instance()?;

        let mut command = match &self.executable {
            Some(executable) => Command::new(executable),
            None => Command::new(&self.daemon_name),
        };

        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        command.arg("--verbosity").arg(self.verbosity.to_string());
        command.arg("--daemonize");

        if let Some(path) = self.config.as_ref() {
            command.arg("--config").arg(path);
        }

        let mut child = command.spawn().map_err(|err| match err.kind() {
            IoErrorKind::NotFound => InitDaemonError::NotFound,
            _ => InitDaemonError::Unknown {
                message: "Could not spawn daemon process".to_owned(),
                source: Some(err.into()),
            },
        })?;

        let status = child.wait().await.map_err(|err| InitDaemonError::Unknown {
            message: "Could not get daemon status".to_owned(),
            source: Some(err.into()),
        })?;

        if !status.success() {
            return Err(InitDaemonError::Unknown {
                message: "Daemon exited abnormally".to_owned(),
                source: None,
            });
        }

        self.wait_ready().await?;
        tracing::info!("Daemon is ready");
        Ok(())
    }
}
