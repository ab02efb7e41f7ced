use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rest_timer::config::{self, Configuration};
use rest_timer::daemon::app::{Server, UnixListener};
use rest_timer::daemon::outbound::NotifyService;
use rest_timer::daemon::repository::FileSlotStorage;
use rest_timer::daemon::runtime::{Access, Environment, ProcessController};
use rest_timer::domain::clock::SystemClock;
use rest_timer::domain::daemon::ApplicationCore;
use rest_timer::utils::xdg::Xdg;
use snafu::{prelude::*, Whatever};
use tokio::signal::unix::{signal, SignalKind};

use crate::cli::Arguments;

const APP_NAME: &str = "rest-timer";
const DAEMON_NAME: &str = "rest-timer-daemon";

pub struct EnvironmentPath {
    socket: PathBuf,
    pid: PathBuf,
    storage: PathBuf,
}

/// Everything settled before the async runtime starts.
pub struct Prepared {
    configuration: Configuration,
    paths: EnvironmentPath,
}

pub fn prepare(args: &Arguments) -> Result<Prepared, Whatever> {
    let configuration = configuration(args)?;
    let paths = environment(args, &configuration)?;
    process(args, &paths.pid)?;
    Ok(Prepared {
        configuration,
        paths,
    })
}

pub async fn run(prepared: Prepared) -> Result<(), Whatever> {
    let Prepared {
        configuration,
        paths,
    } = prepared;

    let listener = UnixListener::new(&paths.socket)
        .whatever_context(format!("Could not bind to {}", paths.socket.display()))?;
    let core = core(&configuration, &paths.storage).await?;
    let server = Server::new(Box::new(listener), core);

    tracing::info!(socket = %paths.socket.display(), "Daemon is listening");
    let res = tokio::select! {
        res = server.serve() => res.whatever_context("Server failed to serve with fatal"),
        res = shutdown() => res,
    };

    cleanup(&paths);
    res
}

fn configuration(args: &Arguments) -> Result<Configuration, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME.to_owned()),
    };

    res.whatever_context("Could not load configuration")
}

fn environment(
    args: &Arguments,
    configuration: &Configuration,
) -> Result<EnvironmentPath, Whatever> {
    let xdg = Xdg::new(APP_NAME).whatever_context("Could not use XDG base directories")?;
    let mut env = Environment::new();

    let socket = match args.socket.as_ref().or(configuration.runtime.socket.as_ref()) {
        Some(path) => runtime_file(&mut env, path.clone(), Access::Shared)?,
        None => {
            let path = xdg
                .runtime_file("daemon.socket")
                .whatever_context("Could not use XDG base directories")?;
            runtime_file(&mut env, path, Access::Private)?
        }
    };
    let pid = match &configuration.runtime.pid {
        Some(path) => runtime_file(&mut env, path.clone(), Access::Shared)?,
        None => {
            let path = xdg
                .runtime_file("daemon.pid")
                .whatever_context("Could not use XDG base directories")?;
            runtime_file(&mut env, path, Access::Private)?
        }
    };
    let storage = match &configuration.storage.directory {
        Some(path) => (path.clone(), Access::Shared),
        None => (xdg.data_path("state"), Access::Private),
    };
    env.require(&storage.0, storage.1);

    env.setup()
        .whatever_context("Could not setup environment")?;

    Ok(EnvironmentPath {
        socket,
        pid,
        storage: storage.0,
    })
}

/// Require the directory holding the runtime file `path`.
fn runtime_file(
    env: &mut Environment,
    path: PathBuf,
    access: Access,
) -> Result<PathBuf, Whatever> {
    let directory = path
        .parent()
        .whatever_context(format!("Invalid runtime path: {}", path.display()))?;
    env.require(directory, access);
    Ok(path)
}

fn process<P: AsRef<Path>>(args: &Arguments, pid_path: P) -> Result<(), Whatever> {
    ProcessController::new(
        DAEMON_NAME.to_owned(),
        pid_path.as_ref().to_path_buf(),
        args.daemonize,
    )
    .start()
    .whatever_context("Could not prepare process")?;
    Ok(())
}

async fn core(configuration: &Configuration, storage: &Path) -> Result<ApplicationCore, Whatever> {
    let policy = configuration
        .policy()
        .whatever_context("Invalid timer settings")?;
    let message = configuration
        .notification()
        .whatever_context("Invalid notification settings")?;

    let clock = Arc::new(SystemClock);
    let storage = Arc::new(FileSlotStorage::new(storage));
    let alerts = Arc::new(NotifyService::new(
        APP_NAME.to_owned(),
        message,
        configuration.notification.enabled,
    ));

    Ok(ApplicationCore::setup(clock, storage, alerts, policy).await)
}

async fn shutdown() -> Result<(), Whatever> {
    let mut terminate =
        signal(SignalKind::terminate()).whatever_context("Could not listen to SIGTERM")?;

    tokio::select! {
        _ = terminate.recv() => tracing::info!("Received SIGTERM"),
        res = tokio::signal::ctrl_c() => {
            res.whatever_context("Could not listen to SIGINT")?;
            tracing::info!("Received SIGINT");
        }
    }
    Ok(())
}

fn cleanup(paths: &EnvironmentPath) {
    if let Err(err) = fs::remove_file(&paths.socket) {
        if err.kind() != IoErrorKind::NotFound {
            tracing::warn!(err = %err, "Could not remove socket");
        }
    }
    if let Err(err) = ProcessController::release(&paths.pid) {
        tracing::warn!(err = %snafu::Report::from_error(err), "Could not remove PID file");
    }
    tracing::info!("Daemon stopped");
}
