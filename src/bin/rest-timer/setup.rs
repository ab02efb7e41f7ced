use std::path::PathBuf;
use std::sync::Arc;

use rest_timer::client::outbound::{Endpoint, InitService, TimerService};
use rest_timer::client::{Client, ClientSettings};
use rest_timer::config::{self, Configuration};
use rest_timer::domain::client::ApplicationCore;
use rest_timer::utils::xdg::Xdg;
use snafu::{prelude::*, Whatever};
use tracing::Level;

use crate::cli::{Arguments, Command};

const APP_NAME: &str = "rest-timer";
const DAEMON_NAME: &str = "rest-timer-daemon";

struct EnvironmentPath {
    socket: PathBuf,
    pid: PathBuf,
}

pub fn bootstrap(args: &Arguments) -> Result<Client, Whatever> {
    let configuration = configuration(args)?;
    let env_path = environment(&configuration)?;
    let settings = ClientSettings {
        default_rest: i64::try_from(configuration.timer.default_rest_secs)
            .whatever_context("Default rest duration is too large")?,
        adjust_step: i64::try_from(configuration.timer.adjust_step_secs)
            .whatever_context("Adjustment step is too large")?,
    };
    let core = core(args, env_path);
    Ok(Client::new(core, settings))
}

fn configuration(args: &Arguments) -> Result<Configuration, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME.to_owned()),
    };

    res.whatever_context("Could not load configuration")
}

fn environment(configuration: &Configuration) -> Result<EnvironmentPath, Whatever> {
    let runtime_file = |custom: &Option<PathBuf>, name: &str| match custom {
        Some(path) => Ok(path.clone()),
        None => Xdg::new(APP_NAME)
            .and_then(|xdg| xdg.runtime_file(name))
            .whatever_context("Could not use XDG base directories"),
    };

    Ok(EnvironmentPath {
        socket: runtime_file(&configuration.runtime.socket, "daemon.socket")?,
        pid: runtime_file(&configuration.runtime.pid, "daemon.pid")?,
    })
}

fn core(args: &Arguments, env_path: EnvironmentPath) -> Arc<ApplicationCore> {
    let (executable, verbosity) = match &args.command {
        Command::Init {
            executable,
            verbosity,
        } => (executable.clone(), *verbosity),
        _ => (None, Level::INFO),
    };

    let endpoint = Endpoint::socket(env_path.socket);

    let init_port = Arc::new(InitService::new(
        executable,
        env_path.pid,
        DAEMON_NAME.to_owned(),
        args.config.clone(),
        verbosity,
        endpoint.clone(),
    ));

    let timer_port = Arc::new(TimerService::new(endpoint));

    let core = ApplicationCore::setup(init_port, timer_port);
    Arc::new(core)
}
