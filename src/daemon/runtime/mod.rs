mod environment;
mod process;

pub use environment::{Access, Environment, SetupEnvironmentError};
pub use process::{ControlProcessError, ProcessController};
